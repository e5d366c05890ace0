#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]
#![forbid(unsafe_code)]

//! Type and effect algebra for the effcheck oracle: the type grammar, the
//! effect lattice, substitutions, unification and the compatibility
//! (instance-of) relation.

mod compat;
mod effects;
mod session;
mod subst;
mod ty;
mod unifier;

#[cfg(test)]
mod tests;

pub use compat::{compatible, instantiation};
pub use effects::{Eff, EffectError};
pub use session::Session;
pub use subst::Subst;
pub use ty::{arity, free_type_vars, normalize_effects, occurs, Ty, TyConst, TypeVarId};
pub use unifier::{unify, UnifyError, UnifyResult, Unifier};

/// Shorthand for the effect with no tracked side effect.
pub const NO_EFF: Eff = Eff::Pure;
