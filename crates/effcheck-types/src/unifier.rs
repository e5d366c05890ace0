//! Syntactic unification over the type grammar.
//!
//! ```rust
//! use effcheck_types::{unify, Ty as T, TypeVarId as V};
//! let x = T::var(V(0));
//! let s = unify(&x, &T::int()).unwrap();
//! assert_eq!(s.apply(&x), T::int());
//! ```
//!
//! Latent effects on arrows are ignored: unification solves for shapes.
//! Callers that compare solved types structurally normalize effects first
//! (see [`crate::normalize_effects`]).

use crate::subst::Subst;
use crate::ty::{occurs, Ty, TypeVarId};
use thiserror::Error;
use tracing::trace;

pub type UnifyResult<T> = Result<T, UnifyError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnifyError {
    #[error("type mismatch: {0} vs {1}")]
    Mismatch(Ty, Ty),
    #[error("occurs check failed: {var} in {ty}")]
    Occurs { var: TypeVarId, ty: Ty },
    /// Tuple arity differs: (a * b * ...) vs (x * y * ...) with different lengths
    #[error("tuple arity mismatch: {left} vs {right}")]
    Arity { left: usize, right: usize },
}

/// Accumulates an idempotent solution across several equations.
#[derive(Clone, Debug, Default)]
pub struct Unifier {
    subst: Subst,
}

impl Unifier {
    pub fn new() -> Self {
        Self {
            subst: Subst::new(),
        }
    }
    pub fn subst(&self) -> &Subst {
        &self.subst
    }
    pub fn into_subst(self) -> Subst {
        self.subst
    }

    /// Solve `a = b` under the current solution, extending it.
    ///
    /// When both sides are variables the left one is bound to the right one.
    pub fn unify(&mut self, a: &Ty, b: &Ty) -> UnifyResult<()> {
        let a = self.subst.apply(a);
        let b = self.subst.apply(b);
        match (a, b) {
            (Ty::Var(v), t) | (t, Ty::Var(v)) => self.unify_var(v, t),
            (Ty::Const(c1), Ty::Const(c2)) if c1 == c2 => Ok(()),

            (Ty::Option(x), Ty::Option(y)) | (Ty::List(x), Ty::List(y)) => self.unify(&x, &y),

            (Ty::Tuple(xs), Ty::Tuple(ys)) => {
                if xs.len() != ys.len() {
                    return Err(UnifyError::Arity {
                        left: xs.len(),
                        right: ys.len(),
                    });
                }
                // Each component sees the bindings made by the ones before it.
                for (x, y) in xs.iter().zip(ys.iter()) {
                    self.unify(x, y)?;
                }
                Ok(())
            }

            (Ty::Arrow(a1, _, r1), Ty::Arrow(a2, _, r2)) => {
                self.unify(&a1, &a2)?;
                self.unify(&r1, &r2)
            }

            (x, y) => Err(UnifyError::Mismatch(x, y)),
        }
    }

    fn unify_var(&mut self, v: TypeVarId, t: Ty) -> UnifyResult<()> {
        if matches!(t, Ty::Var(w) if w == v) {
            return Ok(());
        }
        if occurs(v, &t) {
            return Err(UnifyError::Occurs { var: v, ty: t });
        }
        trace!("unify: bind {} := {}", v, t);
        self.subst.bind(v, t);
        Ok(())
    }
}

/// Solve a single equation from scratch.
pub fn unify(a: &Ty, b: &Ty) -> UnifyResult<Subst> {
    let mut u = Unifier::new();
    u.unify(a, b)?;
    Ok(u.into_subst())
}
