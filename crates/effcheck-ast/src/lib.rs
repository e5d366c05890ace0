#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]
#![forbid(unsafe_code)]

//! Fully annotated term language checked by the effcheck oracle.
//!
//! Terms arrive from a generator already carrying a declared type and effect
//! at every node; this crate only models them, locates subterms by path and
//! renders them for diagnostics.

pub mod path;
mod pretty;
pub mod term;

pub use path::{Step, TermPath};
pub use term::{Case, CtorTag, Literal, Pattern, Term};
