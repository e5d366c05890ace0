#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]
#![forbid(unsafe_code)]

//! The effcheck oracle: validates fully type-and-effect annotated terms.
//!
//! ```rust
//! use effcheck_ast::Term;
//! use effcheck_checker::{check, TypeEnv};
//! use effcheck_types::{Eff, Ty};
//!
//! // let x : int = 5 in x
//! let body = Term::var(Ty::int(), "x");
//! let term = Term::let_("x", Ty::int(), Term::int(5), body, Ty::int(), Eff::Pure);
//! assert_eq!(check(&TypeEnv::new(), &term).unwrap(), (Ty::int(), Eff::Pure));
//! ```

mod checker;
mod env;
mod error;
mod pattern;

pub use checker::{check, CheckResult, Checker, CheckerConfig, DEFAULT_MAX_DEPTH};
pub use env::TypeEnv;
pub use error::{CheckError, FailureClass, FailureKind, Rejection};
pub use pattern::{check_pattern, PatternEnv};
