#![deny(unused_must_use)]
#![forbid(unsafe_code)]

//! Library side of the `effcheck` binary: input loading and verdict reports.

pub mod input;
pub mod report;

pub use input::{
    is_illegal_effect, load_env, load_term, parse_ty, read_input, IllegalEffectInput,
    MAX_INPUT_SIZE,
};
pub use report::{fingerprint, Report, MAX_SUBTERM_CHARS};
