//! Checker failures.
//!
//! A failure is either a *rejection* (some typing precondition is false for
//! this term) or an *invariant violation* (the checker reached a state the
//! algebra says is unreachable). Both carry the path of the subterm where
//! they were detected. There are no partial results.

use effcheck_ast::{CtorTag, Step, TermPath};
use effcheck_types::{Eff, Ty, UnifyError};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {path}")]
pub struct CheckError {
    pub path: TermPath,
    pub kind: FailureKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("rejected: {0}")]
    Rejected(#[from] Rejection),
    /// Indicates a bug in the checker or a malformed input that slipped past
    /// the input boundary, never an ill-typed term.
    #[error("internal invariant violated: {0}")]
    Invariant(String),
}

/// Why a term was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),
    #[error("checked type {checked} is not compatible with declared type {declared}")]
    Incompatible { checked: Ty, declared: Ty },
    /// Both sides of an application may side-effect; evaluation order is unspecified.
    #[error("function ({fun_eff}) and argument ({arg_eff}) are both effectful")]
    OrderDependentEffects { fun_eff: Eff, arg_eff: Eff },
    #[error("cannot unify {left} with {right}: {source}")]
    Unsatisfiable {
        left: Ty,
        right: Ty,
        #[source]
        source: UnifyError,
    },
    #[error("declared type {declared} does not match solved type {solved}")]
    AnnotationMismatch { declared: Ty, solved: Ty },
    #[error("effect {effect} exceeds declared effect {ceiling}")]
    EffectTooStrong { effect: Eff, ceiling: Eff },
    #[error("condition has type {0}, expected bool")]
    ConditionNotBool(Ty),
    #[error("list literal declared with non-list type {0}")]
    NotAList(Ty),
    #[error("constructor {tag} cannot build a value of type {ty}")]
    ConstructorShape { tag: CtorTag, ty: Ty },
    #[error("constructor {tag} expects {expected} arguments, found {found}")]
    ConstructorArity {
        tag: CtorTag,
        expected: usize,
        found: usize,
    },
    #[error("unknown constructor `{0}`")]
    UnknownConstructor(String),
    #[error("pattern of type {pattern} cannot match a value of type {expected}")]
    PatternIncompatible { pattern: Ty, expected: Ty },
    #[error("variable `{0}` is bound more than once in a pattern")]
    DuplicateBinding(String),
    #[error("match has no cases")]
    EmptyMatch,
    #[error("nesting exceeds the depth limit of {limit}")]
    DepthLimitExceeded { limit: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    Rejection,
    Invariant,
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureClass::Rejection => write!(f, "rejection"),
            FailureClass::Invariant => write!(f, "invariant"),
        }
    }
}

impl CheckError {
    /// A rejection at the current node; outer judgments prefix the path.
    pub fn rejected(reason: Rejection) -> Self {
        CheckError {
            path: TermPath::root(),
            kind: FailureKind::Rejected(reason),
        }
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        CheckError {
            path: TermPath::root(),
            kind: FailureKind::Invariant(msg.into()),
        }
    }

    /// Re-anchor an error raised in a child at the parent, one step up.
    pub fn within(mut self, step: Step) -> Self {
        self.path = self.path.within(step);
        self
    }

    pub fn class(&self) -> FailureClass {
        match self.kind {
            FailureKind::Rejected(_) => FailureClass::Rejection,
            FailureKind::Invariant(_) => FailureClass::Invariant,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match &self.kind {
            FailureKind::Rejected(r) => Some(r),
            FailureKind::Invariant(_) => None,
        }
    }
}

impl From<Rejection> for CheckError {
    fn from(reason: Rejection) -> Self {
        CheckError::rejected(reason)
    }
}
