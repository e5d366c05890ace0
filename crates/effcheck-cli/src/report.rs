//! Verdicts as printed for the harness.

use anyhow::Result;
use effcheck_ast::Term;
use effcheck_checker::{CheckError, FailureKind};
use effcheck_types::{Eff, Ty};
use serde::Serialize;
use std::fmt;

/// Rendered subterms in reports are cut after this many characters.
pub const MAX_SUBTERM_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Report {
    Accepted {
        ty: String,
        eff: String,
        fingerprint: String,
    },
    Rejected {
        path: String,
        reason: String,
        subterm: Option<String>,
        fingerprint: String,
    },
    Invariant {
        path: Option<String>,
        message: String,
        fingerprint: Option<String>,
    },
}

impl Report {
    pub fn from_check(term: &Term, result: &Result<(Ty, Eff), CheckError>) -> Result<Self> {
        let fingerprint = fingerprint(term)?;
        Ok(match result {
            Ok((ty, eff)) => Report::Accepted {
                ty: ty.to_string(),
                eff: eff.to_string(),
                fingerprint,
            },
            Err(err) => match &err.kind {
                FailureKind::Rejected(reason) => Report::Rejected {
                    path: err.path.to_string(),
                    reason: reason.to_string(),
                    subterm: term
                        .at(err.path.term_prefix())
                        .map(|t| truncate(&t.to_string(), MAX_SUBTERM_CHARS)),
                    fingerprint,
                },
                FailureKind::Invariant(message) => Report::Invariant {
                    path: Some(err.path.to_string()),
                    message: message.clone(),
                    fingerprint: Some(fingerprint),
                },
            },
        })
    }

    /// An invariant violation detected before a term could be built.
    pub fn input_invariant(message: impl Into<String>) -> Self {
        Report::Invariant {
            path: None,
            message: message.into(),
            fingerprint: None,
        }
    }

    /// 0 accepted, 1 rejected, 2 invariant violation.
    pub fn exit_code(&self) -> u8 {
        match self {
            Report::Accepted { .. } => 0,
            Report::Rejected { .. } => 1,
            Report::Invariant { .. } => 2,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Accepted {
                ty,
                eff,
                fingerprint,
            } => {
                writeln!(f, "accepted: {ty} [{eff}]")?;
                write!(f, "  fingerprint: {fingerprint}")
            }
            Report::Rejected {
                path,
                reason,
                subterm,
                fingerprint,
            } => {
                writeln!(f, "rejected at {path}: {reason}")?;
                if let Some(subterm) = subterm {
                    writeln!(f, "  subterm: {subterm}")?;
                }
                write!(f, "  fingerprint: {fingerprint}")
            }
            Report::Invariant {
                path,
                message,
                fingerprint,
            } => {
                write!(f, "internal invariant violated")?;
                if let Some(path) = path {
                    write!(f, " at {path}")?;
                }
                write!(f, ": {message}")?;
                if let Some(fingerprint) = fingerprint {
                    write!(f, "\n  fingerprint: {fingerprint}")?;
                }
                Ok(())
            }
        }
    }
}

/// SHA-256 of the term's canonical JSON, prefixed with "sha256:".
///
/// Identical counterexamples found in different runs share a fingerprint.
pub fn fingerprint(term: &Term) -> Result<String> {
    use sha2::{Digest, Sha256};
    let canonical = serde_json::to_string(term)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(format!("sha256:{:x}", hasher.finalize()))
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_string(),
    }
}
