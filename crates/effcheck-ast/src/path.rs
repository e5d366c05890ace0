//! Locations inside a term.
//!
//! A [`TermPath`] is the sequence of steps from the root of a term to a
//! subterm (or, after a `CasePattern` step, to a subpattern). Checker
//! failures carry one so a report can point at the offending node.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    ListElem(usize),
    CtorArg(usize),
    Scrutinee,
    CaseBody(usize),
    CasePattern(usize),
    SubPattern(usize),
    LambdaBody,
    ApplyFun,
    ApplyArg,
    LetBound,
    LetBody,
    IfCond,
    IfThen,
    IfElse,
}

impl Step {
    /// Steps that lead from a term into a pattern, or within a pattern.
    pub fn is_pattern_step(self) -> bool {
        matches!(self, Step::CasePattern(_) | Step::SubPattern(_))
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::ListElem(i) => write!(f, "list[{i}]"),
            Step::CtorArg(i) => write!(f, "ctor[{i}]"),
            Step::Scrutinee => write!(f, "match.scrutinee"),
            Step::CaseBody(i) => write!(f, "case[{i}]"),
            Step::CasePattern(i) => write!(f, "case[{i}].pattern"),
            Step::SubPattern(i) => write!(f, "pattern[{i}]"),
            Step::LambdaBody => write!(f, "fun.body"),
            Step::ApplyFun => write!(f, "app.fun"),
            Step::ApplyArg => write!(f, "app.arg"),
            Step::LetBound => write!(f, "let.bound"),
            Step::LetBody => write!(f, "let.body"),
            Step::IfCond => write!(f, "if.cond"),
            Step::IfThen => write!(f, "if.then"),
            Step::IfElse => write!(f, "if.else"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TermPath {
    steps: Vec<Step>,
}

impl TermPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Append a step at the leaf end.
    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// Prefix a step at the root end; used while an error propagates upward.
    pub fn within(mut self, step: Step) -> Self {
        self.steps.insert(0, step);
        self
    }

    /// The steps that stay within terms; stops before the first pattern step.
    pub fn term_prefix(&self) -> &[Step] {
        let end = self
            .steps
            .iter()
            .position(|s| s.is_pattern_step())
            .unwrap_or(self.steps.len());
        &self.steps[..end]
    }
}

impl FromIterator<Step> for TermPath {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        TermPath {
            steps: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for TermPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return write!(f, "root");
        }
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_renders_as_root() {
        assert_eq!(TermPath::root().to_string(), "root");
        assert!(TermPath::root().is_root());
    }

    #[test]
    fn within_prefixes_steps() {
        let p = TermPath::root()
            .within(Step::ApplyArg)
            .within(Step::LetBody);
        assert_eq!(p.steps(), &[Step::LetBody, Step::ApplyArg]);
        assert_eq!(p.to_string(), "let.body/app.arg");
    }

    #[test]
    fn term_prefix_stops_at_patterns() {
        let p: TermPath = [
            Step::LetBody,
            Step::CasePattern(1),
            Step::SubPattern(0),
        ]
        .into_iter()
        .collect();
        assert_eq!(p.term_prefix(), &[Step::LetBody]);
        assert_eq!(p.to_string(), "let.body/case[1].pattern/pattern[0]");
    }
}
