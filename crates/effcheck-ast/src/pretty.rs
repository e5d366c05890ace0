//! Human-readable rendering of terms and patterns in an ML-like syntax.
//!
//! Compound terms are always parenthesized, so the output never depends on
//! operator precedence. Binders print their declared type annotation.

use crate::term::{CtorTag, Literal, Pattern, Term};
use std::fmt;

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Unit => write!(f, "()"),
            Literal::Int(n) if *n < 0 => write!(f, "({n})"),
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Float(x) if x.is_sign_negative() => write!(f, "({x:?})"),
            Literal::Float(x) => write!(f, "{x:?}"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl fmt::Display for CtorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CtorTag::Tuple(n) => write!(f, "tuple/{n}"),
            CtorTag::Variant(name) => write!(f, "{name}"),
        }
    }
}

/// `(a, b, c)` for tuples, `Name` / `Name(a)` / `Name(a, b)` for variants.
fn write_ctor<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    tag: &CtorTag,
    args: &[T],
) -> fmt::Result {
    if let CtorTag::Variant(name) = tag {
        write!(f, "{name}")?;
        if args.is_empty() {
            return Ok(());
        }
    }
    write!(f, "(")?;
    write_sep(f, args, ", ")?;
    write!(f, ")")
}

fn write_sep<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Var(name) => write!(f, "{name}"),
            Pattern::Ctor { tag, args, .. } => write_ctor(f, tag, args),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Lit(l) => write!(f, "{l}"),
            Term::Variable { name, .. } => write!(f, "{name}"),
            Term::List { elems, .. } => {
                write!(f, "[")?;
                write_sep(f, elems, "; ")?;
                write!(f, "]")
            }
            Term::Ctor { tag, args, .. } => write_ctor(f, tag, args),
            Term::Match {
                scrutinee, cases, ..
            } => {
                write!(f, "(match {scrutinee} with")?;
                for (i, case) in cases.iter().enumerate() {
                    let bar = if i == 0 { " " } else { " | " };
                    write!(f, "{bar}{} -> {}", case.pat, case.body)?;
                }
                write!(f, ")")
            }
            Term::Lambda {
                param,
                param_ty,
                body,
                ..
            } => write!(f, "(fun ({param} : {param_ty}) -> {body})"),
            Term::Apply { fun, arg, .. } => write!(f, "({fun} {arg})"),
            Term::Let {
                name,
                bound_ty,
                bound,
                body,
                ..
            } => write!(f, "(let ({name} : {bound_ty}) = {bound} in {body})"),
            Term::If {
                cond,
                then_branch,
                else_branch,
                ..
            } => write!(f, "(if {cond} then {then_branch} else {else_branch})"),
        }
    }
}
