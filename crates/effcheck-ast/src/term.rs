//! Fully annotated terms and patterns.
//!
//! Every node carries its declared type; every node except literals,
//! variables and lambdas also carries its declared effect. Terms are plain
//! immutable trees: subterms are owned, sharing is by value only.

use crate::path::Step;
use effcheck_types::{Eff, Ty};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Unit,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl Literal {
    pub fn ty(&self) -> Ty {
        match self {
            Literal::Unit => Ty::unit(),
            Literal::Int(_) => Ty::int(),
            Literal::Float(_) => Ty::float(),
            Literal::Bool(_) => Ty::bool_(),
            Literal::Str(_) => Ty::string(),
        }
    }
}

/// Constructor tag: a tuple of fixed arity, or a named variant (`Some`, `None`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CtorTag {
    Tuple(usize),
    Variant(String),
}

impl CtorTag {
    pub fn some() -> Self {
        CtorTag::Variant("Some".to_string())
    }
    pub fn none() -> Self {
        CtorTag::Variant("None".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Pattern {
    /// Binds the scrutinee (sub)value unconditionally.
    Var(String),
    /// Destructures a value built by `tag`; `ty` is the type the pattern
    /// expects of the value it matches.
    Ctor {
        ty: Ty,
        tag: CtorTag,
        args: Vec<Pattern>,
    },
}

impl Pattern {
    pub fn var(name: impl Into<String>) -> Self {
        Pattern::Var(name.into())
    }
    pub fn ctor(ty: Ty, tag: CtorTag, args: Vec<Pattern>) -> Self {
        Pattern::Ctor { ty, tag, args }
    }
    pub fn tuple(ty: Ty, args: Vec<Pattern>) -> Self {
        let tag = CtorTag::Tuple(args.len());
        Pattern::Ctor { ty, tag, args }
    }
    pub fn some(ty: Ty, inner: Pattern) -> Self {
        Pattern::ctor(ty, CtorTag::some(), vec![inner])
    }
    pub fn none(ty: Ty) -> Self {
        Pattern::ctor(ty, CtorTag::none(), vec![])
    }

    /// Names bound by this pattern, left to right, duplicates included.
    pub fn bound_names(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_names(&mut out);
        out
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Pattern::Var(name) => out.push(name),
            Pattern::Ctor { args, .. } => {
                for p in args {
                    p.collect_names(out);
                }
            }
        }
    }

    /// Follow `SubPattern` steps down from this pattern.
    pub fn at(&self, steps: &[Step]) -> Option<&Pattern> {
        let mut cur = self;
        for step in steps {
            cur = match (cur, step) {
                (Pattern::Ctor { args, .. }, Step::SubPattern(i)) => args.get(*i)?,
                _ => return None,
            };
        }
        Some(cur)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub pat: Pattern,
    pub body: Term,
}

impl Case {
    pub fn new(pat: Pattern, body: Term) -> Self {
        Case { pat, body }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Term {
    Lit(Literal),
    Variable {
        ty: Ty,
        name: String,
    },
    List {
        ty: Ty,
        elems: Vec<Term>,
        eff: Eff,
    },
    Ctor {
        ty: Ty,
        tag: CtorTag,
        args: Vec<Term>,
        eff: Eff,
    },
    Match {
        ty: Ty,
        scrutinee: Box<Term>,
        cases: Vec<Case>,
        eff: Eff,
    },
    Lambda {
        ty: Ty,
        param: String,
        param_ty: Ty,
        body: Box<Term>,
    },
    Apply {
        ty: Ty,
        fun: Box<Term>,
        arg_ty: Ty,
        arg: Box<Term>,
        eff: Eff,
    },
    Let {
        name: String,
        bound_ty: Ty,
        bound: Box<Term>,
        body: Box<Term>,
        ty: Ty,
        eff: Eff,
    },
    If {
        ty: Ty,
        cond: Box<Term>,
        then_branch: Box<Term>,
        else_branch: Box<Term>,
        eff: Eff,
    },
}

// ---- Constructors ----

impl Term {
    pub fn unit() -> Self {
        Term::Lit(Literal::Unit)
    }
    pub fn int(n: i64) -> Self {
        Term::Lit(Literal::Int(n))
    }
    pub fn float(x: f64) -> Self {
        Term::Lit(Literal::Float(x))
    }
    pub fn bool_(b: bool) -> Self {
        Term::Lit(Literal::Bool(b))
    }
    pub fn string(s: impl Into<String>) -> Self {
        Term::Lit(Literal::Str(s.into()))
    }
    pub fn var(ty: Ty, name: impl Into<String>) -> Self {
        Term::Variable {
            ty,
            name: name.into(),
        }
    }
    pub fn list(ty: Ty, elems: Vec<Term>, eff: Eff) -> Self {
        Term::List { ty, elems, eff }
    }
    pub fn ctor(ty: Ty, tag: CtorTag, args: Vec<Term>, eff: Eff) -> Self {
        Term::Ctor { ty, tag, args, eff }
    }
    /// Tuple constructor whose tag arity is the number of `args`.
    pub fn tuple(ty: Ty, args: Vec<Term>, eff: Eff) -> Self {
        let tag = CtorTag::Tuple(args.len());
        Term::Ctor { ty, tag, args, eff }
    }
    pub fn some(ty: Ty, arg: Term, eff: Eff) -> Self {
        Term::ctor(ty, CtorTag::some(), vec![arg], eff)
    }
    pub fn none(ty: Ty) -> Self {
        Term::ctor(ty, CtorTag::none(), vec![], Eff::Pure)
    }
    pub fn matching(ty: Ty, scrutinee: Term, cases: Vec<Case>, eff: Eff) -> Self {
        Term::Match {
            ty,
            scrutinee: Box::new(scrutinee),
            cases,
            eff,
        }
    }
    pub fn lambda(ty: Ty, param: impl Into<String>, param_ty: Ty, body: Term) -> Self {
        Term::Lambda {
            ty,
            param: param.into(),
            param_ty,
            body: Box::new(body),
        }
    }
    pub fn apply(ty: Ty, fun: Term, arg_ty: Ty, arg: Term, eff: Eff) -> Self {
        Term::Apply {
            ty,
            fun: Box::new(fun),
            arg_ty,
            arg: Box::new(arg),
            eff,
        }
    }
    pub fn let_(
        name: impl Into<String>,
        bound_ty: Ty,
        bound: Term,
        body: Term,
        ty: Ty,
        eff: Eff,
    ) -> Self {
        Term::Let {
            name: name.into(),
            bound_ty,
            bound: Box::new(bound),
            body: Box::new(body),
            ty,
            eff,
        }
    }
    pub fn if_(ty: Ty, cond: Term, then_branch: Term, else_branch: Term, eff: Eff) -> Self {
        Term::If {
            ty,
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
            eff,
        }
    }
}

// ---- Queries ----

impl Term {
    /// The node's own declared type (the literal's type for literals).
    pub fn ty(&self) -> Ty {
        match self {
            Term::Lit(l) => l.ty(),
            Term::Variable { ty, .. }
            | Term::List { ty, .. }
            | Term::Ctor { ty, .. }
            | Term::Match { ty, .. }
            | Term::Lambda { ty, .. }
            | Term::Apply { ty, .. }
            | Term::Let { ty, .. }
            | Term::If { ty, .. } => ty.clone(),
        }
    }

    /// The node's own declared effect; literals, variables and lambdas are pure.
    pub fn eff(&self) -> Eff {
        match self {
            Term::Lit(_) | Term::Variable { .. } | Term::Lambda { .. } => Eff::Pure,
            Term::List { eff, .. }
            | Term::Ctor { eff, .. }
            | Term::Match { eff, .. }
            | Term::Apply { eff, .. }
            | Term::Let { eff, .. }
            | Term::If { eff, .. } => *eff,
        }
    }

    /// Immediate subterms, left to right.
    pub fn children(&self) -> Vec<&Term> {
        match self {
            Term::Lit(_) | Term::Variable { .. } => vec![],
            Term::List { elems: xs, .. } | Term::Ctor { args: xs, .. } => xs.iter().collect(),
            Term::Match {
                scrutinee, cases, ..
            } => std::iter::once(scrutinee.as_ref())
                .chain(cases.iter().map(|c| &c.body))
                .collect(),
            Term::Lambda { body, .. } => vec![body.as_ref()],
            Term::Apply { fun, arg, .. } => vec![fun.as_ref(), arg.as_ref()],
            Term::Let { bound, body, .. } => vec![bound.as_ref(), body.as_ref()],
            Term::If {
                cond,
                then_branch,
                else_branch,
                ..
            } => vec![cond.as_ref(), then_branch.as_ref(), else_branch.as_ref()],
        }
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(|c| c.size()).sum::<usize>()
    }

    /// Length of the longest root-to-leaf chain (a literal has depth 1).
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(|c| c.depth())
            .max()
            .unwrap_or(0)
    }

    /// The subterm reached by following `steps` from this node.
    ///
    /// Returns `None` if a step does not apply to the node it meets; pattern
    /// steps never lead to a term.
    pub fn at(&self, steps: &[Step]) -> Option<&Term> {
        let mut cur = self;
        for step in steps {
            cur = match (cur, step) {
                (Term::List { elems, .. }, Step::ListElem(i)) => elems.get(*i)?,
                (Term::Ctor { args, .. }, Step::CtorArg(i)) => args.get(*i)?,
                (Term::Match { scrutinee, .. }, Step::Scrutinee) => scrutinee.as_ref(),
                (Term::Match { cases, .. }, Step::CaseBody(i)) => &cases.get(*i)?.body,
                (Term::Lambda { body, .. }, Step::LambdaBody) => body.as_ref(),
                (Term::Apply { fun, .. }, Step::ApplyFun) => fun.as_ref(),
                (Term::Apply { arg, .. }, Step::ApplyArg) => arg.as_ref(),
                (Term::Let { bound, .. }, Step::LetBound) => bound.as_ref(),
                (Term::Let { body, .. }, Step::LetBody) => body.as_ref(),
                (Term::If { cond, .. }, Step::IfCond) => cond.as_ref(),
                (Term::If { then_branch, .. }, Step::IfThen) => then_branch.as_ref(),
                (Term::If { else_branch, .. }, Step::IfElse) => else_branch.as_ref(),
                _ => return None,
            };
        }
        Some(cur)
    }
}
