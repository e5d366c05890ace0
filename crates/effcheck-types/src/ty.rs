//! The type grammar and the structural operations over it.

use crate::effects::Eff;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub struct TypeVarId(pub u32);

impl fmt::Debug for TypeVarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

impl fmt::Display for TypeVarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

impl Hash for TypeVarId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TyConst {
    Unit,
    Int,
    Float,
    Bool,
    String,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Ty {
    Var(TypeVarId),
    Const(TyConst),
    Option(Box<Ty>),
    List(Box<Ty>),
    /// Heterogeneous, fixed-length tuple: (t0 * t1 * ... * tn)
    Tuple(Vec<Ty>),
    /// Curried function type: argument, latent effect, result.
    Arrow(Box<Ty>, Eff, Box<Ty>),
}

impl Ty {
    #[inline]
    pub fn var(id: TypeVarId) -> Self {
        Ty::Var(id)
    }
    #[inline]
    pub fn unit() -> Self {
        Ty::Const(TyConst::Unit)
    }
    #[inline]
    pub fn int() -> Self {
        Ty::Const(TyConst::Int)
    }
    #[inline]
    pub fn float() -> Self {
        Ty::Const(TyConst::Float)
    }
    #[inline]
    pub fn bool_() -> Self {
        Ty::Const(TyConst::Bool)
    }
    #[inline]
    pub fn string() -> Self {
        Ty::Const(TyConst::String)
    }
    #[inline]
    pub fn option(elem: Ty) -> Self {
        Ty::Option(Box::new(elem))
    }
    #[inline]
    pub fn list(elem: Ty) -> Self {
        Ty::List(Box::new(elem))
    }
    #[inline]
    pub fn tuple(elems: impl Into<Vec<Ty>>) -> Self {
        Ty::Tuple(elems.into())
    }
    #[inline]
    pub fn arrow(arg: Ty, eff: Eff, ret: Ty) -> Self {
        Ty::Arrow(Box::new(arg), eff, Box::new(ret))
    }
    /// Pure single-argument arrow.
    pub fn pure_arrow(arg: Ty, ret: Ty) -> Self {
        Ty::arrow(arg, Eff::Pure, ret)
    }

    /// The final result of a curried arrow chain (the type itself for
    /// non-functions).
    pub fn result_type(&self) -> &Ty {
        match self {
            Ty::Arrow(_, _, ret) => ret.result_type(),
            other => other,
        }
    }

    /// True if no type variable occurs anywhere inside.
    pub fn is_ground(&self) -> bool {
        match self {
            Ty::Var(_) => false,
            Ty::Const(_) => true,
            Ty::Option(t) | Ty::List(t) => t.is_ground(),
            Ty::Tuple(ts) => ts.iter().all(Ty::is_ground),
            Ty::Arrow(a, _, r) => a.is_ground() && r.is_ground(),
        }
    }
}

/// Collect the type variables reachable within `ty`.
pub fn free_type_vars(ty: &Ty) -> BTreeSet<TypeVarId> {
    let mut acc = BTreeSet::new();
    collect_vars(ty, &mut acc);
    acc
}

fn collect_vars(ty: &Ty, acc: &mut BTreeSet<TypeVarId>) {
    match ty {
        Ty::Var(v) => {
            acc.insert(*v);
        }
        Ty::Const(_) => {}
        Ty::Option(t) | Ty::List(t) => collect_vars(t, acc),
        Ty::Tuple(ts) => {
            for t in ts {
                collect_vars(t, acc);
            }
        }
        Ty::Arrow(a, _, r) => {
            collect_vars(a, acc);
            collect_vars(r, acc);
        }
    }
}

/// Does `v` appear anywhere inside `ty`?
pub fn occurs(v: TypeVarId, ty: &Ty) -> bool {
    match ty {
        Ty::Var(w) => *w == v,
        Ty::Const(_) => false,
        Ty::Option(t) | Ty::List(t) => occurs(v, t),
        Ty::Tuple(ts) => ts.iter().any(|t| occurs(v, t)),
        Ty::Arrow(a, _, r) => occurs(v, a) || occurs(v, r),
    }
}

/// Number of curried arrow layers: `int -> bool -> int` has arity 2.
pub fn arity(ty: &Ty) -> usize {
    match ty {
        Ty::Arrow(_, _, ret) => 1 + arity(ret),
        _ => 0,
    }
}

/// Erase every latent effect to `Eff::Pure`.
///
/// Unification reasons about shapes only; callers normalize first when
/// effect annotations must not influence a structural comparison.
pub fn normalize_effects(ty: &Ty) -> Ty {
    match ty {
        Ty::Var(_) | Ty::Const(_) => ty.clone(),
        Ty::Option(t) => Ty::option(normalize_effects(t)),
        Ty::List(t) => Ty::list(normalize_effects(t)),
        Ty::Tuple(ts) => Ty::Tuple(ts.iter().map(normalize_effects).collect()),
        Ty::Arrow(a, _, r) => Ty::arrow(normalize_effects(a), Eff::Pure, normalize_effects(r)),
    }
}

// Display precedence levels: arrows bind loosest, postfix constructors
// (`option`, `list`) tightest.
const PREC_ARROW: u8 = 0;
const PREC_ARG: u8 = 1;
const PREC_POSTFIX: u8 = 2;

fn fmt_prec(ty: &Ty, prec: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match ty {
        Ty::Var(v) => write!(f, "{v}"),
        Ty::Const(TyConst::Unit) => write!(f, "unit"),
        Ty::Const(TyConst::Int) => write!(f, "int"),
        Ty::Const(TyConst::Float) => write!(f, "float"),
        Ty::Const(TyConst::Bool) => write!(f, "bool"),
        Ty::Const(TyConst::String) => write!(f, "string"),
        Ty::Option(t) => {
            fmt_prec(t, PREC_POSTFIX, f)?;
            write!(f, " option")
        }
        Ty::List(t) => {
            fmt_prec(t, PREC_POSTFIX, f)?;
            write!(f, " list")
        }
        Ty::Tuple(ts) => {
            write!(f, "(")?;
            for (i, t) in ts.iter().enumerate() {
                if i > 0 {
                    write!(f, " * ")?;
                }
                fmt_prec(t, PREC_ARROW, f)?;
            }
            write!(f, ")")
        }
        Ty::Arrow(a, eff, r) => {
            if prec > PREC_ARROW {
                write!(f, "(")?;
            }
            fmt_prec(a, PREC_ARG, f)?;
            if eff.is_pure() {
                write!(f, " -> ")?;
            } else {
                write!(f, " -[{eff}]-> ")?;
            }
            fmt_prec(r, PREC_ARROW, f)?;
            if prec > PREC_ARROW {
                write!(f, ")")?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_prec(self, PREC_ARROW, f)
    }
}
