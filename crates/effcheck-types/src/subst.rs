use crate::ty::{Ty, TypeVarId};
use std::collections::BTreeMap;
use std::fmt;

/// A finite mapping from type variables to types.
///
/// `apply` is a single structural pass: bound types are not themselves
/// rewritten again. Solutions produced by the unifier are kept idempotent
/// (no variable in the domain occurs in the range), so for those a single
/// pass is already a full application.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Subst {
    map: BTreeMap<TypeVarId, Ty>,
}

impl Subst {
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
        }
    }
    pub fn singleton(v: TypeVarId, t: Ty) -> Self {
        let mut s = Self::new();
        s.insert(v, t);
        s
    }
    pub fn get(&self, v: &TypeVarId) -> Option<&Ty> {
        self.map.get(v)
    }
    /// Raw insert; does not touch existing bindings.
    pub fn insert(&mut self, v: TypeVarId, t: Ty) {
        self.map.insert(v, t);
    }
    pub fn contains(&self, v: &TypeVarId) -> bool {
        self.map.contains_key(v)
    }
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
    pub fn len(&self) -> usize {
        self.map.len()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&TypeVarId, &Ty)> {
        self.map.iter()
    }

    pub fn apply(&self, t: &Ty) -> Ty {
        match t {
            Ty::Var(v) => self.map.get(v).cloned().unwrap_or(Ty::Var(*v)),
            Ty::Const(_) => t.clone(),
            Ty::Option(x) => Ty::option(self.apply(x)),
            Ty::List(x) => Ty::list(self.apply(x)),
            Ty::Tuple(xs) => Ty::Tuple(xs.iter().map(|x| self.apply(x)).collect()),
            Ty::Arrow(a, eff, r) => Ty::arrow(self.apply(a), *eff, self.apply(r)),
        }
    }

    /// self ∘ other (apply `other` first, then `self`)
    pub fn compose(&self, other: &Subst) -> Subst {
        let mut out = Subst::new();
        for (v, t) in other.map.iter() {
            out.insert(*v, self.apply(t));
        }
        for (v, t) in self.map.iter() {
            if !other.map.contains_key(v) {
                out.insert(*v, t.clone());
            }
        }
        out
    }

    /// Extend with `v ↦ t`, rewriting existing bindings so the result stays
    /// idempotent. `t` must not mention `v` or any variable already bound.
    pub fn bind(&mut self, v: TypeVarId, t: Ty) {
        let single = Subst::singleton(v, t);
        *self = single.compose(self);
    }

    /// True if no bound variable occurs in any bound type.
    pub fn is_idempotent(&self) -> bool {
        self.map
            .values()
            .all(|t| crate::ty::free_type_vars(t).iter().all(|v| !self.contains(v)))
    }
}

impl fmt::Display for Subst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (v, t)) in self.map.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v} := {t}")?;
        }
        write!(f, "}}")
    }
}
