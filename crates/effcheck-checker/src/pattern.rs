//! Pattern checking.
//!
//! A pattern is checked against the type of the value it will match and
//! yields the bindings it introduces. Constructor patterns carry their own
//! type, which must be compatible (pattern side general) with the expected
//! type; subpatterns are then checked against the corresponding components
//! of the expected type. Patterns are linear: a name may be bound once.

use crate::error::{CheckError, Rejection};
use effcheck_ast::{CtorTag, Pattern, Step};
use effcheck_types::{instantiation, Ty};
use std::collections::BTreeMap;
use tracing::trace;

/// Bindings introduced by a pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternEnv {
    bindings: BTreeMap<String, Ty>,
}

impl PatternEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn singleton(name: impl Into<String>, ty: Ty) -> Self {
        let mut bindings = BTreeMap::new();
        bindings.insert(name.into(), ty);
        PatternEnv { bindings }
    }

    /// Disjoint union; a name bound on both sides makes the pattern non-linear.
    pub fn merge(mut self, other: PatternEnv) -> Result<Self, Rejection> {
        for (name, ty) in other.bindings {
            if self.bindings.contains_key(&name) {
                return Err(Rejection::DuplicateBinding(name));
            }
            self.bindings.insert(name, ty);
        }
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Ty> {
        self.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Ty)> {
        self.bindings.iter()
    }
}

impl IntoIterator for PatternEnv {
    type Item = (String, Ty);
    type IntoIter = std::collections::btree_map::IntoIter<String, Ty>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.into_iter()
    }
}

/// Check `pat` against a value of type `expected`.
pub fn check_pattern(pat: &Pattern, expected: &Ty) -> Result<PatternEnv, CheckError> {
    match pat {
        Pattern::Var(name) => {
            trace!(%name, ty = %expected, "pattern variable");
            Ok(PatternEnv::singleton(name.clone(), expected.clone()))
        }
        Pattern::Ctor { ty, tag, args } => {
            let fields = constructor_fields(ty, tag, args.len())?;
            let witness = instantiation(ty, expected).ok_or_else(|| Rejection::PatternIncompatible {
                pattern: ty.clone(),
                expected: expected.clone(),
            })?;
            let mut env = PatternEnv::new();
            for (i, (sub, field)) in args.iter().zip(&fields).enumerate() {
                let sub_env = check_pattern(sub, &witness.apply(field))
                    .map_err(|e| e.within(Step::SubPattern(i)))?;
                env = env.merge(sub_env)?;
            }
            Ok(env)
        }
    }
}

/// Component types a constructor with `tag` and `found` arguments takes
/// when building (or matching) a value of type `ty`.
///
/// Shared by constructor terms and constructor patterns.
pub(crate) fn constructor_fields(
    ty: &Ty,
    tag: &CtorTag,
    found: usize,
) -> Result<Vec<Ty>, Rejection> {
    let shape = || Rejection::ConstructorShape {
        tag: tag.clone(),
        ty: ty.clone(),
    };
    let arity = |expected: usize| {
        if expected == found {
            Ok(())
        } else {
            Err(Rejection::ConstructorArity {
                tag: tag.clone(),
                expected,
                found,
            })
        }
    };
    match tag {
        CtorTag::Tuple(n) => {
            let Ty::Tuple(ts) = ty else {
                return Err(shape());
            };
            if ts.len() != *n {
                return Err(shape());
            }
            arity(*n)?;
            Ok(ts.clone())
        }
        CtorTag::Variant(name) => match name.as_str() {
            "None" => {
                let Ty::Option(_) = ty else {
                    return Err(shape());
                };
                arity(0)?;
                Ok(vec![])
            }
            "Some" => {
                let Ty::Option(inner) = ty else {
                    return Err(shape());
                };
                arity(1)?;
                Ok(vec![inner.as_ref().clone()])
            }
            _ => Err(Rejection::UnknownConstructor(name.clone())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use effcheck_types::TypeVarId;

    fn int_pair() -> Ty {
        Ty::tuple(vec![Ty::int(), Ty::int()])
    }

    fn rejection(err: CheckError) -> Rejection {
        match err.kind {
            FailureKind::Rejected(r) => r,
            FailureKind::Invariant(msg) => panic!("unexpected invariant: {msg}"),
        }
    }

    #[test]
    fn variable_binds_expected_type() {
        let env = check_pattern(&Pattern::var("x"), &Ty::float()).unwrap();
        assert_eq!(env.get("x"), Some(&Ty::float()));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn tuple_pattern_binds_components() {
        let p = Pattern::tuple(
            Ty::tuple(vec![Ty::int(), Ty::string()]),
            vec![Pattern::var("a"), Pattern::var("b")],
        );
        let env = check_pattern(&p, &Ty::tuple(vec![Ty::int(), Ty::string()])).unwrap();
        assert_eq!(env.get("a"), Some(&Ty::int()));
        assert_eq!(env.get("b"), Some(&Ty::string()));
    }

    #[test]
    fn non_linear_pattern_is_rejected() {
        let p = Pattern::tuple(int_pair(), vec![Pattern::var("x"), Pattern::var("x")]);
        let err = check_pattern(&p, &int_pair()).unwrap_err();
        assert_eq!(rejection(err), Rejection::DuplicateBinding("x".into()));
    }

    #[test]
    fn duplicate_across_nesting_is_rejected() {
        let opt = Ty::option(Ty::int());
        let ty = Ty::tuple(vec![Ty::int(), opt.clone()]);
        let p = Pattern::tuple(
            ty.clone(),
            vec![Pattern::var("x"), Pattern::some(opt, Pattern::var("x"))],
        );
        assert!(check_pattern(&p, &ty).is_err());
    }

    #[test]
    fn option_patterns() {
        let opt = Ty::option(Ty::bool_());
        assert!(check_pattern(&Pattern::none(opt.clone()), &opt).unwrap().is_empty());
        let env = check_pattern(&Pattern::some(opt.clone(), Pattern::var("b")), &opt).unwrap();
        assert_eq!(env.get("b"), Some(&Ty::bool_()));
    }

    #[test]
    fn none_against_non_option_is_a_shape_error() {
        let err = check_pattern(&Pattern::none(Ty::int()), &Ty::int()).unwrap_err();
        assert!(matches!(rejection(err), Rejection::ConstructorShape { .. }));
    }

    #[test]
    fn some_with_two_subpatterns_is_an_arity_error() {
        let opt = Ty::option(Ty::int());
        let p = Pattern::ctor(
            opt.clone(),
            CtorTag::some(),
            vec![Pattern::var("a"), Pattern::var("b")],
        );
        let err = check_pattern(&p, &opt).unwrap_err();
        assert!(matches!(
            rejection(err),
            Rejection::ConstructorArity { expected: 1, found: 2, .. }
        ));
    }

    #[test]
    fn tuple_tag_arity_must_match_type() {
        let p = Pattern::ctor(int_pair(), CtorTag::Tuple(3), vec![]);
        let err = check_pattern(&p, &int_pair()).unwrap_err();
        assert!(matches!(rejection(err), Rejection::ConstructorShape { .. }));
    }

    #[test]
    fn unknown_variant_is_rejected() {
        let p = Pattern::ctor(Ty::int(), CtorTag::Variant("Ok".into()), vec![]);
        let err = check_pattern(&p, &Ty::int()).unwrap_err();
        assert_eq!(rejection(err), Rejection::UnknownConstructor("Ok".into()));
    }

    #[test]
    fn general_pattern_type_matches_concrete_scrutinee() {
        // A pattern typed `t0 option` matches an `int option` scrutinee and
        // binds the concrete component.
        let general = Ty::option(Ty::var(TypeVarId(0)));
        let p = Pattern::some(general, Pattern::var("n"));
        let env = check_pattern(&p, &Ty::option(Ty::int())).unwrap();
        assert_eq!(env.get("n"), Some(&Ty::int()));
    }

    #[test]
    fn concrete_pattern_does_not_match_general_scrutinee() {
        let p = Pattern::none(Ty::option(Ty::int()));
        let err = check_pattern(&p, &Ty::option(Ty::var(TypeVarId(0)))).unwrap_err();
        assert!(matches!(rejection(err), Rejection::PatternIncompatible { .. }));
    }

    #[test]
    fn nested_failure_carries_subpattern_path() {
        let opt = Ty::option(Ty::int());
        let ty = Ty::tuple(vec![Ty::int(), opt.clone()]);
        let p = Pattern::tuple(
            ty.clone(),
            vec![Pattern::var("a"), Pattern::none(Ty::option(Ty::string()))],
        );
        let err = check_pattern(&p, &ty).unwrap_err();
        assert_eq!(err.path.to_string(), "pattern[1]");
    }
}
