//! Property tests for the type and effect algebra.
//!
//! 1. Effect lattice laws: join is commutative, associative, idempotent,
//!    with `Pure` as identity; `⊑` is reflexive with `Pure` at the bottom.
//! 2. Unification soundness: after `unify(a, b) = s`, `s(a) == s(b)`
//!    (latent effects normalized).
//! 3. Unification produces idempotent solutions.
//! 4. Occurs check: `unify(v, t)` fails when `v` occurs in `t` and `t != v`.
//! 5. Compatibility: reflexive, and every instance of a type is compatible
//!    with it.

use effcheck_types::*;
use proptest::prelude::*;

fn arb_eff() -> impl Strategy<Value = Eff> {
    prop_oneof![Just(Eff::Pure), Just(Eff::Weak), Just(Eff::Strong)]
}

fn arb_ty() -> impl Strategy<Value = Ty> {
    let leaf = prop_oneof![
        (0u32..4).prop_map(|n| Ty::var(TypeVarId(n))),
        Just(Ty::unit()),
        Just(Ty::int()),
        Just(Ty::float()),
        Just(Ty::bool_()),
        Just(Ty::string()),
    ];
    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(Ty::option),
            inner.clone().prop_map(Ty::list),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Ty::Tuple),
            (inner.clone(), arb_eff(), inner).prop_map(|(a, e, r)| Ty::arrow(a, e, r)),
        ]
    })
}

proptest! {
    #[test]
    fn join_is_commutative(a in arb_eff(), b in arb_eff()) {
        prop_assert_eq!(a.join(b), b.join(a));
    }

    #[test]
    fn join_is_associative(a in arb_eff(), b in arb_eff(), c in arb_eff()) {
        prop_assert_eq!(a.join(b).join(c), a.join(b.join(c)));
    }

    #[test]
    fn join_is_idempotent_with_pure_identity(a in arb_eff()) {
        prop_assert_eq!(a.join(a), a);
        prop_assert_eq!(a.join(NO_EFF), a);
        prop_assert_eq!(NO_EFF.join(a), a);
    }

    #[test]
    fn leq_is_reflexive_with_pure_bottom(a in arb_eff()) {
        prop_assert!(a.leq(a));
        prop_assert!(NO_EFF.leq(a));
        prop_assert_eq!(Eff::Strong.leq(a), a == Eff::Strong);
    }

    #[test]
    fn join_is_an_upper_bound(a in arb_eff(), b in arb_eff()) {
        prop_assert!(a.leq(a.join(b)));
        prop_assert!(b.leq(a.join(b)));
    }

    #[test]
    fn unification_is_sound(a in arb_ty(), b in arb_ty()) {
        if let Ok(s) = unify(&a, &b) {
            prop_assert_eq!(normalize_effects(&s.apply(&a)), normalize_effects(&s.apply(&b)));
        }
    }

    #[test]
    fn unification_solution_is_idempotent(a in arb_ty(), b in arb_ty()) {
        if let Ok(s) = unify(&a, &b) {
            prop_assert!(s.is_idempotent());
            let once = s.apply(&a);
            prop_assert_eq!(s.apply(&once), once);
        }
    }

    #[test]
    fn unification_is_reflexive(a in arb_ty()) {
        let s = unify(&a, &a);
        prop_assert!(s.is_ok());
        prop_assert!(s.unwrap().is_empty());
    }

    #[test]
    fn occurs_check_rejects_infinite_types(n in 0u32..4, other in arb_ty()) {
        let var = TypeVarId(n);
        let t = Ty::tuple(vec![other, Ty::option(Ty::var(var))]);
        prop_assert!(occurs(var, &t));
        prop_assert!(unify(&Ty::var(var), &t).is_err());
        prop_assert!(unify(&t, &Ty::var(var)).is_err());
    }

    #[test]
    fn compatibility_is_reflexive(t in arb_ty()) {
        prop_assert!(compatible(&t, &t));
    }

    #[test]
    fn instances_are_compatible(
        t in arb_ty(),
        images in prop::collection::vec(arb_ty(), 4),
    ) {
        let mut s = Subst::new();
        for (i, image) in images.into_iter().enumerate() {
            s.insert(TypeVarId(i as u32), image);
        }
        let instance = s.apply(&t);
        prop_assert!(compatible(&t, &instance));
        let witness = instantiation(&t, &instance).unwrap();
        prop_assert_eq!(witness.apply(&t), instance);
    }

    #[test]
    fn free_vars_agree_with_occurs(t in arb_ty(), n in 0u32..4) {
        let var = TypeVarId(n);
        prop_assert_eq!(free_type_vars(&t).contains(&var), occurs(var, &t));
    }

    #[test]
    fn normalization_preserves_arity_and_shape(t in arb_ty()) {
        let n = normalize_effects(&t);
        prop_assert_eq!(arity(&n), arity(&t));
        prop_assert_eq!(free_type_vars(&n), free_type_vars(&t));
        prop_assert_eq!(normalize_effects(&n), n.clone());
    }
}
