use super::{
    normalize_effects, unify,
    ty::{Ty, TyConst, TypeVarId},
    unifier::{UnifyError, Unifier},
    Eff,
};

fn v(n: u32) -> Ty {
    Ty::var(TypeVarId(n))
}

#[test]
fn unify_var_with_itself_is_empty() {
    let s = unify(&v(0), &v(0)).unwrap();
    assert!(s.is_empty());
}

#[test]
fn unify_identical_base_types_is_empty() {
    for c in [
        TyConst::Unit,
        TyConst::Int,
        TyConst::Float,
        TyConst::Bool,
        TyConst::String,
    ] {
        assert!(unify(&Ty::Const(c), &Ty::Const(c)).unwrap().is_empty());
    }
}

#[test]
fn unify_mismatched_base_types_errors() {
    let err = unify(&Ty::int(), &Ty::string()).unwrap_err();
    assert_eq!(err, UnifyError::Mismatch(Ty::int(), Ty::string()));
}

#[test]
fn unify_binds_left_variable_first() {
    let s = unify(&v(0), &v(1)).unwrap();
    assert_eq!(s.get(&TypeVarId(0)), Some(&v(1)));
    assert!(!s.contains(&TypeVarId(1)));
}

#[test]
fn unify_tuples_same_arity_elementwise() {
    let a = Ty::tuple(vec![Ty::int(), Ty::bool_()]);
    let b = Ty::tuple(vec![Ty::int(), Ty::bool_()]);
    unify(&a, &b).unwrap();
}

#[test]
fn unify_tuples_mismatched_arity_errors() {
    let a = Ty::tuple(vec![Ty::int(), Ty::bool_()]);
    let b = Ty::tuple(vec![Ty::int()]);
    let err = unify(&a, &b).unwrap_err();
    assert!(matches!(err, UnifyError::Arity { left: 2, right: 1 }));
}

#[test]
fn unify_tuples_propagates_vars_left_to_right() {
    // (t0 * t0) = (int * t1): the second component is solved under t0 := int.
    let a = Ty::tuple(vec![v(0), v(0)]);
    let b = Ty::tuple(vec![Ty::int(), v(1)]);
    let s = unify(&a, &b).unwrap();
    assert_eq!(s.apply(&v(0)), Ty::int());
    assert_eq!(s.apply(&v(1)), Ty::int());
    assert_eq!(s.apply(&a), s.apply(&b));
}

#[test]
fn unify_options_and_lists() {
    let s = unify(&Ty::option(v(0)), &Ty::option(Ty::float())).unwrap();
    assert_eq!(s.apply(&v(0)), Ty::float());
    let s = unify(&Ty::list(Ty::list(v(2))), &Ty::list(Ty::list(Ty::unit()))).unwrap();
    assert_eq!(s.apply(&v(2)), Ty::unit());
    assert!(unify(&Ty::option(Ty::int()), &Ty::list(Ty::int())).is_err());
}

#[test]
fn unify_arrows_ignores_effects() {
    let a = Ty::arrow(v(0), Eff::Strong, Ty::int());
    let b = Ty::arrow(Ty::bool_(), Eff::Pure, v(1));
    let s = unify(&a, &b).unwrap();
    assert_eq!(
        normalize_effects(&s.apply(&a)),
        normalize_effects(&s.apply(&b))
    );
    assert_eq!(s.apply(&v(0)), Ty::bool_());
    assert_eq!(s.apply(&v(1)), Ty::int());
}

#[test]
fn unify_arrow_result_sees_argument_solution() {
    // (t0 -> t0) = (int -> bool) fails once t0 := int is known.
    let a = Ty::pure_arrow(v(0), v(0));
    let b = Ty::pure_arrow(Ty::int(), Ty::bool_());
    assert!(unify(&a, &b).is_err());
}

#[test]
fn occurs_in_list_blocks_infinite() {
    let res = unify(&v(0), &Ty::list(v(0)));
    assert!(matches!(res, Err(UnifyError::Occurs { .. })));
}

#[test]
fn occurs_through_earlier_binding() {
    // (t0 * t1) = (t1 list * t0): t0 := t1 list, then t1 = t1 list.
    let a = Ty::tuple(vec![v(0), v(1)]);
    let b = Ty::tuple(vec![Ty::list(v(1)), v(0)]);
    assert!(matches!(unify(&a, &b), Err(UnifyError::Occurs { .. })));
}

#[test]
fn solution_is_idempotent() {
    let a = Ty::tuple(vec![v(0), Ty::option(v(1)), v(2)]);
    let b = Ty::tuple(vec![v(1), Ty::option(v(2)), Ty::list(Ty::int())]);
    let s = unify(&a, &b).unwrap();
    assert!(s.is_idempotent());
    let once = s.apply(&a);
    assert_eq!(s.apply(&once), once);
    assert_eq!(once, s.apply(&b));
}

#[test]
fn unifier_accumulates_across_equations() {
    let mut u = Unifier::new();
    u.unify(&v(0), &v(1)).unwrap();
    u.unify(&v(1), &Ty::string()).unwrap();
    assert_eq!(u.subst().apply(&v(0)), Ty::string());
    assert!(u.unify(&v(0), &Ty::int()).is_err());
}

#[test]
fn mismatch_message_uses_display() {
    let err = unify(&Ty::list(Ty::int()), &Ty::bool_()).unwrap_err();
    assert_eq!(err.to_string(), "type mismatch: int list vs bool");
}
