//! Instance-of relation between a schematic type and a more concrete one.
//!
//! `compatible(general, specific)` holds when some substitution of the type
//! variables of `general` turns it into exactly `specific`. Variables of
//! `specific` are rigid: they only match a variable of `general`. Latent
//! effects must agree at corresponding arrow positions.
//!
//! The relation is one-directional matching, not unification; no variable
//! of `specific` is ever bound.

use crate::subst::Subst;
use crate::ty::Ty;

/// Is `specific` an instance of `general`?
pub fn compatible(general: &Ty, specific: &Ty) -> bool {
    instantiation(general, specific).is_some()
}

/// The witness for [`compatible`]: a substitution `s` over the variables of
/// `general` with `s.apply(general) == *specific`.
pub fn instantiation(general: &Ty, specific: &Ty) -> Option<Subst> {
    let mut witness = Subst::new();
    if matches(&mut witness, general, specific) {
        Some(witness)
    } else {
        None
    }
}

fn matches(witness: &mut Subst, general: &Ty, specific: &Ty) -> bool {
    match (general, specific) {
        (Ty::Var(v), _) => match witness.get(v) {
            Some(bound) => bound == specific,
            None => {
                witness.insert(*v, specific.clone());
                true
            }
        },
        (Ty::Const(c1), Ty::Const(c2)) => c1 == c2,
        (Ty::Option(x), Ty::Option(y)) | (Ty::List(x), Ty::List(y)) => matches(witness, x, y),
        (Ty::Tuple(xs), Ty::Tuple(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys.iter())
                    .all(|(x, y)| matches(witness, x, y))
        }
        (Ty::Arrow(a1, e1, r1), Ty::Arrow(a2, e2, r2)) => {
            e1 == e2 && matches(witness, a1, a2) && matches(witness, r1, r2)
        }
        _ => false,
    }
}
