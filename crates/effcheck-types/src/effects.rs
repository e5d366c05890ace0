//! Effect lattice.
//!
//! An effect is conceptually a pair of flags: `(effectful, strong)`.
//! The pair `(false, true)` is illegal, which leaves three values that
//! form a chain:
//!
//! - `Pure`   = `(false, false)`, bottom, identity for [`Eff::join`]
//! - `Weak`   = `(true, false)`
//! - `Strong` = `(true, true)`, top
//!
//! The illegal pair cannot be represented by [`Eff`]; it can only be
//! observed at an input boundary ([`Eff::from_flags`] or deserialization),
//! where it surfaces as [`EffectError::IllegalFlags`].

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(bool, bool)", into = "(bool, bool)"))]
pub enum Eff {
    /// No tracked side effect.
    #[default]
    Pure,
    /// May perform a tracked side effect (including non-local control transfer).
    Weak,
    /// Effectful, and the effect is of the strongest, most general kind.
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EffectError {
    #[error("illegal effect flags (false, true): the strong flag requires the effect flag")]
    IllegalFlags,
}

impl Eff {
    /// Build an effect from its flag pair.
    pub fn from_flags(effectful: bool, strong: bool) -> Result<Self, EffectError> {
        match (effectful, strong) {
            (false, false) => Ok(Eff::Pure),
            (true, false) => Ok(Eff::Weak),
            (true, true) => Ok(Eff::Strong),
            (false, true) => Err(EffectError::IllegalFlags),
        }
    }

    /// The `(effectful, strong)` flag pair.
    pub fn flags(self) -> (bool, bool) {
        match self {
            Eff::Pure => (false, false),
            Eff::Weak => (true, false),
            Eff::Strong => (true, true),
        }
    }

    #[inline]
    pub fn is_pure(self) -> bool {
        self == Eff::Pure
    }

    /// Least upper bound (pointwise OR of the flags).
    ///
    /// The legal values form a chain, so pointwise OR is the maximum.
    #[inline]
    pub fn join(self, other: Eff) -> Eff {
        self.max(other)
    }

    /// `self ⊑ other`: an expression with effect `self` may appear where
    /// `other` is the declared ceiling.
    #[inline]
    pub fn leq(self, other: Eff) -> bool {
        self.join(other) == other
    }

    /// Join of every effect in `effs` (`Pure` when empty).
    pub fn join_all(effs: impl IntoIterator<Item = Eff>) -> Eff {
        effs.into_iter().fold(Eff::Pure, Eff::join)
    }
}

impl TryFrom<(bool, bool)> for Eff {
    type Error = EffectError;

    fn try_from((effectful, strong): (bool, bool)) -> Result<Self, Self::Error> {
        Eff::from_flags(effectful, strong)
    }
}

impl From<Eff> for (bool, bool) {
    fn from(eff: Eff) -> Self {
        eff.flags()
    }
}

impl fmt::Display for Eff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Eff::Pure => "pure",
            Eff::Weak => "weak",
            Eff::Strong => "strong",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Eff; 3] = [Eff::Pure, Eff::Weak, Eff::Strong];

    #[test]
    fn pure_is_bottom() {
        for e in ALL {
            assert!(Eff::Pure.leq(e));
            assert_eq!(Eff::Pure.join(e), e);
        }
    }

    #[test]
    fn strong_is_only_below_itself() {
        assert!(Eff::Strong.leq(Eff::Strong));
        assert!(!Eff::Strong.leq(Eff::Weak));
        assert!(!Eff::Strong.leq(Eff::Pure));
    }

    #[test]
    fn weak_targets() {
        assert!(Eff::Weak.leq(Eff::Weak));
        assert!(Eff::Weak.leq(Eff::Strong));
        assert!(!Eff::Weak.leq(Eff::Pure));
    }

    #[test]
    fn join_matches_pointwise_or() {
        for a in ALL {
            for b in ALL {
                let (a1, a2) = a.flags();
                let (b1, b2) = b.flags();
                assert_eq!(a.join(b), Eff::from_flags(a1 || b1, a2 || b2).unwrap());
            }
        }
    }

    #[test]
    fn illegal_flags_rejected() {
        assert_eq!(Eff::from_flags(false, true), Err(EffectError::IllegalFlags));
        assert_eq!(Eff::try_from((true, true)), Ok(Eff::Strong));
    }

    #[test]
    fn join_all_of_nothing_is_pure() {
        assert_eq!(Eff::join_all(std::iter::empty()), Eff::Pure);
        assert_eq!(Eff::join_all([Eff::Weak, Eff::Pure]), Eff::Weak);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_flag_pairs() {
        assert_eq!(serde_json::to_string(&Eff::Weak).unwrap(), "[true,false]");
        let e: Eff = serde_json::from_str("[true,true]").unwrap();
        assert_eq!(e, Eff::Strong);
        assert!(serde_json::from_str::<Eff>("[false,true]").is_err());
    }
}
