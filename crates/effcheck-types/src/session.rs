//! Id counters for one generation/checking session.
//!
//! A session hands out type-variable ids and fresh variable names. Ids are
//! unique within a session until [`Session::reset`] is called; resetting at
//! the start of every session keeps ids small and reproducible, which makes
//! a failing seed replay identically.
//!
//! Counters are atomic so one session may be shared by reference between
//! threads without losing uniqueness. Independent sessions never share
//! counters.

use crate::ty::{Ty, TypeVarId};
use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Debug, Default)]
pub struct Session {
    next_type_var: AtomicU32,
    next_name: AtomicU32,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh_type_var_id(&self) -> TypeVarId {
        TypeVarId(self.next_type_var.fetch_add(1, Ordering::Relaxed))
    }

    pub fn fresh_type_var(&self) -> Ty {
        Ty::var(self.fresh_type_var_id())
    }

    /// A variable name not handed out before in this session: `var0`, `var1`, ...
    pub fn fresh_name(&self) -> String {
        format!("var{}", self.next_name.fetch_add(1, Ordering::Relaxed))
    }

    /// Number of type variables handed out since the last reset.
    pub fn type_vars_issued(&self) -> u32 {
        self.next_type_var.load(Ordering::Relaxed)
    }

    /// Restart both counters at zero.
    pub fn reset(&self) {
        self.next_type_var.store(0, Ordering::Relaxed);
        self.next_name.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn fresh_vars_are_unique() {
        let s = Session::new();
        assert_eq!(s.fresh_type_var(), Ty::var(TypeVarId(0)));
        assert_eq!(s.fresh_type_var(), Ty::var(TypeVarId(1)));
        assert_eq!(s.fresh_type_var(), Ty::var(TypeVarId(2)));
        assert_eq!(s.type_vars_issued(), 3);
    }

    #[test]
    fn names_and_vars_count_independently() {
        let s = Session::new();
        s.fresh_type_var();
        s.fresh_type_var();
        assert_eq!(s.fresh_name(), "var0");
        assert_eq!(s.fresh_name(), "var1");
    }

    #[test]
    fn reset_restarts_both_counters() {
        let s = Session::new();
        s.fresh_type_var();
        s.fresh_name();
        s.reset();
        assert_eq!(s.fresh_type_var_id(), TypeVarId(0));
        assert_eq!(s.fresh_name(), "var0");
    }

    #[test]
    fn sessions_do_not_share_counters() {
        let a = Session::new();
        let b = Session::new();
        a.fresh_type_var();
        assert_eq!(b.fresh_type_var_id(), TypeVarId(0));
    }

    #[test]
    fn shared_session_stays_unique_across_threads() {
        let s = Arc::new(Session::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let s = Arc::clone(&s);
                std::thread::spawn(move || {
                    (0..100)
                        .map(|_| s.fresh_type_var_id())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        let mut seen = HashSet::new();
        for h in handles {
            for id in h.join().unwrap() {
                assert!(seen.insert(id));
            }
        }
        assert_eq!(seen.len(), 400);
    }
}
