//! Bidirectional annotation checker.
//!
//! `check(env, term)` validates that every annotation a term carries is
//! consistent with the typing judgments and returns the term's validated
//! type and effect. The checker never infers missing information: each
//! judgment recomputes a type from the subterms and compares it against
//! what the node declares.
//!
//! Judgments (`env ⊢ term : (type, effect)`):
//!
//! - literal: its base type, pure
//! - `x : t`: `x ↦ et` in env, `et` compatible with `t`; yields `(et, pure)`
//! - `fun (x : s) -> m`: `m` under `x ↦ s` yields `(mt, meff)`; the arrow
//!   `s -[meff]-> mt` must be compatible with the declared type
//! - `f a`: at most one of `f`, `a` may be effectful; `f`'s type must solve
//!   to the declared `at -[ceff]-> rt`, `a`'s to `at`; the combined effect
//!   must stay within `ceff`
//! - `let`, `if`, lists, constructors and `match` as documented on their
//!   helpers below
//!
//! Type compatibility is always `compatible(checked, declared)`: the
//! type computed from the subterms is the general side.

use crate::env::TypeEnv;
use crate::error::{CheckError, FailureClass, Rejection};
use crate::pattern::{check_pattern, constructor_fields};
use effcheck_ast::{Case, Step, Term};
use effcheck_types::{compatible, normalize_effects, unify, Eff, Subst, Ty, TyConst};
use tracing::{debug, trace, warn};

/// Recursion ceiling used when no configuration is given.
pub const DEFAULT_MAX_DEPTH: u32 = 512;

pub type CheckResult<T> = Result<T, CheckError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Terms nested deeper than this are rejected instead of recursing further.
    pub max_depth: u32,
    /// Reject `match` nodes with no cases.
    pub reject_empty_match: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            reject_empty_match: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct Checker {
    config: CheckerConfig,
    /// Current nesting depth (for the recursion limit)
    depth: u32,
}

/// Check `term` under `env` with the default configuration.
pub fn check(env: &TypeEnv, term: &Term) -> CheckResult<(Ty, Eff)> {
    Checker::new().check(env, term)
}

impl Checker {
    pub fn new() -> Self {
        Self::with_config(CheckerConfig::default())
    }

    pub fn with_config(config: CheckerConfig) -> Self {
        Checker { config, depth: 0 }
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Validate `term` under `env`, returning its type and effect.
    pub fn check(&mut self, env: &TypeEnv, term: &Term) -> CheckResult<(Ty, Eff)> {
        self.depth = 0;
        let result = self.check_term(env, term);
        match &result {
            Ok((ty, eff)) => trace!(%ty, %eff, "term accepted"),
            Err(err) => match err.class() {
                FailureClass::Rejection => debug!(path = %err.path, "term rejected: {}", err.kind),
                FailureClass::Invariant => warn!(path = %err.path, "{}", err.kind),
            },
        }
        result
    }

    fn enter_depth(&mut self) -> CheckResult<()> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            Err(CheckError::rejected(Rejection::DepthLimitExceeded {
                limit: self.config.max_depth,
            }))
        } else {
            Ok(())
        }
    }

    fn exit_depth(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn check_term(&mut self, env: &TypeEnv, term: &Term) -> CheckResult<(Ty, Eff)> {
        self.enter_depth()?;
        let result = self.check_inner(env, term);
        self.exit_depth();
        result
    }

    fn check_inner(&mut self, env: &TypeEnv, term: &Term) -> CheckResult<(Ty, Eff)> {
        match term {
            Term::Lit(lit) => {
                trace!(depth = self.depth, %lit, "literal");
                Ok((lit.ty(), Eff::Pure))
            }

            Term::Variable { ty, name } => {
                trace!(depth = self.depth, %name, declared = %ty, "variable");
                let et = env
                    .lookup(name)
                    .ok_or_else(|| Rejection::UnknownVariable(name.clone()))?;
                expect_compatible(et, ty)?;
                Ok((et.clone(), Eff::Pure))
            }

            Term::Lambda {
                ty,
                param,
                param_ty,
                body,
            } => {
                trace!(depth = self.depth, %param, declared = %ty, "lambda");
                let inner = env.with(param.clone(), param_ty.clone());
                let (mt, meff) = self
                    .check_term(&inner, body)
                    .map_err(|e| e.within(Step::LambdaBody))?;
                let fun_ty = Ty::arrow(param_ty.clone(), meff, mt);
                expect_compatible(&fun_ty, ty)?;
                Ok((fun_ty, Eff::Pure))
            }

            Term::Apply {
                ty,
                fun,
                arg_ty,
                arg,
                eff,
            } => self.check_apply(env, ty, fun, arg_ty, arg, *eff),

            Term::Let {
                name,
                bound_ty,
                bound,
                body,
                ty,
                eff,
            } => {
                trace!(depth = self.depth, %name, declared = %ty, "let");
                let (mt, meff) = self
                    .check_term(env, bound)
                    .map_err(|e| e.within(Step::LetBound))?;
                expect_compatible(&mt, bound_ty).map_err(|e| e.within(Step::LetBound))?;
                let (nt, neff) = self
                    .check_term(&env.with(name.clone(), mt), body)
                    .map_err(|e| e.within(Step::LetBody))?;
                expect_compatible(&nt, ty)?;
                expect_within(meff.join(neff), *eff)?;
                Ok((nt, *eff))
            }

            Term::If {
                ty,
                cond,
                then_branch,
                else_branch,
                eff,
            } => self.check_if(env, ty, cond, then_branch, else_branch, *eff),

            Term::List { ty, elems, eff } => {
                trace!(depth = self.depth, declared = %ty, len = elems.len(), "list");
                let Ty::List(elem_ty) = ty else {
                    return Err(Rejection::NotAList(ty.clone()).into());
                };
                for (i, elem) in elems.iter().enumerate() {
                    self.check_component(env, elem, elem_ty, *eff)
                        .map_err(|e| e.within(Step::ListElem(i)))?;
                }
                Ok((ty.clone(), *eff))
            }

            Term::Ctor {
                ty,
                tag,
                args,
                eff,
            } => {
                trace!(depth = self.depth, %tag, declared = %ty, "constructor");
                let fields = constructor_fields(ty, tag, args.len())?;
                for (i, (arg, field)) in args.iter().zip(&fields).enumerate() {
                    self.check_component(env, arg, field, *eff)
                        .map_err(|e| e.within(Step::CtorArg(i)))?;
                }
                Ok((ty.clone(), *eff))
            }

            Term::Match {
                ty,
                scrutinee,
                cases,
                eff,
            } => self.check_match(env, ty, scrutinee, cases, *eff),
        }
    }

    /// A list element or constructor argument: its type must be compatible
    /// with the component type and its effect within the node's effect.
    fn check_component(
        &mut self,
        env: &TypeEnv,
        term: &Term,
        component: &Ty,
        ceiling: Eff,
    ) -> CheckResult<()> {
        let (t, e) = self.check_term(env, term)?;
        expect_compatible(&t, component)?;
        expect_within(e, ceiling)
    }

    /// `f a` declared `(rt, ceff)` with argument type `at`.
    ///
    /// Both sides are checked first. If both may side-effect the term is
    /// rejected. `f`'s checked type must solve to `at -[ceff]-> rt` with only
    /// its own variables instantiated, likewise `a`'s type to `at`; latent
    /// effects are compared through `j = latent ⊔ feff ⊔ aeff ⊑ ceff`.
    fn check_apply(
        &mut self,
        env: &TypeEnv,
        rt: &Ty,
        fun: &Term,
        at: &Ty,
        arg: &Term,
        ceff: Eff,
    ) -> CheckResult<(Ty, Eff)> {
        trace!(depth = self.depth, declared = %rt, %ceff, "apply");
        let (mt, meff) = self
            .check_term(env, fun)
            .map_err(|e| e.within(Step::ApplyFun))?;
        let (nt, neff) = self
            .check_term(env, arg)
            .map_err(|e| e.within(Step::ApplyArg))?;
        if !meff.is_pure() && !neff.is_pure() {
            return Err(Rejection::OrderDependentEffects {
                fun_eff: meff,
                arg_eff: neff,
            }
            .into());
        }

        let expected_fun = Ty::arrow(at.clone(), ceff, rt.clone());
        match_annotation(&mt, &expected_fun, LatentSlot::Exempt)
            .map_err(|e| e.within(Step::ApplyFun))?;
        match_annotation(&nt, at, LatentSlot::Compared).map_err(|e| e.within(Step::ApplyArg))?;

        // A function typed by a bare variable has no visible latent effect;
        // it is bounded by the declared call effect.
        let latent = match &mt {
            Ty::Arrow(_, e, _) => *e,
            _ => ceff,
        };
        let j = Eff::join_all([latent, meff, neff]);
        expect_within(j, ceff)?;
        Ok((rt.clone(), j))
    }

    /// `if b then m else n` declared `(t, e)`.
    ///
    /// `b` must be exactly `bool`; the branch types must unify and each
    /// solved branch type must be compatible with `t`; every part's effect
    /// must stay within `e`. The result effect is the join of the parts.
    fn check_if(
        &mut self,
        env: &TypeEnv,
        t: &Ty,
        cond: &Term,
        then_branch: &Term,
        else_branch: &Term,
        e: Eff,
    ) -> CheckResult<(Ty, Eff)> {
        trace!(depth = self.depth, declared = %t, %e, "if");
        let (bt, beff) = self
            .check_term(env, cond)
            .map_err(|err| err.within(Step::IfCond))?;
        if bt != Ty::Const(TyConst::Bool) {
            return Err(CheckError::rejected(Rejection::ConditionNotBool(bt)).within(Step::IfCond));
        }
        expect_within(beff, e).map_err(|err| err.within(Step::IfCond))?;

        let (mt, meff) = self
            .check_term(env, then_branch)
            .map_err(|err| err.within(Step::IfThen))?;
        let (nt, neff) = self
            .check_term(env, else_branch)
            .map_err(|err| err.within(Step::IfElse))?;

        let s = solve(&mt, &nt)?;
        let branches = [(&mt, meff, Step::IfThen), (&nt, neff, Step::IfElse)];
        for (branch_ty, branch_eff, step) in branches {
            expect_compatible(&s.apply(branch_ty), t).map_err(|err| err.within(step))?;
            expect_within(branch_eff, e).map_err(|err| err.within(step))?;
        }
        Ok((t.clone(), Eff::join_all([beff, meff, neff])))
    }

    /// `match s with cases` declared `(rt, eff)`.
    ///
    /// The scrutinee's effect must stay within `eff`. Each case's pattern is
    /// checked against the scrutinee's checked type, its bindings extend the
    /// environment for the body, and the body must be compatible with `rt`
    /// with an effect within `eff`.
    fn check_match(
        &mut self,
        env: &TypeEnv,
        rt: &Ty,
        scrutinee: &Term,
        cases: &[Case],
        eff: Eff,
    ) -> CheckResult<(Ty, Eff)> {
        trace!(depth = self.depth, declared = %rt, cases = cases.len(), "match");
        if cases.is_empty() && self.config.reject_empty_match {
            return Err(Rejection::EmptyMatch.into());
        }
        let (st, seff) = self
            .check_term(env, scrutinee)
            .map_err(|e| e.within(Step::Scrutinee))?;
        expect_within(seff, eff).map_err(|e| e.within(Step::Scrutinee))?;

        for (i, case) in cases.iter().enumerate() {
            let bindings =
                check_pattern(&case.pat, &st).map_err(|e| e.within(Step::CasePattern(i)))?;
            let mut case_env = env.clone();
            case_env.extend(bindings);
            self.check_component(&case_env, &case.body, rt, eff)
                .map_err(|e| e.within(Step::CaseBody(i)))?;
        }
        Ok((rt.clone(), eff))
    }
}

fn expect_compatible(checked: &Ty, declared: &Ty) -> CheckResult<()> {
    if compatible(checked, declared) {
        Ok(())
    } else {
        Err(Rejection::Incompatible {
            checked: checked.clone(),
            declared: declared.clone(),
        }
        .into())
    }
}

fn expect_within(effect: Eff, ceiling: Eff) -> CheckResult<()> {
    if effect.leq(ceiling) {
        Ok(())
    } else {
        Err(Rejection::EffectTooStrong { effect, ceiling }.into())
    }
}

/// Unify `left` and `right`, verifying that the solution equates them.
fn solve(left: &Ty, right: &Ty) -> CheckResult<Subst> {
    let s = unify(left, right).map_err(|source| Rejection::Unsatisfiable {
        left: left.clone(),
        right: right.clone(),
        source,
    })?;
    let (l, r) = (s.apply(left), s.apply(right));
    if normalize_effects(&l) != normalize_effects(&r) {
        return Err(CheckError::invariant(format!(
            "unifier solution {s} does not equate {left} and {right} (got {l} and {r})"
        )));
    }
    Ok(s)
}

/// Whether the outermost latent effect takes part in annotation matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LatentSlot {
    /// The top-level arrow effect is bounded by the call effect instead.
    Exempt,
    Compared,
}

/// The checked type `checked` must solve to exactly `declared`: only
/// variables of `checked` may be instantiated, and latent effects at every
/// nested position must agree.
fn match_annotation(checked: &Ty, declared: &Ty, slot: LatentSlot) -> CheckResult<()> {
    let s = solve(checked, declared)?;
    let solved = s.apply(checked);
    let same = match (slot, &solved, declared) {
        (LatentSlot::Exempt, Ty::Arrow(sa, _, sr), Ty::Arrow(da, _, dr)) => sa == da && sr == dr,
        _ => solved == *declared,
    };
    if !same {
        return Err(Rejection::AnnotationMismatch {
            declared: declared.clone(),
            solved,
        }
        .into());
    }
    Ok(())
}
