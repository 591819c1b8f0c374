//! Grade-school builder.
//!
//! One equation per unknown, each featuring its own unknown plus up to
//! two others, with coefficients rendered either as `2*x` or as repeated
//! addition when multiplication is not an allowed operator. `*` and `/`
//! picked mid-equation apply to the whole accumulated left side, which is
//! where shapes like `(x + y) * 2 = 18` come from.
//!
//! An equation whose derived right side lands out of range or breaks the
//! decimal policy is rebuilt in place rather than patched with a
//! correction constant. Rows proportional to an earlier row are rebuilt
//! too, which keeps most candidates full rank before the validator ever
//! sees them.

use certus_expr::{Equation, Expr, Op, Solution, Unknown};
use certus_rational::Rational;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::GradeSchoolConfig;
use crate::sampler::{pick, sample_integer};
use crate::solution::sample_solution;
use crate::validate::Candidate;

/// Solutions are capped at `max_value / 3`.
pub(crate) const SOLUTION_DIVISOR: i64 = 3;

/// Per-equation rebuilds before falling back to a diagonal equation.
const EQUATION_REBUILDS: u32 = 20;

/// Largest term coefficient.
const COEF_MAX: i64 = 3;

/// Builds one grade-school candidate.
pub(crate) fn build<R: Rng + ?Sized>(rng: &mut R, config: &GradeSchoolConfig) -> Candidate {
    let unknowns = Unknown::pool(config.num_unknowns);
    let bound = (config.max_value / SOLUTION_DIVISOR).max(1);
    let solution = sample_solution(rng, &unknowns, bound, config.allow_decimals);

    let mut equations: Vec<Equation> = Vec::with_capacity(config.num_unknowns);
    let mut rows: Vec<Vec<Rational>> = Vec::with_capacity(config.num_unknowns);

    for featured in 0..config.num_unknowns {
        let mut accepted = None;
        for _ in 0..EQUATION_REBUILDS {
            let eq = build_equation(rng, config, &unknowns, featured, &solution);
            let Some(row) = coefficient_row(&eq, &unknowns) else {
                continue;
            };
            if !rhs_acceptable(&eq, config) {
                continue;
            }
            if rows.iter().any(|earlier| proportional(earlier, &row)) {
                continue;
            }
            accepted = Some((eq, row));
            break;
        }
        let (eq, row) = accepted.unwrap_or_else(|| {
            let eq = fallback_equation(rng, config, &unknowns[featured], &solution);
            let row = coefficient_row(&eq, &unknowns).expect("fallback is linear");
            (eq, row)
        });
        rows.push(row);
        equations.push(eq);
    }

    Candidate {
        equations,
        unknowns,
        solution,
    }
}

/// Builds one equation featuring `unknowns[featured]`, then mixing in up
/// to two of the others.
fn build_equation<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GradeSchoolConfig,
    unknowns: &[Unknown],
    featured: usize,
    solution: &Solution,
) -> Equation {
    let n = unknowns.len();
    #[allow(clippy::cast_possible_truncation)]
    let use_count = sample_integer(rng, 1, n.min(3) as i64) as usize;

    let mut chosen = vec![unknowns[featured].clone()];
    let mut others: Vec<Unknown> = unknowns
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != featured)
        .map(|(_, u)| u.clone())
        .collect();
    others.shuffle(rng);
    chosen.extend(others.into_iter().take(use_count - 1));

    let coef_max = COEF_MAX.min(config.max_value / SOLUTION_DIVISOR).max(1);
    let mul_allowed = config.operations.contains(&Op::Mul);

    let first = &chosen[0];
    let coef = sample_integer(rng, 1, coef_max);
    let mut left = term(coef, first, mul_allowed);
    let mut value = Rational::from(coef) * solution.get(first).expect("sampled above").clone();

    for unknown in &chosen[1..] {
        let op = *pick(rng, &config.operations);
        let coef = sample_integer(rng, 1, coef_max);
        let unknown_value = solution.get(unknown).expect("sampled above").clone();
        match op {
            Op::Add => {
                left = append_term(left, coef, unknown, mul_allowed, false);
                value = value + Rational::from(coef) * unknown_value;
            }
            Op::Sub => {
                left = append_term(left, coef, unknown, mul_allowed, true);
                value = value - Rational::from(coef) * unknown_value;
            }
            // Applied to the whole accumulated side; the term's unknown
            // is dropped.
            Op::Mul => {
                let k = sample_integer(rng, 2, coef_max.max(2));
                left = left.times(Expr::number(k));
                value = value * Rational::from(k);
            }
            Op::Div => {
                let k = sample_integer(rng, 2, coef_max.max(2));
                left = left.divided_by(Expr::number(k));
                value = value / Rational::from(k);
            }
        }
    }

    // Sometimes tack on a plain constant term.
    if rng.gen_bool(0.5) {
        let c = sample_integer(rng, 1, (config.max_value / SOLUTION_DIVISOR).max(1));
        if rng.gen_bool(0.5) {
            left = left.plus(Expr::number(c));
            value = value + Rational::from(c);
        } else {
            left = left.minus(Expr::number(c));
            value = value - Rational::from(c);
        }
    }

    Equation::new(left, Expr::Number(value))
}

/// A guaranteed-diagonal equation `coef*u [+-] const = rhs`, always in
/// range and independent of every other fallback row.
fn fallback_equation<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GradeSchoolConfig,
    unknown: &Unknown,
    solution: &Solution,
) -> Equation {
    let coef_max = COEF_MAX.min(config.max_value / SOLUTION_DIVISOR).max(1);
    let coef = sample_integer(rng, 1, coef_max);
    let c = sample_integer(rng, 1, (config.max_value / SOLUTION_DIVISOR).max(1));
    let mul_allowed = config.operations.contains(&Op::Mul);

    let base = term(coef, unknown, mul_allowed);
    let base_value = Rational::from(coef) * solution.get(unknown).expect("sampled above").clone();

    // `coef*u + c` can exceed the bound when the solution sits at the
    // cap; subtracting instead always stays inside it.
    let added = base_value.clone() + Rational::from(c);
    if added.abs() <= Rational::from(config.max_value) && rng.gen_bool(0.5) {
        Equation::new(base.plus(Expr::number(c)), Expr::Number(added))
    } else {
        Equation::new(
            base.minus(Expr::number(c)),
            Expr::Number(base_value - Rational::from(c)),
        )
    }
}

/// Renders a `coef * unknown` term: `2*x` when multiplication is an
/// allowed operator, `x + x` otherwise.
fn term(coef: i64, unknown: &Unknown, mul_allowed: bool) -> Expr {
    if coef == 1 || mul_allowed {
        Expr::scaled_symbol(&Rational::from(coef), unknown)
    } else {
        let mut sum = Expr::symbol(unknown);
        for _ in 1..coef {
            sum = sum.plus(Expr::symbol(unknown));
        }
        sum
    }
}

/// Appends a `coef * unknown` term to the accumulated left side.
fn append_term(left: Expr, coef: i64, unknown: &Unknown, mul_allowed: bool, subtract: bool) -> Expr {
    if coef == 1 || mul_allowed {
        let t = Expr::scaled_symbol(&Rational::from(coef), unknown);
        if subtract {
            left.minus(t)
        } else {
            left.plus(t)
        }
    } else {
        // Repetition rendering: each occurrence is its own term.
        let mut acc = left;
        for _ in 0..coef {
            acc = if subtract {
                acc.minus(Expr::symbol(unknown))
            } else {
                acc.plus(Expr::symbol(unknown))
            };
        }
        acc
    }
}

/// The derived right side must respect the value bound and the decimal
/// policy; everything else displayed is a small sampled integer.
fn rhs_acceptable(eq: &Equation, config: &GradeSchoolConfig) -> bool {
    let Expr::Number(rhs) = &eq.right else {
        return false;
    };
    if rhs.abs() > Rational::from(config.max_value) {
        return false;
    }
    if config.allow_decimals {
        (rhs.clone() * Rational::from(10)).is_integer()
    } else {
        rhs.is_integer()
    }
}

/// Dense coefficient row of an equation over the unknown order.
fn coefficient_row(eq: &Equation, unknowns: &[Unknown]) -> Option<Vec<Rational>> {
    let form = eq.normalized().ok()?;
    Some(unknowns.iter().map(|u| form.coefficient(u)).collect())
}

/// True when one row is a scalar multiple of the other.
fn proportional(a: &[Rational], b: &[Rational]) -> bool {
    debug_assert_eq!(a.len(), b.len());
    for i in 0..a.len() {
        for j in (i + 1)..a.len() {
            if &a[i] * &b[j] != &a[j] * &b[i] {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{validate, Rejection};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_equations_hold_for_the_solution() {
        let config = GradeSchoolConfig {
            num_unknowns: 3,
            operations: vec![Op::Add, Op::Sub, Op::Mul, Op::Div],
            max_value: 30,
            allow_decimals: false,
        };
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let candidate = build(&mut rng, &config);
            assert_eq!(candidate.equations.len(), 3);
            for eq in &candidate.equations {
                let row = eq.normalized().unwrap();
                let residual = row.eval(|u| candidate.solution.get(u).cloned());
                assert!(residual == Rational::from(0), "equation `{eq}` does not hold");
            }
        }
    }

    #[test]
    fn test_validates_or_rank_rejected_only() {
        // Construction guarantees everything except full rank, which the
        // duplicate-row bias makes rare but not impossible.
        let config = GradeSchoolConfig::default();
        for seed in 0..100 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let candidate = build(&mut rng, &config);
            match validate(&candidate, config.max_value, config.allow_decimals) {
                Ok(()) | Err(Rejection::RankDeficient { .. }) => {}
                Err(other) => panic!("unexpected rejection: {other:?}"),
            }
        }
    }

    #[test]
    fn test_no_multiplication_renders_repetition() {
        let config = GradeSchoolConfig {
            num_unknowns: 1,
            operations: vec![Op::Add, Op::Sub],
            max_value: 30,
            allow_decimals: false,
        };
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let candidate = build(&mut rng, &config);
            for eq in &candidate.equations {
                let ops = eq.operators();
                assert!(ops.iter().all(|op| matches!(op, Op::Add | Op::Sub)));
            }
        }
    }

    #[test]
    fn test_decimal_solutions_have_one_place() {
        let config = GradeSchoolConfig {
            num_unknowns: 2,
            operations: vec![Op::Add, Op::Sub],
            max_value: 30,
            allow_decimals: true,
        };
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let candidate = build(&mut rng, &config);
        for (_, v) in candidate.solution.entries() {
            assert!((v.clone() * Rational::from(10)).is_integer());
        }
    }

    #[test]
    fn test_proportional_rows() {
        let q = Rational::from;
        assert!(proportional(&[q(2), q(-1)], &[q(4), q(-2)]));
        assert!(!proportional(&[q(2), q(-1)], &[q(4), q(2)]));
        assert!(!proportional(&[q(1), q(0)], &[q(0), q(1)]));
    }
}
