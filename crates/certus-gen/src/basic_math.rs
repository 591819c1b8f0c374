//! Basic-math builder.
//!
//! Produces a single equation with the unknown isolated on the left and a
//! chain of constants on the right, e.g. `x = (7 + 5) * 3`. The running
//! value of the chain is the solution, so the equation holds by
//! construction; the validator still re-solves it and enforces the value
//! bound, rejecting chains that wandered out of range.

use certus_expr::{Equation, Expr, Op, Solution, Unknown};
use certus_rational::Rational;
use rand::Rng;

use crate::config::BasicMathConfig;
use crate::sampler::{pick, sample_integer, sample_value};
use crate::validate::Candidate;

/// Multipliers stay small so chains don't blow past the value bound on
/// every attempt.
const MUL_OPERAND_MAX: i64 = 5;

/// Divisors are drawn from the running value's small divisors.
const DIV_DIVISOR_MAX: i64 = 10;

/// Builds one basic-math candidate.
pub(crate) fn build<R: Rng + ?Sized>(rng: &mut R, config: &BasicMathConfig) -> Candidate {
    let unknowns = Unknown::pool(1);
    let x = unknowns[0].clone();

    let first = sample_value(rng, config.max_value, config.allow_decimals);
    let mut value = first.clone();
    let mut chain = Expr::Number(first);

    for _ in 1..config.elements {
        match *pick(rng, &config.operations) {
            Op::Add => {
                let operand = sample_value(rng, config.max_value, config.allow_decimals);
                value = value + &operand;
                chain = chain.plus(Expr::Number(operand));
            }
            Op::Sub => {
                let operand = sample_value(rng, config.max_value, config.allow_decimals);
                value = value - &operand;
                chain = chain.minus(Expr::Number(operand));
            }
            Op::Mul => {
                (chain, value) = multiply(rng, chain, value, config.max_value);
            }
            Op::Div => {
                // Division must stay exact under the decimal policy. When
                // the running value has no usable divisor, fall back to a
                // multiplication step.
                if let Some(d) = pick_divisor(rng, &value, config) {
                    value = value / Rational::from(d);
                    chain = chain.divided_by(Expr::number(d));
                } else {
                    (chain, value) = multiply(rng, chain, value, config.max_value);
                }
            }
        }
    }

    Candidate {
        equations: vec![Equation::new(Expr::symbol(&x), chain)],
        unknowns,
        solution: Solution::new(vec![(x, value)]),
    }
}

fn multiply<R: Rng + ?Sized>(
    rng: &mut R,
    chain: Expr,
    value: Rational,
    max_value: i64,
) -> (Expr, Rational) {
    let hi = MUL_OPERAND_MAX.min(max_value).max(2);
    let k = sample_integer(rng, 2, hi);
    (chain.times(Expr::number(k)), value * Rational::from(k))
}

/// Picks a small divisor of the running value, keeping the quotient an
/// integer (or a one-decimal-place value in decimal mode).
fn pick_divisor<R: Rng + ?Sized>(
    rng: &mut R,
    value: &Rational,
    config: &BasicMathConfig,
) -> Option<i64> {
    let hi = DIV_DIVISOR_MAX.min(config.max_value);
    let mut divisors = Vec::new();
    for d in 2..=hi {
        let quotient = value.clone() / Rational::from(d);
        let exact = if config.allow_decimals {
            (quotient * Rational::from(10)).is_integer()
        } else {
            quotient.is_integer()
        };
        if exact {
            divisors.push(d);
        }
    }
    if divisors.is_empty() {
        None
    } else {
        Some(*pick(rng, &divisors))
    }
}
