//! Simple-quiz builder.
//!
//! Each equation features one unknown repeated two or three times, in the
//! style of `x + x + x = 12`, optionally mixing in one already-featured
//! unknown. Under the featuring order the coefficient matrix is lower
//! triangular with a nonzero diagonal, so every candidate is uniquely
//! solvable by construction.

use certus_expr::{Equation, Expr, Solution, Unknown};
use certus_rational::Rational;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::SimpleQuizConfig;
use crate::sampler::sample_integer;
use crate::solution::sample_solution;
use crate::validate::Candidate;

/// How often the featured unknown repeats.
const MIN_REPEATS: i64 = 2;
const MAX_REPEATS: i64 = 3;

/// Chance of coupling an equation to an earlier-featured unknown.
const MIX_PROBABILITY: f64 = 0.7;

/// Solutions are capped at `max_value / 4` so a maximally repeated
/// unknown plus one mixed-in term never pushes the right side past the
/// value bound.
pub(crate) const SOLUTION_DIVISOR: i64 = 4;

/// Builds one simple-quiz candidate.
pub(crate) fn build<R: Rng + ?Sized>(rng: &mut R, config: &SimpleQuizConfig) -> Candidate {
    let unknowns = Unknown::pool(config.num_unknowns);
    let bound = (config.max_value / SOLUTION_DIVISOR).max(1);
    let solution = sample_solution(rng, &unknowns, bound, false);

    let mut order: Vec<Unknown> = unknowns.clone();
    order.shuffle(rng);

    let mut equations = Vec::with_capacity(order.len());
    for (i, featured) in order.iter().enumerate() {
        let repeats = sample_integer(rng, MIN_REPEATS, MAX_REPEATS);
        let featured_value = solution.get(featured).expect("sampled above").clone();
        let mut value = Rational::from(repeats) * featured_value;

        let mut left = Expr::symbol(featured);
        for _ in 1..repeats {
            left = left.plus(Expr::symbol(featured));
        }

        // Couple the system by mixing in one earlier-featured unknown.
        if i > 0 && rng.gen_bool(MIX_PROBABILITY) {
            let mixed = &order[rng.gen_range(0..i)];
            let mixed_value = solution.get(mixed).expect("sampled above").clone();
            if rng.gen_bool(0.5) {
                left = left.plus(Expr::symbol(mixed));
                value = value + mixed_value;
            } else {
                left = left.minus(Expr::symbol(mixed));
                value = value - mixed_value;
            }
        }

        equations.push(Equation::new(left, Expr::Number(value)));
    }

    Candidate {
        equations,
        unknowns,
        solution,
    }
}
