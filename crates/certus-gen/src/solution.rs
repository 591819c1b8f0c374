//! Solution-first sampling.
//!
//! Target values for every unknown are fixed before any equation exists;
//! builders then construct equations that hold for those values by
//! arithmetic construction, which is what makes consistency a property of
//! construction rather than of luck.

use certus_expr::{Solution, Unknown};
use rand::Rng;

use crate::sampler::sample_value;

/// Assigns every unknown an independent non-zero value in `[1, bound]`,
/// integer or one-decimal-place rational per the decimal policy.
pub fn sample_solution<R: Rng + ?Sized>(
    rng: &mut R,
    unknowns: &[Unknown],
    bound: i64,
    allow_decimals: bool,
) -> Solution {
    let entries = unknowns
        .iter()
        .map(|u| (u.clone(), sample_value(rng, bound, allow_decimals)))
        .collect();
    Solution::new(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use certus_rational::Rational;
    use num_traits::Zero;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_every_unknown_assigned() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let unknowns = Unknown::pool(3);
        let solution = sample_solution(&mut rng, &unknowns, 10, false);
        for u in &unknowns {
            let v = solution.get(u).unwrap();
            assert!(!v.is_zero());
            assert!(v.is_integer());
            assert!(*v <= Rational::from(10));
        }
    }

    #[test]
    fn test_decimal_policy() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let unknowns = Unknown::pool(2);
        let solution = sample_solution(&mut rng, &unknowns, 10, true);
        for (_, v) in solution.entries() {
            assert!((v.clone() * Rational::from(10)).is_integer());
        }
    }
}
