//! Generation entry points and the retry controller.
//!
//! A generation attempt is build-then-validate: the mode builder (or the
//! pattern builder) constructs a candidate that holds for a freshly
//! sampled solution, and the validator re-solves it independently. A
//! rejected candidate is thrown away whole; nothing is patched. Internal
//! defects short-circuit instead of burning attempts on a bug.

use certus_expr::EquationSystem;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{GenerationConfig, Mode};
use crate::error::GenerateError;
use crate::validate::{validate, Candidate, Rejection};
use crate::{basic_math, grade_school, pattern, simple_quiz};

/// Attempts before a configuration is declared too constrained.
pub const MAX_ATTEMPTS: u32 = 30;

/// Generates a uniquely solvable equation system.
///
/// # Errors
///
/// Returns [`GenerateError::Config`] for invalid parameters,
/// [`GenerateError::RetriesExhausted`] when no attempt survives
/// validation, and [`GenerateError::Internal`] if a builder violates its
/// own construction guarantee.
pub fn generate<R: Rng + ?Sized>(
    config: &GenerationConfig,
    rng: &mut R,
) -> Result<EquationSystem, GenerateError> {
    config.validate()?;
    let max_value = config.mode.max_value();
    let allow_decimals = config.mode.allow_decimals();

    for _ in 0..MAX_ATTEMPTS {
        let candidate = if let Some(patterns) = &config.patterns {
            match pattern::build(rng, patterns, max_value, allow_decimals) {
                Ok(candidate) => candidate,
                Err(Rejection::Defect(msg)) => return Err(GenerateError::Internal(msg)),
                Err(_) => continue,
            }
        } else {
            match &config.mode {
                Mode::BasicMath(c) => basic_math::build(rng, c),
                Mode::SimpleQuiz(c) => simple_quiz::build(rng, c),
                Mode::GradeSchool(c) => grade_school::build(rng, c),
            }
        };

        match validate(&candidate, max_value, allow_decimals) {
            Ok(()) => {
                let Candidate {
                    equations,
                    unknowns,
                    solution,
                } = candidate;
                return Ok(EquationSystem::new(equations, unknowns, solution));
            }
            Err(Rejection::Defect(msg)) => return Err(GenerateError::Internal(msg)),
            Err(_) => {}
        }
    }

    Err(GenerateError::RetriesExhausted {
        mode: config.mode.name(),
        attempts: MAX_ATTEMPTS,
    })
}

/// Generates with a seeded rng, reproducibly.
///
/// # Errors
///
/// Same failure surface as [`generate`].
pub fn generate_seeded(
    config: &GenerationConfig,
    seed: u64,
) -> Result<EquationSystem, GenerateError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate(config, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        BasicMathConfig, EquationPattern, GradeSchoolConfig, SimpleQuizConfig,
    };
    use crate::error::ConfigError;
    use certus_expr::Op;

    #[test]
    fn test_default_modes_generate() {
        for seed in 0..50 {
            for mode in [
                Mode::BasicMath(BasicMathConfig::default()),
                Mode::SimpleQuiz(SimpleQuizConfig::default()),
                Mode::GradeSchool(GradeSchoolConfig::default()),
            ] {
                let config = GenerationConfig::new(mode);
                let system = generate_seeded(&config, seed).unwrap();
                assert_eq!(system.equations().len(), system.unknowns().len());
            }
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let config = GenerationConfig::new(Mode::GradeSchool(GradeSchoolConfig {
            num_unknowns: 3,
            operations: vec![Op::Add, Op::Sub, Op::Mul],
            max_value: 30,
            allow_decimals: false,
        }));
        let a = generate_seeded(&config, 42).unwrap();
        let b = generate_seeded(&config, 42).unwrap();
        assert_eq!(a.display_equations(), b.display_equations());
        assert_eq!(
            a.solution().display_map(),
            b.solution().display_map()
        );
    }

    #[test]
    fn test_different_seeds_differ() {
        let config = GenerationConfig::new(Mode::SimpleQuiz(SimpleQuizConfig::default()));
        let outputs: Vec<_> = (0..10)
            .map(|seed| generate_seeded(&config, seed).unwrap().display_equations())
            .collect();
        assert!(outputs.iter().any(|o| o != &outputs[0]));
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = GenerationConfig::new(Mode::BasicMath(BasicMathConfig {
            operations: vec![],
            ..BasicMathConfig::default()
        }));
        assert_eq!(
            generate_seeded(&config, 1),
            Err(GenerateError::Config(ConfigError::EmptyOperations))
        );
    }

    #[test]
    fn test_oversized_range_fails_fast() {
        let config = GenerationConfig::new(Mode::BasicMath(BasicMathConfig {
            max_value: i64::MAX,
            allow_decimals: true,
            ..BasicMathConfig::default()
        }));
        assert!(matches!(
            generate_seeded(&config, 1),
            Err(GenerateError::Config(ConfigError::RangeTooLarge { .. }))
        ));
    }

    #[test]
    fn test_degenerate_pattern_exhausts_retries() {
        let config = GenerationConfig::new(Mode::SimpleQuiz(SimpleQuizConfig::default()))
            .with_patterns(vec![
                EquationPattern::new("2 * {x} - {y} = {c1}"),
                EquationPattern::new("4 * {x} - 2 * {y} = {c2}"),
            ]);
        assert_eq!(
            generate_seeded(&config, 9),
            Err(GenerateError::RetriesExhausted {
                mode: "simple_quiz",
                attempts: MAX_ATTEMPTS,
            })
        );
    }

    #[test]
    fn test_pattern_override_generates() {
        let config = GenerationConfig::new(Mode::GradeSchool(GradeSchoolConfig::default()))
            .with_patterns(vec![
                EquationPattern::new("{x} + {y} = {c1}"),
                EquationPattern::new("{x} - {y} = {c2}"),
            ]);
        for seed in 0..20 {
            let system = generate_seeded(&config, seed).unwrap();
            assert_eq!(system.equations().len(), 2);
        }
    }

    #[test]
    fn test_basic_math_shape() {
        // Defaults: one unknown isolated on the left, constants only on
        // the right, like "x = 7 + 5".
        let config = GenerationConfig::new(Mode::BasicMath(BasicMathConfig::default()));
        for seed in 0..20 {
            let system = generate_seeded(&config, seed).unwrap();
            assert_eq!(system.equations().len(), 1);
            let eq = &system.equations()[0];
            assert!(system.display_equations()[0].starts_with("x = "));
            let mut right_unknowns = Vec::new();
            eq.right.collect_unknowns(&mut right_unknowns);
            assert!(right_unknowns.is_empty());
            assert!(!eq.right.has_repeated_symbol());
        }
    }

    #[test]
    fn test_simple_quiz_has_repetition() {
        let config = GenerationConfig::new(Mode::SimpleQuiz(SimpleQuizConfig::default()));
        for seed in 0..20 {
            let system = generate_seeded(&config, seed).unwrap();
            assert!(system
                .equations()
                .iter()
                .any(|eq| eq.left.has_repeated_symbol()));
        }
    }

    #[test]
    fn test_grade_school_three_unknowns_with_decimals() {
        let config = GenerationConfig::new(Mode::GradeSchool(GradeSchoolConfig {
            num_unknowns: 3,
            operations: vec![Op::Add, Op::Sub, Op::Mul],
            max_value: 30,
            allow_decimals: true,
        }));
        for seed in 0..20 {
            let system = generate_seeded(&config, seed).unwrap();
            assert_eq!(system.unknowns().len(), 3);
            for (_, value) in system.solution().entries() {
                use certus_rational::Rational;
                assert!((value.clone() * Rational::from(10)).is_integer());
            }
        }
    }

    #[test]
    fn test_basic_math_with_all_operations() {
        let config = GenerationConfig::new(Mode::BasicMath(BasicMathConfig {
            operations: vec![Op::Add, Op::Sub, Op::Mul, Op::Div],
            max_value: 30,
            allow_decimals: false,
            elements: 3,
        }));
        for seed in 0..50 {
            let system = generate_seeded(&config, seed).unwrap();
            let x = &system.unknowns()[0];
            assert!(system.solution().get(x).unwrap().is_integer());
        }
    }
}
