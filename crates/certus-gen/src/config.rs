//! Generation configuration.
//!
//! Mirrors the legacy generator's three presets and their defaults. A
//! configuration is validated once, up front; everything downstream can
//! assume its bounds hold.

use certus_expr::Op;
use certus_rational::Rational;

use crate::error::ConfigError;
use crate::pattern;

/// Decimal values carry exactly one decimal place.
pub const DECIMAL_PRECISION: u32 = 1;

/// Most unknowns any mode hands out.
pub const MAX_UNKNOWNS: usize = 4;

/// Largest supported value bound. Decimal values are drawn as scaled
/// integers, so the bound times the precision scale must stay within
/// `i64`.
pub const MAX_VALUE_LIMIT: i64 = i64::MAX / 10i64.pow(DECIMAL_PRECISION);

/// Basic math: one unknown isolated on the left, a chain of constants on
/// the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicMathConfig {
    /// Allowed operators for the right-side chain.
    pub operations: Vec<Op>,
    /// Inclusive magnitude bound for sampled and derived values.
    pub max_value: i64,
    /// Whether decimal values (one decimal place) are allowed.
    pub allow_decimals: bool,
    /// Number of values in the right-side chain (2 means `x = a op b`).
    pub elements: u32,
}

impl Default for BasicMathConfig {
    fn default() -> Self {
        Self {
            operations: vec![Op::Add, Op::Sub],
            max_value: 30,
            allow_decimals: false,
            elements: 2,
        }
    }
}

/// Simple quiz: repeated-unknown equations over `+` and `-`, integer
/// solutions only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleQuizConfig {
    /// Number of unknowns (and equations).
    pub num_unknowns: usize,
    /// Inclusive magnitude bound for sampled and derived values.
    pub max_value: i64,
}

impl Default for SimpleQuizConfig {
    fn default() -> Self {
        Self {
            num_unknowns: 2,
            max_value: 20,
        }
    }
}

/// Grade school: configurable operators and unknown subsets, decimals
/// optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeSchoolConfig {
    /// Number of unknowns (and equations).
    pub num_unknowns: usize,
    /// Allowed operators.
    pub operations: Vec<Op>,
    /// Inclusive magnitude bound for sampled and derived values.
    pub max_value: i64,
    /// Whether decimal values (one decimal place) are allowed.
    pub allow_decimals: bool,
}

impl Default for GradeSchoolConfig {
    fn default() -> Self {
        Self {
            num_unknowns: 2,
            operations: vec![Op::Add, Op::Sub],
            max_value: 30,
            allow_decimals: false,
        }
    }
}

/// The generation mode and its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Basic math equations.
    BasicMath(BasicMathConfig),
    /// Simple quiz equations.
    SimpleQuiz(SimpleQuizConfig),
    /// Grade school equations.
    GradeSchool(GradeSchoolConfig),
}

impl Mode {
    /// Returns the mode's name, as carried in error context.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Mode::BasicMath(_) => "basic_math",
            Mode::SimpleQuiz(_) => "simple_quiz",
            Mode::GradeSchool(_) => "grade_school",
        }
    }

    /// Returns the mode's value bound.
    #[must_use]
    pub fn max_value(&self) -> i64 {
        match self {
            Mode::BasicMath(c) => c.max_value,
            Mode::SimpleQuiz(c) => c.max_value,
            Mode::GradeSchool(c) => c.max_value,
        }
    }

    /// Returns whether the mode allows decimal values.
    #[must_use]
    pub fn allow_decimals(&self) -> bool {
        match self {
            Mode::BasicMath(c) => c.allow_decimals,
            Mode::SimpleQuiz(_) => false,
            Mode::GradeSchool(c) => c.allow_decimals,
        }
    }
}

/// A curriculum-authored equation shape.
///
/// Placeholders like `{x}` name unknowns when they use a standard pool
/// name, and constants otherwise (`{const1}`). `values` pins placeholders
/// to fixed values; remaining constants are filled in randomly, with one
/// derivable constant per equation computed from the pre-assigned
/// solution so the equation holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquationPattern {
    /// The template, e.g. `"{x} + {x} = {const1}"`.
    pub template: String,
    /// Fixed values for named placeholders.
    pub values: Vec<(String, Rational)>,
}

impl EquationPattern {
    /// Creates a pattern with no fixed values.
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            values: Vec::new(),
        }
    }

    /// Creates a pattern with fixed values.
    #[must_use]
    pub fn with_values(template: impl Into<String>, values: Vec<(String, Rational)>) -> Self {
        Self {
            template: template.into(),
            values,
        }
    }
}

/// A complete generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// The mode and its parameters.
    pub mode: Mode,
    /// Optional pattern override pinning the equation shapes.
    pub patterns: Option<Vec<EquationPattern>>,
}

impl GenerationConfig {
    /// Creates a configuration with no pattern override.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            patterns: None,
        }
    }

    /// Attaches a pattern override.
    #[must_use]
    pub fn with_patterns(mut self, patterns: Vec<EquationPattern>) -> Self {
        self.patterns = Some(patterns);
        self
    }

    /// Checks every parameter against the mode's supported bounds.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found. Nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mode.max_value() > MAX_VALUE_LIMIT {
            return Err(ConfigError::RangeTooLarge {
                mode: self.mode.name(),
                max: MAX_VALUE_LIMIT,
                got: self.mode.max_value(),
            });
        }
        match &self.mode {
            Mode::BasicMath(c) => {
                if c.operations.is_empty() {
                    return Err(ConfigError::EmptyOperations);
                }
                if c.elements == 0 || c.elements > 10 {
                    return Err(ConfigError::InvalidElementCount {
                        max: 10,
                        got: c.elements,
                    });
                }
                if c.max_value < 1 {
                    return Err(ConfigError::RangeTooSmall {
                        mode: "basic_math",
                        min: 1,
                        got: c.max_value,
                    });
                }
            }
            Mode::SimpleQuiz(c) => {
                if c.num_unknowns < 1 || c.num_unknowns > MAX_UNKNOWNS {
                    return Err(ConfigError::UnsupportedUnknownCount {
                        mode: "simple_quiz",
                        requested: c.num_unknowns,
                        min: 1,
                        max: MAX_UNKNOWNS,
                    });
                }
                // Solutions are sampled within max_value / 4 so that a
                // repeated unknown plus a mixed-in term stays in range.
                if c.max_value < 4 {
                    return Err(ConfigError::RangeTooSmall {
                        mode: "simple_quiz",
                        min: 4,
                        got: c.max_value,
                    });
                }
            }
            Mode::GradeSchool(c) => {
                if c.num_unknowns < 1 || c.num_unknowns > 3 {
                    return Err(ConfigError::UnsupportedUnknownCount {
                        mode: "grade_school",
                        requested: c.num_unknowns,
                        min: 1,
                        max: 3,
                    });
                }
                if c.operations.is_empty() {
                    return Err(ConfigError::EmptyOperations);
                }
                // Solutions are sampled within max_value / 3.
                if c.max_value < 3 {
                    return Err(ConfigError::RangeTooSmall {
                        mode: "grade_school",
                        min: 3,
                        got: c.max_value,
                    });
                }
            }
        }

        if let Some(patterns) = &self.patterns {
            if patterns.is_empty() {
                return Err(ConfigError::EmptyPatterns);
            }
            for p in patterns {
                pattern::check_template(p).map_err(|reason| ConfigError::InvalidPattern {
                    template: p.template.clone(),
                    reason,
                })?;
            }
        }

        Ok(())
    }
}
