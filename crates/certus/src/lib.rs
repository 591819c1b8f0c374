//! # Certus
//!
//! A generator of small linear equation systems for math practice,
//! built on exact rational arithmetic.
//!
//! ## Features
//!
//! - **Exact Arithmetic**: Arbitrary-precision rationals; no floating
//!   point anywhere, so "has exactly one solution" is an exact statement
//! - **Solution-First Generation**: Target values are fixed before any
//!   equation is built, so every published system holds by construction
//! - **Independent Validation**: Each candidate is re-solved by
//!   Gauss-Jordan elimination and rejected unless the solution is unique
//! - **Three Modes**: Basic math chains, repetition-style simple quizzes,
//!   and grade-school systems with configurable operators
//! - **Pattern Overrides**: Curriculum-authored templates like
//!   `"{x} + {x} = {total}"` with optional pinned values
//!
//! ## Quick Start
//!
//! ```rust
//! use certus::prelude::*;
//!
//! let config = GenerationConfig::new(Mode::SimpleQuiz(SimpleQuizConfig::default()));
//! let system = generate_seeded(&config, 42).unwrap();
//! for line in system.display_equations() {
//!     println!("{line}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use certus_expr as expr;
pub use certus_gen as gen;
pub use certus_linalg as linalg;
pub use certus_rational as rational;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use certus_expr::{Equation, EquationSystem, Expr, Op, Solution, Unknown};
    pub use certus_gen::{
        generate, generate_seeded, BasicMathConfig, EquationPattern, GenerateError,
        GenerationConfig, GradeSchoolConfig, Mode, SimpleQuizConfig,
    };
    pub use certus_linalg::{Matrix, SolveOutcome};
    pub use certus_rational::{Integer, Rational};
}
