//! # certus-gen
//!
//! Equation-system generation for Certus.
//!
//! This crate provides:
//! - Three generation modes: basic math, simple quiz, grade school
//! - A pattern override for curriculum-authored equation shapes
//! - Solution-first construction: target values are fixed before any
//!   equation exists, so every system holds by construction
//! - An independent validation pass that re-solves each candidate and
//!   rejects anything without exactly one solution
//!
//! Generation is deterministic under a seeded rng; see
//! [`generate_seeded`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod generate;

mod basic_math;
mod grade_school;
mod pattern;
mod proptests;
mod sampler;
mod simple_quiz;
mod solution;
mod validate;

pub use config::{
    BasicMathConfig, EquationPattern, GenerationConfig, GradeSchoolConfig, Mode,
    SimpleQuizConfig, DECIMAL_PRECISION, MAX_UNKNOWNS, MAX_VALUE_LIMIT,
};
pub use error::{ConfigError, GenerateError};
pub use generate::{generate, generate_seeded, MAX_ATTEMPTS};
