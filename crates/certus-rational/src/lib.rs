//! # certus-rational
//!
//! Exact integer and rational arithmetic for the certus equation generator.
//!
//! This crate wraps `dashu` to provide:
//! - Exact integers (`Integer`)
//! - Exact rationals (`Rational`), including fixed-precision decimal
//!   construction and rendering
//!
//! Every numeric value flowing through equation generation and validation
//! is exact; there is no floating point anywhere in the pipeline, so
//! solution checks are equality checks rather than tolerance checks.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;
pub mod rational;

pub use integer::Integer;
pub use rational::Rational;
