//! # certus-linalg
//!
//! Exact rational linear algebra for the certus equation generator.
//!
//! The systems involved are tiny (at most a handful of unknowns), so a
//! dense matrix with Gauss-Jordan elimination over exact rationals is all
//! the validator needs: rank tells under-determined systems apart, and the
//! solver distinguishes a unique solution from none at all with no
//! floating-point tolerance anywhere.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod matrix;

pub use matrix::{Matrix, SolveOutcome};
