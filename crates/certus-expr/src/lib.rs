//! # certus-expr
//!
//! The symbolic layer of the certus equation generator.
//!
//! This crate provides:
//! - `Unknown`: named symbolic variables
//! - `Expr`: a display-faithful expression tree, linear by construction
//! - `LinearForm`: the canonical coefficient-map view of an expression
//! - `Equation`, `EquationSystem`, `Solution`: the generator's output shape
//!
//! Expressions preserve how they were written (`x + x + x` stays three
//! terms), so rendering is deterministic and matches what a builder
//! constructed, while `LinearForm` gives validators the flattened
//! `Σ coefficient·unknown + constant` view.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod equation;
pub mod expr;
pub mod linear;
pub mod system;
pub mod unknown;

pub use equation::Equation;
pub use expr::{Expr, Op};
pub use linear::{LinearForm, NonLinearError};
pub use system::{EquationSystem, Solution};
pub use unknown::Unknown;
