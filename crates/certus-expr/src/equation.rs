//! Equations: ordered pairs of expressions.

use std::fmt;

use crate::expr::{Expr, Op};
use crate::linear::{LinearForm, NonLinearError};
use crate::unknown::Unknown;

/// An equation `left = right`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    /// The left-hand side.
    pub left: Expr,
    /// The right-hand side.
    pub right: Expr,
}

impl Equation {
    /// Creates an equation from its two sides.
    #[must_use]
    pub fn new(left: Expr, right: Expr) -> Self {
        Self { left, right }
    }

    /// Flattens both sides into linear forms.
    ///
    /// # Errors
    ///
    /// Propagates [`NonLinearError`] from either side.
    pub fn linear_parts(&self) -> Result<(LinearForm, LinearForm), NonLinearError> {
        Ok((self.left.linear_form()?, self.right.linear_form()?))
    }

    /// Rewrites the equation as `Σ coefficient·unknown = constant`,
    /// i.e. the normalized row `left - right` with the constant moved to
    /// the right-hand side.
    ///
    /// # Errors
    ///
    /// Propagates [`NonLinearError`] from either side.
    pub fn normalized(&self) -> Result<LinearForm, NonLinearError> {
        let (left, right) = self.linear_parts()?;
        Ok(left.sub(&right))
    }

    /// Collects the unknowns referenced by either side, in first
    /// occurrence order (left side first).
    #[must_use]
    pub fn unknowns(&self) -> Vec<Unknown> {
        let mut out = Vec::new();
        self.left.collect_unknowns(&mut out);
        self.right.collect_unknowns(&mut out);
        out
    }

    /// Collects the operators rendered by either side.
    #[must_use]
    pub fn operators(&self) -> Vec<Op> {
        let mut out = Vec::new();
        self.left.collect_operators(&mut out);
        self.right.collect_operators(&mut out);
        out
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certus_rational::Rational;
    use num_traits::Zero;

    #[test]
    fn test_display() {
        let x = Unknown::new("x");
        let eq = Equation::new(
            Expr::symbol(&x),
            Expr::number(7).plus(Expr::number(5)),
        );
        assert_eq!(eq.to_string(), "x = 7 + 5");
    }

    #[test]
    fn test_normalized_moves_constant() {
        // x + 3 = 10  =>  x = 7, normalized row: x with constant -7
        let x = Unknown::new("x");
        let eq = Equation::new(
            Expr::symbol(&x).plus(Expr::number(3)),
            Expr::number(10),
        );
        let row = eq.normalized().unwrap();
        assert_eq!(row.coefficient(&x), Rational::from(1));
        assert_eq!(row.constant_term(), &Rational::from(-7));
    }

    #[test]
    fn test_unknowns_ordered() {
        let x = Unknown::new("x");
        let y = Unknown::new("y");
        let eq = Equation::new(
            Expr::symbol(&y).plus(Expr::symbol(&x)),
            Expr::symbol(&y),
        );
        assert_eq!(eq.unknowns(), vec![y, x]);
    }

    #[test]
    fn test_operators_covers_both_sides() {
        // x - 2 = (3 + 4) * 5 renders Sub on the left, Mul and Add on
        // the right.
        let x = Unknown::new("x");
        let eq = Equation::new(
            Expr::symbol(&x).minus(Expr::number(2)),
            Expr::number(3).plus(Expr::number(4)).times(Expr::number(5)),
        );
        assert_eq!(eq.operators(), vec![Op::Sub, Op::Mul, Op::Add]);
    }

    #[test]
    fn test_degenerate_row_cancels() {
        // x = x normalizes to the zero row
        let x = Unknown::new("x");
        let eq = Equation::new(Expr::symbol(&x), Expr::symbol(&x));
        let row = eq.normalized().unwrap();
        assert!(row.is_constant_only());
        assert!(row.constant_term().is_zero());
    }
}
