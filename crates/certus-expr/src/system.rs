//! Solutions and complete equation systems.
//!
//! These are the output shape of the generator: ordered display equations,
//! ordered unknown names, and a solution carrying both exact values and
//! display strings, matching the legacy consumer contract.

use certus_rational::Rational;

use crate::equation::Equation;
use crate::unknown::Unknown;

/// A mapping from unknowns to their target values.
///
/// Created before equations are built ("solution-first") and never
/// altered afterwards. Entries keep the unknown ordering of the
/// generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    entries: Vec<(Unknown, Rational)>,
}

impl Solution {
    /// Creates a solution from ordered entries.
    #[must_use]
    pub fn new(entries: Vec<(Unknown, Rational)>) -> Self {
        Self { entries }
    }

    /// Returns the value assigned to `unknown`.
    #[must_use]
    pub fn get(&self, unknown: &Unknown) -> Option<&Rational> {
        self.entries
            .iter()
            .find(|(u, _)| u == unknown)
            .map(|(_, v)| v)
    }

    /// Returns the ordered entries.
    #[must_use]
    pub fn entries(&self) -> &[(Unknown, Rational)] {
        &self.entries
    }

    /// Returns the ordered unknowns.
    #[must_use]
    pub fn unknowns(&self) -> Vec<Unknown> {
        self.entries.iter().map(|(u, _)| u.clone()).collect()
    }

    /// Returns the human-readable mapping, e.g. `[("x", "3"), ("y", "2.5")]`.
    ///
    /// Values with a finite decimal expansion render as decimals; anything
    /// else falls back to `num/den` form (builders never produce such
    /// values, but the rendering is total).
    #[must_use]
    pub fn display_map(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(u, v)| {
                let rendered = v.to_decimal_string().unwrap_or_else(|| v.to_string());
                (u.name().to_owned(), rendered)
            })
            .collect()
    }
}

/// A validated system of equations together with its unique solution.
///
/// Invariant (enforced by the validator before construction): the unknown
/// list exactly covers the unknowns referenced by the equations: no free
/// variables, no unused entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquationSystem {
    equations: Vec<Equation>,
    unknowns: Vec<Unknown>,
    solution: Solution,
}

impl EquationSystem {
    /// Assembles a system from its parts.
    #[must_use]
    pub fn new(equations: Vec<Equation>, unknowns: Vec<Unknown>, solution: Solution) -> Self {
        Self {
            equations,
            unknowns,
            solution,
        }
    }

    /// Returns the ordered equations.
    #[must_use]
    pub fn equations(&self) -> &[Equation] {
        &self.equations
    }

    /// Returns the ordered unknowns.
    #[must_use]
    pub fn unknowns(&self) -> &[Unknown] {
        &self.unknowns
    }

    /// Returns the solution.
    #[must_use]
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Renders each equation as a display string, in order.
    #[must_use]
    pub fn display_equations(&self) -> Vec<String> {
        self.equations.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;

    #[test]
    fn test_display_map() {
        let x = Unknown::new("x");
        let y = Unknown::new("y");
        let solution = Solution::new(vec![
            (x, Rational::from(3)),
            (y, Rational::from_scaled(25, 1)),
        ]);
        assert_eq!(
            solution.display_map(),
            vec![
                ("x".to_owned(), "3".to_owned()),
                ("y".to_owned(), "2.5".to_owned())
            ]
        );
    }

    #[test]
    fn test_display_equations_deterministic() {
        let x = Unknown::new("x");
        let eq = Equation::new(Expr::symbol(&x), Expr::number(7).plus(Expr::number(5)));
        let system = EquationSystem::new(
            vec![eq],
            vec![x.clone()],
            Solution::new(vec![(x, Rational::from(12))]),
        );
        assert_eq!(system.display_equations(), vec!["x = 7 + 5".to_owned()]);
        assert_eq!(system.display_equations(), system.display_equations());
    }
}
