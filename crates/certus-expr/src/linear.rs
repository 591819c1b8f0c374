//! Canonical linear forms.
//!
//! A `LinearForm` is the flattened view of an expression:
//! `Σ coefficient·unknown + constant`, with terms in first-occurrence
//! order so downstream matrix assembly and rendering stay deterministic.

use certus_rational::Rational;
use num_traits::Zero;
use smallvec::SmallVec;
use thiserror::Error;

use crate::unknown::Unknown;

/// Raised when an expression leaves the linear fragment.
///
/// Builders construct only linear shapes, so hitting one of these during
/// validation is a defect signal rather than a retry case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NonLinearError {
    /// Two unknowns were multiplied together.
    #[error("product of two unknowns")]
    ProductOfUnknowns,
    /// An unknown appeared in a divisor.
    #[error("unknown in divisor")]
    UnknownInDivisor,
    /// A constant divisor evaluated to zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// `Σ coefficient·unknown + constant` with deterministic term order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearForm {
    terms: SmallVec<[(Unknown, Rational); 4]>,
    constant: Rational,
}

impl LinearForm {
    /// The zero form.
    #[must_use]
    pub fn zero() -> Self {
        Self::constant(Rational::zero())
    }

    /// A pure constant.
    #[must_use]
    pub fn constant(value: Rational) -> Self {
        Self {
            terms: SmallVec::new(),
            constant: value,
        }
    }

    /// A single unknown with coefficient one.
    #[must_use]
    pub fn unknown(unknown: Unknown) -> Self {
        let mut terms = SmallVec::new();
        terms.push((unknown, Rational::from(1)));
        Self {
            terms,
            constant: Rational::zero(),
        }
    }

    /// Returns the coefficient of `unknown` (zero if absent).
    #[must_use]
    pub fn coefficient(&self, unknown: &Unknown) -> Rational {
        self.terms
            .iter()
            .find(|(u, _)| u == unknown)
            .map_or_else(Rational::zero, |(_, c)| c.clone())
    }

    /// Returns the constant term.
    #[must_use]
    pub fn constant_term(&self) -> &Rational {
        &self.constant
    }

    /// Returns the unknown terms in first-occurrence order.
    ///
    /// Zero coefficients are dropped during merging, so every entry is a
    /// live term.
    #[must_use]
    pub fn terms(&self) -> &[(Unknown, Rational)] {
        &self.terms
    }

    /// Returns true if the form has no unknown terms.
    #[must_use]
    pub fn is_constant_only(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the constant value if the form has no unknown terms.
    #[must_use]
    pub fn as_constant(&self) -> Option<&Rational> {
        if self.terms.is_empty() {
            Some(&self.constant)
        } else {
            None
        }
    }

    /// Adds two forms, merging coefficients.
    #[must_use]
    pub fn add(&self, other: &LinearForm) -> Self {
        let mut result = self.clone();
        for (unknown, coeff) in &other.terms {
            result.accumulate(unknown, coeff.clone());
        }
        result.constant = result.constant + &other.constant;
        result
    }

    /// Subtracts `other` from this form.
    #[must_use]
    pub fn sub(&self, other: &LinearForm) -> Self {
        self.add(&other.negated())
    }

    /// Returns the negation of this form.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .map(|(u, c)| (u.clone(), -c))
                .collect(),
            constant: -&self.constant,
        }
    }

    /// Scales every coefficient and the constant by `scalar`.
    #[must_use]
    pub fn scale(&self, scalar: &Rational) -> Self {
        if scalar.is_zero() {
            return Self::zero();
        }
        Self {
            terms: self
                .terms
                .iter()
                .map(|(u, c)| (u.clone(), c * scalar))
                .collect(),
            constant: &self.constant * scalar,
        }
    }

    /// Evaluates the form under a value lookup for unknowns.
    ///
    /// # Panics
    ///
    /// Panics if `lookup` has no value for a referenced unknown; callers
    /// always evaluate against a complete solution.
    #[must_use]
    pub fn eval<F>(&self, lookup: F) -> Rational
    where
        F: Fn(&Unknown) -> Option<Rational>,
    {
        let mut total = self.constant.clone();
        for (unknown, coeff) in &self.terms {
            let value = lookup(unknown)
                .unwrap_or_else(|| panic!("no value for unknown {unknown}"));
            total = total + coeff * &value;
        }
        total
    }

    fn accumulate(&mut self, unknown: &Unknown, coeff: Rational) {
        if let Some(pos) = self.terms.iter().position(|(u, _)| u == unknown) {
            let merged = &self.terms[pos].1 + &coeff;
            if merged.is_zero() {
                self.terms.remove(pos);
            } else {
                self.terms[pos].1 = merged;
            }
        } else if !coeff.is_zero() {
            self.terms.push((unknown.clone(), coeff));
        }
    }
}
