//! Linear-system validation.
//!
//! Candidates are rewritten to `A·u = b` and checked for exactly one
//! solution matching the pre-assigned one, plus the policy checks
//! (coverage, integrality, range). The rank check is the mechanism that
//! rejects under-determined shapes like `{2x = y; 4x = 2y}`.

use certus_expr::{Equation, Solution, Unknown};
use certus_linalg::{Matrix, SolveOutcome};
use certus_rational::Rational;
use num_traits::Zero;

/// A built-but-unvalidated system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Candidate {
    pub equations: Vec<Equation>,
    pub unknowns: Vec<Unknown>,
    pub solution: Solution,
}

/// Why a candidate was rejected.
///
/// Everything except `Defect` is an ordinary degenerate-candidate
/// rejection, recovered by resampling. `Defect` means a builder broke its
/// own construction guarantee and must surface as an internal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Rejection {
    /// An unknown in the list appears in no equation (a free variable).
    UnusedUnknown(Unknown),
    /// The coefficient matrix has rank below the unknown count.
    RankDeficient { rank: usize, unknowns: usize },
    /// Consistent but infinitely many solutions.
    Underdetermined,
    /// No solution at all.
    Inconsistent,
    /// Integer mode produced a non-integer solution value.
    NonIntegerSolution(Unknown),
    /// Integer mode produced a non-integer displayed constant.
    NonIntegerConstant(Rational),
    /// A displayed constant or solution value exceeds the value bound.
    OutOfRange(Rational),
    /// A pattern equation with nothing left to derive does not hold.
    PatternUnsatisfied,
    /// Builder bug: nonlinear expression or solved/preassigned mismatch.
    Defect(String),
}

/// Validates a candidate against the mode's policy.
pub(crate) fn validate(
    candidate: &Candidate,
    max_value: i64,
    allow_decimals: bool,
) -> Result<(), Rejection> {
    let n = candidate.unknowns.len();
    let bound = Rational::from(max_value);

    // Rewrite each equation as Σ coefficient·unknown = constant.
    let mut coeff_rows: Vec<Vec<Rational>> = Vec::with_capacity(candidate.equations.len());
    let mut rhs: Vec<Rational> = Vec::with_capacity(candidate.equations.len());
    for eq in &candidate.equations {
        let row = eq
            .normalized()
            .map_err(|e| Rejection::Defect(format!("nonlinear equation `{eq}`: {e}")))?;
        let mut coeffs = vec![Rational::zero(); n];
        for (unknown, coeff) in row.terms() {
            let Some(col) = candidate.unknowns.iter().position(|u| u == unknown) else {
                return Err(Rejection::Defect(format!(
                    "equation `{eq}` references unlisted unknown {unknown}"
                )));
            };
            coeffs[col] = coeff.clone();
        }
        coeff_rows.push(coeffs);
        rhs.push(-row.constant_term());
    }

    // Every unknown must appear in at least one equation, or it is a free
    // variable and the system cannot be uniquely solvable.
    for (col, unknown) in candidate.unknowns.iter().enumerate() {
        if coeff_rows.iter().all(|row| row[col].is_zero()) {
            return Err(Rejection::UnusedUnknown(unknown.clone()));
        }
    }

    let a = Matrix::from_rows(coeff_rows);
    let rank = a.rank();
    if rank < n {
        return Err(Rejection::RankDeficient { rank, unknowns: n });
    }

    // Independent solve; must agree exactly with the pre-assigned solution.
    let solved = match a.solve(&rhs) {
        SolveOutcome::Unique(x) => x,
        SolveOutcome::Underdetermined => return Err(Rejection::Underdetermined),
        SolveOutcome::Inconsistent => return Err(Rejection::Inconsistent),
    };
    for (col, unknown) in candidate.unknowns.iter().enumerate() {
        let expected = candidate
            .solution
            .get(unknown)
            .ok_or_else(|| Rejection::Defect(format!("no pre-assigned value for {unknown}")))?;
        if &solved[col] != expected {
            return Err(Rejection::Defect(format!(
                "solved {unknown} = {}, pre-assigned {expected}",
                solved[col]
            )));
        }
    }

    // Policy checks on what the user actually sees.
    for (unknown, value) in candidate.solution.entries() {
        if !allow_decimals && !value.is_integer() {
            return Err(Rejection::NonIntegerSolution(unknown.clone()));
        }
        if value.abs() > bound {
            return Err(Rejection::OutOfRange(value.clone()));
        }
    }
    let mut constants = Vec::new();
    for eq in &candidate.equations {
        eq.left.collect_numbers(&mut constants);
        eq.right.collect_numbers(&mut constants);
    }
    for c in &constants {
        if !allow_decimals && !c.is_integer() {
            return Err(Rejection::NonIntegerConstant(c.clone()));
        }
        if c.abs() > bound {
            return Err(Rejection::OutOfRange(c.clone()));
        }
    }

    Ok(())
}
