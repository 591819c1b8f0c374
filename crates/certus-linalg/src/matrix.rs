//! Dense matrices over exact rationals.

use std::ops::{Index, IndexMut};

use certus_rational::Rational;
use num_traits::Zero;

/// Outcome of solving `A·x = b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// Exactly one solution vector.
    Unique(Vec<Rational>),
    /// Infinitely many solutions (rank deficiency with consistent rows).
    Underdetermined,
    /// No solution (an inconsistent row `0 = c`, `c != 0`).
    Inconsistent,
}

/// Dense matrix stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    /// Matrix entries in row-major order.
    data: Vec<Rational>,
    /// Number of rows.
    num_rows: usize,
    /// Number of columns.
    num_cols: usize,
}

impl Matrix {
    /// Creates a new matrix filled with zeros.
    #[must_use]
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            data: vec![Rational::zero(); num_rows * num_cols],
            num_rows,
            num_cols,
        }
    }

    /// Creates a matrix from rows.
    ///
    /// # Panics
    ///
    /// Panics if the rows are ragged.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Rational>>) -> Self {
        if rows.is_empty() {
            return Self::zeros(0, 0);
        }
        let num_rows = rows.len();
        let num_cols = rows[0].len();
        let data: Vec<Rational> = rows.into_iter().flatten().collect();
        assert_eq!(data.len(), num_rows * num_cols, "ragged rows");
        Self {
            data,
            num_rows,
            num_cols,
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Returns a slice of the specified row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Rational] {
        let start = row * self.num_cols;
        &self.data[start..start + self.num_cols]
    }

    /// Matrix-vector multiply: y = A * x.
    ///
    /// # Panics
    ///
    /// Panics if `x` does not match the column count.
    #[must_use]
    pub fn mv(&self, x: &[Rational]) -> Vec<Rational> {
        assert_eq!(x.len(), self.num_cols);
        (0..self.num_rows)
            .map(|row| {
                self.row(row)
                    .iter()
                    .zip(x.iter())
                    .fold(Rational::zero(), |acc, (a, b)| acc + a * b)
            })
            .collect()
    }

    /// Swaps two rows in-place.
    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let i_start = i * self.num_cols;
        let j_start = j * self.num_cols;
        for k in 0..self.num_cols {
            self.data.swap(i_start + k, j_start + k);
        }
    }

    /// Adds a scaled row to another: row[target] += scale * row[source].
    pub fn add_scaled_row(&mut self, target: usize, source: usize, scale: &Rational) {
        for k in 0..self.num_cols {
            let val = &self[(source, k)] * scale;
            self[(target, k)] = &self[(target, k)] + &val;
        }
    }

    /// Scales a row by a scalar.
    pub fn scale_row(&mut self, row: usize, scale: &Rational) {
        for k in 0..self.num_cols {
            self[(row, k)] = &self[(row, k)] * scale;
        }
    }

    /// Reduced row echelon form via Gauss-Jordan elimination with partial
    /// pivoting (largest absolute pivot, for uniform elimination order).
    ///
    /// Returns the RREF together with the rank.
    #[must_use]
    pub fn rref(&self) -> (Self, usize) {
        let mut m = self.clone();
        let mut pivot_row = 0;
        let mut pivot_col = 0;

        while pivot_row < m.num_rows && pivot_col < m.num_cols {
            // Partial pivot: pick the largest entry in the column.
            let mut best_row = pivot_row;
            for row in pivot_row..m.num_rows {
                if m[(row, pivot_col)].abs() > m[(best_row, pivot_col)].abs() {
                    best_row = row;
                }
            }

            if m[(best_row, pivot_col)].is_zero() {
                pivot_col += 1;
                continue;
            }

            m.swap_rows(pivot_row, best_row);

            let inv = m[(pivot_row, pivot_col)].recip();
            m.scale_row(pivot_row, &inv);

            for row in 0..m.num_rows {
                if row != pivot_row && !m[(row, pivot_col)].is_zero() {
                    let factor = -&m[(row, pivot_col)];
                    m.add_scaled_row(row, pivot_row, &factor);
                }
            }

            pivot_row += 1;
            pivot_col += 1;
        }

        let rank = pivot_row;
        (m, rank)
    }

    /// Computes the rank.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.rref().1
    }

    /// Solves the linear system `A·x = b`, distinguishing a unique
    /// solution from under-determined and inconsistent systems.
    ///
    /// # Panics
    ///
    /// Panics if `b` does not match the row count.
    #[must_use]
    pub fn solve(&self, b: &[Rational]) -> SolveOutcome {
        assert_eq!(b.len(), self.num_rows);

        // Augmented matrix [A | b]
        let mut aug = Self::zeros(self.num_rows, self.num_cols + 1);
        for i in 0..self.num_rows {
            for j in 0..self.num_cols {
                aug[(i, j)] = self[(i, j)].clone();
            }
            aug[(i, self.num_cols)] = b[i].clone();
        }

        let (rref, aug_rank) = aug.rref();

        // A row [0 ... 0 | c] with c != 0 means no solution. Such a row
        // has its pivot in the augmented column.
        for row in 0..aug_rank {
            let pivot_col = (0..=self.num_cols)
                .find(|&col| !rref[(row, col)].is_zero())
                .unwrap_or(self.num_cols);
            if pivot_col == self.num_cols {
                return SolveOutcome::Inconsistent;
            }
        }

        // Consistent: rank of A equals rank of [A | b].
        if aug_rank < self.num_cols {
            return SolveOutcome::Underdetermined;
        }

        let mut x = vec![Rational::zero(); self.num_cols];
        for row in 0..aug_rank {
            let pivot_col = (0..self.num_cols)
                .find(|&col| !rref[(row, col)].is_zero())
                .expect("consistent full-rank row has a pivot");
            x[pivot_col] = rref[(row, self.num_cols)].clone();
        }

        SolveOutcome::Unique(x)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Rational;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.data[row * self.num_cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.data[row * self.num_cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64) -> Rational {
        Rational::from(n)
    }

    #[test]
    fn test_rank_full() {
        let m = Matrix::from_rows(vec![vec![q(1), q(2)], vec![q(3), q(4)]]);
        assert_eq!(m.rank(), 2);
    }

    #[test]
    fn test_rank_deficient_scalar_multiple() {
        // {2x = y; 4x = 2y} => rows [2, -1] and [4, -2], rank 1
        let m = Matrix::from_rows(vec![vec![q(2), q(-1)], vec![q(4), q(-2)]]);
        assert_eq!(m.rank(), 1);
    }

    #[test]
    fn test_solve_unique() {
        // x + 2y = 5, 3x + 4y = 11 => x = 1, y = 2
        let m = Matrix::from_rows(vec![vec![q(1), q(2)], vec![q(3), q(4)]]);
        let outcome = m.solve(&[q(5), q(11)]);
        assert_eq!(outcome, SolveOutcome::Unique(vec![q(1), q(2)]));
    }

    #[test]
    fn test_solve_underdetermined() {
        // {2x - y = 3; 4x - 2y = 6}: consistent but rank 1
        let m = Matrix::from_rows(vec![vec![q(2), q(-1)], vec![q(4), q(-2)]]);
        assert_eq!(m.solve(&[q(3), q(6)]), SolveOutcome::Underdetermined);
    }

    #[test]
    fn test_solve_inconsistent() {
        // {2x - y = 3; 4x - 2y = 7}: parallel rows, no solution
        let m = Matrix::from_rows(vec![vec![q(2), q(-1)], vec![q(4), q(-2)]]);
        assert_eq!(m.solve(&[q(3), q(7)]), SolveOutcome::Inconsistent);
    }

    #[test]
    fn test_solve_rational_result() {
        // 2x = 5 => x = 5/2
        let m = Matrix::from_rows(vec![vec![q(2)]]);
        assert_eq!(
            m.solve(&[q(5)]),
            SolveOutcome::Unique(vec![Rational::from_i64(5, 2)])
        );
    }

    #[test]
    fn test_mv_roundtrip() {
        let m = Matrix::from_rows(vec![vec![q(1), q(2), q(3)], vec![q(4), q(5), q(6)]]);
        let y = m.mv(&[q(1), q(2), q(3)]);
        assert_eq!(y, vec![q(14), q(32)]);
    }

    #[test]
    fn test_solve_three_unknowns() {
        // x + y + z = 6; 2y + 5z = -4; 2x + 5y - z = 27 => (5, 3, -2)
        let m = Matrix::from_rows(vec![
            vec![q(1), q(1), q(1)],
            vec![q(0), q(2), q(5)],
            vec![q(2), q(5), q(-1)],
        ]);
        let outcome = m.solve(&[q(6), q(-4), q(27)]);
        assert_eq!(outcome, SolveOutcome::Unique(vec![q(5), q(3), q(-2)]));
    }
}
