//! Dense row-major matrix of probabilities.

use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}
impl Matrix {
    /// The outer product `rows ⊗ cols`: cell `(i, j)` holds `rows[i] * cols[j]`.
    pub fn outer(rows: &[f64], cols: &[f64]) -> Self {
        let data = rows
            .iter()
            .flat_map(|&row_value| cols.iter().map(move |&col_value| row_value * col_value))
            .collect();
        Self {
            data,
            rows: rows.len(),
            cols: cols.len(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// All cells in row-major order.
    pub fn flatten(&self) -> &[f64] {
        &self.data
    }

    pub fn flatten_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn row_sums(&self) -> Vec<f64> {
        if self.cols == 0 {
            return vec![0.0; self.rows];
        }
        self.data
            .chunks_exact(self.cols)
            .map(|row| row.iter().sum())
            .collect()
    }

    pub fn col_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.cols];
        if self.cols == 0 {
            return sums;
        }
        for row in self.data.chunks_exact(self.cols) {
            for (sum, value) in sums.iter_mut().zip(row) {
                *sum += value;
            }
        }
        sums
    }

    #[inline]
    fn offset(&self, (row, col): (usize, usize)) -> usize {
        debug_assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) lies outside a {}x{} matrix",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.data[self.offset(index)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        let offset = self.offset(index);
        &mut self.data[offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outer_product() {
        let matrix = Matrix::outer(&[1.0, 2.0], &[10.0, 20.0, 30.0]);
        assert_eq!(2, matrix.rows());
        assert_eq!(3, matrix.cols());
        assert_eq!(&[10.0, 20.0, 30.0, 20.0, 40.0, 60.0], matrix.flatten());
        assert_eq!(40.0, matrix[(1, 1)]);
        assert_eq!(30.0, matrix[(0, 2)]);
    }

    #[test]
    fn sums() {
        let matrix = Matrix::outer(&[0.5, 0.25], &[0.5, 0.5]);
        assert_eq!(vec![0.5, 0.25], matrix.row_sums());
        assert_eq!(vec![0.375, 0.375], matrix.col_sums());
    }

    #[test]
    fn mutate() {
        let mut matrix = Matrix::outer(&[1.0, 1.0], &[1.0, 1.0]);
        matrix[(1, 0)] = 5.0;
        matrix.flatten_mut()[3] = 7.0;
        assert_eq!(&[1.0, 1.0, 5.0, 7.0], matrix.flatten());
        assert_eq!(vec![2.0, 12.0], matrix.row_sums());
    }

    #[test]
    #[should_panic = "cell (2, 0) lies outside a 2x3 matrix"]
    fn row_out_of_bounds() {
        let matrix = Matrix::outer(&[1.0, 1.0], &[1.0, 1.0, 1.0]);
        let _ = matrix[(2, 0)];
    }

    #[test]
    #[should_panic = "cell (0, 3) lies outside a 2x3 matrix"]
    fn col_out_of_bounds() {
        let matrix = Matrix::outer(&[1.0, 1.0], &[1.0, 1.0, 1.0]);
        let _ = matrix[(0, 3)];
    }
}
