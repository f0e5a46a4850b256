//! Sparse matrix type for high-dimensional feature data.
//!
//! TF-IDF over a six-figure vocabulary leaves almost every entry zero, so
//! the feature matrices use compressed sparse row (CSR) storage: a row
//! pointer array plus parallel column-index and value arrays.

use serde::{Deserialize, Serialize};

/// A sparse 2D matrix of `f32` values in CSR layout.
///
/// Rows are stored as contiguous (column index, value) runs delimited by
/// `indptr`. Column indices within a row are strictly increasing.
///
/// # Examples
///
/// ```
/// use sentir::primitives::CsrMatrix;
///
/// let m = CsrMatrix::from_row_entries(3, vec![
///     vec![(0, 1.0), (2, 2.0)],
///     vec![(1, 3.0)],
/// ]).expect("entries are in bounds and ordered");
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.nnz(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrMatrix {
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f32>,
    cols: usize,
}

impl CsrMatrix {
    /// Creates a matrix from per-row (column, value) entries.
    ///
    /// Each row's entries must have strictly increasing column indices,
    /// all below `cols`. Zero-valued entries are kept as given.
    ///
    /// # Errors
    ///
    /// Returns an error if a column index is out of bounds or out of order.
    pub fn from_row_entries(
        cols: usize,
        rows: Vec<Vec<(usize, f32)>>,
    ) -> Result<Self, &'static str> {
        let nnz: usize = rows.iter().map(Vec::len).sum();
        let mut indptr = Vec::with_capacity(rows.len() + 1);
        let mut indices = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);

        indptr.push(0);
        for row in rows {
            let mut prev: Option<usize> = None;
            for (col, value) in row {
                if col >= cols {
                    return Err("Column index out of bounds");
                }
                if prev.is_some_and(|p| p >= col) {
                    return Err("Column indices must be strictly increasing within a row");
                }
                prev = Some(col);
                indices.push(col);
                values.push(value);
            }
            indptr.push(indices.len());
        }

        Ok(Self {
            indptr,
            indices,
            values,
            cols,
        })
    }

    /// Creates an empty matrix with the given shape (no stored entries).
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            indptr: vec![0; rows + 1],
            indices: Vec::new(),
            values: Vec::new(),
            cols,
        }
    }

    /// Returns the shape as (rows, cols).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.cols)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.indptr.len() - 1
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns a row's stored entries as parallel (columns, values) slices.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[must_use]
    pub fn row(&self, row: usize) -> (&[usize], &[f32]) {
        let start = self.indptr[row];
        let end = self.indptr[row + 1];
        (&self.indices[start..end], &self.values[start..end])
    }

    /// Gets the element at (row, col), zero if not stored.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        let (cols, vals) = self.row(row);
        match cols.binary_search(&col) {
            Ok(pos) => vals[pos],
            Err(_) => 0.0,
        }
    }

    /// Sums stored values down each column.
    #[must_use]
    pub fn column_sums(&self) -> Vec<f32> {
        let mut sums = vec![0.0; self.cols];
        for (&col, &value) in self.indices.iter().zip(self.values.iter()) {
            sums[col] += value;
        }
        sums
    }

    /// Dot product of a row with a dense weight slice.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds or `weights` is shorter than the
    /// column count.
    #[must_use]
    pub fn row_dot(&self, row: usize, weights: &[f32]) -> f32 {
        assert!(weights.len() >= self.cols, "weight slice too short");
        let (cols, vals) = self.row(row);
        cols.iter()
            .zip(vals.iter())
            .map(|(&c, &v)| v * weights[c])
            .sum()
    }

    /// Scales each row to unit L2 norm. Rows with no stored entries (or an
    /// all-zero norm) are left untouched.
    pub fn l2_normalize_rows(&mut self) {
        for row in 0..self.n_rows() {
            let start = self.indptr[row];
            let end = self.indptr[row + 1];
            let norm = self.values[start..end]
                .iter()
                .map(|v| v * v)
                .sum::<f32>()
                .sqrt();
            if norm > 0.0 {
                for value in &mut self.values[start..end] {
                    *value /= norm;
                }
            }
        }
    }

    /// Projects the matrix onto a subset of columns.
    ///
    /// `keep` must hold strictly increasing, in-bounds column indices. Kept
    /// columns are renumbered 0..keep.len() in order, so the projection
    /// preserves relative column order.
    ///
    /// # Errors
    ///
    /// Returns an error if `keep` is unsorted, has duplicates, or references
    /// a column outside the matrix.
    pub fn select_columns(&self, keep: &[usize]) -> Result<Self, &'static str> {
        if keep.windows(2).any(|w| w[0] >= w[1]) {
            return Err("Kept columns must be strictly increasing");
        }
        if keep.last().is_some_and(|&last| last >= self.cols) {
            return Err("Kept column out of bounds");
        }

        let mut remap = vec![usize::MAX; self.cols];
        for (new, &old) in keep.iter().enumerate() {
            remap[old] = new;
        }

        let mut indptr = Vec::with_capacity(self.indptr.len());
        let mut indices = Vec::new();
        let mut values = Vec::new();

        indptr.push(0);
        for row in 0..self.n_rows() {
            let (cols, vals) = self.row(row);
            for (&col, &value) in cols.iter().zip(vals.iter()) {
                let new_col = remap[col];
                if new_col != usize::MAX {
                    indices.push(new_col);
                    values.push(value);
                }
            }
            indptr.push(indices.len());
        }

        Ok(Self {
            indptr,
            indices,
            values,
            cols: keep.len(),
        })
    }
}

#[cfg(test)]
#[path = "sparse_tests.rs"]
mod tests;
