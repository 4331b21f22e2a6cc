// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Dense row-major matrix and its pseudo-random generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{MatwriteError, MatwriteResult};

/// A 2-D matrix of `f64` stored row-major in a single allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Build a matrix from row-major data.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> MatwriteResult<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(MatwriteError::ShapeMismatch {
                expected: rows.saturating_mul(cols),
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix from nested rows. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> MatwriteResult<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        let mut data = Vec::with_capacity(rows.len() * cols);

        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MatwriteError::RaggedRows {
                    row: index,
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of values.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow a single row.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.rows()`.
    pub fn row(&self, index: usize) -> &[f64] {
        let start = index * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterate rows in order.
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        // chunks_exact(0) panics, and a zero-column matrix still has `rows` rows
        (0..self.rows).map(move |i| self.row(i))
    }

    /// The flattened ("raveled") view of every value in row-major order.
    pub fn as_flat(&self) -> &[f64] {
        &self.data
    }
}

/// Produces matrices filled with independent uniform values in `[0, 1)`.
pub struct MatrixGenerator {
    rng: StdRng,
}

impl MatrixGenerator {
    /// Create a generator seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a deterministic generator.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from `seed` when present, otherwise from the OS.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self::new(),
        }
    }

    /// Allocate a fresh `rows x cols` matrix.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`. [`ConfigLoader`] rejects
    /// such shapes before they reach the generator.
    ///
    /// [`ConfigLoader`]: crate::config::ConfigLoader
    pub fn generate(&mut self, rows: usize, cols: usize) -> Matrix {
        let data = (0..rows * cols).map(|_| self.rng.random::<f64>()).collect();
        Matrix { rows, cols, data }
    }
}

impl Default for MatrixGenerator {
    fn default() -> Self {
        Self::new()
    }
}
