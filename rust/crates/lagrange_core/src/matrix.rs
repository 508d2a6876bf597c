//! Dense matrix storage
//!
//! Row-major dense matrix. Lattice bases are stored with their basis
//! vectors as *columns*, so the column operations here are the ones the
//! reduction uses.

use num_bigint::BigInt;
use num_traits::{One, Zero};
use std::fmt;

use crate::error::{ReductionError, Result};

/// Dense matrix in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Clone> Matrix<T> {
    /// Create a matrix from a flat vector (row-major order)
    pub fn from_flat(data: Vec<T>, rows: usize, cols: usize) -> Self {
        assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols }
    }

    /// Get matrix dimensions
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Get number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Access element at (i, j)
    pub fn get(&self, i: usize, j: usize) -> &T {
        &self.data[i * self.cols + j]
    }

    /// Mutable access to element at (i, j)
    pub fn get_mut(&mut self, i: usize, j: usize) -> &mut T {
        &mut self.data[i * self.cols + j]
    }

    /// Get underlying data as slice
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get a row as a slice
    pub fn row(&self, i: usize) -> &[T] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Clone out column j
    pub fn col(&self, j: usize) -> Vec<T> {
        (0..self.rows).map(|i| self.get(i, j).clone()).collect()
    }

    /// Exchange columns i and j
    pub fn swap_cols(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        for r in 0..self.rows {
            self.data.swap(r * self.cols + i, r * self.cols + j);
        }
    }

    /// Overwrite every entry with `other`'s. Dimensions must agree.
    pub fn copy_from(&mut self, other: &Matrix<T>) {
        assert_eq!(
            self.dims(),
            other.dims(),
            "matrix copy between different shapes"
        );
        self.data.clone_from_slice(&other.data);
    }
}

impl Matrix<BigInt> {
    /// Create a zero matrix
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![BigInt::zero(); rows * cols],
            rows,
            cols,
        }
    }

    /// Create an identity matrix
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        m.set_identity();
        m
    }

    /// Create a matrix from row slices of anything convertible to `BigInt`
    pub fn from_rows<T: Into<BigInt> + Clone>(rows: &[Vec<T>]) -> Self {
        assert!(!rows.is_empty(), "Matrix cannot be empty");
        let cols = rows[0].len();
        assert!(
            rows.iter().all(|r| r.len() == cols),
            "All rows must have the same length"
        );
        let data = rows
            .iter()
            .flat_map(|r| r.iter().map(|x| x.clone().into()))
            .collect();
        Self::from_flat(data, rows.len(), cols)
    }

    /// Create a square matrix whose columns are the given vectors
    pub fn from_columns<T: Into<BigInt> + Clone>(columns: &[Vec<T>]) -> Self {
        let n = columns.len();
        assert!(n > 0, "Matrix cannot be empty");
        assert!(
            columns.iter().all(|c| c.len() == n),
            "Columns must form a square matrix"
        );
        let mut m = Self::zeros(n, n);
        for (j, c) in columns.iter().enumerate() {
            for (i, x) in c.iter().enumerate() {
                *m.get_mut(i, j) = x.clone().into();
            }
        }
        m
    }

    /// Parse rows separated by `;` with entries separated by `,` or whitespace,
    /// e.g. `"10,7; 7,5"`.
    pub fn parse_rows(text: &str) -> Result<Self> {
        let mut rows: Vec<Vec<BigInt>> = Vec::new();
        for row in text.split(';').map(str::trim).filter(|r| !r.is_empty()) {
            let entries = row
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|e| !e.is_empty())
                .map(|e| {
                    e.parse::<BigInt>()
                        .map_err(|_| ReductionError::Parse(format!("not an integer: {:?}", e)))
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(entries);
        }

        if rows.is_empty() {
            return Err(ReductionError::Parse("no rows".to_string()));
        }
        let cols = rows[0].len();
        if rows.iter().any(|r| r.len() != cols) {
            return Err(ReductionError::Parse("rows have different lengths".to_string()));
        }
        let n = rows.len();
        Ok(Self::from_flat(rows.into_iter().flatten().collect(), n, cols))
    }

    /// Set to the identity (the matrix must be square)
    pub fn set_identity(&mut self) {
        assert!(self.is_square(), "identity requires a square matrix");
        for i in 0..self.rows {
            for j in 0..self.cols {
                *self.get_mut(i, j) = if i == j { BigInt::one() } else { BigInt::zero() };
            }
        }
    }

    /// Set every entry to zero
    pub fn set_zero(&mut self) {
        for x in self.data.iter_mut() {
            x.set_zero();
        }
    }

    /// Exact product self · rhs
    pub fn mul(&self, rhs: &Matrix<BigInt>) -> Matrix<BigInt> {
        assert_eq!(self.cols, rhs.rows, "dimension mismatch in product");
        let mut out = Matrix::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for j in 0..rhs.cols {
                let mut acc = BigInt::zero();
                for k in 0..self.cols {
                    acc += self.get(i, k) * rhs.get(k, j);
                }
                *out.get_mut(i, j) = acc;
            }
        }
        out
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self.data.iter().map(|x| x.to_string()).collect();
        let width = cells.iter().map(|c| c.len()).max().unwrap_or(0);
        for i in 0..self.rows {
            write!(f, "[")?;
            for j in 0..self.cols {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", cells[i * self.cols + j], width = width)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
