//! Rank-deficient 2×2 bases
//!
//! When the two basis columns are linearly dependent the Lagrange loop has
//! nothing to do. Instead the transform is built directly so that column 0
//! of `M·U` generates the lattice and column 1 is the zero vector.

use num_bigint::BigInt;
use num_traits::{One, Zero};

use super::xgcd::{xgcd, Xgcd};
use crate::matrix::Matrix;

/// How a zero-determinant 2×2 basis degenerates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degeneracy {
    /// Both columns are zero; the lattice is {0}
    ZeroBasis,
    /// Column 0 is zero, column 1 is not
    FirstColumnZero,
    /// Column 1 is zero, column 0 is not
    SecondColumnZero,
    /// Both columns nonzero but dependent; resolved through the extended
    /// GCD of the entries of `row`
    Dependent { row: usize, gcd: BigInt },
}

impl Degeneracy {
    /// Rank of the lattice spanned by the input
    pub fn rank(&self) -> usize {
        match self {
            Degeneracy::ZeroBasis => 0,
            _ => 1,
        }
    }
}

/// Classify a dependent pair from which of its columns vanish.
///
/// Returns `None` when neither is zero; that case needs
/// [`resolve_dependent`].
pub fn classify(first_zero: bool, second_zero: bool) -> Option<Degeneracy> {
    match (first_zero, second_zero) {
        (true, true) => Some(Degeneracy::ZeroBasis),
        (true, false) => Some(Degeneracy::FirstColumnZero),
        (false, true) => Some(Degeneracy::SecondColumnZero),
        (false, false) => None,
    }
}

/// Write the transform that keeps the surviving column of a basis with a
/// zero column. `u` must already be zero.
pub fn selection_transform(kind: &Degeneracy, u: &mut Matrix<BigInt>) {
    match kind {
        // output column 0 = input column 1
        Degeneracy::FirstColumnZero => *u.get_mut(1, 0) = BigInt::one(),
        // output column 0 = input column 0
        Degeneracy::SecondColumnZero => *u.get_mut(0, 0) = BigInt::one(),
        Degeneracy::ZeroBasis | Degeneracy::Dependent { .. } => {}
    }
}

/// Resolve two nonzero dependent columns of `m`.
///
/// Picks the first nonzero row, takes the extended GCD of its entries and
/// stores the Bézout coefficients in column 0 of `u` (which must be zero).
/// Applying `u` to `m` then yields x·a + y·b in column 0 and zero in
/// column 1.
pub fn resolve_dependent(m: &Matrix<BigInt>, u: &mut Matrix<BigInt>) -> Degeneracy {
    let row = if m.row(0).iter().any(|x| !x.is_zero()) { 0 } else { 1 };
    let Xgcd { gcd, x, y } = xgcd(m.get(row, 0), m.get(row, 1));

    *u.get_mut(0, 0) = x;
    *u.get_mut(1, 0) = y;

    Degeneracy::Dependent { row, gcd }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(true, true), Some(Degeneracy::ZeroBasis));
        assert_eq!(classify(true, false), Some(Degeneracy::FirstColumnZero));
        assert_eq!(classify(false, true), Some(Degeneracy::SecondColumnZero));
        assert_eq!(classify(false, false), None);
        assert_eq!(Degeneracy::ZeroBasis.rank(), 0);
        assert_eq!(Degeneracy::FirstColumnZero.rank(), 1);
    }

    #[test]
    fn test_selection_transforms() {
        let mut u = Matrix::zeros(2, 2);
        selection_transform(&Degeneracy::FirstColumnZero, &mut u);
        assert_eq!(u, Matrix::from_rows(&[vec![0i64, 0], vec![1, 0]]));

        let mut u = Matrix::zeros(2, 2);
        selection_transform(&Degeneracy::SecondColumnZero, &mut u);
        assert_eq!(u, Matrix::from_rows(&[vec![1i64, 0], vec![0, 0]]));

        let mut u = Matrix::zeros(2, 2);
        selection_transform(&Degeneracy::ZeroBasis, &mut u);
        assert_eq!(u, Matrix::zeros(2, 2));
    }

    #[test]
    fn test_resolve_dependent_first_row() {
        // columns (6,3) and (4,2)
        let m = Matrix::from_columns(&[vec![6i64, 3], vec![4, 2]]);
        let mut u = Matrix::zeros(2, 2);

        let kind = resolve_dependent(&m, &mut u);

        assert_eq!(kind, Degeneracy::Dependent { row: 0, gcd: BigInt::from(2) });
        let combined = m.mul(&u);
        assert_eq!(combined.col(0), vec![BigInt::from(2), BigInt::from(1)]);
        assert_eq!(combined.col(1), vec![BigInt::zero(), BigInt::zero()]);
    }

    #[test]
    fn test_resolve_dependent_second_row() {
        // columns (0,-9) and (0,6): row 0 vanishes
        let m = Matrix::from_columns(&[vec![0i64, -9], vec![0, 6]]);
        let mut u = Matrix::zeros(2, 2);

        let kind = resolve_dependent(&m, &mut u);

        assert_eq!(kind, Degeneracy::Dependent { row: 1, gcd: BigInt::from(3) });
        let combined = m.mul(&u);
        assert_eq!(combined.col(0), vec![BigInt::zero(), BigInt::from(3)]);
    }
}
