//! Exact helpers over column bases
//!
//! A basis is a square `Matrix<BigInt>` whose columns b_j are the basis
//! vectors; the lattice is L(B) = {Σ x_j b_j : x_j ∈ Z}. Everything here is
//! exact and used to check reductions after the fact.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use rand::Rng;

use crate::matrix::Matrix;
use crate::precision::DEFAULT_PRECISION;

/// Compute inner product <b_i, b_j> of columns i and j
pub fn inner_product(basis: &Matrix<BigInt>, i: usize, j: usize) -> BigInt {
    (0..basis.rows())
        .map(|k| basis.get(k, i) * basis.get(k, j))
        .fold(BigInt::zero(), |acc, x| acc + x)
}

/// Compute squared norm ||b_i||^2
pub fn norm_squared(basis: &Matrix<BigInt>, i: usize) -> BigInt {
    inner_product(basis, i, i)
}

/// Exact determinant of a 1×1 or 2×2 matrix
pub fn determinant(m: &Matrix<BigInt>) -> BigInt {
    match m.dims() {
        (1, 1) => m.get(0, 0).clone(),
        (2, 2) => m.get(0, 0) * m.get(1, 1) - m.get(0, 1) * m.get(1, 0),
        dims => panic!("determinant only defined here for 1×1 and 2×2, got {:?}", dims),
    }
}

/// Size-reduction condition |<b_0, b_1>| ≤ <b_0, b_0>
pub fn is_size_reduced(basis: &Matrix<BigInt>) -> bool {
    inner_product(basis, 0, 1).abs() <= norm_squared(basis, 0)
}

/// Lagrange-reduced: ordered by length and size-reduced
pub fn is_lagrange_reduced(basis: &Matrix<BigInt>) -> bool {
    if basis.cols() < 2 {
        return true;
    }
    norm_squared(basis, 0) <= norm_squared(basis, 1) && is_size_reduced(basis)
}

/// Working precision at which every squared norm and inner product of the
/// columns is an exact float.
///
/// Lagrange steps never lengthen the longest column, so the bound holds for
/// the whole reduction. Never below [`DEFAULT_PRECISION`].
pub fn exact_precision(basis: &Matrix<BigInt>) -> u32 {
    let bits = basis.as_slice().iter().map(|x| x.bits()).max().unwrap_or(0);
    // a sum of `rows` products of two `bits`-bit entries
    let row_bits = u64::from(usize::BITS - basis.rows().leading_zeros());
    let needed = 2 * bits + row_bits + 1;
    u32::try_from(needed).unwrap_or(u32::MAX).max(DEFAULT_PRECISION)
}

/// Create a random n×n basis with entries of at most `bits` bits (signed)
pub fn random_basis<R: Rng>(rng: &mut R, n: usize, bits: u64) -> Matrix<BigInt> {
    let data: Vec<BigInt> = (0..n * n)
        .map(|_| {
            let magnitude = random_bits(rng, bits);
            if rng.gen::<bool>() {
                -magnitude
            } else {
                magnitude
            }
        })
        .collect();
    Matrix::from_flat(data, n, n)
}

/// Create a random full-rank 2×2 basis whose columns are long and nearly
/// parallel: a random unimodular skew applied to a random basis. These are
/// the inputs that make the Lagrange loop run for many steps.
pub fn random_skewed_basis<R: Rng>(rng: &mut R, bits: u64) -> Matrix<BigInt> {
    loop {
        let b = random_basis(rng, 2, bits / 2 + 1);
        if determinant(&b).is_zero() {
            continue;
        }
        // U = [[1, 0], [k, 1]] then [[1, l], [0, 1]]
        let k = random_bits(rng, bits / 2 + 1);
        let l = random_bits(rng, bits / 2 + 1);
        let mut lower = Matrix::identity(2);
        *lower.get_mut(1, 0) = k;
        let mut upper = Matrix::identity(2);
        *upper.get_mut(0, 1) = l;
        return b.mul(&lower).mul(&upper);
    }
}

fn random_bits<R: Rng>(rng: &mut R, bits: u64) -> BigInt {
    let mut x = BigInt::zero();
    let mut remaining = bits;
    while remaining > 0 {
        let take = remaining.min(32);
        let chunk: u32 = if take == 32 {
            rng.gen()
        } else {
            rng.gen_range(0..(1u32 << take))
        };
        x = (x << take) + chunk;
        remaining -= take;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_inner_product() {
        let basis = Matrix::from_columns(&[vec![10i64, 7], vec![7, 5]]);

        // <b_0, b_0> = 100 + 49
        assert_eq!(norm_squared(&basis, 0), BigInt::from(149));
        // <b_0, b_1> = 70 + 35
        assert_eq!(inner_product(&basis, 0, 1), BigInt::from(105));
        assert_eq!(determinant(&basis), BigInt::from(1));
    }

    #[test]
    fn test_reduced_predicates() {
        let reduced = Matrix::from_columns(&[vec![1i64, 0], vec![0, 1]]);
        assert!(is_lagrange_reduced(&reduced));

        let unordered = Matrix::from_columns(&[vec![3i64, 0], vec![0, 1]]);
        assert!(is_size_reduced(&unordered));
        assert!(!is_lagrange_reduced(&unordered));

        let not_size_reduced = Matrix::from_columns(&[vec![1i64, 0], vec![5, 1]]);
        assert!(!is_size_reduced(&not_size_reduced));
    }

    #[test]
    fn test_exact_precision() {
        let small = Matrix::from_columns(&[vec![10i64, 7], vec![7, 5]]);
        assert_eq!(exact_precision(&small), DEFAULT_PRECISION);

        // 71-bit entries: 2·71 bits of product, 2 bits for the row sum, 1 spare
        let wide = Matrix::from_rows(&[
            vec![BigInt::from(1u8) << 70u32, BigInt::from(1)],
            vec![BigInt::from(1), BigInt::from(0)],
        ]);
        assert_eq!(exact_precision(&wide), 145);
    }

    #[test]
    fn test_random_basis_bits() {
        let mut rng = StdRng::seed_from_u64(7);
        let b = random_basis(&mut rng, 2, 40);
        assert_eq!(b.dims(), (2, 2));
        assert!(b.as_slice().iter().all(|x| x.bits() <= 40));

        let s = random_skewed_basis(&mut rng, 64);
        assert!(!determinant(&s).is_zero());
    }
}
