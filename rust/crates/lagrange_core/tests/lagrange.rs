//! Property checks for Lagrange reduction on random blocks

use lagrange_core::lattice::basis::{
    determinant, inner_product, is_lagrange_reduced, norm_squared, random_basis, random_skewed_basis,
};
use lagrange_core::{
    reduce_block, Algorithm, ComputationContext, Degeneracy, FloatContext, LatticeReductionParams,
    Matrix, Outcome, ProfileMonitor, RoundingMode,
};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ROUNDINGS: [RoundingMode; 5] = [
    RoundingMode::Nearest,
    RoundingMode::TowardZero,
    RoundingMode::Up,
    RoundingMode::Down,
    RoundingMode::AwayFromZero,
];

fn context(precision: u32, rounding: RoundingMode) -> ComputationContext {
    ComputationContext::new(FloatContext::new(precision, rounding).unwrap())
}

fn assert_full_rank_reduction(original: &Matrix<BigInt>, m: &Matrix<BigInt>, u: &Matrix<BigInt>) {
    assert!(is_lagrange_reduced(m), "not reduced:\n{}", m);
    assert!(norm_squared(m, 0) <= norm_squared(m, 1));
    assert!(inner_product(m, 0, 1).abs() <= norm_squared(m, 0));
    assert!(determinant(u).abs().is_one(), "transform not unimodular:\n{}", u);
    assert_eq!(&original.mul(u), m);
    assert_eq!(determinant(m).abs(), determinant(original).abs());
}

#[test]
fn test_random_full_rank_all_roundings() {
    let mut rng = StdRng::seed_from_u64(2024);

    for rounding in ROUNDINGS {
        let cc = context(128, rounding);
        for _ in 0..200 {
            let original = random_basis(&mut rng, 2, 40);
            if determinant(&original).is_zero() {
                continue;
            }
            let mut m = original.clone();
            let mut u = Matrix::identity(2);

            let (outcome, stats) = reduce_block(&mut m, &mut u, &cc).unwrap();

            assert_eq!(outcome, Outcome::Reduced { iterations: stats.iterations });
            assert_full_rank_reduction(&original, &m, &u);
        }
    }
}

#[test]
fn test_double_precision_small_entries() {
    // 20-bit entries keep every norm and dot product exact in 53 bits
    let mut rng = StdRng::seed_from_u64(53);
    let cc = ComputationContext::default();

    for _ in 0..500 {
        let original = random_basis(&mut rng, 2, 20);
        if determinant(&original).is_zero() {
            continue;
        }
        let mut m = original.clone();
        let mut u = Matrix::identity(2);
        reduce_block(&mut m, &mut u, &cc).unwrap();
        assert_full_rank_reduction(&original, &m, &u);
    }
}

#[test]
fn test_skewed_bases_need_many_iterations() {
    let mut rng = StdRng::seed_from_u64(99);
    let cc = context(512, RoundingMode::Nearest);
    let mut max_iterations = 0;

    for _ in 0..50 {
        let original = random_skewed_basis(&mut rng, 128);
        let mut m = original.clone();
        let mut u = Matrix::identity(2);

        let (_, stats) = reduce_block(&mut m, &mut u, &cc).unwrap();

        assert_full_rank_reduction(&original, &m, &u);
        max_iterations = max_iterations.max(stats.iterations);
    }

    assert!(max_iterations >= 2);
}

#[test]
fn test_random_dependent_pairs() {
    let mut rng = StdRng::seed_from_u64(7);
    let cc = ComputationContext::default();

    for _ in 0..300 {
        // a = α·v, b = β·v with v primitive
        let v0: i64 = rng.gen_range(-1000..=1000);
        let v1: i64 = rng.gen_range(-1000..=1000);
        if v0 == 0 && v1 == 0 {
            continue;
        }
        let g = v0.gcd(&v1);
        let (v0, v1) = (v0 / g, v1 / g);
        let alpha: i64 = rng.gen_range(-50..=50);
        let beta: i64 = rng.gen_range(-50..=50);
        if alpha == 0 || beta == 0 {
            continue;
        }

        let original = Matrix::from_columns(&[vec![alpha * v0, alpha * v1], vec![beta * v0, beta * v1]]);
        let mut m = original.clone();
        let mut u = Matrix::identity(2);

        let (outcome, _) = reduce_block(&mut m, &mut u, &cc).unwrap();

        assert!(matches!(outcome, Outcome::Degenerate(Degeneracy::Dependent { .. })));
        assert_eq!(original.mul(&u), m);
        assert!(m.col(1).iter().all(|x| x.is_zero()));

        // column 0 is ±gcd(α, β)·v, the generator of the rank-1 lattice
        let expected = BigInt::from(alpha.gcd(&beta));
        let scale = if v0 != 0 {
            m.get(0, 0) / BigInt::from(v0)
        } else {
            m.get(1, 0) / BigInt::from(v1)
        };
        assert_eq!(scale.abs(), expected);
        assert_eq!(m.get(0, 0), &(&scale * v0));
        assert_eq!(m.get(1, 0), &(&scale * v1));
    }
}

#[test]
fn test_blocks_share_one_profile() {
    // Four independent 2×2 blocks of an 8-dimensional basis
    let mut rng = StdRng::seed_from_u64(11);
    let cc = ComputationContext::default();
    let mut monitor = ProfileMonitor::new(8);
    let mut dets = Vec::new();

    for block in 0..4 {
        let mut m = loop {
            let b = random_basis(&mut rng, 2, 16);
            if !determinant(&b).is_zero() {
                break b;
            }
        };
        dets.push(determinant(&m).abs());
        let mut u = Matrix::identity(2);

        let params = LatticeReductionParams::new(&mut m, &mut u, &mut monitor)
            .with_profile_offset(2 * block, 0);
        let mut alg = Algorithm::for_dimension(2).unwrap().build(params, &cc).unwrap();
        alg.solve();
    }

    assert_eq!(monitor.updates(), 4);
    for (block, det) in dets.iter().enumerate() {
        let p = &monitor.profile()[2 * block..2 * block + 2];
        // entries below 2^16 keep the determinant exact in an f64
        let det_log2 = det.to_f64().unwrap().log2();
        assert!((p[0] + p[1] - det_log2).abs() < 1e-9);
        // ||b*|| ≥ (√3/2)·||a|| for a reduced pair
        assert!(p[1] >= p[0] + (3f64.sqrt() / 2.0).log2() - 1e-9);
    }
}
