//! Extended Euclidean algorithm
//!
//! Given a, b produce g, x, y with g = gcd(|a|, |b|) and g = x·a + y·b.
//! Quotients use floor division; with truncating division the signs of the
//! cofactors come out wrong for negative inputs.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::mem;

/// Output of [`xgcd`]: `gcd = x·a + y·b`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xgcd {
    pub gcd: BigInt,
    pub x: BigInt,
    pub y: BigInt,
}

/// Extended GCD of `a` and `b`. `xgcd(0, 0)` has `gcd = 0`.
pub fn xgcd(a: &BigInt, b: &BigInt) -> Xgcd {
    let mut old_r = a.clone();
    let mut r = b.clone();
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();
    let mut old_t = BigInt::zero();
    let mut t = BigInt::one();

    // old_r == old_s·a + old_t·b and r == s·a + t·b throughout
    while !r.is_zero() {
        let q = old_r.div_floor(&r);

        old_r -= &q * &r;
        mem::swap(&mut old_r, &mut r);

        old_s -= &q * &s;
        mem::swap(&mut old_s, &mut s);

        old_t -= &q * &t;
        mem::swap(&mut old_t, &mut t);
    }

    // Floor division leaves the last remainder with the divisor's sign
    if old_r.is_negative() {
        old_r = -old_r;
        old_s = -old_s;
        old_t = -old_t;
    }

    Xgcd {
        gcd: old_r,
        x: old_s,
        y: old_t,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn check(a: i64, b: i64) {
        let (a, b) = (BigInt::from(a), BigInt::from(b));
        let r = xgcd(&a, &b);
        assert_eq!(r.gcd, a.gcd(&b), "gcd({}, {})", a, b);
        assert_eq!(&r.x * &a + &r.y * &b, r.gcd, "Bézout for ({}, {})", a, b);
    }

    #[test]
    fn test_xgcd_small() {
        let r = xgcd(&BigInt::from(6), &BigInt::from(4));
        assert_eq!(r.gcd, BigInt::from(2));
        assert_eq!(r.x, BigInt::from(1));
        assert_eq!(r.y, BigInt::from(-1));

        check(240, 46);
        check(17, 5);
        check(1, 1);
    }

    #[test]
    fn test_xgcd_signs_and_zeros() {
        for &(a, b) in &[
            (-6, 4),
            (6, -4),
            (-6, -4),
            (0, 5),
            (0, -3),
            (7, 0),
            (-7, 0),
            (-12, 18),
            (1, -1),
        ] {
            check(a, b);
        }

        let r = xgcd(&BigInt::zero(), &BigInt::zero());
        assert!(r.gcd.is_zero());
    }

    #[test]
    fn test_xgcd_random() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..500 {
            let a: i64 = rng.gen_range(-1_000_000_000..1_000_000_000);
            let b: i64 = rng.gen_range(-1_000_000_000..1_000_000_000);
            if a == 0 && b == 0 {
                continue;
            }
            check(a, b);
        }
    }

    #[test]
    fn test_xgcd_big() {
        let a: BigInt = (BigInt::from(3u8) << 300) * 7;
        let b: BigInt = (BigInt::from(3u8) << 280) * -11;
        let r = xgcd(&a, &b);
        assert_eq!(r.gcd, a.gcd(&b));
        assert_eq!(&r.x * &a + &r.y * &b, r.gcd);
    }
}
