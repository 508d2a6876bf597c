//! Working precision and rounding for the floating side of a reduction
//!
//! Exact values live in `num_bigint::BigInt`. Length comparisons, dot
//! products and quotient estimates are carried out in MPFR floats
//! (`rug::Float`) at a caller-chosen precision and rounding mode. A
//! [`FloatContext`] captures both once and is threaded into every floating
//! operation of an instance.

use num_bigint::{BigInt, Sign};
use rug::float::Round;
use rug::integer::Order;
use rug::ops::AssignRound;
use rug::{Float, Integer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{ReductionError, Result};

/// Default working precision in bits (IEEE double)
pub const DEFAULT_PRECISION: u32 = 53;

/// Rounding mode applied to every floating operation of an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundingMode {
    /// Round to nearest, ties to even (MPFR's default)
    #[default]
    Nearest,
    /// Round toward zero
    TowardZero,
    /// Round toward +∞
    Up,
    /// Round toward −∞
    Down,
    /// Round away from zero
    AwayFromZero,
}

impl RoundingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundingMode::Nearest => "nearest",
            RoundingMode::TowardZero => "zero",
            RoundingMode::Up => "up",
            RoundingMode::Down => "down",
            RoundingMode::AwayFromZero => "away",
        }
    }
}

impl From<RoundingMode> for Round {
    fn from(mode: RoundingMode) -> Self {
        match mode {
            RoundingMode::Nearest => Round::Nearest,
            RoundingMode::TowardZero => Round::Zero,
            RoundingMode::Up => Round::Up,
            RoundingMode::Down => Round::Down,
            RoundingMode::AwayFromZero => Round::AwayZero,
        }
    }
}

impl FromStr for RoundingMode {
    type Err = ReductionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "n" | "rndn" => Ok(RoundingMode::Nearest),
            "zero" | "z" | "rndz" => Ok(RoundingMode::TowardZero),
            "up" | "u" | "rndu" => Ok(RoundingMode::Up),
            "down" | "d" | "rndd" => Ok(RoundingMode::Down),
            "away" | "a" | "rnda" => Ok(RoundingMode::AwayFromZero),
            other => Err(ReductionError::UnknownRounding(other.to_string())),
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Precision and rounding mode shared by all floats of one instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatContext {
    precision: u32,
    rounding: RoundingMode,
}

impl Default for FloatContext {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            rounding: RoundingMode::Nearest,
        }
    }
}

impl FloatContext {
    /// Create a context, checking the precision against MPFR's limits
    pub fn new(precision: u32, rounding: RoundingMode) -> Result<Self> {
        let min = rug::float::prec_min();
        let max = rug::float::prec_max();
        if precision < min || precision > max {
            return Err(ReductionError::InvalidPrecision {
                got: precision,
                min,
                max,
            });
        }
        Ok(Self { precision, rounding })
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn rounding(&self) -> RoundingMode {
        self.rounding
    }

    /// The rounding mode in MPFR's terms
    pub fn round(&self) -> Round {
        self.rounding.into()
    }

    /// A fresh zero at this context's precision
    pub fn zero(&self) -> Float {
        Float::new(self.precision)
    }

    /// dst ← x, rounded to the context
    pub fn assign_int(&self, dst: &mut Float, x: &BigInt) -> Ordering {
        dst.assign_round(&to_integer(x), self.round())
    }

    /// Split a positive float into (mantissa, exponent) and return
    /// log2 of its value: `exp + log2(mantissa)`.
    ///
    /// Stays accurate when the value itself overflows an `f64`.
    pub fn log2(&self, x: &Float) -> f64 {
        let (mantissa, exp) = x.to_f64_exp_round(self.round());
        exp as f64 + mantissa.log2()
    }
}

impl fmt::Display for FloatContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits, {}", self.precision, self.rounding)
    }
}

/// Convert an exact integer into GMP form
pub fn to_integer(x: &BigInt) -> Integer {
    let (sign, digits) = x.to_u32_digits();
    let magnitude = Integer::from_digits(&digits, Order::Lsf);
    if sign == Sign::Minus {
        -magnitude
    } else {
        magnitude
    }
}

/// Convert a GMP integer back into a `BigInt`
pub fn from_integer(x: &Integer) -> BigInt {
    let digits = x.to_digits::<u32>(Order::Lsf);
    let sign = match x.cmp0() {
        Ordering::Less => Sign::Minus,
        Ordering::Equal => Sign::NoSign,
        Ordering::Greater => Sign::Plus,
    };
    BigInt::from_slice(sign, &digits)
}
