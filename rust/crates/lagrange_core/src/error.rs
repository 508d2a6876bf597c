//! Error types for reduction configuration

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReductionError {
    #[error("working precision must be in {min}..={max} bits, got {got}")]
    InvalidPrecision { got: u32, min: u32, max: u32 },

    #[error("root-Hermite-factor must be finite and positive, got {0}")]
    InvalidHermiteFactor(f64),

    #[error("profile window {start}..{end} does not fit a monitor buffer of {len} entries")]
    ProfileOutOfRange { start: usize, end: usize, len: usize },

    #[error("float context {requested} differs from the instance's fixed context {fixed}")]
    FloatContextMismatch { fixed: String, requested: String },

    #[error("unknown rounding mode: {0}")]
    UnknownRounding(String),

    #[error("malformed basis: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, ReductionError>;
