//! Lagrange Core Library
//!
//! Exact Lagrange/Gauss reduction of lattice blocks of rank at most two.
//!
//! # Overview
//!
//! This library reduces 1×1 and 2×2 integer bases in place and returns the
//! unimodular transform relating input and output. Basis and transform
//! entries are exact big integers; length comparisons and quotient estimates
//! run in MPFR floats at a caller-chosen precision and rounding mode.
//! Rank-deficient blocks are resolved with an extended GCD instead of the
//! main loop.
//!
//! # Key Components
//!
//! - [`matrix`] - Dense matrix storage with column operations
//! - [`precision`] - Working precision, rounding mode and integer conversion
//! - [`workspace`] - Scoped scratch arena for MPFR temporaries
//! - [`monitor`] - Profile publication
//! - [`lattice`] - The reduction algorithm and its building blocks

pub mod error;
pub mod lattice;
pub mod matrix;
pub mod monitor;
pub mod precision;
pub mod workspace;

pub use error::{ReductionError, Result};
pub use lattice::{
    reduce_block, xgcd, Algorithm, ComputationContext, Degeneracy, Lagrange, LagrangeStats,
    LatticeReduction, LatticeReductionParams, Outcome, Xgcd, DEFAULT_RHF,
};
pub use matrix::Matrix;
pub use monitor::{Monitor, NullMonitor, ProfileMonitor};
pub use precision::{FloatContext, RoundingMode, DEFAULT_PRECISION};
pub use workspace::{Scratch, WorkspaceBuffer};
