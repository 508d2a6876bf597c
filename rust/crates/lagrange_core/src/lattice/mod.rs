//! Lattice basis reduction for blocks of rank at most two
//!
//! # Overview
//!
//! A larger reduction pipeline splits a basis into small blocks and drives
//! one reduction algorithm per block through the [`LatticeReduction`]
//! lifecycle: `configure`, `solve`, `unconfigure`. For blocks of dimension
//! one or two the algorithm is [`Lagrange`], which returns the reduced basis
//! together with the unimodular transform `U` such that `M_after = M_before · U`.
//!
//! Exact values are `BigInt`; ordering and termination decisions are made in
//! MPFR floats at the precision and rounding mode of the
//! [`ComputationContext`].
//!
//! # Key Components
//!
//! - [`Lagrange`] - Lagrange/Gauss reduction with degenerate-case handling
//! - [`xgcd`] - Extended Euclidean algorithm
//! - [`degenerate`] - Classification and resolution of dependent columns
//! - [`norm`] - Squared norms at working precision
//! - [`basis`] - Exact checks on column bases
//!
//! # Example
//!
//! ```ignore
//! use lagrange_core::lattice::{reduce_block, ComputationContext};
//! use lagrange_core::Matrix;
//!
//! let mut m = Matrix::from_columns(&[vec![10i64, 7], vec![7, 5]]);
//! let mut u = Matrix::identity(2);
//! let (outcome, stats) = reduce_block(&mut m, &mut u, &ComputationContext::default())?;
//! ```

pub mod basis;
pub mod degenerate;
pub mod lagrange;
pub mod norm;
pub mod xgcd;

pub use degenerate::Degeneracy;
pub use lagrange::{reduce_block, Lagrange, LagrangeStats};
pub use xgcd::{xgcd, Xgcd};

use num_bigint::BigInt;

use crate::error::Result;
use crate::matrix::Matrix;
use crate::monitor::Monitor;
use crate::precision::FloatContext;

/// Default root-Hermite-factor target
pub const DEFAULT_RHF: f64 = 1.0219;

/// Environment an algorithm instance runs in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComputationContext {
    /// Precision and rounding for every floating operation
    pub float: FloatContext,
}

impl ComputationContext {
    pub fn new(float: FloatContext) -> Self {
        Self { float }
    }
}

/// Per-block parameters handed to [`LatticeReduction::configure`]
///
/// The basis and transform stay borrowed by the configured instance until it
/// is unconfigured or dropped.
pub struct LatticeReductionParams<'a> {
    /// Basis, one vector per column; reduced in place
    pub basis: &'a mut Matrix<BigInt>,
    /// Receives the transform relating the input and output bases
    pub transform: &'a mut Matrix<BigInt>,
    /// Receives the block's profile
    pub monitor: &'a mut dyn Monitor,
    /// Root-Hermite-factor target
    pub rhf: f64,
    /// Position of this block in the global profile
    pub profile_offset: usize,
    /// First local profile index written by this block
    pub offset: usize,
}

impl<'a> LatticeReductionParams<'a> {
    pub fn new(
        basis: &'a mut Matrix<BigInt>,
        transform: &'a mut Matrix<BigInt>,
        monitor: &'a mut dyn Monitor,
    ) -> Self {
        Self {
            basis,
            transform,
            monitor,
            rhf: DEFAULT_RHF,
            profile_offset: 0,
            offset: 0,
        }
    }

    pub fn with_rhf(mut self, rhf: f64) -> Self {
        self.rhf = rhf;
        self
    }

    pub fn with_profile_offset(mut self, profile_offset: usize, offset: usize) -> Self {
        self.profile_offset = profile_offset;
        self.offset = offset;
        self
    }
}

/// Successful result of a block reduction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Dimension below two: the transform is the identity
    Trivial,
    /// Full-rank 2×2 block reduced by the Lagrange loop
    Reduced { iterations: usize },
    /// Rank-deficient 2×2 block resolved without the loop
    Degenerate(Degeneracy),
}

/// Lifecycle shared by reduction algorithms
pub trait LatticeReduction<'a> {
    /// Name of this implementation (for logging)
    fn impl_name(&self) -> &'static str;

    /// Attach a block. Replaces any previous configuration.
    fn configure(&mut self, params: LatticeReductionParams<'a>, cc: &ComputationContext) -> Result<()>;

    /// Release the attached block
    fn unconfigure(&mut self);

    fn is_configured(&self) -> bool;

    /// Reduce the attached block in place
    fn solve(&mut self) -> Outcome;

    fn log_start(&mut self);

    fn log_end(&mut self);
}

/// Reduction algorithms known to the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Lagrange,
}

impl Algorithm {
    /// Pick the algorithm for a block of dimension `n`
    pub fn for_dimension(n: usize) -> Option<Self> {
        match n {
            0..=2 => Some(Algorithm::Lagrange),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Lagrange => Lagrange::IMPL_NAME,
        }
    }

    /// Construct and configure an instance
    pub fn build<'a>(
        self,
        params: LatticeReductionParams<'a>,
        cc: &ComputationContext,
    ) -> Result<Box<dyn LatticeReduction<'a> + 'a>> {
        match self {
            Algorithm::Lagrange => Ok(Box::new(Lagrange::new(params, cc)?)),
        }
    }
}
