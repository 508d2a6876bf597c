//! Lagrange (Gauss) reduction of rank ≤ 2 lattice bases
//!
//! # The Algorithm
//!
//! Given columns a, b with ||a|| ≥ ||b||, repeat
//!
//! ```text
//! q      = round(<a, b> / ||b||²)
//! (a, b) = (b, a − q·b)
//! ```
//!
//! until ||a||² ≤ ||b||². The result is size-reduced, |<a, b>| ≤ <a, a>,
//! and a is a shortest nonzero lattice vector. This is the Euclidean
//! algorithm on vectors; it terminates for every full-rank integer input.
//!
//! Basis and transform entries are exact `BigInt`s. Only the quotient
//! estimates and length comparisons go through MPFR, at the precision and
//! rounding mode fixed when the instance is constructed.
//!
//! Zero-determinant inputs never enter the loop; see [`super::degenerate`].

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use rug::ops::{AddAssignRound, AssignRound, DivAssignRound, MulAssignRound};
use std::mem;
use std::time::Instant;

use super::basis;
use super::degenerate::{self, Degeneracy};
use super::norm::norm2;
use super::{ComputationContext, LatticeReduction, LatticeReductionParams, Outcome};
use crate::error::{ReductionError, Result};
use crate::matrix::Matrix;
use crate::monitor::{Monitor, NullMonitor};
use crate::precision::{from_integer, to_integer, FloatContext};
use crate::workspace::WorkspaceBuffer;

/// Statistics from the last `solve`
#[derive(Debug, Clone, Default)]
pub struct LagrangeStats {
    /// Passes through the swap-and-reduce loop
    pub iterations: usize,
    /// Column swaps, including the initial ordering swap
    pub swaps: usize,
    /// Total time (seconds)
    pub total_time: f64,
    /// log2 |det| of the block (−∞ when singular)
    pub det_log2: f64,
    /// log2 of |det|·rhf⁴, the length bound implied by the rhf target.
    /// Reported only; the loop always runs to completion.
    pub length_bound_log2: f64,
    /// Most scratch floats held at once
    pub scratch_peak: usize,
}

/// Lagrange reduction of one block of dimension ≤ 2
pub struct Lagrange<'a> {
    params: Option<LatticeReductionParams<'a>>,
    float: FloatContext,
    n: usize,
    profile: Vec<f64>,
    stats: LagrangeStats,
    started: Option<Instant>,
}

impl<'a> Lagrange<'a> {
    pub const IMPL_NAME: &'static str = "Lagrange";

    /// Create an instance and configure it with `params`.
    ///
    /// The float context of `cc` is captured here and cannot change for the
    /// lifetime of the instance.
    ///
    /// # Precision
    /// Lengths and inner products are rounded to the working precision. When
    /// the squared norms of the columns are wider than that precision the
    /// quotients can be wrong enough that the loop stops on a basis that is
    /// not size-reduced, and `solve` panics on the postcondition.
    /// [`basis::exact_precision`] gives a precision at which this cannot
    /// happen.
    ///
    /// # Panics
    /// Panics if the block has dimension > 2 or the basis/transform shapes
    /// disagree.
    pub fn new(params: LatticeReductionParams<'a>, cc: &ComputationContext) -> Result<Self> {
        let mut lagrange = Self {
            params: None,
            float: cc.float,
            n: 0,
            profile: Vec::new(),
            stats: LagrangeStats::default(),
            started: None,
        };
        lagrange.configure(params, cc)?;
        Ok(lagrange)
    }

    /// Float context fixed at construction
    pub fn float_context(&self) -> &FloatContext {
        &self.float
    }

    /// Statistics from the last `solve`
    pub fn stats(&self) -> &LagrangeStats {
        &self.stats
    }

    /// Local profile buffer; entries `offset..offset + n` hold the last
    /// published values
    pub fn profile(&self) -> &[f64] {
        &self.profile
    }

    fn reduce(&mut self, p: &mut LatticeReductionParams<'a>) -> Outcome {
        if self.n < 2 {
            p.transform.set_identity();
            if self.n == 1 && !p.basis.get(0, 0).is_zero() {
                let mut len = self.float.zero();
                self.float.assign_int(&mut len, &p.basis.get(0, 0).abs());
                self.profile[p.offset] = self.float.log2(&len);
                self.publish(p, 1);
            }
            return Outcome::Trivial;
        }

        let ctx = self.float;
        let rnd = ctx.round();
        let ws = WorkspaceBuffer::new(8, ctx);

        let mut zm = p.basis.clone();
        let mut zu = Matrix::identity(2);

        let outcome = {
            let mut local = ws.walloc(7);
            let [a_len, b_len, q, tmp, adotb, det, limit] = &mut local[..] else {
                unreachable!("scratch holds exactly seven values")
            };

            // det is exact; only its magnitude is carried as a float
            let det_z = basis::determinant(&zm);
            ctx.assign_int(det, &det_z.abs());

            // ||a||² < rhf⁴ · det bounds the first vector for the rhf target
            let hermite_factor = p.rhf.powi(4);
            limit.assign_round(&*det, rnd);
            limit.mul_assign_round(hermite_factor, rnd);

            self.stats.det_log2 = if det_z.is_zero() { f64::NEG_INFINITY } else { ctx.log2(det) };
            self.stats.length_bound_log2 = if det_z.is_zero() {
                f64::NEG_INFINITY
            } else {
                ctx.log2(limit)
            };

            norm2(a_len, zm.get(0, 0), zm.get(1, 0), &ws);
            norm2(b_len, zm.get(0, 1), zm.get(1, 1), &ws);

            if det_z.is_zero() {
                zu.set_zero();
                let kind = match degenerate::classify(a_len.is_zero(), b_len.is_zero()) {
                    Some(kind) => {
                        degenerate::selection_transform(&kind, &mut zu);
                        kind
                    }
                    None => degenerate::resolve_dependent(&zm, &mut zu),
                };
                log::debug!(
                    "{}: rank-deficient block, {:?} (rank {})",
                    Self::IMPL_NAME,
                    kind,
                    kind.rank()
                );

                // Column 1 of zu is zero, so this leaves the surviving
                // vector in column 0 and zero in column 1
                zm = zm.mul(&zu);

                if kind != Degeneracy::ZeroBasis {
                    norm2(a_len, zm.get(0, 0), zm.get(1, 0), &ws);
                    self.profile[p.offset] = ctx.log2(a_len) / 2.0;
                    self.publish(p, 1);
                }
                Outcome::Degenerate(kind)
            } else {
                assert!(!a_len.is_zero(), "full-rank block with a zero column");
                assert!(!b_len.is_zero(), "full-rank block with a zero column");

                if *a_len < *b_len {
                    zm.swap_cols(0, 1);
                    mem::swap(&mut *a_len, &mut *b_len);
                    zu.swap_cols(0, 1);
                    self.stats.swaps += 1;
                }

                loop {
                    self.stats.iterations += 1;

                    // <a, b>
                    ctx.assign_int(adotb, zm.get(0, 0));
                    adotb.mul_assign_round(&to_integer(zm.get(0, 1)), rnd);
                    ctx.assign_int(tmp, zm.get(1, 0));
                    tmp.mul_assign_round(&to_integer(zm.get(1, 1)), rnd);
                    adotb.add_assign_round(&*tmp, rnd);

                    q.assign_round(&*adotb, rnd);
                    q.div_assign_round(&*b_len, rnd);
                    q.round_mut();
                    let q_z = match q.to_integer() {
                        Some(z) => from_integer(&z),
                        None => panic!("non-finite quotient with ||b||² = {}", b_len),
                    };

                    zm.swap_cols(0, 1);
                    mem::swap(&mut *a_len, &mut *b_len);

                    // a now holds the old b; b ← old a − q·(old b)
                    subtract_multiple(&mut zm, &q_z);
                    norm2(b_len, zm.get(0, 1), zm.get(1, 1), &ws);

                    // [e f] [0  1]   [f  e−qf]
                    // [g h] [1 −q] = [h  g−qh]
                    zu.swap_cols(0, 1);
                    subtract_multiple(&mut zu, &q_z);
                    self.stats.swaps += 1;

                    log::trace!(
                        "{}: iteration {}, q = {}, ||a||² = {}, ||b||² = {}",
                        Self::IMPL_NAME,
                        self.stats.iterations,
                        q_z,
                        a_len,
                        b_len
                    );

                    if *a_len <= *b_len {
                        break;
                    }
                }

                // a_len is ||a||², det is |det| = ||a||·||b*||
                let a_log2 = ctx.log2(a_len) / 2.0;
                self.profile[p.offset] = a_log2;
                self.profile[p.offset + 1] = ctx.log2(det) - a_log2;
                self.publish(p, 2);

                assert!(
                    basis::is_size_reduced(&zm),
                    "Lagrange output not size reduced: <a,b> = {}, <a,a> = {}",
                    basis::inner_product(&zm, 0, 1),
                    basis::norm_squared(&zm, 0)
                );

                Outcome::Reduced {
                    iterations: self.stats.iterations,
                }
            }
        };

        self.stats.scratch_peak = ws.peak();
        debug_assert_eq!(ws.in_use(), 0);

        p.basis.copy_from(&zm);
        p.transform.copy_from(&zu);

        outcome
    }

    fn publish(&self, p: &mut LatticeReductionParams<'a>, len: usize) {
        p.monitor
            .profile_update(&self.profile, p.profile_offset, p.offset, p.offset + len);
    }
}

/// Column 1 ← column 1 − q · column 0
fn subtract_multiple(m: &mut Matrix<BigInt>, q: &BigInt) {
    for r in 0..m.rows() {
        let t = m.get(r, 0) * q;
        *m.get_mut(r, 1) -= t;
    }
}

impl<'a> LatticeReduction<'a> for Lagrange<'a> {
    fn impl_name(&self) -> &'static str {
        Self::IMPL_NAME
    }

    fn configure(&mut self, params: LatticeReductionParams<'a>, cc: &ComputationContext) -> Result<()> {
        if self.is_configured() {
            self.unconfigure();
        }

        let n = params.basis.cols();
        assert!(n <= 2, "Lagrange handles dimension ≤ 2, got {}", n);
        if n == 2 {
            assert!(params.basis.is_square(), "basis must be {}×{}", n, n);
        }
        assert_eq!(
            params.transform.dims(),
            (n, n),
            "transform must be {}×{}",
            n,
            n
        );

        if cc.float != self.float {
            return Err(ReductionError::FloatContextMismatch {
                fixed: self.float.to_string(),
                requested: cc.float.to_string(),
            });
        }
        if !params.rhf.is_finite() || params.rhf <= 0.0 {
            return Err(ReductionError::InvalidHermiteFactor(params.rhf));
        }
        let start = params.profile_offset + params.offset;
        let end = start + n;
        if let Some(len) = params.monitor.capacity() {
            if end > len {
                return Err(ReductionError::ProfileOutOfRange { start, end, len });
            }
        }

        self.n = n;
        self.profile = vec![f64::NAN; params.offset + n];
        self.params = Some(params);
        Ok(())
    }

    fn unconfigure(&mut self) {
        assert!(self.is_configured(), "unconfigure on an unconfigured instance");
        self.params = None;
    }

    fn is_configured(&self) -> bool {
        self.params.is_some()
    }

    fn solve(&mut self) -> Outcome {
        let mut params = match self.params.take() {
            Some(p) => p,
            None => panic!("solve on an unconfigured {} instance", Self::IMPL_NAME),
        };

        self.log_start();
        let outcome = self.reduce(&mut params);
        self.log_end();

        self.params = Some(params);
        outcome
    }

    fn log_start(&mut self) {
        self.stats = LagrangeStats::default();
        self.started = Some(Instant::now());
        log::debug!("{}: start n={} ({})", Self::IMPL_NAME, self.n, self.float);
    }

    fn log_end(&mut self) {
        if let Some(start) = self.started.take() {
            self.stats.total_time = start.elapsed().as_secs_f64();
        }
        log::debug!(
            "{}: done in {:.6}s, {} iterations, {} swaps",
            Self::IMPL_NAME,
            self.stats.total_time,
            self.stats.iterations,
            self.stats.swaps
        );
    }
}

/// Reduce one block with a fresh instance, discarding the profile.
///
/// Panics on blocks whose entries are too wide for the precision of `cc`;
/// see the precision note on [`Lagrange::new`].
pub fn reduce_block(
    basis: &mut Matrix<BigInt>,
    transform: &mut Matrix<BigInt>,
    cc: &ComputationContext,
) -> Result<(Outcome, LagrangeStats)> {
    let mut monitor = NullMonitor;
    let params = LatticeReductionParams::new(basis, transform, &mut monitor);
    let mut lagrange = Lagrange::new(params, cc)?;
    let outcome = lagrange.solve();
    Ok((outcome, lagrange.stats().clone()))
}
