//! Lagrange Reduction Benchmark
//!
//! Times reduction of skewed random 2×2 bases across entry sizes and
//! verifies every result exactly.

use lagrange_core::lattice::basis::{determinant, is_lagrange_reduced, random_skewed_basis};
use lagrange_core::{reduce_block, ComputationContext, FloatContext, Matrix, RoundingMode};
use num_bigint::BigInt;
use num_traits::{One, Signed};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Results for one entry size
#[derive(Debug, Clone)]
pub struct LagrangeBenchResult {
    pub bits: u64,
    pub precision: u32,
    pub trials: usize,
    pub avg_us: f64,
    pub avg_iterations: f64,
    pub max_iterations: usize,
    pub verified: bool,
}

/// Run the benchmark over entry sizes up to `max_bits`
pub fn run_lagrange_benchmark(
    max_bits: u64,
    trials: usize,
    seed: u64,
    export: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║             Lagrange Lattice Reduction Benchmark             ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Max bits: {}, trials per size: {}, seed: {}", max_bits, trials, seed);
    println!();

    let configs: Vec<u64> = vec![16, 32, 64, 128, 256, 512, 1024, 2048]
        .into_iter()
        .filter(|&b| b <= max_bits)
        .collect();

    let mut rng = StdRng::seed_from_u64(seed);
    let mut results = Vec::new();

    println!("┌────────┬───────────┬────────────┬────────────┬──────────┬──────────┐");
    println!("│  bits  │ precision │  Avg (µs)  │ Avg iters  │ Max iters│ Verified │");
    println!("├────────┼───────────┼────────────┼────────────┼──────────┼──────────┤");

    for &bits in &configs {
        let result = benchmark_size(&mut rng, bits, trials)?;

        let verified_str = if result.verified { "✓" } else { "✗" };
        println!(
            "│ {:>6} │ {:>9} │ {:>10.2} │ {:>10.2} │ {:>8} │    {}     │",
            result.bits,
            result.precision,
            result.avg_us,
            result.avg_iterations,
            result.max_iterations,
            verified_str
        );

        results.push(result);
    }

    println!("└────────┴───────────┴────────────┴────────────┴──────────┴──────────┘");
    println!();

    let failed = results.iter().filter(|r| !r.verified).count();
    if failed > 0 {
        println!("{} size(s) produced an unverified reduction", failed);
    }

    if let Some(path) = export {
        export_results(&path, &results)?;
        println!("Results exported to: {}", path.display());
    }

    Ok(())
}

fn benchmark_size(rng: &mut StdRng, bits: u64, trials: usize) -> Result<LagrangeBenchResult, Box<dyn Error>> {
    // Squared norms of the skewed bases stay below 2^(3·bits + 16), so this
    // keeps every length comparison exact
    let precision = (3 * bits + 64) as u32;
    let cc = ComputationContext::new(FloatContext::new(precision, RoundingMode::Nearest)?);
    log::info!("{} bits: {} trials at {}", bits, trials, cc.float);

    let mut total_time = 0.0;
    let mut total_iterations = 0;
    let mut max_iterations = 0;
    let mut verified = true;

    for _ in 0..trials {
        let original = random_skewed_basis(rng, bits);
        let mut m = original.clone();
        let mut u = Matrix::identity(2);

        let (_, stats) = reduce_block(&mut m, &mut u, &cc)?;

        total_time += stats.total_time;
        total_iterations += stats.iterations;
        max_iterations = max_iterations.max(stats.iterations);
        verified &= verify(&original, &m, &u);
    }

    let count = trials.max(1) as f64;
    Ok(LagrangeBenchResult {
        bits,
        precision,
        trials,
        avg_us: total_time * 1e6 / count,
        avg_iterations: total_iterations as f64 / count,
        max_iterations,
        verified,
    })
}

/// Reduced, unimodular, and consistent with the input
fn verify(original: &Matrix<BigInt>, m: &Matrix<BigInt>, u: &Matrix<BigInt>) -> bool {
    is_lagrange_reduced(m) && determinant(u).abs().is_one() && &original.mul(u) == m
}

fn export_results(path: &PathBuf, results: &[LagrangeBenchResult]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "bits,precision,trials,avg_us,avg_iterations,max_iterations,verified")?;

    for r in results {
        writeln!(
            file,
            "{},{},{},{:.6},{:.6},{},{}",
            r.bits, r.precision, r.trials, r.avg_us, r.avg_iterations, r.max_iterations, r.verified
        )?;
    }

    Ok(())
}
