//! Lagrange CLI
//!
//! Exact Lagrange reduction of rank ≤ 2 lattice blocks.
//!
//! # Usage
//! ```bash
//! # Reduce a 2×2 basis given by rows
//! lagrange reduce --basis "10,7;7,5" --precision 128 --rounding nearest
//!
//! # Extended GCD
//! lagrange xgcd 240 46
//!
//! # Scaling benchmark on skewed random bases
//! lagrange bench --max-bits 512 --trials 200 --export results.csv
//! ```

mod bench;

use clap::{Parser, Subcommand};
use lagrange_core::lattice::basis::exact_precision;
use lagrange_core::{
    xgcd, ComputationContext, FloatContext, Lagrange, LatticeReduction, LatticeReductionParams,
    Matrix, Outcome, ProfileMonitor, ReductionError, RoundingMode, DEFAULT_RHF,
};
use num_bigint::BigInt;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lagrange")]
#[command(about = "Exact Lagrange reduction of rank ≤ 2 lattice blocks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reduce a 1×1 or 2×2 basis (vectors are columns)
    Reduce {
        /// Rows separated by ';', entries by ',' (e.g. "10,7;7,5")
        #[arg(long)]
        basis: String,

        /// Working precision in bits [default: exact for the input entries]
        #[arg(long)]
        precision: Option<u32>,

        /// Rounding mode: nearest, zero, up, down, away
        #[arg(long, default_value = "nearest")]
        rounding: RoundingMode,

        /// Root-Hermite-factor target (reported only)
        #[arg(long, default_value_t = DEFAULT_RHF)]
        rhf: f64,
    },

    /// Extended GCD: g = x·a + y·b
    #[command(allow_negative_numbers = true)]
    Xgcd { a: BigInt, b: BigInt },

    /// Benchmark reduction of skewed random bases
    Bench {
        /// Largest entry size in bits
        #[arg(long, default_value = "512")]
        max_bits: u64,

        /// Bases per size
        #[arg(long, default_value = "200")]
        trials: usize,

        /// Seed for the basis generator
        #[arg(long, default_value = "1")]
        seed: u64,

        /// Export results to CSV
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Reduce {
            basis,
            precision,
            rounding,
            rhf,
        } => run_reduce(&basis, precision, rounding, rhf),
        Commands::Xgcd { a, b } => {
            run_xgcd(&a, &b);
            Ok(())
        }
        Commands::Bench {
            max_bits,
            trials,
            seed,
            export,
        } => bench::run_lagrange_benchmark(max_bits, trials, seed, export),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Float context for reducing `basis`. Without an explicit precision, use
/// one wide enough that every length comparison is exact.
fn reduction_context(
    basis: &Matrix<BigInt>,
    precision: Option<u32>,
    rounding: RoundingMode,
) -> Result<ComputationContext, ReductionError> {
    let exact = exact_precision(basis);
    let precision = match precision {
        Some(p) => {
            if p < exact {
                log::warn!(
                    "precision {} is below the {} bits these entries need; the reduction may abort",
                    p,
                    exact
                );
            }
            p
        }
        None => exact,
    };
    Ok(ComputationContext::new(FloatContext::new(precision, rounding)?))
}

fn run_reduce(text: &str, precision: Option<u32>, rounding: RoundingMode, rhf: f64) -> Result<(), Box<dyn Error>> {
    let mut basis = Matrix::parse_rows(text)?;
    let n = basis.rows();
    if !basis.is_square() || n > 2 {
        return Err(format!("expected a 1×1 or 2×2 basis, got {}×{}", n, basis.cols()).into());
    }

    let cc = reduction_context(&basis, precision, rounding)?;
    let mut transform = Matrix::identity(n);
    let mut monitor = ProfileMonitor::new(n);

    println!("Input basis (columns are vectors):");
    print!("{}", basis);
    println!("Float context: {}", cc.float);
    println!();

    let (outcome, stats) = {
        let params = LatticeReductionParams::new(&mut basis, &mut transform, &mut monitor).with_rhf(rhf);
        let mut lagrange = Lagrange::new(params, &cc)?;
        let outcome = lagrange.solve();
        (outcome, lagrange.stats().clone())
    };

    println!("Outcome: {:?}", outcome);
    if let Outcome::Degenerate(kind) = &outcome {
        println!("Lattice rank: {}", kind.rank());
    }
    println!();
    println!("Reduced basis:");
    print!("{}", basis);
    println!("Transform:");
    print!("{}", transform);

    let profile: Vec<String> = monitor.profile().iter().map(|x| format!("{:.6}", x)).collect();
    println!("Profile (log2): [{}]", profile.join(", "));
    println!();
    println!(
        "{} iterations, {} swaps, {:.3} ms, log2|det| = {:.6}, length bound log2 = {:.6}",
        stats.iterations,
        stats.swaps,
        stats.total_time * 1000.0,
        stats.det_log2,
        stats.length_bound_log2
    );

    Ok(())
}

fn run_xgcd(a: &BigInt, b: &BigInt) {
    let r = xgcd(a, b);
    println!("g = {}", r.gcd);
    println!("x = {}", r.x);
    println!("y = {}", r.y);
    println!("{}·{} + {}·{} = {}", r.x, a, r.y, b, r.gcd);
}
