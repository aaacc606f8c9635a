//! Demo and tier timing for fixed-size matrix multiplication.

use std::hint::black_box;
use std::time::Instant;

use fixed_matrix::{Matrix, Product, Promote, Tier, UNROLL_BOUND, mul, mul_via, tier_of};
use num_traits::AsPrimitive;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt, prelude::*};

/// Logs to stdout, honoring `RUST_LOG` (default `info`).
fn init_subscriber() {
    let fmt_layer = fmt::layer().with_target(true);

    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

fn main() {
    init_subscriber();

    demo();

    println!("=== Tier Timing (UNROLL_BOUND = {}) ===\n", UNROLL_BOUND);

    let iterations = 200_000;
    let all_results = vec![
        bench_shape::<2, 2, 2>(iterations),
        bench_shape::<3, 3, 3>(iterations),
        bench_shape::<4, 4, 4>(iterations),
        bench_shape::<16, 3, 16>(iterations / 10),
        bench_shape::<12, 12, 12>(iterations / 10),
    ];

    print_summary_table(&all_results);
}

fn demo() {
    println!("=== Fixed-Size Matrices ===\n");

    // Every element set from one value.
    let all_pi: Matrix<f64, 3, 8> = Matrix::filled(3.141592658979323);
    println!("all_pi (3x8):\n{all_pi}");

    let all_prime: Matrix<u8, 2, 6> = Matrix::from([[2, 3, 5, 7, 11, 13], [17, 19, 23, 29, 31, 37]]);
    let also_all_prime = all_prime.clone();
    let also_all_prime_but_doubles: Matrix<f64, 2, 6> = Matrix::from_matrix(&all_prime);
    println!("all_prime (2x6):\n{also_all_prime}");
    println!("as doubles:\n{also_all_prime_but_doubles}");

    let a: Matrix<i32, 2, 2> = Matrix::from([[1, 2], [3, 4]]);
    let b: Matrix<i32, 2, 2> = Matrix::from([[5, 6], [7, 8]]);
    let mut c: Matrix<i32, 2, 2> = Matrix::zeros();
    mul(&a, &b, &mut c);
    println!("[[1,2],[3,4]] * [[5,6],[7,8]] ({}):\n{c}", tier_of::<2, 2, 2>());
}

/// Times every tier on one `R x K * K x C` shape.
///
/// Returns the shape label and, per requested tier, the tier that actually ran
/// with its average time (ns) and GFLOPS.
fn bench_shape<const R: usize, const K: usize, const C: usize>(
    iterations: usize,
) -> (String, Vec<(Tier, (f64, f64))>) {
    let label = format!("{}x{}x{}", R, K, C);
    println!("Shape: {} (natural tier: {})", label, tier_of::<R, K, C>());
    println!("{}", "-".repeat(50));

    let a: Matrix<f64, R, K> = Matrix::from_rows([(0..R * K).map(|i| (i % 10) as f64)]);
    let b: Matrix<f64, K, C> = Matrix::from_rows([(0..K * C).map(|i| (i % 10) as f64)]);

    let mut results = Vec::new();
    for tier in Tier::ALL {
        results.push(bench_tier(tier, &a, &b, iterations));
    }

    let baseline_time = results[results.len() - 1].1.0;
    for (i, (requested, (ran, (time_ns, gflops)))) in Tier::ALL.iter().zip(&results).enumerate() {
        let speedup = baseline_time / time_ns;
        println!(
            "{}. {:24} {:8.2} ns  {:6.2} GFLOPS  ({:.1}×)",
            i + 1,
            format!("{} -> {}", requested, ran),
            time_ns,
            gflops,
            speedup
        );
    }
    println!();

    (label, results)
}

/// Benchmark one tier through `mul_via`
fn bench_tier<T, const R: usize, const K: usize, const C: usize>(
    tier: Tier,
    a: &Matrix<T, R, K>,
    b: &Matrix<T, K, C>,
    iterations: usize,
) -> (Tier, (f64, f64))
where
    T: Promote<T>,
    Product<T, T>: AsPrimitive<T>,
{
    // Warmup
    let mut c: Matrix<T, R, C> = Matrix::zeros();
    let ran = mul_via(tier, a, b, &mut c);

    // Timed runs
    let start = Instant::now();
    for _ in 0..iterations {
        mul_via(tier, black_box(a), black_box(b), black_box(&mut c));
    }
    let total = start.elapsed().as_secs_f64();

    let avg = total / iterations as f64;
    let gflops = 2.0 * (R * K * C) as f64 / avg / 1e9;
    (ran, (avg * 1e9, gflops))
}

#[allow(clippy::type_complexity)]
fn print_summary_table(all_results: &[(String, Vec<(Tier, (f64, f64))>)]) {
    println!("\n{}", "=".repeat(72));
    println!("SUMMARY");
    println!("{}", "=".repeat(72));

    print!("\n{:<14}", "Shape");
    for tier in Tier::ALL {
        print!(" {:>17}", tier.name());
    }
    println!();
    println!("{}", "-".repeat(72));

    for (label, results) in all_results {
        print!("{:<14}", label);
        for (requested, (ran, (time_ns, _))) in Tier::ALL.iter().zip(results) {
            let marker = if ran == requested { ' ' } else { '*' };
            print!(" {:>13.1} ns{}", time_ns, marker);
        }
        println!();
    }

    println!("{}", "=".repeat(72));
    println!("\nAverage time per multiply. Lower is better.");
    println!("* = no generated code for this shape, fell back to a more generic tier.\n");
}
