use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fixed_matrix::{Matrix, Tier, mul_via, tier_of};

#[inline]
fn next_u64(state: &mut u64) -> u64 {
    let mut x = *state;
    x ^= x >> 12;
    x ^= x << 25;
    x ^= x >> 27;
    *state = x;
    x.wrapping_mul(0x2545_F491_4F6C_DD1D)
}

fn make_matrix<const ROWS: usize, const COLS: usize>(seed: u64) -> Matrix<f64, ROWS, COLS> {
    let mut state = seed;
    let mut m = Matrix::zeros();
    for x in m.as_mut_slice() {
        *x = (next_u64(&mut state) & 0xFF) as f64 / 255.0;
    }
    m
}

/// One group per shape, one benchmark per requested tier. Tiers that fall
/// back are still measured so the groups stay comparable.
fn bench_shape<const R: usize, const K: usize, const C: usize>(c: &mut Criterion) {
    let label = format!("{}x{}x{}", R, K, C);
    let mut group = c.benchmark_group(format!("mul_{label}"));
    group.throughput(Throughput::Elements((R * K * C) as u64));

    let a: Matrix<f64, R, K> = make_matrix(0xC0FF_EE42_1234_5678u64 ^ R as u64);
    let b: Matrix<f64, K, C> = make_matrix(0xBADC_0FFE_EE11_D00Du64 ^ (C as u64).rotate_left(17));
    let mut out: Matrix<f64, R, C> = Matrix::zeros();

    for tier in Tier::ALL {
        let ran = tier.or_fallback(tier_of::<R, K, C>());
        group.bench_function(BenchmarkId::new(tier.name(), ran.name()), |bench| {
            bench.iter(|| {
                mul_via(tier, black_box(&a), black_box(&b), black_box(&mut out));
                black_box(out[0]);
            });
        });
    }
    group.finish();
}

fn bench_mul(c: &mut Criterion) {
    bench_shape::<2, 2, 2>(c);
    bench_shape::<3, 3, 3>(c);
    bench_shape::<4, 4, 4>(c);
    bench_shape::<3, 4, 5>(c);
    bench_shape::<16, 2, 16>(c);
    bench_shape::<32, 4, 32>(c);
    bench_shape::<8, 8, 8>(c);
    bench_shape::<16, 16, 16>(c);
}

criterion_group!(benches, bench_mul);
criterion_main!(benches);
