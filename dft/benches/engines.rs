//! Sequential vs. parallel transform engines with divan.

use {
    fourier_dft::{iterative, parallel, recursive, Complex64},
    fourier_parallel::FixedThreadsParallelizer,
};

fn main() {
    // Initialize Rayon thread pool
    rayon::ThreadPoolBuilder::new().build_global().unwrap();

    divan::main();
}

const LEN: usize = 1 << 16;

fn signal() -> Vec<Complex64> {
    (0..LEN)
        .map(|i| Complex64::new((i % 1000) as f64 - 500.0, ((i * 7) % 1000) as f64 - 500.0))
        .collect()
}

#[divan::bench]
fn recursive_sequential(bencher: divan::Bencher) {
    let x = signal();
    bencher.bench_local(|| {
        let mut out = vec![Complex64::new(0.0, 0.0); LEN];
        recursive::dft_into(divan::black_box(&x), &mut out).unwrap();
        out
    });
}

#[divan::bench]
fn iterative_sequential(bencher: divan::Bencher) {
    let x = signal();
    bencher.bench_local(|| {
        let mut out = vec![Complex64::new(0.0, 0.0); LEN];
        iterative::dft_into(divan::black_box(&x), &mut out).unwrap();
        out
    });
}

#[divan::bench]
fn recursive_fixed_pool(bencher: divan::Bencher) {
    let x = signal();
    let pool = FixedThreadsParallelizer::default();
    bencher.bench_local(|| {
        let mut out = vec![Complex64::new(0.0, 0.0); LEN];
        parallel::recursive::dft_into(divan::black_box(&x), &mut out, &pool).unwrap();
        out
    });
}

#[divan::bench]
fn iterative_fixed_pool(bencher: divan::Bencher) {
    let x = signal();
    let pool = FixedThreadsParallelizer::default();
    bencher.bench_local(|| {
        let mut out = vec![Complex64::new(0.0, 0.0); LEN];
        parallel::iterative::dft_into(divan::black_box(&x), &mut out, &pool).unwrap();
        out
    });
}
