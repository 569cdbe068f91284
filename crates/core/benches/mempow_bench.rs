//! Benchmark for MemoryPoW algorithm

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mempow_core::{
    DEFAULT_WORK_BUFFER_WORDS, MemoryPoW, Xoshiro256Plus, digest, fill_work_buffer, long_hash,
    seed_for_nonce,
};

fn bench_attempt(c: &mut Criterion) {
    let mut pow = MemoryPoW::new();
    let hash = digest(b"benchmark input data for testing MemoryPoW performance");

    c.bench_function("mempow_attempt", |b| {
        let mut nonce: u32 = 0;
        b.iter(|| {
            let result = pow.attempt(black_box(&hash), nonce);
            nonce = nonce.wrapping_add(1);
            result
        })
    });
}

fn bench_fill(c: &mut Criterion) {
    let words = long_hash(&digest(b"fill"));
    let mut buffer = vec![0u64; DEFAULT_WORK_BUFFER_WORDS];

    c.bench_function("mempow_fill_8mib", |b| {
        b.iter(|| {
            let mut rng = Xoshiro256Plus::from_long_hash(black_box(&words), seed_for_nonce(0));
            fill_work_buffer(&mut buffer, &mut rng);
        })
    });
}

fn bench_verify(c: &mut Criterion) {
    let mut pow = MemoryPoW::new();
    let hash = digest(&[0xaa, 0xbb, 0xcc]);

    c.bench_function("mempow_verify", |b| {
        b.iter(|| pow.verify(black_box(&hash), 8, black_box(326)))
    });
}

criterion_group!(benches, bench_attempt, bench_fill, bench_verify);
criterion_main!(benches);
