use criterion::{black_box, criterion_group, criterion_main, Criterion};
use winporep_core::xor::xor_into;

fn xor_benchmark(c: &mut Criterion) {
    let a = [1u8; 32];
    let b = [2u8; 32];

    c.bench_function("xor two 32-byte labels into a node", |bch| {
        let mut dst = [0u8; 32];
        bch.iter(|| xor_into(black_box(&mut dst), black_box(&[&a, &b])))
    });
}

criterion_group!(benches, xor_benchmark);
criterion_main!(benches);
