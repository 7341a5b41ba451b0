use criterion::{black_box, criterion_group, criterion_main, Criterion};
use winporep_porep::drg::Drg;

fn drg_benchmark(c: &mut Criterion) {
    c.bench_function("materialize last node of a 16384x2 drg", |bch| {
        bch.iter(|| {
            let mut drg = Drg::new(16384 * 2, 2, [3u8; 32]);
            black_box(drg.node(16384 * 2 - 1).to_vec())
        })
    });
}

criterion_group!(benches, drg_benchmark);
criterion_main!(benches);
