use criterion::{black_box, criterion_group, criterion_main, Criterion};
use millpost_toolpath::peck_stops;

fn bench_peck_stops(c: &mut Criterion) {
    c.bench_function("peck_stops deep hole", |b| {
        b.iter(|| peck_stops(black_box(0.0), black_box(-120.0), black_box(0.5), black_box(6.0)))
    });

    c.bench_function("peck_stops shallow hole", |b| {
        b.iter(|| peck_stops(black_box(0.0), black_box(-0.4), black_box(1.0), black_box(3.0)))
    });
}

criterion_group!(benches, bench_peck_stops);
criterion_main!(benches);
