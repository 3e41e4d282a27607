use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sentinel_feed::PacketGenerator;

/// Benchmark building a single packet (hot path of every tick)
fn bench_packet_at(c: &mut Criterion) {
    let mut generator = PacketGenerator::new(StdRng::seed_from_u64(1));
    let mut now = 0u64;

    c.bench_function("packet_at", |b| {
        b.iter(|| {
            now += 1;
            black_box(generator.packet_at(black_box(now)));
        });
    });
}

/// Benchmark packet construction plus JSON encoding, as done by `serve`
fn bench_packet_to_json(c: &mut Criterion) {
    let mut generator = PacketGenerator::new(StdRng::seed_from_u64(2));

    c.bench_function("packet_to_json", |b| {
        b.iter(|| {
            let packet = generator.packet_at(black_box(1_703_160_000_000));
            black_box(serde_json::to_string(&packet).unwrap());
        });
    });
}

/// Benchmark generating bursts of packets of varying size
fn bench_bursts(c: &mut Criterion) {
    let mut group = c.benchmark_group("packet_bursts");

    for count in [10usize, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let mut generator = PacketGenerator::new(StdRng::seed_from_u64(3));
            b.iter(|| {
                for i in 0..count {
                    black_box(generator.packet_at(i as u64));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_packet_at, bench_packet_to_json, bench_bursts);
criterion_main!(benches);
