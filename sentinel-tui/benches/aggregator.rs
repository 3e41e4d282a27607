use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sentinel_tui::{Aggregator, Thresholds};
use sentinel_types::{Packet, PacketStatus, Source};

fn packets(count: usize) -> Vec<Packet> {
    (0..count)
        .map(|i| {
            let source = Source::ALL[i % Source::ALL.len()];
            let builder = Packet::builder(source)
                .id(format!("bench-{i}"))
                .timestamp_ms(1_703_160_000_000 + i as u64 * 1_000);
            let builder = match source {
                Source::Gnss => {
                    builder.value(format!("Convergence: {:.2}mm/yr", 38.0 + (i % 200) as f64 / 100.0))
                }
                Source::Seismic => builder
                    .value("Event: Mag 4.7")
                    .reading(4.7)
                    .status(PacketStatus::Warning),
                _ => builder.value("Deformation: 1.20mm").reading(1.2),
            };
            builder.build()
        })
        .collect()
}

/// Benchmark applying one packet: fold plus history insert
fn bench_on_packet(c: &mut Criterion) {
    let input = packets(1_000);

    c.bench_function("on_packet", |b| {
        let mut aggregator = Aggregator::default();
        let mut i = 0;
        b.iter(|| {
            aggregator.on_packet(black_box(input[i % input.len()].clone()));
            i += 1;
        });
    });
}

/// Benchmark the per-frame liveness scan over a full buffer
fn bench_source_liveness(c: &mut Criterion) {
    let mut aggregator = Aggregator::default();
    for packet in packets(50) {
        aggregator.on_packet(packet);
    }
    let thresholds = Thresholds::default();

    c.bench_function("source_liveness", |b| {
        b.iter(|| black_box(aggregator.source_liveness(black_box(1_703_160_060_000), &thresholds)));
    });
}

/// Benchmark applying bursts of packets of varying size
fn bench_bursts(c: &mut Criterion) {
    let mut group = c.benchmark_group("packet_bursts");

    for count in [10usize, 100, 1000].iter() {
        let input = packets(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| {
                let mut aggregator = Aggregator::default();
                for packet in input {
                    aggregator.on_packet(packet.clone());
                }
                black_box(aggregator.metrics().len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_on_packet, bench_source_liveness, bench_bursts);
criterion_main!(benches);
