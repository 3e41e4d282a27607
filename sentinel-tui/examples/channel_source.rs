//! Example: Driving the aggregator from the local feed
//!
//! This example runs the synthetic generator without a terminal UI: packets
//! flow through a [`ChannelSource`] into an [`Aggregator`], and the current
//! link status and metrics are printed as they change.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example channel_source
//! ```

use std::time::Duration;

use sentinel_tui::{Aggregator, ChannelSource, FeedControl, PacketSource, Thresholds};
use sentinel_types::current_timestamp_ms;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("Channel source example");
    println!("Generating synthetic telemetry (fast interval, seed 7)...\n");

    let (tx, mut source) = ChannelSource::create("local generator");
    let interval = Duration::from_millis(200)..Duration::from_millis(600);
    let mut control = FeedControl::new(interval, Some(7), tx, tokio::runtime::Handle::current());
    control.resume()?;

    let mut aggregator = Aggregator::default();
    let thresholds = Thresholds::default();

    for _ in 0..20 {
        tokio::time::sleep(Duration::from_millis(500)).await;

        for packet in source.poll() {
            println!(
                "[{}] {:<8} {:<10} {}",
                packet.status,
                packet.source,
                packet.location.as_deref().unwrap_or("-"),
                packet.value
            );
            aggregator.on_packet(packet);
        }
    }

    control.pause();

    println!("\nLinks:");
    for link in aggregator.source_liveness(current_timestamp_ms(), &thresholds) {
        println!("  {:<8} {} ({} buffered)", link.source, link.status, link.buffered);
    }

    println!("\nMetrics:");
    for metric in aggregator.metrics() {
        println!(
            "  {:<18} {:>14} {:<6} {} {:.1}%",
            metric.label,
            metric.value.to_string(),
            metric.unit,
            metric.trend.arrow(),
            metric.confidence
        );
    }

    for alert in aggregator.alerts() {
        println!("\nALERT {}: {}", alert.kind.as_str(), alert.description);
    }

    Ok(())
}
