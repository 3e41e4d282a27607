//! The telemetry aggregator: history buffer plus metric fold.

use std::time::Instant;

use sentinel_types::{Metric, Packet};

use super::alerts::{derive_alerts, HazardAlert};
use super::fold::{default_rules, fold, FoldRule};
use super::history::PacketHistory;
use super::liveness::{source_liveness, SourceLiveness, Thresholds};

/// Consumes packets one at a time and owns the dashboard's session state.
///
/// Each packet is applied completely before the next: it is prepended to
/// the bounded history and folded into the metric set. Readers get shared
/// references only.
#[derive(Debug, Clone)]
pub struct Aggregator {
    history: PacketHistory,
    metrics: Vec<Metric>,
    rules: Vec<FoldRule>,
    received: u64,
    last_received: Option<Instant>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(PacketHistory::default(), Metric::seed_set())
    }
}

impl Aggregator {
    /// Create an aggregator with the default fold rules.
    pub fn new(history: PacketHistory, metrics: Vec<Metric>) -> Self {
        Self::with_rules(history, metrics, default_rules())
    }

    /// Create an aggregator with a custom fold table.
    pub fn with_rules(history: PacketHistory, metrics: Vec<Metric>, rules: Vec<FoldRule>) -> Self {
        Self {
            history,
            metrics,
            rules,
            received: 0,
            last_received: None,
        }
    }

    /// Apply one packet.
    pub fn on_packet(&mut self, packet: Packet) {
        let metrics = fold(&self.metrics, &packet, &self.rules);
        self.history.push(packet);
        self.metrics = metrics;
        self.received += 1;
        self.last_received = Some(Instant::now());
    }

    pub fn history(&self) -> &PacketHistory {
        &self.history
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Per-source link status as of `now_ms`.
    pub fn source_liveness(&self, now_ms: u64, thresholds: &Thresholds) -> Vec<SourceLiveness<'_>> {
        source_liveness(&self.history, now_ms, thresholds)
    }

    /// Alerts raised by the current metric set.
    pub fn alerts(&self) -> Vec<HazardAlert> {
        derive_alerts(&self.metrics)
    }

    /// Packets applied since the session started, including evicted ones.
    pub fn received(&self) -> u64 {
        self.received
    }

    /// When the last packet was applied.
    pub fn last_received(&self) -> Option<Instant> {
        self.last_received
    }
}
