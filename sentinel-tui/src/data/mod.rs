//! Data models and processing for the telemetry stream.
//!
//! This module turns the raw packet stream into what the dashboard shows:
//! a bounded history, a folded metric set, per-source link status and
//! derived alerts.
//!
//! ## Submodules
//!
//! - [`aggregator`]: The [`Aggregator`] that owns session state and applies packets
//! - [`alerts`]: Hazard alerts derived from the metric set
//! - [`duration`]: Parsing and formatting of duration strings (e.g., "12s", "500ms")
//! - [`fold`]: The metric fold table ([`FoldRule`]) and reading parsers
//! - [`history`]: The newest-first [`PacketHistory`] buffer
//! - [`liveness`]: Staleness [`Thresholds`] and per-source link classification
//!
//! ## Data Flow
//!
//! ```text
//! Packet (from a PacketSource)
//!        │
//!        ▼
//! Aggregator::on_packet()
//!        │
//!        ├──▶ PacketHistory::push()   (bounded, newest first)
//!        │
//!        └──▶ fold()                  (metric set, via FoldRule table)
//!
//! on every redraw:
//!   source_liveness(history, now)  ──▶ LinkStatus per source
//!   derive_alerts(metrics)         ──▶ HazardAlert list
//! ```

pub mod aggregator;
pub mod alerts;
pub mod duration;
pub mod fold;
pub mod history;
pub mod liveness;

pub use aggregator::Aggregator;
pub use alerts::{derive_alerts, AlertKind, HazardAlert};
pub use fold::{default_rules, fold, FoldRule, ReadingError};
pub use history::{PacketHistory, DEFAULT_HISTORY_SIZE};
pub use liveness::{link_health, source_liveness, SourceLiveness, Thresholds};

/// Health scale used for styling and the overall dashboard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

impl HealthStatus {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "OK",
            HealthStatus::Warning => "WARN",
            HealthStatus::Critical => "CRIT",
        }
    }
}
