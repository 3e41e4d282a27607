//! Source liveness: how recently each source has been heard from.
//!
//! Liveness is never stored. It is recomputed from the history buffer and
//! the current time whenever it is displayed, because a source goes stale
//! without any packet arriving.

use std::time::Duration;

use sentinel_types::{LinkStatus, Packet, Source};

use super::history::PacketHistory;
use super::HealthStatus;

/// Staleness thresholds for link classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    /// Latest packet younger than this: connected.
    pub connected_within: Duration,
    /// Latest packet younger than this (but not connected): intermittent.
    /// Anything older is disconnected.
    pub intermittent_within: Duration,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            connected_within: Duration::from_secs(12),
            intermittent_within: Duration::from_secs(25),
        }
    }
}

impl Thresholds {
    /// Classify a source from the age of its latest packet.
    pub fn classify(&self, age: Option<Duration>) -> LinkStatus {
        match age {
            None => LinkStatus::Disconnected,
            Some(age) if age < self.connected_within => LinkStatus::Connected,
            Some(age) if age < self.intermittent_within => LinkStatus::Intermittent,
            Some(_) => LinkStatus::Disconnected,
        }
    }
}

/// Liveness of one source at a point in time.
#[derive(Debug, Clone)]
pub struct SourceLiveness<'a> {
    pub source: Source,
    pub status: LinkStatus,
    /// Age of the latest buffered packet, if any.
    pub age: Option<Duration>,
    pub latest: Option<&'a Packet>,
    /// Packets from this source currently in the buffer.
    pub buffered: usize,
}

/// Classify every known source as of `now_ms`.
pub fn source_liveness<'a>(
    history: &'a PacketHistory,
    now_ms: u64,
    thresholds: &Thresholds,
) -> Vec<SourceLiveness<'a>> {
    Source::ALL
        .iter()
        .map(|&source| {
            let latest = history.latest(source);
            let age = latest.map(|p| Duration::from_millis(p.age_ms(now_ms)));
            SourceLiveness {
                source,
                status: thresholds.classify(age),
                age,
                latest,
                buffered: history.count_from(source),
            }
        })
        .collect()
}

/// Map a link status onto the dashboard's health scale.
pub fn link_health(status: LinkStatus) -> HealthStatus {
    match status {
        LinkStatus::Connected => HealthStatus::Healthy,
        LinkStatus::Intermittent => HealthStatus::Warning,
        LinkStatus::Disconnected => HealthStatus::Critical,
    }
}
