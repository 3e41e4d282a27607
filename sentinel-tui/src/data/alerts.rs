//! Hazard alerts derived from the metric set.

use sentinel_types::{labels, Metric};

use super::HealthStatus;

/// Locked-segment share (%) above which slip deficit is flagged.
pub const LOCKED_SEGMENT_LIMIT: f64 = 60.0;

/// Category of a hazard alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    LockedSegment,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::LockedSegment => "LOCKED_SEGMENT",
        }
    }
}

/// An alert shown above the dashboard while its condition holds.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardAlert {
    pub kind: AlertKind,
    pub severity: HealthStatus,
    pub description: &'static str,
}

/// Alerts whose conditions currently hold.
pub fn derive_alerts(metrics: &[Metric]) -> Vec<HazardAlert> {
    let mut alerts = Vec::new();

    let locked = metrics
        .iter()
        .find(|m| m.label == labels::LOCKED_SEGMENTS)
        .and_then(|m| m.value.as_f64());
    if locked.is_some_and(|share| share > LOCKED_SEGMENT_LIMIT) {
        alerts.push(HazardAlert {
            kind: AlertKind::LockedSegment,
            severity: HealthStatus::Critical,
            description: "Locked segment > 60% detected. Slip deficit accelerating at MHT front.",
        });
    }

    alerts
}
