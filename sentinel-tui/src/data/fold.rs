//! Metric fold: folding packets into the dashboard's metric set.
//!
//! The fold is a pure function of the current metrics and one packet. Each
//! [`FoldRule`] pairs a predicate over (packet, metric) with a transform;
//! for every metric the first matching rule applies and all other metrics
//! pass through unchanged.

use sentinel_types::{labels, Metric, MetricValue, Packet, PacketStatus, Source, Trend};
use thiserror::Error;

/// Convergence readings above this rate (mm/yr) trend up, others down.
pub const CONVERGENCE_BASELINE: f64 = 38.4;

/// Confidence lost by the model for every seismic warning.
pub const CONFIDENCE_PENALTY: f64 = 0.5;

/// Why a reading could not be taken from a packet.
#[derive(Debug, Error, PartialEq)]
pub enum ReadingError {
    #[error("value {0:?} does not match \"Convergence: <rate>mm/yr\"")]
    UnexpectedFormat(String),
    #[error("value {value:?} has an unparsable number")]
    InvalidNumber {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("reading {0} is not finite")]
    NotFinite(f64),
}

/// One row of the fold table.
#[derive(Clone, Copy)]
pub struct FoldRule {
    /// Short name for logs.
    pub name: &'static str,
    /// Whether this rule handles `metric` for `packet`.
    pub applies: fn(&Packet, &Metric) -> bool,
    /// The updated metric, or `None` to leave it unchanged.
    pub apply: fn(&Packet, &Metric) -> Option<Metric>,
}

impl std::fmt::Debug for FoldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FoldRule").field("name", &self.name).finish()
    }
}

/// The rules the dashboard runs by default.
pub fn default_rules() -> Vec<FoldRule> {
    vec![
        FoldRule {
            name: "gnss-convergence",
            applies: |packet, metric| {
                packet.source == Source::Gnss && metric.label == labels::CONVERGENCE
            },
            apply: update_convergence,
        },
        FoldRule {
            name: "seismic-confidence",
            applies: |packet, metric| {
                packet.source == Source::Seismic
                    && packet.status == PacketStatus::Warning
                    && metric.label == labels::MODEL_CONFIDENCE
            },
            apply: |_, metric| {
                Some(Metric {
                    confidence: (metric.confidence - CONFIDENCE_PENALTY).max(0.0),
                    ..metric.clone()
                })
            },
        },
    ]
}

/// Fold `packet` into `metrics`, producing the new metric set.
pub fn fold(metrics: &[Metric], packet: &Packet, rules: &[FoldRule]) -> Vec<Metric> {
    metrics
        .iter()
        .map(|metric| {
            rules
                .iter()
                .find(|rule| (rule.applies)(packet, metric))
                .and_then(|rule| (rule.apply)(packet, metric))
                .unwrap_or_else(|| metric.clone())
        })
        .collect()
}

fn update_convergence(packet: &Packet, metric: &Metric) -> Option<Metric> {
    let rate = match convergence_reading(packet) {
        Ok(rate) => rate,
        Err(e) => {
            tracing::warn!(packet = %packet.id, error = %e, "skipping convergence update");
            return None;
        }
    };

    Some(Metric {
        value: MetricValue::Number(rate),
        trend: if rate > CONVERGENCE_BASELINE {
            Trend::Up
        } else {
            Trend::Down
        },
        ..metric.clone()
    })
}

/// The convergence rate carried by a GNSS packet.
///
/// Prefers the structured reading and falls back to the display string.
pub fn convergence_reading(packet: &Packet) -> Result<f64, ReadingError> {
    match packet.reading {
        Some(rate) if rate.is_finite() => Ok(rate),
        Some(rate) => Err(ReadingError::NotFinite(rate)),
        None => parse_convergence(&packet.value),
    }
}

/// Parse `"Convergence: 38.42mm/yr"` into `38.42`.
pub fn parse_convergence(value: &str) -> Result<f64, ReadingError> {
    let number = value
        .strip_prefix("Convergence:")
        .and_then(|rest| rest.strip_suffix("mm/yr"))
        .ok_or_else(|| ReadingError::UnexpectedFormat(value.to_string()))?;

    let rate: f64 = number.trim().parse().map_err(|source| ReadingError::InvalidNumber {
        value: value.to_string(),
        source,
    })?;

    if rate.is_finite() {
        Ok(rate)
    } else {
        Err(ReadingError::NotFinite(rate))
    }
}
