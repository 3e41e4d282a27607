//! Dashboard metrics - named indicators folded from the packet stream.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

/// Direction a metric is moving in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

impl Trend {
    /// Returns a short arrow for display.
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
            Trend::Stable => "■",
        }
    }
}

/// The current value of a metric: either a number or a qualitative label.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// The numeric value, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            MetricValue::Text(_) => None,
        }
    }
}

impl From<f64> for MetricValue {
    fn from(n: f64) -> Self {
        MetricValue::Number(n)
    }
}

impl From<&str> for MetricValue {
    fn from(s: &str) -> Self {
        MetricValue::Text(s.into())
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{}", n),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

/// A named dashboard indicator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metric {
    /// Unique label within a dashboard.
    pub label: String,
    pub value: MetricValue,
    /// Unit suffix, empty for qualitative metrics.
    pub unit: String,
    pub trend: Trend,
    /// Confidence percentage in `0..=100`.
    pub confidence: f64,
}

impl Metric {
    /// Create a metric.
    pub fn new(
        label: impl Into<String>,
        value: impl Into<MetricValue>,
        unit: impl Into<String>,
        trend: Trend,
        confidence: f64,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            unit: unit.into(),
            trend,
            confidence,
        }
    }

    /// The tectonic indicator set a dashboard starts with.
    pub fn seed_set() -> Vec<Metric> {
        vec![
            Metric::new(labels::CONVERGENCE, 38.4, "mm/yr", Trend::Stable, 94.0),
            Metric::new("Exhumation", 2.1, "mm/yr", Trend::Up, 88.0),
            Metric::new("Shortening", 24.0, "%", Trend::Stable, 91.0),
            Metric::new("Strain Balance", "Over-thickened", "", Trend::Stable, 85.0),
            Metric::new(labels::LOCKED_SEGMENTS, 62.0, "%", Trend::Up, 96.0),
            Metric::new("Moho Depth", 75.0, "km", Trend::Stable, 82.0),
            Metric::new("Crustal Thickness", 82.0, "km", Trend::Stable, 84.0),
            Metric::new(labels::MODEL_CONFIDENCE, 92.5, "%", Trend::Stable, 99.0),
        ]
    }
}

/// Labels of metrics that feed rules and alerts refer to.
pub mod labels {
    pub const CONVERGENCE: &str = "Convergence";
    pub const LOCKED_SEGMENTS: &str = "Locked Segments";
    pub const MODEL_CONFIDENCE: &str = "Model Confidence";
}
