//! Packet - one simulated sensor reading.

use alloc::string::String;
use core::fmt;

/// Origin sensor category of a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Source {
    /// GNSS stations measuring plate convergence.
    Gnss,
    /// Seismometers reporting event magnitudes.
    Seismic,
    /// Weather stations reporting ambient temperature.
    Climate,
    /// Satellite radar interferometry reporting ground deformation.
    Insar,
}

impl Source {
    /// Every known source, in display order.
    pub const ALL: [Source; 4] = [Source::Gnss, Source::Seismic, Source::Climate, Source::Insar];

    /// Wire/display name of the source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Gnss => "GNSS",
            Source::Seismic => "SEISMIC",
            Source::Climate => "CLIMATE",
            Source::Insar => "INSAR",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Severity attached to a packet by its producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum PacketStatus {
    #[default]
    Success,
    Warning,
    /// Part of the vocabulary, never produced by the built-in generator.
    Error,
}

impl PacketStatus {
    /// Wire/display name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PacketStatus::Success => "SUCCESS",
            PacketStatus::Warning => "WARNING",
            PacketStatus::Error => "ERROR",
        }
    }

    /// Whether the packet should draw attention in the feed.
    pub fn is_alarming(&self) -> bool {
        !matches!(self, PacketStatus::Success)
    }
}

impl fmt::Display for PacketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A single telemetry reading.
///
/// Packets are immutable once built. `value` is the human readable payload
/// (e.g. `"Convergence: 38.42mm/yr"`); `reading` carries the same number in
/// structured form when the producer supplies it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Packet {
    /// Unique identifier assigned by the producer.
    pub id: String,

    /// Sensor category.
    pub source: Source,

    /// Capture time in milliseconds since Unix epoch.
    pub timestamp_ms: u64,

    /// Display payload.
    pub value: String,

    /// Structured numeric payload, if the producer provides one.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub reading: Option<f64>,

    /// Origin station label.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub location: Option<String>,

    /// Severity.
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: PacketStatus,
}

impl Packet {
    /// Create a builder for a packet from the given source.
    pub fn builder(source: Source) -> PacketBuilder {
        PacketBuilder::new(source)
    }

    /// Age of the packet relative to `now_ms`, saturating at zero for
    /// packets stamped in the future.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.timestamp_ms)
    }
}

/// Builder for `Packet`.
#[derive(Debug)]
pub struct PacketBuilder {
    id: String,
    source: Source,
    timestamp_ms: Option<u64>,
    value: String,
    reading: Option<f64>,
    location: Option<String>,
    status: PacketStatus,
}

impl PacketBuilder {
    /// Create a new builder.
    pub fn new(source: Source) -> Self {
        Self {
            id: String::new(),
            source,
            timestamp_ms: None,
            value: String::new(),
            reading: None,
            location: None,
            status: PacketStatus::Success,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set a specific timestamp (milliseconds since Unix epoch).
    pub fn timestamp_ms(mut self, ts: u64) -> Self {
        self.timestamp_ms = Some(ts);
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn reading(mut self, reading: f64) -> Self {
        self.reading = Some(reading);
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn status(mut self, status: PacketStatus) -> Self {
        self.status = status;
        self
    }

    /// Build the packet, stamping it with the current time if no timestamp was set.
    #[cfg(feature = "std")]
    pub fn build(self) -> Packet {
        let timestamp_ms = self.timestamp_ms.unwrap_or_else(crate::current_timestamp_ms);
        self.finish(timestamp_ms)
    }

    /// Build the packet with a specific timestamp (for no_std).
    #[cfg(not(feature = "std"))]
    pub fn build(self) -> Packet {
        let timestamp_ms = self.timestamp_ms.unwrap_or(0);
        self.finish(timestamp_ms)
    }

    fn finish(self, timestamp_ms: u64) -> Packet {
        Packet {
            id: self.id,
            source: self.source,
            timestamp_ms,
            value: self.value,
            reading: self.reading,
            location: self.location,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let packet = Packet::builder(Source::Climate).timestamp_ms(10).build();
        assert_eq!(packet.status, PacketStatus::Success);
        assert!(packet.reading.is_none());
        assert!(packet.location.is_none());
        assert_eq!(packet.timestamp_ms, 10);
    }

    #[test]
    fn test_age_saturates_for_future_packets() {
        let packet = Packet::builder(Source::Gnss).timestamp_ms(5_000).build();
        assert_eq!(packet.age_ms(12_000), 7_000);
        assert_eq!(packet.age_ms(1_000), 0);
    }

    #[test]
    fn test_source_order_matches_display_order() {
        let names: Vec<&str> = Source::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, ["GNSS", "SEISMIC", "CLIMATE", "INSAR"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_wire_names_are_uppercase() {
        let packet = Packet::builder(Source::Insar)
            .id("abc")
            .timestamp_ms(1703160000000)
            .value("Deformation: 1.25mm")
            .status(PacketStatus::Warning)
            .build();

        let json = serde_json::to_value(&packet).unwrap();
        assert_eq!(json["source"], "INSAR");
        assert_eq!(json["status"], "WARNING");
        assert!(json.get("reading").is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_missing_optional_fields_deserialize() {
        let line = r#"{"id":"x","source":"GNSS","timestamp_ms":1,"value":"Convergence: 39.00mm/yr"}"#;
        let packet: Packet = serde_json::from_str(line).unwrap();
        assert_eq!(packet.source, Source::Gnss);
        assert_eq!(packet.status, PacketStatus::Success);
        assert!(packet.reading.is_none());
    }
}
