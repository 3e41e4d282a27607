//! Packet synthesis.

use std::ops::Range;
use std::time::Duration;

use rand::Rng;
use sentinel_types::{current_timestamp_ms, Packet, PacketStatus, Source};

/// Station labels packets are attributed to.
pub const DEFAULT_LOCATIONS: [&str; 5] = [
    "Everest Base",
    "Kathmandu Valley",
    "Lhasa Plateau",
    "Annapurna Circuit",
    "MHT Front",
];

/// Seismic events strictly above this magnitude are flagged `WARNING`.
pub const SEISMIC_WARNING_MAGNITUDE: f64 = 4.5;

const CONVERGENCE_MM_YR: Range<f64> = 38.0..40.0;
const MAGNITUDE: Range<f64> = 1.0..5.0;
const AMBIENT_C: Range<f64> = -5.0..5.0;
const DEFORMATION_MM: Range<f64> = 0.0..5.0;

/// Builds synthetic packets.
///
/// Each packet picks a source and a location uniformly at random and
/// synthesizes a source-specific reading. The structured `reading` is the
/// displayed number, rounded to the displayed precision, so consumers that
/// parse `value` and consumers that read `reading` agree.
///
/// Timestamps never go backwards, even if the wall clock does.
#[derive(Debug)]
pub struct PacketGenerator<R> {
    rng: R,
    locations: Vec<String>,
    last_timestamp_ms: u64,
}

impl<R: Rng> PacketGenerator<R> {
    /// Create a generator over the default station list.
    pub fn new(rng: R) -> Self {
        Self::with_locations(rng, DEFAULT_LOCATIONS.iter().map(|l| l.to_string()).collect())
    }

    /// Create a generator over a custom station list.
    ///
    /// An empty list produces packets without a location.
    pub fn with_locations(rng: R, locations: Vec<String>) -> Self {
        Self {
            rng,
            locations,
            last_timestamp_ms: 0,
        }
    }

    /// Build the next packet, stamped with the current wall-clock time.
    pub fn next_packet(&mut self) -> Packet {
        self.packet_at(current_timestamp_ms())
    }

    /// Build the next packet as if captured at `now_ms`.
    pub fn packet_at(&mut self, now_ms: u64) -> Packet {
        let timestamp_ms = now_ms.max(self.last_timestamp_ms);
        self.last_timestamp_ms = timestamp_ms;

        let source = Source::ALL[self.rng.gen_range(0..Source::ALL.len())];
        let location = if self.locations.is_empty() {
            None
        } else {
            let index = self.rng.gen_range(0..self.locations.len());
            Some(self.locations[index].clone())
        };

        let (value, reading, status) = match source {
            Source::Gnss => {
                let rate = round_to(self.rng.gen_range(CONVERGENCE_MM_YR), 2);
                (format!("Convergence: {:.2}mm/yr", rate), rate, PacketStatus::Success)
            }
            Source::Seismic => {
                let magnitude = round_to(self.rng.gen_range(MAGNITUDE), 1);
                let status = if magnitude > SEISMIC_WARNING_MAGNITUDE {
                    PacketStatus::Warning
                } else {
                    PacketStatus::Success
                };
                (format!("Event: Mag {:.1}", magnitude), magnitude, status)
            }
            Source::Climate => {
                let temp = round_to(self.rng.gen_range(AMBIENT_C), 1);
                (format!("Ambient: {:.1}°C", temp), temp, PacketStatus::Success)
            }
            Source::Insar => {
                let deformation = round_to(self.rng.gen_range(DEFORMATION_MM), 2);
                (format!("Deformation: {:.2}mm", deformation), deformation, PacketStatus::Success)
            }
        };

        let id = uuid::Builder::from_random_bytes(self.rng.gen()).into_uuid();

        let mut builder = Packet::builder(source)
            .id(id.to_string())
            .timestamp_ms(timestamp_ms)
            .value(value)
            .reading(reading)
            .status(status);
        if let Some(location) = location {
            builder = builder.location(location);
        }
        builder.build()
    }

    /// Draw the delay before the next emission, uniformly from `interval`.
    ///
    /// A degenerate range yields its start.
    pub fn next_delay(&mut self, interval: &Range<Duration>) -> Duration {
        let min = interval.start.as_millis() as u64;
        let max = interval.end.as_millis() as u64;
        if max <= min {
            return interval.start;
        }
        Duration::from_millis(self.rng.gen_range(min..max))
    }
}

/// Round to `places` decimals. `+ 0.0` folds -0.0 into 0.0.
fn round_to(x: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (x * scale).round() / scale + 0.0
}
