//! # sentinel-types
//!
//! Core types for the Himalayan Sentinel telemetry feed. This crate defines
//! the packets emitted by the feed generator and the metrics maintained by
//! the dashboard's aggregator, so that producers and consumers agree on a
//! single schema.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **Optional serialization**: Enable `serde` to ship packets as JSON lines
//! - **Closed vocabularies**: Sources, severities, trends and link states are enums
//!
//! ## Features
//!
//! - `std` (default): Standard library support (wall-clock timestamps)
//! - `serde`: JSON serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use sentinel_types::{Packet, PacketStatus, Source};
//!
//! let packet = Packet::builder(Source::Seismic)
//!     .id("evt-1")
//!     .timestamp_ms(1_703_160_000_000)
//!     .value("Event: Mag 4.7")
//!     .reading(4.7)
//!     .location("MHT Front")
//!     .status(PacketStatus::Warning)
//!     .build();
//!
//! assert_eq!(packet.source.as_str(), "SEISMIC");
//! assert!(packet.status.is_alarming());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod link;
mod metric;
mod packet;

pub use link::*;
pub use metric::*;
pub use packet::*;

/// Get current timestamp in milliseconds since Unix epoch.
#[cfg(feature = "std")]
pub fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
