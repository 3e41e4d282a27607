//! # sentinel-feed
//!
//! Synthetic telemetry feed for the Himalayan Sentinel dashboard.
//!
//! The feed stands in for a network of field stations: at randomized
//! intervals it emits one [`Packet`] from one of the known sources (GNSS,
//! seismic, climate, InSAR), with a source-specific reading and severity.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sentinel_feed::Feed;
//!
//! #[tokio::main]
//! async fn main() {
//!     let feed = Feed::builder().seed(7).build().expect("valid feed settings");
//!
//!     // Deliver packets through a channel
//!     let (handle, mut packets) = feed.start_channel();
//!
//!     while let Some(packet) = packets.recv().await {
//!         println!("{} {}", packet.source, packet.value);
//!         # break;
//!     }
//!
//!     // No packet is delivered once stop() returns
//!     handle.stop();
//! }
//! ```
//!
//! ## Pieces
//!
//! - [`PacketGenerator`]: pure packet synthesis driven by any `rand::Rng`
//! - [`Feed`]: timed emission on the tokio runtime, stopped through a [`FeedHandle`]
//! - [`serve`]: broadcast the feed to TCP clients as newline-delimited JSON

mod error;
mod feed;
mod generator;
mod handle;
mod serve;

pub use error::FeedError;
pub use feed::{Feed, FeedBuilder, DEFAULT_INTERVAL};
pub use generator::{PacketGenerator, DEFAULT_LOCATIONS, SEISMIC_WARNING_MAGNITUDE};
pub use handle::FeedHandle;
pub use serve::serve;

// Re-export types for convenience
pub use sentinel_types::{Packet, PacketStatus, Source};
