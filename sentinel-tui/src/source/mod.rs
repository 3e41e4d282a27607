//! Packet sources feeding the dashboard.
//!
//! A [`PacketSource`] hands over whatever packets have arrived since the last
//! poll. The dashboard does not care whether they come from the in-process
//! generator or from a remote feed over TCP.

mod channel;
mod stream;

pub use channel::ChannelSource;
pub use stream::StreamSource;

use std::fmt::Debug;

use sentinel_types::Packet;

/// Trait for receiving telemetry packets from various sources.
///
/// # Example
///
/// ```
/// use sentinel_tui::{ChannelSource, PacketSource};
/// use sentinel_types::{Packet, Source};
///
/// let (tx, mut source) = ChannelSource::create("local generator");
/// tx.send(Packet::builder(Source::Insar).timestamp_ms(0).build()).unwrap();
/// assert_eq!(source.poll().len(), 1);
/// ```
pub trait PacketSource: Send + Debug {
    /// Drain the packets that arrived since the last poll, oldest first.
    ///
    /// This method must not block.
    fn poll(&mut self) -> Vec<Packet>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// The most recent error seen by the source, if it still applies.
    fn error(&self) -> Option<String>;
}
