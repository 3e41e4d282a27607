//! Channel-based packet source.
//!
//! Receives packets pushed by an in-process producer, normally the
//! generator's callback.

use sentinel_types::Packet;
use tokio::sync::mpsc;

use super::PacketSource;

/// Upper bound on packets taken in a single poll, so a burst cannot stall a
/// frame.
const MAX_DRAIN: usize = 256;

/// A packet source backed by an unbounded mpsc channel.
#[derive(Debug)]
pub struct ChannelSource {
    receiver: mpsc::UnboundedReceiver<Packet>,
    description: String,
    closed: bool,
}

impl ChannelSource {
    /// Wrap the receiving end of a packet channel.
    pub fn new(receiver: mpsc::UnboundedReceiver<Packet>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            closed: false,
        }
    }

    /// Create a channel pair.
    ///
    /// Returns (sender, source); the sender is handed to the producer.
    pub fn create(source_description: &str) -> (mpsc::UnboundedSender<Packet>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self::new(rx, source_description))
    }
}

impl PacketSource for ChannelSource {
    fn poll(&mut self) -> Vec<Packet> {
        let mut packets = Vec::new();
        while packets.len() < MAX_DRAIN {
            match self.receiver.try_recv() {
                Ok(packet) => packets.push(packet),
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    self.closed = true;
                    break;
                }
            }
        }
        packets
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        // A closed channel is how a stopped producer looks from here
        self.closed.then(|| "Producer stopped".to_string())
    }
}

#[cfg(test)]
mod tests {
    use sentinel_types::Source;

    use super::*;

    fn packet(id: &str) -> Packet {
        Packet::builder(Source::Gnss).id(id).timestamp_ms(0).build()
    }

    #[test]
    fn test_channel_source_poll_drains_in_order() {
        let (tx, mut source) = ChannelSource::create("test");

        assert!(source.poll().is_empty());

        tx.send(packet("a")).unwrap();
        tx.send(packet("b")).unwrap();

        let ids: Vec<_> = source.poll().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(source.poll().is_empty());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_channel_source_reports_closed_producer() {
        let (tx, mut source) = ChannelSource::create("test");
        tx.send(packet("last")).unwrap();
        drop(tx);

        assert_eq!(source.poll().len(), 1);
        assert!(source.poll().is_empty());
        assert_eq!(source.error().as_deref(), Some("Producer stopped"));
    }

    #[test]
    fn test_channel_source_poll_is_bounded() {
        let (tx, mut source) = ChannelSource::create("test");
        for n in 0..(MAX_DRAIN + 10) {
            tx.send(packet(&n.to_string())).unwrap();
        }
        assert_eq!(source.poll().len(), MAX_DRAIN);
        assert_eq!(source.poll().len(), 10);
    }

    #[test]
    fn test_channel_source_description() {
        let (_tx, source) = ChannelSource::create("local generator");
        assert_eq!(source.description(), "channel: local generator");
    }
}
