//! Bounded, newest-first packet history.

use std::collections::VecDeque;

use sentinel_types::{Packet, Source};

/// Default number of packets kept for display.
pub const DEFAULT_HISTORY_SIZE: usize = 50;

/// The most recent packets, newest first.
///
/// Inserting beyond the capacity evicts the oldest packet, so the buffer
/// never holds more than `capacity` entries.
#[derive(Debug, Clone)]
pub struct PacketHistory {
    packets: VecDeque<Packet>,
    capacity: usize,
}

impl Default for PacketHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}

impl PacketHistory {
    /// Create an empty history holding at most `capacity` packets (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            packets: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Insert a packet at the front, evicting the oldest one if full.
    pub fn push(&mut self, packet: Packet) {
        self.packets.push_front(packet);
        self.packets.truncate(self.capacity);
    }

    /// The newest packet from `source`, if any is still buffered.
    pub fn latest(&self, source: Source) -> Option<&Packet> {
        self.packets.iter().find(|p| p.source == source)
    }

    /// Number of buffered packets from `source`.
    pub fn count_from(&self, source: Source) -> usize {
        self.packets.iter().filter(|p| p.source == source).count()
    }

    /// Iterate newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Packet> {
        self.packets.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Packet> {
        self.packets.get(index)
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet(n: u64, source: Source) -> Packet {
        Packet::builder(source).id(format!("p{n}")).timestamp_ms(n).build()
    }

    #[test]
    fn new_history_is_empty() {
        let h = PacketHistory::default();
        assert!(h.is_empty());
        assert_eq!(h.capacity(), 50);
        assert!(h.latest(Source::Gnss).is_none());
    }

    #[test]
    fn push_keeps_newest_first() {
        let mut h = PacketHistory::default();
        h.push(packet(1, Source::Gnss));
        h.push(packet(2, Source::Seismic));

        let ids: Vec<&str> = h.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p2", "p1"]);
    }

    #[test]
    fn fifty_first_insert_evicts_oldest() {
        let mut h = PacketHistory::default();
        for n in 0..50 {
            h.push(packet(n, Source::Climate));
        }
        assert_eq!(h.len(), 50);

        h.push(packet(50, Source::Climate));

        assert_eq!(h.len(), 50);
        assert!(h.iter().all(|p| p.id != "p0"));
        assert_eq!(h.get(0).unwrap().id, "p50");
        assert_eq!(h.get(49).unwrap().id, "p1");
        let stamps: Vec<u64> = h.iter().map(|p| p.timestamp_ms).collect();
        assert!(stamps.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn history_never_exceeds_capacity() {
        let mut h = PacketHistory::new(5);
        for n in 0..100 {
            h.push(packet(n, Source::Insar));
            assert!(h.len() <= 5);
        }
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut h = PacketHistory::new(0);
        h.push(packet(1, Source::Gnss));
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn latest_finds_newest_of_source() {
        let mut h = PacketHistory::default();
        h.push(packet(1, Source::Gnss));
        h.push(packet(2, Source::Seismic));
        h.push(packet(3, Source::Gnss));

        assert_eq!(h.latest(Source::Gnss).unwrap().id, "p3");
        assert_eq!(h.latest(Source::Seismic).unwrap().id, "p2");
        assert!(h.latest(Source::Insar).is_none());
        assert_eq!(h.count_from(Source::Gnss), 2);
    }
}
