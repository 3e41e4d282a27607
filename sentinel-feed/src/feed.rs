//! The main Feed type for timed packet emission.

use std::ops::Range;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sentinel_types::Packet;
use tokio::sync::{mpsc, watch};

use crate::error::FeedError;
use crate::generator::{PacketGenerator, DEFAULT_LOCATIONS};
use crate::handle::{FeedHandle, FeedShared};

/// Default range the delay between two packets is drawn from.
pub const DEFAULT_INTERVAL: Range<Duration> =
    Duration::from_millis(3000)..Duration::from_millis(7000);

/// A configured, not yet running, telemetry feed.
///
/// Starting a feed spawns a tokio task that sleeps for a random delay drawn
/// from the configured interval, builds one packet and hands it to the
/// packet callback, then repeats until stopped. One packet is delivered at a
/// time.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use sentinel_feed::Feed;
///
/// let feed = Feed::builder()
///     .interval(Duration::from_secs(1)..Duration::from_secs(2))
///     .seed(42)
///     .build()
///     .unwrap();
/// assert_eq!(feed.interval().start, Duration::from_secs(1));
/// ```
#[derive(Debug, Clone)]
pub struct Feed {
    interval: Range<Duration>,
    seed: Option<u64>,
    locations: Vec<String>,
}

impl Feed {
    /// Create a builder for configuring the feed.
    pub fn builder() -> FeedBuilder {
        FeedBuilder::new()
    }

    /// The emission interval range.
    pub fn interval(&self) -> &Range<Duration> {
        &self.interval
    }

    /// Start emission, invoking `on_packet` with each packet.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(&self, on_packet: F) -> FeedHandle
    where
        F: FnMut(Packet) + Send + 'static,
    {
        let shared = FeedShared::new(Box::new(on_packet));
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let mut generator = PacketGenerator::with_locations(self.rng(), self.locations.clone());
        let interval = self.interval.clone();
        let task_shared = shared.clone();

        tracing::info!(
            min_ms = interval.start.as_millis() as u64,
            max_ms = interval.end.as_millis() as u64,
            "telemetry feed started"
        );

        tokio::spawn(async move {
            loop {
                let delay = generator.next_delay(&interval);
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = stop_rx.changed() => break,
                }

                let packet = generator.next_packet();
                tracing::debug!(source = %packet.source, value = %packet.value, "emitting packet");
                if !task_shared.deliver(packet) {
                    break;
                }
            }
        });

        FeedHandle::new(shared, stop_tx)
    }

    /// Start emission into an unbounded channel.
    ///
    /// The receiver yields `None` once the feed is stopped and drained.
    pub fn start_channel(&self) -> (FeedHandle, mpsc::UnboundedReceiver<Packet>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = self.start(move |packet| {
            // Receiver dropped: nobody is listening, nothing to do
            let _ = tx.send(packet);
        });
        (handle, rx)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for Feed {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            seed: None,
            locations: DEFAULT_LOCATIONS.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// Builder for configuring a Feed.
#[derive(Debug, Default)]
pub struct FeedBuilder {
    interval: Option<Range<Duration>>,
    seed: Option<u64>,
    locations: Option<Vec<String>>,
}

impl FeedBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the range the delay between packets is drawn from.
    ///
    /// Defaults to 3s..7s.
    pub fn interval(mut self, interval: Range<Duration>) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Seed the random source for a reproducible packet sequence.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the station list packets are attributed to.
    pub fn locations<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locations = Some(locations.into_iter().map(Into::into).collect());
        self
    }

    /// Build the feed.
    pub fn build(self) -> Result<Feed, FeedError> {
        let defaults = Feed::default();
        let interval = self.interval.unwrap_or(defaults.interval);
        if interval.is_empty() {
            return Err(FeedError::EmptyInterval {
                min: interval.start,
                max: interval.end,
            });
        }

        Ok(Feed {
            interval,
            seed: self.seed,
            locations: self.locations.unwrap_or(defaults.locations),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use sentinel_types::Source;

    use super::*;

    fn seeded_feed() -> Feed {
        Feed::builder().seed(9).build().unwrap()
    }

    #[test]
    fn test_empty_interval_rejected() {
        let err = Feed::builder()
            .interval(Duration::from_secs(5)..Duration::from_secs(5))
            .build()
            .unwrap_err();
        assert!(matches!(err, FeedError::EmptyInterval { .. }));
    }

    #[test]
    fn test_default_interval() {
        let feed = Feed::builder().build().unwrap();
        assert_eq!(feed.interval(), &DEFAULT_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn test_emission_rate_bounded_by_interval() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = received.clone();
        let handle = seeded_feed().start(move |packet| sink.lock().push(packet));

        tokio::time::sleep(Duration::from_secs(60)).await;

        let count = received.lock().len();
        // 60s with 3s..7s gaps: at least 8 and at most 20 packets
        assert!((8..=20).contains(&count), "got {count} packets");
        assert!(received.lock().iter().all(|p| Source::ALL.contains(&p.source)));
        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_delivered_after_stop() {
        let received = Arc::new(Mutex::new(0usize));
        let sink = received.clone();
        let handle = seeded_feed().start(move |_| *sink.lock() += 1);

        tokio::time::sleep(Duration::from_secs(20)).await;
        handle.stop();
        let at_stop = *received.lock();
        assert!(at_stop > 0);
        assert!(!handle.is_running());

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(*received.lock(), at_stop);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent() {
        let handle = seeded_feed().start(|_| {});
        handle.stop();
        handle.stop();
        assert!(!handle.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_channel_closes_after_stop() {
        let (handle, mut rx) = seeded_feed().start_channel();

        let first = rx.recv().await;
        assert!(first.is_some());

        handle.stop();
        // Drain whatever was delivered before stop, then the channel closes
        while rx.recv().await.is_some() {}
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_feed() {
        let received = Arc::new(Mutex::new(0usize));
        let sink = received.clone();
        drop(seeded_feed().start(move |_| *sink.lock() += 1));

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(*received.lock(), 0);
    }
}
