//! Pause and resume for the in-process packet generator.

use std::ops::Range;
use std::time::Duration;

use sentinel_feed::{Feed, FeedError, FeedHandle};
use sentinel_types::Packet;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Owns the local feed and restarts it on resume.
///
/// Every run delivers into the same channel, so the dashboard's
/// [`ChannelSource`](crate::ChannelSource) survives a pause. A seeded feed
/// is reseeded per run so resumed runs do not replay packet ids.
#[derive(Debug)]
pub struct FeedControl {
    interval: Range<Duration>,
    seed: Option<u64>,
    runs: u64,
    sender: mpsc::UnboundedSender<Packet>,
    runtime: Handle,
    handle: Option<FeedHandle>,
}

impl FeedControl {
    /// Create a stopped control. Call [`FeedControl::resume`] to start.
    pub fn new(
        interval: Range<Duration>,
        seed: Option<u64>,
        sender: mpsc::UnboundedSender<Packet>,
        runtime: Handle,
    ) -> Self {
        Self {
            interval,
            seed,
            runs: 0,
            sender,
            runtime,
            handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(FeedHandle::is_running)
    }

    /// Start a new run unless one is active.
    pub fn resume(&mut self) -> Result<(), FeedError> {
        if self.is_running() {
            return Ok(());
        }

        let mut builder = Feed::builder().interval(self.interval.clone());
        if let Some(seed) = self.seed {
            builder = builder.seed(seed.wrapping_add(self.runs));
        }
        let feed = builder.build()?;

        let sender = self.sender.clone();
        let _guard = self.runtime.enter();
        self.handle = Some(feed.start(move |packet| {
            // Receiver gone means the dashboard is shutting down
            let _ = sender.send(packet);
        }));
        self.runs += 1;
        Ok(())
    }

    /// Stop the current run. No packet is delivered after this returns.
    pub fn pause(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.stop();
        }
    }

    /// Pause if running, resume otherwise. Returns whether the feed now runs.
    pub fn toggle(&mut self) -> Result<bool, FeedError> {
        if self.is_running() {
            self.pause();
            Ok(false)
        } else {
            self.resume()?;
            Ok(true)
        }
    }
}

impl Drop for FeedControl {
    fn drop(&mut self) {
        self.pause();
    }
}
