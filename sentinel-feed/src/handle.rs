//! Handle for stopping a running feed.

use std::sync::Arc;

use parking_lot::Mutex;
use sentinel_types::Packet;
use tokio::sync::watch;

pub(crate) type PacketSink = Box<dyn FnMut(Packet) + Send + 'static>;

/// State shared between a feed's emission task and its handle.
///
/// The sink lives behind a mutex that the emission task holds for the whole
/// callback. `stop()` takes the sink out under the same lock, so once it
/// returns no callback is running and none can start.
pub(crate) struct FeedShared {
    pub(crate) sink: Mutex<Option<PacketSink>>,
}

impl FeedShared {
    pub(crate) fn new(sink: PacketSink) -> Arc<Self> {
        Arc::new(Self {
            sink: Mutex::new(Some(sink)),
        })
    }

    /// Deliver a packet. Returns false once the feed has been stopped.
    pub(crate) fn deliver(&self, packet: Packet) -> bool {
        let mut sink = self.sink.lock();
        match sink.as_mut() {
            Some(on_packet) => {
                on_packet(packet);
                true
            }
            None => false,
        }
    }
}

/// Handle for controlling a running feed.
///
/// Call [`stop()`](FeedHandle::stop) or drop the handle to halt emission.
///
/// The packet callback must not call `stop()` on its own handle: the call
/// would wait on the lock the callback is running under.
pub struct FeedHandle {
    shared: Arc<FeedShared>,
    stop_tx: watch::Sender<bool>,
}

impl FeedHandle {
    pub(crate) fn new(shared: Arc<FeedShared>, stop_tx: watch::Sender<bool>) -> Self {
        Self { shared, stop_tx }
    }

    /// Stop emission.
    ///
    /// Idempotent. When this returns, the packet callback is not running and
    /// will never be invoked again.
    pub fn stop(&self) {
        let sink = self.shared.sink.lock().take();
        let _ = self.stop_tx.send(true);
        if sink.is_some() {
            tracing::info!("telemetry feed stopped");
        }
    }

    /// Whether the feed is still delivering packets.
    pub fn is_running(&self) -> bool {
        self.shared.sink.lock().is_some()
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for FeedHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedHandle")
            .field("running", &self.is_running())
            .finish()
    }
}
