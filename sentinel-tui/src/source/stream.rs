//! Stream-based packet source.
//!
//! Reads newline-delimited JSON packets from an async byte stream, which in
//! practice is a TCP connection to `sentinel --serve`.

use std::sync::{Arc, Mutex};

use sentinel_types::Packet;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::sync::mpsc;

use super::PacketSource;

type ErrorSlot = Arc<Mutex<Option<String>>>;

fn set_error(slot: &ErrorSlot, message: Option<String>) {
    if let Ok(mut guard) = slot.lock() {
        *guard = message;
    }
}

/// A packet source fed by a background reader task.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use sentinel_tui::StreamSource;
///
/// # tokio_test::block_on(async {
/// let data = br#"{"id":"a","source":"GNSS","timestamp_ms":0,"value":"Convergence: 38.90mm/yr"}"#;
/// let source = StreamSource::spawn(Cursor::new(data.to_vec()), "example");
/// # });
/// ```
#[derive(Debug)]
pub struct StreamSource {
    receiver: mpsc::Receiver<Packet>,
    description: String,
    last_error: ErrorSlot,
}

impl StreamSource {
    /// Connect to a TCP packet feed.
    pub async fn connect<A>(addr: A, description: &str) -> std::io::Result<Self>
    where
        A: ToSocketAddrs,
    {
        let stream = TcpStream::connect(addr).await?;
        tracing::info!(source = description, "connected to packet feed");
        Ok(Self::spawn(stream, description))
    }

    /// Spawn a background task that reads from the given async reader.
    ///
    /// Each non-empty line is parsed as one [`Packet`]. Lines that fail to
    /// parse are skipped and reported through [`PacketSource::error`].
    pub fn spawn<R>(reader: R, description: &str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(256);
        let last_error: ErrorSlot = Arc::new(Mutex::new(None));
        let error_handle = last_error.clone();

        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        set_error(&error_handle, Some("Connection closed".to_string()));
                        break;
                    }
                    Ok(_) => {
                        let trimmed = line.trim();
                        if trimmed.is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<Packet>(trimmed) {
                            Ok(packet) => {
                                set_error(&error_handle, None);
                                if tx.send(packet).await.is_err() {
                                    // Receiver dropped
                                    break;
                                }
                            }
                            Err(e) => {
                                tracing::warn!(error = %e, "skipping malformed packet line");
                                set_error(&error_handle, Some(format!("Parse error: {}", e)));
                            }
                        }
                    }
                    Err(e) => {
                        set_error(&error_handle, Some(format!("Read error: {}", e)));
                        break;
                    }
                }
            }
        });

        Self {
            receiver: rx,
            description: format!("stream: {}", description),
            last_error,
        }
    }
}

impl PacketSource for StreamSource {
    fn poll(&mut self) -> Vec<Packet> {
        let mut packets = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(packet) => packets.push(packet),
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    // Keep a more specific reason if the reader left one
                    if self.error().is_none() {
                        set_error(&self.last_error, Some("Stream disconnected".to_string()));
                    }
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
        self.last_error.lock().ok().and_then(|guard| guard.clone())
    }
}
