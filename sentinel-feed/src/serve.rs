//! TCP broadcast of a feed as newline-delimited JSON.

use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;

use crate::error::FeedError;
use crate::feed::Feed;

/// Packets buffered per client before a slow client starts losing them.
const CLIENT_BACKLOG: usize = 64;

/// Run `feed` and send every packet to every connected client.
///
/// Each packet is written as one JSON object followed by `\n`, the format
/// `StreamSource` in the dashboard reads. Clients that connect late only see
/// packets emitted after they connected. A client that falls more than
/// 64 packets behind skips ahead.
///
/// Runs until accepting a connection fails; the feed stops when this returns.
pub async fn serve(listener: TcpListener, feed: Feed) -> Result<(), FeedError> {
    let (tx, _) = broadcast::channel::<Arc<str>>(CLIENT_BACKLOG);

    let sender = tx.clone();
    let _feed = feed.start(move |packet| match serde_json::to_string(&packet) {
        // No subscribers is fine: packets are simply not retained
        Ok(line) => {
            let _ = sender.send(line.into());
        }
        Err(e) => tracing::warn!(error = %e, "failed to encode packet"),
    });

    loop {
        let (stream, peer) = listener.accept().await?;
        tracing::info!(%peer, "feed client connected");
        let rx = tx.subscribe();
        tokio::spawn(async move {
            if let Err(e) = forward(stream, rx).await {
                tracing::debug!(%peer, error = %e, "feed client write failed");
            }
            tracing::info!(%peer, "feed client disconnected");
        });
    }
}

async fn forward(
    mut stream: TcpStream,
    mut rx: broadcast::Receiver<Arc<str>>,
) -> std::io::Result<()> {
    loop {
        match rx.recv().await {
            Ok(line) => {
                stream.write_all(line.as_bytes()).await?;
                stream.write_all(b"\n").await?;
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "feed client lagging, packets dropped");
            }
            Err(broadcast::error::RecvError::Closed) => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sentinel_types::Packet;
    use tokio::io::{AsyncBufReadExt, BufReader};

    use super::*;

    #[tokio::test]
    async fn test_clients_receive_json_lines() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let feed = Feed::builder()
            .interval(Duration::from_millis(5)..Duration::from_millis(10))
            .seed(1)
            .build()
            .unwrap();
        let server = tokio::spawn(serve(listener, feed));

        let stream = TcpStream::connect(addr).await.unwrap();
        let mut lines = BufReader::new(stream).lines();

        for _ in 0..3 {
            let line = tokio::time::timeout(Duration::from_secs(5), lines.next_line())
                .await
                .expect("packet within timeout")
                .unwrap()
                .expect("stream still open");
            let packet: Packet = serde_json::from_str(&line).unwrap();
            assert!(packet.reading.is_some());
        }

        server.abort();
    }
}
