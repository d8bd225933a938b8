use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};
use url::Url;

use super::transport::{Frame, Transport, TransportStream};
use crate::error::RelayResult;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// [`Transport`] over `tokio-tungstenite`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketTransport;

struct WebSocketConnection {
    url: String,
    stream: WsStream,
}

#[async_trait]
impl Transport for WebSocketTransport {
    async fn connect(&self, url: &Url) -> RelayResult<Box<dyn TransportStream>> {
        info!("Connecting to relay: {}", url);
        let (stream, _) = connect_async(url.as_str()).await?;
        Ok(Box::new(WebSocketConnection {
            url: url.to_string(),
            stream,
        }))
    }
}

#[async_trait]
impl TransportStream for WebSocketConnection {
    async fn next_frame(&mut self) -> Frame {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => {
                    return Frame::Text(text.as_str().to_owned());
                }
                Some(Ok(Message::Ping(data))) => {
                    if let Err(e) = self.stream.send(Message::Pong(data)).await {
                        warn!("Failed to answer ping from {}: {}", self.url, e);
                        return Frame::Closed {
                            server_initiated: false,
                        };
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    info!("Relay {} closed connection: {:?}", self.url, frame);
                    return Frame::Closed {
                        server_initiated: true,
                    };
                }
                Some(Ok(other)) => {
                    debug!("Ignoring non-text frame ({} bytes)", other.len());
                }
                Some(Err(e)) => {
                    warn!("WebSocket error from {}: {}", self.url, e);
                    return Frame::Closed {
                        server_initiated: false,
                    };
                }
                None => {
                    return Frame::Closed {
                        server_initiated: false,
                    };
                }
            }
        }
    }

    async fn close(&mut self) {
        if let Err(e) = self.stream.close(None).await {
            debug!("Error closing relay socket {}: {}", self.url, e);
        }
    }
}
