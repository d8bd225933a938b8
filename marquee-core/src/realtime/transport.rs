use std::fmt;

use async_trait::async_trait;
use url::Url;

use crate::error::RelayResult;

/// What the relay reads off an open connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    /// The connection is over. `server_initiated` is true only for an
    /// orderly close sent by the peer.
    Closed { server_initiated: bool },
}

/// An open connection.
#[async_trait]
pub trait TransportStream: Send {
    /// Next inbound frame. Once [`Frame::Closed`] is returned the stream
    /// is finished.
    async fn next_frame(&mut self) -> Frame;

    async fn close(&mut self);
}

/// Opens connections to the relay endpoint.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    async fn connect(&self, url: &Url) -> RelayResult<Box<dyn TransportStream>>;
}
