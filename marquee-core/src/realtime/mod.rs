//! Realtime notification relay.
//!
//! A socket connection kept alive by [`ConnectionMachine`], events fanned
//! out through [`EventRegistry`], and a debounced, de-duplicated
//! notification queue in [`NotificationCenter`] / [`NotificationFeed`].

mod client;
mod connection;
mod feed;
mod notifications;
mod registry;
mod transport;
mod websocket;

pub use client::{DEFAULT_CONNECT_TIMEOUT, RelayClient, RelayConfig};
pub use connection::{
    ConnectionAction, ConnectionEvent, ConnectionMachine, ConnectionState,
    DEFAULT_MAX_RECONNECT_ATTEMPTS, DEFAULT_RECONNECT_INTERVAL, ReconnectPolicy,
};
pub use feed::NotificationFeed;
pub use notifications::{
    DEDUPE_WINDOW, DISPLAY_WINDOW, DismissReason, MONITOR_DEBOUNCE, Notification,
    NotificationCenter, NotificationChange, NotificationTiming,
};
pub use registry::{EventHandler, EventRegistry};
pub use transport::{Frame, Transport, TransportStream};
pub use websocket::WebSocketTransport;
