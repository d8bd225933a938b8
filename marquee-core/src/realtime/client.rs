use std::sync::Arc;
use std::time::Duration;

use marquee_model::{RelayEnvelope, RelayEventKind, RelayPayload};
use tokio::sync::watch;
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use super::connection::{
    ConnectionAction, ConnectionEvent, ConnectionMachine, ConnectionState,
    ReconnectPolicy,
};
use super::registry::EventRegistry;
use super::transport::{Frame, Transport, TransportStream};
use crate::error::{RelayError, RelayResult};

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Relay connection configuration
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub url: Url,
    /// Handshakes slower than this count as failed attempts.
    pub connect_timeout: Duration,
    pub policy: ReconnectPolicy,
}

impl RelayConfig {
    pub fn new(url: &str) -> RelayResult<Self> {
        let url = Url::parse(url)?;
        if url.scheme() != "ws" && url.scheme() != "wss" {
            return Err(RelayError::UnsupportedScheme(url.scheme().to_string()));
        }

        Ok(Self {
            url,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            policy: ReconnectPolicy::default(),
        })
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn with_policy(mut self, policy: ReconnectPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// How a connected session ended.
enum SessionEnd {
    Cancelled,
    Dropped { server_initiated: bool },
}

/// Keeps a relay connection alive according to the reconnect policy and
/// fans every inbound event out through the [`EventRegistry`].
#[derive(Debug)]
pub struct RelayClient {
    config: RelayConfig,
    transport: Arc<dyn Transport>,
    registry: Arc<EventRegistry>,
    state: watch::Sender<ConnectionState>,
}

impl RelayClient {
    pub fn new(
        config: RelayConfig,
        transport: Arc<dyn Transport>,
        registry: Arc<EventRegistry>,
    ) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            config,
            transport,
            registry,
            state,
        }
    }

    pub fn registry(&self) -> &Arc<EventRegistry> {
        &self.registry
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Connect and stay connected until `cancel` fires (returns `Ok`) or
    /// the reconnect budget runs out (returns
    /// [`RelayError::RetriesExhausted`]).
    pub async fn run(&self, cancel: CancellationToken) -> RelayResult<()> {
        let mut machine = ConnectionMachine::new(self.config.policy);
        let mut action = self.step(&mut machine, ConnectionEvent::Connect);

        while let Some(next) = action {
            action = match next {
                ConnectionAction::Open => {
                    let connected = tokio::select! {
                        _ = cancel.cancelled() => None,
                        attempt = self.open() => Some(attempt),
                    };
                    let Some(attempt) = connected else {
                        break;
                    };

                    match attempt {
                        Ok(stream) => {
                            self.step(&mut machine, ConnectionEvent::Opened);
                            info!("[Relay] Connected to {}", self.config.url);
                            match self.session(stream, &cancel).await {
                                SessionEnd::Cancelled => break,
                                SessionEnd::Dropped { server_initiated } => {
                                    info!(
                                        "[Relay] Connection dropped (server initiated: {})",
                                        server_initiated
                                    );
                                    self.step(
                                        &mut machine,
                                        ConnectionEvent::Dropped { server_initiated },
                                    )
                                }
                            }
                        }
                        Err(e) => {
                            warn!("[Relay] Connection attempt failed: {}", e);
                            self.step(&mut machine, ConnectionEvent::Failed)
                        }
                    }
                }
                ConnectionAction::ScheduleRetry(delay) => {
                    debug!("[Relay] Reconnecting in {:?}", delay);
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = sleep(delay) => {
                            self.step(&mut machine, ConnectionEvent::RetryElapsed)
                        }
                    }
                }
                ConnectionAction::GiveUp => {
                    let attempts = machine.policy().max_attempts;
                    warn!("[Relay] Giving up after {} reconnect attempts", attempts);
                    return Err(RelayError::RetriesExhausted { attempts });
                }
            };
        }

        self.step(&mut machine, ConnectionEvent::Close);
        Ok(())
    }

    fn step(
        &self,
        machine: &mut ConnectionMachine,
        event: ConnectionEvent,
    ) -> Option<ConnectionAction> {
        let action = machine.handle(event);
        self.state.send_replace(machine.state());
        action
    }

    async fn open(&self) -> RelayResult<Box<dyn TransportStream>> {
        match timeout(
            self.config.connect_timeout,
            self.transport.connect(&self.config.url),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(RelayError::ConnectTimeout(self.config.connect_timeout)),
        }
    }

    async fn session(
        &self,
        mut stream: Box<dyn TransportStream>,
        cancel: &CancellationToken,
    ) -> SessionEnd {
        loop {
            let frame = tokio::select! {
                _ = cancel.cancelled() => None,
                frame = stream.next_frame() => Some(frame),
            };
            let Some(frame) = frame else {
                stream.close().await;
                return SessionEnd::Cancelled;
            };

            match frame {
                Frame::Text(text) => self.dispatch(&text),
                Frame::Closed { server_initiated } => {
                    return SessionEnd::Dropped { server_initiated };
                }
            }
        }
    }

    fn dispatch(&self, text: &str) {
        // Either the enveloped `{event, data}` layout or a bare payload
        // whose `type` names the event.
        let (kind, payload) = match serde_json::from_str::<RelayEnvelope>(text) {
            Ok(envelope) => (envelope.kind(), envelope.data),
            Err(_) => match serde_json::from_str::<RelayPayload>(text) {
                Ok(payload) if !payload.kind.is_empty() => (
                    RelayEventKind::parse(&payload.kind),
                    payload,
                ),
                _ => {
                    warn!("[Relay] Ignoring malformed frame: {}", text);
                    return;
                }
            },
        };

        let delivered = self.registry.emit(&kind, &payload);
        debug!("[Relay] {} delivered to {} handlers", kind, delivered);
    }
}
