//! Connection lifecycle as an explicit state machine.
//!
//! The machine performs no I/O. The driver feeds it [`ConnectionEvent`]s and
//! carries out the returned [`ConnectionAction`], which keeps every
//! reconnect decision testable without a socket.

use std::time::Duration;

use tracing::{debug, trace};

pub const DEFAULT_RECONNECT_INTERVAL: Duration = Duration::from_secs(2);
pub const DEFAULT_MAX_RECONNECT_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    /// Waiting to retry; `attempt` counts from 1.
    Reconnecting { attempt: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// Caller asked for a connection.
    Connect,
    /// Transport handshake completed.
    Opened,
    /// Handshake failed or timed out.
    Failed,
    /// An open connection ended.
    Dropped { server_initiated: bool },
    /// The scheduled retry delay passed.
    RetryElapsed,
    /// Caller asked to stop.
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionAction {
    Open,
    ScheduleRetry(Duration),
    GiveUp,
}

/// Fixed-interval, bounded retry policy. No backoff, no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_RECONNECT_INTERVAL,
            max_attempts: DEFAULT_MAX_RECONNECT_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConnectionMachine {
    state: ConnectionState,
    policy: ReconnectPolicy,
    attempts: u32,
}

impl ConnectionMachine {
    pub fn new(policy: ReconnectPolicy) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            policy,
            attempts: 0,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn policy(&self) -> ReconnectPolicy {
        self.policy
    }

    /// Retries used since the last successful open.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn handle(&mut self, event: ConnectionEvent) -> Option<ConnectionAction> {
        use ConnectionAction as Action;
        use ConnectionEvent as Event;
        use ConnectionState::*;

        let (next, action) = match (self.state, event) {
            (Disconnected, Event::Connect) => {
                self.attempts = 0;
                (Connecting, Some(Action::Open))
            }
            (Connecting, Event::Opened) => {
                self.attempts = 0;
                (Connected, None)
            }
            (Connecting, Event::Failed)
            | (Connected, Event::Dropped { server_initiated: false }) => {
                self.retry_or_give_up()
            }
            (Connected, Event::Dropped { server_initiated: true }) => {
                // One immediate attempt; later failures follow the policy.
                self.attempts = 1;
                (
                    Reconnecting { attempt: 1 },
                    Some(Action::ScheduleRetry(Duration::ZERO)),
                )
            }
            (Reconnecting { .. }, Event::RetryElapsed) => (Connecting, Some(Action::Open)),
            (_, Event::Close) => {
                self.attempts = 0;
                (Disconnected, None)
            }
            (state, event) => {
                trace!("Ignoring {:?} while {:?}", event, state);
                (state, None)
            }
        };

        if next != self.state {
            debug!("Relay connection {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        action
    }

    fn retry_or_give_up(&mut self) -> (ConnectionState, Option<ConnectionAction>) {
        if self.attempts < self.policy.max_attempts {
            self.attempts += 1;
            (
                ConnectionState::Reconnecting {
                    attempt: self.attempts,
                },
                Some(ConnectionAction::ScheduleRetry(self.policy.interval)),
            )
        } else {
            (ConnectionState::Disconnected, Some(ConnectionAction::GiveUp))
        }
    }
}
