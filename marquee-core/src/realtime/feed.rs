use std::sync::Arc;

use marquee_model::{RelayEventKind, RelayPayload};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, trace};
use uuid::Uuid;

use super::notifications::{
    NotificationCenter, NotificationChange, NotificationTiming,
};
use super::registry::{EventHandler, EventRegistry};

const CHANGE_CAPACITY: usize = 64;

#[derive(Debug)]
enum Command {
    Event(RelayEventKind, RelayPayload),
    Dismiss(Uuid),
}

/// A [`NotificationCenter`] running on its own task. Inbound events and
/// dismissals go in through a channel; visible changes come out on a
/// broadcast channel.
#[derive(Debug)]
pub struct NotificationFeed {
    commands: mpsc::UnboundedSender<Command>,
    changes: broadcast::Sender<NotificationChange>,
    task: JoinHandle<()>,
}

impl NotificationFeed {
    /// Must be called from within a tokio runtime.
    pub fn spawn(timing: NotificationTiming) -> Self {
        let (commands, rx) = mpsc::unbounded_channel();
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        let task = tokio::spawn(drive(
            NotificationCenter::new(timing),
            rx,
            changes.clone(),
        ));

        Self {
            commands,
            changes,
            task,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NotificationChange> {
        self.changes.subscribe()
    }

    pub fn push(&self, kind: RelayEventKind, payload: RelayPayload) {
        if self.commands.send(Command::Event(kind, payload)).is_err() {
            debug!("Notification feed stopped; dropping event");
        }
    }

    pub fn dismiss(&self, id: Uuid) {
        let _ = self.commands.send(Command::Dismiss(id));
    }

    /// Register forwarding handlers for the notifying event kinds. The
    /// returned handlers can be passed to [`EventRegistry::off`].
    pub fn attach(
        &self,
        registry: &EventRegistry,
    ) -> Vec<(RelayEventKind, EventHandler)> {
        [RelayEventKind::MonitorUpdate, RelayEventKind::SyncComplete]
            .into_iter()
            .map(|kind| {
                let commands = self.commands.clone();
                let forwarded = kind.clone();
                let handler: EventHandler =
                    Arc::new(move |payload: &RelayPayload| {
                        commands
                            .send(Command::Event(
                                forwarded.clone(),
                                payload.clone(),
                            ))
                            .map_err(|_| {
                                anyhow::anyhow!("notification feed closed")
                            })
                    });
                registry.on(kind.clone(), Arc::clone(&handler));
                (kind, handler)
            })
            .collect()
    }
}

impl Drop for NotificationFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn drive(
    mut center: NotificationCenter,
    mut commands: mpsc::UnboundedReceiver<Command>,
    changes: broadcast::Sender<NotificationChange>,
) {
    loop {
        let deadline = center.next_deadline();
        let batch = tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Event(kind, payload)) => {
                    center.on_event(&kind, payload, Instant::now())
                }
                Some(Command::Dismiss(id)) => {
                    center.dismiss(id).into_iter().collect()
                }
                None => break,
            },
            _ = sleep_until_deadline(deadline) => center.poll(Instant::now()),
        };

        for change in batch {
            // No receivers is fine; the change is simply unobserved.
            if changes.send(change).is_err() {
                trace!("Notification change had no subscribers");
            }
        }
    }
    debug!("Notification feed stopped");
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
