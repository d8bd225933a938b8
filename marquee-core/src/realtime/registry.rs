//! Event fan-out.
//!
//! Maps an event kind to the callbacks registered for it. Delivery is
//! synchronous, in registration order, and best-effort: a handler that
//! returns an error or panics is logged and skipped.

use std::collections::HashMap;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use marquee_model::{RelayEventKind, RelayPayload};
use parking_lot::RwLock;
use tracing::{error, trace, warn};

pub type EventHandler =
    Arc<dyn Fn(&RelayPayload) -> anyhow::Result<()> + Send + Sync>;

#[derive(Default)]
pub struct EventRegistry {
    handlers: RwLock<HashMap<RelayEventKind, Vec<EventHandler>>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind`. Registering the same handler (same
    /// `Arc`) twice is a no-op and returns false.
    pub fn on(&self, kind: RelayEventKind, handler: EventHandler) -> bool {
        let mut handlers = self.handlers.write();
        let entry = handlers.entry(kind).or_default();
        if entry.iter().any(|existing| Arc::ptr_eq(existing, &handler)) {
            return false;
        }
        entry.push(handler);
        true
    }

    /// Returns false when `handler` was not registered for `kind`.
    pub fn off(&self, kind: &RelayEventKind, handler: &EventHandler) -> bool {
        let mut handlers = self.handlers.write();
        let Some(entry) = handlers.get_mut(kind) else {
            return false;
        };
        let before = entry.len();
        entry.retain(|existing| !Arc::ptr_eq(existing, handler));
        let removed = entry.len() != before;
        if entry.is_empty() {
            handlers.remove(kind);
        }
        removed
    }

    pub fn handler_count(&self, kind: &RelayEventKind) -> usize {
        self.handlers.read().get(kind).map_or(0, Vec::len)
    }

    /// Deliver `payload` to every handler of `kind`. Returns how many
    /// handlers completed successfully.
    pub fn emit(&self, kind: &RelayEventKind, payload: &RelayPayload) -> usize {
        let handlers: Vec<EventHandler> = match self.handlers.read().get(kind) {
            Some(handlers) => handlers.clone(),
            None => {
                trace!("No handlers for relay event {}", kind);
                return 0;
            }
        };

        let mut delivered = 0;
        for (index, handler) in handlers.iter().enumerate() {
            match catch_unwind(AssertUnwindSafe(|| handler(payload))) {
                Ok(Ok(())) => delivered += 1,
                Ok(Err(e)) => {
                    warn!("Handler {} for {} failed: {:#}", index, kind, e);
                }
                Err(_) => {
                    error!("Handler {} for {} panicked", index, kind);
                }
            }
        }
        delivered
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handlers = self.handlers.read();
        let counts: HashMap<String, usize> = handlers
            .iter()
            .map(|(kind, list)| (kind.to_string(), list.len()))
            .collect();
        f.debug_struct("EventRegistry")
            .field("handlers", &counts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn recorder(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> EventHandler {
        let log = Arc::clone(log);
        Arc::new(move |_: &RelayPayload| -> anyhow::Result<()> {
            log.lock().push(name);
            Ok(())
        })
    }

    #[test]
    fn duplicate_registration_is_a_no_op() {
        let registry = EventRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let handler = recorder(&log, "a");

        assert!(registry.on(RelayEventKind::MonitorUpdate, Arc::clone(&handler)));
        assert!(!registry.on(RelayEventKind::MonitorUpdate, Arc::clone(&handler)));
        assert_eq!(registry.handler_count(&RelayEventKind::MonitorUpdate), 1);

        registry.emit(&RelayEventKind::MonitorUpdate, &RelayPayload::default());
        assert_eq!(*log.lock(), vec!["a"]);
    }

    #[test]
    fn failing_handlers_do_not_block_the_rest() {
        let registry = EventRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let kind = RelayEventKind::SyncComplete;

        registry.on(kind.clone(), recorder(&log, "first"));
        registry.on(
            kind.clone(),
            Arc::new(|_: &RelayPayload| -> anyhow::Result<()> {
                anyhow::bail!("rejected")
            }),
        );
        registry.on(
            kind.clone(),
            Arc::new(|_: &RelayPayload| -> anyhow::Result<()> {
                panic!("handler bug")
            }),
        );
        registry.on(kind.clone(), recorder(&log, "last"));

        let delivered = registry.emit(&kind, &RelayPayload::default());
        assert_eq!(delivered, 2);
        assert_eq!(*log.lock(), vec!["first", "last"]);
    }

    #[test]
    fn off_removes_only_that_handler() {
        let registry = EventRegistry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let kind = RelayEventKind::MonitorUpdate;
        let a = recorder(&log, "a");
        let b = recorder(&log, "b");
        registry.on(kind.clone(), Arc::clone(&a));
        registry.on(kind.clone(), Arc::clone(&b));

        assert!(registry.off(&kind, &a));
        assert!(!registry.off(&kind, &a));
        registry.emit(&kind, &RelayPayload::default());
        assert_eq!(*log.lock(), vec!["b"]);
    }
}
