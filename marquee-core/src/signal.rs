//! Typed publish/subscribe hub shared by the URL state and the media store.
//!
//! Handlers run synchronously on the emitting thread, in registration
//! order. The handler list is cloned out of the lock before delivery so a
//! handler may itself subscribe, unsubscribe or trigger another emit.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Slots<T> {
    next_id: u64,
    handlers: Vec<(u64, Handler<T>)>,
}

/// Registry of change handlers for values of type `T`.
pub struct Listeners<T> {
    slots: Arc<Mutex<Slots<T>>>,
}

impl<T: 'static> Listeners<T> {
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(Slots {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }

    /// Register `handler`; it stays registered until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = {
            let mut slots = self.slots.lock();
            let id = slots.next_id;
            slots.next_id += 1;
            slots.handlers.push((id, Arc::new(handler)));
            id
        };

        let weak: Weak<Mutex<Slots<T>>> = Arc::downgrade(&self.slots);
        Subscription::new(move || {
            if let Some(slots) = weak.upgrade() {
                slots.lock().handlers.retain(|(slot, _)| *slot != id);
            }
        })
    }

    /// Deliver `value` to every registered handler.
    pub fn emit(&self, value: &T) {
        let handlers: Vec<Handler<T>> = self
            .slots
            .lock()
            .handlers
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in handlers {
            handler(value);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.lock().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("handler_count", &self.slots.lock().handlers.len())
            .finish()
    }
}

/// Handle returned by `subscribe`. Dropping it unregisters the handler.
#[must_use = "dropping a Subscription unregisters its handler"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Keep the handler registered for the lifetime of the emitter.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
