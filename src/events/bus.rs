use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error};

/// What changed. Listeners get no payload and re-read whatever they need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeEvent {
    ConfigChanged,
    RoleChanged,
    LayoutChanged,
}

impl ChangeEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeEvent::ConfigChanged => "config-changed",
            ChangeEvent::RoleChanged => "role-changed",
            ChangeEvent::LayoutChanged => "layout-changed",
        }
    }
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle returned by [`ChangeBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Arc<dyn Fn() + Send + Sync>;

struct Listener {
    id: SubscriptionId,
    event: ChangeEvent,
    handler: Handler,
}

/// Listener registry for the three change signals.
///
/// Delivery is synchronous and in registration order. A panicking listener
/// is logged and skipped; the rest still run. The registry lock is released
/// before handlers run, so a handler may read the store, subscribe or
/// unsubscribe.
#[derive(Default)]
pub struct ChangeBus {
    listeners: Mutex<Vec<Listener>>,
    next_id: AtomicU64,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, event: ChangeEvent, handler: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push(Listener {
            id,
            event,
            handler: Arc::new(handler),
        });
        debug!(event = %event, id = id.0, "Listener subscribed");
        id
    }

    /// Returns false if `id` was not (or no longer) subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|l| l.id != id);
        listeners.len() != before
    }

    pub fn listener_count(&self, event: ChangeEvent) -> usize {
        self.listeners.lock().iter().filter(|l| l.event == event).count()
    }

    /// Invoke every listener for `event`. Returns how many ran to completion.
    pub fn emit(&self, event: ChangeEvent) -> usize {
        let handlers: Vec<(SubscriptionId, Handler)> = self
            .listeners
            .lock()
            .iter()
            .filter(|l| l.event == event)
            .map(|l| (l.id, Arc::clone(&l.handler)))
            .collect();

        let mut delivered = 0;
        for (id, handler) in handlers {
            match panic::catch_unwind(AssertUnwindSafe(|| handler())) {
                Ok(()) => delivered += 1,
                Err(payload) => {
                    let message = if let Some(message) = payload.downcast_ref::<&str>() {
                        (*message).to_string()
                    } else if let Some(message) = payload.downcast_ref::<String>() {
                        message.clone()
                    } else {
                        "unknown panic payload".to_string()
                    };
                    error!(event = %event, id = id.0, panic_message = %message, "Change listener panicked");
                }
            }
        }
        debug!(event = %event, delivered, "Change event emitted");
        delivered
    }
}

impl fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeBus")
            .field("listeners", &self.listeners.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order() {
        let bus = ChangeBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        for n in 0..3 {
            let seen = Arc::clone(&seen);
            bus.subscribe(ChangeEvent::RoleChanged, move || seen.lock().push(n));
        }
        assert_eq!(bus.emit(ChangeEvent::RoleChanged), 3);
        assert_eq!(*seen.lock(), vec![0, 1, 2]);
    }

    #[test]
    fn test_events_are_separate() {
        let bus = ChangeBus::new();
        let hits = Arc::new(AtomicU64::new(0));
        let h = Arc::clone(&hits);
        bus.subscribe(ChangeEvent::LayoutChanged, move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(bus.emit(ChangeEvent::ConfigChanged), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        bus.emit(ChangeEvent::LayoutChanged);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_listener_isolated() {
        let bus = ChangeBus::new();
        let hits = Arc::new(AtomicU64::new(0));
        bus.subscribe(ChangeEvent::ConfigChanged, || panic!("listener failure"));
        let h = Arc::clone(&hits);
        bus.subscribe(ChangeEvent::ConfigChanged, move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(bus.emit(ChangeEvent::ConfigChanged), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let bus = ChangeBus::new();
        let id = bus.subscribe(ChangeEvent::RoleChanged, || {});
        assert_eq!(bus.listener_count(ChangeEvent::RoleChanged), 1);
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        assert_eq!(bus.emit(ChangeEvent::RoleChanged), 0);
    }
}
