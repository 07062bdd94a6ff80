// events/bus/event_bus.rs
//
// In-process event bus.
//
// - Delivery is synchronous, in subscription order
// - Every emission is recorded in the log
// - A panicking handler is reported and skipped
//
// Handlers are snapshotted before delivery, so a handler may itself emit
// or subscribe without deadlocking the bus.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use log::{debug, error};
use uuid::Uuid;

use crate::events::types::DomainEvent;

type Handler = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// Cheap to clone; clones share subscribers and the log.
#[derive(Clone, Default)]
pub struct EventBus {
    handlers: Arc<RwLock<HashMap<TypeId, Vec<Handler>>>>,
    log: Arc<RwLock<Vec<EventLogEntry>>>,
}

/// One recorded emission
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: &'static str,
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    /// Handlers subscribed at the time of emission
    pub delivered_to: usize,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every future `E`.
    ///
    /// ```ignore
    /// bus.subscribe::<WinnerAnnounced, _>(|event| {
    ///     println!("Tonight: {}", event.title);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let erased: Handler = Arc::new(move |event: &dyn Any| match event.downcast_ref::<E>() {
            Some(event) => handler(event),
            None => error!("Event routed to a {} handler had the wrong type", type_name::<E>()),
        });

        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(TypeId::of::<E>())
            .or_default()
            .push(erased);
    }

    /// Record `event` and deliver it to every handler of its type
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let handlers: Vec<Handler> = self
            .handlers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&TypeId::of::<E>())
            .cloned()
            .unwrap_or_default();

        let entry = EventLogEntry {
            event_type: event.event_type(),
            event_id: event.event_id(),
            occurred_at: event.occurred_at(),
            delivered_to: handlers.len(),
        };
        debug!("{} ({}) -> {} handlers", entry.event_type, entry.event_id, entry.delivered_to);
        self.log
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);

        for (idx, handler) in handlers.iter().enumerate() {
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| handler(&event as &dyn Any))) {
                error!(
                    "Handler #{} for {} panicked: {:?}",
                    idx,
                    event.event_type(),
                    panic
                );
            }
        }
    }

    /// Emissions so far, oldest first
    pub fn get_event_log(&self) -> Vec<EventLogEntry> {
        self.log
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LotteryPhase, VoteToggle};
    use crate::events::types::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn movie_added(title: &str) -> MovieAdded {
        MovieAdded::new(Uuid::new_v4(), title.to_string(), "Ken".to_string())
    }

    fn counting(bus: &EventBus) -> Arc<AtomicUsize> {
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&counter);
        bus.subscribe::<MovieAdded, _>(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        counter
    }

    #[test]
    fn test_subscribe_and_emit() {
        let bus = EventBus::new();
        let counter = counting(&bus);

        bus.emit(movie_added("全面啟動"));
        bus.emit(NicknameSet::new("Ken".to_string()));

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handlers_run_in_subscription_order() {
        let bus = EventBus::new();
        let sequence = Arc::new(Mutex::new(Vec::new()));

        for n in 1..=3 {
            let seq = Arc::clone(&sequence);
            bus.subscribe::<DrawHighlightMoved, _>(move |_| seq.lock().unwrap().push(n));
        }

        bus.emit(DrawHighlightMoved::new(
            Uuid::new_v4(),
            "Heat".to_string(),
            LotteryPhase::Spinning,
            55,
        ));

        assert_eq!(*sequence.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_log_records_every_emission() {
        let bus = EventBus::new();
        counting(&bus);

        let added = movie_added("Heat");
        let added_id = added.event_id;
        bus.emit(added);
        bus.emit(MovieVoteToggled::new(
            Uuid::new_v4(),
            "Mia".to_string(),
            VoteToggle::Added,
            2,
        ));

        let log = bus.get_event_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].event_type, "MovieAdded");
        assert_eq!(log[0].event_id, added_id);
        assert_eq!(log[0].delivered_to, 1);
        assert_eq!(log[1].event_type, "MovieVoteToggled");
        assert_eq!(log[1].delivered_to, 0);
    }

    #[test]
    fn test_panicking_handler_does_not_stop_the_rest() {
        let bus = EventBus::new();
        bus.subscribe::<MovieAdded, _>(|_| panic!("renderer crashed"));
        let counter = counting(&bus);

        bus.emit(movie_added("Test"));

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handler_can_emit_follow_up_events() {
        let bus = EventBus::new();
        let inner = bus.clone();
        bus.subscribe::<WinnerAnnounced, _>(move |event| {
            inner.emit(ResultClosed::new(Some(event.movie_id)));
        });

        bus.emit(WinnerAnnounced::new(
            Uuid::new_v4(),
            "Heat".to_string(),
            "Netflix".to_string(),
            12,
        ));

        let types: Vec<&str> = bus.get_event_log().iter().map(|e| e.event_type).collect();
        assert_eq!(types, vec!["WinnerAnnounced", "ResultClosed"]);
    }

    #[test]
    fn test_clones_share_subscribers() {
        let bus = EventBus::new();
        let other = bus.clone();
        let counter = counting(&other);

        bus.emit(movie_added("Heat"));

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(other.get_event_log().len(), 1);
    }
}
