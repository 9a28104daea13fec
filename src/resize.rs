//! Window resize plumbing: a subscribe/unsubscribe event source and a
//! trailing-edge debouncer.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::trace;

/// Handler invoked with the new viewport width (px).
pub type ResizeHandler = Rc<dyn Fn(f64)>;

/// Identifies a registered resize handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Source of viewport resize notifications.
pub trait ResizeSource {
    fn subscribe(&self, handler: ResizeHandler) -> ListenerId;

    /// Remove a handler. Returns `false` if it was not registered.
    fn unsubscribe(&self, id: ListenerId) -> bool;
}

#[derive(Default)]
struct ListenerTable {
    next_id: u64,
    handlers: Vec<(ListenerId, ResizeHandler)>,
}

/// In-process [`ResizeSource`]. Clones share the same listener table.
#[derive(Clone, Default)]
pub struct ResizeListeners {
    table: Rc<RefCell<ListenerTable>>,
}

impl ResizeListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notify every registered handler of a new viewport width.
    pub fn emit(&self, viewport_width: f64) {
        // Handlers may (un)subscribe while running.
        let handlers: Vec<ResizeHandler> = self
            .table
            .borrow()
            .handlers
            .iter()
            .map(|(_, h)| h.clone())
            .collect();
        trace!(viewport_width, listeners = handlers.len(), "resize emitted");
        for handler in handlers {
            handler(viewport_width);
        }
    }

    pub fn len(&self) -> usize {
        self.table.borrow().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResizeSource for ResizeListeners {
    fn subscribe(&self, handler: ResizeHandler) -> ListenerId {
        let mut table = self.table.borrow_mut();
        let id = ListenerId(table.next_id);
        table.next_id += 1;
        table.handlers.push((id, handler));
        id
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut table = self.table.borrow_mut();
        let before = table.handlers.len();
        table.handlers.retain(|(other, _)| *other != id);
        table.handlers.len() != before
    }
}

/// Coalesces bursts of triggers into one trailing value.
///
/// Timer-driven hosts call [`Debouncer::trigger`] and schedule
/// [`Debouncer::fire`] with the returned generation after
/// [`Debouncer::delay`]; only the latest generation yields a value.
/// Clock-driven hosts call [`Debouncer::poll`] instead.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Record `value` as the latest input at `now`, restarting the quiet
    /// period.
    pub fn trigger(&mut self, now: Instant, value: T) -> u64 {
        self.generation += 1;
        self.pending = Some((now, value));
        self.generation
    }

    /// Take the pending value if `generation` is still the latest trigger.
    pub fn fire(&mut self, generation: u64) -> Option<T> {
        if generation != self.generation {
            return None;
        }
        self.pending.take().map(|(_, value)| value)
    }

    /// Take the pending value once the quiet period has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = matches!(
            &self.pending,
            Some((at, _)) if now.saturating_duration_since(*at) >= self.delay
        );
        if !ready {
            return None;
        }
        self.pending.take().map(|(_, value)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn emit_reaches_subscribers_until_unsubscribed() {
        let listeners = ResizeListeners::new();
        let seen = Rc::new(Cell::new(0.0));
        let sink = seen.clone();
        let id = listeners.subscribe(Rc::new(move |w: f64| sink.set(w)));

        listeners.emit(640.0);
        assert_eq!(seen.get(), 640.0);

        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        listeners.emit(1280.0);
        assert_eq!(seen.get(), 640.0);
        assert!(listeners.is_empty());
    }

    #[test]
    fn handler_may_unsubscribe_itself() {
        let listeners = ResizeListeners::new();
        let slot: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
        let (inner, own_id) = (listeners.clone(), slot.clone());
        let id = listeners.subscribe(Rc::new(move |_: f64| {
            if let Some(id) = own_id.get() {
                inner.unsubscribe(id);
            }
        }));
        slot.set(Some(id));

        listeners.emit(100.0);
        assert!(listeners.is_empty());
    }

    #[test]
    fn only_latest_generation_fires() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(250));
        let first = debouncer.trigger(start, 500.0);
        let second = debouncer.trigger(start + Duration::from_millis(100), 700.0);

        assert_eq!(debouncer.fire(first), None);
        assert_eq!(debouncer.fire(second), Some(700.0));
        assert_eq!(debouncer.fire(second), None);
    }

    #[test]
    fn poll_waits_for_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(250));
        debouncer.trigger(start, 1);
        debouncer.trigger(start + Duration::from_millis(200), 2);

        assert_eq!(debouncer.poll(start + Duration::from_millis(300)), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_millis(450)), Some(2));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn cancel_drops_pending_value() {
        let mut debouncer = Debouncer::new(Duration::ZERO);
        let generation = debouncer.trigger(Instant::now(), ());
        debouncer.cancel();
        assert_eq!(debouncer.fire(generation), None);
    }
}
