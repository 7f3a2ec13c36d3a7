//! ViewportEvents trait for abstracting scroll/resize notifications.
//!
//! A page attaches exactly one listener at mount and detaches it at teardown.
//! The trait only covers registration; what a handler does with the events
//! is up to the caller.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Why a viewport notification fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportEvent {
    /// Synthetic measurement right after mount, before any real event.
    Initial,
    Scroll,
    Resize,
    /// The platform reports that scrolling (including a smooth animation) stopped.
    ScrollEnd,
}

impl ViewportEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewportEvent::Initial => "initial",
            ViewportEvent::Scroll => "scroll",
            ViewportEvent::Resize => "resize",
            ViewportEvent::ScrollEnd => "scrollend",
        }
    }
}

impl fmt::Display for ViewportEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback invoked for every viewport notification.
pub type ViewportHandler = Box<dyn FnMut(ViewportEvent)>;

/// Error type for listener registration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventSourceError {
    #[error("Viewport event source unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to register listener for '{event}': {message}")]
    Rejected { event: String, message: String },
}

/// A source of viewport notifications.
pub trait ViewportEvents {
    /// Handle returned by [`ViewportEvents::listen`]; passed back to detach.
    type Listener;

    /// Register `handler` for scroll, resize and scroll-end notifications.
    fn listen(&self, handler: ViewportHandler) -> Result<Self::Listener, EventSourceError>;

    /// Detach a listener. After this returns the handler is never called again.
    fn unlisten(&self, listener: Self::Listener);
}

impl<T: ViewportEvents + ?Sized> ViewportEvents for Rc<T> {
    type Listener = T::Listener;

    fn listen(&self, handler: ViewportHandler) -> Result<Self::Listener, EventSourceError> {
        (**self).listen(handler)
    }

    fn unlisten(&self, listener: Self::Listener) {
        (**self).unlisten(listener)
    }
}

/// Handle for a listener registered with a [`ManualViewport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type SharedHandler = Rc<RefCell<ViewportHandler>>;

/// An event source driven by hand.
///
/// Tests and the CLI call [`ManualViewport::emit`] where a browser would
/// dispatch `scroll`/`resize` events.
#[derive(Default)]
pub struct ManualViewport {
    handlers: RefCell<Vec<(ListenerId, SharedHandler)>>,
    next_id: Cell<u64>,
}

impl fmt::Debug for ManualViewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualViewport")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl ManualViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every attached listener, in registration order.
    ///
    /// Returns the number of handlers that ran. Handlers may detach
    /// listeners while the event is being delivered.
    pub fn emit(&self, event: ViewportEvent) -> usize {
        // Snapshot first so a handler can (un)register without a double borrow.
        let snapshot: Vec<(ListenerId, SharedHandler)> = self.handlers.borrow().clone();
        let mut delivered = 0;
        for (id, handler) in snapshot {
            if !self.is_attached(id) {
                continue;
            }
            (handler.borrow_mut())(event);
            delivered += 1;
        }
        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_attached(&self, id: ListenerId) -> bool {
        self.handlers.borrow().iter().any(|(existing, _)| *existing == id)
    }
}

impl ViewportEvents for ManualViewport {
    type Listener = ListenerId;

    fn listen(&self, handler: ViewportHandler) -> Result<ListenerId, EventSourceError> {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.handlers
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(handler))));
        log::trace!("ManualViewport: attached listener {:?}", id);
        Ok(id)
    }

    fn unlisten(&self, listener: ListenerId) {
        self.handlers
            .borrow_mut()
            .retain(|(existing, _)| *existing != listener);
        log::trace!("ManualViewport: detached listener {:?}", listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recording_handler(log: &Rc<RefCell<Vec<ViewportEvent>>>) -> ViewportHandler {
        let log = Rc::clone(log);
        Box::new(move |event| log.borrow_mut().push(event))
    }

    #[test]
    fn test_emit_reaches_listener() {
        let viewport = ManualViewport::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        viewport.listen(recording_handler(&seen)).unwrap();

        assert_eq!(viewport.emit(ViewportEvent::Scroll), 1);
        assert_eq!(viewport.emit(ViewportEvent::Resize), 1);
        assert_eq!(
            *seen.borrow(),
            vec![ViewportEvent::Scroll, ViewportEvent::Resize]
        );
    }

    #[test]
    fn test_unlisten_stops_delivery() {
        let viewport = ManualViewport::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let id = viewport.listen(recording_handler(&seen)).unwrap();

        viewport.unlisten(id);
        assert_eq!(viewport.emit(ViewportEvent::Scroll), 0);
        assert!(seen.borrow().is_empty());
        assert_eq!(viewport.listener_count(), 0);
    }

    #[test]
    fn test_listeners_are_independent() {
        let viewport = ManualViewport::new();
        let first = Rc::new(RefCell::new(Vec::new()));
        let second = Rc::new(RefCell::new(Vec::new()));
        let a = viewport.listen(recording_handler(&first)).unwrap();
        let b = viewport.listen(recording_handler(&second)).unwrap();
        assert_ne!(a, b);

        viewport.unlisten(a);
        viewport.emit(ViewportEvent::Scroll);
        assert!(first.borrow().is_empty());
        assert_eq!(second.borrow().len(), 1);
    }

    #[test]
    fn test_handler_may_detach_during_delivery() {
        let viewport = Rc::new(ManualViewport::new());
        let own_id: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));

        let handler: ViewportHandler = {
            let viewport = Rc::clone(&viewport);
            let own_id = Rc::clone(&own_id);
            Box::new(move |_| {
                if let Some(id) = own_id.get() {
                    viewport.unlisten(id);
                }
            })
        };
        let id = viewport.listen(handler).unwrap();
        own_id.set(Some(id));

        assert_eq!(viewport.emit(ViewportEvent::Scroll), 1);
        assert_eq!(viewport.listener_count(), 0);
        assert_eq!(viewport.emit(ViewportEvent::Scroll), 0);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(ViewportEvent::ScrollEnd.to_string(), "scrollend");
        assert_eq!(ViewportEvent::Initial.as_str(), "initial");
    }
}
