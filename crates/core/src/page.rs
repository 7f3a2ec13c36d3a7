//! Scoped ownership of a page's viewport listener.
//!
//! [`MountedPage`] is the only way the controller gets wired to an event
//! source. Mounting attaches exactly one listener; dropping the page (or
//! calling [`MountedPage::unmount`]) detaches it, including when the drop
//! happens during unwinding. Repeated mount/unmount cycles therefore never
//! accumulate listeners.

use crate::error::SpyError;
use crate::nav::{NavBar, SharedNavBar};
use crate::spy::{ScrollSpy, SubscriberId};
use folio_catalog::NavEntry;
use folio_traits::{LayoutProvider, ViewportEvent, ViewportEvents, ViewportHandler};
use folio_types::SectionId;
use std::cell::{RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

/// A controller shared between a page and its listener.
pub type SharedSpy<L> = Rc<RefCell<ScrollSpy<L>>>;

pub struct MountedPage<L, E>
where
    L: LayoutProvider + 'static,
    E: ViewportEvents,
{
    spy: SharedSpy<L>,
    events: E,
    listener: Option<E::Listener>,
}

impl<L, E> fmt::Debug for MountedPage<L, E>
where
    L: LayoutProvider + 'static,
    E: ViewportEvents,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountedPage")
            .field("spy", &self.spy)
            .field("mounted", &self.listener.is_some())
            .finish()
    }
}

impl<L, E> MountedPage<L, E>
where
    L: LayoutProvider + 'static,
    E: ViewportEvents,
{
    /// Attaches `spy` to `events`.
    ///
    /// Honors `verify_on_mount` (registration check before anything is
    /// attached) and `measure_on_mount` (one synthetic `Initial` sample).
    pub fn mount(spy: ScrollSpy<L>, events: E) -> Result<Self, SpyError> {
        if spy.config().verify_on_mount {
            spy.verify_registration()?;
        }

        let spy = Rc::new(RefCell::new(spy));
        let listener = events.listen(Self::handler(Rc::downgrade(&spy)))?;
        spy.borrow_mut().attach();

        let page = Self {
            spy,
            events,
            listener: Some(listener),
        };

        let measure_on_mount = {
            let spy = page.spy.borrow();
            log::info!(
                "Page mounted with {} sections on {}.",
                spy.catalog().len(),
                spy.layout().name()
            );
            spy.config().measure_on_mount
        };
        if measure_on_mount {
            ScrollSpy::sample_shared(&page.spy, ViewportEvent::Initial)?;
        }

        Ok(page)
    }

    // The listener only holds a weak handle so the event source never keeps
    // a torn-down controller alive.
    fn handler(spy: Weak<RefCell<ScrollSpy<L>>>) -> ViewportHandler {
        Box::new(move |event| {
            let Some(spy) = spy.upgrade() else {
                return;
            };
            if let Err(e) = ScrollSpy::sample_shared(&spy, event) {
                log::warn!("Dropped '{}' event: {}", event, e);
            }
        })
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    /// The shared controller, for callers that need direct access.
    pub fn spy(&self) -> &SharedSpy<L> {
        &self.spy
    }

    /// Runs `f` against the controller.
    ///
    /// Change subscribers may call this. Panics only if the caller itself
    /// holds a mutable borrow of [`MountedPage::spy`].
    pub fn with_spy<R>(&self, f: impl FnOnce(&ScrollSpy<L>) -> R) -> R {
        f(&self.spy.borrow())
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn active_section(&self) -> Option<SectionId> {
        self.spy.borrow().active_section().cloned()
    }

    pub fn nav_entries(&self) -> Vec<NavEntry> {
        self.spy.borrow().catalog().nav_entries()
    }

    /// Issues a smooth scroll to `id`. See [`ScrollSpy::scroll_to_section`].
    ///
    /// Safe to call from a change subscriber. Fails with `SpyError::Busy`
    /// when called from inside [`MountedPage::with_spy`].
    pub fn navigate(&self, id: &str) -> Result<(), SpyError> {
        self.spy_mut()?.scroll_to_section(id)
    }

    /// Issues a smooth scroll to the section after the active one.
    pub fn navigate_next(&self) -> Result<Option<SectionId>, SpyError> {
        self.spy_mut()?.scroll_to_next()
    }

    pub fn subscribe(
        &self,
        callback: impl FnMut(&SectionId) + 'static,
    ) -> Result<SubscriberId, SpyError> {
        Ok(self.spy_mut()?.subscribe(callback))
    }

    pub fn unsubscribe(&self, id: SubscriberId) -> Result<bool, SpyError> {
        Ok(self.spy_mut()?.unsubscribe(id))
    }

    /// A navigation bar kept in sync with this page.
    pub fn nav_bar(&self) -> Result<SharedNavBar, SpyError> {
        let mut spy = self.spy_mut()?;
        let nav = NavBar::shared(spy.catalog());
        spy.bind_nav_bar(&nav);
        Ok(nav)
    }

    fn spy_mut(&self) -> Result<RefMut<'_, ScrollSpy<L>>, SpyError> {
        self.spy.try_borrow_mut().map_err(|_| SpyError::Busy)
    }

    /// Detaches the listener and returns the last active section.
    pub fn unmount(mut self) -> Option<SectionId> {
        self.release();
        self.active_section()
    }

    fn release(&mut self) {
        let Some(listener) = self.listener.take() else {
            return;
        };
        self.events.unlisten(listener);
        match self.spy.try_borrow_mut() {
            Ok(mut spy) => spy.detach(),
            Err(_) => log::warn!("Controller busy during unmount; listener detached anyway."),
        }
        log::info!("Page unmounted.");
    }
}

impl<L, E> Drop for MountedPage<L, E>
where
    L: LayoutProvider + 'static,
    E: ViewportEvents,
{
    fn drop(&mut self) {
        self.release();
    }
}
