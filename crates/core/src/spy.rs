//! The scroll-spy: resolves which section the visitor is reading.
//!
//! On every viewport sample the controller reads the page at
//! `scroll offset + lookahead bias`, walks the catalog in order, and picks
//! the first section whose *current* bounds contain the marker. Geometry is
//! never cached. A miss keeps the previous answer, so once tracking has
//! started the active section never goes back to "none".
//!
//! Programmatic navigation is not special-cased: a smooth scroll simply
//! produces more samples, and the active section follows the position.

use crate::config::SpyConfig;
use crate::error::SpyError;
use crate::nav::SharedNavBar;
use folio_catalog::Catalog;
use folio_traits::{LayoutProvider, ViewportEvent};
use folio_types::{ScrollBehavior, Section, SectionId};
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

/// Lifecycle phase of a [`ScrollSpy`].
#[derive(Debug, Clone, PartialEq)]
pub enum SpyPhase {
    /// Not attached to any event source. Samples are ignored.
    Unmounted,
    /// Attached, but nothing measured yet.
    Idle,
    Tracking,
    /// A smooth scroll towards `target` is in flight.
    Scrolling { target: SectionId, target_offset: f64 },
}

impl SpyPhase {
    pub fn is_mounted(&self) -> bool {
        !matches!(self, SpyPhase::Unmounted)
    }
}

/// The controller's view of the viewport, refreshed on each sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewportState {
    /// Raw scroll offset at the last sample.
    pub scroll_offset: f64,
    /// `scroll_offset + lookahead_bias` at the last sample.
    pub marker_offset: f64,
    pub active_section_id: Option<SectionId>,
    pub samples: u64,
}

/// Handle for a change subscriber registered with [`ScrollSpy::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type ChangeCallback = Box<dyn FnMut(&SectionId)>;

/// Tracks the active section for one page instance.
pub struct ScrollSpy<L: LayoutProvider> {
    catalog: Arc<Catalog>,
    layout: L,
    config: SpyConfig,
    viewport: ViewportState,
    phase: SpyPhase,
    subscribers: Vec<(SubscriberId, ChangeCallback)>,
    next_subscriber: u64,
    delivery: Option<Delivery>,
}

/// Bookkeeping for [`ScrollSpy::sample_shared`] while subscribers run
/// outside the controller's borrow.
#[derive(Debug, Default)]
struct Delivery {
    /// Subscribers taken out for the current round.
    in_flight: Vec<SubscriberId>,
    /// In-flight subscribers unsubscribed during the round.
    cancelled: Vec<SubscriberId>,
    /// Changes resolved by nested samples, delivered after the current one.
    queued: VecDeque<SectionId>,
}

impl<L: LayoutProvider> fmt::Debug for ScrollSpy<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollSpy")
            .field("sections", &self.catalog.len())
            .field("layout", &self.layout.name())
            .field("config", &self.config)
            .field("viewport", &self.viewport)
            .field("phase", &self.phase)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<L: LayoutProvider> ScrollSpy<L> {
    /// Creates an unmounted controller.
    ///
    /// # Errors
    ///
    /// Returns `SpyError::Config` if `config` does not validate.
    pub fn new(
        catalog: impl Into<Arc<Catalog>>,
        layout: L,
        config: SpyConfig,
    ) -> Result<Self, SpyError> {
        config.validate()?;
        let catalog = catalog.into();
        let mut viewport = ViewportState::default();
        if config.preselect_first {
            viewport.active_section_id = Some(catalog.first().id.clone());
        }
        Ok(Self {
            catalog,
            layout,
            config,
            viewport,
            phase: SpyPhase::Unmounted,
            subscribers: Vec::new(),
            next_subscriber: 0,
            delivery: None,
        })
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn config(&self) -> &SpyConfig {
        &self.config
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn phase(&self) -> &SpyPhase {
        &self.phase
    }

    pub fn active_section(&self) -> Option<&SectionId> {
        self.viewport.active_section_id.as_ref()
    }

    /// Unmounted → Idle. Called by [`MountedPage`](crate::MountedPage) once
    /// its listener is in place.
    pub fn attach(&mut self) {
        if self.phase == SpyPhase::Unmounted {
            log::debug!("ScrollSpy attached ({} sections).", self.catalog.len());
            self.phase = SpyPhase::Idle;
        }
    }

    /// Any phase → Unmounted. Later samples are ignored.
    pub fn detach(&mut self) {
        if self.phase.is_mounted() {
            log::debug!("ScrollSpy detached after {} samples.", self.viewport.samples);
        }
        self.phase = SpyPhase::Unmounted;
    }

    /// Processes one viewport notification.
    ///
    /// Returns the newly active id when the resolution changed it (and
    /// subscribers were notified), `None` otherwise.
    pub fn sample(&mut self, event: ViewportEvent) -> Option<SectionId> {
        let resolved = self.measure(event)?;
        self.publish(&resolved);
        Some(resolved)
    }

    /// Like [`ScrollSpy::sample`], but subscribers run after the borrow on
    /// `spy` is released, so they may call back into the controller
    /// (navigate, read the active section, subscribe or unsubscribe).
    ///
    /// A change resolved by a sample taken from inside a subscriber is
    /// delivered to every subscriber once the current delivery finishes.
    ///
    /// # Errors
    ///
    /// Returns `SpyError::Busy` without sampling if `spy` is already
    /// borrowed.
    pub fn sample_shared(
        spy: &RefCell<Self>,
        event: ViewportEvent,
    ) -> Result<Option<SectionId>, SpyError> {
        let changed = {
            let mut inner = spy.try_borrow_mut().map_err(|_| SpyError::Busy)?;
            let Some(resolved) = inner.measure(event) else {
                return Ok(None);
            };
            if let Some(delivery) = inner.delivery.as_mut() {
                delivery.queued.push_back(resolved.clone());
                return Ok(Some(resolved));
            }
            inner.delivery = Some(Delivery::default());
            resolved
        };

        let mut next = Some(changed.clone());
        while let Some(id) = next {
            let mut subscribers = {
                let mut inner = spy.borrow_mut();
                let inner = &mut *inner;
                let subscribers = std::mem::take(&mut inner.subscribers);
                if let Some(delivery) = inner.delivery.as_mut() {
                    delivery.in_flight = subscribers.iter().map(|(sid, _)| *sid).collect();
                }
                subscribers
            };

            for (sid, callback) in subscribers.iter_mut() {
                let cancelled = spy
                    .borrow()
                    .delivery
                    .as_ref()
                    .is_some_and(|delivery| delivery.cancelled.contains(sid));
                if !cancelled {
                    callback(&id);
                }
            }

            let mut inner = spy.borrow_mut();
            let inner = &mut *inner;
            let added = std::mem::replace(&mut inner.subscribers, subscribers);
            inner.subscribers.extend(added);
            next = match inner.delivery.as_mut() {
                Some(delivery) => {
                    let cancelled = std::mem::take(&mut delivery.cancelled);
                    inner
                        .subscribers
                        .retain(|(sid, _)| !cancelled.contains(sid));
                    delivery.queued.pop_front()
                }
                None => None,
            };
        }
        spy.borrow_mut().delivery = None;
        Ok(Some(changed))
    }

    /// Refreshes the viewport state and resolves the active section without
    /// notifying anyone. Returns the new id when it changed.
    fn measure(&mut self, event: ViewportEvent) -> Option<SectionId> {
        if !self.phase.is_mounted() {
            log::trace!("Ignoring '{}' sample on unmounted ScrollSpy.", event);
            return None;
        }

        let scroll_offset = self.layout.scroll_offset();
        let marker_offset = scroll_offset + self.config.lookahead_bias;
        self.viewport.scroll_offset = scroll_offset;
        self.viewport.marker_offset = marker_offset;
        self.viewport.samples += 1;
        self.advance_phase(event, scroll_offset);

        log::trace!(
            "Sample #{} ({}): offset {}, marker {}",
            self.viewport.samples,
            event,
            scroll_offset,
            marker_offset
        );

        let resolved = self.resolve_at(marker_offset).map(|section| section.id.clone())?;
        if self.viewport.active_section_id.as_ref() == Some(&resolved) {
            return None;
        }

        log::debug!(
            "Active section {} -> {} (marker {}).",
            self.viewport
                .active_section_id
                .as_ref()
                .map_or("<none>", SectionId::as_str),
            resolved,
            marker_offset
        );
        self.viewport.active_section_id = Some(resolved.clone());
        Some(resolved)
    }

    /// First section, in catalog order, whose current bounds contain `marker`.
    ///
    /// Sections with no rendered region are skipped.
    pub fn resolve_at(&self, marker: f64) -> Option<&Section> {
        self.catalog.iter().find(|section| {
            match self.layout.section_bounds(section.id.as_str()) {
                Some(bounds) => bounds.contains(marker),
                None => {
                    log::debug!("No geometry for section '{}' this sample.", section.id);
                    false
                }
            }
        })
    }

    /// Smoothly scrolls the viewport so `id`'s top edge meets the viewport top.
    ///
    /// A request made while another scroll is in flight replaces its target.
    /// A request made before the first sample (`Idle`) starts scrolling
    /// right away; the target comes from live geometry.
    ///
    /// # Errors
    ///
    /// - `SpyError::Catalog(NotFound)` if `id` is not in the catalog; nothing changes
    /// - `SpyError::Unregistered` if the section has no rendered region
    /// - `SpyError::Mount` if the controller is not mounted
    pub fn scroll_to_section(&mut self, id: &str) -> Result<(), SpyError> {
        let target = self.catalog.get(id)?.id.clone();
        if !self.phase.is_mounted() {
            return Err(SpyError::Mount(format!(
                "cannot navigate to '{id}': page is not mounted"
            )));
        }
        let bounds = self
            .layout
            .section_bounds(id)
            .ok_or_else(|| SpyError::Unregistered(id.to_string()))?;

        if let SpyPhase::Scrolling { target: previous, .. } = &self.phase {
            log::debug!("Navigation to '{}' overrides scroll to '{}'.", target, previous);
        }

        self.layout.scroll_to(bounds.top, ScrollBehavior::Smooth);

        let current = self.layout.scroll_offset();
        if (current - bounds.top).abs() <= self.config.settle_tolerance {
            // Already there: the platform will not emit any scroll events.
            self.phase = SpyPhase::Tracking;
        } else {
            log::debug!("Scrolling to '{}' at offset {}.", target, bounds.top);
            self.phase = SpyPhase::Scrolling {
                target,
                target_offset: bounds.top,
            };
        }
        Ok(())
    }

    /// Navigates to the section after the active one (the first section when
    /// nothing is active yet).
    ///
    /// Returns the id navigated to, or `None` when already at the last section.
    pub fn scroll_to_next(&mut self) -> Result<Option<SectionId>, SpyError> {
        let next = match &self.viewport.active_section_id {
            Some(active) => self
                .catalog
                .next_after(active.as_str())?
                .map(|section| section.id.clone()),
            None => Some(self.catalog.first().id.clone()),
        };
        match next {
            Some(id) => {
                self.scroll_to_section(id.as_str())?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Checks that catalog sections and rendered regions match one to one:
    /// every section has a region, and every region is a distinct catalog id.
    pub fn verify_registration(&self) -> Result<(), SpyError> {
        if let Some(missing) = self
            .catalog
            .iter()
            .find(|section| self.layout.section_bounds(section.id.as_str()).is_none())
        {
            return Err(SpyError::Unregistered(missing.id.to_string()));
        }

        let rendered = self.layout.rendered_regions();
        let mut seen = HashSet::with_capacity(rendered.len());
        for id in &rendered {
            if !self.catalog.contains(id.as_str()) {
                return Err(SpyError::UnknownRegion(id.to_string()));
            }
            if !seen.insert(id) {
                return Err(SpyError::DuplicateRegion(id.to_string()));
            }
        }
        Ok(())
    }

    /// Registers `callback` to run whenever the active section changes.
    ///
    /// With [`ScrollSpy::sample`] callbacks run while the controller is
    /// borrowed. Samples delivered through [`ScrollSpy::sample_shared`] (as
    /// [`MountedPage`](crate::MountedPage) does) release it first.
    pub fn subscribe(&mut self, callback: impl FnMut(&SectionId) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        if self.subscribers.len() != before {
            return true;
        }
        // Taken out for delivery: drop it when the round ends.
        match self.delivery.as_mut() {
            Some(delivery)
                if delivery.in_flight.contains(&id) && !delivery.cancelled.contains(&id) =>
            {
                delivery.cancelled.push(id);
                true
            }
            _ => false,
        }
    }

    /// Keeps `nav` highlighted in step with this controller.
    pub fn bind_nav_bar(&mut self, nav: &SharedNavBar) -> SubscriberId {
        if let Some(active) = &self.viewport.active_section_id {
            nav.borrow_mut().set_active(active);
        }
        let nav = SharedNavBar::clone(nav);
        self.subscribe(move |id| {
            nav.borrow_mut().set_active(id);
        })
    }

    fn publish(&mut self, id: &SectionId) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(id);
        }
    }

    fn advance_phase(&mut self, event: ViewportEvent, scroll_offset: f64) {
        let next = match &self.phase {
            SpyPhase::Unmounted => return,
            SpyPhase::Idle => SpyPhase::Tracking,
            SpyPhase::Tracking => return,
            SpyPhase::Scrolling {
                target,
                target_offset,
            } => {
                let settled = event == ViewportEvent::ScrollEnd
                    || (scroll_offset - target_offset).abs() <= self.config.settle_tolerance;
                if !settled {
                    return;
                }
                log::debug!("Scroll to '{}' settled at offset {}.", target, scroll_offset);
                SpyPhase::Tracking
            }
        };
        self.phase = next;
    }
}
