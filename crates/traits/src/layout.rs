//! LayoutProvider trait for abstracting page geometry.
//!
//! The scroll-spy never owns the layout. It asks the rendering side for the
//! *current* position of each section on every sample, and hands scroll
//! commands back to it. This keeps the controller independent of the DOM.

use folio_types::{Bounds, ScrollBehavior, SectionId};
use serde::Deserialize;
use std::cell::{Cell, RefCell};
use std::fmt::Debug;
use std::rc::Rc;
use thiserror::Error;

/// Error type for building a layout description.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Region '{0}' is laid out more than once")]
    DuplicateRegion(String),

    #[error("Region '{id}' has invalid bounds (top: {top}, height: {height})")]
    InvalidBounds { id: String, top: f64, height: f64 },
}

/// A trait for querying live section geometry and commanding scrolls.
///
/// Implementations must answer from the current layout, never from a
/// snapshot taken at mount time: content height can change under reflow.
///
/// # Implementations
///
/// - `InMemoryLayout`: scripted geometry for tests and the CLI
/// - `DomLayout` (folio-wasm): reads `offsetTop`/`offsetHeight` from the document
pub trait LayoutProvider: Debug {
    /// Current vertical scroll distance of the viewport.
    fn scroll_offset(&self) -> f64;

    /// Current bounds of the region rendered for `id`.
    ///
    /// Returns `None` if no region is rendered for that id (yet).
    fn section_bounds(&self, id: &str) -> Option<Bounds>;

    /// Move the viewport so that its top sits at `offset`.
    ///
    /// Fire-and-forget: completion is only observable through later
    /// viewport events.
    fn scroll_to(&self, offset: f64, behavior: ScrollBehavior);

    /// Ids of every section region currently present in the rendered page.
    fn rendered_regions(&self) -> Vec<SectionId>;

    /// Returns a human-readable name for this provider (for logging/debugging).
    fn name(&self) -> &'static str;
}

impl<T: LayoutProvider + ?Sized> LayoutProvider for Rc<T> {
    fn scroll_offset(&self) -> f64 {
        (**self).scroll_offset()
    }

    fn section_bounds(&self, id: &str) -> Option<Bounds> {
        (**self).section_bounds(id)
    }

    fn scroll_to(&self, offset: f64, behavior: ScrollBehavior) {
        (**self).scroll_to(offset, behavior)
    }

    fn rendered_regions(&self) -> Vec<SectionId> {
        (**self).rendered_regions()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// One region in a serialized layout description.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegionSpec {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// A scroll command received by an [`InMemoryLayout`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub target: f64,
    pub behavior: ScrollBehavior,
}

/// An in-memory layout.
///
/// Geometry is mutable behind `&self` so a test can reflow the page while a
/// controller holds the provider. Smooth scrolls are recorded as pending and
/// only move the viewport when [`InMemoryLayout::step_animation`] or
/// [`InMemoryLayout::finish_animation`] is called, which stands in for the
/// platform's animation timer.
#[derive(Debug, Default)]
pub struct InMemoryLayout {
    regions: RefCell<Vec<(SectionId, Bounds)>>,
    offset: Cell<f64>,
    pending: Cell<Option<ScrollRequest>>,
    history: RefCell<Vec<ScrollRequest>>,
}

impl InMemoryLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a layout from serialized region descriptions.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::DuplicateRegion` if an id repeats and
    /// `LayoutError::InvalidBounds` for non-finite or negative-height regions.
    pub fn from_regions(
        regions: impl IntoIterator<Item = RegionSpec>,
    ) -> Result<Self, LayoutError> {
        let layout = Self::new();
        for region in regions {
            layout.add_region(region.id, Bounds::new(region.top, region.height))?;
        }
        Ok(layout)
    }

    /// Builder-style variant of [`InMemoryLayout::add_region`].
    pub fn with_region(
        self,
        id: impl Into<SectionId>,
        bounds: Bounds,
    ) -> Result<Self, LayoutError> {
        self.add_region(id, bounds)?;
        Ok(self)
    }

    /// Add a new region.
    ///
    /// # Errors
    ///
    /// Fails if the id is already laid out or the bounds are unusable.
    pub fn add_region(&self, id: impl Into<SectionId>, bounds: Bounds) -> Result<(), LayoutError> {
        let id = id.into();
        validate_bounds(&id, bounds)?;
        let mut regions = self.regions.borrow_mut();
        if regions.iter().any(|(existing, _)| *existing == id) {
            return Err(LayoutError::DuplicateRegion(id.to_string()));
        }
        regions.push((id, bounds));
        Ok(())
    }

    /// Replace the bounds of a region, adding it if absent (simulates reflow).
    pub fn set_region(&self, id: impl Into<SectionId>, bounds: Bounds) -> Result<(), LayoutError> {
        let id = id.into();
        validate_bounds(&id, bounds)?;
        let mut regions = self.regions.borrow_mut();
        match regions.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, slot)) => *slot = bounds,
            None => regions.push((id, bounds)),
        }
        Ok(())
    }

    /// Remove a region, returning its last bounds.
    pub fn remove_region(&self, id: &str) -> Option<Bounds> {
        let mut regions = self.regions.borrow_mut();
        let index = regions.iter().position(|(existing, _)| existing == id)?;
        Some(regions.remove(index).1)
    }

    /// Move the viewport directly, as a visitor dragging the scrollbar would.
    pub fn set_scroll_offset(&self, offset: f64) {
        self.offset.set(offset.max(0.0));
    }

    /// The smooth scroll currently in flight, if any.
    pub fn pending_scroll(&self) -> Option<ScrollRequest> {
        self.pending.get()
    }

    /// Every scroll command received so far, oldest first.
    pub fn scroll_history(&self) -> Vec<ScrollRequest> {
        self.history.borrow().clone()
    }

    /// Advance a pending smooth scroll by at most `step` units.
    ///
    /// Returns `true` once the viewport has reached the target (or when
    /// there is nothing in flight).
    pub fn step_animation(&self, step: f64) -> bool {
        let Some(request) = self.pending.get() else {
            return true;
        };
        let current = self.offset.get();
        let distance = request.target - current;
        if distance.abs() <= step {
            self.offset.set(request.target);
            self.pending.set(None);
            true
        } else {
            self.offset.set(current + step.copysign(distance));
            false
        }
    }

    /// Complete any pending smooth scroll immediately.
    pub fn finish_animation(&self) {
        if let Some(request) = self.pending.take() {
            self.offset.set(request.target);
        }
    }

    pub fn len(&self) -> usize {
        self.regions.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.borrow().is_empty()
    }
}

fn validate_bounds(id: &SectionId, bounds: Bounds) -> Result<(), LayoutError> {
    if !bounds.is_finite() || bounds.height < 0.0 {
        return Err(LayoutError::InvalidBounds {
            id: id.to_string(),
            top: bounds.top,
            height: bounds.height,
        });
    }
    Ok(())
}

impl LayoutProvider for InMemoryLayout {
    fn scroll_offset(&self) -> f64 {
        self.offset.get()
    }

    fn section_bounds(&self, id: &str) -> Option<Bounds> {
        self.regions
            .borrow()
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, bounds)| *bounds)
    }

    fn scroll_to(&self, offset: f64, behavior: ScrollBehavior) {
        let target = offset.max(0.0);
        let request = ScrollRequest { target, behavior };
        self.history.borrow_mut().push(request);
        match behavior {
            ScrollBehavior::Instant => {
                self.pending.set(None);
                self.offset.set(target);
            }
            // A new request replaces whatever animation is in flight.
            ScrollBehavior::Smooth => self.pending.set(Some(request)),
        }
    }

    fn rendered_regions(&self) -> Vec<SectionId> {
        self.regions
            .borrow()
            .iter()
            .map(|(id, _)| id.clone())
            .collect()
    }

    fn name(&self) -> &'static str {
        "InMemoryLayout"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_sections() -> InMemoryLayout {
        InMemoryLayout::new()
            .with_region("a", Bounds::new(0.0, 500.0))
            .unwrap()
            .with_region("b", Bounds::new(500.0, 500.0))
            .unwrap()
            .with_region("c", Bounds::new(1000.0, 500.0))
            .unwrap()
    }

    #[test]
    fn test_bounds_lookup() {
        let layout = three_sections();
        assert_eq!(layout.section_bounds("b"), Some(Bounds::new(500.0, 500.0)));
        assert_eq!(layout.section_bounds("zzz"), None);
        assert_eq!(layout.len(), 3);
    }

    #[test]
    fn test_duplicate_region_rejected() {
        let result = three_sections().with_region("a", Bounds::new(10.0, 10.0));
        assert_eq!(result.unwrap_err(), LayoutError::DuplicateRegion("a".into()));
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let layout = InMemoryLayout::new();
        assert!(matches!(
            layout.add_region("x", Bounds::new(0.0, -1.0)),
            Err(LayoutError::InvalidBounds { .. })
        ));
        assert!(matches!(
            layout.add_region("y", Bounds::new(f64::NAN, 1.0)),
            Err(LayoutError::InvalidBounds { .. })
        ));
        assert!(layout.is_empty());
    }

    #[test]
    fn test_set_region_reflows_in_place() {
        let layout = three_sections();
        layout.set_region("b", Bounds::new(500.0, 900.0)).unwrap();
        assert_eq!(layout.section_bounds("b"), Some(Bounds::new(500.0, 900.0)));
        assert_eq!(layout.len(), 3);
    }

    #[test]
    fn test_remove_region() {
        let layout = three_sections();
        assert_eq!(layout.remove_region("c"), Some(Bounds::new(1000.0, 500.0)));
        assert_eq!(layout.remove_region("c"), None);
        assert_eq!(
            layout.rendered_regions(),
            vec![SectionId::new("a"), SectionId::new("b")]
        );
    }

    #[test]
    fn test_instant_scroll_moves_immediately() {
        let layout = three_sections();
        layout.scroll_to(1000.0, ScrollBehavior::Instant);
        assert_eq!(layout.scroll_offset(), 1000.0);
        assert!(layout.pending_scroll().is_none());
    }

    #[test]
    fn test_smooth_scroll_animates_in_steps() {
        let layout = three_sections();
        layout.scroll_to(500.0, ScrollBehavior::Smooth);
        assert_eq!(layout.scroll_offset(), 0.0);

        assert!(!layout.step_animation(200.0));
        assert_eq!(layout.scroll_offset(), 200.0);
        assert!(!layout.step_animation(200.0));
        assert!(layout.step_animation(200.0));
        assert_eq!(layout.scroll_offset(), 500.0);
        assert!(layout.pending_scroll().is_none());
    }

    #[test]
    fn test_smooth_scroll_upwards() {
        let layout = three_sections();
        layout.set_scroll_offset(1000.0);
        layout.scroll_to(0.0, ScrollBehavior::Smooth);
        assert!(!layout.step_animation(300.0));
        assert_eq!(layout.scroll_offset(), 700.0);
        layout.finish_animation();
        assert_eq!(layout.scroll_offset(), 0.0);
    }

    #[test]
    fn test_last_smooth_request_wins() {
        let layout = three_sections();
        layout.scroll_to(500.0, ScrollBehavior::Smooth);
        layout.scroll_to(1000.0, ScrollBehavior::Smooth);
        layout.finish_animation();
        assert_eq!(layout.scroll_offset(), 1000.0);
        assert_eq!(layout.scroll_history().len(), 2);
    }

    #[test]
    fn test_negative_offsets_clamped() {
        let layout = three_sections();
        layout.set_scroll_offset(-50.0);
        assert_eq!(layout.scroll_offset(), 0.0);
    }

    #[test]
    fn test_from_regions() {
        let layout = InMemoryLayout::from_regions(vec![
            RegionSpec { id: "a".into(), top: 0.0, height: 10.0 },
            RegionSpec { id: "b".into(), top: 10.0, height: 10.0 },
        ])
        .unwrap();
        assert_eq!(layout.len(), 2);
    }

    #[test]
    fn test_rc_forwards_to_inner() {
        let layout = Rc::new(three_sections());
        let provider: &dyn LayoutProvider = &layout;
        layout.set_scroll_offset(42.0);
        assert_eq!(provider.scroll_offset(), 42.0);
        assert_eq!(provider.name(), "InMemoryLayout");
    }
}
