// src/replay.rs
//! Replays a scripted visit against a catalog and an in-memory layout.
//!
//! This is the native driver for the controller: the layout stands in for
//! the rendered page, a [`ManualViewport`] for the window's event stream, and
//! smooth scrolls are animated in fixed-size frames.

use crate::error::ReplayError;
use folio_catalog::Catalog;
use folio_core::{MountedPage, ScrollSpy, SharedNavBar, SpyConfig};
use folio_traits::{InMemoryLayout, LayoutProvider, ManualViewport, RegionSpec, ViewportEvent};
use folio_types::{Bounds, SectionId};
use serde::Deserialize;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::path::Path;
use std::rc::Rc;
use std::str::FromStr;

/// Height given to each section by [`uniform_layout`] unless overridden.
pub const DEFAULT_SECTION_HEIGHT: f64 = 800.0;

/// Distance a smooth scroll travels per emitted frame.
pub const DEFAULT_ANIMATION_STEP: f64 = 120.0;

/// A `{ "sections": [{ "id", "top", "height" }] }` layout document.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutDocument {
    pub sections: Vec<RegionSpec>,
}

impl LayoutDocument {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReplayError> {
        let source = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to read layout from '{}': {}", path.as_ref().display(), e),
            )
        })?;
        Ok(serde_json::from_str(&source)?)
    }

    pub fn into_layout(self) -> Result<InMemoryLayout, ReplayError> {
        Ok(InMemoryLayout::from_regions(self.sections)?)
    }
}

/// Stacks every catalog section top to bottom with the same height.
pub fn uniform_layout(catalog: &Catalog, height: f64) -> Result<InMemoryLayout, ReplayError> {
    let layout = InMemoryLayout::new();
    for (index, section) in catalog.iter().enumerate() {
        layout.add_region(section.id.clone(), Bounds::new(index as f64 * height, height))?;
    }
    Ok(layout)
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayStep {
    /// The visitor scrolls to an absolute offset.
    Scroll(f64),
    /// The window is resized (geometry re-sampled, offset unchanged).
    Resize,
    /// A navigation bar entry is activated.
    Navigate(String),
    /// The "scroll down" cue is activated.
    NavigateNext,
    /// The call-to-action button is activated.
    CallToAction,
}

impl FromStr for ReplayStep {
    type Err = ReplayError;

    /// Accepts `450`, `scroll:450`, `resize`, `nav:<id>`, `next`, `cta`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse_offset = |raw: &str| {
            raw.trim()
                .parse::<f64>()
                .ok()
                .filter(|offset| offset.is_finite())
                .map(ReplayStep::Scroll)
                .ok_or_else(|| ReplayError::Input(format!("invalid scroll offset '{raw}'")))
        };

        match s.split_once(':') {
            Some(("scroll", offset)) => parse_offset(offset),
            Some(("nav" | "navigate", id)) if !id.trim().is_empty() => {
                Ok(ReplayStep::Navigate(id.trim().to_string()))
            }
            Some(_) => Err(ReplayError::Input(format!("unknown step '{s}'"))),
            None => match s {
                "resize" => Ok(ReplayStep::Resize),
                "next" => Ok(ReplayStep::NavigateNext),
                "cta" => Ok(ReplayStep::CallToAction),
                other => parse_offset(other),
            },
        }
    }
}

impl fmt::Display for ReplayStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayStep::Scroll(offset) => write!(f, "scroll:{offset}"),
            ReplayStep::Resize => f.write_str("resize"),
            ReplayStep::Navigate(id) => write!(f, "nav:{id}"),
            ReplayStep::NavigateNext => f.write_str("next"),
            ReplayStep::CallToAction => f.write_str("cta"),
        }
    }
}

/// A published change of active section.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Index of the step during which the change happened; `None` for the
    /// measurement taken at mount.
    pub step: Option<usize>,
    /// Scroll offset at the sample that produced it.
    pub offset: f64,
    pub active: SectionId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    pub transitions: Vec<Transition>,
    pub final_active: Option<SectionId>,
    pub final_offset: f64,
}

type Page = MountedPage<Rc<InMemoryLayout>, Rc<ManualViewport>>;

/// A mounted page driven by scripted steps.
#[derive(Debug)]
pub struct Replay {
    page: Page,
    nav: SharedNavBar,
    layout: Rc<InMemoryLayout>,
    viewport: Rc<ManualViewport>,
    animation_step: f64,
    current_step: Rc<Cell<Option<usize>>>,
    transitions: Rc<RefCell<Vec<Transition>>>,
}

impl Replay {
    pub fn new(
        catalog: Catalog,
        layout: InMemoryLayout,
        config: SpyConfig,
    ) -> Result<Self, ReplayError> {
        let layout = Rc::new(layout);
        let viewport = Rc::new(ManualViewport::new());
        let current_step = Rc::new(Cell::new(None));
        let transitions = Rc::new(RefCell::new(Vec::new()));

        let mut spy = ScrollSpy::new(catalog, Rc::clone(&layout), config)?;
        {
            let layout = Rc::clone(&layout);
            let current_step = Rc::clone(&current_step);
            let transitions = Rc::clone(&transitions);
            spy.subscribe(move |id| {
                transitions.borrow_mut().push(Transition {
                    step: current_step.get(),
                    offset: layout.scroll_offset(),
                    active: id.clone(),
                });
            });
        }
        let page = MountedPage::mount(spy, Rc::clone(&viewport))?;
        let nav = page.nav_bar()?;

        Ok(Self {
            page,
            nav,
            layout,
            viewport,
            animation_step: DEFAULT_ANIMATION_STEP,
            current_step,
            transitions,
        })
    }

    pub fn with_animation_step(mut self, step: f64) -> Result<Self, ReplayError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(ReplayError::Input(format!(
                "animation step must be a positive number (got {step})"
            )));
        }
        self.animation_step = step;
        Ok(self)
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// The navigation bar highlighted by this replay.
    pub fn nav_bar(&self) -> &SharedNavBar {
        &self.nav
    }

    pub fn layout(&self) -> &InMemoryLayout {
        &self.layout
    }

    /// Applies one step, emitting the events a browser would.
    pub fn apply(&mut self, index: usize, step: &ReplayStep) -> Result<(), ReplayError> {
        self.current_step.set(Some(index));
        log::debug!("Step {}: {}", index, step);
        match step {
            ReplayStep::Scroll(offset) => {
                self.layout.set_scroll_offset(*offset);
                self.viewport.emit(ViewportEvent::Scroll);
            }
            ReplayStep::Resize => {
                self.viewport.emit(ViewportEvent::Resize);
            }
            ReplayStep::Navigate(id) => {
                self.page.navigate(id)?;
                self.animate();
            }
            ReplayStep::NavigateNext => {
                if self.page.navigate_next()?.is_some() {
                    self.animate();
                }
            }
            ReplayStep::CallToAction => {
                let target = self.nav.borrow().call_to_action().clone();
                self.page.navigate(target.as_str())?;
                self.animate();
            }
        }
        Ok(())
    }

    /// Runs every step in order and reports the published transitions.
    pub fn run(&mut self, steps: &[ReplayStep]) -> Result<ReplayReport, ReplayError> {
        for (index, step) in steps.iter().enumerate() {
            self.apply(index, step)?;
        }
        Ok(self.report())
    }

    pub fn report(&self) -> ReplayReport {
        ReplayReport {
            transitions: self.transitions.borrow().clone(),
            final_active: self.page.active_section(),
            final_offset: self.layout.scroll_offset(),
        }
    }

    fn animate(&self) {
        if self.layout.pending_scroll().is_none() {
            return;
        }
        while !self.layout.step_animation(self.animation_step) {
            self.viewport.emit(ViewportEvent::Scroll);
        }
        self.viewport.emit(ViewportEvent::Scroll);
        self.viewport.emit(ViewportEvent::ScrollEnd);
    }
}
