pub mod fixtures;

use folio::{
    Catalog, InMemoryLayout, ManualViewport, MountedPage, ScrollSpy, SectionId, SpyConfig,
    ViewportEvent,
};
use std::cell::RefCell;
use std::rc::Rc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub type TestPage = MountedPage<Rc<InMemoryLayout>, Rc<ManualViewport>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A mounted page wired to an in-memory layout and a hand-driven viewport.
pub struct Harness {
    pub page: TestPage,
    pub layout: Rc<InMemoryLayout>,
    pub viewport: Rc<ManualViewport>,
    /// Every id published to subscribers, in order.
    pub published: Rc<RefCell<Vec<SectionId>>>,
}

impl Harness {
    pub fn mount(
        catalog: Catalog,
        layout: InMemoryLayout,
        config: SpyConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        init_logger();
        let layout = Rc::new(layout);
        let viewport = Rc::new(ManualViewport::new());
        let published = Rc::new(RefCell::new(Vec::new()));

        let mut spy = ScrollSpy::new(catalog, Rc::clone(&layout), config)?;
        let sink = Rc::clone(&published);
        spy.subscribe(move |id| sink.borrow_mut().push(id.clone()));

        let page = MountedPage::mount(spy, Rc::clone(&viewport))?;
        Ok(Self {
            page,
            layout,
            viewport,
            published,
        })
    }

    /// Moves the viewport and emits a `scroll` event.
    pub fn scroll_to(&self, offset: f64) -> Option<SectionId> {
        self.layout.set_scroll_offset(offset);
        self.viewport.emit(ViewportEvent::Scroll);
        self.page.active_section()
    }

    /// Plays out a pending smooth scroll `step` units per frame, then emits
    /// `scrollend`.
    pub fn animate(&self, step: f64) {
        while !self.layout.step_animation(step) {
            self.viewport.emit(ViewportEvent::Scroll);
        }
        self.viewport.emit(ViewportEvent::Scroll);
        self.viewport.emit(ViewportEvent::ScrollEnd);
    }

    pub fn published_ids(&self) -> Vec<String> {
        self.published
            .borrow()
            .iter()
            .map(|id| id.to_string())
            .collect()
    }
}
