//! Browser implementations of the layout and viewport-event seams.
//!
//! Geometry comes straight from the live document on every call
//! (`offsetTop`/`offsetHeight` of the element whose id matches the section),
//! and scroll commands go through `window.scrollTo`.

use crate::error::FolioError;
use folio_traits::{EventSourceError, LayoutProvider, ViewportEvent, ViewportEvents, ViewportHandler};
use folio_types::{Bounds, ScrollBehavior, SectionId};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, ScrollToOptions, Window};

/// DOM events forwarded to the controller.
const VIEWPORT_EVENTS: [(&str, ViewportEvent); 3] = [
    ("scroll", ViewportEvent::Scroll),
    ("resize", ViewportEvent::Resize),
    ("scrollend", ViewportEvent::ScrollEnd),
];

/// Elements considered rendered sections by [`DomLayout::rendered_regions`].
const SECTION_SELECTOR: &str = "section[id]";

fn window() -> Result<Window, FolioError> {
    web_sys::window().ok_or_else(|| FolioError::mount("No window object available"))
}

/// Reads section geometry from the current document.
#[derive(Debug, Clone)]
pub struct DomLayout {
    window: Window,
    document: Document,
}

impl DomLayout {
    pub fn from_window() -> Result<Self, FolioError> {
        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| FolioError::mount("No document object available"))?;
        Ok(Self { window, document })
    }

    fn section_element(&self, id: &str) -> Option<HtmlElement> {
        self.document
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()
    }
}

impl LayoutProvider for DomLayout {
    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn section_bounds(&self, id: &str) -> Option<Bounds> {
        let element = self.section_element(id)?;
        Some(Bounds::new(
            f64::from(element.offset_top()),
            f64::from(element.offset_height()),
        ))
    }

    fn scroll_to(&self, offset: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(offset);
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn rendered_regions(&self) -> Vec<SectionId> {
        let Ok(nodes) = self.document.query_selector_all(SECTION_SELECTOR) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| SectionId::from(element.id()))
            .collect()
    }

    fn name(&self) -> &'static str {
        "DomLayout"
    }
}

/// Window listeners registered by [`DomViewportEvents::listen`].
///
/// Hand it back to `unlisten`; the JS callbacks are removed before the
/// closure is dropped.
pub struct DomListener {
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl std::fmt::Debug for DomListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomListener").finish_non_exhaustive()
    }
}

/// `scroll`/`resize`/`scrollend` notifications from the window.
#[derive(Debug, Clone)]
pub struct DomViewportEvents {
    window: Window,
}

impl DomViewportEvents {
    pub fn from_window() -> Result<Self, FolioError> {
        Ok(Self { window: window()? })
    }

    fn remove_all(&self, closure: &Closure<dyn FnMut(web_sys::Event)>) {
        for (name, _) in VIEWPORT_EVENTS {
            self.window
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .ok();
        }
    }
}

impl ViewportEvents for DomViewportEvents {
    type Listener = DomListener;

    fn listen(&self, mut handler: ViewportHandler) -> Result<DomListener, EventSourceError> {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let kind = event.type_();
            if let Some((_, viewport_event)) =
                VIEWPORT_EVENTS.iter().find(|(name, _)| *name == kind)
            {
                handler(*viewport_event);
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        for (name, _) in VIEWPORT_EVENTS {
            if let Err(e) = self
                .window
                .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            {
                self.remove_all(&closure);
                return Err(EventSourceError::Rejected {
                    event: name.to_string(),
                    message: format!("{:?}", e),
                });
            }
        }

        log::debug!("Attached window viewport listeners.");
        Ok(DomListener { closure })
    }

    fn unlisten(&self, listener: DomListener) {
        self.remove_all(&listener.closure);
        log::debug!("Detached window viewport listeners.");
    }
}
