//! `PortfolioPage`: the JavaScript entry point.
//!
//! ```javascript
//! const page = new PortfolioPage();           // built-in catalog, default config
//! page.onActiveChange(id => highlight(id));
//! page.mount();
//! navButton.onclick = () => page.navigate("projects");
//! // ...
//! page.unmount();                              // or page.free()
//! ```

use crate::dom::{DomLayout, DomViewportEvents};
use crate::error::FolioError;
use crate::types::NavEntryView;
use folio_catalog::Catalog;
use folio_core::{MountedPage, NavBar, ScrollSpy, SharedNavBar, SpyConfig};
use folio_types::SectionId;
use std::sync::Arc;
use wasm_bindgen::prelude::*;

type DomPage = MountedPage<DomLayout, DomViewportEvents>;

/// A single-page portfolio with scroll-spy navigation.
#[wasm_bindgen]
pub struct PortfolioPage {
    catalog: Arc<Catalog>,
    config: SpyConfig,
    nav: SharedNavBar,
    callbacks: Vec<js_sys::Function>,
    mounted: Option<DomPage>,
}

#[wasm_bindgen]
impl PortfolioPage {
    /// Create a page from an optional catalog JSON document and an optional
    /// config JSON document. Without a catalog the built-in portfolio is used.
    #[wasm_bindgen(constructor)]
    pub fn new(
        catalog_json: Option<String>,
        config_json: Option<String>,
    ) -> Result<PortfolioPage, JsValue> {
        let catalog = match catalog_json.as_deref() {
            Some(json) => Catalog::from_json(json).map_err(FolioError::from)?,
            None => Catalog::builtin().map_err(FolioError::from)?,
        };
        let config = match config_json.as_deref() {
            Some(json) => SpyConfig::from_json(json).map_err(FolioError::from)?,
            None => SpyConfig::default(),
        };
        let nav = NavBar::shared(&catalog);

        Ok(Self {
            catalog: Arc::new(catalog),
            config,
            nav,
            callbacks: Vec::new(),
            mounted: None,
        })
    }

    /// Attach the window listeners and take the first measurement.
    ///
    /// Calling `mount` on a mounted page does nothing.
    pub fn mount(&mut self) -> Result<(), JsValue> {
        if self.mounted.is_some() {
            return Ok(());
        }

        let layout = DomLayout::from_window()?;
        let events = DomViewportEvents::from_window()?;
        let mut spy = ScrollSpy::new(Arc::clone(&self.catalog), layout, self.config.clone())
            .map_err(FolioError::from)?;

        // Reset the highlight from any previous mount cycle.
        self.nav = NavBar::shared(&self.catalog);
        spy.bind_nav_bar(&self.nav);
        for callback in &self.callbacks {
            spy.subscribe(js_listener(callback.clone()));
        }

        let page = MountedPage::mount(spy, events).map_err(FolioError::from)?;
        self.mounted = Some(page);
        Ok(())
    }

    /// Detach the window listeners. Returns the last active section id.
    pub fn unmount(&mut self) -> Option<String> {
        self.mounted
            .take()
            .and_then(|page| page.unmount())
            .map(|id| id.to_string())
    }

    #[wasm_bindgen(getter, js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Smoothly scroll to the section with the given id.
    pub fn navigate(&self, id: &str) -> Result<(), JsValue> {
        self.page()?.navigate(id).map_err(FolioError::from)?;
        Ok(())
    }

    /// Smoothly scroll to the section after the active one.
    ///
    /// Resolves to the target id, or `undefined` at the last section.
    #[wasm_bindgen(js_name = navigateNext)]
    pub fn navigate_next(&self) -> Result<Option<String>, JsValue> {
        let next = self.page()?.navigate_next().map_err(FolioError::from)?;
        Ok(next.map(|id| id.to_string()))
    }

    /// Scroll to the navigation bar's call-to-action target (the last section).
    #[wasm_bindgen(js_name = navigateToCallToAction)]
    pub fn navigate_to_call_to_action(&self) -> Result<(), JsValue> {
        let target = self.nav.borrow().call_to_action().clone();
        self.navigate(target.as_str())
    }

    #[wasm_bindgen(getter, js_name = activeSection)]
    pub fn active_section(&self) -> Option<String> {
        self.nav.borrow().active().map(|item| item.id.to_string())
    }

    /// `[{ id, label, active }]` in catalog order.
    #[wasm_bindgen(js_name = navEntries)]
    pub fn nav_entries(&self) -> Result<JsValue, JsValue> {
        let entries: Vec<NavEntryView> =
            self.nav.borrow().items().iter().map(NavEntryView::from).collect();
        Ok(serde_wasm_bindgen::to_value(&entries).map_err(FolioError::from)?)
    }

    /// The full catalog, including content payloads, for rendering.
    pub fn sections(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(self.catalog.list()).map_err(FolioError::from)?)
    }

    /// Call `callback(id)` whenever the active section changes.
    ///
    /// The callback may call back into the page, e.g. `navigate`.
    #[wasm_bindgen(js_name = onActiveChange)]
    pub fn on_active_change(&mut self, callback: js_sys::Function) -> Result<(), JsValue> {
        if let Some(page) = &self.mounted {
            page.subscribe(js_listener(callback.clone()))
                .map_err(FolioError::from)?;
        }
        self.callbacks.push(callback);
        Ok(())
    }

    /// Check that every catalog section has a `<section id>` and vice versa.
    #[wasm_bindgen(js_name = verifyRegistration)]
    pub fn verify_registration(&self) -> Result<(), JsValue> {
        self.page()?
            .with_spy(|spy| spy.verify_registration())
            .map_err(FolioError::from)?;
        Ok(())
    }
}

impl PortfolioPage {
    fn page(&self) -> Result<&DomPage, FolioError> {
        self.mounted
            .as_ref()
            .ok_or_else(|| FolioError::mount("Page is not mounted; call mount() first"))
    }
}

fn js_listener(callback: js_sys::Function) -> impl FnMut(&SectionId) + 'static {
    move |id| {
        if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(id.as_str())) {
            log::warn!("onActiveChange callback threw: {:?}", e);
        }
    }
}
