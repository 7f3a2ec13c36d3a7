//! WebAssembly bindings for the folio scroll-spy navigation controller.
//!
//! This crate wires `folio-core` to a real browser page: section geometry is
//! read from the DOM, scroll commands go through `window.scrollTo`, and the
//! controller listens to the window's `scroll`, `resize` and `scrollend`
//! events.
//!
//! ## Module Structure
//!
//! - [`page`] - `PortfolioPage`, the JavaScript entry point
//! - [`dom`] - `DomLayout` and `DomViewportEvents` (DOM-backed collaborator traits)
//! - [`error`] - Error types with JavaScript interop
//! - [`types`] - Serializable views handed to JavaScript
//!
//! # Example
//!
//! ```javascript
//! import init, { PortfolioPage } from '@folio/wasm';
//!
//! await init();
//!
//! const page = new PortfolioPage();
//! page.onActiveChange(id => {
//!   for (const entry of page.navEntries()) {
//!     document.querySelector(`[data-nav="${entry.id}"]`)
//!       .classList.toggle('active', entry.active);
//!   }
//! });
//! page.mount();
//! ```
//!
//! The page markup must contain one `<section id="...">` per catalog entry.

mod dom;
mod error;
mod page;
mod types;

pub use dom::{DomLayout, DomListener, DomViewportEvents};
pub use error::{ErrorCode, FolioError};
pub use page::PortfolioPage;
pub use types::NavEntryView;

use wasm_bindgen::prelude::*;

/// Initialize the WASM module.
///
/// This function sets up panic hooks for better error messages in the browser console.
/// It is called automatically when using wasm-pack's generated JavaScript.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages
    console_error_panic_hook::set_once();

    #[cfg(feature = "console-logging")]
    {
        // Initialize console logging if the feature is enabled
        console_log::init_with_level(log::Level::Debug).ok();
    }
}

/// Get the version of the folio-wasm library.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
