//! Scroll-spy navigation for single-page portfolio sites.
//!
//! This crate re-exports the workspace crates and adds [`replay`], a native
//! driver that plays a scripted visit against an in-memory layout. The
//! browser bindings live in `folio-wasm`.
//!
//! ```no_run
//! use folio::{Catalog, Replay, ReplayStep, SpyConfig, uniform_layout};
//!
//! let catalog = Catalog::builtin()?;
//! let layout = uniform_layout(&catalog, 800.0)?;
//! let mut replay = Replay::new(catalog, layout, SpyConfig::default())?;
//! let report = replay.run(&[ReplayStep::Scroll(1750.0), ReplayStep::CallToAction])?;
//! for transition in &report.transitions {
//!     println!("{} @ {}", transition.active, transition.offset);
//! }
//! # Ok::<(), folio::ReplayError>(())
//! ```

pub mod error;
pub mod replay;

pub use error::ReplayError;
pub use replay::{
    DEFAULT_ANIMATION_STEP, DEFAULT_SECTION_HEIGHT, LayoutDocument, Replay, ReplayReport,
    ReplayStep, Transition, uniform_layout,
};

pub use folio_catalog::{Catalog, CatalogError, NavEntry};
pub use folio_core::{
    MountedPage, NavBar, NavItem, ScrollSpy, SharedNavBar, SpyConfig, SpyError, SpyPhase,
    ViewportState,
};
pub use folio_traits::{
    InMemoryLayout, LayoutProvider, ManualViewport, RegionSpec, ViewportEvent, ViewportEvents,
};
pub use folio_types::{Bounds, ScrollBehavior, Section, SectionContent, SectionId};
