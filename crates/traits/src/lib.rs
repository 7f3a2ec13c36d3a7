pub mod events;
pub mod layout;

pub use events::{
    EventSourceError, ListenerId, ManualViewport, ViewportEvent, ViewportEvents, ViewportHandler,
};
pub use layout::{InMemoryLayout, LayoutError, LayoutProvider, RegionSpec, ScrollRequest};
