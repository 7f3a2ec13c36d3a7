//! TypeScript-friendly views of controller state.

use folio_core::NavItem;
use serde::Serialize;

/// One navigation bar entry as handed to JavaScript.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavEntryView {
    pub id: String,
    pub label: String,
    pub active: bool,
}

impl From<&NavItem> for NavEntryView {
    fn from(item: &NavItem) -> Self {
        Self {
            id: item.id.to_string(),
            label: item.label.clone(),
            active: item.active,
        }
    }
}
