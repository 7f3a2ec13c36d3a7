//! Navigation bar model: the read side of the active-section state.

use folio_catalog::Catalog;
use folio_types::SectionId;
use std::cell::RefCell;
use std::rc::Rc;

/// A navigation bar shared between a page and its change subscription.
pub type SharedNavBar = Rc<RefCell<NavBar>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub id: SectionId,
    pub label: String,
    pub active: bool,
}

/// One clickable entry per catalog section, in catalog order, with at most
/// one entry highlighted.
#[derive(Debug, Clone)]
pub struct NavBar {
    items: Vec<NavItem>,
    active: Option<usize>,
    call_to_action: SectionId,
}

impl NavBar {
    pub fn new(catalog: &Catalog) -> Self {
        let items = catalog
            .nav_entries()
            .into_iter()
            .map(|entry| NavItem {
                id: entry.id,
                label: entry.label,
                active: false,
            })
            .collect();
        Self {
            items,
            active: None,
            call_to_action: catalog.last().id.clone(),
        }
    }

    pub fn shared(catalog: &Catalog) -> SharedNavBar {
        Rc::new(RefCell::new(Self::new(catalog)))
    }

    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    pub fn active(&self) -> Option<&NavItem> {
        self.active.map(|index| &self.items[index])
    }

    /// Moves the highlight to `id`. Returns `true` if the highlight changed.
    ///
    /// Ids not present in the bar are ignored.
    pub fn set_active(&mut self, id: &SectionId) -> bool {
        let Some(index) = self.items.iter().position(|item| item.id == *id) else {
            log::warn!("NavBar has no entry for '{}'.", id);
            return false;
        };
        if self.active == Some(index) {
            return false;
        }
        if let Some(previous) = self.active {
            self.items[previous].active = false;
        }
        self.items[index].active = true;
        self.active = Some(index);
        true
    }

    /// Target of the always-visible "Contact" button: the last section.
    pub fn call_to_action(&self) -> &SectionId {
        &self.call_to_action
    }
}
