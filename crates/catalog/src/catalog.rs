use crate::error::CatalogError;
use folio_types::{Section, SectionId};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

const BUILTIN_PORTFOLIO: &str = include_str!("../data/portfolio.json");

/// A navigation bar entry: the id to scroll to and the label to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub id: SectionId,
    pub label: String,
}

#[derive(Deserialize)]
struct CatalogDocument {
    sections: Vec<Section>,
}

/// The ordered, read-only set of sections that make up a page.
///
/// Order is catalog order and never changes after construction. There are
/// no mutating methods; build a new catalog instead.
#[derive(Debug, Clone)]
pub struct Catalog {
    sections: Vec<Section>,
    index: HashMap<SectionId, usize>,
}

impl Catalog {
    /// Validates and wraps `sections`.
    ///
    /// # Errors
    ///
    /// - `CatalogError::EmptyCatalog` if `sections` is empty
    /// - `CatalogError::DuplicateId` for the first id that appears twice
    pub fn new(sections: Vec<Section>) -> Result<Self, CatalogError> {
        if sections.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let mut index = HashMap::with_capacity(sections.len());
        for (position, section) in sections.iter().enumerate() {
            if index.insert(section.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(section.id.to_string()));
            }
        }

        log::debug!("Catalog built with {} sections.", sections.len());
        Ok(Self { sections, index })
    }

    /// Parses a `{ "sections": [...] }` document and validates it.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::new(document.sections)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;
        Self::new(document.sections)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// The portfolio content shipped with this crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_PORTFOLIO)
    }

    /// All sections in catalog order.
    pub fn list(&self) -> &[Section] {
        &self.sections
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    /// Looks up a section by id.
    pub fn get(&self, id: &str) -> Result<&Section, CatalogError> {
        self.position(id).map(|position| &self.sections[position])
    }

    /// Catalog index of `id`.
    pub fn position(&self, id: &str) -> Result<usize, CatalogError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn first(&self) -> &Section {
        // Non-empty is checked in `new`.
        &self.sections[0]
    }

    pub fn last(&self) -> &Section {
        &self.sections[self.sections.len() - 1]
    }

    /// The section after `id` in catalog order, or `None` for the last one.
    pub fn next_after(&self, id: &str) -> Result<Option<&Section>, CatalogError> {
        let position = self.position(id)?;
        Ok(self.sections.get(position + 1))
    }

    /// `(id, label)` pairs for rendering the navigation bar.
    pub fn nav_entries(&self) -> Vec<NavEntry> {
        self.sections
            .iter()
            .map(|section| NavEntry {
                id: section.id.clone(),
                label: section.label.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}
