use folio::{Bounds, Catalog, InMemoryLayout, Section, SectionContent};

/// Three plain sections `a`, `b`, `c`.
pub fn abc_catalog() -> Catalog {
    Catalog::new(vec![
        Section::new("a", "A"),
        Section::new("b", "B"),
        Section::new("c", "C"),
    ])
    .expect("fixture catalog is valid")
}

/// `a`, `b`, `c` stacked at 0, 500 and 1000, each 500 tall.
pub fn abc_layout() -> InMemoryLayout {
    stacked_layout(&["a", "b", "c"], 500.0)
}

/// Lays the given ids out top to bottom with no gaps.
pub fn stacked_layout(ids: &[&str], height: f64) -> InMemoryLayout {
    let layout = InMemoryLayout::new();
    for (index, id) in ids.iter().enumerate() {
        layout
            .add_region(*id, Bounds::new(index as f64 * height, height))
            .expect("fixture region is valid");
    }
    layout
}

/// A catalog JSON document with one markup section per id.
pub fn markup_catalog_json(ids: &[&str]) -> String {
    let sections: Vec<Section> = ids
        .iter()
        .map(|id| {
            Section::new(*id, id.to_uppercase()).with_content(SectionContent::Markup {
                html: format!("<p>{id}</p>"),
            })
        })
        .collect();
    serde_json::json!({ "sections": sections }).to_string()
}
