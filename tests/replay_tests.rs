//! The built-in portfolio and the file-driven replay used by the CLI.

mod common;

use common::TestResult;
use folio::{
    Catalog, LayoutDocument, LayoutProvider, Replay, ReplayError, ReplayStep, SectionContent,
    SpyConfig, uniform_layout,
};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_builtin_portfolio_sections() -> TestResult {
    let catalog = Catalog::builtin()?;
    let ids: Vec<_> = catalog.iter().map(|s| s.id.to_string()).collect();
    assert_eq!(
        ids,
        vec!["hero", "about", "skills", "experience", "projects", "contact"]
    );
    assert_eq!(catalog.first().label, "Home");
    assert!(matches!(
        catalog.last().content,
        SectionContent::Contact { .. }
    ));
    Ok(())
}

#[test]
fn test_builtin_visit_top_to_bottom() -> TestResult {
    common::init_logger();
    let catalog = Catalog::builtin()?;
    let layout = uniform_layout(&catalog, 800.0)?;
    let mut replay = Replay::new(catalog, layout, SpyConfig::default())?;

    let report = replay.run(&[ReplayStep::NavigateNext, ReplayStep::CallToAction])?;

    let visited: Vec<_> = report
        .transitions
        .iter()
        .map(|t| t.active.to_string())
        .collect();
    assert_eq!(
        visited,
        vec!["hero", "about", "skills", "experience", "projects", "contact"]
    );
    assert_eq!(report.final_offset, 4000.0);
    Ok(())
}

#[test]
fn test_layout_file_drives_replay() -> TestResult {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"{{ "sections": [
            {{ "id": "a", "top": 0, "height": 500 }},
            {{ "id": "b", "top": 500, "height": 500 }},
            {{ "id": "c", "top": 1000, "height": 500 }}
        ] }}"#
    )?;

    let layout = LayoutDocument::from_file(file.path())?.into_layout()?;
    assert_eq!(layout.rendered_regions().len(), 3);

    let catalog = common::fixtures::abc_catalog();
    let mut replay = Replay::new(catalog, layout, SpyConfig::default())?;
    let steps: Vec<ReplayStep> = ["450", "950", "2000"]
        .iter()
        .map(|raw| raw.parse())
        .collect::<Result<_, _>>()?;
    let report = replay.run(&steps)?;

    assert_eq!(report.final_active.unwrap(), "c");
    assert_eq!(report.transitions.len(), 3);
    Ok(())
}

#[test]
fn test_missing_layout_file() {
    let err = LayoutDocument::from_file("does/not/exist.json").unwrap_err();
    assert!(matches!(err, ReplayError::Io(_)));
}

#[test]
fn test_duplicate_layout_region_rejected() -> TestResult {
    let document: LayoutDocument = serde_json::from_str(
        r#"{ "sections": [
            { "id": "a", "top": 0, "height": 1 },
            { "id": "a", "top": 1, "height": 1 }
        ] }"#,
    )?;
    assert!(matches!(
        document.into_layout(),
        Err(ReplayError::Layout(_))
    ));
    Ok(())
}
