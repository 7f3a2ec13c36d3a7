//! Programmatic navigation: nav bar clicks, the scroll-down cue and the
//! call-to-action button.

mod common;

use common::fixtures::{abc_catalog, abc_layout, markup_catalog_json, stacked_layout};
use common::{Harness, TestResult};
use folio::{Catalog, ScrollBehavior, SpyConfig, SpyError, SpyPhase};
use std::rc::Rc;

#[test]
fn test_navigate_scrolls_smoothly_to_section_top() -> TestResult {
    let harness = Harness::mount(abc_catalog(), abc_layout(), SpyConfig::default())?;

    harness.page.navigate("c")?;
    let request = harness.layout.pending_scroll().expect("smooth scroll issued");
    assert_eq!(request.target, 1000.0);
    assert_eq!(request.behavior, ScrollBehavior::Smooth);
    harness.page.with_spy(|spy| {
        assert!(matches!(spy.phase(), SpyPhase::Scrolling { target, .. } if target == "c"))
    });

    harness.animate(100.0);
    assert_eq!(harness.page.active_section().unwrap(), "c");
    harness
        .page
        .with_spy(|spy| assert_eq!(*spy.phase(), SpyPhase::Tracking));
    // Sections passed on the way are published too.
    assert_eq!(harness.published_ids(), vec!["a", "b", "c"]);
    Ok(())
}

#[test]
fn test_unknown_id_is_not_found_and_changes_nothing() -> TestResult {
    let harness = Harness::mount(abc_catalog(), abc_layout(), SpyConfig::default())?;

    let err = harness.page.navigate("nope").unwrap_err();
    assert!(err.is_not_found());
    assert!(harness.layout.scroll_history().is_empty());
    assert_eq!(harness.page.active_section().unwrap(), "a");
    Ok(())
}

#[test]
fn test_unrendered_section_fails_loudly() -> TestResult {
    let harness = Harness::mount(
        abc_catalog(),
        stacked_layout(&["a", "b"], 500.0),
        SpyConfig::default(),
    )?;

    let err = harness.page.navigate("c").unwrap_err();
    assert!(matches!(err, SpyError::Unregistered(ref id) if id == "c"));
    assert!(harness.layout.scroll_history().is_empty());
    Ok(())
}

#[test]
fn test_navigate_to_current_position_stays_tracking() -> TestResult {
    let harness = Harness::mount(abc_catalog(), abc_layout(), SpyConfig::default())?;

    harness.page.navigate("a")?;
    harness
        .page
        .with_spy(|spy| assert_eq!(*spy.phase(), SpyPhase::Tracking));
    Ok(())
}

#[test]
fn test_later_request_replaces_target() -> TestResult {
    let harness = Harness::mount(abc_catalog(), abc_layout(), SpyConfig::default())?;

    harness.page.navigate("c")?;
    harness.layout.step_animation(200.0);
    harness.page.navigate("b")?;

    assert_eq!(harness.layout.pending_scroll().unwrap().target, 500.0);
    harness.animate(50.0);
    assert_eq!(harness.page.active_section().unwrap(), "b");
    Ok(())
}

#[test]
fn test_navigate_next_walks_the_catalog() -> TestResult {
    let harness = Harness::mount(abc_catalog(), abc_layout(), SpyConfig::default())?;

    for expected in ["b", "c"] {
        let target = harness.page.navigate_next()?.expect("a next section exists");
        assert_eq!(target, expected);
        harness.animate(120.0);
        assert_eq!(harness.page.active_section().unwrap(), expected);
    }
    assert!(harness.page.navigate_next()?.is_none());
    Ok(())
}

#[test]
fn test_nav_bar_follows_active_section() -> TestResult {
    let harness = Harness::mount(abc_catalog(), abc_layout(), SpyConfig::default())?;
    let nav = harness.page.nav_bar()?;

    assert_eq!(nav.borrow().active().unwrap().id, "a");
    assert_eq!(nav.borrow().call_to_action(), "c");

    harness.scroll_to(450.0);
    let nav = nav.borrow();
    let highlighted: Vec<_> = nav
        .items()
        .iter()
        .filter(|item| item.active)
        .map(|item| item.id.as_str())
        .collect();
    assert_eq!(highlighted, vec!["b"]);
    Ok(())
}

#[test]
fn test_verify_on_mount_rejects_mismatched_layout() -> TestResult {
    let config = SpyConfig::default().with_verify_on_mount(true);

    let missing = Harness::mount(abc_catalog(), stacked_layout(&["a", "b"], 500.0), config.clone());
    assert!(missing.is_err());

    let extra = Harness::mount(
        abc_catalog(),
        stacked_layout(&["a", "b", "c", "footer"], 500.0),
        config.clone(),
    );
    assert!(extra.is_err());

    assert!(Harness::mount(abc_catalog(), abc_layout(), config).is_ok());
    Ok(())
}

#[test]
fn test_catalog_from_json_drives_page() -> TestResult {
    let catalog = Catalog::from_json(&markup_catalog_json(&["intro", "work", "reach"]))?;
    let harness = Harness::mount(
        catalog,
        stacked_layout(&["intro", "work", "reach"], 300.0),
        SpyConfig::default().with_preselect_first(true),
    )?;

    // Preselected, so the mount measurement publishes nothing new.
    assert!(harness.published_ids().is_empty());
    assert_eq!(harness.page.active_section().unwrap(), "intro");

    harness.page.navigate("reach")?;
    harness.animate(1000.0);
    assert_eq!(harness.published_ids(), vec!["reach"]);
    Ok(())
}

#[test]
fn test_change_subscriber_can_navigate() -> TestResult {
    let harness = Harness::mount(abc_catalog(), abc_layout(), SpyConfig::default())?;
    let spy = Rc::downgrade(harness.page.spy());
    harness.page.subscribe(move |id| {
        if id == "b" {
            if let Some(spy) = spy.upgrade() {
                spy.borrow_mut()
                    .scroll_to_section("c")
                    .expect("navigation from a change subscriber");
            }
        }
    })?;

    assert_eq!(harness.scroll_to(450.0).unwrap(), "b");
    assert_eq!(harness.layout.pending_scroll().unwrap().target, 1000.0);

    harness.animate(100.0);
    assert_eq!(harness.page.active_section().unwrap(), "c");
    assert_eq!(harness.published_ids(), vec!["a", "b", "c"]);
    Ok(())
}

#[test]
fn test_navigate_while_controller_held_is_busy() -> TestResult {
    let harness = Harness::mount(abc_catalog(), abc_layout(), SpyConfig::default())?;

    let err = harness
        .page
        .with_spy(|_| harness.page.navigate("c"))
        .unwrap_err();
    assert!(matches!(err, SpyError::Busy));
    assert!(harness.layout.scroll_history().is_empty());
    Ok(())
}
