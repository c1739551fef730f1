use approx::assert_relative_eq;
use scrolldeck::DeckError;
use scrolldeck::core::{ObserveOptions, RegionBounds, RegionId, SectionId, Viewport, WidgetId};
use scrolldeck::platform::{
    FrameScheduler, HeadlessViewport, ManualFrameScheduler, ObservedTarget, ScrollBehavior,
    ScrollHost, VisibilitySource,
};

fn section(id: &str) -> ObservedTarget {
    ObservedTarget::Section(SectionId::new(id))
}

fn band() -> ObserveOptions {
    ObserveOptions::focus_band(0.3, 0.3).expect("band")
}

#[test]
fn invalid_geometry_is_rejected() {
    assert!(matches!(
        HeadlessViewport::new(Viewport::new(0, 800), 0.0),
        Err(DeckError::InvalidViewport { width: 0, height: 800 })
    ));
    assert!(HeadlessViewport::new(Viewport::new(800, 600), -1.0).is_err());
    assert!(RegionBounds::new(0.0, -5.0).is_err());
    assert!(RegionBounds::new(f64::NAN, 5.0).is_err());
}

#[test]
fn observing_reports_the_initial_state() {
    let mut viewport = HeadlessViewport::new(Viewport::new(1280, 800), 0.0).expect("viewport");
    viewport.place_region(RegionId(1), RegionBounds::new(0.0, 800.0).expect("bounds"));
    viewport.place_region(RegionId(2), RegionBounds::new(800.0, 800.0).expect("bounds"));
    viewport.observe(section("a"), RegionId(1), band()).expect("observe a");
    viewport.observe(section("b"), RegionId(2), band()).expect("observe b");

    let entries = viewport.take_entries();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].is_intersecting);
    assert_relative_eq!(entries[0].intersection_ratio, 320.0 / 800.0);
    assert!(!entries[1].is_intersecting);
    assert!(viewport.take_entries().is_empty());
}

#[test]
fn only_state_changes_are_reported() {
    let mut viewport = HeadlessViewport::new(Viewport::new(1280, 800), 0.0).expect("viewport");
    viewport.place_region(RegionId(1), RegionBounds::new(0.0, 800.0).expect("bounds"));
    viewport.place_region(RegionId(2), RegionBounds::new(800.0, 800.0).expect("bounds"));
    viewport.observe(section("a"), RegionId(1), band()).expect("observe");
    viewport.take_entries();

    viewport.scroll_page_to(100.0);
    assert!(viewport.take_entries().is_empty());

    viewport.advance_clock(250.0);
    viewport.scroll_page_to(700.0);
    let entries = viewport.take_entries();
    assert_eq!(entries.len(), 1);
    assert!(!entries[0].is_intersecting);
    assert_relative_eq!(entries[0].time_ms, 250.0);
}

#[test]
fn scrolling_is_clamped_to_the_document() {
    let mut viewport = HeadlessViewport::new(Viewport::new(1280, 800), 64.0).expect("viewport");
    viewport.place_region(RegionId(1), RegionBounds::new(0.0, 2_000.0).expect("bounds"));
    assert_relative_eq!(viewport.document_height(), 2_000.0);
    assert_relative_eq!(viewport.max_scroll_y(), 1_200.0);

    viewport.scroll_page_to(5_000.0);
    assert_relative_eq!(viewport.scroll_y(), 1_200.0);
    viewport.scroll_to(-30.0, ScrollBehavior::Instant);
    assert_relative_eq!(viewport.scroll_y(), 0.0);
    assert_eq!(viewport.last_scroll_behavior(), Some(ScrollBehavior::Instant));
    assert_relative_eq!(viewport.header_height(), 64.0);
}

#[test]
fn unobserve_drops_queued_entries() {
    let mut viewport = HeadlessViewport::new(Viewport::new(1280, 800), 0.0).expect("viewport");
    viewport.place_region(RegionId(1), RegionBounds::new(0.0, 800.0).expect("bounds"));
    viewport.observe(section("a"), RegionId(1), band()).expect("observe");
    viewport
        .observe(
            ObservedTarget::Counter(WidgetId::new("gmv")),
            RegionId(1),
            ObserveOptions::visible_ratio(0.5).expect("threshold"),
        )
        .expect("observe counter");

    viewport.unobserve(&section("a"));
    let entries = viewport.take_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].target, ObservedTarget::Counter(WidgetId::new("gmv")));
    assert!(!viewport.is_observing(&section("a")));
}

#[test]
fn removed_regions_have_no_geometry() {
    let mut viewport = HeadlessViewport::new(Viewport::new(1280, 800), 0.0).expect("viewport");
    viewport.place_region(RegionId(4), RegionBounds::new(1_000.0, 200.0).expect("bounds"));
    viewport.scroll_page_to(300.0);
    assert_relative_eq!(viewport.region_top(RegionId(4)).expect("top"), 700.0);

    assert!(viewport.remove_region(RegionId(4)));
    assert!(viewport.region_top(RegionId(4)).is_none());
    assert!(!viewport.remove_region(RegionId(4)));
}

#[test]
fn manual_scheduler_drains_in_request_order() {
    let mut frames = ManualFrameScheduler::new();
    let first = frames.request_frame(&WidgetId::new("a")).expect("request");
    let second = frames.request_frame(&WidgetId::new("b")).expect("request");
    frames.cancel_frame(first);
    frames.cancel_frame(first);

    assert_eq!(frames.cancelled_total(), 1);
    assert!(frames.is_pending(second));
    let due = frames.take_due();
    assert_eq!(due, vec![(second, WidgetId::new("b"))]);
    assert_eq!(frames.pending_len(), 0);
    assert_eq!(frames.requested_total(), 2);
}
