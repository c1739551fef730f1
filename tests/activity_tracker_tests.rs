use scrolldeck::api::{ActiveSectionListener, DeckConfig, SectionActivityTracker};
use scrolldeck::core::{ObserveOptions, RegionBounds, RegionId, SectionId, Viewport};
use scrolldeck::platform::{
    HeadlessViewport, ObservedTarget, UnavailablePlatform, VisibilityEntry,
};
use scrolldeck::DeckError;
use std::cell::RefCell;
use std::rc::Rc;

fn band() -> ObserveOptions {
    ObserveOptions::focus_band(0.3, 0.3).expect("valid band")
}

fn viewport_with_sections(ids: &[&str]) -> (HeadlessViewport, SectionActivityTracker) {
    let mut viewport = HeadlessViewport::new(Viewport::new(1280, 800), 64.0).expect("viewport");
    let mut tracker = SectionActivityTracker::new(SectionId::new("hero"), band()).expect("tracker");
    for (index, id) in ids.iter().enumerate() {
        let region = RegionId(index as u64 + 1);
        viewport.place_region(
            region,
            RegionBounds::new(index as f64 * 800.0, 800.0).expect("bounds"),
        );
        tracker
            .register(SectionId::new(*id), region, &mut viewport)
            .expect("register");
    }
    (viewport, tracker)
}

struct RecordingListener {
    id: String,
    changes: Rc<RefCell<Vec<(String, String)>>>,
}

impl ActiveSectionListener for RecordingListener {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_active_section_changed(&mut self, previous: &SectionId, current: &SectionId) {
        self.changes
            .borrow_mut()
            .push((previous.to_string(), current.to_string()));
    }
}

#[test]
fn seeded_section_is_active_before_any_event() {
    let (_viewport, tracker) = viewport_with_sections(&["a", "b", "c"]);
    assert_eq!(tracker.active().as_str(), "hero");
    assert_eq!(tracker.section_count(), 3);
    assert!(!tracker.is_degraded());
}

#[test]
fn from_config_uses_configured_initial_section() {
    let tracker = SectionActivityTracker::from_config(&DeckConfig::new("the-impact"))
        .expect("tracker from config");
    assert_eq!(tracker.active().as_str(), "the-impact");
    assert_eq!(tracker.observe_options(), band());
}

#[test]
fn last_intersecting_entry_in_a_batch_wins() {
    let (_viewport, mut tracker) = viewport_with_sections(&["a", "b", "c"]);
    let batch = vec![
        VisibilityEntry::section("a", true, 0.2, 10.0),
        VisibilityEntry::section("c", true, 0.1, 10.0),
        VisibilityEntry::section("b", false, 0.0, 10.0),
    ];

    assert!(tracker.handle_entries(&batch));
    assert_eq!(tracker.active().as_str(), "c");
}

#[test]
fn non_intersecting_entries_keep_the_current_section() {
    let (_viewport, mut tracker) = viewport_with_sections(&["a", "b"]);
    tracker.handle_entries(&[VisibilityEntry::section("b", true, 0.5, 0.0)]);

    let changed = tracker.handle_entries(&[
        VisibilityEntry::section("b", false, 0.0, 5.0),
        VisibilityEntry::section("a", false, 0.0, 5.0),
    ]);
    assert!(!changed);
    assert_eq!(tracker.active().as_str(), "b");
}

#[test]
fn zero_ratio_does_not_count_as_intersecting() {
    let (_viewport, mut tracker) = viewport_with_sections(&["a", "b"]);
    assert!(!tracker.handle_entries(&[VisibilityEntry::section("a", true, 0.0, 0.0)]));
    assert_eq!(tracker.active().as_str(), "hero");
}

#[test]
fn entries_for_unregistered_sections_and_counters_are_ignored() {
    let (mut viewport, mut tracker) = viewport_with_sections(&["a", "b"]);
    assert!(tracker.deregister(&SectionId::new("b"), &mut viewport));
    assert!(!tracker.deregister(&SectionId::new("b"), &mut viewport));

    let changed = tracker.handle_entries(&[
        VisibilityEntry::section("b", true, 0.9, 0.0),
        VisibilityEntry::section("ghost", true, 0.9, 0.0),
        VisibilityEntry::counter("a", true, 1.0, 0.0),
    ]);
    assert!(!changed);
    assert_eq!(tracker.active().as_str(), "hero");
    assert!(!viewport.is_observing(&ObservedTarget::Section(SectionId::new("b"))));
}

#[test]
fn scrolling_the_headless_viewport_moves_the_active_section() {
    let (mut viewport, mut tracker) = viewport_with_sections(&["a", "b", "c"]);
    let initial = viewport.take_entries();
    tracker.handle_entries(&initial);
    assert_eq!(tracker.active().as_str(), "a");

    viewport.scroll_page_to(1_600.0);
    let entries = viewport.take_entries();
    assert!(tracker.handle_entries(&entries));
    assert_eq!(tracker.active().as_str(), "c");
}

#[test]
fn re_registering_moves_the_section_to_a_new_region() {
    let (mut viewport, mut tracker) = viewport_with_sections(&["a"]);
    viewport.place_region(RegionId(9), RegionBounds::new(2_000.0, 400.0).expect("bounds"));
    tracker
        .register(SectionId::new("a"), RegionId(9), &mut viewport)
        .expect("re-register");

    assert_eq!(tracker.region_of(&SectionId::new("a")), Some(RegionId(9)));
    assert_eq!(tracker.section_count(), 1);
    assert_eq!(viewport.observation_count(), 1);
}

#[test]
fn missing_visibility_capability_degrades_to_the_seeded_section() {
    let mut platform = UnavailablePlatform;
    let mut tracker = SectionActivityTracker::new(SectionId::new("hero"), band()).expect("tracker");
    tracker
        .register(SectionId::new("a"), RegionId(1), &mut platform)
        .expect("degradation is not an error");
    tracker
        .register(SectionId::new("b"), RegionId(2), &mut platform)
        .expect("degradation is not an error");

    assert!(tracker.is_degraded());
    assert!(!tracker.handle_entries(&[VisibilityEntry::section("b", true, 1.0, 0.0)]));
    assert_eq!(tracker.active().as_str(), "hero");
    assert_eq!(tracker.section_count(), 2);
}

#[test]
fn listeners_hear_each_change_once() {
    let (_viewport, mut tracker) = viewport_with_sections(&["a", "b"]);
    let changes = Rc::new(RefCell::new(Vec::new()));
    tracker
        .subscribe(Box::new(RecordingListener {
            id: "nav".to_owned(),
            changes: Rc::clone(&changes),
        }))
        .expect("subscribe");

    tracker.handle_entries(&[VisibilityEntry::section("a", true, 0.3, 0.0)]);
    tracker.handle_entries(&[VisibilityEntry::section("a", true, 0.6, 1.0)]);
    tracker.handle_entries(&[VisibilityEntry::section("b", true, 0.1, 2.0)]);

    assert_eq!(
        *changes.borrow(),
        vec![
            ("hero".to_owned(), "a".to_owned()),
            ("a".to_owned(), "b".to_owned())
        ]
    );

    assert!(tracker.unsubscribe("nav"));
    tracker.handle_entries(&[VisibilityEntry::section("a", true, 0.1, 3.0)]);
    assert_eq!(changes.borrow().len(), 2);
}

#[test]
fn duplicate_listener_ids_are_rejected() {
    let (_viewport, mut tracker) = viewport_with_sections(&["a"]);
    let changes = Rc::new(RefCell::new(Vec::new()));
    let make = || {
        Box::new(RecordingListener {
            id: "nav".to_owned(),
            changes: Rc::clone(&changes),
        })
    };

    tracker.subscribe(make()).expect("first subscribe");
    let err = tracker.subscribe(make()).expect_err("duplicate id");
    assert!(matches!(err, DeckError::InvalidData(_)));
    assert_eq!(tracker.active_cell().listener_count(), 1);
}
