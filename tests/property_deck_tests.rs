use proptest::prelude::*;
use scrolldeck::api::{ChartLifecycleManager, CounterAnimator, SectionActivityTracker};
use scrolldeck::core::{ObserveOptions, RegionBounds, RegionId, SectionId, Viewport, WidgetId};
use scrolldeck::platform::{HeadlessViewport, ManualFrameScheduler, VisibilityEntry};
use scrolldeck::render::{ChartConfig, ChartDataset, ChartKind, RecordingBackend, SurfaceId};

const SECTIONS: [&str; 4] = ["a", "b", "c", "d"];

fn entry_strategy() -> impl Strategy<Value = (usize, bool, f64)> {
    (0..SECTIONS.len(), any::<bool>(), 0.0f64..1.0)
}

fn armed_counter(target: u64) -> (HeadlessViewport, ManualFrameScheduler, CounterAnimator) {
    let mut viewport = HeadlessViewport::new(Viewport::new(1280, 800), 0.0).expect("viewport");
    viewport.place_region(RegionId(1), RegionBounds::new(100.0, 80.0).expect("bounds"));
    let mut animator = CounterAnimator::new(
        1_500.0,
        ObserveOptions::visible_ratio(0.5).expect("threshold"),
    )
    .expect("animator");
    animator
        .arm(WidgetId::new("counter"), RegionId(1), target, &mut viewport)
        .expect("arm");
    (viewport, ManualFrameScheduler::new(), animator)
}

proptest! {
    #[test]
    fn active_section_is_the_last_intersecting_report(
        batches in prop::collection::vec(prop::collection::vec(entry_strategy(), 0..6), 0..12)
    ) {
        let mut viewport = HeadlessViewport::new(Viewport::new(1280, 800), 0.0).expect("viewport");
        let mut tracker = SectionActivityTracker::new(
            SectionId::new("hero"),
            ObserveOptions::focus_band(0.3, 0.3).expect("band"),
        )
        .expect("tracker");
        for (index, id) in SECTIONS.iter().enumerate() {
            tracker
                .register(SectionId::new(*id), RegionId(index as u64), &mut viewport)
                .expect("register");
        }

        let mut expected = "hero";
        for batch in &batches {
            let entries: Vec<VisibilityEntry> = batch
                .iter()
                .map(|(index, intersecting, ratio)| {
                    VisibilityEntry::section(SECTIONS[*index], *intersecting, *ratio, 0.0)
                })
                .collect();
            for (index, intersecting, ratio) in batch {
                if *intersecting && *ratio > 0.0 {
                    expected = SECTIONS[*index];
                }
            }
            tracker.handle_entries(&entries);
            prop_assert_eq!(tracker.active().as_str(), expected);
        }
    }

    #[test]
    fn repeated_mounts_keep_exactly_one_live_instance(mounts in 1usize..8, second in -1_000.0f64..1_000.0) {
        let mut manager = ChartLifecycleManager::new(RecordingBackend::new());
        let widget = WidgetId::new("chart");
        for round in 0..mounts {
            let config = ChartConfig::new(ChartKind::Bar, vec!["x".to_owned(), "y".to_owned()])
                .with_dataset(ChartDataset::new(vec![round as f64, second]));
            manager.mount(widget.clone(), SurfaceId(1), config).expect("mount");
            prop_assert_eq!(manager.backend().live_count(), 1);
        }
        prop_assert_eq!(manager.backend().created_count(), mounts);
        prop_assert_eq!(manager.backend().destroyed_count(), mounts - 1);

        prop_assert!(manager.unmount(&widget));
        prop_assert_eq!(manager.backend().destroyed_count(), mounts);
        prop_assert!(!manager.unmount(&widget));
        prop_assert_eq!(manager.backend().destroyed_count(), mounts);
    }

    #[test]
    fn counter_climbs_monotonically_to_its_target(
        target in 1u64..10_000_000,
        steps in prop::collection::vec(1.0f64..120.0, 1..60)
    ) {
        let (mut viewport, mut frames, mut animator) = armed_counter(target);
        let widget = WidgetId::new("counter");
        let entries = viewport.take_entries();
        animator.handle_entries(&entries, &mut viewport, &mut frames);

        let mut now = 0.0;
        let mut previous = 0;
        let mut first = true;
        loop {
            let due = frames.take_due();
            if due.is_empty() {
                break;
            }
            for (handle, _) in due {
                let update = animator.on_frame(handle, now, &mut frames).expect("live frame");
                if first {
                    prop_assert_eq!(update.displayed, 0);
                    first = false;
                }
                prop_assert!(update.displayed >= previous);
                prop_assert!(update.displayed <= target);
                prop_assert_eq!(update.finished, update.displayed == target && now >= 1_500.0);
                previous = update.displayed;
            }
            let index = (now as usize) % steps.len();
            now += steps[index];
        }

        prop_assert!(now >= 1_500.0);
        prop_assert_eq!(animator.displayed(&widget), Some(target));
    }

    #[test]
    fn zero_target_never_schedules_frames(reentries in 0usize..5) {
        let (mut viewport, mut frames, mut animator) = armed_counter(0);
        let entries = viewport.take_entries();
        animator.handle_entries(&entries, &mut viewport, &mut frames);
        for round in 0..reentries {
            let entry = [VisibilityEntry::counter("counter", true, 1.0, round as f64 * 100.0)];
            animator.handle_entries(&entry, &mut viewport, &mut frames);
        }
        prop_assert_eq!(frames.requested_total(), 0);
        prop_assert_eq!(animator.displayed(&WidgetId::new("counter")), Some(0));
    }

    #[test]
    fn fired_counter_ignores_every_reentry(
        target in 1u64..1_000_000,
        reentry_times in prop::collection::vec(0.0f64..5_000.0, 1..10)
    ) {
        let (mut viewport, mut frames, mut animator) = armed_counter(target);
        let entries = viewport.take_entries();
        let fired = animator.handle_entries(&entries, &mut viewport, &mut frames);
        prop_assert_eq!(fired.len(), 1);
        let requested = frames.requested_total();

        for time in &reentry_times {
            let entry = [VisibilityEntry::counter("counter", true, 1.0, *time)];
            prop_assert!(animator.handle_entries(&entry, &mut viewport, &mut frames).is_empty());
        }
        prop_assert_eq!(frames.requested_total(), requested);
    }
}
