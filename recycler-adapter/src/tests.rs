use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use recycler::{
    Axis, ItemGenerator, ItemMetrics, LayoutConstraints, ListConfig, ScrollSource, Size,
};

/// Fixed-extent generator; enough for driver-level tests.
struct UniformGenerator {
    count: usize,
    extent: f64,
}

impl ItemGenerator for UniformGenerator {
    fn request_item(&mut self, index: usize, _c: &LayoutConstraints) -> Option<ItemMetrics> {
        (index < self.count).then(|| ItemMetrics::new(self.extent, 400.0))
    }

    fn measure_item(&mut self, index: usize, _c: &LayoutConstraints) -> Option<ItemMetrics> {
        (index < self.count).then(|| ItemMetrics::new(self.extent, 400.0))
    }

    fn recycle_item(&mut self, _index: usize) {}

    fn total_count(&self) -> usize {
        self.count
    }
}

fn generator() -> UniformGenerator {
    UniformGenerator {
        count: 50,
        extent: 100.0,
    }
}

fn viewport(main: f64) -> LayoutConstraints {
    LayoutConstraints::new(
        Size::new(0.0, 0.0),
        Size::from_main_cross(Axis::Vertical, main, 400.0),
    )
}

fn laid_out_controller() -> (Controller, UniformGenerator) {
    let mut controller = Controller::new(ListConfig::new(Axis::Vertical));
    let mut generator = generator();
    controller
        .engine_mut()
        .perform_layout(&mut generator, viewport(1000.0))
        .unwrap();
    (controller, generator)
}

#[test]
fn tween_drives_monotonic_offsets_and_completes() {
    let (mut controller, _generator) = laid_out_controller();
    controller.animate_to(-500.0, 200, Easing::Linear, 0);
    assert!(controller.is_animating());

    let mut last = controller.engine().current_offset();
    for now in [0u64, 50, 100, 150, 200] {
        let offset = controller.tick(now).unwrap();
        assert!(offset <= last);
        last = offset;
    }
    assert!(!controller.is_animating());
    assert_eq!(controller.engine().current_offset(), -500.0);

    // Idle: nothing to advance.
    assert_eq!(controller.tick(250), None);
}

#[test]
fn animation_duration_is_capped() {
    let (mut controller, _generator) = laid_out_controller();
    controller.animate_to(-500.0, 10_000, Easing::Linear, 0);

    controller.tick(MAX_SCROLL_DURATION_MS).unwrap();
    assert!(!controller.is_animating());
    assert_eq!(controller.engine().current_offset(), -500.0);
}

#[test]
fn animate_to_replaces_in_flight_tween() {
    let (mut controller, _generator) = laid_out_controller();
    controller.animate_to(-400.0, 200, Easing::Linear, 0);
    controller.tick(100).unwrap();
    let midway = controller.engine().current_offset();
    assert_eq!(midway, -200.0);

    // Replacement starts from the current position: no jump on next tick.
    controller.animate_to(-1000.0, 200, Easing::Linear, 100);
    assert!(controller.is_animating());
    let offset = controller.tick(100).unwrap();
    assert_eq!(offset, midway);

    controller.tick(300).unwrap();
    assert!(!controller.is_animating());
    assert_eq!(controller.engine().current_offset(), -1000.0);
}

#[test]
fn tween_is_canceled_at_hard_edge() {
    let (mut controller, _generator) = laid_out_controller();
    // Already at the start edge; a tween toward negative indices cannot go
    // anywhere.
    controller.animate_to(500.0, 200, Easing::Linear, 0);
    controller.tick(0).unwrap();
    assert!(controller.is_animating());

    controller.tick(100).unwrap();
    assert!(!controller.is_animating());
    assert_eq!(controller.engine().current_offset(), 0.0);
}

#[test]
fn cancel_animation_stops_ticking() {
    let (mut controller, _generator) = laid_out_controller();
    controller.animate_to(-500.0, 200, Easing::Linear, 0);
    controller.cancel_animation();
    assert_eq!(controller.tick(100), None);
    assert_eq!(controller.engine().current_offset(), 0.0);
}

#[test]
fn accessibility_paging_walks_the_list() {
    let (mut controller, mut generator) = laid_out_controller();
    assert_eq!(controller.engine().visible_range().unwrap().first, 0);

    assert!(controller.scroll_forward(&mut generator));
    controller
        .engine_mut()
        .perform_layout(&mut generator, viewport(1000.0))
        .unwrap();
    assert_eq!(controller.engine().visible_range().unwrap().first, 9);

    let start = controller.engine().start_index();
    assert!(controller.scroll_backward(&mut generator));
    controller
        .engine_mut()
        .perform_layout(&mut generator, viewport(1000.0))
        .unwrap();
    assert_eq!(controller.engine().visible_range().unwrap().first, start);
}

#[test]
fn paged_scroll_callback_takes_over() {
    let (mut controller, mut generator) = laid_out_controller();
    let calls = Arc::new(std::sync::Mutex::new(Vec::new()));
    let recorded = calls.clone();
    controller.set_paged_scroll(Some(Arc::new(move |forward| {
        recorded.lock().unwrap().push(forward);
        true
    })));

    assert!(controller.scroll_forward(&mut generator));
    assert!(controller.scroll_backward(&mut generator));
    assert_eq!(calls.lock().unwrap().clone(), alloc::vec![true, false]);
    // The engine itself was not touched.
    assert_eq!(controller.engine().visible_range().unwrap().first, 0);
}

#[test]
fn restore_info_passes_through() {
    let (mut controller, mut generator) = laid_out_controller();
    controller.apply_restore_info("5");
    controller
        .engine_mut()
        .perform_layout(&mut generator, viewport(1000.0))
        .unwrap();
    assert_eq!(controller.provide_restore_info(), "5");
}

#[test]
fn collection_info_follows_axis() {
    let vertical = Controller::new(ListConfig::new(Axis::Vertical));
    assert_eq!(
        vertical.collection_info(42),
        CollectionInfo {
            rows: 42,
            columns: 1
        }
    );

    let horizontal = Controller::new(ListConfig::new(Axis::Horizontal));
    assert_eq!(
        horizontal.collection_info(42),
        CollectionInfo {
            rows: 1,
            columns: 42
        }
    );
}

#[test]
fn proxy_notifies_registered_scrollables() {
    let mut proxy = ScrollBarProxy::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let counted = hits.clone();
    proxy.register_scrollable(
        1,
        Arc::new(move |_delta, _source| {
            counted.fetch_add(1, Ordering::SeqCst);
            true
        }),
    );

    assert!(proxy.notify_scrollable(-10.0, ScrollSource::BarDrag));
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    proxy.unregister_scrollable(1);
    assert!(!proxy.notify_scrollable(-10.0, ScrollSource::BarDrag));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    // Unregistering again is harmless.
    proxy.unregister_scrollable(1);
}

#[test]
fn proxy_reregistration_replaces_callback() {
    let mut proxy = ScrollBarProxy::new();
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let counted = first.clone();
    proxy.register_scrollable(
        1,
        Arc::new(move |_d, _s| {
            counted.fetch_add(1, Ordering::SeqCst);
            true
        }),
    );
    let counted = second.clone();
    proxy.register_scrollable(
        1,
        Arc::new(move |_d, _s| {
            counted.fetch_add(1, Ordering::SeqCst);
            true
        }),
    );

    assert_eq!(proxy.scrollable_count(), 1);
    proxy.notify_scrollable(5.0, ScrollSource::BarDrag);
    assert_eq!(first.load(Ordering::SeqCst), 0);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn proxy_animator_hooks_fire() {
    let mut proxy = ScrollBarProxy::new();
    let starts = Arc::new(AtomicUsize::new(0));
    let stops = Arc::new(AtomicUsize::new(0));
    let s = starts.clone();
    let t = stops.clone();
    proxy.register_animator(
        1,
        AnimatorHooks {
            start: Arc::new(move || {
                s.fetch_add(1, Ordering::SeqCst);
            }),
            stop: Arc::new(move || {
                t.fetch_add(1, Ordering::SeqCst);
            }),
        },
    );

    proxy.start_animator();
    proxy.stop_animator();
    proxy.stop_animator();
    assert_eq!(starts.load(Ordering::SeqCst), 1);
    assert_eq!(stops.load(Ordering::SeqCst), 2);

    proxy.unregister_animator(1);
    proxy.start_animator();
    assert_eq!(starts.load(Ordering::SeqCst), 1);
}

#[test]
fn controller_attach_detach_scroll_bar_proxy() {
    let mut proxy = ScrollBarProxy::new();
    let (mut controller, _generator) = laid_out_controller();

    controller.attach_scroll_bar_proxy(&mut proxy, 7, Arc::new(|_d, _s| true));
    assert!(proxy.is_scrollable_registered(7));

    // Re-attaching under a new id drops the old registration.
    controller.attach_scroll_bar_proxy(&mut proxy, 9, Arc::new(|_d, _s| true));
    assert!(!proxy.is_scrollable_registered(7));
    assert!(proxy.is_scrollable_registered(9));

    controller.detach_scroll_bar_proxy(&mut proxy);
    assert_eq!(proxy.scrollable_count(), 0);
}

#[test]
fn easing_endpoints_are_exact() {
    for easing in [Easing::Linear, Easing::SmoothStep, Easing::EaseInOutCubic] {
        assert_eq!(easing.sample(0.0), 0.0);
        assert_eq!(easing.sample(1.0), 1.0);
    }
}

#[test]
fn tween_retarget_starts_from_current_sample() {
    let mut tween = Tween::new(0.0, -100.0, 0, 100, Easing::Linear);
    assert_eq!(tween.sample(50), -50.0);

    tween.retarget(50, -200.0, 100);
    assert_eq!(tween.sample(50), -50.0);
    assert_eq!(tween.sample(150), -200.0);
    assert!(tween.is_done(150));
}
