use crate::{ScrollState, VisibleRange};

/// Typed observer for list scroll activity.
///
/// Injected at construction (via [`ListConfig::with_event_sink`]) instead of
/// the callback-per-event style of UI frameworks; every method has a no-op
/// default so sinks implement only what they consume.
///
/// All notifications fire on the single layout thread, re-entrantly with
/// respect to layout: a sink may mark state that schedules another pass, but
/// must not call back into the engine synchronously.
///
/// [`ListConfig::with_event_sink`]: crate::ListConfig::with_event_sink
pub trait ScrollEventSink {
    /// A scroll-position delta was applied.
    fn on_scroll(&self, delta: f64, state: ScrollState) {
        let _ = (delta, state);
    }

    /// The viewport-intersecting index range changed since the previous
    /// layout pass.
    fn on_scroll_index_changed(&self, range: VisibleRange) {
        let _ = range;
    }

    fn on_reach_start(&self) {}

    fn on_reach_end(&self) {}

    /// A drag-reorder gesture finished over a new slot. Return `false` to
    /// veto the move; the engine then leaves item order untouched.
    fn on_item_move(&self, from: usize, to: usize) -> bool {
        let _ = (from, to);
        true
    }

    /// An edit-mode delete was requested. Return `false` to veto.
    fn on_item_delete(&self, index: usize) -> bool {
        let _ = index;
        true
    }
}

/// A sink that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEventSink;

impl ScrollEventSink for NullEventSink {}
