use alloc::string::String;
use alloc::sync::Arc;

use recycler::{Axis, ItemGenerator, ListConfig, ListLayoutEngine, ScrollSource};

use crate::{Easing, ScrollBarCallback, ScrollBarProxy, Tween};

/// Programmatic scroll animations never run longer than this, matching the
/// reference list behavior.
pub const MAX_SCROLL_DURATION_MS: u64 = 300;

/// Host override for the accessibility paging actions: called with `true`
/// for a forward page, returns whether the action was handled. Used when an
/// ancestor scroll container owns paging.
pub type PagedScrollCallback = Arc<dyn Fn(bool) -> bool + Send + Sync>;

/// Row/column shape reported to accessibility collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectionInfo {
    pub rows: usize,
    pub columns: usize,
}

/// A framework-neutral controller that wraps a [`ListLayoutEngine`] and
/// provides common driver workflows: tween-driven `animate_to`, scroll-bar
/// proxy attachment, accessibility paging and restore-info passthrough.
///
/// This type does not hold any UI objects. Hosts drive it by calling
/// `tick(now_ms)` each frame and running `engine_mut().perform_layout` when
/// the engine is dirty.
#[derive(Clone)]
pub struct Controller {
    engine: ListLayoutEngine,
    tween: Option<Tween>,
    last_sample: f64,
    paged_scroll: Option<PagedScrollCallback>,
    proxy_id: Option<u64>,
}

impl Controller {
    pub fn new(config: ListConfig) -> Self {
        Self::from_engine(ListLayoutEngine::new(config))
    }

    pub fn from_engine(engine: ListLayoutEngine) -> Self {
        Self {
            engine,
            tween: None,
            last_sample: 0.0,
            paged_scroll: None,
            proxy_id: None,
        }
    }

    pub fn engine(&self) -> &ListLayoutEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ListLayoutEngine {
        &mut self.engine
    }

    pub fn into_engine(self) -> ListLayoutEngine {
        self.engine
    }

    /// Delegates the paging actions to an ancestor scroll container.
    pub fn set_paged_scroll(&mut self, callback: Option<PagedScrollCallback>) {
        self.paged_scroll = callback;
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    /// Starts a tween from the current offset to `target`. Any in-flight
    /// tween is replaced; `duration_ms` is capped at
    /// [`MAX_SCROLL_DURATION_MS`].
    pub fn animate_to(&mut self, target: f64, duration_ms: u64, easing: Easing, now_ms: u64) {
        let from = self.engine.current_offset();
        self.tween = Some(Tween::new(
            from,
            target,
            now_ms,
            duration_ms.min(MAX_SCROLL_DURATION_MS),
            easing,
        ));
        self.last_sample = from;
    }

    /// Advances the active tween, feeding the interpolated position into the
    /// engine as scroll deltas. Returns the engine offset while a tween is
    /// active, `None` otherwise.
    ///
    /// A delta refused at a hard edge cancels the tween rather than grinding
    /// against the boundary.
    pub fn tick(&mut self, now_ms: u64) -> Option<f64> {
        let tween = self.tween?;

        let position = tween.sample(now_ms);
        let delta = position - self.last_sample;
        self.last_sample = position;

        if !self.engine.update_scroll_position(delta, ScrollSource::Animation) {
            self.tween = None;
            self.engine.notify_scroll_idle();
            return Some(self.engine.current_offset());
        }

        if tween.is_done(now_ms) {
            self.tween = None;
            self.engine.notify_scroll_idle();
        }
        Some(self.engine.current_offset())
    }

    /// Accessibility forward-page action: the last visible item becomes the
    /// window start. Returns whether the action was handled.
    pub fn scroll_forward(&mut self, generator: &mut dyn ItemGenerator) -> bool {
        if let Some(callback) = &self.paged_scroll {
            return callback(true);
        }
        let Some(range) = self.engine.visible_range() else {
            return false;
        };
        self.cancel_animation();
        self.engine.jump_to_index(range.last, generator);
        true
    }

    /// Accessibility backward-page action: restarts the window at its
    /// current start index, pulling the cached-above items into view.
    pub fn scroll_backward(&mut self, generator: &mut dyn ItemGenerator) -> bool {
        if let Some(callback) = &self.paged_scroll {
            return callback(false);
        }
        if self.engine.visible_range().is_none() {
            return false;
        }
        self.cancel_animation();
        let start = self.engine.start_index();
        self.engine.jump_to_index(start, generator);
        true
    }

    /// Shape of the list as an accessibility collection.
    pub fn collection_info(&self, total_count: usize) -> CollectionInfo {
        match self.engine.config().axis {
            Axis::Vertical => CollectionInfo {
                rows: total_count,
                columns: 1,
            },
            Axis::Horizontal => CollectionInfo {
                rows: 1,
                columns: total_count,
            },
        }
    }

    pub fn provide_restore_info(&self) -> String {
        self.engine.provide_restore_info()
    }

    pub fn apply_restore_info(&mut self, info: &str) {
        self.engine.apply_restore_info(info);
    }

    /// Registers `callback` with the shared scroll-bar proxy under `id`.
    /// A previous attachment of this controller is detached first.
    pub fn attach_scroll_bar_proxy(
        &mut self,
        proxy: &mut ScrollBarProxy,
        id: u64,
        callback: ScrollBarCallback,
    ) {
        if let Some(old) = self.proxy_id.take() {
            proxy.unregister_scrollable(old);
        }
        proxy.register_scrollable(id, callback);
        self.proxy_id = Some(id);
    }

    /// Mandatory on teardown: removes this controller's registration from
    /// the proxy.
    pub fn detach_scroll_bar_proxy(&mut self, proxy: &mut ScrollBarProxy) {
        if let Some(id) = self.proxy_id.take() {
            proxy.unregister_scrollable(id);
        }
    }
}

impl core::fmt::Debug for Controller {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("engine", &self.engine)
            .field("tween", &self.tween)
            .field("proxy_id", &self.proxy_id)
            .finish_non_exhaustive()
    }
}
