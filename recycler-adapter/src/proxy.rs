use alloc::sync::Arc;
use alloc::vec::Vec;

use recycler::ScrollSource;

/// Delta consumer registered with a [`ScrollBarProxy`]; returns whether the
/// scrollable accepted the delta.
pub type ScrollBarCallback = Arc<dyn Fn(f64, ScrollSource) -> bool + Send + Sync>;

/// Animator start/stop hooks for a scroll bar registered with the proxy.
#[derive(Clone)]
pub struct AnimatorHooks {
    pub start: Arc<dyn Fn() + Send + Sync>,
    pub stop: Arc<dyn Fn() + Send + Sync>,
}

/// A shared scroll-bar relay: one external scroll bar driving any number of
/// registered scrollables.
///
/// Registration is idempotent by id in both directions; a dropped scrollable
/// must unregister on teardown or the proxy keeps notifying a dead callback.
#[derive(Clone, Default)]
pub struct ScrollBarProxy {
    scrollables: Vec<(u64, ScrollBarCallback)>,
    animators: Vec<(u64, AnimatorHooks)>,
}

impl ScrollBarProxy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a scrollable under `id`. Re-registering an existing id
    /// replaces its callback.
    pub fn register_scrollable(&mut self, id: u64, callback: ScrollBarCallback) {
        if let Some(entry) = self.scrollables.iter_mut().find(|(i, _)| *i == id) {
            entry.1 = callback;
            return;
        }
        self.scrollables.push((id, callback));
    }

    /// Removes the scrollable under `id`, if registered.
    pub fn unregister_scrollable(&mut self, id: u64) {
        self.scrollables.retain(|(i, _)| *i != id);
    }

    pub fn is_scrollable_registered(&self, id: u64) -> bool {
        self.scrollables.iter().any(|(i, _)| *i == id)
    }

    pub fn scrollable_count(&self) -> usize {
        self.scrollables.len()
    }

    /// Fans a scroll-bar delta out to every registered scrollable. Returns
    /// whether any of them accepted it.
    pub fn notify_scrollable(&self, delta: f64, source: ScrollSource) -> bool {
        let mut accepted = false;
        for (_, callback) in &self.scrollables {
            if callback(delta, source) {
                accepted = true;
            }
        }
        accepted
    }

    pub fn register_animator(&mut self, id: u64, hooks: AnimatorHooks) {
        if let Some(entry) = self.animators.iter_mut().find(|(i, _)| *i == id) {
            entry.1 = hooks;
            return;
        }
        self.animators.push((id, hooks));
    }

    pub fn unregister_animator(&mut self, id: u64) {
        self.animators.retain(|(i, _)| *i != id);
    }

    pub fn start_animator(&self) {
        for (_, hooks) in &self.animators {
            (hooks.start)();
        }
    }

    pub fn stop_animator(&self) {
        for (_, hooks) in &self.animators {
            (hooks.stop)();
        }
    }
}

impl core::fmt::Debug for ScrollBarProxy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollBarProxy")
            .field("scrollables", &self.scrollables.len())
            .field("animators", &self.animators.len())
            .finish()
    }
}

impl core::fmt::Debug for AnimatorHooks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AnimatorHooks").finish_non_exhaustive()
    }
}
