use alloc::sync::Arc;

use crate::{Axis, EdgeEffect, ScrollEventSink};

/// An additive decorative displacement source, indexed by child index.
///
/// Used for spring-linked "chain" effects: the host evaluates its spring
/// chain each frame and the engine subtracts the per-index delta during
/// position assignment. The engine itself never advances the springs.
pub type ChainOffset = Arc<dyn Fn(usize) -> f64 + Send + Sync>;

/// Configuration for [`crate::ListLayoutEngine`].
///
/// Cheap to clone: callbacks are stored in `Arc`s so hosts can tweak a few
/// fields and call `ListLayoutEngine::update` without reallocating closures.
pub struct ListConfig {
    pub axis: Axis,
    /// Inter-item spacing along the main axis (resolved px; callers take the
    /// max of declared space and divider stroke width).
    pub item_spacing: f64,
    /// Items to keep materialized beyond the viewport on each side. Zero
    /// selects the pixel-based lookahead window instead
    /// ([`VIEWPORT_SCALE`]× the viewport extent).
    ///
    /// [`VIEWPORT_SCALE`]: crate::VIEWPORT_SCALE
    pub cached_count: usize,
    pub edge_effect: EdgeEffect,
    /// Index the window starts at before the first scroll.
    pub initial_index: usize,
    /// Enables the long-press drag-to-reorder gesture surface.
    pub reorderable: bool,
    pub multi_selectable: bool,
    /// Whether the host declared an explicit extent along the scroll axis.
    /// When set, the engine's final layout size is the max constraint rather
    /// than the accumulated content extent.
    pub declared_main_size: bool,
    pub right_to_left: bool,
    pub chain_offset: Option<ChainOffset>,
    pub event_sink: Option<Arc<dyn ScrollEventSink + Send + Sync>>,
}

impl ListConfig {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            item_spacing: 0.0,
            cached_count: 0,
            edge_effect: EdgeEffect::None,
            initial_index: 0,
            reorderable: false,
            multi_selectable: false,
            declared_main_size: false,
            right_to_left: false,
            chain_offset: None,
            event_sink: None,
        }
    }

    pub fn with_item_spacing(mut self, item_spacing: f64) -> Self {
        self.item_spacing = item_spacing;
        self
    }

    pub fn with_cached_count(mut self, cached_count: usize) -> Self {
        self.cached_count = cached_count;
        self
    }

    pub fn with_edge_effect(mut self, edge_effect: EdgeEffect) -> Self {
        self.edge_effect = edge_effect;
        self
    }

    pub fn with_initial_index(mut self, initial_index: usize) -> Self {
        self.initial_index = initial_index;
        self
    }

    pub fn with_reorderable(mut self, reorderable: bool) -> Self {
        self.reorderable = reorderable;
        self
    }

    pub fn with_multi_selectable(mut self, multi_selectable: bool) -> Self {
        self.multi_selectable = multi_selectable;
        self
    }

    pub fn with_declared_main_size(mut self, declared_main_size: bool) -> Self {
        self.declared_main_size = declared_main_size;
        self
    }

    pub fn with_right_to_left(mut self, right_to_left: bool) -> Self {
        self.right_to_left = right_to_left;
        self
    }

    pub fn with_chain_offset(
        mut self,
        chain_offset: Option<impl Fn(usize) -> f64 + Send + Sync + 'static>,
    ) -> Self {
        self.chain_offset = chain_offset.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_event_sink(
        mut self,
        event_sink: Option<Arc<dyn ScrollEventSink + Send + Sync>>,
    ) -> Self {
        self.event_sink = event_sink;
        self
    }
}

impl Clone for ListConfig {
    fn clone(&self) -> Self {
        Self {
            axis: self.axis,
            item_spacing: self.item_spacing,
            cached_count: self.cached_count,
            edge_effect: self.edge_effect,
            initial_index: self.initial_index,
            reorderable: self.reorderable,
            multi_selectable: self.multi_selectable,
            declared_main_size: self.declared_main_size,
            right_to_left: self.right_to_left,
            chain_offset: self.chain_offset.clone(),
            event_sink: self.event_sink.clone(),
        }
    }
}

impl core::fmt::Debug for ListConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListConfig")
            .field("axis", &self.axis)
            .field("item_spacing", &self.item_spacing)
            .field("cached_count", &self.cached_count)
            .field("edge_effect", &self.edge_effect)
            .field("initial_index", &self.initial_index)
            .field("reorderable", &self.reorderable)
            .field("multi_selectable", &self.multi_selectable)
            .field("declared_main_size", &self.declared_main_size)
            .field("right_to_left", &self.right_to_left)
            .finish_non_exhaustive()
    }
}
