use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::sync::Arc;

use crate::{
    AxisDirection, ItemGenerator, ItemMetrics, LayoutConstraints, ListConfig, ScrollEventSink,
    ScrollSource, ScrollState, Size, VisibleRange, scroll_step,
};

/// Lookahead scaling applied when no fixed cache count is configured: the
/// retained window extends `(VIEWPORT_SCALE - 1)` viewports beyond each edge
/// of the visible region.
pub const VIEWPORT_SCALE: f64 = 1.2;

fn near_zero(v: f64) -> bool {
    v.abs() < 1e-6
}

/// One materialized child of the window: its global index is implied by its
/// slot (`start_index + position in the deque`).
#[derive(Clone, Copy, Debug)]
struct MaterializedItem {
    metrics: ItemMetrics,
    /// Main-axis offset assigned by the last position pass.
    position: f64,
}

/// The child currently pinned at the viewport's leading edge.
///
/// Owned by the engine until superseded; it may fall outside the contiguous
/// window and must then be recycled explicitly when released.
#[derive(Clone, Copy, Debug)]
struct StickyItem {
    index: usize,
    metrics: ItemMetrics,
    position: f64,
}

/// The child being drag-reordered. It floats at its own main-axis position
/// and consumes no cursor space at its original slot.
#[derive(Clone, Copy, Debug)]
struct SelectedItem {
    index: usize,
    metrics: ItemMetrics,
    main_axis: f64,
    target_index: usize,
    target_main_axis: f64,
    moving_forward: bool,
    last_pos: f64,
}

/// A windowed (virtualized) list layout and recycling engine.
///
/// This type is intentionally UI-agnostic:
/// - Children are owned by an external [`ItemGenerator`]; the engine retains
///   only indices plus measured geometry, revalidated each pass.
/// - The host drives it by running [`perform_layout`] once per dirty frame
///   and feeding scroll deltas through [`update_scroll_position`].
/// - Positions are exposed via queries; painting is someone else's job.
///
/// For tween scrolling, scroll-bar proxies and accessibility paging, see the
/// `recycler-adapter` crate.
///
/// [`perform_layout`]: ListLayoutEngine::perform_layout
/// [`update_scroll_position`]: ListLayoutEngine::update_scroll_position
#[derive(Clone, Debug)]
pub struct ListLayoutEngine {
    config: ListConfig,

    start_index: usize,
    current_offset: f64,
    items: VecDeque<MaterializedItem>,
    sticky: Option<StickyItem>,
    selected: Option<SelectedItem>,

    main_size: f64,
    start_main_pos: f64,
    end_main_pos: f64,
    last_constraints: Option<LayoutConstraints>,
    fixed_main_size: bool,
    fixed_main_size_by_constraints: bool,
    fixed_cross_size: bool,
    layout_size: Size,

    reach_start: bool,
    reach_end: bool,
    is_out_of_boundary: bool,
    main_scroll_extent: f64,
    real_main_size: f64,
    scrollable: bool,

    start_cached: usize,
    end_cached: usize,

    visible: Option<VisibleRange>,
    focus_index: usize,

    initialized: bool,
    needs_layout: bool,
    use_cache_hint: bool,
    pending_restore: Option<usize>,

    axis_response_armed: bool,
    auto_scrolling_for_item_move: bool,
    edge_animation_running: bool,
    last_delta: f64,
}

impl ListLayoutEngine {
    pub fn new(config: ListConfig) -> Self {
        rdebug!(
            cached_count = config.cached_count,
            initial_index = config.initial_index,
            "ListLayoutEngine::new"
        );
        let start_index = config.initial_index;
        Self {
            config,
            start_index,
            current_offset: 0.0,
            items: VecDeque::new(),
            sticky: None,
            selected: None,
            main_size: 0.0,
            start_main_pos: 0.0,
            end_main_pos: 0.0,
            last_constraints: None,
            fixed_main_size: false,
            fixed_main_size_by_constraints: false,
            fixed_cross_size: false,
            layout_size: Size::default(),
            reach_start: false,
            reach_end: false,
            is_out_of_boundary: false,
            main_scroll_extent: 0.0,
            real_main_size: 0.0,
            scrollable: false,
            start_cached: 0,
            end_cached: 0,
            visible: None,
            focus_index: 0,
            initialized: true,
            needs_layout: true,
            use_cache_hint: false,
            pending_restore: None,
            axis_response_armed: true,
            auto_scrolling_for_item_move: false,
            edge_animation_running: false,
            last_delta: 0.0,
        }
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Reconfigures the engine. The materialized window is released back to
    /// the generator; `start_index` is preserved across reconfiguration
    /// (a pending restore-info index wins). Marks layout dirty.
    pub fn update(&mut self, config: ListConfig, generator: &mut dyn ItemGenerator) {
        self.remove_all_items(generator);
        if let Some(index) = self.pending_restore.take() {
            self.start_index = index;
            self.current_offset = 0.0;
        }
        rdebug!(
            cached_count = config.cached_count,
            spacing = config.item_spacing,
            "ListLayoutEngine::update"
        );
        self.config = config;
        self.mark_needs_layout(false);
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn current_offset(&self) -> f64 {
        self.current_offset
    }

    /// Total content extent measured by the last pass (cursor end minus
    /// `current_offset`).
    pub fn main_scroll_extent(&self) -> f64 {
        self.main_scroll_extent
    }

    pub fn layout_size(&self) -> Size {
        self.layout_size
    }

    pub fn reach_start(&self) -> bool {
        self.reach_start
    }

    pub fn reach_end(&self) -> bool {
        self.reach_end
    }

    /// Whether the scroll gesture should be offered at all: false while the
    /// content does not exceed the viewport.
    pub fn is_scrollable(&self) -> bool {
        self.scrollable
    }

    pub fn is_out_of_boundary(&self) -> bool {
        self.is_out_of_boundary
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    pub fn materialized_len(&self) -> usize {
        self.items.len()
    }

    /// Index range of viewport-intersecting children after the last pass.
    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.visible
    }

    pub fn sticky_index(&self) -> Option<usize> {
        self.sticky.map(|s| s.index)
    }

    /// Pinned position of the current sticky item, if any.
    pub fn sticky_position(&self) -> Option<f64> {
        self.sticky.map(|s| s.position)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected.map(|s| s.index)
    }

    /// Floating main-axis position of the drag-reordered item.
    pub fn selected_position(&self) -> Option<f64> {
        self.selected.map(|s| s.main_axis)
    }

    /// Assigned main-axis position of the materialized child at `index`.
    pub fn item_position(&self, index: usize) -> Option<f64> {
        let slot = index.checked_sub(self.start_index)?;
        self.items.get(slot).map(|item| item.position)
    }

    pub fn item_main_extent(&self, index: usize) -> Option<f64> {
        let slot = index.checked_sub(self.start_index)?;
        self.items.get(slot).map(|item| item.metrics.main_extent)
    }

    /// Nearest materialized child at or before `main_pos`, for drag-start
    /// resolution.
    pub fn find_item_at(&self, main_pos: f64) -> Option<usize> {
        let mut found = None;
        let mut index = self.start_index;
        for item in &self.items {
            if item.position > main_pos {
                return found;
            }
            found = Some(index);
            index += 1;
        }
        found
    }

    fn mark_needs_layout(&mut self, use_cache: bool) {
        self.needs_layout = true;
        if use_cache {
            self.use_cache_hint = true;
        }
    }

    /// Adapter hook: true while a spring/edge animation is driving offsets,
    /// which suppresses the edge snap in [`Self::perform_layout`].
    pub fn set_edge_animation_running(&mut self, running: bool) {
        self.edge_animation_running = running;
    }

    fn sink(&self) -> Option<Arc<dyn ScrollEventSink + Send + Sync>> {
        self.config.event_sink.clone()
    }

    /// Reports the settled state to the event sink. Called by the driver
    /// when its gesture/animation pipeline goes idle.
    pub fn notify_scroll_idle(&self) {
        if let Some(sink) = self.sink() {
            sink.on_scroll(self.last_delta, ScrollState::Idle);
        }
    }

    /// Applies a signed scroll delta from `source`.
    ///
    /// Returns `false` (leaving all state untouched) when the delta would
    /// push past an already reached edge and no edge effect is configured.
    /// Accepted deltas fire [`ScrollEventSink::on_scroll`] and mark layout
    /// dirty with the use-cache hint.
    pub fn update_scroll_position(&mut self, delta: f64, source: ScrollSource) -> bool {
        if source == ScrollSource::DragStart {
            return true;
        }
        if near_zero(delta) {
            return true;
        }
        if self.reach_start && self.reach_end {
            return false;
        }

        let spring = self.config.edge_effect.is_spring();
        if delta > 0.0 {
            if self.reach_start && !spring {
                return false;
            }
            self.reach_end = false;
        } else {
            if self.reach_end && !spring {
                return false;
            }
            self.reach_start = false;
        }

        self.last_delta = delta;
        if let Some(sink) = self.sink() {
            match source {
                ScrollSource::DragUpdate | ScrollSource::BarDrag => {
                    sink.on_scroll(delta, ScrollState::Drag);
                }
                ScrollSource::Animation | ScrollSource::AnimationSpring => {
                    sink.on_scroll(delta, ScrollState::Fling);
                }
                _ => {}
            }
        }

        rtrace!(delta, "update_scroll_position");
        self.current_offset += delta;
        self.mark_needs_layout(true);
        true
    }

    /// Mouse-wheel / rotary input. At most one axis delta is consumed per
    /// layout pass; further events are dropped until the next pass re-arms.
    pub fn handle_axis_delta(&mut self, delta: f64) -> bool {
        if !self.axis_response_armed {
            return false;
        }
        self.axis_response_armed = false;
        self.update_scroll_position(-delta, ScrollSource::Wheel)
    }

    pub fn is_axis_scrollable(&self, direction: AxisDirection) -> bool {
        if direction.toward_start() {
            !self.reach_start
        } else {
            !self.reach_end
        }
    }

    /// Discards the materialized window and restarts layout at `index`.
    pub fn jump_to_index(&mut self, index: usize, generator: &mut dyn ItemGenerator) {
        self.remove_all_items(generator);
        self.start_index = index;
        self.current_offset = 0.0;
        self.mark_needs_layout(true);
    }

    /// Serializes the first visible index for host-side state persistence.
    pub fn provide_restore_info(&self) -> String {
        self.visible.map(|v| v.first).unwrap_or(0).to_string()
    }

    /// Restores a scroll position captured by [`Self::provide_restore_info`].
    /// Applied on the next [`Self::update`] or layout pass; malformed input
    /// is ignored.
    pub fn apply_restore_info(&mut self, info: &str) {
        match info.trim().parse::<usize>() {
            Ok(index) => {
                self.pending_restore = Some(index);
                self.mark_needs_layout(false);
            }
            Err(_) => {
                rwarn!(info, "apply_restore_info: not a decimal index");
            }
        }
    }

    /// Directional focus move: `+1`/`-1` steps along the list axis, `None`
    /// when the move direction does not apply to this list.
    pub fn request_next_focus(&mut self, direction_vertical: bool, reverse: bool) -> Option<usize> {
        let step = scroll_step(
            self.config.right_to_left,
            self.config.axis.is_vertical(),
            direction_vertical,
            reverse,
        )?;
        let next = self.focus_index.checked_add_signed(step)?;
        self.focus_index = next;
        Some(next)
    }

    fn remove_all_items(&mut self, generator: &mut dyn ItemGenerator) {
        let mut index = self.start_index;
        let sticky_index = self.sticky.map(|s| s.index);
        let selected_index = self.selected.map(|s| s.index);
        for _ in 0..self.items.len() {
            if Some(index) != sticky_index && Some(index) != selected_index {
                generator.recycle_item(index);
            }
            index += 1;
        }
        self.items.clear();
        if let Some(sticky) = self.sticky.take() {
            generator.recycle_item(sticky.index);
        }
        self.visible = None;
    }

    fn inner_constraints(&self, constraints: &LayoutConstraints) -> LayoutConstraints {
        let axis = self.config.axis;
        LayoutConstraints::new(
            Size::from_main_cross(axis, 0.0, constraints.min.cross(axis)),
            Size::from_main_cross(axis, f64::INFINITY, constraints.max.cross(axis)),
        )
    }

    /// Runs one layout pass. Returns the engine's final layout size, or
    /// `None` when the viewport is degenerate (the pass is then a no-op; an
    /// unbounded viewport additionally releases the window and resets
    /// scroll bookkeeping).
    pub fn perform_layout(
        &mut self,
        generator: &mut dyn ItemGenerator,
        constraints: LayoutConstraints,
    ) -> Option<Size> {
        self.needs_layout = false;
        self.use_cache_hint = false;

        if let Some(index) = self.pending_restore.take() {
            self.remove_all_items(generator);
            self.start_index = index;
            self.current_offset = 0.0;
        }

        let main_size = self.apply_layout_param(&constraints, generator)?;
        let inner = self.inner_constraints(&constraints);

        let mut cur_main_pos = self.layout_or_recycle_current_items(generator, &inner, main_size);

        // Fill toward the end.
        loop {
            if self.config.cached_count != 0 {
                if self.end_cached >= self.config.cached_count {
                    break;
                }
            } else if cur_main_pos >= self.end_main_pos {
                break;
            }
            let new_index = self.start_index + self.items.len();
            let Some(metrics) = self.request_and_layout_new_item(generator, new_index, &inner, false)
            else {
                self.start_index = self.start_index.min(generator.total_count());
                break;
            };
            if cur_main_pos >= main_size {
                self.end_cached += 1;
            }
            cur_main_pos += metrics.main_extent + self.config.item_spacing;
        }

        if let Some(selected) = self.selected
            && selected.index < self.start_index
        {
            cur_main_pos += selected.metrics.main_extent + self.config.item_spacing;
        }

        cur_main_pos -= self.config.item_spacing;

        let was_reach_start = self.reach_start;
        let was_reach_end = self.reach_end;

        self.reach_end = cur_main_pos <= main_size;
        let no_edge_effect = !self.edge_animation_running
            || !self.config.edge_effect.is_spring()
            || self.auto_scrolling_for_item_move;
        if no_edge_effect && self.reach_end {
            // Close the residual gap instead of leaving a blank strip.
            self.current_offset += main_size - cur_main_pos;
            cur_main_pos = main_size;
        }

        // Fill toward the start.
        while self.start_index > 0 {
            if self.config.cached_count != 0 {
                if self.start_cached >= self.config.cached_count {
                    break;
                }
            } else if self.current_offset <= self.start_main_pos {
                break;
            }
            let new_index = self.start_index - 1;
            let Some(metrics) = self.request_and_layout_new_item(generator, new_index, &inner, true)
            else {
                break;
            };
            self.start_index = new_index;
            if Some(new_index) == self.selected.map(|s| s.index) {
                continue;
            }
            if self.current_offset <= 0.0 {
                self.start_cached += 1;
            }
            self.current_offset -= metrics.main_extent + self.config.item_spacing;
        }

        self.reach_start = self.current_offset >= 0.0;
        if no_edge_effect && self.reach_start {
            cur_main_pos -= self.current_offset;
            self.current_offset = 0.0;
        }

        if !self.fixed_main_size {
            self.fixed_main_size = !(self.reach_start && self.reach_end);
        }

        if let Some(sink) = self.sink() {
            if self.reach_start && !was_reach_start {
                sink.on_reach_start();
            }
            if self.reach_end && !was_reach_end {
                sink.on_reach_end();
            }
        }

        self.calculate_main_scroll_extent(cur_main_pos, main_size);

        let content_size = self.set_items_position(main_size, generator, &inner);

        self.layout_size = if self.config.declared_main_size {
            constraints.max
        } else {
            constraints.constrain(content_size)
        };

        self.auto_scrolling_for_item_move = false;
        self.real_main_size = cur_main_pos - self.current_offset;
        self.axis_response_armed = true;

        rtrace!(
            start_index = self.start_index,
            materialized = self.items.len(),
            offset = self.current_offset,
            reach_start = self.reach_start,
            reach_end = self.reach_end,
            "perform_layout"
        );

        Some(self.layout_size)
    }

    /// Resolves viewport geometry, or `None` when layout must be skipped.
    fn apply_layout_param(
        &mut self,
        constraints: &LayoutConstraints,
        generator: &mut dyn ItemGenerator,
    ) -> Option<f64> {
        if constraints.is_degenerate() {
            rwarn!("cannot layout using an empty viewport");
            return None;
        }

        let axis = self.config.axis;
        let max_main = constraints.max.main(axis);

        if self.last_constraints != Some(*constraints) {
            self.last_constraints = Some(*constraints);

            if max_main.is_infinite() {
                // An ancestor temporarily reports unbounded extent: release
                // everything and wait for real geometry.
                rwarn!("unbounded viewport, resetting window");
                self.remove_all_items(generator);
                self.start_index = 0;
                self.current_offset = 0.0;
                self.fixed_main_size_by_constraints = false;
                self.last_constraints = None;
                return None;
            }

            self.start_main_pos = (1.0 - VIEWPORT_SCALE) * max_main;
            self.end_main_pos = VIEWPORT_SCALE * max_main;
            self.fixed_main_size_by_constraints =
                (max_main - constraints.min.main(axis)).abs() < 1e-6;
            self.fixed_cross_size = constraints.max.cross(axis).is_finite();
        } else if max_main.is_infinite() {
            return None;
        }

        self.fixed_main_size = self.fixed_main_size_by_constraints;
        self.main_size = max_main;
        Some(max_main)
    }

    /// Walks the existing window once: children still inside the retained
    /// window are re-measured in place, the rest are recycled. Returns the
    /// cursor position after the last retained child.
    fn layout_or_recycle_current_items(
        &mut self,
        generator: &mut dyn ItemGenerator,
        inner: &LayoutConstraints,
        main_size: f64,
    ) -> f64 {
        if let Some(sticky) = &mut self.sticky
            && let Some(metrics) = generator.measure_item(sticky.index, inner)
        {
            sticky.metrics = metrics;
        }

        let sticky_index = self.sticky.map(|s| s.index);
        let selected_index = self.selected.map(|s| s.index);
        let spacing = self.config.item_spacing;

        let mut cur_main_pos = self.current_offset;

        if self.config.cached_count != 0 {
            self.start_cached = 0;
            self.end_cached = 0;
            let recycle_all = cur_main_pos >= main_size;

            let mut slot = 0;
            let mut cur_index = self.start_index;
            while slot < self.items.len() {
                if recycle_all || self.end_cached >= self.config.cached_count {
                    if Some(cur_index) != sticky_index && Some(cur_index) != selected_index {
                        generator.recycle_item(cur_index);
                    }
                    self.items.remove(slot);
                    cur_index += 1;
                    continue;
                }

                if cur_main_pos >= main_size {
                    self.end_cached += 1;
                }

                if let Some(metrics) = generator.measure_item(cur_index, inner) {
                    self.items[slot].metrics = metrics;
                }
                cur_main_pos += self.items[slot].metrics.main_extent + spacing;
                if cur_main_pos <= 0.0 {
                    self.start_cached += 1;
                }
                slot += 1;
                cur_index += 1;
            }

            // Shrink from the front when the backward budget is exceeded.
            let mut cur_pos = self.current_offset;
            let mut cur_index = self.start_index;
            while !self.items.is_empty() && self.start_cached > self.config.cached_count {
                let extent = self.items[0].metrics.main_extent;
                cur_pos += extent + spacing;
                self.current_offset = cur_pos;
                self.start_index = cur_index + 1;
                if Some(cur_index) != sticky_index && Some(cur_index) != selected_index {
                    generator.recycle_item(cur_index);
                }
                self.items.pop_front();
                self.start_cached -= 1;
                cur_index += 1;
            }
        } else {
            let mut slot = 0;
            let mut cur_index = self.start_index;
            while slot < self.items.len() {
                let mut retained = false;
                if cur_main_pos <= self.end_main_pos {
                    if let Some(metrics) = generator.measure_item(cur_index, inner) {
                        self.items[slot].metrics = metrics;
                    }
                    cur_main_pos += self.items[slot].metrics.main_extent + spacing;
                    if cur_main_pos >= self.start_main_pos {
                        retained = true;
                    } else {
                        // Entirely before the retained window: the window
                        // start moves past this child.
                        self.current_offset = cur_main_pos;
                        self.start_index = cur_index + 1;
                    }
                }

                if retained {
                    slot += 1;
                } else {
                    if Some(cur_index) != sticky_index && Some(cur_index) != selected_index {
                        generator.recycle_item(cur_index);
                    }
                    self.items.remove(slot);
                }
                cur_index += 1;
            }
        }

        cur_main_pos
    }

    /// Materializes the child at `index`, reusing the pinned sticky item's
    /// geometry when the indices coincide.
    fn request_and_layout_new_item(
        &mut self,
        generator: &mut dyn ItemGenerator,
        index: usize,
        inner: &LayoutConstraints,
        front: bool,
    ) -> Option<ItemMetrics> {
        let metrics = match self.sticky {
            Some(sticky) if sticky.index == index => sticky.metrics,
            _ => generator.request_item(index, inner)?,
        };

        let item = MaterializedItem {
            metrics,
            position: 0.0,
        };
        if front {
            self.items.push_front(item);
        } else {
            self.items.push_back(item);
        }
        Some(metrics)
    }

    fn calculate_main_scroll_extent(&mut self, cur_main_pos: f64, main_size: f64) {
        self.is_out_of_boundary = cur_main_pos < main_size || self.current_offset > 0.0;
        self.main_scroll_extent = cur_main_pos - self.current_offset;
        self.scrollable = self.main_scroll_extent >= main_size;
    }

    /// Position-assignment pass: walks the window once, composing the
    /// drag-reorder swap, the chain displacement and the sticky clamp, and
    /// reports visible-range changes. Returns the content size.
    fn set_items_position(
        &mut self,
        main_size: f64,
        generator: &mut dyn ItemGenerator,
        inner: &LayoutConstraints,
    ) -> Size {
        let axis = self.config.axis;
        let spacing = self.config.item_spacing;
        let max_cross = self
            .last_constraints
            .map(|c| c.max.cross(axis))
            .unwrap_or(0.0);
        let mut cross_size = if self.fixed_cross_size { max_cross } else { 0.0 };

        if self.items.is_empty() {
            let main = if self.fixed_main_size { main_size } else { 0.0 };
            return Size::from_main_cross(axis, main, cross_size);
        }

        let chain = self.config.chain_offset.clone();
        let mut selected = self.selected;
        let selected_main = selected.map(|s| s.metrics.main_extent).unwrap_or(0.0);

        let mut cur_main_pos = self.current_offset;
        let mut index = self.start_index;
        let mut new_sticky: Option<(usize, ItemMetrics)> = None;
        let mut next_sticky: Option<(usize, f64)> = None;
        let mut first_idx = usize::MAX;
        let mut last_idx = 0usize;
        let fixed_main_size = self.fixed_main_size;
        let fixed_cross_size = self.fixed_cross_size;

        for child in self.items.iter_mut() {
            let child_main = child.metrics.main_extent;

            if let Some(sel) = &mut selected {
                let range = selected_main.min(child_main) / 2.0;
                let before_selected = index <= sel.index;
                if before_selected && sel.target_index == index {
                    sel.target_main_axis = cur_main_pos;
                    cur_main_pos += selected_main + spacing;
                }

                if sel.moving_forward {
                    let axis_pos = sel.main_axis;
                    if axis_pos >= cur_main_pos && axis_pos < cur_main_pos + range {
                        sel.target_index = if before_selected { index } else { index - 1 };
                        sel.target_main_axis = cur_main_pos;
                        cur_main_pos += selected_main + spacing;
                    }
                } else {
                    let axis_pos = sel.main_axis + selected_main;
                    let limit = cur_main_pos + child_main;
                    if axis_pos > limit - range && axis_pos <= limit {
                        sel.target_index = if before_selected { index + 1 } else { index };
                        sel.target_main_axis = cur_main_pos;
                        cur_main_pos -= selected_main + spacing;
                    }
                }
            }

            let mut position = cur_main_pos;
            if let Some(chain) = &chain {
                position -= chain(index);
            }
            child.position = position;

            // Sticky mode is disabled while the list expands all items.
            if fixed_main_size && child.metrics.sticky.is_sticky() {
                if cur_main_pos <= 0.0 {
                    new_sticky = Some((index, child.metrics));
                } else if next_sticky.is_none() {
                    next_sticky = Some((index, cur_main_pos));
                }
            }

            let child_full = child_main + spacing;
            if cur_main_pos < main_size && cur_main_pos + child_full > 0.0 {
                if !fixed_cross_size {
                    cross_size = cross_size.max(child.metrics.cross_extent);
                }
                first_idx = first_idx.min(index);
                last_idx = last_idx.max(index);
            }

            if selected.map(|s| s.index) != Some(index) {
                cur_main_pos += child_full;
            }

            if let Some(sel) = &mut selected
                && index > sel.index
                && sel.target_index == index
            {
                sel.target_main_axis = cur_main_pos;
                cur_main_pos += selected_main + spacing;
            }

            index += 1;
        }

        self.selected = selected;

        if first_idx != usize::MAX {
            let range = VisibleRange {
                first: first_idx,
                last: last_idx,
            };
            if self.visible != Some(range) {
                self.visible = Some(range);
                if let Some(sink) = self.sink() {
                    sink.on_scroll_index_changed(range);
                }
            }
        }

        if !self.fixed_main_size {
            return Size::from_main_cross(axis, cur_main_pos - spacing, cross_size);
        }

        self.update_sticky_item(new_sticky, next_sticky, generator, inner);
        if let Some(sticky) = &mut self.sticky {
            let sticky_full = sticky.metrics.main_extent + spacing;
            sticky.position = match next_sticky {
                Some((_, next_pos)) if next_pos < sticky_full => next_pos - sticky_full,
                _ => 0.0,
            };
            if !self.fixed_cross_size {
                cross_size = cross_size.max(sticky.metrics.cross_extent);
            }
        }

        Size::from_main_cross(axis, main_size, cross_size)
    }

    /// Sticky ownership handoff. A superseded sticky item is recycled only
    /// after its replacement is installed; at most one child is ever pinned.
    fn update_sticky_item(
        &mut self,
        new_sticky: Option<(usize, ItemMetrics)>,
        next_sticky: Option<(usize, f64)>,
        generator: &mut dyn ItemGenerator,
        inner: &LayoutConstraints,
    ) {
        if let Some((index, metrics)) = new_sticky {
            if self.sticky.map(|s| s.index) == Some(index) {
                return;
            }
            let old = self.sticky.replace(StickyItem {
                index,
                metrics,
                position: 0.0,
            });
            if let Some(old) = old
                && old.index < self.start_index
            {
                generator.recycle_item(old.index);
            }
            return;
        }

        if let (Some((next_index, _)), Some(current)) = (next_sticky, self.sticky)
            && next_index == current.index
        {
            // The pinned item's natural position scrolled back into view;
            // fall back to the sticky item before it.
            let from = current.index.saturating_sub(1);
            self.apply_previous_sticky_item(from, generator, inner);
            return;
        }

        if self.sticky.is_none() && self.start_index > 0 {
            self.apply_previous_sticky_item(self.start_index - 1, generator, inner);
        }
    }

    fn apply_previous_sticky_item(
        &mut self,
        index: usize,
        generator: &mut dyn ItemGenerator,
        inner: &LayoutConstraints,
    ) {
        let Some(new_index) = generator.find_previous_sticky_item(index) else {
            self.sticky = None;
            return;
        };

        let in_window = new_index >= self.start_index
            && new_index < self.start_index + self.items.len();
        let metrics = if in_window {
            self.items
                .get(new_index - self.start_index)
                .map(|item| item.metrics)
        } else {
            generator.request_item(new_index, inner)
        };
        self.sticky = metrics.map(|metrics| StickyItem {
            index: new_index,
            metrics,
            position: 0.0,
        });
    }

    /// Begins a drag-reorder gesture on the materialized child at `index`.
    /// No-op unless the list is configured reorderable.
    pub fn select_item_for_move(&mut self, index: usize) -> bool {
        if !self.config.reorderable {
            return false;
        }
        let Some(slot) = index.checked_sub(self.start_index) else {
            return false;
        };
        let Some(item) = self.items.get(slot) else {
            return false;
        };
        rdebug!(index, "select_item_for_move");
        self.selected = Some(SelectedItem {
            index,
            metrics: item.metrics,
            main_axis: item.position,
            target_index: index,
            target_main_axis: item.position,
            moving_forward: false,
            last_pos: item.position,
        });
        true
    }

    /// Moves the floating item to `position` (main axis, list-local). The
    /// float is clamped to the viewport; residual displacement beyond the
    /// clamp scrolls the list instead.
    pub fn move_selected_item(&mut self, position: f64) {
        let axis = self.config.axis;
        let max_main = self.layout_size.main(axis);
        let Some(sel) = &mut self.selected else {
            return;
        };

        let delta = position - sel.last_pos;
        sel.moving_forward = delta <= 0.0;
        sel.main_axis += delta;
        let mut residual = -delta;
        if sel.main_axis <= 0.0 {
            sel.main_axis = 0.0;
        } else {
            let extent = sel.metrics.main_extent;
            if sel.main_axis + extent >= max_main {
                sel.main_axis = max_main - extent;
            } else {
                residual = 0.0;
                sel.last_pos = position;
            }
        }

        if !near_zero(residual) {
            self.current_offset += residual;
            self.auto_scrolling_for_item_move = true;
        }

        self.mark_needs_layout(false);
    }

    /// Ends the drag-reorder gesture. Returns the committed `(from, to)`
    /// move, if any; the sink may veto via `on_item_move`.
    pub fn finish_selected_item_move(
        &mut self,
        canceled: bool,
        generator: &mut dyn ItemGenerator,
    ) -> Option<(usize, usize)> {
        let sel = self.selected.take()?;

        let mut committed = None;
        if !canceled && sel.target_index != sel.index {
            let approved = self
                .sink()
                .map(|sink| sink.on_item_move(sel.index, sel.target_index))
                .unwrap_or(true);
            if approved {
                committed = Some((sel.index, sel.target_index));
            }
        }

        if sel.index < self.start_index || sel.index >= self.start_index + self.items.len() {
            generator.recycle_item(sel.index);
        }

        self.mark_needs_layout(false);
        committed
    }

    /// Edit-mode deletion bookkeeping: asks the sink for approval, then
    /// shifts the window start when the deleted index precedes it.
    pub fn notify_item_deleted(&mut self, index: usize) -> bool {
        let approved = self
            .sink()
            .map(|sink| sink.on_item_delete(index))
            .unwrap_or(true);
        if !approved {
            rdebug!(index, "item delete vetoed");
            return false;
        }
        if index < self.start_index {
            self.start_index -= 1;
        }
        self.mark_needs_layout(false);
        true
    }

    /// Releases the whole window, e.g. on detach from the host tree.
    pub fn detach(&mut self, generator: &mut dyn ItemGenerator) {
        self.remove_all_items(generator);
        self.start_index = 0;
        self.current_offset = 0.0;
        self.last_constraints = None;
        self.mark_needs_layout(false);
    }
}
