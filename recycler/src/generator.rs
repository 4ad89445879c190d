use crate::{LayoutConstraints, StickyMode};

/// Measured geometry of one materialized child, as retained by the engine.
///
/// The engine never owns generator items. Per layout pass it holds only the
/// child's index plus this plain snapshot, revalidated by re-measuring
/// whenever the child is laid out again.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemMetrics {
    /// Extent along the scroll axis.
    pub main_extent: f64,
    /// Extent along the cross axis.
    pub cross_extent: f64,
    pub sticky: StickyMode,
}

impl ItemMetrics {
    pub fn new(main_extent: f64, cross_extent: f64) -> Self {
        Self {
            main_extent,
            cross_extent,
            sticky: StickyMode::None,
        }
    }

    pub fn with_sticky(mut self, sticky: StickyMode) -> Self {
        self.sticky = sticky;
        self
    }
}

/// The external owner of list children.
///
/// The engine drives this collaborator from its fill loops: children are
/// materialized on demand with [`request_item`], re-laid-out in place with
/// [`measure_item`], and returned to the generator's pool with
/// [`recycle_item`] once they scroll outside the retained window.
///
/// Index exhaustion is not an error: `request_item` returning `None`
/// terminates a fill loop and clamps the engine's bookkeeping. Out-of-range
/// `recycle_item` calls must be tolerated (treated as already absent).
///
/// [`request_item`]: ItemGenerator::request_item
/// [`measure_item`]: ItemGenerator::measure_item
/// [`recycle_item`]: ItemGenerator::recycle_item
pub trait ItemGenerator {
    /// Materializes and lays out the child at `index`.
    fn request_item(
        &mut self,
        index: usize,
        constraints: &LayoutConstraints,
    ) -> Option<ItemMetrics>;

    /// Re-lays-out an already materialized child in place.
    fn measure_item(
        &mut self,
        index: usize,
        constraints: &LayoutConstraints,
    ) -> Option<ItemMetrics>;

    /// Returns the child at `index` to the recycle pool.
    fn recycle_item(&mut self, index: usize);

    fn total_count(&self) -> usize;

    /// Finds the nearest sticky-flagged index at or before `index`.
    fn find_previous_sticky_item(&self, index: usize) -> Option<usize> {
        let _ = index;
        None
    }
}
