/// The scroll axis of a list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

impl Axis {
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical)
    }
}

/// Where a scroll-position update originated.
///
/// The engine reports different [`ScrollState`]s to its event sink depending
/// on the source, and ignores deltas from sources that only mark the start of
/// a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollSource {
    /// The initial touch-down of a drag; carries no displacement.
    DragStart,
    /// A finger/pointer drag in progress.
    DragUpdate,
    /// A programmatic or fling animation tick.
    Animation,
    /// A spring (edge-effect) animation tick.
    AnimationSpring,
    /// A programmatic jump (restore, accessibility paging).
    Jump,
    /// A mouse-wheel / rotary axis event.
    Wheel,
    /// A shared scroll-bar proxy drag.
    BarDrag,
}

/// The scroll state reported to [`ScrollEventSink::on_scroll`].
///
/// [`ScrollEventSink::on_scroll`]: crate::ScrollEventSink::on_scroll
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollState {
    #[default]
    Idle,
    Drag,
    Fling,
}

/// Sticky classification of a list child.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StickyMode {
    #[default]
    None,
    /// Pins at the leading edge, pushed out by the next sticky item.
    Normal,
    /// Same layout behavior as `Normal`; hosts may fade instead of push.
    Opacity,
}

impl StickyMode {
    pub fn is_sticky(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Edge behavior when scrolling past the first or last item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeEffect {
    #[default]
    None,
    Spring,
}

impl EdgeEffect {
    pub fn is_spring(self) -> bool {
        matches!(self, Self::Spring)
    }
}

/// A 2D point in f64 pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl core::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl core::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// A 2D size in f64 pixels. Extents may be `f64::INFINITY` while unresolved.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Builds a size from main/cross extents for the given axis.
    pub fn from_main_cross(axis: Axis, main: f64, cross: f64) -> Self {
        match axis {
            Axis::Vertical => Self::new(cross, main),
            Axis::Horizontal => Self::new(main, cross),
        }
    }

    pub fn main(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.height,
            Axis::Horizontal => self.width,
        }
    }

    pub fn cross(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Vertical => self.width,
            Axis::Horizontal => self.height,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle (origin + size) in f64 pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.origin.x
            && p.x < self.origin.x + self.size.width
            && p.y >= self.origin.y
            && p.y < self.origin.y + self.size.height
    }
}

/// Min/max layout constraints handed down by the host container.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConstraints {
    pub min: Size,
    pub max: Size,
}

impl LayoutConstraints {
    pub fn new(min: Size, max: Size) -> Self {
        Self { min, max }
    }

    /// Tight constraints: min == max == `size`.
    pub fn tight(size: Size) -> Self {
        Self {
            min: size,
            max: size,
        }
    }

    /// A viewport the engine cannot lay out into: empty or NaN-tainted max.
    pub fn is_degenerate(&self) -> bool {
        !(self.max.width > 0.0) || !(self.max.height > 0.0)
    }

    /// Clamps `size` into `[min, max]` per component.
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(
            size.width.clamp(self.min.width, self.max.width),
            size.height.clamp(self.min.height, self.max.height),
        )
    }
}

/// Inclusive index range of children intersecting the visible viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub first: usize,
    pub last: usize,
}

/// Direction of a mouse-wheel / rotary axis scroll request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisDirection {
    Up,
    Down,
    Left,
    Right,
}

impl AxisDirection {
    /// Whether this direction scrolls toward the start of the list.
    pub fn toward_start(self) -> bool {
        matches!(self, Self::Up | Self::Left)
    }
}

/// Focus-move step for a directional key event relative to a list.
///
/// `None` means the move direction does not apply to this list's axis (e.g. a
/// vertical arrow key over a horizontal list). Otherwise the step is `+1`
/// (next index) or `-1` (previous index), flipped for right-to-left
/// horizontal lists and for reversed moves.
pub fn scroll_step(
    right_to_left: bool,
    list_vertical: bool,
    direction_vertical: bool,
    reverse: bool,
) -> Option<isize> {
    if list_vertical != direction_vertical {
        return None;
    }
    let mut step = if reverse { -1 } else { 1 };
    if right_to_left && !list_vertical {
        step = -step;
    }
    Some(step)
}
