//! A windowed list layout and recycling engine.
//!
//! For driver-level utilities (tween scrolling, scroll-bar proxies,
//! accessibility paging), see the `recycler-adapter` crate.
//!
//! This crate focuses on the core algorithms needed to lay out very long
//! lists at interactive frame rates: an incrementally maintained window of
//! materialized children, forward/backward fill against a scaled viewport,
//! sticky-header tracking, drag-reorder, and a z-ordered hit-test traversal.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - viewport constraints per layout pass
//! - scroll deltas (drags, animations, wheel events)
//! - an [`ItemGenerator`] that owns, measures and recycles the children
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod config;
mod engine;
mod events;
mod generator;
mod types;


pub use config::{ChainOffset, ListConfig};
pub use engine::{ListLayoutEngine, VIEWPORT_SCALE};
pub use events::{NullEventSink, ScrollEventSink};
pub use generator::{ItemGenerator, ItemMetrics};
pub use hit_test::{
    GestureKind, HitNode, HitRecognizer, HitTarget, HitTestTree, NodeId, PointTransform,
    TouchRestrict, TouchTestResult,
};
pub use types::{
    Axis, AxisDirection, EdgeEffect, LayoutConstraints, Point, Rect, ScrollSource, ScrollState,
    Size, StickyMode, VisibleRange, scroll_step,
};
