//! Driver utilities for the `recycler` crate.
//!
//! The `recycler` crate is UI-agnostic and focuses on the core layout and
//! recycling state. This crate provides small, framework-neutral helpers
//! commonly needed by hosts:
//!
//! - Tween-driven programmatic scrolling with the list's duration cap
//! - A shared scroll-bar proxy (one bar driving several scrollables)
//! - Accessibility paging actions and collection shape reporting
//!
//! This crate is intentionally framework-agnostic (no toolkit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod proxy;
mod tween;

#[cfg(test)]
mod tests;

pub use controller::{
    CollectionInfo, Controller, MAX_SCROLL_DURATION_MS, PagedScrollCallback,
};
pub use proxy::{AnimatorHooks, ScrollBarCallback, ScrollBarProxy};
pub use tween::{Easing, Tween};
