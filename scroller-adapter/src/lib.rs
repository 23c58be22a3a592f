//! Adapter utilities for the `scroller` crate.
//!
//! The `scroller` crate is UI-agnostic and focuses on the core math and state. This crate
//! provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - [`Controller`]: owns an engine and drives it from UI events plus a frame clock
//! - [`VecSource`]: a default in-memory [`scroller::Source`] for demos, tests, and small lists
//! - [`Tween`]/[`Easing`]: the animation behind the "scroll to top" affordance
//!
//! This crate is intentionally framework-agnostic (no DOM/ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
mod tween;
mod vec_source;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use tween::{Easing, Tween};
pub use vec_source::{BlockNode, VecSource};
