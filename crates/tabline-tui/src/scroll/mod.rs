//! Smooth scrolling system for the tab strip.
//!
//! The strip keeps the active tab centered in its viewport. That breaks
//! down into two stages: a pure planning stage that turns measured
//! geometry into a scroll target (`center`), and an effectful stage that
//! animates the viewport position toward that target over a fixed
//! duration (`animation`). The planning stage never touches state, so it
//! is testable without a terminal.
//!
//! `easing` and `timing` are the pure atoms underneath the animator;
//! `config` adds duration/frame-rate resolution on top of the core
//! `ScrollConfig`.

pub mod animation;
pub mod center;
pub mod config;
pub mod easing;
pub mod timing;

pub use animation::ScrollAnimator;
pub use center::{center_on, ElementGeometry, ScrollPlan, ViewportGeometry};
pub use config::ScrollConfigExt;
pub use easing::EasingTypeExt;
