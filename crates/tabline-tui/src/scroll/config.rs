//! Configuration utilities for smooth scrolling.
//!
//! `ScrollConfig` itself lives in `tabline-core`; this adds the
//! resolution logic the animator needs.

use std::time::Duration;

pub use tabline_core::{EasingType, PlatformFamily, ScrollConfig};

/// Extension trait for `ScrollConfig` with utility methods
pub trait ScrollConfigExt {
    /// Effective animation duration on the given platform family
    fn animation_duration(&self, platform: PlatformFamily) -> Duration;

    /// Tick duration for the animation frame rate
    fn animation_tick_duration(&self) -> Duration;

    /// Check if smooth scrolling is effectively enabled
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn animation_duration(&self, platform: PlatformFamily) -> Duration {
        self.duration_for(platform)
    }

    #[inline]
    fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms != Some(0)
    }
}
