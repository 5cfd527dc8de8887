//! Scroll animation controller.
//!
//! Applies `ScrollPlan`s produced by the centering planner as time-sliced
//! animations. Call `apply()` to start a plan, then `update()` each frame
//! to get the current interpolated scroll position. A plan applied while
//! another animation is in flight supersedes it: the last request wins,
//! there is no queue.

use std::time::{Duration, Instant};

use tabline_core::ScrollConfig;

use super::center::ScrollPlan;
use super::config::ScrollConfigExt;
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp_u16, progress};

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    /// Animation start time
    start: Instant,
    /// Starting scroll position
    from: u16,
    /// Target scroll position
    to: u16,
    /// Animation duration
    duration: Duration,
    /// Easing function
    easing: EasingType,
}

/// Scroll animation controller for one strip viewport.
#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    /// Current active animation (if any)
    animation: Option<ActiveAnimation>,
    /// Configuration
    config: ScrollConfig,
    /// Current scroll position (always up-to-date)
    current_scroll: u16,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self {
            animation: None,
            config: ScrollConfig::default(),
            current_scroll: 0,
        }
    }
}

impl ScrollAnimator {
    /// Create a new scroll animator with configuration
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current_scroll: 0,
        }
    }

    /// Create with default configuration
    pub fn with_defaults() -> Self {
        Self::default()
    }

    /// Get current configuration
    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Check if an animation is currently active
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Check if there's pending work; use this to decide whether the next
    /// frame needs the animation tick rate.
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some()
    }

    /// Get the target scroll position (final position after animation)
    pub fn target_scroll(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current_scroll)
    }

    /// Get the current interpolated scroll position
    #[inline]
    pub fn current_scroll(&self) -> u16 {
        self.current_scroll
    }

    /// Set scroll position immediately (no animation)
    pub fn set_scroll(&mut self, scroll: u16) {
        self.animation = None;
        self.current_scroll = scroll;
    }

    /// Apply a scroll plan.
    ///
    /// If smooth scrolling is disabled, jumps immediately to the target.
    /// If an animation toward the same target is already in flight, the
    /// call is a no-op, so re-applying an identical plan every render
    /// never restarts or multiplies animations. Any other in-flight
    /// animation is superseded, starting from the currently visible
    /// position.
    pub fn apply(&mut self, plan: ScrollPlan) {
        if !self.config.is_smooth() || plan.duration.is_zero() {
            self.current_scroll = plan.to;
            self.animation = None;
            return;
        }

        if let Some(ref anim) = self.animation {
            if anim.to == plan.to {
                return;
            }
        }

        // Start from the visible position, which may differ from
        // plan.from when superseding mid-flight
        let from = self.current_scroll;
        if from == plan.to {
            self.animation = None;
            return;
        }

        tracing::trace!(from, to = plan.to, "starting scroll animation");
        self.animation = Some(ActiveAnimation {
            start: Instant::now(),
            from,
            to: plan.to,
            duration: plan.duration,
            easing: self.config.easing,
        });
    }

    /// Update animation state and return current scroll position.
    ///
    /// Call this every frame to advance the animation. Positions are kept
    /// within `max_scroll` in case the content shrank mid-animation.
    pub fn update(&mut self, max_scroll: u16) -> u16 {
        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, anim.duration) {
                self.current_scroll = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                let t = progress(anim.start, anim.duration);
                let eased_t = anim.easing.apply(t);
                self.current_scroll = lerp_u16(anim.from, anim.to, eased_t).min(max_scroll);
            }
        } else if self.current_scroll > max_scroll {
            self.current_scroll = max_scroll;
        }

        self.current_scroll
    }

    /// Cancel any active animation and stop at the current position
    pub fn cancel(&mut self) {
        self.animation = None;
    }

    /// Reset to initial state
    pub fn reset(&mut self) {
        self.animation = None;
        self.current_scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(from: u16, to: u16, ms: u64) -> ScrollPlan {
        ScrollPlan {
            from,
            to,
            duration: Duration::from_millis(ms),
        }
    }

    #[test]
    fn test_instant_jump_when_smooth_disabled() {
        let config = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let mut animator = ScrollAnimator::new(config);

        animator.apply(plan(0, 100, 300));
        assert_eq!(animator.current_scroll(), 100);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_animation_starts() {
        let mut animator = ScrollAnimator::with_defaults();

        animator.apply(plan(0, 100, 100));
        assert!(animator.is_animating());
        assert_eq!(animator.target_scroll(), 100);
        // Position has not jumped
        assert_eq!(animator.current_scroll(), 0);
    }

    #[test]
    fn test_reapply_same_target_is_noop() {
        let mut animator = ScrollAnimator::with_defaults();

        animator.apply(plan(0, 100, 100));
        animator.apply(plan(0, 100, 100));
        animator.apply(plan(0, 100, 100));
        assert!(animator.is_animating());
        assert_eq!(animator.target_scroll(), 100);
    }

    #[test]
    fn test_already_at_target_is_noop() {
        let mut animator = ScrollAnimator::with_defaults();
        animator.set_scroll(100);
        animator.apply(plan(100, 100, 100));
        assert!(!animator.is_animating());
        assert_eq!(animator.current_scroll(), 100);
    }

    #[test]
    fn test_supersession_lands_on_second_target() {
        let mut animator = ScrollAnimator::with_defaults();

        animator.apply(plan(0, 200, 40));
        std::thread::sleep(Duration::from_millis(10));
        animator.update(500);

        // Second request replaces the first mid-flight
        animator.apply(plan(0, 50, 40));
        assert_eq!(animator.target_scroll(), 50);

        std::thread::sleep(Duration::from_millis(50));
        let final_pos = animator.update(500);
        assert_eq!(final_pos, 50);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_update_clamps_to_max_scroll() {
        let mut animator = ScrollAnimator::with_defaults();
        animator.set_scroll(300);
        // Content shrank below the current position
        assert_eq!(animator.update(120), 120);
    }

    #[test]
    fn test_completion_snaps_to_target() {
        let mut animator = ScrollAnimator::with_defaults();
        animator.apply(plan(0, 80, 20));
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(animator.update(500), 80);
        assert!(!animator.is_animating());
    }
}
