//! Centering planner: decides whether and how far to scroll so that one
//! element sits in the middle of a scrollable viewport.
//!
//! Pure geometry in, plan out. The caller applies the plan through the
//! animator; calling this again with unchanged inputs yields the same
//! plan, so redundant invocations are harmless.

use std::time::Duration;

/// Scrollable viewport measured along its scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportGeometry {
    /// Full content size
    pub total_extent: u16,
    /// Visible window size
    pub visible_extent: u16,
}

impl ViewportGeometry {
    /// Largest valid scroll position
    pub fn max_scroll(&self) -> u16 {
        self.total_extent.saturating_sub(self.visible_extent)
    }
}

/// One element's position within the scrollable content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementGeometry {
    /// Distance from the content start to the element start
    pub offset: u16,
    /// Element size along the scroll axis
    pub extent: u16,
}

/// A scroll animation to run: from the current position to the centering
/// target over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPlan {
    pub from: u16,
    pub to: u16,
    pub duration: Duration,
}

/// Compute the scroll needed to center `element` within `viewport`.
///
/// Returns `None` when no scroll should happen:
/// - the content fits entirely in the viewport, or
/// - the move would be shorter than `threshold` cells (a couple of cells
///   of travel does not read as a smooth scroll).
///
/// The target is `offset - visible/2 + extent/2`, clamped into the valid
/// scroll range.
pub fn center_on(
    viewport: ViewportGeometry,
    element: ElementGeometry,
    current: u16,
    threshold: u16,
    duration: Duration,
) -> Option<ScrollPlan> {
    if viewport.total_extent <= viewport.visible_extent {
        return None;
    }

    let target = element.offset as i32 - viewport.visible_extent as i32 / 2
        + element.extent as i32 / 2;
    let target = target.clamp(0, viewport.max_scroll() as i32) as u16;

    if (target as i32 - current as i32).unsigned_abs() < threshold as u32 {
        return None;
    }

    Some(ScrollPlan {
        from: current,
        to: target,
        duration,
    })
}
