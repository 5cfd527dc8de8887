use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use tabline_core::{PlatformFamily, ScrollConfig, Tab};

use crate::input::{PointerIntent, PointerKind};
use crate::scroll::config::ScrollConfigExt;
use crate::scroll::easing::{EasingType, EasingTypeExt};
use crate::scroll::timing::{is_complete, lerp_u16, progress};
use crate::scroll::{center_on, ElementGeometry, ScrollAnimator, ViewportGeometry};
use crate::theme::Theme;

/// Scroll axis of a strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAxis {
    Horizontal,
    Vertical,
}

/// What a pointer interaction on the strip asks the owner to do.
///
/// The strip never activates a tab on its own initiative; activation is
/// forwarded so the owner stays the single writer of the active index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabStripEvent {
    /// The user activated the tab at this index
    Activate(usize),
    /// The user asked for the tab's context menu, anchored at a cell
    OpenMenu { tab: usize, anchor: (u16, u16) },
}

/// Tab strip state: active index bookkeeping, scroll animation, the
/// sliding active indicator, and the measured layout of the last render.
///
/// The tab list itself is owned by the caller and passed in per render;
/// the strip only reads it. `previous_active` is observational, used to
/// pick between sliding and snapping the indicator, never to mutate tabs.
#[derive(Debug)]
pub struct TabStripState {
    axis: ScrollAxis,
    active: usize,
    previous_active: Option<usize>,
    /// Set by `set_active_tab`, consumed by the first layout commit after it
    pending_activation: bool,
    animator: ScrollAnimator,
    indicator: ActiveIndicator,
    geometries: Vec<ElementGeometry>,
    viewport: Option<ViewportGeometry>,
    area: Option<Rect>,
    /// Tab whose context menu is currently open, if any
    menu_tab: Option<usize>,
    config: ScrollConfig,
    platform: PlatformFamily,
}

impl TabStripState {
    pub fn horizontal(config: ScrollConfig, platform: PlatformFamily) -> Self {
        Self::new(ScrollAxis::Horizontal, config, platform)
    }

    pub fn vertical(config: ScrollConfig, platform: PlatformFamily) -> Self {
        Self::new(ScrollAxis::Vertical, config, platform)
    }

    fn new(axis: ScrollAxis, config: ScrollConfig, platform: PlatformFamily) -> Self {
        Self {
            axis,
            active: 0,
            previous_active: None,
            pending_activation: false,
            animator: ScrollAnimator::new(config.clone()),
            indicator: ActiveIndicator::default(),
            geometries: Vec::new(),
            viewport: None,
            area: None,
            menu_tab: None,
            config,
            platform,
        }
    }

    pub fn axis(&self) -> ScrollAxis {
        self.axis
    }

    pub fn active_tab(&self) -> usize {
        self.active
    }

    pub fn previous_active_tab(&self) -> Option<usize> {
        self.previous_active
    }

    /// Change the active tab.
    ///
    /// Records the prior index and schedules the post-layout centering
    /// pass. No validation against the tab count happens here; the owner
    /// maintains that invariant.
    pub fn set_active_tab(&mut self, index: usize) {
        if index == self.active {
            return;
        }
        self.previous_active = Some(self.active);
        self.active = index;
        self.pending_activation = true;
    }

    /// Record the measured layout of the render that just happened.
    ///
    /// Geometry index i is tab i; the render must emit tabs in list
    /// order with nothing interleaved, because everything downstream
    /// (centering, hit testing, the indicator) locates tabs positionally.
    pub fn commit_layout(
        &mut self,
        geometries: Vec<ElementGeometry>,
        viewport: ViewportGeometry,
        area: Rect,
    ) {
        self.geometries = geometries;
        self.viewport = Some(viewport);
        self.area = Some(area);
    }

    /// Run the post-layout activation effects: center the active tab and
    /// move the indicator.
    ///
    /// Does nothing unless an activation is pending (or the indicator has
    /// never been placed), so calling this every render is harmless. An
    /// active index with no measured geometry means the layout has not
    /// caught up; the step is skipped and not retried, since the next
    /// activation change re-evaluates naturally.
    pub fn apply_pending_activation(&mut self) {
        if !self.pending_activation {
            // Initial render: put the indicator on the active tab without
            // any transition
            if self.indicator.position().is_none() {
                if let Some(&geom) = self.geometries.get(self.active) {
                    self.indicator.place(geom);
                }
            }
            return;
        }
        self.pending_activation = false;

        let Some(viewport) = self.viewport else {
            return;
        };
        let Some(&element) = self.geometries.get(self.active) else {
            // Stale index against the rendered children; not actionable
            tracing::trace!(active = self.active, "active tab not rendered, skipping scroll");
            return;
        };

        let duration = self.config.duration_for(self.platform);
        if let Some(plan) = center_on(
            viewport,
            element,
            self.animator.current_scroll(),
            self.config.center_threshold,
            duration,
        ) {
            self.animator.apply(plan);
        }

        match self.previous_active {
            Some(prev) if prev < self.geometries.len() => {
                if self.config.is_smooth() {
                    self.indicator
                        .slide(self.geometries[prev], element, duration, self.config.easing);
                } else {
                    self.indicator.place(element);
                }
            }
            // The tab list shrank past the previous position (or this is
            // the first activation): the origin geometry is gone, so the
            // indicator snaps onto the active tab
            _ => self.indicator.place(element),
        }
    }

    /// Advance animations one frame. Returns true while more frames are
    /// needed.
    pub fn update(&mut self) -> bool {
        let max_scroll = self.viewport.map(|v| v.max_scroll()).unwrap_or(0);
        self.animator.update(max_scroll);
        self.indicator.update();
        self.needs_update()
    }

    pub fn needs_update(&self) -> bool {
        self.animator.needs_update() || self.indicator.needs_update()
    }

    /// Current scroll position along the strip's axis
    pub fn scroll_offset(&self) -> u16 {
        self.animator.current_scroll()
    }

    pub(crate) fn indicator_position(&self) -> Option<ElementGeometry> {
        self.indicator.position()
    }

    /// Map a resolved pointer interaction to a strip event.
    ///
    /// Secondary clicks and long presses ask for the context menu when
    /// the tab has actions; primary clicks forward activation.
    pub fn handle_pointer(&self, intent: PointerIntent, tabs: &[Tab]) -> Option<TabStripEvent> {
        let index = self.hit_test(intent.column, intent.row)?;
        match intent.kind {
            PointerKind::PrimaryClick => Some(TabStripEvent::Activate(index)),
            PointerKind::SecondaryClick | PointerKind::LongPress => {
                if tabs.get(index)?.has_context_actions() {
                    Some(TabStripEvent::OpenMenu {
                        tab: index,
                        anchor: (intent.column, intent.row),
                    })
                } else {
                    None
                }
            }
        }
    }

    /// Find the tab at a screen cell, if any
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.area?;
        if column < area.x
            || column >= area.x + area.width
            || row < area.y
            || row >= area.y + area.height
        {
            return None;
        }
        let along = match self.axis {
            ScrollAxis::Horizontal => column - area.x,
            ScrollAxis::Vertical => row - area.y,
        };
        let content_pos = along as u32 + self.scroll_offset() as u32;
        self.geometries.iter().position(|g| {
            (g.offset as u32..g.offset as u32 + g.extent as u32).contains(&content_pos)
        })
    }

    /// Screen anchor of a tab's leading edge, for menus opened from the
    /// keyboard. None when the tab is not rendered.
    pub fn tab_anchor(&self, index: usize) -> Option<(u16, u16)> {
        let area = self.area?;
        let geom = self.geometries.get(index)?;
        let along = (geom.offset as i32 - self.scroll_offset() as i32).max(0) as u16;
        match self.axis {
            ScrollAxis::Horizontal => Some((area.x + along.min(area.width), area.y + 1)),
            ScrollAxis::Vertical => Some((area.x + 1, area.y + along.min(area.height))),
        }
    }

    /// Tab whose context menu is open
    pub fn menu_tab(&self) -> Option<usize> {
        self.menu_tab
    }

    pub fn set_menu_open(&mut self, tab: usize) {
        self.menu_tab = Some(tab);
    }

    /// The menu collaborator reports a close so the strip can drop its
    /// open flag.
    pub fn on_menu_closed(&mut self) {
        self.menu_tab = None;
    }
}

/// The sliding marker under (or beside) the active tab.
///
/// Placed directly on the first render and whenever its origin geometry
/// no longer exists; otherwise it slides from the previously active tab
/// to the new one.
#[derive(Debug, Default)]
struct ActiveIndicator {
    current: Option<ElementGeometry>,
    animation: Option<IndicatorAnimation>,
}

#[derive(Debug)]
struct IndicatorAnimation {
    start: Instant,
    from: ElementGeometry,
    to: ElementGeometry,
    duration: Duration,
    easing: EasingType,
}

impl ActiveIndicator {
    /// Put the indicator somewhere with no transition
    fn place(&mut self, geom: ElementGeometry) {
        self.current = Some(geom);
        self.animation = None;
    }

    /// Animate the indicator between two geometries
    fn slide(&mut self, from: ElementGeometry, to: ElementGeometry, duration: Duration, easing: EasingType) {
        if let Some(ref anim) = self.animation {
            if anim.to == to {
                return;
            }
        }
        if self.current == Some(to) {
            self.animation = None;
            return;
        }
        self.current = Some(from);
        self.animation = Some(IndicatorAnimation {
            start: Instant::now(),
            from,
            to,
            duration,
            easing,
        });
    }

    fn update(&mut self) {
        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, anim.duration) {
                self.current = Some(anim.to);
                self.animation = None;
            } else {
                let t = anim.easing.apply(progress(anim.start, anim.duration));
                self.current = Some(ElementGeometry {
                    offset: lerp_u16(anim.from.offset, anim.to.offset, t),
                    extent: lerp_u16(anim.from.extent, anim.to.extent, t),
                });
            }
        }
    }

    fn needs_update(&self) -> bool {
        self.animation.is_some()
    }

    fn position(&self) -> Option<ElementGeometry> {
        self.current
    }
}

/// Measure each tab's cell extent along the horizontal axis.
///
/// Purely positional: result index i describes tabs[i], offsets are
/// cumulative in list order.
pub fn measure_tabs(tabs: &[Tab]) -> Vec<ElementGeometry> {
    let mut geometries = Vec::with_capacity(tabs.len());
    let mut offset = 0u16;
    for tab in tabs {
        let extent = tab_width(tab);
        geometries.push(ElementGeometry { offset, extent });
        offset = offset.saturating_add(extent);
    }
    geometries
}

/// Row-per-tab measurement for the vertical strip
pub fn measure_tabs_vertical(tabs: &[Tab]) -> Vec<ElementGeometry> {
    (0..tabs.len() as u16)
        .map(|i| ElementGeometry { offset: i, extent: 1 })
        .collect()
}

const TAB_PADDING: &str = "  ";
const BLOCKED_MARKER: &str = " ⊘";

fn badge_text(tab: &Tab) -> Option<String> {
    (tab.badge_count > 0).then(|| format!(" ({})", tab.badge_count))
}

/// Rendered cell width of one tab; must agree with `tab_spans`
fn tab_width(tab: &Tab) -> u16 {
    let mut width = 2 * TAB_PADDING.width() + tab.title.as_str().width();
    if let Some(badge) = badge_text(tab) {
        width += badge.as_str().width();
    }
    if tab.is_blocked {
        width += BLOCKED_MARKER.width();
    }
    width as u16
}

/// Build one tab's styled spans; emitted in the same order as measured
fn tab_spans<'a>(tab: &'a Tab, is_active: bool, menu_open: bool, theme: &Theme) -> Vec<Span<'a>> {
    let title_style = if is_active {
        Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.grey1)
    };
    let cell_style = if menu_open {
        title_style.bg(theme.selection)
    } else {
        title_style
    };

    let mut spans = vec![
        Span::styled(TAB_PADDING, cell_style),
        Span::styled(tab.title.as_str(), cell_style),
    ];
    if let Some(badge) = badge_text(tab) {
        let badge_color = if tab.is_badge_active {
            theme.accent
        } else {
            theme.yellow
        };
        spans.push(Span::styled(badge, cell_style.fg(badge_color)));
    }
    if tab.is_blocked {
        spans.push(Span::styled(BLOCKED_MARKER, cell_style.fg(theme.grey0)));
    }
    spans.push(Span::styled(TAB_PADDING, cell_style));
    spans
}

/// Horizontally scrolling tab strip: one row of tabs over a one-row
/// indicator track.
pub struct TabStripWidget;

impl TabStripWidget {
    /// Suggested strip height (tab row + indicator row)
    pub const HEIGHT: u16 = 2;

    pub fn render(
        frame: &mut Frame,
        area: Rect,
        tabs: &[Tab],
        state: &mut TabStripState,
        theme: &Theme,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let geometries = measure_tabs(tabs);
        let total = geometries
            .last()
            .map(|g| g.offset.saturating_add(g.extent))
            .unwrap_or(0);
        state.commit_layout(
            geometries,
            ViewportGeometry {
                total_extent: total,
                visible_extent: area.width,
            },
            area,
        );
        state.apply_pending_activation();

        let scroll = state.scroll_offset();
        let mut spans = Vec::new();
        for (i, tab) in tabs.iter().enumerate() {
            spans.extend(tab_spans(
                tab,
                i == state.active_tab(),
                state.menu_tab() == Some(i),
                theme,
            ));
        }

        let tab_row = Rect { height: 1, ..area };
        frame.render_widget(
            Paragraph::new(Line::from(spans))
                .style(Style::default().bg(theme.bg1))
                .scroll((0, scroll)),
            tab_row,
        );

        if area.height >= 2 {
            let track_row = Rect {
                y: area.y + 1,
                height: 1,
                ..area
            };
            frame.render_widget(
                Paragraph::new(indicator_line(state, area.width, scroll, theme))
                    .style(Style::default().bg(theme.bg1)),
                track_row,
            );
        }
    }
}

/// Build the indicator track line: the visible slice of the indicator
/// segment, clipped against the scrolled viewport.
fn indicator_line(state: &TabStripState, width: u16, scroll: u16, theme: &Theme) -> Line<'static> {
    let Some(ind) = state.indicator_position() else {
        return Line::from("");
    };
    let view_start = scroll as u32;
    let view_end = view_start + width as u32;
    let seg_start = ind.offset as u32;
    let seg_end = seg_start + ind.extent as u32;

    let start = seg_start.max(view_start);
    let end = seg_end.min(view_end);
    if start >= end {
        return Line::from("");
    }

    let lead = (start - view_start) as usize;
    let len = (end - start) as usize;
    Line::from(vec![
        Span::raw(" ".repeat(lead)),
        Span::styled("▔".repeat(len), Style::default().fg(theme.accent)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabline_core::{ContextAction, ContextEntry};

    fn strip(axis: ScrollAxis) -> TabStripState {
        let config = ScrollConfig {
            animation_duration_ms: Some(40),
            ..Default::default()
        };
        TabStripState::new(axis, config, PlatformFamily::Desktop)
    }

    fn tabs(titles: &[&str]) -> Vec<Tab> {
        titles.iter().map(|t| Tab::new(*t)).collect()
    }

    fn wide_viewport_layout(state: &mut TabStripState, tab_list: &[Tab], visible: u16) {
        let geometries = measure_tabs(tab_list);
        let total = geometries
            .last()
            .map(|g| g.offset + g.extent)
            .unwrap_or(0);
        state.commit_layout(
            geometries,
            ViewportGeometry {
                total_extent: total,
                visible_extent: visible,
            },
            Rect::new(0, 0, visible, 2),
        );
    }

    #[test]
    fn test_measurement_is_cumulative_and_ordered() {
        let list = tabs(&["All", "Work", "Personal"]);
        let geoms = measure_tabs(&list);
        assert_eq!(geoms.len(), 3);
        assert_eq!(geoms[0].offset, 0);
        assert_eq!(geoms[1].offset, geoms[0].extent);
        assert_eq!(geoms[2].offset, geoms[1].offset + geoms[1].extent);
        // "Personal" is wider than "All"
        assert!(geoms[2].extent > geoms[0].extent);
    }

    #[test]
    fn test_centering_is_positional_not_identity_based() {
        // Same titles, different order: position 1 must resolve to
        // whatever sits at position 1 now
        let abc = tabs(&["Aaaaaaaa", "Bb", "Cccc"]);
        let bac = tabs(&["Bb", "Aaaaaaaa", "Cccc"]);

        let geoms_abc = measure_tabs(&abc);
        let geoms_bac = measure_tabs(&bac);

        // In [A, B, C], position 1 has A's width before it; in
        // [B, A, C], position 1 is A itself at B's old offset
        assert_eq!(geoms_abc[1].offset, geoms_abc[0].extent);
        assert_eq!(geoms_bac[1].offset, geoms_bac[0].extent);
        assert_ne!(geoms_abc[1].offset, geoms_bac[1].offset);
        assert_eq!(geoms_bac[1].extent, geoms_abc[0].extent);

        // Centering on index 1 therefore lands on different targets for
        // the two orders, driven purely by what occupies the position
        let viewport = ViewportGeometry {
            total_extent: 200,
            visible_extent: 10,
        };
        let duration = Duration::from_millis(300);
        let to_abc = center_on(viewport, geoms_abc[1], 100, 0, duration)
            .unwrap()
            .to;
        let to_bac = center_on(viewport, geoms_bac[1], 100, 0, duration)
            .unwrap()
            .to;
        assert_ne!(to_abc, to_bac);
    }

    #[test]
    fn test_activation_centers_active_tab() {
        let mut state = strip(ScrollAxis::Horizontal);
        let list: Vec<Tab> = (0..20).map(|i| Tab::new(format!("Folder {}", i))).collect();

        state.set_active_tab(15);
        wide_viewport_layout(&mut state, &list, 40);
        state.apply_pending_activation();

        let geoms = measure_tabs(&list);
        let expected = (geoms[15].offset as i32 - 20 + geoms[15].extent as i32 / 2)
            .clamp(0, (geoms.last().unwrap().offset + geoms.last().unwrap().extent - 40) as i32)
            as u16;
        assert!(state.needs_update());
        assert_eq!(state.animator.target_scroll(), expected);
    }

    #[test]
    fn test_stale_active_index_is_silent() {
        let mut state = strip(ScrollAxis::Horizontal);
        let list = tabs(&["All", "Work"]);

        state.set_active_tab(5);
        wide_viewport_layout(&mut state, &list, 10);
        state.apply_pending_activation();

        assert!(!state.needs_update());
        assert_eq!(state.scroll_offset(), 0);
        // The pending flag was consumed, not left to retry
        state.apply_pending_activation();
        assert!(!state.needs_update());
    }

    #[test]
    fn test_redundant_apply_does_not_restart() {
        let mut state = strip(ScrollAxis::Horizontal);
        let list: Vec<Tab> = (0..20).map(|i| Tab::new(format!("Folder {}", i))).collect();

        state.set_active_tab(15);
        wide_viewport_layout(&mut state, &list, 40);
        state.apply_pending_activation();
        let target = state.animator.target_scroll();

        // Re-running the post-layout pass with unchanged inputs changes
        // nothing
        state.apply_pending_activation();
        assert_eq!(state.animator.target_scroll(), target);
    }

    #[test]
    fn test_shrink_repair_snaps_indicator_onto_active_tab() {
        let mut state = strip(ScrollAxis::Horizontal);

        // Four tabs, the last one active
        let four: Vec<Tab> = tabs(&["All", "Work", "News", "Spam"]);
        state.set_active_tab(3);
        wide_viewport_layout(&mut state, &four, 80);
        state.apply_pending_activation();
        state.update();

        // The list shrinks to two tabs and tab 1 becomes active while
        // previous_active still points at the vanished position 3
        let two: Vec<Tab> = tabs(&["All", "Work"]);
        state.set_active_tab(1);
        assert_eq!(state.previous_active_tab(), Some(3));
        wide_viewport_layout(&mut state, &two, 80);
        state.apply_pending_activation();

        let geoms = measure_tabs(&two);
        assert_eq!(state.indicator_position(), Some(geoms[1]));
        // Snapped, not sliding
        assert!(!state.indicator.needs_update());
    }

    #[test]
    fn test_initial_render_places_indicator_without_animation() {
        let mut state = strip(ScrollAxis::Horizontal);
        let list = tabs(&["All", "Work"]);
        wide_viewport_layout(&mut state, &list, 80);
        state.apply_pending_activation();

        let geoms = measure_tabs(&list);
        assert_eq!(state.indicator_position(), Some(geoms[0]));
        assert!(!state.needs_update());
    }

    #[test]
    fn test_hit_test_maps_cells_to_indices() {
        let mut state = strip(ScrollAxis::Horizontal);
        let list = tabs(&["All", "Work"]);
        wide_viewport_layout(&mut state, &list, 80);

        let geoms = measure_tabs(&list);
        assert_eq!(state.hit_test(0, 0), Some(0));
        assert_eq!(state.hit_test(geoms[1].offset, 0), Some(1));
        // Past the last tab
        assert_eq!(state.hit_test(geoms[1].offset + geoms[1].extent, 0), None);
        // Outside the strip rows
        assert_eq!(state.hit_test(0, 5), None);
    }

    #[test]
    fn test_pointer_events() {
        let mut state = strip(ScrollAxis::Horizontal);
        let mut list = tabs(&["All", "Work"]);
        list[1].context_actions = vec![ContextEntry::Action(
            ContextAction::new("Remove").on_choose(|| {}),
        )];
        wide_viewport_layout(&mut state, &list, 80);
        let geoms = measure_tabs(&list);

        let click = PointerIntent {
            kind: PointerKind::PrimaryClick,
            column: 1,
            row: 0,
        };
        assert_eq!(
            state.handle_pointer(click, &list),
            Some(TabStripEvent::Activate(0))
        );

        let context = PointerIntent {
            kind: PointerKind::SecondaryClick,
            column: geoms[1].offset + 1,
            row: 0,
        };
        assert_eq!(
            state.handle_pointer(context, &list),
            Some(TabStripEvent::OpenMenu {
                tab: 1,
                anchor: (geoms[1].offset + 1, 0)
            })
        );

        // Tab 0 has no actions: a secondary click asks for nothing
        let no_menu = PointerIntent {
            kind: PointerKind::SecondaryClick,
            column: 1,
            row: 0,
        };
        assert_eq!(state.handle_pointer(no_menu, &list), None);
    }

    #[test]
    fn test_vertical_measurement_and_hit_test() {
        let mut state = strip(ScrollAxis::Vertical);
        let list = tabs(&["All", "Work", "News"]);
        let geoms = measure_tabs_vertical(&list);
        assert_eq!(geoms[2], ElementGeometry { offset: 2, extent: 1 });

        state.commit_layout(
            geoms,
            ViewportGeometry {
                total_extent: 3,
                visible_extent: 2,
            },
            Rect::new(0, 0, 20, 2),
        );
        assert_eq!(state.hit_test(4, 1), Some(1));
    }

    #[test]
    fn test_menu_open_flag_roundtrip() {
        let mut state = strip(ScrollAxis::Horizontal);
        assert_eq!(state.menu_tab(), None);
        state.set_menu_open(2);
        assert_eq!(state.menu_tab(), Some(2));
        state.on_menu_closed();
        assert_eq!(state.menu_tab(), None);
    }

    #[test]
    fn test_supersession_second_activation_wins() {
        let mut state = strip(ScrollAxis::Horizontal);
        let list: Vec<Tab> = (0..30).map(|i| Tab::new(format!("Folder {}", i))).collect();

        state.set_active_tab(25);
        wide_viewport_layout(&mut state, &list, 40);
        state.apply_pending_activation();
        std::thread::sleep(Duration::from_millis(10));
        state.update();

        // Second activation lands before the first animation finishes
        state.set_active_tab(2);
        wide_viewport_layout(&mut state, &list, 40);
        state.apply_pending_activation();
        let second_target = state.animator.target_scroll();

        std::thread::sleep(Duration::from_millis(50));
        state.update();
        assert_eq!(state.scroll_offset(), second_target);
        assert!(!state.needs_update());
    }
}
