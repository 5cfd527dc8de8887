use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use tabline_core::Tab;

use crate::scroll::ViewportGeometry;
use crate::theme::Theme;
use crate::widgets::tab_strip::{measure_tabs_vertical, TabStripState};

/// Vertically scrolling tab strip: one row per tab with a sliding marker
/// in the leading column. Shares `TabStripState` with the horizontal
/// strip; only the axis geometry differs.
pub struct VerticalTabStripWidget;

impl VerticalTabStripWidget {
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

        let geometries = measure_tabs_vertical(tabs);
        state.commit_layout(
            geometries,
            ViewportGeometry {
                total_extent: tabs.len() as u16,
                visible_extent: area.height,
            },
            area,
        );
        state.apply_pending_activation();

        let scroll = state.scroll_offset();
        let marker_row = state.indicator_position().map(|g| g.offset);

        let lines: Vec<Line> = tabs
            .iter()
            .enumerate()
            .map(|(i, tab)| {
                tab_line(
                    tab,
                    i as u16,
                    i == state.active_tab(),
                    state.menu_tab() == Some(i),
                    marker_row,
                    theme,
                )
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines)
                .style(Style::default().bg(theme.bg1))
                .scroll((scroll, 0)),
            area,
        );
    }
}

fn tab_line<'a>(
    tab: &'a Tab,
    row: u16,
    is_active: bool,
    menu_open: bool,
    marker_row: Option<u16>,
    theme: &Theme,
) -> Line<'a> {
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

    let marker = if marker_row == Some(row) { "┃" } else { " " };
    let mut spans = vec![
        Span::styled(marker, Style::default().fg(theme.accent)),
        Span::styled(" ", cell_style),
        Span::styled(tab.title.as_str(), cell_style),
    ];
    if tab.badge_count > 0 {
        let badge_color = if tab.is_badge_active {
            theme.accent
        } else {
            theme.yellow
        };
        spans.push(Span::styled(
            format!(" ({})", tab.badge_count),
            cell_style.fg(badge_color),
        ));
    }
    if tab.is_blocked {
        spans.push(Span::styled(" ⊘", cell_style.fg(theme.grey0)));
    }
    Line::from(spans)
}
