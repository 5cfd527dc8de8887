use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let title = app
                .tabs
                .get(app.strip.active_tab())
                .map(|t| t.title.as_str())
                .unwrap_or("-");
            format!(
                " {} | {}/{} folders",
                title,
                app.strip.active_tab() + 1,
                app.tabs.len()
            )
        };

        let help_hint = if app.menu.is_open() {
            " j/k:move enter:choose esc:close "
        } else {
            " q:quit h/l:switch 1-9:jump m:menu right-click:menu "
        };
        let padding_len = area
            .width
            .saturating_sub(status_text.as_str().width() as u16 + help_hint.width() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default().fg(theme.fg0).bg(theme.bg2),
            ),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(
                help_hint,
                Style::default().fg(theme.grey1).bg(theme.bg2),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
