use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use tabline_core::ContextEntry;

use crate::theme::Theme;

/// Context menu state: owns open/close and row selection.
///
/// The strip relays open requests here and is told when the menu closes;
/// entry contents stay with the tab descriptors, so this holds indices
/// only. Closing the menu is independent of tab activation.
#[derive(Debug, Default)]
pub struct MenuState {
    open: bool,
    owner_tab: usize,
    anchor: (u16, u16),
    selected: usize,
    root: Option<Rect>,
}

impl MenuState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict where the menu may render. None means the whole frame.
    pub fn set_root(&mut self, root: Option<Rect>) {
        self.root = root;
    }

    /// Open the menu for a tab, anchored at a screen cell.
    ///
    /// Returns false (and stays closed) when there is nothing to show.
    pub fn open(&mut self, tab: usize, anchor: (u16, u16), entries: &[ContextEntry]) -> bool {
        if entries.is_empty() {
            return false;
        }
        self.open = true;
        self.owner_tab = tab;
        self.anchor = anchor;
        self.selected = first_selectable(entries).unwrap_or(0);
        true
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Tab this menu belongs to
    pub fn owner_tab(&self) -> usize {
        self.owner_tab
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Move the highlight down, skipping separators and disabled rows
    pub fn select_next(&mut self, entries: &[ContextEntry]) {
        self.step(entries, 1);
    }

    /// Move the highlight up, skipping separators and disabled rows
    pub fn select_prev(&mut self, entries: &[ContextEntry]) {
        self.step(entries, -1);
    }

    fn step(&mut self, entries: &[ContextEntry], dir: i32) {
        if entries.iter().all(|e| !e.is_selectable()) {
            return;
        }
        let len = entries.len() as i32;
        let mut idx = self.selected as i32;
        loop {
            idx = (idx + dir).rem_euclid(len);
            if entries[idx as usize].is_selectable() {
                self.selected = idx as usize;
                return;
            }
        }
    }

    /// The highlighted entry index, if it is choosable
    pub fn choose(&self, entries: &[ContextEntry]) -> Option<usize> {
        entries
            .get(self.selected)
            .filter(|e| e.is_selectable())
            .map(|_| self.selected)
    }

    /// Where the menu will be drawn: anchored at the opening cell and
    /// clamped into the root area. None when it cannot fit at all, in
    /// which case the menu is simply not drawn.
    pub fn placement(&self, entries: &[ContextEntry], frame_area: Rect) -> Option<Rect> {
        let root = self.root.unwrap_or(frame_area);
        let width = menu_width(entries);
        let height = entries.len() as u16 + 2;
        if width > root.width || height > root.height {
            return None;
        }

        let (ax, ay) = self.anchor;
        let x = ax
            .max(root.x)
            .min(root.x + root.width - width);
        let y = (ay + 1)
            .max(root.y)
            .min(root.y + root.height - height);
        Some(Rect::new(x, y, width, height))
    }
}

fn first_selectable(entries: &[ContextEntry]) -> Option<usize> {
    entries.iter().position(|e| e.is_selectable())
}

fn entry_width(entry: &ContextEntry) -> u16 {
    match entry {
        ContextEntry::Separator => 0,
        ContextEntry::Action(action) => {
            let icon = action
                .icon
                .as_deref()
                .map(|i| i.width() + 1)
                .unwrap_or(0);
            (icon + action.label.as_str().width()) as u16
        }
    }
}

fn menu_width(entries: &[ContextEntry]) -> u16 {
    let content = entries.iter().map(entry_width).max().unwrap_or(0);
    // one cell of padding each side, plus the borders
    content + 4
}

/// Anchored popup rendering the entries of one tab's context menu,
/// separators preserved in order.
pub struct ContextMenuWidget;

impl ContextMenuWidget {
    pub fn render(frame: &mut Frame, state: &MenuState, entries: &[ContextEntry], theme: &Theme) {
        if !state.is_open() {
            return;
        }
        let Some(area) = state.placement(entries, frame.area()) else {
            return;
        };

        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.grey0))
            .style(Style::default().bg(theme.bg2));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| entry_line(entry, i == state.selected, inner.width, theme))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn entry_line<'a>(
    entry: &'a ContextEntry,
    selected: bool,
    width: u16,
    theme: &Theme,
) -> Line<'a> {
    match entry {
        ContextEntry::Separator => Line::from(Span::styled(
            "─".repeat(width as usize),
            Style::default().fg(theme.grey0),
        )),
        ContextEntry::Action(action) => {
            let enabled = action.handler.is_some();
            let fg = if !enabled {
                theme.grey0
            } else if action.destructive {
                theme.error
            } else {
                theme.fg1
            };
            let mut style = Style::default().fg(fg);
            if selected && enabled {
                style = style.bg(theme.selection).add_modifier(Modifier::BOLD);
            }

            let mut text = String::from(" ");
            if let Some(icon) = action.icon.as_deref() {
                text.push_str(icon);
                text.push(' ');
            }
            text.push_str(&action.label);
            // pad to the row width so the selection bar spans the menu
            let pad = (width as usize).saturating_sub(text.as_str().width());
            text.push_str(&" ".repeat(pad));
            Line::from(Span::styled(text, style))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabline_core::ContextAction;

    fn entries() -> Vec<ContextEntry> {
        vec![
            ContextEntry::Action(ContextAction::new("Edit folder")),
            ContextEntry::Action(ContextAction::new("Mark all read").on_choose(|| {})),
            ContextEntry::Separator,
            ContextEntry::Action(ContextAction::new("Remove").destructive().on_choose(|| {})),
        ]
    }

    #[test]
    fn test_open_requires_entries() {
        let mut menu = MenuState::new();
        assert!(!menu.open(0, (0, 0), &[]));
        assert!(!menu.is_open());

        assert!(menu.open(1, (4, 0), &entries()));
        assert!(menu.is_open());
        assert_eq!(menu.owner_tab(), 1);
    }

    #[test]
    fn test_initial_selection_skips_disabled() {
        let mut menu = MenuState::new();
        menu.open(0, (0, 0), &entries());
        // entry 0 has no handler
        assert_eq!(menu.choose(&entries()), Some(1));
    }

    #[test]
    fn test_navigation_skips_separators_and_disabled() {
        let items = entries();
        let mut menu = MenuState::new();
        menu.open(0, (0, 0), &items);

        menu.select_next(&items);
        assert_eq!(menu.choose(&items), Some(3));
        // wraps around, skipping the disabled first entry
        menu.select_next(&items);
        assert_eq!(menu.choose(&items), Some(1));
        menu.select_prev(&items);
        assert_eq!(menu.choose(&items), Some(3));
    }

    #[test]
    fn test_all_disabled_menu_chooses_nothing() {
        let items = vec![
            ContextEntry::Action(ContextAction::new("Edit folder")),
            ContextEntry::Separator,
        ];
        let mut menu = MenuState::new();
        assert!(menu.open(0, (0, 0), &items));
        assert_eq!(menu.choose(&items), None);
        menu.select_next(&items);
        assert_eq!(menu.choose(&items), None);
    }

    #[test]
    fn test_placement_clamps_into_root() {
        let items = entries();
        let mut menu = MenuState::new();
        let frame = Rect::new(0, 0, 80, 24);

        // anchor near the bottom-right corner
        menu.open(0, (78, 22), &items);
        let area = menu.placement(&items, frame).unwrap();
        assert!(area.x + area.width <= 80);
        assert!(area.y + area.height <= 24);

        // restricted root
        menu.set_root(Some(Rect::new(10, 2, 40, 12)));
        let area = menu.placement(&items, frame).unwrap();
        assert!(area.x >= 10);
        assert!(area.y >= 2);
        assert!(area.x + area.width <= 50);
        assert!(area.y + area.height <= 14);
    }

    #[test]
    fn test_placement_fails_when_root_too_small() {
        let items = entries();
        let mut menu = MenuState::new();
        menu.open(0, (0, 0), &items);
        menu.set_root(Some(Rect::new(0, 0, 5, 2)));
        assert_eq!(menu.placement(&items, Rect::new(0, 0, 80, 24)), None);
    }
}
