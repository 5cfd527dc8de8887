use std::sync::Arc;

use ratatui::layout::Rect;
use tabline_core::{AppConfig, ContextEntry, PlatformFamily, Tab};

use crate::theme::Theme;
use crate::widgets::{MenuState, TabStripState};

/// Commands emitted by context menu handlers.
///
/// Handlers take no arguments, so each one captures a folder id and a
/// channel sender at construction time; the run loop drains the channel
/// and applies the commands here. Ids are resolved back to indices at
/// apply time, which keeps the commands valid across removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Clear a folder's unread badge
    MarkFolderRead(u64),
    /// Remove a folder from the strip
    RemoveFolder(u64),
}

/// Demo application state: a chat-folder browser around one tab strip.
///
/// The app owns the tab list and the active index invariant; the strip
/// only reads tabs per render and reacts to activation changes.
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub tabs: Vec<Tab>,
    pub strip: TabStripState,
    pub menu: MenuState,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Arc<AppConfig>, tabs: Vec<Tab>, vertical: bool) -> Self {
        let theme = Theme::by_name(&config.ui.theme.name);
        let platform = PlatformFamily::detect();
        let strip = if vertical {
            TabStripState::vertical(config.ui.scroll.clone(), platform)
        } else {
            TabStripState::horizontal(config.ui.scroll.clone(), platform)
        };
        Self {
            config,
            theme,
            tabs,
            strip,
            menu: MenuState::new(),
            status_message: None,
            should_quit: false,
        }
    }

    /// Activate a tab. This is the single place the active index changes,
    /// and it refuses out-of-range requests (stale events from a shrunk
    /// list).
    pub fn switch_tab(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.strip.set_active_tab(index);
        }
    }

    pub fn next_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.switch_tab((self.strip.active_tab() + 1) % self.tabs.len());
        }
    }

    pub fn prev_tab(&mut self) {
        if !self.tabs.is_empty() {
            let len = self.tabs.len();
            self.switch_tab((self.strip.active_tab() + len - 1) % len);
        }
    }

    /// Open the context menu for a tab, anchored at a screen cell
    pub fn open_menu(&mut self, tab: usize, anchor: (u16, u16)) {
        let Some(actions) = self.tabs.get(tab).map(|t| &t.context_actions) else {
            return;
        };
        if self.menu.open(tab, anchor, actions) {
            self.strip.set_menu_open(tab);
        }
    }

    /// Open the active tab's menu from the keyboard, anchored at the
    /// tab's own bounds
    pub fn open_menu_for_active(&mut self) {
        let active = self.strip.active_tab();
        if let Some(anchor) = self.strip.tab_anchor(active) {
            self.open_menu(active, anchor);
        }
    }

    pub fn close_menu(&mut self) {
        self.menu.close();
        self.strip.on_menu_closed();
    }

    /// Context actions of the tab owning the open menu
    pub fn menu_entries(&self) -> &[ContextEntry] {
        self.tabs
            .get(self.menu.owner_tab())
            .map(|t| t.context_actions.as_slice())
            .unwrap_or(&[])
    }

    pub fn menu_next(&mut self) {
        let owner = self.menu.owner_tab();
        if let Some(tab) = self.tabs.get(owner) {
            self.menu.select_next(&tab.context_actions);
        }
    }

    pub fn menu_prev(&mut self) {
        let owner = self.menu.owner_tab();
        if let Some(tab) = self.tabs.get(owner) {
            self.menu.select_prev(&tab.context_actions);
        }
    }

    /// Route a click while the menu is open: an enabled entry is chosen,
    /// a click elsewhere dismisses the menu, a disabled row or separator
    /// does nothing.
    pub fn click_menu(&mut self, column: u16, row: u16, frame_area: Rect) {
        let owner = self.menu.owner_tab();
        let mut close = true;
        if let Some(tab) = self.tabs.get(owner) {
            if let Some(area) = self.menu.placement(&tab.context_actions, frame_area) {
                let inside = column >= area.x
                    && column < area.x + area.width
                    && row >= area.y
                    && row < area.y + area.height;
                if inside {
                    close = false;
                    let entry_row = (row - area.y).checked_sub(1).map(|r| r as usize);
                    if let Some(idx) = entry_row.filter(|&r| r < tab.context_actions.len()) {
                        if let ContextEntry::Action(action) = &tab.context_actions[idx] {
                            if let Some(handler) = &action.handler {
                                handler();
                                close = true;
                            }
                        }
                    }
                }
            }
        }
        if close {
            self.close_menu();
        }
    }

    /// Invoke the highlighted menu entry's handler and close the menu
    pub fn confirm_menu(&mut self) {
        let owner = self.menu.owner_tab();
        if let Some(tab) = self.tabs.get(owner) {
            if let Some(idx) = self.menu.choose(&tab.context_actions) {
                if let ContextEntry::Action(action) = &tab.context_actions[idx] {
                    if let Some(handler) = &action.handler {
                        handler();
                    }
                }
            }
        }
        self.close_menu();
    }

    /// Apply a command emitted by a context action handler
    pub fn apply_command(&mut self, command: AppCommand) {
        match command {
            AppCommand::MarkFolderRead(id) => {
                if let Some(tab) = self.tabs.iter_mut().find(|t| t.id == Some(id)) {
                    tab.badge_count = 0;
                    tab.is_badge_active = false;
                    let title = tab.title.clone();
                    self.set_status(format!("Marked \"{}\" as read", title));
                }
            }
            AppCommand::RemoveFolder(id) => {
                let Some(index) = self.tabs.iter().position(|t| t.id == Some(id)) else {
                    return;
                };
                let removed = self.tabs.remove(index);
                // Keep the active index valid against the shorter list
                let active = self.strip.active_tab();
                if !self.tabs.is_empty() && active >= self.tabs.len() {
                    self.strip.set_active_tab(self.tabs.len() - 1);
                } else if active > index {
                    self.strip.set_active_tab(active - 1);
                }
                self.set_status(format!("Removed \"{}\"", removed.title));
            }
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with(titles: &[&str]) -> App {
        let tabs = titles
            .iter()
            .enumerate()
            .map(|(i, t)| Tab::new(*t).with_id(i as u64))
            .collect();
        App::new(Arc::new(AppConfig::default()), tabs, false)
    }

    #[test]
    fn test_switch_tab_rejects_out_of_range() {
        let mut app = app_with(&["All", "Work"]);
        app.switch_tab(5);
        assert_eq!(app.strip.active_tab(), 0);
        app.switch_tab(1);
        assert_eq!(app.strip.active_tab(), 1);
    }

    #[test]
    fn test_tab_navigation_wraps() {
        let mut app = app_with(&["All", "Work", "News"]);
        app.prev_tab();
        assert_eq!(app.strip.active_tab(), 2);
        app.next_tab();
        assert_eq!(app.strip.active_tab(), 0);
    }

    #[test]
    fn test_remove_folder_keeps_active_valid() {
        let mut app = app_with(&["All", "Work", "News"]);
        app.switch_tab(2);
        app.apply_command(AppCommand::RemoveFolder(2));
        assert_eq!(app.tabs.len(), 2);
        assert_eq!(app.strip.active_tab(), 1);
        // Removing before the active tab shifts it down
        app.switch_tab(1);
        app.apply_command(AppCommand::RemoveFolder(0));
        assert_eq!(app.strip.active_tab(), 0);
        assert_eq!(app.tabs[0].title, "Work");
    }

    #[test]
    fn test_mark_folder_read_clears_badge() {
        let mut app = app_with(&["All"]);
        app.tabs[0].badge_count = 9;
        app.apply_command(AppCommand::MarkFolderRead(0));
        assert_eq!(app.tabs[0].badge_count, 0);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_menu_open_close_syncs_strip_flag() {
        let mut app = app_with(&["All", "Work"]);
        app.tabs[1].context_actions = vec![tabline_core::ContextEntry::Action(
            tabline_core::ContextAction::new("Remove").on_choose(|| {}),
        )];

        // A tab without actions opens nothing
        app.open_menu(0, (0, 0));
        assert!(!app.menu.is_open());
        assert_eq!(app.strip.menu_tab(), None);

        app.open_menu(1, (3, 0));
        assert!(app.menu.is_open());
        assert_eq!(app.strip.menu_tab(), Some(1));

        app.close_menu();
        assert!(!app.menu.is_open());
        assert_eq!(app.strip.menu_tab(), None);
    }
}
