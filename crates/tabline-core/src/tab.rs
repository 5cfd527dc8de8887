use std::fmt;

/// Callback invoked when a context menu action is chosen.
///
/// Handlers take no arguments and return nothing; whatever they need is
/// captured at construction time.
pub type ActionHandler = Box<dyn Fn() + Send + Sync>;

/// One selectable entry in a tab strip.
///
/// Tabs are identified positionally: the strip renders them in the exact
/// order they are given, and the scroll/centering machinery locates the
/// active tab by index. `id` is reconciliation metadata for callers that
/// rebuild their tab list, never consulted by the strip itself.
pub struct Tab {
    /// Optional stable identity, opaque to the strip
    pub id: Option<u64>,
    /// Display label
    pub title: String,
    /// Unread badge; 0 means no badge is shown
    pub badge_count: u32,
    /// Highlight the badge
    pub is_badge_active: bool,
    /// Show the blocked indicator
    pub is_blocked: bool,
    /// Context menu entries, in menu order; empty means no menu
    pub context_actions: Vec<ContextEntry>,
}

impl Tab {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            badge_count: 0,
            is_badge_active: false,
            is_blocked: false,
            context_actions: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_badge(mut self, count: u32) -> Self {
        self.badge_count = count;
        self
    }

    pub fn with_active_badge(mut self, count: u32) -> Self {
        self.badge_count = count;
        self.is_badge_active = true;
        self
    }

    pub fn blocked(mut self) -> Self {
        self.is_blocked = true;
        self
    }

    pub fn with_context_actions(mut self, actions: Vec<ContextEntry>) -> Self {
        self.context_actions = actions;
        self
    }

    /// Whether a secondary interaction on this tab opens a menu
    pub fn has_context_actions(&self) -> bool {
        !self.context_actions.is_empty()
    }
}

impl fmt::Debug for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tab")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("badge_count", &self.badge_count)
            .field("is_badge_active", &self.is_badge_active)
            .field("is_blocked", &self.is_blocked)
            .field("context_actions", &self.context_actions.len())
            .finish()
    }
}

/// One row of a tab's context menu
pub enum ContextEntry {
    /// Horizontal divider between groups of actions
    Separator,
    Action(ContextAction),
}

impl ContextEntry {
    /// Whether this entry can be highlighted and chosen
    pub fn is_selectable(&self) -> bool {
        match self {
            ContextEntry::Separator => false,
            ContextEntry::Action(action) => action.handler.is_some(),
        }
    }
}

impl fmt::Debug for ContextEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextEntry::Separator => write!(f, "Separator"),
            ContextEntry::Action(action) => f
                .debug_struct("Action")
                .field("label", &action.label)
                .field("destructive", &action.destructive)
                .field("enabled", &action.handler.is_some())
                .finish(),
        }
    }
}

/// A choosable context menu action.
///
/// An action without a handler is rendered disabled.
pub struct ContextAction {
    pub label: String,
    /// Short glyph shown before the label
    pub icon: Option<String>,
    /// Style the action as dangerous (delete, leave, ...)
    pub destructive: bool,
    pub handler: Option<ActionHandler>,
}

impl ContextAction {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
            destructive: false,
            handler: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }

    pub fn on_choose(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_builder() {
        let tab = Tab::new("Work").with_id(7).with_badge(3).blocked();
        assert_eq!(tab.id, Some(7));
        assert_eq!(tab.badge_count, 3);
        assert!(tab.is_blocked);
        assert!(!tab.has_context_actions());
    }

    #[test]
    fn test_entry_selectability() {
        assert!(!ContextEntry::Separator.is_selectable());
        assert!(!ContextEntry::Action(ContextAction::new("Edit")).is_selectable());

        let enabled = ContextEntry::Action(ContextAction::new("Remove").on_choose(|| {}));
        assert!(enabled.is_selectable());
    }

    #[test]
    fn test_handler_fires() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let fired = Arc::new(AtomicBool::new(false));
        let flag = fired.clone();
        let action = ContextAction::new("Mark all read").on_choose(move || {
            flag.store(true, Ordering::SeqCst);
        });

        action.handler.as_ref().unwrap()();
        assert!(fired.load(Ordering::SeqCst));
    }
}
