use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextTab,
    PrevTab,
    SelectTab(usize),
    OpenMenu, // open the active tab's context menu from the keyboard
    MenuUp,
    MenuDown,
    MenuConfirm,
    MenuCancel,
    None,
}

/// Handle a key event and return the corresponding action.
///
/// While a context menu is open it captures navigation keys; everything
/// else falls through to the strip bindings.
pub fn handle_key_event(key: KeyEvent, menu_open: bool) -> Action {
    if menu_open {
        return handle_menu_mode(key);
    }

    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Tab navigation
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::NextTab,
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::PrevTab,
        (KeyCode::Right, KeyModifiers::NONE) => Action::NextTab,
        (KeyCode::Left, KeyModifiers::NONE) => Action::PrevTab,
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::NextTab,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::PrevTab,
        (KeyCode::Tab, KeyModifiers::NONE) => Action::NextTab,
        (KeyCode::BackTab, KeyModifiers::SHIFT) => Action::PrevTab,

        // Direct tab selection
        (KeyCode::Char(c), KeyModifiers::NONE) if c.is_ascii_digit() && c != '0' => {
            Action::SelectTab(c as usize - '1' as usize)
        }

        // Context menu for the active tab
        (KeyCode::Char('m'), KeyModifiers::NONE) => Action::OpenMenu,

        _ => Action::None,
    }
}

/// Handle key events while a context menu is open
fn handle_menu_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::MenuDown,
        KeyCode::Char('k') | KeyCode::Up => Action::MenuUp,
        KeyCode::Enter => Action::MenuConfirm,
        KeyCode::Esc | KeyCode::Char('q') => Action::MenuCancel,
        _ => Action::None,
    }
}

/// How a pointer interaction resolved at the event boundary.
///
/// Downstream code switches on this closed set instead of probing raw
/// mouse events for buttons and durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Short primary-button press
    PrimaryClick,
    /// Secondary-button press (the context menu trigger)
    SecondaryClick,
    /// Primary button held down past the long-press delay
    LongPress,
}

/// A resolved pointer interaction at a terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerIntent {
    pub kind: PointerKind,
    pub column: u16,
    pub row: u16,
}

/// Primary-button hold time after which a release counts as a long press
const LONG_PRESS_DELAY: Duration = Duration::from_millis(500);

/// Movement allowance between press and release; more than this is a drag
const DRAG_TOLERANCE: u16 = 1;

/// Tracks the in-flight primary press so button events can be folded into
/// `PointerIntent`s.
#[derive(Debug, Default)]
pub struct PointerTracker {
    pressed: Option<PressState>,
    long_press_delay: Option<Duration>,
}

#[derive(Debug, Clone, Copy)]
struct PressState {
    at: Instant,
    column: u16,
    row: u16,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn with_long_press_delay(delay: Duration) -> Self {
        Self {
            pressed: None,
            long_press_delay: Some(delay),
        }
    }

    fn delay(&self) -> Duration {
        self.long_press_delay.unwrap_or(LONG_PRESS_DELAY)
    }

    /// Fold a raw mouse event into a pointer intent, if it completes one.
    ///
    /// A secondary press resolves immediately (matching how context menus
    /// open on press). A primary press resolves on release: held past the
    /// long-press delay it becomes `LongPress`, otherwise `PrimaryClick`.
    /// A release that moved away from its press cell is a drag and
    /// resolves to nothing.
    pub fn resolve(&mut self, mouse: MouseEvent) -> Option<PointerIntent> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Right) => {
                self.pressed = None;
                Some(PointerIntent {
                    kind: PointerKind::SecondaryClick,
                    column: mouse.column,
                    row: mouse.row,
                })
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.pressed = Some(PressState {
                    at: Instant::now(),
                    column: mouse.column,
                    row: mouse.row,
                });
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let press = self.pressed.take()?;
                let moved = press.column.abs_diff(mouse.column) > DRAG_TOLERANCE
                    || press.row.abs_diff(mouse.row) > DRAG_TOLERANCE;
                if moved {
                    return None;
                }
                let kind = if press.at.elapsed() >= self.delay() {
                    PointerKind::LongPress
                } else {
                    PointerKind::PrimaryClick
                };
                Some(PointerIntent {
                    kind,
                    column: press.column,
                    row: press.row,
                })
            }
            _ => None,
        }
    }
}
