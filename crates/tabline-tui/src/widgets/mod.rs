pub mod context_menu;
pub mod status_bar;
pub mod tab_strip;
pub mod vertical_tab_strip;

pub use context_menu::{ContextMenuWidget, MenuState};
pub use status_bar::StatusBarWidget;
pub use tab_strip::{measure_tabs, measure_tabs_vertical, TabStripEvent, TabStripState, TabStripWidget};
pub use vertical_tab_strip::VerticalTabStripWidget;
