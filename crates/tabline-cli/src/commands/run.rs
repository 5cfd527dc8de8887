use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use tabline_core::{AppConfig, ContextAction, ContextEntry, Tab};
use tabline_tui::{
    app::{App, AppCommand},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action, PointerIntent, PointerTracker},
    scroll::ScrollConfigExt,
    widgets::{
        ContextMenuWidget, StatusBarWidget, TabStripEvent, TabStripWidget,
        VerticalTabStripWidget,
    },
};

pub async fn run(config: Arc<AppConfig>, vertical: bool) -> Result<()> {
    // Context action handlers deliver commands over this channel; the
    // loop drains it between frames
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<AppCommand>();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle("Tabline")
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tabs = sample_folders(&cmd_tx);
    tracing::debug!(folders = tabs.len(), vertical, "starting demo");
    let mut app = App::new(config.clone(), tabs, vertical);

    let event_handler = EventHandler::with_animation_tick(
        config.ui.tick_rate_ms,
        config.ui.scroll.animation_tick_duration(),
    );
    let mut pointer = PointerTracker::new();

    let res = run_loop(
        &mut terminal,
        &mut app,
        &event_handler,
        &mut pointer,
        cmd_rx,
        vertical,
    )
    .await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
    pointer: &mut PointerTracker,
    mut cmd_rx: mpsc::UnboundedReceiver<AppCommand>,
    vertical: bool,
) -> Result<()> {
    loop {
        // Apply any commands emitted by context action handlers
        while let Ok(cmd) = cmd_rx.try_recv() {
            app.apply_command(cmd);
        }

        // Advance scroll and indicator animations one frame
        app.strip.update();

        terminal.draw(|frame| draw(frame, app, vertical))?;

        // Poll fast while animating, slow while idle
        if let Some(event) = event_handler.next(app.strip.needs_update())? {
            match event {
                AppEvent::Key(key) => match handle_key_event(key, app.menu.is_open()) {
                    Action::Quit => app.should_quit = true,
                    Action::NextTab => {
                        app.clear_status();
                        app.next_tab();
                    }
                    Action::PrevTab => {
                        app.clear_status();
                        app.prev_tab();
                    }
                    Action::SelectTab(index) => {
                        app.clear_status();
                        app.switch_tab(index);
                    }
                    Action::OpenMenu => app.open_menu_for_active(),
                    Action::MenuDown => app.menu_next(),
                    Action::MenuUp => app.menu_prev(),
                    Action::MenuConfirm => app.confirm_menu(),
                    Action::MenuCancel => app.close_menu(),
                    Action::None => {}
                },
                AppEvent::Mouse(mouse) => {
                    if let Some(intent) = pointer.resolve(mouse) {
                        let size = terminal.size()?;
                        let frame_area = Rect::new(0, 0, size.width, size.height);
                        handle_pointer_intent(app, intent, frame_area);
                    }
                }
                // The next draw call picks up the new size
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_pointer_intent(app: &mut App, intent: PointerIntent, frame_area: Rect) {
    // An open menu captures the pointer: choose or dismiss
    if app.menu.is_open() {
        app.click_menu(intent.column, intent.row, frame_area);
        return;
    }

    match app.strip.handle_pointer(intent, &app.tabs) {
        Some(TabStripEvent::Activate(index)) => {
            app.clear_status();
            app.switch_tab(index);
        }
        Some(TabStripEvent::OpenMenu { tab, anchor }) => app.open_menu(tab, anchor),
        None => {}
    }
}

fn draw(frame: &mut Frame, app: &mut App, vertical: bool) {
    let size = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(size);

    if vertical {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(0)])
            .split(chunks[0]);
        VerticalTabStripWidget::render(frame, cols[0], &app.tabs, &mut app.strip, &app.theme);
        render_conversations(frame, cols[1], app);
    } else {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TabStripWidget::HEIGHT),
                Constraint::Min(0),
            ])
            .split(chunks[0]);
        TabStripWidget::render(frame, rows[0], &app.tabs, &mut app.strip, &app.theme);
        render_conversations(frame, rows[1], app);
    }

    StatusBarWidget::render(frame, chunks[1], app);

    // Menus may cover everything except the status bar; renders last so
    // it overlays the rest of the frame
    app.menu.set_root(Some(chunks[0]));
    ContextMenuWidget::render(frame, &app.menu, app.menu_entries(), &app.theme);
}

/// Placeholder conversation list for the active folder
fn render_conversations(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.grey0))
        .style(Style::default().bg(theme.bg0));

    let Some(tab) = app.tabs.get(app.strip.active_tab()) else {
        frame.render_widget(block, area);
        return;
    };

    let block = block.title(format!(" {} ", tab.title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let count = (inner.height as usize).min(12);
    let lines: Vec<Line> = (0..count)
        .map(|i| {
            let unread = (i as u32) < tab.badge_count;
            let style = if unread {
                Style::default().fg(theme.yellow)
            } else {
                Style::default().fg(theme.grey1)
            };
            let marker = if unread { "●" } else { " " };
            Line::from(vec![
                Span::styled(format!(" {} ", marker), style),
                Span::styled(format!("{} conversation {}", tab.title, i + 1), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Demo folder set, sized so the strip overflows a typical terminal.
///
/// Every folder gets the same menu shape: a disabled edit entry, a
/// mark-read action, a separator, and a destructive remove action.
fn sample_folders(tx: &mpsc::UnboundedSender<AppCommand>) -> Vec<Tab> {
    let folders: [(&str, u32, bool, bool); 12] = [
        ("All chats", 0, false, false),
        ("Personal", 2, false, false),
        ("Work", 5, true, false),
        ("News", 12, false, false),
        ("Muted", 0, false, true),
        ("Family", 1, false, false),
        ("Dev", 7, true, false),
        ("Games", 0, false, false),
        ("Crypto", 24, false, false),
        ("Random", 0, false, false),
        ("Archive", 0, false, true),
        ("Spam", 99, false, false),
    ];

    folders
        .iter()
        .enumerate()
        .map(|(i, &(title, badge, badge_active, blocked))| {
            let id = i as u64;
            let mut tab = Tab::new(title).with_id(id);
            if badge_active {
                tab = tab.with_active_badge(badge);
            } else if badge > 0 {
                tab = tab.with_badge(badge);
            }
            if blocked {
                tab = tab.blocked();
            }

            let mark_tx = tx.clone();
            let remove_tx = tx.clone();
            tab.with_context_actions(vec![
                ContextEntry::Action(ContextAction::new("Edit folder").with_icon("✎")),
                ContextEntry::Action(ContextAction::new("Mark as read").with_icon("✓").on_choose(
                    move || {
                        let _ = mark_tx.send(AppCommand::MarkFolderRead(id));
                    },
                )),
                ContextEntry::Separator,
                ContextEntry::Action(
                    ContextAction::new("Remove folder")
                        .with_icon("✗")
                        .destructive()
                        .on_choose(move || {
                            let _ = remove_tx.send(AppCommand::RemoveFolder(id));
                        }),
                ),
            ])
        })
        .collect()
}
