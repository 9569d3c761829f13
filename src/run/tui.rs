use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::store::BudgetStore;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::render::DASHBOARD_CHROME_ROWS;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};
use crate::ui::{commands, forms};

pub(crate) fn as_tui(store: &mut BudgetStore) -> Result<()> {
    let mut app = App::new(store);
    let listener = app.watch(store);
    tracing::info!(
        categories = store.len(),
        listeners = store.listener_count(),
        "starting TUI"
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    store.unsubscribe(listener);
    if let Err(ref e) = result {
        tracing::error!(error = ?e, "TUI exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut BudgetStore,
) -> Result<()> {
    while app.running {
        app.sync(store);
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(DASHBOARD_CHROME_ROWS) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app, store);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(key, app, store)?;
            }
        }
    }
    Ok(())
}

pub(crate) fn handle_key(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut BudgetStore,
) -> Result<()> {
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app, store)?,
        InputMode::Command => handle_command_input(key, app, store)?,
        InputMode::Editing => handle_editing_input(key, app, store)?,
        InputMode::Confirm => handle_confirm_input(key, app, store),
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut BudgetStore,
) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app, store),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => scroll_to_top(&mut app.category_index, &mut app.category_scroll),
        KeyCode::Char('G') => scroll_to_bottom(
            &mut app.category_index,
            &mut app.category_scroll,
            store.len(),
            app.visible_rows,
        ),
        KeyCode::Char('1') => switch_screen(app, store, Screen::Dashboard),
        KeyCode::Char('2') | KeyCode::Char('i') => switch_screen(app, store, Screen::Insights),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, store, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, store, screens[prev]);
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => app.set_status(""),
        KeyCode::Char('a') => {
            app.screen = Screen::Dashboard;
            forms::open_new_category(app);
        }
        KeyCode::Char('e') if app.screen == Screen::Dashboard => {
            forms::open_edit_category(app, store);
        }
        KeyCode::Char('t') | KeyCode::Enter if app.screen == Screen::Dashboard => {
            forms::open_transaction(app, store);
        }
        KeyCode::Char('D') | KeyCode::Delete if app.screen == Screen::Dashboard => {
            forms::request_delete(app, store);
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app, store);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut BudgetStore,
) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut BudgetStore,
) -> Result<()> {
    match key.code {
        KeyCode::Enter => forms::submit(app, store)?,
        KeyCode::Esc => {
            app.close_form();
            app.set_status("Edit cancelled");
        }
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.form.as_mut() {
                form.next_field();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.form.as_mut() {
                form.prev_field();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.form.as_mut() {
                form.pop_char();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = app.form.as_mut() {
                form.push_char(c);
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, store: &mut BudgetStore) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => forms::confirm(app, store),
        // Any other key = cancel
        _ => forms::cancel_confirm(app),
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, store: &BudgetStore, screen: Screen) {
    app.sync(store);
    app.screen = screen;
}

fn handle_move_down(app: &mut App, store: &BudgetStore) {
    if app.screen == Screen::Dashboard {
        scroll_down(
            &mut app.category_index,
            &mut app.category_scroll,
            store.len(),
            app.visible_rows,
        );
    }
}

fn handle_move_up(app: &mut App) {
    if app.screen == Screen::Dashboard {
        scroll_up(&mut app.category_index, &mut app.category_scroll);
    }
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tui_tests;
