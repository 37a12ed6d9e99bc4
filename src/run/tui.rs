use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing::{error, info};

use crate::config::Config;
use crate::db::Database;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(db: &Database, config: &Config) -> Result<()> {
    let mut app = App::new(config.refresh_interval);
    if let Err(e) = app.refresh_all(db) {
        error!("Initial load failed: {e:#}");
        app.set_status(format!("Load failed: {e:#}"));
    }
    info!(db = %config.db_path.display(), "TUI started");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, then the list's share of the rest
            let content_height = f.area().height.saturating_sub(3) as usize;
            app.visible_rows = (content_height * 45 / 100).saturating_sub(3).max(1);
            crate::ui::render::render(f, app);
        })?;

        // Wake up for the periodic reload even without input
        if event::poll(app.until_refresh())? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Err(e) = handle_key(key, app, db) {
                        error!("{e:#}");
                        app.set_status(format!("Error: {e:#}"));
                    }
                }
            }
        }

        if let Err(e) = app.tick(db) {
            error!("Reload failed: {e:#}");
            app.set_status(format!("Reload failed: {e:#}"));
        }
    }
    Ok(())
}

fn handle_key(key: event::KeyEvent, app: &mut App, db: &Database) -> Result<()> {
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Normal => handle_normal_input(key, app, db),
        InputMode::Command => handle_command_input(key, app, db),
        InputMode::Form => handle_form_input(key, app, db),
        InputMode::Confirm => handle_confirm_input(key, app, db),
    }
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &Database) -> Result<()> {
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
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char(c @ '1'..='5') => {
            let idx = (c as usize) - ('1' as usize);
            if let Some(screen) = Screen::all().get(idx) {
                app.switch_screen(*screen);
            }
        }
        KeyCode::Tab => app.switch_screen(app.screen.next()),
        KeyCode::BackTab => app.switch_screen(app.screen.prev()),
        KeyCode::Char('g') => scroll_to_top(&mut app.list_index, &mut app.list_scroll),
        KeyCode::Char('G') => {
            let len = app.list_len();
            scroll_to_bottom(&mut app.list_index, &mut app.list_scroll, len, app.visible_rows);
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('a') => commands::cmd_add("", app, db)?,
        KeyCode::Char('e') | KeyCode::Enter => commands::cmd_edit("", app, db)?,
        KeyCode::Char('D') => commands::cmd_delete("", app, db)?,
        KeyCode::Char('r') => commands::handle_command("refresh", app, db)?,
        KeyCode::Char('H') if app.screen == Screen::Beranda => app.prev_page(),
        KeyCode::Char('L') if app.screen == Screen::Beranda => app.next_page(),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..app.visible_rows / 2 {
                handle_move_up(app);
            }
        }
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, db)?;
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
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
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

fn handle_form_input(key: event::KeyEvent, app: &mut App, db: &Database) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.close_form();
            app.set_status("Cancelled");
        }
        KeyCode::Enter => app.submit_form(db)?,
        _ => {
            let Some(form) = app.form.as_mut() else {
                app.input_mode = InputMode::Normal;
                return Ok(());
            };
            match key.code {
                KeyCode::Tab | KeyCode::Down => form.next_field(),
                KeyCode::BackTab | KeyCode::Up => form.prev_field(),
                KeyCode::Backspace => form.backspace(),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    form.push_char(c)
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, db: &Database) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.confirm_pending(db)?;
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
    Ok(())
}

fn handle_move_down(app: &mut App) {
    let len = app.list_len();
    let page = app.visible_rows;
    scroll_down(&mut app.list_index, &mut app.list_scroll, len, page);
}

fn handle_move_up(app: &mut App) {
    scroll_up(&mut app.list_index, &mut app.list_scroll);
}
