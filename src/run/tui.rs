use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::models::PlanInput;
use crate::projection::HORIZON_MONTHS;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(plan: PlanInput) -> Result<()> {
    let mut app = App::new(plan)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "session ended with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(3) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app)?,
                InputMode::Command => handle_command_input(key, app)?,
                InputMode::Editing => handle_editing_input(key, app),
                InputMode::Confirm => handle_confirm_input(key, app),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App) -> Result<()> {
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
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char(c @ '1'..='5') => {
            let idx = (c as usize) - ('1' as usize);
            if let Some(&screen) = Screen::all().get(idx) {
                switch_screen(app, screen);
            }
        }
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            switch_screen(app, screens[(idx + 1) % screens.len()]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, screens[prev]);
        }
        KeyCode::Enter if app.screen == Screen::Plan => app.begin_edit(),
        KeyCode::Esc => app.status_message.clear(),
        KeyCode::Char('+') | KeyCode::Char('=') if app.screen == Screen::Plan => {
            app.adjust_selected(1);
        }
        KeyCode::Char('-') if app.screen == Screen::Plan => app.adjust_selected(-1),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('D') => commands::handle_command("delete", app)?,
        KeyCode::Char('x') => commands::handle_command("export", app)?,
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app)?;
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

fn handle_editing_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm(),
        _ => app.cancel_confirm(),
    }
}

// ── Navigation ───────────────────────────────────────────────

fn switch_screen(app: &mut App, screen: Screen) {
    app.screen = screen;
    app.set_status(format!("{screen}"));
}

fn handle_move_down(app: &mut App) {
    let page = app.page();
    match app.screen {
        Screen::Plan => {
            let len = app.plan_rows().len();
            scroll_down(&mut app.plan_index, &mut app.plan_scroll, len, page);
        }
        Screen::Events => {
            let len = app.plan.child_events.len();
            scroll_down(&mut app.event_index, &mut app.event_scroll, len, page);
        }
        Screen::Monthly => scroll_down(
            &mut app.ledger_index,
            &mut app.ledger_scroll,
            HORIZON_MONTHS as usize,
            page,
        ),
        Screen::Yearly | Screen::Charts => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Plan => scroll_up(&mut app.plan_index, &mut app.plan_scroll),
        Screen::Events => scroll_up(&mut app.event_index, &mut app.event_scroll),
        Screen::Monthly => scroll_up(&mut app.ledger_index, &mut app.ledger_scroll),
        Screen::Yearly | Screen::Charts => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Plan => scroll_to_top(&mut app.plan_index, &mut app.plan_scroll),
        Screen::Events => scroll_to_top(&mut app.event_index, &mut app.event_scroll),
        Screen::Monthly => scroll_to_top(&mut app.ledger_index, &mut app.ledger_scroll),
        Screen::Yearly | Screen::Charts => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    let page = app.page();
    match app.screen {
        Screen::Plan => {
            let len = app.plan_rows().len();
            scroll_to_bottom(&mut app.plan_index, &mut app.plan_scroll, len, page);
        }
        Screen::Events => {
            let len = app.plan.child_events.len();
            scroll_to_bottom(&mut app.event_index, &mut app.event_scroll, len, page);
        }
        Screen::Monthly => scroll_to_bottom(
            &mut app.ledger_index,
            &mut app.ledger_scroll,
            HORIZON_MONTHS as usize,
            page,
        ),
        Screen::Yearly | Screen::Charts => {}
    }
}
