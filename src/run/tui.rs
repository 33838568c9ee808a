use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::form::FormField;
use crate::models::Currency;
use crate::store::Store;
use crate::ui::app::{App, InputMode, PendingAction};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

/// Run the interactive screen. `currency` overrides the remembered display currency
/// for this session only.
pub(crate) fn as_tui(store: &Store, currency: Option<Currency>) -> Result<()> {
    let mut app = App::load(store);
    if let Some(currency) = currency {
        app.currency = currency;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "session ended with an error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &Store,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            app.visible_rows = crate::ui::render::table_rows(f.area().height).max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
            {
                app.running = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store)?,
                InputMode::Form => handle_form_input(key, app, store)?,
                InputMode::Picker => handle_picker_input(key, app, store),
                InputMode::Command => handle_command_input(key, app, store)?,
                InputMode::Confirm => handle_confirm_input(key, app, store)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    let len = app.ledger.len();
    let page = app.visible_rows.max(1);

    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('a') | KeyCode::Tab | KeyCode::Enter => {
            app.input_mode = InputMode::Form;
        }
        KeyCode::Char('c') => app.open_picker(),
        KeyCode::Char('j') | KeyCode::Down => {
            scroll_down(&mut app.transaction_index, &mut app.transaction_scroll, len, page);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        KeyCode::Char('g') | KeyCode::Home => {
            scroll_to_top(&mut app.transaction_index, &mut app.transaction_scroll);
        }
        KeyCode::Char('G') | KeyCode::End => {
            scroll_to_bottom(&mut app.transaction_index, &mut app.transaction_scroll, len, page);
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..page / 2 {
                scroll_down(&mut app.transaction_index, &mut app.transaction_scroll, len, page);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            for _ in 0..page / 2 {
                scroll_up(&mut app.transaction_index, &mut app.transaction_scroll);
            }
        }
        KeyCode::Char('D') | KeyCode::Delete => {
            commands::handle_command("delete", app, store)?;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_form_input(key: event::KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => app.submit_form(store)?,
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),
        KeyCode::Left if app.form.focus == FormField::Category => app.form.cycle_category(-1),
        KeyCode::Right if app.form.focus == FormField::Category => app.form.cycle_category(1),
        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            commands::handle_command("today", app, store)?;
        }
        KeyCode::Backspace => app.form.backspace(),
        // Unbound Ctrl/Alt chords never reach the text fields.
        KeyCode::Char(_)
            if key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
        KeyCode::Char(c) => app.form.push_char(c),
        _ => {}
    }
    Ok(())
}

fn handle_picker_input(key: event::KeyEvent, app: &mut App, store: &Store) {
    match key.code {
        KeyCode::Esc => {
            app.picker_query.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => app.picker_confirm(store),
        KeyCode::Down => app.picker_move(1),
        KeyCode::Up => app.picker_move(-1),
        KeyCode::PageDown => app.picker_move(10),
        KeyCode::PageUp => app.picker_move(-10),
        KeyCode::Backspace => {
            app.picker_query.pop();
            app.picker_index = 0;
        }
        KeyCode::Char(c) => {
            app.picker_query.push(c);
            app.picker_index = 0;
        }
        _ => {}
    }
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, store: &Store) -> Result<()> {
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

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, store: &Store) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(PendingAction::DeleteTransaction { id, label }) = app.pending_action.take()
            {
                app.delete_transaction(&id, store)?;
                app.set_status(format!("Deleted: {label}"));
            }
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
        }
        _ => {
            // Any other key = cancel
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use crossterm::event::KeyEvent;

    use super::*;

    fn setup() -> (App, Store) {
        let store = Store::open_in_memory().unwrap();
        let mut app = App::load(&store);
        app.input_mode = InputMode::Form;
        (app, store)
    }

    fn press(app: &mut App, store: &Store, code: KeyCode, modifiers: KeyModifiers) {
        let key = KeyEvent::new(code, modifiers);
        match app.input_mode {
            InputMode::Normal => handle_normal_input(key, app, store).unwrap(),
            InputMode::Form => handle_form_input(key, app, store).unwrap(),
            _ => unreachable!("only normal and form keys are exercised here"),
        }
    }

    #[test]
    fn test_form_ignores_ctrl_and_alt_chords() {
        let (mut app, store) = setup();
        press(&mut app, &store, KeyCode::Char('5'), KeyModifiers::NONE);
        press(&mut app, &store, KeyCode::Char('a'), KeyModifiers::CONTROL);
        press(&mut app, &store, KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(app.form.amount, "5");

        app.form.focus = FormField::Date;
        press(&mut app, &store, KeyCode::Char('e'), KeyModifiers::CONTROL);
        assert!(app.form.date.is_empty());
    }

    #[test]
    fn test_form_ctrl_t_still_fills_today() {
        let (mut app, store) = setup();
        press(&mut app, &store, KeyCode::Char('t'), KeyModifiers::CONTROL);
        assert_eq!(app.form.focus, FormField::Date);
        assert_eq!(app.form.date.len(), "2024-01-01".len());
    }

    #[test]
    fn test_goto_bottom_lands_on_last_visible_row() {
        let (mut app, store) = setup();
        for day in 1..=30 {
            commands::handle_command(&format!("add 1 Food 2024-01-{day:02}"), &mut app, &store)
                .unwrap();
        }
        app.input_mode = InputMode::Normal;
        app.visible_rows = crate::ui::render::table_rows(20);

        press(&mut app, &store, KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(app.transaction_index, 29);
        assert_eq!(app.transaction_scroll, 30 - app.visible_rows);
    }
}
