use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{App, InputMode};
use super::commands;
use super::panels;
use super::theme;

/// Height of the add-transaction panel, borders included.
pub(crate) const FORM_HEIGHT: u16 = 7;

/// Title, status and command bars.
const BAR_ROWS: u16 = 3;

/// Table borders and header row.
pub(crate) const TABLE_CHROME_ROWS: u16 = 3;

/// Transaction rows that fit on a screen `screen_height` rows tall.
pub(crate) fn table_rows(screen_height: u16) -> usize {
    screen_height.saturating_sub(BAR_ROWS + TABLE_CHROME_ROWS) as usize
}

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(8),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], app);
    render_main(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.input_mode == InputMode::Picker {
        panels::picker::render(f, f.area(), app);
    }
    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_title_bar(f: &mut Frame, area: Rect, app: &App) {
    let title = Line::from(vec![
        Span::styled(
            " CoinKeeper ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("| display currency {} ", app.currency),
            Style::default().fg(theme::TEXT_DIM),
        ),
    ]);
    f.render_widget(
        Paragraph::new(title).style(Style::default().bg(theme::HEADER_BG)),
        area,
    );
}

fn render_main(f: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(FORM_HEIGHT), Constraint::Min(4)])
        .split(columns[0]);

    panels::form::render(f, left[0], app);
    panels::chart::render(f, left[1], app);
    panels::transactions::render(f, columns[1], app);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Form => theme::GREEN,
        InputMode::Picker => theme::YELLOW,
        InputMode::Command => theme::GREEN,
        InputMode::Confirm => theme::RED,
    };
    let mode_style = Style::default()
        .fg(theme::HEADER_BG)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let total = app.currency.format(app.ledger.breakdown().grand_total());
    let info = format!(" {} txns | total {total}", app.ledger.len());

    let right = match app.input_mode {
        InputMode::Normal => " a add | c currency | D delete | ? help ",
        InputMode::Form => " Tab next | ←/→ category | ^t today | Enter add | Esc back ",
        InputMode::Picker => " type to search | ↑/↓ move | Enter select | Esc cancel ",
        InputMode::Command => " Enter run | Esc cancel ",
        InputMode::Confirm => " y confirm | any key cancel ",
    };

    let available = area.width as usize;
    let used = mode_label.chars().count() + info.chars().count() + right.chars().count();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme::YELLOW)),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        InputMode::Normal | InputMode::Form | InputMode::Picker => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press a to add, c for currency, : for commands, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let row = |text: &'static str| Line::from(Span::styled(text, theme::normal_style()));

    let mut help_text = vec![
        Line::from(Span::styled(
            " CoinKeeper Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading(" Table"),
        row("  j/k or Up/Down   Move cursor           g/G        Top/Bottom"),
        row("  Ctrl-d/u         Half page down/up     D/Delete   Delete row"),
        row("  a or Tab         Add transaction       c          Pick currency"),
        row("  :               Command mode           Ctrl-q     Quit"),
        Line::from(""),
        heading(" Add form"),
        row("  Tab/Shift-Tab    Next/Prev field       Left/Right Change category"),
        row("  Ctrl-t           Today's date          Enter      Add"),
        row("  Esc              Back to table"),
        Line::from(""),
        heading(" Commands"),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    let mut names: Vec<&&str> = commands::COMMANDS.keys().collect();
    names.sort_by_key(|name| std::cmp::Reverse(name.len()));
    for name in names {
        if name.len() <= 2 {
            continue;
        }
        if let Some(cmd) = commands::COMMANDS.get(*name) {
            if seen.insert(cmd.description) {
                cmd_lines.push((*name, cmd.description));
            }
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<10} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        Style::default().fg(theme::TEXT_DIM),
    )));

    let popup_area = centered(area, 76, help_text.len() as u16 + 2);
    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
