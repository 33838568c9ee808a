use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::Currency;
use crate::ui::app::App;
use crate::ui::render::centered;
use crate::ui::theme;
use crate::ui::util::{truncate, window_start};

const PICKER_WIDTH: u16 = 44;
const PICKER_HEIGHT: u16 = 22;

enum Entry {
    Heading(&'static str),
    Divider,
    Item(usize, Currency),
}

/// Searchable currency list: matching "top" currencies first, then everything else.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let popup = centered(area, PICKER_WIDTH, PICKER_HEIGHT);
    f.render_widget(Clear, popup);

    let inner_width = popup.width.saturating_sub(2) as usize;
    let matches = app.picker_matches();

    let mut entries = Vec::new();
    let top_count = matches.iter().take_while(|c| c.is_top()).count();
    if top_count > 0 {
        entries.push(Entry::Heading("Top Currencies"));
        for (i, c) in matches.iter().enumerate().take(top_count) {
            entries.push(Entry::Item(i, *c));
        }
    }
    if matches.len() > top_count {
        if top_count > 0 {
            entries.push(Entry::Divider);
        }
        entries.push(Entry::Heading("All Currencies"));
        for (i, c) in matches.iter().enumerate().skip(top_count) {
            entries.push(Entry::Item(i, *c));
        }
    }

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Search: ", theme::dim_style()),
            Span::styled(app.picker_query.clone(), theme::normal_style()),
        ]),
        Line::from(""),
    ];

    let list_height = (popup.height as usize).saturating_sub(2 + lines.len());

    if entries.is_empty() {
        lines.push(Line::from(Span::styled(
            "No currency found.",
            theme::dim_style(),
        )));
    } else {
        let selected_row = entries
            .iter()
            .position(|e| matches!(e, Entry::Item(i, _) if *i == app.picker_index))
            .unwrap_or(0);
        let start = window_start(selected_row, list_height);

        for entry in entries.iter().skip(start).take(list_height) {
            lines.push(match entry {
                Entry::Heading(text) => Line::from(Span::styled(
                    *text,
                    Style::default()
                        .fg(theme::YELLOW)
                        .add_modifier(Modifier::BOLD),
                )),
                Entry::Divider => Line::from(Span::styled(
                    "─".repeat(inner_width),
                    Style::default().fg(theme::OVERLAY),
                )),
                Entry::Item(i, currency) => {
                    let mark = if *currency == app.currency { "✓" } else { " " };
                    let text = format!(" {mark} {:<4} {}", currency.code(), currency.name());
                    let style = if *i == app.picker_index {
                        theme::selected_style()
                    } else {
                        theme::normal_style()
                    };
                    Line::from(Span::styled(truncate(&text, inner_width), style))
                }
            });
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(Span::styled(
            " Display Currency ",
            theme::focused_title_style(),
        ))
        .style(Style::default().bg(theme::HEADER_BG));

    f.render_widget(Paragraph::new(lines).block(block), popup);

    let cursor_x = popup.x + 1 + 8 + app.picker_query.chars().count() as u16;
    if cursor_x < popup.x + popup.width.saturating_sub(1) {
        f.set_cursor_position((cursor_x, popup.y + 1));
    }
}
