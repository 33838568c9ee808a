use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::ui::app::{App, InputMode};
use crate::ui::render::TABLE_CHROME_ROWS;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["Date", "Category", "Amount", ""]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let focused = matches!(app.input_mode, InputMode::Normal | InputMode::Confirm);

    let rows: Vec<Row> = if app.ledger.is_empty() {
        vec![Row::new(vec![
            Cell::from(""),
            Cell::from(Span::styled("No transactions yet.", theme::dim_style())),
        ])]
    } else {
        app.ledger
            .transactions()
            .iter()
            .enumerate()
            .skip(app.transaction_scroll)
            .take(area.height.saturating_sub(TABLE_CHROME_ROWS) as usize)
            .map(|(i, txn)| {
                let is_cursor = focused && i == app.transaction_index;
                let style = if is_cursor {
                    theme::selected_style()
                } else if i % 2 == 1 {
                    theme::alt_row_style()
                } else {
                    theme::normal_style()
                };
                let delete_marker = if is_cursor { " ✕ D" } else { "" };

                Row::new(vec![
                    Cell::from(format!("  {}", txn.date.format("%Y-%m-%d"))),
                    Cell::from(Span::styled(
                        txn.category.as_str(),
                        if is_cursor {
                            Style::default()
                        } else {
                            Style::default().fg(theme::category_color(txn.category))
                        },
                    )),
                    Cell::from(format!("{:>16}", app.currency.format(txn.amount))),
                    Cell::from(delete_marker),
                ])
                .style(style)
            })
            .collect()
    };

    let widths = [
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Min(16),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Expenses ({}) ", app.ledger.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}
