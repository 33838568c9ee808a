use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;

/// Category breakdown: a proportional strip (one colored run per category, zero-size
/// when nothing was spent there) with a legend underneath.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let breakdown = app.ledger.breakdown();
    let strip_width = area.width.saturating_sub(2);

    let strip = if breakdown.grand_total().is_zero() {
        Line::from(Span::styled(
            "░".repeat(strip_width as usize),
            Style::default().fg(theme::OVERLAY),
        ))
    } else {
        Line::from(
            breakdown
                .slice_widths(strip_width)
                .into_iter()
                .filter(|(_, w)| *w > 0)
                .map(|(cat, w)| {
                    Span::styled(
                        "█".repeat(w as usize),
                        Style::default().fg(theme::category_color(cat)),
                    )
                })
                .collect::<Vec<_>>(),
        )
    };

    let mut lines = vec![strip.clone(), strip, Line::from("")];

    for (cat, share) in breakdown.shares() {
        lines.push(Line::from(vec![
            Span::styled("■ ", Style::default().fg(theme::category_color(cat))),
            Span::styled(format!("{:<10}", cat.as_str()), theme::normal_style()),
            Span::styled(
                format!("{:>16}", app.currency.format(breakdown.total_for(cat))),
                theme::normal_style(),
            ),
            Span::styled(format!("{share:>7.1}%"), theme::dim_style()),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            format!("  {:<10}", "Total"),
            Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:>16}", app.currency.format(breakdown.grand_total())),
            Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
        ),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Spending by Category ", theme::panel_title_style()));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
