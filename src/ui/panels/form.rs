use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::form::FormField;
use crate::ui::app::{App, InputMode};
use crate::ui::theme;

const LABEL_WIDTH: usize = 10;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Form;
    let form = &app.form;

    let field_style = |field: FormField| {
        if editing && form.focus == field {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::normal_style()
        }
    };

    let text_value = |value: &str, placeholder: &'static str, field: FormField| {
        if value.is_empty() {
            Span::styled(placeholder, theme::dim_style())
        } else {
            Span::styled(value.to_string(), field_style(field))
        }
    };

    let lines = vec![
        Line::from(vec![
            label(FormField::Amount),
            text_value(&form.amount, "0.00", FormField::Amount),
        ]),
        Line::from(vec![
            label(FormField::Category),
            Span::styled(
                format!("◂ {} ▸", form.category),
                field_style(FormField::Category),
            ),
        ]),
        Line::from(vec![
            label(FormField::Date),
            text_value(&form.date, "YYYY-MM-DD", FormField::Date),
        ]),
        Line::from(vec![
            label("Currency"),
            Span::styled(
                format!("{} ({})", app.currency, app.currency.name()),
                theme::normal_style(),
            ),
            Span::styled("  c to change", theme::dim_style()),
        ]),
        Line::from(Span::styled(
            if editing {
                "Enter to add, Esc to go back"
            } else {
                "Press a to add a transaction"
            },
            theme::dim_style(),
        )),
    ];

    let title_style = if editing {
        theme::focused_title_style()
    } else {
        theme::panel_title_style()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editing {
            theme::ACCENT
        } else {
            theme::OVERLAY
        }))
        .title(Span::styled(" Add Transaction ", title_style));

    f.render_widget(Paragraph::new(lines).block(block), area);

    if editing {
        let (row, len) = match form.focus {
            FormField::Amount => (0, form.amount.chars().count()),
            FormField::Category => return,
            FormField::Date => (2, form.date.chars().count()),
        };
        let x = area.x + 1 + (LABEL_WIDTH + len) as u16;
        let y = area.y + 1 + row;
        if x < area.x + area.width.saturating_sub(1) {
            f.set_cursor_position((x, y));
        }
    }
}

fn label(text: impl std::fmt::Display) -> Span<'static> {
    let text = text.to_string();
    Span::styled(format!("{text:<width$}", width = LABEL_WIDTH), theme::dim_style())
}
