use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Cell, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

const HEADERS: [&str; 12] = [
    "#", "Month", "Income", "Housing", "Living", "Child", "Education", "One-time", "Annual",
    "Expense", "Net", "Balance",
];

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(
        HEADERS
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    )
    .height(1);

    let entries = app.projection.entries();
    let rows: Vec<Row> = entries
        .iter()
        .enumerate()
        .skip(app.ledger_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, entry)| {
            let b = &entry.breakdown;
            let style = if i == app.ledger_index {
                theme::selected_style()
            } else if entry.month % 12 == 11 {
                // year end
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            // annual items net of any bonus
            let annual = b.annual - b.bonus;

            Row::new(vec![
                Cell::from(entry.month.to_string()),
                Cell::from(entry.date.format("%Y-%m").to_string()),
                Cell::from(Span::styled(
                    format_amount(entry.total_income),
                    theme::income_style(),
                )),
                Cell::from(format_amount(b.housing)),
                Cell::from(format_amount(b.living)),
                Cell::from(format_amount(b.child)),
                Cell::from(format_amount(b.education)),
                Cell::from(format_amount(b.one_time)),
                Cell::from(format_amount(annual)),
                Cell::from(Span::styled(
                    format_amount(entry.total_expense),
                    theme::expense_style(),
                )),
                Cell::from(Span::styled(
                    format_amount(entry.net),
                    theme::balance_style(entry.net),
                )),
                Cell::from(Span::styled(
                    format_amount(entry.cumulative),
                    theme::balance_style(entry.cumulative),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(11),
        Constraint::Length(11),
        Constraint::Length(10),
        Constraint::Length(11),
        Constraint::Length(11),
        Constraint::Length(11),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Min(13),
    ];

    let title = format!(
        "Monthly ledger ({} months) starting balance {}",
        entries.len(),
        format_amount(app.projection.starting_balance())
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(theme::panel(title));
    f.render_widget(table, area);
}
