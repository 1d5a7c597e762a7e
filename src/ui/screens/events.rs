use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(9)])
        .split(area);

    render_events(f, chunks[0], app);
    render_education(f, chunks[1], app);
}

fn month_text(app: &App, month: u32) -> String {
    app.plan
        .month_date(month)
        .map_or_else(String::new, |d| d.format("%Y-%m").to_string())
}

fn render_events(f: &mut Frame, area: Rect, app: &App) {
    let events = &app.plan.child_events;
    if events.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No one-time events", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :event delivery 2025-06 8000",
                theme::dim_style(),
            )),
        ];
        f.render_widget(
            Paragraph::new(msg)
                .centered()
                .block(theme::panel("One-time events (0)")),
            area,
        );
        return;
    }

    let header = Row::new(
        ["Month", "Date", "Kind", "Name", "Amount"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    )
    .height(1);

    let rows: Vec<Row> = events
        .iter()
        .enumerate()
        .skip(app.event_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, event)| {
            let style = if i == app.event_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(event.month.to_string()),
                Cell::from(month_text(app, event.month)),
                Cell::from(event.kind.as_str()),
                Cell::from(truncate(&event.name, 30)),
                Cell::from(Span::styled(
                    format_amount(event.amount),
                    theme::expense_style(),
                )),
            ])
            .style(style)
        })
        .collect();

    let total: Decimal = events.iter().map(|e| e.amount).sum();
    let widths = [
        Constraint::Length(6),
        Constraint::Length(9),
        Constraint::Length(19),
        Constraint::Min(16),
        Constraint::Length(14),
    ];
    let table = Table::new(rows, widths).header(header).block(theme::panel(format!(
        "One-time events ({}) total {}",
        events.len(),
        format_amount(total)
    )));
    f.render_widget(table, area);
}

/// Education rows as the engine sees them: explicit ones plus those implied by the child's age.
fn render_education(f: &mut Frame, area: Rect, app: &App) {
    let schedule = app.plan.education_expenses();
    let header = Row::new(
        ["Stage", "Months", "From", "To", "Monthly"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    )
    .height(1);

    let rows: Vec<Row> = schedule
        .iter()
        .take(area.height.saturating_sub(3) as usize)
        .map(|e| {
            Row::new(vec![
                Cell::from(e.stage.as_str()),
                Cell::from(e.active.to_string()),
                Cell::from(month_text(app, e.active.start)),
                Cell::from(month_text(app, e.active.end.saturating_sub(1))),
                Cell::from(format_amount(e.amount)),
            ])
            .style(theme::normal_style())
        })
        .collect();

    let widths = [
        Constraint::Length(16),
        Constraint::Length(8),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Min(12),
    ];
    let title = match &app.plan.child {
        Some(child) => format!(
            "Education schedule ({}, born {})",
            child.status,
            child.birth_date.format("%Y-%m")
        ),
        None => "Education schedule (no child)".to_string(),
    };
    f.render_widget(
        Table::new(rows, widths).header(header).block(theme::panel(title)),
        area,
    );
}
