use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::projection::HORIZON_MONTHS;
use crate::ui::app::{App, InputMode};
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(50), Constraint::Length(30)])
        .split(area);

    render_form(f, chunks[0], app);
    render_cards(f, chunks[1], app);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let rows = app.plan_rows();
    let header = Row::new(
        ["Section", "Field", "Value"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    )
    .height(1);

    let mut previous_section = "";
    let table_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let section = row.section();
            let section_cell = if section == previous_section {
                String::new()
            } else {
                section.to_string()
            };
            previous_section = section;
            (i, row, section_cell)
        })
        .skip(app.plan_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, row, section_cell)| {
            let is_cursor = i == app.plan_index;
            let editing = is_cursor && app.input_mode == InputMode::Editing;
            let value = if editing {
                format!("{}▏", app.command_input)
            } else {
                row.value(&app.plan)
            };

            let style = if editing {
                Style::default().fg(theme::HEADER_BG).bg(theme::GREEN)
            } else if is_cursor {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(Span::styled(section_cell, theme::section_style())),
                Cell::from(truncate(&row.label(&app.plan), 24)),
                Cell::from(value),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(20),
        Constraint::Length(25),
        Constraint::Min(20),
    ];

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(theme::panel(format!("Plan inputs ({})", rows.len())));
    f.render_widget(table, area);
}

fn render_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(area);

    let summary = &app.summary;
    let lowest_date = app
        .plan
        .month_date(summary.lowest_month)
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_default();

    render_card(
        f,
        cards[0],
        "Projected savings",
        format_amount(summary.projected_savings),
        theme::balance_color(summary.projected_savings),
        format!("after {HORIZON_MONTHS} months"),
    );
    render_card(
        f,
        cards[1],
        "Net over horizon",
        format_amount(summary.total_net),
        theme::balance_color(summary.total_net),
        savings_rate(app).map_or_else(
            || format!("from {}", format_amount(summary.starting_balance)),
            |rate| format!("{rate}% of income saved"),
        ),
    );
    render_card(
        f,
        cards[2],
        "Lowest balance",
        format_amount(summary.lowest_balance),
        theme::balance_color(summary.lowest_balance),
        if summary.has_deficit() {
            format!("overdrawn in {lowest_date}")
        } else {
            lowest_date
        },
    );

    let (payoff, detail) = match &app.plan.loan {
        None => ("No loan".to_string(), String::new()),
        Some(loan) if loan.principal.is_none() => (
            format_amount(loan.installment),
            "per month, open-ended".to_string(),
        ),
        Some(loan) => match loan
            .payoff_month(HORIZON_MONTHS)
            .and_then(|m| app.plan.month_date(m))
        {
            Some(date) => (date.format("%Y-%m").to_string(), "paid off".to_string()),
            None => ("Beyond horizon".to_string(), format_amount(loan.installment)),
        },
    };
    render_card(f, cards[3], "Housing loan", payoff, theme::ACCENT, detail);
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    display: String,
    color: Color,
    subtitle: String,
) {
    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(theme::panel(title));

    f.render_widget(text, area);
}

/// Share of income left after expenses over the whole horizon, in percent.
fn savings_rate(app: &App) -> Option<Decimal> {
    let income = app.summary.total_income;
    if income <= Decimal::ZERO {
        return None;
    }
    app.summary
        .total_net
        .checked_div(income)?
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|rate| rate.round_dp(1))
}
