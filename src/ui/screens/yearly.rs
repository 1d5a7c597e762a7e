use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::projection::YearlySummary;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{compact_amount, format_amount};

const CATEGORIES: [&str; 6] = ["Housing", "Living", "Child", "Education", "One-time", "Annual"];

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Year table
            Constraint::Length(1),  // Legend
            Constraint::Min(8),     // Bars
        ])
        .split(area);

    render_table(f, chunks[0], app);
    render_legend(f, chunks[1]);
    render_chart(f, chunks[2], app);
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(
        ["Year", "Months", "Income", "Expense", "Net", "End balance"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    )
    .height(1);

    let rows: Vec<Row> = app
        .summary
        .years
        .iter()
        .enumerate()
        .map(|(i, year)| {
            Row::new(vec![
                Cell::from(format!("Year {}", year.year)),
                Cell::from(format!(
                    "{} - {}",
                    year.first_month.format("%Y-%m"),
                    year.last_month.format("%Y-%m")
                )),
                Cell::from(Span::styled(format_amount(year.income), theme::income_style())),
                Cell::from(Span::styled(
                    format_amount(year.expense),
                    theme::expense_style(),
                )),
                Cell::from(Span::styled(
                    format_amount(year.net),
                    theme::balance_style(year.net),
                )),
                Cell::from(Span::styled(
                    format_amount(year.ending_balance),
                    theme::balance_style(year.ending_balance),
                )),
            ])
            .style(if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            })
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Length(19),
        Constraint::Length(15),
        Constraint::Length(15),
        Constraint::Length(15),
        Constraint::Min(15),
    ];
    let title = format!(
        "Yearly summary, projected savings {}",
        format_amount(app.summary.projected_savings)
    );
    f.render_widget(
        Table::new(rows, widths).header(header).block(theme::panel(title)),
        area,
    );
}

fn render_legend(f: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(" ", theme::dim_style())];
    for (name, color) in CATEGORIES.iter().zip(theme::CATEGORY_COLORS) {
        spans.push(Span::styled("■ ", Style::default().fg(color)));
        spans.push(Span::styled(format!("{name}  "), theme::dim_style()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Expense categories of one year, annual items net of bonus and floored at zero.
fn category_values(year: &YearlySummary) -> [Decimal; 6] {
    let b = &year.breakdown;
    [
        b.housing,
        b.living,
        b.child,
        b.education,
        b.one_time,
        (b.annual - b.bonus).max(Decimal::ZERO),
    ]
}

fn render_chart(f: &mut Frame, area: Rect, app: &App) {
    let groups: Vec<BarGroup> = app
        .summary
        .years
        .iter()
        .map(|year| {
            let bars: Vec<Bar> = category_values(year)
                .iter()
                .zip(theme::CATEGORY_COLORS)
                .map(|(value, color)| {
                    Bar::default()
                        .value(value.round().to_u64().unwrap_or(0))
                        .text_value(compact_amount(*value))
                        .style(Style::default().fg(color))
                        .value_style(Style::default().fg(theme::HEADER_BG).bg(color))
                })
                .collect();
            BarGroup::default()
                .label(Line::from(format!("Year {}", year.year)))
                .bars(&bars)
        })
        .collect();

    let mut chart = BarChart::default()
        .block(theme::panel("Expenses per year"))
        .bar_width(5)
        .bar_gap(0)
        .group_gap(3);
    for group in groups {
        chart = chart.data(group);
    }

    f.render_widget(chart, area);
}
