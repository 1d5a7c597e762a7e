use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::Span,
    widgets::{Axis, Chart, Dataset, GraphType},
    Frame,
};
use rust_decimal::Decimal;

use crate::projection::{MonthlyLedgerEntry, HORIZON_MONTHS, MONTHS_PER_YEAR};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{compact_amount, to_f64, value_bounds};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let entries = app.projection.entries();
    render_flows(f, chunks[0], entries);
    render_child_costs(f, chunks[1], entries);
    render_balance(f, chunks[2], entries);
}

fn series(entries: &[MonthlyLedgerEntry], value: impl Fn(&MonthlyLedgerEntry) -> Decimal) -> Vec<(f64, f64)> {
    entries
        .iter()
        .map(|e| (f64::from(e.month), to_f64(value(e))))
        .collect()
}

/// Months with a one-time expense. Empty months are left out so the events stand alone as points.
fn one_time_points(entries: &[MonthlyLedgerEntry]) -> Vec<(f64, f64)> {
    entries
        .iter()
        .filter(|e| e.breakdown.one_time > Decimal::ZERO)
        .map(|e| (f64::from(e.month), to_f64(e.breakdown.one_time)))
        .collect()
}

/// Year boundaries along the month axis, labelled with the calendar year.
fn x_axis(entries: &[MonthlyLedgerEntry]) -> Axis<'static> {
    let labels: Vec<Span> = entries
        .iter()
        .filter(|e| e.month % MONTHS_PER_YEAR == 0 || e.month + 1 == HORIZON_MONTHS)
        .map(|e| Span::styled(e.date.format("%Y-%m").to_string(), theme::dim_style()))
        .collect();
    Axis::default()
        .style(theme::dim_style())
        .bounds([0.0, f64::from(HORIZON_MONTHS - 1)])
        .labels(labels)
}

fn y_axis(bounds: [f64; 2]) -> Axis<'static> {
    let [lo, hi] = bounds;
    let mid = (lo + hi) / 2.0;
    let labels: Vec<Span> = [lo, mid, hi]
        .iter()
        .map(|v| {
            let amount = Decimal::from_f64_retain(*v).unwrap_or(Decimal::ZERO);
            Span::styled(compact_amount(amount), theme::dim_style())
        })
        .collect();
    Axis::default()
        .style(theme::dim_style())
        .bounds(bounds)
        .labels(labels)
}

fn render_flows(f: &mut Frame, area: Rect, entries: &[MonthlyLedgerEntry]) {
    let income = series(entries, |e| e.total_income);
    let expense = series(entries, |e| e.total_expense);
    let bounds = value_bounds(income.iter().chain(expense.iter()).map(|(_, y)| *y));

    let datasets = vec![
        Dataset::default()
            .name("Income")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::GREEN))
            .data(&income),
        Dataset::default()
            .name("Expenses")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::RED))
            .data(&expense),
    ];

    let chart = Chart::new(datasets)
        .block(theme::panel("Monthly income vs expenses"))
        .x_axis(x_axis(entries))
        .y_axis(y_axis(bounds));
    f.render_widget(chart, area);
}

fn render_child_costs(f: &mut Frame, area: Rect, entries: &[MonthlyLedgerEntry]) {
    let regular = series(entries, |e| e.breakdown.child);
    let education = series(entries, |e| e.breakdown.education);
    let one_time = one_time_points(entries);
    let bounds = value_bounds(
        regular
            .iter()
            .chain(education.iter())
            .chain(one_time.iter())
            .map(|(_, y)| *y),
    );

    let datasets = vec![
        Dataset::default()
            .name("Child")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::MAUVE))
            .data(&regular),
        Dataset::default()
            .name("Education")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::PEACH))
            .data(&education),
        Dataset::default()
            .name("One-time")
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(theme::RED))
            .data(&one_time),
    ];

    let chart = Chart::new(datasets)
        .block(theme::panel("Child costs per month"))
        .x_axis(x_axis(entries))
        .y_axis(y_axis(bounds));
    f.render_widget(chart, area);
}

fn render_balance(f: &mut Frame, area: Rect, entries: &[MonthlyLedgerEntry]) {
    let balance = series(entries, |e| e.cumulative);
    let bounds = value_bounds(balance.iter().map(|(_, y)| *y));
    let zero = [(0.0, 0.0), (f64::from(HORIZON_MONTHS - 1), 0.0)];

    let mut datasets = vec![Dataset::default()
        .name("Balance")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme::ACCENT))
        .data(&balance)];
    if bounds[0] < 0.0 {
        datasets.push(
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Line)
                .style(theme::dim_style())
                .data(&zero),
        );
    }

    let chart = Chart::new(datasets)
        .block(theme::panel("Cumulative savings"))
        .x_axis(x_axis(entries))
        .y_axis(y_axis(bounds));
    f.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{ChildEvent, ChildEventKind, PlanInput};
    use crate::projection::project;

    #[test]
    fn test_one_time_points_only_event_months() {
        let mut plan = PlanInput::sample(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        plan.add_child_event(ChildEvent::new(
            "Delivery".into(),
            ChildEventKind::Delivery,
            3,
            dec!(8000),
        ));
        plan.add_child_event(ChildEvent::new(
            "Checkup".into(),
            ChildEventKind::MaternityCheckup,
            71,
            dec!(150),
        ));
        let projection = project(&plan).unwrap();

        assert_eq!(
            one_time_points(projection.entries()),
            vec![(3.0, 8000.0), (71.0, 150.0)]
        );
    }
}
