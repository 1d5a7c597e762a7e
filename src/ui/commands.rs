use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, PendingAction, Screen};
use crate::export::{default_export_path, export_ledger};
use crate::input::{
    parse_amount, parse_annual, parse_child, parse_date, parse_education, parse_event,
    parse_expense, parse_fees, parse_loan, parse_signed_amount,
};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit FamilyPlan", cmd_quit, r);
    register_command!("quit", "Quit FamilyPlan", cmd_quit, r);
    register_command!("p", "Go to Plan", cmd_plan, r);
    register_command!("plan", "Go to Plan", cmd_plan, r);
    register_command!("e", "Go to Events", cmd_events, r);
    register_command!("events", "Go to Events", cmd_events, r);
    register_command!("m", "Go to Monthly", cmd_monthly, r);
    register_command!("monthly", "Go to Monthly", cmd_monthly, r);
    register_command!("y", "Go to Yearly", cmd_yearly, r);
    register_command!("yearly", "Go to Yearly", cmd_yearly, r);
    register_command!("c", "Go to Charts", cmd_charts, r);
    register_command!("charts", "Go to Charts", cmd_charts, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "income",
        "Set monthly income (e.g. :income 5200)",
        cmd_income,
        r
    );
    register_command!(
        "balance",
        "Set starting balance (e.g. :balance 12k)",
        cmd_balance,
        r
    );
    register_command!(
        "start",
        "Set projection start month (e.g. :start 2025-09)",
        cmd_start,
        r
    );
    register_command!(
        "loan",
        "Set housing loan (e.g. :loan 1800 350k 3.5% 0)",
        cmd_loan,
        r
    );
    register_command!("no-loan", "Remove the housing loan", cmd_no_loan, r);
    register_command!(
        "expense",
        "Add recurring expense (e.g. :expense 300 Car lease @0..36)",
        cmd_expense,
        r
    );
    register_command!(
        "event",
        "Add one-time event (e.g. :event delivery 2025-06 8000)",
        cmd_event,
        r
    );
    register_command!(
        "edu",
        "Add education expense (e.g. :edu preschool 1200 @12..36)",
        cmd_edu,
        r
    );
    register_command!(
        "annual",
        "Add annual item (e.g. :annual insurance 2000 jan)",
        cmd_annual,
        r
    );
    register_command!(
        "child",
        "Set child (e.g. :child due 2025-06-15 500)",
        cmd_child,
        r
    );
    register_command!("no-child", "Remove the child profile", cmd_no_child, r);
    register_command!(
        "fees",
        "Set school fees (e.g. :fees 1000 1200 300)",
        cmd_fees,
        r
    );
    register_command!("delete", "Delete selected record", cmd_delete, r);
    register_command!(
        "clear-events",
        "Delete all one-time events",
        cmd_clear_events,
        r
    );
    register_command!("reset", "Restore the starting plan", cmd_reset, r);
    register_command!(
        "export",
        "Export monthly ledger to CSV (e.g. :export ~/plan.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app)?;
    } else {
        // Try fuzzy match
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

pub(crate) fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_plan(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Plan;
    Ok(())
}

fn cmd_events(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Events;
    Ok(())
}

fn cmd_monthly(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Monthly;
    Ok(())
}

fn cmd_yearly(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Yearly;
    Ok(())
}

fn cmd_charts(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.screen = Screen::Charts;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_income(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :income <amount>");
        return Ok(());
    }
    if app.apply("income", |plan| {
        plan.income.amount = parse_amount("income.amount", args)?;
        Ok(())
    }) {
        app.set_status(format!("Monthly income: {}", app.plan.income.amount));
    }
    Ok(())
}

fn cmd_balance(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :balance <amount> (may be negative)");
        return Ok(());
    }
    if app.apply("balance", |plan| {
        plan.starting_balance = parse_signed_amount("balance", args)?;
        Ok(())
    }) {
        app.set_status(format!("Starting balance: {}", app.plan.starting_balance));
    }
    Ok(())
}

fn cmd_start(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :start <YYYY-MM>");
        return Ok(());
    }
    if app.apply("start", |plan| {
        plan.set_start(parse_date("start", args)?);
        Ok(())
    }) {
        app.set_status(format!("Projection starts {}", app.plan.start.format("%Y-%m")));
    }
    Ok(())
}

fn cmd_loan(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :loan <installment> [principal|-] [rate%] [start month]");
        return Ok(());
    }
    if app.apply("loan", |plan| {
        plan.loan = Some(parse_loan(args, plan.start)?);
        Ok(())
    }) {
        let payoff = app
            .plan
            .loan
            .as_ref()
            .and_then(|l| l.payoff_month(crate::projection::HORIZON_MONTHS))
            .and_then(|m| app.plan.month_date(m));
        match payoff {
            Some(date) => app.set_status(format!("Loan set, paid off {}", date.format("%Y-%m"))),
            None => app.set_status("Loan set, runs past the horizon"),
        }
    }
    Ok(())
}

fn cmd_no_loan(_args: &str, app: &mut App) -> anyhow::Result<()> {
    if app.apply("no-loan", |plan| {
        plan.loan = None;
        Ok(())
    }) {
        app.set_status("Housing loan removed");
    }
    Ok(())
}

fn cmd_expense(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :expense <amount> <label> [@from..to]");
        return Ok(());
    }
    let mut label = String::new();
    if app.apply("expense", |plan| {
        let expense = parse_expense(args, plan.start)?;
        label = expense.label.clone();
        plan.recurring.push(expense);
        Ok(())
    }) {
        app.set_status(format!("Added expense: {label}"));
    }
    Ok(())
}

fn cmd_event(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :event <kind> <month> <amount> [name]. Kinds: checkup, delivery, confinement, education, other");
        return Ok(());
    }
    let mut name = String::new();
    if app.apply("event", |plan| {
        let event = parse_event(args, plan.start)?;
        name = event.name.clone();
        plan.add_child_event(event);
        Ok(())
    }) {
        app.set_status(format!("Added event: {name}"));
    }
    Ok(())
}

fn cmd_edu(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :edu <childcare|preschool|primary> <amount> [@from..to]");
        return Ok(());
    }
    if app.apply("edu", |plan| {
        plan.education.push(parse_education(args, plan.start)?);
        Ok(())
    }) {
        app.set_status("Added education expense");
    }
    Ok(())
}

fn cmd_annual(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :annual <insurance|tax|bonus|other> <amount> <month 1-12 or name>");
        return Ok(());
    }
    if app.apply("annual", |plan| {
        plan.annual.push(parse_annual(args, plan.start)?);
        Ok(())
    }) {
        app.set_status("Added annual item");
    }
    Ok(())
}

fn cmd_child(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :child <born|due|planned> <YYYY-MM-DD> [monthly cost]");
        return Ok(());
    }
    if app.apply("child", |plan| {
        let cost = plan
            .child
            .as_ref()
            .map_or(rust_decimal::Decimal::ZERO, |c| c.monthly_cost);
        plan.child = Some(parse_child(args, plan.start, cost)?);
        Ok(())
    }) {
        app.set_status("Child profile updated");
    }
    Ok(())
}

fn cmd_no_child(_args: &str, app: &mut App) -> anyhow::Result<()> {
    if app.apply("no-child", |plan| {
        plan.child = None;
        Ok(())
    }) {
        app.set_status("Child profile removed");
    }
    Ok(())
}

fn cmd_fees(args: &str, app: &mut App) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :fees <childcare> <preschool> <primary>");
        return Ok(());
    }
    if app.apply("fees", |plan| {
        plan.fees = parse_fees(args)?;
        Ok(())
    }) {
        app.set_status("School fees updated");
    }
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App) -> anyhow::Result<()> {
    match app.selected_record() {
        Some(record) => app.request_delete(record),
        None => app.set_status("Select an expense, event or annual item first"),
    }
    Ok(())
}

fn cmd_clear_events(_args: &str, app: &mut App) -> anyhow::Result<()> {
    let count = app.plan.child_events.len();
    if count == 0 {
        app.set_status("No one-time events to clear");
        return Ok(());
    }
    app.request_confirm(
        PendingAction::ClearEvents,
        format!("Delete all {count} one-time events?"),
    );
    Ok(())
}

fn cmd_reset(_args: &str, app: &mut App) -> anyhow::Result<()> {
    app.request_confirm(PendingAction::Reset, "Discard all edits and restore the starting plan?");
    Ok(())
}

fn cmd_export(args: &str, app: &mut App) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        default_export_path(&app.projection)
    } else {
        std::path::PathBuf::from(crate::run::shellexpand(args))
    };

    match export_ledger(&path, &app.projection) {
        Ok(rows) => app.set_status(format!("Exported {rows} months to {}", path.display())),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "export failed");
            app.set_status(format!("Export failed: {e:#}"));
        }
    }
    Ok(())
}

