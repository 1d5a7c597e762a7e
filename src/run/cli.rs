use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

use crate::export::{default_export_path, export_ledger};
use crate::input::{parse_amount, parse_date, parse_loan, parse_signed_amount};
use crate::models::{PlanInput, RecurringExpense};
use crate::projection::{project, summarize, Projection};
use crate::ui::util::format_amount;

const VALUE_FLAGS: [&str; 5] = ["--start", "--balance", "--income", "--expenses", "--mortgage"];

pub(crate) fn as_cli(args: &[String]) -> Result<()> {
    let command = args.get(1).map_or("", String::as_str);
    let rest = args.get(2..).unwrap_or_default();
    match command {
        "summary" | "s" => cli_summary(rest),
        "monthly" | "m" => cli_monthly(rest),
        "export" => cli_export(rest),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("familyplan {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("FamilyPlan: six-year household cash-flow projection");
    println!();
    println!("Usage: familyplan [command] [options]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary                       Print yearly totals and projected savings");
    println!("  monthly                       Print the 72-month ledger");
    println!("  export [path]                 Write the monthly ledger to CSV");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Options (all commands, and the TUI):");
    println!("  --start <YYYY-MM>             First projected month (default: this month)");
    println!("  --balance <amount>            Starting balance, may be negative");
    println!("  --income <amount>             Monthly income");
    println!("  --expenses <amount>           Monthly living expenses");
    println!("  --mortgage <installment|none> Monthly housing loan installment");
    println!("  --no-child                    Plan without a child");
}

/// Builds the starting plan from the built-in defaults and any `--flag value` options.
///
/// Returns the plan and the positional arguments left over.
pub(crate) fn plan_from_args(args: &[String], today: NaiveDate) -> Result<(PlanInput, Vec<String>)> {
    let flag = |name: &str| -> Option<&str> {
        args.windows(2)
            .find(|w| w[0] == name)
            .map(|w| w[1].as_str())
    };

    let start = match flag("--start") {
        Some(value) => parse_date("start", value)?,
        None => today,
    };
    let mut plan = PlanInput::sample(start);

    if let Some(value) = flag("--balance") {
        plan.starting_balance = parse_signed_amount("balance", value)?;
    }
    if let Some(value) = flag("--income") {
        plan.income.amount = parse_amount("income.amount", value)?;
    }
    if let Some(value) = flag("--expenses") {
        plan.recurring = vec![RecurringExpense::new(
            "Living expenses".into(),
            parse_amount("recurring[0].amount", value)?,
        )];
    }
    if let Some(value) = flag("--mortgage") {
        plan.loan = match value {
            "none" | "0" => None,
            _ => Some(parse_loan(value, plan.start)?),
        };
    }
    if args.iter().any(|a| a == "--no-child") {
        plan.child = None;
    }
    plan.validate()?;

    let mut positional = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            if iter.next().is_none() {
                anyhow::bail!("Missing value for {arg}");
            }
        } else if arg == "--no-child" {
            continue;
        } else if arg.starts_with("--") {
            anyhow::bail!("Unknown option: {arg}");
        } else {
            positional.push(arg.clone());
        }
    }

    Ok((plan, positional))
}

fn load(args: &[String]) -> Result<(Projection, Vec<String>)> {
    let today = chrono::Local::now().date_naive();
    let (plan, positional) = plan_from_args(args, today)?;
    let projection = project(&plan).context("Failed to project plan")?;
    Ok((projection, positional))
}

fn cli_summary(args: &[String]) -> Result<()> {
    let (projection, _) = load(args)?;
    let summary = summarize(&projection)?;

    println!(
        "FamilyPlan: {} to {}",
        summary.years.first().map_or_else(String::new, |y| y.first_month.format("%Y-%m").to_string()),
        summary.years.last().map_or_else(String::new, |y| y.last_month.format("%Y-%m").to_string()),
    );
    println!("{}", "─".repeat(72));
    println!(
        "  {:<6} {:>15} {:>15} {:>15} {:>15}",
        "Year", "Income", "Expense", "Net", "End balance"
    );
    for year in &summary.years {
        println!(
            "  {:<6} {:>15} {:>15} {:>15} {:>15}",
            year.year,
            format_amount(year.income),
            format_amount(year.expense),
            format_amount(year.net),
            format_amount(year.ending_balance),
        );
    }
    println!("{}", "─".repeat(72));
    println!("  Starting balance:   {}", format_amount(summary.starting_balance));
    println!("  Projected savings:  {}", format_amount(summary.projected_savings));
    let lowest = projection
        .entries()
        .get(summary.lowest_month as usize)
        .map(|e| e.date.format("%Y-%m").to_string())
        .unwrap_or_default();
    println!(
        "  Lowest balance:     {} ({lowest})",
        format_amount(summary.lowest_balance)
    );
    if summary.has_deficit() {
        println!("  Warning: the balance goes negative in {lowest}");
    }
    Ok(())
}

fn cli_monthly(args: &[String]) -> Result<()> {
    let (projection, _) = load(args)?;

    println!(
        "{:<3} {:<8} {:>12} {:>12} {:>12} {:>14}",
        "#", "Month", "Income", "Expense", "Net", "Balance"
    );
    println!("{}", "─".repeat(66));
    for entry in projection.entries() {
        println!(
            "{:<3} {:<8} {:>12} {:>12} {:>12} {:>14}",
            entry.month,
            entry.date.format("%Y-%m").to_string(),
            format_amount(entry.total_income),
            format_amount(entry.total_expense),
            format_amount(entry.net),
            format_amount(entry.cumulative),
        );
    }
    Ok(())
}

fn cli_export(args: &[String]) -> Result<()> {
    let (projection, positional) = load(args)?;
    let path = positional
        .first()
        .map(|p| PathBuf::from(shellexpand(p)))
        .unwrap_or_else(|| default_export_path(&projection));

    let rows = export_ledger(&path, &projection)?;
    println!("Exported {rows} months to {}", path.display());
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
