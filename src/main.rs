mod config;
mod error;
mod export;
mod input;
mod models;
mod projection;
mod run;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = config::init_logging() {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    match args.get(1).map(String::as_str) {
        None => start_tui(&[]),
        Some("--help" | "-h" | "--version" | "-V") => run::as_cli(&args),
        Some(flag) if flag.starts_with("--") => start_tui(&args[1..]),
        Some(command) => {
            tracing::info!(mode = "cli", command, "starting");
            run::as_cli(&args)
        }
    }
}

fn start_tui(flags: &[String]) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let (plan, positional) = run::plan_from_args(flags, today)?;
    if let Some(extra) = positional.first() {
        anyhow::bail!("Unexpected argument: {extra}");
    }
    tracing::info!(mode = "tui", start = %plan.start, "starting");
    run::as_tui(plan)
}
