mod cli;
mod tui;

pub(crate) use cli::{as_cli, plan_from_args, shellexpand};
pub(crate) use tui::as_tui;
