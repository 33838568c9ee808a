mod cli;
mod tui;

pub(crate) use cli::{as_cli, CliCommand};
pub(crate) use tui::as_tui;
