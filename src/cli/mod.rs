// src/cli/mod.rs

use clap::Parser;

pub mod handlers;

/// xlaunch: a menu-driven application launcher for freedesktop
/// environments.
///
/// Valid formats:
/// - `xlaunch` — scan for applications, pick one from the menu, launch it.
/// - `xlaunch <target>...` — same, passing the targets as URIs.
/// - `xlaunch launch [targets...]` — the explicit spelling of the above.
/// - `xlaunch run <file.desktop> [targets...]` — launch one entry directly.
/// - `xlaunch browse [dir]` — navigate a directory menu, print the choice.
/// - `xlaunch tree` — render the application menu as a tree.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// The action to perform (`launch`, `run`, `browse`, `tree`).
    ///
    /// Anything that is not a known action is treated as a target URI
    /// for `launch`.
    pub action: Option<String>,

    /// Remaining arguments for the action: target URIs for `launch` and
    /// `run`, the starting directory for `browse`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}
