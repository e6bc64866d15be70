// src/bin/xlaunch.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use xlaunch::{
    cli::{Cli, handlers},
    menu::prompt::PromptError,
};

// --- Command Definition and Registry ---

/// Defines a system command, its aliases, and its handler function.
/// The handler signature is kept consistent across all commands for
/// simplicity in the registry.
struct CommandDefinition {
    name: &'static str,
    aliases: &'static [&'static str],
    handler: fn(Vec<String>) -> Result<()>,
}

/// The single source of truth for all commands. To add a new command,
/// simply add a new entry to this static array.
static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "browse",
        aliases: &[],
        handler: handlers::browse::handle,
    },
    CommandDefinition {
        name: "launch",
        aliases: &[],
        handler: handlers::launch::handle,
    },
    CommandDefinition {
        name: "run",
        aliases: &["exec"],
        handler: handlers::run::handle,
    },
    CommandDefinition {
        name: "tree",
        aliases: &["ls"],
        handler: handlers::tree::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// The main entry point of the `xlaunch` application.
/// It sets up logging, parses arguments, dispatches to the correct
/// handler, and performs centralized error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        // A cancelled prompt is a deliberate user action, not a failure:
        // exit quietly with the standard exit code for interruption.
        if let Some(prompt_err) = e.downcast_ref::<PromptError>()
            && matches!(prompt_err, PromptError::Cancelled)
        {
            std::process::exit(130);
        }

        eprintln!("\n{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// The main application dispatcher.
///
/// The first argument selects the action; anything that is not a known
/// action is treated as a target URI for the default `launch` action.
fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    let (action_name, action_args) = match cli.action {
        None => ("launch".to_string(), Vec::new()),
        Some(first) => {
            if find_command(&first).is_some() {
                (first, cli.args)
            } else {
                // Shortcut: `xlaunch <target>...` is `xlaunch launch <target>...`
                let mut launch_args = vec![first];
                launch_args.extend(cli.args);
                ("launch".to_string(), launch_args)
            }
        }
    };

    if let Some(command) = find_command(&action_name) {
        (command.handler)(action_args)
    } else {
        handlers::launch::handle(action_args)
    }
}
