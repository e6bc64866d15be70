// src/cli/handlers/run.rs

use crate::{
    cli::handlers::commons,
    core::{application::Application, desktop_entry},
};
use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use std::path::PathBuf;

/// Main entry point for the 'run' command: launch one desktop entry file
/// directly, without going through a menu. The first argument is the
/// `.desktop` file, the rest are target URIs.
pub fn handle(mut args: Vec<String>) -> Result<()> {
    if args.is_empty() {
        return Err(anyhow!(
            "'{}' requires the path to a .desktop file.",
            "run".cyan()
        ));
    }
    let path = PathBuf::from(args.remove(0));
    let targets = args;

    let config = commons::load_config()?;
    let entry = desktop_entry::load(&path)
        .with_context(|| format!("Cannot launch '{}'", path.display()))?;

    let app = Application::with_options(entry, Some(config.terminal_args()), None);
    let children = app.launch(&targets)?;
    for child in &children {
        log::debug!("Spawned process {} for '{}'.", child.id(), app.name());
    }
    println!(
        "{} {} ({} process{})",
        "Launched".green().bold(),
        app.name().cyan(),
        children.len(),
        if children.len() == 1 { "" } else { "es" }
    );
    Ok(())
}
