// src/cli/handlers/commons.rs

//! Helpers shared by the CLI handlers: configuration loading, application
//! menu construction and prompt selection.

use crate::{
    core::{application::Application, config, desktop_entry},
    menu::{
        entry::MenuEntry,
        prompt::{LinePrompt, Prompt, SelectPrompt},
    },
    models::{LauncherConfig, PromptKind},
};
use anyhow::{Context, Result, anyhow};
use colored::Colorize;

/// Loads the launcher configuration, writing defaults on first run.
pub fn load_config() -> Result<LauncherConfig> {
    config::load_config().context("Failed to load the launcher configuration")
}

/// Scans the configured directories and builds the application menu.
pub fn build_application_menu(config: &LauncherConfig) -> Result<MenuEntry<Application>> {
    let dirs = config.expanded_menu_dirs();
    if dirs.is_empty() {
        return Err(anyhow!(
            "No usable menu directories configured. Check '{}' in your configuration.",
            "menu_dirs".cyan()
        ));
    }

    let entries = desktop_entry::scan(&dirs);
    log::debug!("Found {} launchable desktop entries.", entries.len());
    if entries.is_empty() {
        let searched: Vec<String> = dirs
            .iter()
            .map(|dir| dir.display().to_string())
            .collect();
        return Err(anyhow!(
            "No desktop entries found under: {}.",
            searched.join(", ").yellow()
        ));
    }

    Ok(MenuEntry::from_applications(
        "Applications",
        entries,
        &config.terminal_args(),
    ))
}

/// Instantiates the configured prompt backend.
pub fn make_prompt(config: &LauncherConfig) -> Box<dyn Prompt> {
    match config.prompt {
        PromptKind::Select => Box::new(SelectPrompt),
        PromptKind::Line => Box::new(LinePrompt::default()),
    }
}
