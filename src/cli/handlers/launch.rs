// src/cli/handlers/launch.rs

use crate::{
    cli::handlers::commons,
    core::{application::Application, launcher::Launcher},
};
use anyhow::Result;
use colored::Colorize;

/// Main entry point for the 'launch' command. All arguments are target
/// URIs passed to the chosen application.
pub fn handle(args: Vec<String>) -> Result<()> {
    let targets = args;

    let config = commons::load_config()?;
    let menu_root = commons::build_application_menu(&config)?;
    let prompt = commons::make_prompt(&config);

    let launcher = Launcher::new(menu_root, prompt, |app: &Application| {
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
    });

    if !launcher.launch()? {
        println!("{}", "Nothing chosen.".dimmed());
    }
    Ok(())
}
