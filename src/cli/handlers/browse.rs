// src/cli/handlers/browse.rs

use crate::{cli::handlers::commons, menu::Menu, menu::entry::MenuEntry};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Main entry point for the 'browse' command: navigate a filesystem menu
/// rooted at the given directory (default: the current directory) and
/// print the chosen path, so the result can be piped to other tools.
pub fn handle(args: Vec<String>) -> Result<()> {
    let root_template = args.first().map(String::as_str).unwrap_or(".");
    let expanded = shellexpand::full(root_template)
        .with_context(|| format!("Cannot expand path '{}'", root_template))?;
    let root_path = dunce::canonicalize(PathBuf::from(expanded.into_owned()))
        .with_context(|| format!("Cannot resolve path '{}'", root_template))?;

    let root = MenuEntry::from_dir(&root_path)
        .with_context(|| format!("Cannot read directory '{}'", root_path.display()))?;

    let config = commons::load_config()?;
    let prompt = commons::make_prompt(&config);

    if let Some(path) = Menu::new(&root, prompt.as_ref()).choose_value()? {
        println!("{}", path.display());
    }
    Ok(())
}
