// src/cli/handlers/tree.rs

use crate::{
    cli::handlers::commons,
    core::application::Application,
    menu::entry::MenuEntry,
};
use anyhow::Result;
use colored::Colorize;

/// Main entry point for the 'tree' command: render the application menu
/// as an ASCII tree, one line per entry with its source file.
pub fn handle(_args: Vec<String>) -> Result<()> {
    let config = commons::load_config()?;
    let menu_root = commons::build_application_menu(&config)?;

    println!("\n{}", menu_root.name().bold());
    let children = menu_root.children();
    for (index, child) in children.iter().enumerate() {
        let is_last = index == children.len() - 1;
        print_node(child, "", is_last);
    }
    Ok(())
}

/// Recursive function to print a tree node and its descendants.
fn print_node(node: &MenuEntry<Application>, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─ " } else { "├─ " };

    match node.value() {
        Some(app) => {
            let terminal_marker = if app.entry().terminal { " (terminal)" } else { "" };
            println!(
                "{}{}{} {}{}",
                prefix,
                connector,
                node.name().cyan(),
                format!("[{}]", app.entry().source.display()).dimmed(),
                terminal_marker.yellow()
            );
        }
        None => println!("{}{}{}", prefix, connector, node.name().bold()),
    }

    let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
    let children = node.children();
    for (index, child) in children.iter().enumerate() {
        let is_last_child = index == children.len() - 1;
        print_node(child, &child_prefix, is_last_child);
    }
}
