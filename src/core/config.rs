// src/core/config.rs

use crate::{
    constants::{CONFIG_FILENAME, DEFAULT_TERMINAL_ARGS},
    core::paths::{self, PathError},
    models::LauncherConfig,
};
use std::{fs, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("Failed to read configuration '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid launcher configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize default configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Loads `xlaunch.toml` from the config directory. On first run the file
/// does not exist yet; defaults are generated and written out so the user
/// has something to edit.
pub fn load_config() -> Result<LauncherConfig, ConfigError> {
    let config_path = paths::get_config_dir()?.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_config = LauncherConfig::default();
        let toml_string = toml::to_string_pretty(&default_config)?;
        fs::write(&config_path, toml_string).map_err(|e| ConfigError::Io {
            path: config_path.display().to_string(),
            source: e,
        })?;
        return Ok(default_config);
    }
    let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
        path: config_path.display().to_string(),
        source: e,
    })?;
    Ok(toml::from_str(&content)?)
}

impl LauncherConfig {
    /// The terminal wrapper prefix, split with shell-like word rules.
    /// Falls back to the built-in default when unset or unsplittable.
    pub fn terminal_args(&self) -> Vec<String> {
        if let Some(terminal) = self.terminal.as_deref() {
            match shlex::split(terminal) {
                Some(args) if !args.is_empty() => return args,
                _ => {
                    log::warn!(
                        "Ignoring unsplittable terminal setting '{}', using the default.",
                        terminal
                    );
                }
            }
        }
        DEFAULT_TERMINAL_ARGS.iter().map(ToString::to_string).collect()
    }

    /// The menu directories with `~` and environment variables expanded.
    /// Unexpandable templates are logged and skipped.
    pub fn expanded_menu_dirs(&self) -> Vec<PathBuf> {
        self.menu_dirs
            .iter()
            .filter_map(|template| match shellexpand::full(template) {
                Ok(expanded) => Some(PathBuf::from(expanded.into_owned())),
                Err(e) => {
                    log::warn!("Ignoring menu directory '{}': {}", template, e);
                    None
                }
            })
            .collect()
    }
}

// MARK: --- UNIT TESTS ---
