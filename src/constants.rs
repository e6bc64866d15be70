// src/constants.rs

/// The name of the directory containing xlaunch configuration (inside the
/// user's config dir).
pub const CONFIG_DIR_NAME: &str = "xlaunch";

/// The name of the launcher configuration file (inside the config dir).
pub const CONFIG_FILENAME: &str = "xlaunch.toml";

/// File suffix identifying desktop entry files.
pub const DESKTOP_ENTRY_SUFFIX: &str = ".desktop";

/// Group header opening the main section of a desktop entry file.
pub const DESKTOP_ENTRY_GROUP: &str = "[Desktop Entry]";

/// Terminal wrapper prepended for `Terminal=true` entries when no override
/// is configured. Works on any setup implementing the Debian alternatives
/// system.
pub const DEFAULT_TERMINAL_ARGS: &[&str] = &["x-terminal-emulator", "-e"];

/// Directories scanned for desktop entries by default, in precedence order.
pub const DEFAULT_MENU_DIRS: &[&str] = &[
    "~/.local/share/applications",
    "/usr/share/applications",
];
