// src/core/desktop_entry.rs

//! Loading of freedesktop `.desktop` entry files.
//!
//! Only the launch-relevant subset of the Desktop Entry Specification is
//! read: the `[Desktop Entry]` group, plain (non-localized) keys, and the
//! standard value escapes. Menu-definition (`.menu`) files are not handled
//! here; the menu layer builds its own trees.

use crate::{
    constants::{DESKTOP_ENTRY_GROUP, DESKTOP_ENTRY_SUFFIX},
    models::DesktopEntry,
};
use lazy_static::lazy_static;
use rayon::prelude::*;
use regex::Regex;
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

lazy_static! {
    // `Key=Value` with an optional locale suffix, e.g. `Name[fr]=Éditeur`.
    static ref ENTRY_LINE_RE: Regex =
        Regex::new(r"^([A-Za-z0-9-]+)(?:\[([^\]]+)\])?\s*=\s*(.*)$").unwrap();
}

#[derive(Error, Debug)]
pub enum DesktopEntryError {
    #[error("Failed to read desktop entry '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Desktop entry '{path}' has no [Desktop Entry] group.")]
    MissingGroup { path: String },
    #[error("Malformed line {line} in desktop entry '{path}'.")]
    MalformedLine { path: String, line: usize },
    #[error("Desktop entry '{path}' is missing the required '{key}' key.")]
    MissingKey { path: String, key: &'static str },
    #[error("Desktop entry '{path}' is of type '{entry_type}', not an application.")]
    NotAnApplication { path: String, entry_type: String },
    #[error("Desktop entry '{path}' is hidden and must be treated as deleted.")]
    Hidden { path: String },
}

/// Reads and parses a single `.desktop` file.
pub fn load(path: &Path) -> Result<DesktopEntry, DesktopEntryError> {
    let content = fs::read_to_string(path).map_err(|e| DesktopEntryError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(path, &content)
}

/// Parses desktop entry `content` attributed to `path`.
pub fn parse(path: &Path, content: &str) -> Result<DesktopEntry, DesktopEntryError> {
    let path_str = || path.display().to_string();

    let mut in_main_group = false;
    let mut seen_main_group = false;
    let mut entry_type: Option<String> = None;
    let mut hidden = false;
    let mut entry = DesktopEntry {
        source: path.to_path_buf(),
        ..DesktopEntry::default()
    };
    let mut exec: Option<String> = None;

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') {
            if !line.ends_with(']') {
                return Err(DesktopEntryError::MalformedLine {
                    path: path_str(),
                    line: index + 1,
                });
            }
            // Other groups (desktop actions etc.) are skipped wholesale.
            in_main_group = line == DESKTOP_ENTRY_GROUP;
            seen_main_group |= in_main_group;
            continue;
        }
        if !in_main_group {
            continue;
        }

        let caps =
            ENTRY_LINE_RE
                .captures(line)
                .ok_or_else(|| DesktopEntryError::MalformedLine {
                    path: path_str(),
                    line: index + 1,
                })?;
        if caps.get(2).is_some() {
            // Locale-suffixed values lose to the plain key.
            continue;
        }
        let key = caps.get(1).map_or("", |m| m.as_str());
        let value = caps.get(3).map_or("", |m| m.as_str());

        match key {
            "Type" => entry_type = Some(value.to_string()),
            "Name" => entry.name = Some(unescape_value(value)),
            "Comment" => entry.comment = Some(unescape_value(value)),
            "Icon" => entry.icon = Some(unescape_value(value)),
            // The Exec value keeps its escapes: quoting and escaping are
            // resolved by the Exec grammar, not the entry-file syntax.
            "Exec" => exec = Some(value.to_string()),
            "Terminal" => entry.terminal = value == "true",
            "NoDisplay" => entry.no_display = value == "true",
            "Hidden" => hidden = value == "true",
            "Path" => entry.working_dir = Some(PathBuf::from(unescape_value(value))),
            "Categories" => {
                entry.categories = value
                    .split(';')
                    .filter(|part| !part.is_empty())
                    .map(ToString::to_string)
                    .collect();
            }
            // Unknown keys are permitted and ignored.
            _ => {}
        }
    }

    if !seen_main_group {
        return Err(DesktopEntryError::MissingGroup { path: path_str() });
    }
    if hidden {
        return Err(DesktopEntryError::Hidden { path: path_str() });
    }
    match entry_type {
        Some(t) if t == "Application" => {}
        Some(t) => {
            return Err(DesktopEntryError::NotAnApplication {
                path: path_str(),
                entry_type: t,
            });
        }
        None => {
            return Err(DesktopEntryError::MissingKey {
                path: path_str(),
                key: "Type",
            });
        }
    }
    entry.exec = exec.ok_or_else(|| DesktopEntryError::MissingKey {
        path: path_str(),
        key: "Exec",
    })?;

    Ok(entry)
}

/// Scans `dirs` for launchable desktop entries, sorted by display name.
///
/// Directories earlier in the list take precedence: when two directories
/// provide the same file name, the later one is shadowed. Parsing is
/// fanned out across files; unreadable or malformed files are logged and
/// skipped, and `NoDisplay` entries are filtered out.
pub fn scan(dirs: &[PathBuf]) -> Vec<DesktopEntry> {
    let mut seen_ids: HashSet<std::ffi::OsString> = HashSet::new();
    let mut files: Vec<PathBuf> = Vec::new();
    for dir in dirs {
        for walk_entry in WalkDir::new(dir).follow_links(true) {
            let walk_entry = match walk_entry {
                Ok(e) => e,
                Err(e) => {
                    log::debug!("Skipping unreadable path under '{}': {}", dir.display(), e);
                    continue;
                }
            };
            if !walk_entry.file_type().is_file() {
                continue;
            }
            let file_path = walk_entry.into_path();
            let Some(file_name) = file_path.file_name() else {
                continue;
            };
            if !file_name
                .to_string_lossy()
                .ends_with(DESKTOP_ENTRY_SUFFIX)
            {
                continue;
            }
            if seen_ids.insert(file_name.to_os_string()) {
                files.push(file_path);
            }
        }
    }

    let mut entries: Vec<DesktopEntry> = files
        .par_iter()
        .filter_map(|file_path| match load(file_path) {
            Ok(entry) if entry.no_display => {
                log::debug!("Skipping NoDisplay entry '{}'", file_path.display());
                None
            }
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        })
        .collect();

    entries.sort_by(|a, b| a.display_name().cmp(b.display_name()));
    entries
}

fn unescape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => out.push(' '),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

// MARK: --- UNIT TESTS ---
