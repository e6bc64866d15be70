// src/models.rs

use crate::constants::{DEFAULT_MENU_DIRS, DEFAULT_TERMINAL_ARGS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// --- EXEC AST MODELS ---
// The parsed form of a desktop entry's Exec string. Produced by
// `core::grammar`, consumed by `core::application`.

/// A field code placeholder recognized in an Exec string (`%f`, `%U`, ...).
///
/// The deprecated codes are still accepted by the grammar for compatibility
/// with old entries, but the materializer drops them without substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCode {
    /// `%f`: a single file target.
    File,
    /// `%F`: the whole list of file targets.
    FileList,
    /// `%u`: a single URL target.
    Url,
    /// `%U`: the whole list of URL targets.
    UrlList,
    /// `%d` (deprecated).
    Directory,
    /// `%D` (deprecated).
    DirectoryList,
    /// `%n` (deprecated).
    Filename,
    /// `%N` (deprecated).
    FilenameList,
    /// `%i`: expands to `--icon <Icon>` when the entry has an icon.
    Icon,
    /// `%c`: the entry's display name.
    Name,
    /// `%k`: the path of the backing desktop entry file.
    Location,
    /// `%v` (deprecated).
    Device,
    /// `%m` (deprecated).
    MiniIcon,
}

impl FieldCode {
    /// Maps a field code letter to its code, `None` for unknown letters.
    pub fn from_char(letter: char) -> Option<Self> {
        match letter {
            'f' => Some(Self::File),
            'F' => Some(Self::FileList),
            'u' => Some(Self::Url),
            'U' => Some(Self::UrlList),
            'd' => Some(Self::Directory),
            'D' => Some(Self::DirectoryList),
            'n' => Some(Self::Filename),
            'N' => Some(Self::FilenameList),
            'i' => Some(Self::Icon),
            'c' => Some(Self::Name),
            'k' => Some(Self::Location),
            'v' => Some(Self::Device),
            'm' => Some(Self::MiniIcon),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::File => 'f',
            Self::FileList => 'F',
            Self::Url => 'u',
            Self::UrlList => 'U',
            Self::Directory => 'd',
            Self::DirectoryList => 'D',
            Self::Filename => 'n',
            Self::FilenameList => 'N',
            Self::Icon => 'i',
            Self::Name => 'c',
            Self::Location => 'k',
            Self::Device => 'v',
            Self::MiniIcon => 'm',
        }
    }

    /// True for the codes that accept launch targets (`%f %F %u %U`).
    /// An Exec string may contain at most one of these.
    pub fn takes_targets(self) -> bool {
        matches!(
            self,
            Self::File | Self::FileList | Self::Url | Self::UrlList
        )
    }

    /// True for the list-valued target codes (`%F %U`), which consume all
    /// targets in a single invocation.
    pub fn takes_all_targets(self) -> bool {
        matches!(self, Self::FileList | Self::UrlList)
    }

    /// True for the codes the Desktop Entry Specification deprecates.
    pub fn is_deprecated(self) -> bool {
        matches!(
            self,
            Self::Directory
                | Self::DirectoryList
                | Self::Filename
                | Self::FilenameList
                | Self::Device
                | Self::MiniIcon
        )
    }
}

impl fmt::Display for FieldCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.as_char())
    }
}

/// A single parsed argument of an Exec string.
///
/// Quoting is resolved at parse time: a quoted word and an unquoted word
/// with the same characters produce identical tokens, and `"%u"` parses to
/// the same token as a bare `%u`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    Field(FieldCode),
}

/// The abstract syntax tree of an Exec string.
///
/// The executable production only accepts word expressions, so
/// `executable` is always a resolved literal, never a field code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecAst {
    pub executable: String,
    pub arguments: Vec<Token>,
}

// --- DESKTOP ENTRY MODELS ---

/// The launch-relevant fields of a desktop entry file.
///
/// This is the context record the materializer substitutes field codes
/// against. It is immutable for the lifetime of the owning application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DesktopEntry {
    /// Display name (`Name` key).
    pub name: Option<String>,
    /// Icon identifier (`Icon` key).
    pub icon: Option<String>,
    /// The raw Exec string, still in Exec-grammar form.
    pub exec: String,
    /// Path of the backing `.desktop` file (substituted for `%k`).
    pub source: PathBuf,
    /// `Terminal` key: whether to wrap the command in a terminal emulator.
    pub terminal: bool,
    /// `Path` key: working directory for the spawned process.
    pub working_dir: Option<PathBuf>,
    /// `Comment` key.
    pub comment: Option<String>,
    /// `Categories` key, split on `;`.
    pub categories: Vec<String>,
    /// `NoDisplay` key: the entry is launchable but excluded from menus.
    pub no_display: bool,
}

impl DesktopEntry {
    /// The name shown in menus: the `Name` key, or the file stem of the
    /// backing file when the entry has no name.
    pub fn display_name(&self) -> &str {
        if let Some(name) = &self.name {
            return name;
        }
        self.source
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("(unnamed)")
    }
}

// --- CONFIGURATION MODELS (xlaunch.toml) ---

/// Which prompt backend drives menu selection.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    /// Arrow-key selection (dialoguer).
    #[default]
    Select,
    /// Plain line-oriented stdin prompt.
    Line,
}

/// Deserialized structure of `xlaunch.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LauncherConfig {
    /// Terminal wrapper command line for `Terminal=true` entries, split
    /// with shell-like word rules. `None` keeps the built-in default.
    pub terminal: Option<String>,
    /// Directories scanned for desktop entries, in precedence order.
    /// `~` and environment variables are expanded.
    #[serde(default)]
    pub menu_dirs: Vec<String>,
    #[serde(default)]
    pub prompt: PromptKind,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            terminal: Some(DEFAULT_TERMINAL_ARGS.join(" ")),
            menu_dirs: DEFAULT_MENU_DIRS.iter().map(ToString::to_string).collect(),
            prompt: PromptKind::default(),
        }
    }
}
