// src/menu/entry.rs

use crate::core::application::Application;
use crate::models::DesktopEntry;
use serde_json::Value;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// A named node of a menu tree, optionally carrying a payload value.
///
/// Branches hold children; a node without children is a leaf and is what
/// menu navigation ultimately resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry<T> {
    name: String,
    value: Option<T>,
    children: Vec<MenuEntry<T>>,
}

impl<T> MenuEntry<T> {
    pub fn leaf(name: impl Into<String>, value: T) -> Self {
        Self {
            name: name.into(),
            value: Some(value),
            children: Vec::new(),
        }
    }

    pub fn branch(name: impl Into<String>, children: Vec<MenuEntry<T>>) -> Self {
        Self {
            name: name.into(),
            value: None,
            children,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn children(&self) -> &[MenuEntry<T>] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn push(&mut self, child: MenuEntry<T>) {
        self.children.push(child);
    }
}

impl MenuEntry<PathBuf> {
    /// Builds a menu tree mirroring a directory, children sorted by name.
    ///
    /// The whole subtree is read eagerly, so pointing this at a very large
    /// directory hierarchy costs memory up front. Every node carries its
    /// path; an empty directory is a leaf like any file.
    pub fn from_dir(path: &Path) -> io::Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut node = Self {
            name,
            value: Some(path.to_path_buf()),
            children: Vec::new(),
        };

        if path.is_dir() {
            let mut dir_entries: Vec<PathBuf> = fs::read_dir(path)?
                .map(|res| res.map(|e| e.path()))
                .collect::<io::Result<_>>()?;
            dir_entries.sort();
            for child_path in dir_entries {
                node.push(Self::from_dir(&child_path)?);
            }
        }

        Ok(node)
    }
}

impl MenuEntry<String> {
    /// Builds a menu tree from a nested JSON mapping: objects become
    /// branches, anything else becomes a leaf holding the value's string
    /// form.
    pub fn from_json(name: &str, data: &Value) -> Self {
        match data {
            Value::Object(map) => Self::branch(
                name,
                map.iter()
                    .map(|(key, value)| Self::from_json(key, value))
                    .collect(),
            ),
            Value::String(s) => Self::leaf(name, s.clone()),
            other => Self::leaf(name, other.to_string()),
        }
    }
}

impl MenuEntry<Application> {
    /// A flat, name-sorted menu of launchable applications.
    pub fn from_applications(
        name: &str,
        entries: Vec<DesktopEntry>,
        terminal_args: &[String],
    ) -> Self {
        let mut apps: Vec<Application> = entries
            .into_iter()
            .map(|entry| {
                Application::with_options(entry, Some(terminal_args.to_vec()), None)
            })
            .collect();
        apps.sort_by(|a, b| a.name().cmp(b.name()));

        Self {
            name: name.to_string(),
            value: None,
            children: apps
                .into_iter()
                .map(|app| MenuEntry {
                    name: app.name().to_string(),
                    value: Some(app),
                    children: Vec::new(),
                })
                .collect(),
        }
    }
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_leaf_and_branch_shape() {
        let tree = MenuEntry::branch("root", vec![MenuEntry::leaf("child", 1)]);
        assert!(!tree.is_leaf());
        assert!(tree.value().is_none());
        let child = tree.children().first().unwrap();
        assert!(child.is_leaf());
        assert_eq!(child.value(), Some(&1));
    }

    #[test]
    fn test_from_dir_mirrors_the_filesystem() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        File::create(dir.path().join("docs/a.txt")).unwrap();
        File::create(dir.path().join("b.txt")).unwrap();

        let tree = MenuEntry::from_dir(dir.path()).unwrap();
        let names: Vec<&str> = tree.children().iter().map(MenuEntry::name).collect();
        assert_eq!(names, vec!["b.txt", "docs"]);

        let docs = tree.children().get(1).unwrap();
        assert!(!docs.is_leaf());
        assert_eq!(docs.children().first().unwrap().name(), "a.txt");
        assert_eq!(
            docs.children().first().unwrap().value(),
            Some(&dir.path().join("docs/a.txt"))
        );
    }

    #[test]
    fn test_from_json_maps_objects_to_branches() {
        let data: Value = serde_json::from_str(
            r#"{"editors": {"vim": "vim %f", "emacs": "emacs"}, "top": "top"}"#,
        )
        .unwrap();
        let tree = MenuEntry::from_json("root", &data);

        assert_eq!(tree.children().len(), 2);
        let editors = tree
            .children()
            .iter()
            .find(|c| c.name() == "editors")
            .unwrap();
        assert_eq!(editors.children().len(), 2);
        let vim = editors
            .children()
            .iter()
            .find(|c| c.name() == "vim")
            .unwrap();
        assert_eq!(vim.value(), Some(&"vim %f".to_string()));

        let top = tree.children().iter().find(|c| c.name() == "top").unwrap();
        assert!(top.is_leaf());
    }

    #[test]
    fn test_from_json_scalar_leaves_use_string_form() {
        let tree = MenuEntry::from_json("answer", &Value::from(42));
        assert_eq!(tree.value(), Some(&"42".to_string()));
    }

    #[test]
    fn test_from_applications_sorts_by_display_name() {
        let entries = vec![
            DesktopEntry {
                name: Some("Zed".to_string()),
                exec: "zed".to_string(),
                source: "/apps/zed.desktop".into(),
                ..DesktopEntry::default()
            },
            DesktopEntry {
                name: Some("AbiWord".to_string()),
                exec: "abiword".to_string(),
                source: "/apps/abiword.desktop".into(),
                ..DesktopEntry::default()
            },
        ];
        let menu = MenuEntry::from_applications("Applications", entries, &[]);
        let names: Vec<&str> = menu.children().iter().map(MenuEntry::name).collect();
        assert_eq!(names, vec!["AbiWord", "Zed"]);
    }
}
