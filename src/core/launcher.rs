// src/core/launcher.rs

use crate::menu::{Menu, entry::MenuEntry, prompt::Prompt};
use anyhow::Result;

/// Couples a menu tree with the action to run on the chosen entry.
///
/// The launcher owns neither the prompting nor the action semantics; it
/// only wires the two together: navigate the tree, then hand the chosen
/// leaf's payload to the action.
pub struct Launcher<T, A>
where
    A: Fn(&T) -> Result<()>,
{
    root: MenuEntry<T>,
    prompt: Box<dyn Prompt>,
    action: A,
}

impl<T, A> Launcher<T, A>
where
    A: Fn(&T) -> Result<()>,
{
    pub fn new(root: MenuEntry<T>, prompt: Box<dyn Prompt>, action: A) -> Self {
        Self {
            root,
            prompt,
            action,
        }
    }

    /// Runs one choose-then-act cycle. Returns `false` when the user
    /// cancelled or the chosen leaf carries no payload.
    pub fn launch(&self) -> Result<bool> {
        let menu = Menu::new(&self.root, self.prompt.as_ref());
        match menu.choose_value()? {
            Some(value) => {
                (self.action)(value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// MARK: --- UNIT TESTS ---
