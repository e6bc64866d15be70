// src/menu/mod.rs

pub mod entry;
pub mod prompt;

use self::entry::MenuEntry;
use self::prompt::{Prompt, PromptError};

/// The choice label that ascends one level during navigation.
const PARENT_CHOICE: &str = "..";

/// Drives the interactive traversal of a menu tree.
///
/// Borrows the tree and the prompt; the menu itself holds no state between
/// calls, navigation state lives on the stack of one `choose_value` call.
pub struct Menu<'a, T> {
    root: &'a MenuEntry<T>,
    prompt: &'a dyn Prompt,
}

impl<'a, T> Menu<'a, T> {
    pub fn new(root: &'a MenuEntry<T>, prompt: &'a dyn Prompt) -> Self {
        Self { root, prompt }
    }

    /// Prompts until a leaf entry is chosen and returns its payload.
    ///
    /// Choosing a branch descends into it; choosing `..` ascends one
    /// level (only offered below the root). Returns `None` when the user
    /// cancels the prompt.
    pub fn choose_value(&self) -> Result<Option<&'a T>, PromptError> {
        let mut trail: Vec<&'a MenuEntry<T>> = vec![self.root];

        loop {
            let Some(&current) = trail.last() else {
                return Ok(None);
            };
            if current.is_leaf() {
                return Ok(current.value());
            }

            let has_parent = trail.len() > 1;
            let mut labels = Vec::with_capacity(current.children().len() + 1);
            if has_parent {
                labels.push(PARENT_CHOICE.to_string());
            }
            labels.extend(current.children().iter().map(|c| c.name().to_string()));

            let index = match self.prompt.choose_one(current.name(), &labels) {
                Ok(index) => index,
                Err(PromptError::Cancelled) => return Ok(None),
                Err(e) => return Err(e),
            };

            if has_parent && index == 0 {
                trail.pop();
                continue;
            }
            let child_index = if has_parent { index - 1 } else { index };
            let Some(child) = current.children().get(child_index) else {
                // Prompt returned an out-of-range index; ask again.
                continue;
            };
            if child.is_leaf() {
                return Ok(child.value());
            }
            trail.push(child);
        }
    }
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use super::prompt::tests::ScriptedPrompt;

    fn sample_tree() -> MenuEntry<i32> {
        MenuEntry::branch(
            "root",
            vec![
                MenuEntry::branch(
                    "docs",
                    vec![MenuEntry::leaf("a", 1), MenuEntry::leaf("b", 2)],
                ),
                MenuEntry::leaf("top", 3),
            ],
        )
    }

    #[test]
    fn test_choosing_a_leaf_returns_its_value() {
        let tree = sample_tree();
        let prompt = ScriptedPrompt::new(&[1]);
        let menu = Menu::new(&tree, &prompt);
        assert_eq!(menu.choose_value().unwrap(), Some(&3));
    }

    #[test]
    fn test_descending_into_a_branch() {
        let tree = sample_tree();
        // "docs", then its second leaf ("b": offset by the ".." entry).
        let prompt = ScriptedPrompt::new(&[0, 2]);
        let menu = Menu::new(&tree, &prompt);
        assert_eq!(menu.choose_value().unwrap(), Some(&2));
    }

    #[test]
    fn test_parent_choice_ascends() {
        let tree = sample_tree();
        // Descend into "docs", go back up with "..", then choose "top".
        let prompt = ScriptedPrompt::new(&[0, 0, 1]);
        let menu = Menu::new(&tree, &prompt);
        assert_eq!(menu.choose_value().unwrap(), Some(&3));
    }

    #[test]
    fn test_parent_choice_only_offered_below_root() {
        let tree = sample_tree();
        let prompt = ScriptedPrompt::new(&[0, 1]);
        let menu = Menu::new(&tree, &prompt);
        menu.choose_value().unwrap();

        let asked = prompt.asked.borrow();
        let root_labels = asked.first().unwrap();
        assert_eq!(root_labels, &vec!["docs".to_string(), "top".to_string()]);
        let docs_labels = asked.get(1).unwrap();
        assert_eq!(docs_labels.first().unwrap(), PARENT_CHOICE);
    }

    #[test]
    fn test_cancellation_returns_none() {
        let tree = sample_tree();
        let prompt = ScriptedPrompt::cancelled();
        let menu = Menu::new(&tree, &prompt);
        assert_eq!(menu.choose_value().unwrap(), None);
    }

    #[test]
    fn test_leaf_root_short_circuits() {
        let tree = MenuEntry::leaf("only", 9);
        let prompt = ScriptedPrompt::cancelled();
        let menu = Menu::new(&tree, &prompt);
        assert_eq!(menu.choose_value().unwrap(), Some(&9));
    }
}
