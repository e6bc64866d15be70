// src/core/application.rs

//! Command materialization for desktop applications.
//!
//! An [`Application`] wraps a [`DesktopEntry`] and turns its Exec string
//! into concrete argument vectors. The Exec string is parsed and mapped to
//! a [`LaunchPlan`] once, on first use; the plan is then expanded against
//! the target URIs of each launch call.

use crate::{
    constants::DEFAULT_TERMINAL_ARGS,
    core::grammar::{self, GrammarError},
    models::{DesktopEntry, ExecAst, FieldCode, Token},
    system::spawner::{self, SpawnError, SpawnOptions},
};
use std::process::Child;
use std::sync::OnceLock;
use thiserror::Error;

/// Signature of the Exec parser. Injectable so tests can substitute a
/// canned syntax tree for the real grammar.
pub type ExecParser = fn(&str) -> Result<ExecAst, GrammarError>;

/// Failure to derive a [`LaunchPlan`] from an entry's Exec string.
///
/// Detected lazily on the first materialization and memoized alongside the
/// plan: a malformed Exec string will not become valid on retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(
        "Malformed Exec entry: {count} target field codes present, at most one of %f, %F, %u, %U is allowed."
    )]
    MalformedExec { count: usize },
}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Spawn(#[from] SpawnError),
}

/// One element of the memoized base argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanArg {
    /// Appended verbatim to every materialized command.
    Literal(String),
    /// Placeholder for exactly one target URI (`%f` / `%u`).
    SingleTarget,
    /// Placeholder for the whole target list (`%F` / `%U`).
    AllTargets,
}

/// The memoized, context-substituted form of an Exec string: the argv
/// prefix (terminal wrapper plus executable) and the base argument list
/// with target placeholders still unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub executable: Vec<String>,
    pub arguments: Vec<PlanArg>,
}

impl LaunchPlan {
    /// Whether the plan consumes all targets in a single invocation.
    pub fn takes_all_targets(&self) -> bool {
        self.arguments.iter().any(|a| matches!(a, PlanArg::AllTargets))
    }
}

/// A launchable application defined by a desktop entry.
pub struct Application {
    entry: DesktopEntry,
    terminal_args: Vec<String>,
    parser: ExecParser,
    plan: OnceLock<Result<LaunchPlan, PlanError>>,
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("entry", &self.entry)
            .field("terminal_args", &self.terminal_args)
            .finish_non_exhaustive()
    }
}

impl Application {
    pub fn new(entry: DesktopEntry) -> Self {
        Self::with_options(entry, None, None)
    }

    /// Creates an application with an overridden terminal wrapper and/or
    /// Exec parser. `None` keeps the defaults.
    pub fn with_options(
        entry: DesktopEntry,
        terminal_args: Option<Vec<String>>,
        parser: Option<ExecParser>,
    ) -> Self {
        Self {
            entry,
            terminal_args: terminal_args.unwrap_or_else(|| {
                DEFAULT_TERMINAL_ARGS.iter().map(ToString::to_string).collect()
            }),
            parser: parser.unwrap_or(grammar::parse),
            plan: OnceLock::new(),
        }
    }

    pub fn entry(&self) -> &DesktopEntry {
        &self.entry
    }

    /// The name shown in menus.
    pub fn name(&self) -> &str {
        self.entry.display_name()
    }

    /// The memoized launch plan for this entry. Parsing and substitution
    /// happen on the first call; later calls return the cached result,
    /// including a cached failure.
    pub fn plan(&self) -> Result<&LaunchPlan, PlanError> {
        self.plan
            .get_or_init(|| self.build_plan())
            .as_ref()
            .map_err(Clone::clone)
    }

    fn build_plan(&self) -> Result<LaunchPlan, PlanError> {
        let ast = (self.parser)(&self.entry.exec)?;

        let mut executable = Vec::new();
        if self.entry.terminal {
            executable.extend(self.terminal_args.iter().cloned());
        }
        executable.push(ast.executable);

        // At most one target-accepting code, counting duplicates: `%f %f`
        // is as malformed as `%f %u`.
        let target_codes = ast
            .arguments
            .iter()
            .filter(|token| matches!(token, Token::Field(code) if code.takes_targets()))
            .count();
        if target_codes > 1 {
            return Err(PlanError::MalformedExec {
                count: target_codes,
            });
        }

        let mut arguments = Vec::new();
        for token in ast.arguments {
            match token {
                Token::Word(word) => arguments.push(PlanArg::Literal(word)),
                Token::Field(code) => self.substitute_field(code, &mut arguments),
            }
        }

        Ok(LaunchPlan {
            executable,
            arguments,
        })
    }

    fn substitute_field(&self, code: FieldCode, arguments: &mut Vec<PlanArg>) {
        match code {
            FieldCode::Icon => {
                if let Some(icon) = &self.entry.icon {
                    arguments.push(PlanArg::Literal("--icon".to_string()));
                    arguments.push(PlanArg::Literal(icon.clone()));
                }
            }
            FieldCode::Name => {
                if let Some(name) = &self.entry.name {
                    arguments.push(PlanArg::Literal(name.clone()));
                }
            }
            FieldCode::Location => {
                arguments.push(PlanArg::Literal(
                    self.entry.source.to_string_lossy().into_owned(),
                ));
            }
            code if code.takes_all_targets() => arguments.push(PlanArg::AllTargets),
            code if code.takes_targets() => arguments.push(PlanArg::SingleTarget),
            code => {
                // Deprecated codes pass through as no-ops.
                debug_assert!(code.is_deprecated());
                log::debug!(
                    "Dropping deprecated field code {} in '{}'",
                    code,
                    self.entry.source.display()
                );
            }
        }
    }

    /// Builds the concrete argument vector(s) for a launch with `targets`.
    ///
    /// A plan holding `%F`/`%U` yields exactly one command with every
    /// target expanded in place. Otherwise one command is built per
    /// target (the `%f`/`%u` placeholder, if present, receives that single
    /// target). With no targets at all, exactly one command is built with
    /// the placeholders dropped.
    pub fn build_commands(&self, targets: &[String]) -> Result<Vec<Vec<String>>, PlanError> {
        let plan = self.plan()?;

        let mut commands = Vec::new();
        if plan.takes_all_targets() || targets.is_empty() {
            commands.push(materialize(plan, targets));
        } else {
            for target in targets {
                commands.push(materialize(plan, std::slice::from_ref(target)));
            }
        }
        Ok(commands)
    }

    /// Launches this application with the provided target URIs, using the
    /// entry's working directory.
    pub fn launch(&self, targets: &[String]) -> Result<Vec<Child>, LaunchError> {
        let options = SpawnOptions {
            cwd: self.entry.working_dir.clone(),
            ..SpawnOptions::default()
        };
        self.launch_with(targets, &options)
    }

    /// Launches with explicit spawn options.
    ///
    /// Every materialized command is handed to the spawner exactly once.
    /// Sibling spawns are still attempted after a failure; the first
    /// failure is reported once the whole batch has been issued, with the
    /// handles of successful spawns discarded (their processes keep
    /// running).
    pub fn launch_with(
        &self,
        targets: &[String],
        options: &SpawnOptions,
    ) -> Result<Vec<Child>, LaunchError> {
        let commands = self.build_commands(targets)?;

        let mut children = Vec::with_capacity(commands.len());
        let mut first_failure: Option<SpawnError> = None;
        for command in &commands {
            match spawner::spawn(command, options) {
                Ok(child) => children.push(child),
                Err(e) => {
                    log::warn!("{}", e);
                    first_failure.get_or_insert(e);
                }
            }
        }

        match first_failure {
            Some(e) => Err(e.into()),
            None => Ok(children),
        }
    }
}

fn materialize(plan: &LaunchPlan, targets: &[String]) -> Vec<String> {
    let mut command = plan.executable.clone();
    for arg in &plan.arguments {
        match arg {
            PlanArg::Literal(value) => command.push(value.clone()),
            // SingleTarget receives a zero- or one-element slice by
            // construction; with no targets both placeholders vanish.
            PlanArg::SingleTarget | PlanArg::AllTargets => {
                command.extend(targets.iter().cloned());
            }
        }
    }
    command
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn entry(exec: &str) -> DesktopEntry {
        DesktopEntry {
            name: Some("Vim".to_string()),
            icon: Some("editor".to_string()),
            exec: exec.to_string(),
            source: "/apps/vim.desktop".into(),
            ..DesktopEntry::default()
        }
    }

    fn to_targets(targets: &[&str]) -> Vec<String> {
        targets.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_icon_name_and_single_target_substitution() {
        let app = Application::new(entry("vim %i %c %f"));
        let commands = app.build_commands(&to_targets(&["/tmp/a.txt"])).unwrap();
        assert_eq!(
            commands,
            vec![to_targets(&["vim", "--icon", "editor", "Vim", "/tmp/a.txt"])]
        );
    }

    #[test]
    fn test_all_targets_in_one_command() {
        let app = Application::new(entry("vim %F"));
        let commands = app
            .build_commands(&to_targets(&["/tmp/a.txt", "/tmp/b.txt"]))
            .unwrap();
        assert_eq!(
            commands,
            vec![to_targets(&["vim", "/tmp/a.txt", "/tmp/b.txt"])]
        );
    }

    #[test]
    fn test_one_command_per_target() {
        let app = Application::new(entry("vim %f"));
        let commands = app
            .build_commands(&to_targets(&["/tmp/a.txt", "/tmp/b.txt"]))
            .unwrap();
        assert_eq!(
            commands,
            vec![
                to_targets(&["vim", "/tmp/a.txt"]),
                to_targets(&["vim", "/tmp/b.txt"]),
            ]
        );
    }

    #[test]
    fn test_no_placeholder_still_spawns_once_per_target() {
        let app = Application::new(entry("vim"));
        let commands = app
            .build_commands(&to_targets(&["/tmp/a.txt", "/tmp/b.txt"]))
            .unwrap();
        assert_eq!(
            commands,
            vec![to_targets(&["vim"]), to_targets(&["vim"])]
        );
    }

    #[test]
    fn test_zero_targets_drop_placeholders() {
        let app = Application::new(entry("vim %f"));
        assert_eq!(app.build_commands(&[]).unwrap(), vec![to_targets(&["vim"])]);

        let app = Application::new(entry("vim %U"));
        assert_eq!(app.build_commands(&[]).unwrap(), vec![to_targets(&["vim"])]);
    }

    #[test]
    fn test_terminal_wrapper_is_prepended() {
        let mut top = entry("top");
        top.terminal = true;
        top.icon = None;
        let app = Application::new(top);
        assert_eq!(
            app.build_commands(&[]).unwrap(),
            vec![to_targets(&["x-terminal-emulator", "-e", "top"])]
        );
    }

    #[test]
    fn test_terminal_wrapper_override() {
        let mut top = entry("top");
        top.terminal = true;
        let app = Application::with_options(
            top,
            Some(to_targets(&["alacritty", "-e"])),
            None,
        );
        let plan = app.plan().unwrap();
        assert_eq!(plan.executable, to_targets(&["alacritty", "-e", "top"]));
    }

    #[test]
    fn test_two_distinct_target_codes_are_malformed() {
        let app = Application::new(entry(r#"vim "%u" foo %F"#));
        let err = app.build_commands(&[]).unwrap_err();
        assert_eq!(err, PlanError::MalformedExec { count: 2 });
    }

    #[test]
    fn test_duplicate_target_code_is_malformed() {
        let app = Application::new(entry("vim %f %f"));
        let err = app.plan().unwrap_err();
        assert_eq!(err, PlanError::MalformedExec { count: 2 });
    }

    #[test]
    fn test_malformed_regardless_of_targets_supplied() {
        let app = Application::new(entry("vim %f %U"));
        assert!(app.build_commands(&to_targets(&["/tmp/a.txt"])).is_err());
        assert!(app.build_commands(&[]).is_err());
    }

    #[test]
    fn test_deprecated_codes_are_dropped() {
        let app = Application::new(entry("vim %d %n foo %v %m"));
        assert_eq!(
            app.build_commands(&[]).unwrap(),
            vec![to_targets(&["vim", "foo"])]
        );
    }

    #[test]
    fn test_unset_icon_and_name_substitute_to_nothing() {
        let mut bare = entry("vim %i %c %k");
        bare.icon = None;
        bare.name = None;
        let app = Application::new(bare);
        assert_eq!(
            app.build_commands(&[]).unwrap(),
            vec![to_targets(&["vim", "/apps/vim.desktop"])]
        );
    }

    #[test]
    fn test_grammar_errors_surface() {
        let app = Application::new(entry(r#"vim "unterminated"#));
        assert!(matches!(
            app.plan().unwrap_err(),
            PlanError::Grammar(_)
        ));
    }

    static PARSE_CALLS: AtomicUsize = AtomicUsize::new(0);

    fn counting_parser(input: &str) -> Result<ExecAst, GrammarError> {
        PARSE_CALLS.fetch_add(1, Ordering::SeqCst);
        grammar::parse(input)
    }

    #[test]
    fn test_plan_is_memoized() {
        let app = Application::with_options(entry("vim %f"), None, Some(counting_parser));
        let before = PARSE_CALLS.load(Ordering::SeqCst);
        app.plan().unwrap();
        app.plan().unwrap();
        app.build_commands(&[]).unwrap();
        assert_eq!(PARSE_CALLS.load(Ordering::SeqCst), before + 1);
    }

    fn injected_parser(_input: &str) -> Result<ExecAst, GrammarError> {
        Ok(ExecAst {
            executable: "echo".to_string(),
            arguments: vec![Token::Word("injected".to_string())],
        })
    }

    #[test]
    fn test_parser_override_is_used() {
        let app = Application::with_options(entry("ignored"), None, Some(injected_parser));
        assert_eq!(
            app.build_commands(&[]).unwrap(),
            vec![to_targets(&["echo", "injected"])]
        );
    }
}
