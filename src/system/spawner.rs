// src/system/spawner.rs

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Child, Command as StdCommand, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpawnError {
    #[error("No command specified to spawn.")]
    EmptyCommand,
    #[error("Command '{command}' could not be spawned: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Options forwarded to the spawned process.
#[derive(Debug, Clone, Default)]
pub struct SpawnOptions {
    /// Working directory; inherited from the launcher when `None`.
    pub cwd: Option<PathBuf>,
    /// Extra environment variables, merged over the inherited environment.
    pub env: HashMap<String, String>,
}

/// Spawns `argv` as a detached child process and returns its handle.
///
/// The launched application never shares the launcher's stdin; stdout and
/// stderr are inherited so terminal applications stay usable. Waiting on
/// or killing the child is the caller's responsibility.
pub fn spawn(argv: &[String], options: &SpawnOptions) -> Result<Child, SpawnError> {
    let (program, args) = argv.split_first().ok_or(SpawnError::EmptyCommand)?;

    let mut command = StdCommand::new(program);
    command
        .args(args)
        .envs(&options.env)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(cwd) = &options.cwd {
        command.current_dir(dunce::simplified(cwd));
    }

    log::debug!("Spawning '{}'", argv.join(" "));
    command.spawn().map_err(|e| SpawnError::Io {
        command: argv.join(" "),
        source: e,
    })
}

// MARK: --- UNIT TESTS ---
