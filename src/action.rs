//! Native actions backed by external programs.
//!
//! Each command's packaging behaviour is the program configured under its
//! name in `actions`. The program runs in the project root, receives the
//! build context as JSON on stdin and the version in `GMVAULT_VERSION`.

use crate::command::CommandDescriptor;
use crate::constants::VERSION_ENV;
use crate::context::BuildContext;
use crate::error::{Error, Result};
use crate::orchestrator::NativeAction;
use log::info;
use serde::Serialize;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};

/// Payload written to the action's stdin.
#[derive(Debug, Serialize)]
pub struct ActionInput<'a> {
    pub command: &'a str,
    pub version: &'a str,
    pub long_description: &'a str,
    pub project_root: &'a Path,
    pub rendered: Vec<&'a Path>,
}

impl<'a> ActionInput<'a> {
    pub fn new(command: &'a CommandDescriptor, context: &'a BuildContext) -> Self {
        Self {
            command: command.name,
            version: context.version.as_str(),
            long_description: &context.long_description,
            project_root: &context.project_root,
            rendered: context
                .templates
                .iter()
                .map(|t| t.destination_path.as_path())
                .collect(),
        }
    }
}

pub struct ProcessAction;

impl NativeAction for ProcessAction {
    fn run(&self, command: &CommandDescriptor, context: &BuildContext) -> Result<()> {
        let Some(argv) = context.config.actions.get(command.name) else {
            info!("No native action configured for '{}', nothing to run", command.name);
            return Ok(());
        };
        let (program, args) = argv.split_first().ok_or_else(|| {
            Error::ConfigError(format!("action for '{}' has no program", command.name))
        })?;

        let input = serde_json::to_string(&ActionInput::new(command, context))
            .map_err(|e| Error::ActionError(format!("cannot serialize build context: {e}")))?;

        info!("Running '{}': {}", command.name, argv.join(" "));
        let mut child = Command::new(program)
            .args(args)
            .current_dir(&context.project_root)
            .env(VERSION_ENV, context.version.as_str())
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::ActionError(format!("cannot start '{program}': {e}")))?;

        // stdin is closed before waiting so the child sees EOF, and the child
        // is always reaped, even when the write failed.
        let written = match child.stdin.take() {
            Some(stdin) => write_input(stdin, input.as_bytes()),
            None => Ok(()),
        };
        let status = child.wait()?;
        written.map_err(Error::IoError)?;
        if !status.success() {
            return Err(Error::ActionError(format!(
                "'{}' failed with status: {status}",
                command.name
            )));
        }
        Ok(())
    }
}

/// Writes the action input. Programs that ignore stdin may exit before it is
/// written, so a broken pipe is not an error.
fn write_input<W: Write>(mut stdin: W, input: &[u8]) -> std::io::Result<()> {
    match stdin.write_all(input) {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        result => result,
    }
}
