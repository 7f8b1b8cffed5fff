//! Build command descriptors.
//!
//! Every command accepts the same three credential options and runs a fixed
//! sequence of steps. Commands that compile sources list the credential step
//! ahead of their native action, directly or through a sub-command.

use crate::cli::CredentialArgs;
use std::fmt;

/// The credential options shared by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraOption {
    CredentialsFile,
    ClientId,
    Secret,
}

impl ExtraOption {
    pub fn flag(self) -> &'static str {
        match self {
            ExtraOption::CredentialsFile => "--google-credentials-file",
            ExtraOption::ClientId => "--google-client-id",
            ExtraOption::Secret => "--google-secret",
        }
    }
}

pub const EXTENDED_OPTIONS: &[ExtraOption] = &[
    ExtraOption::CredentialsFile,
    ExtraOption::ClientId,
    ExtraOption::Secret,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Resolve credentials and render templates, once per invocation.
    CredentialStep,
    /// Run the steps of another command.
    SubCommand(CommandKind),
    /// The command's own packaging behaviour.
    NativeAction,
}

/// Static description of a build command. Fixed at compile time.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub extra_options: &'static [ExtraOption],
    pub requires_credential_step: bool,
    pub steps: &'static [Step],
}

impl CommandDescriptor {
    /// Whether the credential step is reached from this command's steps,
    /// following sub-commands.
    pub fn reaches_credential_step(&self) -> bool {
        self.steps.iter().any(|step| match step {
            Step::CredentialStep => true,
            Step::SubCommand(kind) => kind.descriptor().reaches_credential_step(),
            Step::NativeAction => false,
        })
    }

    /// Steps in execution order with sub-commands expanded. Each native
    /// action is paired with the command it belongs to.
    pub fn flattened_steps(&'static self) -> Vec<(&'static CommandDescriptor, Step)> {
        let mut steps = Vec::new();
        for step in self.steps {
            match step {
                Step::SubCommand(kind) => steps.extend(kind.descriptor().flattened_steps()),
                _ => steps.push((self, *step)),
            }
        }
        steps
    }

    /// Whether no credential step is scheduled after a native action.
    pub fn is_well_ordered(&'static self) -> bool {
        let steps = self.flattened_steps();
        match steps.iter().position(|(_, step)| *step == Step::NativeAction) {
            Some(first_native) => !steps[first_native..]
                .iter()
                .any(|(_, step)| *step == Step::CredentialStep),
            None => true,
        }
    }
}

pub static CREDENTIAL: CommandDescriptor = CommandDescriptor {
    name: "credential",
    extra_options: EXTENDED_OPTIONS,
    requires_credential_step: true,
    steps: &[Step::CredentialStep],
};

pub static BUILD_SOURCES: CommandDescriptor = CommandDescriptor {
    name: "build-sources",
    extra_options: EXTENDED_OPTIONS,
    requires_credential_step: true,
    steps: &[Step::CredentialStep, Step::NativeAction],
};

pub static BUILD: CommandDescriptor = CommandDescriptor {
    name: "build",
    extra_options: EXTENDED_OPTIONS,
    requires_credential_step: true,
    steps: &[Step::SubCommand(CommandKind::BuildSources), Step::NativeAction],
};

pub static INSTALL: CommandDescriptor = CommandDescriptor {
    name: "install",
    extra_options: EXTENDED_OPTIONS,
    requires_credential_step: false,
    steps: &[Step::NativeAction],
};

pub static DEVELOP: CommandDescriptor = CommandDescriptor {
    name: "develop",
    extra_options: EXTENDED_OPTIONS,
    requires_credential_step: false,
    steps: &[Step::NativeAction],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Credential,
    Build,
    BuildSources,
    Install,
    Develop,
}

impl CommandKind {
    pub const ALL: [CommandKind; 5] = [
        CommandKind::Credential,
        CommandKind::Build,
        CommandKind::BuildSources,
        CommandKind::Install,
        CommandKind::Develop,
    ];

    pub fn descriptor(self) -> &'static CommandDescriptor {
        match self {
            CommandKind::Credential => &CREDENTIAL,
            CommandKind::Build => &BUILD,
            CommandKind::BuildSources => &BUILD_SOURCES,
            CommandKind::Install => &INSTALL,
            CommandKind::Develop => &DEVELOP,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.descriptor().name == name)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().name)
    }
}

/// A command carrying the shared credential options.
///
/// Implementors wrap [`CredentialArgs`] rather than redeclaring the flags,
/// so the option set stays identical across commands.
pub trait ExtendedOptionsCommand {
    fn kind(&self) -> CommandKind;

    fn credential_args(&self) -> &CredentialArgs;

    fn descriptor(&self) -> &'static CommandDescriptor {
        self.kind().descriptor()
    }
}
