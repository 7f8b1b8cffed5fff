//! Command-line interface implementation for gmvault-build.
//! Provides argument parsing and help text formatting using clap.

use crate::command::{CommandKind, ExtendedOptionsCommand};
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for gmvault-build.
#[derive(Parser, Debug)]
#[command(author, version, about = "gmvault-build: prepare Gmvault sources for packaging", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: BuildCommand,

    /// Project directory holding the sources and templates
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".", global = true)]
    pub project_root: PathBuf,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Credential options accepted by every command.
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialArgs {
    /// INI file with `client_id` and `secret` in its [DEFAULT] section.
    /// Relative paths are resolved against the project directory.
    /// Takes precedence over --google-client-id/--google-secret
    #[arg(long = "google-credentials-file", value_name = "PATH")]
    pub credentials_file: Option<PathBuf>,

    /// Google OAuth client ID
    #[arg(long = "google-client-id", value_name = "ID")]
    pub client_id: Option<String>,

    /// Google OAuth client secret
    #[arg(long = "google-secret", value_name = "SECRET")]
    pub secret: Option<String>,
}

/// Wraps the shared credential options for one command.
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandArgs {
    #[command(flatten)]
    pub credentials: CredentialArgs,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum BuildCommand {
    /// Resolve credentials and render the source templates
    Credential(CommandArgs),
    /// Render the templates, then run the full build
    Build(CommandArgs),
    /// Render the templates, then compile the sources
    BuildSources(CommandArgs),
    /// Install from already rendered sources
    Install(CommandArgs),
    /// Install in development mode from already rendered sources
    Develop(CommandArgs),
}

impl BuildCommand {
    fn args(&self) -> &CommandArgs {
        match self {
            BuildCommand::Credential(args)
            | BuildCommand::Build(args)
            | BuildCommand::BuildSources(args)
            | BuildCommand::Install(args)
            | BuildCommand::Develop(args) => args,
        }
    }
}

impl ExtendedOptionsCommand for BuildCommand {
    fn kind(&self) -> CommandKind {
        match self {
            BuildCommand::Credential(_) => CommandKind::Credential,
            BuildCommand::Build(_) => CommandKind::Build,
            BuildCommand::BuildSources(_) => CommandKind::BuildSources,
            BuildCommand::Install(_) => CommandKind::Install,
            BuildCommand::Develop(_) => CommandKind::Develop,
        }
    }

    fn credential_args(&self) -> &CredentialArgs {
        &self.args().credentials
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 and the help text if no command is given
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument | ErrorKind::MissingSubcommand
            ) {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
