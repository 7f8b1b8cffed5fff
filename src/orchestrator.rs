//! Build invocation orchestration.
//!
//! One invocation runs one command through
//! `Start -> OptionsBound -> [CredentialStep] -> NativeAction -> Done`,
//! with `Aborted` reachable from any non-terminal state on a fatal error.

use crate::cli::CredentialArgs;
use crate::command::{CommandDescriptor, ExtendedOptionsCommand, Step};
use crate::context::BuildContext;
use crate::credentials::{maybe_write_default_credentials_file, CredentialConfig, CredentialResolver};
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::template::render_templates;
use log::{debug, error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationState {
    Start,
    OptionsBound,
    CredentialStep,
    NativeAction,
    Done,
    Aborted,
}

impl InvocationState {
    pub fn is_terminal(self) -> bool {
        matches!(self, InvocationState::Done | InvocationState::Aborted)
    }

    pub fn can_transition_to(self, next: InvocationState) -> bool {
        use InvocationState as S;
        match (self, next) {
            (S::Done | S::Aborted, _) => false,
            (_, S::Aborted) => true,
            (S::Start, S::OptionsBound) => true,
            (S::OptionsBound, S::CredentialStep | S::NativeAction | S::Done) => true,
            (S::CredentialStep, S::NativeAction | S::Done) => true,
            (S::NativeAction, S::NativeAction | S::Done) => true,
            _ => false,
        }
    }
}

/// Resolves credentials and renders templates before a native action.
pub trait CredentialStep {
    fn run(&self, options: &CredentialArgs, context: &BuildContext) -> Result<CredentialConfig>;
}

/// A command's own packaging behaviour.
pub trait NativeAction {
    fn run(&self, command: &CommandDescriptor, context: &BuildContext) -> Result<()>;
}

/// The real credential step: resolve, render every template, then save
/// command-line credentials to the default file if enabled.
pub struct ResolveAndRender<R: TemplateRenderer> {
    renderer: R,
}

impl<R: TemplateRenderer> ResolveAndRender<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }
}

impl<R: TemplateRenderer> CredentialStep for ResolveAndRender<R> {
    fn run(&self, options: &CredentialArgs, context: &BuildContext) -> Result<CredentialConfig> {
        let resolver = CredentialResolver::new(context.default_credentials_path());
        // Relative paths name a file inside the project, like the default file.
        let credentials_file = options
            .credentials_file
            .as_ref()
            .map(|path| context.project_root.join(path));
        let creds = resolver.resolve(
            options.client_id.as_deref(),
            options.secret.as_deref(),
            credentials_file.as_deref(),
        )?;

        render_templates(&self.renderer, &context.templates, &creds)?;

        if context.config.write_default_credentials {
            maybe_write_default_credentials_file(&creds, resolver.default_file())?;
        }
        Ok(creds)
    }
}

/// The record of one build invocation.
#[derive(Debug)]
pub struct Invocation {
    command: &'static str,
    trace: Vec<InvocationState>,
    credentials: Option<CredentialConfig>,
}

impl Invocation {
    pub fn new(command: &'static str) -> Self {
        Self {
            command,
            trace: vec![InvocationState::Start],
            credentials: None,
        }
    }

    pub fn command(&self) -> &'static str {
        self.command
    }

    pub fn state(&self) -> InvocationState {
        self.trace.last().copied().unwrap_or(InvocationState::Start)
    }

    /// Every state visited, in order.
    pub fn trace(&self) -> &[InvocationState] {
        &self.trace
    }

    pub fn credentials(&self) -> Option<&CredentialConfig> {
        self.credentials.as_ref()
    }

    fn transition(&mut self, next: InvocationState) -> Result<()> {
        let current = self.state();
        if !current.can_transition_to(next) {
            return Err(Error::ConfigError(format!(
                "command '{}' cannot move from {current:?} to {next:?}",
                self.command
            )));
        }
        debug!("{}: {current:?} -> {next:?}", self.command);
        self.trace.push(next);
        Ok(())
    }
}

pub struct Orchestrator<'a> {
    credential_step: &'a dyn CredentialStep,
    native_action: &'a dyn NativeAction,
}

impl<'a> Orchestrator<'a> {
    pub fn new(credential_step: &'a dyn CredentialStep, native_action: &'a dyn NativeAction) -> Self {
        Self {
            credential_step,
            native_action,
        }
    }

    /// Runs a parsed command to completion.
    pub fn run(&self, command: &dyn ExtendedOptionsCommand, context: &BuildContext) -> Result<Invocation> {
        let mut invocation = Invocation::new(command.descriptor().name);
        self.execute(command.descriptor(), command.credential_args(), context, &mut invocation)?;
        Ok(invocation)
    }

    /// Drives `invocation` through the steps of `descriptor`.
    ///
    /// On error the invocation is left in `Aborted` and no later step runs.
    pub fn execute(
        &self,
        descriptor: &'static CommandDescriptor,
        options: &CredentialArgs,
        context: &BuildContext,
        invocation: &mut Invocation,
    ) -> Result<()> {
        let result = invocation
            .transition(InvocationState::OptionsBound)
            .and_then(|_| check_order(descriptor))
            .and_then(|_| self.run_steps(descriptor, options, context, invocation))
            .and_then(|_| invocation.transition(InvocationState::Done));

        if let Err(err) = &result {
            error!("'{}' aborted: {err}", descriptor.name);
            if !invocation.state().is_terminal() {
                invocation.trace.push(InvocationState::Aborted);
            }
        }
        result
    }

    fn run_steps(
        &self,
        descriptor: &'static CommandDescriptor,
        options: &CredentialArgs,
        context: &BuildContext,
        invocation: &mut Invocation,
    ) -> Result<()> {
        for step in descriptor.steps {
            match step {
                Step::CredentialStep => {
                    if invocation.credentials.is_some() {
                        debug!("{}: credential step already ran", descriptor.name);
                        continue;
                    }
                    invocation.transition(InvocationState::CredentialStep)?;
                    invocation.credentials = Some(self.credential_step.run(options, context)?);
                }
                Step::SubCommand(kind) => {
                    debug!("{}: running sub-command '{kind}'", descriptor.name);
                    self.run_steps(kind.descriptor(), options, context, invocation)?;
                }
                Step::NativeAction => {
                    invocation.transition(InvocationState::NativeAction)?;
                    self.native_action.run(descriptor, context)?;
                }
            }
        }
        Ok(())
    }
}

fn check_order(descriptor: &'static CommandDescriptor) -> Result<()> {
    if descriptor.is_well_ordered() {
        Ok(())
    } else {
        Err(Error::ConfigError(format!(
            "command '{}' schedules the credential step after a native action",
            descriptor.name
        )))
    }
}
