//! gmvault-build entry point.
//! Parses the command line, loads the build context once and runs the
//! selected command.

use gmvault_build::{
    action::ProcessAction,
    cli::{get_args, Args},
    context::BuildContext,
    error::{default_error_handler, Result},
    logger::init_logger,
    orchestrator::{Orchestrator, ResolveAndRender},
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the configuration and extracts the version
/// 2. Runs the command's steps: credential step first when required,
///    then the native action
fn run(args: Args) -> Result<()> {
    let context = BuildContext::load(&args.project_root)?;

    let credential_step = ResolveAndRender::new(MiniJinjaRenderer::new());
    let orchestrator = Orchestrator::new(&credential_step, &ProcessAction);

    let invocation = orchestrator.run(&args.command, &context)?;
    println!(
        "'{}' completed successfully for Gmvault {}.",
        invocation.command(),
        context.version
    );
    Ok(())
}
