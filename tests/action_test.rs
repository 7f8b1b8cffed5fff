#![cfg(unix)]

mod common;

use common::{gmvault_project, write};
use gmvault_build::action::ProcessAction;
use gmvault_build::command::CommandKind;
use gmvault_build::context::BuildContext;
use gmvault_build::error::Error;
use gmvault_build::orchestrator::NativeAction;
use std::fs;

#[test]
fn test_action_receives_context() {
    let project = gmvault_project();
    write(
        project.path(),
        "gmvault-build.json",
        r#"{"actions": {"install": ["sh", "-c", "cat > action_input.json && echo \"$GMVAULT_VERSION\" > version.txt"]}}"#,
    );
    let context = BuildContext::load(project.path()).unwrap();

    ProcessAction
        .run(CommandKind::Install.descriptor(), &context)
        .unwrap();

    let input: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(project.path().join("action_input.json")).unwrap())
            .unwrap();
    assert_eq!(input["command"], "install");
    assert_eq!(input["version"], "1.9.1");
    assert_eq!(input["rendered"].as_array().unwrap().len(), 2);
    assert_eq!(
        fs::read_to_string(project.path().join("version.txt")).unwrap(),
        "1.9.1\n"
    );
}

#[test]
fn test_action_without_configuration_is_noop() {
    let project = gmvault_project();
    let context = BuildContext::load(project.path()).unwrap();

    assert!(ProcessAction
        .run(CommandKind::Develop.descriptor(), &context)
        .is_ok());
}

#[test]
fn test_action_ignoring_stdin() {
    let project = gmvault_project();
    write(
        project.path(),
        "gmvault-build.yaml",
        "actions:\n  develop: [\"true\"]\n",
    );
    let context = BuildContext::load(project.path()).unwrap();

    assert!(ProcessAction
        .run(CommandKind::Develop.descriptor(), &context)
        .is_ok());
}

#[test]
fn test_failing_action() {
    let project = gmvault_project();
    write(
        project.path(),
        "gmvault-build.yaml",
        "actions:\n  build: [sh, -c, \"exit 3\"]\n",
    );
    let context = BuildContext::load(project.path()).unwrap();

    let result = ProcessAction.run(CommandKind::Build.descriptor(), &context);
    assert!(matches!(result, Err(Error::ActionError(_))));
}

#[test]
fn test_empty_action() {
    let project = gmvault_project();
    write(project.path(), "gmvault-build.yaml", "actions:\n  build: []\n");
    let context = BuildContext::load(project.path()).unwrap();

    let result = ProcessAction.run(CommandKind::Build.descriptor(), &context);
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_missing_program() {
    let project = gmvault_project();
    write(
        project.path(),
        "gmvault-build.yaml",
        "actions:\n  build: [gmvault-build-no-such-program]\n",
    );
    let context = BuildContext::load(project.path()).unwrap();

    let result = ProcessAction.run(CommandKind::Build.descriptor(), &context);
    assert!(matches!(result, Err(Error::ActionError(_))));
}
