use clap::Parser;
use gmvault_build::cli::{Args, BuildCommand, CommandArgs, CredentialArgs};
use gmvault_build::command::{CommandKind, ExtendedOptionsCommand};
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("gmvault-build")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let parsed = Args::try_parse_from(make_args(&["build"])).unwrap();

    assert_eq!(parsed.command, BuildCommand::Build(CommandArgs::default()));
    assert_eq!(parsed.project_root, PathBuf::from("."));
    assert!(!parsed.verbose);
}

#[test]
fn test_credential_flags() {
    let parsed = Args::try_parse_from(make_args(&[
        "build-sources",
        "--google-client-id",
        "id.apps.googleusercontent.com",
        "--google-secret=s3cret",
    ]))
    .unwrap();

    let creds = parsed.command.credential_args();
    assert_eq!(creds.client_id.as_deref(), Some("id.apps.googleusercontent.com"));
    assert_eq!(creds.secret.as_deref(), Some("s3cret"));
    assert_eq!(creds.credentials_file, None);
    assert_eq!(parsed.command.kind(), CommandKind::BuildSources);
}

#[test]
fn test_every_command_accepts_credential_flags() {
    for name in ["credential", "build", "build-sources", "install", "develop"] {
        let parsed = Args::try_parse_from(make_args(&[
            name,
            "--google-credentials-file=creds.ini",
        ]))
        .unwrap();

        assert_eq!(
            parsed.command.credential_args(),
            &CredentialArgs {
                credentials_file: Some(PathBuf::from("creds.ini")),
                client_id: None,
                secret: None,
            }
        );
        assert_eq!(parsed.command.descriptor().name, name);
    }
}

#[test]
fn test_global_flags() {
    let parsed =
        Args::try_parse_from(make_args(&["install", "-v", "-C", "/tmp/gmvault"])).unwrap();

    assert!(parsed.verbose);
    assert_eq!(parsed.project_root, PathBuf::from("/tmp/gmvault"));
    assert_eq!(parsed.command.kind(), CommandKind::Install);
}

#[test]
fn test_missing_command() {
    assert!(Args::try_parse_from(make_args(&[])).is_err());
}

#[test]
fn test_unknown_command() {
    assert!(Args::try_parse_from(make_args(&["build_py"])).is_err());
}

#[test]
fn test_extended_options_match_parser() {
    use clap::CommandFactory;
    use gmvault_build::command::EXTENDED_OPTIONS;

    let cmd = Args::command();
    for kind in CommandKind::ALL {
        let sub = cmd
            .find_subcommand(kind.descriptor().name)
            .unwrap_or_else(|| panic!("missing subcommand {kind}"));
        for option in kind.descriptor().extra_options {
            let long = option.flag().trim_start_matches("--");
            assert!(
                sub.get_arguments().any(|arg| arg.get_long() == Some(long)),
                "{kind} lacks {}",
                option.flag()
            );
        }
    }
    assert_eq!(EXTENDED_OPTIONS.len(), 3);
}
