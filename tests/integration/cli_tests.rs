use super::fixtures::{list_files, write};
use clap::Parser;
use filemop::cli::Cli;
use filemop::error::{CleanError, ExitCode};
use filemop::run_app;
use tempfile::tempdir;

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["filemop"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv)
}

#[test]
fn test_run_command_cleans_directory() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    write(&root, "a.txt", b"x");
    write(&root, "b.txt", b"x");
    let root_arg = root.to_str().unwrap();

    let code = run_app(cli(&["-q", "run", root_arg, "--no-log-file"])).unwrap();

    assert_eq!(code, ExitCode::Success);
    assert_eq!(list_files(&root), vec!["txt/a.txt"]);
}

#[test]
fn test_run_command_writes_log_file() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("root");
    write(&root, "e.txt", b"");
    let log = dir.path().join("log.csv");

    let code = run_app(cli(&[
        "run",
        root.to_str().unwrap(),
        "--log-file",
        log.to_str().unwrap(),
        "--output",
        "json",
    ]))
    .unwrap();

    assert_eq!(code, ExitCode::Success);
    let code = run_app(cli(&["log", "--file", log.to_str().unwrap(), "--tail", "1"])).unwrap();
    assert_eq!(code, ExitCode::Success);
    assert_eq!(filemop::journal::read_log(&log).unwrap().len(), 1);
}

#[test]
fn test_run_command_missing_target() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let err = run_app(cli(&["-q", "run", missing.to_str().unwrap(), "--no-log-file"]))
        .unwrap_err();

    let clean = err.downcast_ref::<CleanError>().unwrap();
    assert_eq!(clean.exit_code(), ExitCode::InvalidTarget);
}

#[test]
fn test_invalid_target_creates_no_log_file() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");
    let file = write(dir.path(), "plain.txt", b"x");
    let log_dir = dir.path().join("logs");
    let log = log_dir.join("actions.csv");

    for target in [&missing, &file] {
        let err = run_app(cli(&[
            "-q",
            "run",
            target.to_str().unwrap(),
            "--log-file",
            log.to_str().unwrap(),
        ]))
        .unwrap_err();

        assert!(err.downcast_ref::<CleanError>().is_some());
        assert!(!log.exists());
        assert!(!log_dir.exists());
    }
}

#[test]
fn test_tree_command_rejects_file() {
    let dir = tempdir().unwrap();
    let file = write(dir.path(), "f.txt", b"x");

    let err = run_app(cli(&["tree", file.to_str().unwrap()])).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<CleanError>(),
        Some(CleanError::NotADirectory(_))
    ));
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("absent.toml");

    let result = run_app(cli(&["--config", config.to_str().unwrap(), "config"]));

    assert!(result.is_err());
}
