//! Integration tests for the ggman binary.
//!
//! These tests run the compiled executable and check exit codes, help pages
//! and output of the commands that need no repositories.
// The cargo_bin function is marked deprecated in favor of the cargo_bin! macro,
// but both work correctly.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A ggman command isolated from the user's configuration.
fn ggman(root: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ggman").unwrap();
    cmd.env("GGROOT", root.path())
        .env("GGMAN_CONFIG", root.path().join("no-config.toml"))
        .env("GGMAN_CANFILE", root.path().join("no-canfile"))
        .env("GGNORM", "exact")
        .env_remove("GGMAN_LOG")
        .current_dir(root.path());
    cmd
}

// =============================================================================
// Universal Flags and Exit Codes
// =============================================================================

#[test]
fn no_arguments_is_global_error() {
    let root = TempDir::new().unwrap();
    ggman(&root)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("need at least one argument"));
}

#[test]
fn help_flag_prints_main_page() {
    let root = TempDir::new().unwrap();
    ggman(&root)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Usage: ggman [--help|-h] [--version|-v]"))
        .stdout(predicate::str::contains("'canonical'"))
        .stdout(predicate::str::contains("'where'"));
}

#[test]
fn version_flag_and_keyword() {
    let root = TempDir::new().unwrap();
    let expected = format!("ggman version {}\n", env!("CARGO_PKG_VERSION"));
    ggman(&root)
        .arg("--version")
        .assert()
        .success()
        .stdout(expected.clone());
    ggman(&root).arg("version").assert().success().stdout(expected);
}

#[test]
fn unknown_command() {
    let root = TempDir::new().unwrap();
    ggman(&root)
        .arg("frobnicate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown command 'frobnicate'"));
}

#[test]
fn unknown_global_flag() {
    let root = TempDir::new().unwrap();
    ggman(&root).args(["--frobnicate", "ls"]).assert().code(3);
}

#[test]
fn filter_on_unfiltered_command() {
    let root = TempDir::new().unwrap();
    ggman(&root)
        .args(["--for", "x", "root"])
        .assert()
        .code(4)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("'root' does not support the '--for' flag"));
}

#[test]
fn missing_root_is_environment_error() {
    let root = TempDir::new().unwrap();
    ggman(&root)
        .env("GGROOT", root.path().join("absent"))
        .arg("ls")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("unable to find root folder"));
}

#[test]
fn invalid_norm_is_environment_error() {
    let root = TempDir::new().unwrap();
    ggman(&root)
        .env("GGNORM", "sideways")
        .arg("root")
        .assert()
        .code(5);
}

#[cfg(unix)]
#[test]
fn non_utf8_argument_is_global_error() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let root = TempDir::new().unwrap();
    ggman(&root)
        .args([OsStr::new("exec"), OsStr::new("--"), OsStr::new("echo")])
        .arg(OsStr::from_bytes(b"\xff"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not valid UTF-8"));
}

// =============================================================================
// Help Pages
// =============================================================================

#[test]
fn help_keyword_equals_help_flag() {
    let root = TempDir::new().unwrap();
    let flag = ggman(&root).args(["clone", "--help"]).output().unwrap();
    let keyword = ggman(&root).args(["help", "clone"]).output().unwrap();
    assert!(flag.status.success());
    assert_eq!(flag.stdout, keyword.stdout);
}

#[test]
fn command_page_shows_allowed_globals_only() {
    let root = TempDir::new().unwrap();
    ggman(&root)
        .args(["ls", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[--for|-f filter]"))
        .stdout(predicate::str::contains("Command Arguments:"));
    ggman(&root)
        .args(["where", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--for").not())
        .stdout(predicate::str::contains("[--] URL"));
}

// =============================================================================
// Commands
// =============================================================================

#[test]
fn comps_prints_components() {
    let root = TempDir::new().unwrap();
    ggman(&root)
        .args(["comps", "git@github.com:hello/world.git"])
        .assert()
        .success()
        .stdout("github.com\nhello\nworld\n");
}

#[test]
fn where_prints_local_path() {
    let root = TempDir::new().unwrap();
    let expected = root
        .path()
        .canonicalize()
        .unwrap()
        .join("github.com")
        .join("hello")
        .join("world");
    ggman(&root)
        .args(["where", "https://github.com/hello/world.git"])
        .assert()
        .success()
        .stdout(format!("{}\n", expected.display()));
}

#[test]
fn where_needs_a_url() {
    let root = TempDir::new().unwrap();
    ggman(&root)
        .arg("where")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("takes exactly 1 argument(s)"));
}

#[test]
fn canon_with_spec() {
    let root = TempDir::new().unwrap();
    ggman(&root)
        .args(["canon", "git@github.com:hello/world.git", "https://^/$"])
        .assert()
        .success()
        .stdout("https://github.com/hello/world\n");
}

#[test]
fn env_prints_variables() {
    let root = TempDir::new().unwrap();
    ggman(&root)
        .args(["env", "GGNORM"])
        .assert()
        .success()
        .stdout("exact\n");
}

#[test]
fn for_keyword_needs_command() {
    let root = TempDir::new().unwrap();
    ggman(&root).args(["for", "x"]).assert().code(3);
}
