//! Property-based tests for argument resolution and url handling.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated argument vectors and urls.

use proptest::prelude::*;

use ggman::env::{Norm, Parameters, Pattern, Url};
use ggman::program::{ExitCode, Program};
use ggman::Ggman;

fn ggman() -> Program<Ggman> {
    ggman::cmd::program(Ggman::new(Parameters {
        root: "/nonexistent/root".into(),
        norm: Norm::Exact,
        canfile: "/nonexistent/canfile".into(),
        workdir: "/".into(),
        config: None,
    }))
    .unwrap()
}

/// Tokens that mean something to the parser, plus a few that do not.
fn token() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "ls", "lsr", "root", "where", "comps", "canon", "clone", "exec", "env", "fix",
            "help", "version", "for", "git", "show", "sclone", "canonical", "unknown",
        ])
        .prop_map(String::from),
        prop::sample::select(vec![
            "--help", "-h", "--version", "-v", "--for", "-f", "--here", "-H", "--path",
            "--dirty", "--clean", "--synced", "--unsynced", "--tarnished", "--pristine",
            "--no-fuzzy-filter", "--exit-code", "-e", "--one", "--canonical", "--simulate",
            "--", "--bogus", "-x",
        ])
        .prop_map(String::from),
        "[a-z]{1,8}",
        "https://[a-z]{1,6}\\.com/[a-z]{1,6}/[a-z]{1,6}",
    ]
}

fn argv() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(token(), 0..8)
}

/// Url-ish strings: schemes, scp syntax, ports, users and bare paths.
fn url() -> impl Strategy<Value = String> {
    prop_oneof![
        "(https|ssh|git|file)://([a-z]{1,5}@)?[a-z]{1,8}(:[0-9]{1,4})?(/~?[A-Za-z0-9_.-]{1,8}){0,4}",
        "([a-z]{1,5}@)?[a-z]{1,8}\\.[a-z]{2,3}:[A-Za-z0-9_.-]{1,8}(/[A-Za-z0-9_.-]{1,8}){0,3}",
        "[A-Za-z0-9_./-]{1,30}",
    ]
}

proptest! {
    /// Resolving the same argument vector twice yields the same result.
    #[test]
    fn resolve_is_deterministic(args in argv()) {
        let program = ggman();
        let first = format!("{:?}", program.resolve(&args));
        let second = format!("{:?}", program.resolve(&args));
        prop_assert_eq!(first, second);
    }

    /// Resolution fails only with parse-phase exit codes.
    #[test]
    fn resolve_errors_are_parse_errors(args in argv()) {
        if let Err(err) = ggman().resolve(&args) {
            prop_assert!(
                matches!(
                    err.code(),
                    ExitCode::UnknownCommand
                        | ExitCode::InvalidGlobalArguments
                        | ExitCode::InvalidCommandArguments
                ),
                "{:?} -> {:?}",
                args,
                err
            );
        }
    }

    /// `help CMD` and `CMD --help` resolve to the same page.
    #[test]
    fn help_keyword_matches_flag(index in 0usize..16) {
        let program = ggman();
        let commands = program.commands();
        let command = commands[index % commands.len()].clone();
        let keyword = program.resolve(&["help".to_string(), command.clone()]);
        let flag = program.resolve(&[command, "--help".to_string()]);
        prop_assert_eq!(format!("{:?}", keyword), format!("{:?}", flag));
    }

    /// The order of command flags does not matter.
    #[test]
    fn command_flag_order_is_irrelevant(exit_code in any::<bool>(), one in any::<bool>()) {
        let mut flags = Vec::new();
        if exit_code {
            flags.push("--exit-code".to_string());
        }
        if one {
            flags.push("--one".to_string());
        }
        let program = ggman();

        let mut forward = vec!["ls".to_string()];
        forward.extend(flags.iter().cloned());
        let mut backward = vec!["ls".to_string()];
        backward.extend(flags.iter().rev().cloned());

        let forward = program.resolve(&forward).unwrap();
        let backward = program.resolve(&backward).unwrap();
        let (forward, backward) = (forward.arguments().unwrap(), backward.arguments().unwrap());
        prop_assert_eq!(&forward.description.command, &backward.description.command);
        prop_assert_eq!(&forward.values, &backward.values);
        prop_assert_eq!(&forward.positionals, &backward.positionals);
    }

    /// Components are never empty and never contain a separator.
    #[test]
    fn url_components_are_clean(input in url()) {
        if let Ok(url) = Url::parse(&input) {
            for component in url.components() {
                prop_assert!(!component.is_empty(), "{:?}", input);
                prop_assert!(!component.contains('/'), "{:?}", input);
            }
        }
    }

    /// A plain pattern built from a url's components matches that url.
    #[test]
    fn components_match_their_own_pattern(input in url()) {
        if let Ok(url) = Url::parse(&input) {
            let components = url.components();
            let source = components.join("/");
            if let Ok(pattern) = Pattern::new(&source) {
                if !pattern.is_glob() {
                    prop_assert!(pattern.matches(&components), "{:?}", source);
                }
            }
        }
    }
}
