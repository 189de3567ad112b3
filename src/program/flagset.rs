//! program::flagset
//!
//! Parsing of flags against a list of [`Flag`] descriptors.
//!
//! # Architecture
//!
//! A [`FlagSet`] is assembled at runtime from descriptors using the clap
//! builder API. This is the only module that talks to clap; everything else
//! sees [`FlagValues`] and [`FlagSetError`].
//!
//! Two modes exist:
//!
//! - [`FlagSet::global`] stops at the first non-flag token and passes it,
//!   and everything after it, through unexamined.
//! - [`FlagSet::command`] consumes flags anywhere and collects the
//!   remaining tokens as positionals. A `--` ends flag processing.
//!
//! clap's built-in help and version handling is disabled; help and version
//! are ordinary descriptors owned by the program.

use std::collections::BTreeMap;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{value_parser, Arg, ArgAction, ArgMatches};

use super::meta::Flag;

/// Internal id of the positional collector in command mode.
const POSITIONALS: &str = "__positionals";

/// Id clap uses for the arguments of an external subcommand.
const EXTERNAL: &str = "";

/// A parsed flag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// A switch.
    Switch(bool),
    /// Values of a value flag, in command-line order.
    Values(Vec<String>),
}

/// Parsed values, keyed by flag identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagValues {
    values: BTreeMap<String, FlagValue>,
}

impl FlagValues {
    /// Create an empty set of values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a switch; `false` when absent.
    pub fn switch(&self, id: &str) -> bool {
        matches!(self.values.get(id), Some(FlagValue::Switch(true)))
    }

    /// Last value of a value flag.
    pub fn value(&self, id: &str) -> Option<&str> {
        self.values(id).last().map(String::as_str)
    }

    /// All values of a value flag.
    pub fn values(&self, id: &str) -> &[String] {
        match self.values.get(id) {
            Some(FlagValue::Values(values)) => values,
            _ => &[],
        }
    }

    /// Set a switch.
    pub fn set_switch(&mut self, id: impl Into<String>, on: bool) {
        self.values.insert(id.into(), FlagValue::Switch(on));
    }

    /// Append a value to a value flag.
    pub fn push_value(&mut self, id: impl Into<String>, value: impl Into<String>) {
        let entry = self
            .values
            .entry(id.into())
            .or_insert_with(|| FlagValue::Values(Vec::new()));
        match entry {
            FlagValue::Values(values) => values.push(value.into()),
            other => *other = FlagValue::Values(vec![value.into()]),
        }
    }

    /// Whether `flag` holds a non-default value: a switch that is on, or a
    /// non-empty value different from the declared default.
    pub fn is_set(&self, flag: &Flag) -> bool {
        match self.values.get(&flag.id) {
            Some(FlagValue::Switch(on)) => *on,
            Some(FlagValue::Values(values)) => values
                .iter()
                .any(|v| !v.is_empty() && Some(v.as_str()) != flag.default.as_deref()),
            None => false,
        }
    }

    /// Number of flags with a recorded value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no flag has a recorded value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Result of parsing tokens against a [`FlagSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFlags {
    /// Values of the declared flags.
    pub values: FlagValues,
    /// Unconsumed tokens.
    ///
    /// In global mode the first entry is the first non-flag token. In
    /// command mode these are the positionals.
    pub rest: Vec<String>,
}

/// Failure to parse tokens against a [`FlagSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagSetError {
    /// `--help` or `-h` was encountered.
    Help,
    /// A flag that is not declared.
    UnknownFlag(String),
    /// Any other problem, e.g. a missing value.
    Invalid(String),
}

/// How tokens after the flags are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Global,
    Command,
}

/// A parser for a list of flag descriptors.
#[derive(Debug, Clone)]
pub struct FlagSet {
    name: String,
    flags: Vec<Flag>,
    mode: Mode,
}

impl FlagSet {
    /// A flag set that stops at the first non-flag token.
    pub fn global(name: impl Into<String>, flags: Vec<Flag>) -> Self {
        Self {
            name: name.into(),
            flags,
            mode: Mode::Global,
        }
    }

    /// A flag set that consumes flags anywhere and collects positionals.
    pub fn command(name: impl Into<String>, flags: Vec<Flag>) -> Self {
        Self {
            name: name.into(),
            flags,
            mode: Mode::Command,
        }
    }

    /// Parse `tokens`.
    pub fn parse(&self, tokens: &[String]) -> Result<ParsedFlags, FlagSetError> {
        let matches = self
            .build()
            .try_get_matches_from(tokens)
            .map_err(classify)?;

        let mut values = FlagValues::new();
        for flag in &self.flags {
            if flag.is_switch() {
                values.set_switch(flag.id.clone(), matches.get_flag(&flag.id));
            } else {
                for value in strings(&matches, &flag.id) {
                    values.push_value(flag.id.clone(), value);
                }
            }
        }

        let rest = match self.mode {
            Mode::Global => match matches.subcommand() {
                Some((name, sub)) => {
                    let mut rest = vec![name.to_string()];
                    rest.extend(strings(sub, EXTERNAL));
                    rest
                }
                None => Vec::new(),
            },
            Mode::Command => strings(&matches, POSITIONALS),
        };

        Ok(ParsedFlags { values, rest })
    }

    fn build(&self) -> clap::Command {
        let mut cmd = clap::Command::new(self.name.clone())
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .disable_help_subcommand(true)
            .args_override_self(true);

        for flag in &self.flags {
            cmd = cmd.arg(to_arg(flag));
        }

        match self.mode {
            Mode::Global => cmd
                .allow_external_subcommands(true)
                .external_subcommand_value_parser(value_parser!(String)),
            Mode::Command => cmd.arg(
                Arg::new(POSITIONALS)
                    .num_args(1..)
                    .action(ArgAction::Append)
                    .value_parser(value_parser!(String)),
            ),
        }
    }
}

fn to_arg(flag: &Flag) -> Arg {
    let mut arg = Arg::new(flag.id.clone()).required(flag.required);

    if let Some((first, rest)) = flag.long.split_first() {
        arg = arg.long(first.clone());
        for alias in rest {
            arg = arg.alias(alias.clone());
        }
    }
    if let Some((first, rest)) = flag.short.split_first() {
        arg = arg.short(*first);
        for alias in rest {
            arg = arg.short_alias(*alias);
        }
    }

    match &flag.value {
        None => arg.action(ArgAction::SetTrue),
        Some(placeholder) => {
            arg = arg
                .value_name(placeholder.clone())
                .value_parser(value_parser!(String))
                .action(if flag.multiple {
                    ArgAction::Append
                } else {
                    ArgAction::Set
                });
            if let Some(default) = &flag.default {
                arg = arg.default_value(default.clone());
            }
            arg
        }
    }
}

fn strings(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn classify(err: clap::Error) -> FlagSetError {
    if err.kind() == ErrorKind::UnknownArgument {
        if let Some(ContextValue::String(arg)) = err.get(ContextKind::InvalidArg) {
            let flag = arg.split('=').next().unwrap_or(arg.as_str());
            if flag == "--help" || flag == "-h" {
                return FlagSetError::Help;
            }
            if flag.starts_with('-') {
                return FlagSetError::UnknownFlag(flag.to_string());
            }
        }
    }
    FlagSetError::Invalid(first_line(&err))
}

/// The headline of a clap diagnostic, without the `error: ` prefix.
fn first_line(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let line = rendered
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("invalid arguments");
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn globals() -> Vec<Flag> {
        vec![
            Flag::switch("help").short('h').long("help"),
            Flag::value("for", "filter").short('f').long("for").multiple(),
            Flag::switch("here").short('H').long("here"),
        ]
    }

    mod global_mode {
        use super::*;

        #[test]
        fn stops_at_first_positional() {
            let set = FlagSet::global("prog", globals());
            let parsed = set
                .parse(&tokens(&["--for", "x", "ls", "--here", "-f", "y"]))
                .unwrap();
            assert_eq!(parsed.values.values("for"), &["x".to_string()]);
            assert!(!parsed.values.switch("here"));
            assert_eq!(parsed.rest, tokens(&["ls", "--here", "-f", "y"]));
        }

        #[test]
        fn collects_repeated_values() {
            let set = FlagSet::global("prog", globals());
            let parsed = set.parse(&tokens(&["-f", "a", "--for", "b", "ls"])).unwrap();
            assert_eq!(parsed.values.values("for"), &tokens(&["a", "b"])[..]);
        }

        #[test]
        fn empty_input_has_no_rest() {
            let set = FlagSet::global("prog", globals());
            let parsed = set.parse(&[]).unwrap();
            assert!(parsed.rest.is_empty());
        }

        #[test]
        fn unknown_flag_is_named() {
            let set = FlagSet::global("prog", globals());
            let err = set.parse(&tokens(&["--bogus", "ls"])).unwrap_err();
            assert_eq!(err, FlagSetError::UnknownFlag("--bogus".into()));
        }

        #[test]
        fn missing_value_is_invalid() {
            let set = FlagSet::global("prog", globals());
            let err = set.parse(&tokens(&["--for"])).unwrap_err();
            assert!(matches!(err, FlagSetError::Invalid(_)));
        }
    }

    mod command_mode {
        use super::*;

        fn clone_flags() -> Vec<Flag> {
            vec![
                Flag::switch("force").short('f').long("force"),
                Flag::value("depth", "n").long("depth").default_value("0"),
            ]
        }

        #[test]
        fn flags_and_positionals_interleave() {
            let set = FlagSet::command("clone", clone_flags());
            let parsed = set.parse(&tokens(&["url", "--force", "dest"])).unwrap();
            assert!(parsed.values.switch("force"));
            assert_eq!(parsed.rest, tokens(&["url", "dest"]));
        }

        #[test]
        fn terminator_ends_flags() {
            let set = FlagSet::command("clone", clone_flags());
            let parsed = set.parse(&tokens(&["--", "--force"])).unwrap();
            assert!(!parsed.values.switch("force"));
            assert_eq!(parsed.rest, tokens(&["--force"]));
        }

        #[test]
        fn defaults_are_not_set() {
            let set = FlagSet::command("clone", clone_flags());
            let parsed = set.parse(&tokens(&["url"])).unwrap();
            assert_eq!(parsed.values.value("depth"), Some("0"));
            assert!(!parsed.values.is_set(&clone_flags()[1]));

            let parsed = set.parse(&tokens(&["--depth", "3", "url"])).unwrap();
            assert!(parsed.values.is_set(&clone_flags()[1]));
        }

        #[test]
        fn help_is_reported() {
            let set = FlagSet::command("clone", clone_flags());
            assert_eq!(set.parse(&tokens(&["--help"])), Err(FlagSetError::Help));
        }

        #[test]
        fn unknown_flag_is_reported() {
            let set = FlagSet::command("clone", clone_flags());
            assert_eq!(
                set.parse(&tokens(&["--shallow"])),
                Err(FlagSetError::UnknownFlag("--shallow".into()))
            );
        }

        #[test]
        fn missing_required_flag_is_invalid() {
            let set = FlagSet::command(
                "run",
                vec![Flag::value("name", "name").long("name").required()],
            );
            assert!(matches!(set.parse(&[]), Err(FlagSetError::Invalid(_))));
        }
    }

    mod values {
        use super::*;

        #[test]
        fn is_set_semantics() {
            let flag = Flag::value("for", "filter").long("for");
            let mut values = FlagValues::new();
            assert!(!values.is_set(&flag));

            values.push_value("for", "");
            assert!(!values.is_set(&flag));

            values.push_value("for", "x");
            assert!(values.is_set(&flag));

            let switch = Flag::switch("here").long("here");
            values.set_switch("here", false);
            assert!(!values.is_set(&switch));
            values.set_switch("here", true);
            assert!(values.is_set(&switch));
        }
    }
}
