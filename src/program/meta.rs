//! program::meta
//!
//! Flag and positional descriptors.
//!
//! # Architecture
//!
//! Descriptors are plain data. They are the single source of truth that both
//! the parser ([`super::flagset`]) and the usage generator ([`super::usage`])
//! read, so what `--help` prints is what the parser enforces.
//!
//! # Example
//!
//! ```
//! use ggman::program::meta::Flag;
//!
//! let flag = Flag::value("for", "filter").short('f').long("for");
//! assert_eq!(flag.spec(), "[--for|-f filter]");
//! assert_eq!(flag.display_name(), "--for");
//! ```

use std::fmt;

/// A declared flag.
///
/// A flag with neither a short nor a long name cannot be addressed by the
/// user; [`Program`](super::Program) refuses to register one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Flag {
    /// Identifier of the field the flag fills.
    pub id: String,
    /// Short names, without the leading `-`.
    pub short: Vec<char>,
    /// Long names, without the leading `--`.
    pub long: Vec<String>,
    /// Whether the flag must be supplied.
    pub required: bool,
    /// Value placeholder; `None` for switches.
    pub value: Option<String>,
    /// Whether the flag may be repeated to collect several values.
    pub multiple: bool,
    /// Human readable description.
    pub usage: String,
    /// Default value text.
    pub default: Option<String>,
}

impl Flag {
    /// A boolean switch.
    pub fn switch(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            short: Vec::new(),
            long: Vec::new(),
            required: false,
            value: None,
            multiple: false,
            usage: String::new(),
            default: None,
        }
    }

    /// A flag taking a value named `placeholder`.
    pub fn value(id: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            value: Some(placeholder.into()),
            ..Self::switch(id)
        }
    }

    /// Add a short name.
    pub fn short(mut self, name: char) -> Self {
        self.short.push(name);
        self
    }

    /// Add a long name.
    pub fn long(mut self, name: impl Into<String>) -> Self {
        self.long.push(name.into());
        self
    }

    /// Set the description.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Mark the flag as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Allow the flag to be repeated.
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Set the default value text.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Whether the flag is a switch.
    pub fn is_switch(&self) -> bool {
        self.value.is_none()
    }

    /// Whether the user can address the flag at all.
    pub fn has_name(&self) -> bool {
        !self.short.is_empty() || !self.long.is_empty()
    }

    /// All names as typed on the command line, long names first.
    pub fn names(&self) -> Vec<String> {
        self.long
            .iter()
            .map(|l| format!("--{}", l))
            .chain(self.short.iter().map(|s| format!("-{}", s)))
            .collect()
    }

    /// The name used in diagnostics: the first long name, else the first
    /// short name, else the identifier.
    pub fn display_name(&self) -> String {
        self.names()
            .into_iter()
            .next()
            .unwrap_or_else(|| self.id.clone())
    }

    /// One-line synopsis, e.g. `[--for|-f filter]`.
    pub fn spec(&self) -> String {
        let mut spec = self.names().join("|");
        if let Some(value) = &self.value {
            spec.push(' ');
            spec.push_str(value);
        }
        if self.required {
            spec
        } else {
            format!("[{}]", spec)
        }
    }

    /// Multi-line description used on help pages.
    pub fn long_form(&self) -> String {
        let mut head = self
            .short
            .iter()
            .map(|s| format!("-{}", s))
            .chain(self.long.iter().map(|l| format!("--{}", l)))
            .collect::<Vec<_>>()
            .join(", ");
        if let Some(value) = &self.value {
            head.push(' ');
            head.push_str(value);
        }

        let mut out = format!("\n   {}\n", head);
        let mut usage = self.usage.clone();
        if let Some(default) = self.default.as_deref().filter(|d| !d.is_empty()) {
            if usage.is_empty() {
                usage = format!("(default: {})", default);
            } else {
                usage = format!("{} (default: {})", usage, default);
            }
        }
        if !usage.is_empty() {
            out.push_str(&format!("      {}\n", usage));
        }
        out
    }
}

/// Positional argument bounds of a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Positional {
    /// Placeholder shown on help pages.
    pub value: String,
    /// Human readable description.
    pub usage: String,
    /// Minimum number of arguments.
    pub min: usize,
    /// Maximum number of arguments; `None` means unbounded.
    pub max: Option<usize>,
}

impl Default for Positional {
    fn default() -> Self {
        Self::none()
    }
}

impl Positional {
    /// No positional arguments.
    pub fn none() -> Self {
        Self::new("", 0, Some(0))
    }

    /// Positional arguments named `value` within `[min, max]`.
    pub fn new(value: impl Into<String>, min: usize, max: Option<usize>) -> Self {
        Self {
            value: value.into(),
            usage: String::new(),
            min,
            max,
        }
    }

    /// Exactly `count` arguments.
    pub fn exactly(value: impl Into<String>, count: usize) -> Self {
        Self::new(value, count, Some(count))
    }

    /// At least `min` arguments.
    pub fn at_least(value: impl Into<String>, min: usize) -> Self {
        Self::new(value, min, None)
    }

    /// Set the description.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Whether the bounds are consistent.
    pub fn is_valid(&self) -> bool {
        self.max.map_or(true, |max| self.min <= max)
    }

    /// Whether the command takes no positional arguments at all.
    pub fn is_empty(&self) -> bool {
        self.max == Some(0)
    }

    /// Check `count` against the bounds.
    pub fn check(&self, count: usize) -> Result<(), Arity> {
        let too_few = count < self.min;
        let too_many = self.max.map_or(false, |max| count > max);
        if too_few || too_many {
            Err(self.arity())
        } else {
            Ok(())
        }
    }

    /// The bounds as a diagnostic phrase.
    pub fn arity(&self) -> Arity {
        match self.max {
            Some(0) if self.min == 0 => Arity::None,
            Some(max) if max == self.min => Arity::Exactly(max),
            None => Arity::AtLeast(self.min),
            Some(max) => Arity::Between(self.min, max),
        }
    }

    /// One-line synopsis, e.g. `URL [ARGS ...]`.
    pub fn spec(&self) -> String {
        let mut parts = vec![self.value.clone(); self.min];
        match self.max {
            None => parts.push(format!("[{} ...]", self.value)),
            Some(max) => {
                for _ in self.min..max {
                    parts.push(format!("[{}]", self.value));
                }
            }
        }
        parts.join(" ")
    }

    /// Multi-line description used on help pages.
    pub fn long_form(&self) -> String {
        let mut out = format!("\n   {}\n", self.spec());
        if !self.usage.is_empty() {
            out.push_str(&format!("      {}\n", self.usage));
        }
        out
    }
}

/// Accepted positional counts, phrased for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// No arguments at all.
    None,
    /// Exactly this many.
    Exactly(usize),
    /// This many or more.
    AtLeast(usize),
    /// Inclusive range.
    Between(usize, usize),
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::None => write!(f, "takes no arguments"),
            Arity::Exactly(n) => write!(f, "takes exactly {} argument(s)", n),
            Arity::AtLeast(n) => write!(f, "takes at least {} argument(s)", n),
            Arity::Between(min, max) => {
                write!(f, "takes between {} and {} argument(s)", min, max)
            }
        }
    }
}
