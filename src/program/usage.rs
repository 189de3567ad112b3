//! program::usage
//!
//! Help pages.
//!
//! # Architecture
//!
//! Pages are built from the same [`Flag`] and positional descriptors the
//! parser enforces. The global flags shown on a command page come from
//! [`partition_flags`], the function validation uses, so a flag is listed
//! exactly when the command accepts it.
//!
//! # Layout
//!
//! ```text
//! Usage: ggman [--help|-h] [--version|-v] [--for|-f filter] [--] clone [--force|-f] [--] URL [ARG ...]
//!
//! Clone a repository into the local directory structure
//!
//! Global Arguments:
//!
//!    -h, --help
//!       Print a help message and exit
//! ...
//! ```

use std::fmt;

use super::args::universal_flags;
use super::description::Description;
use super::meta::Flag;
use super::requirement::partition_flags;
use super::{GlobalFlags, Host, Program};

/// A titled group of entries on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading, if any.
    pub title: Option<String>,
    /// Rendered long forms.
    pub entries: Vec<String>,
}

/// A rendered help page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Synopsis after `Usage: `.
    pub usage: String,
    /// Human readable description.
    pub description: String,
    /// Flag and argument sections.
    pub sections: Vec<Section>,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Usage: {}", self.usage)?;
        if !self.description.is_empty() {
            write!(f, "\n{}\n", self.description)?;
        }
        for section in &self.sections {
            if let Some(title) = &section.title {
                write!(f, "\n{}:\n", title)?;
            }
            for entry in &section.entries {
                write!(f, "{}", entry)?;
            }
        }
        Ok(())
    }
}

impl<H: Host> Program<H> {
    /// The page shown for `--help` without a command.
    pub fn main_page(&self) -> Page {
        let universals = universal_flags();
        let globals = H::Flags::flags();

        let mut usage = vec![self.info().executable.clone()];
        usage.extend(universals.iter().chain(&globals).map(Flag::spec));
        usage.push("[--]".to_string());
        usage.push("COMMAND [ARGS ...]".to_string());

        let mut names = self.commands();
        names.extend(self.aliases());
        names.sort();
        names.dedup();

        let mut entries: Vec<String> = universals
            .iter()
            .chain(&globals)
            .map(Flag::long_form)
            .collect();
        entries.push(format!(
            "\n   COMMAND [ARGS ...]\n      Command to call. One of {}. See individual commands for more help.\n",
            names
                .iter()
                .map(|name| format!("'{}'", name))
                .collect::<Vec<_>>()
                .join(", ")
        ));

        Page {
            usage: usage.join(" "),
            description: self.info().description.clone(),
            sections: vec![Section {
                title: None,
                entries,
            }],
        }
    }

    /// The page shown for `COMMAND --help`.
    pub fn command_page(&self, description: &Description<H::Requirement>, flags: &[Flag]) -> Page {
        let universals = universal_flags();
        let (globals, _) = partition_flags::<H::Flags, _>(&description.requirements);

        let mut usage = vec![self.info().executable.clone()];
        usage.extend(universals.iter().chain(&globals).map(Flag::spec));
        usage.push("[--]".to_string());
        usage.push(description.command.clone());
        usage.extend(flags.iter().map(Flag::spec));
        if !description.positional.is_empty() {
            usage.push("[--]".to_string());
            usage.push(description.positional.spec());
        }

        let mut sections = vec![Section {
            title: Some("Global Arguments".to_string()),
            entries: universals
                .iter()
                .chain(&globals)
                .map(Flag::long_form)
                .collect(),
        }];

        let mut entries: Vec<String> = flags.iter().map(Flag::long_form).collect();
        if !description.positional.is_empty() {
            entries.push(description.positional.long_form());
        }
        if !entries.is_empty() {
            sections.push(Section {
                title: Some("Command Arguments".to_string()),
                entries,
            });
        }

        Page {
            usage: usage.join(" "),
            description: description.description.clone(),
            sections,
        }
    }
}
