//! env::flags
//!
//! The global flags of ggman. All of them narrow down the set of
//! repositories a command operates on.

use crate::program::{Flag, FlagValues, GlobalFlags};

/// Flag identifiers, shared by the descriptors and [`GgmanFlags::from_values`].
pub mod ids {
    pub const FOR: &str = "for";
    pub const NO_FUZZY_FILTER: &str = "no-fuzzy-filter";
    pub const HERE: &str = "here";
    pub const PATH: &str = "path";
    pub const DIRTY: &str = "dirty";
    pub const CLEAN: &str = "clean";
    pub const SYNCED: &str = "synced";
    pub const UNSYNCED: &str = "unsynced";
    pub const TARNISHED: &str = "tarnished";
    pub const PRISTINE: &str = "pristine";
}

/// Typed global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GgmanFlags {
    /// `--for` patterns.
    pub filters: Vec<String>,
    /// `--no-fuzzy-filter`
    pub no_fuzzy_filter: bool,
    /// `--here`
    pub here: bool,
    /// `--path` subtrees.
    pub paths: Vec<String>,
    /// `--dirty`
    pub dirty: bool,
    /// `--clean`
    pub clean: bool,
    /// `--synced`
    pub synced: bool,
    /// `--unsynced`
    pub unsynced: bool,
    /// `--tarnished`
    pub tarnished: bool,
    /// `--pristine`
    pub pristine: bool,
}

impl GgmanFlags {
    /// Pairs of flags that cannot be combined.
    pub fn conflicts(&self) -> Option<(&'static str, &'static str)> {
        [
            (self.dirty && self.clean, ("--dirty", "--clean")),
            (self.synced && self.unsynced, ("--synced", "--unsynced")),
            (self.tarnished && self.pristine, ("--tarnished", "--pristine")),
        ]
        .into_iter()
        .find_map(|(clash, pair)| clash.then_some(pair))
    }
}

impl GlobalFlags for GgmanFlags {
    fn flags() -> Vec<Flag> {
        vec![
            Flag::value(ids::FOR, "filter")
                .short('f')
                .long("for")
                .multiple()
                .usage("Filter list of repositories to apply COMMAND to by filter. Filter can be a relative or absolute path, or a glob pattern which will be matched against the normalized repository url"),
            Flag::switch(ids::NO_FUZZY_FILTER)
                .long("no-fuzzy-filter")
                .usage("Disable fuzzy matching for filters"),
            Flag::switch(ids::HERE)
                .short('H')
                .long("here")
                .usage("Filter the list of repositories to apply COMMAND to only contain repository in the current directory or subtree. Alias for '-p .'"),
            Flag::value(ids::PATH, "path")
                .short('P')
                .long("path")
                .multiple()
                .usage("Filter the list of repositories to apply COMMAND to only contain repositories in or under the specified path. May be used multiple times"),
            Flag::switch(ids::DIRTY)
                .long("dirty")
                .usage("List only repositories with uncommitted changes"),
            Flag::switch(ids::CLEAN)
                .long("clean")
                .usage("List only repositories without uncommitted changes"),
            Flag::switch(ids::SYNCED)
                .long("synced")
                .usage("List only repositories which are up-to-date with their remote"),
            Flag::switch(ids::UNSYNCED)
                .long("unsynced")
                .usage("List only repositories not up-to-date with their remote"),
            Flag::switch(ids::TARNISHED)
                .long("tarnished")
                .usage("List only repositories which are dirty or unsynced"),
            Flag::switch(ids::PRISTINE)
                .long("pristine")
                .usage("List only repositories which are clean and synced"),
        ]
    }

    fn from_values(values: &FlagValues) -> Self {
        Self {
            filters: values.values(ids::FOR).to_vec(),
            no_fuzzy_filter: values.switch(ids::NO_FUZZY_FILTER),
            here: values.switch(ids::HERE),
            paths: values.values(ids::PATH).to_vec(),
            dirty: values.switch(ids::DIRTY),
            clean: values.switch(ids::CLEAN),
            synced: values.switch(ids::SYNCED),
            unsynced: values.switch(ids::UNSYNCED),
            tarnished: values.switch(ids::TARNISHED),
            pristine: values.switch(ids::PRISTINE),
        }
    }
}
