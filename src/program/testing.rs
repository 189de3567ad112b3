//! Fixtures for dispatcher unit tests.

use std::cell::Cell;

use super::*;

pub fn tokens(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestFlags {
    pub filters: Vec<String>,
    pub here: bool,
}

impl GlobalFlags for TestFlags {
    fn flags() -> Vec<Flag> {
        vec![
            Flag::value("for", "filter")
                .short('f')
                .long("for")
                .multiple()
                .usage("Filter repositories"),
            Flag::switch("here")
                .short('H')
                .long("here")
                .usage("Only the current repository"),
        ]
    }

    fn from_values(values: &FlagValues) -> Self {
        Self {
            filters: values.values("for").to_vec(),
            here: values.switch("here"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestRequirement {
    pub allow_globals: bool,
}

impl TestRequirement {
    pub fn strict() -> Self {
        Self {
            allow_globals: false,
        }
    }

    pub fn permissive() -> Self {
        Self {
            allow_globals: true,
        }
    }
}

impl Requirement<TestFlags> for TestRequirement {
    fn allows_flag(&self, _flag: &Flag) -> bool {
        self.allow_globals
    }
}

/// Counts runs; refuses a runtime when the first positional is `fail-runtime`.
#[derive(Debug, Default)]
pub struct TestHost {
    pub runs: Cell<usize>,
}

impl Host for TestHost {
    type Flags = TestFlags;
    type Requirement = TestRequirement;
    type Runtime = ();

    fn runtime(&self, args: &HostArguments<Self>) -> Result<(), ProgramError> {
        match args.positionals.first().map(String::as_str) {
            Some("fail-runtime") => Err(ProgramError::Environment {
                message: "runtime refused".into(),
            }),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
pub struct ListCommand {
    pub long: bool,
    pub short: bool,
}

impl Command<TestHost> for ListCommand {
    fn description(&self) -> Description<TestRequirement> {
        Description::new("ls", "List things", TestRequirement::strict())
            .positional(Positional::new("PATH", 1, Some(2)))
    }

    fn flags(&self) -> Vec<Flag> {
        vec![
            Flag::switch("long").short('l').long("long"),
            Flag::switch("short").short('s').long("short"),
        ]
    }

    fn apply_flags(&mut self, values: &FlagValues) -> Result<(), ProgramError> {
        self.long = values.switch("long");
        self.short = values.switch("short");
        Ok(())
    }

    fn after_parse(&mut self) -> Result<(), ProgramError> {
        if self.long && self.short {
            return Err(ProgramError::PostParse {
                command: "ls".into(),
                message: "'--long' and '--short' are exclusive".into(),
                code: ExitCode::InvalidCommandArguments,
            });
        }
        Ok(())
    }

    fn run(&mut self, ctx: &mut Context<'_, TestHost>) -> Result<(), ProgramError> {
        let host = ctx.program.host();
        host.runs.set(host.runs.get() + 1);

        let mut parts = vec!["ls".to_string()];
        if self.long {
            parts.push("long".into());
        }
        parts.extend(ctx.positionals().iter().cloned());
        ctx.println(parts.join(" "))
    }
}

#[derive(Debug, Default)]
pub struct CloneCommand {
    pub shallow: bool,
}

impl Command<TestHost> for CloneCommand {
    fn description(&self) -> Description<TestRequirement> {
        Description::new("clone", "Clone things", TestRequirement::permissive())
            .positional(Positional::new("URL", 1, Some(2)))
    }

    fn flags(&self) -> Vec<Flag> {
        vec![Flag::switch("shallow").long("shallow")]
    }

    fn apply_flags(&mut self, values: &FlagValues) -> Result<(), ProgramError> {
        self.shallow = values.switch("shallow");
        Ok(())
    }

    fn run(&mut self, ctx: &mut Context<'_, TestHost>) -> Result<(), ProgramError> {
        let host = ctx.program.host();
        host.runs.set(host.runs.get() + 1);
        Ok(())
    }
}

pub fn program() -> Program<TestHost> {
    let mut program = Program::new(
        TestHost::default(),
        Info {
            executable: "prog".into(),
            version: "1.0".into(),
            description: "A test program".into(),
        },
    )
    .unwrap();
    program.register(ListCommand::default).unwrap();
    program.register(CloneCommand::default).unwrap();
    program
        .register_alias(Alias::new("quick", "clone").args(["--shallow"]))
        .unwrap();
    program.register_keyword(Keyword::help()).unwrap();
    program.register_keyword(Keyword::version()).unwrap();
    program
}

/// Run `argv` against [`program`]: exit code, stdout, stderr and run count.
pub fn run(argv: &[&str]) -> (ExitCode, String, String, usize) {
    let program = program();
    let out = Buffer::new();
    let err = Buffer::new();
    let mut io = Io::new(out.clone(), err.clone());
    let code = program.main(&mut io, &tokens(argv));
    (code, out.contents(), err.contents(), program.host().runs.get())
}
