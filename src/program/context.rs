//! program::context
//!
//! What a running command gets to see.
//!
//! # Design
//!
//! Output goes through [`Io`] rather than straight to the process streams,
//! so a whole invocation can run in-process with captured output.

use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, Write};
use std::rc::Rc;

use super::args::HostArguments;
use super::errors::ProgramError;
use super::{Host, Program};

/// Output streams of an invocation.
pub struct Io {
    /// Standard output.
    pub stdout: Box<dyn Write>,
    /// Standard error.
    pub stderr: Box<dyn Write>,
}

impl Io {
    /// Streams writing to the given sinks.
    pub fn new(stdout: impl Write + 'static, stderr: impl Write + 'static) -> Self {
        Self {
            stdout: Box::new(stdout),
            stderr: Box::new(stderr),
        }
    }

    /// The process streams.
    pub fn std() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl std::fmt::Debug for Io {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Io").finish_non_exhaustive()
    }
}

/// An in-memory sink whose clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct Buffer(Rc<RefCell<Vec<u8>>>);

impl Buffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Execution context handed to [`Command::run`](super::Command::run).
pub struct Context<'a, H: Host> {
    /// Parsed arguments of the invocation.
    pub args: HostArguments<H>,
    /// Runtime built by the host for this invocation.
    pub runtime: H::Runtime,
    /// Output streams.
    pub io: &'a mut Io,
    /// The program running the command.
    pub program: &'a Program<H>,
}

impl<H: Host> Context<'_, H> {
    /// Positional arguments.
    pub fn positionals(&self) -> &[String] {
        &self.args.positionals
    }

    /// Typed global flags.
    pub fn flags(&self) -> &H::Flags {
        &self.args.flags
    }

    /// Write a line to standard output.
    pub fn println(&mut self, line: impl Display) -> Result<(), ProgramError> {
        writeln!(self.io.stdout, "{}", line)?;
        Ok(())
    }

    /// Write a line to standard error.
    pub fn eprintln(&mut self, line: impl Display) -> Result<(), ProgramError> {
        writeln!(self.io.stderr, "{}", line)?;
        Ok(())
    }
}
