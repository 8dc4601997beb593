//! Command table and dispatch
//!
//! The table is supplied by the application and never changes for the
//! lifetime of a session. Lookup is an exact, first-match name compare.

use core::fmt::Write;

use super::parser::{Args, ParsedCommand};
use super::ConsoleError;

/// Something a command name can run.
///
/// Implemented for any `Fn(&Args, &mut dyn Write)`; implement it on a type
/// directly for handlers that carry state.
pub trait Handler {
    fn invoke(&self, args: &Args<'_>, out: &mut dyn Write);
}

impl<F> Handler for F
where
    F: Fn(&Args<'_>, &mut dyn Write),
{
    fn invoke(&self, args: &Args<'_>, out: &mut dyn Write) {
        self(args, out)
    }
}

/// Command descriptor
pub struct CommandDescriptor<'a> {
    pub name: &'a str,
    pub help: &'a str,
    /// Exact argument count, `None` accepts any
    pub arity: Option<u8>,
    pub handler: &'a dyn Handler,
}

impl<'a> CommandDescriptor<'a> {
    pub const fn new(name: &'a str, help: &'a str, arity: Option<u8>, handler: &'a dyn Handler) -> Self {
        Self { name, help, arity, handler }
    }
}

impl core::fmt::Debug for CommandDescriptor<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// How a finished line was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A handler ran
    Executed,
    /// `?` or `help` listed the commands
    Help,
    /// Nothing but whitespace
    Blank,
    /// Ctrl-C dropped the line
    Cancelled,
}

/// Execute a parsed command.
///
/// Every error is reported on `out` before it is returned; no handler runs
/// when an error is returned.
pub fn execute(
    cmd: &ParsedCommand<'_>,
    commands: &[CommandDescriptor<'_>],
    out: &mut dyn Write,
) -> Result<Outcome, ConsoleError> {
    let Some(name) = cmd.command() else {
        return Ok(Outcome::Blank); // Empty line, do nothing
    };

    if let Some(c) = find(commands, name) {
        if let Err(e) = check_arity(c, cmd.arg_count()) {
            let _ = writeln!(out, "{}: {}", c.name, e);
            return Err(e);
        }
        c.handler.invoke(&cmd.args(), out);
        return Ok(Outcome::Executed);
    }

    if name == "?" || name == "help" {
        print_help(commands, out);
        return Ok(Outcome::Help);
    }

    let _ = writeln!(out, "Unknown Command \"{}\".  Try ? or \"help\".", name);
    Err(ConsoleError::UnknownCommand)
}

/// First command named exactly `name`
pub fn find<'t, 'a>(commands: &'t [CommandDescriptor<'a>], name: &str) -> Option<&'t CommandDescriptor<'a>> {
    commands.iter().find(|c| c.name == name)
}

/// List every command with its help text, in table order
pub fn print_help(commands: &[CommandDescriptor<'_>], out: &mut dyn Write) {
    for c in commands {
        let _ = writeln!(out, "{}: {}", c.name, c.help);
    }
}

fn check_arity(c: &CommandDescriptor<'_>, argc: usize) -> Result<(), ConsoleError> {
    match c.arity {
        Some(expected) if usize::from(expected) != argc => Err(ConsoleError::ArgumentCount { expected }),
        _ => Ok(()),
    }
}
