//! Tab completion with cycling
//!
//! Candidates are the command names in table order followed by a synthetic
//! `help` slot (left out when the table already has a `help` command).
//! The prefix length is frozen when the first tab is pressed, so repeated
//! tabs keep matching the typed prefix even after the line was replaced by
//! a longer candidate.
//!
//! With `hello`, `help`, `host` registered and `h` typed, tab cycles
//! `hello` -> `help` -> `host` -> `hello` ...

use super::commands::CommandDescriptor;

/// Name of the synthetic candidate offered after the real commands
pub const HELP_CANDIDATE: &str = "help";

/// Tab completion state
pub struct Completer {
    /// Prefix being completed, as a length into the current line
    prefix_len: usize,
    /// Candidate index of the last match (`command_count` = synthetic slot)
    last: usize,
}

impl Completer {
    /// Create a completer for a table of `command_count` commands, ready
    /// for the first tab of a line
    pub const fn new(command_count: usize) -> Self {
        Self { prefix_len: 0, last: command_count }
    }

    /// Start a fresh cycle for a new line; the next scan begins at candidate 0
    pub fn reset(&mut self, command_count: usize) {
        self.prefix_len = 0;
        self.last = command_count;
    }

    /// Re-freeze the prefix (call after every non-tab edit)
    pub fn set_prefix_len(&mut self, len: usize) {
        self.prefix_len = len;
    }

    /// Frozen prefix length
    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    /// Candidate index of the last match
    pub fn last_index(&self) -> usize {
        self.last
    }

    /// Advance to the next candidate matching `line[..prefix_len]`.
    ///
    /// Returns the candidate if it is longer than the prefix, i.e. there is
    /// text to fill in. An exact-length match still advances the cycle but
    /// returns `None`, as does no match at all.
    pub fn complete<'c>(&mut self, line: &[u8], commands: &[CommandDescriptor<'c>]) -> Option<&'c str> {
        let slots = commands.len() + 1;
        let Some(prefix) = line.get(..self.prefix_len) else {
            return None;
        };

        for step in 1..=slots {
            let idx = (self.last + step) % slots;
            let Some(candidate) = candidate(commands, idx) else {
                continue;
            };
            if !candidate.as_bytes().starts_with(prefix) {
                continue;
            }
            self.last = idx;
            return (candidate.len() > prefix.len()).then_some(candidate);
        }
        None
    }
}


/// Candidate at `idx`, `None` for a synthetic slot that would duplicate a real command
fn candidate<'c>(commands: &[CommandDescriptor<'c>], idx: usize) -> Option<&'c str> {
    match commands.get(idx) {
        Some(c) => Some(c.name),
        None if commands.iter().any(|c| c.name == HELP_CANDIDATE) => None,
        None => Some(HELP_CANDIDATE),
    }
}
