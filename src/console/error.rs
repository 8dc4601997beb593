//! Console error types
//!
//! None of these are fatal. Each is reported on the terminal, the line is
//! discarded and editing starts over.

use crate::config::{MAX_ARGS, MAX_LINE_CHARS};

/// Console error with code and message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleError {
    /// E01: Line exceeds `MAX_LINE_CHARS`
    LineTooLong,
    /// E02: More than `MAX_ARGS` tokens
    TooManyArguments,
    /// E03: Quote opened but never closed
    UnclosedQuote,
    /// E04: Backslash with nothing to escape
    TrailingBackslash,
    /// E05: No command with that name
    UnknownCommand,
    /// E06: Wrong number of arguments for the command
    ArgumentCount { expected: u8 },
}

impl ConsoleError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::LineTooLong => "E01",
            Self::TooManyArguments => "E02",
            Self::UnclosedQuote => "E03",
            Self::TrailingBackslash => "E04",
            Self::UnknownCommand => "E05",
            Self::ArgumentCount { .. } => "E06",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::LineTooLong => "line too long",
            Self::TooManyArguments => "too many arguments",
            Self::UnclosedQuote => "unclosed quote",
            Self::TrailingBackslash => "trailing backslash",
            Self::UnknownCommand => "unknown command",
            Self::ArgumentCount { .. } => "wrong argument count",
        }
    }
}

/// Terminal diagnostic, without the command name prefix.
impl core::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::LineTooLong => write!(f, "Line too long (>{} characters)", MAX_LINE_CHARS),
            Self::TooManyArguments => write!(f, "Too many arguments (>{})", MAX_ARGS),
            Self::UnclosedQuote => f.write_str("Unclosed quote"),
            Self::TrailingBackslash => f.write_str("Line ended with backslash"),
            Self::UnknownCommand => f.write_str("Unknown Command"),
            Self::ArgumentCount { expected: 0 } => f.write_str("Unexpected argument(s)"),
            Self::ArgumentCount { expected: 1 } => f.write_str("Expected 1 argument"),
            Self::ArgumentCount { expected } => write!(f, "Expected {} arguments", expected),
        }
    }
}
