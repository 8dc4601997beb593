//! # uart-console
//!
//! Interactive command console for serial-attached devices.
//!
//! ## Architecture
//!
//! Every input byte flows through one pipeline, owned by a [`Session`]:
//! - VT102 decoder turns bytes into keys (arrows, ctrl codes, text)
//! - Line editor mutates a fixed buffer in place and echoes to the terminal
//! - On Enter the line is pushed to history, tokenized and dispatched
//!
//! No heap, no globals. Bytes come from a [`ByteSource`], output goes to a
//! [`ByteSink`]; both are supplied by the embedding application.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod io;
pub mod log_drain;
pub mod logging;

pub use config::{ConsoleConfig, TerminalMode, HISTORY_LINES, MAX_ARGS, MAX_LINE_CHARS};
pub use console::{Args, CommandDescriptor, ConsoleError, Handler, Outcome, Session};
pub use io::{ByteSink, ByteSource, SinkWriter, SliceSource};
pub use logging::{LogLevel, LogStream};
