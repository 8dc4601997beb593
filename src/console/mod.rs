//! Serial console: line editing, history, completion and dispatch
//!
//! Zero heap allocation - all fixed buffers.

pub mod commands;
pub mod completion;
pub mod error;
pub mod history;
pub mod line_buffer;
pub mod parser;
pub mod session;
pub mod vt102;

pub use commands::{execute, print_help, CommandDescriptor, Handler, Outcome};
pub use completion::Completer;
pub use error::ConsoleError;
pub use history::{History, Recall};
pub use line_buffer::LineBuffer;
pub use parser::{parse_line, Args, ParsedCommand};
pub use session::{Session, VERSION};
pub use vt102::{Key, ProtocolState, Vt102Decoder};
