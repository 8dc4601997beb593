//! Module: config
//!
//! Purpose: Build-time capacities and per-session settings for the console.
//!
//! Capacities are compile-time constants so every buffer is statically
//! sized. The terminal mode and prompt are chosen once, when the session is
//! built, and never change afterwards.

/// Longest editable line, in bytes.
pub const MAX_LINE_CHARS: usize = 80;

/// Maximum tokens per line, command name included.
pub const MAX_ARGS: usize = 16;

/// Default history depth. Zero disables history entirely.
pub const HISTORY_LINES: usize = 10;

/// Terminal emulation level of the attached device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalMode {
    /// Consumes 0x20-0x7E. No echo, no prompt, no editing.
    Minimal,
    /// Consumes 0x20-0x7E and echoes them. No editing.
    Echo,
    /// Consumes 0x20-0x7E, echoes every byte as decimal/hex codes.
    DebugEcho,
    /// Basic VT102: ctrl-a, ctrl-c, ctrl-e, backspace, arrows, tab.
    Vt102,
    /// VT102 that shows emitted codes and internal state instead of editing.
    DebugVt102,
}

/// Name/mode pairs, sorted by name.
const MODE_NAMES: &[(&str, TerminalMode)] = &[
    ("debug", TerminalMode::DebugEcho),
    ("debug_vt102", TerminalMode::DebugVt102),
    ("echo", TerminalMode::Echo),
    ("minimal", TerminalMode::Minimal),
    ("vt102", TerminalMode::Vt102),
];

impl TerminalMode {
    /// Short name used on the command line.
    pub fn name(self) -> &'static str {
        MODE_NAMES
            .iter()
            .find(|(_, m)| *m == self)
            .map(|(n, _)| *n)
            .unwrap_or("unknown")
    }

    /// Look a mode up by its short name.
    pub fn from_name(name: &str) -> Option<Self> {
        MODE_NAMES.iter().find(|(n, _)| *n == name).map(|(_, m)| *m)
    }

    /// All known modes, sorted by name.
    pub fn all() -> impl Iterator<Item = TerminalMode> {
        MODE_NAMES.iter().map(|(_, m)| *m)
    }

    /// True if the VT102 decoder and line editor are active.
    pub fn is_vt102(self) -> bool {
        matches!(self, TerminalMode::Vt102 | TerminalMode::DebugVt102)
    }

    /// True if the prompt is printed before each line.
    pub fn shows_prompt(self) -> bool {
        self != TerminalMode::Minimal
    }
}

/// Settings fixed at session construction.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleConfig<'a> {
    pub mode: TerminalMode,
    pub prompt: &'a str,
}

impl<'a> ConsoleConfig<'a> {
    pub const fn new(mode: TerminalMode, prompt: &'a str) -> Self {
        Self { mode, prompt }
    }
}

impl Default for ConsoleConfig<'_> {
    fn default() -> Self {
        Self::new(TerminalMode::Vt102, "> ")
    }
}
