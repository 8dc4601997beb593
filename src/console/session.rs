//! Console session: one interactive connection
//!
//! Owns the line being edited, the decoder, history and completion state,
//! and the output sink. Every input byte runs to completion synchronously;
//! nothing here blocks or allocates.

use core::fmt::Write;

use crate::config::{ConsoleConfig, TerminalMode, HISTORY_LINES, MAX_LINE_CHARS};
use crate::io::{ByteSink, ByteSource, SinkWriter};
use crate::logging::LogStream;
use super::{
    execute, parse_line, CommandDescriptor, Completer, ConsoleError, History, Key,
    LineBuffer, Outcome, ProtocolState, Recall, Vt102Decoder,
};
use super::vt102::{arrow, csi, BS, CTRL_C, INSERT_MODE};

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Console state machine
///
/// `H` is the history depth; `0` disables history and the up/down arrows.
pub struct Session<'a, S: ByteSink, const H: usize = HISTORY_LINES> {
    commands: &'a [CommandDescriptor<'a>],
    sink: S,
    config: ConsoleConfig<'a>,
    line: LineBuffer,
    decoder: Vt102Decoder,
    completer: Completer,
    history: History<H>,
    prompt_shown: bool,
    log: Option<&'a LogStream>,
    /// Input bytes seen, stamps log entries
    seq: u32,
}

impl<'a, S: ByteSink> Session<'a, S> {
    /// Create a session with the default history depth
    pub fn new(commands: &'a [CommandDescriptor<'a>], sink: S, config: ConsoleConfig<'a>) -> Self {
        Self::with_history(commands, sink, config)
    }
}

impl<'a, S: ByteSink, const H: usize> Session<'a, S, H> {
    /// Create a session with `H` history slots
    pub fn with_history(commands: &'a [CommandDescriptor<'a>], sink: S, config: ConsoleConfig<'a>) -> Self {
        let mut session = Self {
            commands,
            sink,
            config,
            line: LineBuffer::new(),
            decoder: Vt102Decoder::new(),
            completer: Completer::new(commands.len()),
            history: History::new(),
            prompt_shown: false,
            log: None,
            seq: 0,
        };
        session.reset_line();
        session
    }

    /// Record console events into `log`
    pub fn with_log(mut self, log: &'a LogStream) -> Self {
        self.log = Some(log);
        self
    }

    /// Print the prompt, once per line
    pub fn show_prompt(&mut self) {
        if self.prompt_shown || !self.config.mode.shows_prompt() {
            return;
        }
        self.sink.write_bytes(self.config.prompt.as_bytes());
        if self.config.mode == TerminalMode::Vt102 {
            // Re-sent every line in case the terminal was reset
            self.sink.write_bytes(INSERT_MODE);
        }
        self.prompt_shown = true;
    }

    /// Print welcome banner
    pub fn print_banner(&mut self) {
        let mut out = SinkWriter::new(&mut self.sink);
        let _ = writeln!(out, "\n{}", VERSION);
        let _ = writeln!(out, "Type 'help' for commands.");
        self.show_prompt();
    }

    /// Show the prompt if due, then process at most one byte from `source`
    pub fn poll<R: ByteSource + ?Sized>(&mut self, source: &mut R) -> Option<Result<Outcome, ConsoleError>> {
        self.show_prompt();
        let byte = source.try_read_byte()?;
        self.process_byte(byte)
    }

    /// Process a single input byte
    ///
    /// Returns `Some` when the line ended (run, cancelled or rejected),
    /// `None` while it is still being edited.
    pub fn process_byte(&mut self, byte: u8) -> Option<Result<Outcome, ConsoleError>> {
        self.seq = self.seq.wrapping_add(1);
        if !byte.is_ascii() {
            // 7-bit input only
            return None;
        }

        let result = match self.config.mode {
            TerminalMode::Minimal => self.process_plain(byte),
            TerminalMode::Echo => {
                self.echo(byte);
                self.process_plain(byte)
            }
            TerminalMode::DebugEcho => {
                self.debug_echo(byte);
                self.process_plain(byte)
            }
            TerminalMode::Vt102 | TerminalMode::DebugVt102 => {
                let key = self.decoder.feed(byte);
                self.process_key(key)
            }
        };

        if self.config.mode == TerminalMode::DebugVt102 {
            self.dump_state();
        }
        result
    }

    // --- Accessors ---

    /// Bytes of the line being edited
    pub fn line(&self) -> &[u8] {
        self.line.as_bytes()
    }

    /// Line being edited as text
    pub fn line_str(&self) -> &str {
        self.line.as_str()
    }

    /// Edit position within the line
    pub fn cursor(&self) -> usize {
        self.line.cursor()
    }

    /// Prefix length frozen for tab completion
    pub fn tab_length(&self) -> usize {
        self.completer.prefix_len()
    }

    pub fn protocol_state(&self) -> ProtocolState {
        self.decoder.state()
    }

    pub fn mode(&self) -> TerminalMode {
        self.config.mode
    }

    pub fn is_prompt_shown(&self) -> bool {
        self.prompt_shown
    }

    pub fn history(&self) -> &History<H> {
        &self.history
    }

    pub fn commands(&self) -> &'a [CommandDescriptor<'a>] {
        self.commands
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    // --- Line handling ---

    /// Minimal/echo modes: text, enter and ctrl-c only
    fn process_plain(&mut self, byte: u8) -> Option<Result<Outcome, ConsoleError>> {
        match byte {
            b'\r' => Some(self.commit()),
            CTRL_C => Some(self.cancel()),
            0x20..=0x7E => self.insert(byte),
            _ => None,
        }
    }

    fn process_key(&mut self, key: Key) -> Option<Result<Outcome, ConsoleError>> {
        match key {
            Key::Char(c) => {
                self.vt_put(c);
                return self.insert(c);
            }
            Key::Enter => {
                self.vt_put(b'\r');
                self.vt_put(b'\n');
                return Some(self.commit());
            }
            Key::Cancel => return Some(self.cancel()),
            Key::Tab => self.tab_pressed(),
            Key::Backspace => self.backspace(),
            Key::Home => self.beginning_of_line(),
            Key::End => self.end_of_line(),
            Key::Up => self.history_previous(),
            Key::Down => self.history_next(),
            Key::Left => {
                if self.line.move_left() {
                    self.vt_put_all(&arrow(b'D'));
                }
            }
            Key::Right => {
                if self.line.move_right() {
                    self.vt_put_all(&arrow(b'C'));
                }
            }
            Key::Ignored => {}
        }
        None
    }

    fn insert(&mut self, c: u8) -> Option<Result<Outcome, ConsoleError>> {
        match self.line.insert(c) {
            Ok(()) => {
                self.completer.set_prefix_len(self.line.len());
                None
            }
            Err(e) => {
                let mut out = SinkWriter::new(&mut self.sink);
                let _ = writeln!(out, "\n{}", e);
                self.log_error(e);
                self.reset_line();
                Some(Err(e))
            }
        }
    }

    /// Enter: history, tokenize, dispatch, start a new line
    fn commit(&mut self) -> Result<Outcome, ConsoleError> {
        if let Some(log) = self.log {
            crate::clog_debug!(log, self.seq, "line \"{}\"", self.line.as_str());
        }
        // Before tokenizing, so a rejected line can be recalled and fixed
        if self.history.push(self.line.as_bytes()) {
            if let Some(log) = self.log {
                crate::clog_trace!(log, self.seq, "history push");
            }
        }

        let result = {
            let mut out = SinkWriter::new(&mut self.sink);
            match parse_line(self.line.as_mut_bytes()) {
                Ok(cmd) => {
                    let result = execute(&cmd, self.commands, &mut out);
                    if let (Ok(Outcome::Executed), Some(log), Some(name)) = (result, self.log, cmd.command()) {
                        crate::clog_info!(log, self.seq, "exec {} ({} args)", name, cmd.arg_count());
                    }
                    result
                }
                Err(e) => {
                    let _ = writeln!(out, "{}", e);
                    Err(e)
                }
            }
        };

        if let Err(e) = result {
            self.log_error(e);
        }
        self.reset_line();
        result
    }

    fn cancel(&mut self) -> Result<Outcome, ConsoleError> {
        let mut out = SinkWriter::new(&mut self.sink);
        let _ = writeln!(out, "\nCancelled");
        if let Some(log) = self.log {
            crate::clog_info!(log, self.seq, "cancelled");
        }
        self.reset_line();
        Ok(Outcome::Cancelled)
    }

    /// Pristine state: empty line, cursor 0, decoder normal, not browsing
    fn reset_line(&mut self) {
        self.line.clear();
        self.prompt_shown = false;
        self.completer.reset(self.commands.len());
        self.history.reset_nav();
        self.decoder.reset();
    }

    // --- VT102 editing ---

    fn backspace(&mut self) {
        if !self.line.backspace() {
            return;
        }
        self.completer.set_prefix_len(self.line.len());
        self.vt_put(BS);
        self.vt_put_all(csi(1, b'P').as_bytes());
    }

    fn beginning_of_line(&mut self) {
        let moved = self.line.home();
        self.vt_put_all(csi(moved, b'D').as_bytes());
    }

    fn end_of_line(&mut self) {
        let moved = self.line.end();
        self.vt_put_all(csi(moved, b'C').as_bytes());
    }

    fn erase_line(&mut self) {
        if self.line.is_empty() {
            return;
        }
        self.beginning_of_line();
        self.vt_put_all(csi(self.line.len(), b'P').as_bytes());
        self.line.clear();
        self.completer.set_prefix_len(0);
    }

    fn replace_line(&mut self, text: &[u8]) {
        self.erase_line();
        self.line.set(text);
        self.completer.set_prefix_len(self.line.len());
        for &b in &text[..self.line.len()] {
            self.vt_put(b);
        }
    }

    fn tab_pressed(&mut self) {
        let commands = self.commands;
        if let Some(candidate) = self.completer.complete(self.line.as_bytes(), commands) {
            // Keep matching the typed prefix on the next tab
            let prefix_len = self.completer.prefix_len();
            self.replace_line(candidate.as_bytes());
            self.completer.set_prefix_len(prefix_len);
        }
    }

    fn history_previous(&mut self) {
        let mut entry = [0u8; MAX_LINE_CHARS];
        let len = match self.history.previous(self.line.as_bytes()) {
            Recall::Entry(e) => {
                entry[..e.len()].copy_from_slice(e);
                e.len()
            }
            Recall::Live | Recall::Unchanged => return,
        };
        self.replace_line(&entry[..len]);
    }

    fn history_next(&mut self) {
        let mut entry = [0u8; MAX_LINE_CHARS];
        let target = match self.history.next() {
            Recall::Entry(e) => {
                entry[..e.len()].copy_from_slice(e);
                Some(e.len())
            }
            Recall::Live => None,
            Recall::Unchanged => return,
        };
        match target {
            Some(len) => self.replace_line(&entry[..len]),
            None => self.erase_line(),
        }
    }

    // --- Output ---

    /// Editor output byte; shown as codes in debug VT102 mode
    fn vt_put(&mut self, byte: u8) {
        if self.config.mode == TerminalMode::DebugVt102 {
            self.debug_echo(byte);
        } else {
            self.sink.write_byte(byte);
        }
    }

    fn vt_put_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.vt_put(b);
        }
    }

    fn echo(&mut self, byte: u8) {
        match byte {
            b'\r' => self.sink.write_bytes(b"\r\n"),
            0x20..=0x7E => self.sink.write_byte(byte),
            _ => {}
        }
    }

    /// `%03d %02x ` then the character if printable
    fn debug_echo(&mut self, byte: u8) {
        let mut out = SinkWriter::new(&mut self.sink);
        let _ = write!(out, "{:03} {:02x} ", byte, byte);
        if (0x20..=0x7E).contains(&byte) {
            let _ = out.write_char(byte as char);
        }
        let _ = writeln!(out);
    }

    /// Internal state, shown after every byte in debug VT102 mode
    fn dump_state(&mut self) {
        let mut out = SinkWriter::new(&mut self.sink);
        let _ = writeln!(
            out,
            "state={} line_length={} cursor_index={}",
            self.decoder.state().name(),
            self.line.len(),
            self.line.cursor(),
        );
        let _ = writeln!(out, "\"{}\"", self.line.as_str());
        let _ = write!(out, " ");
        for _ in 0..self.line.cursor() {
            let _ = out.write_char(' ');
        }
        let _ = writeln!(out, "^");
    }

    fn log_error(&self, e: ConsoleError) {
        if let Some(log) = self.log {
            crate::clog_warn!(log, self.seq, "{} {}", e.code(), e.message());
        }
    }
}
