//! Line buffer for console input
//!
//! Fixed capacity, edited in place at the cursor. Terminal output for
//! each edit is the session's job; this type only keeps
//! `0 <= cursor <= len <= MAX_LINE_CHARS`.

use crate::config::MAX_LINE_CHARS;
use super::ConsoleError;

/// Line input buffer with an edit cursor
pub struct LineBuffer {
    buf: [u8; MAX_LINE_CHARS],
    len: usize,
    cursor: usize,
}

impl LineBuffer {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; MAX_LINE_CHARS],
            len: 0,
            cursor: 0,
        }
    }

    /// Insert a byte at the cursor, shifting the tail right
    pub fn insert(&mut self, c: u8) -> Result<(), ConsoleError> {
        if self.len >= MAX_LINE_CHARS {
            return Err(ConsoleError::LineTooLong);
        }
        self.buf.copy_within(self.cursor..self.len, self.cursor + 1);
        self.buf[self.cursor] = c;
        self.len += 1;
        self.cursor += 1;
        Ok(())
    }

    /// Delete the byte left of the cursor. Returns false at column 0.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.buf.copy_within(self.cursor..self.len, self.cursor - 1);
        self.cursor -= 1;
        self.len -= 1;
        true
    }

    /// Cursor one left. Returns false if already at column 0.
    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Cursor one right. Returns false if already at the end.
    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.len {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Cursor to column 0. Returns the number of columns moved.
    pub fn home(&mut self) -> usize {
        let moved = self.cursor;
        self.cursor = 0;
        moved
    }

    /// Cursor to end of line. Returns the number of columns moved.
    pub fn end(&mut self) -> usize {
        let moved = self.len - self.cursor;
        self.cursor = self.len;
        moved
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.len = 0;
        self.cursor = 0;
    }

    /// Set buffer contents, cursor at the end. Truncates at capacity.
    pub fn set(&mut self, bytes: &[u8]) {
        let copy_len = bytes.len().min(MAX_LINE_CHARS);
        self.buf[..copy_len].copy_from_slice(&bytes[..copy_len]);
        self.len = copy_len;
        self.cursor = copy_len;
    }

    /// Get buffer as string slice
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Valid bytes, mutable. Used by the tokenizer once the line is committed.
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.buf[..self.len]
    }

    /// Get buffer length
    pub fn len(&self) -> usize {
        self.len
    }

    /// Edit position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// No room for another byte
    pub fn is_full(&self) -> bool {
        self.len >= MAX_LINE_CHARS
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
