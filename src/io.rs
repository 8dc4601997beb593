//! Byte I/O boundary.
//!
//! The console core never touches hardware. The embedding application
//! supplies a [`ByteSource`] (UART RX, stdin, a test script) and a
//! [`ByteSink`] (UART TX, stdout, a capture buffer).

use core::fmt;

/// Destination for every byte the console emits.
pub trait ByteSink {
    /// Emit one byte to the attached device.
    fn write_byte(&mut self, byte: u8);

    /// Emit a run of bytes.
    fn write_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }
}

/// Origin of input bytes.
pub trait ByteSource {
    /// Next byte if one is available, `None` otherwise. Never an error.
    fn try_read_byte(&mut self) -> Option<u8>;
}

impl<T: ByteSink + ?Sized> ByteSink for &mut T {
    fn write_byte(&mut self, byte: u8) {
        (**self).write_byte(byte);
    }
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    fn try_read_byte(&mut self) -> Option<u8> {
        (**self).try_read_byte()
    }
}

/// Capture buffer. Bytes past capacity are dropped.
impl<const N: usize> ByteSink for heapless::Vec<u8, N> {
    fn write_byte(&mut self, byte: u8) {
        let _ = self.push(byte);
    }
}

/// Replays a fixed byte slice, then reports nothing available.
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes not yet read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }
}

impl ByteSource for SliceSource<'_> {
    fn try_read_byte(&mut self) -> Option<u8> {
        let b = *self.bytes.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }
}

/// `core::fmt::Write` adapter over a sink.
///
/// Text output (diagnostics, help, handler output) goes through here so
/// `\n` reaches the terminal as `\r\n`.
pub struct SinkWriter<'s, S: ByteSink + ?Sized> {
    sink: &'s mut S,
}

impl<'s, S: ByteSink + ?Sized> SinkWriter<'s, S> {
    pub fn new(sink: &'s mut S) -> Self {
        Self { sink }
    }
}

impl<S: ByteSink + ?Sized> fmt::Write for SinkWriter<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &b in s.as_bytes() {
            if b == b'\n' {
                self.sink.write_byte(b'\r');
            }
            self.sink.write_byte(b);
        }
        Ok(())
    }
}
