//! VT102 input decoding and output sequences
//!
//! Supported input (everything else is absorbed):
//!
//! | bytes          | key                          |
//! |----------------|------------------------------|
//! | 0x20-0x7E      | text                         |
//! | `\r`           | enter                        |
//! | `\t`           | tab completion               |
//! | 0x08, 0x7F     | backspace                    |
//! | 0x01 (ctrl-a)  | start of line                |
//! | 0x05 (ctrl-e)  | end of line                  |
//! | 0x03 (ctrl-c)  | cancel line                  |
//! | `ESC [ A`/`B`  | history previous / next      |
//! | `ESC [ C`/`D`  | cursor right / left          |
//!
//! An `ESC` not followed by `[` is dropped and the byte after it is decoded
//! as if the `ESC` never came.

/// Escape
pub const ESC: u8 = 0x1B;
/// Backspace
pub const BS: u8 = 0x08;
/// Delete, sent by most terminals for the backspace key
pub const DEL: u8 = 0x7F;
/// Ctrl-A
pub const CTRL_A: u8 = 0x01;
/// Ctrl-C
pub const CTRL_C: u8 = 0x03;
/// Ctrl-E
pub const CTRL_E: u8 = 0x05;

/// `ESC [ 4 h`: terminal insert mode, sent after every prompt
pub const INSERT_MODE: &[u8] = b"\x1b[4h";

/// Decoder state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolState {
    Normal,
    /// Got ESC
    Escape,
    /// Got ESC [
    Escape2,
}

impl ProtocolState {
    pub fn name(self) -> &'static str {
        match self {
            ProtocolState::Normal => "NORMAL",
            ProtocolState::Escape => "ESCAPE",
            ProtocolState::Escape2 => "ESCAPE2",
        }
    }
}

/// Decoded input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable byte to insert
    Char(u8),
    Enter,
    Tab,
    Backspace,
    Home,
    End,
    Cancel,
    Up,
    Down,
    Left,
    Right,
    /// Consumed with no effect (escape prefix, unsupported code)
    Ignored,
}

/// Byte-at-a-time VT102 decoder
#[derive(Debug, Clone)]
pub struct Vt102Decoder {
    state: ProtocolState,
}

impl Vt102Decoder {
    pub const fn new() -> Self {
        Self { state: ProtocolState::Normal }
    }

    pub fn state(&self) -> ProtocolState {
        self.state
    }

    pub fn reset(&mut self) {
        self.state = ProtocolState::Normal;
    }

    /// Decode one byte.
    ///
    /// A byte that abandons an `ESC` is decoded again in `Normal`, once.
    pub fn feed(&mut self, byte: u8) -> Key {
        match self.state {
            ProtocolState::Escape2 => {
                self.state = ProtocolState::Normal;
                final_byte(byte)
            }
            ProtocolState::Escape if byte == b'[' => {
                self.state = ProtocolState::Escape2;
                Key::Ignored
            }
            ProtocolState::Escape | ProtocolState::Normal => {
                self.state = ProtocolState::Normal;
                self.normal(byte)
            }
        }
    }

    fn normal(&mut self, byte: u8) -> Key {
        match byte {
            0x20..=0x7E => Key::Char(byte),
            b'\r' => Key::Enter,
            b'\t' => Key::Tab,
            ESC => {
                self.state = ProtocolState::Escape;
                Key::Ignored
            }
            BS | DEL => Key::Backspace,
            CTRL_E => Key::End,
            CTRL_A => Key::Home,
            CTRL_C => Key::Cancel,
            _ => Key::Ignored,
        }
    }
}

impl Default for Vt102Decoder {
    fn default() -> Self {
        Self::new()
    }
}

fn final_byte(byte: u8) -> Key {
    match byte {
        b'A' => Key::Up,
        b'B' => Key::Down,
        b'C' => Key::Right,
        b'D' => Key::Left,
        _ => Key::Ignored, // unsupported sequence
    }
}

/// Control sequence with a decimal count, built on the stack
pub struct Csi {
    buf: [u8; 24],
    len: usize,
}

impl Csi {
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

/// `ESC [ <count> <final>`, empty when `count` is 0.
///
/// `csi(12, b'D')` moves the cursor 12 columns left.
pub fn csi(count: usize, final_byte: u8) -> Csi {
    let mut out = Csi { buf: [0; 24], len: 0 };
    if count == 0 {
        return out;
    }

    out.buf[0] = ESC;
    out.buf[1] = b'[';
    let digits = ascii_count(count, &mut out.buf[2..23]);
    out.buf[2 + digits] = final_byte;
    out.len = digits + 3;
    out
}

/// `ESC [ <final>` with no count, as a terminal sends it for arrow keys
pub fn arrow(final_byte: u8) -> [u8; 3] {
    [ESC, b'[', final_byte]
}

/// Decimal ASCII of `n`, most significant digit first. Writes nothing for 0.
///
/// Returns the number of digits written. `buf` must hold 20 bytes.
pub fn ascii_count(mut n: usize, buf: &mut [u8]) -> usize {
    let mut digits = [0u8; 20];
    let mut len = 0;
    while n > 0 && len < digits.len() {
        digits[len] = b'0' + (n % 10) as u8;
        n /= 10;
        len += 1;
    }
    let len = len.min(buf.len());
    for (dst, src) in buf.iter_mut().zip(digits[..len].iter().rev()) {
        *dst = *src;
    }
    len
}
