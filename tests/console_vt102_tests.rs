//! VT102 decoder and output sequence tests

use uart_console::console::vt102::{arrow, ascii_count, csi, ESC};
use uart_console::console::{Key, ProtocolState, Vt102Decoder};

fn decode(bytes: &[u8]) -> Vec<Key> {
    let mut decoder = Vt102Decoder::new();
    bytes.iter().map(|&b| decoder.feed(b)).collect()
}

#[test]
fn test_decode_text_and_controls() {
    assert_eq!(
        decode(b"a\r\t\x08\x7f\x01\x05\x03"),
        [
            Key::Char(b'a'),
            Key::Enter,
            Key::Tab,
            Key::Backspace,
            Key::Backspace,
            Key::Home,
            Key::End,
            Key::Cancel,
        ]
    );
}

#[test]
fn test_decode_arrows() {
    let keys = decode(b"\x1b[A\x1b[B\x1b[C\x1b[D");
    let keys: Vec<_> = keys.into_iter().filter(|k| *k != Key::Ignored).collect();
    assert_eq!(keys, [Key::Up, Key::Down, Key::Right, Key::Left]);
}

#[test]
fn test_decode_states() {
    let mut decoder = Vt102Decoder::new();
    assert_eq!(decoder.state(), ProtocolState::Normal);
    assert_eq!(decoder.feed(ESC), Key::Ignored);
    assert_eq!(decoder.state(), ProtocolState::Escape);
    assert_eq!(decoder.feed(b'['), Key::Ignored);
    assert_eq!(decoder.state(), ProtocolState::Escape2);
    assert_eq!(decoder.feed(b'A'), Key::Up);
    assert_eq!(decoder.state(), ProtocolState::Normal);
}

#[test]
fn test_decode_abandoned_escape() {
    // ESC x decodes exactly like x
    assert_eq!(decode(b"\x1bx"), [Key::Ignored, Key::Char(b'x')]);
    assert_eq!(decode(b"\x1b\r"), [Key::Ignored, Key::Enter]);

    let mut decoder = Vt102Decoder::new();
    decoder.feed(ESC);
    decoder.feed(b'x');
    assert_eq!(decoder.state(), ProtocolState::Normal);
}

#[test]
fn test_decode_escape_twice() {
    let mut decoder = Vt102Decoder::new();
    decoder.feed(ESC);
    assert_eq!(decoder.feed(ESC), Key::Ignored);
    assert_eq!(decoder.state(), ProtocolState::Escape);
    decoder.feed(b'[');
    assert_eq!(decoder.feed(b'D'), Key::Left);
}

#[test]
fn test_decode_unsupported_sequence() {
    let mut decoder = Vt102Decoder::new();
    decoder.feed(ESC);
    decoder.feed(b'[');
    assert_eq!(decoder.feed(b'Z'), Key::Ignored);
    assert_eq!(decoder.state(), ProtocolState::Normal);
    assert_eq!(decoder.feed(b'Z'), Key::Char(b'Z'));
}

#[test]
fn test_decode_other_control_codes_ignored() {
    assert_eq!(decode(b"\x00\x02\n"), [Key::Ignored, Key::Ignored, Key::Ignored]);
}

#[test]
fn test_decode_reset() {
    let mut decoder = Vt102Decoder::new();
    decoder.feed(ESC);
    decoder.feed(b'[');
    decoder.reset();
    assert_eq!(decoder.state(), ProtocolState::Normal);
}

#[test]
fn test_state_names() {
    assert_eq!(ProtocolState::Normal.name(), "NORMAL");
    assert_eq!(ProtocolState::Escape.name(), "ESCAPE");
    assert_eq!(ProtocolState::Escape2.name(), "ESCAPE2");
}

#[test]
fn test_csi_sequences() {
    assert_eq!(csi(12, b'D').as_bytes(), b"\x1b[12D");
    assert_eq!(csi(1, b'P').as_bytes(), b"\x1b[1P");
    assert_eq!(csi(80, b'C').as_bytes(), b"\x1b[80C");
    assert!(csi(0, b'D').as_bytes().is_empty());
    assert_eq!(arrow(b'C'), *b"\x1b[C");
}

#[test]
fn test_ascii_count() {
    let mut buf = [0u8; 20];
    assert_eq!(ascii_count(0, &mut buf), 0);

    let n = ascii_count(405, &mut buf);
    assert_eq!(&buf[..n], b"405");

    let n = ascii_count(7, &mut buf);
    assert_eq!(&buf[..n], b"7");
}
