//! Console log output.
//!
//! Drains a [`LogStream`] onto any [`ByteSink`]: a second UART on the
//! device, stderr on a host. Runs from the main loop, never from inside the
//! session.
//!
//! # Wiring
//!
//! ```text
//! Session ──clog!──▶ LogStream ──drain_to()──▶ ByteSink
//!                                              └─▶ UART1 / stderr
//! ```

use crate::io::ByteSink;
use crate::logging::{LogEntry, LogStream};

/// Formatted line capacity: prefix, level, message and CRLF.
const LINE_BUF_LEN: usize = 128;

/// Format log entry to bytes.
///
/// Format: `[seq] LEVEL: message\r\n`
pub fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    crate::logging::format_to_buffer(
        buf,
        format_args!("[{:8}] {}: {}\r\n", entry.seq, entry.level.as_str(), entry.message()),
    )
}

/// Write a single entry to a sink.
pub fn write_entry<S: ByteSink + ?Sized>(sink: &mut S, entry: &LogEntry) {
    let mut buf = [0u8; LINE_BUF_LEN];
    let len = format_log_entry(entry, &mut buf);
    sink.write_bytes(&buf[..len]);
}

/// Drain every pending entry into `sink`, then report drops.
///
/// Returns the number of entries written.
pub fn drain_to<S: ByteSink + ?Sized, const N: usize>(stream: &LogStream<N>, sink: &mut S) -> usize {
    let mut written = 0;
    while let Some(entry) = stream.drain() {
        write_entry(sink, &entry);
        written += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        let mut buf = [0u8; 48];
        let len = crate::logging::format_to_buffer(
            &mut buf,
            format_args!("[WARN] Dropped: {}\r\n", dropped),
        );
        sink.write_bytes(&buf[..len]);
        stream.reset_dropped();
    }

    written
}
