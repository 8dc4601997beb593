//! Command history with ring buffer
//!
//! Static allocation, `N` slots of `MAX_LINE_CHARS` bytes each. `N == 0`
//! compiles to an empty ring where every operation is a no-op.
//!
//! Browsing is tracked by a marker counting back from the newest entry:
//! `None` is live editing, `Some(0)` the newest entry, `Some(N - 1)` the oldest.

use crate::config::MAX_LINE_CHARS;

/// Result of a recall step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recall<'h> {
    /// Nothing to do, keep the current line
    Unchanged,
    /// Replace the current line with this entry
    Entry(&'h [u8]),
    /// Back at the live position, clear the current line
    Live,
}

/// Command history ring buffer
pub struct History<const N: usize> {
    /// Ring buffer of command lines
    entries: [[u8; MAX_LINE_CHARS]; N],
    /// Length of each entry (0 = never written)
    lengths: [usize; N],
    /// Slot holding the most recent entry
    tail: usize,
    /// Navigation position, `None` while editing live
    marker: Option<usize>,
}

impl<const N: usize> History<N> {
    /// Create empty history
    pub const fn new() -> Self {
        Self {
            entries: [[0u8; MAX_LINE_CHARS]; N],
            lengths: [0; N],
            tail: 0,
            marker: None,
        }
    }

    /// True when the ring has at least one slot
    pub const fn is_enabled(&self) -> bool {
        N > 0
    }

    /// Push a committed line.
    ///
    /// Blank lines and repeats of the newest entry are skipped. Returns
    /// true if the line was stored.
    pub fn push(&mut self, line: &[u8]) -> bool {
        if N == 0 || line.iter().all(|&b| b == b' ') {
            return false;
        }
        let len = line.len().min(MAX_LINE_CHARS);
        if self.slot(self.tail) == &line[..len] {
            return false;
        }

        self.tail = (self.tail + 1) % N;
        self.entries[self.tail][..len].copy_from_slice(&line[..len]);
        self.lengths[self.tail] = len;
        true
    }

    /// Step back to an older entry (up arrow).
    ///
    /// On the first step away from live editing, `live` (the line being
    /// edited) is pushed first so down arrow can bring it back.
    pub fn previous(&mut self, live: &[u8]) -> Recall<'_> {
        let next = self.marker.map_or(0, |m| m + 1);
        if next >= N {
            // exhausted
            return Recall::Unchanged;
        }
        if self.lengths[self.slot_index(next)] == 0 {
            // slot never written
            return Recall::Unchanged;
        }

        self.marker = Some(next);
        // A single slot cannot hold both the live line and the entry
        if next == 0 && N > 1 && self.push(live) {
            self.marker = Some(1);
        }

        let offset = self.marker.unwrap_or(0);
        Recall::Entry(self.slot(self.slot_index(offset)))
    }

    /// Step forward to a newer entry (down arrow).
    pub fn next(&mut self) -> Recall<'_> {
        match self.marker {
            None => Recall::Unchanged,
            Some(0) => {
                self.marker = None;
                Recall::Live
            }
            Some(m) => {
                self.marker = Some(m - 1);
                Recall::Entry(self.slot(self.slot_index(m - 1)))
            }
        }
    }

    /// Back to live editing (call when a line ends)
    pub fn reset_nav(&mut self) {
        self.marker = None;
    }

    /// Current navigation position (0 = newest)
    pub fn marker(&self) -> Option<usize> {
        self.marker
    }

    /// Entry at `offset` back from the newest, if that slot holds a line
    pub fn get(&self, offset: usize) -> Option<&[u8]> {
        if offset >= N {
            return None;
        }
        let idx = self.slot_index(offset);
        (self.lengths[idx] > 0).then(|| self.slot(idx))
    }

    /// Number of slots holding a line
    pub fn len(&self) -> usize {
        self.lengths.iter().filter(|&&l| l > 0).count()
    }

    /// True if nothing has been stored yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries from newest to oldest
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..N).map_while(move |offset| self.get(offset))
    }

    /// Ring index `offset` steps back from the tail. Caller ensures N > 0.
    fn slot_index(&self, offset: usize) -> usize {
        (self.tail + N - offset) % N
    }

    fn slot(&self, idx: usize) -> &[u8] {
        match (self.entries.get(idx), self.lengths.get(idx)) {
            (Some(entry), Some(&len)) => &entry[..len],
            _ => &[],
        }
    }
}

impl<const N: usize> Default for History<N> {
    fn default() -> Self {
        Self::new()
    }
}
