//! Logical positions and the markers that anchor them to byte offsets.
//!
//! [`PositionClock`] is the tokenizer's slot counter. Every advance that
//! reaches the next multiple of [`MARKER_INTERVAL`] produces a marker token
//! carrying the byte offset at that moment.
//!
//! [`MarkerIndex`] is the consumer side: it collects those markers into a
//! sparse table and answers "roughly where in the input is position `p`".

use std::fmt::Write;
use std::ops::Range;

use tracing::debug;

use crate::token::{PayloadBuf, Token};
use crate::MARKER_INTERVAL;

/// Logical-position counter with marker scheduling.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PositionClock {
    current: i64,
    next_marker: i64,
}

impl PositionClock {
    pub(crate) fn new() -> Self {
        Self {
            current: 0,
            next_marker: MARKER_INTERVAL,
        }
    }

    /// The position the next content token will carry.
    #[inline]
    pub(crate) fn current(&self) -> i64 {
        self.current
    }

    /// Advance by one slot.
    ///
    /// Returns the marker token if this advance reached the next threshold.
    /// `byte_offset` becomes the marker's position.
    pub(crate) fn advance(&mut self, byte_offset: usize) -> Option<Token> {
        self.current += 1;
        if self.current < self.next_marker {
            return None;
        }
        let threshold = self.next_marker;
        self.next_marker += MARKER_INTERVAL;
        debug!(threshold, byte_offset, "marker");
        Some(marker_token(threshold, byte_offset))
    }
}

/// Build `_MARKER_<threshold>` at `byte_offset`.
///
/// The payload holds thresholds up to 15 digits, far beyond any input the
/// offsets could describe.
fn marker_token(threshold: i64, byte_offset: usize) -> Token {
    let mut buf = PayloadBuf::new();
    let written = write!(buf, "_MARKER_{threshold}");
    debug_assert!(written.is_ok(), "marker threshold {threshold} overflows payload");
    buf.into_token(i64::try_from(byte_offset).unwrap_or(i64::MAX))
}

/// Sparse map from marker thresholds to byte offsets.
///
/// Built from a token stream; content tokens are ignored. Thresholds are
/// recorded in the order the tokenizer emits them, which is ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarkerIndex {
    /// `(threshold, byte_offset)`, ascending by threshold.
    entries: Vec<(i64, usize)>,
    /// Length of the tokenized input, the end of the last span.
    input_len: usize,
}

impl MarkerIndex {
    /// Create an empty index for an input of `input_len` bytes.
    pub fn new(input_len: usize) -> Self {
        Self {
            entries: Vec::new(),
            input_len,
        }
    }

    /// Collect every marker from `tokens`.
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>, input_len: usize) -> Self {
        let mut index = Self::new(input_len);
        for token in tokens {
            index.record(&token);
        }
        index
    }

    /// Record `token` if it is a marker. Returns whether it was.
    ///
    /// Markers out of threshold order are ignored.
    pub fn record(&mut self, token: &Token) -> bool {
        let Some(threshold) = token.marker_threshold() else {
            return false;
        };
        if self.entries.last().is_some_and(|&(last, _)| last >= threshold) {
            return false;
        }
        let offset = usize::try_from(token.position()).unwrap_or(0);
        self.entries.push((threshold, offset.min(self.input_len)));
        true
    }

    /// Number of recorded markers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no markers were recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recorded `(threshold, byte_offset)` pairs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, usize)> + '_ {
        self.entries.iter().copied()
    }

    /// Byte offset recorded for `threshold`.
    pub fn offset_of(&self, threshold: i64) -> Option<usize> {
        self.entries
            .binary_search_by_key(&threshold, |&(t, _)| t)
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// Byte range covering the start of every token whose position lies in
    /// the same marker interval as `position`.
    ///
    /// Runs from the marker at or below `position` to the next marker, or to
    /// the end of the input. A CJK window that starts inside the range may
    /// extend up to two characters past its end.
    pub fn span_for(&self, position: i64) -> Range<usize> {
        let idx = self.entries.partition_point(|&(t, _)| t <= position);
        let start = idx.checked_sub(1).map_or(0, |i| self.entries[i].1);
        let end = self.entries.get(idx).map_or(self.input_len, |&(_, off)| off);
        start..end.max(start)
    }

    /// Byte range between the markers for thresholds `from` and `to`.
    ///
    /// `None` if either marker was not recorded or `from > to`.
    pub fn span_between(&self, from: i64, to: i64) -> Option<Range<usize>> {
        if from > to {
            return None;
        }
        let start = self.offset_of(from)?;
        let end = self.offset_of(to)?;
        Some(start..end.max(start))
    }
}
