//! Fixed-capacity token value.
//!
//! A token is a length-prefixed 24-byte buffer plus a 64-bit position. The
//! buffer is always zero past the payload, so derived equality and hashing
//! compare payloads exactly and never touch the heap.

use std::fmt;

/// Maximum payload length of a token, in bytes.
pub const MAX_TOKEN_SIZE: usize = 23;

/// Size of the raw token buffer: one length byte plus the payload capacity.
pub const TOKEN_BUF_SIZE: usize = 1 + MAX_TOKEN_SIZE;

/// Payload prefix of marker tokens (`_MARKER_100`, `_MARKER_200`, ...).
pub const MARKER_PREFIX: &[u8] = b"_MARKER_";

/// What a token's position means.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A word or n-gram. Position is a logical token index.
    Content,
    /// A synthetic marker. Position is a byte offset into the input.
    Marker,
}

/// One unit of tokenizer output.
///
/// # Layout
///
/// ```text
/// raw:      [len, payload[0], ..., payload[len-1], 0, ..., 0]   (24 bytes)
/// position: i64
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    raw: [u8; TOKEN_BUF_SIZE],
    position: i64,
}

const _: () = assert!(std::mem::size_of::<Token>() == 32);

impl Token {
    /// Build a token from a payload and position.
    ///
    /// Returns `None` if `payload` is longer than [`MAX_TOKEN_SIZE`].
    pub fn new(payload: &[u8], position: i64) -> Option<Self> {
        let mut buf = PayloadBuf::new();
        buf.push_slice(payload).then(|| buf.into_token(position))
    }

    /// Payload bytes (without the length prefix).
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.raw[1..=self.len()]
    }

    /// Payload as text.
    ///
    /// Every payload the tokenizer produces is valid UTF-8; tokens built from
    /// arbitrary bytes via [`Token::new`] may not be, in which case this is
    /// `None`.
    pub fn payload_str(&self) -> Option<&str> {
        std::str::from_utf8(self.payload()).ok()
    }

    /// Logical token index for content tokens, byte offset for markers.
    #[inline]
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Payload length in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        usize::from(self.raw[0])
    }

    /// Returns `true` if the payload is empty.
    ///
    /// Never the case for tokens produced by the tokenizer.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw[0] == 0
    }

    /// The raw length-prefixed buffer, suitable as a fixed-width index key.
    #[inline]
    pub fn as_raw(&self) -> &[u8; TOKEN_BUF_SIZE] {
        &self.raw
    }

    /// Whether this is a marker token.
    pub fn is_marker(&self) -> bool {
        self.marker_threshold().is_some()
    }

    /// The threshold a marker token records (`_MARKER_300` → `300`).
    ///
    /// `None` for content tokens. The tokenizer never produces a content
    /// token with the marker prefix: Latin normalization strips `_`, and a
    /// CJK n-gram spans at most three characters, too few to spell
    /// `_MARKER_` plus a digit.
    pub fn marker_threshold(&self) -> Option<i64> {
        let digits = self.payload().strip_prefix(MARKER_PREFIX)?;
        if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
            return None;
        }
        std::str::from_utf8(digits).ok()?.parse().ok()
    }

    /// Content or marker.
    pub fn kind(&self) -> TokenKind {
        if self.is_marker() {
            TokenKind::Marker
        } else {
            TokenKind::Content
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.payload()))
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({:?} @ {})", self.to_string(), self.position)
    }
}

/// Payload under construction, stored directly in token layout.
///
/// All pushes are all-or-nothing: a push that would exceed
/// [`MAX_TOKEN_SIZE`] leaves the buffer untouched and returns `false`.
#[derive(Clone, Copy)]
pub(crate) struct PayloadBuf {
    raw: [u8; TOKEN_BUF_SIZE],
}

impl PayloadBuf {
    pub(crate) fn new() -> Self {
        Self {
            raw: [0; TOKEN_BUF_SIZE],
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        usize::from(self.raw[0])
    }

    #[inline]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.raw[1..=self.len()]
    }

    /// Remaining capacity in bytes.
    #[inline]
    pub(crate) fn room(&self) -> usize {
        MAX_TOKEN_SIZE - self.len()
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "len + bytes.len() <= MAX_TOKEN_SIZE which fits in u8"
    )]
    pub(crate) fn push_slice(&mut self, bytes: &[u8]) -> bool {
        if bytes.len() > self.room() {
            return false;
        }
        let len = self.len();
        self.raw[1 + len..1 + len + bytes.len()].copy_from_slice(bytes);
        self.raw[0] = (len + bytes.len()) as u8;
        true
    }

    pub(crate) fn push_char(&mut self, c: char) -> bool {
        let mut utf8 = [0; 4];
        self.push_slice(c.encode_utf8(&mut utf8).as_bytes())
    }

    pub(crate) fn into_token(self, position: i64) -> Token {
        Token {
            raw: self.raw,
            position,
        }
    }
}

impl fmt::Write for PayloadBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.push_slice(s.as_bytes()) {
            Ok(())
        } else {
            Err(fmt::Error)
        }
    }
}

#[cfg(test)]
mod tests;
