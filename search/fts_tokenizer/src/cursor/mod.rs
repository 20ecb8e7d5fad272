//! Byte cursor that decodes one character per step.
//!
//! The cursor only moves forward. Each [`Cursor::bump`] consumes at least one
//! byte: a well-formed UTF-8 sequence is consumed whole, anything else is
//! consumed one byte at a time and reported as a decode failure.

/// One decoded step of the scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Decoded {
    /// Byte offset of the first byte of this character.
    pub offset: usize,
    /// The character, or `None` for an undecodable byte.
    pub ch: Option<char>,
}

/// Forward-only cursor over the input bytes.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at position 0.
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current byte offset in the input.
    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Length of the input in bytes.
    #[inline]
    pub(crate) fn source_len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` once every byte has been consumed.
    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// The byte at `offset`, or `None` past the end.
    #[inline]
    pub(crate) fn byte_at(&self, offset: usize) -> Option<u8> {
        self.buf.get(offset).copied()
    }

    /// Input bytes in `start..end`.
    ///
    /// # Contract
    ///
    /// `start <= end <= source_len`. Run boundaries come from the cursor's
    /// own offsets, so this holds for every slice the tokenizer takes.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        debug_assert!(
            end <= self.buf.len(),
            "slice end {end} exceeds source length {}",
            self.buf.len()
        );
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        &self.buf[start..end]
    }

    /// Returns the number of bytes in the UTF-8 character starting with `byte`.
    ///
    /// Uses the leading byte to determine character width:
    /// - `0xC0..=0xDF`: 2 bytes
    /// - `0xE0..=0xEF`: 3 bytes
    /// - `0xF0..=0xF7`: 4 bytes
    /// - Everything else (ASCII, continuation, invalid): 1 byte
    #[inline]
    pub(crate) fn utf8_char_width(byte: u8) -> usize {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Decode the character at the cursor and advance past it.
    ///
    /// Returns `None` at EOF. Otherwise the cursor moves forward by the
    /// character's width, or by exactly one byte if the bytes at the cursor
    /// are not a well-formed UTF-8 sequence (overlong forms, surrogates,
    /// stray continuation bytes, truncated sequences).
    pub(crate) fn bump(&mut self) -> Option<Decoded> {
        let offset = self.pos;
        let lead = self.byte_at(offset)?;

        if lead.is_ascii() {
            self.pos += 1;
            return Some(Decoded {
                offset,
                ch: Some(char::from(lead)),
            });
        }

        let width = Self::utf8_char_width(lead);
        let ch = self
            .buf
            .get(offset..offset + width)
            .filter(|_| width > 1)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
            .and_then(|s| s.chars().next());

        self.pos += if ch.is_some() { width } else { 1 };
        Some(Decoded { offset, ch })
    }
}

#[cfg(test)]
mod tests;
