//! Sliding n-gram windows over a CJK run.
//!
//! Four running offsets `a <= b <= c <= d` bound zero to three characters
//! from the window start. Each step yields `a..d`, then shifts every offset
//! one character to the right; once `d` hits the end of the run it stays
//! put, so the tail windows shrink to two characters and then one.
//!
//! ```text
//! run:     相 见 时 难
//! windows: 相见时, 见时难, 时难, 难
//! ```

use crate::cursor::Cursor;
use crate::token::MAX_TOKEN_SIZE;

/// Widest window, in characters.
pub(crate) const NGRAM_WIDTH: usize = 3;

// A full window of 4-byte characters always fits in a token.
const _: () = assert!(NGRAM_WIDTH * 4 <= MAX_TOKEN_SIZE);

/// One window: its bytes and the absolute offset of its first character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Ngram<'a> {
    pub offset: usize,
    pub bytes: &'a [u8],
}

/// Iterator over the windows of one CJK run.
#[derive(Clone, Debug)]
pub(crate) struct NgramWindows<'a> {
    run: &'a [u8],
    /// Absolute offset of `run[0]` in the input.
    base: usize,
    a: usize,
    b: usize,
    c: usize,
    d: usize,
}

impl<'a> NgramWindows<'a> {
    /// Windows over `run`, which starts at absolute offset `base`.
    pub(crate) fn new(run: &'a [u8], base: usize) -> Self {
        let mut windows = Self {
            run,
            base,
            a: 0,
            b: 0,
            c: 0,
            d: 0,
        };
        windows.b = windows.char_end(0);
        windows.c = windows.char_end(windows.b);
        windows.d = windows.char_end(windows.c);
        windows
    }

    /// End offset of the character starting at `at`, or `at` itself at the
    /// end of the run.
    fn char_end(&self, at: usize) -> usize {
        match self.run.get(at) {
            Some(&lead) => (at + Cursor::utf8_char_width(lead)).min(self.run.len()),
            None => at,
        }
    }
}

impl<'a> Iterator for NgramWindows<'a> {
    type Item = Ngram<'a>;

    fn next(&mut self) -> Option<Ngram<'a>> {
        if self.a >= self.d {
            return None;
        }
        let gram = Ngram {
            offset: self.base + self.a,
            bytes: &self.run[self.a..self.d],
        };
        self.a = self.b;
        self.b = self.c;
        self.c = self.d;
        self.d = self.char_end(self.d);
        Some(gram)
    }
}

#[cfg(test)]
mod tests;
