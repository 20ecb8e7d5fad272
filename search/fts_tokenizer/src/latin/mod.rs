//! Latin-run normalization.
//!
//! A closed Latin run is filtered down to ASCII alphanumerics plus whole
//! 2-byte characters, capped at [`MAX_TOKEN_SIZE`], then lower-cased.

use crate::cursor::Cursor;
use crate::token::{PayloadBuf, MAX_TOKEN_SIZE};

/// Normalize the raw bytes of a Latin run into a token payload.
///
/// Returns `None` when one byte or less survives; such runs still occupy a
/// position slot, the caller just emits nothing for them.
pub(crate) fn normalize(raw: &[u8]) -> Option<PayloadBuf> {
    let kept = filter(raw);
    let folded = lowercase(kept.as_bytes())?;
    (folded.len() > 1).then_some(folded)
}

/// Keep ASCII alphanumerics and non-ASCII characters, stopping at the cap.
///
/// ASCII bytes are checked against the cap before anything else, punctuation
/// included. A non-ASCII character is only taken if all of its bytes fit;
/// otherwise the scan stops so the character is never split.
fn filter(raw: &[u8]) -> PayloadBuf {
    let mut buf = PayloadBuf::new();
    let mut i = 0;
    while i < raw.len() {
        let b = raw[i];
        if b.is_ascii() {
            if buf.len() >= MAX_TOKEN_SIZE {
                break;
            }
            if b.is_ascii_alphanumeric() {
                buf.push_slice(&[b]);
            }
            i += 1;
        } else {
            let end = (i + Cursor::utf8_char_width(b)).min(raw.len());
            if !buf.push_slice(&raw[i..end]) {
                break;
            }
            i = end;
        }
    }
    buf
}

/// Lower-case a filtered payload.
///
/// Lower-casing can widen a character (`Ⱥ` → `ⱥ` goes from 2 to 3 bytes),
/// so the result is re-capped: characters are appended until the next one
/// no longer fits.
fn lowercase(kept: &[u8]) -> Option<PayloadBuf> {
    // Latin runs hold only 1- and 2-byte scalar values, copied whole.
    let text = std::str::from_utf8(kept).ok()?;

    let mut folded = PayloadBuf::new();
    'chars: for c in text.chars() {
        for lower in c.to_lowercase() {
            if !folded.push_char(lower) {
                break 'chars;
            }
        }
    }
    Some(folded)
}
