#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashSet;
use std::fmt::Write;

use pretty_assertions::assert_eq;

use super::*;

// === Construction ===

#[test]
fn new_stores_payload_and_position() {
    let tok = Token::new(b"hello", 7).unwrap();
    assert_eq!(tok.payload(), b"hello");
    assert_eq!(tok.position(), 7);
    assert_eq!(tok.len(), 5);
    assert!(!tok.is_empty());
}

#[test]
fn new_accepts_exactly_max_size() {
    let payload = [b'x'; MAX_TOKEN_SIZE];
    let tok = Token::new(&payload, 0);
    assert_eq!(tok.map(|t| t.len()), Some(MAX_TOKEN_SIZE));
}

#[test]
fn new_rejects_oversized_payload() {
    let payload = [b'x'; MAX_TOKEN_SIZE + 1];
    assert_eq!(Token::new(&payload, 0), None);
}

#[test]
fn empty_payload() {
    let tok = Token::new(b"", 3);
    assert_eq!(tok.map(|t| t.is_empty()), Some(true));
}

// === Raw Layout ===

#[test]
fn raw_buffer_is_length_prefixed_and_zero_padded() {
    let tok = Token::new(b"abc", 0).unwrap();
    let raw = tok.as_raw();
    assert_eq!(raw[0], 3);
    assert_eq!(&raw[1..4], b"abc");
    assert!(raw[4..].iter().all(|&b| b == 0));
}

#[test]
fn token_is_fixed_size() {
    assert_eq!(std::mem::size_of::<Token>(), 32);
    assert_eq!(TOKEN_BUF_SIZE, 24);
}

// === Equality & Hashing ===

#[test]
fn equal_payload_and_position_compare_equal() {
    assert_eq!(Token::new(b"bon", 1), Token::new(b"bon", 1));
    assert_ne!(Token::new(b"bon", 1), Token::new(b"bon", 3));
    assert_ne!(Token::new(b"bon", 1), Token::new(b"bonn", 1));
}

#[test]
fn tokens_hash_by_value() {
    let set: HashSet<Token> = [b"a".as_slice(), b"b", b"a"]
        .iter()
        .filter_map(|p| Token::new(p, 0))
        .collect();
    assert_eq!(set.len(), 2);
}

// === Markers ===

#[test]
fn marker_threshold_parses_suffix() {
    let tok = Token::new(b"_MARKER_300", 1234);
    assert_eq!(tok.and_then(|t| t.marker_threshold()), Some(300));
    assert_eq!(tok.map(|t| t.kind()), Some(TokenKind::Marker));
}

#[test]
fn prefix_without_digits_is_not_a_marker() {
    for payload in [b"_MARKER_".as_slice(), b"_MARKER_x1", b"_MARKER_1a", b"marker100"] {
        let tok = Token::new(payload, 0);
        assert_eq!(tok.map(|t| t.is_marker()), Some(false), "{payload:?}");
    }
}

#[test]
fn content_kind() {
    let tok = Token::new("相见时".as_bytes(), 0);
    assert_eq!(tok.map(|t| t.kind()), Some(TokenKind::Content));
}

// === Formatting ===

#[test]
fn display_and_payload_str() {
    let tok = Token::new("prévenir".as_bytes(), 2).unwrap();
    assert_eq!(tok.to_string(), "prévenir");
    assert_eq!(tok.payload_str(), Some("prévenir"));
    assert_eq!(format!("{tok:?}"), "Token(\"prévenir\" @ 2)");
}

#[test]
fn payload_str_rejects_invalid_utf8() {
    let tok = Token::new(&[0xFF, 0xFE], 0);
    assert_eq!(tok.and_then(|t| t.payload_str().map(str::len)), None);
}

// === PayloadBuf ===

#[test]
fn payload_buf_push_is_all_or_nothing() {
    let mut buf = PayloadBuf::new();
    assert!(buf.push_slice(&[b'a'; MAX_TOKEN_SIZE - 1]));
    assert_eq!(buf.room(), 1);
    // A 2-byte character does not fit in the last byte.
    assert!(!buf.push_char('é'));
    assert_eq!(buf.len(), MAX_TOKEN_SIZE - 1);
    assert!(buf.push_char('z'));
    assert_eq!(buf.room(), 0);
}

#[test]
fn payload_buf_formats_markers() {
    let mut buf = PayloadBuf::new();
    assert!(write!(buf, "_MARKER_{}", 100).is_ok());
    assert_eq!(buf.as_bytes(), b"_MARKER_100");
}

#[test]
fn payload_buf_write_overflow_fails() {
    let mut buf = PayloadBuf::new();
    assert!(write!(buf, "{}", "x".repeat(MAX_TOKEN_SIZE + 1)).is_err());
}
