use proptest::prelude::*;

use super::*;

fn decode_all(bytes: &[u8]) -> Vec<Decoded> {
    let mut cursor = Cursor::new(bytes);
    std::iter::from_fn(|| cursor.bump()).collect()
}

// === Basic Navigation ===

#[test]
fn empty_input_is_eof() {
    let mut cursor = Cursor::new(b"");
    assert!(cursor.is_eof());
    assert_eq!(cursor.bump(), None);
    assert_eq!(cursor.pos(), 0);
}

#[test]
fn bump_ascii_advances_one_byte() {
    let mut cursor = Cursor::new(b"ab");
    assert_eq!(
        cursor.bump(),
        Some(Decoded {
            offset: 0,
            ch: Some('a')
        })
    );
    assert_eq!(cursor.pos(), 1);
    assert!(!cursor.is_eof());
    cursor.bump();
    assert!(cursor.is_eof());
    assert_eq!(cursor.bump(), None);
    assert_eq!(cursor.pos(), 2);
}

#[test]
fn bump_multibyte_advances_full_width() {
    let input = "é中😀";
    let decoded = decode_all(input.as_bytes());
    let offsets: Vec<usize> = decoded.iter().map(|d| d.offset).collect();
    let chars: Vec<Option<char>> = decoded.iter().map(|d| d.ch).collect();
    assert_eq!(offsets, vec![0, 2, 5]);
    assert_eq!(chars, vec![Some('é'), Some('中'), Some('😀')]);
}

#[test]
fn slice_and_byte_at() {
    let cursor = Cursor::new(b"hello world");
    assert_eq!(cursor.slice(6, 11), b"world");
    assert_eq!(cursor.byte_at(5), Some(b' '));
    assert_eq!(cursor.byte_at(11), None);
    assert_eq!(cursor.source_len(), 11);
}

// === UTF-8 Width ===

#[test]
fn char_width_by_lead_byte() {
    assert_eq!(Cursor::utf8_char_width(b'a'), 1);
    assert_eq!(Cursor::utf8_char_width(0xC3), 2);
    assert_eq!(Cursor::utf8_char_width(0xE4), 3);
    assert_eq!(Cursor::utf8_char_width(0xF0), 4);
    assert_eq!(Cursor::utf8_char_width(0x80), 1);
    assert_eq!(Cursor::utf8_char_width(0xFF), 1);
}

// === Malformed Input ===

#[test]
fn stray_continuation_byte_is_one_byte_failure() {
    let decoded = decode_all(&[0x80, b'a']);
    assert_eq!(
        decoded,
        vec![
            Decoded {
                offset: 0,
                ch: None
            },
            Decoded {
                offset: 1,
                ch: Some('a')
            },
        ]
    );
}

#[test]
fn truncated_sequence_fails_byte_by_byte() {
    // First two bytes of '中' (E4 B8 AD), then EOF.
    let decoded = decode_all(&[0xE4, 0xB8]);
    assert_eq!(decoded.len(), 2);
    assert!(decoded.iter().all(|d| d.ch.is_none()));
}

#[test]
fn overlong_encoding_is_rejected() {
    // C0 80 is an overlong NUL.
    let decoded = decode_all(&[0xC0, 0x80]);
    assert_eq!(decoded.len(), 2);
    assert!(decoded.iter().all(|d| d.ch.is_none()));
}

#[test]
fn surrogate_encoding_is_rejected() {
    // ED A0 80 would be U+D800.
    let decoded = decode_all(&[0xED, 0xA0, 0x80]);
    assert_eq!(decoded.len(), 3);
    assert!(decoded.iter().all(|d| d.ch.is_none()));
}

// === Property Tests ===

proptest! {
    #[test]
    fn bump_always_makes_progress(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let mut cursor = Cursor::new(&bytes);
        let mut last = None;
        while let Some(d) = cursor.bump() {
            if let Some(prev) = last {
                prop_assert!(d.offset > prev);
            }
            prop_assert!(cursor.pos() > d.offset);
            last = Some(d.offset);
        }
        prop_assert_eq!(cursor.pos(), bytes.len());
    }

    #[test]
    fn valid_utf8_decodes_like_std(s in "\\PC{0,64}") {
        let ours: Vec<char> = decode_all(s.as_bytes()).iter().filter_map(|d| d.ch).collect();
        let std: Vec<char> = s.chars().collect();
        prop_assert_eq!(ours, std);
    }
}
