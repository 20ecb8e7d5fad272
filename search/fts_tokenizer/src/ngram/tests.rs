use pretty_assertions::assert_eq;

use super::*;

fn grams(run: &str) -> Vec<String> {
    NgramWindows::new(run.as_bytes(), 0)
        .map(|g| String::from_utf8_lossy(g.bytes).into_owned())
        .collect()
}

// === Window Shapes ===

#[test]
fn empty_run_has_no_windows() {
    assert!(grams("").is_empty());
}

#[test]
fn single_character_run() {
    assert_eq!(grams("难"), vec!["难"]);
}

#[test]
fn two_character_run() {
    assert_eq!(grams("征服"), vec!["征服", "服"]);
}

#[test]
fn three_character_run() {
    assert_eq!(grams("太软了"), vec!["太软了", "软了", "了"]);
}

#[test]
fn long_run_ramps_then_shrinks() {
    assert_eq!(
        grams("相见时难别亦难"),
        vec!["相见时", "见时难", "时难别", "难别亦", "别亦难", "亦难", "难"]
    );
}

#[test]
fn run_of_n_yields_n_windows() {
    for n in 1..20 {
        let run = "字".repeat(n);
        let windows = grams(&run);
        assert_eq!(windows.len(), n);
        let full = windows.iter().filter(|w| w.chars().count() == NGRAM_WIDTH).count();
        assert_eq!(full, n.saturating_sub(2));
    }
}

// === Mixed Widths ===

#[test]
fn embedded_ascii_is_a_window_member() {
    assert_eq!(
        grams("笔2B的"),
        vec!["笔2B", "2B的", "B的", "的"]
    );
}

#[test]
fn four_byte_characters() {
    assert_eq!(grams("𠀀𠀁𠀂𠀃"), vec!["𠀀𠀁𠀂", "𠀁𠀂𠀃", "𠀂𠀃", "𠀃"]);
}

// === Offsets ===

#[test]
fn offsets_are_absolute_window_starts() {
    let offsets: Vec<usize> = NgramWindows::new("中华铅笔".as_bytes(), 10)
        .map(|g| g.offset)
        .collect();
    assert_eq!(offsets, vec![10, 13, 16, 19]);
}
