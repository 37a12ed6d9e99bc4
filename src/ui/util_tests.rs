#![allow(clippy::unwrap_used)]

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("Aceh", 10), "Aceh");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("Jambi", 5), "Jambi");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Kalimantan Timur", 10), "Kalimanta…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("Bali", 0), "");
}

#[test]
fn test_truncate_one_char() {
    assert_eq!(truncate("Bali", 1), "…");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("Nanggroë Aceh", 9), "Nanggroë…");
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..5 {
        scroll_down(&mut index, &mut scroll, 12, 3);
    }
    assert_eq!(index, 5);
    assert_eq!(scroll, 3);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (2, 0);
    scroll_down(&mut index, &mut scroll, 3, 10);
    assert_eq!(index, 2);
}

#[test]
fn test_scroll_down_with_zero_page() {
    let (mut index, mut scroll) = (0, 0);
    scroll_down(&mut index, &mut scroll, 4, 0);
    assert_eq!((index, scroll), (1, 1));
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (4, 4);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (3, 3));
    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_top_and_bottom() {
    let (mut index, mut scroll) = (5, 2);
    scroll_to_bottom(&mut index, &mut scroll, 12, 5);
    assert_eq!((index, scroll), (11, 7));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_bottom_of_empty_list_is_noop() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 0, 5);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_clamp_after_shrink() {
    let (mut index, mut scroll) = (11, 8);
    clamp_cursor(&mut index, &mut scroll, 4);
    assert_eq!((index, scroll), (3, 3));
    clamp_cursor(&mut index, &mut scroll, 0);
    assert_eq!((index, scroll), (0, 0));
}
