#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("Living", 10), "Living");
}

#[test]
fn test_truncate_long_label() {
    assert_eq!(truncate("Maternity Checkup", 9), "Maternit…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("Delivery", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("café résumé", 5), "café…");
}

// ── format_amount ──────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56)), "$1,234.56");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-12000)), "-$12,000.00");
}

#[test]
fn test_format_amount_projected_savings() {
    assert_eq!(format_amount(dec!(288000)), "$288,000.00");
}

// ── compact_amount ────────────────────────────────────────────

#[test]
fn test_compact_amount_small() {
    assert_eq!(compact_amount(dec!(950)), "950");
    assert_eq!(compact_amount(dec!(0)), "0");
}

#[test]
fn test_compact_amount_thousands() {
    assert_eq!(compact_amount(dec!(12500)), "12.5k");
    assert_eq!(compact_amount(dec!(288000)), "288k");
}

#[test]
fn test_compact_amount_negative_millions() {
    assert_eq!(compact_amount(dec!(-1234567)), "-1.2M");
}

// ── value_bounds ──────────────────────────────────────────────

#[test]
fn test_value_bounds_include_zero() {
    let [lo, hi] = value_bounds([100.0, 200.0]);
    assert_eq!(lo, 0.0);
    assert!(hi > 200.0);
}

#[test]
fn test_value_bounds_negative() {
    let [lo, hi] = value_bounds([-50.0, 150.0]);
    assert!(lo < -50.0);
    assert!(hi > 150.0);
}

#[test]
fn test_value_bounds_flat() {
    assert_eq!(value_bounds(Vec::new()), [0.0, 1.0]);
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_keeps_cursor_visible() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..5 {
        scroll_down(&mut index, &mut scroll, 72, 3);
    }
    assert_eq!(index, 5);
    assert_eq!(scroll, 3);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (71, 60);
    scroll_down(&mut index, &mut scroll, 72, 12);
    assert_eq!(index, 71);
}

#[test]
fn test_scroll_up_and_top() {
    let (mut index, mut scroll) = (10, 10);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (9, 9));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}

#[test]
fn test_scroll_to_bottom() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 72, 20);
    assert_eq!((index, scroll), (71, 52));
}
