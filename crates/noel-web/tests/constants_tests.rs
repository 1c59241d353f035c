// Host-side tests for the overlay DOM contract.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

const ELEMENT_IDS: [&str; 11] = [
    CANVAS_ID,
    SMALL_LETTER_ID,
    OPENED_LETTER_ID,
    LETTER_PAPER_ID,
    LETTER_BACKDROP_ID,
    MESSAGE_PAGE_ID,
    MESSAGE_BACKDROP_ID,
    MEMORIES_ID,
    IMAGE_MODAL_ID,
    IMAGE_MODAL_IMG_ID,
    IMAGE_MODAL_CLOSE_ID,
];

#[test]
fn element_ids_are_unique_and_selector_safe() {
    for (i, a) in ELEMENT_IDS.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(a.chars().all(|c| c.is_ascii_lowercase() || c == '-'), "{a}");
        for b in &ELEMENT_IDS[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn memory_selector_matches_attribute() {
    assert_eq!(MEMORY_CARD_SELECTOR, format!("[{MEMORY_ID_ATTR}]"));
    assert!(LETTER_STEP_ATTR.starts_with("data-"));
    assert!(MEMORY_ID_ATTR.starts_with("data-"));
}

#[test]
fn clear_color_is_opaque_black() {
    assert_eq!(CLEAR_COLOR, [0.0, 0.0, 0.0, 1.0]);
}
