//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use kbview::models::{LayoutDocument, RawKeycode};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Columns per row in Corne documents.
pub const CORNE_COLS: usize = 6;

/// Columns per row in Elora documents.
pub const ELORA_COLS: usize = 7;

fn tokens(row: &[&str]) -> Vec<RawKeycode> {
    row.iter()
        .map(|token| {
            if *token == "-1" {
                RawKeycode::unprogrammed()
            } else {
                RawKeycode::token(*token)
            }
        })
        .collect()
}

/// Creates a two-layer Corne document.
///
/// Layer 0 has home-row mod-taps and two layer keys targeting layer 1
/// (`LT1(KC_SPACE)` on the thumb, `MO(1)` on the right thumb). Layer 1 is
/// mostly transparent, with symbols on the top row.
///
/// Thumb rows (3 and 7) only use columns 3-5; columns 0-2 hold the `-1`
/// sentinel the way Vial writes them.
pub fn corne_document() -> LayoutDocument {
    let base = vec![
        tokens(&["KC_TAB", "KC_Q", "KC_W", "KC_E", "KC_R", "KC_T"]),
        tokens(&[
            "KC_ESCAPE",
            "LGUI_T(KC_A)",
            "LALT_T(KC_S)",
            "LCTL_T(KC_D)",
            "LSFT_T(KC_F)",
            "KC_G",
        ]),
        tokens(&["KC_LSHIFT", "KC_Z", "KC_X", "KC_C", "KC_V", "KC_B"]),
        tokens(&["-1", "-1", "-1", "KC_LGUI", "LT1(KC_SPACE)", "KC_ENTER"]),
        tokens(&["KC_BSPACE", "KC_P", "KC_O", "KC_I", "KC_U", "KC_Y"]),
        tokens(&[
            "KC_QUOTE",
            "RGUI_T(KC_SCOLON)",
            "RALT_T(KC_L)",
            "RCTL_T(KC_K)",
            "RSFT_T(KC_J)",
            "KC_H",
        ]),
        tokens(&["KC_RSHIFT", "KC_SLASH", "KC_DOT", "KC_COMMA", "KC_M", "KC_N"]),
        tokens(&["-1", "-1", "-1", "KC_RALT", "MO(1)", "KC_SPACE"]),
    ];

    let symbols = vec![
        tokens(&[
            "KC_TRNS",
            "LSFT(KC_1)",
            "LSFT(KC_2)",
            "LSFT(KC_3)",
            "LSFT(KC_4)",
            "LSFT(KC_5)",
        ]),
        tokens(&["KC_TRNS"; CORNE_COLS]),
        tokens(&["KC_TRNS"; CORNE_COLS]),
        tokens(&["-1", "-1", "-1", "KC_TRNS", "KC_TRNS", "KC_TRNS"]),
        tokens(&["KC_TRNS", "M0", "M1", "KC_TRNS", "KC_TRNS", "KC_TRNS"]),
        tokens(&["KC_TRNS"; CORNE_COLS]),
        tokens(&["KC_TRNS", "KC_NO", "KC_NO", "KC_NO", "KC_NO", "KC_NO"]),
        tokens(&["-1", "-1", "-1", "KC_TRNS", "KC_TRNS", "KC_TRNS"]),
    ];

    LayoutDocument::new(vec![base, symbols])
}

/// Creates a fully programmed Elora document with `layers` layers of `KC_A`.
pub fn elora_document(layers: usize) -> LayoutDocument {
    let row = tokens(&["KC_A"; ELORA_COLS]);
    let layer: Vec<Vec<RawKeycode>> = (0..12).map(|_| row.clone()).collect();
    LayoutDocument::new(vec![layer; layers])
}

/// Serializes a document the way Vial does, with extra top-level fields.
pub fn vil_json(doc: &LayoutDocument) -> String {
    let value = serde_json::json!({
        "version": 1,
        "uid": 1_234_567_890_u64,
        "layout": doc.layout,
        "encoder_layout": [],
        "macro": [[], []],
        "settings": {},
    });
    serde_json::to_string_pretty(&value).expect("Failed to serialize layout")
}

/// Writes a document as a `.vil` file inside `dir`.
pub fn write_vil(dir: &Path, file_name: &str, doc: &LayoutDocument) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, vil_json(doc)).expect("Failed to write layout file");
    path
}

/// Creates a temporary `.vil` file for a document.
///
/// # Returns
/// Tuple of (file path, temp dir). Keep the `TempDir` alive for the
/// duration of the test.
pub fn create_temp_layout_file(doc: &LayoutDocument) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_vil(temp_dir.path(), "layout.vil", doc);
    (path, temp_dir)
}

/// Creates a temporary file with arbitrary content.
pub fn create_temp_file(file_name: &str, content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(file_name);
    fs::write(&path, content).expect("Failed to write file");
    (path, temp_dir)
}
