//! Built-in physical layouts for the supported split keyboards.
//!
//! Coordinates are in keyboard units. Each half is described in its own
//! local space; the right half is shifted by the keyboard's split offset so
//! a single coordinate space covers the whole board.

use super::keyboard_geometry::{Half, KeyGeometry, KeyboardGeometry};

/// Vertical column stagger (positive moves the column down).
pub mod stagger {
    /// Pinky (outer) columns
    pub const PINKY: f32 = 0.4;
    /// Ring finger
    pub const RING: f32 = 0.2;
    /// Middle finger (baseline)
    pub const MIDDLE: f32 = 0.0;
    /// Index finger
    pub const INDEX: f32 = 0.15;
    /// Inner column
    pub const INNER: f32 = 0.35;
}

/// Encoder key size in keyboard units.
const ENCODER_SIZE: f32 = 1.2;

#[derive(Clone, Copy)]
enum Kind {
    Plain,
    HomeRow,
    Encoder,
}

/// Compact table entry: `(row, col, x, y, kind)`.
type KeySpec = (u8, u8, f32, f32, Kind);

use stagger::{INDEX, INNER, MIDDLE, PINKY, RING};
use Kind::{Encoder, HomeRow, Plain};

const ELORA_SPLIT_OFFSET: f32 = 11.0;

#[rustfmt::skip]
const ELORA_LEFT: &[KeySpec] = &[
    // Number row, document columns run inner to outer
    (0, 6, 0.0, PINKY, Plain), (0, 5, 1.0, RING, Plain), (0, 4, 2.0, MIDDLE, Plain),
    (0, 3, 3.0, MIDDLE, Plain), (0, 2, 4.0, INDEX, Plain), (0, 1, 5.0, INNER, Plain),
    // Top row
    (1, 6, 0.0, 1.0 + PINKY, Plain), (1, 5, 1.0, 1.0 + RING, Plain), (1, 4, 2.0, 1.0 + MIDDLE, Plain),
    (1, 3, 3.0, 1.0 + MIDDLE, Plain), (1, 2, 4.0, 1.0 + INDEX, Plain), (1, 1, 5.0, 1.0 + INNER, Plain),
    // Home row
    (2, 6, 0.0, 2.0 + PINKY, Plain), (2, 5, 1.0, 2.0 + RING, HomeRow), (2, 4, 2.0, 2.0 + MIDDLE, HomeRow),
    (2, 3, 3.0, 2.0 + MIDDLE, HomeRow), (2, 2, 4.0, 2.0 + INDEX, HomeRow), (2, 1, 5.0, 2.0 + INNER, Plain),
    // Bottom row plus inner extra key
    (3, 6, 0.0, 3.0 + PINKY, Plain), (3, 5, 1.0, 3.0 + RING, Plain), (3, 4, 2.0, 3.0 + MIDDLE, Plain),
    (3, 3, 3.0, 3.0 + MIDDLE, Plain), (3, 2, 4.0, 3.0 + INDEX, Plain), (3, 1, 5.0, 3.0 + INNER, Plain),
    (3, 0, 6.0, 3.5, Plain),
    // Thumb cluster
    (4, 5, 2.5, 4.5, Plain), (4, 3, 3.6, 4.9, Plain), (4, 2, 4.7, 5.1, Plain),
    (4, 1, 5.8, 5.0, Plain), (4, 0, 6.9, 4.7, Plain),
    (5, 0, 0.3, 4.8, Encoder),
];

#[rustfmt::skip]
const ELORA_RIGHT: &[KeySpec] = &[
    (6, 1, 0.0, INNER, Plain), (6, 2, 1.0, INDEX, Plain), (6, 3, 2.0, MIDDLE, Plain),
    (6, 4, 3.0, MIDDLE, Plain), (6, 5, 4.0, RING, Plain), (6, 6, 5.0, PINKY, Plain),
    (7, 1, 0.0, 1.0 + INNER, Plain), (7, 2, 1.0, 1.0 + INDEX, Plain), (7, 3, 2.0, 1.0 + MIDDLE, Plain),
    (7, 4, 3.0, 1.0 + MIDDLE, Plain), (7, 5, 4.0, 1.0 + RING, Plain), (7, 6, 5.0, 1.0 + PINKY, Plain),
    (8, 1, 0.0, 2.0 + INNER, Plain), (8, 2, 1.0, 2.0 + INDEX, HomeRow), (8, 3, 2.0, 2.0 + MIDDLE, HomeRow),
    (8, 4, 3.0, 2.0 + MIDDLE, HomeRow), (8, 5, 4.0, 2.0 + RING, HomeRow), (8, 6, 5.0, 2.0 + PINKY, Plain),
    (9, 0, -1.0, 3.5, Plain),
    (9, 1, 0.0, 3.0 + INNER, Plain), (9, 2, 1.0, 3.0 + INDEX, Plain), (9, 3, 2.0, 3.0 + MIDDLE, Plain),
    (9, 4, 3.0, 3.0 + MIDDLE, Plain), (9, 5, 4.0, 3.0 + RING, Plain), (9, 6, 5.0, 3.0 + PINKY, Plain),
    (10, 0, -1.9, 4.7, Plain), (10, 1, -0.8, 5.0, Plain), (10, 2, 0.3, 5.1, Plain),
    (10, 3, 1.4, 4.9, Plain), (10, 5, 2.5, 4.5, Plain),
    (11, 0, 4.5, 4.8, Encoder),
];

const CORNE_SPLIT_OFFSET: f32 = 9.0;

#[rustfmt::skip]
const CORNE_LEFT: &[KeySpec] = &[
    (0, 0, 0.0, PINKY, Plain), (0, 1, 1.0, RING, Plain), (0, 2, 2.0, MIDDLE, Plain),
    (0, 3, 3.0, MIDDLE, Plain), (0, 4, 4.0, INDEX, Plain), (0, 5, 5.0, INNER, Plain),
    (1, 0, 0.0, 1.0 + PINKY, Plain), (1, 1, 1.0, 1.0 + RING, HomeRow), (1, 2, 2.0, 1.0 + MIDDLE, HomeRow),
    (1, 3, 3.0, 1.0 + MIDDLE, HomeRow), (1, 4, 4.0, 1.0 + INDEX, HomeRow), (1, 5, 5.0, 1.0 + INNER, Plain),
    (2, 0, 0.0, 2.0 + PINKY, Plain), (2, 1, 1.0, 2.0 + RING, Plain), (2, 2, 2.0, 2.0 + MIDDLE, Plain),
    (2, 3, 3.0, 2.0 + MIDDLE, Plain), (2, 4, 4.0, 2.0 + INDEX, Plain), (2, 5, 5.0, 2.0 + INNER, Plain),
    (3, 3, 3.2, 3.5, Plain), (3, 4, 4.3, 3.8, Plain), (3, 5, 5.4, 3.9, Plain),
];

// Right-half columns are mirrored: document column 5 is the inner column.
#[rustfmt::skip]
const CORNE_RIGHT: &[KeySpec] = &[
    (4, 5, 0.0, INNER, Plain), (4, 4, 1.0, INDEX, Plain), (4, 3, 2.0, MIDDLE, Plain),
    (4, 2, 3.0, MIDDLE, Plain), (4, 1, 4.0, RING, Plain), (4, 0, 5.0, PINKY, Plain),
    (5, 5, 0.0, 1.0 + INNER, Plain), (5, 4, 1.0, 1.0 + INDEX, HomeRow), (5, 3, 2.0, 1.0 + MIDDLE, HomeRow),
    (5, 2, 3.0, 1.0 + MIDDLE, HomeRow), (5, 1, 4.0, 1.0 + RING, HomeRow), (5, 0, 5.0, 1.0 + PINKY, Plain),
    (6, 5, 0.0, 2.0 + INNER, Plain), (6, 4, 1.0, 2.0 + INDEX, Plain), (6, 3, 2.0, 2.0 + MIDDLE, Plain),
    (6, 2, 3.0, 2.0 + MIDDLE, Plain), (6, 1, 4.0, 2.0 + RING, Plain), (6, 0, 5.0, 2.0 + PINKY, Plain),
    (7, 5, -0.4, 3.9, Plain), (7, 4, 0.7, 3.8, Plain), (7, 3, 1.8, 3.5, Plain),
];

fn build_key(spec: KeySpec, half: Half, x_offset: f32) -> KeyGeometry {
    let (row, col, x, y, kind) = spec;
    let key = KeyGeometry::new((row, col), x + x_offset, y).on_half(half);
    match kind {
        Plain => key,
        HomeRow => key.on_home_row(),
        Encoder => key
            .with_width(ENCODER_SIZE)
            .with_height(ENCODER_SIZE)
            .as_encoder(),
    }
}

fn build_geometry(
    keyboard_name: &str,
    display_name: &str,
    rows_per_layer: usize,
    left: &[KeySpec],
    right: &[KeySpec],
    split_offset: f32,
) -> KeyboardGeometry {
    let mut geometry = KeyboardGeometry::new(keyboard_name, display_name, rows_per_layer);
    for spec in left {
        geometry.add_key(build_key(*spec, Half::Left, 0.0));
    }
    for spec in right {
        geometry.add_key(build_key(*spec, Half::Right, split_offset));
    }
    geometry
}

/// Elora: split board with number row, thumb clusters and one encoder per half.
///
/// Documents carry 12 rows per layer: rows 0-5 are the left half (row 5 is
/// the encoder), rows 6-11 the right half (row 11 is the encoder).
#[must_use]
pub fn elora() -> KeyboardGeometry {
    build_geometry(
        "elora",
        "Elora",
        12,
        ELORA_LEFT,
        ELORA_RIGHT,
        ELORA_SPLIT_OFFSET,
    )
}

/// Corne V4: 3x6 split with three thumb keys per half.
///
/// Documents carry 8 rows per layer: rows 0-3 left, rows 4-7 right.
#[must_use]
pub fn corne() -> KeyboardGeometry {
    build_geometry(
        "corne",
        "Corne V4",
        8,
        CORNE_LEFT,
        CORNE_RIGHT,
        CORNE_SPLIT_OFFSET,
    )
}

/// Looks up a built-in geometry by name (case-insensitive).
///
/// Accepts `elora`, `corne`, `corne-v4` and `crkbd`.
#[must_use]
pub fn geometry_by_name(name: &str) -> Option<KeyboardGeometry> {
    match name.to_ascii_lowercase().as_str() {
        "elora" => Some(elora()),
        "corne" | "corne-v4" | "crkbd" => Some(corne()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_elora_key_count() {
        let geom = elora();
        // 6 number + 6 top + 6 home + 7 bottom + 5 thumb + 1 encoder, per half
        assert_eq!(geom.key_count(), 62);
        assert_eq!(geom.rows_per_layer, 12);
    }

    #[test]
    fn test_corne_key_count() {
        let geom = corne();
        assert_eq!(geom.key_count(), 42);
        assert_eq!(geom.rows_per_layer, 8);
    }

    #[test]
    fn test_positions_are_unique_and_within_rows() {
        for geom in [elora(), corne()] {
            let mut seen = HashSet::new();
            for key in &geom.keys {
                assert!(key.row() < geom.rows_per_layer, "{}", geom.keyboard_name);
                assert!(key.col() < 7);
                assert!(seen.insert(key.layout_position), "duplicate {:?}", key.layout_position);
            }
        }
    }

    #[test]
    fn test_home_row_flags() {
        let geom = elora();
        let home: Vec<_> = geom
            .keys
            .iter()
            .filter(|k| k.home_row)
            .map(|k| k.layout_position)
            .collect();
        assert_eq!(home.len(), 8);
        assert!(home.contains(&(2, 5)));
        assert!(home.contains(&(8, 2)));
        assert!(!home.contains(&(2, 6)));
        assert!(!home.contains(&(8, 1)));
    }

    #[test]
    fn test_encoders() {
        let geom = elora();
        let encoders: Vec<_> = geom.keys.iter().filter(|k| k.encoder).collect();
        assert_eq!(encoders.len(), 2);
        assert!(encoders.iter().all(|k| k.width == 1.2 && k.height == 1.2));
        assert!(corne().keys.iter().all(|k| !k.encoder));
    }

    #[test]
    fn test_halves_do_not_overlap() {
        for geom in [elora(), corne()] {
            let left_max = geom
                .keys
                .iter()
                .filter(|k| k.half == Half::Left)
                .map(|k| k.visual_x + k.width)
                .fold(f32::MIN, f32::max);
            let right_min = geom
                .keys
                .iter()
                .filter(|k| k.half == Half::Right)
                .map(|k| k.visual_x)
                .fold(f32::MAX, f32::min);
            assert!(right_min > left_max, "{}", geom.keyboard_name);
        }
    }

    #[test]
    fn test_geometry_by_name_aliases() {
        assert_eq!(geometry_by_name("Elora").unwrap().keyboard_name, "elora");
        for alias in ["corne", "corne-v4", "CRKBD"] {
            assert_eq!(geometry_by_name(alias).unwrap().keyboard_name, "corne");
        }
        assert!(geometry_by_name("planck").is_none());
    }
}
