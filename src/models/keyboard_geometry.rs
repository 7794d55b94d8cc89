//! Physical keyboard geometry.
//!
//! Each physical key points back at the `(row, col)` of the layout document
//! it displays, and carries the positional flags the key resolver needs.

use serde::{Deserialize, Serialize};

use crate::keycode::PositionFlags;

/// Terminal characters per keyboard unit (horizontal).
pub const TERMINAL_CHARS_PER_UNIT: f32 = 9.0;

/// Terminal lines per keyboard unit (vertical).
pub const TERMINAL_LINES_PER_UNIT: f32 = 4.0;

/// Which half of a split keyboard a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Half {
    /// Left half
    Left,
    /// Right half
    Right,
}

/// Individual key's physical properties.
///
/// # Coordinate Conversion (to terminal)
///
/// - Terminal X = `visual_x` * 9 characters per keyboard unit
/// - Terminal Y = `visual_y` * 4 lines per keyboard unit
/// - Width chars = width * 9 (minimum 5)
/// - Height lines = height * 4 (minimum 4)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyGeometry {
    /// Position in the layout document grid (row, col)
    pub layout_position: (u8, u8),
    /// Physical X position in keyboard units (1u = key width)
    pub visual_x: f32,
    /// Physical Y position in keyboard units
    pub visual_y: f32,
    /// Key width in keyboard units (default 1.0)
    pub width: f32,
    /// Key height in keyboard units (default 1.0)
    pub height: f32,
    /// Key sits on the home row
    pub home_row: bool,
    /// Key is a rotary encoder
    pub encoder: bool,
    /// Split half
    pub half: Half,
}

impl KeyGeometry {
    /// Creates a new `KeyGeometry` on the left half with default size.
    #[must_use]
    pub const fn new(layout_position: (u8, u8), visual_x: f32, visual_y: f32) -> Self {
        Self {
            layout_position,
            visual_x,
            visual_y,
            width: 1.0,
            height: 1.0,
            home_row: false,
            encoder: false,
            half: Half::Left,
        }
    }

    /// Sets the key width.
    #[must_use]
    pub const fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Sets the key height.
    #[must_use]
    pub const fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Marks the key as a home-row key.
    #[must_use]
    pub const fn on_home_row(mut self) -> Self {
        self.home_row = true;
        self
    }

    /// Marks the key as an encoder.
    #[must_use]
    pub const fn as_encoder(mut self) -> Self {
        self.encoder = true;
        self
    }

    /// Places the key on the given half.
    #[must_use]
    pub const fn on_half(mut self, half: Half) -> Self {
        self.half = half;
        self
    }

    /// Document row index.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.layout_position.0 as usize
    }

    /// Document column index.
    #[must_use]
    pub const fn col(&self) -> usize {
        self.layout_position.1 as usize
    }

    /// Flags passed to the key resolver.
    #[must_use]
    pub const fn position_flags(&self) -> PositionFlags {
        PositionFlags {
            is_home_row: self.home_row,
            is_encoder: self.encoder,
        }
    }

    /// Converts visual X position to terminal characters.
    #[must_use]
    pub fn terminal_x(&self) -> u16 {
        (self.visual_x * TERMINAL_CHARS_PER_UNIT).round().max(0.0) as u16
    }

    /// Converts visual Y position to terminal lines.
    #[must_use]
    pub fn terminal_y(&self) -> u16 {
        (self.visual_y * TERMINAL_LINES_PER_UNIT).round().max(0.0) as u16
    }

    /// Converts key width to terminal characters.
    #[must_use]
    pub fn terminal_width(&self) -> u16 {
        ((self.width * TERMINAL_CHARS_PER_UNIT) as u16).max(5)
    }

    /// Converts key height to terminal lines.
    #[must_use]
    pub fn terminal_height(&self) -> u16 {
        ((self.height * TERMINAL_LINES_PER_UNIT) as u16).max(4)
    }
}

/// Physical keyboard definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyboardGeometry {
    /// Identifier used on the command line and in config (e.g., "elora")
    pub keyboard_name: String,
    /// Human-readable name (e.g., "Corne V4")
    pub display_name: String,
    /// Rows per layer in the layout documents for this keyboard
    pub rows_per_layer: usize,
    /// Physical key definitions (one per key)
    pub keys: Vec<KeyGeometry>,
}

impl KeyboardGeometry {
    /// Creates a new, empty `KeyboardGeometry`.
    pub fn new(
        keyboard_name: impl Into<String>,
        display_name: impl Into<String>,
        rows_per_layer: usize,
    ) -> Self {
        Self {
            keyboard_name: keyboard_name.into(),
            display_name: display_name.into(),
            rows_per_layer,
            keys: Vec::new(),
        }
    }

    /// Adds a key to the geometry.
    pub fn add_key(&mut self, key: KeyGeometry) {
        self.keys.push(key);
    }

    /// Gets the total number of keys.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Gets a key by its document position.
    #[must_use]
    pub fn get_key_by_position(&self, row: usize, col: usize) -> Option<&KeyGeometry> {
        self.keys.iter().find(|k| k.row() == row && k.col() == col)
    }

    /// Overall extent in keyboard units as `(width, height)`.
    #[must_use]
    pub fn extent(&self) -> (f32, f32) {
        self.keys.iter().fold((0.0_f32, 0.0_f32), |(w, h), key| {
            (
                w.max(key.visual_x + key.width),
                h.max(key.visual_y + key.height),
            )
        })
    }

    /// Keys in reading order (top to bottom, then left to right).
    #[must_use]
    pub fn keys_in_reading_order(&self) -> Vec<&KeyGeometry> {
        let mut keys: Vec<&KeyGeometry> = self.keys.iter().collect();
        keys.sort_by(|a, b| {
            a.visual_y
                .round()
                .total_cmp(&b.visual_y.round())
                .then(a.visual_x.total_cmp(&b.visual_x))
        });
        keys
    }
}
