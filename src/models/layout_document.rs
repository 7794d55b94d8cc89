//! Layout document model loaded from `.vil` files.
//!
//! A document is a grid of raw keycodes indexed by `[layer][row][col]`.
//! Rows and columns are stable identifiers shared with the physical
//! geometry tables; the document itself makes no assumption about their
//! count.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer value meaning "no key programmed at this position".
pub const UNPROGRAMMED_SENTINEL: i64 = -1;

/// A single keycode as it appears in the layout file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawKeycode {
    /// Integer form, normally the `-1` sentinel
    Int(i64),
    /// Keycode expression (e.g. "KC_A", "LT1(KC_SPACE)")
    Token(String),
}

impl RawKeycode {
    /// Creates a token keycode.
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }

    /// The "no key programmed" sentinel.
    #[must_use]
    pub const fn unprogrammed() -> Self {
        Self::Int(UNPROGRAMMED_SENTINEL)
    }

    /// Returns true for the `-1` sentinel in either integer or string form.
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        match self {
            Self::Int(value) => *value == UNPROGRAMMED_SENTINEL,
            Self::Token(token) => token == "-1",
        }
    }

    /// Text shown in tooltips and detail panels (empty for the sentinel).
    #[must_use]
    pub fn tooltip_text(&self) -> String {
        if self.is_sentinel() {
            String::new()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for RawKeycode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Token(token) => f.write_str(token),
        }
    }
}

impl From<&str> for RawKeycode {
    fn from(token: &str) -> Self {
        Self::Token(token.to_string())
    }
}

impl From<i64> for RawKeycode {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// One row of keycodes.
pub type Row = Vec<RawKeycode>;

/// One layer: an ordered list of rows.
pub type Layer = Vec<Row>;

/// A loaded layout document.
///
/// Only the `layout` array is interpreted; any other fields in the file
/// (version, uid, macros, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Layers in order, each a grid of rows
    pub layout: Vec<Layer>,
}

impl LayoutDocument {
    /// Creates a document from layer grids.
    #[must_use]
    pub const fn new(layout: Vec<Layer>) -> Self {
        Self { layout }
    }

    /// Number of layers in the document.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layout.len()
    }

    /// Gets a layer by index.
    #[must_use]
    pub fn layer(&self, layer: usize) -> Option<&Layer> {
        self.layout.get(layer)
    }

    /// Gets the keycode at a position, or `None` if the position is not in the document.
    #[must_use]
    pub fn keycode_at(&self, layer: usize, row: usize, col: usize) -> Option<&RawKeycode> {
        self.layout.get(layer)?.get(row)?.get(col)
    }

    /// Iterates over every cell of a layer as `(row, col, keycode)`.
    pub fn cells(&self, layer: usize) -> impl Iterator<Item = (usize, usize, &RawKeycode)> {
        self.layout.get(layer).into_iter().flat_map(|rows| {
            rows.iter().enumerate().flat_map(|(row_idx, row)| {
                row.iter()
                    .enumerate()
                    .map(move |(col_idx, keycode)| (row_idx, col_idx, keycode))
            })
        })
    }
}
