//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and default layer naming.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Keyboard Layout Viewer";

/// The binary name of the application (used in command examples and the config directory).
pub const APP_BINARY_NAME: &str = "kbview";

/// Layer names used when a keyboard profile does not provide its own.
pub const DEFAULT_LAYER_NAMES: &[&str] = &[
    "Base", "Symbols", "Numbers", "Fn/Nav", "Nums Alt", "Fn Alt", "RGB", "Extra",
];

/// Display name for a layer: the configured name, or `Layer N` when none is set.
#[must_use]
pub fn layer_name(names: &[String], index: usize) -> String {
    names
        .get(index)
        .filter(|name| !name.is_empty())
        .cloned()
        .unwrap_or_else(|| format!("Layer {index}"))
}
