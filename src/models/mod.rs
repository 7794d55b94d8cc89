//! Data models for layout documents and keyboard geometry.
//!
//! Models are independent of UI and rendering.

pub mod keyboard_geometry;
pub mod layout_document;
pub mod physical_layouts;

// Re-export all model types
pub use keyboard_geometry::{Half, KeyGeometry, KeyboardGeometry};
pub use layout_document::{Layer, LayoutDocument, RawKeycode, Row, UNPROGRAMMED_SENTINEL};
pub use physical_layouts::geometry_by_name;
