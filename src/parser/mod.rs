//! Layout file loading.
//!
//! This module reads Vial `.vil` layout documents from disk.

pub mod vil;

// Re-export commonly used functions
pub use vil::{load_layout_document, parse_layout_document};
