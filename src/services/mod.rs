//! Service layer for document analysis.
//!
//! This module contains logic that works across a whole layout document
//! rather than a single key.

pub mod layer_refs;

// Re-export commonly used types and functions
pub use layer_refs::{
    build_layer_ref_index, find_layer_refs, transparency_conflicts, LayerRef, LayerRefKind,
    TransparencyConflict,
};
