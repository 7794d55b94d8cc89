//! Vial `.vil` layout file loading.
//!
//! A `.vil` file is JSON with a `layout` array indexed `[layer][row][col]`.
//! Cells are keycode strings or the integer `-1` for unprogrammed
//! positions. Other top-level fields are ignored.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::models::{KeyboardGeometry, LayoutDocument};

/// Parses a layout document from JSON text.
pub fn parse_layout_document(content: &str) -> Result<LayoutDocument> {
    let doc: LayoutDocument =
        serde_json::from_str(content).context("Invalid layout document")?;

    if doc.layer_count() == 0 {
        anyhow::bail!("Layout document has no layers");
    }

    Ok(doc)
}

/// Loads a layout document from a `.vil` file.
///
/// # Arguments
///
/// * `path` - Path to the layout file
///
/// # Returns
///
/// The parsed document with at least one layer
pub fn load_layout_document(path: &Path) -> Result<LayoutDocument> {
    let content = fs::read_to_string(path)
        .context(format!("Failed to read layout file: {}", path.display()))?;

    let doc = parse_layout_document(&content)
        .context(format!("Failed to parse layout file: {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        layers = doc.layer_count(),
        "loaded layout document"
    );

    Ok(doc)
}

/// Geometry positions with no cell in the given layer.
///
/// Missing cells are not an error (the viewer just leaves them blank) but
/// usually mean the document was made for a different keyboard.
#[must_use]
pub fn missing_positions(
    doc: &LayoutDocument,
    layer: usize,
    geometry: &KeyboardGeometry,
) -> Vec<(usize, usize)> {
    geometry
        .keys
        .iter()
        .filter(|key| doc.keycode_at(layer, key.row(), key.col()).is_none())
        .map(|key| (key.row(), key.col()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::physical_layouts;
    use tempfile::TempDir;

    #[test]
    fn test_load_layout_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.vil");
        fs::write(
            &path,
            r#"{"version": 1, "layout": [[["KC_A", -1]], [["KC_TRNS", "MO(0)"]]]}"#,
        )
        .unwrap();

        let doc = load_layout_document(&path).unwrap();
        assert_eq!(doc.layer_count(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_layout_document(Path::new("/nonexistent/layout.vil")).unwrap_err();
        assert!(err.to_string().contains("Failed to read layout file"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_layout_document("not json").is_err());
        assert!(parse_layout_document(r#"{"version": 1}"#).is_err());
        assert!(parse_layout_document(r#"{"layout": [[["KC_A", true]]]}"#).is_err());

        let err = parse_layout_document(r#"{"layout": []}"#).unwrap_err();
        assert!(err.to_string().contains("no layers"));
    }

    #[test]
    fn test_missing_positions() {
        let doc = parse_layout_document(r#"{"layout": [[["KC_A"]]]}"#).unwrap();
        let geometry = physical_layouts::corne();
        let missing = missing_positions(&doc, 0, &geometry);
        // Corne (0, 0) is present; every other key is missing
        assert_eq!(missing.len(), geometry.key_count() - 1);
        assert!(!missing.contains(&(0, 0)));
    }
}
