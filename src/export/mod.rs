//! Export functionality for keyboard layouts.
//!
//! Generates markdown documentation for a layout document: one box-drawing
//! diagram per layer, a layer navigation overview and a key type legend.

pub mod category_legend;
pub mod keyboard_renderer;
pub mod layer_navigation;

pub use category_legend::generate_category_legend;
pub use keyboard_renderer::render_layer_diagram;
pub use layer_navigation::generate_layer_navigation;

use anyhow::Result;
use std::fmt::Write as _;

use crate::constants::layer_name;
use crate::models::{KeyboardGeometry, LayoutDocument};

/// Exports every layer of a document to a markdown document.
///
/// # Arguments
///
/// * `doc` - The layout document to export
/// * `geometry` - Physical geometry used to place the keys
/// * `layer_names` - Layer names (missing entries fall back to `Layer N`)
pub fn export_to_markdown(
    doc: &LayoutDocument,
    geometry: &KeyboardGeometry,
    layer_names: &[String],
) -> Result<String> {
    let mut output = String::new();

    let _ = writeln!(output, "# {} Layout\n", geometry.display_name);
    let _ = writeln!(
        output,
        "**Layers**: {}  \n**Generated**: {}\n",
        doc.layer_count(),
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    );

    for layer_idx in 0..doc.layer_count() {
        let name = layer_name(layer_names, layer_idx);
        let _ = writeln!(output, "## Layer {}: {}\n", layer_idx, name);

        let diagram = render_layer_diagram(doc, layer_idx, geometry, &name)?;
        output.push_str("```text\n");
        output.push_str(&diagram);
        output.push_str("```\n\n");
    }

    output.push_str(&generate_layer_navigation(doc, layer_names));
    output.push_str(&generate_category_legend(doc));

    Ok(output)
}
