//! Layer navigation diagram generator for layout exports.
//!
//! Generates a markdown section showing how layers are reached via
//! layer-tap, layer-switch and default-layer keys.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::constants::layer_name;
use crate::keycode::parse;
use crate::models::LayoutDocument;
use crate::services::layer_refs::{find_layer_refs, LayerRef};

/// Generates a markdown layer navigation diagram section.
///
/// # Example Output
///
/// ```markdown
/// ## Layer Navigation
///
/// Layer 0 (Base)
///   ├─→ LT1(KC_BSPACE) on Bsp → Layer 1 (Symbols)
///   └─→ LT2(KC_TAB) on Tab → Layer 2 (Numbers)
///
/// Layer 1 (Symbols)
///   └─→ [No outbound references]
/// ```
pub fn generate_layer_navigation(doc: &LayoutDocument, layer_names: &[String]) -> String {
    let mut output = String::new();

    output.push_str("## Layer Navigation\n\n");
    output.push_str("Shows how layers are reached via layer-tap and layer switching keys.\n\n");

    let mut outbound: BTreeMap<usize, Vec<LayerRef>> = BTreeMap::new();
    for layer_ref in find_layer_refs(doc) {
        outbound.entry(layer_ref.from_layer).or_default().push(layer_ref);
    }

    for layer_idx in 0..doc.layer_count() {
        let _ = writeln!(
            output,
            "Layer {} ({})",
            layer_idx,
            layer_name(layer_names, layer_idx)
        );

        let mut refs: Vec<&LayerRef> = outbound
            .get(&layer_idx)
            .map(|refs| refs.iter().collect())
            .unwrap_or_default();
        refs.sort_by_key(|r| r.to_layer);

        if refs.is_empty() {
            output.push_str("  └─→ [No outbound references]\n");
        }

        let ref_count = refs.len();
        for (idx, layer_ref) in refs.iter().enumerate() {
            let prefix = if idx == ref_count - 1 { "└─→" } else { "├─→" };

            let target = if layer_ref.is_resolved(doc.layer_count()) {
                layer_name(layer_names, layer_ref.to_layer)
            } else {
                "missing".to_string()
            };

            let _ = writeln!(
                output,
                "  {} {} on {} → Layer {} ({})",
                prefix,
                layer_ref.keycode,
                key_label(doc, layer_ref),
                layer_ref.to_layer,
                target
            );
        }

        output.push('\n');
    }

    output
}

/// Short label for the key holding a reference (the tap label, or the position).
fn key_label(doc: &LayoutDocument, layer_ref: &LayerRef) -> String {
    doc.keycode_at(layer_ref.from_layer, layer_ref.row, layer_ref.col)
        .map(|raw| parse(raw).primary_label)
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| format!("({}, {})", layer_ref.row, layer_ref.col))
}
