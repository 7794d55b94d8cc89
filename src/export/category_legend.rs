//! Key type legend for layout exports.
//!
//! Documents which kinds of keys appear in a layout and how often, so a
//! reader of the exported diagrams can tell a mod-tap from a plain key.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::keycode::{parse, KeyCategory};
use crate::models::LayoutDocument;

/// Counts keys per category across every layer (unprogrammed cells excluded).
#[must_use]
pub fn count_categories(doc: &LayoutDocument) -> BTreeMap<KeyCategory, usize> {
    let mut counts = BTreeMap::new();
    for layer_idx in 0..doc.layer_count() {
        for (_, _, raw) in doc.cells(layer_idx) {
            if raw.is_sentinel() {
                continue;
            }
            *counts.entry(parse(raw).category).or_insert(0) += 1;
        }
    }
    counts
}

/// How a key of this category is drawn in the diagrams.
const fn legend_hint(category: KeyCategory) -> &'static str {
    match category {
        KeyCategory::Empty => "blank (KC_NO)",
        KeyCategory::Transparent => "▽, falls through to the layer below",
        KeyCategory::Macro => "macro slot",
        KeyCategory::ModTap => "tap label, held modifier below",
        KeyCategory::LayerTap => "tap label, held layer below",
        KeyCategory::Shifted => "shifted symbol",
        KeyCategory::GuiCombo => "⌘ + key",
        KeyCategory::ComboSpecial => "shift+alt combos and Caps Word",
        KeyCategory::DefaultLayer => "DFn, sets the default layer",
        KeyCategory::LayerSwitch => "MOn, TGn, TOn, TTn or OSn",
        KeyCategory::RgbControl => "RGB matrix control",
        KeyCategory::PureModifier => "modifier key",
        KeyCategory::Basic => "plain key",
    }
}

/// Generates a markdown key type legend section.
///
/// # Example Output
///
/// ```markdown
/// ## Key Types
///
/// | Type | Keys | Drawn as |
/// |------|------|----------|
/// | Layer-tap | 6 | tap label, held layer below |
/// ```
pub fn generate_category_legend(doc: &LayoutDocument) -> String {
    let counts = count_categories(doc);
    let mut output = String::new();

    output.push_str("## Key Types\n\n");
    output.push_str("| Type | Keys | Drawn as |\n");
    output.push_str("|------|------|----------|\n");

    for category in KeyCategory::ALL {
        let Some(count) = counts.get(&category) else {
            continue;
        };
        let _ = writeln!(
            output,
            "| {} | {} | {} |",
            category.display_name(),
            count,
            legend_hint(category)
        );
    }

    output.push('\n');
    output
}
