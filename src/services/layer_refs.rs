//! Layer reference tracking and analysis.
//!
//! Scans a layout document for keys that activate another layer, enabling:
//! - Listing which layers a layer can reach (and from where)
//! - Flagging references to layers the document does not define

use serde::Serialize;
use std::collections::BTreeMap;

use crate::keycode::{parse, KeyCategory, ParsedKey};
use crate::models::LayoutDocument;

/// Type of layer reference (how a key activates another layer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerRefKind {
    /// Momentary layer switch while held - MO(n)
    Momentary,
    /// Layer tap - tap for key, hold for layer - LTn(key) / LT(n, key)
    TapHold,
    /// Toggle layer on/off - TG(n)
    Toggle,
    /// One-shot layer (next key only) - OSL(n)
    OneShot,
    /// Switch to layer - TO(n)
    SwitchTo,
    /// Tap toggle - TT(n)
    TapToggle,
    /// Set default layer - DF(n)
    DefaultSet,
}

impl LayerRefKind {
    /// Returns true if this is a "hold-like" layer reference: the layer is
    /// active only while the key is held down.
    #[must_use]
    pub const fn is_hold_like(self) -> bool {
        matches!(self, Self::Momentary | Self::TapHold | Self::TapToggle)
    }

    /// Get a human-readable name for this layer reference kind
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Momentary => "Momentary (MO)",
            Self::TapHold => "Tap-Hold (LT)",
            Self::Toggle => "Toggle (TG)",
            Self::OneShot => "One-Shot (OSL)",
            Self::SwitchTo => "Switch (TO)",
            Self::TapToggle => "Tap-Toggle (TT)",
            Self::DefaultSet => "Default Set (DF)",
        }
    }

    /// Derives the reference kind from a parsed key, if it names a layer.
    #[must_use]
    pub fn from_parsed(key: &ParsedKey) -> Option<Self> {
        match key.category {
            KeyCategory::LayerTap => Some(Self::TapHold),
            KeyCategory::DefaultLayer => Some(Self::DefaultSet),
            KeyCategory::LayerSwitch => {
                let token = key.raw.to_string();
                match token.split('(').next()? {
                    "MO" => Some(Self::Momentary),
                    "TG" => Some(Self::Toggle),
                    "TO" => Some(Self::SwitchTo),
                    "TT" => Some(Self::TapToggle),
                    "OSL" => Some(Self::OneShot),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// A reference from one layer to another via a layer-switching keycode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerRef {
    /// Source layer index (where the key is)
    pub from_layer: usize,
    /// Target layer index (which layer it activates)
    pub to_layer: usize,
    /// Document row of the key in the source layer
    pub row: usize,
    /// Document column of the key in the source layer
    pub col: usize,
    /// Type of layer reference
    pub kind: LayerRefKind,
    /// The full keycode string (e.g., "MO(1)", "LT2(KC_TAB)")
    pub keycode: String,
}

impl LayerRef {
    /// Returns true when the target layer exists in a document with `layer_count` layers.
    #[must_use]
    pub const fn is_resolved(&self, layer_count: usize) -> bool {
        self.to_layer < layer_count
    }
}

/// Collects every layer reference in the document, in document order.
///
/// # Examples
/// ```
/// use kbview::models::{LayoutDocument, RawKeycode};
/// use kbview::services::layer_refs::{find_layer_refs, LayerRefKind};
///
/// let doc = LayoutDocument::new(vec![
///     vec![vec![RawKeycode::token("LT1(KC_SPACE)"), RawKeycode::token("KC_A")]],
///     vec![vec![RawKeycode::token("KC_TRNS"), RawKeycode::token("TG(0)")]],
/// ]);
///
/// let refs = find_layer_refs(&doc);
/// assert_eq!(refs.len(), 2);
/// assert_eq!(refs[0].kind, LayerRefKind::TapHold);
/// assert_eq!(refs[1].to_layer, 0);
/// ```
#[must_use]
pub fn find_layer_refs(doc: &LayoutDocument) -> Vec<LayerRef> {
    let mut refs = Vec::new();

    for from_layer in 0..doc.layer_count() {
        for (row, col, raw) in doc.cells(from_layer) {
            let key = parse(raw);
            let Some(to_layer) = key.layer else {
                continue;
            };
            if let Some(kind) = LayerRefKind::from_parsed(&key) {
                refs.push(LayerRef {
                    from_layer,
                    to_layer,
                    row,
                    col,
                    kind,
                    keycode: raw.to_string(),
                });
            }
        }
    }

    refs
}

/// Build a reverse index of all layer references in the document
///
/// Returns a map from target layer index to every key that references it.
#[must_use]
pub fn build_layer_ref_index(doc: &LayoutDocument) -> BTreeMap<usize, Vec<LayerRef>> {
    let mut index: BTreeMap<usize, Vec<LayerRef>> = BTreeMap::new();
    for layer_ref in find_layer_refs(doc) {
        index.entry(layer_ref.to_layer).or_default().push(layer_ref);
    }
    index
}

/// References whose target layer is not defined by the document.
#[must_use]
pub fn dangling_refs(doc: &LayoutDocument) -> Vec<LayerRef> {
    let layer_count = doc.layer_count();
    find_layer_refs(doc)
        .into_iter()
        .filter(|r| !r.is_resolved(layer_count))
        .collect()
}

/// A key on a target layer that shadows the key holding the layer active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransparencyConflict {
    /// The hold-like reference
    pub layer_ref: LayerRef,
    /// Keycode found at the same position on the target layer
    pub target_keycode: String,
}

impl TransparencyConflict {
    /// Human-readable warning.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Non-transparent key ({}) on layer {} conflicts with hold-like reference from Layer {} {}",
            self.target_keycode,
            self.layer_ref.to_layer,
            self.layer_ref.from_layer,
            self.layer_ref.kind.display_name()
        )
    }
}

/// Finds hold-like references whose own position is not transparent on the target layer.
///
/// While a layer is held, the key doing the holding is read from the target
/// layer; anything other than a transparent key there fires on release.
#[must_use]
pub fn transparency_conflicts(doc: &LayoutDocument) -> Vec<TransparencyConflict> {
    find_layer_refs(doc)
        .into_iter()
        .filter(|r| r.kind.is_hold_like() && r.to_layer != r.from_layer)
        .filter_map(|layer_ref| {
            let target = doc.keycode_at(layer_ref.to_layer, layer_ref.row, layer_ref.col)?;
            if target.is_sentinel() || parse(target).category == KeyCategory::Transparent {
                return None;
            }
            Some(TransparencyConflict {
                target_keycode: target.to_string(),
                layer_ref,
            })
        })
        .collect()
}
