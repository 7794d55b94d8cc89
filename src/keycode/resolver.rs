//! Key resolution: parsed keycode + physical position → render descriptor.

use serde::Serialize;
use std::collections::BTreeSet;

use super::parser::{HoldKind, KeyCategory, ParsedKey};

/// Labels longer than this get the `small` style hint.
pub const COMPACT_LABEL_THRESHOLD: usize = 6;

/// Labels longer than this additionally get the `tiny` style hint.
pub const EXTRA_COMPACT_LABEL_THRESHOLD: usize = 10;

/// Positional metadata supplied by the physical layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PositionFlags {
    /// Key sits on the home row
    pub is_home_row: bool,
    /// Key is a rotary encoder
    pub is_encoder: bool,
}

impl PositionFlags {
    /// Flags for a home-row key.
    #[must_use]
    pub const fn home_row() -> Self {
        Self {
            is_home_row: true,
            is_encoder: false,
        }
    }

    /// Flags for an encoder.
    #[must_use]
    pub const fn encoder() -> Self {
        Self {
            is_home_row: false,
            is_encoder: true,
        }
    }
}

/// Everything a renderer needs to draw one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyDescriptor {
    /// Main label (tap action)
    pub label: String,
    /// Hold annotation, only present when non-empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hold: Option<String>,
    /// Style classes (category, position and size hints)
    pub style_classes: BTreeSet<String>,
    /// Raw keycode text (empty for unprogrammed positions)
    pub tooltip: String,
    /// Display category
    pub category: KeyCategory,
    /// False for positions with no key programmed; renderers skip these
    pub visible: bool,
}

impl KeyDescriptor {
    /// Returns true if the descriptor carries the given style class.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.style_classes.contains(class)
    }

    /// Rows for a key details panel as `(label, value)` pairs.
    #[must_use]
    pub fn details(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![("Raw", self.tooltip.clone())];

        if !self.label.is_empty() {
            rows.push(("Tap", self.label.clone()));
        }

        if let Some(hold) = &self.hold {
            rows.push(("Hold", hold.clone()));
        }

        if self.category != KeyCategory::Basic {
            rows.push(("Type", self.category.display_name().to_string()));
        }

        rows
    }
}

/// Resolves a parsed key at a physical position into a render descriptor.
#[must_use]
pub fn resolve(key: &ParsedKey, flags: PositionFlags) -> KeyDescriptor {
    let mut style_classes = BTreeSet::new();
    style_classes.insert(key.category.css_class().to_string());

    if flags.is_home_row {
        style_classes.insert("home-row".to_string());
    }
    if flags.is_encoder {
        style_classes.insert("encoder".to_string());
    }

    let label_len = key.primary_label.chars().count();
    if label_len > COMPACT_LABEL_THRESHOLD {
        style_classes.insert("small".to_string());
    }
    if label_len > EXTRA_COMPACT_LABEL_THRESHOLD {
        style_classes.insert("tiny".to_string());
    }

    let hold = (!key.secondary_label.is_empty()).then(|| key.secondary_label.clone());

    if hold.is_some() {
        match key.category.hold_kind() {
            Some(HoldKind::Layer) => {
                style_classes.insert("hold-layer".to_string());
            }
            Some(HoldKind::Modifier) => {
                style_classes.insert("hold-mod".to_string());
            }
            None => {}
        }
    }

    KeyDescriptor {
        label: key.primary_label.clone(),
        hold,
        style_classes,
        tooltip: key.raw.tooltip_text(),
        category: key.category,
        visible: !key.is_unprogrammed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode::parse_str;
    use crate::models::RawKeycode;

    fn parsed(label: &str, category: KeyCategory) -> ParsedKey {
        ParsedKey {
            primary_label: label.to_string(),
            secondary_label: String::new(),
            category,
            raw: RawKeycode::token("KC_X"),
            layer: None,
        }
    }

    #[test]
    fn test_category_class_always_present() {
        let desc = resolve(&parse_str("KC_A"), PositionFlags::default());
        assert!(desc.has_class("basic"));
        assert_eq!(desc.style_classes.len(), 1);
    }

    #[test]
    fn test_position_classes() {
        let desc = resolve(&parse_str("KC_A"), PositionFlags::home_row());
        assert!(desc.has_class("home-row"));
        assert!(!desc.has_class("encoder"));

        let desc = resolve(&parse_str("KC_A"), PositionFlags::encoder());
        assert!(desc.has_class("encoder"));
        assert!(!desc.has_class("home-row"));
    }

    #[test]
    fn test_size_hints() {
        let six = resolve(&parsed("ABCDEF", KeyCategory::Basic), PositionFlags::default());
        assert!(!six.has_class("small"));

        let seven = resolve(&parsed("ABCDEFG", KeyCategory::Basic), PositionFlags::default());
        assert!(seven.has_class("small"));
        assert!(!seven.has_class("tiny"));

        let eleven = resolve(
            &parsed("ABCDEFGHIJK", KeyCategory::Macro),
            PositionFlags::default(),
        );
        assert!(eleven.has_class("small"));
        assert!(eleven.has_class("tiny"));
    }

    #[test]
    fn test_size_hints_count_characters_not_bytes() {
        let desc = resolve(&parsed("←→↑↓", KeyCategory::Basic), PositionFlags::default());
        assert!(!desc.has_class("small"));
    }

    #[test]
    fn test_hold_surfaced_only_when_present() {
        let desc = resolve(&parse_str("LT1(KC_SPACE)"), PositionFlags::default());
        assert_eq!(desc.label, "Spc");
        assert_eq!(desc.hold.as_deref(), Some("L1"));
        assert!(desc.has_class("hold-layer"));

        let desc = resolve(&parse_str("LALT_T(KC_S)"), PositionFlags::home_row());
        assert_eq!(desc.hold.as_deref(), Some("Alt"));
        assert!(desc.has_class("hold-mod"));
        assert!(desc.has_class("mod-tap"));

        let desc = resolve(&parse_str("KC_A"), PositionFlags::default());
        assert_eq!(desc.hold, None);
    }

    #[test]
    fn test_tooltip() {
        let desc = resolve(&parse_str("LSFT(KC_1)"), PositionFlags::default());
        assert_eq!(desc.tooltip, "LSFT(KC_1)");

        let desc = resolve(&crate::keycode::parse(&RawKeycode::Int(-1)), PositionFlags::default());
        assert_eq!(desc.tooltip, "");
        assert!(!desc.visible);
        assert!(desc.has_class("empty"));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let key = parse_str("LCTL_T(KC_A)");
        let flags = PositionFlags::home_row();
        assert_eq!(resolve(&key, flags), resolve(&key, flags));
    }

    #[test]
    fn test_details_rows() {
        let desc = resolve(&parse_str("LT2(KC_TAB)"), PositionFlags::default());
        let details = desc.details();
        assert_eq!(details[0], ("Raw", "LT2(KC_TAB)".to_string()));
        assert_eq!(details[1], ("Tap", "Tab".to_string()));
        assert_eq!(details[2], ("Hold", "L2".to_string()));
        assert_eq!(details[3], ("Type", "Layer-tap".to_string()));

        let desc = resolve(&parse_str("KC_A"), PositionFlags::default());
        assert_eq!(desc.details().len(), 2);
    }
}
