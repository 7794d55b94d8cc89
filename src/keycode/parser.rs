//! Keycode expression parser.
//!
//! Turns one raw keycode into a [`ParsedKey`]. Rules are tried in a fixed
//! priority order and the first match wins; several patterns are textual
//! subsets of later ones, so the order is part of the contract:
//!
//! sentinel → transparent → no-op → macro → mod-tap → layer-tap → shifted →
//! GUI combo → shift+alt → default layer → layer switch → RGB → caps word →
//! pure modifier → basic fallback.
//!
//! Parsing is total: any string yields a `ParsedKey`, unknown tokens degrade
//! to a truncated label.

use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::sync::LazyLock;

use super::symbols;
use crate::models::RawKeycode;

/// Nesting depth past which inner keys are labelled without further recursion.
pub const MAX_NESTING_DEPTH: usize = 16;

static MACRO: LazyLock<Regex> = LazyLock::new(|| compile(r"^M[0-9]+$"));
static MOD_TAP: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^([LR])(CTL|SFT|ALT|GUI)_T\((.+)\)$"));
static LAYER_TAP: LazyLock<Regex> = LazyLock::new(|| compile(r"^LT([0-9]+)\((.+)\)$"));
static LAYER_TAP_QMK: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^LT\(([0-9]+),\s*(.+)\)$"));
static SHIFTED: LazyLock<Regex> = LazyLock::new(|| compile(r"^LSFT\((.+)\)$"));
static GUI_COMBO: LazyLock<Regex> = LazyLock::new(|| compile(r"^LGUI\((.+)\)$"));
static SHIFT_ALT: LazyLock<Regex> = LazyLock::new(|| compile(r"^LSA\((.+)\)$"));
static DEFAULT_LAYER: LazyLock<Regex> = LazyLock::new(|| compile(r"^DF\(([0-9]+)\)$"));
static LAYER_SWITCH: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^(MO|TG|TO|TT|OSL)\(([0-9]+)\)$"));
static FUNCTION_KEY: LazyLock<Regex> = LazyLock::new(|| compile(r"^F[0-9]+$"));

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    // Patterns are string literals in this file
    Regex::new(pattern).expect("keycode pattern must compile")
}

/// Display category of a parsed key.
///
/// The set is closed: every combinator maps to exactly one variant and
/// renderers style keys by matching on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCategory {
    /// No key programmed, or an explicit no-op
    Empty,
    /// Falls through to the layer below
    Transparent,
    /// User-defined macro (M0, M1, ...)
    Macro,
    /// Tap for a key, hold for a modifier
    ModTap,
    /// Tap for a key, hold for a layer
    LayerTap,
    /// Shifted key (LSFT(...))
    Shifted,
    /// GUI/Command combination (LGUI(...))
    GuiCombo,
    /// Special combinations (shift+alt, caps word)
    ComboSpecial,
    /// Sets the default layer
    DefaultLayer,
    /// Momentary, toggle, one-shot or switch-to layer keys
    LayerSwitch,
    /// RGB lighting control
    RgbControl,
    /// Standalone modifier key
    PureModifier,
    /// Plain key
    Basic,
}

/// What the hold (secondary) label of a key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldKind {
    /// Holding activates a layer
    Layer,
    /// Holding acts as a modifier
    Modifier,
}

impl KeyCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 13] = [
        Self::Basic,
        Self::ModTap,
        Self::LayerTap,
        Self::Shifted,
        Self::GuiCombo,
        Self::ComboSpecial,
        Self::DefaultLayer,
        Self::LayerSwitch,
        Self::RgbControl,
        Self::PureModifier,
        Self::Macro,
        Self::Transparent,
        Self::Empty,
    ];

    /// Style class used by renderers.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Transparent => "transparent",
            Self::Macro => "macro",
            Self::ModTap => "mod-tap",
            Self::LayerTap => "layer-tap",
            Self::Shifted => "shifted",
            Self::GuiCombo => "gui-combo",
            Self::ComboSpecial => "combo-special",
            Self::DefaultLayer => "default-layer",
            Self::LayerSwitch => "layer-switch",
            Self::RgbControl => "rgb-control",
            Self::PureModifier => "modifier",
            Self::Basic => "basic",
        }
    }

    /// Human-readable name for legends and detail panels.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Empty => "Empty",
            Self::Transparent => "Transparent",
            Self::Macro => "Macro",
            Self::ModTap => "Mod-tap",
            Self::LayerTap => "Layer-tap",
            Self::Shifted => "Shifted",
            Self::GuiCombo => "GUI combo",
            Self::ComboSpecial => "Special combo",
            Self::DefaultLayer => "Default layer",
            Self::LayerSwitch => "Layer switch",
            Self::RgbControl => "RGB control",
            Self::PureModifier => "Modifier",
            Self::Basic => "Basic",
        }
    }

    /// What the secondary label means for this category, if it has one.
    #[must_use]
    pub const fn hold_kind(self) -> Option<HoldKind> {
        match self {
            Self::LayerTap => Some(HoldKind::Layer),
            Self::ModTap => Some(HoldKind::Modifier),
            _ => None,
        }
    }
}

/// Canonical display model of one keycode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedKey {
    /// Glyph or abbreviation for the tap/base action (may be empty)
    pub primary_label: String,
    /// Held modifier or target layer annotation (empty when not applicable)
    pub secondary_label: String,
    /// Display category
    pub category: KeyCategory,
    /// The keycode as it appeared in the document
    pub raw: RawKeycode,
    /// Layer named by layer-tap, default-layer and layer-switch keys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<usize>,
}

impl ParsedKey {
    /// Returns true if the position has no key programmed (the `-1` sentinel).
    #[must_use]
    pub fn is_unprogrammed(&self) -> bool {
        self.raw.is_sentinel()
    }
}

/// Labels and category computed for a token, before the raw value is attached.
#[derive(Debug)]
struct Classification {
    primary: String,
    secondary: String,
    category: KeyCategory,
    layer: Option<usize>,
}

impl Classification {
    fn new(primary: impl Into<String>, category: KeyCategory) -> Self {
        Self {
            primary: primary.into(),
            secondary: String::new(),
            category,
            layer: None,
        }
    }

    fn with_secondary(mut self, secondary: impl Into<String>) -> Self {
        self.secondary = secondary.into();
        self
    }

    /// `layer` is all digits; numbers too large for `usize` saturate so the
    /// key still names a (missing) layer.
    fn with_layer(mut self, layer: &str) -> Self {
        self.layer = Some(layer.parse().unwrap_or(usize::MAX));
        self
    }

    fn into_parsed(self, raw: &RawKeycode) -> ParsedKey {
        ParsedKey {
            primary_label: self.primary,
            secondary_label: self.secondary,
            category: self.category,
            raw: raw.clone(),
            layer: self.layer,
        }
    }
}

/// Parses a raw keycode into its display model.
///
/// # Examples
///
/// ```
/// use kbview::keycode::{parse, KeyCategory};
/// use kbview::models::RawKeycode;
///
/// let key = parse(&RawKeycode::token("LCTL_T(KC_A)"));
/// assert_eq!(key.primary_label, "A");
/// assert_eq!(key.secondary_label, "Ctl");
/// assert_eq!(key.category, KeyCategory::ModTap);
/// ```
#[must_use]
pub fn parse(raw: &RawKeycode) -> ParsedKey {
    if raw.is_sentinel() {
        return Classification::new("", KeyCategory::Empty).into_parsed(raw);
    }

    let token: Cow<'_, str> = match raw {
        RawKeycode::Int(value) => Cow::Owned(format!("KC_{value}")),
        RawKeycode::Token(token) => Cow::Borrowed(token),
    };

    classify(&token, 0).into_parsed(raw)
}

/// Parses a keycode given as a string token.
#[must_use]
pub fn parse_str(token: &str) -> ParsedKey {
    parse(&RawKeycode::token(token))
}

fn classify(token: &str, depth: usize) -> Classification {
    if token == "-1" {
        return Classification::new("", KeyCategory::Empty);
    }

    if symbols::TRANSPARENT_TOKENS.contains(&token) {
        return Classification::new(symbols::TRANSPARENT_GLYPH, KeyCategory::Transparent);
    }

    if symbols::NO_OP_TOKENS.contains(&token) {
        return Classification::new("", KeyCategory::Empty);
    }

    if MACRO.is_match(token) {
        return Classification::new(token, KeyCategory::Macro);
    }

    if let Some(caps) = MOD_TAP.captures(token) {
        let modifier = format!("{}{}", &caps[1], &caps[2]);
        return Classification::new(inner_label(&caps[3], depth), KeyCategory::ModTap)
            .with_secondary(symbols::modifier_short_name(&modifier));
    }

    if let Some(caps) = LAYER_TAP
        .captures(token)
        .or_else(|| LAYER_TAP_QMK.captures(token))
    {
        let layer = &caps[1];
        return Classification::new(inner_label(&caps[2], depth), KeyCategory::LayerTap)
            .with_secondary(format!("L{layer}"))
            .with_layer(layer);
    }

    if let Some(caps) = SHIFTED.captures(token) {
        let inner = &caps[1];
        let label = symbols::shifted_symbol(symbols::strip_namespace(inner)).map_or_else(
            || format!("S-{}", inner_label(inner, depth)),
            str::to_string,
        );
        return Classification::new(label, KeyCategory::Shifted);
    }

    if let Some(caps) = GUI_COMBO.captures(token) {
        let label = format!("{}{}", symbols::COMMAND_GLYPH, inner_label(&caps[1], depth));
        return Classification::new(label, KeyCategory::GuiCombo);
    }

    if let Some(caps) = SHIFT_ALT.captures(token) {
        // The inner token is shown literally, only its KC_ prefix is dropped
        let inner = &caps[1];
        let inner = inner.strip_prefix("KC_").unwrap_or(inner);
        return Classification::new(format!("SA-{inner}"), KeyCategory::ComboSpecial);
    }

    if let Some(caps) = DEFAULT_LAYER.captures(token) {
        let layer = &caps[1];
        return Classification::new(format!("DF{layer}"), KeyCategory::DefaultLayer)
            .with_layer(layer);
    }

    if let Some(caps) = LAYER_SWITCH.captures(token) {
        let prefix = match &caps[1] {
            "OSL" => "OS",
            other => other,
        };
        let layer = &caps[2];
        return Classification::new(format!("{prefix}{layer}"), KeyCategory::LayerSwitch)
            .with_layer(layer);
    }

    if let Some(rest) = token.strip_prefix("RM_") {
        let label: String = rest.chars().take(3).collect();
        return Classification::new(label, KeyCategory::RgbControl);
    }

    if symbols::CAPS_WORD_TOKENS.contains(&token) {
        return Classification::new(symbols::CAPS_WORD_LABEL, KeyCategory::ComboSpecial);
    }

    if symbols::is_pure_modifier(token.strip_prefix("KC_").unwrap_or(token)) {
        return Classification::new(key_display(token), KeyCategory::PureModifier);
    }

    Classification::new(key_display(token), KeyCategory::Basic)
}

/// Label of a wrapped inner key, resolved with the same rules as the outer key.
fn inner_label(inner: &str, depth: usize) -> String {
    if depth + 1 >= MAX_NESTING_DEPTH {
        return key_display(inner);
    }
    classify(inner, depth + 1).primary
}

/// Display label for a basic keycode.
///
/// Strips the namespace prefix, then uses the named-key table, a single
/// character, a function-key name, or finally the first three characters.
#[must_use]
pub fn key_display(token: &str) -> String {
    let name = symbols::strip_namespace(token);

    if let Some(label) = symbols::base_label(name) {
        return label.to_string();
    }

    if name.chars().count() == 1 || FUNCTION_KEY.is_match(name) {
        return name.to_string();
    }

    name.chars().take(3).collect()
}
