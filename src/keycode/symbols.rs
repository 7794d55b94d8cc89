//! Static symbol tables used by the keycode parser.
//!
//! All tables are keyed by the keycode name with its namespace prefix
//! (`KC_`, `QK_`) already stripped.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Glyph shown for transparent keys ("same as the layer below").
pub const TRANSPARENT_GLYPH: &str = "▽";

/// Glyph prefixed to GUI/Command combinations.
pub const COMMAND_GLYPH: &str = "⌘";

/// Label shown for the caps-word toggle.
pub const CAPS_WORD_LABEL: &str = "CpW";

/// Namespace prefixes stripped before a table lookup.
pub const NAMESPACE_PREFIXES: &[&str] = &["KC_", "QK_"];

/// Tokens meaning "fall through to the layer below".
pub const TRANSPARENT_TOKENS: &[&str] = &["KC_TRNS", "TRNS", "KC_TRANSPARENT", "_______"];

/// Tokens meaning "do nothing".
pub const NO_OP_TOKENS: &[&str] = &["KC_NO", "NO", "XXXXXXX"];

/// Tokens toggling caps word.
pub const CAPS_WORD_TOKENS: &[&str] = &["QK_CAPS_WORD_TOGGLE", "CW_TOGG"];

/// Standalone modifier keys, without namespace prefix.
pub const PURE_MODIFIERS: &[&str] = &[
    "LSHIFT", "RSHIFT", "LCTRL", "RCTRL", "LALT", "RALT", "LGUI", "RGUI",
];

/// Short display names for the modifiers used by mod-tap keys.
const MODIFIER_SHORT_NAMES: &[(&str, &str)] = &[
    ("LCTL", "Ctl"),
    ("RCTL", "Ctl"),
    ("LSFT", "Sft"),
    ("RSFT", "Sft"),
    ("LALT", "Alt"),
    ("RALT", "Alt"),
    ("LGUI", "Gui"),
    ("RGUI", "Gui"),
];

/// Symbols produced by shifting a base key.
const SHIFTED_SYMBOLS: &[(&str, &str)] = &[
    ("1", "!"),
    ("2", "@"),
    ("3", "#"),
    ("4", "$"),
    ("5", "%"),
    ("6", "^"),
    ("7", "&"),
    ("8", "*"),
    ("9", "("),
    ("0", ")"),
    ("MINUS", "_"),
    ("EQUAL", "+"),
    ("LBRACKET", "{"),
    ("RBRACKET", "}"),
    ("BSLASH", "|"),
    ("SCOLON", ":"),
    ("QUOTE", "\""),
    ("GRAVE", "~"),
    ("COMMA", "<"),
    ("DOT", ">"),
    ("SLASH", "?"),
];

/// Display labels for named base keys.
const BASE_LABELS: &[(&str, &str)] = &[
    // Editing and whitespace
    ("SPACE", "Spc"),
    ("BSPACE", "Bsp"),
    ("DELETE", "Del"),
    ("ENTER", "Ent"),
    ("TAB", "Tab"),
    ("ESCAPE", "Esc"),
    ("CAPSLOCK", "Cap"),
    ("INSERT", "Ins"),
    // Navigation
    ("LEFT", "←"),
    ("RIGHT", "→"),
    ("UP", "↑"),
    ("DOWN", "↓"),
    ("HOME", "Hom"),
    ("END", "End"),
    ("PGUP", "PgU"),
    ("PGDOWN", "PgD"),
    // Modifiers
    ("LSHIFT", "LSf"),
    ("RSHIFT", "RSf"),
    ("LCTRL", "LCl"),
    ("RCTRL", "RCl"),
    ("LALT", "LAl"),
    ("RALT", "RAl"),
    ("LGUI", "LGi"),
    ("RGUI", "RGi"),
    // Punctuation
    ("GRAVE", "`"),
    ("MINUS", "-"),
    ("EQUAL", "="),
    ("LBRACKET", "["),
    ("RBRACKET", "]"),
    ("BSLASH", "\\"),
    ("SCOLON", ";"),
    ("QUOTE", "'"),
    ("COMMA", ","),
    ("DOT", "."),
    ("SLASH", "/"),
    // Media and mouse
    ("MUTE", "Mut"),
    ("VOLU", "V+"),
    ("VOLD", "V-"),
    ("MNXT", "Nxt"),
    ("MPRV", "Prv"),
    ("MPLY", "Ply"),
    ("WH_U", "WU"),
    ("WH_D", "WD"),
    ("BTN1", "B1"),
    ("BTN2", "B2"),
    // Keypad
    ("KP_0", "0"),
    ("KP_1", "1"),
    ("KP_2", "2"),
    ("KP_3", "3"),
    ("KP_4", "4"),
    ("KP_5", "5"),
    ("KP_6", "6"),
    ("KP_7", "7"),
    ("KP_8", "8"),
    ("KP_9", "9"),
    ("KP_DOT", "."),
    ("KP_PLUS", "+"),
    ("KP_MINUS", "-"),
    ("KP_ASTERISK", "*"),
    ("KP_SLASH", "/"),
    ("KP_EQUAL", "="),
    ("KP_ENTER", "Ent"),
    // Firmware
    ("BOOT", "Bt"),
    ("NO", ""),
    ("TRNS", TRANSPARENT_GLYPH),
];

static BASE_LABEL_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| BASE_LABELS.iter().copied().collect());

static SHIFTED_SYMBOL_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| SHIFTED_SYMBOLS.iter().copied().collect());

/// Removes the first matching namespace prefix (`KC_`, `QK_`) from a token.
#[must_use]
pub fn strip_namespace(token: &str) -> &str {
    NAMESPACE_PREFIXES
        .iter()
        .find_map(|prefix| token.strip_prefix(prefix))
        .unwrap_or(token)
}

/// Looks up the display label of a named base key (prefix already stripped).
#[must_use]
pub fn base_label(name: &str) -> Option<&'static str> {
    BASE_LABEL_MAP.get(name).copied()
}

/// Looks up the shifted symbol of a base key (prefix already stripped).
#[must_use]
pub fn shifted_symbol(name: &str) -> Option<&'static str> {
    SHIFTED_SYMBOL_MAP.get(name).copied()
}

/// Short name for a mod-tap modifier, falling back to its first three characters.
#[must_use]
pub fn modifier_short_name(modifier: &str) -> String {
    MODIFIER_SHORT_NAMES
        .iter()
        .find(|(name, _)| *name == modifier)
        .map_or_else(
            || modifier.chars().take(3).collect(),
            |(_, short)| (*short).to_string(),
        )
}

/// Returns true if the (prefix-stripped) name is a standalone modifier key.
#[must_use]
pub fn is_pure_modifier(name: &str) -> bool {
    PURE_MODIFIERS.contains(&name)
}
