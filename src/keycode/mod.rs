//! Keycode expression language.
//!
//! Parses the keycode tokens found in layout files (plain keys, modifiers,
//! macros and nested combinators such as `LT1(KC_SPACE)` or
//! `LCTL_T(KC_A)`) into a canonical display model, and resolves that model
//! against a physical key position into something a renderer can draw.
//!
//! Everything here is pure: no I/O, no shared mutable state. The symbol
//! tables are process-wide read-only statics.

pub mod parser;
pub mod resolver;
pub mod symbols;

pub use parser::{key_display, parse, parse_str, HoldKind, KeyCategory, ParsedKey};
pub use resolver::{resolve, KeyDescriptor, PositionFlags};
