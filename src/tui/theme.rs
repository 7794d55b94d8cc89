//! Theme system for consistent UI colors across dark and light modes.
//!
//! Detects the OS theme (dark/light mode) when the configured mode is
//! `Auto`, and maps key categories to colors for the keyboard widget.

use ratatui::style::Color;

use crate::config::ThemeMode;
use crate::keycode::KeyCategory;

/// Semantic color theme for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Primary UI colors
    /// Primary color for borders, titles, and emphasis
    pub primary: Color,
    /// Accent color for highlights, selections, and focus states
    pub accent: Color,
    /// Error state color
    pub error: Color,
    /// Warning state color
    pub warning: Color,

    // Text hierarchy
    /// Primary text content color
    pub text: Color,
    /// Secondary text color for labels
    pub text_secondary: Color,
    /// Muted text color for help text and dim content
    pub text_muted: Color,

    // Backgrounds
    /// Main background color
    pub background: Color,
    /// Highlight/selection background color
    pub highlight_bg: Color,

    // Key categories
    /// Mod-tap keys
    pub key_mod_tap: Color,
    /// Layer-tap and layer switching keys
    pub key_layer: Color,
    /// Macro keys
    pub key_macro: Color,
    /// Standalone modifiers
    pub key_modifier: Color,
    /// Shifted symbols, GUI and special combos
    pub key_combo: Color,
    /// RGB control keys
    pub key_rgb: Color,
}

impl Theme {
    /// Detects the OS theme and returns the appropriate Theme.
    ///
    /// This uses the `dark-light` crate to detect whether the OS is in
    /// dark or light mode.
    #[must_use]
    pub fn detect() -> Self {
        match dark_light::detect() {
            Ok(dark_light::Mode::Light) => Self::light(),
            // Fall back to dark theme for dark mode, unspecified, or errors
            Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) | Err(_) => Self::dark(),
        }
    }

    /// Theme for the configured mode.
    #[must_use]
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Auto => Self::detect(),
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Creates a dark theme optimized for dark terminal backgrounds.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            error: Color::Red,
            warning: Color::Yellow,

            text: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,

            background: Color::Black,
            highlight_bg: Color::DarkGray,

            key_mod_tap: Color::Green,
            key_layer: Color::Cyan,
            key_macro: Color::Red,
            key_modifier: Color::Yellow,
            key_combo: Color::Magenta,
            key_rgb: Color::LightBlue,
        }
    }

    /// Creates a light theme optimized for light terminal backgrounds.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0), // Dark orange for visibility
            error: Color::Red,
            warning: Color::Rgb(200, 100, 0),

            text: Color::Black,
            text_secondary: Color::Rgb(60, 60, 60),
            text_muted: Color::Gray,

            background: Color::White,
            highlight_bg: Color::Rgb(230, 230, 230),

            key_mod_tap: Color::Rgb(0, 128, 0),
            key_layer: Color::Rgb(0, 110, 140),
            key_macro: Color::Rgb(170, 0, 0),
            key_modifier: Color::Rgb(150, 110, 0),
            key_combo: Color::Rgb(130, 0, 130),
            key_rgb: Color::Blue,
        }
    }

    /// Foreground color for a key of the given category.
    #[must_use]
    pub const fn category_color(&self, category: KeyCategory) -> Color {
        match category {
            KeyCategory::ModTap => self.key_mod_tap,
            KeyCategory::LayerTap | KeyCategory::LayerSwitch | KeyCategory::DefaultLayer => {
                self.key_layer
            }
            KeyCategory::Macro => self.key_macro,
            KeyCategory::PureModifier => self.key_modifier,
            KeyCategory::Shifted | KeyCategory::GuiCombo | KeyCategory::ComboSpecial => {
                self.key_combo
            }
            KeyCategory::RgbControl => self.key_rgb,
            KeyCategory::Transparent | KeyCategory::Empty => self.text_muted,
            KeyCategory::Basic => self.text,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_dark() {
        let theme = Theme::dark();
        assert_eq!(theme.primary, Color::Cyan);
        assert_eq!(theme.background, Color::Black);
        assert_eq!(theme.text, Color::White);
    }

    #[test]
    fn test_theme_light() {
        let theme = Theme::light();
        assert_eq!(theme.text, Color::Black);
        assert_eq!(theme.background, Color::White);
        // Verify accent is not yellow (too bright for light bg)
        assert_ne!(theme.accent, Color::Yellow);
    }

    #[test]
    fn test_theme_from_mode() {
        assert_eq!(Theme::from_mode(ThemeMode::Dark), Theme::dark());
        assert_eq!(Theme::from_mode(ThemeMode::Light), Theme::light());
        let auto = Theme::from_mode(ThemeMode::Auto);
        assert!(auto == Theme::dark() || auto == Theme::light());
    }

    #[test]
    fn test_category_colors() {
        let theme = Theme::dark();
        assert_eq!(theme.category_color(KeyCategory::ModTap), Color::Green);
        assert_eq!(theme.category_color(KeyCategory::LayerTap), Color::Cyan);
        assert_eq!(theme.category_color(KeyCategory::Macro), Color::Red);
        assert_eq!(theme.category_color(KeyCategory::PureModifier), Color::Yellow);
        assert_eq!(theme.category_color(KeyCategory::Transparent), theme.text_muted);
        assert_eq!(theme.category_color(KeyCategory::Basic), theme.text);
    }
}
