//! Keyboard widget for rendering the physical keyboard layout

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::{AppState, KeyboardView, Theme};
use crate::keycode::KeyDescriptor;
use crate::models::keyboard_geometry::{TERMINAL_CHARS_PER_UNIT, TERMINAL_LINES_PER_UNIT};
use crate::models::KeyGeometry;

/// Keyboard widget renders every key at its physical position
pub struct KeyboardWidget;

impl KeyboardWidget {
    /// Render the keyboard widget
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let block = Block::default()
            .title(format!(
                " Layer {}: {} ",
                state.current_layer,
                state.current_layer_name()
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let Some(view) = state.current_view() else {
            Self::render_message(f, inner, "No keyboard configured", theme);
            return;
        };

        if view.document.is_none() {
            let message = view.load_error.as_deref().unwrap_or("Layout not loaded");
            Self::render_message(f, inner, message, theme);
            return;
        }

        let origin = Self::centered_origin(view, inner);

        for key in &view.geometry.keys {
            let Some(descriptor) = view.descriptor(state.current_layer, key) else {
                continue;
            };
            if !descriptor.visible {
                continue;
            }

            let Some(key_area) = Self::key_area(key, origin, inner) else {
                continue;
            };

            let is_selected = state.selected_key == Some((key.row(), key.col()));
            Self::render_key(f, key_area, &descriptor, is_selected, theme);
        }
    }

    /// Top-left corner that centers the keyboard inside `area`.
    fn centered_origin(view: &KeyboardView, area: Rect) -> (u16, u16) {
        let (width, height) = view.geometry.extent();
        let width = (width * TERMINAL_CHARS_PER_UNIT).ceil() as u16;
        let height = (height * TERMINAL_LINES_PER_UNIT).ceil() as u16;

        (
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
        )
    }

    /// Screen rectangle for a key, or `None` if it does not fit in `bounds`.
    fn key_area(key: &KeyGeometry, origin: (u16, u16), bounds: Rect) -> Option<Rect> {
        let x = origin.0.saturating_add(key.terminal_x());
        let y = origin.1.saturating_add(key.terminal_y());
        let width = key.terminal_width();
        let height = key.terminal_height();

        if x.saturating_add(width) > bounds.right() || y.saturating_add(height) > bounds.bottom() {
            return None;
        }

        Some(Rect::new(x, y, width, height))
    }

    fn render_key(
        f: &mut Frame,
        area: Rect,
        descriptor: &KeyDescriptor,
        is_selected: bool,
        theme: &Theme,
    ) {
        let color = theme.category_color(descriptor.category);

        let mut border_style = Style::default().fg(color);
        if descriptor.has_class("home-row") {
            border_style = border_style.add_modifier(Modifier::BOLD);
        }
        let mut body_style = Style::default().fg(color).bg(theme.background);
        if is_selected {
            border_style = Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD);
            body_style = body_style.bg(theme.highlight_bg);
        }

        let border_type = if descriptor.has_class("encoder") {
            BorderType::Rounded
        } else if is_selected {
            BorderType::Thick
        } else {
            BorderType::Plain
        };

        let mut lines = vec![Line::from(Span::styled(
            descriptor.label.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))];
        if let Some(hold) = &descriptor.hold {
            lines.push(Line::from(Span::styled(
                hold.clone(),
                Style::default().fg(theme.text_muted),
            )));
        }

        let widget = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(body_style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(border_type)
                    .border_style(border_style),
            );

        f.render_widget(widget, area);
    }

    fn render_message(f: &mut Frame, area: Rect, message: &str, theme: &Theme) {
        let widget = Paragraph::new(message.to_string())
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.error).bg(theme.background));
        f.render_widget(widget, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::physical_layouts;

    #[test]
    fn test_key_area_inside_bounds() {
        let key = KeyGeometry::new((0, 0), 1.0, 0.5);
        let bounds = Rect::new(0, 0, 200, 60);
        let area = KeyboardWidget::key_area(&key, (2, 1), bounds).unwrap();
        assert_eq!(area, Rect::new(11, 3, 9, 4));
    }

    #[test]
    fn test_key_area_clipped() {
        let key = KeyGeometry::new((0, 0), 10.0, 0.0);
        let bounds = Rect::new(0, 0, 40, 20);
        assert!(KeyboardWidget::key_area(&key, (0, 0), bounds).is_none());
    }

    #[test]
    fn test_all_corne_keys_fit_wide_terminal() {
        let geometry = physical_layouts::corne();
        let bounds = Rect::new(0, 0, 400, 100);
        let fitted = geometry
            .keys
            .iter()
            .filter(|key| KeyboardWidget::key_area(key, (0, 0), bounds).is_some())
            .count();
        assert_eq!(fitted, geometry.key_count());
    }
}
