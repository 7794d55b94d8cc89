//! Status bar widget for the selected key's details, legend and help

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Theme};
use crate::keycode::KeyCategory;

/// Categories listed in the legend line, in display order.
const LEGEND: &[(KeyCategory, &str)] = &[
    (KeyCategory::ModTap, "Mod-tap"),
    (KeyCategory::LayerTap, "Layer-tap"),
    (KeyCategory::Macro, "Macro"),
    (KeyCategory::PureModifier, "Modifier"),
    (KeyCategory::Transparent, "Transparent"),
];

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let mut lines: Vec<Line> = Vec::new();

        if !state.status_message.is_empty() {
            lines.push(Line::from(Span::styled(
                state.status_message.as_str(),
                Style::default().fg(theme.warning),
            )));
        }

        lines.extend(Self::details_lines(state, theme));
        lines.push(Self::legend_line(theme));
        lines.push(Self::help_line(theme));

        let status = Paragraph::new(lines)
            .style(Style::default().fg(theme.text).bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary))
                    .title(" Key ")
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    /// Detail rows for the selected key, packed two to a line.
    fn details_lines(state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
        let Some(descriptor) = state.selected_descriptor() else {
            return vec![Line::from(Span::styled(
                "No key selected (Tab to select)",
                Style::default().fg(theme.text_muted),
            ))];
        };

        descriptor
            .details()
            .chunks(2)
            .map(|pair| {
                let mut spans = Vec::new();
                for (label, value) in pair {
                    spans.push(Span::styled(
                        format!("{label}: "),
                        Style::default().fg(theme.text_secondary),
                    ));
                    spans.push(Span::styled(
                        format!("{value:<24}"),
                        Style::default().fg(theme.text),
                    ));
                }
                Line::from(spans)
            })
            .collect()
    }

    fn legend_line(theme: &Theme) -> Line<'static> {
        let mut spans = Vec::new();
        for (idx, (category, name)) in LEGEND.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::styled(" | ", Style::default().fg(theme.text_muted)));
            }
            spans.push(Span::styled(
                *name,
                Style::default().fg(theme.category_color(*category)),
            ));
        }
        Line::from(spans)
    }

    fn help_line(theme: &Theme) -> Line<'static> {
        let key = Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD);
        let text = Style::default().fg(theme.text_muted);

        Line::from(vec![
            Span::styled("1-9", key),
            Span::styled(" layers  ", text),
            Span::styled("←→", key),
            Span::styled(" nav  ", text),
            Span::styled("↑↓ e/c", key),
            Span::styled(" keyboard  ", text),
            Span::styled("Tab", key),
            Span::styled(" select  ", text),
            Span::styled("q", key),
            Span::styled(" quit", text),
        ])
    }
}
