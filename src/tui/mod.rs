//! Terminal user interface components and state management.
//!
//! This module contains the viewer loop, `AppState`, event handling,
//! and the widgets that draw a layout using Ratatui.

// Allow clone assignment patterns - common in UI state management
#![allow(clippy::assigning_clones)]
// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow small types passed by reference for API consistency
#![allow(clippy::trivially_copy_pass_by_ref)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]

pub mod keyboard;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout as RatatuiLayout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::path::Path;
use std::time::Duration;

use crate::config::{Config, KeyboardProfile, ThemeMode};
use crate::constants::{layer_name, APP_NAME};
use crate::keycode::{parse, resolve, KeyDescriptor};
use crate::models::{geometry_by_name, KeyGeometry, KeyboardGeometry, LayoutDocument};
use crate::parser::load_layout_document;

pub use keyboard::KeyboardWidget;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// One keyboard the viewer can switch to.
#[derive(Debug, Clone)]
pub struct KeyboardView {
    /// Config profile this view was built from
    pub profile: KeyboardProfile,
    /// Physical geometry
    pub geometry: KeyboardGeometry,
    /// Loaded layout, if the file could be read
    pub document: Option<LayoutDocument>,
    /// Why the layout could not be loaded
    pub load_error: Option<String>,
}

impl KeyboardView {
    /// Builds a view from a profile, loading its layout file.
    ///
    /// A layout that fails to load is recorded in `load_error` so the viewer
    /// can still show the other keyboards.
    ///
    /// # Errors
    ///
    /// Returns error if the profile names an unknown geometry
    pub fn load(profile: &KeyboardProfile, layout_path: &Path) -> Result<Self> {
        let geometry = geometry_by_name(&profile.geometry)
            .with_context(|| format!("Unknown geometry: {}", profile.geometry))?;

        let (document, load_error) = match load_layout_document(layout_path) {
            Ok(doc) => (Some(doc), None),
            Err(e) => {
                tracing::warn!("Could not load {}: {e:#}", layout_path.display());
                (None, Some(format!("{e:#}")))
            }
        };

        Ok(Self {
            profile: profile.clone(),
            geometry,
            document,
            load_error,
        })
    }

    /// Creates a view from an already loaded document.
    #[must_use]
    pub fn with_document(
        profile: KeyboardProfile,
        geometry: KeyboardGeometry,
        document: LayoutDocument,
    ) -> Self {
        Self {
            profile,
            geometry,
            document: Some(document),
            load_error: None,
        }
    }

    /// Number of layers in the loaded layout (0 when nothing is loaded).
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.document.as_ref().map_or(0, LayoutDocument::layer_count)
    }

    /// Resolves the key at a physical position on a layer.
    ///
    /// Returns `None` when the document has no cell for the position.
    #[must_use]
    pub fn descriptor(&self, layer: usize, key: &KeyGeometry) -> Option<KeyDescriptor> {
        let raw = self
            .document
            .as_ref()?
            .keycode_at(layer, key.row(), key.col())?;
        Some(resolve(&parse(raw), key.position_flags()))
    }

    /// Layout positions of keys with something programmed, in reading order.
    #[must_use]
    pub fn visible_positions(&self, layer: usize) -> Vec<(usize, usize)> {
        self.geometry
            .keys_in_reading_order()
            .into_iter()
            .filter(|key| self.descriptor(layer, key).is_some_and(|d| d.visible))
            .map(|key| (key.row(), key.col()))
            .collect()
    }
}

/// Application state for the viewer.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Keyboards in the order `↑/↓` cycles through them
    pub keyboards: Vec<KeyboardView>,
    /// Index into `keyboards`
    pub current_keyboard: usize,
    /// Layer being displayed
    pub current_layer: usize,
    /// Layout position of the selected key
    pub selected_key: Option<(usize, usize)>,
    /// Configured theme mode
    pub theme_mode: ThemeMode,
    /// Active color theme
    pub theme: Theme,
    /// Message shown in the status bar
    pub status_message: String,
    /// Whether application should exit
    pub should_quit: bool,
}

impl AppState {
    /// Creates a new `AppState` showing `start` (clamped to the keyboard list).
    #[must_use]
    pub fn new(keyboards: Vec<KeyboardView>, start: usize, theme_mode: ThemeMode) -> Self {
        let mut state = Self {
            current_keyboard: start.min(keyboards.len().saturating_sub(1)),
            keyboards,
            current_layer: 0,
            selected_key: None,
            theme_mode,
            theme: Theme::from_mode(theme_mode),
            status_message: String::new(),
            should_quit: false,
        };
        state.reset_selection();
        state.refresh_status();
        state
    }

    /// Builds the state from config profiles.
    ///
    /// `keyboard` picks the starting profile (config default otherwise);
    /// `file` replaces that profile's layout file.
    ///
    /// # Errors
    ///
    /// Returns error if the keyboard is unknown, a profile names an unknown
    /// geometry, or the explicitly given layout file cannot be loaded
    pub fn from_config(
        config: &Config,
        file: Option<&Path>,
        keyboard: Option<&str>,
    ) -> Result<Self> {
        let start = match keyboard {
            Some(name) => config
                .keyboards
                .iter()
                .position(|p| {
                    p.name.eq_ignore_ascii_case(name) || p.geometry.eq_ignore_ascii_case(name)
                })
                .with_context(|| format!("Unknown keyboard profile: {name}"))?,
            None => config.default_profile_index(),
        };

        let mut keyboards = Vec::with_capacity(config.keyboards.len());
        for (idx, profile) in config.keyboards.iter().enumerate() {
            let view = match file {
                Some(path) if idx == start => {
                    let geometry = geometry_by_name(&profile.geometry)
                        .with_context(|| format!("Unknown geometry: {}", profile.geometry))?;
                    let document = load_layout_document(path)?;
                    KeyboardView::with_document(profile.clone(), geometry, document)
                }
                _ => KeyboardView::load(profile, &config.resolve_layout_path(profile))?,
            };
            keyboards.push(view);
        }

        if keyboards.is_empty() {
            anyhow::bail!("No keyboard profiles configured");
        }

        Ok(Self::new(keyboards, start, config.ui.theme_mode))
    }

    /// The keyboard being displayed.
    #[must_use]
    pub fn current_view(&self) -> Option<&KeyboardView> {
        self.keyboards.get(self.current_keyboard)
    }

    /// Number of layers of the current keyboard's layout.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.current_view().map_or(0, KeyboardView::layer_count)
    }

    /// Name of the current layer from the profile, or "Layer N".
    #[must_use]
    pub fn current_layer_name(&self) -> String {
        self.current_view().map_or_else(
            || format!("Layer {}", self.current_layer),
            |view| layer_name(&view.profile.layer_names, self.current_layer),
        )
    }

    /// Jumps to a layer, clamped to the layers the layout has.
    pub fn set_layer(&mut self, layer: usize) {
        self.current_layer = layer.min(self.layer_count().saturating_sub(1));
        self.keep_selection_visible();
        self.refresh_status();
    }

    /// Moves to the next layer (stops at the last one).
    pub fn next_layer(&mut self) {
        self.set_layer(self.current_layer + 1);
    }

    /// Moves to the previous layer (stops at the first one).
    pub fn previous_layer(&mut self) {
        self.set_layer(self.current_layer.saturating_sub(1));
    }

    /// Switches keyboard; the layer resets to 0 when the new layout has fewer layers.
    pub fn select_keyboard(&mut self, index: usize) {
        if index >= self.keyboards.len() {
            return;
        }
        self.current_keyboard = index;
        if self.current_layer >= self.layer_count() {
            self.current_layer = 0;
        }
        self.reset_selection();
        self.refresh_status();
    }

    /// Switches to the keyboard whose profile or geometry has this name.
    ///
    /// Returns false if no keyboard matches.
    pub fn select_keyboard_by_name(&mut self, name: &str) -> bool {
        let found = self.keyboards.iter().position(|view| {
            view.profile.name.eq_ignore_ascii_case(name)
                || view.geometry.keyboard_name.eq_ignore_ascii_case(name)
        });
        match found {
            Some(index) => {
                self.select_keyboard(index);
                true
            }
            None => {
                self.status_message = format!("No keyboard named {name}");
                false
            }
        }
    }

    /// Cycles to the next keyboard, wrapping around.
    pub fn next_keyboard(&mut self) {
        if self.keyboards.is_empty() {
            return;
        }
        self.select_keyboard((self.current_keyboard + 1) % self.keyboards.len());
    }

    /// Cycles to the previous keyboard, wrapping around.
    pub fn previous_keyboard(&mut self) {
        if self.keyboards.is_empty() {
            return;
        }
        let len = self.keyboards.len();
        self.select_keyboard((self.current_keyboard + len - 1) % len);
    }

    /// Selects the next programmed key in reading order, wrapping around.
    pub fn select_next_key(&mut self) {
        self.step_selection(true);
    }

    /// Selects the previous programmed key in reading order, wrapping around.
    pub fn select_previous_key(&mut self) {
        self.step_selection(false);
    }

    /// Resolved descriptor of the selected key.
    #[must_use]
    pub fn selected_descriptor(&self) -> Option<KeyDescriptor> {
        let (row, col) = self.selected_key?;
        let view = self.current_view()?;
        let key = view.geometry.get_key_by_position(row, col)?;
        view.descriptor(self.current_layer, key)
            .filter(|descriptor| descriptor.visible)
    }

    fn step_selection(&mut self, forward: bool) {
        let Some(view) = self.current_view() else {
            return;
        };
        let visible = view.visible_positions(self.current_layer);
        if visible.is_empty() {
            self.selected_key = None;
            return;
        }

        let len = visible.len();
        let current = self
            .selected_key
            .and_then(|pos| visible.iter().position(|p| *p == pos));
        let next = match (current, forward) {
            (Some(idx), true) => (idx + 1) % len,
            (Some(idx), false) => (idx + len - 1) % len,
            (None, true) => 0,
            (None, false) => len - 1,
        };
        self.selected_key = Some(visible[next]);
    }

    fn reset_selection(&mut self) {
        self.selected_key = self
            .current_view()
            .and_then(|view| view.visible_positions(self.current_layer).first().copied());
    }

    fn keep_selection_visible(&mut self) {
        if self.selected_descriptor().is_none() {
            self.reset_selection();
        }
    }

    fn refresh_status(&mut self) {
        self.status_message = match self.current_view() {
            Some(view) if view.document.is_none() => format!(
                "Could not load layout: {}",
                view.load_error.as_deref().unwrap_or("unknown error")
            ),
            Some(_) => String::new(),
            None => "No keyboards configured".to_string(),
        };
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if handle_key_event(state, key)? {
                    break; // User quit
                }
            }
            // Resize and mouse events re-render on the next loop
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Keyboard
            Constraint::Length(7), // Key details + legend + help
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state);
    KeyboardWidget::render(f, chunks[1], state);
    StatusBar::render(f, chunks[2], state, &state.theme);
}

/// Render title bar with keyboard name and layer position
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;
    let keyboard = state
        .current_view()
        .map_or("-", |view| view.geometry.display_name.as_str());

    let title = Line::from(vec![
        Span::styled(format!(" {APP_NAME} "), Style::default().fg(theme.text_secondary)),
        Span::styled("| ", Style::default().fg(theme.text_muted)),
        Span::styled(
            keyboard.to_string(),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | Layer ", Style::default().fg(theme.text_muted)),
        Span::styled(
            format!("{}/{}", state.current_layer + 1, state.layer_count().max(1)),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", state.current_layer_name()),
            Style::default().fg(theme.text_secondary),
        ),
    ]);

    let title_widget = Paragraph::new(title)
        .style(Style::default().bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary))
                .style(Style::default().bg(theme.background)),
        );

    f.render_widget(title_widget, area);
}

/// Handle keyboard input events
///
/// Returns true when the viewer should exit.
fn handle_key_event(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return Ok(true);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
            return Ok(true);
        }
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(digit) = c.to_digit(10) {
                state.set_layer(digit as usize - 1);
            }
        }
        KeyCode::Left => state.previous_layer(),
        KeyCode::Right => state.next_layer(),
        KeyCode::Up => state.previous_keyboard(),
        KeyCode::Down => state.next_keyboard(),
        KeyCode::Char('e') => {
            state.select_keyboard_by_name("elora");
        }
        KeyCode::Char('c') => {
            state.select_keyboard_by_name("corne");
        }
        KeyCode::Tab => state.select_next_key(),
        KeyCode::BackTab => state.select_previous_key(),
        _ => {}
    }

    Ok(false)
}
