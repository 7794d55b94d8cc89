//! View command: interactive terminal viewer.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::tui;
use clap::Args;
use std::path::PathBuf;

/// Browse layouts in the terminal viewer
#[derive(Debug, Clone, Args)]
pub struct ViewArgs {
    /// Keyboard profile to start with (defaults to ui.default_keyboard)
    #[arg(short, long, value_name = "NAME")]
    pub keyboard: Option<String>,

    /// Layout file to show for the starting keyboard instead of the profile's file
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

impl ViewArgs {
    /// Execute the view command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if let Some(name) = &self.keyboard {
            let known = config.keyboards.iter().any(|p| {
                p.name.eq_ignore_ascii_case(name) || p.geometry.eq_ignore_ascii_case(name)
            });
            if !known {
                return Err(CliError::validation(format!(
                    "Unknown keyboard profile: {name}"
                )));
            }
        }

        if let Some(path) = &self.file {
            if !path.is_file() {
                return Err(CliError::io(format!(
                    "Layout file not found: {}",
                    path.display()
                )));
            }
        }

        let mut state =
            tui::AppState::from_config(&config, self.file.as_deref(), self.keyboard.as_deref())
                .map_err(|e| CliError::io(format!("Failed to load layout: {e:#}")))?;

        let mut terminal = tui::setup_terminal()
            .map_err(|e| CliError::io(format!("Failed to start terminal UI: {e:#}")))?;

        let result = tui::run_tui(&mut state, &mut terminal);

        tui::restore_terminal(terminal)
            .map_err(|e| CliError::io(format!("Failed to restore terminal: {e:#}")))?;

        result.map_err(|e| CliError::io(format!("Terminal UI error: {e:#}")))
    }
}
