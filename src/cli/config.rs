//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::{Config, ThemeMode};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Print the config file path
    Path,
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Directory holding the .vil layout files
    #[arg(long, value_name = "DIR")]
    layouts_dir: Option<PathBuf>,

    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,

    /// Keyboard profile shown when the viewer starts
    #[arg(long, value_name = "NAME")]
    default_keyboard: Option<String>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    paths: PathsOutput,
    keyboards: Vec<KeyboardOutput>,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    layouts_dir: Option<String>,
}

#[derive(Serialize, Debug)]
struct KeyboardOutput {
    name: String,
    geometry: String,
    layout_file: String,
    layer_names: Vec<String>,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    theme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_keyboard: Option<String>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path()
                    .map_err(|e| CliError::io(format!("Failed to locate config file: {e}")))?;
                println!("{}", path.display());
                Ok(())
            }
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            print_json(&config_output(&config))?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.layouts_dir.is_none() && self.theme.is_none() && self.default_keyboard.is_none() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --layouts-dir, --theme, or --default-keyboard",
            ));
        }

        let mut config = Config::read()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if let Some(path) = &self.layouts_dir {
            config
                .set_layouts_dir(path.clone())
                .map_err(|e| CliError::validation(format!("{e:#}")))?;
        }

        if let Some(theme_str) = &self.theme {
            config.ui.theme_mode = theme_str.parse::<ThemeMode>().map_err(CliError::validation)?;
        }

        if let Some(name) = &self.default_keyboard {
            let profile = config.profile(name).ok_or_else(|| {
                CliError::validation(format!("Unknown keyboard profile: {name}"))
            })?;
            config.ui.default_keyboard = Some(profile.name.clone());
        }

        // The file on disk is only replaced by a config that passes validation
        config
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e:#}")))?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn config_output(config: &Config) -> ConfigOutput {
    ConfigOutput {
        paths: PathsOutput {
            layouts_dir: config
                .paths
                .layouts_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        },
        keyboards: config
            .keyboards
            .iter()
            .map(|profile| KeyboardOutput {
                name: profile.name.clone(),
                geometry: profile.geometry.clone(),
                layout_file: config
                    .resolve_layout_path(profile)
                    .to_string_lossy()
                    .to_string(),
                layer_names: profile.layer_names.clone(),
            })
            .collect(),
        ui: UiOutput {
            theme: config.ui.theme_mode.as_str().to_string(),
            default_keyboard: config.ui.default_keyboard.clone(),
        },
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("kbview Configuration");
    println!("====================");
    println!();

    println!("Paths:");
    if let Some(dir) = &config.paths.layouts_dir {
        println!("  Layouts Directory: {}", dir.display());
    } else {
        println!("  Layouts Directory: (not configured, using current directory)");
    }
    println!();

    println!("Keyboards:");
    for profile in &config.keyboards {
        println!(
            "  {} ({}): {}",
            profile.name,
            profile.geometry,
            config.resolve_layout_path(profile).display()
        );
        if !profile.layer_names.is_empty() {
            println!("    Layers: {}", profile.layer_names.join(", "));
        }
    }
    println!();

    println!("UI:");
    println!("  Theme Mode: {}", config.ui.theme_mode.as_str());
    if let Some(name) = &config.ui.default_keyboard {
        println!("  Default Keyboard: {name}");
    }
    println!();
}
