//! Render command: layer diagrams and markdown export.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::constants::layer_name;
use crate::export;
use crate::models::{geometry_by_name, KeyboardGeometry};
use crate::parser::load_layout_document;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

/// Render a layout as box-drawing diagrams
#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Path to .vil layout file (defaults to the keyboard profile's file)
    #[arg(short, long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Keyboard profile or geometry name (elora, corne, corne-v4, crkbd)
    #[arg(short, long, value_name = "NAME")]
    pub keyboard: String,

    /// Render only this layer to stdout instead of exporting all layers
    #[arg(long, value_name = "N")]
    pub layer: Option<usize>,

    /// Output file (defaults to [keyboard]_export_[date].md for full exports)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Geometry and naming for the selected keyboard.
struct Target {
    geometry: KeyboardGeometry,
    layer_names: Vec<String>,
    layout_path: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command
    pub fn execute(&self) -> CliResult<()> {
        let target = self.resolve_target()?;

        let layout_path = self
            .layout
            .clone()
            .or(target.layout_path)
            .ok_or_else(|| CliError::validation("No layout file given. Use --layout FILE"))?;

        let doc = load_layout_document(&layout_path)
            .map_err(|e| CliError::io(format!("Failed to load layout: {e:#}")))?;

        if let Some(layer) = self.layer {
            if layer >= doc.layer_count() {
                return Err(CliError::validation(format!(
                    "Layer {} out of range (layout has {} layers)",
                    layer,
                    doc.layer_count()
                )));
            }

            let name = layer_name(&target.layer_names, layer);
            let diagram = export::render_layer_diagram(&doc, layer, &target.geometry, &name)
                .map_err(|e| CliError::validation(format!("Failed to render layer: {e}")))?;

            match &self.output {
                Some(path) => write_output(path, &diagram)?,
                None => print!("{diagram}"),
            }
            return Ok(());
        }

        let markdown = export::export_to_markdown(&doc, &target.geometry, &target.layer_names)
            .map_err(|e| CliError::validation(format!("Failed to generate markdown: {e}")))?;

        let output_path = self.get_output_path(&target.geometry);
        write_output(&output_path, &markdown)?;
        println!("✓ Exported layout to: {}", output_path.display());

        Ok(())
    }

    /// Looks the keyboard up in the config profiles first, then the built-in geometries.
    fn resolve_target(&self) -> CliResult<Target> {
        let config = Config::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {e:#}");
            Config::default()
        });

        if let Some(profile) = config.profile(&self.keyboard) {
            let geometry = geometry_by_name(&profile.geometry).ok_or_else(|| {
                CliError::validation(format!("Unknown geometry: {}", profile.geometry))
            })?;
            return Ok(Target {
                geometry,
                layer_names: profile.layer_names.clone(),
                layout_path: Some(config.resolve_layout_path(profile)),
            });
        }

        let geometry = geometry_by_name(&self.keyboard).ok_or_else(|| {
            CliError::validation(format!(
                "Unknown keyboard: {}. Expected elora, corne, corne-v4 or crkbd",
                self.keyboard
            ))
        })?;

        Ok(Target {
            geometry,
            layer_names: Vec::new(),
            layout_path: None,
        })
    }

    /// Get the output file path (either user-specified or auto-generated)
    fn get_output_path(&self, geometry: &KeyboardGeometry) -> PathBuf {
        if let Some(ref path) = self.output {
            return path.clone();
        }

        let date = chrono::Local::now().format("%Y-%m-%d");
        PathBuf::from(format!("{}_export_{}.md", geometry.keyboard_name, date))
    }
}

fn write_output(path: &Path, content: &str) -> CliResult<()> {
    fs::write(path, content).map_err(|e| {
        CliError::io(format!(
            "Failed to write output file {}: {e}",
            path.display()
        ))
    })
}
