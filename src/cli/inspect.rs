//! Inspect command: summary of a layout document.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::keycode::{parse, KeyCategory};
use crate::models::{geometry_by_name, LayoutDocument};
use crate::parser::load_layout_document;
use crate::parser::vil::missing_positions;
use crate::services::layer_refs::{
    dangling_refs, find_layer_refs, transparency_conflicts, LayerRef,
};
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Summarize key types and layer references in a layout
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Path to .vil layout file
    #[arg(short, long, value_name = "FILE")]
    pub layout: PathBuf,

    /// Also check the document against this keyboard's geometry
    #[arg(short, long, value_name = "NAME")]
    pub keyboard: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct InspectReport {
    layer_count: usize,
    layers: Vec<LayerSummary>,
    layer_refs: Vec<LayerRef>,
    warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
struct LayerSummary {
    number: usize,
    rows: usize,
    keys: usize,
    unprogrammed: usize,
    categories: BTreeMap<KeyCategory, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing_positions: Option<usize>,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        let geometry = match &self.keyboard {
            Some(name) => Some(geometry_by_name(name).ok_or_else(|| {
                CliError::validation(format!("Unknown keyboard: {name}"))
            })?),
            None => None,
        };

        let doc = load_layout_document(&self.layout)
            .map_err(|e| CliError::io(format!("Failed to load layout: {e:#}")))?;

        let mut report = build_report(&doc);

        if let Some(geometry) = &geometry {
            for summary in &mut report.layers {
                let missing = missing_positions(&doc, summary.number, geometry);
                if !missing.is_empty() {
                    report.warnings.push(format!(
                        "Layer {} has no keycode for {} of {} {} keys",
                        summary.number,
                        missing.len(),
                        geometry.key_count(),
                        geometry.display_name
                    ));
                }
                summary.missing_positions = Some(missing.len());
            }
        }

        if self.json {
            return print_json(&report);
        }

        print_human_readable(&report);
        Ok(())
    }
}

fn build_report(doc: &LayoutDocument) -> InspectReport {
    let layers = (0..doc.layer_count())
        .map(|layer_idx| {
            let mut summary = LayerSummary {
                number: layer_idx,
                rows: doc.layer(layer_idx).map_or(0, Vec::len),
                keys: 0,
                unprogrammed: 0,
                categories: BTreeMap::new(),
                missing_positions: None,
            };
            for (_, _, raw) in doc.cells(layer_idx) {
                if raw.is_sentinel() {
                    summary.unprogrammed += 1;
                    continue;
                }
                summary.keys += 1;
                *summary.categories.entry(parse(raw).category).or_insert(0) += 1;
            }
            summary
        })
        .collect();

    let mut warnings: Vec<String> = dangling_refs(doc)
        .iter()
        .map(|r| {
            format!(
                "{} on layer {} at ({}, {}) targets missing layer {}",
                r.keycode, r.from_layer, r.row, r.col, r.to_layer
            )
        })
        .collect();
    warnings.extend(transparency_conflicts(doc).iter().map(|c| c.message()));

    InspectReport {
        layer_count: doc.layer_count(),
        layers,
        layer_refs: find_layer_refs(doc),
        warnings,
    }
}

fn print_human_readable(report: &InspectReport) {
    println!("Layers: {}", report.layer_count);
    println!();

    for layer in &report.layers {
        println!(
            "Layer {}: {} keys, {} unprogrammed, {} rows",
            layer.number, layer.keys, layer.unprogrammed, layer.rows
        );
        for category in KeyCategory::ALL {
            if let Some(count) = layer.categories.get(&category) {
                println!("  {:<16}{}", category.display_name(), count);
            }
        }
    }

    if !report.layer_refs.is_empty() {
        println!();
        println!("Layer references:");
        for r in &report.layer_refs {
            println!(
                "  Layer {} ({}, {}) {} → Layer {} [{}]",
                r.from_layer,
                r.row,
                r.col,
                r.keycode,
                r.to_layer,
                r.kind.display_name()
            );
        }
    }

    if !report.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &report.warnings {
            println!("  ⚠ {warning}");
        }
    }
}
