//! Keycode parse command.

use crate::cli::common::{print_json, CliResult};
use crate::keycode::{parse_str, resolve, KeyDescriptor, ParsedKey, PositionFlags};
use clap::Args;
use serde::Serialize;

/// Parse keycode expressions and show how they are displayed
#[derive(Debug, Clone, Args)]
pub struct ParseArgs {
    /// Keycode expressions (e.g., "LT1(KC_SPACE)", "LCTL_T(KC_A)")
    #[arg(value_name = "KEYCODE", required = true)]
    pub keycodes: Vec<String>,

    /// Resolve as if the key sits on the home row
    #[arg(long)]
    pub home_row: bool,

    /// Resolve as if the key is an encoder
    #[arg(long)]
    pub encoder: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ParseResult {
    input: String,
    parsed: ParsedKey,
    descriptor: KeyDescriptor,
}

impl ParseArgs {
    /// Execute the parse command
    pub fn execute(&self) -> CliResult<()> {
        let flags = PositionFlags {
            is_home_row: self.home_row,
            is_encoder: self.encoder,
        };

        let results: Vec<ParseResult> = self
            .keycodes
            .iter()
            .map(|input| {
                let parsed = parse_str(input);
                let descriptor = resolve(&parsed, flags);
                ParseResult {
                    input: input.clone(),
                    parsed,
                    descriptor,
                }
            })
            .collect();

        if self.json {
            return print_json(&results);
        }

        for (idx, result) in results.iter().enumerate() {
            if idx > 0 {
                println!();
            }
            println!("{}", result.input);
            for (label, value) in result.descriptor.details() {
                println!("  {:<10}{}", format!("{label}:"), value);
            }
            let classes: Vec<&str> = result
                .descriptor
                .style_classes
                .iter()
                .map(String::as_str)
                .collect();
            println!("  {:<10}{}", "Classes:", classes.join(" "));
            if let Some(layer) = result.parsed.layer {
                println!("  {:<10}{}", "Layer:", layer);
            }
        }

        Ok(())
    }
}
