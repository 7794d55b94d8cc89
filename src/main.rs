//! Keyboard Layout Viewer - terminal viewer and tools for split keyboard layouts
//!
//! Shows `.vil` layout files for the Elora and Corne keyboards, and
//! provides headless commands to parse keycodes, render diagrams and
//! inspect layouts.

use clap::{Parser, Subcommand};
use kbview::cli::{ConfigArgs, InspectArgs, ParseArgs, RenderArgs, ViewArgs};
use kbview::config::Config;
use kbview::constants::APP_NAME;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Keyboard Layout Viewer - split keyboard layout viewer and tools
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse keycode expressions and show how they are displayed
    Parse(ParseArgs),
    /// Render layers as box-drawing diagrams or a markdown export
    Render(RenderArgs),
    /// Summarize key types and layer references in a layout
    Inspect(InspectArgs),
    /// Browse layouts in the terminal viewer
    View(ViewArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

fn env_filter(verbose: bool) -> EnvFilter {
    let filter = if verbose { "debug" } else { "warn" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into())
}

fn init_tracing(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Appends viewer logs to the log file; the viewer owns stdout and stderr.
/// Logging stays off when the file cannot be opened.
fn init_file_tracing() {
    let Ok(path) = Config::log_file_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        if fs::create_dir_all(dir).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    tracing_subscriber::registry()
        .with(env_filter(true))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();

    match (&cli.command, cli.verbose) {
        (Commands::View(_), true) => init_file_tracing(),
        (Commands::View(_), false) => {}
        _ => init_tracing(cli.verbose),
    }

    tracing::debug!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let result = match &cli.command {
        Commands::Parse(args) => args.execute(),
        Commands::Render(args) => args.execute(),
        Commands::Inspect(args) => args.execute(),
        Commands::View(args) => args.execute(),
        Commands::Config(args) => args.execute(),
    };

    if let Err(e) = result {
        e.exit();
    }
}
