//! CLI command handlers for kbview.
//!
//! Every subcommand except `view` is headless and scriptable, with
//! optional JSON output for automation.

pub mod common;
pub mod config;
pub mod inspect;
pub mod keycode;
pub mod render;
pub mod view;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use inspect::InspectArgs;
pub use keycode::ParseArgs;
pub use render::RenderArgs;
pub use view::ViewArgs;
