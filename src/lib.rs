//! Keyboard Layout Viewer Library
//!
//! This library provides the core of kbview: the keycode expression parser
//! and key resolver, physical geometry for the supported split keyboards,
//! `.vil` layout loading, layer reference analysis, and text export.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod keycode;
pub mod models;
pub mod parser;
pub mod services;
pub mod tui;
