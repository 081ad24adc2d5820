//! CLI, config file, pipeline wiring
//!
//! This crate provides the `nextrace` command-line interface.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use app::{RunSettings, load_config, show_next};
pub use cli::Cli;
pub use error::{ClientError, ClientResult};
