//! Lottery CLI library
//!
//! This library provides the components behind the `lottery` binary:
//! argument parsing, configuration loading, one-shot draw commands and the
//! interactive command loop.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod interactive;
pub mod session;

pub use cli::{Cli, Commands};
pub use config::AppConfig;
pub use error::{CliError, Result};
pub use interactive::{InteractiveCommand, InteractiveSession};
pub use session::{DrawReport, DrawSession};
