//! Command-line interface definitions and parsing

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lottery", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Seed the draw for a reproducible result
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Print results at once instead of revealing them one by one
    #[arg(long, global = true)]
    pub no_animation: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw distinct numbers between 1 and a total
    Numbers {
        /// Highest number that can be drawn
        #[arg(short, long, allow_hyphen_values = true)]
        total: String,
        /// How many numbers to draw
        #[arg(short = 'n', long, allow_hyphen_values = true)]
        count: String,
        /// Write the result as a CSV file into this directory
        #[arg(short, long)]
        export_dir: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Draw names from a CSV file with one name per line
    Names {
        /// CSV file to load
        #[arg(short, long)]
        file: PathBuf,
        /// How many names to draw
        #[arg(short = 'n', long, allow_hyphen_values = true)]
        count: String,
        /// Write the result as a CSV file into this directory
        #[arg(short, long)]
        export_dir: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start interactive command-line mode
    Interactive,
    /// Print the effective configuration as TOML
    Config,
}
