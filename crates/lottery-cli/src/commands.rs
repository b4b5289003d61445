//! Command handlers for the lottery CLI

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use lottery_core::messages;

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::error::Result;
use crate::interactive::InteractiveSession;
use crate::session::DrawSession;

/// Command dispatcher for handling CLI commands
pub struct CommandDispatcher;

impl CommandDispatcher {
    /// Execute a CLI command
    pub async fn execute(cli: Cli, config: AppConfig) -> Result<()> {
        let seed = cli.seed;
        match cli.command {
            Commands::Numbers {
                total,
                count,
                export_dir,
                json,
            } => {
                let export_dir = export_dir.or_else(|| config.cli.export_dir.clone());
                Self::handle_numbers_command(&config, seed, total, count, export_dir, json).await
            }
            Commands::Names {
                file,
                count,
                export_dir,
                json,
            } => {
                let export_dir = export_dir.or_else(|| config.cli.export_dir.clone());
                Self::handle_names_command(&config, seed, &file, count, export_dir, json).await
            }
            Commands::Interactive => InteractiveSession::new(&config, seed).run().await,
            Commands::Config => Self::handle_config_command(&config),
        }
    }

    /// Handle the numbers command
    async fn handle_numbers_command(
        config: &AppConfig,
        seed: Option<u64>,
        total: String,
        count: String,
        export_dir: Option<PathBuf>,
        json: bool,
    ) -> Result<()> {
        let mut session = DrawSession::new(config, seed);
        session.state_mut().set_total_input(total)?;
        session.state_mut().set_count_input(count)?;

        Self::draw_and_report(session, export_dir.as_deref(), json).await
    }

    /// Handle the names command
    async fn handle_names_command(
        config: &AppConfig,
        seed: Option<u64>,
        file: &Path,
        count: String,
        export_dir: Option<PathBuf>,
        json: bool,
    ) -> Result<()> {
        let mut session = DrawSession::new(config, seed);
        let loaded = session.load_file(file)?;
        if !json {
            println!("{}", messages::entries_loaded(loaded));
        }
        session.state_mut().set_count_input(count)?;

        Self::draw_and_report(session, export_dir.as_deref(), json).await
    }

    /// Draw the prepared panel, then print and optionally export the result
    async fn draw_and_report(
        mut session: DrawSession,
        export_dir: Option<&Path>,
        json: bool,
    ) -> Result<()> {
        let mut stdout = std::io::stdout();

        if json {
            session.draw(&mut std::io::sink()).await?;
        } else {
            session.draw(&mut stdout).await?;
        }

        let export_path = match export_dir {
            Some(dir) => Some(session.export_to(dir)?),
            None => None,
        };

        if json {
            let report = session.report(export_path);
            writeln!(stdout, "{}", serde_json::to_string_pretty(&report)?)?;
        } else {
            if let Some(summary) = session.state().summary() {
                writeln!(stdout, "{}", summary)?;
            }
            if let Some(path) = export_path {
                writeln!(stdout, "{}", path.display())?;
            }
        }

        info!("Draw complete");
        Ok(())
    }

    /// Handle the config command
    fn handle_config_command(config: &AppConfig) -> Result<()> {
        print!("{}", config.to_toml()?);
        Ok(())
    }
}
