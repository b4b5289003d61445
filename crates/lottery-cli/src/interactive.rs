//! Interactive Mode
//!
//! Line-oriented command loop over stdin for driving one draw session by
//! hand or from a script. Every failure is reported and the loop carries on;
//! only `quit` or end of input stops it.

use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use lottery_core::{messages, DrawMode};

use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::session::DrawSession;

// ----------------------------------------------------------------------------
// Command Parsing
// ----------------------------------------------------------------------------

/// One line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveCommand {
    Mode(DrawMode),
    Total(String),
    Count(String),
    Load(PathBuf),
    Draw,
    Export(Option<PathBuf>),
    Reset,
    Status,
    Help,
    Quit,
}

impl FromStr for InteractiveCommand {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        let required = |what: &str| -> Result<String> {
            if argument.is_empty() {
                Err(CliError::UnknownCommand(format!("{} needs {}", command, what)))
            } else {
                Ok(argument.to_string())
            }
        };

        match command.to_lowercase().as_str() {
            "mode" => Ok(Self::Mode(required("a mode")?.parse()?)),
            "total" => Ok(Self::Total(argument.to_string())),
            "count" => Ok(Self::Count(argument.to_string())),
            "load" => Ok(Self::Load(PathBuf::from(required("a file path")?))),
            "draw" => Ok(Self::Draw),
            "export" => Ok(Self::Export(
                (!argument.is_empty()).then(|| PathBuf::from(argument)),
            )),
            "reset" => Ok(Self::Reset),
            "status" => Ok(Self::Status),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CliError::UnknownCommand(line.to_string())),
        }
    }
}

const HELP: &str = "\
Commands:
  mode <numbers|employees>  switch panel
  total <N>                 highest number (numbers mode)
  count <K>                 how many to draw
  load <file.csv>           load names, one per line (switches to employees)
  draw                      draw and reveal
  export [dir]              write the result as CSV
  reset                     clear the current panel
  status                    show the current panel
  help                      show this help
  quit                      leave";

// ----------------------------------------------------------------------------
// Interactive Session
// ----------------------------------------------------------------------------

/// Command loop state
pub struct InteractiveSession {
    session: DrawSession,
    prompt: String,
    export_dir: Option<PathBuf>,
}

impl InteractiveSession {
    pub fn new(config: &AppConfig, seed: Option<u64>) -> Self {
        Self {
            session: DrawSession::new(config, seed),
            prompt: config.cli.prompt.clone(),
            export_dir: config.cli.export_dir.clone(),
        }
    }

    pub fn session(&self) -> &DrawSession {
        &self.session
    }

    /// Read commands from stdin until `quit` or end of input
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting interactive mode");
        println!("{}", HELP);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = std::io::stdout();

        loop {
            print!("{}", self.prompt);
            stdout.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let keep_going = match line.parse::<InteractiveCommand>() {
                Ok(command) => self.handle(command, &mut stdout).await,
                Err(e) => {
                    writeln!(stdout, "error: {}", e)?;
                    Ok(true)
                }
            };

            match keep_going {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => writeln!(stdout, "error: {}", e)?,
            }
        }

        info!("Interactive mode finished");
        Ok(())
    }

    /// Apply one command; `Ok(false)` ends the loop
    pub async fn handle<W: Write>(&mut self, command: InteractiveCommand, out: &mut W) -> Result<bool> {
        debug!("Interactive command: {:?}", command);

        match command {
            InteractiveCommand::Mode(mode) => {
                self.session.state_mut().switch_mode(mode);
                writeln!(out, "{}", self.session.state().view().title)?;
            }
            InteractiveCommand::Total(value) => {
                self.session.state_mut().switch_mode(DrawMode::Numbers);
                self.session.state_mut().set_total_input(value)?;
            }
            InteractiveCommand::Count(value) => {
                self.session.state_mut().set_count_input(value)?;
            }
            InteractiveCommand::Load(path) => {
                let loaded = self.session.load_file(&path)?;
                writeln!(out, "{}", messages::entries_loaded(loaded))?;
                writeln!(out, "{}", messages::entries_count_hint(loaded))?;
            }
            InteractiveCommand::Draw => {
                self.session.draw(out).await?;
                if let Some(summary) = self.session.state().summary() {
                    writeln!(out, "{}", summary)?;
                }
            }
            InteractiveCommand::Export(dir) => {
                let dir = dir
                    .or_else(|| self.export_dir.clone())
                    .unwrap_or_else(|| PathBuf::from("."));
                let path = self.session.export_to(&dir)?;
                writeln!(out, "{}", path.display())?;
            }
            InteractiveCommand::Reset => {
                self.session.state_mut().reset()?;
            }
            InteractiveCommand::Status => self.print_status(out)?,
            InteractiveCommand::Help => writeln!(out, "{}", HELP)?,
            InteractiveCommand::Quit => return Ok(false),
        }

        Ok(true)
    }

    fn print_status<W: Write>(&self, out: &mut W) -> Result<()> {
        let view = self.session.state().view();
        writeln!(out, "{} ({})", view.title, view.mode)?;

        match view.mode {
            DrawMode::Numbers => {
                writeln!(out, "  total: {}", view.numbers.total_input)?;
                writeln!(out, "  count: {}", view.numbers.count_input)?;
                writeln!(out, "  drawn: {:?}", view.numbers.drawn)?;
            }
            DrawMode::Entries => {
                match &view.entries.source_name {
                    Some(source) => writeln!(out, "  file: {} ({} names)", source, view.entries.loaded)?,
                    None => writeln!(out, "  file: -")?,
                }
                writeln!(out, "  count: {}", view.entries.count_input)?;
                writeln!(out, "  drawn: {}", view.entries.drawn.join(", "))?;
            }
        }

        if let Some(summary) = view.summary {
            writeln!(out, "  {}", summary)?;
        }
        if let Some(error) = view.error {
            writeln!(out, "  {}", error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lottery_core::LotteryError;

    fn parse(line: &str) -> Result<InteractiveCommand> {
        line.parse()
    }

    fn quiet_session() -> InteractiveSession {
        let mut config = AppConfig::default();
        config.cli.animate = false;
        InteractiveSession::new(&config, Some(11))
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse("mode employees").unwrap(), InteractiveCommand::Mode(DrawMode::Entries));
        assert_eq!(parse("  TOTAL 100 ").unwrap(), InteractiveCommand::Total("100".to_string()));
        assert_eq!(parse("count").unwrap(), InteractiveCommand::Count(String::new()));
        assert_eq!(
            parse("load my staff.csv").unwrap(),
            InteractiveCommand::Load(PathBuf::from("my staff.csv"))
        );
        assert_eq!(parse("export").unwrap(), InteractiveCommand::Export(None));
        assert_eq!(
            parse("export /tmp/out").unwrap(),
            InteractiveCommand::Export(Some(PathBuf::from("/tmp/out")))
        );
        assert_eq!(parse("exit").unwrap(), InteractiveCommand::Quit);
        assert_eq!(parse("?").unwrap(), InteractiveCommand::Help);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(parse("shuffle"), Err(CliError::UnknownCommand(_))));
        assert!(matches!(parse("load"), Err(CliError::UnknownCommand(_))));
        assert!(matches!(
            parse("mode lottery"),
            Err(CliError::Lottery(LotteryError::UnknownMode(_)))
        ));
    }

    #[tokio::test]
    async fn test_numbers_round() {
        let mut session = quiet_session();
        let mut out = Vec::new();

        for line in ["total 10", "count 5", "draw"] {
            let command = parse(line).unwrap();
            assert!(session.handle(command, &mut out).await.unwrap());
        }

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&messages::numbers_summary(5, "10")));
        assert_eq!(session.session().state().numbers().drawn.len(), 5);
    }

    #[tokio::test]
    async fn test_errors_do_not_end_the_loop() {
        let mut session = quiet_session();
        let mut out = Vec::new();

        session.handle(parse("total 5").unwrap(), &mut out).await.unwrap();
        session.handle(parse("count 6").unwrap(), &mut out).await.unwrap();
        let err = session.handle(InteractiveCommand::Draw, &mut out).await.unwrap_err();
        assert_eq!(err.to_string(), messages::COUNT_EXCEEDS_TOTAL);

        // Fixing the count recovers
        session.handle(parse("count 5").unwrap(), &mut out).await.unwrap();
        assert!(session.handle(InteractiveCommand::Draw, &mut out).await.unwrap());
        assert!(!session.handle(InteractiveCommand::Quit, &mut out).await.unwrap());
    }

    #[tokio::test]
    async fn test_names_round_with_status_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("staff.csv");
        std::fs::write(&csv, "\"Alice\",\nBob\nCarol\n").unwrap();

        let mut session = quiet_session();
        let mut out = Vec::new();
        session.handle(InteractiveCommand::Load(csv), &mut out).await.unwrap();
        session.handle(parse("count 3").unwrap(), &mut out).await.unwrap();
        session.handle(InteractiveCommand::Draw, &mut out).await.unwrap();
        session
            .handle(InteractiveCommand::Export(Some(dir.path().to_path_buf())), &mut out)
            .await
            .unwrap();

        let mut status = Vec::new();
        session.handle(InteractiveCommand::Status, &mut status).await.unwrap();
        let status = String::from_utf8(status).unwrap();
        assert!(status.contains("staff.csv (3 names)"));
        assert!(status.contains(&messages::entries_summary(3, 3)));

        let exported: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().starts_with("lottery-employees-"))
            .collect();
        assert_eq!(exported.len(), 1);
    }
}
