//! Draw session shared by the one-shot commands and interactive mode
//!
//! Wraps one `LotteryState` with its draw engine and turns state transitions
//! into terminal output: revealed items are written as they appear, exports
//! land on disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info};

use lottery_core::{
    reveal, DrawEngine, DrawMode, Entry, LotteryError, LotteryState, RevealedItem,
    SystemTimeSource, TokioSleeper,
};

use crate::config::AppConfig;
use crate::error::Result;

/// One widget instance driven from the terminal
pub struct DrawSession {
    state: LotteryState,
    engine: DrawEngine<StdRng>,
}

/// Machine-readable outcome of a draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawReport {
    pub mode: DrawMode,
    /// Size of the population drawn from
    pub population: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub numbers: Vec<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<Entry>,
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_path: Option<PathBuf>,
}

impl DrawSession {
    /// Build a session; a seed makes every draw reproducible
    pub fn new(config: &AppConfig, seed: Option<u64>) -> Self {
        let lottery = config.effective_lottery();
        let strategy = lottery.draw.strategy;
        let engine = match seed {
            Some(seed) => {
                info!("Using seeded draw engine (seed {})", seed);
                DrawEngine::seeded(seed, strategy)
            }
            None => DrawEngine::from_entropy(strategy),
        };

        Self {
            state: LotteryState::new(lottery),
            engine,
        }
    }

    pub fn state(&self) -> &LotteryState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut LotteryState {
        &mut self.state
    }

    /// Switch to entries mode and load a CSV file from disk
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.state.switch_mode(DrawMode::Entries);
        self.state.check_upload(&file_name)?;

        debug!("Reading entries from {}", path.display());
        // Invalid UTF-8 becomes U+FFFD, as with `Blob.text()` in the browser
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(self.state.load_upload(&file_name, &text)?)
    }

    /// Draw the active panel, writing each item to `out` as it is revealed
    ///
    /// The results heading is written only once the request is accepted.
    pub async fn draw<W: Write>(&mut self, out: &mut W) -> Result<usize> {
        let pending = self.state.begin_draw(&mut self.engine)?;
        let schedule = self.state.config().reveal.schedule(pending.mode());
        let drawn = pending.len();

        let mut write_error = writeln!(out, "{}", self.state.view().results_title).err();
        let state = &mut self.state;
        reveal(pending.into_items(), schedule, &TokioSleeper, |item| {
            if write_error.is_none() {
                if let Err(e) = write_item(out, &item) {
                    write_error = Some(e);
                }
            }
            state.push_revealed(item);
        })
        .await;
        state.finish_draw();

        match write_error {
            Some(e) => Err(e.into()),
            None => Ok(drawn),
        }
    }

    /// Write the active panel's export into `dir`
    pub fn export_to(&self, dir: &Path) -> Result<PathBuf> {
        let export = self
            .state
            .export(&SystemTimeSource)
            .ok_or(LotteryError::NothingToExport)?;

        std::fs::create_dir_all(dir)?;
        let path = dir.join(&export.file_name);
        std::fs::write(&path, export.as_bytes())?;

        info!("Wrote {} ({} bytes)", path.display(), export.as_bytes().len());
        Ok(path)
    }

    /// Snapshot of the active panel's result
    pub fn report(&self, export_path: Option<PathBuf>) -> DrawReport {
        let mode = self.state.mode();
        let (population, numbers, entries) = match mode {
            DrawMode::Numbers => {
                let panel = self.state.numbers();
                (panel.drawn_from.unwrap_or(0), panel.drawn.clone(), Vec::new())
            }
            DrawMode::Entries => {
                let panel = self.state.entries();
                (panel.entries.len() as u64, Vec::new(), panel.drawn.clone())
            }
        };

        DrawReport {
            mode,
            population,
            numbers,
            entries,
            summary: self.state.summary(),
            export_path,
        }
    }
}

fn write_item<W: Write>(out: &mut W, item: &RevealedItem) -> std::io::Result<()> {
    match item {
        RevealedItem::Number(number) => writeln!(out, "  {}", number)?,
        RevealedItem::Entry(entry) => {
            writeln!(out, "  {} (#{})", entry.name(), entry.original_index())?
        }
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use lottery_core::messages;

    fn quiet_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.cli.animate = false;
        config
    }

    #[tokio::test]
    async fn test_numbers_draw_writes_each_item() {
        let mut session = DrawSession::new(&quiet_config(), Some(42));
        session.state_mut().set_total_input("10").unwrap();
        session.state_mut().set_count_input("5").unwrap();

        let mut out = Vec::new();
        assert_eq!(session.draw(&mut out).await.unwrap(), 5);

        let printed: Vec<u64> = String::from_utf8(out)
            .unwrap()
            .lines()
            .skip(1)
            .map(|line| line.trim().parse().unwrap())
            .collect();
        assert_eq!(printed, session.state().numbers().drawn);
        assert!(printed.windows(2).all(|w| w[0] < w[1]));
        assert!(!session.state().is_busy());
    }

    #[tokio::test]
    async fn test_seeded_sessions_agree() {
        let mut first = DrawSession::new(&quiet_config(), Some(7));
        let mut second = DrawSession::new(&quiet_config(), Some(7));
        for session in [&mut first, &mut second] {
            session.state_mut().set_total_input("1000").unwrap();
            session.state_mut().set_count_input("20").unwrap();
            session.draw(&mut std::io::sink()).await.unwrap();
        }
        assert_eq!(first.state().numbers().drawn, second.state().numbers().drawn);
    }

    #[tokio::test]
    async fn test_rejected_draw_writes_nothing() {
        let mut session = DrawSession::new(&quiet_config(), None);
        session.state_mut().set_total_input("5").unwrap();
        session.state_mut().set_count_input("6").unwrap();

        let mut out = Vec::new();
        let err = session.draw(&mut out).await.unwrap_err();
        assert!(matches!(
            err,
            CliError::Lottery(LotteryError::CountExceedsTotal { requested: 6, total: 5 })
        ));
        assert!(out.is_empty());
        assert!(session.state().error().is_some());
    }

    #[tokio::test]
    async fn test_load_draw_and_export_names() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("staff.csv");
        std::fs::write(&csv, "Alice\nBob\n\nCarol\n").unwrap();

        let mut session = DrawSession::new(&quiet_config(), Some(1));
        assert_eq!(session.load_file(&csv).unwrap(), 3);
        assert_eq!(session.state().mode(), DrawMode::Entries);

        session.state_mut().set_count_input("2").unwrap();
        let mut out = Vec::new();
        session.draw(&mut out).await.unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.lines().next(), Some(messages::ENTRIES_RESULTS_TITLE));
        assert_eq!(printed.lines().count(), 3);

        let path = session.export_to(&dir.path().join("out")).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with('\u{feff}'));
        assert_eq!(written.trim_start_matches('\u{feff}').lines().count(), 2);

        let report = session.report(Some(path));
        assert_eq!(report.population, 3);
        assert_eq!(report.entries.len(), 2);
        assert!(report.numbers.is_empty());
    }

    #[test]
    fn test_non_utf8_upload_is_decoded_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("staff.csv");
        std::fs::write(&csv, b"Alice\n\xC3\xCD\xE3\xCF\nBob\n").unwrap();

        let mut session = DrawSession::new(&quiet_config(), None);
        assert_eq!(session.load_file(&csv).unwrap(), 3);

        let entries = &session.state().entries().entries;
        assert_eq!(entries[0].name(), "Alice");
        assert!(entries[1].name().contains('\u{fffd}'));
        assert_eq!(entries[2].name(), "Bob");
        assert_eq!(entries[2].original_index(), 3);
        assert!(session.state().error().is_none());
    }

    #[test]
    fn test_non_csv_file_is_not_read() {
        let mut session = DrawSession::new(&quiet_config(), None);
        // The file does not exist; the extension check must fail first
        let err = session.load_file(Path::new("/nonexistent/staff.txt")).unwrap_err();
        assert!(matches!(
            err,
            CliError::Lottery(LotteryError::UnsupportedFileType { .. })
        ));
    }

    #[test]
    fn test_export_without_result() {
        let session = DrawSession::new(&quiet_config(), None);
        let dir = tempfile::tempdir().unwrap();
        let err = session.export_to(dir.path()).unwrap_err();
        assert!(matches!(err, CliError::Lottery(LotteryError::NothingToExport)));
    }

    #[tokio::test]
    async fn test_report_serializes_numbers_only() {
        let mut session = DrawSession::new(&quiet_config(), Some(3));
        session.state_mut().set_total_input("10").unwrap();
        session.state_mut().set_count_input("3").unwrap();
        session.draw(&mut std::io::sink()).await.unwrap();

        let json = serde_json::to_value(session.report(None)).unwrap();
        assert_eq!(json["mode"], "numbers");
        assert_eq!(json["population"], 10);
        assert_eq!(json["numbers"].as_array().unwrap().len(), 3);
        assert!(json.get("entries").is_none());
        assert!(json.get("export_path").is_none());
    }
}
