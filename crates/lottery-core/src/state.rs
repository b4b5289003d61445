//! Widget state container
//!
//! One `LotteryState` holds everything a lottery widget shows: the active
//! mode, the two independent panels, the busy flag and the inline error.
//! Frontends mutate it only through the transitions below.
//!
//! A draw is split in three steps so that a frontend can reveal results with
//! its own timer without holding a borrow across an `await`:
//! [`LotteryState::begin_draw`] validates and computes the full result,
//! [`LotteryState::push_revealed`] appends one item, and
//! [`LotteryState::finish_draw`] clears the busy flag.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::LotteryConfig;
use crate::draw::DrawEngine;
use crate::errors::{LotteryError, Result};
use crate::export::{export_entries, export_numbers, Export};
use crate::messages;
use crate::reveal::{reveal, Sleeper};
use crate::types::{DrawMode, Entry, TimeSource};
use crate::upload::{check_file_type, parse_upload};
use crate::validation::{validate_entries_request, validate_numbers_request};

// ----------------------------------------------------------------------------
// Panels
// ----------------------------------------------------------------------------

/// Numbers-mode inputs and results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NumbersPanel {
    pub total_input: String,
    pub count_input: String,
    /// Revealed so far, ascending
    pub drawn: Vec<u64>,
    /// Total the current result was drawn from
    pub drawn_from: Option<u64>,
}

/// Entries-mode inputs and results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntriesPanel {
    pub entries: Vec<Entry>,
    pub source_name: Option<String>,
    pub count_input: String,
    /// Revealed so far, in draw order
    pub drawn: Vec<Entry>,
}

/// A computed result waiting to be revealed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDraw {
    Numbers(Vec<u64>),
    Entries(Vec<Entry>),
}

impl PendingDraw {
    pub fn mode(&self) -> DrawMode {
        match self {
            PendingDraw::Numbers(_) => DrawMode::Numbers,
            PendingDraw::Entries(_) => DrawMode::Entries,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PendingDraw::Numbers(numbers) => numbers.len(),
            PendingDraw::Entries(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Split into individually revealable items
    pub fn into_items(self) -> Vec<RevealedItem> {
        match self {
            PendingDraw::Numbers(numbers) => numbers.into_iter().map(RevealedItem::Number).collect(),
            PendingDraw::Entries(entries) => entries.into_iter().map(RevealedItem::Entry).collect(),
        }
    }
}

/// One item appended during a reveal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealedItem {
    Number(u64),
    Entry(Entry),
}

// ----------------------------------------------------------------------------
// State Container
// ----------------------------------------------------------------------------

/// Complete state of one widget instance
#[derive(Debug, Clone)]
pub struct LotteryState {
    config: LotteryConfig,
    mode: DrawMode,
    numbers: NumbersPanel,
    entries: EntriesPanel,
    busy: bool,
    error: Option<LotteryError>,
}

impl Default for LotteryState {
    fn default() -> Self {
        Self::new(LotteryConfig::default())
    }
}

impl LotteryState {
    pub fn new(config: LotteryConfig) -> Self {
        Self {
            config,
            mode: DrawMode::default(),
            numbers: NumbersPanel::default(),
            entries: EntriesPanel::default(),
            busy: false,
            error: None,
        }
    }

    pub fn config(&self) -> &LotteryConfig {
        &self.config
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    pub fn numbers(&self) -> &NumbersPanel {
        &self.numbers
    }

    pub fn entries(&self) -> &EntriesPanel {
        &self.entries
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&LotteryError> {
        self.error.as_ref()
    }

    /// Localized text of the current error
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(LotteryError::user_message)
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Switch panels; clears the error and nothing else
    pub fn switch_mode(&mut self, mode: DrawMode) {
        debug!("Switching mode {} -> {}", self.mode, mode);
        self.mode = mode;
        self.error = None;
    }

    pub fn set_total_input(&mut self, value: impl Into<String>) -> Result<()> {
        self.ensure_idle()?;
        self.numbers.total_input = value.into();
        Ok(())
    }

    /// Set the draw count field of the active panel
    pub fn set_count_input(&mut self, value: impl Into<String>) -> Result<()> {
        self.ensure_idle()?;
        match self.mode {
            DrawMode::Numbers => self.numbers.count_input = value.into(),
            DrawMode::Entries => self.entries.count_input = value.into(),
        }
        Ok(())
    }

    /// Accept or reject an upload by file name, before its content is read
    pub fn check_upload(&mut self, file_name: &str) -> Result<()> {
        self.ensure_idle()?;
        self.error = None;
        self.record(check_file_type(file_name))
    }

    /// Replace the loaded entries with a parsed upload
    ///
    /// On success the previous result and count field are cleared.
    pub fn load_upload(&mut self, file_name: &str, text: &str) -> Result<usize> {
        self.check_upload(file_name)?;

        let entries = self.record(parse_upload(file_name, text))?;
        let loaded = entries.len();
        self.entries.entries = entries;
        self.entries.source_name = Some(file_name.to_string());
        self.entries.drawn.clear();
        self.entries.count_input.clear();
        Ok(loaded)
    }

    /// Validate the active panel and compute the full result
    ///
    /// On success the panel's previous result is cleared and the state is
    /// busy until [`finish_draw`](Self::finish_draw).
    pub fn begin_draw<R: Rng>(&mut self, engine: &mut DrawEngine<R>) -> Result<PendingDraw> {
        self.ensure_idle()?;
        self.error = None;
        let max_count = self.config.draw.max_count;

        let pending = match self.mode {
            DrawMode::Numbers => {
                let request = self.record(validate_numbers_request(
                    &self.numbers.total_input,
                    &self.numbers.count_input,
                    max_count,
                ))?;
                self.numbers.drawn.clear();
                self.numbers.drawn_from = Some(request.total);
                PendingDraw::Numbers(engine.draw_numbers(request))
            }
            DrawMode::Entries => {
                let count = self.record(validate_entries_request(
                    &self.entries.entries,
                    &self.entries.count_input,
                    max_count,
                ))?;
                self.entries.drawn.clear();
                PendingDraw::Entries(engine.draw_entries(&self.entries.entries, count))
            }
        };

        info!("Drew {} items in {} mode", pending.len(), pending.mode());
        self.busy = true;
        Ok(pending)
    }

    /// Append one revealed item to its panel
    pub fn push_revealed(&mut self, item: RevealedItem) {
        match item {
            RevealedItem::Number(number) => self.numbers.drawn.push(number),
            RevealedItem::Entry(entry) => self.entries.drawn.push(entry),
        }
    }

    pub fn finish_draw(&mut self) {
        self.busy = false;
    }

    /// Validate, draw and reveal in one go
    ///
    /// Holds `&mut self` for the whole reveal; frontends that share the
    /// state across callbacks use the three-step API instead.
    pub async fn run_draw<R, S>(&mut self, engine: &mut DrawEngine<R>, sleeper: &S) -> Result<usize>
    where
        R: Rng,
        S: Sleeper + ?Sized,
    {
        let pending = self.begin_draw(engine)?;
        let schedule = self.config.reveal.schedule(pending.mode());
        let drawn = pending.len();

        reveal(pending.into_items(), schedule, sleeper, |item| self.push_revealed(item)).await;

        self.finish_draw();
        Ok(drawn)
    }

    /// Clear the numbers panel
    pub fn reset_numbers(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.numbers = NumbersPanel::default();
        self.error = None;
        Ok(())
    }

    /// Clear the entries panel, including the loaded list
    pub fn reset_entries(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.entries = EntriesPanel::default();
        self.error = None;
        Ok(())
    }

    /// Clear the active panel
    pub fn reset(&mut self) -> Result<()> {
        match self.mode {
            DrawMode::Numbers => self.reset_numbers(),
            DrawMode::Entries => self.reset_entries(),
        }
    }

    /// Export the active panel's result; `None` when it is empty
    pub fn export(&self, clock: &dyn TimeSource) -> Option<Export> {
        let timestamp = clock.now();
        let export = match self.mode {
            DrawMode::Numbers => export_numbers(
                &self.numbers.drawn,
                self.config.export.numbers_separator,
                timestamp,
            ),
            DrawMode::Entries => {
                export_entries(&self.entries.drawn, self.config.export.entries_bom, timestamp)
            }
        };

        if let Some(export) = &export {
            info!("Exported {}", export);
        }
        export
    }

    // ------------------------------------------------------------------------
    // Derived View
    // ------------------------------------------------------------------------

    /// Whether the draw button is enabled
    pub fn can_draw(&self) -> bool {
        if self.busy {
            return false;
        }
        match self.mode {
            DrawMode::Numbers => {
                !self.numbers.total_input.is_empty() && !self.numbers.count_input.is_empty()
            }
            DrawMode::Entries => {
                !self.entries.entries.is_empty() && !self.entries.count_input.is_empty()
            }
        }
    }

    /// Whether the reset button is shown
    pub fn can_reset(&self) -> bool {
        if self.busy {
            return false;
        }
        match self.mode {
            DrawMode::Numbers => !self.numbers.drawn.is_empty(),
            DrawMode::Entries => !self.entries.entries.is_empty(),
        }
    }

    /// Results line for the active panel, once anything is revealed
    pub fn summary(&self) -> Option<String> {
        match self.mode {
            DrawMode::Numbers if !self.numbers.drawn.is_empty() => {
                let total = self
                    .numbers
                    .drawn_from
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| self.numbers.total_input.clone());
                Some(messages::numbers_summary(self.numbers.drawn.len(), &total))
            }
            DrawMode::Entries if !self.entries.drawn.is_empty() => Some(messages::entries_summary(
                self.entries.drawn.len(),
                self.entries.entries.len(),
            )),
            _ => None,
        }
    }

    /// Serializable snapshot for rendering
    pub fn view(&self) -> StateView {
        let (title, results_title) = match self.mode {
            DrawMode::Numbers => (messages::NUMBERS_TITLE, messages::NUMBERS_RESULTS_TITLE),
            DrawMode::Entries => (messages::ENTRIES_TITLE, messages::ENTRIES_RESULTS_TITLE),
        };

        StateView {
            mode: self.mode,
            title: title.to_string(),
            results_title: results_title.to_string(),
            draw_label: (if self.busy { messages::DRAWING } else { messages::START_DRAW }).to_string(),
            busy: self.busy,
            can_draw: self.can_draw(),
            can_reset: self.can_reset(),
            error: self.error_message(),
            summary: self.summary(),
            loaded_message: (!self.entries.entries.is_empty())
                .then(|| messages::entries_loaded(self.entries.entries.len())),
            numbers: self.numbers.clone(),
            entries: EntriesView {
                loaded: self.entries.entries.len(),
                source_name: self.entries.source_name.clone(),
                count_input: self.entries.count_input.clone(),
                drawn: self.entries.drawn.iter().map(|e| e.name().to_string()).collect(),
            },
        }
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn ensure_idle(&self) -> Result<()> {
        if self.busy {
            Err(LotteryError::DrawInProgress)
        } else {
            Ok(())
        }
    }

    /// Keep a failure as the inline error before propagating it
    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            self.error = Some(e.clone());
        }
        result
    }
}

// ----------------------------------------------------------------------------
// View Model
// ----------------------------------------------------------------------------

/// Entries panel as rendered (names only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntriesView {
    pub loaded: usize,
    pub source_name: Option<String>,
    pub count_input: String,
    pub drawn: Vec<String>,
}

/// Everything a frontend needs to render the widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateView {
    pub mode: DrawMode,
    pub title: String,
    pub results_title: String,
    pub draw_label: String,
    pub busy: bool,
    pub can_draw: bool,
    pub can_reset: bool,
    pub error: Option<String>,
    pub summary: Option<String>,
    pub loaded_message: Option<String>,
    pub numbers: NumbersPanel,
    pub entries: EntriesView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NumericStrategy;
    use crate::reveal::InstantSleeper;
    use crate::types::Timestamp;

    fn engine() -> DrawEngine<rand::rngs::StdRng> {
        DrawEngine::seeded(5, NumericStrategy::Auto)
    }

    fn numbers_state(total: &str, count: &str) -> LotteryState {
        let mut state = LotteryState::new(LotteryConfig::testing());
        state.set_total_input(total).unwrap();
        state.set_count_input(count).unwrap();
        state
    }

    #[test]
    fn test_three_step_numbers_draw() {
        let mut state = numbers_state("10", "5");
        let pending = state.begin_draw(&mut engine()).unwrap();
        assert!(state.is_busy());
        assert!(!state.can_draw());
        assert_eq!(pending.len(), 5);

        for item in pending.into_items() {
            state.push_revealed(item);
        }
        state.finish_draw();

        assert!(!state.is_busy());
        assert_eq!(state.numbers().drawn.len(), 5);
        assert_eq!(state.numbers().drawn_from, Some(10));
        assert!(state.can_reset());
    }

    #[test]
    fn test_rejected_draw_sets_error_and_stays_idle() {
        let mut state = numbers_state("5", "6");
        let result = state.begin_draw(&mut engine());
        assert_eq!(
            result,
            Err(LotteryError::CountExceedsTotal {
                requested: 6,
                total: 5
            })
        );
        assert!(!state.is_busy());
        assert!(state.numbers().drawn.is_empty());
        assert_eq!(state.error_message().as_deref(), Some(messages::COUNT_EXCEEDS_TOTAL));
    }

    #[test]
    fn test_busy_blocks_reentry() {
        let mut state = numbers_state("10", "3");
        let _pending = state.begin_draw(&mut engine()).unwrap();

        assert_eq!(state.begin_draw(&mut engine()), Err(LotteryError::DrawInProgress));
        assert_eq!(state.set_total_input("20"), Err(LotteryError::DrawInProgress));
        assert_eq!(state.reset(), Err(LotteryError::DrawInProgress));
        assert_eq!(
            state.load_upload("a.csv", "Alice"),
            Err(LotteryError::DrawInProgress)
        );
    }

    #[test]
    fn test_mode_switch_clears_error_only() {
        let mut state = numbers_state("", "3");
        assert!(state.begin_draw(&mut engine()).is_err());
        assert!(state.error().is_some());

        state.switch_mode(DrawMode::Entries);
        assert!(state.error().is_none());
        assert_eq!(state.numbers().count_input, "3");

        state.switch_mode(DrawMode::Numbers);
        assert_eq!(state.numbers().count_input, "3");
    }

    #[test]
    fn test_upload_then_entries_draw() {
        let mut state = LotteryState::new(LotteryConfig::testing());
        state.switch_mode(DrawMode::Entries);
        assert_eq!(state.load_upload("staff.csv", "Alice\nBob\n\nCarol").unwrap(), 3);
        state.set_count_input("2").unwrap();

        let drawn = futures::executor::block_on(state.run_draw(&mut engine(), &InstantSleeper)).unwrap();
        assert_eq!(drawn, 2);
        assert_eq!(state.entries().drawn.len(), 2);
        assert_eq!(
            state.summary().unwrap(),
            messages::entries_summary(2, 3)
        );
    }

    #[test]
    fn test_new_upload_clears_previous_result() {
        let mut state = LotteryState::new(LotteryConfig::testing());
        state.switch_mode(DrawMode::Entries);
        state.load_upload("a.csv", "Alice\nBob").unwrap();
        state.set_count_input("1").unwrap();
        futures::executor::block_on(state.run_draw(&mut engine(), &InstantSleeper)).unwrap();

        state.load_upload("b.csv", "Carol\nDave\nErin").unwrap();
        assert!(state.entries().drawn.is_empty());
        assert!(state.entries().count_input.is_empty());
        assert_eq!(state.entries().entries.len(), 3);
    }

    #[test]
    fn test_failed_upload_keeps_previous_entries() {
        let mut state = LotteryState::new(LotteryConfig::testing());
        state.load_upload("a.csv", "Alice\nBob").unwrap();
        assert!(state.load_upload("b.txt", "Carol").is_err());
        assert_eq!(state.entries().entries.len(), 2);
        assert_eq!(state.error_message().as_deref(), Some(messages::CSV_ONLY));
    }

    #[test]
    fn test_reset_clears_active_panel() {
        let mut state = numbers_state("10", "2");
        futures::executor::block_on(state.run_draw(&mut engine(), &InstantSleeper)).unwrap();
        state.reset().unwrap();
        assert_eq!(state.numbers(), &NumbersPanel::default());
    }

    #[test]
    fn test_export_active_panel() {
        let clock = Timestamp::new(42);
        let mut state = numbers_state("10", "3");
        assert!(state.export(&clock).is_none());

        futures::executor::block_on(state.run_draw(&mut engine(), &InstantSleeper)).unwrap();
        let export = state.export(&clock).unwrap();
        assert_eq!(export.file_name, "lottery-numbers-42.csv");
        assert_eq!(export.contents.lines().count(), 3);
    }

    #[test]
    fn test_view_reflects_state() {
        let mut state = numbers_state("10", "4");
        let view = state.view();
        assert!(view.can_draw);
        assert!(!view.can_reset);
        assert_eq!(view.draw_label, messages::START_DRAW);

        futures::executor::block_on(state.run_draw(&mut engine(), &InstantSleeper)).unwrap();
        let view = state.view();
        assert_eq!(view.summary, Some(messages::numbers_summary(4, "10")));
        assert_eq!(view.numbers.drawn.len(), 4);
    }
}
