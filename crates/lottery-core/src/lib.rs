//! Lottery Drawer Core
//!
//! This crate provides the platform-agnostic logic behind the lottery drawer widget:
//! drawing random numbers from a range or random names from an uploaded list,
//! validating user input, parsing uploads, exporting results and pacing the
//! progressive reveal. It works on both native and WebAssembly targets.
//!
//! Frontends (the browser widget and the CLI) drive everything through
//! [`LotteryState`], the single state container for one widget instance.

// ----------------------------------------------------------------------------
// Module Declarations
// ----------------------------------------------------------------------------

pub mod config;
pub mod draw;
pub mod errors;
pub mod export;
pub mod messages;
pub mod reveal;
pub mod state;
pub mod types;
pub mod upload;
pub mod validation;

// ----------------------------------------------------------------------------
// Public API
// ----------------------------------------------------------------------------

pub use config::{DrawConfig, ExportConfig, LotteryConfig, NumericStrategy, RevealConfig};
pub use draw::DrawEngine;
pub use errors::{LotteryError, Result};
pub use export::{export_entries, export_numbers, read_numbers, Export, ExportSeparator};
pub use reveal::{reveal, InstantSleeper, RevealSchedule, Sleeper};
pub use state::{EntriesPanel, EntriesView, LotteryState, NumbersPanel, PendingDraw, RevealedItem, StateView};
pub use types::{DrawMode, Entry, Population, SystemTimeSource, TimeSource, Timestamp};
pub use upload::{check_file_type, parse_entries, parse_upload};
pub use validation::{parse_int, validate_entries_request, validate_numbers_request, NumbersRequest};

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        pub use reveal::TokioSleeper;
    }
}
