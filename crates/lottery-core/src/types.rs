//! Core types for the lottery drawer
//!
//! The data model is small: a draw mode, the entries parsed from an upload,
//! the population a draw runs against, and a millisecond timestamp used to
//! name exported files.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::errors::LotteryError;

// ----------------------------------------------------------------------------
// Draw Mode
// ----------------------------------------------------------------------------

/// Which of the two independent panels is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    /// Draw from the implicit range {1, ..., N}
    #[default]
    Numbers,
    /// Draw from the names of an uploaded list
    Entries,
}

impl DrawMode {
    /// Slug used in exported file names
    pub fn slug(&self) -> &'static str {
        match self {
            DrawMode::Numbers => "numbers",
            DrawMode::Entries => "employees",
        }
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for DrawMode {
    type Err = LotteryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numbers" | "number" | "n" => Ok(DrawMode::Numbers),
            "entries" | "employees" | "names" | "e" => Ok(DrawMode::Entries),
            other => Err(LotteryError::UnknownMode(other.to_string())),
        }
    }
}

// ----------------------------------------------------------------------------
// Entry
// ----------------------------------------------------------------------------

/// A candidate name from an uploaded list
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry {
    name: String,
    original_index: usize,
}

impl Entry {
    /// Create an entry; `original_index` is 1-based among non-blank lines
    pub fn new(name: impl Into<String>, original_index: usize) -> Self {
        Self {
            name: name.into(),
            original_index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn original_index(&self) -> usize {
        self.original_index
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ----------------------------------------------------------------------------
// Population
// ----------------------------------------------------------------------------

/// The set a draw selects from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Population<'a> {
    /// The range {1, ..., N}
    Range(u64),
    /// An uploaded list
    Entries(&'a [Entry]),
}

impl Population<'_> {
    /// Number of selectable elements
    pub fn size(&self) -> u64 {
        match self {
            Population::Range(n) => *n,
            Population::Entries(entries) => entries.len() as u64,
        }
    }

    pub fn mode(&self) -> DrawMode {
        match self {
            Population::Range(_) => DrawMode::Numbers,
            Population::Entries(_) => DrawMode::Entries,
        }
    }
}

// ----------------------------------------------------------------------------
// Timestamp
// ----------------------------------------------------------------------------

/// Millisecond timestamp since Unix epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a new timestamp
    pub const fn new(millis: u64) -> Self {
        Self(millis)
    }

    /// Get current timestamp (context-aware based on available features)
    pub fn now() -> Self {
        cfg_if::cfg_if! {
            if #[cfg(all(feature = "wasm", target_arch = "wasm32"))] {
                use js_sys::Date;
                Self(Date::now() as u64)
            } else {
                use std::time::{SystemTime, UNIX_EPOCH};
                let duration = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or_default();
                Self(duration.as_millis() as u64)
            }
        }
    }

    /// Get the raw milliseconds
    pub fn as_millis(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ----------------------------------------------------------------------------
// Time Source Trait
// ----------------------------------------------------------------------------

/// Source of "now" for export file naming
///
/// Injected so that tests can pin the timestamp suffix.
pub trait TimeSource {
    /// Get the current timestamp
    fn now(&self) -> Timestamp;
}

/// Wall-clock time source (`SystemTime` natively, `Date.now()` in the browser)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl SystemTimeSource {
    pub fn new() -> Self {
        Self
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

impl TimeSource for Timestamp {
    fn now(&self) -> Timestamp {
        *self
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_slugs() {
        assert_eq!(DrawMode::Numbers.slug(), "numbers");
        assert_eq!(DrawMode::Entries.slug(), "employees");
        assert_eq!(DrawMode::default(), DrawMode::Numbers);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("numbers".parse::<DrawMode>().unwrap(), DrawMode::Numbers);
        assert_eq!("Employees".parse::<DrawMode>().unwrap(), DrawMode::Entries);
        assert_eq!("names".parse::<DrawMode>().unwrap(), DrawMode::Entries);
        assert!("dice".parse::<DrawMode>().is_err());
    }

    #[test]
    fn test_population_size() {
        let entries = vec![Entry::new("Alice", 1), Entry::new("Bob", 2)];
        assert_eq!(Population::Range(10).size(), 10);
        assert_eq!(Population::Entries(&entries).size(), 2);
        assert_eq!(Population::Entries(&entries).mode(), DrawMode::Entries);
    }

    #[test]
    fn test_fixed_time_source() {
        let fixed = Timestamp::new(1_700_000_000_123);
        assert_eq!(fixed.now().as_millis(), 1_700_000_000_123);
        assert!(SystemTimeSource::new().now().as_millis() > 0);
    }
}
