//! Centralized Configuration Management
//!
//! All tunables of the widget in one serde-friendly structure so that the CLI
//! can load it from TOML and the browser widget from a JS object.

use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::errors::{LotteryError, Result};
use crate::export::ExportSeparator;
use crate::reveal::RevealSchedule;
use crate::types::DrawMode;

// ----------------------------------------------------------------------------
// Reveal Configuration
// ----------------------------------------------------------------------------

/// Delays used by the progressive reveal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Pause before the first item appears
    pub initial_delay_ms: u64,
    /// Pause before each number in numbers mode
    pub numbers_item_delay_ms: u64,
    /// Pause before each name in entries mode
    pub entries_item_delay_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 500,
            numbers_item_delay_ms: 30,
            entries_item_delay_ms: 50,
        }
    }
}

impl RevealConfig {
    /// Reveal with no pauses at all
    pub fn instant() -> Self {
        Self {
            initial_delay_ms: 0,
            numbers_item_delay_ms: 0,
            entries_item_delay_ms: 0,
        }
    }

    /// Schedule for the given mode
    pub fn schedule(&self, mode: DrawMode) -> RevealSchedule {
        let per_item = match mode {
            DrawMode::Numbers => self.numbers_item_delay_ms,
            DrawMode::Entries => self.entries_item_delay_ms,
        };
        RevealSchedule::new(
            Duration::from_millis(self.initial_delay_ms),
            Duration::from_millis(per_item),
        )
    }
}

// ----------------------------------------------------------------------------
// Draw Configuration
// ----------------------------------------------------------------------------

/// Algorithm used for numbers-mode draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericStrategy {
    /// Rejection sampling while the count is at most half the range,
    /// partial shuffle above that
    #[default]
    Auto,
    /// Sample into a set until it holds enough distinct values
    Rejection,
    /// Sparse partial Fisher-Yates over the range
    Shuffle,
}

/// Draw engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    pub strategy: NumericStrategy,
    /// Largest draw count accepted in either mode; unlimited when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_count: Option<u64>,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            strategy: NumericStrategy::Auto,
            max_count: None,
        }
    }
}

// ----------------------------------------------------------------------------
// Export Configuration
// ----------------------------------------------------------------------------

/// Exporter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Separator between exported numbers
    pub numbers_separator: ExportSeparator,
    /// Prefix name exports with a UTF-8 byte-order mark
    pub entries_bom: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            numbers_separator: ExportSeparator::Newline,
            entries_bom: true,
        }
    }
}

// ----------------------------------------------------------------------------
// Top-level Configuration
// ----------------------------------------------------------------------------

/// Complete configuration for one widget instance
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LotteryConfig {
    pub reveal: RevealConfig,
    pub draw: DrawConfig,
    pub export: ExportConfig,
}

impl LotteryConfig {
    /// Configuration for tests and non-animated frontends
    pub fn testing() -> Self {
        Self {
            reveal: RevealConfig::instant(),
            ..Default::default()
        }
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.draw.max_count == Some(0) {
            return Err(LotteryError::InvalidConfig(
                "draw.max_count must be greater than 0".to_string(),
            ));
        }

        // A reveal slower than this is a misconfiguration, not suspense
        const MAX_DELAY_MS: u64 = 60_000;
        let delays = [
            ("reveal.initial_delay_ms", self.reveal.initial_delay_ms),
            ("reveal.numbers_item_delay_ms", self.reveal.numbers_item_delay_ms),
            ("reveal.entries_item_delay_ms", self.reveal.entries_item_delay_ms),
        ];
        for (name, value) in delays {
            if value > MAX_DELAY_MS {
                return Err(LotteryError::InvalidConfig(format!(
                    "{} must be at most {} ms, got {}",
                    name, MAX_DELAY_MS, value
                )));
            }
        }

        Ok(())
    }
}
