//! Error types for the lottery drawer
//!
//! Every failure the widget can hit is a user-input failure that is rejected
//! before any draw happens. `Display` gives an English diagnostic for logs;
//! [`LotteryError::user_message`] gives the bundled-locale text shown inline.

use crate::messages;

/// Core error type for the lottery drawer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LotteryError {
    #[error("Both the total and the draw count must be valid numbers")]
    MissingNumbersInput,

    #[error("Total and draw count must be greater than zero")]
    NonPositiveNumbers,

    #[error("Draw count {requested} exceeds total {total}")]
    CountExceedsTotal { requested: u64, total: u64 },

    #[error("Draw count for entries is missing or not a number")]
    MissingEntriesCount,

    #[error("Draw count for entries must be greater than zero")]
    NonPositiveEntriesCount,

    #[error("Draw count {requested} exceeds loaded entries {available}")]
    CountExceedsEntries { requested: u64, available: usize },

    #[error("Draw count {requested} exceeds the configured maximum {max}")]
    CountTooLarge { requested: u64, max: u64 },

    #[error("No entries loaded")]
    NoEntriesLoaded,

    #[error("Unsupported upload file type: {file_name}")]
    UnsupportedFileType { file_name: String },

    #[error("Upload contains no non-blank lines")]
    EmptyUpload,

    #[error("Upload contains no valid names after cleaning")]
    NoValidNames,

    #[error("A draw is already in progress")]
    DrawInProgress,

    #[error("No drawn results to export")]
    NothingToExport,

    #[error("Unknown draw mode: {0}")]
    UnknownMode(String),

    #[error("Invalid exported value: {0}")]
    InvalidExport(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl LotteryError {
    /// Localized message for inline display
    pub fn user_message(&self) -> String {
        match self {
            LotteryError::MissingNumbersInput => messages::ENTER_VALID_VALUES.to_string(),
            LotteryError::NonPositiveNumbers => messages::NUMBERS_MUST_BE_POSITIVE.to_string(),
            LotteryError::CountExceedsTotal { .. } => messages::COUNT_EXCEEDS_TOTAL.to_string(),
            LotteryError::MissingEntriesCount => messages::ENTER_ENTRIES_COUNT.to_string(),
            LotteryError::NonPositiveEntriesCount => messages::COUNT_MUST_BE_POSITIVE.to_string(),
            LotteryError::CountExceedsEntries {
                requested,
                available,
            } => messages::count_exceeds_entries(*requested, *available),
            LotteryError::CountTooLarge { max, .. } => messages::count_too_large(*max),
            LotteryError::NoEntriesLoaded => messages::NO_ENTRIES_LOADED.to_string(),
            LotteryError::UnsupportedFileType { .. } => messages::CSV_ONLY.to_string(),
            LotteryError::EmptyUpload => messages::FILE_EMPTY.to_string(),
            LotteryError::NoValidNames => messages::NO_VALID_NAMES.to_string(),
            LotteryError::DrawInProgress => messages::DRAW_IN_PROGRESS.to_string(),
            LotteryError::NothingToExport => messages::NOTHING_TO_EXPORT.to_string(),
            LotteryError::UnknownMode(_) => messages::UNKNOWN_MODE.to_string(),
            LotteryError::InvalidExport(_) => messages::INVALID_EXPORT.to_string(),
            LotteryError::InvalidConfig(_) => messages::INVALID_CONFIG.to_string(),
        }
    }

    /// Whether the error comes from validating a draw request
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LotteryError::MissingNumbersInput
                | LotteryError::NonPositiveNumbers
                | LotteryError::CountExceedsTotal { .. }
                | LotteryError::MissingEntriesCount
                | LotteryError::NonPositiveEntriesCount
                | LotteryError::CountExceedsEntries { .. }
                | LotteryError::CountTooLarge { .. }
                | LotteryError::NoEntriesLoaded
        )
    }

    /// Whether the error comes from parsing an upload
    pub fn is_upload(&self) -> bool {
        matches!(
            self,
            LotteryError::UnsupportedFileType { .. }
                | LotteryError::EmptyUpload
                | LotteryError::NoValidNames
        )
    }
}

pub type Result<T> = core::result::Result<T, LotteryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_distinct_per_category() {
        let errors = [
            LotteryError::MissingNumbersInput,
            LotteryError::NonPositiveNumbers,
            LotteryError::CountExceedsTotal {
                requested: 6,
                total: 5,
            },
            LotteryError::UnsupportedFileType {
                file_name: "names.txt".to_string(),
            },
            LotteryError::EmptyUpload,
            LotteryError::NoValidNames,
        ];

        let messages: std::collections::HashSet<String> =
            errors.iter().map(|e| e.user_message()).collect();
        assert_eq!(messages.len(), errors.len());
    }

    #[test]
    fn test_entries_overflow_message_names_counts() {
        let err = LotteryError::CountExceedsEntries {
            requested: 7,
            available: 3,
        };
        let message = err.user_message();
        assert!(message.contains("(7)"));
        assert!(message.contains("(3)"));
        assert!(err.is_validation());
        assert!(!err.is_upload());
    }

    #[test]
    fn test_display_is_english_diagnostic() {
        let err = LotteryError::CountExceedsTotal {
            requested: 6,
            total: 5,
        };
        assert_eq!(err.to_string(), "Draw count 6 exceeds total 5");
    }
}
