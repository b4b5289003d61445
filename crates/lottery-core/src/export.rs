//! Exporter
//!
//! Serializes drawn results into the flat text file offered for download.
//! Writing the bytes somewhere (browser download, file on disk) is left to
//! the frontend.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::errors::{LotteryError, Result};
use crate::types::{DrawMode, Entry, Timestamp};

/// MIME type of every export
pub const EXPORT_MIME: &str = "text/csv;charset=utf-8;";

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Separator between exported numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportSeparator {
    #[default]
    Newline,
    Comma,
}

impl ExportSeparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportSeparator::Newline => "\n",
            ExportSeparator::Comma => ",",
        }
    }
}

/// A ready-to-save export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Export {
    pub file_name: String,
    pub contents: String,
    pub mime: String,
}

impl Export {
    fn new(mode: DrawMode, timestamp: Timestamp, contents: String) -> Self {
        Self {
            file_name: file_name(mode, timestamp),
            contents,
            mime: EXPORT_MIME.to_string(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.contents.as_bytes()
    }
}

impl fmt::Display for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.file_name, self.contents.len())
    }
}

/// `lottery-<mode>-<unix-ms>.csv`
pub fn file_name(mode: DrawMode, timestamp: Timestamp) -> String {
    format!("lottery-{}-{}.csv", mode.slug(), timestamp.as_millis())
}

/// Export drawn numbers; `None` when nothing has been drawn
pub fn export_numbers(
    numbers: &[u64],
    separator: ExportSeparator,
    timestamp: Timestamp,
) -> Option<Export> {
    if numbers.is_empty() {
        return None;
    }

    let contents = numbers
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(separator.as_str());

    Some(Export::new(DrawMode::Numbers, timestamp, contents))
}

/// Export drawn names one per line; `None` when nothing has been drawn
///
/// The byte-order mark keeps non-ASCII names intact in spreadsheet tools.
pub fn export_entries(entries: &[Entry], with_bom: bool, timestamp: Timestamp) -> Option<Export> {
    if entries.is_empty() {
        return None;
    }

    let mut contents = String::new();
    if with_bom {
        contents.push(BYTE_ORDER_MARK);
    }
    contents.push_str(
        &entries
            .iter()
            .map(Entry::name)
            .collect::<Vec<_>>()
            .join("\n"),
    );

    Some(Export::new(DrawMode::Entries, timestamp, contents))
}

/// Read back a numbers export written with either separator
pub fn read_numbers(text: &str) -> Result<Vec<u64>> {
    text.trim_start_matches(BYTE_ORDER_MARK)
        .split(|c: char| c == '\n' || c == ',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value
                .parse::<u64>()
                .map_err(|e| LotteryError::InvalidExport(format!("{:?}: {}", value, e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: Timestamp = Timestamp::new(1_700_000_000_000);

    #[test]
    fn test_file_names() {
        assert_eq!(
            file_name(DrawMode::Numbers, TS),
            "lottery-numbers-1700000000000.csv"
        );
        assert_eq!(
            file_name(DrawMode::Entries, TS),
            "lottery-employees-1700000000000.csv"
        );
    }

    #[test]
    fn test_numbers_export() {
        let export = export_numbers(&[2, 4, 5, 8, 9], ExportSeparator::Newline, TS).unwrap();
        assert_eq!(export.contents, "2\n4\n5\n8\n9");
        assert_eq!(export.mime, EXPORT_MIME);

        let export = export_numbers(&[2, 4], ExportSeparator::Comma, TS).unwrap();
        assert_eq!(export.contents, "2,4");
    }

    #[test]
    fn test_entries_export_has_bom() {
        let entries = vec![Entry::new("Alice", 1), Entry::new("Bob", 2)];
        let export = export_entries(&entries, true, TS).unwrap();
        assert!(export.contents.starts_with('\u{FEFF}'));
        assert_eq!(export.contents.trim_start_matches('\u{FEFF}'), "Alice\nBob");
        assert_eq!(&export.as_bytes()[..3], &[0xEF, 0xBB, 0xBF]);

        let export = export_entries(&entries, false, TS).unwrap();
        assert_eq!(export.contents, "Alice\nBob");
    }

    #[test]
    fn test_empty_results_export_nothing() {
        assert!(export_numbers(&[], ExportSeparator::Newline, TS).is_none());
        assert!(export_entries(&[], true, TS).is_none());
    }

    #[test]
    fn test_read_numbers() {
        assert_eq!(read_numbers("1\n2\n3").unwrap(), vec![1, 2, 3]);
        assert_eq!(read_numbers("1,2,3\n").unwrap(), vec![1, 2, 3]);
        assert!(read_numbers("1,x").is_err());
    }
}
