//! Upload parser
//!
//! Turns an uploaded `.csv` list (one name per line) into ordered entries.

use tracing::info;

use crate::errors::{LotteryError, Result};
use crate::types::Entry;

/// Accepted upload extension
pub const ACCEPTED_EXTENSION: &str = ".csv";

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Reject anything that is not a `.csv` file, before reading its content
pub fn check_file_type(file_name: &str) -> Result<()> {
    if file_name.ends_with(ACCEPTED_EXTENSION) {
        Ok(())
    } else {
        Err(LotteryError::UnsupportedFileType {
            file_name: file_name.to_string(),
        })
    }
}

/// Check the file type, then parse its text
pub fn parse_upload(file_name: &str, text: &str) -> Result<Vec<Entry>> {
    check_file_type(file_name)?;
    let entries = parse_entries(text)?;
    info!("Loaded {} entries from {}", entries.len(), file_name);
    Ok(entries)
}

/// Parse newline-delimited names
///
/// Blank lines are dropped before indexing, so an entry's index is its
/// 1-based position among non-blank lines. Quote and comma characters are
/// stripped afterwards (and the remainder trimmed again); a name left empty
/// is dropped without renumbering the others.
pub fn parse_entries(text: &str) -> Result<Vec<Entry>> {
    let lines: Vec<&str> = text
        .split('\n')
        .map(clean_line)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(LotteryError::EmptyUpload);
    }

    let entries: Vec<Entry> = lines
        .iter()
        .enumerate()
        .map(|(index, line)| Entry::new(strip_separators(line), index + 1))
        .filter(|entry| !entry.name().is_empty())
        .collect();

    if entries.is_empty() {
        return Err(LotteryError::NoValidNames);
    }

    Ok(entries)
}

fn clean_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
}

fn strip_separators(line: &str) -> String {
    let stripped: String = line.chars().filter(|c| !matches!(c, '"' | ',')).collect();
    clean_line(&stripped).to_string()
}
