//! Draw request validation
//!
//! Inputs arrive as the raw strings the user typed. A request either passes
//! every check and becomes a typed request, or is rejected before any draw.

use tracing::warn;

use crate::errors::{LotteryError, Result};
use crate::types::Entry;

/// A validated numbers-mode request: draw `count` of {1, ..., total}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumbersRequest {
    pub total: u64,
    pub count: u64,
}

/// Leading-integer parse of a form field
///
/// Skips leading whitespace, accepts an optional sign, then consumes digits up
/// to the first non-digit. `"3.7"` is 3, `"12abc"` is 12, `"abc"` and `""`
/// are `None`. Values beyond `i64` saturate.
pub fn parse_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digit_len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if digit_len == 0 {
        return None;
    }

    let magnitude = digits[..digit_len].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });

    Some(if negative { -magnitude } else { magnitude })
}

/// Validate the numbers-mode form fields
pub fn validate_numbers_request(total: &str, count: &str, max_count: Option<u64>) -> Result<NumbersRequest> {
    let result = check_numbers(total, count, max_count);
    if let Err(e) = &result {
        warn!("Rejected numbers draw (total={:?}, count={:?}): {}", total, count, e);
    }
    result
}

fn check_numbers(total: &str, count: &str, max_count: Option<u64>) -> Result<NumbersRequest> {
    let (total, count) = match (parse_int(total), parse_int(count)) {
        (Some(total), Some(count)) => (total, count),
        _ => return Err(LotteryError::MissingNumbersInput),
    };

    if total < 1 || count < 1 {
        return Err(LotteryError::NonPositiveNumbers);
    }

    let (total, count) = (total as u64, count as u64);
    if count > total {
        return Err(LotteryError::CountExceedsTotal {
            requested: count,
            total,
        });
    }

    check_limit(count, max_count)?;

    Ok(NumbersRequest { total, count })
}

/// Reject counts above an optional configured cap
fn check_limit(count: u64, max_count: Option<u64>) -> Result<()> {
    match max_count {
        Some(max) if count > max => Err(LotteryError::CountTooLarge {
            requested: count,
            max,
        }),
        _ => Ok(()),
    }
}

/// Validate the entries-mode count field against the loaded list
pub fn validate_entries_request(entries: &[Entry], count: &str, max_count: Option<u64>) -> Result<usize> {
    let result = check_entries(entries, count, max_count);
    if let Err(e) = &result {
        warn!("Rejected entries draw (loaded={}, count={:?}): {}", entries.len(), count, e);
    }
    result
}

fn check_entries(entries: &[Entry], count: &str, max_count: Option<u64>) -> Result<usize> {
    if entries.is_empty() {
        return Err(LotteryError::NoEntriesLoaded);
    }

    let count = parse_int(count).ok_or(LotteryError::MissingEntriesCount)?;
    if count < 1 {
        return Err(LotteryError::NonPositiveEntriesCount);
    }

    let count = count as u64;
    if count > entries.len() as u64 {
        return Err(LotteryError::CountExceedsEntries {
            requested: count,
            available: entries.len(),
        });
    }

    check_limit(count, max_count)?;

    Ok(count as usize)
}
