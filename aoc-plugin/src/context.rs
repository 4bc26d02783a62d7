//! Puzzle context resolution from the working directory

use crate::error::PluginError;
use std::path::Path;

/// The (year, day) pair identifying which puzzle an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleContext {
    pub year: u16,
    pub day: u8,
}

/// Resolve the puzzle context from a working directory path
///
/// The two trailing path segments must be `aoc<year>/day<day>`, e.g.
/// `~/code/aoc2024/day3`. Pure function of the path; no filesystem access.
///
/// # Errors
///
/// `PluginError::InvalidContext` when either segment is missing, has the
/// wrong prefix, or its suffix is not an integer in range (year nonzero,
/// day 1 to 25).
pub fn resolve(path: &Path) -> Result<PuzzleContext, PluginError> {
    let invalid = || PluginError::InvalidContext {
        path: path.to_path_buf(),
    };

    let day_dir = path.file_name().and_then(|n| n.to_str()).ok_or_else(invalid)?;
    let year_dir = path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
        .ok_or_else(invalid)?;

    let day_suffix = day_dir.strip_prefix("day").ok_or_else(invalid)?;
    let year_suffix = year_dir.strip_prefix("aoc").ok_or_else(invalid)?;

    // Integer parsing accepts a leading sign; the suffixes must be digits only
    if !is_digits(day_suffix) || !is_digits(year_suffix) {
        return Err(invalid());
    }

    let day: u8 = day_suffix.parse().map_err(|_| invalid())?;
    let year: u16 = year_suffix.parse().map_err(|_| invalid())?;

    if year == 0 || !(1..=25).contains(&day) {
        return Err(invalid());
    }

    Ok(PuzzleContext { year, day })
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
