//! Result-log scanning and summary-line parsing.
//!
//! A result log is whatever the training framework printed for one run.
//! The only line that matters is the final summary, e.g.
//! `Overall test rmse = 0.405730`: the last line containing the keyword,
//! whose last numeric token is the run's score.

use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use ms_types::{LogError, LogScore, LOG_EXTENSION};

/// Default summary keyword written by the training framework.
pub const DEFAULT_KEYWORD: &str = "Overall";

/// Parse the summary score out of one result log.
///
/// Takes the *last* line containing `keyword` (the final summary, in case
/// intermediate epochs also mention it) and the *last* whitespace-separated
/// token on it that parses as a finite float. Returns a typed error rather
/// than an empty value when either is missing.
pub fn read_score(path: &Path, keyword: &str) -> Result<LogScore, LogError> {
    let contents = fs::read_to_string(path).map_err(|e| LogError::Unreadable {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let summary = contents
        .lines()
        .filter(|line| line.contains(keyword))
        .next_back()
        .ok_or_else(|| LogError::NoSummaryLine {
            path: path.to_path_buf(),
            keyword: keyword.to_string(),
        })?;

    let score = summary
        .split_whitespace()
        .rev()
        .find_map(|token| token.parse::<f64>().ok().filter(|v| v.is_finite()))
        .ok_or_else(|| LogError::MalformedScore {
            path: path.to_path_buf(),
            line: summary.to_string(),
        })?;

    Ok(LogScore {
        source_file: path.to_path_buf(),
        score,
    })
}

/// Scan a directory for `.txt` result logs and parse each one.
///
/// A log that cannot be parsed is warned about and skipped — a half-written
/// or crashed run should not block selection across the rest of the sweep.
/// Only *zero* usable logs is an error.
pub fn scan_logs(directory: &Path, keyword: &str) -> Result<Vec<LogScore>, LogError> {
    let entries = fs::read_dir(directory).map_err(|e| LogError::Unreadable {
        path: directory.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(LOG_EXTENSION)
        })
        .collect();
    // Directory order is filesystem-dependent; sort for reproducible output.
    paths.sort();

    let mut scores = Vec::with_capacity(paths.len());
    for path in paths {
        match read_score(&path, keyword) {
            Ok(score) => {
                debug!(log = %path.display(), score = score.score, "parsed result log");
                scores.push(score);
            }
            Err(e) => warn!(log = %path.display(), error = %e, "skipping unusable log"),
        }
    }

    if scores.is_empty() {
        return Err(LogError::NoResults {
            directory: directory.to_path_buf(),
        });
    }

    Ok(scores)
}
