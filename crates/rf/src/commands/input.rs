//! Loading of input documents and date bounds shared by the data commands.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use survey_filter_rs::filter::{end_of_today, parse_date_bound, DateRange, DayBound};
use tracing::debug;

use super::{CommandError, Result};

/// Reads and deserializes a JSON document.
///
/// # Errors
///
/// Returns [`CommandError::Input`] naming the file if it cannot be read or
/// does not have the expected shape.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| CommandError::Input {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    debug!(path = %path.display(), bytes = content.len(), "read input document");

    serde_json::from_str(&content).map_err(|e| CommandError::Input {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Reads an optional JSON document, returning the default when absent.
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    match path {
        Some(path) => read_json(path),
        None => Ok(T::default()),
    }
}

/// Resolves `--from`/`--to` arguments into a date range.
///
/// A lone `--from` is closed with the end of today; a lone `--to` leaves
/// the range unbounded, which the engine treats as no range at all.
///
/// # Errors
///
/// Returns a filter error for unparsable dates or an inverted range.
pub fn resolve_date_range(from: Option<&str>, to: Option<&str>) -> Result<DateRange> {
    let from = from
        .map(|s| parse_date_bound(s, DayBound::Start))
        .transpose()?;
    let to = match to {
        Some(s) => Some(parse_date_bound(s, DayBound::End)?),
        None if from.is_some() => Some(end_of_today()),
        None => None,
    };

    let range = DateRange::new(from, to);
    range.validate()?;
    Ok(range)
}
