//! Common helper functions for output formatting.

use chrono::{DateTime, Local, Utc};
use owo_colors::OwoColorize;
use survey_model_rs::response::Tag;

/// How timestamps are rendered in tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateFormat {
    /// "3 days ago", "Today 14:05".
    #[default]
    Relative,
    /// RFC 3339 in UTC.
    Iso,
    /// Local "YYYY-MM-DD HH:MM".
    Short,
}

impl DateFormat {
    /// Accepted config values.
    pub const NAMES: [&'static str; 3] = ["relative", "iso", "short"];

    /// Parses a config value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "relative" => Some(DateFormat::Relative),
            "iso" => Some(DateFormat::Iso),
            "short" => Some(DateFormat::Short),
            _ => None,
        }
    }
}

/// Truncates an ID to 8 characters for display.
pub fn truncate_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Truncates a string to a maximum length in characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats a timestamp relative to `now`.
pub fn format_timestamp(ts: &DateTime<Utc>, format: DateFormat, now: DateTime<Utc>) -> String {
    match format {
        DateFormat::Iso => ts.to_rfc3339(),
        DateFormat::Short => ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        DateFormat::Relative => {
            let local = ts.with_timezone(&Local);
            let days = (now.with_timezone(&Local).date_naive() - local.date_naive()).num_days();
            match days {
                0 => format!("Today {}", local.format("%H:%M")),
                1 => "Yesterday".to_string(),
                2..=30 => format!("{days} days ago"),
                _ => local.format("%b %d, %Y").to_string(),
            }
        }
    }
}

/// Formats the finished flag.
pub fn format_finished(finished: bool, use_colors: bool) -> String {
    match (finished, use_colors) {
        (true, true) => "yes".green().to_string(),
        (true, false) => "yes".to_string(),
        (false, true) => "no".dimmed().to_string(),
        (false, false) => "no".to_string(),
    }
}

/// Formats tag names for display.
pub fn format_tags(tags: &[Tag], max_len: usize) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let joined = tags
        .iter()
        .map(|t| format!("#{}", t.name))
        .collect::<Vec<_>>()
        .join(" ");

    truncate_str(&joined, max_len)
}

/// Prints a header line, dimmed when colors are on.
pub fn push_header(output: &mut String, header: &str, use_colors: bool) {
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(header);
        output.push('\n');
    }
}
