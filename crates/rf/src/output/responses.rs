//! Response output formatting.

use chrono::Utc;
use serde::Serialize;
use survey_model_rs::response::Response;

use super::helpers::{
    format_finished, format_tags, format_timestamp, push_header, truncate_id, DateFormat,
};

/// JSON output structure for the filter command.
#[derive(Serialize)]
pub struct ResponsesListOutput<'a> {
    pub count: usize,
    pub responses: &'a [&'a Response],
}

/// Formats responses as JSON.
pub fn format_responses_json(responses: &[&Response]) -> Result<String, serde_json::Error> {
    let output = ResponsesListOutput {
        count: responses.len(),
        responses,
    };

    serde_json::to_string_pretty(&output)
}

/// Formats responses as a table.
pub fn format_responses_table(
    responses: &[&Response],
    use_colors: bool,
    date_format: DateFormat,
) -> String {
    if responses.is_empty() {
        return "No responses match.\n".to_string();
    }

    let mut output = String::new();
    let header = format!(
        "{:<10} {:<26} {:<5} {:<8} {}",
        "ID", "Created", "Done", "Answers", "Tags"
    );
    push_header(&mut output, &header, use_colors);

    let now = Utc::now();
    for response in responses {
        let line = format!(
            "{:<10} {:<26} {:<5} {:<8} {}",
            truncate_id(&response.id),
            format_timestamp(&response.created_at, date_format, now),
            format_finished(response.finished, use_colors),
            response.data.len(),
            format_tags(&response.tags, 40),
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}
