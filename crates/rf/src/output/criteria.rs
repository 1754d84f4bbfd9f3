//! Criteria output formatting.

use owo_colors::OwoColorize;
use survey_filter_rs::filter::{AttributePredicate, DataCriterion, ResponseFilterCriteria};

use super::helpers::push_header;

/// Formats criteria as JSON, in the shape a storage layer consumes.
pub fn format_criteria_json(criteria: &ResponseFilterCriteria) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(criteria)
}

/// Describes a data criterion in words.
fn describe_data(criterion: &DataCriterion) -> String {
    match criterion {
        DataCriterion::Submitted => "submitted".to_string(),
        DataCriterion::Skipped => "skipped".to_string(),
        DataCriterion::IncludesOne { value } => format!("includes one of {}", value.join(", ")),
        DataCriterion::IncludesAll { value } => format!("includes all of {}", value.join(", ")),
        DataCriterion::Equals { value } => format!("= {value}"),
        DataCriterion::LessThan { value } => format!("< {value}"),
        DataCriterion::GreaterThan { value } => format!("> {value}"),
        DataCriterion::Clicked => "clicked".to_string(),
        DataCriterion::Accepted => "accepted".to_string(),
    }
}

fn describe_attribute(predicate: &AttributePredicate) -> String {
    match predicate {
        AttributePredicate::Equals { value } => format!("= {value}"),
        AttributePredicate::NotEquals { value } => format!("!= {value}"),
    }
}

/// Formats criteria as a table, one constraint per line.
pub fn format_criteria_table(criteria: &ResponseFilterCriteria, use_colors: bool) -> String {
    if criteria.is_empty() {
        return "No constraints: every response matches.\n".to_string();
    }

    let mut rows: Vec<(&str, String, String)> = Vec::new();

    if criteria.only_complete == Some(true) {
        rows.push(("status", "finished".to_string(), "only complete".to_string()));
    }
    if let Some(range) = &criteria.created_at {
        rows.push((
            "created",
            String::new(),
            format!("{} .. {}", range.min.to_rfc3339(), range.max.to_rfc3339()),
        ));
    }
    if let Some(tags) = &criteria.tags {
        for name in &tags.applied {
            rows.push(("tag", name.clone(), "applied".to_string()));
        }
        for name in &tags.not_applied {
            rows.push(("tag", name.clone(), "not applied".to_string()));
        }
    }
    for (id, criterion) in criteria.data.iter().flatten() {
        rows.push(("question", id.clone(), describe_data(criterion)));
    }
    for (name, predicate) in criteria.person_attributes.iter().flatten() {
        rows.push(("attribute", name.clone(), describe_attribute(predicate)));
    }

    let mut output = String::new();
    push_header(
        &mut output,
        &format!("{:<10} {:<20} {}", "Kind", "Target", "Constraint"),
        use_colors,
    );
    for (kind, target, constraint) in rows {
        let kind = if use_colors {
            format!("{:<10}", kind).cyan().to_string()
        } else {
            format!("{:<10}", kind)
        };
        let line = format!("{} {:<20} {}", kind, target, constraint);
        output.push_str(&line);
        output.push('\n');
    }

    output
}
