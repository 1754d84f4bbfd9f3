//! Filter option output formatting.

use owo_colors::OwoColorize;
use survey_filter_rs::options::{FilterOptionKind, FilterOptions, OptionsType};

use super::helpers::{push_header, truncate_id, truncate_str};

/// Formats filter options as JSON, in the shape the filter UI consumes.
pub fn format_options_json(options: &FilterOptions) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(options)
}

fn group_name(group: OptionsType) -> &'static str {
    match group {
        OptionsType::Questions => "Questions",
        OptionsType::Tags => "Tags",
        OptionsType::Attributes => "Attributes",
    }
}

/// Formats filter options as a table, grouped by target kind.
pub fn format_options_table(options: &FilterOptions, use_colors: bool) -> String {
    let mut output = String::new();

    for group in &options.question_options {
        if !output.is_empty() {
            output.push('\n');
        }
        let title = group_name(group.header);
        if use_colors {
            output.push_str(&format!("{}\n", title.green().bold()));
        } else {
            output.push_str(title);
            output.push('\n');
        }

        if group.option.is_empty() {
            output.push_str("  (none)\n");
            continue;
        }

        push_header(
            &mut output,
            &format!(
                "  {:<10} {:<24} {:<22} {}",
                "ID", "Label", "Type", "Operators / Values"
            ),
            use_colors,
        );

        for option in &group.option {
            let kind = match option.question_type {
                Some(qt) => qt.as_str().to_string(),
                None => String::new(),
            };
            let conditions = options
                .question_filter_options
                .iter()
                .find(|f| f.id == option.id && kind_matches(f.kind, group.header))
                .map(|f| {
                    format!(
                        "{} / {}",
                        f.filter_options.join(", "),
                        f.filter_combo_box_options.join(", ")
                    )
                })
                .unwrap_or_default();

            let line = format!(
                "  {:<10} {:<24} {:<22} {}",
                truncate_id(&option.id),
                truncate_str(&option.label, 24),
                kind,
                conditions
            );
            output.push_str(line.trim_end());
            output.push('\n');
        }
    }

    output
}

/// Returns true if a condition entry belongs to the given group. Question
/// IDs, tag IDs and attribute names may collide across groups.
fn kind_matches(kind: FilterOptionKind, group: OptionsType) -> bool {
    match kind {
        FilterOptionKind::Question(_) => group == OptionsType::Questions,
        FilterOptionKind::Group(g) => g == group,
    }
}
