//! Pre-flight checks for filter selections.
//!
//! The engine silently ignores targets it cannot resolve. Callers that would
//! rather tell the user about a stale or mistyped question reference can
//! run [`validate_selection`] first.

use strsim::levenshtein;
use survey_model_rs::survey::Survey;

use crate::filter::{FilterError, FilterResult, FilterSelection, FilterTarget};

/// Maximum Levenshtein distance to consider a question ID as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Checks that every question target exists in `survey` with the declared type.
///
/// Tag and attribute targets are not checked; they may legitimately refer
/// to values no response carries.
///
/// # Errors
///
/// Returns [`FilterError::UnknownQuestion`] (with a suggestion when a close
/// match exists) or [`FilterError::QuestionTypeMismatch`] for the first
/// offending entry.
pub fn validate_selection(selection: &FilterSelection, survey: &Survey) -> FilterResult<()> {
    for entry in &selection.filter {
        let FilterTarget::Question {
            id, question_type, ..
        } = &entry.target
        else {
            continue;
        };

        let Some(question) = survey.question(id) else {
            let suggestion =
                find_similar_name(id, survey.questions.iter().map(|q| q.id.as_str()));
            return Err(FilterError::unknown_question(id, suggestion));
        };

        if question.question_type != *question_type {
            return Err(FilterError::QuestionTypeMismatch {
                id: id.clone(),
                declared: *question_type,
                actual: question.question_type,
            });
        }
    }
    Ok(())
}

/// Finds the closest candidate within [`MAX_SUGGESTION_DISTANCE`] edits.
fn find_similar_name<'a>(query: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|name| !name.is_empty())
        .map(|name| (name, levenshtein(&query_lower, &name.to_lowercase())))
        .min_by_key(|(_, d)| *d)?;

    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match.to_string())
    } else {
        None
    }
}
