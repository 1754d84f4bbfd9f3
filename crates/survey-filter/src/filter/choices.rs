//! Choice normalization for multi-choice answers.

use survey_model_rs::survey::{Question, OTHER_CHOICE_LABEL};

/// Folds free-form answers into the "Other" choice.
///
/// Every selected value that is not one of the question's declared choice
/// labels becomes "Other", provided the question declares an "Other" choice.
/// Without one, unmatched values are kept as they are.
///
/// Works on a copy; the stored answer is never modified.
pub fn normalize_choices(question: &Question, answers: &[String]) -> Vec<String> {
    if !question.has_other_choice() {
        return answers.to_vec();
    }

    answers
        .iter()
        .map(|answer| {
            if question.choice_labels().any(|label| label == answer) {
                answer.clone()
            } else {
                OTHER_CHOICE_LABEL.to_string()
            }
        })
        .collect()
}
