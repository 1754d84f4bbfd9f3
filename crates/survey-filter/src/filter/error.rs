//! Error types for selection validation and date parsing.
//!
//! Filtering itself never fails; these errors only come out of the helpers a
//! caller runs before handing a selection to the engine.

use survey_model_rs::survey::QuestionType;
use thiserror::Error;

/// A specialized Result type for filter helper operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors reported while preparing a filter request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A question target references an ID the survey does not contain.
    #[error("question '{id}' is not part of the survey{}", suggestion_suffix(.suggestion))]
    UnknownQuestion {
        /// The unknown question ID.
        id: String,
        /// A similarly named question, if one exists.
        suggestion: Option<String>,
    },

    /// A question target declares a different type than the survey question.
    #[error("question '{id}' is {actual} in the survey but was selected as {declared}")]
    QuestionTypeMismatch {
        /// The question ID.
        id: String,
        /// The type declared by the selection.
        declared: QuestionType,
        /// The type defined by the survey.
        actual: QuestionType,
    },

    /// A date or timestamp could not be parsed.
    #[error("invalid date: {value} (expected YYYY-MM-DD, RFC 3339 or 'today')")]
    InvalidDate {
        /// The rejected input.
        value: String,
    },

    /// The lower bound of a date range lies after the upper bound.
    #[error("date range starts after it ends")]
    InvertedDateRange,
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(". Did you mean '{}'?", s),
        None => String::new(),
    }
}

impl FilterError {
    /// Creates an unknown question error.
    pub fn unknown_question(id: impl Into<String>, suggestion: Option<String>) -> Self {
        FilterError::UnknownQuestion {
            id: id.into(),
            suggestion,
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(value: impl Into<String>) -> Self {
        FilterError::InvalidDate {
            value: value.into(),
        }
    }
}
