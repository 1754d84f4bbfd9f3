//! Prelude module for convenient imports.
//!
//! Re-exports every model type so consumers can pull them in with a single
//! `use` statement.

pub use crate::response::{AnswerValue, PersonAttributes, Response, Tag};
pub use crate::survey::{Choice, Question, QuestionType, Survey, OTHER_CHOICE_LABEL};
