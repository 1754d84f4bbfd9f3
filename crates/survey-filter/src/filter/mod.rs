//! Survey response filtering.
//!
//! This module turns a user's filter selection into either a filtered list
//! of responses or a normalized criteria object for a backend query.
//!
//! # Filter Targets
//!
//! ## Questions
//! - Open text: `Filled out`, `Skipped`
//! - Single choice: `Includes either`
//! - Multi choice: `Includes either`, `Includes all`
//! - NPS and rating: `Is equal to`, `Is less than`, `Is more than`,
//!   `Submitted`, `Skipped`
//! - Call to action: `Clicked`, `Dismissed`
//! - Consent: `Accepted`, `Dismissed`
//!
//! ## Tags
//! - `Applied`, `Not applied`
//!
//! ## Person Attributes
//! - `Equals`, `Not equals`
//!
//! Entries are combined with AND. On top of them a selection can require
//! finished responses, and a [`DateRange`] can bound `createdAt`.
//!
//! # Example
//!
//! ```
//! use survey_filter_rs::filter::{evaluate, normalize, DateRange, FilterEntry, FilterSelection};
//! use survey_model_rs::prelude::*;
//!
//! let survey = Survey::new("s1", vec![Question::new("q1", QuestionType::Rating, "Rate us")]);
//! let selection = FilterSelection::new(vec![FilterEntry::question(
//!     "q1",
//!     QuestionType::Rating,
//!     Some("Submitted"),
//!     None,
//! )]);
//!
//! // Criteria for a backend query
//! let criteria = normalize(&selection, &DateRange::default());
//! assert!(criteria.data.is_some());
//!
//! // Or filter in memory
//! let responses: Vec<Response> = vec![];
//! let matching = evaluate(&responses, &selection, &survey, &DateRange::default());
//! assert!(matching.is_empty());
//! ```

mod choices;
mod criteria;
mod dates;
mod error;
mod evaluator;
mod selection;
mod vocabulary;

pub use choices::normalize_choices;
pub use criteria::{
    normalize, CreatedAtCriterion, DataCriterion, ResponseFilterCriteria, TagCriteria,
};
pub use dates::{end_of_day, end_of_today, parse_date_bound, start_of_day, DateRange, DayBound};
pub use error::{FilterError, FilterResult};
pub use evaluator::{evaluate, CriteriaEvaluator, ResponseFilter};
pub use selection::{FilterEntry, FilterPredicate, FilterSelection, FilterTarget, Operand};
pub use vocabulary::{
    labels, AttributePredicate, ChoicePredicate, ConsentPredicate, Criterion, CtaPredicate,
    QuestionPredicate, ScalePredicate, TagPredicate, TextPredicate,
};
