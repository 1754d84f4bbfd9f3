//! In-memory evaluation of filters against responses.
//!
//! [`ResponseFilter`] applies a raw [`FilterSelection`]; [`CriteriaEvaluator`]
//! applies already normalized [`ResponseFilterCriteria`]. Both resolve every
//! constraint through the shared vocabulary, so for a selection with at most
//! one entry per target they keep exactly the same responses.
//!
//! Stored criteria carry no question type, so both evaluators judge a
//! question predicate by the survey's own question type. An entry declared
//! with a different type is reinterpreted for the survey's type (a consent
//! `Dismissed` on a call-to-action question means the call to action was
//! dismissed), and fails when that type has no matching operator.
//!
//! # Example
//!
//! ```
//! use survey_filter_rs::filter::{DateRange, FilterEntry, FilterSelection, ResponseFilter};
//! use survey_model_rs::prelude::*;
//!
//! let survey = Survey::new("s1", vec![Question::new("q1", QuestionType::Nps, "Recommend us?")]);
//! let selection = FilterSelection::new(vec![FilterEntry::question(
//!     "q1",
//!     QuestionType::Nps,
//!     Some("Is more than"),
//!     Some("5".into()),
//! )]);
//!
//! let filter = ResponseFilter::new(&selection, &survey, DateRange::default());
//! let responses: Vec<Response> = vec![];
//! assert!(filter.filter_responses(&responses).is_empty());
//! ```

use survey_model_rs::response::Response;
use survey_model_rs::survey::Survey;
use tracing::debug;

use super::criteria::ResponseFilterCriteria;
use super::dates::DateRange;
use super::selection::FilterSelection;
use super::vocabulary::Criterion;

/// Applies a filter selection to responses of one survey.
///
/// The selection is resolved once on construction; unrecognized entries are
/// dropped at that point and constrain nothing.
#[derive(Debug)]
pub struct ResponseFilter<'a> {
    criteria: Vec<Criterion>,
    survey: &'a Survey,
    only_complete: bool,
    date_range: DateRange,
}

impl<'a> ResponseFilter<'a> {
    /// Creates a filter for `selection` over `survey`'s responses.
    pub fn new(selection: &FilterSelection, survey: &'a Survey, date_range: DateRange) -> Self {
        let criteria: Vec<Criterion> = selection
            .filter
            .iter()
            .filter_map(Criterion::from_entry)
            .collect();

        debug!(
            entries = selection.filter.len(),
            recognized = criteria.len(),
            only_complete = selection.only_complete,
            bounded = date_range.is_bounded(),
            "compiled response filter"
        );

        Self {
            criteria,
            survey,
            only_complete: selection.only_complete,
            date_range,
        }
    }

    /// Returns the recognized criteria, in selection order.
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Returns true if the response satisfies every criterion, the
    /// completion flag and the date range.
    pub fn matches(&self, response: &Response) -> bool {
        self.criteria
            .iter()
            .all(|criterion| criterion.matches(self.survey, response))
            && self.is_complete_enough(response)
            && self.date_range.contains(&response.created_at)
    }

    /// Filters a slice of responses, keeping their relative order.
    ///
    /// Each criterion narrows the surviving set in turn; completion and the
    /// date range are applied last.
    pub fn filter_responses<'b>(&self, responses: &'b [Response]) -> Vec<&'b Response> {
        let survivors: Vec<&Response> = responses.iter().collect();

        self.criteria
            .iter()
            .fold(survivors, |survivors, criterion| {
                survivors
                    .into_iter()
                    .filter(|response| criterion.matches(self.survey, response))
                    .collect()
            })
            .into_iter()
            .filter(|response| self.is_complete_enough(response))
            .filter(|response| self.date_range.contains(&response.created_at))
            .collect()
    }

    fn is_complete_enough(&self, response: &Response) -> bool {
        !self.only_complete || response.finished
    }
}

/// Applies normalized criteria to responses of one survey.
///
/// Question criteria are interpreted with the question types from `survey`.
/// A criterion on a question the survey does not contain excludes every
/// response, as does one whose operator the question type does not have.
#[derive(Debug)]
pub struct CriteriaEvaluator<'a> {
    criteria: &'a ResponseFilterCriteria,
    survey: &'a Survey,
}

impl<'a> CriteriaEvaluator<'a> {
    /// Creates an evaluator for `criteria` over `survey`'s responses.
    pub fn new(criteria: &'a ResponseFilterCriteria, survey: &'a Survey) -> Self {
        Self { criteria, survey }
    }

    /// Returns true if the response satisfies all criteria.
    pub fn matches(&self, response: &Response) -> bool {
        self.matches_completion(response)
            && self.matches_created_at(response)
            && self.matches_tags(response)
            && self.matches_data(response)
            && self.matches_attributes(response)
    }

    /// Filters a slice of responses, keeping their relative order.
    pub fn filter_responses<'b>(&self, responses: &'b [Response]) -> Vec<&'b Response> {
        responses.iter().filter(|r| self.matches(r)).collect()
    }

    fn matches_completion(&self, response: &Response) -> bool {
        self.criteria.only_complete != Some(true) || response.finished
    }

    fn matches_created_at(&self, response: &Response) -> bool {
        self.criteria
            .created_at
            .map_or(true, |range| {
                range.min <= response.created_at && response.created_at <= range.max
            })
    }

    fn matches_tags(&self, response: &Response) -> bool {
        let Some(tags) = &self.criteria.tags else {
            return true;
        };
        tags.applied.iter().all(|name| response.has_tag(name))
            && tags.not_applied.iter().all(|name| !response.has_tag(name))
    }

    fn matches_data(&self, response: &Response) -> bool {
        let Some(data) = &self.criteria.data else {
            return true;
        };
        data.iter().all(|(question_id, criterion)| {
            let Some(question) = self.survey.question(question_id) else {
                return false;
            };
            criterion
                .to_predicate(question.question_type)
                .is_some_and(|predicate| predicate.matches(question, response.answer(question_id)))
        })
    }

    fn matches_attributes(&self, response: &Response) -> bool {
        let Some(attributes) = &self.criteria.person_attributes else {
            return true;
        };
        attributes
            .iter()
            .all(|(name, predicate)| predicate.matches(response.attribute(name)))
    }
}

/// Returns the responses matching every constraint of `selection`.
///
/// The result keeps the input order. Inputs are not modified.
pub fn evaluate(
    responses: &[Response],
    selection: &FilterSelection,
    survey: &Survey,
    date_range: &DateRange,
) -> Vec<Response> {
    ResponseFilter::new(selection, survey, *date_range)
        .filter_responses(responses)
        .into_iter()
        .cloned()
        .collect()
}
