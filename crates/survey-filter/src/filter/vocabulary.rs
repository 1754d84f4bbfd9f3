//! Operator vocabulary shared by the normalizer and the evaluators.
//!
//! Selections arrive with the literal labels shown in the filter UI. This
//! module is the one place where those labels are recognized and turned into
//! typed predicates, and where each predicate is matched against an answer.
//! Everything downstream works on the typed form only.

use serde::{Deserialize, Serialize};
use survey_model_rs::response::{AnswerValue, Response};
use survey_model_rs::survey::{Question, QuestionType, Survey};
use tracing::debug;

use super::choices::normalize_choices;
use super::criteria::DataCriterion;
use super::selection::{FilterEntry, FilterPredicate, FilterTarget};

/// Operator and operand labels as they appear in a selection.
///
/// Matching is exact and case-sensitive.
pub mod labels {
    /// Fixed operator for targets whose meaning lives in the operand.
    pub const IS: &str = "is";
    /// Open text answered with something other than whitespace.
    pub const FILLED_OUT: &str = "Filled out";
    /// Question skipped.
    pub const SKIPPED: &str = "Skipped";
    /// Choice answer contains at least one of the values.
    pub const INCLUDES_EITHER: &str = "Includes either";
    /// Choice answer contains every value.
    pub const INCLUDES_ALL: &str = "Includes all";
    /// Scale answer equals the operand.
    pub const IS_EQUAL_TO: &str = "Is equal to";
    /// Scale answer is below the operand.
    pub const IS_LESS_THAN: &str = "Is less than";
    /// Scale answer is above the operand.
    pub const IS_MORE_THAN: &str = "Is more than";
    /// Scale question answered.
    pub const SUBMITTED: &str = "Submitted";
    /// Call to action clicked.
    pub const CLICKED: &str = "Clicked";
    /// Call to action or consent dismissed.
    pub const DISMISSED: &str = "Dismissed";
    /// Consent given.
    pub const ACCEPTED: &str = "Accepted";
    /// Tag applied to the response.
    pub const APPLIED: &str = "Applied";
    /// Tag not applied to the response.
    pub const NOT_APPLIED: &str = "Not applied";
    /// Attribute equals the operand.
    pub const EQUALS: &str = "Equals";
    /// Attribute differs from the operand.
    pub const NOT_EQUALS: &str = "Not equals";
}

/// Predicate on an open text answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextPredicate {
    /// A non-blank string was entered.
    FilledOut,
    /// Nothing, or only whitespace, was entered.
    Skipped,
}

impl TextPredicate {
    fn matches(&self, answer: Option<&AnswerValue>) -> bool {
        match (self, answer) {
            (TextPredicate::FilledOut, Some(answer)) => answer
                .as_text()
                .is_some_and(|text| !text.trim().is_empty()),
            (TextPredicate::FilledOut, None) => false,
            (TextPredicate::Skipped, Some(answer)) => {
                answer.as_text().is_some_and(|text| text.trim().is_empty())
            }
            (TextPredicate::Skipped, None) => true,
        }
    }
}

/// Predicate on a single or multi choice answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoicePredicate {
    /// At least one of the labels was selected.
    IncludesOne(Vec<String>),
    /// Every label was selected. Multi-choice only.
    IncludesAll(Vec<String>),
}

impl ChoicePredicate {
    fn matches(&self, question: &Question, answer: Option<&AnswerValue>) -> bool {
        let Some(answer) = answer else {
            return false;
        };

        match question.question_type {
            QuestionType::MultipleChoiceMulti => {
                let Some(selected) = answer.as_choices() else {
                    return true;
                };
                let selected = normalize_choices(question, selected);
                match self {
                    ChoicePredicate::IncludesAll(wanted) => {
                        wanted.iter().all(|w| selected.contains(w))
                    }
                    ChoicePredicate::IncludesOne(wanted) => {
                        wanted.iter().any(|w| selected.contains(w))
                    }
                }
            }
            QuestionType::MultipleChoiceSingle => match (self, answer.as_text()) {
                (ChoicePredicate::IncludesOne(wanted), Some(selected)) => {
                    wanted.iter().any(|w| w == selected)
                }
                _ => true,
            },
            _ => true,
        }
    }
}

/// Predicate on a numeric scale answer (NPS or rating).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalePredicate {
    /// Any answer was stored.
    Submitted,
    /// The question was explicitly dismissed.
    Skipped,
    /// The score equals the operand.
    Equals(i64),
    /// The score is below the operand.
    LessThan(i64),
    /// The score is above the operand.
    GreaterThan(i64),
}

impl ScalePredicate {
    fn matches(&self, answer: Option<&AnswerValue>) -> bool {
        let Some(answer) = answer else {
            return false;
        };

        let compare = |check: fn(f64, f64) -> bool, operand: i64| match answer.as_number() {
            Some(score) => check(score, operand as f64),
            None => true,
        };

        match *self {
            ScalePredicate::Submitted => true,
            ScalePredicate::Skipped => answer.is_sentinel(AnswerValue::DISMISSED),
            ScalePredicate::Equals(n) => compare(|a, b| a == b, n),
            ScalePredicate::LessThan(n) => compare(|a, b| a < b, n),
            ScalePredicate::GreaterThan(n) => compare(|a, b| a > b, n),
        }
    }
}

/// Predicate on a call-to-action answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtaPredicate {
    /// The button was clicked.
    Clicked,
    /// The prompt was dismissed.
    Dismissed,
}

/// Predicate on a consent answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentPredicate {
    /// Consent was given.
    Accepted,
    /// The prompt was dismissed.
    Dismissed,
}

/// A typed predicate on a single question, one variant family per question type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionPredicate {
    /// Open text.
    Text(TextPredicate),
    /// Single or multi choice.
    Choice(ChoicePredicate),
    /// NPS or rating.
    Scale(ScalePredicate),
    /// Call to action.
    Cta(CtaPredicate),
    /// Consent.
    Consent(ConsentPredicate),
}

impl QuestionPredicate {
    /// Recognizes the predicate labels for a question of the given type.
    ///
    /// Returns `None` for any combination the question type does not
    /// support, including unparsable numeric operands and empty choice lists.
    pub fn resolve(question_type: QuestionType, predicate: &FilterPredicate) -> Option<Self> {
        use labels::*;

        match question_type {
            QuestionType::OpenText => match predicate.operand_text()? {
                FILLED_OUT => Some(QuestionPredicate::Text(TextPredicate::FilledOut)),
                SKIPPED => Some(QuestionPredicate::Text(TextPredicate::Skipped)),
                _ => None,
            },
            QuestionType::MultipleChoiceSingle => match predicate.operator()? {
                INCLUDES_EITHER => {
                    let values = predicate.operand_list()?.to_vec();
                    Some(QuestionPredicate::Choice(ChoicePredicate::IncludesOne(values)))
                }
                _ => None,
            },
            QuestionType::MultipleChoiceMulti => {
                let operator = predicate.operator()?;
                let values = predicate.operand_list()?.to_vec();
                match operator {
                    INCLUDES_EITHER => {
                        Some(QuestionPredicate::Choice(ChoicePredicate::IncludesOne(values)))
                    }
                    INCLUDES_ALL => {
                        Some(QuestionPredicate::Choice(ChoicePredicate::IncludesAll(values)))
                    }
                    _ => None,
                }
            }
            QuestionType::Nps | QuestionType::Rating => {
                let scale = match predicate.operator()? {
                    SUBMITTED => ScalePredicate::Submitted,
                    SKIPPED => ScalePredicate::Skipped,
                    IS_EQUAL_TO => ScalePredicate::Equals(parse_score(predicate)?),
                    IS_LESS_THAN => ScalePredicate::LessThan(parse_score(predicate)?),
                    IS_MORE_THAN => ScalePredicate::GreaterThan(parse_score(predicate)?),
                    _ => return None,
                };
                Some(QuestionPredicate::Scale(scale))
            }
            QuestionType::Cta => match predicate.operand_text()? {
                CLICKED => Some(QuestionPredicate::Cta(CtaPredicate::Clicked)),
                DISMISSED => Some(QuestionPredicate::Cta(CtaPredicate::Dismissed)),
                _ => None,
            },
            QuestionType::Consent => match predicate.operand_text()? {
                ACCEPTED => Some(QuestionPredicate::Consent(ConsentPredicate::Accepted)),
                DISMISSED => Some(QuestionPredicate::Consent(ConsentPredicate::Dismissed)),
                _ => None,
            },
        }
    }

    /// Returns true if `answer` satisfies this predicate.
    ///
    /// `answer` is `None` when the respondent did not answer `question`.
    /// An answer of an unexpected shape satisfies every predicate that
    /// cannot interpret it.
    pub fn matches(&self, question: &Question, answer: Option<&AnswerValue>) -> bool {
        match self {
            QuestionPredicate::Text(p) => p.matches(answer),
            QuestionPredicate::Choice(p) => p.matches(question, answer),
            QuestionPredicate::Scale(p) => p.matches(answer),
            QuestionPredicate::Cta(p) => {
                let sentinel = match p {
                    CtaPredicate::Clicked => AnswerValue::CLICKED,
                    CtaPredicate::Dismissed => AnswerValue::DISMISSED,
                };
                answer.is_some_and(|a| a.is_sentinel(sentinel))
            }
            QuestionPredicate::Consent(p) => {
                let sentinel = match p {
                    ConsentPredicate::Accepted => AnswerValue::ACCEPTED,
                    ConsentPredicate::Dismissed => AnswerValue::DISMISSED,
                };
                answer.is_some_and(|a| a.is_sentinel(sentinel))
            }
        }
    }
}

/// Parses a scale operand as a base-10 integer.
fn parse_score(predicate: &FilterPredicate) -> Option<i64> {
    predicate.operand_text()?.trim().parse().ok()
}

/// Predicate on the tags applied to a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPredicate {
    /// The tag must be applied.
    Applied,
    /// The tag must not be applied.
    NotApplied,
}

impl TagPredicate {
    /// Recognizes a tag operand. "Applied" is the only label meaning
    /// applied; any other non-empty label means not applied.
    pub fn resolve(predicate: &FilterPredicate) -> Option<Self> {
        match predicate.operand_text()? {
            labels::APPLIED => Some(TagPredicate::Applied),
            _ => Some(TagPredicate::NotApplied),
        }
    }

    /// Returns true if a response with or without the tag satisfies this predicate.
    pub fn matches(&self, has_tag: bool) -> bool {
        match self {
            TagPredicate::Applied => has_tag,
            TagPredicate::NotApplied => !has_tag,
        }
    }
}

/// Predicate on a person attribute.
///
/// Serializes as `{"op": "equals" | "notEquals", "value": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum AttributePredicate {
    /// The attribute equals the value.
    Equals {
        /// The expected value.
        value: String,
    },
    /// The attribute is present and differs from the value.
    NotEquals {
        /// The rejected value.
        value: String,
    },
}

impl AttributePredicate {
    /// Recognizes "Equals" and "Not equals" with a string operand.
    pub fn resolve(predicate: &FilterPredicate) -> Option<Self> {
        let value = predicate.operand_text()?.to_string();
        match predicate.operator()? {
            labels::EQUALS => Some(AttributePredicate::Equals { value }),
            labels::NOT_EQUALS => Some(AttributePredicate::NotEquals { value }),
            _ => None,
        }
    }

    /// Returns true if the attribute value satisfies this predicate.
    ///
    /// A missing attribute never matches, for either operator.
    pub fn matches(&self, actual: Option<&str>) -> bool {
        let Some(actual) = actual else {
            return false;
        };
        match self {
            AttributePredicate::Equals { value } => actual == value,
            AttributePredicate::NotEquals { value } => actual != value,
        }
    }
}

/// A recognized filter entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    /// A constraint on one question's answer.
    Question {
        /// The question ID.
        id: String,
        /// The question type the predicate was resolved for.
        question_type: QuestionType,
        /// The predicate.
        predicate: QuestionPredicate,
    },
    /// A constraint on one tag.
    Tag {
        /// The tag name.
        label: String,
        /// The predicate.
        predicate: TagPredicate,
    },
    /// A constraint on one person attribute.
    Attribute {
        /// The attribute name.
        name: String,
        /// The predicate.
        predicate: AttributePredicate,
    },
}

impl Criterion {
    /// Recognizes a filter entry.
    ///
    /// Returns `None` when the entry does not map onto a known operator for
    /// its target; such entries impose no constraint.
    pub fn from_entry(entry: &FilterEntry) -> Option<Self> {
        let criterion = match &entry.target {
            FilterTarget::Question {
                id, question_type, ..
            } if !id.is_empty() => QuestionPredicate::resolve(*question_type, &entry.predicate)
                .map(|predicate| Criterion::Question {
                    id: id.clone(),
                    question_type: *question_type,
                    predicate,
                }),
            FilterTarget::Tag { label, .. } if !label.is_empty() => {
                TagPredicate::resolve(&entry.predicate).map(|predicate| Criterion::Tag {
                    label: label.clone(),
                    predicate,
                })
            }
            FilterTarget::Attribute { label, .. } if !label.is_empty() => {
                AttributePredicate::resolve(&entry.predicate).map(|predicate| {
                    Criterion::Attribute {
                        name: label.clone(),
                        predicate,
                    }
                })
            }
            _ => None,
        };

        if criterion.is_none() {
            debug!(
                target_kind = entry.target.kind(),
                operator = ?entry.predicate.operator,
                operand = ?entry.predicate.operand,
                "dropping unrecognized filter entry"
            );
        }
        criterion
    }

    /// Returns true if `response` satisfies this criterion.
    ///
    /// A question criterion fails when the survey has no question with that
    /// ID. When the survey's question type differs from the one the entry
    /// declared, the predicate is reinterpreted for the survey's type the
    /// same way stored criteria are, and fails if that type has no such
    /// operator.
    pub fn matches(&self, survey: &Survey, response: &Response) -> bool {
        match self {
            Criterion::Question {
                id,
                question_type,
                predicate,
            } => {
                let Some(question) = survey.question(id) else {
                    return false;
                };
                let answer = response.answer(id);
                if question.question_type == *question_type {
                    return predicate.matches(question, answer);
                }
                DataCriterion::from(predicate)
                    .to_predicate(question.question_type)
                    .is_some_and(|predicate| predicate.matches(question, answer))
            }
            Criterion::Tag { label, predicate } => predicate.matches(response.has_tag(label)),
            Criterion::Attribute { name, predicate } => {
                predicate.matches(response.attribute(name))
            }
        }
    }
}

impl FilterTarget {
    /// Short name of the target kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            FilterTarget::Question { .. } => "question",
            FilterTarget::Tag { .. } => "tag",
            FilterTarget::Attribute { .. } => "attribute",
        }
    }
}
