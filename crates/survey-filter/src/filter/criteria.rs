//! Normalized filter criteria for backend queries.
//!
//! [`normalize`] turns a [`FilterSelection`] into a [`ResponseFilterCriteria`]:
//! a declarative structure keyed by question ID, tag name and attribute name
//! that serializes straight into a query body.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use survey_model_rs::survey::QuestionType;
use tracing::trace;

use super::dates::DateRange;
use super::selection::FilterSelection;
use super::vocabulary::{
    AttributePredicate, ChoicePredicate, ConsentPredicate, Criterion, CtaPredicate,
    QuestionPredicate, ScalePredicate, TagPredicate, TextPredicate,
};

/// Canonical criteria for an entire filter selection.
///
/// Every present key comes from at least one recognized filter entry;
/// absent keys mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseFilterCriteria {
    /// Only finished responses. Never `Some(false)` when produced by [`normalize`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_complete: Option<bool>,

    /// Creation date window, bounds inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<CreatedAtCriterion>,

    /// Tag constraints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagCriteria>,

    /// Answer constraints keyed by question ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, DataCriterion>>,

    /// Person attribute constraints keyed by attribute name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_attributes: Option<BTreeMap<String, AttributePredicate>>,
}

impl ResponseFilterCriteria {
    /// Returns true if the criteria constrain nothing.
    pub fn is_empty(&self) -> bool {
        self.only_complete != Some(true)
            && self.created_at.is_none()
            && self.tags.is_none()
            && self.data.is_none()
            && self.person_attributes.is_none()
    }
}

/// Creation date bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedAtCriterion {
    /// Inclusive lower bound.
    pub min: DateTime<Utc>,
    /// Inclusive upper bound.
    pub max: DateTime<Utc>,
}

/// Tags that must and must not be applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCriteria {
    /// Tag names that must be applied.
    #[serde(default)]
    pub applied: Vec<String>,

    /// Tag names that must not be applied.
    #[serde(default)]
    pub not_applied: Vec<String>,
}

impl TagCriteria {
    /// Records a tag constraint, replacing any earlier one for the same name.
    fn insert(&mut self, label: String, predicate: TagPredicate) {
        self.applied.retain(|l| *l != label);
        self.not_applied.retain(|l| *l != label);
        match predicate {
            TagPredicate::Applied => self.applied.push(label),
            TagPredicate::NotApplied => self.not_applied.push(label),
        }
    }
}

/// Constraint on one question's answer.
///
/// Serializes as `{"op": ..., "value": ...}`; `value` is only present for
/// operators that take one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DataCriterion {
    /// Answered (open text: non-blank; scale: any value).
    Submitted,
    /// Skipped or dismissed.
    Skipped,
    /// At least one of the choices selected.
    IncludesOne {
        /// Choice labels.
        value: Vec<String>,
    },
    /// All of the choices selected.
    IncludesAll {
        /// Choice labels.
        value: Vec<String>,
    },
    /// Score equals the value.
    Equals {
        /// The score.
        value: i64,
    },
    /// Score below the value.
    LessThan {
        /// The score.
        value: i64,
    },
    /// Score above the value.
    GreaterThan {
        /// The score.
        value: i64,
    },
    /// Call to action clicked.
    Clicked,
    /// Consent accepted.
    Accepted,
}

impl From<&QuestionPredicate> for DataCriterion {
    fn from(predicate: &QuestionPredicate) -> Self {
        match predicate {
            QuestionPredicate::Text(TextPredicate::FilledOut) => DataCriterion::Submitted,
            QuestionPredicate::Text(TextPredicate::Skipped) => DataCriterion::Skipped,
            QuestionPredicate::Choice(ChoicePredicate::IncludesOne(value)) => {
                DataCriterion::IncludesOne {
                    value: value.clone(),
                }
            }
            QuestionPredicate::Choice(ChoicePredicate::IncludesAll(value)) => {
                DataCriterion::IncludesAll {
                    value: value.clone(),
                }
            }
            QuestionPredicate::Scale(scale) => match *scale {
                ScalePredicate::Submitted => DataCriterion::Submitted,
                ScalePredicate::Skipped => DataCriterion::Skipped,
                ScalePredicate::Equals(value) => DataCriterion::Equals { value },
                ScalePredicate::LessThan(value) => DataCriterion::LessThan { value },
                ScalePredicate::GreaterThan(value) => DataCriterion::GreaterThan { value },
            },
            QuestionPredicate::Cta(CtaPredicate::Clicked) => DataCriterion::Clicked,
            QuestionPredicate::Cta(CtaPredicate::Dismissed) => DataCriterion::Skipped,
            QuestionPredicate::Consent(ConsentPredicate::Accepted) => DataCriterion::Accepted,
            QuestionPredicate::Consent(ConsentPredicate::Dismissed) => DataCriterion::Skipped,
        }
    }
}

impl DataCriterion {
    /// Interprets this criterion for a question of the given type.
    ///
    /// `skipped` means something different per type, so the question type
    /// is needed to recover the typed predicate. Returns `None` for
    /// combinations the type does not support.
    pub fn to_predicate(&self, question_type: QuestionType) -> Option<QuestionPredicate> {
        use QuestionType::*;

        let predicate = match (question_type, self) {
            (OpenText, DataCriterion::Submitted) => QuestionPredicate::Text(TextPredicate::FilledOut),
            (OpenText, DataCriterion::Skipped) => QuestionPredicate::Text(TextPredicate::Skipped),

            (MultipleChoiceSingle | MultipleChoiceMulti, DataCriterion::IncludesOne { value })
                if !value.is_empty() =>
            {
                QuestionPredicate::Choice(ChoicePredicate::IncludesOne(value.clone()))
            }
            (MultipleChoiceMulti, DataCriterion::IncludesAll { value }) if !value.is_empty() => {
                QuestionPredicate::Choice(ChoicePredicate::IncludesAll(value.clone()))
            }

            (Nps | Rating, DataCriterion::Submitted) => {
                QuestionPredicate::Scale(ScalePredicate::Submitted)
            }
            (Nps | Rating, DataCriterion::Skipped) => QuestionPredicate::Scale(ScalePredicate::Skipped),
            (Nps | Rating, DataCriterion::Equals { value }) => {
                QuestionPredicate::Scale(ScalePredicate::Equals(*value))
            }
            (Nps | Rating, DataCriterion::LessThan { value }) => {
                QuestionPredicate::Scale(ScalePredicate::LessThan(*value))
            }
            (Nps | Rating, DataCriterion::GreaterThan { value }) => {
                QuestionPredicate::Scale(ScalePredicate::GreaterThan(*value))
            }

            (Cta, DataCriterion::Clicked) => QuestionPredicate::Cta(CtaPredicate::Clicked),
            (Cta, DataCriterion::Skipped) => QuestionPredicate::Cta(CtaPredicate::Dismissed),

            (Consent, DataCriterion::Accepted) => {
                QuestionPredicate::Consent(ConsentPredicate::Accepted)
            }
            (Consent, DataCriterion::Skipped) => {
                QuestionPredicate::Consent(ConsentPredicate::Dismissed)
            }

            _ => return None,
        };
        Some(predicate)
    }
}

/// Builds normalized criteria from a selection and a date range.
///
/// Entries that do not map onto a known operator are left out. When several
/// entries target the same question, tag or attribute, the last one wins.
/// The date range is included only when both bounds are set.
pub fn normalize(selection: &FilterSelection, date_range: &DateRange) -> ResponseFilterCriteria {
    let mut criteria = ResponseFilterCriteria::default();

    if selection.only_complete {
        criteria.only_complete = Some(true);
    }

    if let Some((min, max)) = date_range.bounds() {
        criteria.created_at = Some(CreatedAtCriterion { min, max });
    }

    for criterion in selection.filter.iter().filter_map(Criterion::from_entry) {
        trace!(?criterion, "normalizing criterion");
        match criterion {
            Criterion::Question { id, predicate, .. } => {
                criteria
                    .data
                    .get_or_insert_with(BTreeMap::new)
                    .insert(id, DataCriterion::from(&predicate));
            }
            Criterion::Tag { label, predicate } => {
                criteria
                    .tags
                    .get_or_insert_with(TagCriteria::default)
                    .insert(label, predicate);
            }
            Criterion::Attribute { name, predicate } => {
                criteria
                    .person_attributes
                    .get_or_insert_with(BTreeMap::new)
                    .insert(name, predicate);
            }
        }
    }

    criteria
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::selection::{FilterEntry, FilterPredicate, Operand};

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_empty_selection_yields_empty_criteria() {
        let criteria = normalize(&FilterSelection::default(), &DateRange::default());
        assert!(criteria.is_empty());
        assert_eq!(serde_json::to_value(&criteria).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_only_complete_absent_when_unset() {
        let criteria = normalize(&FilterSelection::default(), &DateRange::default());
        assert_eq!(criteria.only_complete, None);

        let criteria = normalize(
            &FilterSelection::default().with_only_complete(true),
            &DateRange::default(),
        );
        assert_eq!(criteria.only_complete, Some(true));
    }

    #[test]
    fn test_date_range_requires_both_bounds() {
        let from = ts("2026-01-01T00:00:00Z");
        let to = ts("2026-01-31T00:00:00Z");

        let partial = normalize(&FilterSelection::default(), &DateRange::new(Some(from), None));
        assert!(partial.created_at.is_none());

        let full = normalize(&FilterSelection::default(), &DateRange::between(from, to));
        assert_eq!(full.created_at, Some(CreatedAtCriterion { min: from, max: to }));
    }

    #[test]
    fn test_tags_partitioned_by_operand() {
        let selection = FilterSelection::new(vec![
            FilterEntry::tag("vip", "Applied"),
            FilterEntry::tag("spam", "Not applied"),
            FilterEntry::tag("later", "Whatever"),
        ]);
        let criteria = normalize(&selection, &DateRange::default());
        let tags = criteria.tags.unwrap();

        assert_eq!(tags.applied, vec!["vip"]);
        assert_eq!(tags.not_applied, vec!["spam", "later"]);
    }

    #[test]
    fn test_tag_without_operand_is_dropped() {
        let mut bare = FilterEntry::tag("vip", "Applied");
        bare.predicate = FilterPredicate::new(Some("is"), None);

        let alone = normalize(&FilterSelection::new(vec![bare.clone()]), &DateRange::default());
        assert!(alone.tags.is_none());
        assert!(alone.is_empty());

        let selection = FilterSelection::new(vec![FilterEntry::tag("spam", "Not applied"), bare]);
        let tags = normalize(&selection, &DateRange::default()).tags.unwrap();
        assert!(tags.applied.is_empty());
        assert_eq!(tags.not_applied, vec!["spam"]);
    }

    #[test]
    fn test_duplicate_tag_last_wins() {
        let selection = FilterSelection::new(vec![
            FilterEntry::tag("vip", "Applied"),
            FilterEntry::tag("vip", "Not applied"),
        ]);
        let tags = normalize(&selection, &DateRange::default()).tags.unwrap();

        assert!(tags.applied.is_empty());
        assert_eq!(tags.not_applied, vec!["vip"]);
    }

    #[test]
    fn test_question_operator_table() {
        let selection = FilterSelection::new(vec![
            FilterEntry::question("text", QuestionType::OpenText, Some("is"), Some("Filled out".into())),
            FilterEntry::question(
                "multi",
                QuestionType::MultipleChoiceMulti,
                Some("Includes all"),
                Some(Operand::from(vec!["A", "B"])),
            ),
            FilterEntry::question(
                "single",
                QuestionType::MultipleChoiceSingle,
                Some("Includes either"),
                Some(Operand::from(vec!["A"])),
            ),
            FilterEntry::question("nps", QuestionType::Nps, Some("Is less than"), Some("7".into())),
            FilterEntry::question("rating", QuestionType::Rating, Some("Skipped"), None),
            FilterEntry::question("cta", QuestionType::Cta, Some("is"), Some("Dismissed".into())),
            FilterEntry::question("consent", QuestionType::Consent, Some("is"), Some("Accepted".into())),
        ]);
        let criteria = normalize(&selection, &DateRange::default());

        assert_eq!(
            serde_json::to_value(&criteria).unwrap(),
            serde_json::json!({
                "data": {
                    "text": {"op": "submitted"},
                    "multi": {"op": "includesAll", "value": ["A", "B"]},
                    "single": {"op": "includesOne", "value": ["A"]},
                    "nps": {"op": "lessThan", "value": 7},
                    "rating": {"op": "skipped"},
                    "cta": {"op": "skipped"},
                    "consent": {"op": "accepted"}
                }
            })
        );
    }

    #[test]
    fn test_unrecognized_entries_produce_no_keys() {
        let selection = FilterSelection::new(vec![
            FilterEntry::question("nps", QuestionType::Nps, Some("Is equal to"), Some("ten".into())),
            FilterEntry::question("text", QuestionType::OpenText, Some("is"), Some("Dismissed".into())),
            FilterEntry::attribute("plan", "Contains", "pro"),
        ]);
        let criteria = normalize(&selection, &DateRange::default());

        assert!(criteria.data.is_none());
        assert!(criteria.person_attributes.is_none());
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_attributes_keyed_by_label() {
        let selection = FilterSelection::new(vec![
            FilterEntry::attribute("plan", "Equals", "pro"),
            FilterEntry::attribute("country", "Not equals", "DE"),
        ]);
        let criteria = normalize(&selection, &DateRange::default());

        assert_eq!(
            serde_json::to_value(&criteria).unwrap(),
            serde_json::json!({
                "personAttributes": {
                    "plan": {"op": "equals", "value": "pro"},
                    "country": {"op": "notEquals", "value": "DE"}
                }
            })
        );
    }

    #[test]
    fn test_duplicate_question_last_wins() {
        let selection = FilterSelection::new(vec![
            FilterEntry::question("nps", QuestionType::Nps, Some("Is more than"), Some("5".into())),
            FilterEntry::question("nps", QuestionType::Nps, Some("Is less than"), Some("9".into())),
        ]);
        let data = normalize(&selection, &DateRange::default()).data.unwrap();

        assert_eq!(data.len(), 1);
        assert_eq!(data["nps"], DataCriterion::LessThan { value: 9 });
    }

    #[test]
    fn test_to_predicate_inverts_from() {
        let cases = [
            (QuestionType::OpenText, QuestionPredicate::Text(TextPredicate::Skipped)),
            (QuestionType::Cta, QuestionPredicate::Cta(CtaPredicate::Dismissed)),
            (QuestionType::Consent, QuestionPredicate::Consent(ConsentPredicate::Dismissed)),
            (QuestionType::Nps, QuestionPredicate::Scale(ScalePredicate::Skipped)),
            (QuestionType::Rating, QuestionPredicate::Scale(ScalePredicate::GreaterThan(3))),
            (
                QuestionType::MultipleChoiceMulti,
                QuestionPredicate::Choice(ChoicePredicate::IncludesAll(vec!["A".to_string()])),
            ),
        ];

        for (qt, predicate) in cases {
            let criterion = DataCriterion::from(&predicate);
            assert_eq!(criterion.to_predicate(qt), Some(predicate), "{qt}");
        }
    }

    #[test]
    fn test_to_predicate_rejects_foreign_ops() {
        assert_eq!(DataCriterion::Clicked.to_predicate(QuestionType::Consent), None);
        assert_eq!(
            DataCriterion::IncludesAll {
                value: vec!["A".to_string()]
            }
            .to_predicate(QuestionType::MultipleChoiceSingle),
            None
        );
        assert_eq!(
            DataCriterion::Equals { value: 1 }.to_predicate(QuestionType::OpenText),
            None
        );
    }

    #[test]
    fn test_criteria_deserialize() {
        let json = r#"{
            "onlyComplete": true,
            "createdAt": {"min": "2026-01-01T00:00:00Z", "max": "2026-02-01T00:00:00Z"},
            "tags": {"applied": ["vip"], "notApplied": []},
            "data": {"q1": {"op": "greaterThan", "value": 5}}
        }"#;
        let criteria: ResponseFilterCriteria = serde_json::from_str(json).unwrap();

        assert_eq!(criteria.only_complete, Some(true));
        assert_eq!(
            criteria.data.unwrap()["q1"],
            DataCriterion::GreaterThan { value: 5 }
        );
        assert_eq!(criteria.tags.unwrap().applied, vec!["vip"]);
    }
}
