//! Enumeration of what a survey's responses can be filtered on.
//!
//! The response view offers three groups of targets (questions, tags and
//! person attributes) and, for each target, the operators and operand values
//! it accepts. [`generate_filter_options`] builds both lists from a survey,
//! the environment's tags and the known attribute values.

use serde::Serialize;
use survey_model_rs::response::{PersonAttributes, Tag};
use survey_model_rs::survey::{QuestionType, Survey};

use crate::filter::labels;

/// Rating scale values offered as operands.
const RATING_VALUES: &[&str] = &["1", "2", "3", "4", "5"];

/// NPS values offered as operands.
const NPS_VALUES: &[&str] = &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10"];

/// Scale operators, shared by NPS and rating.
const SCALE_OPERATORS: &[&str] = &[
    labels::IS_EQUAL_TO,
    labels::IS_LESS_THAN,
    labels::IS_MORE_THAN,
    labels::SUBMITTED,
    labels::SKIPPED,
];

/// The group a filter target belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OptionsType {
    /// Survey questions.
    Questions,
    /// Environment tags.
    Tags,
    /// Person attributes.
    Attributes,
}

/// A selectable filter target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOption {
    /// Display label: question headline, tag name or attribute name.
    pub label: String,

    /// The question type, for question targets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_type: Option<QuestionType>,

    /// The target group.
    #[serde(rename = "type")]
    pub option_type: OptionsType,

    /// Question ID, tag ID or attribute name.
    pub id: String,
}

/// A titled group of filter targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionGroup {
    /// The group.
    pub header: OptionsType,
    /// The targets in this group.
    pub option: Vec<FilterOption>,
}

/// What a target's operator/operand lists apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterOptionKind {
    /// A question of the given type.
    Question(QuestionType),
    /// A tag or attribute target.
    Group(OptionsType),
}

/// Operators and operand values available for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionFilterOptions {
    /// What the target is.
    #[serde(rename = "type")]
    pub kind: FilterOptionKind,

    /// Operator labels.
    pub filter_options: Vec<String>,

    /// Operand labels.
    pub filter_combo_box_options: Vec<String>,

    /// Question ID, tag ID or attribute name.
    pub id: String,
}

/// Everything the filter UI needs to offer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Targets grouped by kind.
    pub question_options: Vec<OptionGroup>,
    /// Operators and operands per target.
    pub question_filter_options: Vec<QuestionFilterOptions>,
}

/// Returns the operator labels offered for a question type.
pub fn operators_for(question_type: QuestionType) -> &'static [&'static str] {
    match question_type {
        QuestionType::OpenText | QuestionType::Cta | QuestionType::Consent => &[labels::IS],
        QuestionType::MultipleChoiceSingle => &[labels::INCLUDES_EITHER],
        QuestionType::MultipleChoiceMulti => &[labels::INCLUDES_ALL, labels::INCLUDES_EITHER],
        QuestionType::Nps | QuestionType::Rating => SCALE_OPERATORS,
    }
}

/// Returns the fixed operand labels offered for a question type.
///
/// Choice questions have no fixed operands; their choice labels are used
/// instead.
fn fixed_operands_for(question_type: QuestionType) -> &'static [&'static str] {
    match question_type {
        QuestionType::OpenText => &[labels::FILLED_OUT, labels::SKIPPED],
        QuestionType::Rating => RATING_VALUES,
        QuestionType::Nps => NPS_VALUES,
        QuestionType::Cta => &[labels::CLICKED, labels::DISMISSED],
        QuestionType::Consent => &[labels::ACCEPTED, labels::DISMISSED],
        QuestionType::MultipleChoiceSingle | QuestionType::MultipleChoiceMulti => &[],
    }
}

fn owned(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}

/// Builds the filter targets and their operator/operand lists.
///
/// The question group is always present. The tag group is added only when
/// at least one tag exists; the attribute group whenever attributes are
/// supplied.
pub fn generate_filter_options(
    survey: &Survey,
    tags: &[Tag],
    attributes: Option<&PersonAttributes>,
) -> FilterOptions {
    let mut options = FilterOptions::default();

    let question_targets = survey
        .questions
        .iter()
        .map(|q| FilterOption {
            label: q.headline.clone(),
            question_type: Some(q.question_type),
            option_type: OptionsType::Questions,
            id: q.id.clone(),
        })
        .collect();
    options.question_options.push(OptionGroup {
        header: OptionsType::Questions,
        option: question_targets,
    });

    for question in &survey.questions {
        let operands = if question.question_type.is_choice() {
            let labels: Vec<String> = question.choice_labels().map(String::from).collect();
            // The filter UI expects at least one (blank) entry.
            if labels.is_empty() {
                vec![String::new()]
            } else {
                labels
            }
        } else {
            owned(fixed_operands_for(question.question_type))
        };
        options.question_filter_options.push(QuestionFilterOptions {
            kind: FilterOptionKind::Question(question.question_type),
            filter_options: owned(operators_for(question.question_type)),
            filter_combo_box_options: operands,
            id: question.id.clone(),
        });
    }

    if !tags.is_empty() {
        options.question_options.push(OptionGroup {
            header: OptionsType::Tags,
            option: tags
                .iter()
                .map(|t| FilterOption {
                    label: t.name.clone(),
                    question_type: None,
                    option_type: OptionsType::Tags,
                    id: t.id.clone(),
                })
                .collect(),
        });
        for tag in tags {
            options.question_filter_options.push(QuestionFilterOptions {
                kind: FilterOptionKind::Group(OptionsType::Tags),
                filter_options: owned(&[labels::IS]),
                filter_combo_box_options: owned(&[labels::APPLIED, labels::NOT_APPLIED]),
                id: tag.id.clone(),
            });
        }
    }

    if let Some(attributes) = attributes {
        options.question_options.push(OptionGroup {
            header: OptionsType::Attributes,
            option: attributes
                .keys()
                .map(|name| FilterOption {
                    label: name.clone(),
                    question_type: None,
                    option_type: OptionsType::Attributes,
                    id: name.clone(),
                })
                .collect(),
        });
        for (name, values) in attributes {
            options.question_filter_options.push(QuestionFilterOptions {
                kind: FilterOptionKind::Group(OptionsType::Attributes),
                filter_options: owned(&[labels::EQUALS, labels::NOT_EQUALS]),
                filter_combo_box_options: values.clone(),
                id: name.clone(),
            });
        }
    }

    options
}
