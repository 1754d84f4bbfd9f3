//! Filter selections as produced by the response view.
//!
//! A selection is deliberately loosely typed: operators and operands are the
//! literal labels shown in the filter dropdowns. The [`vocabulary`] module
//! turns them into typed predicates.
//!
//! The serde names follow the shape the web client sends
//! (`questionType`/`filterType`, `filterValue`/`filterComboBoxValue`).
//!
//! [`vocabulary`]: super::vocabulary

use serde::{Deserialize, Serialize};
use survey_model_rs::survey::QuestionType;

/// The full set of filters picked by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    /// Filter entries in the order they were added.
    #[serde(default)]
    pub filter: Vec<FilterEntry>,

    /// Keep only finished responses.
    #[serde(default)]
    pub only_complete: bool,
}

impl FilterSelection {
    /// Creates a selection from a list of entries.
    pub fn new(filter: Vec<FilterEntry>) -> Self {
        Self {
            filter,
            only_complete: false,
        }
    }

    /// Sets the completion flag.
    pub fn with_only_complete(mut self, only_complete: bool) -> Self {
        self.only_complete = only_complete;
        self
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: FilterEntry) {
        self.filter.push(entry);
    }

    /// Returns true if no entries are selected and the completion flag is unset.
    pub fn is_empty(&self) -> bool {
        self.filter.is_empty() && !self.only_complete
    }
}

/// One selected filter: what it applies to and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterEntry {
    /// The question, tag or attribute being filtered.
    #[serde(rename = "questionType", alias = "target")]
    pub target: FilterTarget,

    /// The chosen operator and operand.
    #[serde(rename = "filterType", alias = "predicate")]
    pub predicate: FilterPredicate,
}

impl FilterEntry {
    /// Creates a question filter entry.
    pub fn question(
        id: impl Into<String>,
        question_type: QuestionType,
        operator: Option<&str>,
        operand: Option<Operand>,
    ) -> Self {
        Self {
            target: FilterTarget::Question {
                id: id.into(),
                label: String::new(),
                question_type,
            },
            predicate: FilterPredicate::new(operator, operand),
        }
    }

    /// Creates a tag filter entry. `operand` is "Applied" or "Not applied".
    pub fn tag(label: impl Into<String>, operand: &str) -> Self {
        let label = label.into();
        Self {
            target: FilterTarget::Tag {
                id: label.clone(),
                label,
            },
            predicate: FilterPredicate::new(Some("is"), Some(Operand::from(operand))),
        }
    }

    /// Creates a person attribute filter entry.
    pub fn attribute(name: impl Into<String>, operator: &str, value: &str) -> Self {
        let name = name.into();
        Self {
            target: FilterTarget::Attribute {
                id: name.clone(),
                label: name,
            },
            predicate: FilterPredicate::new(Some(operator), Some(Operand::from(value))),
        }
    }
}

/// What a filter entry applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FilterTarget {
    /// A survey question.
    #[serde(rename = "Questions")]
    Question {
        /// The question ID.
        id: String,
        /// The question headline.
        #[serde(default)]
        label: String,
        /// The question type as known to the selection UI.
        #[serde(rename = "questionType")]
        question_type: QuestionType,
    },

    /// An environment tag, matched by its label.
    #[serde(rename = "Tags")]
    Tag {
        /// The tag ID.
        id: String,
        /// The tag name.
        label: String,
    },

    /// A person attribute, matched by its label.
    #[serde(rename = "Attributes")]
    Attribute {
        /// The attribute key.
        id: String,
        /// The attribute name.
        label: String,
    },
}

/// Operator and operand labels of a filter entry.
///
/// Which field carries the meaningful label depends on the target: choice
/// and scale questions and attributes put it in `operator`; open text, call
/// to action, consent and tags use the fixed operator "is" and put it in
/// `operand`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPredicate {
    /// The operator label (e.g. "Is more than").
    #[serde(
        rename = "filterValue",
        alias = "operator",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub operator: Option<String>,

    /// The operand (e.g. "5", or a list of choice labels).
    #[serde(
        rename = "filterComboBoxValue",
        alias = "operand",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub operand: Option<Operand>,
}

impl FilterPredicate {
    /// Creates a predicate from optional operator and operand labels.
    pub fn new(operator: Option<&str>, operand: Option<Operand>) -> Self {
        Self {
            operator: operator.map(String::from),
            operand,
        }
    }

    /// Returns the operator label, if any.
    pub fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }

    /// Returns the operand if it is a non-empty string.
    pub fn operand_text(&self) -> Option<&str> {
        self.operand.as_ref().and_then(Operand::as_text)
    }

    /// Returns the operand if it is a non-empty list.
    pub fn operand_list(&self) -> Option<&[String]> {
        self.operand.as_ref().and_then(Operand::as_list)
    }
}

/// A filter operand: a single label or a list of labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    /// A single label.
    Text(String),
    /// A list of labels (choice filters).
    List(Vec<String>),
}

impl Operand {
    /// Returns the label if this is a non-empty single label.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Operand::Text(s) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// Returns the labels if this is a non-empty list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Operand::List(values) if !values.is_empty() => Some(values),
            _ => None,
        }
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Text(value.to_string())
    }
}

impl From<Vec<&str>> for Operand {
    fn from(values: Vec<&str>) -> Self {
        Operand::List(values.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for Operand {
    fn from(values: Vec<String>) -> Self {
        Operand::List(values)
    }
}
