//! Survey responses and the tags applied to them.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Known attribute values per person attribute name.
///
/// Used to enumerate the values a respondent attribute can be filtered on.
pub type PersonAttributes = BTreeMap<String, Vec<String>>;

/// A single stored answer.
///
/// Answers are untyped on the wire; the shape depends on the question type.
/// Anything that is not a number, a string or a list of strings is kept as
/// raw JSON so that it can be treated as a type mismatch rather than
/// rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Numeric answer (NPS, rating).
    Number(f64),
    /// Text answer, or a sentinel such as `"dismissed"`.
    Text(String),
    /// Selected choice labels (multi-choice).
    Choices(Vec<String>),
    /// Any other JSON shape.
    Other(serde_json::Value),
}

impl AnswerValue {
    /// Sentinel stored when a consent question was accepted.
    pub const ACCEPTED: &'static str = "accepted";

    /// Sentinel stored when a question was dismissed.
    pub const DISMISSED: &'static str = "dismissed";

    /// Sentinel stored when a call to action was clicked.
    pub const CLICKED: &'static str = "clicked";

    /// Returns the answer as a string slice if it is a text answer.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the answer as a number if it is numeric.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the selected labels if the answer is a list of choices.
    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            AnswerValue::Choices(values) => Some(values),
            _ => None,
        }
    }

    /// Returns true if this is a text answer equal to `sentinel`.
    pub fn is_sentinel(&self, sentinel: &str) -> bool {
        self.as_text() == Some(sentinel)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

impl From<f64> for AnswerValue {
    fn from(value: f64) -> Self {
        AnswerValue::Number(value)
    }
}

impl From<i64> for AnswerValue {
    fn from(value: i64) -> Self {
        AnswerValue::Number(value as f64)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(values: Vec<String>) -> Self {
        AnswerValue::Choices(values)
    }
}

impl From<Vec<&str>> for AnswerValue {
    fn from(values: Vec<&str>) -> Self {
        AnswerValue::Choices(values.into_iter().map(String::from).collect())
    }
}

/// A tag defined at the environment level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// The ID of the tag.
    pub id: String,

    /// The tag name. Filters match tags by name.
    pub name: String,
}

impl Tag {
    /// Creates a new tag.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One respondent's submission to a survey.
///
/// A question ID present in `data` means the respondent answered it; a
/// missing key means the question was skipped or never shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// The ID of the response.
    pub id: String,

    /// The survey this response belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survey_id: Option<String>,

    /// When the response was created.
    pub created_at: DateTime<Utc>,

    /// When the response was last updated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Whether the respondent reached the end of the survey.
    #[serde(default)]
    pub finished: bool,

    /// Answers keyed by question ID.
    #[serde(default)]
    pub data: HashMap<String, AnswerValue>,

    /// Tags applied to this response.
    #[serde(default)]
    pub tags: Vec<Tag>,

    /// Externally supplied respondent attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_attributes: Option<BTreeMap<String, String>>,
}

impl Response {
    /// Creates an unfinished response without answers, tags or attributes.
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            survey_id: None,
            created_at,
            updated_at: None,
            finished: false,
            data: HashMap::new(),
            tags: Vec::new(),
            person_attributes: None,
        }
    }

    /// Returns the answer to a question, if the respondent answered it.
    pub fn answer(&self, question_id: &str) -> Option<&AnswerValue> {
        self.data.get(question_id)
    }

    /// Returns the names of all applied tags.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.name.as_str())
    }

    /// Returns true if a tag with the given name is applied.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tag_names().any(|t| t == name)
    }

    /// Returns a person attribute value by name.
    ///
    /// Returns `None` when the response carries no attribute map or the key
    /// is missing.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.person_attributes
            .as_ref()
            .and_then(|attrs| attrs.get(name))
            .map(String::as_str)
    }
}
