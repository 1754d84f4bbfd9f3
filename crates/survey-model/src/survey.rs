//! Survey definitions.
//!
//! A survey is an ordered list of questions. Each question carries a type tag
//! that decides which answer shapes it produces and which filter operators
//! apply to it.

use serde::{Deserialize, Serialize};

/// Label of the catch-all choice that free-form answers are folded into.
pub const OTHER_CHOICE_LABEL: &str = "Other";

/// The kind of a survey question.
///
/// Serialized with the camelCase names used by the survey editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionType {
    /// Free text answer.
    OpenText,
    /// Exactly one choice out of a list.
    MultipleChoiceSingle,
    /// Any number of choices out of a list.
    MultipleChoiceMulti,
    /// Net promoter score, 0 to 10.
    Nps,
    /// Small numeric rating scale.
    Rating,
    /// Call to action: the respondent either clicks or dismisses.
    Cta,
    /// Consent: the respondent either accepts or dismisses.
    Consent,
}

impl QuestionType {
    /// Returns true for the two choice-list question types.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            QuestionType::MultipleChoiceSingle | QuestionType::MultipleChoiceMulti
        )
    }

    /// Returns true for the numeric scale question types (NPS and rating).
    pub fn is_scale(&self) -> bool {
        matches!(self, QuestionType::Nps | QuestionType::Rating)
    }

    /// Returns the wire name of this question type.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::OpenText => "openText",
            QuestionType::MultipleChoiceSingle => "multipleChoiceSingle",
            QuestionType::MultipleChoiceMulti => "multipleChoiceMulti",
            QuestionType::Nps => "nps",
            QuestionType::Rating => "rating",
            QuestionType::Cta => "cta",
            QuestionType::Consent => "consent",
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable choice of a choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// The ID of the choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The label shown to respondents and stored in answers.
    pub label: String,
}

impl Choice {
    /// Creates a choice with only a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: None,
            label: label.into(),
        }
    }
}

/// A single survey question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The ID of the question, used as the key in response data.
    pub id: String,

    /// The question type.
    #[serde(rename = "type")]
    pub question_type: QuestionType,

    /// The question text.
    #[serde(default)]
    pub headline: String,

    /// Declared choices, in display order. Empty for non-choice questions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
}

impl Question {
    /// Creates a question without choices.
    pub fn new(
        id: impl Into<String>,
        question_type: QuestionType,
        headline: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            question_type,
            headline: headline.into(),
            choices: Vec::new(),
        }
    }

    /// Sets the declared choices from a list of labels.
    pub fn with_choices<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = labels.into_iter().map(Choice::new).collect();
        self
    }

    /// Returns the declared choice labels in order.
    pub fn choice_labels(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(|c| c.label.as_str())
    }

    /// Returns true if the question declares an "Other" choice.
    pub fn has_other_choice(&self) -> bool {
        self.choice_labels().any(|l| l == OTHER_CHOICE_LABEL)
    }
}

/// A survey: an ordered sequence of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    /// The ID of the survey.
    pub id: String,

    /// The survey name.
    #[serde(default)]
    pub name: String,

    /// Questions in display order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Survey {
    /// Creates a survey from a list of questions.
    pub fn new(id: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            questions,
        }
    }

    /// Finds a question by ID.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}
