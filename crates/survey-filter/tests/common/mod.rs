//! Shared fixtures for the survey filter integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use survey_model_rs::prelude::*;

/// Survey with one question of every type.
pub fn full_survey() -> Survey {
    Survey::new(
        "survey-1",
        vec![
            Question::new("text", QuestionType::OpenText, "Anything else?"),
            Question::new("single", QuestionType::MultipleChoiceSingle, "Plan")
                .with_choices(["Free", "Pro"]),
            Question::new("multi", QuestionType::MultipleChoiceMulti, "Features")
                .with_choices(["Search", "Export", "Other"]),
            Question::new("nps", QuestionType::Nps, "Recommend us?"),
            Question::new("rating", QuestionType::Rating, "Rate us"),
            Question::new("cta", QuestionType::Cta, "Book a demo"),
            Question::new("consent", QuestionType::Consent, "Terms"),
        ],
    )
}

/// Noon UTC on the given day of March 2026.
pub fn march(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap()
}

/// Builder for test responses.
pub struct ResponseBuilder {
    response: Response,
}

impl ResponseBuilder {
    pub fn new(id: &str) -> Self {
        let mut response = Response::new(id, march(1));
        response.finished = true;
        Self { response }
    }

    pub fn answer(mut self, question_id: &str, value: impl Into<AnswerValue>) -> Self {
        self.response.data.insert(question_id.to_string(), value.into());
        self
    }

    pub fn unfinished(mut self) -> Self {
        self.response.finished = false;
        self
    }

    pub fn finished(mut self, finished: bool) -> Self {
        self.response.finished = finished;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.response.created_at = created_at;
        self
    }

    pub fn tag(mut self, name: &str) -> Self {
        self.response.tags.push(Tag::new(format!("tag-{name}"), name));
        self
    }

    pub fn attribute(mut self, name: &str, value: &str) -> Self {
        self.response
            .person_attributes
            .get_or_insert_with(BTreeMap::new)
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn build(self) -> Response {
        self.response
    }
}

/// Returns the IDs of the given responses, in order.
pub fn ids<'a>(responses: impl IntoIterator<Item = &'a Response>) -> Vec<String> {
    responses.into_iter().map(|r| r.id.clone()).collect()
}
