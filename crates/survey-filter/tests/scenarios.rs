//! Scenario tests for filtering survey responses end to end.

mod common;

use chrono::Duration;
use common::{full_survey, ids, march, ResponseBuilder};
use survey_filter_rs::filter::{
    evaluate, normalize, CriteriaEvaluator, DateRange, FilterEntry, FilterSelection, Operand,
};
use survey_model_rs::prelude::*;

// ============================================================================
// NPS scenario
// ============================================================================

fn nps_survey() -> Survey {
    Survey::new("nps-survey", vec![Question::new("Q1", QuestionType::Nps, "Recommend us?")])
}

fn nps_responses() -> Vec<Response> {
    vec![
        ResponseBuilder::new("R1")
            .answer("Q1", 9i64)
            .tag("vip")
            .attribute("plan", "pro")
            .build(),
        ResponseBuilder::new("R2").answer("Q1", 3i64).unfinished().build(),
        ResponseBuilder::new("R3").build(),
    ]
}

#[test]
fn test_nps_more_than_five() {
    let selection = FilterSelection::new(vec![FilterEntry::question(
        "Q1",
        QuestionType::Nps,
        Some("Is more than"),
        Some("5".into()),
    )]);

    let result = evaluate(&nps_responses(), &selection, &nps_survey(), &DateRange::default());

    assert_eq!(ids(&result), vec!["R1"]);
}

#[test]
fn test_nps_skipped_without_sentinel_matches_nothing() {
    let selection = FilterSelection::new(vec![FilterEntry::question(
        "Q1",
        QuestionType::Nps,
        Some("Skipped"),
        None,
    )]);

    let result = evaluate(&nps_responses(), &selection, &nps_survey(), &DateRange::default());

    assert!(result.is_empty());
}

#[test]
fn test_only_complete_without_predicates() {
    let selection = FilterSelection::default().with_only_complete(true);

    let result = evaluate(&nps_responses(), &selection, &nps_survey(), &DateRange::default());

    assert_eq!(ids(&result), vec!["R1", "R3"]);
}

#[test]
fn test_tag_not_applied() {
    let selection = FilterSelection::new(vec![FilterEntry::tag("vip", "Not applied")]);

    let result = evaluate(&nps_responses(), &selection, &nps_survey(), &DateRange::default());

    assert_eq!(ids(&result), vec!["R2", "R3"]);
}

#[test]
fn test_attribute_equals_excludes_missing_key() {
    let selection = FilterSelection::new(vec![FilterEntry::attribute("plan", "Equals", "pro")]);

    let result = evaluate(&nps_responses(), &selection, &nps_survey(), &DateRange::default());

    assert_eq!(ids(&result), vec!["R1"]);
}

#[test]
fn test_nps_scenario_through_criteria() {
    let survey = nps_survey();
    let responses = nps_responses();
    let selection = FilterSelection::new(vec![
        FilterEntry::question("Q1", QuestionType::Nps, Some("Is more than"), Some("5".into())),
        FilterEntry::tag("vip", "Applied"),
    ])
    .with_only_complete(true);

    let criteria = normalize(&selection, &DateRange::default());
    let via_criteria = CriteriaEvaluator::new(&criteria, &survey).filter_responses(&responses);
    let direct = evaluate(&responses, &selection, &survey, &DateRange::default());

    assert_eq!(ids(via_criteria), ids(&direct));
    assert_eq!(ids(&direct), vec!["R1"]);
}

// ============================================================================
// Choice normalization
// ============================================================================

#[test]
fn test_other_remap_matches_other_filter() {
    let survey = Survey::new(
        "s",
        vec![Question::new("q", QuestionType::MultipleChoiceMulti, "Pick").with_choices(["A", "Other"])],
    );
    let responses = vec![
        ResponseBuilder::new("typed").answer("q", vec!["Z"]).build(),
        ResponseBuilder::new("a").answer("q", vec!["A"]).build(),
    ];
    let selection = FilterSelection::new(vec![FilterEntry::question(
        "q",
        QuestionType::MultipleChoiceMulti,
        Some("Includes either"),
        Some(Operand::from(vec!["Other"])),
    )]);

    let result = evaluate(&responses, &selection, &survey, &DateRange::default());

    assert_eq!(ids(&result), vec!["typed"]);
    // The stored answer is untouched.
    assert_eq!(
        responses[0].answer("q").and_then(|a| a.as_choices()),
        Some(&["Z".to_string()][..])
    );
}

#[test]
fn test_no_other_choice_keeps_free_text() {
    let survey = Survey::new(
        "s",
        vec![Question::new("q", QuestionType::MultipleChoiceMulti, "Pick").with_choices(["A", "B"])],
    );
    let responses = vec![ResponseBuilder::new("typed").answer("q", vec!["Z"]).build()];

    let other = FilterSelection::new(vec![FilterEntry::question(
        "q",
        QuestionType::MultipleChoiceMulti,
        Some("Includes either"),
        Some(Operand::from(vec!["Other"])),
    )]);
    assert!(evaluate(&responses, &other, &survey, &DateRange::default()).is_empty());

    let literal = FilterSelection::new(vec![FilterEntry::question(
        "q",
        QuestionType::MultipleChoiceMulti,
        Some("Includes either"),
        Some(Operand::from(vec!["Z"])),
    )]);
    assert_eq!(
        ids(&evaluate(&responses, &literal, &survey, &DateRange::default())),
        vec!["typed"]
    );
}

// ============================================================================
// Date range boundaries
// ============================================================================

#[test]
fn test_date_range_boundaries() {
    let survey = full_survey();
    let from = march(5);
    let to = march(10);
    let responses = vec![
        ResponseBuilder::new("at_from").created_at(from).build(),
        ResponseBuilder::new("at_to").created_at(to).build(),
        ResponseBuilder::new("before").created_at(from - Duration::microseconds(1)).build(),
        ResponseBuilder::new("after").created_at(to + Duration::microseconds(1)).build(),
    ];

    let result = evaluate(
        &responses,
        &FilterSelection::default(),
        &survey,
        &DateRange::between(from, to),
    );

    assert_eq!(ids(&result), vec!["at_from", "at_to"]);
}

#[test]
fn test_partial_date_range_is_ignored() {
    let survey = full_survey();
    let responses = vec![
        ResponseBuilder::new("early").created_at(march(1)).build(),
        ResponseBuilder::new("late").created_at(march(20)).build(),
    ];
    let range = DateRange::new(Some(march(10)), None);

    let result = evaluate(&responses, &FilterSelection::default(), &survey, &range);
    assert_eq!(ids(&result), vec!["early", "late"]);

    let criteria = normalize(&FilterSelection::default(), &range);
    assert!(criteria.created_at.is_none());
}

// ============================================================================
// Client payloads
// ============================================================================

#[test]
fn test_client_json_round_trip_through_both_stages() {
    let survey = full_survey();
    let selection: FilterSelection = serde_json::from_str(
        r#"{
            "onlyComplete": false,
            "filter": [
                {
                    "questionType": {"type": "Questions", "id": "consent", "label": "Terms", "questionType": "consent"},
                    "filterType": {"filterValue": "is", "filterComboBoxValue": "Accepted"}
                },
                {
                    "questionType": {"type": "Questions", "id": "multi", "label": "Features", "questionType": "multipleChoiceMulti"},
                    "filterType": {"filterValue": "Includes all", "filterComboBoxValue": ["Search", "Other"]}
                }
            ]
        }"#,
    )
    .unwrap();
    let responses = vec![
        ResponseBuilder::new("match")
            .answer("consent", "accepted")
            .answer("multi", vec!["Search", "something else"])
            .build(),
        ResponseBuilder::new("no_consent")
            .answer("consent", "dismissed")
            .answer("multi", vec!["Search", "Other"])
            .build(),
        ResponseBuilder::new("missing_other")
            .answer("consent", "accepted")
            .answer("multi", vec!["Search"])
            .build(),
    ];

    let criteria = normalize(&selection, &DateRange::default());
    assert_eq!(
        serde_json::to_value(&criteria).unwrap(),
        serde_json::json!({
            "data": {
                "consent": {"op": "accepted"},
                "multi": {"op": "includesAll", "value": ["Search", "Other"]}
            }
        })
    );

    let direct = evaluate(&responses, &selection, &survey, &DateRange::default());
    let via_criteria = CriteriaEvaluator::new(&criteria, &survey).filter_responses(&responses);

    assert_eq!(ids(&direct), vec!["match"]);
    assert_eq!(ids(via_criteria), ids(&direct));
}
