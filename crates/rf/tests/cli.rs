//! End-to-end tests running the `rf` binary against documents on disk.
//!
//! Scenario-driven: each test writes a survey, responses and a selection
//! into a temp dir and checks what the binary prints.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::TempDir;

const SURVEY: &str = r#"{
    "id": "s1",
    "name": "Product feedback",
    "questions": [
        {"id": "Q1", "type": "nps", "headline": "How likely are you to recommend us?"},
        {"id": "Q2", "type": "multipleChoiceMulti", "headline": "Which features do you use?",
         "choices": [{"label": "Search"}, {"label": "Export"}, {"label": "Other"}]}
    ]
}"#;

const RESPONSES: &str = r#"[
    {"id": "R1", "createdAt": "2026-03-01T10:00:00Z", "finished": true,
     "data": {"Q1": 9, "Q2": ["Search", "custom integration"]},
     "tags": [{"id": "t1", "name": "vip"}],
     "personAttributes": {"plan": "pro"}},
    {"id": "R2", "createdAt": "2026-03-05T10:00:00Z", "finished": false,
     "data": {"Q1": 3}},
    {"id": "R3", "createdAt": "2026-03-09T10:00:00Z", "finished": true,
     "data": {}}
]"#;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let ws = Self {
            dir: TempDir::new().unwrap(),
        };
        ws.write("survey.json", SURVEY);
        ws.write("responses.json", RESPONSES);
        ws
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn write_selection(&self, selection: Value) -> PathBuf {
        self.write("selection.json", &selection.to_string())
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_rf"))
            .args(args)
            .current_dir(self.dir.path())
            .env("RF_CONFIG", self.path("config/config.toml"))
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .output()
            .unwrap()
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let mut args = args.to_vec();
        args.push("--json");
        let output = self.run(&args);
        assert!(
            output.status.success(),
            "rf {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).unwrap()
    }

    fn filter_ids(&self, extra: &[&str]) -> Vec<String> {
        let mut args = vec!["filter", "-s", "survey.json", "-r", "responses.json"];
        args.extend_from_slice(extra);
        let json = self.run_json(&args);
        json["responses"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap().to_string())
            .collect()
    }
}

fn question(id: &str, question_type: &str, op: &str, operand: Value) -> Value {
    json!({
        "questionType": {"type": "Questions", "id": id, "label": id, "questionType": question_type},
        "filterType": {"filterValue": op, "filterComboBoxValue": operand}
    })
}

fn selection_arg(path: &Path) -> String {
    path.display().to_string()
}

#[test]
fn test_filter_without_selection_keeps_everything() {
    let ws = Workspace::new();
    assert_eq!(ws.filter_ids(&[]), vec!["R1", "R2", "R3"]);
}

#[test]
fn test_filter_nps_and_only_complete() {
    let ws = Workspace::new();
    let selection = ws.write_selection(json!({
        "filter": [question("Q1", "nps", "Is more than", json!("5"))]
    }));
    let selection = selection_arg(&selection);

    assert_eq!(ws.filter_ids(&["-S", &selection]), vec!["R1"]);
    assert_eq!(ws.filter_ids(&["--only-complete"]), vec!["R1", "R3"]);
}

#[test]
fn test_filter_tags_attributes_and_other_choice() {
    let ws = Workspace::new();

    let selection = ws.write_selection(json!({
        "filter": [{
            "questionType": {"type": "Tags", "id": "t1", "label": "vip"},
            "filterType": {"filterValue": "is", "filterComboBoxValue": "Not applied"}
        }]
    }));
    assert_eq!(
        ws.filter_ids(&["-S", &selection_arg(&selection)]),
        vec!["R2", "R3"]
    );

    let selection = ws.write_selection(json!({
        "filter": [{
            "questionType": {"type": "Attributes", "id": "plan", "label": "plan"},
            "filterType": {"filterValue": "Equals", "filterComboBoxValue": "pro"}
        }]
    }));
    assert_eq!(ws.filter_ids(&["-S", &selection_arg(&selection)]), vec!["R1"]);

    let selection = ws.write_selection(json!({
        "filter": [question("Q2", "multipleChoiceMulti", "Includes either", json!(["Other"]))]
    }));
    assert_eq!(ws.filter_ids(&["-S", &selection_arg(&selection)]), vec!["R1"]);
}

#[test]
fn test_filter_date_range() {
    let ws = Workspace::new();
    let ids = ws.filter_ids(&[
        "--from",
        "2026-03-04T00:00:00Z",
        "--to",
        "2026-03-09T10:00:00Z",
    ]);
    assert_eq!(ids, vec!["R2", "R3"]);
}

#[test]
fn test_filter_limit() {
    let ws = Workspace::new();
    let json = ws.run_json(&[
        "filter",
        "-s",
        "survey.json",
        "-r",
        "responses.json",
        "--limit",
        "2",
    ]);
    assert_eq!(json["count"], 2);
}

#[test]
fn test_strict_mode_reports_unknown_question() {
    let ws = Workspace::new();
    let selection = ws.write_selection(json!({
        "filter": [question("Q11", "nps", "Submitted", Value::Null)]
    }));
    let selection = selection_arg(&selection);

    // Without --strict the unknown question simply matches nothing.
    assert!(ws
        .filter_ids(&["-S", &selection])
        .is_empty());

    let output = ws.run(&[
        "filter",
        "-s",
        "survey.json",
        "-r",
        "responses.json",
        "-S",
        &selection,
        "--strict",
        "--json",
    ]);
    assert_eq!(output.status.code(), Some(2));
    let error: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(error["error"]["code"], "SELECTION_ERROR");
    assert!(error["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Did you mean 'Q1'?"));
}

#[test]
fn test_missing_input_file() {
    let ws = Workspace::new();
    let output = ws.run(&["filter", "-s", "nope.json", "-r", "responses.json"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.json"));
}

#[test]
fn test_inverted_date_range() {
    let ws = Workspace::new();
    let output = ws.run(&[
        "criteria",
        "-S",
        &selection_arg(&ws.write_selection(json!({"filter": []}))),
        "--from",
        "2026-03-10",
        "--to",
        "2026-03-01",
        "--json",
    ]);
    assert_eq!(output.status.code(), Some(2));
    let error: Value = serde_json::from_slice(&output.stderr).unwrap();
    assert_eq!(error["error"]["code"], "DATE_ERROR");
}

#[test]
fn test_criteria_command() {
    let ws = Workspace::new();
    let selection = ws.write_selection(json!({
        "onlyComplete": true,
        "filter": [
            question("Q1", "nps", "Is less than", json!("7")),
            question("Q2", "multipleChoiceMulti", "Includes all", json!(["Search", "Export"])),
            {
                "questionType": {"type": "Tags", "id": "t1", "label": "vip"},
                "filterType": {"filterValue": "is", "filterComboBoxValue": "Applied"}
            }
        ]
    }));

    let criteria = ws.run_json(&["criteria", "-S", &selection_arg(&selection)]);
    assert_eq!(
        criteria,
        json!({
            "onlyComplete": true,
            "tags": {"applied": ["vip"], "notApplied": []},
            "data": {
                "Q1": {"op": "lessThan", "value": 7},
                "Q2": {"op": "includesAll", "value": ["Search", "Export"]}
            }
        })
    );
}

#[test]
fn test_options_command() {
    let ws = Workspace::new();
    ws.write("tags.json", r#"[{"id": "t1", "name": "vip"}]"#);
    ws.write("attributes.json", r#"{"plan": ["free", "pro"]}"#);

    let options = ws.run_json(&[
        "options",
        "-s",
        "survey.json",
        "-t",
        "tags.json",
        "-a",
        "attributes.json",
    ]);
    let groups: Vec<&str> = options["questionOptions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["header"].as_str().unwrap())
        .collect();
    assert_eq!(groups, vec!["Questions", "Tags", "Attributes"]);

    let q2 = &options["questionFilterOptions"][1];
    assert_eq!(q2["id"], "Q2");
    assert_eq!(q2["filterComboBoxOptions"], json!(["Search", "Export", "Other"]));
}

#[test]
fn test_table_output() {
    let ws = Workspace::new();
    let output = ws.run(&["filter", "-s", "survey.json", "-r", "responses.json"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("ID"));
    assert_eq!(stdout.lines().count(), 4);
}

#[test]
fn test_config_defaults_apply_to_filter() {
    let ws = Workspace::new();
    let output = ws.run(&["config", "set", "filter.only_complete", "true"]);
    assert!(output.status.success());

    assert_eq!(ws.filter_ids(&[]), vec!["R1", "R3"]);
}

#[test]
fn test_broken_config_still_allows_config_path() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.path("config")).unwrap();
    ws.write("config/config.toml", "[filter\n");

    let output = ws.run(&["config", "path"]);
    assert!(output.status.success());

    let output = ws.run(&["filter", "-s", "survey.json", "-r", "responses.json"]);
    assert_eq!(output.status.code(), Some(5));
}
