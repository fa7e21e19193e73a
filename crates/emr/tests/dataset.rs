//! End-to-end tests over a JSON dataset on disk

use emr::arden::{ElementState, RuleLiteral};
use emr::cli::{evaluate, locales, names};
use emr::model::Patient;
use emr::{Dataset, DatasetError, Locale, RuleElement};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DATASET: &str = r#"{
    "concepts": [
        {
            "conceptId": 1040,
            "names": [
                { "name": "HIV test", "locale": "en", "tags": ["preferred_en"] },
                { "name": "HIV", "locale": "en", "tags": ["short_en"] },
                { "name": "Test VIH", "locale": "fr", "tags": ["preferred_fr"] }
            ],
            "descriptions": [{ "description": "HIV rapid test result", "locale": "en" }]
        },
        {
            "conceptId": 5089,
            "names": [
                { "name": "Weight (kg)", "locale": "en_US", "tags": ["preferred_en_US"] },
                { "name": "Poids (kg)", "locale": "fr" }
            ]
        },
        {
            "conceptId": 703,
            "names": [
                { "name": "Positive", "locale": "en" },
                { "name": "Positif", "locale": "fr" }
            ]
        }
    ],
    "patients": [{ "patientId": 7, "identifier": "100-7" }],
    "observations": [
        {
            "personId": 7, "conceptId": 1040, "obsDatetime": "2024-01-10T08:00:00",
            "value": { "type": "text", "value": "NEGATIVE" }
        },
        {
            "personId": 7, "conceptId": 1040, "obsDatetime": "2024-03-02T08:00:00",
            "value": { "type": "text", "value": "POSITIVE" }
        },
        {
            "personId": 7, "conceptId": 1040, "obsDatetime": "2024-04-01T08:00:00",
            "value": { "type": "text", "value": "INVALID" }, "voided": true
        },
        {
            "personId": 7, "conceptId": 5089, "obsDatetime": "2024-03-02T08:05:00",
            "value": { "type": "numeric", "value": "62.0" }
        }
    ]
}"#;

fn write_dataset(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("dataset.json");
    fs::write(&path, DATASET).unwrap();
    path
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn loc(spec: &str) -> Locale {
    spec.parse().unwrap()
}

#[test]
fn test_load_dataset_file() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = Dataset::from_json_file(write_dataset(&dir)).unwrap();

    assert_eq!(dataset.concepts.len(), 3);
    assert_eq!(dataset.patient(7).unwrap().identifier.as_deref(), Some("100-7"));
    let hiv = dataset.concept(1040).unwrap();
    assert_eq!(hiv.best_short_name(&loc("en_GB")).unwrap().name(), "HIV");
    assert_eq!(hiv.best_name(&loc("fr_CA")).unwrap().name(), "Test VIH");
}

#[test]
fn test_missing_and_invalid_files() {
    let dir = tempfile::tempdir().unwrap();
    let missing = Dataset::from_json_file(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(missing, DatasetError::Io { .. }));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ \"concepts\": [").unwrap();
    assert!(matches!(
        Dataset::from_json_file(&broken).unwrap_err(),
        DatasetError::Parse(_)
    ));
}

#[rstest]
#[case("last", Some(RuleLiteral::Text("POSITIVE".into())), true)]
#[case("first", Some(RuleLiteral::Text("NEGATIVE".into())), true)]
#[case("last", Some(RuleLiteral::Text("INVALID".into())), false)]
#[case("exist", Some(RuleLiteral::Boolean(false)), true)]
fn test_rule_against_dataset(
    #[case] qualifier: &str,
    #[case] literal: Option<RuleLiteral>,
    #[case] expected: bool,
) {
    let dataset = Dataset::from_json(DATASET).unwrap();
    let mut element = RuleElement::new("{HIV test from obs}", qualifier, "").unwrap();
    if let Some(literal) = literal {
        element.set_answer(literal);
    }

    let found = element
        .resolve(&dataset.rule_context(), &loc("en"), &Patient::new(7))
        .unwrap();

    assert!(found);
    assert_eq!(element.evaluate(), Ok(expected));
    assert_eq!(element.state(), ElementState::Evaluated);
}

#[test]
fn test_rule_lookup_in_french() {
    let dataset = Dataset::from_json(DATASET).unwrap();
    let mut element = RuleElement::new("{Poids (kg) from obs}", "last", "").unwrap();
    element.set_answer(RuleLiteral::Integer(62));

    assert!(element
        .resolve(&dataset.rule_context(), &loc("fr"), &Patient::new(7))
        .unwrap());
    assert_eq!(element.evaluate(), Ok(true));
    assert_eq!(element.concept_display(&loc("en_US")).as_deref(), Some("Weight (kg)"));
    assert_eq!(element.observation_display(&loc("fr")).as_deref(), Some("62"));
}

#[test]
fn test_evaluate_command_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.json");

    evaluate::evaluate(evaluate::EvaluateConfig {
        dataset: write_dataset(&dir),
        rule: "{HIV test from obs}".to_string(),
        patient: 7,
        operator: Some("=".to_string()),
        answer: Some("POSITIVE".to_string()),
        qualifier: "last".to_string(),
        duration: String::new(),
        locale: Some("fr".to_string()),
        conclude: None,
        user_vars: vec!["site = clinic".to_string()],
        settings: None,
        verbose: false,
        output_format: Some("json".to_string()),
        output_file: Some(out.clone()),
    })
    .unwrap();

    assert_eq!(
        read_json(&out),
        json!({
            "rule": "{HIV test from obs}",
            "concept": "Test VIH",
            "conceptId": 1040,
            "qualifier": "last",
            "duration": null,
            "observation": "POSITIVE",
            "operator": "=",
            "answer": "POSITIVE",
            "result": true,
            "conclude": "unknown",
            "userVars": "site = clinic\n",
        })
    );
}

#[test]
fn test_evaluate_command_rejects_malformed_rule() {
    let dir = tempfile::tempdir().unwrap();
    let result = evaluate::evaluate(evaluate::EvaluateConfig {
        dataset: write_dataset(&dir),
        rule: "HIV test".to_string(),
        patient: 7,
        operator: None,
        answer: None,
        qualifier: "last".to_string(),
        duration: String::new(),
        locale: None,
        conclude: None,
        user_vars: Vec::new(),
        settings: None,
        verbose: false,
        output_format: None,
        output_file: None,
    });
    assert!(result.is_err());
}

#[test]
fn test_names_command_with_settings() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings.json");
    fs::write(
        &settings,
        r#"{ "defaultLocale": "fr", "allowedLocales": ["en_US", "fr"] }"#,
    )
    .unwrap();
    let out = dir.path().join("names.json");

    names::names(names::NamesConfig {
        dataset: write_dataset(&dir),
        locale: None,
        all_locales: false,
        settings: Some(settings),
        verbose: false,
        output_format: Some("json".to_string()),
        output_file: Some(out.clone()),
    })
    .unwrap();

    let rows = read_json(&out);
    assert_eq!(rows[0]["locale"], json!("fr"));
    assert_eq!(rows[0]["bestName"], json!("Test VIH"));
    assert_eq!(rows[0]["description"], Value::Null);
    assert_eq!(rows[1]["bestName"], json!("Poids (kg)"));
    assert_eq!(rows[1]["preferredName"], Value::Null);
}

#[test]
fn test_names_command_all_locales() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("names.json");

    names::names(names::NamesConfig {
        dataset: write_dataset(&dir),
        locale: None,
        all_locales: true,
        settings: None,
        verbose: false,
        output_format: Some("json".to_string()),
        output_file: Some(out.clone()),
    })
    .unwrap();

    let rows = read_json(&out);
    assert_eq!(rows[1]["names"]["en_US"], json!("Weight (kg)"));
    assert_eq!(rows[1]["names"]["fr"], json!("Poids (kg)"));
    assert_eq!(rows[1]["missingLocales"], json!(["en_GB", "es", "pt"]));
}

#[test]
fn test_locales_command_table() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("locales.txt");

    locales::locales(locales::LocalesConfig {
        bundle_files: vec![
            PathBuf::from("messages.properties"),
            PathBuf::from("messages_es.properties"),
        ],
        settings: None,
        verbose: false,
        output_format: Some("table".to_string()),
        output_file: Some(out.clone()),
    })
    .unwrap();

    let table = fs::read_to_string(&out).unwrap();
    assert!(table.contains("locale"));
    assert!(table.contains("es"));
}
