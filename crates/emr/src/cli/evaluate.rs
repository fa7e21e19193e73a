//! Evaluate command implementation

use super::{load_registry, output, parse_locale};
use crate::dataset::Dataset;
use anyhow::{Context, Result};
use emr_arden::{ComparisonOperator, RuleElement, RuleLiteral};
use emr_locale::Locale;
use emr_model::Patient;
use serde_json::{Value, json};
use std::path::PathBuf;

/// Configuration for evaluate command
pub struct EvaluateConfig {
    pub dataset: PathBuf,
    pub rule: String,
    pub patient: i64,
    pub operator: Option<String>,
    pub answer: Option<String>,
    pub qualifier: String,
    pub duration: String,
    pub locale: Option<String>,
    pub conclude: Option<bool>,
    pub user_vars: Vec<String>,
    pub settings: Option<PathBuf>,
    pub verbose: bool,
    pub output_format: Option<String>,
    pub output_file: Option<PathBuf>,
}

/// Resolve and evaluate one rule element for a patient
pub fn evaluate(config: EvaluateConfig) -> Result<()> {
    let dataset = Dataset::from_json_file(&config.dataset)
        .with_context(|| format!("Failed to load dataset: {}", config.dataset.display()))?;
    let registry = load_registry(config.settings.as_deref())?;
    let locale = parse_locale(config.locale.as_deref())?
        .unwrap_or_else(|| registry.default_locale().clone());

    let patient = match dataset.patient(config.patient) {
        Some(patient) => patient.clone(),
        None => {
            eprintln!(
                "{}",
                output::format_warning(&format!(
                    "Patient {} is not listed in the dataset",
                    config.patient
                ))
            );
            Patient::new(config.patient)
        }
    };

    let mut element = build_element(&config)?;
    let found = element
        .resolve(&dataset.rule_context(), &locale, &patient)
        .with_context(|| format!("Failed to resolve {}", element.reference()))?;

    if config.verbose {
        eprintln!(
            "Resolved {} for patient {}: observation {}",
            element.reference(),
            patient.patient_id,
            if found { "found" } else { "not found" }
        );
    }

    let result = element.evaluate().context("Failed to evaluate rule element")?;
    let report = element_report(&element, &locale, result);

    let format = output::OutputFormat::from_arg(config.output_format.as_deref());
    output::print_output(&report, format, config.output_file.as_deref())
}

/// Build the element described by the command arguments
pub fn build_element(config: &EvaluateConfig) -> Result<RuleElement> {
    let mut element = RuleElement::new(&config.rule, &config.qualifier, &config.duration)
        .with_context(|| format!("Invalid rule reference: '{}'", config.rule))?;

    if let Some(op) = &config.operator {
        let Ok(operator) = op.parse::<ComparisonOperator>();
        element.set_operator(operator);
    }
    if let Some(answer) = &config.answer {
        element.set_answer(RuleLiteral::parse(answer));
    }
    if let Some(conclude) = config.conclude {
        element.set_conclude(conclude);
    }
    for var in &config.user_vars {
        let (key, value) = var
            .split_once('=')
            .with_context(|| format!("Invalid user variable: '{var}'. Expected 'name=value'"))?;
        element.add_user_var(key.trim(), value.trim());
    }

    Ok(element)
}

/// Diagnostic report of an evaluated element
pub fn element_report(element: &RuleElement, locale: &Locale, result: bool) -> Value {
    json!({
        "rule": element.reference().text(),
        "concept": element.concept_display(locale),
        "conceptId": element.concept().and_then(|c| c.concept_id()),
        "qualifier": element.aggregation().to_string(),
        "duration": element.duration(),
        "observation": element.observation_display(locale),
        "operator": element.operator_display(),
        "answer": element.answer_display(),
        "result": result,
        "conclude": element.conclude_display(),
        "userVars": element.user_vars_display(),
    })
}
