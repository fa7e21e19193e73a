//! Names command implementation

use super::{load_registry, output, parse_locale};
use crate::dataset::Dataset;
use anyhow::{Context, Result};
use emr_locale::Locale;
use emr_model::{Concept, ConceptName, NameResolver};
use serde_json::{Value, json};
use std::path::PathBuf;

/// Configuration for names command
pub struct NamesConfig {
    pub dataset: PathBuf,
    pub locale: Option<String>,
    pub all_locales: bool,
    pub settings: Option<PathBuf>,
    pub verbose: bool,
    pub output_format: Option<String>,
    pub output_file: Option<PathBuf>,
}

/// Show the names each concept of a dataset resolves to
pub fn names(config: NamesConfig) -> Result<()> {
    let dataset = Dataset::from_json_file(&config.dataset)
        .with_context(|| format!("Failed to load dataset: {}", config.dataset.display()))?;
    let resolver = NameResolver::new(load_registry(config.settings.as_deref())?);
    let locale = resolver.effective_locale(parse_locale(config.locale.as_deref())?.as_ref());

    if config.verbose {
        eprintln!(
            "Resolving {} concepts in {}",
            dataset.concepts.len(),
            locale
        );
    }

    let rows: Vec<Value> = dataset
        .concepts
        .iter()
        .map(|concept| {
            if config.all_locales {
                locale_summary(&resolver, concept)
            } else {
                name_summary(concept, &locale)
            }
        })
        .collect();

    let format = output::OutputFormat::from_arg(config.output_format.as_deref());
    output::print_output(&Value::Array(rows), format, config.output_file.as_deref())
}

fn name_text(name: Option<&ConceptName>) -> Value {
    name.map_or(Value::Null, |name| json!(name.name()))
}

/// Names and description of one concept in `locale`
pub fn name_summary(concept: &Concept, locale: &Locale) -> Value {
    json!({
        "conceptId": concept.concept_id(),
        "locale": locale.to_string(),
        "bestName": name_text(concept.best_name(locale)),
        "preferredName": name_text(concept.preferred_name(locale)),
        "shortName": name_text(concept.best_short_name(locale)),
        "fullySpecifiedName": name_text(concept.fully_specified_name(locale)),
        "description": concept.description(locale, false).map(|d| d.description()),
    })
}

/// Best name of one concept in every available locale
pub fn locale_summary(resolver: &NameResolver, concept: &Concept) -> Value {
    let names: serde_json::Map<String, Value> = resolver
        .names_by_locale(concept)
        .into_iter()
        .map(|(locale, name)| (locale.to_string(), json!(name.name())))
        .collect();
    let missing: Vec<String> = resolver
        .missing_locales(concept)
        .iter()
        .map(ToString::to_string)
        .collect();

    json!({
        "conceptId": concept.concept_id(),
        "names": names,
        "missingLocales": missing,
    })
}
