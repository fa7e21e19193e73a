//! Shared concept fixtures

#![allow(dead_code)]

use emr_locale::Locale;
use emr_model::{Concept, ConceptDescription, ConceptName};

pub fn loc(spec: &str) -> Locale {
    spec.parse().unwrap()
}

/// Concept with a preferred name in `primary` and an untagged name in its language
pub fn mock_concept(concept_id: i64, primary: &Locale) -> Concept {
    let mut concept = Concept::with_id(concept_id);
    concept.set_preferred_name(primary, mock_name(1, primary));
    concept.add_name(mock_name(2, &primary.language_only()));
    concept
}

pub fn mock_name(id: i64, locale: &Locale) -> ConceptName {
    ConceptName::new(format!("name {id} ({locale})"), locale.clone()).with_id(id)
}

pub fn description(text: &str, spec: &str) -> ConceptDescription {
    ConceptDescription::new(text, loc(spec))
}
