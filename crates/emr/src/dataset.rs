//! JSON datasets and in-memory lookup services

use emr_arden::{ConceptLookup, LookupError, ObservationStore, RuleContext};
use emr_locale::Locale;
use emr_model::{Concept, Observation, Patient};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors loading a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Concepts, patients and observations loaded together
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub concepts: Vec<Concept>,
    #[serde(default)]
    pub patients: Vec<Patient>,
    #[serde(default)]
    pub observations: Vec<Observation>,
}

impl Dataset {
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let dataset: Self = serde_json::from_str(json)?;
        log::debug!(
            "loaded {} concepts, {} patients, {} observations",
            dataset.concepts.len(),
            dataset.patients.len(),
            dataset.observations.len()
        );
        Ok(dataset)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn patient(&self, patient_id: i64) -> Option<&Patient> {
        self.patients.iter().find(|p| p.patient_id == patient_id)
    }

    pub fn concept(&self, concept_id: i64) -> Option<&Concept> {
        self.concepts
            .iter()
            .find(|c| c.concept_id() == Some(concept_id))
    }

    /// Rule context backed by copies of this dataset's concepts and observations
    pub fn rule_context(&self) -> RuleContext {
        RuleContext::new()
            .with_concept_lookup(Arc::new(InMemoryConceptDictionary::new(self.concepts.clone())))
            .with_observation_store(Arc::new(InMemoryObservationStore::new(
                self.observations.clone(),
            )))
    }
}

/// Concept lookup over a fixed list of concepts
///
/// A concept whose best name in the requested locale matches the query
/// (ignoring case) wins over one that only matches through another name.
/// Retired concepts are never returned.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConceptDictionary {
    concepts: Vec<Concept>,
}

impl InMemoryConceptDictionary {
    pub fn new(concepts: Vec<Concept>) -> Self {
        Self { concepts }
    }
}

impl ConceptLookup for InMemoryConceptDictionary {
    fn find_concept(&self, query: &str, locale: &Locale) -> Result<Option<Concept>, LookupError> {
        let query = query.trim();
        let active = || self.concepts.iter().filter(|c| !c.is_retired());

        let by_best_name = active().find(|concept| {
            concept
                .best_name(locale)
                .is_some_and(|name| name.name().eq_ignore_ascii_case(query))
        });
        let found = by_best_name.or_else(|| {
            active().find(|concept| {
                concept
                    .names()
                    .iter()
                    .any(|name| name.name().eq_ignore_ascii_case(query))
            })
        });

        Ok(found.cloned())
    }
}

/// Observation store over a fixed list of observations
#[derive(Debug, Clone, Default)]
pub struct InMemoryObservationStore {
    observations: Vec<Observation>,
}

impl InMemoryObservationStore {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }
}

impl ObservationStore for InMemoryObservationStore {
    fn observations_for(
        &self,
        patient: &Patient,
        concept: &Concept,
    ) -> Result<Vec<Observation>, LookupError> {
        let Some(concept_id) = concept.concept_id() else {
            return Ok(Vec::new());
        };
        Ok(self
            .observations
            .iter()
            .filter(|obs| obs.person_id == patient.patient_id && obs.concept_id == concept_id)
            .cloned()
            .collect())
    }
}
