//! Collaborators a rule element resolves against

use crate::error::{LookupError, RuleError, RuleResult};
use emr_locale::Locale;
use emr_model::{Concept, Observation, Patient};
use std::fmt;
use std::sync::Arc;

/// Finds concepts by free text
pub trait ConceptLookup: Send + Sync {
    /// Best matching concept for `query` in `locale`, if any
    fn find_concept(&self, query: &str, locale: &Locale) -> Result<Option<Concept>, LookupError>;
}

/// Source of a patient's observations
pub trait ObservationStore: Send + Sync {
    /// Observations of `concept` recorded for `patient`, in any order
    fn observations_for(
        &self,
        patient: &Patient,
        concept: &Concept,
    ) -> Result<Vec<Observation>, LookupError>;
}

/// Services available while resolving rule elements
#[derive(Clone, Default)]
pub struct RuleContext {
    concepts: Option<Arc<dyn ConceptLookup>>,
    observations: Option<Arc<dyn ObservationStore>>,
}

impl RuleContext {
    /// Create a context with no services
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concept lookup
    pub fn with_concept_lookup(mut self, lookup: Arc<dyn ConceptLookup>) -> Self {
        self.concepts = Some(lookup);
        self
    }

    /// Set the observation store
    pub fn with_observation_store(mut self, store: Arc<dyn ObservationStore>) -> Self {
        self.observations = Some(store);
        self
    }

    pub fn concept_lookup(&self) -> RuleResult<&dyn ConceptLookup> {
        self.concepts
            .as_deref()
            .ok_or_else(|| RuleError::missing_service("concept lookup"))
    }

    pub fn observation_store(&self) -> RuleResult<&dyn ObservationStore> {
        self.observations
            .as_deref()
            .ok_or_else(|| RuleError::missing_service("observation store"))
    }
}

impl fmt::Debug for RuleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleContext")
            .field("concepts", &self.concepts.is_some())
            .field("observations", &self.observations.is_some())
            .finish()
    }
}
