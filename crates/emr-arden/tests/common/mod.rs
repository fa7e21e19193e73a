//! Test doubles for rule element services

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use emr_arden::{ConceptLookup, LookupError, ObservationStore};
use emr_locale::Locale;
use emr_model::{Concept, ConceptName, ObsValue, Observation, Patient};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const FEVER: i64 = 140238;
pub const HIV_TEST: i64 = 1040;
pub const WEIGHT: i64 = 5089;

pub fn loc(spec: &str) -> Locale {
    spec.parse().unwrap()
}

pub fn at(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, day)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

pub fn concept(concept_id: i64, en: &str, fr: &str) -> Concept {
    let mut concept = Concept::with_id(concept_id);
    concept.set_preferred_name(&loc("en"), ConceptName::new(en, loc("en")));
    concept.add_name(ConceptName::new(fr, loc("fr")));
    concept
}

pub fn observation(patient_id: i64, concept_id: i64, day: u32, value: ObsValue) -> Observation {
    Observation::new(patient_id, concept_id, at(day), value)
}

/// Concept lookup matching names case-insensitively in any locale
#[derive(Default)]
pub struct StaticConceptLookup {
    concepts: RwLock<Vec<Concept>>,
    calls: AtomicUsize,
}

impl StaticConceptLookup {
    pub fn new(concepts: Vec<Concept>) -> Self {
        Self {
            concepts: RwLock::new(concepts),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ConceptLookup for StaticConceptLookup {
    fn find_concept(&self, query: &str, _locale: &Locale) -> Result<Option<Concept>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .concepts
            .read()
            .iter()
            .find(|concept| {
                concept
                    .names()
                    .iter()
                    .any(|name| name.name().eq_ignore_ascii_case(query))
            })
            .cloned())
    }
}

/// Observation store counting how often it is queried
#[derive(Default)]
pub struct CountingObservationStore {
    observations: RwLock<HashMap<(i64, i64), Vec<Observation>>>,
    calls: AtomicUsize,
}

impl CountingObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, observation: Observation) {
        self.observations
            .write()
            .entry((observation.person_id, observation.concept_id))
            .or_default()
            .push(observation);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ObservationStore for CountingObservationStore {
    fn observations_for(
        &self,
        patient: &Patient,
        concept: &Concept,
    ) -> Result<Vec<Observation>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let Some(concept_id) = concept.concept_id() else {
            return Ok(Vec::new());
        };
        Ok(self
            .observations
            .read()
            .get(&(patient.patient_id, concept_id))
            .cloned()
            .unwrap_or_default())
    }
}

/// Store that always fails
pub struct OfflineStore;

impl ObservationStore for OfflineStore {
    fn observations_for(&self, _: &Patient, _: &Concept) -> Result<Vec<Observation>, LookupError> {
        Err(LookupError::unavailable("observation database offline"))
    }
}

pub fn shared<T>(value: T) -> Arc<T> {
    Arc::new(value)
}
