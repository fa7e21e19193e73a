//! A single clinical data reference inside a rule

use crate::error::{RuleError, RuleResult};
use crate::literal::{Aggregation, RuleLiteral};
use crate::operator::ComparisonOperator;
use crate::reference::ConceptReference;
use crate::services::RuleContext;
use emr_locale::Locale;
use emr_model::{Concept, Observation, Patient};
use indexmap::IndexMap;
use indexmap::map::Entry;
use rust_decimal::Decimal;

/// Lifecycle of a [`RuleElement`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    /// Built from rule text, no lookups performed
    Unresolved,
    /// Concept and observation looked up, possibly found absent
    Resolved,
    /// Result computed and cached for good
    Evaluated,
}

/// One concept reference plus comparison inside a clinical rule
///
/// The element is resolved against a [`RuleContext`] for one patient and then
/// evaluated once; later evaluations return the cached result without
/// consulting any service.
#[derive(Debug, Clone)]
pub struct RuleElement {
    reference: ConceptReference,
    aggregation: Aggregation,
    duration: Option<String>,
    operator: ComparisonOperator,
    literal: Option<RuleLiteral>,
    resolved: bool,
    concept: Option<Concept>,
    observation: Option<Observation>,
    result: Option<bool>,
    conclude: Option<bool>,
    user_vars: IndexMap<String, String>,
    db_access_required: bool,
}

impl RuleElement {
    /// Build an element from its concept reference, qualifier and duration
    ///
    /// The reference is parsed here; malformed text is rejected immediately.
    /// The duration is carried for reporting only.
    pub fn new(reference: &str, qualifier: &str, duration: &str) -> RuleResult<Self> {
        let reference = ConceptReference::parse(reference)?;
        let Ok(aggregation) = qualifier.parse::<Aggregation>();
        let duration = Some(duration.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(Self {
            reference,
            aggregation,
            duration,
            operator: ComparisonOperator::default(),
            literal: None,
            resolved: false,
            concept: None,
            observation: None,
            result: None,
            conclude: None,
            user_vars: IndexMap::new(),
            db_access_required: true,
        })
    }

    pub fn with_operator(mut self, operator: ComparisonOperator) -> Self {
        self.operator = operator;
        self
    }

    pub fn with_answer(mut self, literal: RuleLiteral) -> Self {
        self.literal = Some(literal);
        self
    }

    pub fn set_operator(&mut self, operator: ComparisonOperator) {
        self.operator = operator;
    }

    pub fn set_answer(&mut self, literal: RuleLiteral) {
        self.literal = Some(literal);
    }

    pub fn set_conclude(&mut self, value: bool) {
        self.conclude = Some(value);
    }

    /// Record a user variable; the first value for a key is kept
    ///
    /// Returns false when the key was already set.
    pub fn add_user_var(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        match self.user_vars.entry(key.into()) {
            Entry::Occupied(entry) => {
                log::debug!("ignoring second value for user variable '{}'", entry.key());
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(value.into());
                true
            }
        }
    }

    pub fn set_db_access_required(&mut self, required: bool) {
        self.db_access_required = required;
    }

    pub fn state(&self) -> ElementState {
        match (self.result, self.resolved) {
            (Some(_), _) => ElementState::Evaluated,
            (None, true) => ElementState::Resolved,
            (None, false) => ElementState::Unresolved,
        }
    }

    /// Look up the concept and pick the patient's observation of it
    ///
    /// Returns whether an observation was found. A concept that cannot be
    /// found is not an error. An element that is already evaluated is left
    /// untouched. Resolving again before evaluation repeats the lookups.
    pub fn resolve(&mut self, ctx: &RuleContext, locale: &Locale, patient: &Patient) -> RuleResult<bool> {
        if self.result.is_some() {
            return Ok(self.observation.is_some());
        }

        let lookup = ctx.concept_lookup()?;
        let store = ctx.observation_store()?;

        let query = self.reference.query();
        let Some(concept) = lookup.find_concept(query, locale)? else {
            log::debug!("no concept matches '{query}' in {locale}");
            self.concept = None;
            self.observation = None;
            self.resolved = true;
            return Ok(false);
        };

        let observations = store.observations_for(patient, &concept)?;
        log::debug!(
            "{} observation(s) of '{query}' for patient {}",
            observations.len(),
            patient.patient_id
        );

        self.observation = self.aggregation.select(observations);
        self.concept = Some(concept);
        self.resolved = true;
        Ok(self.observation.is_some())
    }

    /// Evaluate the comparison, computing it at most once
    ///
    /// Equality against a boolean literal, or with no literal at all, is true
    /// whenever an observation was found, whatever the literal's value. Text
    /// compares the observation's text value exactly, integers its numeric
    /// value. Unsupported operators yield false.
    pub fn evaluate(&mut self) -> RuleResult<bool> {
        if let Some(result) = self.result {
            return Ok(result);
        }
        if !self.resolved {
            return Err(RuleError::NotResolved);
        }

        let result = match &self.operator {
            ComparisonOperator::Equals => self.equals(),
            ComparisonOperator::Unsupported(op) => {
                log::warn!("operator '{op}' is not supported, {} evaluates to false", self.reference);
                false
            }
        };

        self.result = Some(result);
        Ok(result)
    }

    fn equals(&self) -> bool {
        let Some(observation) = &self.observation else {
            return false;
        };
        match &self.literal {
            None | Some(RuleLiteral::Boolean(_)) => true,
            Some(RuleLiteral::Text(text)) => observation.value_text() == Some(text.as_str()),
            Some(RuleLiteral::Integer(number)) => observation.value_numeric() == Some(Decimal::from(*number)),
        }
    }

    pub fn reference(&self) -> &ConceptReference {
        &self.reference
    }

    pub fn aggregation(&self) -> &Aggregation {
        &self.aggregation
    }

    pub fn duration(&self) -> Option<&str> {
        self.duration.as_deref()
    }

    pub fn operator(&self) -> &ComparisonOperator {
        &self.operator
    }

    pub fn literal(&self) -> Option<&RuleLiteral> {
        self.literal.as_ref()
    }

    pub fn concept(&self) -> Option<&Concept> {
        self.concept.as_ref()
    }

    pub fn observation(&self) -> Option<&Observation> {
        self.observation.as_ref()
    }

    /// Cached result, once evaluated
    pub fn result(&self) -> Option<bool> {
        self.result
    }

    pub fn db_access_required(&self) -> bool {
        self.db_access_required
    }

    /// The resolved observation's value as text
    pub fn observation_display(&self, locale: &Locale) -> Option<String> {
        self.observation
            .as_ref()
            .map(|obs| obs.value_as_string(locale))
    }

    /// Best name of the resolved concept
    pub fn concept_display(&self, locale: &Locale) -> Option<String> {
        self.concept
            .as_ref()
            .and_then(|concept| concept.best_name(locale))
            .map(|name| name.name().to_string())
    }

    pub fn operator_display(&self) -> String {
        self.operator.to_string()
    }

    /// The literal as text, empty when there is none
    pub fn answer_display(&self) -> String {
        self.literal
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    pub fn conclude_display(&self) -> &'static str {
        match self.conclude {
            Some(true) => "true",
            Some(false) => "false",
            None => "unknown",
        }
    }

    pub fn user_var(&self, key: &str) -> Option<&str> {
        self.user_vars.get(key).map(String::as_str)
    }

    /// User variables as `key = value` lines in insertion order
    pub fn user_vars_display(&self) -> String {
        self.user_vars
            .iter()
            .map(|(key, value)| format!("{key} = {value}\n"))
            .collect()
    }
}
