//! Rule element resolution and evaluation tests

mod common;

use common::{
    CountingObservationStore, FEVER, HIV_TEST, OfflineStore, StaticConceptLookup, WEIGHT, concept,
    loc, observation, shared,
};
use emr_arden::{
    ComparisonOperator, ElementState, LookupError, ObservationStore, RuleContext, RuleElement,
    RuleError, RuleLiteral,
};
use emr_model::{Concept, ObsValue, Observation, Patient};
use mockall::mock;
use mockall::predicate::always;
use pretty_assertions::assert_eq;
use rstest::rstest;
use rust_decimal::Decimal;
use std::sync::Arc;

const PATIENT: i64 = 7;

fn lookup() -> Arc<StaticConceptLookup> {
    shared(StaticConceptLookup::new(vec![
        concept(FEVER, "Fever", "Fièvre"),
        concept(HIV_TEST, "HIV test", "Test VIH"),
        concept(WEIGHT, "Weight", "Poids"),
    ]))
}

fn store() -> Arc<CountingObservationStore> {
    let store = CountingObservationStore::new();
    store.record(observation(PATIENT, FEVER, 3, ObsValue::Boolean(true)));
    store.record(observation(PATIENT, HIV_TEST, 1, ObsValue::Text("NEGATIVE".into())));
    store.record(observation(PATIENT, HIV_TEST, 9, ObsValue::Text("POSITIVE".into())));
    store.record(observation(PATIENT, WEIGHT, 4, ObsValue::Numeric(Decimal::new(3800, 2))));
    shared(store)
}

fn context(lookup: Arc<StaticConceptLookup>, store: Arc<CountingObservationStore>) -> RuleContext {
    RuleContext::new()
        .with_concept_lookup(lookup)
        .with_observation_store(store)
}

fn resolved(reference: &str, qualifier: &str, literal: Option<RuleLiteral>) -> RuleElement {
    let mut element = RuleElement::new(reference, qualifier, "").unwrap();
    if let Some(literal) = literal {
        element.set_answer(literal);
    }
    let ctx = context(lookup(), store());
    element
        .resolve(&ctx, &loc("en"), &Patient::new(PATIENT))
        .unwrap();
    element
}

// ============================================================================
// Caching
// ============================================================================

#[test]
fn test_evaluation_is_cached_without_refetch() {
    let lookup = lookup();
    let store = store();
    let ctx = context(lookup.clone(), store.clone());
    let patient = Patient::new(PATIENT);

    let mut element = RuleElement::new("{Fever from obs}", "exist", "")
        .unwrap()
        .with_answer(RuleLiteral::Boolean(true));

    assert!(element.resolve(&ctx, &loc("en"), &patient).unwrap());
    assert_eq!(element.state(), ElementState::Resolved);
    assert_eq!(store.calls(), 1);

    assert_eq!(element.evaluate(), Ok(true));
    assert_eq!(element.state(), ElementState::Evaluated);

    assert_eq!(element.evaluate(), Ok(true));
    assert!(element.resolve(&ctx, &loc("en"), &patient).unwrap());
    assert_eq!(element.evaluate(), Ok(true));

    assert_eq!(store.calls(), 1);
    assert_eq!(lookup.calls(), 1);
}

mock! {
    pub Store {}

    impl ObservationStore for Store {
        fn observations_for(
            &self,
            patient: &Patient,
            concept: &Concept,
        ) -> Result<Vec<Observation>, LookupError>;
    }
}

#[test]
fn test_store_queried_once_per_element() {
    let mut mock = MockStore::new();
    mock.expect_observations_for()
        .with(always(), always())
        .times(1)
        .returning(|patient, _| {
            Ok(vec![observation(patient.patient_id, FEVER, 2, ObsValue::Boolean(true))])
        });

    let ctx = RuleContext::new()
        .with_concept_lookup(lookup())
        .with_observation_store(Arc::new(mock));
    let patient = Patient::new(PATIENT);
    let mut element = RuleElement::new("{fever from obs}", "last", "").unwrap();

    element.resolve(&ctx, &loc("en"), &patient).unwrap();
    let first = element.evaluate().unwrap();
    element.resolve(&ctx, &loc("en"), &patient).unwrap();
    let second = element.evaluate().unwrap();

    assert!(first);
    assert_eq!(first, second);
}

// ============================================================================
// Equality
// ============================================================================

#[rstest]
#[case::no_literal(None, true)]
#[case::boolean_true(Some(RuleLiteral::Boolean(true)), true)]
#[case::boolean_false_still_matches(Some(RuleLiteral::Boolean(false)), true)]
#[case::text_of_latest(Some(RuleLiteral::Text("POSITIVE".into())), true)]
#[case::text_of_older(Some(RuleLiteral::Text("NEGATIVE".into())), false)]
#[case::text_is_case_sensitive(Some(RuleLiteral::Text("positive".into())), false)]
#[case::integer_against_text(Some(RuleLiteral::Integer(1)), false)]
fn test_equals_on_text_observation(#[case] literal: Option<RuleLiteral>, #[case] expected: bool) {
    let mut element = resolved("{HIV test from obs}", "last", literal);
    assert_eq!(element.evaluate(), Ok(expected));
}

#[test]
fn test_first_qualifier_reads_earliest() {
    let mut element = resolved(
        "{HIV test from obs}",
        "first",
        Some(RuleLiteral::Text("NEGATIVE".into())),
    );
    assert_eq!(element.observation_display(&loc("en")).as_deref(), Some("NEGATIVE"));
    assert_eq!(element.evaluate(), Ok(true));
}

#[rstest]
#[case(38, true)]
#[case(37, false)]
fn test_equals_integer_on_numeric(#[case] value: i64, #[case] expected: bool) {
    let mut element = resolved("{Weight from obs}", "last", Some(RuleLiteral::Integer(value)));
    assert_eq!(element.evaluate(), Ok(expected));
}

#[rstest]
#[case::boolean(Some(RuleLiteral::Boolean(true)))]
#[case::boolean_false(Some(RuleLiteral::Boolean(false)))]
#[case::text(Some(RuleLiteral::Text("POSITIVE".into())))]
fn test_missing_observation_is_false(#[case] literal: Option<RuleLiteral>) {
    let mut element = RuleElement::new("{HIV test from obs}", "last", "").unwrap();
    if let Some(literal) = literal {
        element.set_answer(literal);
    }
    let ctx = context(lookup(), store());

    let found = element.resolve(&ctx, &loc("en"), &Patient::new(99)).unwrap();

    assert!(!found);
    assert_eq!(element.state(), ElementState::Resolved);
    assert_eq!(element.evaluate(), Ok(false));
    assert!(element.observation_display(&loc("en")).is_none());
}

#[test]
fn test_unknown_concept_is_not_an_error() {
    let store = store();
    let ctx = context(lookup(), store.clone());
    let mut element = RuleElement::new("{Blood pressure from obs}", "last", "").unwrap();

    assert!(!element.resolve(&ctx, &loc("en"), &Patient::new(PATIENT)).unwrap());
    assert!(element.concept().is_none());
    assert_eq!(store.calls(), 0);
    assert_eq!(element.evaluate(), Ok(false));
}

#[test]
fn test_unsupported_operator_is_false_and_cached() {
    let mut element = resolved("{Fever from obs}", "last", None);
    element.set_operator(">".parse().unwrap());

    assert_eq!(element.evaluate(), Ok(false));
    assert_eq!(element.state(), ElementState::Evaluated);

    element.set_operator(ComparisonOperator::Equals);
    assert_eq!(element.evaluate(), Ok(false));
}

// ============================================================================
// Services and errors
// ============================================================================

#[test]
fn test_missing_observation_store() {
    let ctx = RuleContext::new().with_concept_lookup(lookup());
    let mut element = RuleElement::new("{Fever from obs}", "last", "").unwrap();

    let err = element
        .resolve(&ctx, &loc("en"), &Patient::new(PATIENT))
        .unwrap_err();

    assert_eq!(err, RuleError::missing_service("observation store"));
    assert_eq!(element.state(), ElementState::Unresolved);
}

#[test]
fn test_store_failure_propagates() {
    let ctx = RuleContext::new()
        .with_concept_lookup(lookup())
        .with_observation_store(Arc::new(OfflineStore));
    let mut element = RuleElement::new("{Fever from obs}", "last", "").unwrap();

    let err = element
        .resolve(&ctx, &loc("en"), &Patient::new(PATIENT))
        .unwrap_err();

    assert!(matches!(err, RuleError::Lookup(LookupError::Unavailable { .. })));
    assert_eq!(element.evaluate(), Err(RuleError::NotResolved));
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_diagnostic_accessors() {
    let mut element = resolved(
        "{Fever from obs}",
        "last",
        Some(RuleLiteral::Boolean(true)),
    );
    element.evaluate().unwrap();

    assert_eq!(element.concept_display(&loc("en_US")).as_deref(), Some("Fever"));
    assert_eq!(element.concept_display(&loc("fr")).as_deref(), Some("Fièvre"));
    assert_eq!(element.observation_display(&loc("en")).as_deref(), Some("true"));
    assert_eq!(element.operator_display(), "=");
    assert_eq!(element.answer_display(), "true");
}
