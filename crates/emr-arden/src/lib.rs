//! Arden-style clinical rule elements
//!
//! A [`RuleElement`] is one data reference inside a medical logic module:
//! a concept named in rule text, a qualifier choosing which observation to
//! read, and a comparison against a literal. Elements are resolved against
//! injected [`ConceptLookup`] and [`ObservationStore`] services for a single
//! patient and evaluated once.
//!
//! # Example
//!
//! ```
//! use emr_arden::{ConceptLookup, LookupError, ObservationStore, RuleContext, RuleElement};
//! use emr_locale::Locale;
//! use emr_model::{Concept, Observation, Patient};
//! use std::sync::Arc;
//!
//! struct NoConcepts;
//!
//! impl ConceptLookup for NoConcepts {
//!     fn find_concept(&self, _: &str, _: &Locale) -> Result<Option<Concept>, LookupError> {
//!         Ok(None)
//!     }
//! }
//!
//! impl ObservationStore for NoConcepts {
//!     fn observations_for(&self, _: &Patient, _: &Concept) -> Result<Vec<Observation>, LookupError> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! let services = Arc::new(NoConcepts);
//! let ctx = RuleContext::new()
//!     .with_concept_lookup(services.clone())
//!     .with_observation_store(services);
//!
//! let mut element = RuleElement::new("{Fever from obs}", "last", "").unwrap();
//! let found = element.resolve(&ctx, &"en".parse().unwrap(), &Patient::new(1)).unwrap();
//! assert!(!found);
//! assert!(!element.evaluate().unwrap());
//! ```

pub mod element;
pub mod error;
pub mod literal;
pub mod operator;
pub mod reference;
pub mod services;

pub use element::{ElementState, RuleElement};
pub use error::{LookupError, RuleError, RuleResult};
pub use literal::{Aggregation, RuleLiteral};
pub use operator::ComparisonOperator;
pub use reference::ConceptReference;
pub use services::{ConceptLookup, ObservationStore, RuleContext};
