//! EMR core
//!
//! This crate ties together:
//! - [`locale`]: locale values and the available-locale registry
//! - [`model`]: concepts with localized names, patients and observations
//! - [`arden`]: clinical rule elements evaluated against observations
//! - [`dataset`]: JSON datasets with in-memory lookup services
//!
//! # Example
//!
//! ```
//! use emr::{Dataset, RuleElement};
//! use emr::model::Patient;
//!
//! let dataset = Dataset::from_json(r#"{
//!     "concepts": [{ "conceptId": 1, "names": [{ "name": "Fever", "locale": "en" }] }],
//!     "observations": [{
//!         "personId": 7, "conceptId": 1, "obsDatetime": "2024-03-01T09:30:00",
//!         "value": { "type": "boolean", "value": true }
//!     }]
//! }"#).unwrap();
//!
//! let mut element = RuleElement::new("{Fever from obs}", "last", "").unwrap();
//! element.resolve(&dataset.rule_context(), &"en".parse().unwrap(), &Patient::new(7)).unwrap();
//! assert!(element.evaluate().unwrap());
//! ```

pub use emr_arden as arden;
pub use emr_locale as locale;
pub use emr_model as model;

pub use emr_arden::{RuleContext, RuleElement, RuleError, RuleLiteral};
pub use emr_locale::{Locale, LocaleRegistry, LocaleSettings};
pub use emr_model::{Concept, ConceptName, NameResolver};

pub mod dataset;

pub use dataset::{Dataset, DatasetError, InMemoryConceptDictionary, InMemoryObservationStore};

// CLI module (only available with cli feature)
#[cfg(feature = "cli")]
pub mod cli;
