//! EMR domain model
//!
//! This crate provides:
//! - [`Concept`] with localized, taggable [`ConceptName`]s and
//!   [`ConceptDescription`]s, coded answers and set membership
//! - Locale-aware name selection: preferred, short and best names with a
//!   fixed fallback order, and at most one preferred name per locale
//! - [`Patient`] and [`Observation`] values consumed by clinical rules
//! - [`NameResolver`], which resolves names against a
//!   [`LocaleRegistry`](emr_locale::LocaleRegistry)
//!
//! # Example
//!
//! ```
//! use emr_locale::Locale;
//! use emr_model::{Concept, ConceptName};
//!
//! let en_us: Locale = "en_US".parse().unwrap();
//! let mut concept = Concept::with_id(1);
//! concept.set_preferred_name(&en_us, ConceptName::new("Fever", en_us.clone()));
//! concept.add_name(ConceptName::new("Pyrexia", "en".parse().unwrap()));
//!
//! assert_eq!(concept.best_name(&en_us).unwrap().name(), "Fever");
//! ```

pub mod concept;
pub mod description;
pub mod error;
mod index;
pub mod members;
pub mod name;
pub mod naming;
pub mod observation;
pub mod resolver;
pub mod tag;

pub use concept::{Concept, ConceptRecord};
pub use description::ConceptDescription;
pub use error::{ModelError, ModelResult};
pub use members::{ConceptAnswer, ConceptSet};
pub use name::{ConceptName, NameId};
pub use observation::{OBS_DATETIME_FORMAT, ObsValue, Observation, Patient};
pub use resolver::NameResolver;
pub use tag::{ConceptNameTag, TagKind, TagScope};
