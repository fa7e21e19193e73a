//! Localized concept descriptions

use emr_locale::Locale;
use serde::{Deserialize, Serialize};

/// Free-text description of a concept in one locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptDescription {
    description: String,
    locale: Locale,
}

impl ConceptDescription {
    pub fn new(description: impl Into<String>, locale: Locale) -> Self {
        Self {
            description: description.into(),
            locale,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }
}
