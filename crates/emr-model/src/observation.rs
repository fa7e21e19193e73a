//! Patients and their observations

use crate::concept::Concept;
use chrono::NaiveDateTime;
use emr_locale::Locale;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Format used when rendering datetime observation values
pub const OBS_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Person whose record observations belong to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub patient_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl Patient {
    pub fn new(patient_id: i64) -> Self {
        Self {
            patient_id,
            identifier: None,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }
}

/// Recorded value of an observation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ObsValue {
    Text(String),
    Numeric(Decimal),
    Boolean(bool),
    /// Coded answer; rendered through the answer concept's best name
    Coded(Box<Concept>),
    Datetime(NaiveDateTime),
}

/// A single clinical observation about a patient
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obs_id: Option<i64>,
    pub person_id: i64,
    pub concept_id: i64,
    pub obs_datetime: NaiveDateTime,
    pub value: ObsValue,
    #[serde(default)]
    pub voided: bool,
}

impl Observation {
    pub fn new(person_id: i64, concept_id: i64, obs_datetime: NaiveDateTime, value: ObsValue) -> Self {
        Self {
            obs_id: None,
            person_id,
            concept_id,
            obs_datetime,
            value,
            voided: false,
        }
    }

    pub fn with_id(mut self, obs_id: i64) -> Self {
        self.obs_id = Some(obs_id);
        self
    }

    /// The value as display text in `locale`
    pub fn value_as_string(&self, locale: &Locale) -> String {
        match &self.value {
            ObsValue::Text(text) => text.clone(),
            ObsValue::Numeric(number) => number.normalize().to_string(),
            ObsValue::Boolean(flag) => flag.to_string(),
            ObsValue::Coded(answer) => answer
                .best_name(locale)
                .map(|name| name.name().to_string())
                .unwrap_or_default(),
            ObsValue::Datetime(when) => when.format(OBS_DATETIME_FORMAT).to_string(),
        }
    }

    /// Text value, only for text observations
    pub fn value_text(&self) -> Option<&str> {
        match &self.value {
            ObsValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric value, only for numeric observations
    pub fn value_numeric(&self) -> Option<Decimal> {
        match &self.value {
            ObsValue::Numeric(number) => Some(*number),
            _ => None,
        }
    }
}
