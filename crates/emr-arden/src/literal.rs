//! Right-hand side values and observation selection

use emr_model::Observation;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Literal an observation is compared against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleLiteral {
    Boolean(bool),
    Text(String),
    Integer(i64),
}

impl RuleLiteral {
    /// Read a literal from rule text
    ///
    /// `true`/`false` become booleans, whole numbers integers, anything else
    /// text with surrounding double quotes removed.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            return Self::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Self::Boolean(false);
        }
        if let Ok(number) = trimmed.parse::<i64>() {
            return Self::Integer(number);
        }
        let unquoted = trimmed
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .unwrap_or(trimmed);
        Self::Text(unquoted.to_string())
    }
}

impl fmt::Display for RuleLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(flag) => write!(f, "{flag}"),
            Self::Text(text) => f.write_str(text),
            Self::Integer(number) => write!(f, "{number}"),
        }
    }
}

/// Which observation a rule element looks at
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Aggregation {
    /// Whether any observation exists; reads the most recent
    #[default]
    Exist,
    Last,
    First,
    /// Qualifier the evaluator does not interpret; reads the most recent
    Other(String),
}

impl Aggregation {
    /// Pick the observation this qualifier refers to, ignoring voided ones
    pub fn select(&self, observations: Vec<Observation>) -> Option<Observation> {
        let live = observations.into_iter().filter(|obs| !obs.voided);
        match self {
            Self::First => live.min_by_key(|obs| obs.obs_datetime),
            _ => live.max_by_key(|obs| obs.obs_datetime),
        }
    }
}

impl FromStr for Aggregation {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let qualifier = s.trim();
        Ok(match qualifier.to_ascii_lowercase().as_str() {
            "" | "exist" | "exists" => Self::Exist,
            "last" => Self::Last,
            "first" => Self::First,
            _ => Self::Other(qualifier.to_string()),
        })
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exist => f.write_str("exist"),
            Self::Last => f.write_str("last"),
            Self::First => f.write_str("first"),
            Self::Other(qualifier) => f.write_str(qualifier),
        }
    }
}
