//! Comparison operators of a rule element

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Operator comparing the observation with the element's literal
///
/// Operators the evaluator does not implement are kept verbatim so they can
/// still be reported; they always evaluate to false.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ComparisonOperator {
    #[default]
    Equals,
    Unsupported(String),
}

impl ComparisonOperator {
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}

impl FromStr for ComparisonOperator {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = s.trim();
        Ok(match op.to_ascii_uppercase().as_str() {
            "=" | "==" | "EQ" | "EQUALS" | "IS" => Self::Equals,
            _ => Self::Unsupported(op.to_string()),
        })
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals => f.write_str("="),
            Self::Unsupported(op) => f.write_str(op),
        }
    }
}
