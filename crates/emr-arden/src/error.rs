//! Rule element errors

use thiserror::Error;

/// Result type for rule element operations
pub type RuleResult<T> = Result<T, RuleError>;

/// Failures reported by a concept or observation collaborator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The backing service could not be reached
    #[error("Service unavailable: {message}")]
    Unavailable { message: String },

    /// The service failed while answering
    #[error("Lookup failed: {message}")]
    Internal { message: String },
}

impl LookupError {
    /// Create an unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Errors raised while building, resolving or evaluating a rule element
///
/// Missing data is never an error: a concept that cannot be found or a
/// patient without observations resolves to "no observation".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The concept reference text cannot be parsed
    #[error("Malformed concept reference '{reference}': {reason}")]
    MalformedReference { reference: String, reason: String },

    /// A required collaborator was not configured
    #[error("No {service} configured for rule evaluation")]
    MissingService { service: &'static str },

    /// Evaluation was requested before the element was resolved
    #[error("Rule element must be resolved before it is evaluated")]
    NotResolved,

    /// A collaborator failed
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl RuleError {
    /// Create a malformed reference error
    pub fn malformed_reference(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedReference {
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing service error
    pub fn missing_service(service: &'static str) -> Self {
        Self::MissingService { service }
    }
}
