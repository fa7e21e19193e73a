//! Locale errors

use thiserror::Error;

/// Result type for locale operations
pub type LocaleResult<T> = Result<T, LocaleError>;

/// Errors raised while parsing locales or loading locale settings
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LocaleError {
    /// Nothing to parse
    #[error("Empty locale specification")]
    EmptySpecification,

    /// Language part is not an alphabetic ISO 639 code
    #[error("Invalid language code '{code}' in locale '{spec}'")]
    InvalidLanguage { spec: String, code: String },

    /// Country part is neither an ISO 3166 alpha code nor a numeric region
    #[error("Invalid country code '{code}' in locale '{spec}'")]
    InvalidCountry { spec: String, code: String },

    /// File name does not follow the `messages[_locale].ext` pattern
    #[error("Not a message bundle file name: {name}")]
    UnrecognizedBundle { name: String },

    /// Settings file could not be read
    #[error("Failed to read locale settings from {path}: {message}")]
    SettingsIo { path: String, message: String },

    /// Settings document could not be parsed
    #[error("Invalid locale settings: {message}")]
    InvalidSettings { message: String },
}

impl LocaleError {
    /// Create an invalid language error
    pub fn invalid_language(spec: impl Into<String>, code: impl Into<String>) -> Self {
        Self::InvalidLanguage {
            spec: spec.into(),
            code: code.into(),
        }
    }

    /// Create an invalid country error
    pub fn invalid_country(spec: impl Into<String>, code: impl Into<String>) -> Self {
        Self::InvalidCountry {
            spec: spec.into(),
            code: code.into(),
        }
    }

    /// Create an unrecognized bundle error
    pub fn unrecognized_bundle(name: impl Into<String>) -> Self {
        Self::UnrecognizedBundle { name: name.into() }
    }
}
