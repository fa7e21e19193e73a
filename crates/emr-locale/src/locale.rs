//! Locale value and specification parsing

use crate::error::{LocaleError, LocaleResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix shared by every message bundle file (`messages_fr.properties`)
pub const BUNDLE_PREFIX: &str = "messages";

/// A language with an optional country, e.g. `en` or `en_US`
///
/// The language is stored lowercase and the country uppercase, so two locales
/// parsed from `en-us` and `en_US` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    language: String,
    country: Option<String>,
}

impl Locale {
    /// Create a locale from its parts, validating both codes
    pub fn new(language: &str, country: Option<&str>) -> LocaleResult<Self> {
        let spec = match country {
            Some(c) => format!("{language}_{c}"),
            None => language.to_string(),
        };

        if language.is_empty() {
            return Err(LocaleError::EmptySpecification);
        }
        if !is_language_code(language) {
            return Err(LocaleError::invalid_language(spec, language));
        }

        let country = match country.filter(|c| !c.is_empty()) {
            Some(c) if is_country_code(c) => Some(c.to_ascii_uppercase()),
            Some(c) => return Err(LocaleError::invalid_country(spec, c)),
            None => None,
        };

        Ok(Self {
            language: language.to_ascii_lowercase(),
            country,
        })
    }

    /// Parse a locale specification such as `en`, `en_US`, `en-US` or `en_US_POSIX`
    ///
    /// Anything after the country is a variant and is discarded.
    pub fn from_specification(spec: &str) -> LocaleResult<Self> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(LocaleError::EmptySpecification);
        }

        let mut parts = trimmed.split(['_', '-']);
        let language = parts.next().unwrap_or_default();
        let country = parts.next();

        if language.is_empty() {
            return Err(LocaleError::invalid_language(trimmed, language));
        }

        Self::new(language, country).map_err(|err| match err {
            LocaleError::InvalidLanguage { code, .. } => LocaleError::invalid_language(trimmed, code),
            LocaleError::InvalidCountry { code, .. } => LocaleError::invalid_country(trimmed, code),
            other => other,
        })
    }

    /// Derive a locale from a message bundle file name
    ///
    /// `messages_fr.properties` yields `fr`. The unqualified bundle
    /// (`messages.properties`) carries no locale of its own and yields `None`;
    /// callers substitute their default locale.
    pub fn from_bundle_file_name(file_name: &str) -> LocaleResult<Option<Self>> {
        let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
        let stem = base.split('.').next().unwrap_or(base);

        let Some(rest) = stem.strip_prefix(BUNDLE_PREFIX) else {
            return Err(LocaleError::unrecognized_bundle(file_name));
        };

        if rest.is_empty() {
            return Ok(None);
        }

        match rest.strip_prefix('_') {
            Some(spec) => Self::from_specification(spec).map(Some),
            None => Err(LocaleError::unrecognized_bundle(file_name)),
        }
    }

    /// Lowercase language code
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Uppercase country code, if any
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Whether a country is present
    pub fn has_country(&self) -> bool {
        self.country.is_some()
    }

    /// The same locale with the country stripped
    pub fn language_only(&self) -> Self {
        Self {
            language: self.language.clone(),
            country: None,
        }
    }

    /// Same language, country ignored
    pub fn same_language(&self, other: &Locale) -> bool {
        self.language == other.language
    }

    /// Same language and same country (both absent counts as same)
    pub fn matches_exactly(&self, other: &Locale) -> bool {
        self == other
    }

    /// Same language, and when both sides name a country, the same country
    pub fn is_compatible_with(&self, other: &Locale) -> bool {
        if !self.same_language(other) {
            return false;
        }
        match (&self.country, &other.country) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        }
    }
}

fn is_language_code(code: &str) -> bool {
    (2..=8).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_country_code(code: &str) -> bool {
    match code.len() {
        2 => code.chars().all(|c| c.is_ascii_alphabetic()),
        3 => code.chars().all(|c| c.is_ascii_digit()),
        _ => false,
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.country {
            Some(country) => write!(f, "{}_{}", self.language, country),
            None => write!(f, "{}", self.language),
        }
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_specification(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_specification(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(spec: &str) -> Locale {
        Locale::from_specification(spec).unwrap()
    }

    #[test]
    fn test_normalizes_case() {
        let locale = loc("EN-us");
        assert_eq!(locale.language(), "en");
        assert_eq!(locale.country(), Some("US"));
        assert_eq!(locale.to_string(), "en_US");
    }

    #[test]
    fn test_variant_is_discarded() {
        assert_eq!(loc("en_US_POSIX"), loc("en_US"));
    }

    #[test]
    fn test_trailing_separator_means_no_country() {
        assert_eq!(loc("fr_"), loc("fr"));
    }

    #[test]
    fn test_rejects_bad_codes() {
        assert_eq!(
            Locale::from_specification(""),
            Err(LocaleError::EmptySpecification)
        );
        assert!(matches!(
            Locale::from_specification("e1"),
            Err(LocaleError::InvalidLanguage { .. })
        ));
        assert!(matches!(
            Locale::from_specification("en_USA"),
            Err(LocaleError::InvalidCountry { .. })
        ));
        assert!(matches!(
            Locale::from_specification("_US"),
            Err(LocaleError::InvalidLanguage { .. })
        ));
    }

    #[test]
    fn test_numeric_region() {
        let locale = loc("es_419");
        assert_eq!(locale.country(), Some("419"));
    }

    #[test]
    fn test_compatibility() {
        assert!(loc("en").is_compatible_with(&loc("en_US")));
        assert!(loc("en_US").is_compatible_with(&loc("en")));
        assert!(loc("en_US").is_compatible_with(&loc("en_US")));
        assert!(!loc("en_US").is_compatible_with(&loc("en_GB")));
        assert!(!loc("fr").is_compatible_with(&loc("en")));
    }

    #[test]
    fn test_bundle_file_names() {
        assert_eq!(
            Locale::from_bundle_file_name("messages_fr.properties"),
            Ok(Some(loc("fr")))
        );
        assert_eq!(
            Locale::from_bundle_file_name("/WEB-INF/messages_pt_BR.properties"),
            Ok(Some(loc("pt_BR")))
        );
        assert_eq!(Locale::from_bundle_file_name("messages.properties"), Ok(None));
        assert!(Locale::from_bundle_file_name("labels_fr.properties").is_err());
        assert!(Locale::from_bundle_file_name("messagesfr.properties").is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&loc("en_GB")).unwrap();
        assert_eq!(json, "\"en_GB\"");
        let back: Locale = serde_json::from_str(&json).unwrap();
        assert_eq!(back, loc("en_GB"));
        assert!(serde_json::from_str::<Locale>("\"??\"").is_err());
    }
}
