//! Concept name tags
//!
//! A tag has a kind and a scope. Scoped tags (`preferred_en_US`, `short_fr`)
//! designate a name for one locale; plain tags (`preferred`, `short`) carry no
//! locale restriction. The string form is what datasets store.

use crate::error::{ModelError, ModelResult};
use emr_locale::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a tag says about a name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// Canonical display choice
    Preferred,
    /// Abbreviated form
    Short,
    /// Unambiguous full form
    FullySpecified,
    /// Site-defined tag
    Custom(String),
}

impl TagKind {
    /// Keyword used in the string form, `None` for custom tags
    pub const fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Preferred => Some("preferred"),
            Self::Short => Some("short"),
            Self::FullySpecified => Some("fully_specified"),
            Self::Custom(_) => None,
        }
    }

    /// Whether a concept keeps at most one holder of this kind per scope
    pub const fn is_exclusive(&self) -> bool {
        matches!(self, Self::Preferred | Self::Short)
    }
}

/// Locale restriction of a tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagScope {
    /// No locale restriction
    Plain,
    /// Applies to exactly this locale (language, or language and country)
    Locale(Locale),
}

/// A tag attached to a concept name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConceptNameTag {
    kind: TagKind,
    scope: TagScope,
}

impl ConceptNameTag {
    /// Plain preferred tag
    pub const PREFERRED: Self = Self::plain(TagKind::Preferred);
    /// Plain short tag
    pub const SHORT: Self = Self::plain(TagKind::Short);
    /// Fully specified tag
    pub const FULLY_SPECIFIED: Self = Self::plain(TagKind::FullySpecified);

    /// Tag without locale restriction
    pub const fn plain(kind: TagKind) -> Self {
        Self {
            kind,
            scope: TagScope::Plain,
        }
    }

    /// Tag restricted to one locale
    pub fn scoped(kind: TagKind, locale: &Locale) -> Self {
        Self {
            kind,
            scope: TagScope::Locale(locale.clone()),
        }
    }

    /// Preferred tag for a locale, e.g. `preferred_en_US`
    pub fn preferred_for(locale: &Locale) -> Self {
        Self::scoped(TagKind::Preferred, locale)
    }

    /// Short tag for a locale, e.g. `short_fr`
    pub fn short_for(locale: &Locale) -> Self {
        Self::scoped(TagKind::Short, locale)
    }

    /// Site-defined tag
    pub fn custom(text: impl Into<String>) -> Self {
        Self::plain(TagKind::Custom(text.into()))
    }

    pub fn kind(&self) -> &TagKind {
        &self.kind
    }

    pub fn scope(&self) -> &TagScope {
        &self.scope
    }

    /// The locale this tag is restricted to
    pub fn locale(&self) -> Option<&Locale> {
        match &self.scope {
            TagScope::Plain => None,
            TagScope::Locale(locale) => Some(locale),
        }
    }

    pub fn is_plain(&self) -> bool {
        self.scope == TagScope::Plain
    }
}

impl fmt::Display for ConceptNameTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.scope) {
            (TagKind::Custom(text), _) => write!(f, "{text}"),
            (kind, TagScope::Plain) => write!(f, "{}", kind.keyword().unwrap_or_default()),
            (kind, TagScope::Locale(locale)) => {
                write!(f, "{}_{}", kind.keyword().unwrap_or_default(), locale)
            }
        }
    }
}

impl FromStr for ConceptNameTag {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        let text = s.trim();
        if text.is_empty() {
            return Err(ModelError::invalid_tag(s, "tag is empty"));
        }

        match text {
            "preferred" => return Ok(Self::PREFERRED),
            "short" => return Ok(Self::SHORT),
            "fully_specified" => return Ok(Self::FULLY_SPECIFIED),
            _ => {}
        }

        for kind in [TagKind::Preferred, TagKind::Short] {
            let prefix = kind.keyword().unwrap_or_default();
            if let Some(spec) = text
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('_'))
            {
                let locale = Locale::from_specification(spec)
                    .map_err(|e| ModelError::invalid_tag(text, e.to_string()))?;
                return Ok(Self::scoped(kind, &locale));
            }
        }

        Ok(Self::custom(text))
    }
}

impl TryFrom<String> for ConceptNameTag {
    type Error = ModelError;

    fn try_from(value: String) -> ModelResult<Self> {
        value.parse()
    }
}

impl From<ConceptNameTag> for String {
    fn from(tag: ConceptNameTag) -> Self {
        tag.to_string()
    }
}
