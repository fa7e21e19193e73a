//! Localized concept names

use crate::tag::{ConceptNameTag, TagKind};
use emr_locale::Locale;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Position-independent handle of a name within one concept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NameId(pub(crate) u32);

impl fmt::Display for NameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A name of a concept in one locale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptName {
    /// Persistent identifier, if the name has been stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept_name_id: Option<i64>,
    name: String,
    locale: Locale,
    #[serde(default)]
    tags: SmallVec<[ConceptNameTag; 2]>,
    #[serde(default)]
    voided: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    void_reason: Option<String>,
}

impl ConceptName {
    pub fn new(name: impl Into<String>, locale: Locale) -> Self {
        Self {
            concept_name_id: None,
            name: name.into(),
            locale,
            tags: SmallVec::new(),
            voided: false,
            void_reason: None,
        }
    }

    /// Set the persistent identifier
    pub fn with_id(mut self, id: i64) -> Self {
        self.concept_name_id = Some(id);
        self
    }

    /// Add a tag, builder style
    pub fn with_tag(mut self, tag: ConceptNameTag) -> Self {
        self.add_tag(tag);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn tags(&self) -> &[ConceptNameTag] {
        &self.tags
    }

    /// Add a tag; returns false when the name already had it
    ///
    /// Tags added to a name that already belongs to a concept bypass the
    /// concept's one-holder-per-locale bookkeeping, so concepts only hand out
    /// shared references to their names.
    pub fn add_tag(&mut self, tag: ConceptNameTag) -> bool {
        if self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Remove a tag; returns false when the name did not have it
    pub fn remove_tag(&mut self, tag: &ConceptNameTag) -> bool {
        match self.tags.iter().position(|t| t == tag) {
            Some(index) => {
                self.tags.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn has_tag(&self, tag: &ConceptNameTag) -> bool {
        self.tags.contains(tag)
    }

    /// Has a tag of this kind, whatever its scope
    pub fn has_tag_kind(&self, kind: &TagKind) -> bool {
        self.tags.iter().any(|t| t.kind() == kind)
    }

    /// Preferred in some scope
    pub fn is_preferred(&self) -> bool {
        self.has_tag_kind(&TagKind::Preferred)
    }

    /// Short in some scope
    pub fn is_short(&self) -> bool {
        self.has_tag_kind(&TagKind::Short)
    }

    pub fn is_fully_specified(&self) -> bool {
        self.has_tag(&ConceptNameTag::FULLY_SPECIFIED)
    }

    /// Carries the preferred tag for exactly this locale
    pub fn is_preferred_in(&self, locale: &Locale) -> bool {
        self.has_tag(&ConceptNameTag::preferred_for(locale))
    }

    /// Carries the preferred tag for a language and country
    pub fn is_preferred_in_country(&self, language: &str, country: &str) -> bool {
        Locale::new(language, Some(country)).is_ok_and(|locale| self.is_preferred_in(&locale))
    }

    pub fn is_voided(&self) -> bool {
        self.voided
    }

    pub fn void_reason(&self) -> Option<&str> {
        self.void_reason.as_deref()
    }

    /// Mark the name as voided
    pub fn void(&mut self, reason: impl Into<String>) {
        self.voided = true;
        self.void_reason = Some(reason.into());
    }

    /// Builder form of [`void`](Self::void)
    pub fn voided(mut self, reason: impl Into<String>) -> Self {
        self.void(reason);
        self
    }

    /// Whether two values denote the same stored name
    ///
    /// Stored names compare by identifier; unsaved names by text and locale.
    pub fn same_name(&self, other: &ConceptName) -> bool {
        match (self.concept_name_id, other.concept_name_id) {
            (Some(a), Some(b)) => a == b,
            _ => self.name == other.name && self.locale == other.locale,
        }
    }
}

impl fmt::Display for ConceptName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
