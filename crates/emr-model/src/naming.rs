//! Locale-aware name and description selection
//!
//! Every query here ignores voided names. The fallback chain for a requested
//! locale `L` is:
//!
//! 1. name tagged preferred for `L` exactly (language and country)
//! 2. name tagged preferred for `L`'s language
//! 3. name tagged plain preferred whose locale is compatible with `L`
//! 4. any name in exactly `L`
//! 5. any name in `L`'s language
//! 6. any name at all
//!
//! Steps 1-3 make up [`Concept::preferred_name`]; [`Concept::best_name`] runs
//! all six. Short names run the same chain over short tags first.

use crate::concept::Concept;
use crate::description::ConceptDescription;
use crate::index::TagKey;
use crate::name::{ConceptName, NameId};
use crate::tag::{ConceptNameTag, TagKind};
use emr_locale::Locale;

impl Concept {
    fn live_names(&self) -> impl Iterator<Item = (NameId, &ConceptName)> + '_ {
        self.names
            .iter()
            .filter(|(_, name)| !name.is_voided())
            .map(|(id, name)| (*id, name))
    }

    fn live_holder(&self, key: &TagKey) -> Option<&ConceptName> {
        self.tag_index
            .holder(key)
            .and_then(|id| self.names.get(&id))
            .filter(|name| !name.is_voided())
    }

    /// Steps 1-3 of the chain for an exclusive tag kind
    fn tagged_name(&self, kind: &TagKind, locale: &Locale) -> Option<&ConceptName> {
        if locale.has_country() {
            if let Some(name) = self.live_holder(&TagKey::scoped(kind.clone(), locale)) {
                log::trace!("{kind:?} name for {locale} found by exact scope");
                return Some(name);
            }
        }

        let language = locale.language_only();
        if let Some(name) = self.live_holder(&TagKey::scoped(kind.clone(), &language)) {
            log::trace!("{kind:?} name for {locale} found by language scope");
            return Some(name);
        }

        if let Some(name) = self.live_holder(&TagKey::plain(kind.clone(), locale)) {
            return Some(name);
        }

        let plain = ConceptNameTag::plain(kind.clone());
        self.live_names()
            .map(|(_, name)| name)
            .find(|name| name.has_tag(&plain) && name.locale().is_compatible_with(locale))
    }

    /// Non-voided names in insertion order
    pub fn names(&self) -> Vec<&ConceptName> {
        self.live_names().map(|(_, name)| name).collect()
    }

    /// Every name, voided ones included
    pub fn names_including_voided(&self) -> Vec<&ConceptName> {
        self.names.values().collect()
    }

    /// Non-voided names in exactly `locale`
    pub fn names_in_locale(&self, locale: &Locale) -> Vec<&ConceptName> {
        self.live_names()
            .map(|(_, name)| name)
            .filter(|name| name.locale() == locale)
            .collect()
    }

    /// Non-voided names whose locale is compatible with `locale`
    ///
    /// Compatible means same language, and the same country whenever both
    /// sides name one.
    pub fn compatible_names(&self, locale: &Locale) -> Vec<&ConceptName> {
        self.live_names()
            .map(|(_, name)| name)
            .filter(|name| name.locale().is_compatible_with(locale))
            .collect()
    }

    /// Name tagged preferred for `locale`, narrowing exact, language, plain
    ///
    /// Never falls back to untagged names.
    pub fn preferred_name(&self, locale: &Locale) -> Option<&ConceptName> {
        self.tagged_name(&TagKind::Preferred, locale)
    }

    /// Best display name for `locale`
    ///
    /// Returns a name whenever the concept has at least one non-voided name,
    /// even if none of them is in the requested language. When a preferred
    /// name exists for `locale` this is that same name.
    pub fn best_name(&self, locale: &Locale) -> Option<&ConceptName> {
        if let Some(preferred) = self.preferred_name(locale) {
            return Some(preferred);
        }

        let mut same_language = None;
        let mut any = None;
        for (_, name) in self.live_names() {
            if name.locale() == locale {
                return Some(name);
            }
            if same_language.is_none() && name.locale().same_language(locale) {
                same_language = Some(name);
            }
            any = any.or(Some(name));
        }

        if same_language.is_none() && any.is_some() {
            log::trace!("no name in the language of {locale}, falling back to any name");
        }
        same_language.or(any)
    }

    /// Best short name for `locale`
    ///
    /// Short-tagged names are tried first (tag chain, then any short name in
    /// `locale`, its language, or anywhere); without any short name this is
    /// [`best_name`](Self::best_name), which need not be short.
    pub fn best_short_name(&self, locale: &Locale) -> Option<&ConceptName> {
        if let Some(short) = self.tagged_name(&TagKind::Short, locale) {
            return Some(short);
        }

        let shorts: Vec<&ConceptName> = self
            .live_names()
            .map(|(_, name)| name)
            .filter(|name| name.is_short())
            .collect();

        shorts
            .iter()
            .find(|name| name.locale() == locale)
            .or_else(|| shorts.iter().find(|name| name.locale().same_language(locale)))
            .or_else(|| shorts.first())
            .copied()
            .or_else(|| self.best_name(locale))
    }

    /// Name lookup with an exactness switch
    ///
    /// With `exact` only names in exactly `locale` qualify, the preferred one
    /// first. Without it this is [`best_name`](Self::best_name).
    pub fn name(&self, locale: &Locale, exact: bool) -> Option<&ConceptName> {
        if !exact {
            return self.best_name(locale);
        }

        self.preferred_name(locale)
            .filter(|name| name.locale() == locale)
            .or_else(|| {
                self.live_names()
                    .map(|(_, name)| name)
                    .find(|name| name.locale() == locale)
            })
    }

    /// Fully specified name in a locale compatible with `locale`
    pub fn fully_specified_name(&self, locale: &Locale) -> Option<&ConceptName> {
        self.live_names()
            .map(|(_, name)| name)
            .filter(|name| name.is_fully_specified() && name.locale().is_compatible_with(locale))
            .min_by_key(|name| name.locale() != locale)
    }

    /// Description for `locale`
    ///
    /// An exact locale match wins over one in the same language regardless of
    /// order; the country is ignored for the language match. With
    /// `exact_only`, language matches are rejected.
    pub fn description(&self, locale: &Locale, exact_only: bool) -> Option<&ConceptDescription> {
        let mut same_language = None;
        for description in &self.descriptions {
            if description.locale() == locale {
                return Some(description);
            }
            if !exact_only
                && same_language.is_none()
                && description.locale().same_language(locale)
            {
                same_language = Some(description);
            }
        }
        same_language
    }
}
