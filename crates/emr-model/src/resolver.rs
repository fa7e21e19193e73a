//! Name resolution against the installation's locale registry

use crate::concept::Concept;
use crate::name::ConceptName;
use emr_locale::{Locale, LocaleRegistry};
use indexmap::IndexMap;

/// Resolves concept names using an explicit [`LocaleRegistry`]
///
/// The resolver owns the registry; callers refresh or invalidate it through
/// [`registry_mut`](Self::registry_mut) when the installation's locales change.
#[derive(Debug)]
pub struct NameResolver {
    registry: LocaleRegistry,
}

impl NameResolver {
    pub fn new(registry: LocaleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut LocaleRegistry {
        &mut self.registry
    }

    /// The requested locale, or the registry default when none is given
    pub fn effective_locale(&self, requested: Option<&Locale>) -> Locale {
        match requested {
            Some(locale) => locale.clone(),
            None => self.registry.default_locale().clone(),
        }
    }

    /// Best name in the requested locale, or in the default locale when none is given
    pub fn display_name<'c>(&self, concept: &'c Concept, locale: Option<&Locale>) -> Option<&'c ConceptName> {
        concept.best_name(&self.effective_locale(locale))
    }

    /// Best short name in the requested or default locale
    pub fn display_short_name<'c>(
        &self,
        concept: &'c Concept,
        locale: Option<&Locale>,
    ) -> Option<&'c ConceptName> {
        concept.best_short_name(&self.effective_locale(locale))
    }

    /// For every available locale, the best name that is actually compatible with it
    ///
    /// Locales the concept has no compatible name for are left out.
    pub fn names_by_locale<'c>(&self, concept: &'c Concept) -> IndexMap<Locale, &'c ConceptName> {
        self.registry
            .available()
            .into_iter()
            .filter_map(|locale| {
                concept
                    .best_name(locale)
                    .filter(|name| name.locale().is_compatible_with(locale))
                    .map(|name| (locale.clone(), name))
            })
            .collect()
    }

    /// Available locales the concept has no compatible name for
    pub fn missing_locales(&self, concept: &Concept) -> Vec<Locale> {
        self.registry
            .available()
            .into_iter()
            .filter(|locale| concept.compatible_names(locale).is_empty())
            .cloned()
            .collect()
    }
}
