//! Available-locale registry
//!
//! The registry is explicit state: it is created with a default locale and a
//! [`LocaleSource`], populated by calling [`LocaleRegistry::refresh`], and
//! emptied again by [`LocaleRegistry::invalidate`]. Reading the available
//! locales never triggers discovery.

use crate::error::{LocaleError, LocaleResult};
use crate::locale::Locale;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Something that can enumerate the locales an installation supports
pub trait LocaleSource: Send + Sync {
    /// Discover the supported locales
    fn discover(&self) -> LocaleResult<Vec<Locale>>;
}

/// A fixed list of locales
#[derive(Debug, Clone, Default)]
pub struct StaticLocales {
    locales: Vec<Locale>,
}

impl StaticLocales {
    pub fn new(locales: Vec<Locale>) -> Self {
        Self { locales }
    }
}

impl LocaleSource for StaticLocales {
    fn discover(&self) -> LocaleResult<Vec<Locale>> {
        Ok(self.locales.clone())
    }
}

/// Locales derived from message bundle file names
///
/// The unqualified `messages.properties` bundle maps to `default_locale`.
#[derive(Debug, Clone)]
pub struct BundleFileLocales {
    file_names: Vec<String>,
    default_locale: Locale,
}

impl BundleFileLocales {
    pub fn new(file_names: Vec<String>, default_locale: Locale) -> Self {
        Self {
            file_names,
            default_locale,
        }
    }
}

impl LocaleSource for BundleFileLocales {
    fn discover(&self) -> LocaleResult<Vec<Locale>> {
        self.file_names
            .iter()
            .map(|name| {
                Locale::from_bundle_file_name(name)
                    .map(|parsed| parsed.unwrap_or_else(|| self.default_locale.clone()))
            })
            .collect()
    }
}

/// Locale settings as stored in a JSON settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleSettings {
    /// Locale used when a caller does not ask for one
    pub default_locale: String,
    /// Locales offered by the installation, in display order
    #[serde(default)]
    pub allowed_locales: Vec<String>,
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            allowed_locales: ["en_US", "en_GB", "fr", "es", "pt"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl LocaleSettings {
    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> LocaleResult<Self> {
        serde_json::from_str(json).map_err(|e| LocaleError::InvalidSettings {
            message: e.to_string(),
        })
    }

    /// Load settings from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> LocaleResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| LocaleError::SettingsIo {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// Parse every configured locale
    pub fn parse_locales(&self) -> LocaleResult<(Locale, Vec<Locale>)> {
        let default = Locale::from_specification(&self.default_locale)?;
        let allowed = self
            .allowed_locales
            .iter()
            .map(|spec| Locale::from_specification(spec))
            .collect::<LocaleResult<Vec<_>>>()?;
        Ok((default, allowed))
    }
}

/// Registry of the locales available to name resolution
pub struct LocaleRegistry {
    default_locale: Locale,
    source: Box<dyn LocaleSource>,
    available: Option<IndexSet<Locale>>,
}

impl LocaleRegistry {
    /// Create an unpopulated registry; call [`refresh`](Self::refresh) before use
    pub fn new(default_locale: Locale, source: impl LocaleSource + 'static) -> Self {
        Self {
            default_locale,
            source: Box::new(source),
            available: None,
        }
    }

    /// Create a registry from settings and populate it
    pub fn from_settings(settings: &LocaleSettings) -> LocaleResult<Self> {
        let (default, allowed) = settings.parse_locales()?;
        let mut registry = Self::new(default, StaticLocales::new(allowed));
        registry.refresh()?;
        Ok(registry)
    }

    /// Re-run discovery against the source, replacing the current list
    ///
    /// The default locale is always part of the populated list. Returns the
    /// number of available locales.
    pub fn refresh(&mut self) -> LocaleResult<usize> {
        let discovered = self.source.discover()?;
        if discovered.is_empty() {
            log::warn!("locale source yielded no locales, only {} is available", self.default_locale);
        }

        let mut available: IndexSet<Locale> = discovered.into_iter().collect();
        available.insert(self.default_locale.clone());
        log::debug!("locale registry refreshed with {} locales", available.len());

        let count = available.len();
        self.available = Some(available);
        Ok(count)
    }

    /// Drop the populated list; the registry reports no locales until refreshed
    pub fn invalidate(&mut self) {
        self.available = None;
    }

    /// Whether [`refresh`](Self::refresh) has populated the registry
    pub fn is_populated(&self) -> bool {
        self.available.is_some()
    }

    /// Available locales in discovery order; empty when not populated
    pub fn available(&self) -> Vec<&Locale> {
        self.available
            .as_ref()
            .map(|set| set.iter().collect())
            .unwrap_or_default()
    }

    /// Whether the exact locale is available
    pub fn contains(&self, locale: &Locale) -> bool {
        self.available
            .as_ref()
            .is_some_and(|set| set.contains(locale))
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Change the default locale; takes effect in the list at the next refresh
    pub fn set_default_locale(&mut self, locale: Locale) {
        self.default_locale = locale;
    }

    /// Closest available locale to `requested`
    ///
    /// Exact match first, then the first compatible locale, then the default.
    pub fn best_match(&self, requested: &Locale) -> &Locale {
        let Some(available) = &self.available else {
            return &self.default_locale;
        };

        if let Some(exact) = available.get(requested) {
            return exact;
        }

        available
            .iter()
            .find(|candidate| candidate.is_compatible_with(requested))
            .unwrap_or(&self.default_locale)
    }
}

impl std::fmt::Debug for LocaleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleRegistry")
            .field("default_locale", &self.default_locale)
            .field("available", &self.available)
            .finish_non_exhaustive()
    }
}
