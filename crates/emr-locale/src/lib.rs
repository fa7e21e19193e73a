//! Locale handling for the EMR core
//!
//! This crate provides:
//! - [`Locale`]: a language with an optional country, parsed from
//!   specifications such as `en`, `en_US` or `pt-BR`
//! - Locale compatibility rules used by concept name resolution
//! - [`LocaleRegistry`]: the explicitly populated list of locales an
//!   installation offers, with refresh and invalidation

pub mod error;
pub mod locale;
pub mod registry;

pub use error::{LocaleError, LocaleResult};
pub use locale::{BUNDLE_PREFIX, Locale};
pub use registry::{BundleFileLocales, LocaleRegistry, LocaleSettings, LocaleSource, StaticLocales};
