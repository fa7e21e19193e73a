//! CLI functionality for the emr tool
//!
//! This module contains the command implementations:
//! - Concept name listing
//! - Rule element evaluation
//! - Locale listing
//! - Output formatting

pub mod evaluate;
pub mod locales;
pub mod names;
pub mod output;

use anyhow::{Context, Result};
use emr_locale::{Locale, LocaleRegistry, LocaleSettings};
use std::path::Path;

/// Load locale settings from a file, or the built-in defaults
pub fn load_settings(path: Option<&Path>) -> Result<LocaleSettings> {
    match path {
        Some(path) => LocaleSettings::from_json_file(path)
            .with_context(|| format!("Failed to load locale settings: {}", path.display())),
        None => Ok(LocaleSettings::default()),
    }
}

/// Build a populated locale registry from optional settings
pub fn load_registry(path: Option<&Path>) -> Result<LocaleRegistry> {
    let settings = load_settings(path)?;
    LocaleRegistry::from_settings(&settings).context("Invalid locale settings")
}

/// Parse an optional `--locale` argument
pub fn parse_locale(spec: Option<&str>) -> Result<Option<Locale>> {
    spec.map(|spec| {
        Locale::from_specification(spec).with_context(|| format!("Invalid locale: '{spec}'"))
    })
    .transpose()
}
