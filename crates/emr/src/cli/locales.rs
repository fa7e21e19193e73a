//! Locales command implementation

use super::{load_settings, output};
use anyhow::{Context, Result};
use emr_locale::{BundleFileLocales, Locale, LocaleRegistry};
use serde_json::{Value, json};
use std::path::PathBuf;

/// Configuration for locales command
pub struct LocalesConfig {
    pub bundle_files: Vec<PathBuf>,
    pub settings: Option<PathBuf>,
    pub verbose: bool,
    pub output_format: Option<String>,
    pub output_file: Option<PathBuf>,
}

/// List the locales the installation offers
///
/// With bundle files, locales are derived from their file names; otherwise
/// they come from the settings.
pub fn locales(config: LocalesConfig) -> Result<()> {
    let registry = build_registry(&config)?;
    if config.verbose {
        eprintln!("{registry:?}");
    }

    let default = registry.default_locale();
    let rows: Vec<Value> = registry
        .available()
        .into_iter()
        .map(|locale| locale_row(locale, locale == default))
        .collect();

    let format = output::OutputFormat::from_arg(config.output_format.as_deref());
    output::print_output(&Value::Array(rows), format, config.output_file.as_deref())
}

fn build_registry(config: &LocalesConfig) -> Result<LocaleRegistry> {
    let settings = load_settings(config.settings.as_deref())?;
    if config.bundle_files.is_empty() {
        return LocaleRegistry::from_settings(&settings).context("Invalid locale settings");
    }

    let (default_locale, _) = settings.parse_locales().context("Invalid locale settings")?;
    let file_names = config
        .bundle_files
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect();

    let mut registry = LocaleRegistry::new(
        default_locale.clone(),
        BundleFileLocales::new(file_names, default_locale),
    );
    registry
        .refresh()
        .context("Failed to read locales from bundle file names")?;
    Ok(registry)
}

fn locale_row(locale: &Locale, is_default: bool) -> Value {
    json!({
        "locale": locale.to_string(),
        "language": locale.language(),
        "country": locale.country(),
        "default": is_default,
    })
}
