//! Translation catalog for breadcrumb labels
//!
//! Labels such as "Page 2" or the screen-reader marker are looked up by key.
//! Lookups go to the requested locale first, then to [`FALLBACK_LOCALE`],
//! and finally return the key itself, so a missing entry never breaks a
//! trail.

use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

/// Locale consulted when the requested locale lacks a key
pub const FALLBACK_LOCALE: &str = "en";

/// Translation keys used by the resolver and the formatters
pub mod keys {
    pub const HOME: &str = "home";
    pub const SEARCH_RESULTS: &str = "search.results";
    pub const NOT_FOUND: &str = "not_found";
    pub const PAGE: &str = "pagination.page";
    pub const LANDMARK_LABEL: &str = "landmark.label";
    pub const CURRENT_PAGE: &str = "landmark.current";

    /// Key of the name of `month` (1-12)
    pub fn month(month: u32) -> String {
        format!("month.{}", month)
    }
}

const EN: &[(&str, &str)] = &[
    (keys::HOME, "Home"),
    (keys::SEARCH_RESULTS, "Results for \"{query}\""),
    (keys::NOT_FOUND, "Error 404"),
    (keys::PAGE, "Page {page}"),
    (keys::LANDMARK_LABEL, "You are here:"),
    (keys::CURRENT_PAGE, "Current page: "),
    ("month.1", "January"),
    ("month.2", "February"),
    ("month.3", "March"),
    ("month.4", "April"),
    ("month.5", "May"),
    ("month.6", "June"),
    ("month.7", "July"),
    ("month.8", "August"),
    ("month.9", "September"),
    ("month.10", "October"),
    ("month.11", "November"),
    ("month.12", "December"),
];

const DE: &[(&str, &str)] = &[
    (keys::HOME, "Startseite"),
    (keys::SEARCH_RESULTS, "Suchergebnisse für \"{query}\""),
    (keys::NOT_FOUND, "Fehler 404"),
    (keys::PAGE, "Seite {page}"),
    (keys::LANDMARK_LABEL, "Sie sind hier:"),
    (keys::CURRENT_PAGE, "Aktive Seite: "),
    ("month.1", "Januar"),
    ("month.2", "Februar"),
    ("month.3", "März"),
    ("month.4", "April"),
    ("month.5", "Mai"),
    ("month.6", "Juni"),
    ("month.7", "Juli"),
    ("month.8", "August"),
    ("month.9", "September"),
    ("month.10", "Oktober"),
    ("month.11", "November"),
    ("month.12", "Dezember"),
];

/// Catalog errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid translation bundle: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Looks up localized strings by key
pub trait Translator: Send + Sync {
    /// Translate `key`, substituting `{name}` placeholders from `params`
    ///
    /// Never fails: unknown keys come back verbatim.
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String;
}

/// In-memory translation bundles keyed by locale
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: String,
    bundles: HashMap<String, HashMap<String, String>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(FALLBACK_LOCALE)
    }
}

impl Catalog {
    /// Create a catalog with the built-in `en` and `de` bundles
    pub fn new(locale: impl Into<String>) -> Self {
        Self::empty(locale)
            .with_bundle("en", EN.iter().copied())
            .with_bundle("de", DE.iter().copied())
    }

    /// Create a catalog without any bundles
    pub fn empty(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            bundles: HashMap::new(),
        }
    }

    /// Merge entries into the bundle of `locale` (builder pattern)
    pub fn with_bundle<I, K, V>(mut self, locale: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let bundle = self.bundles.entry(locale.to_string()).or_default();
        for (key, value) in entries {
            bundle.insert(key.into(), value.into());
        }
        self
    }

    /// Merge a flat YAML map of key to string into the bundle of `locale`
    pub fn with_yaml_bundle(self, locale: &str, yaml: &str) -> Result<Self, CatalogError> {
        let entries: HashMap<String, String> = serde_yaml::from_str(yaml)?;
        Ok(self.with_bundle(locale, entries))
    }

    /// Load a YAML bundle file into the bundle of `locale`
    pub fn load_bundle(self, locale: &str, path: &Path) -> Result<Self, CatalogError> {
        let yaml = fs::read_to_string(path)?;
        self.with_yaml_bundle(locale, &yaml)
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        let find = |locale: &str| {
            self.bundles
                .get(locale)
                .and_then(|bundle| bundle.get(key))
                .map(String::as_str)
        };

        find(&self.locale).or_else(|| {
            tracing::trace!(key, locale = %self.locale, "falling back to {}", FALLBACK_LOCALE);
            find(FALLBACK_LOCALE)
        })
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        match self.lookup(key) {
            Some(template) => substitute(template, params),
            None => {
                tracing::debug!(key, "missing translation");
                key.to_string()
            }
        }
    }
}

/// Replace `{name}` placeholders; unknown names stay as written
fn substitute(template: &str, params: &[(&str, &str)]) -> String {
    static PLACEHOLDER_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("valid regex"));

    if params.is_empty() {
        return template.to_string();
    }

    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            params
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_translate_with_params() {
        let catalog = Catalog::new("en");
        assert_eq!(
            catalog.translate(keys::SEARCH_RESULTS, &[("query", "rust")]),
            "Results for \"rust\""
        );
        assert_eq!(catalog.translate(keys::PAGE, &[("page", "3")]), "Page 3");
    }

    #[test]
    fn test_requested_locale_wins() {
        let catalog = Catalog::new("de");
        assert_eq!(catalog.translate(keys::PAGE, &[("page", "2")]), "Seite 2");
        assert_eq!(catalog.translate(&keys::month(3), &[]), "März");
    }

    #[test]
    fn test_fallback_locale_then_raw_key() {
        let catalog = Catalog::new("fr").with_bundle("fr", [(keys::HOME, "Accueil")]);
        assert_eq!(catalog.translate(keys::HOME, &[]), "Accueil");
        assert_eq!(catalog.translate(keys::NOT_FOUND, &[]), "Error 404");
        assert_eq!(catalog.translate("no.such.key", &[]), "no.such.key");
    }

    #[test]
    fn test_unknown_placeholder_kept() {
        let catalog = Catalog::empty("en").with_bundle("en", [("greet", "Hi {name}, {other}")]);
        assert_eq!(catalog.translate("greet", &[("name", "Ada")]), "Hi Ada, {other}");
    }

    #[test]
    fn test_load_yaml_bundle() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "home: Inicio\npagination.page: \"Página {{page}}\"").unwrap();

        let catalog = Catalog::new("es").load_bundle("es", file.path()).unwrap();
        assert_eq!(catalog.translate(keys::HOME, &[]), "Inicio");
        assert_eq!(catalog.translate(keys::PAGE, &[("page", "4")]), "Página 4");
    }

    #[test]
    fn test_invalid_yaml_bundle() {
        let result = Catalog::new("en").with_yaml_bundle("en", "- just\n- a list\n");
        assert!(matches!(result, Err(CatalogError::YamlError(_))));
    }
}
