//! Configuration module for breadcrumb resolution
//!
//! This module provides the switches that decide which page kinds produce a
//! trail, the allow-lists for custom taxonomies and post types, and loading
//! of both from YAML or JSON files.

use crate::models::PageKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Per-kind enable switches for the built-in page kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindSwitches {
    pub home: bool,
    pub categories: bool,
    pub single: bool,
    pub pages: bool,
    pub search: bool,
    pub not_found: bool,
    pub tags: bool,
    pub dates: bool,
    pub attachments: bool,
}

impl Default for KindSwitches {
    fn default() -> Self {
        Self {
            home: true,
            categories: true,
            single: true,
            pages: true,
            search: true,
            not_found: true,
            tags: true,
            dates: true,
            attachments: true,
        }
    }
}

impl KindSwitches {
    /// Get the switch of a built-in kind
    ///
    /// Custom taxonomy and post type archives have no switch; they are
    /// governed by the allow-lists on [`CrumbConfig`].
    pub fn switch_mut(&mut self, kind: PageKind) -> Option<&mut bool> {
        match kind {
            PageKind::Home => Some(&mut self.home),
            PageKind::Category => Some(&mut self.categories),
            PageKind::Single => Some(&mut self.single),
            PageKind::Page => Some(&mut self.pages),
            PageKind::Search => Some(&mut self.search),
            PageKind::NotFound => Some(&mut self.not_found),
            PageKind::Tag => Some(&mut self.tags),
            PageKind::Date => Some(&mut self.dates),
            PageKind::Attachment => Some(&mut self.attachments),
            PageKind::Taxonomy | PageKind::PostTypeArchive => None,
        }
    }
}

/// A set of enabled names, or every name
///
/// Deserializes from `"all"`, `"none"` or a list of names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AllowListRepr", into = "AllowListRepr")]
pub enum AllowList {
    All,
    Only(BTreeSet<String>),
}

impl Default for AllowList {
    fn default() -> Self {
        AllowList::none()
    }
}

impl AllowList {
    pub fn none() -> Self {
        AllowList::Only(BTreeSet::new())
    }

    pub fn all() -> Self {
        AllowList::All
    }

    /// Allow exactly the given names
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AllowList::Only(names.into_iter().map(Into::into).collect())
    }

    /// Check if `name` is allowed
    pub fn allows(&self, name: &str) -> bool {
        match self {
            AllowList::All => true,
            AllowList::Only(names) => names.contains(name),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum AllowListRepr {
    Keyword(String),
    Names(Vec<String>),
}

impl TryFrom<AllowListRepr> for AllowList {
    type Error = String;

    fn try_from(repr: AllowListRepr) -> Result<Self, Self::Error> {
        match repr {
            AllowListRepr::Keyword(word) => match word.as_str() {
                "all" => Ok(AllowList::All),
                "none" => Ok(AllowList::none()),
                other => Err(format!(
                    "expected \"all\", \"none\" or a list of names, got \"{}\"",
                    other
                )),
            },
            AllowListRepr::Names(names) => Ok(AllowList::only(names)),
        }
    }
}

impl From<AllowList> for AllowListRepr {
    fn from(list: AllowList) -> Self {
        match list {
            AllowList::All => AllowListRepr::Keyword("all".to_string()),
            AllowList::Only(names) => AllowListRepr::Names(names.into_iter().collect()),
        }
    }
}

/// Configuration for breadcrumb resolution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrumbConfig {
    /// Enable switches of the built-in page kinds
    pub kinds: KindSwitches,

    /// Custom taxonomies whose archives get a trail
    pub custom_taxonomies: AllowList,

    /// Custom post types whose items and archives get a trail
    pub custom_post_types: AllowList,

    /// Taxonomies that have a listing page to link to
    pub taxonomy_archives: AllowList,

    /// Title of the first breadcrumb; translated "home" when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_label: Option<String>,
}

impl CrumbConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn a built-in page kind on or off (builder pattern)
    pub fn with_kind(mut self, kind: PageKind, enabled: bool) -> Self {
        match self.kinds.switch_mut(kind) {
            Some(switch) => *switch = enabled,
            None => {
                tracing::warn!(kind = kind.label(), "page kind has no switch; use the allow-lists")
            }
        }
        self
    }

    /// Set custom taxonomy allow-list (builder pattern)
    pub fn with_custom_taxonomies(mut self, list: AllowList) -> Self {
        self.custom_taxonomies = list;
        self
    }

    /// Set custom post type allow-list (builder pattern)
    pub fn with_custom_post_types(mut self, list: AllowList) -> Self {
        self.custom_post_types = list;
        self
    }

    /// Set taxonomy listing-page allow-list (builder pattern)
    pub fn with_taxonomy_archives(mut self, list: AllowList) -> Self {
        self.taxonomy_archives = list;
        self
    }

    /// Set home breadcrumb title (builder pattern)
    pub fn with_home_label(mut self, label: impl Into<String>) -> Self {
        self.home_label = Some(label.into());
        self
    }

    /// Parse a YAML configuration
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(ConfigError::from)
    }

    /// Parse a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(ConfigError::from)
    }

    /// Load a configuration file, picking the format from its extension
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&fs::read_to_string(path)?),
            "json" => Self::from_json_str(&fs::read_to_string(path)?),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults() {
        let config = CrumbConfig::default();
        assert_eq!(config.kinds, KindSwitches::default());
        assert!(config.kinds.categories);
        assert!(config.kinds.attachments);
        assert!(!config.custom_taxonomies.allows("genre"));
        assert!(!config.custom_post_types.allows("book"));
        assert!(!config.taxonomy_archives.allows("genre"));
        assert!(config.home_label.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = CrumbConfig::new()
            .with_kind(PageKind::Search, false)
            .with_custom_post_types(AllowList::only(["book"]))
            .with_taxonomy_archives(AllowList::all())
            .with_home_label("Start");

        assert!(!config.kinds.search);
        assert!(config.kinds.tags);
        assert!(config.custom_post_types.allows("book"));
        assert!(!config.custom_post_types.allows("movie"));
        assert!(config.taxonomy_archives.allows("anything"));
        assert_eq!(config.home_label.as_deref(), Some("Start"));
    }

    #[test]
    fn test_yaml_allow_lists() {
        let config = CrumbConfig::from_yaml_str(
            r#"
kinds:
  tags: false
custom_taxonomies: all
custom_post_types: [book, movie]
taxonomy_archives: none
"#,
        )
        .unwrap();

        assert!(!config.kinds.tags);
        assert!(config.kinds.categories);
        assert_eq!(config.custom_taxonomies, AllowList::All);
        assert!(config.custom_post_types.allows("movie"));
        assert_eq!(config.taxonomy_archives, AllowList::none());
    }

    #[test]
    fn test_yaml_rejects_unknown_keyword() {
        let result = CrumbConfig::from_yaml_str("custom_taxonomies: some\n");
        assert!(matches!(result, Err(ConfigError::YamlError(_))));
    }

    #[test]
    fn test_from_path_json() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"home_label": "Start", "custom_post_types": "all"}}"#).unwrap();

        let config = CrumbConfig::from_path(file.path()).unwrap();
        assert_eq!(config.home_label.as_deref(), Some("Start"));
        assert_eq!(config.custom_post_types, AllowList::All);
    }

    #[test]
    fn test_from_path_unsupported() {
        let file = Builder::new().suffix(".ini").tempfile().unwrap();
        let result = CrumbConfig::from_path(file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_allow_list_roundtrip_shape() {
        let json = serde_json::to_string(&AllowList::only(["b", "a"])).unwrap();
        assert_eq!(json, r#"["a","b"]"#);
        assert_eq!(serde_json::to_string(&AllowList::All).unwrap(), r#""all""#);
    }
}
