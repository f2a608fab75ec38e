//! Output formatting module
//!
//! This module provides the layered formatter pipeline and the ready-made
//! formatters built from it (plain text, HTML links, HTML list, navigation
//! landmark, ANSI terminal), plus JSON and YAML serialization of trails.

pub mod ansi;
pub mod html;
mod json;
pub mod pipeline;
mod yaml;

pub use ansi::TerminalLayer;
pub use html::{escape_html, HyperlinkLayer, LandmarkLayer, ListLayer, PlainLayer};
pub use json::format_json;
pub use pipeline::{Formatter, Item, Layer, LinkDecision};
pub use yaml::format_yaml;

use crate::i18n::Translator;
use crate::trail::Trail;
use thiserror::Error;

/// Output format errors
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Titles joined by the separator
    #[default]
    Plain,
    /// Links and spans joined by the separator
    Html,
    /// `<ul>` list of links
    HtmlList,
    /// `<nav>` landmark around an HTML list
    Landmark,
    /// ANSI colored text
    Ansi,
    /// JSON array of breadcrumbs
    Json,
    /// YAML list of breadcrumbs
    Yaml,
}

/// Options shared by the markup formatters
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Text between items (plain, HTML and ANSI formats)
    pub separator: String,

    /// Classes of the `<a>`/`<span>` around each label
    pub anchor_classes: Vec<String>,

    /// Classes of the `<ul>`
    pub list_classes: Vec<String>,

    /// Classes of each `<li>`
    pub entry_classes: Vec<String>,

    /// Classes of the `<nav>`
    pub nav_classes: Vec<String>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            separator: " > ".to_string(),
            anchor_classes: Vec::new(),
            list_classes: Vec::new(),
            entry_classes: Vec::new(),
            nav_classes: Vec::new(),
        }
    }
}

impl FormatOptions {
    /// Set separator (builder pattern)
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl Formatter {
    /// Titles joined by `separator`
    pub fn plain(separator: impl Into<String>) -> Self {
        Formatter::new(PlainLayer::new(separator))
    }

    /// Hyperlinked titles joined by the separator
    pub fn html(options: &FormatOptions) -> Self {
        Formatter::plain(options.separator.clone())
            .wrap(HyperlinkLayer::new(options.anchor_classes.clone()))
    }

    /// Hyperlinked titles in a `<ul>`; list entries need no separator
    pub fn html_list(options: &FormatOptions) -> Self {
        Formatter::plain("")
            .wrap(HyperlinkLayer::new(options.anchor_classes.clone()))
            .wrap(ListLayer::new(
                options.list_classes.clone(),
                options.entry_classes.clone(),
            ))
    }

    /// An HTML list with the `breadcrumbs` class inside a `<nav>` landmark
    pub fn landmark(options: &FormatOptions) -> Self {
        let mut list_classes = vec!["breadcrumbs".to_string()];
        list_classes.extend(options.list_classes.iter().cloned());

        Formatter::plain("")
            .wrap(HyperlinkLayer::new(options.anchor_classes.clone()))
            .wrap(ListLayer::new(list_classes, options.entry_classes.clone()))
            .wrap(LandmarkLayer::new(options.nav_classes.clone()))
    }

    /// ANSI colored titles joined by `separator`
    pub fn terminal(separator: impl Into<String>) -> Self {
        Formatter::plain(separator).wrap(TerminalLayer)
    }
}

/// Format a trail in the specified format
pub fn format_trail(
    trail: &Trail,
    format: OutputFormat,
    options: &FormatOptions,
    translator: &dyn Translator,
) -> Result<String, FormatError> {
    let formatter = match format {
        OutputFormat::Json => return format_json(trail),
        OutputFormat::Yaml => return format_yaml(trail),
        OutputFormat::Plain => Formatter::plain(options.separator.clone()),
        OutputFormat::Html => Formatter::html(options),
        OutputFormat::HtmlList => Formatter::html_list(options),
        OutputFormat::Landmark => Formatter::landmark(options),
        OutputFormat::Ansi => Formatter::terminal(options.separator.clone()),
    };

    Ok(formatter.render(trail, translator))
}
