//! sitecrumbs_core - Core library for site breadcrumb trails
//!
//! This crate turns the "current page" of a content-managed site into an
//! ordered breadcrumb trail and renders that trail through a layered
//! formatter pipeline.
//!
//! # Features
//!
//! - **Page-Kind Resolution**: A priority-ordered rule table classifies the
//!   request (home, archives, search, 404, pages, single items, ...).
//! - **Hierarchy Walking**: Term and page parent chains become root-first
//!   breadcrumbs; the deepest of several categories picks the trail.
//! - **Layered Rendering**: Plain text, links, lists and a `<nav>` landmark
//!   compose as layers, each wrapping the output of the one below.
//! - **Localization**: Labels come from a translation catalog with a fixed
//!   fallback locale.
//!
//! # Example
//!
//! ```rust,no_run
//! use sitecrumbs_core::{Catalog, CrumbConfig, Formatter, FormatOptions, Resolver, StaticSite};
//! use std::path::Path;
//!
//! let site = StaticSite::from_path(Path::new("site.yaml")).unwrap();
//! let config = CrumbConfig::default();
//! let catalog = Catalog::new("en");
//!
//! let trail = Resolver::new(&config, &catalog).resolve(&site);
//! let html = Formatter::landmark(&FormatOptions::default()).render(&trail, &catalog);
//! println!("{}", html);
//! ```

pub mod config;
pub mod context;
pub mod engine;
pub mod hierarchy;
pub mod i18n;
pub mod models;
pub mod output;
pub mod site;
pub mod trail;

// Re-exports for convenience
pub use config::{AllowList, ConfigError, CrumbConfig, KindSwitches};
pub use context::ContextProvider;
pub use engine::{classify, rule_for, Resolver, Rule, RULES};
pub use hierarchy::{select_deepest, walk_ancestors, Hierarchical};
pub use i18n::{Catalog, CatalogError, Translator, FALLBACK_LOCALE};
pub use models::{
    Breadcrumb, ContentId, DateGranularity, PageKind, Post, PostTypeInfo, TaxonomyInfo, Term,
};
pub use output::{format_trail, FormatError, FormatOptions, Formatter, Layer, OutputFormat};
pub use site::{Request, SiteDescription, SiteError, StaticSite};
pub use trail::Trail;
