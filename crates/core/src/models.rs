//! Data models for breadcrumb trails
//!
//! This module defines the core data structures used throughout the crate,
//! including breadcrumbs, page kinds, and the content records a context
//! provider hands to the resolver.

use serde::{Deserialize, Serialize};

/// Identifier of a term or post in the host site
pub type ContentId = u64;

/// Post type name of regular blog posts
pub const DEFAULT_POST_TYPE: &str = "post";

/// Taxonomy name of categories
pub const CATEGORY_TAXONOMY: &str = "category";

/// Taxonomy name of tags
pub const TAG_TAXONOMY: &str = "post_tag";

/// A single entry in a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Visible title
    pub title: String,

    /// Link target; empty when the breadcrumb links nowhere
    #[serde(default)]
    pub url: String,

    /// Whether this breadcrumb belongs to the current page
    #[serde(default)]
    pub active: bool,
}

impl Breadcrumb {
    /// Create a linked breadcrumb
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            active: false,
        }
    }

    /// Create a breadcrumb without a link
    pub fn unlinked(title: impl Into<String>) -> Self {
        Self::new(title, String::new())
    }

    /// Check if this breadcrumb carries a URL
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

/// The mutually exclusive classification of the current request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Home,
    Category,
    Search,
    Tag,
    NotFound,
    Date,
    Attachment,
    Taxonomy,
    Page,
    Single,
    PostTypeArchive,
}

impl PageKind {
    /// Get human-readable label for the page kind
    pub fn label(&self) -> &'static str {
        match self {
            PageKind::Home => "home",
            PageKind::Category => "category archive",
            PageKind::Search => "search results",
            PageKind::Tag => "tag archive",
            PageKind::NotFound => "not found",
            PageKind::Date => "date archive",
            PageKind::Attachment => "attachment",
            PageKind::Taxonomy => "taxonomy archive",
            PageKind::Page => "page",
            PageKind::Single => "single item",
            PageKind::PostTypeArchive => "post type archive",
        }
    }
}

/// Granularity of a date archive request
///
/// Ordered so that `Day > Month > Year`: a day archive also shows the month
/// and the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateGranularity {
    Year,
    Month,
    Day,
}

/// A node in a hierarchical taxonomy (category, tag, custom taxonomy)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: ContentId,

    pub name: String,

    pub slug: String,

    /// Name of the taxonomy this term belongs to
    #[serde(default = "default_taxonomy")]
    pub taxonomy: String,

    /// Parent term in the same taxonomy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ContentId>,
}

fn default_taxonomy() -> String {
    CATEGORY_TAXONOMY.to_string()
}

/// A content item: post, page, attachment or custom post type entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: ContentId,

    pub title: String,

    pub slug: String,

    #[serde(default = "default_post_type")]
    pub post_type: String,

    /// Parent page of a page, or the item an attachment belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ContentId>,

    /// Category ids, primary category first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<ContentId>,
}

fn default_post_type() -> String {
    DEFAULT_POST_TYPE.to_string()
}

impl Post {
    /// Check if this item uses the default post type
    pub fn is_default_type(&self) -> bool {
        self.post_type == DEFAULT_POST_TYPE
    }
}

/// Registration data of a taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyInfo {
    pub name: String,

    /// Plural display label, e.g. "Genres"
    pub label: String,

    /// URL slug of the taxonomy's listing page
    pub slug: String,
}

/// Registration data of a post type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTypeInfo {
    pub name: String,

    /// Plural display label, e.g. "Books"
    pub label: String,

    /// URL slug of the type's archive
    pub slug: String,

    /// Whether the type declares an archive page
    #[serde(default)]
    pub has_archive: bool,
}
