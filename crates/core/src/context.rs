//! Interface to the host site's view of the current request
//!
//! The resolver never reads global state. Everything it knows about the
//! request comes through a [`ContextProvider`]: a set of page-kind
//! predicates plus accessors scoped to the matched kind.

use crate::models::{ContentId, DateGranularity, Post, PostTypeInfo, TaxonomyInfo, Term};
use chrono::NaiveDate;

/// Read-only view of the current request and the site's content
///
/// The page-kind predicates are expected to be mutually exclusive; the
/// resolver still evaluates them in a fixed priority order.
pub trait ContextProvider {
    // Page-kind predicates

    fn is_home(&self) -> bool;

    fn is_category(&self) -> bool;

    fn is_search(&self) -> bool;

    fn is_tag(&self) -> bool;

    fn is_not_found(&self) -> bool;

    /// Granularity of the date archive being shown, if any
    fn date_archive(&self) -> Option<DateGranularity>;

    fn is_attachment(&self) -> bool;

    /// Whether a custom taxonomy archive is shown
    fn is_taxonomy(&self) -> bool;

    /// Whether a static (hierarchical) page is shown
    fn is_page(&self) -> bool;

    /// Whether a single content item is shown
    fn is_single(&self) -> bool;

    /// Post type whose archive is shown, if the request is a listing
    fn archive_post_type(&self) -> Option<String>;

    /// 1-based number of the requested listing page; 0 when unpaged
    fn paged(&self) -> u32;

    // Accessors

    /// URL of the site root
    fn home_url(&self) -> String;

    /// Term of the archive being shown
    fn queried_term(&self) -> Option<Term>;

    /// Taxonomy name of the custom taxonomy archive being shown
    fn queried_taxonomy(&self) -> Option<String>;

    /// Look up a term by id within a taxonomy
    fn term(&self, id: ContentId, taxonomy: &str) -> Option<Term>;

    /// Permalink of a term's archive
    fn term_link(&self, term: &Term) -> String;

    /// The item being shown (single item, page or attachment)
    fn current_post(&self) -> Option<Post>;

    /// Look up a content item by id
    fn post(&self, id: ContentId) -> Option<Post>;

    /// Permalink of a content item
    fn permalink(&self, post: &Post) -> String;

    /// Categories of a content item, primary category first
    fn post_categories(&self, id: ContentId) -> Vec<Term>;

    /// The search query being answered
    fn search_query(&self) -> String;

    /// The calendar date of the date archive being shown
    ///
    /// Components finer than the archive's granularity are unspecified.
    fn archive_date(&self) -> Option<NaiveDate>;

    fn year_link(&self, year: i32) -> String;

    fn month_link(&self, year: i32, month: u32) -> String;

    fn day_link(&self, year: i32, month: u32, day: u32) -> String;

    /// Registration data of a taxonomy
    fn taxonomy(&self, name: &str) -> Option<TaxonomyInfo>;

    /// Registration data of a post type
    fn post_type(&self, name: &str) -> Option<PostTypeInfo>;
}
