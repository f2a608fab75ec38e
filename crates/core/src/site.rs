//! In-memory site used as a context provider
//!
//! A [`SiteDescription`] lists the content of a site together with the
//! request being served. [`StaticSite`] indexes it and answers the
//! [`ContextProvider`] questions, deriving permalinks from slugs.

use crate::context::ContextProvider;
use crate::models::{
    ContentId, DateGranularity, Post, PostTypeInfo, TaxonomyInfo, Term, CATEGORY_TAXONOMY,
    TAG_TAXONOMY,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Site loading errors
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unsupported site format: {0}")]
    UnsupportedFormat(String),

    #[error("Duplicate {0} id: {1}")]
    DuplicateId(&'static str, ContentId),

    #[error("Request references unknown term: {0}")]
    UnknownTerm(ContentId),

    #[error("Term {term} belongs to taxonomy \"{found}\", not \"{expected}\"")]
    TaxonomyMismatch {
        term: ContentId,
        expected: String,
        found: String,
    },

    #[error("Request references unknown post: {0}")]
    UnknownPost(ContentId),

    #[error("Invalid archive date: {0}")]
    InvalidDate(String),
}

/// The request being served
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Request {
    Home,
    Category {
        term: ContentId,
    },
    Search {
        query: String,
    },
    Tag {
        term: ContentId,
    },
    NotFound,
    Date {
        year: i32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        month: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        day: Option<u32>,
    },
    Attachment {
        post: ContentId,
    },
    Taxonomy {
        taxonomy: String,
        term: ContentId,
    },
    Page {
        post: ContentId,
    },
    Single {
        post: ContentId,
    },
    PostTypeArchive {
        post_type: String,
    },
}

/// Serializable description of a site and its current request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteDescription {
    pub home_url: String,

    #[serde(default)]
    pub terms: Vec<Term>,

    #[serde(default)]
    pub posts: Vec<Post>,

    #[serde(default)]
    pub taxonomies: Vec<TaxonomyInfo>,

    #[serde(default)]
    pub post_types: Vec<PostTypeInfo>,

    pub request: Request,

    /// Requested listing page, 0 or 1 for the first page
    #[serde(default)]
    pub paged: u32,
}

/// Indexed site answering context queries
#[derive(Debug, Clone)]
pub struct StaticSite {
    home_url: String,
    terms: HashMap<ContentId, Term>,
    posts: HashMap<ContentId, Post>,
    taxonomies: HashMap<String, TaxonomyInfo>,
    post_types: HashMap<String, PostTypeInfo>,
    request: Request,
    paged: u32,
}

impl StaticSite {
    /// Index a site description and validate its request
    pub fn new(description: SiteDescription) -> Result<Self, SiteError> {
        let mut terms = HashMap::with_capacity(description.terms.len());
        for term in description.terms {
            if let Some(dup) = terms.insert(term.id, term) {
                return Err(SiteError::DuplicateId("term", dup.id));
            }
        }

        let mut posts = HashMap::with_capacity(description.posts.len());
        for post in description.posts {
            if let Some(dup) = posts.insert(post.id, post) {
                return Err(SiteError::DuplicateId("post", dup.id));
            }
        }

        let site = Self {
            home_url: description.home_url,
            terms,
            posts,
            taxonomies: description
                .taxonomies
                .into_iter()
                .map(|t| (t.name.clone(), t))
                .collect(),
            post_types: description
                .post_types
                .into_iter()
                .map(|t| (t.name.clone(), t))
                .collect(),
            request: description.request,
            paged: description.paged,
        };

        site.validate_request()?;
        Ok(site)
    }

    /// Parse and index a YAML site description
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SiteError> {
        Self::new(serde_yaml::from_str(yaml)?)
    }

    /// Parse and index a JSON site description
    pub fn from_json_str(json: &str) -> Result<Self, SiteError> {
        Self::new(serde_json::from_str(json)?)
    }

    /// Load a site description file, picking the format from its extension
    pub fn from_path(path: &Path) -> Result<Self, SiteError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&fs::read_to_string(path)?),
            "json" => Self::from_json_str(&fs::read_to_string(path)?),
            _ => Err(SiteError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn validate_request(&self) -> Result<(), SiteError> {
        match &self.request {
            Request::Category { term } => self.check_term(*term, CATEGORY_TAXONOMY)?,
            Request::Tag { term } => self.check_term(*term, TAG_TAXONOMY)?,
            Request::Taxonomy { taxonomy, term } => self.check_term(*term, taxonomy)?,
            Request::Attachment { post } | Request::Page { post } | Request::Single { post } => {
                if !self.posts.contains_key(post) {
                    return Err(SiteError::UnknownPost(*post));
                }
            }
            Request::Date { year, month, day } => {
                if day.is_some() && month.is_none() {
                    return Err(SiteError::InvalidDate(format!(
                        "{}: a day archive needs a month",
                        year
                    )));
                }
                if self.archive_date().is_none() {
                    return Err(SiteError::InvalidDate(format!(
                        "{}-{}-{}",
                        year,
                        month.unwrap_or(1),
                        day.unwrap_or(1)
                    )));
                }
            }
            Request::Home
            | Request::Search { .. }
            | Request::NotFound
            | Request::PostTypeArchive { .. } => {}
        }
        Ok(())
    }

    fn check_term(&self, id: ContentId, taxonomy: &str) -> Result<(), SiteError> {
        match self.terms.get(&id) {
            None => Err(SiteError::UnknownTerm(id)),
            Some(term) if term.taxonomy != taxonomy => Err(SiteError::TaxonomyMismatch {
                term: id,
                expected: taxonomy.to_string(),
                found: term.taxonomy.clone(),
            }),
            Some(_) => Ok(()),
        }
    }

    /// Join a path below the home URL, with a trailing slash
    fn site_url(&self, path: &str) -> String {
        format!("{}/{}/", self.home_url.trim_end_matches('/'), path)
    }
}

impl ContextProvider for StaticSite {
    fn is_home(&self) -> bool {
        matches!(self.request, Request::Home)
    }

    fn is_category(&self) -> bool {
        matches!(self.request, Request::Category { .. })
    }

    fn is_search(&self) -> bool {
        matches!(self.request, Request::Search { .. })
    }

    fn is_tag(&self) -> bool {
        matches!(self.request, Request::Tag { .. })
    }

    fn is_not_found(&self) -> bool {
        matches!(self.request, Request::NotFound)
    }

    fn date_archive(&self) -> Option<DateGranularity> {
        match self.request {
            Request::Date { day: Some(_), .. } => Some(DateGranularity::Day),
            Request::Date { month: Some(_), .. } => Some(DateGranularity::Month),
            Request::Date { .. } => Some(DateGranularity::Year),
            _ => None,
        }
    }

    fn is_attachment(&self) -> bool {
        matches!(self.request, Request::Attachment { .. })
    }

    fn is_taxonomy(&self) -> bool {
        matches!(self.request, Request::Taxonomy { .. })
    }

    fn is_page(&self) -> bool {
        matches!(self.request, Request::Page { .. })
    }

    fn is_single(&self) -> bool {
        matches!(self.request, Request::Single { .. })
    }

    fn archive_post_type(&self) -> Option<String> {
        match &self.request {
            Request::PostTypeArchive { post_type } => Some(post_type.clone()),
            _ => None,
        }
    }

    fn paged(&self) -> u32 {
        self.paged
    }

    fn home_url(&self) -> String {
        self.home_url.clone()
    }

    fn queried_term(&self) -> Option<Term> {
        match &self.request {
            Request::Category { term } | Request::Tag { term } | Request::Taxonomy { term, .. } => {
                self.terms.get(term).cloned()
            }
            _ => None,
        }
    }

    fn queried_taxonomy(&self) -> Option<String> {
        match &self.request {
            Request::Taxonomy { taxonomy, .. } => Some(taxonomy.clone()),
            _ => None,
        }
    }

    fn term(&self, id: ContentId, taxonomy: &str) -> Option<Term> {
        self.terms
            .get(&id)
            .filter(|t| t.taxonomy == taxonomy)
            .cloned()
    }

    fn term_link(&self, term: &Term) -> String {
        let base = match term.taxonomy.as_str() {
            CATEGORY_TAXONOMY => "category",
            TAG_TAXONOMY => "tag",
            other => self
                .taxonomies
                .get(other)
                .map(|t| t.slug.as_str())
                .unwrap_or(other),
        };
        self.site_url(&format!("{}/{}", base, term.slug))
    }

    fn current_post(&self) -> Option<Post> {
        match &self.request {
            Request::Attachment { post } | Request::Page { post } | Request::Single { post } => {
                self.posts.get(post).cloned()
            }
            _ => None,
        }
    }

    fn post(&self, id: ContentId) -> Option<Post> {
        self.posts.get(&id).cloned()
    }

    fn permalink(&self, post: &Post) -> String {
        self.site_url(&post.slug)
    }

    fn post_categories(&self, id: ContentId) -> Vec<Term> {
        let Some(post) = self.posts.get(&id) else {
            return Vec::new();
        };

        post.categories
            .iter()
            .filter_map(|cat| self.term(*cat, CATEGORY_TAXONOMY))
            .collect()
    }

    fn search_query(&self) -> String {
        match &self.request {
            Request::Search { query } => query.clone(),
            _ => String::new(),
        }
    }

    fn archive_date(&self) -> Option<NaiveDate> {
        match self.request {
            Request::Date { year, month, day } => {
                NaiveDate::from_ymd_opt(year, month.unwrap_or(1), day.unwrap_or(1))
            }
            _ => None,
        }
    }

    fn year_link(&self, year: i32) -> String {
        self.site_url(&format!("{:04}", year))
    }

    fn month_link(&self, year: i32, month: u32) -> String {
        self.site_url(&format!("{:04}/{:02}", year, month))
    }

    fn day_link(&self, year: i32, month: u32, day: u32) -> String {
        self.site_url(&format!("{:04}/{:02}/{:02}", year, month, day))
    }

    fn taxonomy(&self, name: &str) -> Option<TaxonomyInfo> {
        self.taxonomies.get(name).cloned()
    }

    fn post_type(&self, name: &str) -> Option<PostTypeInfo> {
        self.post_types.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    const SITE: &str = r#"
home_url: https://example.org/
terms:
  - { id: 1, name: News, slug: news }
  - { id: 2, name: Rust, slug: rust, taxonomy: post_tag }
  - { id: 3, name: Fantasy, slug: fantasy, taxonomy: genre }
posts:
  - { id: 10, title: Hello, slug: hello, categories: [1, 99] }
taxonomies:
  - { name: genre, label: Genres, slug: genres }
request:
  kind: single
  post: 10
"#;

    #[test]
    fn test_load_yaml_site() {
        let site = StaticSite::from_yaml_str(SITE).unwrap();

        assert!(site.is_single());
        assert!(!site.is_page());
        assert_eq!(site.current_post().map(|p| p.title), Some("Hello".to_string()));
        assert_eq!(site.paged(), 0);
    }

    #[test]
    fn test_derived_links() {
        let site = StaticSite::from_yaml_str(SITE).unwrap();

        let news = site.term(1, "category").unwrap();
        assert_eq!(site.term_link(&news), "https://example.org/category/news/");
        let rust = site.term(2, "post_tag").unwrap();
        assert_eq!(site.term_link(&rust), "https://example.org/tag/rust/");
        let fantasy = site.term(3, "genre").unwrap();
        assert_eq!(site.term_link(&fantasy), "https://example.org/genres/fantasy/");

        assert_eq!(site.year_link(2024), "https://example.org/2024/");
        assert_eq!(site.month_link(2024, 3), "https://example.org/2024/03/");
        assert_eq!(site.day_link(2024, 3, 7), "https://example.org/2024/03/07/");
    }

    #[test]
    fn test_term_lookup_respects_taxonomy() {
        let site = StaticSite::from_yaml_str(SITE).unwrap();
        assert!(site.term(2, "category").is_none());
        assert!(site.term(2, "post_tag").is_some());
    }

    #[test]
    fn test_post_categories_skip_unknown() {
        let site = StaticSite::from_yaml_str(SITE).unwrap();
        let names: Vec<_> = site.post_categories(10).into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["News"]);
        assert!(site.post_categories(404).is_empty());
    }

    #[test]
    fn test_date_granularity() {
        let yaml = "home_url: /\nrequest: { kind: date, year: 2024, month: 2 }\n";
        let site = StaticSite::from_yaml_str(yaml).unwrap();

        assert_eq!(site.date_archive(), Some(DateGranularity::Month));
        assert_eq!(site.archive_date(), NaiveDate::from_ymd_opt(2024, 2, 1));
    }

    #[test]
    fn test_day_without_month_rejected() {
        let yaml = "home_url: /\nrequest: { kind: date, year: 2024, day: 3 }\n";
        let result = StaticSite::from_yaml_str(yaml);
        assert!(matches!(result, Err(SiteError::InvalidDate(_))));
    }

    #[test]
    fn test_impossible_date_rejected() {
        let yaml = "home_url: /\nrequest: { kind: date, year: 2023, month: 2, day: 30 }\n";
        assert!(matches!(
            StaticSite::from_yaml_str(yaml),
            Err(SiteError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_unknown_reference_rejected() {
        let yaml = "home_url: /\nrequest: { kind: page, post: 5 }\n";
        assert!(matches!(
            StaticSite::from_yaml_str(yaml),
            Err(SiteError::UnknownPost(5))
        ));
    }

    #[test]
    fn test_term_from_other_taxonomy_rejected() {
        let site = |request: &str| {
            StaticSite::from_yaml_str(&SITE.replace("kind: single\n  post: 10", request))
        };

        match site("kind: taxonomy\n  taxonomy: genre\n  term: 1") {
            Err(SiteError::TaxonomyMismatch { term, expected, found }) => {
                assert_eq!(term, 1);
                assert_eq!(expected, "genre");
                assert_eq!(found, "category");
            }
            other => panic!("expected a taxonomy mismatch, got {:?}", other),
        }

        assert!(matches!(
            site("kind: category\n  term: 2"),
            Err(SiteError::TaxonomyMismatch { .. })
        ));
        assert!(site("kind: tag\n  term: 2").is_ok());
        assert!(site("kind: taxonomy\n  taxonomy: genre\n  term: 3").is_ok());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let yaml = r#"
home_url: /
terms:
  - { id: 1, name: A, slug: a }
  - { id: 1, name: B, slug: b }
request: { kind: home }
"#;
        assert!(matches!(
            StaticSite::from_yaml_str(yaml),
            Err(SiteError::DuplicateId("term", 1))
        ));
    }

    #[test]
    fn test_from_path_json() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"home_url": "/", "request": {{"kind": "search", "query": "crabs"}}, "paged": 2}}"#
        )
        .unwrap();

        let site = StaticSite::from_path(file.path()).unwrap();
        assert!(site.is_search());
        assert_eq!(site.search_query(), "crabs");
        assert_eq!(site.paged(), 2);
    }
}
