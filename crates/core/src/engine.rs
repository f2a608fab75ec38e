//! Breadcrumb resolution engine
//!
//! This module classifies the current request into a single page kind and
//! builds the matching breadcrumb trail. Classification walks the ordered
//! [`RULES`] table; the first rule whose predicate holds wins, and no other
//! rule is consulted even if the winner is disabled.

use crate::config::CrumbConfig;
use crate::context::ContextProvider;
use crate::hierarchy::{select_deepest, walk_ancestors};
use crate::i18n::{keys, Translator};
use crate::models::{Breadcrumb, DateGranularity, PageKind, Term, DEFAULT_POST_TYPE};
use crate::trail::Trail;
use chrono::Datelike;
use tracing::{debug, instrument, warn};

type Predicate = fn(&dyn ContextProvider) -> bool;
type Gate = fn(&CrumbConfig, &dyn ContextProvider) -> bool;
type Handler = fn(&Resolver<'_>, &dyn ContextProvider, &mut Trail);

/// One entry of the page-kind dispatch table
pub struct Rule {
    /// Page kind this rule recognizes
    pub kind: PageKind,

    /// Whether a "page N" breadcrumb may follow the trail
    pub paginatable: bool,

    matches: Predicate,
    enabled: Gate,
    build: Handler,
}

impl Rule {
    /// Check if the rule recognizes the current request
    pub fn matches(&self, ctx: &dyn ContextProvider) -> bool {
        (self.matches)(ctx)
    }

    /// Check if the configuration lets this rule produce a trail
    pub fn is_enabled(&self, config: &CrumbConfig, ctx: &dyn ContextProvider) -> bool {
        (self.enabled)(config, ctx)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind)
            .field("paginatable", &self.paginatable)
            .finish()
    }
}

/// Page-kind rules in priority order
pub static RULES: [Rule; 11] = [
    Rule {
        kind: PageKind::Home,
        paginatable: true,
        matches: |ctx| ctx.is_home(),
        enabled: |config, _| config.kinds.home,
        // Only a paged front page gets a trail: home, then the page number
        build: |_, _, _| {},
    },
    Rule {
        kind: PageKind::Category,
        paginatable: true,
        matches: |ctx| ctx.is_category(),
        enabled: |config, _| config.kinds.categories,
        build: build_term_archive,
    },
    Rule {
        kind: PageKind::Search,
        paginatable: true,
        matches: |ctx| ctx.is_search(),
        enabled: |config, _| config.kinds.search,
        build: build_search,
    },
    Rule {
        kind: PageKind::Tag,
        paginatable: true,
        matches: |ctx| ctx.is_tag(),
        enabled: |config, _| config.kinds.tags,
        build: build_term_archive,
    },
    Rule {
        kind: PageKind::NotFound,
        paginatable: false,
        matches: |ctx| ctx.is_not_found(),
        enabled: |config, _| config.kinds.not_found,
        build: build_not_found,
    },
    Rule {
        kind: PageKind::Date,
        paginatable: true,
        matches: |ctx| ctx.date_archive().is_some(),
        enabled: |config, _| config.kinds.dates,
        build: build_date_archive,
    },
    Rule {
        kind: PageKind::Attachment,
        paginatable: false,
        matches: |ctx| ctx.is_attachment(),
        enabled: |config, _| config.kinds.attachments,
        build: build_attachment,
    },
    Rule {
        kind: PageKind::Taxonomy,
        paginatable: true,
        matches: |ctx| ctx.is_taxonomy(),
        enabled: |config, ctx| {
            ctx.queried_taxonomy()
                .is_some_and(|name| config.custom_taxonomies.allows(&name))
        },
        build: build_taxonomy_archive,
    },
    Rule {
        kind: PageKind::Page,
        paginatable: false,
        matches: |ctx| ctx.is_page(),
        enabled: |config, _| config.kinds.pages,
        build: build_page,
    },
    Rule {
        kind: PageKind::Single,
        paginatable: false,
        matches: |ctx| ctx.is_single(),
        enabled: |config, ctx| {
            config.kinds.single
                && ctx.current_post().map_or(true, |post| {
                    post.is_default_type() || config.custom_post_types.allows(&post.post_type)
                })
        },
        build: build_single,
    },
    Rule {
        kind: PageKind::PostTypeArchive,
        paginatable: true,
        matches: |ctx| {
            ctx.archive_post_type()
                .is_some_and(|post_type| post_type != DEFAULT_POST_TYPE)
        },
        enabled: |config, ctx| {
            ctx.archive_post_type()
                .is_some_and(|post_type| config.custom_post_types.allows(&post_type))
        },
        build: build_post_type_archive,
    },
];

/// Find the first rule recognizing the current request
pub fn classify(ctx: &dyn ContextProvider) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(ctx))
}

/// Get the rule of a page kind
pub fn rule_for(kind: PageKind) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.kind == kind)
}

/// Builds breadcrumb trails for requests
///
/// A resolver holds no per-request state; one instance can serve any number
/// of requests.
pub struct Resolver<'a> {
    config: &'a CrumbConfig,
    translator: &'a dyn Translator,
}

impl<'a> Resolver<'a> {
    /// Create a resolver from a configuration and a translator
    pub fn new(config: &'a CrumbConfig, translator: &'a dyn Translator) -> Self {
        Self { config, translator }
    }

    /// Build the finalized trail of the current request
    ///
    /// Yields an empty trail when no page kind matches, the matched kind is
    /// disabled, or the request is the first page of the front page.
    #[instrument(skip_all)]
    pub fn resolve(&self, ctx: &dyn ContextProvider) -> Trail {
        let mut trail = Trail::new();

        let Some(rule) = classify(ctx) else {
            debug!("no page kind matched");
            return trail;
        };

        if !rule.is_enabled(self.config, ctx) {
            debug!(kind = rule.kind.label(), "page kind disabled");
            return trail;
        }

        if rule.kind == PageKind::Home && ctx.paged() <= 1 {
            debug!("front page needs no trail");
            return trail;
        }

        debug!(kind = rule.kind.label(), "building trail");
        trail.push(self.home_breadcrumb(ctx));
        (rule.build)(self, ctx, &mut trail);

        if rule.paginatable {
            self.push_pagination(ctx, &mut trail);
        }

        trail.finalize();
        trail
    }

    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.translator.translate(key, params)
    }

    fn home_breadcrumb(&self, ctx: &dyn ContextProvider) -> Breadcrumb {
        let title = match &self.config.home_label {
            Some(label) => label.clone(),
            None => self.translate(keys::HOME, &[]),
        };
        Breadcrumb::new(title, ctx.home_url())
    }

    fn push_pagination(&self, ctx: &dyn ContextProvider, trail: &mut Trail) {
        let page = ctx.paged();
        if page > 1 {
            let title = self.translate(keys::PAGE, &[("page", page.to_string().as_str())]);
            trail.push(Breadcrumb::unlinked(title));
        }
    }
}

/// Append `term` and its ancestors, root first
fn push_term_ancestors(ctx: &dyn ContextProvider, term: Option<Term>, trail: &mut Trail) {
    let crumbs = walk_ancestors(
        term,
        |t| {
            let parent = t.parent.and_then(|id| ctx.term(id, &t.taxonomy));
            if parent.is_none() && t.parent.is_some() {
                warn!(term = t.id, parent = ?t.parent, "parent term not found");
            }
            parent
        },
        |t| Breadcrumb::new(t.name.clone(), ctx.term_link(t)),
    );
    trail.extend(crumbs, false);
}

/// URL of a listing page living directly below the site root
fn listing_url(ctx: &dyn ContextProvider, slug: &str) -> String {
    format!("{}/{}/", ctx.home_url().trim_end_matches('/'), slug)
}

fn build_term_archive(_: &Resolver<'_>, ctx: &dyn ContextProvider, trail: &mut Trail) {
    let term = ctx.queried_term();
    if term.is_none() {
        warn!("archive without a queried term");
    }
    push_term_ancestors(ctx, term, trail);
}

fn build_search(resolver: &Resolver<'_>, ctx: &dyn ContextProvider, trail: &mut Trail) {
    let query = ctx.search_query();
    let title = resolver.translate(keys::SEARCH_RESULTS, &[("query", query.as_str())]);
    trail.push(Breadcrumb::unlinked(title));
}

fn build_not_found(resolver: &Resolver<'_>, _: &dyn ContextProvider, trail: &mut Trail) {
    trail.push(Breadcrumb::unlinked(resolver.translate(keys::NOT_FOUND, &[])));
}

fn build_date_archive(resolver: &Resolver<'_>, ctx: &dyn ContextProvider, trail: &mut Trail) {
    let (Some(granularity), Some(date)) = (ctx.date_archive(), ctx.archive_date()) else {
        warn!("date archive without a date");
        return;
    };
    let (year, month, day) = (date.year(), date.month(), date.day());

    trail.push_new(year.to_string(), ctx.year_link(year));

    if granularity >= DateGranularity::Month {
        let name = resolver.translate(&keys::month(month), &[]);
        trail.push_new(name, ctx.month_link(year, month));

        if granularity >= DateGranularity::Day {
            trail.push_new(format!("{:02}", day), ctx.day_link(year, month, day));
        }
    }
}

fn build_attachment(_: &Resolver<'_>, ctx: &dyn ContextProvider, trail: &mut Trail) {
    let Some(attachment) = ctx.current_post() else {
        warn!("attachment request without an attachment");
        return;
    };

    match attachment.parent.map(|id| (id, ctx.post(id))) {
        Some((_, Some(parent))) => {
            // The parent item's primary category
            let category = ctx.post_categories(parent.id).into_iter().next();
            push_term_ancestors(ctx, category, trail);
            trail.push(Breadcrumb::new(parent.title.clone(), ctx.permalink(&parent)));
        }
        Some((id, None)) => {
            warn!(attachment = attachment.id, parent = id, "parent item not found")
        }
        None => debug!(attachment = attachment.id, "attachment has no parent item"),
    }

    trail.push(Breadcrumb::unlinked(attachment.title));
}

fn build_taxonomy_archive(resolver: &Resolver<'_>, ctx: &dyn ContextProvider, trail: &mut Trail) {
    let Some(name) = ctx.queried_taxonomy() else {
        warn!("taxonomy archive without a taxonomy");
        return;
    };

    match ctx.taxonomy(&name) {
        Some(info) => {
            let url = if resolver.config.taxonomy_archives.allows(&name) {
                listing_url(ctx, &info.slug)
            } else {
                String::new()
            };
            trail.push(Breadcrumb::new(info.label, url));
        }
        None => warn!(taxonomy = %name, "taxonomy not registered"),
    }

    push_term_ancestors(ctx, ctx.queried_term(), trail);
}

fn build_page(_: &Resolver<'_>, ctx: &dyn ContextProvider, trail: &mut Trail) {
    let crumbs = walk_ancestors(
        ctx.current_post(),
        |page| {
            let parent = page.parent.and_then(|id| ctx.post(id));
            if parent.is_none() && page.parent.is_some() {
                warn!(page = page.id, parent = ?page.parent, "parent page not found");
            }
            parent
        },
        |page| Breadcrumb::new(page.title.clone(), ctx.permalink(page)),
    );
    trail.extend(crumbs, false);
}

fn build_single(_: &Resolver<'_>, ctx: &dyn ContextProvider, trail: &mut Trail) {
    let Some(post) = ctx.current_post() else {
        warn!("single request without an item");
        return;
    };

    if post.is_default_type() {
        let categories = ctx.post_categories(post.id);
        let deepest = select_deepest(&categories).into_iter().next().cloned();
        if deepest.is_none() {
            debug!(post = post.id, "item has no categories");
        }
        push_term_ancestors(ctx, deepest, trail);
    } else {
        match ctx.post_type(&post.post_type) {
            Some(info) => {
                let url = if info.has_archive {
                    listing_url(ctx, &info.slug)
                } else {
                    String::new()
                };
                trail.push(Breadcrumb::new(info.label, url));
            }
            None => warn!(post_type = %post.post_type, "post type not registered"),
        }
    }

    trail.push(Breadcrumb::unlinked(post.title));
}

fn build_post_type_archive(_: &Resolver<'_>, ctx: &dyn ContextProvider, trail: &mut Trail) {
    let Some(post_type) = ctx.archive_post_type() else {
        return;
    };

    let label = match ctx.post_type(&post_type) {
        Some(info) => info.label,
        None => {
            warn!(post_type = %post_type, "post type not registered");
            post_type
        }
    };
    trail.push(Breadcrumb::unlinked(label));
}
