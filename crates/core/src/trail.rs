//! Ordered breadcrumb trails
//!
//! A [`Trail`] is built root first during resolution, finalized once (the
//! last breadcrumb becomes the active one) and then handed to a formatter.

use crate::models::Breadcrumb;
use serde::{Deserialize, Serialize};

/// Ordered breadcrumbs from the site root to the current page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trail {
    crumbs: Vec<Breadcrumb>,
}

impl Trail {
    /// Create an empty trail
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a breadcrumb
    pub fn push(&mut self, crumb: Breadcrumb) {
        self.crumbs.push(crumb);
    }

    /// Create a breadcrumb from its parts and append it
    pub fn push_new(&mut self, title: impl Into<String>, url: impl Into<String>) -> &Breadcrumb {
        self.crumbs.push(Breadcrumb::new(title, url));
        &self.crumbs[self.crumbs.len() - 1]
    }

    /// Append several breadcrumbs, optionally in reverse order
    pub fn extend<I>(&mut self, crumbs: I, reverse: bool)
    where
        I: IntoIterator<Item = Breadcrumb>,
    {
        if reverse {
            let mut crumbs: Vec<Breadcrumb> = crumbs.into_iter().collect();
            crumbs.reverse();
            self.crumbs.extend(crumbs);
        } else {
            self.crumbs.extend(crumbs);
        }
    }

    /// Mark the last breadcrumb as the active one
    ///
    /// Any previously active breadcrumb is reset so exactly one entry is
    /// active afterwards. An empty trail stays untouched.
    pub fn finalize(&mut self) {
        let Some(last) = self.crumbs.len().checked_sub(1) else {
            return;
        };

        for (idx, crumb) in self.crumbs.iter_mut().enumerate() {
            crumb.active = idx == last;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.crumbs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.crumbs.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Breadcrumb> {
        self.crumbs.iter()
    }

    pub fn as_slice(&self) -> &[Breadcrumb] {
        &self.crumbs
    }

    /// Get the active breadcrumb, if the trail was finalized
    pub fn active(&self) -> Option<&Breadcrumb> {
        self.crumbs.iter().find(|c| c.active)
    }

    /// Get the breadcrumb titles joined by `separator`
    pub fn path(&self, separator: &str) -> String {
        self.crumbs
            .iter()
            .map(|c| c.title.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl From<Vec<Breadcrumb>> for Trail {
    fn from(crumbs: Vec<Breadcrumb>) -> Self {
        Self { crumbs }
    }
}

impl<'a> IntoIterator for &'a Trail {
    type Item = &'a Breadcrumb;
    type IntoIter = std::slice::Iter<'a, Breadcrumb>;

    fn into_iter(self) -> Self::IntoIter {
        self.crumbs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finalize_marks_only_last() {
        let mut trail = Trail::new();
        trail.push_new("Home", "/");
        trail.push_new("Blog", "/blog/");
        trail.push(Breadcrumb::unlinked("News"));
        trail.finalize();

        let active: Vec<_> = trail.iter().filter(|c| c.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "News");
        assert_eq!(trail.active().map(|c| c.title.as_str()), Some("News"));
    }

    #[test]
    fn test_finalize_twice_keeps_single_active() {
        let mut trail = Trail::new();
        trail.push_new("Home", "/");
        trail.finalize();
        trail.push_new("Page 2", "");
        trail.finalize();

        assert_eq!(trail.iter().filter(|c| c.active).count(), 1);
        assert!(trail.as_slice()[1].active);
    }

    #[test]
    fn test_finalize_empty_is_noop() {
        let mut trail = Trail::new();
        trail.finalize();
        assert!(trail.is_empty());
        assert!(trail.active().is_none());
    }

    #[test]
    fn test_extend_reversed() {
        let mut trail = Trail::new();
        trail.push_new("Home", "/");
        trail.extend(
            vec![Breadcrumb::new("Leaf", "/l/"), Breadcrumb::new("Root", "/r/")],
            true,
        );

        assert_eq!(trail.path(" > "), "Home > Root > Leaf");
        assert_eq!(trail.len(), 3);
    }
}
