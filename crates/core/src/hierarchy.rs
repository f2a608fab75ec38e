//! Parent-chain helpers for terms and pages
//!
//! Both helpers only look at local parent pointers; no tree is ever built.
//! Parent relations coming from the host site must be acyclic and finite.
//! [`walk_ancestors`] has no cycle detection and loops forever on a cyclic
//! chain.

use crate::models::{Breadcrumb, ContentId, Term};
use std::collections::HashSet;

/// A node that knows its own id and the id of its parent
pub trait Hierarchical {
    fn node_id(&self) -> ContentId;

    fn parent_id(&self) -> Option<ContentId>;
}

impl Hierarchical for Term {
    fn node_id(&self) -> ContentId {
        self.id
    }

    fn parent_id(&self) -> Option<ContentId> {
        self.parent
    }
}

/// Walk from `leaf` up to the root and return the breadcrumbs root first
///
/// `parent_of` returns `None` once the root is reached. An absent leaf
/// yields an empty trail segment.
pub fn walk_ancestors<N, P, F>(
    leaf: Option<N>,
    mut parent_of: P,
    mut to_breadcrumb: F,
) -> Vec<Breadcrumb>
where
    P: FnMut(&N) -> Option<N>,
    F: FnMut(&N) -> Breadcrumb,
{
    let mut crumbs: Vec<Breadcrumb> = std::iter::successors(leaf, |node| parent_of(node))
        .map(|node| to_breadcrumb(&node))
        .collect();

    // Traversal order is leaf to root
    crumbs.reverse();
    crumbs
}

/// Select the candidates that no other candidate points to as its parent
///
/// The relative order of `candidates` is preserved. The result can be empty
/// for an empty input or for pathological cyclic input.
pub fn select_deepest<T: Hierarchical>(candidates: &[T]) -> Vec<&T> {
    let parents: HashSet<ContentId> = candidates.iter().filter_map(|c| c.parent_id()).collect();

    candidates
        .iter()
        .filter(|c| !parents.contains(&c.node_id()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn term(id: ContentId, name: &str, parent: Option<ContentId>) -> Term {
        Term {
            id,
            name: name.to_string(),
            slug: name.to_lowercase(),
            taxonomy: "category".to_string(),
            parent,
        }
    }

    fn walk(leaf: Option<Term>, all: &HashMap<ContentId, Term>) -> Vec<String> {
        walk_ancestors(
            leaf,
            |t| t.parent.and_then(|p| all.get(&p).cloned()),
            |t| Breadcrumb::new(t.name.clone(), format!("/{}/", t.slug)),
        )
        .into_iter()
        .map(|c| c.title)
        .collect()
    }

    #[test]
    fn test_walk_three_levels_root_first() {
        let all: HashMap<_, _> = [
            term(1, "Root", None),
            term(2, "Mid", Some(1)),
            term(3, "Leaf", Some(2)),
        ]
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

        let titles = walk(all.get(&3).cloned(), &all);
        assert_eq!(titles, vec!["Root", "Mid", "Leaf"]);
    }

    #[test]
    fn test_walk_single_node() {
        let all = HashMap::new();
        assert_eq!(walk(Some(term(7, "Solo", None)), &all), vec!["Solo"]);
    }

    #[test]
    fn test_walk_absent_leaf() {
        let all = HashMap::new();
        assert!(walk(None, &all).is_empty());
    }

    #[test]
    fn test_walk_stops_at_dangling_parent() {
        let all: HashMap<_, _> = [(2, term(2, "Orphan", Some(99)))].into_iter().collect();
        assert_eq!(walk(all.get(&2).cloned(), &all), vec!["Orphan"]);
    }

    #[test]
    fn test_deepest_drops_referenced_parent() {
        let a = term(1, "A", None);
        let b = term(2, "B", Some(1));
        let candidates = vec![a, b];

        let deepest = select_deepest(&candidates);
        assert_eq!(deepest.len(), 1);
        assert_eq!(deepest[0].name, "B");
    }

    #[test]
    fn test_deepest_keeps_unrelated_branches_in_order() {
        let candidates = vec![term(1, "A", None), term(3, "C", None)];

        let deepest = select_deepest(&candidates);
        let names: Vec<&str> = deepest.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn test_deepest_cyclic_input_is_empty() {
        let candidates = vec![term(1, "A", Some(2)), term(2, "B", Some(1))];
        assert!(select_deepest(&candidates).is_empty());
        assert!(select_deepest::<Term>(&[]).is_empty());
    }
}
