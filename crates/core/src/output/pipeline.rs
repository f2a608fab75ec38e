//! Layered trail rendering
//!
//! A [`Formatter`] is a stack of [`Layer`]s, innermost first. For every
//! rendering hook the pipeline starts from an empty string and hands it to
//! the innermost layer; each layer receives the result of the layer below
//! it and returns that result wrapped in its own markup. The output is
//!
//! ```text
//! pre + (pre_item + label + post_item)* + post
//! ```
//!
//! or the empty string for an empty trail.

use crate::i18n::Translator;
use crate::models::Breadcrumb;
use crate::trail::Trail;

/// Whether an item is rendered as a link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDecision {
    /// Wrap the label in an anchor pointing at the breadcrumb URL
    Anchor,
    /// Wrap the label in a non-interactive element
    Span,
}

impl LinkDecision {
    /// Links are only rendered for inactive breadcrumbs that have a URL
    pub fn for_breadcrumb(crumb: &Breadcrumb) -> Self {
        if crumb.has_url() && !crumb.active {
            LinkDecision::Anchor
        } else {
            LinkDecision::Span
        }
    }
}

/// One breadcrumb as seen by the layers during a render pass
///
/// The link decision is made once per item, so the opening and closing
/// hooks of a layer always agree on the element they emit.
#[derive(Debug, Clone, Copy)]
pub struct Item<'a> {
    pub crumb: &'a Breadcrumb,
    pub is_last: bool,
    pub link: LinkDecision,
}

/// One stage of the rendering pipeline
///
/// Every hook gets the output of the next-inner layer as `inner`. The
/// defaults pass it through unchanged.
pub trait Layer {
    /// Opening of the whole trail
    fn pre(&self, inner: String, _translator: &dyn Translator) -> String {
        inner
    }

    /// Closing of the whole trail
    fn post(&self, inner: String, _translator: &dyn Translator) -> String {
        inner
    }

    /// Emitted before an item's label
    fn pre_item(&self, _item: &Item<'_>, inner: String) -> String {
        inner
    }

    /// Emitted after an item's label
    fn post_item(&self, _item: &Item<'_>, inner: String) -> String {
        inner
    }

    /// The item's visible text
    fn label(&self, _item: &Item<'_>, inner: String, _translator: &dyn Translator) -> String {
        inner
    }
}

/// A stack of layers rendering trails into strings
pub struct Formatter {
    layers: Vec<Box<dyn Layer>>,
}

impl Formatter {
    /// Start a formatter from its innermost layer
    pub fn new(base: impl Layer + 'static) -> Self {
        Self {
            layers: vec![Box::new(base)],
        }
    }

    /// Add a layer around the current stack (builder pattern)
    pub fn wrap(mut self, layer: impl Layer + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Render a trail in one pass
    pub fn render(&self, trail: &Trail, translator: &dyn Translator) -> String {
        if trail.is_empty() {
            return String::new();
        }

        let mut output = self.compose(|layer, inner| layer.pre(inner, translator));

        let last = trail.len() - 1;
        for (idx, crumb) in trail.iter().enumerate() {
            let item = Item {
                crumb,
                is_last: idx == last,
                link: LinkDecision::for_breadcrumb(crumb),
            };

            output.push_str(&self.compose(|layer, inner| layer.pre_item(&item, inner)));
            output.push_str(&self.compose(|layer, inner| layer.label(&item, inner, translator)));
            output.push_str(&self.compose(|layer, inner| layer.post_item(&item, inner)));
        }

        output.push_str(&self.compose(|layer, inner| layer.post(inner, translator)));
        output
    }

    /// Run one hook through the stack, innermost layer first
    fn compose<F>(&self, hook: F) -> String
    where
        F: Fn(&dyn Layer, String) -> String,
    {
        self.layers
            .iter()
            .fold(String::new(), |inner, layer| hook(layer.as_ref(), inner))
    }
}

impl std::fmt::Debug for Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Formatter")
            .field("depth", &self.layers.len())
            .finish()
    }
}
