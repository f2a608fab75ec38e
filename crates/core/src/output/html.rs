//! Text and HTML layers
//!
//! [`PlainLayer`] is the innermost stage of every formatter. The HTML layers
//! stack on top of it: [`HyperlinkLayer`] wraps labels in `<a>` or `<span>`,
//! [`ListLayer`] adds `<ul>`/`<li>`, and [`LandmarkLayer`] adds the `<nav>`
//! landmark and the screen-reader marker of the current page.

use super::pipeline::{Item, Layer, LinkDecision};
use crate::i18n::{keys, Translator};

/// Escape text for use in HTML content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Build a ` class="..."` attribute, empty when there are no classes
fn class_attr(classes: &[String]) -> String {
    if classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", escape_html(&classes.join(" ")))
    }
}

/// Titles separated by a fixed string
#[derive(Debug, Clone, Default)]
pub struct PlainLayer {
    separator: String,
}

impl PlainLayer {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

impl Layer for PlainLayer {
    fn post_item(&self, item: &Item<'_>, inner: String) -> String {
        if item.is_last {
            inner
        } else {
            inner + &self.separator
        }
    }

    fn label(&self, item: &Item<'_>, _inner: String, _translator: &dyn Translator) -> String {
        item.crumb.title.clone()
    }
}

/// Wraps each label in `<a href>` or, for active and URL-less items, `<span>`
///
/// The separator of the inner layer follows the closing tag.
#[derive(Debug, Clone, Default)]
pub struct HyperlinkLayer {
    anchor_classes: Vec<String>,
}

impl HyperlinkLayer {
    pub fn new(anchor_classes: Vec<String>) -> Self {
        Self { anchor_classes }
    }
}

impl Layer for HyperlinkLayer {
    fn pre_item(&self, item: &Item<'_>, inner: String) -> String {
        let open = match item.link {
            LinkDecision::Anchor => format!(
                "<a href=\"{}\"{}>",
                escape_html(&item.crumb.url),
                class_attr(&self.anchor_classes)
            ),
            LinkDecision::Span => format!("<span{}>", class_attr(&self.anchor_classes)),
        };
        open + &inner
    }

    fn post_item(&self, item: &Item<'_>, inner: String) -> String {
        let close = match item.link {
            LinkDecision::Anchor => "</a>",
            LinkDecision::Span => "</span>",
        };
        format!("{}{}", close, inner)
    }

    fn label(&self, _item: &Item<'_>, inner: String, _translator: &dyn Translator) -> String {
        escape_html(&inner)
    }
}

/// Wraps the trail in `<ul>` and each item in `<li>`
#[derive(Debug, Clone, Default)]
pub struct ListLayer {
    list_classes: Vec<String>,
    entry_classes: Vec<String>,
}

impl ListLayer {
    pub fn new(list_classes: Vec<String>, entry_classes: Vec<String>) -> Self {
        Self {
            list_classes,
            entry_classes,
        }
    }
}

impl Layer for ListLayer {
    fn pre(&self, inner: String, _translator: &dyn Translator) -> String {
        format!("<ul{}>{}", class_attr(&self.list_classes), inner)
    }

    fn post(&self, inner: String, _translator: &dyn Translator) -> String {
        inner + "</ul>"
    }

    fn pre_item(&self, _item: &Item<'_>, inner: String) -> String {
        format!("<li{}>{}", class_attr(&self.entry_classes), inner)
    }

    fn post_item(&self, _item: &Item<'_>, inner: String) -> String {
        inner + "</li>"
    }
}

/// Wraps the trail in a labelled `<nav>` landmark
///
/// The active item's label gets a visually hidden "current page" prefix.
#[derive(Debug, Clone, Default)]
pub struct LandmarkLayer {
    nav_classes: Vec<String>,
}

impl LandmarkLayer {
    pub fn new(nav_classes: Vec<String>) -> Self {
        Self { nav_classes }
    }
}

impl Layer for LandmarkLayer {
    fn pre(&self, inner: String, translator: &dyn Translator) -> String {
        format!(
            "<nav aria-label=\"{}\" role=\"navigation\"{}>{}",
            escape_html(&translator.translate(keys::LANDMARK_LABEL, &[])),
            class_attr(&self.nav_classes),
            inner
        )
    }

    fn post(&self, inner: String, _translator: &dyn Translator) -> String {
        inner + "</nav>"
    }

    fn label(&self, item: &Item<'_>, inner: String, translator: &dyn Translator) -> String {
        if !item.crumb.active {
            return inner;
        }
        format!(
            "<span class=\"show-for-sr\">{}</span>{}",
            escape_html(&translator.translate(keys::CURRENT_PAGE, &[])),
            inner
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;
    use crate::models::Breadcrumb;
    use crate::output::pipeline::Formatter;
    use crate::trail::Trail;
    use pretty_assertions::assert_eq;

    fn sample_trail() -> Trail {
        let mut trail = Trail::new();
        trail.push_new("Home", "/");
        trail.push_new("Blog", "/blog/");
        trail.push_new("News", "/blog/news/");
        trail.finalize();
        trail
    }

    fn hyperlink(separator: &str) -> Formatter {
        Formatter::new(PlainLayer::new(separator)).wrap(HyperlinkLayer::default())
    }

    #[test]
    fn test_plain_separator_between_items() {
        let formatter = Formatter::new(PlainLayer::new(" > "));
        let output = formatter.render(&sample_trail(), &Catalog::default());
        assert_eq!(output, "Home > Blog > News");
    }

    #[test]
    fn test_hyperlink_wraps_items() {
        let output = hyperlink(" / ").render(&sample_trail(), &Catalog::default());
        assert_eq!(
            output,
            "<a href=\"/\">Home</a> / <a href=\"/blog/\">Blog</a> / <span>News</span>"
        );
    }

    #[test]
    fn test_hyperlink_unlinked_middle_item() {
        let mut trail = Trail::new();
        trail.push_new("Home", "/");
        trail.push(Breadcrumb::unlinked("Books"));
        trail.push_new("Dune", "");
        trail.finalize();

        let formatter = Formatter::new(PlainLayer::new("|"))
            .wrap(HyperlinkLayer::new(vec!["crumb".to_string()]));
        let output = formatter.render(&trail, &Catalog::default());
        assert_eq!(
            output,
            concat!(
                "<a href=\"/\" class=\"crumb\">Home</a>|",
                "<span class=\"crumb\">Books</span>|",
                "<span class=\"crumb\">Dune</span>"
            )
        );
    }

    #[test]
    fn test_hyperlink_escapes() {
        let trail = Trail::from(vec![
            Breadcrumb::new("Q&A", "/?a=1&b=\"2\""),
            Breadcrumb::unlinked("<script>"),
        ]);
        let output = hyperlink("").render(&trail, &Catalog::default());
        assert_eq!(
            output,
            "<a href=\"/?a=1&amp;b=&quot;2&quot;\">Q&amp;A</a><span>&lt;script&gt;</span>"
        );
    }

    #[test]
    fn test_list_layer() {
        let formatter = hyperlink("").wrap(ListLayer::new(
            vec!["crumbs".to_string()],
            vec!["crumbs__item".to_string()],
        ));
        let output = formatter.render(&sample_trail(), &Catalog::default());
        assert_eq!(
            output,
            concat!(
                "<ul class=\"crumbs\">",
                "<li class=\"crumbs__item\"><a href=\"/\">Home</a></li>",
                "<li class=\"crumbs__item\"><a href=\"/blog/\">Blog</a></li>",
                "<li class=\"crumbs__item\"><span>News</span></li>",
                "</ul>"
            )
        );
    }

    #[test]
    fn test_landmark_single_active_item() {
        let mut trail = Trail::new();
        trail.push_new("Home", "/");
        trail.finalize();

        let formatter = hyperlink("")
            .wrap(ListLayer::default())
            .wrap(LandmarkLayer::default());
        let output = formatter.render(&trail, &Catalog::new("en"));
        assert_eq!(
            output,
            concat!(
                "<nav aria-label=\"You are here:\" role=\"navigation\">",
                "<ul><li><span>",
                "<span class=\"show-for-sr\">Current page: </span>Home",
                "</span></li></ul>",
                "</nav>"
            )
        );
    }

    #[test]
    fn test_landmark_localized() {
        let formatter = hyperlink("")
            .wrap(ListLayer::default())
            .wrap(LandmarkLayer::new(vec!["top".to_string()]));
        let output = formatter.render(&sample_trail(), &Catalog::new("de"));

        assert!(output.starts_with(concat!(
            "<nav aria-label=\"Sie sind hier:\" role=\"navigation\" class=\"top\">",
            "<ul>"
        )));
        assert!(output.contains("<span class=\"show-for-sr\">Aktive Seite: </span>News"));
        assert_eq!(output.matches("show-for-sr").count(), 1);
    }

    #[test]
    fn test_every_layer_renders_empty_trail_as_empty() {
        let formatter = hyperlink(" > ")
            .wrap(ListLayer::default())
            .wrap(LandmarkLayer::default());
        assert_eq!(formatter.render(&Trail::new(), &Catalog::default()), "");
    }
}
