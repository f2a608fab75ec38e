//! ANSI colored output layer
//!
//! This module provides colorful terminal output for breadcrumb trails.

use super::pipeline::{Item, Layer, LinkDecision};
use crate::i18n::Translator;

// ANSI escape codes
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";

/// Colors labels and separators for terminal output
///
/// The active breadcrumb is bold, linked breadcrumbs are cyan and separators
/// are dimmed. Stacks directly on a plain layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalLayer;

impl Layer for TerminalLayer {
    fn post_item(&self, _item: &Item<'_>, inner: String) -> String {
        if inner.is_empty() {
            inner
        } else {
            format!("{}{}{}", DIM, inner, RESET)
        }
    }

    fn label(&self, item: &Item<'_>, inner: String, _translator: &dyn Translator) -> String {
        if item.crumb.active {
            format!("{}{}{}", BOLD, inner, RESET)
        } else if item.link == LinkDecision::Anchor {
            format!("{}{}{}", CYAN, inner, RESET)
        } else {
            inner
        }
    }
}
