//! CSS snippets: `!important` and property spacing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{rollout::ZenTree, text::regex};
use super::walk;


static RE_IMPORTANT: Lazy<Regex> = Lazy::new(|| regex(r"(.+)!$"));

static RE_SEMICOLON_END: Lazy<Regex> = Lazy::new(|| regex(r"(;?)$"));

static RE_PROPERTY: Lazy<Regex> = Lazy::new(|| regex(r"([\w\-]+\s*:)\s*"));


/// Snippets written with a trailing `!` get ` !important` before their final
/// semicolon.
pub(super) fn apply(tree: &mut ZenTree) {
    for (id, _) in walk(tree) {
        let node = tree.get_mut(id);
        let important = node.is_snippet()
            && node.real_name.as_deref().map_or(false, |name| RE_IMPORTANT.is_match(name));
        if important {
            node.start = RE_SEMICOLON_END.replacen(&node.start, 1, " !important${1}")
                                         .into_owned();
        }
    }
}

/// Exactly one space after the colon of each property in snippets.
pub(super) fn apply_format(tree: &mut ZenTree) {
    for (id, _) in walk(tree) {
        let node = tree.get_mut(id);
        if node.is_snippet() {
            node.start = RE_PROPERTY.replace_all(&node.start, "$1 ").into_owned();
        }
    }
}
