//! `xsl:variable` and `xsl:with-param` with children lose their `select`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{rollout::ZenTree, text::regex};
use super::walk;


static RE_SELECT: Lazy<Regex> = Lazy::new(|| regex(
    r#"\s+select\s*=\s*(?:"[^"]*"|'[^']*')"#));

const TAGS: [&str; 2] = ["xsl:variable", "xsl:with-param"];


pub(super) fn apply(tree: &mut ZenTree) {
    for (id, _) in walk(tree) {
        let node = tree.get_mut(id);
        let trim = node.name.as_deref()
            .map_or(false, |name| TAGS.iter().any(|t| t.eq_ignore_ascii_case(name)))
            && !node.children().is_empty();
        if trim && !node.is_snippet() {
            node.start = RE_SELECT.replace_all(&node.start, "").into_owned();
        }
    }
}
