//! Puts the whole output on one line.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{rollout::ZenTree, text::regex};
use super::walk;


static RE_NEWLINES: Lazy<Regex> = Lazy::new(|| regex(r"[\n\r]"));


pub(super) fn apply(tree: &mut ZenTree) {
    for (id, _) in walk(tree) {
        let node = tree.get_mut(id);
        if node.name.is_some() && !node.is_snippet() {
            node.start = node.start.trim_start().to_owned();
            node.end = node.end.trim_start().to_owned();
        }
        for part in [&mut node.start, &mut node.end, &mut node.content] {
            *part = RE_NEWLINES.replace_all(part, "").into_owned();
        }
    }
}
