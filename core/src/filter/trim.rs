//! Strips list markers (`1.`, `*`, `-`, `#`, bullets) from pasted lines.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{rollout::ZenTree, text::regex};
use super::walk;


static RE_LIST_MARKER: Lazy<Regex> = Lazy::new(|| regex(
    r"^([\s\x{00A0}])?[\d#\-*\x{2022}]+\.?\s*"));


pub(super) fn apply(tree: &mut ZenTree) {
    for (id, _) in walk(tree) {
        let node = tree.get_mut(id);
        if !node.content.is_empty() {
            node.content = RE_LIST_MARKER.replacen(&node.content, 1, "${1}").into_owned();
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers() {
        for (line, expected) in [("1. one", "one"), ("* two", "two"), ("- three", "three"),
                                 ("\u{2022} four", "four"), ("#5 five", "five"),
                                 ("plain", "plain")]
        {
            assert_eq!(RE_LIST_MARKER.replacen(line, 1, "${1}"), expected);
        }
    }
}
