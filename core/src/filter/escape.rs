//! HTML-escaping of the generated output.

use crate::rollout::ZenTree;
use super::walk;


fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

pub(super) fn apply(tree: &mut ZenTree) {
    for (id, _) in walk(tree) {
        let node = tree.get_mut(id);
        node.start = escape(&node.start);
        node.end = escape(&node.end);
        node.content = escape(&node.content);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ampersand_first() {
        assert_eq!(escape("<a href=\"?x&y\">"), "&lt;a href=\"?x&amp;y\"&gt;");
        assert_eq!(escape(&escape("<")), "&amp;lt;");
    }
}
