//! `<!-- #id.class -->` and `<!-- /#id.class -->` around important blocks.

use crate::{
    TagNewline,
    rollout::{NodeId, ZenTree},
    text::replace_counter,
};
use super::{FilterContext, walk};


pub(super) fn apply(tree: &mut ZenTree, ctx: &FilterContext<'_>) {
    if ctx.profile.tag_newline == TagNewline::Never {
        return;
    }
    for (id, index) in walk(tree) {
        if tree.get(id).is_block() {
            add_comments(tree, id, index, ctx.newline);
        }
    }
}

fn add_comments(tree: &mut ZenTree, id: NodeId, index: usize, nl: &str) {
    let node = tree.get(id);
    let non_empty = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_owned);
    let (id_attr, class_attr) = (non_empty(node.attributes.get("id")),
                                 non_empty(node.attributes.get("class")));
    if id_attr.is_none() && class_attr.is_none() {
        return;
    }
    let mut comment = String::new();
    if let Some(id_attr) = id_attr {
        comment.push('#');
        comment.push_str(&id_attr);
    }
    if let Some(class_attr) = class_attr {
        comment.push('.');
        comment.push_str(&class_attr);
    }
    let padding = node.parent().map(|p| tree.get(p).padding.clone()).unwrap_or_default();

    let node = tree.get_mut(id);
    let start = node.start.replacen('<', &format!("<!-- {comment} -->{nl}{padding}<"), 1);
    let end = node.end.replacen('>', &format!(">{nl}{padding}<!-- /{comment} -->"), 1);
    node.start = replace_counter(&start, index + 1);
    node.end = replace_counter(&end, index + 1);
}
