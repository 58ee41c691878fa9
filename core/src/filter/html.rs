//! Literal markup.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::{
    rollout::{NodeId, NodeKind, ZenNode, ZenTree},
    text::{pad_string, regex, replace_counter, unescape_text, upgrade_tabstops},
};
use super::{FilterContext, format::{self, CHILD_TOKEN, PLACEHOLDER}, walk};


static RE_ATTR_TOKEN: Lazy<Regex> = Lazy::new(|| regex(r"\$\{([\w\-]+)\}"));


pub(super) fn apply(tree: &mut ZenTree, ctx: &mut FilterContext<'_>) {
    format::apply(tree, ctx);
    ctx.tabstops = 0;

    for (id, _) in walk(tree) {
        if tree.get(id).is_snippet() {
            snippet(tree, id, ctx);
        } else {
            tag(tree.get_mut(id), ctx);
        }
        finish(tree, id, ctx);
    }
}

/// Counters, unescaping, and tabstop renumbering, for every markup filter.
pub(super) fn finish(tree: &mut ZenTree, id: NodeId, ctx: &mut FilterContext<'_>) {
    let counter = tree.counter_for(id);
    let node = tree.get_mut(id);
    for part in [&mut node.start, &mut node.end, &mut node.content] {
        *part = unescape_text(&replace_counter(part, counter));
    }
    let mut max = 0;
    for part in [&mut node.start, &mut node.end, &mut node.content] {
        *part = upgrade_tabstops(part, ctx.tabstops, &mut max);
    }
    ctx.tabstops += max + 1;
}

/// Fill the `%s` placeholder of `slot` with `value`, or use `value` when the
/// slot has none.
pub(super) fn fill(slot: &str, value: &str) -> String {
    if slot.is_empty() { value.to_owned() } else { slot.replacen(PLACEHOLDER, value, 1) }
}

/// Split a snippet template around its children and pad both parts like the
/// parent.
pub(super) fn snippet_parts(tree: &ZenTree, id: NodeId, ctx: &FilterContext<'_>)
                            -> Option<(String, String)>
{
    let node = tree.get(id);
    let NodeKind::Snippet { value } = &node.kind else { return None };
    let padding = node.parent().map(|p| tree.get(p).padding.as_str()).unwrap_or_default();
    let (start, end) = value.split_once(CHILD_TOKEN).unwrap_or((value, ""));
    Some((pad_string(start, padding, ctx.newline), pad_string(end, padding, ctx.newline)))
}

fn snippet(tree: &mut ZenTree, id: NodeId, ctx: &FilterContext<'_>) {
    let Some((start, end)) = snippet_parts(tree, id, ctx) else { return };
    let node = tree.get_mut(id);
    let with_attrs = |text: &str| {
        RE_ATTR_TOKEN.replace_all(text, |caps: &Captures<'_>| {
            node.attributes.get(&caps[1]).map_or_else(|| caps[0].to_owned(), str::to_owned)
        }).into_owned()
    };
    let (start, end) = (with_attrs(&start), with_attrs(&end));
    node.start = fill(&node.start, &start);
    node.end = fill(&node.end, &end);
}

fn attributes(node: &ZenNode, ctx: &FilterContext<'_>) -> String {
    let quote = ctx.profile.attr_quotes.char();
    node.attributes.iter()
        .map(|attr| {
            let value = if attr.value.is_empty() { ctx.cursor() } else { attr.value.as_str() };
            format!(" {}={quote}{value}{quote}", ctx.profile.attr_case.apply(&attr.name))
        })
        .collect()
}

fn tag(node: &mut ZenNode, ctx: &FilterContext<'_>) {
    let Some(name) = &node.name else { return };
    let name = ctx.profile.tag_case.apply(name);
    let attrs = attributes(node, ctx);
    let is_unary = node.is_unary() && node.children().is_empty();

    if is_unary {
        let marker = ctx.profile.self_closing.marker();
        node.start = fill(&node.start, &format!("<{name}{attrs}{marker}>"));
        node.end = String::new();
    } else {
        node.start = fill(&node.start, &format!("<{name}{attrs}>"));
        node.end = fill(&node.end, &format!("</{name}>"));
    }

    let cursor = ctx.cursor();
    if node.children().is_empty() && !is_unary && !cursor.is_empty()
        && !node.content.contains(cursor)
    {
        node.start.push_str(cursor);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filling() {
        assert_eq!(fill("\n\t%s", "<p>"), "\n\t<p>");
        assert_eq!(fill("", "<p>"), "<p>");
        assert_eq!(fill("%s", "100%s"), "100%s");
    }
}
