//! HAML notation: `%tag#id.class{:attr => "value"}`, children nested by
//! indentation alone.

use crate::{
    SelfClosing,
    rollout::{NodeId, ZenNode, ZenTree},
};
use super::{FilterContext, format, html::{fill, finish, snippet_parts}, walk};


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

fn snippet(tree: &mut ZenTree, id: NodeId, ctx: &FilterContext<'_>) {
    let Some((start, end)) = snippet_parts(tree, id, ctx) else { return };
    let node = tree.get_mut(id);
    node.start = fill(&node.start, &start);
    node.end = fill(&node.end, &end);
}

fn attributes(node: &ZenNode, ctx: &FilterContext<'_>) -> String {
    let cursor = ctx.cursor();
    let or_cursor = |value: &str| if value.is_empty() { cursor.to_owned() }
                                  else { value.to_owned() };
    let mut result = String::new();
    for attr in &node.attributes {
        if attr.name.eq_ignore_ascii_case("id") {
            result.push('#');
            result.push_str(&or_cursor(&attr.value));
        } else if attr.name.eq_ignore_ascii_case("class") {
            result.push('.');
            result.push_str(&or_cursor(&attr.value.split_whitespace()
                                                  .collect::<Vec<_>>().join(".")));
        }
    }

    let quote = ctx.profile.attr_quotes.char();
    let others: Vec<String> = node.attributes.iter()
        .filter(|a| !a.name.eq_ignore_ascii_case("id") && !a.name.eq_ignore_ascii_case("class"))
        .map(|a| format!(":{} => {quote}{}{quote}", ctx.profile.attr_case.apply(&a.name),
                         or_cursor(&a.value)))
        .collect();
    if !others.is_empty() {
        result.push('{');
        result.push_str(&others.join(", "));
        result.push('}');
    }
    result
}

fn tag(node: &mut ZenNode, ctx: &FilterContext<'_>) {
    let Some(name) = &node.name else { return };
    let name = ctx.profile.tag_case.apply(name);
    let attrs = attributes(node, ctx);
    let is_unary = node.is_unary() && node.children().is_empty();
    let self_closing = match ctx.profile.self_closing {
        SelfClosing::Xml | SelfClosing::Xhtml if is_unary => "/",
        _ => "",
    };
    // `%div` may be left out only when `#id`/`.class` follows to stand for it;
    // a bare `div` keeps it.
    let name = if name.eq_ignore_ascii_case("div") && !attrs.is_empty() && !attrs.contains('{')
    {
        String::new()
    } else {
        format!("%{name}")
    };

    node.start = fill(&node.start, &format!("{name}{attrs}{self_closing}"));
    node.end = String::new();

    let cursor = ctx.cursor();
    if node.children().is_empty() && !is_unary && !cursor.is_empty()
        && !node.content.contains(cursor)
    {
        node.start.push_str(cursor);
    }
}
