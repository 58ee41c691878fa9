//! Line breaks and indentation.  Each named node gets `%s` placeholders in
//! `start` and `end`, surrounded by the newlines and padding its position
//! calls for, for the markup filters to fill in.

use crate::{
    TagNewline,
    rollout::{NodeId, NodeKind, ZenTree},
    text::{line_padding, pad_string, split_by_lines},
};
use super::{FilterContext, walk};


pub(super) const PLACEHOLDER: &str = "%s";

pub(super) const CHILD_TOKEN: &str = "${child}";


pub(super) fn apply(tree: &mut ZenTree, ctx: &FilterContext<'_>) {
    for (id, _) in walk(tree) {
        if tree.get(id).is_snippet() {
            snippet(tree, id, ctx);
        } else {
            tag(tree, id, ctx);
        }
        let node = tree.get_mut(id);
        if !node.content.is_empty() {
            node.content = pad_string(&node.content, &node.padding, ctx.newline);
        }
    }
}

fn parent_padding(tree: &ZenTree, id: NodeId) -> String {
    tree.get(id).parent().map(|p| tree.get(p).padding.clone()).unwrap_or_default()
}

fn snippet(tree: &mut ZenTree, id: NodeId, ctx: &FilterContext<'_>) {
    let padding = parent_padding(tree, id);
    let very_first = tree.is_very_first_child(id);
    let node = tree.get_mut(id);
    let NodeKind::Snippet { value } = &node.kind else { return };

    let before_child = value.split(CHILD_TOKEN).next().unwrap_or_default();
    let lines = split_by_lines(before_child, false);
    let delta = match lines.last() {
        Some(last) if lines.len() > 1 && !line_padding(last).is_empty() => line_padding(last),
        _ => ctx.indentation.as_str(),
    }.to_owned();

    node.start = if very_first { PLACEHOLDER.to_owned() }
                 else { format!("{}{padding}{PLACEHOLDER}", ctx.newline) };
    node.end = PLACEHOLDER.to_owned();
    node.padding = padding + &delta;
}

fn tag(tree: &mut ZenTree, id: NodeId, ctx: &FilterContext<'_>) {
    if tree.get(id).name.is_none() {
        return;
    }
    let profile = ctx.profile;
    let nl = ctx.newline;
    let mut start = PLACEHOLDER.to_owned();
    let mut end = PLACEHOLDER.to_owned();

    if profile.tag_newline == TagNewline::Never {
        let node = tree.get_mut(id);
        node.start = start;
        node.end = end;
        return;
    }

    let node = tree.get(id);
    let is_unary = node.is_unary() && node.children().is_empty();
    let padding = parent_padding(tree, id);
    let force_nl = profile.tag_newline == TagNewline::Always;
    let should_break = should_break_line(tree, id, profile.inline_break);
    let very_first = tree.is_very_first_child(id);
    let parent = node.parent().map(|p| tree.get(p));
    let has_block_sibling = node.parent().map_or(false, |p| tree.has_block_children(p));

    if ((node.is_block() || should_break) && parent.is_some()) || force_nl {
        if parent.map_or(true, |p| !p.is_snippet() && !very_first) {
            start = format!("{nl}{padding}{start}");
        }
        if tree.has_block_children(id) || should_break_child(tree, id, profile.inline_break)
            || (force_nl && !is_unary)
        {
            end = format!("{nl}{padding}{end}");
        }
        if node.has_tags_in_content() || (force_nl && node.children().is_empty() && !is_unary) {
            start = format!("{start}{nl}{padding}{}", ctx.indentation);
        }
    } else if node.is_inline() && has_block_sibling && !very_first {
        start = format!("{nl}{padding}{start}");
    } else if node.is_inline() && tree.has_block_children(id) {
        end = format!("{nl}{padding}{end}");
    }

    let node = tree.get_mut(id);
    node.start = start;
    node.end = end;
    node.padding = padding + &ctx.indentation;
}

/// A run of at least `inline_break` inline siblings that `id` belongs to puts
/// each of them on its own line.
fn should_break_line(tree: &ZenTree, id: NodeId, inline_break: usize) -> bool {
    if inline_break == 0 {
        return false;
    }
    let mut first = id;
    while let Some(previous) = tree.get(first).previous_sibling() {
        if !tree.get(previous).is_inline() {
            break;
        }
        first = previous;
    }
    if !tree.get(first).is_inline() {
        return false;
    }
    let mut count = 1;
    let mut next = tree.get(first).next_sibling();
    while let Some(sibling) = next {
        if !tree.get(sibling).is_inline() {
            break;
        }
        count += 1;
        next = tree.get(sibling).next_sibling();
    }
    count >= inline_break
}

fn should_break_child(tree: &ZenTree, id: NodeId, inline_break: usize) -> bool {
    tree.get(id).children().first()
        .map_or(false, |&child| should_break_line(tree, child, inline_break))
}
