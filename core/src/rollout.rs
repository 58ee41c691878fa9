//! Materialization of multiplied elements into concrete nodes, and the output
//! tree that the filters rewrite and the serializer concatenates.

use crate::{
    Attributes,
    text::{has_output_placeholder, replace_unescaped_str, split_by_lines},
    tree::{Tag, TagId, TagKind, TagTree},
    vocabulary::{ElementType, Vocabulary},
};


/// Index of a [`ZenNode`] in its [`ZenTree`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);


/// Whether a [`ZenNode`] is an element or an expanded snippet.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NodeKind {
    /// An element
    Tag,
    /// A snippet with its template
    Snippet {
        /// The template, `${child}` marker included
        value: String,
    },
}

/// A concrete output node.  The filters fill in [`start`](Self::start),
/// [`end`](Self::end), [`content`](Self::content), and
/// [`padding`](Self::padding).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ZenNode {
    /// Tag or snippet
    pub kind: NodeKind,
    /// Element name; `None` for text-only nodes and the root
    pub name: Option<String>,
    /// The name as written in the abbreviation
    pub real_name: Option<String>,
    /// This copy's own attributes
    pub attributes: Attributes,
    /// 1-based index of this copy among its repetitions
    pub counter: usize,
    /// Output before the content and children
    pub start: String,
    /// Output after the children
    pub end: String,
    /// Output between start and the children
    pub content: String,
    /// Indentation of this node's nested lines
    pub padding: String,
    /// The name is an unwritten `div`
    pub has_implicit_name: bool,
    repeating: bool,
    unary: bool,
    inline: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    previous_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl ZenNode {
    fn root() -> Self {
        Self {
            kind: NodeKind::Tag,
            name: None,
            real_name: None,
            attributes: Attributes::new(),
            counter: 1,
            start: String::new(),
            end: String::new(),
            content: String::new(),
            padding: String::new(),
            has_implicit_name: false,
            repeating: false,
            unary: false,
            inline: false,
            parent: None,
            children: vec![],
            previous_sibling: None,
            next_sibling: None,
        }
    }

    /// A text-only node.
    pub fn text<S: Into<String>>(content: S) -> Self {
        Self { content: content.into(), inline: true, .. Self::root() }
    }

    /// Is a snippet.
    pub fn is_snippet(&self) -> bool {
        matches!(self.kind, NodeKind::Snippet { .. })
    }

    /// Has no closing tag: the abbreviation says so or the name is in the
    /// `empty` collection.  Snippets never are.
    pub fn is_unary(&self) -> bool {
        self.unary
    }

    /// The name is in the `inline_level` collection, or there is no name.
    pub fn is_inline(&self) -> bool {
        self.inline
    }

    /// Snippets and non-inline elements.
    pub fn is_block(&self) -> bool {
        self.is_snippet() || !self.inline
    }

    /// Made from a node multiplied more than once or by lines.
    pub fn is_repeating(&self) -> bool {
        self.repeating
    }

    /// The parent, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The children in order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// The sibling just before.
    pub fn previous_sibling(&self) -> Option<NodeId> {
        self.previous_sibling
    }

    /// The sibling just after.
    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    /// The text contains markup tags.
    pub fn has_tags_in_content(&self) -> bool {
        !self.content.is_empty() && crate::text::ends_with_tag(&self.content)
    }
}


/// Arena of [`ZenNode`]s with a nameless root.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ZenTree {
    nodes: Vec<ZenNode>,
}

impl Default for ZenTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ZenTree {
    /// Only a root.
    pub fn new() -> Self {
        Self { nodes: vec![ZenNode::root()] }
    }

    /// The nameless root.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Access a node.
    pub fn get(&self, id: NodeId) -> &ZenNode {
        &self.nodes[id.0]
    }

    /// Mutably access a node.
    pub fn get_mut(&mut self, id: NodeId) -> &mut ZenNode {
        &mut self.nodes[id.0]
    }

    /// All nodes below the root, parents before their children, siblings in
    /// order.
    pub fn descendants(&self, of: NodeId) -> Vec<NodeId> {
        let mut result = vec![];
        let mut stack: Vec<NodeId> = self.get(of).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            result.push(id);
            stack.extend(self.get(id).children.iter().rev().copied());
        }
        result
    }

    /// Append `node` as the last child of `parent`, linking it to the
    /// previous last child.
    pub fn add_child(&mut self, parent: NodeId, mut node: ZenNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.previous_sibling = self.get(parent).children.last().copied();
        node.next_sibling = None;
        node.children.clear();
        if let Some(previous) = node.previous_sibling {
            self.get_mut(previous).next_sibling = Some(id);
        }
        self.nodes.push(node);
        self.get_mut(parent).children.push(id);
        id
    }

    /// The last node reached by always descending into the last child, or
    /// `None` without children.
    pub fn deepest_child(&self, of: NodeId) -> Option<NodeId> {
        let mut deepest = *self.get(of).children.last()?;
        while let Some(&last) = self.get(deepest).children.last() {
            deepest = last;
        }
        Some(deepest)
    }

    /// The counter seen by `$` tokens of `id`: its own if it repeats,
    /// otherwise that of its nearest repeating ancestor.
    pub fn counter_for(&self, id: NodeId) -> usize {
        let mut current = Some(id);
        while let Some(at) = current {
            let node = self.get(at);
            if node.repeating {
                return node.counter;
            }
            current = node.parent;
        }
        self.get(id).counter
    }

    /// `id` is the first child of the root.
    pub fn is_very_first_child(&self, id: NodeId) -> bool {
        let node = self.get(id);
        node.parent == Some(self.root()) && node.previous_sibling.is_none()
    }

    /// A block node whose content contains markup, or any child is a block.
    pub fn has_block_children(&self, id: NodeId) -> bool {
        let node = self.get(id);
        (node.has_tags_in_content() && node.is_block())
            || node.children.iter().any(|&child| self.get(child).is_block())
    }

    /// Concatenate start, content, the children, and end of every node.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        self.serialize_into(self.root(), &mut out);
        out
    }

    fn serialize_into(&self, id: NodeId, out: &mut String) {
        let node = self.get(id);
        out.push_str(&node.start);
        out.push_str(&node.content);
        for &child in &node.children {
            self.serialize_into(child, out);
        }
        out.push_str(&node.end);
    }

    /// How many nodes, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether only the root is there.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}


/// Roll out `tree`: every node is copied as many times as it is multiplied,
/// each copy with its own counter and a fresh copy of the subtree.
pub fn rollout(tree: &TagTree, vocabulary: &Vocabulary) -> ZenTree {
    let roller = Roller { tree, vocabulary, syntax: tree.syntax() };
    let mut zen = ZenTree::new();
    let root = zen.root();
    roller.children(tree.root(), &mut zen, root);
    tracing::trace!(nodes = zen.len(), "rolled out");
    zen
}

struct Roller<'a> {
    tree: &'a TagTree,
    vocabulary: &'a Vocabulary,
    syntax: &'a str,
}

impl Roller<'_> {
    fn children(&self, of: TagId, zen: &mut ZenTree, parent: NodeId) {
        for &child in self.tree.get(of).children() {
            let tag = self.tree.get(child);
            let lines = split_by_lines(&tag.paste_content, true);
            let how_many = if tag.repeat_by_lines { lines.len().max(1) } else { tag.count };

            for j in 0 .. how_many {
                let mut node = self.node(tag);
                node.counter = j + 1;
                if node.has_implicit_name && zen.get(parent).name.is_some()
                    && zen.get(parent).inline
                {
                    node.name = Some("span".to_owned());
                    node.inline = self.is_inline(Some("span"));
                }
                let id = zen.add_child(parent, node);
                self.children(child, zen, id);

                let paste = if tag.repeat_by_lines {
                    lines.get(j).map(|line| line.trim())
                } else {
                    Some(tag.paste_content.trim()).filter(|text| !text.is_empty())
                };
                if let Some(text) = paste {
                    paste_content(zen, id, text);
                }
            }
        }
    }

    fn node(&self, tag: &Tag) -> ZenNode {
        let (kind, unary) = match &tag.kind {
            TagKind::Snippet { value } => (NodeKind::Snippet { value: value.clone() }, false),
            TagKind::Tag { abbreviation } => {
                let unary = abbreviation.as_ref().map_or(false, |abbr| abbr.is_empty)
                    || tag.name.as_deref().map_or(false, |name| {
                        self.vocabulary.is_item_in_collection(self.syntax, ElementType::Empty,
                                                              name)
                    });
                (NodeKind::Tag, unary)
            }
        };
        ZenNode {
            kind,
            name: tag.name.clone(),
            real_name: tag.real_name.clone(),
            attributes: tag.attributes.clone(),
            content: tag.content.clone(),
            has_implicit_name: tag.has_implicit_name,
            repeating: tag.is_repeating() || tag.repeat_by_lines,
            unary,
            inline: self.is_inline(tag.name.as_deref()),
            .. ZenNode::root()
        }
    }

    fn is_inline(&self, name: Option<&str>) -> bool {
        name.map_or(true, |name| {
            self.vocabulary.is_item_in_collection(self.syntax, ElementType::InlineLevel, name)
        })
    }
}

/// Put `text` into the `$#` output placeholders of `id` and its descendants,
/// or, without any, after the content of its deepest last descendant.
pub fn paste_content(zen: &mut ZenTree, id: NodeId, text: &str) {
    let mut targets = vec![id];
    targets.extend(zen.descendants(id));
    targets.retain(|&at| {
        let node = zen.get(at);
        has_output_placeholder(&node.content)
            || node.attributes.iter().any(|a| has_output_placeholder(&a.value))
    });

    if targets.is_empty() {
        let deepest = zen.deepest_child(id).unwrap_or(id);
        zen.get_mut(deepest).content.push_str(text);
        return;
    }
    for at in targets {
        let node = zen.get_mut(at);
        node.content = replace_unescaped_str(&node.content, "$#", text);
        for attr in node.attributes.iter_mut() {
            attr.value = replace_unescaped_str(&attr.value, "$#", text);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parser, vocabulary::Tier};
    use pretty_assertions::assert_eq;

    fn vocabulary() -> Vocabulary {
        let mut system = Tier::new();
        let _ = system.syntax_mut("html")
            .insert_abbreviation("img", r#"<img src="" alt="" />"#)
            .set_element_types(ElementType::Empty, "br,img,hr")
            .set_element_types(ElementType::InlineLevel, "a,b,em,span,img,br");
        Vocabulary::new(system)
    }

    fn roll(abbr: &str, paste: Option<&str>) -> ZenTree {
        let voc = vocabulary();
        let raw = parser::preprocess(parser::parse(abbr).unwrap(), &voc, "html").unwrap();
        let mut tree = TagTree::build(&raw, &voc, "html", "|");
        if let Some(text) = paste {
            let target = tree.multiply_elem().or(tree.last()).unwrap();
            tree.set_paste_content(target, text);
        }
        rollout(&tree, &voc)
    }

    fn names(zen: &ZenTree, of: NodeId) -> Vec<String> {
        zen.get(of).children().iter()
           .map(|&c| zen.get(c).name.clone().unwrap_or_default())
           .collect()
    }

    #[test]
    fn copies_and_counters() {
        let zen = roll("ul>li*3>a", None);
        let ul = zen.get(zen.root()).children()[0];
        let lis = zen.get(ul).children().to_vec();
        assert_eq!(names(&zen, ul), ["li", "li", "li"]);
        assert_eq!(lis.iter().map(|&li| zen.get(li).counter).collect::<Vec<_>>(), [1, 2, 3]);
        let a = zen.get(lis[2]).children()[0];
        assert_eq!(zen.get(a).counter, 1);
        assert_eq!(zen.counter_for(a), 3);
        assert_eq!(zen.counter_for(ul), 1);
        assert_eq!(zen.get(lis[1]).previous_sibling(), Some(lis[0]));
        assert_eq!(zen.get(lis[1]).next_sibling(), Some(lis[2]));
        assert!(zen.is_very_first_child(ul));
        assert!(!zen.is_very_first_child(lis[0]));
    }

    #[test]
    fn classification() {
        let zen = roll("p>img+b+{text}", None);
        let p = zen.get(zen.root()).children()[0];
        let children = zen.get(p).children().to_vec();
        assert!(zen.get(children[0]).is_unary() && zen.get(children[0]).is_inline());
        assert!(!zen.get(children[1]).is_unary());
        assert!(zen.get(children[2]).is_inline());
        assert!(!zen.has_block_children(p));
        assert!(zen.get(p).is_block());
    }

    #[test]
    fn implicit_span() {
        let zen = roll("em>.a", None);
        let em = zen.get(zen.root()).children()[0];
        assert_eq!(names(&zen, em), ["span"]);
        let zen = roll("p>.a", None);
        let p = zen.get(zen.root()).children()[0];
        assert_eq!(names(&zen, p), ["div"]);
    }

    #[test]
    fn pasting() {
        let zen = roll("ul>li*", Some("one\n\n two \nthree\n"));
        let ul = zen.get(zen.root()).children()[0];
        let contents: Vec<_> = zen.get(ul).children().iter()
                                  .map(|&li| zen.get(li).content.as_str()).collect();
        assert_eq!(contents, ["one", "two", "three"]);

        let zen = roll("p>a[title=$#]", Some("hi"));
        let a = zen.deepest_child(zen.root()).unwrap();
        assert_eq!(zen.get(a).attributes.get("title"), Some("hi"));
        assert_eq!(zen.get(a).content, "");

        let zen = roll("p>b", Some("text"));
        let b = zen.deepest_child(zen.root()).unwrap();
        assert_eq!(zen.get(b).content, "text");
    }

    #[test]
    fn serialize() {
        let mut zen = roll("p>b", None);
        let p = zen.get(zen.root()).children()[0];
        let b = zen.get(p).children()[0];
        zen.get_mut(p).start = "<p>".into();
        zen.get_mut(p).end = "</p>".into();
        zen.get_mut(b).start = "<b>".into();
        zen.get_mut(b).content = "x".into();
        zen.get_mut(b).end = "</b>".into();
        assert_eq!(zen.serialize(), "<p><b>x</b></p>");
    }
}
