//! The semantic tree: parse-tree nodes resolved against the vocabulary into
//! tags and snippets, before multiplied elements are rolled out.

use crate::{
    Attribute, Attributes,
    parser::{Multiplier, RawNode},
    text::{escape_text, filter_node_name, replace_unescaped_str},
    vocabulary::{ResourceEntry, TagAbbreviation, Vocabulary},
};


/// Index of a [`Tag`] in its [`TagTree`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct TagId(usize);


/// What a [`Tag`] expands from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TagKind {
    /// An element, with the abbreviation entry its name resolved to, if any
    Tag {
        /// The resolved entry
        abbreviation: Option<TagAbbreviation>,
    },
    /// A literal template whose `${child}` marker splits it into the parts
    /// around the children
    Snippet {
        /// The template, with `|` already turned into the caret placeholder
        value: String,
    },
}

/// A node of the semantic tree.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Tag {
    /// Tag or snippet
    pub kind: TagKind,
    /// Output element name; `None` for text-only nodes and the root
    pub name: Option<String>,
    /// The name as written in the abbreviation
    pub real_name: Option<String>,
    /// Default attributes followed by the written ones, merged
    pub attributes: Attributes,
    /// `{...}` text, with `|` turned into the caret placeholder
    pub content: String,
    /// Escaped text to paste into the rolled-out copies
    pub paste_content: String,
    /// How many copies to roll out
    pub count: usize,
    /// Copies are made per line of [`paste_content`](Self::paste_content)
    pub repeat_by_lines: bool,
    /// The name is an unwritten `div`
    pub has_implicit_name: bool,
    parent: Option<TagId>,
    children: Vec<TagId>,
}

impl Tag {
    fn root() -> Self {
        Self {
            kind: TagKind::Tag { abbreviation: None },
            name: None,
            real_name: None,
            attributes: Attributes::new(),
            content: String::new(),
            paste_content: String::new(),
            count: 1,
            repeat_by_lines: false,
            has_implicit_name: false,
            parent: None,
            children: vec![],
        }
    }

    fn from_raw(node: &RawNode, vocabulary: &Vocabulary, syntax: &str, caret: &str) -> Self {
        let caretize = |value: &str| replace_unescaped_str(value, "|", caret);
        let lookup = node.name.as_deref().map(filter_node_name);
        let mut tag = Self {
            name: node.name.clone(),
            real_name: node.name.clone(),
            content: node.text.as_deref().map(caretize).unwrap_or_default(),
            count: node.multiplier.count(),
            repeat_by_lines: node.multiplier == Multiplier::ByLines,
            has_implicit_name: node.has_implicit_name,
            .. Self::root()
        };

        match lookup.and_then(|name| vocabulary.get_snippet(syntax, name)) {
            Some(template) => {
                tag.kind = TagKind::Snippet { value: caretize(template) };
                for attr in &node.attributes {
                    tag.attributes.merge(Attribute::new(&attr.name, caretize(&attr.value)),
                                         caret);
                }
                tag.attributes.seed(Attribute::new("id", caret));
                tag.attributes.seed(Attribute::new("class", caret));
            }
            None => {
                let abbreviation = lookup
                    .and_then(|name| vocabulary.resolve_abbreviation(syntax, name))
                    .and_then(|entry| match entry {
                        ResourceEntry::TagAbbreviation(abbr) => Some(abbr.clone()),
                        ResourceEntry::Expando(_) | ResourceEntry::Reference(_) => None,
                    });
                match &abbreviation {
                    Some(abbr) => {
                        tag.name = Some(abbr.name.clone());
                        for attr in &abbr.attributes {
                            tag.attributes.merge(
                                Attribute::new(&attr.name, caretize(&attr.value)), caret);
                        }
                    }
                    None => {
                        if let Some(name) = &mut tag.name {
                            if name.len() > 1 && name.ends_with('+') {
                                let _plus = name.pop();
                            }
                        }
                    }
                }
                for attr in &node.attributes {
                    tag.attributes.merge(Attribute::new(&attr.name, caretize(&attr.value)),
                                         caret);
                }
                tag.kind = TagKind::Tag { abbreviation };
            }
        }
        tag
    }

    /// Whether it was multiplied with a count above one.
    pub fn is_repeating(&self) -> bool {
        self.count > 1
    }

    /// Is a snippet.
    pub fn is_snippet(&self) -> bool {
        matches!(self.kind, TagKind::Snippet { .. })
    }

    /// The parent, `None` for the root.
    pub fn parent(&self) -> Option<TagId> {
        self.parent
    }

    /// The children in order.
    pub fn children(&self) -> &[TagId] {
        &self.children
    }
}


/// Arena of [`Tag`]s for one abbreviation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TagTree {
    nodes: Vec<Tag>,
    syntax: String,
    filters: Option<String>,
    last: Option<TagId>,
    multiply_elem: Option<TagId>,
}

impl TagTree {
    /// Resolve a preprocessed parse tree (its root's children) for `syntax`.
    /// Unescaped `|` in attribute values, text, and snippets is replaced by
    /// `caret`.
    pub fn build(raw: &RawNode, vocabulary: &Vocabulary, syntax: &str, caret: &str) -> Self {
        let mut tree = Self {
            nodes: vec![Tag::root()],
            syntax: syntax.to_owned(),
            filters: None,
            last: None,
            multiply_elem: None,
        };
        for child in &raw.children {
            tree.add(child, tree.root(), vocabulary, caret);
        }
        tree
    }

    fn add(&mut self, raw: &RawNode, parent: TagId, vocabulary: &Vocabulary, caret: &str) {
        let mut tag = Tag::from_raw(raw, vocabulary, &self.syntax, caret);
        tag.parent = Some(parent);
        let id = TagId(self.nodes.len());
        if tag.repeat_by_lines {
            self.multiply_elem = Some(id);
        }
        self.nodes.push(tag);
        self.nodes[parent.0].children.push(id);
        self.last = Some(id);
        for child in &raw.children {
            self.add(child, id, vocabulary, caret);
        }
    }

    /// The nameless root.
    pub fn root(&self) -> TagId {
        TagId(0)
    }

    /// Access a node.
    pub fn get(&self, id: TagId) -> &Tag {
        &self.nodes[id.0]
    }

    /// Mutably access a node.
    pub fn get_mut(&mut self, id: TagId) -> &mut Tag {
        &mut self.nodes[id.0]
    }

    /// The syntax it was built for.
    pub fn syntax(&self) -> &str {
        &self.syntax
    }

    /// Filters from the abbreviation's `|f1|f2` suffix.
    pub fn filters(&self) -> Option<&str> {
        self.filters.as_deref()
    }

    /// Set the filters from the abbreviation's suffix.
    pub fn set_filters(&mut self, filters: Option<&str>) {
        self.filters = filters.map(str::to_owned);
    }

    /// The node built last, in document order.
    pub fn last(&self) -> Option<TagId> {
        self.last
    }

    /// The last node multiplied by a bare `*`.
    pub fn multiply_elem(&self) -> Option<TagId> {
        self.multiply_elem
    }

    /// Give `id` text to paste into its rolled-out copies.  It is escaped so
    /// that `$` and `|` in it are kept literally.
    pub fn set_paste_content(&mut self, id: TagId, text: &str) {
        self.get_mut(id).paste_content = escape_text(text);
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


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parser, vocabulary::Tier};
    use pretty_assertions::assert_eq;

    fn vocabulary() -> Vocabulary {
        let mut system = Tier::new();
        let _ = system.syntax_mut("html")
            .insert_abbreviation("select", r#"<select name="" id="">"#)
            .insert_abbreviation("bq", "<blockquote>")
            .insert_abbreviation("quote", "bq")
            .insert_snippet("cc:ie", "<!--[if IE]>${child}|<![endif]-->");
        let _ = system.syntax_mut("css").insert_snippet("pos:s", "position:static;");
        Vocabulary::new(system)
    }

    fn build(abbr: &str, syntax: &str) -> TagTree {
        let voc = vocabulary();
        let raw = parser::preprocess(parser::parse(abbr).unwrap(), &voc, syntax).unwrap();
        TagTree::build(&raw, &voc, syntax, "|")
    }

    fn attrs(tag: &Tag) -> Vec<(&str, &str)> {
        tag.attributes.iter().map(|a| (a.name.as_str(), a.value.as_str())).collect()
    }

    #[test]
    fn tags() {
        let tree = build("select#test.a.b+quote", "html");
        let root = tree.get(tree.root());
        assert_eq!(root.children().len(), 2);
        let select = tree.get(root.children()[0]);
        assert_eq!(select.name.as_deref(), Some("select"));
        assert_eq!(attrs(select), [("name", ""), ("id", "test"), ("class", "a b")]);
        let quote = tree.get(root.children()[1]);
        assert_eq!(quote.name.as_deref(), Some("blockquote"));
        assert_eq!(quote.real_name.as_deref(), Some("quote"));
        assert_eq!(tree.last(), Some(root.children()[1]));
    }

    #[test]
    fn snippets() {
        let tree = build("cc:ie.x", "html");
        let snippet = tree.get(tree.get(tree.root()).children()[0]);
        assert!(snippet.is_snippet());
        assert_eq!(attrs(snippet), [("class", "x"), ("id", "|")]);
        assert_eq!(snippet.kind,
                   TagKind::Snippet { value: "<!--[if IE]>${child}|<![endif]-->".to_owned() });

        let tree = build("pos:s!", "css");
        let snippet = tree.get(tree.get(tree.root()).children()[0]);
        assert!(snippet.is_snippet());
        assert_eq!(snippet.real_name.as_deref(), Some("pos:s!"));
    }

    #[test]
    fn repeats_and_text() {
        let tree = build("ul>li*>a{x|y}", "html");
        let ul = tree.get(tree.root()).children()[0];
        let li = tree.get(ul).children()[0];
        assert_eq!(tree.multiply_elem(), Some(li));
        assert!(tree.get(li).repeat_by_lines);
        let a = tree.get(tree.get(li).children()[0]);
        assert_eq!(a.content, "x|y");
        assert_eq!(tree.get(tree.last().unwrap()).name.as_deref(), Some("a"));

        let tree = build("p*3+foo+", "html");
        let children = tree.get(tree.root()).children();
        assert!(tree.get(children[0]).is_repeating());
        assert_eq!(tree.get(children[1]).name.as_deref(), Some("foo"));
    }

    #[test]
    fn paste_is_escaped() {
        let mut tree = build("p", "html");
        let p = tree.last().unwrap();
        tree.set_paste_content(p, "$a|b");
        assert_eq!(tree.get(p).paste_content, r"\$a\|b");
    }
}
