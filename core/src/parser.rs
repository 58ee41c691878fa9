//! The abbreviation grammar.
//!
//! ```text
//! expr       := item (('+' | '>') item)*
//! item       := '(' expr ')' multiplier? | element
//! element    := name? (shorthand | attrs | text)* multiplier?
//! shorthand  := '#' ident | '.' ident
//! attrs      := '[' (ident ('=' value)?)* ']'
//! text       := '{' balanced-content '}'
//! multiplier := '*' digits?
//! ```
//!
//! `+` adds a sibling, `>` descends into the previous item, and a group scopes
//! a subtree.  Brackets and braces are scanned separately, so operators inside
//! text or attribute values are not operators.  Parsing produces a tree of
//! [`RawNode`]s rooted at an empty node; [`preprocess`] then splices in
//! expandos and squashes grouping artifacts.

use std::mem;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    Attribute,
    error::{Error, Reason, Result},
    text::{self, regex},
    vocabulary::{ResourceEntry, Vocabulary},
};


static RE_VALID_NAME: Lazy<Regex> = Lazy::new(|| regex(r"^[\w\-$:@!]+\+?$"));

static RE_FILTERS: Lazy<Regex> = Lazy::new(|| regex(r"\|([\w|\-]+)$"));

/// How deep expandos may expand into other expandos.
const MAX_EXPANDO_DEPTH: usize = 16;


/// How many times an element or group is repeated.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Multiplier {
    /// No `*`
    #[default]
    Once,
    /// `*N`
    Times(usize),
    /// A bare `*`: once per line of the wrapped text
    ByLines,
}

impl Multiplier {
    /// The literal repeat count; [`ByLines`](Self::ByLines) counts as one
    /// until the wrapped text is known.
    pub fn count(self) -> usize {
        match self {
            Multiplier::Times(n) => n,
            Multiplier::Once | Multiplier::ByLines => 1,
        }
    }
}


/// A node of the parse tree.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct RawNode {
    /// Element name, `None` for text-only nodes and grouping artifacts
    pub name: Option<String>,
    /// `#id`, `.class` and `[...]` attributes in the order written
    pub attributes: Vec<Attribute>,
    /// `{...}` content
    pub text: Option<String>,
    /// `*` suffix
    pub multiplier: Multiplier,
    /// Nested nodes
    pub children: Vec<RawNode>,
    /// The name is a `div` that was not written
    pub has_implicit_name: bool,
}

impl RawNode {
    fn group(children: Vec<RawNode>, multiplier: Multiplier) -> Self {
        Self { children, multiplier, .. Self::default() }
    }

    /// Has no abbreviation content of its own, i.e. only groups its children.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.text.is_none() && self.attributes.is_empty()
    }

    /// Has text but no name.
    pub fn is_text_node(&self) -> bool {
        self.name.is_none() && self.text.is_some()
    }

    fn deepest_last_mut(&mut self) -> &mut RawNode {
        let mut node = self;
        while !node.children.is_empty() {
            let last = node.children.len() - 1;
            node = &mut node.children[last];
        }
        node
    }
}


/// Cut a trailing `|f1|f2` filter suffix off `abbr`.  Returns the rest of the
/// abbreviation and the filter names (still `|`-joined).
pub fn split_filters(abbr: &str) -> (&str, Option<&str>) {
    match RE_FILTERS.captures(abbr) {
        Some(caps) => {
            let whole = caps.get(0).map_or(abbr.len(), |m| m.start());
            (&abbr[.. whole], caps.get(1).map(|m| m.as_str()))
        }
        None => (abbr, None),
    }
}

/// Parse `abbr` (without a filter suffix) into a tree whose root is an empty
/// node.  Expandos are left as they are; see [`preprocess`].
pub fn parse(abbr: &str) -> Result<RawNode> {
    let mut parser = Parser { src: abbr, pos: 0 };
    let children = parser.sequence()?;
    match parser.peek() {
        None => Ok(RawNode::group(children, Multiplier::Once)),
        Some(')') => Err(Error::invalid(parser.pos, Reason::UnbalancedGroupEnd)),
        Some(_) => Err(Error::invalid(parser.pos, Reason::UnexpectedChar)),
    }
}

/// Replace the expandos of `tree` with the parsed abbreviations they stand
/// for, then squash the grouping artifacts.
pub fn preprocess(mut tree: RawNode, vocabulary: &Vocabulary, syntax: &str)
                  -> Result<RawNode>
{
    replace_expandos(&mut tree, vocabulary, syntax, 0)?;
    optimize(&mut tree);
    Ok(tree)
}

fn replace_expandos(node: &mut RawNode, vocabulary: &Vocabulary, syntax: &str,
                    depth: usize)
                    -> Result<()>
{
    for child in &mut node.children {
        let expando = child.name.as_deref()
            .filter(|name| name.ends_with('+'))
            .and_then(|name| match vocabulary.get_abbreviation(syntax, name) {
                Some(ResourceEntry::Expando(value)) => Some((name.to_owned(), value.clone())),
                _ => None,
            });
        match expando {
            Some((name, value)) => {
                if depth >= MAX_EXPANDO_DEPTH {
                    return Err(Error::group(name, "expandos nested too deeply"));
                }
                let mut expansion = parse(&value)
                    .map_err(|e| Error::group(name.as_str(), e.to_string()))?;
                replace_expandos(&mut expansion, vocabulary, syntax, depth + 1)?;
                tracing::trace!(%name, %value, "expanded expando");
                let multiplier = child.multiplier;
                let original = mem::replace(child, RawNode::group(expansion.children,
                                                                  multiplier));
                if !original.children.is_empty() {
                    child.deepest_last_mut().children.extend(original.children);
                }
                replace_expandos(child.deepest_last_mut(), vocabulary, syntax, depth)?;
            }
            None => replace_expandos(child, vocabulary, syntax, depth)?,
        }
    }
    Ok(())
}

/// Replace every node without content of its own by its children, repeated
/// as many times as its multiplier says.
pub fn optimize(node: &mut RawNode) {
    let children = mem::take(&mut node.children);
    for mut child in children {
        optimize(&mut child);
        if child.is_empty() {
            for _ in 0 .. child.multiplier.count() {
                node.children.extend(child.children.iter().cloned());
            }
        } else {
            node.children.push(child);
        }
    }
}


struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos ..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.src[self.pos ..].chars();
        let _first = chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn take_while<F>(&mut self, pred: F) -> &'a str
        where F: Fn(char) -> bool,
    {
        let (src, start) = (self.src, self.pos);
        while let Some(ch) = self.peek() {
            if !pred(ch) { break; }
            self.pos += ch.len_utf8();
        }
        &src[start .. self.pos]
    }

    fn take_ident(&mut self) -> &'a str {
        self.take_while(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '$' | '@'))
    }

    fn sequence(&mut self) -> Result<Vec<RawNode>> {
        let mut items = Vec::new();
        loop {
            let mut item = self.item()?;
            match self.peek() {
                Some('+') => {
                    let _ = self.bump();
                    items.push(item);
                }
                // A group written right after an item is its sibling.
                Some('(') => items.push(item),
                Some('>') => {
                    let _ = self.bump();
                    item.children.extend(self.sequence()?);
                    items.push(item);
                    return Ok(items);
                }
                Some(')') | None => {
                    items.push(item);
                    return Ok(items);
                }
                Some(_) => return Err(Error::invalid(self.pos, Reason::UnexpectedChar)),
            }
        }
    }

    fn item(&mut self) -> Result<RawNode> {
        if self.peek() != Some('(') {
            return self.element();
        }
        let open = self.pos;
        let _ = self.bump();
        let children = self.sequence()?;
        if self.bump() != Some(')') {
            return Err(Error::invalid(open, Reason::UnclosedGroup));
        }
        if children.iter().all(|c| c.is_empty() && c.children.is_empty()) {
            return Err(Error::group("()", "empty group"));
        }
        let multiplier = self.multiplier()?;
        Ok(RawNode::group(children, multiplier))
    }

    fn element(&mut self) -> Result<RawNode> {
        let start = self.pos;
        let mut name = self.take_while(|c| !matches!(c, '#' | '.' | '[' | '{' | '*'
                                                          | '+' | '>' | '(' | ')'))
                           .to_owned();
        // `name+` is an expando unless the `+` joins two items.
        if !name.is_empty() && self.peek() == Some('+')
            && matches!(self.peek_second(), None | Some(')' | '+' | '>' | '*'))
        {
            let _ = self.bump();
            name.push('+');
        }
        if !name.is_empty() && !RE_VALID_NAME.is_match(&name) {
            return Err(Error::invalid(start, Reason::InvalidName));
        }

        let mut node = RawNode::default();
        loop {
            match self.peek() {
                Some('#') => {
                    let _ = self.bump();
                    node.attributes.push(Attribute::new("id", self.take_ident()));
                }
                Some('.') => {
                    let _ = self.bump();
                    node.attributes.push(Attribute::new("class", self.take_ident()));
                }
                Some('[') => self.attributes(&mut node.attributes)?,
                Some('{') => {
                    let text = self.text()?;
                    node.text.get_or_insert_with(String::new).push_str(text);
                }
                _ => break,
            }
        }
        node.multiplier = self.multiplier()?;

        if !name.is_empty() {
            node.name = Some(name);
        } else if !node.attributes.is_empty() {
            node.name = Some("div".to_owned());
            node.has_implicit_name = true;
        }
        Ok(node)
    }

    fn multiplier(&mut self) -> Result<Multiplier> {
        if self.peek() != Some('*') {
            return Ok(Multiplier::Once);
        }
        let _ = self.bump();
        let at = self.pos;
        let digits = self.take_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            return Ok(Multiplier::ByLines);
        }
        digits.parse::<usize>()
              .map(|n| Multiplier::Times(n.max(1)))
              .map_err(|_| Error::invalid(at, Reason::UnexpectedChar))
    }

    fn text(&mut self) -> Result<&'a str> {
        let open = self.pos;
        let _ = self.bump();
        let (src, start) = (self.src, self.pos);
        let mut depth = 1_usize;
        while let Some(ch) = self.bump() {
            match ch {
                '\\' => { let _ = self.bump(); }
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(&src[start .. self.pos - 1]);
                    }
                }
                _ => {}
            }
        }
        Err(Error::invalid(open, Reason::UnclosedText))
    }

    fn attributes(&mut self, attrs: &mut Vec<Attribute>) -> Result<()> {
        let open = self.pos;
        let _ = self.bump();
        loop {
            let _ = self.take_while(char::is_whitespace);
            match self.peek() {
                None => return Err(Error::invalid(open, Reason::UnclosedAttributes)),
                Some(']') => {
                    let _ = self.bump();
                    return Ok(());
                }
                Some(_) => {}
            }
            let at = self.pos;
            let name = self.take_ident();
            if name.is_empty() {
                return Err(Error::invalid(at, Reason::MalformedAttribute));
            }
            let mut value = "";
            if self.peek() == Some('=') {
                let _ = self.bump();
                value = match self.peek() {
                    Some(quote @ ('"' | '\'')) => self.quoted(quote)?,
                    _ => self.take_while(|c| !c.is_whitespace() && c != ']'),
                };
            }
            attrs.push(Attribute::new(name, value));
        }
    }

    fn quoted(&mut self, quote: char) -> Result<&'a str> {
        let open = self.pos;
        let _ = self.bump();
        let (src, start) = (self.src, self.pos);
        while let Some(ch) = self.bump() {
            if ch == '\\' {
                let _ = self.bump();
            } else if ch == quote {
                return Ok(&src[start .. self.pos - quote.len_utf8()]);
            }
        }
        Err(Error::invalid(open, Reason::UnclosedQuote))
    }
}


fn is_allowed_char(ch: char) -> bool {
    ch.is_alphanumeric() || "#.>+*:$-_!@[]()|".contains(ch)
}

/// Find the abbreviation that ends at the end of `text`, e.g. the caret
/// position of an editor line.  Returns `""` when there is none or when its
/// brackets do not balance.
pub fn extract_abbreviation(text: &str) -> &str {
    let (mut groups, mut brackets, mut braces) = (0_usize, 0_usize, 0_usize);
    let mut start = 0;
    for (i, ch) in text.char_indices().rev() {
        let stop = match ch {
            ']' => { brackets += 1; false }
            '[' => if brackets == 0 { true } else { brackets -= 1; false },
            '}' => { braces += 1; false }
            '{' => if braces == 0 { true } else { braces -= 1; false },
            ')' => { groups += 1; false }
            '(' => if groups == 0 { true } else { groups -= 1; false },
            _ if brackets > 0 || braces > 0 => false,
            '>' => text::ends_with_tag(&text[..= i]),
            _ => !is_allowed_char(ch),
        };
        if stop {
            start = i + ch.len_utf8();
            break;
        }
    }
    if groups == 0 && brackets == 0 && braces == 0 { &text[start ..] } else { "" }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::Tier;
    use pretty_assertions::assert_eq;

    fn element(name: &str) -> RawNode {
        RawNode { name: Some(name.to_owned()), .. RawNode::default() }
    }

    fn with_children(mut node: RawNode, children: Vec<RawNode>) -> RawNode {
        node.children = children;
        node
    }

    fn parsed(abbr: &str) -> Vec<RawNode> {
        let mut tree = parse(abbr).unwrap();
        optimize(&mut tree);
        tree.children
    }

    #[test]
    fn operators() {
        assert_eq!(parsed("a+b"), vec![element("a"), element("b")]);
        assert_eq!(parsed("a>b+c>d+e"),
                   vec![with_children(element("a"), vec![
                       element("b"),
                       with_children(element("c"), vec![element("d"), element("e")])])]);
        assert_eq!(parsed("a+(b>c)+d"),
                   vec![element("a"),
                        with_children(element("b"), vec![element("c")]),
                        element("d")]);
        assert_eq!(parsed("h>(a+b)+f"),
                   vec![with_children(element("h"),
                                      vec![element("a"), element("b"), element("f")])]);
        assert_eq!(parsed("(a+b)*2"), vec![element("a"), element("b"),
                                           element("a"), element("b")]);
        assert_eq!(parsed("a(b)"), vec![element("a"), element("b")]);
        assert!(parsed("").is_empty());
    }

    #[test]
    fn elements() {
        let nodes = parsed(r#"#item[attr=Hello other="World" bare].class{t+x>t}*3"#);
        assert_eq!(nodes.len(), 1);
        let node = &nodes[0];
        assert_eq!(node.name.as_deref(), Some("div"));
        assert!(node.has_implicit_name);
        assert_eq!(node.attributes, vec![Attribute::new("id", "item"),
                                         Attribute::new("attr", "Hello"),
                                         Attribute::new("other", "World"),
                                         Attribute::new("bare", ""),
                                         Attribute::new("class", "class")]);
        assert_eq!(node.text.as_deref(), Some("t+x>t"));
        assert_eq!(node.multiplier, Multiplier::Times(3));

        let nodes = parsed("li*+p*0+{text}");
        assert_eq!(nodes[0].multiplier, Multiplier::ByLines);
        assert_eq!(nodes[1].multiplier, Multiplier::Times(1));
        assert!(nodes[2].is_text_node());

        assert_eq!(parsed("dl+")[0].name.as_deref(), Some("dl+"));
        assert_eq!(parsed("dl++p").len(), 2);
        assert_eq!(parsed("a[title='x]y' b=\"q\\\"r\"]")[0].attributes,
                   vec![Attribute::new("title", "x]y"), Attribute::new("b", "q\\\"r")]);
        assert_eq!(parsed("p{a{b}c}")[0].text.as_deref(), Some("a{b}c"));
    }

    #[test]
    fn errors() {
        let reason = |abbr| match parse(abbr) {
            Err(Error::InvalidAbbreviation { reason, .. }) => Some(reason),
            _ => None,
        };
        assert_eq!(reason("div["), Some(Reason::UnclosedAttributes));
        assert_eq!(reason("div{x"), Some(Reason::UnclosedText));
        assert_eq!(reason("(div"), Some(Reason::UnclosedGroup));
        assert_eq!(reason("div)"), Some(Reason::UnbalancedGroupEnd));
        assert_eq!(reason("a b"), Some(Reason::InvalidName));
        assert_eq!(reason("di%v"), Some(Reason::InvalidName));
        assert_eq!(reason("a[=x]"), Some(Reason::MalformedAttribute));
        assert_eq!(reason("a[x='y]"), Some(Reason::UnclosedQuote));
        assert!(matches!(parse("a+()"), Err(Error::InvalidGroupExpansion { .. })));
    }

    #[test]
    fn filters_suffix() {
        assert_eq!(split_filters("div|e|c"), ("div", Some("e|c")));
        assert_eq!(split_filters("div"), ("div", None));
        assert_eq!(split_filters("p{a|b}"), ("p{a|b}", None));
    }

    #[test]
    fn expandos() {
        let mut system = Tier::new();
        let _ = system.syntax_mut("html")
            .insert_abbreviation("dl+", "dl>dt+dd")
            .insert_abbreviation("loop+", "x>loop+")
            .insert_abbreviation("bad+", "a[");
        let voc = Vocabulary::new(system);
        let tree = preprocess(parse("div+div>dl+").unwrap(), &voc, "html").unwrap();
        assert_eq!(tree.children,
                   vec![element("div"),
                        with_children(element("div"), vec![
                            with_children(element("dl"),
                                          vec![element("dt"), element("dd")])])]);
        let tree = preprocess(parse("dl+>b").unwrap(), &voc, "html").unwrap();
        assert_eq!(tree.children[0].children[1].children, vec![element("b")]);
        assert!(matches!(preprocess(parse("loop+").unwrap(), &voc, "html"),
                         Err(Error::InvalidGroupExpansion { .. })));
        assert!(matches!(preprocess(parse("bad+").unwrap(), &voc, "html"),
                         Err(Error::InvalidGroupExpansion { .. })));
        let tree = preprocess(parse("unknown+").unwrap(), &voc, "html").unwrap();
        assert_eq!(tree.children, vec![element("unknown+")]);
    }

    #[test]
    fn extraction() {
        assert_eq!(extract_abbreviation("some text ul>li*3"), "ul>li*3");
        assert_eq!(extract_abbreviation("<p>div#a"), "div#a");
        assert_eq!(extract_abbreviation("x a[title=\"hi there\"]"), "a[title=\"hi there\"]");
        assert_eq!(extract_abbreviation("(a+b"), "a+b");
        assert_eq!(extract_abbreviation("a+b)"), "");
        assert_eq!(extract_abbreviation("p>a"), "p>a");
    }
}
