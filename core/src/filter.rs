//! The output filters: ordered rewrites of a rolled-out [`ZenTree`] that turn
//! it into markup and then adjust that markup.
//!
//! A filter is anything implementing [`Filter`].  The built-in ones are
//! selected by name through [`BuiltinFilter::from_name`]:
//!
//! | Name | Effect |
//! |------|--------|
//! | `html`, `xml` | literal tags, formatted per the profile |
//! | `haml` | HAML notation |
//! | `c`, `comment` | comments around block elements with an id or class |
//! | `css` | `!important` for snippets written with a trailing `!` |
//! | `fc`, `format-css` | a space after the colon of CSS properties |
//! | `e`, `escape` | escapes `<`, `>`, and `&` |
//! | `t`, `trim` | strips list markers from pasted lines |
//! | `s`, `single-line` | removes line breaks |
//! | `xsl` | drops `select` from `xsl:variable`/`xsl:with-param` with children |
//!
//! The order is significant: `|e|e` escapes twice.

use std::{collections::HashMap, fmt};

use crate::{
    OutputProfile,
    rollout::{NodeId, ZenTree},
};

mod format;
mod html;
mod haml;
mod comment;
mod css;
mod escape;
mod trim;
mod single_line;
mod xsl;


/// A rewrite of the output tree.
pub trait Filter {
    /// Rewrite `tree` in place.
    fn apply(&self, tree: &mut ZenTree, ctx: &mut FilterContext<'_>);
}

impl<F> Filter for F
    where F: Fn(&mut ZenTree, &mut FilterContext<'_>),
{
    fn apply(&self, tree: &mut ZenTree, ctx: &mut FilterContext<'_>) {
        self(tree, ctx)
    }
}


/// What the filters of one expansion share.
#[derive(Clone, Debug)]
pub struct FilterContext<'a> {
    /// The output profile
    pub profile: &'a OutputProfile,
    /// The caret placeholder token
    pub caret: &'a str,
    /// The newline string
    pub newline: &'a str,
    /// One level of indentation; empty when the profile does not indent
    pub indentation: String,
    /// Offset for renumbering the tabstops of the next node
    pub tabstops: usize,
}

impl<'a> FilterContext<'a> {
    /// A context for one run, with the tabstop offset at zero.
    pub fn new(profile: &'a OutputProfile, caret: &'a str, newline: &'a str,
               indentation: &str)
               -> Self
    {
        Self {
            profile,
            caret,
            newline,
            indentation: if profile.indent_tags { indentation.to_owned() }
                         else { String::new() },
            tabstops: 0,
        }
    }

    /// What goes into empty slots: the caret if the profile places it.
    pub fn cursor(&self) -> &'a str {
        if self.profile.place_cursor { self.caret } else { "" }
    }
}


/// The filters that come with the crate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BuiltinFilter {
    /// `html` and `xml`
    Html,
    /// `haml`
    Haml,
    /// `c`, `comment`
    Comment,
    /// `css`
    Css,
    /// `fc`, `format-css`
    FormatCss,
    /// `e`, `escape`
    Escape,
    /// `t`, `trim`
    Trim,
    /// `s`, `single-line`
    SingleLine,
    /// `xsl`
    Xsl,
}

impl BuiltinFilter {
    /// The filter called `name`, if there is one.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "html" | "xml" => Self::Html,
            "haml" => Self::Haml,
            "c" | "comment" => Self::Comment,
            "css" => Self::Css,
            "fc" | "format-css" => Self::FormatCss,
            "e" | "escape" => Self::Escape,
            "t" | "trim" => Self::Trim,
            "s" | "single-line" => Self::SingleLine,
            "xsl" => Self::Xsl,
            _ => return None,
        })
    }

    /// The short name it is selected by.
    pub fn name(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Haml => "haml",
            Self::Comment => "c",
            Self::Css => "css",
            Self::FormatCss => "fc",
            Self::Escape => "e",
            Self::Trim => "t",
            Self::SingleLine => "s",
            Self::Xsl => "xsl",
        }
    }
}

impl Filter for BuiltinFilter {
    fn apply(&self, tree: &mut ZenTree, ctx: &mut FilterContext<'_>) {
        match self {
            Self::Html => html::apply(tree, ctx),
            Self::Haml => haml::apply(tree, ctx),
            Self::Comment => comment::apply(tree, ctx),
            Self::Css => css::apply(tree),
            Self::FormatCss => css::apply_format(tree),
            Self::Escape => escape::apply(tree),
            Self::Trim => trim::apply(tree),
            Self::SingleLine => single_line::apply(tree),
            Self::Xsl => xsl::apply(tree),
        }
    }
}


/// An ordered list of resolved filters.
pub struct Pipeline<'r> {
    stages: Vec<(String, Stage<'r>)>,
}

enum Stage<'r> {
    Builtin(BuiltinFilter),
    Custom(&'r dyn Filter),
}

impl fmt::Debug for Pipeline<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl<'r> Pipeline<'r> {
    /// Resolve a `|`- or `,`-separated list of names.  Built-in names are
    /// looked up first, then `custom`.  Unknown names are skipped.
    pub fn parse(list: &str, custom: &'r HashMap<String, Box<dyn Filter>>) -> Self {
        let stages = list.split(&['|', ','][..])
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .filter_map(|name| {
                let stage = BuiltinFilter::from_name(name).map(Stage::Builtin)
                    .or_else(|| custom.get(name).map(|f| Stage::Custom(f.as_ref())));
                if stage.is_none() {
                    tracing::warn!(filter = name, "unknown filter skipped");
                }
                stage.map(|stage| (name.to_owned(), stage))
            })
            .collect();
        Self { stages }
    }

    /// The names of the filters that will run, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|(name, _)| name.as_str())
    }

    /// Run every filter over `tree`, left to right.
    pub fn run(&self, tree: &mut ZenTree, ctx: &mut FilterContext<'_>) {
        for (name, stage) in &self.stages {
            tracing::trace!(filter = %name, "applying filter");
            match stage {
                Stage::Builtin(filter) => filter.apply(tree, ctx),
                Stage::Custom(filter) => filter.apply(tree, ctx),
            }
        }
    }
}

/// Every node of `tree` below the root, parents first, with the index of each
/// among its siblings.
fn walk(tree: &ZenTree) -> Vec<(NodeId, usize)> {
    let mut result = vec![];
    let mut stack: Vec<(NodeId, usize)> =
        tree.get(tree.root()).children().iter().copied().enumerate()
            .map(|(i, id)| (id, i)).rev().collect();
    while let Some((id, i)) = stack.pop() {
        result.push((id, i));
        stack.extend(tree.get(id).children().iter().copied().enumerate()
                         .map(|(i, id)| (id, i)).rev());
    }
    result
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::rollout::ZenNode;

    #[test]
    fn names() {
        for filter in [BuiltinFilter::Html, BuiltinFilter::Haml, BuiltinFilter::Comment,
                       BuiltinFilter::Css, BuiltinFilter::FormatCss, BuiltinFilter::Escape,
                       BuiltinFilter::Trim, BuiltinFilter::SingleLine, BuiltinFilter::Xsl]
        {
            assert_eq!(BuiltinFilter::from_name(filter.name()), Some(filter));
        }
        assert_eq!(BuiltinFilter::from_name("xml"), Some(BuiltinFilter::Html));
        for (long, filter) in [("comment", BuiltinFilter::Comment),
                               ("format-css", BuiltinFilter::FormatCss),
                               ("escape", BuiltinFilter::Escape),
                               ("trim", BuiltinFilter::Trim),
                               ("single-line", BuiltinFilter::SingleLine)]
        {
            assert_eq!(BuiltinFilter::from_name(long), Some(filter));
        }
        assert_eq!(BuiltinFilter::from_name("_format"), None);
    }

    #[test]
    fn pipeline() {
        let mut custom: HashMap<String, Box<dyn Filter>> = HashMap::new();
        let upper = |tree: &mut ZenTree, _: &mut FilterContext<'_>| {
            for id in tree.descendants(tree.root()) {
                let node = tree.get_mut(id);
                node.content = node.content.to_uppercase();
            }
        };
        let _ = custom.insert("upper".to_owned(), Box::new(upper));
        let pipeline = Pipeline::parse(" html, nope |e|upper", &custom);
        assert_eq!(pipeline.names().collect::<Vec<_>>(), ["html", "e", "upper"]);

        let mut tree = ZenTree::new();
        let root = tree.root();
        let _ = tree.add_child(root, ZenNode::text("a<b"));
        let profile = OutputProfile::plain();
        let mut ctx = FilterContext::new(&profile, "|", "\n", "\t");
        Pipeline::parse("e|upper", &custom).run(&mut tree, &mut ctx);
        assert_eq!(tree.serialize(), "A&LT;B");
        assert_eq!(ctx.cursor(), "");
        assert_eq!(ctx.indentation, "");
    }
}
