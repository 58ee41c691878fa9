//! The [`Registry`]: vocabulary, profiles, and filters, and the expansion
//! entry points that run an abbreviation through the whole pipeline.

use std::{collections::HashMap, fmt};

use once_cell::sync::Lazy;

use crate::{
    Error, OutputProfile, ProfileRef, Result,
    filter::{Filter, FilterContext, Pipeline},
    parser,
    rollout::rollout,
    text::replace_variables,
    tree::TagTree,
    vocabulary::{Tier, TierKind, Vocabulary},
};


/// The caret placeholder used unless [`Registry::set_caret`] says otherwise.
pub const DEFAULT_CARET: &str = "{%::zen-caret::%}";

const DEFAULT_INDENTATION: &str = "\t";

static PLAIN: Lazy<OutputProfile> = Lazy::new(OutputProfile::plain);


/// Everything an expansion needs: the vocabulary, the named output profiles,
/// any extra filters, the caret placeholder, and the newline string.
///
/// Lookups memoize parsed vocabulary entries in place, so a `Registry` is not
/// `Sync`; share one per thread, or build one per use.
pub struct Registry {
    vocabulary: Vocabulary,
    profiles: HashMap<String, OutputProfile>,
    filters: HashMap<String, Box<dyn Filter>>,
    caret: String,
    newline: String,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
         .field("vocabulary", &self.vocabulary)
         .field("profiles", &self.profiles)
         .field("filters", &self.filters.keys().collect::<Vec<_>>())
         .field("caret", &self.caret)
         .field("newline", &self.newline)
         .finish()
    }
}

impl Registry {
    /// A registry over the given system vocabulary, with an empty user tier,
    /// the built-in profiles, the default caret, and `\n` newlines.
    pub fn new(system: Tier) -> Self {
        Self {
            vocabulary: Vocabulary::new(system),
            profiles: OutputProfile::builtins().into_iter()
                                               .map(|(name, p)| (name.to_owned(), p))
                                               .collect(),
            filters: HashMap::new(),
            caret: DEFAULT_CARET.to_owned(),
            newline: "\n".to_owned(),
        }
    }

    /// The vocabulary.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The vocabulary, for changing it.
    pub fn vocabulary_mut(&mut self) -> &mut Vocabulary {
        &mut self.vocabulary
    }

    /// Install `tier` as the user vocabulary, replacing the previous one.
    pub fn set_user_tier(&mut self, tier: Tier) {
        self.vocabulary.set_tier(TierKind::User, tier);
    }

    /// The caret placeholder token.
    pub fn caret(&self) -> &str {
        &self.caret
    }

    /// Change the caret placeholder token, e.g. to `|`.
    pub fn set_caret<S: Into<String>>(&mut self, caret: S) {
        self.caret = caret.into();
    }

    /// The newline string.
    pub fn newline(&self) -> &str {
        &self.newline
    }

    /// Change the newline string.
    pub fn set_newline<S: Into<String>>(&mut self, newline: S) {
        self.newline = newline.into();
    }

    /// The profile registered as `name`.
    pub fn profile(&self, name: &str) -> Option<&OutputProfile> {
        self.profiles.get(name)
    }

    /// Register (or replace) a named profile.
    pub fn set_profile<S: Into<String>>(&mut self, name: S, profile: OutputProfile) {
        let _ = self.profiles.insert(name.into(), profile);
    }

    /// Make `filter` selectable as `name`.  Built-in filters keep precedence
    /// over a custom one of the same name.
    pub fn register_filter<S, F>(&mut self, name: S, filter: F)
        where S: Into<String>,
              F: Filter + 'static,
    {
        let _ = self.filters.insert(name.into(), Box::new(filter));
    }

    /// Parse `abbr` (with an optional `|f1|f2` suffix) and resolve it against
    /// the vocabulary of `syntax`.
    pub fn parse_into_tree(&self, abbr: &str, syntax: &str) -> Result<TagTree> {
        let (abbr, filters) = parser::split_filters(abbr);
        let raw = parser::preprocess(parser::parse(abbr)?, &self.vocabulary, syntax)?;
        let mut tree = TagTree::build(&raw, &self.vocabulary, syntax, &self.caret);
        tree.set_filters(filters);
        Ok(tree)
    }

    /// Expand `abbr` for `syntax`, formatted by `profile`.
    pub fn try_expand<'p, P>(&self, abbr: &str, syntax: &str, profile: P) -> Result<String>
        where P: Into<ProfileRef<'p>>,
    {
        let tree = self.parse_into_tree(abbr, syntax)?;
        Ok(self.render(&tree, profile.into()))
    }

    /// Like [`try_expand`](Self::try_expand), but failures give an empty
    /// string.
    pub fn expand_abbreviation<'p, P>(&self, abbr: &str, syntax: &str, profile: P) -> String
        where P: Into<ProfileRef<'p>>,
    {
        self.try_expand(abbr, syntax, profile).unwrap_or_else(|error| {
            tracing::debug!(%abbr, %syntax, %error, "expansion failed");
            String::new()
        })
    }

    /// Expand `abbr` with `text` pasted into its last element, or into the
    /// element multiplied by a bare `*`, whose copies then take one line of
    /// `text` each.
    pub fn try_wrap<'p, P>(&self, abbr: &str, text: &str, syntax: &str, profile: P)
                           -> Result<String>
        where P: Into<ProfileRef<'p>>,
    {
        let mut tree = self.parse_into_tree(abbr, syntax)?;
        let by_lines = tree.multiply_elem();
        if let Some(target) = by_lines.or(tree.last()) {
            tree.set_paste_content(target, text);
            tree.get_mut(target).repeat_by_lines = by_lines.is_some();
        }
        Ok(self.render(&tree, profile.into()))
    }

    /// Like [`try_wrap`](Self::try_wrap), but failures give `None`.
    pub fn wrap_with_abbreviation<'p, P>(&self, abbr: &str, text: &str, syntax: &str,
                                         profile: P)
                                         -> Option<String>
        where P: Into<ProfileRef<'p>>,
    {
        self.try_wrap(abbr, text, syntax, profile)
            .map_err(|error: Error| tracing::debug!(%abbr, %syntax, %error, "wrapping failed"))
            .ok()
    }

    /// The filters to run for `syntax`: the profile's own list if it has one,
    /// else the syntax's, else `html`, followed by `suffix`.
    pub fn filter_list(&self, syntax: &str, profile: &OutputProfile, suffix: Option<&str>)
                       -> String
    {
        let mut list = profile.filters.as_deref()
            .or_else(|| self.vocabulary.get_filters(syntax))
            .unwrap_or("html")
            .to_owned();
        if let Some(suffix) = suffix {
            list.push('|');
            list.push_str(suffix);
        }
        list
    }

    fn resolve_profile<'s>(&'s self, profile: ProfileRef<'s>) -> &'s OutputProfile {
        match profile {
            ProfileRef::Inline(profile) => profile,
            ProfileRef::Named(name) => self.profiles.get(name)
                .or_else(|| {
                    tracing::debug!(profile = name, "unknown profile, using plain");
                    self.profiles.get("plain")
                })
                .unwrap_or(&*PLAIN),
        }
    }

    fn render(&self, tree: &TagTree, profile: ProfileRef<'_>) -> String {
        let syntax = tree.syntax();
        let profile = self.resolve_profile(profile);
        let mut zen = rollout(tree, &self.vocabulary);

        let list = self.filter_list(syntax, profile, tree.filters());
        let indentation = self.vocabulary.get_variable(syntax, "indentation")
                                         .unwrap_or(DEFAULT_INDENTATION);
        let mut ctx = FilterContext::new(profile, &self.caret, &self.newline, indentation);
        Pipeline::parse(&list, &self.filters).run(&mut zen, &mut ctx);
        tracing::debug!(%syntax, filters = %list, "rendered");

        replace_variables(&zen.serialize(), |name| {
            self.vocabulary.get_variable(syntax, name).map(str::to_owned)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::ElementType;
    use pretty_assertions::assert_eq;

    fn registry() -> Registry {
        let mut system = Tier::new();
        let _ = system.syntax_mut("html")
            .insert_abbreviation("a", r#"<a href=""></a>"#)
            .insert_abbreviation("img", r#"<img src="" alt="" />"#)
            .insert_abbreviation("ul+", "ul>li")
            .insert_snippet("cc:ie", "<!--[if IE]>\n\t${child}|\n<![endif]-->")
            .set_element_types(ElementType::Empty, "img,br,hr")
            .set_element_types(ElementType::InlineLevel, "a,b,em,img,span,br")
            .set_filters("html");
        let _ = system.set_variable("indentation", "\t").set_variable("lang", "en");
        let mut registry = Registry::new(system);
        registry.set_caret("|");
        registry
    }

    #[test]
    fn expand() {
        let r = registry();
        assert_eq!(r.expand_abbreviation("p>a", "html", "xhtml"), "<p><a href=\"|\">|</a></p>");
        assert_eq!(r.expand_abbreviation("img", "html", "html"), "<img src=\"|\" alt=\"|\">");
        assert_eq!(r.expand_abbreviation("ul+", "html", "plain"), "<ul><li></li></ul>");
        assert_eq!(r.expand_abbreviation("ul+", "html", "no-such-profile"),
                   "<ul><li></li></ul>");
        assert_eq!(r.expand_abbreviation("p{x", "html", "xhtml"), "");
        assert_eq!(r.expand_abbreviation("p{${lang}}", "html", "plain"), "<p>en</p>");
        assert_eq!(r.expand_abbreviation("p{${unknown}}", "html", "plain"),
                   "<p>${unknown}</p>");
    }

    #[test]
    fn errors() {
        let r = registry();
        assert!(matches!(r.try_expand("div[a=", "html", "xhtml"),
                         Err(Error::InvalidAbbreviation { .. })));
        assert_eq!(r.wrap_with_abbreviation("(", "text", "html", "xhtml"), None);
    }

    #[test]
    fn wrap() {
        let r = registry();
        assert_eq!(r.wrap_with_abbreviation("p>b", "hello", "html", "plain").as_deref(),
                   Some("<p><b>hello</b></p>"));
        assert_eq!(r.wrap_with_abbreviation("ul>li*", "a\nb", "html", "plain").as_deref(),
                   Some("<ul><li>a</li><li>b</li></ul>"));
    }

    #[test]
    fn profiles_and_filters() {
        let mut r = registry();
        let custom = OutputProfile { filters: Some("html, e".to_owned()),
                                     .. OutputProfile::plain() };
        assert_eq!(r.expand_abbreviation("b", "html", &custom), "&lt;b&gt;&lt;/b&gt;");
        assert_eq!(r.filter_list("html", &custom, Some("c")), "html, e|c");
        assert_eq!(r.filter_list("nope", &OutputProfile::plain(), None), "html");

        r.register_filter("bang", |tree: &mut crate::ZenTree, _: &mut FilterContext<'_>| {
            let root = tree.root();
            tree.get_mut(root).end.push('!');
        });
        assert_eq!(r.expand_abbreviation("b|bang", "html", "plain"), "<b></b>!");
    }
}
