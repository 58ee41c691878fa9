//! The two-tier resource vocabulary and its inheritance lookups.
//!
//! A [`Vocabulary`] has a `user` [`Tier`] that overrides a `system` `Tier`.
//! Each tier maps syntax names (`html`, `css`, `xsl`, ...) to
//! [`SyntaxResources`].  A syntax may name other syntaxes it `extends`, which
//! are searched after it within the same tier.  If a user-tier syntax does not
//! declare `extends`, the system tier's declaration for the same syntax name is
//! used.
//!
//! Raw string values are parsed on first use and the result is kept next to
//! the raw string (see [`Memo`]), so lookups take `&self`.  This makes a
//! `Vocabulary` `!Sync`.

use std::collections::{HashMap, HashSet};

use once_cell::{sync::Lazy, unsync::OnceCell};
use regex::Regex;

use crate::{Attribute, text::regex};


static RE_TAG: Lazy<Regex> = Lazy::new(|| regex(
    r#"^<(\w+:?[\w\-]*)((?:\s+[\w:\-]+\s*=\s*(?:"[^"]*"|'[^']*'))*)\s*(/?)>"#));

static RE_TAG_ATTRS: Lazy<Regex> = Lazy::new(|| regex(
    r#"([\w\-:]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#));


/// A raw string value together with its lazily parsed form.
#[derive(Clone, Debug)]
pub struct Memo<T> {
    raw: String,
    parsed: OnceCell<T>,
}

impl<T> Memo<T> {
    /// Wrap an unparsed value.
    pub fn new<S: Into<String>>(raw: S) -> Self {
        Self { raw: raw.into(), parsed: OnceCell::new() }
    }

    /// The value as it was given.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed value, computed by `parse` the first time.
    pub fn get_or_parse<F>(&self, parse: F) -> &T
        where F: FnOnce(&str) -> T,
    {
        self.parsed.get_or_init(|| parse(&self.raw))
    }

    /// Whether it has been parsed already.
    pub fn is_parsed(&self) -> bool {
        self.parsed.get().is_some()
    }
}

fn comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
       .map(str::trim)
       .filter(|s| !s.is_empty())
       .map(str::to_owned)
       .collect()
}


/// The parsed form of an `abbreviations` value.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ResourceEntry {
    /// An opening tag like `<img src="" alt="" />`
    TagAbbreviation(TagAbbreviation),
    /// The value of a key ending in `+`: a whole abbreviation to splice in
    Expando(String),
    /// Anything else: the key of another abbreviation
    Reference(String),
}

/// An element name with its default attributes.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TagAbbreviation {
    /// Element name
    pub name: String,
    /// Default attributes, in order
    pub attributes: Vec<Attribute>,
    /// Written as `<name ... />`
    pub is_empty: bool,
}

impl ResourceEntry {
    /// Parse the `value` stored under `key`.
    pub fn parse(key: &str, value: &str) -> Self {
        if key.trim().ends_with('+') {
            return ResourceEntry::Expando(value.to_owned());
        }
        match RE_TAG.captures(value) {
            Some(caps) => {
                let attributes = RE_TAG_ATTRS
                    .captures_iter(caps.get(2).map_or("", |m| m.as_str()))
                    .map(|a| {
                        let value = a.get(2).or_else(|| a.get(3)).map_or("", |m| m.as_str());
                        Attribute::new(&a[1], value)
                    })
                    .collect();
                ResourceEntry::TagAbbreviation(TagAbbreviation {
                    name: caps[1].to_owned(),
                    attributes,
                    is_empty: caps.get(3).map_or(false, |m| m.as_str() == "/"),
                })
            }
            None => ResourceEntry::Reference(value.trim().to_owned()),
        }
    }
}


/// Named element-type collections.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ElementType {
    /// Void elements, e.g. `img`
    Empty,
    /// Inline elements, e.g. `span`
    InlineLevel,
    /// Block elements, e.g. `div`
    BlockLevel,
}

impl ElementType {
    /// The key used in settings documents.
    pub fn key(self) -> &'static str {
        match self {
            ElementType::Empty => "empty",
            ElementType::InlineLevel => "inline_level",
            ElementType::BlockLevel => "block_level",
        }
    }
}


/// Everything a tier knows about one syntax.
#[derive(Clone, Default, Debug)]
pub struct SyntaxResources {
    abbreviations: HashMap<String, Memo<ResourceEntry>>,
    snippets: HashMap<String, String>,
    variables: HashMap<String, String>,
    element_types: HashMap<ElementType, Memo<HashSet<String>>>,
    filters: Option<String>,
    extends: Option<Memo<Vec<String>>>,
}

impl SyntaxResources {
    /// Nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an abbreviation, unparsed.
    pub fn insert_abbreviation<K, V>(&mut self, key: K, value: V) -> &mut Self
        where K: Into<String>,
              V: Into<String>,
    {
        let _prev = self.abbreviations.insert(key.into(), Memo::new(value));
        self
    }

    /// Add or replace a snippet template.
    pub fn insert_snippet<K, V>(&mut self, key: K, value: V) -> &mut Self
        where K: Into<String>,
              V: Into<String>,
    {
        let _prev = self.snippets.insert(key.into(), value.into());
        self
    }

    /// Add or replace a syntax-scoped variable.
    pub fn insert_variable<K, V>(&mut self, key: K, value: V) -> &mut Self
        where K: Into<String>,
              V: Into<String>,
    {
        let _prev = self.variables.insert(key.into(), value.into());
        self
    }

    /// Set an element-type collection from a comma-separated list.
    pub fn set_element_types<V: Into<String>>(&mut self, kind: ElementType, list: V)
                                              -> &mut Self
    {
        let _prev = self.element_types.insert(kind, Memo::new(list));
        self
    }

    /// Set the filter list, e.g. `"html, xsl"`.
    pub fn set_filters<V: Into<String>>(&mut self, filters: V) -> &mut Self {
        self.filters = Some(filters.into());
        self
    }

    /// Set the comma-separated syntaxes to fall back on.
    pub fn set_extends<V: Into<String>>(&mut self, extends: V) -> &mut Self {
        self.extends = Some(Memo::new(extends));
        self
    }

    /// The parsed abbreviation stored under exactly `key`.
    pub fn abbreviation(&self, key: &str) -> Option<&ResourceEntry> {
        self.abbreviations.get(key)
            .map(|memo| memo.get_or_parse(|raw| ResourceEntry::parse(key, raw)))
    }

    /// The snippet template stored under exactly `key`.
    pub fn snippet(&self, key: &str) -> Option<&str> {
        self.snippets.get(key).map(String::as_str)
    }

    /// The syntax-scoped variable `key`.
    pub fn variable(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// The raw filter list.
    pub fn filters(&self) -> Option<&str> {
        self.filters.as_deref()
    }

    /// The parsed `extends` list, if declared.
    pub fn extends(&self) -> Option<&[String]> {
        self.extends.as_ref().map(|memo| memo.get_or_parse(comma_list).as_slice())
    }

    /// Whether `item` is in the `kind` collection.
    pub fn in_collection(&self, kind: ElementType, item: &str) -> bool {
        self.element_types.get(&kind).map_or(false, |memo| {
            memo.get_or_parse(|raw| comma_list(raw).into_iter().collect())
                .contains(item)
        })
    }

    /// Overlay `other` onto `self`: its entries replace ours.
    pub fn merge(&mut self, other: SyntaxResources) {
        self.abbreviations.extend(other.abbreviations);
        self.snippets.extend(other.snippets);
        self.variables.extend(other.variables);
        self.element_types.extend(other.element_types);
        if other.filters.is_some() {
            self.filters = other.filters;
        }
        if other.extends.is_some() {
            self.extends = other.extends;
        }
    }
}


/// One level of the vocabulary: syntaxes plus global variables.
#[derive(Clone, Default, Debug)]
pub struct Tier {
    syntaxes: HashMap<String, SyntaxResources>,
    variables: HashMap<String, String>,
}

impl Tier {
    /// Empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// The resources of `syntax`, if any.
    pub fn syntax(&self, syntax: &str) -> Option<&SyntaxResources> {
        self.syntaxes.get(syntax)
    }

    /// The resources of `syntax`, created empty if absent.
    pub fn syntax_mut(&mut self, syntax: &str) -> &mut SyntaxResources {
        self.syntaxes.entry(syntax.to_owned()).or_default()
    }

    /// Whether there is anything for `syntax`.
    pub fn has_syntax(&self, syntax: &str) -> bool {
        self.syntaxes.contains_key(syntax)
    }

    /// Add or replace a global variable.
    pub fn set_variable<K, V>(&mut self, key: K, value: V) -> &mut Self
        where K: Into<String>,
              V: Into<String>,
    {
        let _prev = self.variables.insert(key.into(), value.into());
        self
    }

    /// A global variable.
    pub fn variable(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Overlay `other` onto `self`.
    pub fn merge(&mut self, other: Tier) {
        for (name, resources) in other.syntaxes {
            self.syntax_mut(&name).merge(resources);
        }
        self.variables.extend(other.variables);
    }
}


/// Which tier.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TierKind {
    /// The built-in defaults
    System,
    /// The user overrides
    User,
}


/// The `user` tier over the `system` tier.
#[derive(Clone, Default, Debug)]
pub struct Vocabulary {
    system: Tier,
    user: Tier,
}

impl Vocabulary {
    /// With the given built-in defaults and no user overrides.
    pub fn new(system: Tier) -> Self {
        Self { system, user: Tier::new() }
    }

    /// Access a tier.
    pub fn tier(&self, kind: TierKind) -> &Tier {
        match kind {
            TierKind::System => &self.system,
            TierKind::User => &self.user,
        }
    }

    /// Mutably access a tier.
    pub fn tier_mut(&mut self, kind: TierKind) -> &mut Tier {
        match kind {
            TierKind::System => &mut self.system,
            TierKind::User => &mut self.user,
        }
    }

    /// Replace a whole tier, e.g. to reload user settings.
    pub fn set_tier(&mut self, kind: TierKind, tier: Tier) {
        *self.tier_mut(kind) = tier;
    }

    /// The resources searched for `syntax` within the tier `kind`, in order:
    /// the syntax itself, then what it extends.  A user syntax that declares
    /// no `extends` uses the declaration of the system one; the system tier
    /// never looks at the user's.
    fn chain(&self, kind: TierKind, syntax: &str) -> Vec<&SyntaxResources> {
        let tier = self.tier(kind);
        let own = tier.syntax(syntax);
        let mut extends = own.and_then(SyntaxResources::extends);
        if extends.is_none() && kind == TierKind::User {
            extends = self.system.syntax(syntax).and_then(SyntaxResources::extends);
        }
        own.into_iter()
           .chain(extends.unwrap_or_default().iter()
                         .filter_map(|parent| tier.syntax(parent)))
           .collect()
    }

    /// The first `Some` that `f` gives across the chains of the user, then the
    /// system, tier.
    fn find<'s, T, F>(&'s self, syntax: &str, f: F) -> Option<T>
        where F: Fn(&'s SyntaxResources) -> Option<T>,
    {
        [TierKind::User, TierKind::System]
            .into_iter()
            .find_map(|kind| self.chain(kind, syntax).into_iter().find_map(&f))
    }

    /// Look up `name` and, failing that, `name` with `-` replaced by `:`.
    fn find_named<'s, T, F>(&'s self, syntax: &str, name: &str, f: F) -> Option<T>
        where F: Fn(&'s SyntaxResources, &str) -> Option<T>,
    {
        self.find(syntax, |res| f(res, name)).or_else(|| {
            if name.contains('-') {
                let variant = name.replace('-', ":");
                self.find(syntax, |res| f(res, &variant))
            } else {
                None
            }
        })
    }

    /// The abbreviation `name` for `syntax`, as stored (a
    /// [`ResourceEntry::Reference`] is returned unresolved).
    pub fn get_abbreviation(&self, syntax: &str, name: &str) -> Option<&ResourceEntry> {
        self.find_named(syntax, name, SyntaxResources::abbreviation)
    }

    /// Like [`get_abbreviation`](Self::get_abbreviation) but follows one
    /// [`ResourceEntry::Reference`] indirection.  A reference to a missing key,
    /// or to another reference, resolves to `None`.
    pub fn resolve_abbreviation(&self, syntax: &str, name: &str) -> Option<&ResourceEntry> {
        match self.get_abbreviation(syntax, name)? {
            ResourceEntry::Reference(target) => {
                match self.get_abbreviation(syntax, target)? {
                    ResourceEntry::Reference(_) => None,
                    entry => Some(entry),
                }
            }
            entry => Some(entry),
        }
    }

    /// The snippet template `name` for `syntax`.
    pub fn get_snippet(&self, syntax: &str, name: &str) -> Option<&str> {
        self.find_named(syntax, name, SyntaxResources::snippet)
    }

    /// The variable `name`: the syntax-scoped ones of a tier are searched
    /// before its global ones, the user tier before the system tier.
    pub fn get_variable(&self, syntax: &str, name: &str) -> Option<&str> {
        [TierKind::User, TierKind::System].into_iter().find_map(|kind| {
            self.chain(kind, syntax).into_iter()
                .find_map(|res| res.variable(name))
                .or_else(|| self.tier(kind).variable(name))
        })
    }

    /// The filter list declared for `syntax`, following inheritance.
    pub fn get_filters(&self, syntax: &str) -> Option<&str> {
        self.find(syntax, SyntaxResources::filters)
    }

    /// Whether `item` belongs to the `kind` collection of `syntax`, checking
    /// the user tier and then the system tier.  Collections are not
    /// inherited.
    pub fn is_item_in_collection(&self, syntax: &str, kind: ElementType, item: &str)
                                 -> bool
    {
        [TierKind::User, TierKind::System].into_iter().any(|tier| {
            self.tier(tier).syntax(syntax).map_or(false, |res| res.in_collection(kind, item))
        })
    }

    /// Whether either tier has anything for `syntax`.
    pub fn has_syntax(&self, syntax: &str) -> bool {
        self.system.has_syntax(syntax) || self.user.has_syntax(syntax)
    }
}
