//! Output profiles: how the generated markup is cased, quoted, broken into
//! lines, and indented.


/// Letter case applied to tag or attribute names.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Case {
    /// Lower-case
    Lower,
    /// Upper-case
    Upper,
    /// As written
    #[default]
    Leave,
}

impl Case {
    /// Apply to `name`.
    pub fn apply(self, name: &str) -> String {
        match self {
            Case::Lower => name.to_lowercase(),
            Case::Upper => name.to_uppercase(),
            Case::Leave => name.to_owned(),
        }
    }
}

/// The quote character around attribute values.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Quotes {
    /// `'`
    Single,
    /// `"`
    #[default]
    Double,
}

impl Quotes {
    /// The quote character.
    pub fn char(self) -> char {
        match self {
            Quotes::Single => '\'',
            Quotes::Double => '"',
        }
    }
}

/// Whether tags are put on their own lines.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum TagNewline {
    /// Always: every tag gets its own line and its content is indented.
    Always,
    /// Never: the output is a single line.
    Never,
    /// Block-level tags get their own lines; inline ones stay inline.
    #[default]
    Decide,
}

/// How empty (void) elements are closed.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum SelfClosing {
    /// `<br>`
    Html,
    /// `<br/>`
    Xml,
    /// `<br />`
    #[default]
    Xhtml,
}

impl SelfClosing {
    /// What is put before the `>` of an empty element.
    pub fn marker(self) -> &'static str {
        match self {
            SelfClosing::Html => "",
            SelfClosing::Xml => "/",
            SelfClosing::Xhtml => " /",
        }
    }
}


/// A named output-formatting configuration.
///
/// The [`Default`] is the `xhtml` profile.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct OutputProfile {
    /// Case of tag names
    pub tag_case: Case,
    /// Case of attribute names
    pub attr_case: Case,
    /// Quote character of attribute values
    pub attr_quotes: Quotes,
    /// Line-breaking policy
    pub tag_newline: TagNewline,
    /// Whether to emit the caret placeholder into empty slots
    pub place_cursor: bool,
    /// Whether nested tags are indented
    pub indent_tags: bool,
    /// How many consecutive inline siblings force one-per-line output; `0`
    /// disables it
    pub inline_break: usize,
    /// How empty elements are closed
    pub self_closing: SelfClosing,
    /// Filters that replace the syntax's own filter list, e.g. `"html, c"`
    pub filters: Option<String>,
}

impl Default for OutputProfile {
    fn default() -> Self {
        Self {
            tag_case: Case::Leave,
            attr_case: Case::Leave,
            attr_quotes: Quotes::Double,
            tag_newline: TagNewline::Decide,
            place_cursor: true,
            indent_tags: true,
            inline_break: 3,
            self_closing: SelfClosing::Xhtml,
            filters: None,
        }
    }
}

impl OutputProfile {
    /// `<br />` style, block tags on their own lines.
    pub fn xhtml() -> Self {
        Self::default()
    }

    /// Like [`xhtml`](Self::xhtml) but `<br>`.
    pub fn html() -> Self {
        Self { self_closing: SelfClosing::Html, .. Self::default() }
    }

    /// `<br/>` style, every tag on its own line.
    pub fn xml() -> Self {
        Self {
            self_closing: SelfClosing::Xml,
            tag_newline: TagNewline::Always,
            .. Self::default()
        }
    }

    /// A single line, no indentation, no caret placeholders.
    pub fn plain() -> Self {
        Self {
            tag_newline: TagNewline::Never,
            indent_tags: false,
            place_cursor: false,
            .. Self::default()
        }
    }

    /// The built-in profiles with their names.
    pub fn builtins() -> [(&'static str, Self); 4] {
        [("xhtml", Self::xhtml()),
         ("html", Self::html()),
         ("xml", Self::xml()),
         ("plain", Self::plain())]
    }
}


/// Selects the profile of an expansion: by name from the [`Registry`], or
/// given inline.
///
/// [`Registry`]: crate::Registry
#[derive(Copy, Clone, Debug)]
pub enum ProfileRef<'p> {
    /// A registered profile; unknown names select `plain`
    Named(&'p str),
    /// An ad-hoc profile
    Inline(&'p OutputProfile),
}

impl<'p> From<&'p str> for ProfileRef<'p> {
    fn from(name: &'p str) -> Self {
        ProfileRef::Named(name)
    }
}

impl<'p> From<&'p OutputProfile> for ProfileRef<'p> {
    fn from(profile: &'p OutputProfile) -> Self {
        ProfileRef::Inline(profile)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins() {
        let [(_, xhtml), (_, html), (_, xml), (_, plain)] = OutputProfile::builtins();
        assert_eq!(xhtml.self_closing.marker(), " /");
        assert_eq!(html.self_closing.marker(), "");
        assert_eq!(xml.self_closing.marker(), "/");
        assert_eq!(xml.tag_newline, TagNewline::Always);
        assert_eq!(plain.tag_newline, TagNewline::Never);
        assert!(!plain.place_cursor && !plain.indent_tags);
        assert_eq!(xhtml.tag_case, Case::Leave);
    }

    #[test]
    fn case() {
        assert_eq!(Case::Upper.apply("div"), "DIV");
        assert_eq!(Case::Lower.apply("xsl:Template"), "xsl:template");
        assert_eq!(Case::Leave.apply("P"), "P");
    }
}
