//! Settings documents: user vocabularies written as JSON.
//!
//! ```json
//! {
//!     "variables": { "lang": "ru" },
//!     "html": {
//!         "abbreviations": { "bq": "<blockquote class=\"quote\">" },
//!         "snippets": { "dol": "\\$db->connect()" },
//!         "element_types": { "inline_level": "a,b,i,span" },
//!         "filters": "html, c"
//!     },
//!     "less": { "extends": "css" }
//! }
//! ```
//!
//! Every top-level key other than `variables` names a syntax.  A document is
//! loaded into a [`Tier`], usually installed as the user tier with
//! [`Registry::set_user_tier`](zencoding_core::Registry::set_user_tier).

use std::{collections::BTreeMap, io::Read};

use serde::Deserialize;
use thiserror::Error;

use zencoding_core::{ElementType, SyntaxResources, Tier};


/// Failure to load a settings document.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The document is not JSON of the expected shape
    #[error("malformed settings document: {0}")]
    Json(#[from] serde_json::Error),
}


/// A whole settings document.
#[derive(Clone, PartialEq, Eq, Default, Debug, Deserialize)]
pub struct SettingsDocument {
    /// Variables shared by every syntax
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
    /// The resources of each syntax
    #[serde(flatten)]
    pub syntaxes: BTreeMap<String, SyntaxSettings>,
}

/// The resources of one syntax in a [`SettingsDocument`].
#[derive(Clone, PartialEq, Eq, Default, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyntaxSettings {
    /// Tag abbreviations, expandos, and references
    #[serde(default)]
    pub abbreviations: BTreeMap<String, String>,
    /// Snippet templates
    #[serde(default)]
    pub snippets: BTreeMap<String, String>,
    /// Variables of this syntax
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
    /// Comma-separated element collections
    #[serde(default)]
    pub element_types: ElementTypeSettings,
    /// The filter list, e.g. `"html, xsl"`
    pub filters: Option<String>,
    /// Comma-separated syntaxes whose resources this one falls back to
    pub extends: Option<String>,
}

/// The element collections of a syntax.
#[derive(Clone, PartialEq, Eq, Default, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementTypeSettings {
    /// Elements without a closing tag
    pub empty: Option<String>,
    /// Elements kept inline by formatting
    pub inline_level: Option<String>,
    /// Elements put on their own lines by formatting
    pub block_level: Option<String>,
}


impl SettingsDocument {
    /// Parse a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a document from a JSON stream.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, SettingsError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Convert into a vocabulary tier.
    pub fn into_tier(self) -> Tier {
        let mut tier = Tier::new();
        for (name, value) in self.variables {
            let _ = tier.set_variable(name, value);
        }
        for (syntax, settings) in self.syntaxes {
            tracing::trace!(%syntax, "loading syntax settings");
            settings.apply(tier.syntax_mut(&syntax));
        }
        tier
    }
}

impl SyntaxSettings {
    fn apply(self, resources: &mut SyntaxResources) {
        for (key, value) in self.abbreviations {
            let _ = resources.insert_abbreviation(key, value);
        }
        for (key, value) in self.snippets {
            let _ = resources.insert_snippet(key, value);
        }
        for (key, value) in self.variables {
            let _ = resources.insert_variable(key, value);
        }
        let types = self.element_types;
        for (kind, list) in [(ElementType::Empty, types.empty),
                             (ElementType::InlineLevel, types.inline_level),
                             (ElementType::BlockLevel, types.block_level)]
        {
            if let Some(list) = list {
                let _ = resources.set_element_types(kind, list);
            }
        }
        if let Some(filters) = self.filters {
            let _ = resources.set_filters(filters);
        }
        if let Some(extends) = self.extends {
            let _ = resources.set_extends(extends);
        }
    }
}

/// Load a JSON settings document into a tier.
pub fn load_str(json: &str) -> Result<Tier, SettingsError> {
    SettingsDocument::from_json(json).map(SettingsDocument::into_tier)
}

/// Load a JSON settings document from a stream into a tier.
pub fn load_reader<R: Read>(reader: R) -> Result<Tier, SettingsError> {
    SettingsDocument::from_json_reader(reader).map(SettingsDocument::into_tier)
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use zencoding_core::Vocabulary;

    #[test]
    fn document() {
        let doc = SettingsDocument::from_json(r#"{
            "variables": {"lang": "ru"},
            "html": {
                "abbreviations": {"bq": "<blockquote class=\"quote\">"},
                "element_types": {"empty": "br,wbr"},
                "filters": "html, c"
            },
            "less": {"extends": "css"}
        }"#).unwrap();
        assert_eq!(doc.variables.get("lang").map(String::as_str), Some("ru"));
        assert_eq!(doc.syntaxes.len(), 2);
        assert_eq!(doc.syntaxes["less"].extends.as_deref(), Some("css"));

        let voc = Vocabulary::new(doc.into_tier());
        assert_eq!(voc.get_variable("html", "lang"), Some("ru"));
        assert_eq!(voc.get_filters("html"), Some("html, c"));
        assert!(voc.is_item_in_collection("html", ElementType::Empty, "wbr"));
        assert!(voc.get_abbreviation("html", "bq").is_some());
    }

    #[test]
    fn malformed() {
        assert!(matches!(load_str("{"), Err(SettingsError::Json(_))));
        assert!(matches!(load_str(r#"{"html": {"abbrevs": {}}}"#), Err(SettingsError::Json(_))));
        assert!(matches!(load_str(r#"{"html": 3}"#), Err(SettingsError::Json(_))));
        assert!(load_str("{}").is_ok());
    }
}
