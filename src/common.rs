//! Ready-made [`Registry`]s over the [built-in vocabulary](crate::defaults),
//! and expansion functions that use a per-thread one of them.

use std::{cell::RefCell, io::Read};

use crate::{
    defaults,
    settings::{self, SettingsError},
    ProfileRef, Registry,
};


thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(registry());
}


/// A new registry over the built-in vocabulary, with an empty user tier.
pub fn registry() -> Registry {
    Registry::new(defaults::system_tier())
}

/// A new registry over the built-in vocabulary, with the given JSON settings
/// document as its user tier.
pub fn registry_with_settings(json: &str) -> Result<Registry, SettingsError> {
    let mut registry = registry();
    registry.set_user_tier(settings::load_str(json)?);
    Ok(registry)
}

/// Like [`registry_with_settings`] but reads the document from a stream.
pub fn registry_with_settings_reader<R: Read>(reader: R) -> Result<Registry, SettingsError> {
    let mut registry = registry();
    registry.set_user_tier(settings::load_reader(reader)?);
    Ok(registry)
}

/// Run `f` with this thread's shared registry, e.g. to install settings or
/// change the caret for later calls of [`expand_abbreviation`] and
/// [`wrap_with_abbreviation`].
///
/// # Panics
///
/// If called again from within `f`, including from a custom filter run by the
/// shared registry.
pub fn with_registry<F, R>(f: F) -> R
    where F: FnOnce(&mut Registry) -> R,
{
    REGISTRY.with(|registry| f(&mut registry.borrow_mut()))
}

/// Expand `abbr` with this thread's shared registry.  Invalid abbreviations
/// give an empty string.
pub fn expand_abbreviation<'p, P>(abbr: &str, syntax: &str, profile: P) -> String
    where P: Into<ProfileRef<'p>>,
{
    with_registry(|registry| registry.expand_abbreviation(abbr, syntax, profile))
}

/// Wrap `text` with `abbr` using this thread's shared registry.
pub fn wrap_with_abbreviation<'p, P>(abbr: &str, text: &str, syntax: &str, profile: P)
                                     -> Option<String>
    where P: Into<ProfileRef<'p>>,
{
    with_registry(|registry| registry.wrap_with_abbreviation(abbr, text, syntax, profile))
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn shared() {
        with_registry(|r| r.set_caret("|"));
        assert_eq!(expand_abbreviation("a", "html", "xhtml"), r#"<a href="|">|</a>"#);
        assert_eq!(wrap_with_abbreviation("b", "x", "html", "plain").as_deref(),
                   Some("<b>x</b>"));
        assert_eq!(expand_abbreviation("a(", "html", "plain"), "");
    }

    #[test]
    fn with_settings() {
        let mut r = registry_with_settings(r#"{"html": {"snippets": {"hi": "hello"}}}"#)
                        .unwrap();
        r.set_caret("|");
        assert_eq!(r.expand_abbreviation("hi", "html", "plain"), "hello");
        assert!(registry_with_settings("[]").is_err());
        let r = registry_with_settings_reader(&b"{}"[..]).unwrap();
        assert_eq!(r.expand_abbreviation("hi", "html", "plain"), "<hi></hi>");
    }
}
