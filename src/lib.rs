//! Expands Zen-Coding abbreviations, like `ul#nav>li.item$*3>a`, into HTML,
//! XML, XSL, HAML, and CSS, layered on top of [`zencoding_core`].
//!
//! This crate:
//!
//! * Re-exports all of [`zencoding_core`].
//!
//! * Provides the built-in vocabulary in [`defaults`]: the abbreviations,
//! snippets, element collections, variables, and filter lists of the `html`,
//! `css`, `xsl`, `xml`, and `haml` syntaxes.
//!
//! * Loads user vocabularies from JSON settings documents, with [`settings`].
//!
//! * Provides, in [`common`], ready-made [`Registry`]s over the built-in
//! vocabulary and expansion functions that use a per-thread shared one.
//!
//! ```
//! use zencoding::common;
//!
//! let mut registry = common::registry();
//! registry.set_caret("|");
//! assert_eq!(registry.expand_abbreviation("ul>li.item$*2", "html", "plain"),
//!            r#"<ul><li class="item1"></li><li class="item2"></li></ul>"#);
//! ```
//!
//! [`Registry`]: zencoding_core::Registry

// Re-export everything from the core crate.
#[doc(no_inline)]
pub use zencoding_core::*;

pub mod defaults;

pub mod settings;
#[doc(no_inline)]
pub use settings::{SettingsDocument, SettingsError};

pub mod common;
