//! The core of an expander of Zen-Coding abbreviations: terse CSS-selector-like
//! expressions, such as `ul#nav>li.item$*3>a`, that expand into complete
//! markup.
//!
//! An abbreviation goes through these stages:
//!
//! 1. The [`parser`] turns it into a tree of [`RawNode`](parser::RawNode)s:
//! elements with their attributes, text, multipliers, and children, as
//! combined by the `>` (child), `+` (sibling), and `(...)` (group) operators.
//! Expandos, names ending with `+` like `ul+`, are replaced by the
//! abbreviations they stand for.
//!
//! 2. The [`tree`] builder resolves every name against the [`Vocabulary`] of
//! the requested syntax (`html`, `css`, `xsl`, ...), giving [`Tag`]s with
//! default attributes, or snippets with literal templates.  The vocabulary has
//! a system tier and a user tier, and each syntax can extend others.
//!
//! 3. The [`rollout`] copies every multiplied element as many times as it
//! says, each copy with its own counter for the `$` tokens in its names and
//! values, giving a [`ZenTree`].
//!
//! 4. An ordered list of [`filter`]s, chosen by the syntax, by the
//! [`OutputProfile`], and by an optional `|f1|f2` suffix of the abbreviation,
//! rewrite the tree into markup: `html`, `haml`, comments, escaping, and so
//! on.
//!
//! 5. The tree is concatenated into a string and its `${variable}` tokens are
//! replaced.
//!
//! The [`Registry`] holds the vocabulary, the profiles, and the settings, and
//! runs the whole thing.  Its soft entry points,
//! [`expand_abbreviation`](Registry::expand_abbreviation) and
//! [`wrap_with_abbreviation`](Registry::wrap_with_abbreviation), give an empty
//! result on invalid input; the `try_` ones return the [`Error`].
//!
//! This crate has no built-in vocabulary.  The full `zencoding` crate provides
//! one, and loads settings documents.

mod error;
pub use error::{Error, Reason, Result};

mod attribute;
pub use attribute::{Attribute, Attributes};

mod profile;
pub use profile::{Case, OutputProfile, ProfileRef, Quotes, SelfClosing, TagNewline};

pub mod text;

pub mod vocabulary;
#[doc(no_inline)]
pub use vocabulary::{ElementType, ResourceEntry, SyntaxResources, TagAbbreviation, Tier,
                     TierKind, Vocabulary};

pub mod parser;
#[doc(no_inline)]
pub use parser::extract_abbreviation;

pub mod tree;
#[doc(no_inline)]
pub use tree::{Tag, TagId, TagKind, TagTree};

pub mod rollout;
#[doc(no_inline)]
pub use rollout::{NodeId, NodeKind, ZenNode, ZenTree};

pub mod filter;
#[doc(no_inline)]
pub use filter::{BuiltinFilter, Filter, FilterContext, Pipeline};

mod registry;
pub use registry::{DEFAULT_CARET, Registry};
