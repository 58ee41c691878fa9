//! Errors that might be returned by expanding an abbreviation.

use thiserror::Error;


/// The possible errors that might be returned by parsing and building an
/// abbreviation.
///
/// Neither kind is ever surfaced as partial output: the soft-failure entry
/// points ([`Registry::expand_abbreviation`] and
/// [`Registry::wrap_with_abbreviation`]) turn both into an empty result.
///
/// [`Registry::expand_abbreviation`]: crate::Registry::expand_abbreviation
/// [`Registry::wrap_with_abbreviation`]: crate::Registry::wrap_with_abbreviation
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum Error {
    /// Unbalanced brackets, braces, or parentheses, or an element name that
    /// fails the identifier validity pattern.
    #[error("invalid abbreviation at byte {position}: {reason}")]
    InvalidAbbreviation {
        /// Byte offset into the abbreviation where the problem was detected
        position: usize,
        /// What was wrong
        reason: Reason,
    },
    /// A group that is grammatically fine but cannot be expanded, e.g. an
    /// empty `()` or an expando whose pre-authored expansion is itself
    /// invalid.
    #[error("invalid group expansion of `{name}`: {reason}")]
    InvalidGroupExpansion {
        /// The group or expando name, `()` for an anonymous group
        name: String,
        /// What was wrong
        reason: String,
    },
}

/// The kinds of grammar problems reported by [`Error::InvalidAbbreviation`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Error)]
pub enum Reason {
    /// `[` without matching `]`
    #[error("unclosed attribute set")]
    UnclosedAttributes,
    /// `{` without matching `}`
    #[error("unclosed text")]
    UnclosedText,
    /// `(` without matching `)`
    #[error("unclosed group")]
    UnclosedGroup,
    /// `)` without matching `(`
    #[error("unbalanced `)`")]
    UnbalancedGroupEnd,
    /// A quoted attribute value without its closing quote
    #[error("unclosed quoted value")]
    UnclosedQuote,
    /// Something inside `[...]` that is not an attribute name
    #[error("malformed attribute")]
    MalformedAttribute,
    /// A name outside `[\w\-$:@!]+` with an optional trailing `+`
    #[error("invalid element name")]
    InvalidName,
    /// A character that cannot start or continue an element here
    #[error("unexpected character")]
    UnexpectedChar,
}

/// Shorthand used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;


impl Error {
    pub(crate) fn invalid(position: usize, reason: Reason) -> Self {
        Self::InvalidAbbreviation { position, reason }
    }

    pub(crate) fn group<N, R>(name: N, reason: R) -> Self
        where N: Into<String>,
              R: Into<String>,
    {
        Self::InvalidGroupExpansion { name: name.into(), reason: reason.into() }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Error::invalid(3, Reason::UnclosedAttributes).to_string(),
                   "invalid abbreviation at byte 3: unclosed attribute set");
        assert_eq!(Error::group("()", "empty group").to_string(),
                   "invalid group expansion of `()`: empty group");
    }

    #[test]
    fn equality() {
        assert_eq!(Error::invalid(0, Reason::InvalidName),
                   Error::InvalidAbbreviation { position: 0,
                                                reason: Reason::InvalidName });
        assert_ne!(Error::invalid(0, Reason::InvalidName),
                   Error::invalid(1, Reason::InvalidName));
    }
}
