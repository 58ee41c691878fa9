//! Used by the integration tests of both the [core](../zencoding_core/index.html)
//! and the [full](../zencoding/index.html) crates.  It provides test suites that
//! can be run against any [`Expander`]: a [`Registry`] built in any way, or the
//! per-thread shared one of [`zencoding::common`].

use zencoding::common;
use zencoding_core::Registry;


pub mod utils;
pub mod suites;


/// What the suites need from the thing under test.
pub trait Expander {
    /// Expand `abbr` for `syntax` with the profile named `profile`.
    fn expand(&self, abbr: &str, syntax: &str, profile: &str) -> String;

    /// Wrap `text` with `abbr` for `syntax` with the profile named `profile`.
    fn wrap(&self, abbr: &str, text: &str, syntax: &str, profile: &str) -> Option<String>;
}

impl Expander for Registry {
    fn expand(&self, abbr: &str, syntax: &str, profile: &str) -> String {
        self.expand_abbreviation(abbr, syntax, profile)
    }

    fn wrap(&self, abbr: &str, text: &str, syntax: &str, profile: &str) -> Option<String> {
        self.wrap_with_abbreviation(abbr, text, syntax, profile)
    }
}

/// The per-thread shared registry of [`zencoding::common`].
#[derive(Copy, Clone, Debug)]
pub struct Shared;

impl Expander for Shared {
    fn expand(&self, abbr: &str, syntax: &str, profile: &str) -> String {
        common::expand_abbreviation(abbr, syntax, profile)
    }

    fn wrap(&self, abbr: &str, text: &str, syntax: &str, profile: &str) -> Option<String> {
        common::wrap_with_abbreviation(abbr, text, syntax, profile)
    }
}
