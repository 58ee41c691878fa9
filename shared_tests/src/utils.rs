//! Utilities for setting up the things the suites run against.

use std::env;

use zencoding::{common, settings};
use zencoding_core::Registry;
use super::Shared;


/// The user settings the suites expect to be installed: a snippet full of
/// escaped dollar signs.
pub const USER_SETTINGS: &str = r#"{
    "html": {
        "snippets": {
            "dol": "\\$db->connect()\n\t\\$\\$\\$more dollaz$"
        }
    }
}"#;

/// The caret placeholder the suites expect.
pub const CARET: &str = "|";


/// Send the logs of the code under test to the test output.  The level comes
/// from `RUST_LOG`, or is `debug`.
pub fn init_logging() {
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_owned());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_test_writer()
        .try_init();
}

/// A registry over the built-in vocabulary with the user tier installed
/// directly.
pub fn builtin_registry() -> Registry {
    let mut registry = common::registry();
    registry.set_user_tier(settings::load_str(USER_SETTINGS).unwrap());
    registry.set_caret(CARET);
    registry
}

/// A registry made from the settings document by `common`.
pub fn settings_registry() -> Registry {
    let mut registry = common::registry_with_settings(USER_SETTINGS).unwrap();
    registry.set_caret(CARET);
    registry
}

/// Prepare this thread's shared registry like the others.
pub fn shared() -> Shared {
    common::with_registry(|registry| {
        registry.set_user_tier(settings::load_str(USER_SETTINGS).unwrap());
        registry.set_caret(CARET);
    });
    Shared
}
