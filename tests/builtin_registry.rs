use zencoding_shared_tests::{
    suites::{test_suite_expand, test_suite_filters, test_suite_formatting, test_suite_repeat,
             test_suite_wrap},
    utils,
};


#[test]
fn expand_suite() {
    utils::init_logging();
    test_suite_expand(&utils::builtin_registry());
}

#[test]
fn formatting_suite() {
    test_suite_formatting(&utils::builtin_registry());
}

#[test]
fn filters_suite() {
    test_suite_filters(&utils::builtin_registry());
}

#[test]
fn wrap_suite() {
    test_suite_wrap(&utils::builtin_registry());
}

#[test]
fn repeat_suite() {
    test_suite_repeat(&utils::builtin_registry());
}
