use pretty_assertions::assert_eq;

use zencoding_core::{
    Case, ElementType, Error, FilterContext, OutputProfile, Quotes, Reason, Registry, Tier,
    ZenTree,
};

use zencoding_shared_tests::{suites::test_suite_text, utils::init_logging};


fn registry() -> Registry {
    let mut system = Tier::new();
    let _ = system.syntax_mut("html")
        .insert_abbreviation("a", r#"<a href=""></a>"#)
        .insert_abbreviation("link", "a")
        .insert_abbreviation("list+", "ul>li")
        .insert_abbreviation("loop+", "loop+>p")
        .insert_abbreviation("bad+", "p[")
        .insert_snippet("cc:ie", "<!--[if IE]>\n\t${child}|\n<![endif]-->")
        .set_element_types(ElementType::InlineLevel, "a,b,span")
        .set_element_types(ElementType::BlockLevel, "div,p,ul,li")
        .set_filters("html");
    let _ = system.syntax_mut("sub").set_extends("html");
    let _ = system.set_variable("who", "world");

    let mut user = Tier::new();
    let _ = user.syntax_mut("html").insert_abbreviation("a", r##"<a href="#"></a>"##);

    let mut registry = Registry::new(system);
    registry.set_user_tier(user);
    registry.set_caret("|");
    registry
}


#[test]
fn text_suite() {
    test_suite_text();
}

#[test]
fn tiers_and_inheritance() {
    init_logging();
    let r = registry();
    assert_eq!(r.expand_abbreviation("a", "html", "plain"), r##"<a href="#"></a>"##);
    assert_eq!(r.expand_abbreviation("link", "html", "plain"), r##"<a href="#"></a>"##);
    assert_eq!(r.expand_abbreviation("a", "sub", "plain"), r##"<a href="#"></a>"##);
    assert_eq!(r.expand_abbreviation("list+", "html", "plain"), "<ul><li></li></ul>");
    assert_eq!(r.expand_abbreviation("p{hello ${who}}", "sub", "plain"), "<p>hello world</p>");
}

#[test]
fn inline_profile() {
    let r = registry();
    let shouty = OutputProfile { tag_case: Case::Upper,
                                 attr_case: Case::Upper,
                                 attr_quotes: Quotes::Single,
                                 .. OutputProfile::plain() };
    assert_eq!(r.expand_abbreviation("a", "html", &shouty), "<A HREF='#'></A>");
}

#[test]
fn custom_filter() {
    let mut r = registry();
    r.register_filter("shout", |tree: &mut ZenTree, _: &mut FilterContext<'_>| {
        for id in tree.descendants(tree.root()) {
            let node = tree.get_mut(id);
            node.content = node.content.to_uppercase();
        }
    });
    assert_eq!(r.expand_abbreviation("p{hi}|shout", "html", "plain"), "<p>HI</p>");
    assert_eq!(r.expand_abbreviation("p{hi}|e|shout", "html", "plain"),
               "&lt;p&gt;HI&lt;/p&gt;");
}

#[test]
fn errors() {
    init_logging();
    let r = registry();
    assert!(matches!(r.try_expand("div[", "html", "plain"),
                     Err(Error::InvalidAbbreviation { reason: Reason::UnclosedAttributes,
                                                      .. })));
    assert!(matches!(r.try_expand("loop+", "html", "plain"),
                     Err(Error::InvalidGroupExpansion { .. })));
    assert!(matches!(r.try_expand("bad+", "html", "plain"),
                     Err(Error::InvalidGroupExpansion { .. })));
    assert_eq!(r.expand_abbreviation("bad+", "html", "plain"), "");
    assert_eq!(r.wrap_with_abbreviation("loop+", "x", "html", "plain"), None);
}
