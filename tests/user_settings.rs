use pretty_assertions::assert_eq;

use zencoding::{common, settings, SettingsError};


const SETTINGS: &str = r#"{
    "variables": {"charset": "koi8-r"},
    "html": {
        "abbreviations": {"bq": "<blockquote class=\"quote\">"},
        "filters": "html, e"
    },
    "css": {"snippets": {"w100": "width:100%;"}},
    "less": {"extends": "css"},
    "mine": {
        "snippets": {"hi": "hello ${who}|"},
        "variables": {"who": "you"}
    }
}"#;


#[test]
fn user_tier_wins() {
    let mut r = common::registry_with_settings(SETTINGS).unwrap();
    r.set_caret("|");
    assert_eq!(r.expand_abbreviation("p{${charset}}", "html", "plain"),
               "&lt;p&gt;koi8-r&lt;/p&gt;");
    assert_eq!(r.expand_abbreviation("bq", "html", "plain"),
               r#"&lt;blockquote class="quote"&gt;&lt;/blockquote&gt;"#);
    assert_eq!(r.expand_abbreviation("w100", "less", "plain"), "width:100%;");
    assert_eq!(r.expand_abbreviation("pos:s", "less", "plain"), "<pos:s></pos:s>");
    assert_eq!(r.expand_abbreviation("hi", "mine", "plain"), "hello you|");
}

#[test]
fn extends_within_user_tier() {
    let r = common::registry_with_settings(r#"{"foo": {"extends": "html"}}"#).unwrap();
    assert_eq!(r.expand_abbreviation("bq", "foo", "plain"), "<bq></bq>");
    assert_eq!(r.expand_abbreviation("a", "foo", "plain"), "<a></a>");
    assert_eq!(r.expand_abbreviation("bq", "html", "plain"), "<blockquote></blockquote>");
}

#[test]
fn reload() {
    let mut r = common::registry();
    r.set_user_tier(settings::load_str(SETTINGS).unwrap());
    assert_eq!(r.expand_abbreviation("p", "html", "plain"), "&lt;p&gt;&lt;/p&gt;");
    r.set_user_tier(settings::load_str("{}").unwrap());
    assert_eq!(r.expand_abbreviation("p", "html", "plain"), "<p></p>");
}

#[test]
fn bad_documents() {
    assert!(matches!(common::registry_with_settings(r#"{"html": []}"#),
                     Err(SettingsError::Json(_))));
    assert!(matches!(settings::load_reader(&b"not json"[..]), Err(SettingsError::Json(_))));
}
