//! String utilities shared by the tree builder, the rollout, and the filters:
//! escape-aware symbol replacement, counters, tabstops, variables, and line
//! padding.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};


static RE_ESCAPED: Lazy<Regex> = Lazy::new(|| regex(r"\\(.)"));

static RE_TO_ESCAPE: Lazy<Regex> = Lazy::new(|| regex(r"([$|\\])"));

static RE_LINE_BREAK: Lazy<Regex> = Lazy::new(|| regex(r"\r\n|\r|\n"));

static RE_VARIABLE: Lazy<Regex> = Lazy::new(|| regex(r"\$\{([\w\-]+)\}"));

static RE_ENDS_WITH_TAG: Lazy<Regex> = Lazy::new(|| regex(
    r#"</?[\w:\-]+(?:\s+[\w\-:]+(?:\s*=\s*(?:(?:"[^"]*")|(?:'[^']*')|[^>\s]+))?)*\s*(/?)>$"#));

/// Compiles one of our constant patterns.
pub(crate) fn regex(pattern: &str) -> Regex {
    Regex::new(pattern)
        .unwrap_or_else(|e| panic!("BUG: invalid built-in pattern {pattern:?}: {e}"))
}


/// Replaces occurrences of `symbol` in `text` that are not escaped with a
/// backslash.
///
/// For each unescaped occurrence (at byte index `i`), `replace` is called with
/// the whole `text` and `i`.  It returns `Some((consumed, replacement))` to
/// replace `consumed` bytes starting at `i`, or `None` to leave the occurrence
/// untouched.  Escapes themselves are kept, so this can be chained.
pub fn replace_unescaped<F>(text: &str, symbol: &str, mut replace: F) -> String
    where F: FnMut(&str, usize) -> Option<(usize, String)>,
{
    let mut result = String::with_capacity(text.len());
    let mut i = 0;
    while i < text.len() {
        let rest = &text[i ..];
        let Some(ch) = rest.chars().next() else { break };
        if ch == '\\' {
            result.push(ch);
            i += 1;
            if let Some(escaped) = text[i ..].chars().next() {
                result.push(escaped);
                i += escaped.len_utf8();
            }
            continue;
        }
        if !symbol.is_empty() && rest.starts_with(symbol) {
            if let Some((consumed, value)) = replace(text, i) {
                result.push_str(&value);
                i += consumed.max(1);
                continue;
            }
        }
        result.push(ch);
        i += ch.len_utf8();
    }
    result
}

/// Replaces every unescaped `symbol` in `text` with `value`.
pub fn replace_unescaped_str(text: &str, symbol: &str, value: &str) -> String {
    replace_unescaped(text, symbol, |_, _| Some((symbol.len(), value.to_owned())))
}

/// Replaces runs of unescaped `$` with `value`, zero-padded to the length of
/// the run: `item$$$` with 7 becomes `item007`.
///
/// A `$` directly followed by `{` or a digit belongs to a variable or a
/// tabstop and is left alone.
pub fn replace_counter(text: &str, value: usize) -> String {
    replace_unescaped(text, "$", |text, pos| {
        let bytes = text.as_bytes();
        match bytes.get(pos + 1) {
            Some(b'{') => return None,
            Some(b) if b.is_ascii_digit() => return None,
            _ => {}
        }
        let mut end = pos + 1;
        while bytes.get(end) == Some(&b'$') && bytes.get(end + 1) != Some(&b'{') {
            end += 1;
        }
        let width = end - pos;
        Some((width, format!("{value:0width$}")))
    })
}

/// Escapes the characters that have meaning to the expander (`$`, `|`, `\`)
/// so that pasted text passes through untouched.
pub fn escape_text(text: &str) -> String {
    RE_TO_ESCAPE.replace_all(text, r"\$1").into_owned()
}

/// Inverse of [`escape_text`]: drops the backslash of every escape.
pub fn unescape_text(text: &str) -> String {
    RE_ESCAPED.replace_all(text, "$1").into_owned()
}

/// Splits `text` into lines on `\r\n`, `\r`, or `\n`.  A single trailing line
/// break does not produce an empty last line.  With `remove_empty`, lines that
/// are blank are dropped.
pub fn split_by_lines(text: &str, remove_empty: bool) -> Vec<&str> {
    if text.is_empty() {
        return vec![];
    }
    let mut lines: Vec<&str> = RE_LINE_BREAK.split(text).collect();
    if lines.len() > 1 && lines.last().map_or(false, |l| l.is_empty()) {
        let _ = lines.pop();
    }
    if remove_empty {
        lines.retain(|line| !line.trim().is_empty());
    }
    lines
}

/// Indents every line of `text` after the first with `pad`, joining them with
/// `newline`.
pub fn pad_string(text: &str, pad: &str, newline: &str) -> String {
    let lines = split_by_lines(text, false);
    let mut result = String::with_capacity(text.len());
    let mut lines = lines.into_iter();
    if let Some(first) = lines.next() {
        result.push_str(first);
        for line in lines {
            result.push_str(newline);
            result.push_str(pad);
            result.push_str(line);
        }
    }
    result
}

/// Strips a trailing `!` from a node name, so that `pos:s!` is looked up as
/// `pos:s`.  A lone `!` is kept.
pub fn filter_node_name(name: &str) -> &str {
    match name.strip_suffix('!') {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => name,
    }
}

/// Whether `text` contains an unescaped `$#` output placeholder.
pub fn has_output_placeholder(text: &str) -> bool {
    let mut found = false;
    let _ = replace_unescaped(text, "$#", |_, _| { found = true; None });
    found
}

/// Whether `text` ends with an opening, closing, or empty-element tag.
pub fn ends_with_tag(text: &str) -> bool {
    RE_ENDS_WITH_TAG.is_match(text)
}

/// Leading whitespace of `line`.
pub fn line_padding(line: &str) -> &str {
    &line[.. line.len() - line.trim_start().len()]
}

/// Replaces `${name}` tokens with what `lookup` gives for them.  Tokens that
/// `lookup` does not know are kept literally.
pub fn replace_variables<F>(text: &str, lookup: F) -> String
    where F: Fn(&str) -> Option<String>,
{
    RE_VARIABLE.replace_all(text, |caps: &Captures<'_>| {
        lookup(&caps[1]).unwrap_or_else(|| caps[0].to_owned())
    }).into_owned()
}

/// Rewrites the tabstops of `text` (`$N`, `${N}`, and `${N:value}`) through
/// `tabstop`, which receives the number and the optional value.  Escapes are
/// handed to `escape`, which receives the escaped character.
pub fn rewrite_tabstops<E, T>(text: &str, mut escape: E, mut tabstop: T) -> String
    where E: FnMut(char) -> String,
          T: FnMut(usize, Option<&str>) -> String,
{
    let bytes = text.as_bytes();
    let digits_end = |from: usize| {
        let mut i = from;
        while bytes.get(i).map_or(false, u8::is_ascii_digit) { i += 1; }
        i
    };
    let number = |s: &str| s.parse::<usize>().unwrap_or(0);

    let mut result = String::with_capacity(text.len());
    let mut i = 0;
    while i < text.len() {
        let Some(ch) = text[i ..].chars().next() else { break };
        if ch == '\\' {
            if let Some(escaped) = text[i + 1 ..].chars().next() {
                result.push_str(&escape(escaped));
                i += 1 + escaped.len_utf8();
                continue;
            }
        } else if ch == '$' {
            match bytes.get(i + 1) {
                Some(b) if b.is_ascii_digit() => {
                    let end = digits_end(i + 1);
                    result.push_str(&tabstop(number(&text[i + 1 .. end]), None));
                    i = end;
                    continue;
                }
                Some(b'{') => {
                    let start = i + 2;
                    let end = digits_end(start);
                    if end > start {
                        match bytes.get(end) {
                            Some(b'}') => {
                                result.push_str(&tabstop(number(&text[start .. end]), None));
                                i = end + 1;
                                continue;
                            }
                            Some(b':') => {
                                let value_start = end + 1;
                                let mut depth = 1_usize;
                                let mut j = value_start;
                                while j < bytes.len() {
                                    match bytes[j] {
                                        b'{' => depth += 1,
                                        b'}' => {
                                            depth -= 1;
                                            if depth == 0 { break; }
                                        }
                                        _ => {}
                                    }
                                    j += 1;
                                }
                                let value = &text[value_start .. j.min(text.len())];
                                result.push_str(&tabstop(number(&text[start .. end]),
                                                         Some(value)));
                                i = (j + 1).min(text.len());
                                continue;
                            }
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }
        result.push(ch);
        i += ch.len_utf8();
    }
    result
}

/// Renumbers the tabstops of `text` by `offset`, keeping escapes as they are,
/// and raises `max` to the highest original tabstop number seen.
pub fn upgrade_tabstops(text: &str, offset: usize, max: &mut usize) -> String {
    rewrite_tabstops(text, |ch| format!("\\{ch}"), |num, value| {
        *max = (*max).max(num);
        match value {
            Some(value) => format!("${{{}:{}}}", num + offset, value),
            None => format!("${}", num + offset),
        }
    })
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn counters() {
        assert_eq!(replace_counter("item$", 3), "item3");
        assert_eq!(replace_counter("item$$$", 7), "item007");
        assert_eq!(replace_counter("$$item$$$", 1), "01item001");
        assert_eq!(replace_counter(r"\$item$", 2), r"\$item2");
        assert_eq!(replace_counter("${var}$1$", 4), "${var}$14");
        assert_eq!(replace_counter("none", 4), "none");
    }

    #[test]
    fn escaping() {
        for s in ["", "plain", "$", "a|b", r"back\slash", r"$\|$$||\\", "üñí$çødé|"] {
            assert_eq!(unescape_text(&escape_text(s)), s);
        }
        assert_eq!(escape_text("a$b|c"), r"a\$b\|c");
        assert_eq!(unescape_text(r"\$db->connect()"), "$db->connect()");
    }

    #[test]
    fn unescaped_replacement() {
        assert_eq!(replace_unescaped_str("a|b\\|c|", "|", "^"), "a^b\\|c^");
        assert_eq!(replace_unescaped_str("é|", "|", "^"), "é^");
        assert!(has_output_placeholder("x $# y"));
        assert!(!has_output_placeholder(r"x \$# y"));
    }

    #[test]
    fn lines() {
        assert_eq!(split_by_lines("one\ntwo\r\nthree\rfour", false),
                   vec!["one", "two", "three", "four"]);
        assert_eq!(split_by_lines("a\n\n \nb\n", true), vec!["a", "b"]);
        assert_eq!(split_by_lines("a\n", false), vec!["a"]);
        assert_eq!(split_by_lines("\nb", false), vec!["", "b"]);
        assert!(split_by_lines("", false).is_empty());
        assert_eq!(pad_string("a\nb\nc", "\t", "\n"), "a\n\tb\n\tc");
        assert_eq!(pad_string("\n<x>", "  ", "\r\n"), "\r\n  <x>");
        assert_eq!(line_padding("\t  x y"), "\t  ");
    }

    #[test]
    fn names_and_tags() {
        assert_eq!(filter_node_name("pos:s!"), "pos:s");
        assert_eq!(filter_node_name("!"), "!");
        assert_eq!(filter_node_name("div"), "div");
        assert!(ends_with_tag("text <b>"));
        assert!(ends_with_tag(r#"<img src="x" alt='y' />"#));
        assert!(ends_with_tag("</p>"));
        assert!(!ends_with_tag("a > b"));
    }

    #[test]
    fn variables() {
        let lookup = |name: &str| (name == "lang").then(|| "en".to_owned());
        assert_eq!(replace_variables("<html lang=\"${lang}\">${missing}${1:x}", lookup),
                   "<html lang=\"en\">${missing}${1:x}");
    }

    #[test]
    fn tabstops() {
        let mut max = 0;
        assert_eq!(upgrade_tabstops("a $1 ${2} ${3:val{x}} \\$4", 10, &mut max),
                   "a $11 ${12} ${13:val{x}} \\$4");
        assert_eq!(max, 3);
        let mut max = 0;
        assert_eq!(upgrade_tabstops("$ ${name} $x", 5, &mut max), "$ ${name} $x");
        assert_eq!(max, 0);
    }
}
