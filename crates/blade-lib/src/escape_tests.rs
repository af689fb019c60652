use crate::escape::{escape_double_quoted, escape_template, unescape_string};

#[test]
fn unescape_plain_text() {
    assert_eq!(unescape_string("hello"), "hello");
}

#[test]
fn unescape_known_sequences() {
    assert_eq!(unescape_string(r"a\nb\tc"), "a\nb\tc");
    assert_eq!(unescape_string(r#"say \"hi\""#), "say \"hi\"");
    assert_eq!(unescape_string(r"it\'s"), "it's");
}

#[test]
fn unescape_unknown_sequence_keeps_char() {
    assert_eq!(unescape_string(r"\q"), "q");
}

#[test]
fn unescape_trailing_backslash() {
    assert_eq!(unescape_string("abc\\"), "abc\\");
}

#[test]
fn double_quoted_round_trip() {
    assert_eq!(escape_double_quoted("plain"), "plain");
    assert_eq!(escape_double_quoted("say \"hi\""), "say \\\"hi\\\"");
    assert_eq!(escape_double_quoted("a\nb"), "a\\nb");
    assert_eq!(escape_double_quoted("back\\slash"), "back\\\\slash");
}

#[test]
fn template_escapes_backticks_and_interpolation() {
    assert_eq!(escape_template("query { a }"), "query { a }");
    assert_eq!(escape_template("tick ` tock"), "tick \\` tock");
    assert_eq!(escape_template("a ${b} c"), "a \\${b} c");
    assert_eq!(escape_template("lone $ sign"), "lone $ sign");
    assert_eq!(escape_template("back\\slash"), "back\\\\slash");
}
