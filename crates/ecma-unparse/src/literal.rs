//! String literal escaping and identifier classification.

use std::fmt::Write as _;

/// Quote and escape `value` as a string literal.
///
/// Picks whichever quote character occurs less often in the value; ties go to
/// `"`.
pub fn escape_string_literal(value: &str) -> String {
    let (mut doubles, mut singles) = (0usize, 0usize);
    for ch in value.chars() {
        match ch {
            '"' => doubles += 1,
            '\'' => singles += 1,
            _ => {}
        }
    }
    let delim = if doubles > singles { '\'' } else { '"' };
    escape_with_delimiter(value, delim)
}

/// Escape `value` between `delim` quotes.
pub fn escape_with_delimiter(value: &str, delim: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(delim);
    for ch in value.chars() {
        match ch {
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{b}' => out.push_str("\\v"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}

/// Quote character for a directive's raw text.
///
/// Directives are emitted verbatim, so `"` is only usable when every `"` in
/// the raw text is already escaped.
pub fn directive_delimiter(raw: &str) -> char {
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                if chars.next().is_none() {
                    return '\'';
                }
            }
            '"' => return '\'',
            _ => {}
        }
    }
    '"'
}

pub fn is_identifier_start(ch: char) -> bool {
    if ch.is_ascii() {
        ch.is_ascii_alphabetic() || ch == '$' || ch == '_'
    } else {
        ch.is_alphabetic()
    }
}

pub fn is_identifier_part(ch: char) -> bool {
    if ch.is_ascii() {
        ch.is_ascii_alphanumeric() || ch == '$' || ch == '_'
    } else {
        ch.is_alphanumeric() || ch == '\u{200c}' || ch == '\u{200d}'
    }
}

/// Whether `name` can appear unquoted as a property name.
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_part),
        _ => false,
    }
}

/// Rewrite text so it can be inlined in an HTML `<script>` element.
///
/// NUL becomes `\x00`, every non-ASCII character becomes a `\uXXXX` escape
/// (surrogate pairs for astral characters), and the `s` of `<script` or
/// `</script` (in any case) followed by whitespace, `/` or `>` becomes a
/// `\xNN` escape.
///
/// `text` may already be escaped source, so an identity escape such as `\é`
/// is replaced whole and a line continuation before U+2028 or U+2029 becomes
/// one before `\n`.
pub fn web_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_escape = false;
    for ch in text.chars() {
        let starts_escape = ch == '\\' && !in_escape;
        match ch {
            '\u{2028}' | '\u{2029}' if in_escape => out.push('\n'),
            c if c.is_ascii() && c != '\0' => out.push(c),
            c => {
                if in_escape {
                    out.pop();
                }
                if c == '\0' {
                    out.push_str("\\x00");
                } else {
                    let mut units = [0u16; 2];
                    for unit in c.encode_utf16(&mut units) {
                        let _ = write!(out, "\\u{:04X}", unit);
                    }
                }
            }
        }
        in_escape = starts_escape;
    }
    neutralize_script_tags(&out)
}

fn neutralize_script_tags(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'<' {
            let slash = usize::from(bytes.get(i + 1) == Some(&b'/'));
            let name_start = i + 1 + slash;
            let after = name_start + "script".len();
            let is_script = bytes
                .get(name_start..after)
                .is_some_and(|name| name.eq_ignore_ascii_case(b"script"));
            if is_script
                && matches!(bytes.get(after), Some(b'\t' | b'\r' | b'\x0c' | b' ' | b'/' | b'>'))
            {
                out.push_str(&text[i..name_start]);
                let _ = write!(out, "\\x{:02X}", bytes[name_start]);
                out.push_str(&text[name_start + 1..after]);
                i = after;
                continue;
            }
        }
        // `text` is pure ASCII here, so byte and char indices agree.
        out.push(bytes[i] as char);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_double_quotes() {
        assert_eq!(escape_string_literal("abc"), "\"abc\"");
        assert_eq!(escape_string_literal("a'b\"c"), "\"a'b\\\"c\"");
    }

    #[test]
    fn test_switches_to_single_quotes() {
        assert_eq!(escape_string_literal("say \"hi\""), "'say \"hi\"'");
        assert_eq!(escape_string_literal("it's \"a\" \"b\""), "'it\\'s \"a\" \"b\"'");
    }

    #[test]
    fn test_escapes_control_characters() {
        assert_eq!(escape_string_literal("a\nb\tc"), "\"a\\nb\\tc\"");
        assert_eq!(escape_string_literal("\u{8}\u{b}\u{c}\r\\"), "\"\\b\\v\\f\\r\\\\\"");
        assert_eq!(escape_string_literal("\u{2028}\u{2029}"), "\"\\u2028\\u2029\"");
    }

    #[test]
    fn test_directive_delimiter() {
        assert_eq!(directive_delimiter("use strict"), '"');
        assert_eq!(directive_delimiter("a\\\"b"), '"');
        assert_eq!(directive_delimiter("a\"b"), '\'');
        assert_eq!(directive_delimiter("a\\\\\"b"), '\'');
    }

    #[test]
    fn test_identifier_names() {
        assert!(is_identifier_name("foo"));
        assert!(is_identifier_name("$_1"));
        assert!(is_identifier_name("ünïcode"));
        assert!(!is_identifier_name(""));
        assert!(!is_identifier_name("1a"));
        assert!(!is_identifier_name("a-b"));
    }

    #[test]
    fn test_web_safe() {
        assert_eq!(web_safe("a\0b"), "a\\x00b");
        assert_eq!(web_safe("é"), "\\u00E9");
        assert_eq!(web_safe("😀"), "\\uD83D\\uDE00");
        assert_eq!(web_safe("</script>"), "</\\x73cript>");
        assert_eq!(web_safe("<script src"), "<\\x73cript src");
        assert_eq!(web_safe("<scripts>"), "<scripts>");
        assert_eq!(web_safe("</SCRIPT >"), "</\\x53CRIPT >");
    }

    #[test]
    fn test_web_safe_keeps_escaped_meaning() {
        assert_eq!(web_safe("a\\é"), "a\\u00E9");
        assert_eq!(web_safe("\\\\é"), "\\\\\\u00E9");
        assert_eq!(web_safe("\\\\\\😀"), "\\\\\\uD83D\\uDE00");
        assert_eq!(web_safe("\\\0"), "\\x00");
        assert_eq!(web_safe("a\\\u{2028}b"), "a\\\nb");
        assert_eq!(web_safe("\\n\u{2028}"), "\\n\\u2028");
    }
}
