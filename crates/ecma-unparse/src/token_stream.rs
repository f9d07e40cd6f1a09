//! Token-level output buffer.
//!
//! Decides where whitespace and semicolons are required between tokens so
//! that the concatenated text tokenizes back into the same token sequence.

use crate::d2a::short_d2a_with;
use crate::literal::is_identifier_part;

/// Rendering of numeric literals that overflow to infinity.
pub const INFINITY_LITERAL: &str = "2e308";

/// Rendering of a NaN value, which has no literal form.
pub const NAN_LITERAL: &str = "(0/0)";

#[derive(Debug, Clone)]
pub struct TokenStream {
    buffer: String,
    last_char: char,
    /// Text of the previous token when it was a numeric literal.
    last_number: Option<String>,
    optional_semi: bool,
    pretty: bool,
    indent_width: usize,
    depth: usize,
    /// Start of the current line break while nothing follows it yet.
    fresh_line: Option<usize>,
    hex_large_integers: bool,
    web_safe: bool,
}

impl Default for TokenStream {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStream {
    /// Compact stream: no whitespace beyond what tokenization requires.
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            last_char: '\0',
            last_number: None,
            optional_semi: false,
            pretty: false,
            indent_width: 0,
            depth: 0,
            fresh_line: None,
            hex_large_integers: true,
            web_safe: false,
        }
    }

    /// Stream that breaks lines and indents nested blocks by `indent_width`.
    pub fn pretty(indent_width: usize) -> Self {
        Self {
            pretty: true,
            indent_width,
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_hex_large_integers(mut self, enabled: bool) -> Self {
        self.hex_large_integers = enabled;
        self
    }

    /// Keep `<` apart from a following `/` or `s` so adjacent tokens never
    /// spell an HTML `</script` or `<script` tag.
    #[must_use]
    pub fn with_web_safe(mut self, enabled: bool) -> Self {
        self.web_safe = enabled;
        self
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Finish the stream. A pending optional semicolon is dropped.
    pub fn into_string(self) -> String {
        self.buffer
    }

    /// Append one token, inserting a space or a pending semicolon first if
    /// needed.
    pub fn put(&mut self, token: &str) {
        let Some(first) = token.chars().next() else {
            return;
        };

        if self.optional_semi {
            self.optional_semi = false;
            if token != "}" {
                self.push_str(";");
            }
        }

        if let Some(number) = self.last_number.take() {
            if token == "." {
                // `1.x` would lex as the number `1.` followed by `x`.
                if number.bytes().all(|b| b.is_ascii_digit()) {
                    self.push_str("..");
                } else {
                    self.push_str(".");
                }
                return;
            }
        }

        if needs_space(self.last_char, first)
            || (token.starts_with("--") && self.buffer.ends_with("<!"))
            || (self.web_safe && self.last_char == '<' && matches!(first, '/' | 's' | 'S'))
        {
            self.push_str(" ");
        }
        self.push_str(token);
    }

    /// Append template text verbatim. Spacing decisions for the next token
    /// still look at the token before it, so `${` never gets a space.
    pub fn put_raw(&mut self, text: &str) {
        self.last_number = None;
        if !text.is_empty() {
            self.buffer.push_str(text);
            self.fresh_line = None;
        }
    }

    /// Append a numeric literal in its shortest form.
    pub fn put_number(&mut self, value: f64) {
        if value.is_nan() {
            self.put(NAN_LITERAL);
            return;
        }
        let text = if value.is_finite() {
            short_d2a_with(value, self.hex_large_integers)
        } else {
            INFINITY_LITERAL.to_string()
        };
        self.put(&text);
        self.last_number = Some(text);
    }

    /// An operator token; padded with spaces in pretty mode.
    pub fn put_operator(&mut self, op: &str) {
        if self.pretty {
            if !matches!(self.last_char, ' ' | '\n' | '\0') {
                self.push_str(" ");
            }
            self.put(op);
            self.push_str(" ");
        } else {
            self.put(op);
        }
    }

    /// A comma between list items; followed by a space in pretty mode.
    pub fn put_separator(&mut self) {
        self.put(",");
        if self.pretty {
            self.push_str(" ");
        }
    }

    /// A statement terminator that may be elided before `}` or at the end of
    /// the output.
    pub fn put_optional_semi(&mut self) {
        if self.pretty {
            self.put(";");
        } else {
            self.optional_semi = true;
        }
    }

    /// Start a new line at the current indentation. No-op in compact mode
    /// and at the start of the output; consecutive calls yield one line break.
    pub fn newline(&mut self) {
        if !self.pretty || self.buffer.is_empty() {
            return;
        }
        if let Some(start) = self.fresh_line.take() {
            self.buffer.truncate(start);
        }
        self.last_number = None;
        let start = self.buffer.len();
        let width = self.depth * self.indent_width;
        self.buffer.push('\n');
        self.buffer.extend(std::iter::repeat(' ').take(width));
        self.last_char = if width == 0 { '\n' } else { ' ' };
        self.fresh_line = Some(start);
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn push_str(&mut self, text: &str) {
        if let Some(last) = text.chars().next_back() {
            self.buffer.push_str(text);
            self.last_char = last;
            self.fresh_line = None;
        }
    }
}

fn needs_space(last: char, next: char) -> bool {
    ((last == '+' || last == '-') && last == next)
        || (is_identifier_part(last) && is_identifier_part(next))
        || (last == '/' && (next == 'i' || next == '/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(tokens: &[&str]) -> String {
        let mut ts = TokenStream::new();
        for token in tokens {
            ts.put(token);
        }
        ts.into_string()
    }

    #[test]
    fn test_identifier_adjacency() {
        assert_eq!(render(&["var", "a", "=", "b"]), "var a=b");
        assert_eq!(render(&["typeof", "(", "x", ")"]), "typeof(x)");
        assert_eq!(render(&["a", "in", "b"]), "a in b");
    }

    #[test]
    fn test_plus_minus_runs() {
        assert_eq!(render(&["a", "+", "+", "b"]), "a+ +b");
        assert_eq!(render(&["a", "-", "--", "b"]), "a- --b");
        assert_eq!(render(&["a", "+", "-", "b"]), "a+-b");
    }

    #[test]
    fn test_slash_hazards() {
        assert_eq!(render(&["/a/", "in", "b"]), "/a/ in b");
        assert_eq!(render(&["a", "/", "/b/"]), "a/ /b/");
    }

    #[test]
    fn test_html_comment_open() {
        assert_eq!(render(&["a", "<", "!", "--", "b"]), "a<! --b");
    }

    #[test]
    fn test_web_safe_tag_separation() {
        let mut ts = TokenStream::new().with_web_safe(true);
        for token in ["a", "<", "/script>/"] {
            ts.put(token);
        }
        assert_eq!(ts.as_str(), "a< /script>/");

        let mut ts = TokenStream::new().with_web_safe(true);
        for token in ["a", "<", "script", ">", "b"] {
            ts.put(token);
        }
        assert_eq!(ts.as_str(), "a< script>b");
        assert_eq!(render(&["a", "<", "script"]), "a<script");
    }

    #[test]
    fn test_raw_text_does_not_affect_spacing() {
        let mut ts = TokenStream::new();
        ts.put("`");
        ts.put_raw("abc");
        ts.put("${");
        ts.put("x");
        ts.put("}");
        ts.put_raw("def");
        ts.put("`");
        assert_eq!(ts.as_str(), "`abc${x}def`");
    }

    #[test]
    fn test_number_then_dot() {
        let mut ts = TokenStream::new();
        ts.put_number(1.0);
        ts.put(".");
        ts.put("toString");
        assert_eq!(ts.as_str(), "1..toString");

        let mut ts = TokenStream::new();
        ts.put_number(1.5);
        ts.put(".");
        ts.put("x");
        assert_eq!(ts.as_str(), "1.5.x");

        let mut ts = TokenStream::new();
        ts.put_number(1000.0);
        ts.put(".");
        ts.put("x");
        assert_eq!(ts.as_str(), "1e3.x");
    }

    #[test]
    fn test_number_formatting() {
        let mut ts = TokenStream::new();
        ts.put_number(f64::INFINITY);
        assert_eq!(ts.as_str(), "2e308");

        let mut ts = TokenStream::new().with_hex_large_integers(false);
        ts.put_number(1e15 + 1.0);
        assert_eq!(ts.as_str(), "1000000000000001");
    }

    #[test]
    fn test_nan_is_parenthesized() {
        let mut ts = TokenStream::new();
        ts.put_number(f64::NAN);
        ts.put(".");
        ts.put("x");
        assert_eq!(ts.as_str(), "(0/0).x");

        let mut ts = TokenStream::new();
        ts.put("a");
        ts.put("/");
        ts.put_number(f64::NAN);
        assert_eq!(ts.as_str(), "a/(0/0)");
    }

    #[test]
    fn test_optional_semicolon() {
        let mut ts = TokenStream::new();
        ts.put("a");
        ts.put_optional_semi();
        ts.put("b");
        ts.put_optional_semi();
        assert_eq!(ts.into_string(), "a;b");

        let mut ts = TokenStream::new();
        ts.put("{");
        ts.put("a");
        ts.put_optional_semi();
        ts.put("}");
        assert_eq!(ts.into_string(), "{a}");
    }

    #[test]
    fn test_pretty_layout() {
        let mut ts = TokenStream::pretty(2);
        ts.newline();
        ts.put("a");
        ts.put_operator("=");
        ts.put("b");
        ts.put_optional_semi();
        ts.indent();
        ts.newline();
        ts.put("c");
        ts.dedent();
        ts.newline();
        ts.put("}");
        assert_eq!(ts.into_string(), "a = b;\n  c\n}");
    }

    #[test]
    fn test_pretty_newlines_collapse() {
        let mut ts = TokenStream::pretty(4);
        ts.put("a");
        ts.indent();
        ts.newline();
        ts.dedent();
        ts.newline();
        ts.put("b");
        assert_eq!(ts.into_string(), "a\nb");
    }
}
