//! Deferred code representation.
//!
//! The code generator builds a [`CodeRep`] tree bottom-up; [`CodeRep::emit`]
//! later walks it into a [`TokenStream`]. Each value carries [`Flags`]
//! describing its surface form so parents can decide on disambiguating
//! parentheses without re-scanning text.

use bitflags::bitflags;

use crate::token_stream::TokenStream;

bitflags! {
    /// Facts about how a rendered fragment begins or ends.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        /// A bare `in` operator outside any parentheses.
        const CONTAINS_IN = 1 << 0;
        /// A top-level comma expression.
        const CONTAINS_GROUP = 1 << 1;
        const STARTS_WITH_OBJECT_CURLY = 1 << 2;
        const STARTS_WITH_FUNCTION_OR_CLASS = 1 << 3;
        /// Starts with the identifier `let`.
        const STARTS_WITH_LET = 1 << 4;
        /// Starts with `let[`.
        const STARTS_WITH_LET_SQUARE_BRACKET = 1 << 5;
        /// Ends with an `if` that has no `else`.
        const ENDS_WITH_MISSING_ELSE = 1 << 6;

        /// Flags that describe the first token of a fragment.
        const LEADING = Self::STARTS_WITH_OBJECT_CURLY.bits()
            | Self::STARTS_WITH_FUNCTION_OR_CLASS.bits()
            | Self::STARTS_WITH_LET.bits()
            | Self::STARTS_WITH_LET_SQUARE_BRACKET.bits();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RepKind {
    Empty,
    Token(String),
    /// Template text; appended without spacing decisions.
    RawToken(String),
    Number(f64),
    /// A binary or assignment operator; padded in pretty mode.
    Operator(String),
    Paren(Box<CodeRep>),
    Bracket(Box<CodeRep>),
    Brace(Box<CodeRep>),
    /// Renders its contents in a context where a bare `in` is ambiguous.
    NoIn(Box<CodeRep>),
    /// Parenthesized when rendered inside [`RepKind::NoIn`].
    ContainsIn(Box<CodeRep>),
    Sequence(Vec<CodeRep>),
    CommaSeparated(Vec<CodeRep>),
    /// A declarator: `lhs` or `lhs = rhs`.
    Init(Box<CodeRep>, Option<Box<CodeRep>>),
    Semicolon,
    OptionalSemicolon,
    /// An expression statement whose expression is a string literal.
    StringStatement(Box<CodeRep>),
    /// Starts a new line in pretty mode.
    Line(Box<CodeRep>),
    /// Contents indented one level in pretty mode.
    Indent(Box<CodeRep>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeRep {
    pub kind: RepKind,
    pub flags: Flags,
}

impl CodeRep {
    fn new(kind: RepKind) -> Self {
        Self {
            kind,
            flags: Flags::empty(),
        }
    }

    pub fn empty() -> Self {
        Self::new(RepKind::Empty)
    }

    pub fn token(text: impl Into<String>) -> Self {
        Self::new(RepKind::Token(text.into()))
    }

    pub fn raw(text: impl Into<String>) -> Self {
        Self::new(RepKind::RawToken(text.into()))
    }

    pub fn number(value: f64) -> Self {
        Self::new(RepKind::Number(value))
    }

    pub fn operator(op: impl Into<String>) -> Self {
        Self::new(RepKind::Operator(op.into()))
    }

    pub fn paren(inner: CodeRep) -> Self {
        Self::new(RepKind::Paren(Box::new(inner)))
    }

    pub fn bracket(inner: CodeRep) -> Self {
        Self::new(RepKind::Bracket(Box::new(inner)))
    }

    pub fn brace(inner: CodeRep) -> Self {
        Self::new(RepKind::Brace(Box::new(inner)))
    }

    pub fn no_in(inner: CodeRep) -> Self {
        Self::new(RepKind::NoIn(Box::new(inner)))
    }

    /// Wrap `inner` so it gets parentheses in a no-`in` context, but only if
    /// it actually contains a bare `in`.
    pub fn test_in(inner: CodeRep) -> Self {
        if inner.has(Flags::CONTAINS_IN) {
            Self::new(RepKind::ContainsIn(Box::new(inner)))
        } else {
            inner
        }
    }

    pub fn seq(children: Vec<CodeRep>) -> Self {
        Self::new(RepKind::Sequence(children))
    }

    pub fn comma_sep(children: Vec<CodeRep>) -> Self {
        Self::new(RepKind::CommaSeparated(children))
    }

    pub fn init(lhs: CodeRep, rhs: Option<CodeRep>) -> Self {
        Self::new(RepKind::Init(Box::new(lhs), rhs.map(Box::new)))
    }

    pub fn semi() -> Self {
        Self::new(RepKind::Semicolon)
    }

    pub fn semi_op() -> Self {
        Self::new(RepKind::OptionalSemicolon)
    }

    pub fn string_statement(expression: CodeRep) -> Self {
        Self::new(RepKind::StringStatement(Box::new(expression)))
    }

    pub fn line(inner: CodeRep) -> Self {
        Self::new(RepKind::Line(Box::new(inner)))
    }

    pub fn indent(inner: CodeRep) -> Self {
        Self::new(RepKind::Indent(Box::new(inner)))
    }

    #[must_use]
    pub fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    pub fn has(&self, flags: Flags) -> bool {
        self.flags.contains(flags)
    }

    /// The flags of this fragment that describe its first token.
    pub fn leading(&self) -> Flags {
        self.flags & Flags::LEADING
    }

    pub fn is_string_statement(&self) -> bool {
        matches!(self.kind, RepKind::StringStatement(_))
    }

    /// Write this fragment to `ts`. `no_in` is set while rendering the
    /// initializer of a `for(;;)` header.
    pub fn emit(&self, ts: &mut TokenStream, no_in: bool) {
        match &self.kind {
            RepKind::Empty => {}
            RepKind::Token(text) => ts.put(text),
            RepKind::RawToken(text) => ts.put_raw(text),
            RepKind::Number(value) => ts.put_number(*value),
            RepKind::Operator(op) => ts.put_operator(op),
            RepKind::Paren(inner) => {
                ts.put("(");
                inner.emit(ts, false);
                ts.put(")");
            }
            RepKind::Bracket(inner) => {
                ts.put("[");
                inner.emit(ts, false);
                ts.put("]");
            }
            RepKind::Brace(inner) => {
                ts.put("{");
                inner.emit(ts, false);
                ts.put("}");
            }
            RepKind::NoIn(inner) => inner.emit(ts, true),
            RepKind::ContainsIn(inner) => {
                if no_in {
                    ts.put("(");
                    inner.emit(ts, false);
                    ts.put(")");
                } else {
                    inner.emit(ts, false);
                }
            }
            RepKind::Sequence(children) => {
                for child in children {
                    child.emit(ts, no_in);
                }
            }
            RepKind::CommaSeparated(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        ts.put_separator();
                    }
                    child.emit(ts, no_in);
                }
            }
            RepKind::Init(lhs, rhs) => {
                lhs.emit(ts, false);
                if let Some(rhs) = rhs {
                    ts.put_operator("=");
                    rhs.emit(ts, no_in);
                }
            }
            RepKind::Semicolon => ts.put(";"),
            RepKind::OptionalSemicolon => ts.put_optional_semi(),
            RepKind::StringStatement(expression) => {
                expression.emit(ts, no_in);
                ts.put_optional_semi();
            }
            RepKind::Line(inner) => {
                ts.newline();
                inner.emit(ts, no_in);
            }
            RepKind::Indent(inner) => {
                let start = ts.as_str().len();
                ts.indent();
                inner.emit(ts, no_in);
                ts.dedent();
                if ts.as_str().len() > start {
                    ts.newline();
                }
            }
        }
    }

    /// Emit into a fresh compact stream.
    pub fn render(&self) -> String {
        let mut ts = TokenStream::new();
        self.emit(&mut ts, false);
        ts.into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> CodeRep {
        CodeRep::token(name)
    }

    fn a_in_b() -> CodeRep {
        CodeRep::seq(vec![ident("a"), CodeRep::operator("in"), ident("b")]).with_flags(Flags::CONTAINS_IN)
    }

    #[test]
    fn test_contains_in_inside_no_in() {
        let rep = CodeRep::no_in(CodeRep::test_in(a_in_b()));
        assert_eq!(rep.render(), "(a in b)");
    }

    #[test]
    fn test_contains_in_outside_no_in() {
        assert_eq!(CodeRep::test_in(a_in_b()).render(), "a in b");
    }

    #[test]
    fn test_test_in_skips_plain_values() {
        let plain = ident("x");
        assert_eq!(CodeRep::test_in(plain.clone()), plain);
    }

    #[test]
    fn test_brackets_reset_no_in() {
        let rep = CodeRep::no_in(CodeRep::bracket(CodeRep::test_in(a_in_b())));
        assert_eq!(rep.render(), "[a in b]");
    }

    #[test]
    fn test_init_passes_no_in_to_rhs_only() {
        let rep = CodeRep::no_in(CodeRep::init(ident("x"), Some(CodeRep::test_in(a_in_b()))));
        assert_eq!(rep.render(), "x=(a in b)");
        assert_eq!(CodeRep::init(ident("x"), None).render(), "x");
    }

    #[test]
    fn test_comma_separated() {
        let rep = CodeRep::paren(CodeRep::comma_sep(vec![ident("a"), ident("b"), CodeRep::number(1.0)]));
        assert_eq!(rep.render(), "(a,b,1)");
    }

    #[test]
    fn test_string_statement() {
        let rep = CodeRep::seq(vec![
            CodeRep::string_statement(CodeRep::token("\"a\"")),
            CodeRep::string_statement(CodeRep::token("\"b\"")),
        ]);
        assert_eq!(rep.render(), "\"a\";\"b\"");
        assert!(CodeRep::string_statement(CodeRep::empty()).is_string_statement());
    }

    #[test]
    fn test_leading_flags() {
        let rep = ident("x").with_flags(Flags::STARTS_WITH_LET | Flags::CONTAINS_IN);
        assert_eq!(rep.leading(), Flags::STARTS_WITH_LET);
        assert!(rep.has(Flags::CONTAINS_IN));
        assert!(!rep.has(Flags::CONTAINS_GROUP));
    }

    #[test]
    fn test_indent_in_pretty_mode() {
        let body = CodeRep::brace(CodeRep::indent(CodeRep::seq(vec![
            CodeRep::line(CodeRep::seq(vec![ident("a"), CodeRep::semi_op()])),
            CodeRep::line(CodeRep::seq(vec![ident("b"), CodeRep::semi_op()])),
        ])));
        let mut ts = TokenStream::pretty(2);
        body.emit(&mut ts, false);
        assert_eq!(ts.into_string(), "{\n  a;\n  b;\n}");

        let empty = CodeRep::brace(CodeRep::indent(CodeRep::seq(vec![])));
        let mut ts = TokenStream::pretty(2);
        empty.emit(&mut ts, false);
        assert_eq!(ts.into_string(), "{}");
    }
}
