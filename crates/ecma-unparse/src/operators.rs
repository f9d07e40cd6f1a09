//! Operator tables and the precedence order used for parenthesization.

use serde::Deserialize;

/// Expression precedence, weakest first.
///
/// The derived `Ord` is the binding strength: a child whose precedence is
/// less than the minimum its parent requires gets parenthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Sequence,
    Assignment,
    Conditional,
    LogicalOr,
    LogicalAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equality,
    Relational,
    Shift,
    Additive,
    Multiplicative,
    Exponential,
    Prefix,
    Postfix,
    New,
    Call,
    Member,
    Primary,
}

/// Binary operators, including the comma operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum BinaryOperator {
    #[serde(rename = "==")]
    Equal, // ==
    #[serde(rename = "!=")]
    NotEqual, // !=
    #[serde(rename = "===")]
    StrictEqual, // ===
    #[serde(rename = "!==")]
    StrictNotEqual, // !==
    #[serde(rename = "<")]
    LessThan, // <
    #[serde(rename = "<=")]
    LessThanEqual, // <=
    #[serde(rename = ">")]
    GreaterThan, // >
    #[serde(rename = ">=")]
    GreaterThanEqual, // >=
    #[serde(rename = "in")]
    In, // in
    #[serde(rename = "instanceof")]
    Instanceof, // instanceof
    #[serde(rename = "<<")]
    Left, // <<
    #[serde(rename = ">>")]
    Right, // >>
    #[serde(rename = ">>>")]
    UnsignedRight, // >>>
    #[serde(rename = "+")]
    Plus, // +
    #[serde(rename = "-")]
    Minus, // -
    #[serde(rename = "*")]
    Mul, // *
    #[serde(rename = "/")]
    Div, // /
    #[serde(rename = "%")]
    Rem, // %
    #[serde(rename = "**")]
    Exp, // **
    #[serde(rename = ",")]
    Sequence, // ,
    #[serde(rename = "||")]
    LogicalOr, // ||
    #[serde(rename = "&&")]
    LogicalAnd, // &&
    #[serde(rename = "|")]
    BitOr, // |
    #[serde(rename = "^")]
    BitXor, // ^
    #[serde(rename = "&")]
    BitAnd, // &
}

impl BinaryOperator {
    /// Source text of the operator.
    pub fn name(self) -> &'static str {
        binary_op_info(self).1
    }

    /// Precedence of an expression using this operator.
    pub fn precedence(self) -> Precedence {
        binary_op_info(self).0
    }

    /// `**` is the only right-associative binary operator.
    pub fn is_right_associative(self) -> bool {
        matches!(self, BinaryOperator::Exp)
    }
}

fn binary_op_info(op: BinaryOperator) -> (Precedence, &'static str) {
    match op {
        BinaryOperator::Sequence => (Precedence::Sequence, ","),
        BinaryOperator::LogicalOr => (Precedence::LogicalOr, "||"),
        BinaryOperator::LogicalAnd => (Precedence::LogicalAnd, "&&"),
        BinaryOperator::BitOr => (Precedence::BitwiseOr, "|"),
        BinaryOperator::BitXor => (Precedence::BitwiseXor, "^"),
        BinaryOperator::BitAnd => (Precedence::BitwiseAnd, "&"),
        BinaryOperator::Equal => (Precedence::Equality, "=="),
        BinaryOperator::NotEqual => (Precedence::Equality, "!="),
        BinaryOperator::StrictEqual => (Precedence::Equality, "==="),
        BinaryOperator::StrictNotEqual => (Precedence::Equality, "!=="),
        BinaryOperator::LessThan => (Precedence::Relational, "<"),
        BinaryOperator::LessThanEqual => (Precedence::Relational, "<="),
        BinaryOperator::GreaterThan => (Precedence::Relational, ">"),
        BinaryOperator::GreaterThanEqual => (Precedence::Relational, ">="),
        BinaryOperator::In => (Precedence::Relational, "in"),
        BinaryOperator::Instanceof => (Precedence::Relational, "instanceof"),
        BinaryOperator::Left => (Precedence::Shift, "<<"),
        BinaryOperator::Right => (Precedence::Shift, ">>"),
        BinaryOperator::UnsignedRight => (Precedence::Shift, ">>>"),
        BinaryOperator::Plus => (Precedence::Additive, "+"),
        BinaryOperator::Minus => (Precedence::Additive, "-"),
        BinaryOperator::Mul => (Precedence::Multiplicative, "*"),
        BinaryOperator::Div => (Precedence::Multiplicative, "/"),
        BinaryOperator::Rem => (Precedence::Multiplicative, "%"),
        BinaryOperator::Exp => (Precedence::Exponential, "**"),
    }
}

/// Compound assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum CompoundAssignmentOperator {
    #[serde(rename = "+=")]
    AssignPlus,
    #[serde(rename = "-=")]
    AssignMinus,
    #[serde(rename = "*=")]
    AssignMul,
    #[serde(rename = "/=")]
    AssignDiv,
    #[serde(rename = "%=")]
    AssignRem,
    #[serde(rename = "**=")]
    AssignExp,
    #[serde(rename = "<<=")]
    AssignLeftShift,
    #[serde(rename = ">>=")]
    AssignRightShift,
    #[serde(rename = ">>>=")]
    AssignUnsignedRightShift,
    #[serde(rename = "|=")]
    AssignBitOr,
    #[serde(rename = "^=")]
    AssignBitXor,
    #[serde(rename = "&=")]
    AssignBitAnd,
}

impl CompoundAssignmentOperator {
    pub fn name(self) -> &'static str {
        match self {
            CompoundAssignmentOperator::AssignPlus => "+=",
            CompoundAssignmentOperator::AssignMinus => "-=",
            CompoundAssignmentOperator::AssignMul => "*=",
            CompoundAssignmentOperator::AssignDiv => "/=",
            CompoundAssignmentOperator::AssignRem => "%=",
            CompoundAssignmentOperator::AssignExp => "**=",
            CompoundAssignmentOperator::AssignLeftShift => "<<=",
            CompoundAssignmentOperator::AssignRightShift => ">>=",
            CompoundAssignmentOperator::AssignUnsignedRightShift => ">>>=",
            CompoundAssignmentOperator::AssignBitOr => "|=",
            CompoundAssignmentOperator::AssignBitXor => "^=",
            CompoundAssignmentOperator::AssignBitAnd => "&=",
        }
    }
}

/// Prefix unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum UnaryOperator {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
    #[serde(rename = "!")]
    LogicalNot,
    #[serde(rename = "~")]
    BitNot,
    #[serde(rename = "typeof")]
    Typeof,
    #[serde(rename = "void")]
    Void,
    #[serde(rename = "delete")]
    Delete,
}

impl UnaryOperator {
    pub fn name(self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
            UnaryOperator::LogicalNot => "!",
            UnaryOperator::BitNot => "~",
            UnaryOperator::Typeof => "typeof",
            UnaryOperator::Void => "void",
            UnaryOperator::Delete => "delete",
        }
    }
}

/// `++` and `--`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum UpdateOperator {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

impl UpdateOperator {
    pub fn name(self) -> &'static str {
        match self {
            UpdateOperator::Increment => "++",
            UpdateOperator::Decrement => "--",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        assert!(Precedence::Sequence < Precedence::Assignment);
        assert!(Precedence::Multiplicative < Precedence::Exponential);
        assert!(Precedence::Exponential < Precedence::Prefix);
        assert!(Precedence::Call < Precedence::Member);
        assert!(Precedence::Member < Precedence::Primary);
    }

    #[test]
    fn test_binary_operator_table() {
        assert_eq!(BinaryOperator::Sequence.precedence(), Precedence::Sequence);
        assert_eq!(BinaryOperator::In.precedence(), Precedence::Relational);
        assert_eq!(BinaryOperator::Instanceof.name(), "instanceof");
        assert_eq!(BinaryOperator::UnsignedRight.precedence(), Precedence::Shift);
        assert!(BinaryOperator::Exp.is_right_associative());
        assert!(!BinaryOperator::Minus.is_right_associative());
    }

    #[test]
    fn test_operator_deserialize() {
        let op: BinaryOperator = serde_json::from_str("\">>>\"").unwrap();
        assert_eq!(op, BinaryOperator::UnsignedRight);
        let op: UnaryOperator = serde_json::from_str("\"typeof\"").unwrap();
        assert_eq!(op.name(), "typeof");
        let op: CompoundAssignmentOperator = serde_json::from_str("\"**=\"").unwrap();
        assert_eq!(op.name(), "**=");
    }
}
