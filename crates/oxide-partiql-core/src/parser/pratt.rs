//! Pratt expression parser for operator precedence.
//!
//! Binding powers, loosest first:
//!
//! | Level | Operators | bp |
//! |---|---|---|
//! | or | `OR` | (1, 2) |
//! | and | `AND` | (3, 4) |
//! | not | prefix `NOT` | 5 |
//! | comparison | `= <> != < <= > >= IS IN LIKE BETWEEN`, `NOT IN/LIKE/BETWEEN` | (7, 8) |
//! | additive | `\|\| + -` | (9, 10) |
//! | multiplicative | `* / %` | (11, 12) |
//! | unary | prefix `+ -` | 13 |
//!
//! Bag operators sit below OR and are handled by the query parser.

use crate::ast::BinaryOp;
use crate::lexer::{Keyword, TokenKind};

/// Binding power of prefix `NOT`.
pub const NOT_BP: u8 = 5;

/// Minimum binding power for the operand of prefix `NOT`.
pub const NOT_OPERAND_BP: u8 = NOT_BP + 1;

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: left_bp < right_bp
///
/// `NOT` is reported as a comparison operator; the caller checks that
/// IN, LIKE or BETWEEN follows.
///
/// Returns `None` if the token is not an infix operator.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),

        TokenKind::Keyword(Keyword::And) => Some((3, 4)),

        TokenKind::Eq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq
        | TokenKind::Keyword(
            Keyword::Is | Keyword::In | Keyword::Like | Keyword::Between | Keyword::Not,
        ) => Some((7, 8)),

        TokenKind::Plus | TokenKind::Minus | TokenKind::Concat => Some((9, 10)),

        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((11, 12)),

        _ => None,
    }
}

/// Converts a token to a binary operator.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Plus),
        TokenKind::Minus => Some(BinaryOp::Minus),
        TokenKind::Star => Some(BinaryOp::Times),
        TokenKind::Slash => Some(BinaryOp::Divide),
        TokenKind::Percent => Some(BinaryOp::Modulo),
        TokenKind::Concat => Some(BinaryOp::Concat),
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::Ne),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::LtEq => Some(BinaryOp::Lte),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::GtEq => Some(BinaryOp::Gte),
        TokenKind::Keyword(Keyword::And) => Some(BinaryOp::And),
        TokenKind::Keyword(Keyword::Or) => Some(BinaryOp::Or),
        _ => None,
    }
}
