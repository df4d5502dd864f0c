//! Parser error types.
//!
//! Lexer and parser failures share one structured error: a closed
//! [`ErrorCode`] plus a property map carrying the position and the
//! offending token, so callers can assert on individual fields.

use std::collections::BTreeMap;
use std::fmt;

use crate::lexer::Token;

/// Closed set of error codes raised by the lexer and the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCode {
    /// A character that cannot start any token.
    LexerInvalidChar,
    /// An unterminated string, quoted identifier, Ion literal or comment.
    LexerInvalidLiteral,
    /// A token that does not fit the grammar at this point.
    ParseUnexpectedToken,
    /// A token that cannot start an expression where one is required.
    ParseUnexpectedTerm,
    /// A numeric literal that does not fit its value type.
    ParseMalformedNumber,
    /// Bracketed nesting deeper than the configured maximum.
    ParseNestingTooDeep,
}

impl ErrorCode {
    /// Returns the stable code name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LexerInvalidChar => "LEXER_INVALID_CHAR",
            Self::LexerInvalidLiteral => "LEXER_INVALID_LITERAL",
            Self::ParseUnexpectedToken => "PARSE_UNEXPECTED_TOKEN",
            Self::ParseUnexpectedTerm => "PARSE_UNEXPECTED_TERM",
            Self::ParseMalformedNumber => "PARSE_MALFORMED_NUMBER",
            Self::ParseNestingTooDeep => "PARSE_NESTING_TOO_DEEP",
        }
    }

    /// Returns the human-readable lead of the message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::LexerInvalidChar => "invalid character",
            Self::LexerInvalidLiteral => "invalid literal",
            Self::ParseUnexpectedToken => "unexpected token",
            Self::ParseUnexpectedTerm => "unexpected term",
            Self::ParseMalformedNumber => "malformed number",
            Self::ParseNestingTooDeep => "nesting too deep at token",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys of the error context map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    /// 1-based line of the offending token.
    LineNumber,
    /// 1-based column of the offending token.
    ColumnNumber,
    /// Display name of the offending token kind.
    TokenDescription,
    /// Source text of the offending token.
    TokenValue,
    /// What the grammar expected instead.
    ExpectedTokens,
    /// The configured nesting limit.
    MaxDepth,
}

impl Property {
    /// Returns the stable property name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LineNumber => "LINE_NUMBER",
            Self::ColumnNumber => "COLUMN_NUMBER",
            Self::TokenDescription => "TOKEN_DESCRIPTION",
            Self::TokenValue => "TOKEN_VALUE",
            Self::ExpectedTokens => "EXPECTED_TOKENS",
            Self::MaxDepth => "MAX_DEPTH",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value stored in the error context map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// Integer payload (positions, limits).
    Integer(i64),
    /// Text payload (token descriptions and values).
    String(String),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// Error context keyed by [`Property`], ordered for deterministic output.
pub type PropertyMap = BTreeMap<Property, PropertyValue>;

/// A lexer or parser error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "{code}: {lead} '{token_value}' ({token_description}) at line {line}, column {column}",
    lead = .code.message()
)]
pub struct ParseError {
    /// The error code.
    pub code: ErrorCode,
    /// 1-based line of the offending token.
    pub line: u32,
    /// 1-based column of the offending token.
    pub column: u32,
    /// Display name of the offending token kind.
    pub token_description: String,
    /// Source text of the offending token.
    pub token_value: String,
    /// Additional context beyond the position and the token.
    pub extra: PropertyMap,
}

impl ParseError {
    /// Creates an error at the given token.
    #[must_use]
    pub fn at(code: ErrorCode, token: &Token) -> Self {
        Self {
            code,
            line: token.line,
            column: token.column,
            token_description: token.kind.description().to_string(),
            token_value: token.text.clone(),
            extra: PropertyMap::new(),
        }
    }

    /// Creates a lexer error at a raw source position.
    #[must_use]
    pub fn lexer(
        code: ErrorCode,
        description: impl Into<String>,
        value: impl Into<String>,
        line: u32,
        column: u32,
    ) -> Self {
        Self {
            code,
            line,
            column,
            token_description: description.into(),
            token_value: value.into(),
            extra: PropertyMap::new(),
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(token: &Token) -> Self {
        Self::at(ErrorCode::ParseUnexpectedToken, token)
    }

    /// Creates an "unexpected token" error recording what was expected.
    #[must_use]
    pub fn expected(expected: impl Into<String>, token: &Token) -> Self {
        Self::unexpected(token).with_property(
            Property::ExpectedTokens,
            PropertyValue::String(expected.into()),
        )
    }

    /// Creates an error for a token that cannot start an expression.
    #[must_use]
    pub fn unexpected_term(token: &Token) -> Self {
        Self::at(ErrorCode::ParseUnexpectedTerm, token)
    }

    /// Adds a property to the error context.
    #[must_use]
    pub fn with_property(mut self, property: Property, value: PropertyValue) -> Self {
        self.extra.insert(property, value);
        self
    }

    /// Returns the full error context, including position and token.
    #[must_use]
    pub fn properties(&self) -> PropertyMap {
        let mut map = self.extra.clone();
        map.insert(
            Property::LineNumber,
            PropertyValue::Integer(i64::from(self.line)),
        );
        map.insert(
            Property::ColumnNumber,
            PropertyValue::Integer(i64::from(self.column)),
        );
        map.insert(
            Property::TokenDescription,
            PropertyValue::String(self.token_description.clone()),
        );
        map.insert(
            Property::TokenValue,
            PropertyValue::String(self.token_value.clone()),
        );
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Keyword, Span, TokenKind};

    fn where_token() -> Token {
        Token::new(
            TokenKind::Keyword(Keyword::Where),
            "WHERE",
            Span::new(60, 65),
            1,
            61,
        )
    }

    #[test]
    fn test_display_format() {
        let err = ParseError::unexpected(&where_token());
        assert_eq!(
            err.to_string(),
            "PARSE_UNEXPECTED_TOKEN: unexpected token 'WHERE' (WHERE) at line 1, column 61"
        );
    }

    #[test]
    fn test_properties_include_position_and_token() {
        let err = ParseError::expected("end of statement", &where_token());
        let props = err.properties();
        assert_eq!(props[&Property::LineNumber], PropertyValue::Integer(1));
        assert_eq!(props[&Property::ColumnNumber], PropertyValue::Integer(61));
        assert_eq!(
            props[&Property::TokenDescription],
            PropertyValue::String("WHERE".into())
        );
        assert_eq!(
            props[&Property::ExpectedTokens],
            PropertyValue::String("end of statement".into())
        );
        assert_eq!(props.len(), 5);
    }

    #[test]
    fn test_code_names() {
        assert_eq!(ErrorCode::ParseUnexpectedTerm.to_string(), "PARSE_UNEXPECTED_TERM");
        assert_eq!(Property::TokenValue.to_string(), "TOKEN_VALUE");
    }
}
