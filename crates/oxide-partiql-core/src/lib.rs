//! # oxide-partiql-core
//!
//! A PartiQL lexer, parser and AST.
//!
//! This crate provides:
//! - A hand-written recursive descent parser with Pratt expression parsing
//! - Query, DML, DDL and `EXEC` statements, including graph `MATCH` patterns
//! - Two grammar targets (legacy and extended) producing the same AST
//! - Structured errors carrying a code, a position and the offending token
//! - A canonical S-expression form of the AST, with a reader
//!
//! ## Parsing
//!
//! ```rust
//! use oxide_partiql_core::{parse, StatementKind};
//!
//! let stmt = parse("SELECT a, b FROM stuff s CROSS JOIN @s WHERE f(s)").unwrap();
//! assert!(matches!(stmt.kind, StatementKind::Query(_)));
//! assert_eq!(stmt.location.line, 1);
//! ```
//!
//! ## Grammar targets
//!
//! ```rust
//! use oxide_partiql_core::{DialectKind, ErrorCode, ParserConfig, parse_with};
//!
//! let legacy = ParserConfig::new().with_dialect(DialectKind::Legacy);
//! let err = parse_with("CREATE TABLE a.b", legacy).unwrap_err();
//! assert_eq!(err.code, ErrorCode::ParseUnexpectedToken);
//! assert_eq!(err.token_value, ".");
//!
//! assert!(parse_with("CREATE TABLE a.b", ParserConfig::default()).is_ok());
//! ```

pub mod ast;
pub mod config;
pub mod dialect;
pub mod lexer;
pub mod parser;
pub mod sexp;

pub use ast::{Expr, Statement, StatementKind};
pub use config::ParserConfig;
pub use dialect::{Dialect, DialectKind};
pub use lexer::{Lexer, SourceLocation, Token, TokenKind};
pub use parser::{ErrorCode, ParseError, Parser};
pub use sexp::{SExpr, ToSexpr};

/// Parses a single statement with the default configuration.
///
/// # Errors
///
/// Returns the first lexical or syntax error in `source`.
pub fn parse(source: &str) -> Result<Statement, ParseError> {
    Parser::new(source).parse_statement()
}

/// Parses a single statement with an explicit configuration.
///
/// # Errors
///
/// Returns the first lexical or syntax error in `source`.
pub fn parse_with(source: &str, config: ParserConfig) -> Result<Statement, ParseError> {
    Parser::with_config(source, config).parse_statement()
}
