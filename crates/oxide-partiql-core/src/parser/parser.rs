//! PartiQL parser: token cursor, statement dispatch and shared helpers.
//!
//! Grammar productions live in sibling modules (`expr`, `query`, `dml`,
//! `ddl`, `graph`) as further `impl Parser` blocks.

use tracing::{debug, debug_span, trace};

use super::error::{ErrorCode, ParseError, Property, PropertyValue};
use crate::ast::{CaseSensitivity, Exec, Statement, StatementKind};
use crate::config::ParserConfig;
use crate::dialect::Dialect;
use crate::lexer::{Keyword, Lexer, SourceLocation, Token, TokenKind};

/// PartiQL Parser.
pub struct Parser<'a> {
    source: &'a str,
    config: ParserConfig,
    pub(super) dialect: &'static dyn Dialect,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    /// Parameter counter for ? placeholders.
    param_counter: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input with the default configuration.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self::with_config(source, ParserConfig::default())
    }

    /// Creates a new parser with an explicit configuration.
    #[must_use]
    pub fn with_config(source: &'a str, config: ParserConfig) -> Self {
        Self {
            source,
            config,
            dialect: config.dialect.dialect(),
            tokens: Vec::new(),
            pos: 0,
            depth: 0,
            param_counter: 0,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses a single statement, optionally followed by `;`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` describing the first lexical or syntax
    /// error in the input.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let span = debug_span!(
            "parse",
            dialect = self.dialect.name(),
            len = self.source.len()
        );
        let _enter = span.enter();

        let result = self.parse_statement_inner();
        match &result {
            Ok(stmt) => debug!(kind = stmt.kind.name(), "parsed statement"),
            Err(err) => debug!(
                code = %err.code,
                line = err.line,
                column = err.column,
                token = %err.token_value,
                "parse failed"
            ),
        }
        result
    }

    fn parse_statement_inner(&mut self) -> Result<Statement, ParseError> {
        self.tokens = Lexer::new(self.source).tokenize()?;
        self.pos = 0;
        self.depth = 0;
        self.param_counter = 0;
        trace!(tokens = self.tokens.len(), "tokenized");

        let kind = match self.peek_kind() {
            TokenKind::Keyword(
                Keyword::Insert
                | Keyword::Update
                | Keyword::Delete
                | Keyword::Set
                | Keyword::Remove
                | Keyword::Replace
                | Keyword::Upsert
                | Keyword::From,
            ) => StatementKind::Dml(Box::new(self.parse_dml()?)),
            TokenKind::Keyword(Keyword::Create | Keyword::Drop) => {
                StatementKind::Ddl(self.parse_ddl()?)
            }
            TokenKind::Keyword(Keyword::Exec) => StatementKind::Exec(self.parse_exec()?),
            _ => StatementKind::Query(self.parse_query()?),
        };
        let location = self.location_from(0);

        self.eat(&TokenKind::Semicolon);
        if !self.peek().is_eof() {
            return Err(ParseError::expected("end of statement", self.peek()));
        }
        Ok(Statement { kind, location })
    }

    /// Parses `EXEC name [arg, ...]`.
    fn parse_exec(&mut self) -> Result<Exec, ParseError> {
        self.expect_keyword(Keyword::Exec)?;
        let procedure = self.parse_symbol()?;
        let mut args = Vec::new();
        if !self.check(&TokenKind::Semicolon) && !self.peek().is_eof() {
            args.push(self.parse_expression()?);
            while self.eat(&TokenKind::Comma) {
                args.push(self.parse_expression()?);
            }
        }
        Ok(Exec { procedure, args })
    }

    // --- Cursor ---

    /// Returns the current token.
    pub(super) fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub(super) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    /// Returns the token `n` positions ahead, or EOF past the end.
    pub(super) fn nth(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    /// Consumes and returns the current token. EOF is never consumed.
    pub(super) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    /// Checks if the current token matches the given kind.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(self.peek_kind()) == core::mem::discriminant(kind)
    }

    /// Checks if the token `n` positions ahead matches the given kind.
    pub(super) fn check_nth(&self, n: usize, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.nth(n).kind) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.peek().as_keyword() == Some(keyword)
    }

    /// Checks if the token `n` positions ahead is the given keyword.
    pub(super) fn check_nth_keyword(&self, n: usize, keyword: Keyword) -> bool {
        self.nth(n).as_keyword() == Some(keyword)
    }

    /// Consumes the current token if it matches the given kind.
    pub(super) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is the given keyword.
    pub(super) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expects the current token to be the given kind.
    pub(super) fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::expected(kind.description(), self.peek()))
        }
    }

    /// Expects the current token to be the given keyword.
    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(ParseError::expected(keyword.as_str(), self.peek()))
        }
    }

    /// Returns an "unexpected token" error at the current token.
    pub(super) fn unexpected(&self) -> ParseError {
        ParseError::unexpected(self.peek())
    }

    /// Index of the current token, for [`Self::location_from`].
    pub(super) const fn position(&self) -> usize {
        self.pos
    }

    /// Location covering the tokens from `start` up to the last consumed one.
    pub(super) fn location_from(&self, start: usize) -> SourceLocation {
        let first = &self.tokens[start];
        let last = if self.pos > start {
            &self.tokens[self.pos - 1]
        } else {
            first
        };
        let span = first.span.merge(last.span);
        SourceLocation::new(first.line, first.column, span.end - span.start)
    }

    /// Enters `cost` nesting levels, failing past the configured limit.
    pub(super) fn enter(&mut self, cost: usize) -> Result<(), ParseError> {
        if self.depth.saturating_add(cost) > self.config.max_depth {
            let max = i64::try_from(self.config.max_depth).unwrap_or(i64::MAX);
            return Err(ParseError::at(ErrorCode::ParseNestingTooDeep, self.peek())
                .with_property(Property::MaxDepth, PropertyValue::Integer(max)));
        }
        self.depth += cost;
        Ok(())
    }

    /// Leaves levels taken by a successful [`Self::enter`].
    pub(super) fn leave(&mut self, cost: usize) {
        self.depth -= cost;
    }

    /// Runs `f` `cost` nesting levels deeper.
    pub(super) fn nested<T>(
        &mut self,
        cost: usize,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.enter(cost)?;
        let result = f(self);
        self.leave(cost);
        result
    }

    /// Returns the 1-based index of the next `?` parameter.
    pub(super) fn next_parameter(&mut self) -> usize {
        self.param_counter += 1;
        self.param_counter
    }

    // --- Identifiers ---

    /// Returns true if the kind can be used as a name.
    pub(super) const fn is_name(kind: &TokenKind) -> bool {
        match kind {
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_) => true,
            TokenKind::Keyword(kw) => !kw.is_reserved(),
            _ => false,
        }
    }

    /// Consumes a name, returning it with its case sensitivity.
    pub(super) fn parse_name(&mut self) -> Result<(String, CaseSensitivity), ParseError> {
        let token = self.peek();
        let name = match &token.kind {
            TokenKind::QuotedIdentifier(name) => (name.clone(), CaseSensitivity::CaseSensitive),
            kind if Self::is_name(kind) => (token.text.clone(), CaseSensitivity::CaseInsensitive),
            _ => return Err(ParseError::expected("identifier", token)),
        };
        self.advance();
        Ok(name)
    }

    /// Consumes a name used as a symbol (alias, column or procedure name).
    pub(super) fn parse_symbol(&mut self) -> Result<String, ParseError> {
        Ok(self.parse_name()?.0)
    }

    /// Parses `[AS] alias`, where AS may be omitted.
    pub(super) fn parse_optional_alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.eat_keyword(Keyword::As) {
            return self.parse_symbol().map(Some);
        }
        if Self::is_name(self.peek_kind()) {
            return self.parse_symbol().map(Some);
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::DialectKind;

    fn parse(sql: &str) -> Result<Statement, ParseError> {
        Parser::new(sql).parse_statement()
    }

    #[test]
    fn test_statement_dispatch() {
        assert!(matches!(parse("SELECT * FROM t").unwrap().kind, StatementKind::Query(_)));
        assert!(matches!(parse("DELETE FROM t").unwrap().kind, StatementKind::Dml(_)));
        assert!(matches!(parse("DROP TABLE t").unwrap().kind, StatementKind::Ddl(_)));
        assert!(matches!(parse("EXEC foo 1, 2").unwrap().kind, StatementKind::Exec(_)));
    }

    #[test]
    fn test_trailing_semicolon() {
        assert_eq!(parse("1;").unwrap(), parse("1").unwrap());
        let err = parse("1; 2").unwrap_err();
        assert_eq!(err.code, ErrorCode::ParseUnexpectedToken);
        assert_eq!(err.token_value, "2");
    }

    #[test]
    fn test_statement_location() {
        let stmt = parse("  SELECT a\n FROM b ;").unwrap();
        assert_eq!(stmt.location, SourceLocation::new(1, 3, 16));
    }

    #[test]
    fn test_exec_without_args() {
        assert_eq!(parse("EXEC foo").unwrap().to_string(), "(exec foo)");
    }

    #[test]
    fn test_config_is_kept() {
        let config = ParserConfig::new().with_dialect(DialectKind::Legacy);
        let parser = Parser::with_config("1", config);
        assert_eq!(parser.config().dialect, DialectKind::Legacy);
    }

    #[test]
    fn test_parser_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Parser<'static>>();
    }
}
