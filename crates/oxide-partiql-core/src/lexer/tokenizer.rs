//! PartiQL tokenizer implementation.

use super::{Keyword, Span, Token, TokenKind};
use crate::parser::{ErrorCode, ParseError};

/// A lexer that tokenizes PartiQL input.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Current 1-based line.
    line: u32,
    /// Current 1-based column, counted in characters.
    column: u32,
    /// Line of the start of the current token.
    start_line: u32,
    /// Column of the start of the current token.
    start_column: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            line: 1,
            column: 1,
            start_line: 1,
            start_column: 1,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Marks the current position as the start of a token.
    fn mark(&mut self) {
        self.start = self.pos;
        self.start_line = self.line;
        self.start_column = self.column;
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), ParseError> {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.mark();
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        Some(_) => {}
                        None => return Err(self.literal_error("COMMENT")),
                    }
                }
                continue;
            }

            return Ok(());
        }
    }

    /// Creates a token spanning from the marked start to the current position.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            &self.input[self.start..self.pos],
            Span::new(self.start, self.pos),
            self.start_line,
            self.start_column,
        )
    }

    /// Error for a literal that runs off the end of the input.
    fn literal_error(&self, description: &str) -> ParseError {
        ParseError::lexer(
            ErrorCode::LexerInvalidLiteral,
            description,
            &self.input[self.start..self.pos],
            self.start_line,
            self.start_column,
        )
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        match Keyword::from_str(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier(text.to_string())),
        }
    }

    /// Scans text enclosed in `quote`, where a doubled quote stands for one.
    fn scan_quoted(&mut self, quote: char, description: &str) -> Result<String, ParseError> {
        self.advance();
        let mut value = String::new();
        loop {
            match self.peek() {
                Some(c) if c == quote => {
                    if self.peek_next() == Some(quote) {
                        value.push(quote);
                        self.advance();
                        self.advance();
                    } else {
                        self.advance();
                        return Ok(value);
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => return Err(self.literal_error(description)),
            }
        }
    }

    /// Scans a backtick-delimited Ion literal, keeping its body verbatim.
    ///
    /// Backticks inside Ion strings, symbols and comments do not close it.
    fn scan_ion(&mut self) -> Result<Token, ParseError> {
        self.advance();
        let body_start = self.pos;
        loop {
            match self.advance() {
                Some('`') => break,
                Some(q @ ('\'' | '"')) => loop {
                    match self.advance() {
                        Some('\\') => {
                            self.advance();
                        }
                        Some(c) if c == q => break,
                        Some(_) => {}
                        None => return Err(self.literal_error("ION_CLOSURE")),
                    }
                },
                Some('/') if self.peek() == Some('/') => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                Some('/') if self.peek() == Some('*') => {
                    self.advance();
                    loop {
                        match self.advance() {
                            Some('*') if self.peek() == Some('/') => {
                                self.advance();
                                break;
                            }
                            Some(_) => {}
                            None => return Err(self.literal_error("ION_CLOSURE")),
                        }
                    }
                }
                Some(_) => {}
                None => return Err(self.literal_error("ION_CLOSURE")),
            }
        }
        let body = self.input[body_start..self.pos - 1].to_string();
        Ok(self.make_token(TokenKind::Ion(body)))
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Returns true if exponent digits start `n` characters ahead: a digit,
    /// or a sign followed by a digit.
    fn exponent_digits_at(&self, n: usize) -> bool {
        let mut chars = self.input[self.pos..].chars().skip(n);
        match chars.next() {
            Some(c) if c.is_ascii_digit() => true,
            Some('+' | '-') => chars.next().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    /// Scans an integer, decimal or float literal.
    ///
    /// `.5` and `5.` are decimals. A `.` followed by a name, `"` or `*`
    /// is left for a path step, so `1.a` is a path on `1`.
    fn scan_number(&mut self) -> Token {
        let mut is_decimal = false;
        let mut is_float = false;

        self.skip_digits();

        if self.peek() == Some('.') {
            let next = self.peek_next();
            let fraction = next.is_some_and(|c| c.is_ascii_digit());
            let exponent = next.is_some_and(|c| c == 'e' || c == 'E') && self.exponent_digits_at(2);
            let path_step =
                next.is_some_and(|c| c.is_alphabetic() || matches!(c, '_' | '$' | '"' | '*'));
            if fraction || exponent || !path_step {
                is_decimal = true;
                self.advance();
                self.skip_digits();
            }
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') && self.exponent_digits_at(1) {
            is_float = true;
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            self.skip_digits();
        }

        let text = self.input[self.start..self.pos].to_string();
        if is_float {
            self.make_token(TokenKind::Float(text))
        } else if is_decimal {
            self.make_token(TokenKind::Decimal(text))
        } else {
            self.make_token(TokenKind::Integer(text))
        }
    }

    /// Consumes `next` if it is the current character.
    fn eat(&mut self, next: char) -> bool {
        if self.peek() == Some(next) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Scans the next token.
    ///
    /// # Errors
    ///
    /// Returns a lexer error for unknown characters and unterminated literals.
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace_and_comments()?;
        self.mark();

        let Some(c) = self.peek() else {
            return Ok(Token::new(
                TokenKind::Eof,
                "<EOF>",
                Span::new(self.pos, self.pos),
                self.line,
                self.column,
            ));
        };

        match c {
            '\'' => {
                let value = self.scan_quoted('\'', "LITERAL_STRING")?;
                return Ok(self.make_token(TokenKind::String(value)));
            }
            '"' => {
                let value = self.scan_quoted('"', "IDENTIFIER_QUOTED")?;
                return Ok(self.make_token(TokenKind::QuotedIdentifier(value)));
            }
            '`' => return self.scan_ion(),
            c if c.is_ascii_digit() => return Ok(self.scan_number()),
            '.' if self.peek_next().is_some_and(|c| c.is_ascii_digit()) => {
                return Ok(self.scan_number());
            }
            c if c.is_alphabetic() || c == '_' || c == '$' => return Ok(self.scan_identifier()),
            _ => {}
        }

        self.advance();
        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            '?' => TokenKind::Question,
            '@' => TokenKind::At,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '=' => TokenKind::Eq,
            '&' => TokenKind::Ampersand,
            '~' => TokenKind::Tilde,
            '<' => {
                if self.eat('=') {
                    TokenKind::LtEq
                } else if self.eat('>') {
                    TokenKind::NotEq
                } else if self.eat('<') {
                    TokenKind::LeftDoubleAngle
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.eat('=') {
                    TokenKind::GtEq
                } else if self.eat('>') {
                    TokenKind::RightDoubleAngle
                } else {
                    TokenKind::Gt
                }
            }
            '!' => {
                if self.eat('=') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            '|' => {
                if self.eat('|') {
                    TokenKind::Concat
                } else {
                    TokenKind::Pipe
                }
            }
            _ => {
                return Err(ParseError::lexer(
                    ErrorCode::LexerInvalidChar,
                    "INVALID_CHAR",
                    c.to_string(),
                    self.start_line,
                    self.start_column,
                ));
            }
        };
        Ok(self.make_token(kind))
    }

    /// Tokenizes the entire input; the last token is always EOF.
    ///
    /// # Errors
    ///
    /// Returns the first lexer error encountered.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }
}
