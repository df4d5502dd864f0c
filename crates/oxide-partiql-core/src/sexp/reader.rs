//! Reader for the S-expression mini-format.

use super::SExpr;

/// Errors raised while reading S-expression text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    /// The input ended inside a form.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// A character that cannot start or continue a form.
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },
    /// A string or quoted symbol without its closing quote.
    #[error("unterminated {what} starting at offset {offset}")]
    Unterminated { what: &'static str, offset: usize },
    /// Text after the first complete form.
    #[error("trailing input at offset {offset}")]
    Trailing { offset: usize },
}

/// Reads exactly one S-expression from `text`, ignoring whitespace.
///
/// # Errors
///
/// Returns a [`ReadError`] when `text` is not a single well-formed form.
pub fn parse(text: &str) -> Result<SExpr, ReadError> {
    let mut reader = Reader { text, pos: 0 };
    let value = reader.read()?;
    reader.skip_whitespace();
    if reader.pos < text.len() {
        return Err(ReadError::Trailing { offset: reader.pos });
    }
    Ok(value)
}

struct Reader<'a> {
    text: &'a str,
    pos: usize,
}

impl Reader<'_> {
    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn read(&mut self) -> Result<SExpr, ReadError> {
        self.skip_whitespace();
        let start = self.pos;
        match self.peek() {
            None => Err(ReadError::UnexpectedEof),
            Some('(') => {
                self.bump();
                let mut items = Vec::new();
                loop {
                    self.skip_whitespace();
                    match self.peek() {
                        Some(')') => {
                            self.bump();
                            return Ok(SExpr::List(items));
                        }
                        None => return Err(ReadError::UnexpectedEof),
                        Some(_) => items.push(self.read()?),
                    }
                }
            }
            Some('"') => Ok(SExpr::String(self.read_quoted('"', "string")?)),
            Some('\'') => Ok(SExpr::Symbol(self.read_quoted('\'', "symbol")?)),
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' => {
                self.bump();
                while self
                    .peek()
                    .is_some_and(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-'))
                {
                    self.bump();
                }
                let text = &self.text[start..self.pos];
                if text.len() == 1 && !c.is_ascii_digit() {
                    return Err(ReadError::UnexpectedChar { ch: c, offset: start });
                }
                Ok(SExpr::Number(text.to_string()))
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
                while self
                    .peek()
                    .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
                {
                    self.bump();
                }
                let text = &self.text[start..self.pos];
                if text == "null" {
                    Ok(SExpr::Null)
                } else {
                    Ok(SExpr::Symbol(text.to_string()))
                }
            }
            Some(ch) => Err(ReadError::UnexpectedChar { ch, offset: start }),
        }
    }

    fn read_quoted(&mut self, quote: char, what: &'static str) -> Result<String, ReadError> {
        let start = self.pos;
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some(c) => value.push(c),
                    None => return Err(ReadError::Unterminated { what, offset: start }),
                },
                Some(c) if c == quote => return Ok(value),
                Some(c) => value.push(c),
                None => return Err(ReadError::Unterminated { what, offset: start }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_nested() {
        let value = parse("(scan (id t (case_insensitive) (unqualified)) null null null)").unwrap();
        assert_eq!(value.head(), Some("scan"));
        let SExpr::List(items) = value else {
            panic!("expected a list");
        };
        assert_eq!(items.len(), 5);
        assert_eq!(items[2], SExpr::Null);
    }

    #[test]
    fn test_whitespace_insensitive() {
        assert_eq!(
            parse("(lit\n   1 )").unwrap(),
            parse("(lit 1)").unwrap()
        );
    }

    #[test]
    fn test_atoms() {
        assert_eq!(parse("-1.5e3").unwrap(), SExpr::Number("-1.5e3".into()));
        assert_eq!(parse("\"a\\\"b\"").unwrap(), SExpr::String("a\"b".into()));
        assert_eq!(parse("'my col'").unwrap(), SExpr::Symbol("my col".into()));
        assert_eq!(parse("'null'").unwrap(), SExpr::Symbol("null".into()));
        assert_eq!(parse("null").unwrap(), SExpr::Null);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse("(lit 1"), Err(ReadError::UnexpectedEof));
        assert_eq!(parse("(a) b"), Err(ReadError::Trailing { offset: 4 }));
        assert_eq!(
            parse("\"abc"),
            Err(ReadError::Unterminated {
                what: "string",
                offset: 0
            })
        );
        assert_eq!(parse("#"), Err(ReadError::UnexpectedChar { ch: '#', offset: 0 }));
    }

    #[test]
    fn test_render_reads_back() {
        let value = SExpr::node(
            "struct",
            vec![SExpr::node(
                "expr_pair",
                vec![SExpr::string("k\n"), SExpr::symbol("weird name")],
            )],
        );
        assert_eq!(parse(&value.render()), Ok(value));
    }
}
