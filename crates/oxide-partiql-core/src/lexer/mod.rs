//! PartiQL Lexer/Tokenizer
//!
//! A hand-written lexer that produces a stream of tokens with line and
//! column positions.

mod span;
mod token;
mod tokenizer;

pub use span::{SourceLocation, Span};
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
