//! Token types for the PartiQL lexer.

use super::Span;

/// PartiQL keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Query
    Select,
    From,
    Where,
    Group,
    By,
    Having,
    Order,
    Limit,
    Offset,
    Let,
    As,
    At,
    Distinct,
    All,
    Value,
    Pivot,
    Unpivot,

    // Joins
    Join,
    Inner,
    Left,
    Right,
    Full,
    Outer,
    Cross,
    On,

    // Bag operators
    Union,
    Intersect,
    Except,

    // Predicates and logic
    And,
    Or,
    Not,
    In,
    Is,
    Like,
    Escape,
    Between,

    // Values
    Null,
    Missing,
    True,
    False,

    // Special forms
    Case,
    When,
    Then,
    Else,
    End,
    Cast,
    CanCast,
    CanLosslessCast,
    Nullif,
    Coalesce,
    Substring,
    Trim,
    Extract,
    For,

    // DML
    Insert,
    Into,
    Update,
    Set,
    Remove,
    Delete,
    Replace,
    Upsert,
    Conflict,
    Do,
    Returning,

    // DDL
    Create,
    Drop,
    Table,
    Index,
    Primary,
    Unique,
    Check,
    Constraint,

    // Misc
    Exec,
    Match,
    Any,
    Asc,
    Desc,

    // Non-reserved
    Acyclic,
    Trail,
    Simple,
    Shortest,
    Excluded,
    Nothing,
    Modified,
    Old,
    New,
    Partial,
    First,
    Last,
    Nulls,
    Key,
    Leading,
    Trailing,
    Both,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SELECT" => Some(Self::Select),
            "FROM" => Some(Self::From),
            "WHERE" => Some(Self::Where),
            "GROUP" => Some(Self::Group),
            "BY" => Some(Self::By),
            "HAVING" => Some(Self::Having),
            "ORDER" => Some(Self::Order),
            "LIMIT" => Some(Self::Limit),
            "OFFSET" => Some(Self::Offset),
            "LET" => Some(Self::Let),
            "AS" => Some(Self::As),
            "AT" => Some(Self::At),
            "DISTINCT" => Some(Self::Distinct),
            "ALL" => Some(Self::All),
            "VALUE" => Some(Self::Value),
            "PIVOT" => Some(Self::Pivot),
            "UNPIVOT" => Some(Self::Unpivot),
            "JOIN" => Some(Self::Join),
            "INNER" => Some(Self::Inner),
            "LEFT" => Some(Self::Left),
            "RIGHT" => Some(Self::Right),
            "FULL" => Some(Self::Full),
            "OUTER" => Some(Self::Outer),
            "CROSS" => Some(Self::Cross),
            "ON" => Some(Self::On),
            "UNION" => Some(Self::Union),
            "INTERSECT" => Some(Self::Intersect),
            "EXCEPT" => Some(Self::Except),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            "IN" => Some(Self::In),
            "IS" => Some(Self::Is),
            "LIKE" => Some(Self::Like),
            "ESCAPE" => Some(Self::Escape),
            "BETWEEN" => Some(Self::Between),
            "NULL" => Some(Self::Null),
            "MISSING" => Some(Self::Missing),
            "TRUE" => Some(Self::True),
            "FALSE" => Some(Self::False),
            "CASE" => Some(Self::Case),
            "WHEN" => Some(Self::When),
            "THEN" => Some(Self::Then),
            "ELSE" => Some(Self::Else),
            "END" => Some(Self::End),
            "CAST" => Some(Self::Cast),
            "CAN_CAST" => Some(Self::CanCast),
            "CAN_LOSSLESS_CAST" => Some(Self::CanLosslessCast),
            "NULLIF" => Some(Self::Nullif),
            "COALESCE" => Some(Self::Coalesce),
            "SUBSTRING" => Some(Self::Substring),
            "TRIM" => Some(Self::Trim),
            "EXTRACT" => Some(Self::Extract),
            "FOR" => Some(Self::For),
            "INSERT" => Some(Self::Insert),
            "INTO" => Some(Self::Into),
            "UPDATE" => Some(Self::Update),
            "SET" => Some(Self::Set),
            "REMOVE" => Some(Self::Remove),
            "DELETE" => Some(Self::Delete),
            "REPLACE" => Some(Self::Replace),
            "UPSERT" => Some(Self::Upsert),
            "CONFLICT" => Some(Self::Conflict),
            "DO" => Some(Self::Do),
            "RETURNING" => Some(Self::Returning),
            "CREATE" => Some(Self::Create),
            "DROP" => Some(Self::Drop),
            "TABLE" => Some(Self::Table),
            "INDEX" => Some(Self::Index),
            "PRIMARY" => Some(Self::Primary),
            "UNIQUE" => Some(Self::Unique),
            "CHECK" => Some(Self::Check),
            "CONSTRAINT" => Some(Self::Constraint),
            "EXEC" => Some(Self::Exec),
            "MATCH" => Some(Self::Match),
            "ANY" => Some(Self::Any),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            "ACYCLIC" => Some(Self::Acyclic),
            "TRAIL" => Some(Self::Trail),
            "SIMPLE" => Some(Self::Simple),
            "SHORTEST" => Some(Self::Shortest),
            "EXCLUDED" => Some(Self::Excluded),
            "NOTHING" => Some(Self::Nothing),
            "MODIFIED" => Some(Self::Modified),
            "OLD" => Some(Self::Old),
            "NEW" => Some(Self::New),
            "PARTIAL" => Some(Self::Partial),
            "FIRST" => Some(Self::First),
            "LAST" => Some(Self::Last),
            "NULLS" => Some(Self::Nulls),
            "KEY" => Some(Self::Key),
            "LEADING" => Some(Self::Leading),
            "TRAILING" => Some(Self::Trailing),
            "BOTH" => Some(Self::Both),
            _ => None,
        }
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Group => "GROUP",
            Self::By => "BY",
            Self::Having => "HAVING",
            Self::Order => "ORDER",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::Let => "LET",
            Self::As => "AS",
            Self::At => "AT",
            Self::Distinct => "DISTINCT",
            Self::All => "ALL",
            Self::Value => "VALUE",
            Self::Pivot => "PIVOT",
            Self::Unpivot => "UNPIVOT",
            Self::Join => "JOIN",
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Full => "FULL",
            Self::Outer => "OUTER",
            Self::Cross => "CROSS",
            Self::On => "ON",
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::In => "IN",
            Self::Is => "IS",
            Self::Like => "LIKE",
            Self::Escape => "ESCAPE",
            Self::Between => "BETWEEN",
            Self::Null => "NULL",
            Self::Missing => "MISSING",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Case => "CASE",
            Self::When => "WHEN",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::End => "END",
            Self::Cast => "CAST",
            Self::CanCast => "CAN_CAST",
            Self::CanLosslessCast => "CAN_LOSSLESS_CAST",
            Self::Nullif => "NULLIF",
            Self::Coalesce => "COALESCE",
            Self::Substring => "SUBSTRING",
            Self::Trim => "TRIM",
            Self::Extract => "EXTRACT",
            Self::For => "FOR",
            Self::Insert => "INSERT",
            Self::Into => "INTO",
            Self::Update => "UPDATE",
            Self::Set => "SET",
            Self::Remove => "REMOVE",
            Self::Delete => "DELETE",
            Self::Replace => "REPLACE",
            Self::Upsert => "UPSERT",
            Self::Conflict => "CONFLICT",
            Self::Do => "DO",
            Self::Returning => "RETURNING",
            Self::Create => "CREATE",
            Self::Drop => "DROP",
            Self::Table => "TABLE",
            Self::Index => "INDEX",
            Self::Primary => "PRIMARY",
            Self::Unique => "UNIQUE",
            Self::Check => "CHECK",
            Self::Constraint => "CONSTRAINT",
            Self::Exec => "EXEC",
            Self::Match => "MATCH",
            Self::Any => "ANY",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Acyclic => "ACYCLIC",
            Self::Trail => "TRAIL",
            Self::Simple => "SIMPLE",
            Self::Shortest => "SHORTEST",
            Self::Excluded => "EXCLUDED",
            Self::Nothing => "NOTHING",
            Self::Modified => "MODIFIED",
            Self::Old => "OLD",
            Self::New => "NEW",
            Self::Partial => "PARTIAL",
            Self::First => "FIRST",
            Self::Last => "LAST",
            Self::Nulls => "NULLS",
            Self::Key => "KEY",
            Self::Leading => "LEADING",
            Self::Trailing => "TRAILING",
            Self::Both => "BOTH",
        }
    }

    /// Returns true if the keyword can never be used as an unquoted
    /// identifier.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        !matches!(
            self,
            Self::Acyclic
                | Self::Trail
                | Self::Simple
                | Self::Shortest
                | Self::Excluded
                | Self::Nothing
                | Self::Modified
                | Self::Old
                | Self::New
                | Self::Partial
                | Self::First
                | Self::Last
                | Self::Nulls
                | Self::Key
                | Self::Leading
                | Self::Trailing
                | Self::Both
        )
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals. Numeric literals keep their source digits; the parser
    // converts them so a leading `-` can be folded in first.
    /// Integer literal (e.g., 42)
    Integer(String),
    /// Decimal literal (e.g., 4.2)
    Decimal(String),
    /// Float literal with an exponent (e.g., 4.2e1)
    Float(String),
    /// String literal (e.g., 'hello')
    String(String),
    /// Ion literal between backticks, without the backticks
    Ion(String),

    // Identifiers and keywords
    /// Unquoted identifier (case-insensitive)
    Identifier(String),
    /// Double-quoted identifier (case-sensitive)
    QuotedIdentifier(String),
    /// Keyword
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    Concat,
    /// |
    Pipe,
    /// &
    Ampersand,
    /// !
    Bang,
    /// ~
    Tilde,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// <<
    LeftDoubleAngle,
    /// >>
    RightDoubleAngle,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// :
    Colon,
    /// ?
    Question,
    /// @
    At,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Returns the display name used in diagnostics (`TOKEN_DESCRIPTION`).
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Integer(_) => "LITERAL_INTEGER",
            Self::Decimal(_) => "LITERAL_DECIMAL",
            Self::Float(_) => "LITERAL_FLOAT",
            Self::String(_) => "LITERAL_STRING",
            Self::Ion(_) => "ION_CLOSURE",
            Self::Identifier(_) => "IDENTIFIER",
            Self::QuotedIdentifier(_) => "IDENTIFIER_QUOTED",
            Self::Keyword(kw) => kw.as_str(),
            Self::Plus => "PLUS",
            Self::Minus => "MINUS",
            Self::Star => "ASTERISK",
            Self::Slash => "SLASH_FORWARD",
            Self::Percent => "PERCENT",
            Self::Eq => "EQ",
            Self::NotEq => "NEQ",
            Self::Lt => "ANGLE_LEFT",
            Self::LtEq => "LT_EQ",
            Self::Gt => "ANGLE_RIGHT",
            Self::GtEq => "GT_EQ",
            Self::Concat => "CONCAT",
            Self::Pipe => "VERTBAR",
            Self::Ampersand => "AMPERSAND",
            Self::Bang => "BANG",
            Self::Tilde => "TILDE",
            Self::LeftParen => "PAREN_LEFT",
            Self::RightParen => "PAREN_RIGHT",
            Self::LeftBracket => "BRACKET_LEFT",
            Self::RightBracket => "BRACKET_RIGHT",
            Self::LeftBrace => "BRACE_LEFT",
            Self::RightBrace => "BRACE_RIGHT",
            Self::LeftDoubleAngle => "ANGLE_DOUBLE_LEFT",
            Self::RightDoubleAngle => "ANGLE_DOUBLE_RIGHT",
            Self::Comma => "COMMA",
            Self::Semicolon => "COLON_SEMI",
            Self::Dot => "PERIOD",
            Self::Colon => "COLON",
            Self::Question => "QUESTION_MARK",
            Self::At => "AT_SIGN",
            Self::Eof => "EOF",
        }
    }
}

/// A token with its position in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The source text of the token (`<EOF>` for end of input).
    pub text: String,
    /// The byte range in the source text.
    pub span: Span,
    /// 1-based line of the first character.
    pub line: u32,
    /// 1-based column of the first character.
    pub column: u32,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span, line: u32, column: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            line,
            column,
        }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}
