//! Expression AST types.

use rust_decimal::Decimal;

use super::graph::GraphMatch;
use super::query::Select;
use super::types::Type;

/// Whether an identifier was written quoted (case-sensitive) or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseSensitivity {
    /// Double-quoted identifier.
    CaseSensitive,
    /// Unquoted identifier.
    CaseInsensitive,
}

impl CaseSensitivity {
    /// Returns the tag used in the S-expression form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CaseSensitive => "case_sensitive",
            Self::CaseInsensitive => "case_insensitive",
        }
    }
}

/// Lookup scope of a variable reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeQualifier {
    /// Plain reference.
    Unqualified,
    /// `@name`: resolve against local bindings first.
    LocalsFirst,
}

impl ScopeQualifier {
    /// Returns the tag used in the S-expression form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unqualified => "unqualified",
            Self::LocalsFirst => "locals_first",
        }
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// NULL.
    Null,
    /// MISSING.
    Missing,
    /// TRUE or FALSE.
    Boolean(bool),
    /// Integer literal.
    Integer(i64),
    /// Exact decimal literal.
    Decimal(Decimal),
    /// Approximate literal written with an exponent.
    Float(f64),
    /// String literal.
    String(String),
    /// Backtick-quoted Ion text.
    Ion(String),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Plus,
    Minus,
    Times,
    Divide,
    Modulo,
    Concat,

    // Comparison
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Returns the node tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::Times => "times",
            Self::Divide => "divide",
            Self::Modulo => "modulo",
            Self::Concat => "concat",
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Logical NOT
    Not,
    /// Unary plus
    Pos,
    /// Negation
    Neg,
}

impl UnaryOp {
    /// Returns the node tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Not => "not",
            Self::Pos => "pos",
            Self::Neg => "neg",
        }
    }
}

/// DISTINCT or ALL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetQuantifier {
    All,
    Distinct,
}

impl SetQuantifier {
    /// Returns the node tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Distinct => "distinct",
        }
    }
}

/// Bag operators, including their OUTER forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BagOpKind {
    Union,
    Intersect,
    Except,
    OuterUnion,
    OuterIntersect,
    OuterExcept,
}

impl BagOpKind {
    /// Returns the node tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "union",
            Self::Intersect => "intersect",
            Self::Except => "except",
            Self::OuterUnion => "outer_union",
            Self::OuterIntersect => "outer_intersect",
            Self::OuterExcept => "outer_except",
        }
    }

    /// Returns the OUTER form of this operator.
    #[must_use]
    pub const fn outer(self) -> Self {
        match self {
            Self::Union | Self::OuterUnion => Self::OuterUnion,
            Self::Intersect | Self::OuterIntersect => Self::OuterIntersect,
            Self::Except | Self::OuterExcept => Self::OuterExcept,
        }
    }
}

/// The three CAST-like forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastKind {
    Cast,
    CanCast,
    CanLosslessCast,
}

impl CastKind {
    /// Returns the node tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cast => "cast",
            Self::CanCast => "can_cast",
            Self::CanLosslessCast => "can_lossless_cast",
        }
    }
}

/// One step of a path expression.
#[derive(Debug, Clone, PartialEq)]
pub enum PathStep {
    /// `.name`, `."Name"` or `[expr]`.
    Index {
        /// The field name or index expression.
        index: Expr,
        /// Case sensitivity of the lookup.
        case: CaseSensitivity,
    },
    /// `[*]`
    Wildcard,
    /// `.*`
    Unpivot,
}

/// A PartiQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Lit(Literal),

    /// A variable reference.
    Id {
        /// Name as written.
        name: String,
        /// Case sensitivity tag.
        case: CaseSensitivity,
        /// Scope qualifier.
        qualifier: ScopeQualifier,
    },

    /// Positional parameter `?`, numbered from 1.
    Parameter(usize),

    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },

    /// A binary expression.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },

    /// `value LIKE pattern [ESCAPE escape]`
    Like {
        value: Box<Expr>,
        pattern: Box<Expr>,
        escape: Option<Box<Expr>>,
    },

    /// `value BETWEEN low AND high`
    Between {
        value: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
    },

    /// `value IN collection`
    InCollection {
        value: Box<Expr>,
        collection: Box<Expr>,
    },

    /// `value IS type`
    IsType { value: Box<Expr>, ty: Type },

    /// A path expression.
    Path {
        /// The expression the path starts from.
        root: Box<Expr>,
        /// Steps in source order.
        steps: Vec<PathStep>,
    },

    /// A function call; the name is lowercased.
    Call { name: String, args: Vec<Expr> },

    /// An aggregate call.
    CallAgg {
        /// DISTINCT or ALL (ALL when omitted).
        quantifier: SetQuantifier,
        /// Lowercased aggregate name.
        name: String,
        /// The argument; `COUNT(*)` uses the literal 1.
        arg: Box<Expr>,
    },

    /// `CASE WHEN c THEN r ... [ELSE d] END`
    SearchedCase {
        cases: Vec<(Expr, Expr)>,
        default: Option<Box<Expr>>,
    },

    /// `CASE e WHEN v THEN r ... [ELSE d] END`
    SimpleCase {
        operand: Box<Expr>,
        cases: Vec<(Expr, Expr)>,
        default: Option<Box<Expr>>,
    },

    /// `CAST`, `CAN_CAST` and `CAN_LOSSLESS_CAST`.
    Cast {
        kind: CastKind,
        value: Box<Expr>,
        ty: Type,
    },

    /// `NULLIF(a, b)`
    NullIf { left: Box<Expr>, right: Box<Expr> },

    /// `COALESCE(a, ...)`
    Coalesce(Vec<Expr>),

    /// `{k: v, ...}`
    Struct(Vec<(Expr, Expr)>),

    /// `<<...>>`
    Bag(Vec<Expr>),

    /// `[...]`, `(a, b, ...)` or `LIST(...)`.
    List(Vec<Expr>),

    /// `SEXP(...)`
    Sexp(Vec<Expr>),

    /// A SELECT or PIVOT query.
    Select(Box<Select>),

    /// A bag operator application.
    BagOp {
        op: BagOpKind,
        quantifier: SetQuantifier,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `expr MATCH pattern, ...`
    GraphMatch {
        /// The graph being matched.
        expr: Box<Expr>,
        /// The pattern.
        pattern: GraphMatch,
    },
}

impl Expr {
    /// Creates an unqualified, case-insensitive variable reference.
    #[must_use]
    pub fn id(name: impl Into<String>) -> Self {
        Self::Id {
            name: name.into(),
            case: CaseSensitivity::CaseInsensitive,
            qualifier: ScopeQualifier::Unqualified,
        }
    }

    /// Creates an integer literal.
    #[must_use]
    pub const fn integer(value: i64) -> Self {
        Self::Lit(Literal::Integer(value))
    }

    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Lit(Literal::String(value.into()))
    }

    /// Creates a unary expression.
    #[must_use]
    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            op,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    /// Wraps the expression in NOT.
    #[must_use]
    pub fn not(self) -> Self {
        Self::unary(UnaryOp::Not, self)
    }

    /// Returns true for a numeric literal.
    #[must_use]
    pub const fn is_numeric_literal(&self) -> bool {
        matches!(
            self,
            Self::Lit(Literal::Integer(_) | Literal::Decimal(_) | Literal::Float(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_builder() {
        let id = Expr::id("a");
        assert!(matches!(
            id,
            Expr::Id {
                case: CaseSensitivity::CaseInsensitive,
                qualifier: ScopeQualifier::Unqualified,
                ..
            }
        ));
    }

    #[test]
    fn test_binary_builder() {
        let expr = Expr::id("a").binary(BinaryOp::Plus, Expr::integer(1));
        assert!(matches!(
            expr,
            Expr::Binary {
                op: BinaryOp::Plus,
                ..
            }
        ));
    }

    #[test]
    fn test_outer_bag_ops() {
        assert_eq!(BagOpKind::Union.outer(), BagOpKind::OuterUnion);
        assert_eq!(BagOpKind::OuterExcept.outer().as_str(), "outer_except");
    }

    #[test]
    fn test_numeric_literal_check() {
        assert!(Expr::integer(1).is_numeric_literal());
        assert!(!Expr::string("1").is_numeric_literal());
        assert!(!Expr::unary(UnaryOp::Neg, Expr::integer(1)).is_numeric_literal());
    }
}
