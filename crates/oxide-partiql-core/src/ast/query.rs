//! SELECT query AST types.

use super::expression::{Expr, SetQuantifier};
use crate::lexer::SourceLocation;

/// The projection of a SELECT or PIVOT query.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// `SELECT *`
    Star,
    /// `SELECT VALUE e`
    Value(Expr),
    /// `SELECT item, ...`
    List(Vec<ProjectItem>),
    /// `PIVOT value AT key`
    Pivot {
        /// The value of each generated field.
        value: Expr,
        /// The name of each generated field.
        key: Expr,
    },
}

/// An item of a projection list.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectItem {
    /// `e [AS alias]`
    Expr { expr: Expr, alias: Option<String> },
    /// `e.*`
    All(Expr),
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Comma, CROSS JOIN or [INNER] JOIN.
    Inner,
    /// LEFT [OUTER] JOIN or LEFT CROSS JOIN.
    Left,
    /// RIGHT [OUTER] JOIN.
    Right,
    /// FULL [OUTER] JOIN or OUTER JOIN.
    Full,
}

impl JoinKind {
    /// Returns the node tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "inner",
            Self::Left => "left",
            Self::Right => "right",
            Self::Full => "full",
        }
    }
}

/// A FROM-clause source.
#[derive(Debug, Clone, PartialEq)]
pub enum FromSource {
    /// `e [AS a] [AT p] [BY b]`
    Scan {
        expr: Expr,
        as_alias: Option<String>,
        at_alias: Option<String>,
        by_alias: Option<String>,
    },
    /// `UNPIVOT e [AS a] [AT p] [BY b]`
    Unpivot {
        expr: Expr,
        as_alias: Option<String>,
        at_alias: Option<String>,
        by_alias: Option<String>,
    },
    /// A join of two sources; joins nest to the left.
    Join {
        kind: JoinKind,
        left: Box<FromSource>,
        right: Box<FromSource>,
        predicate: Option<Expr>,
    },
}

impl FromSource {
    /// Creates a scan without aliases.
    #[must_use]
    pub const fn scan(expr: Expr) -> Self {
        Self::Scan {
            expr,
            as_alias: None,
            at_alias: None,
            by_alias: None,
        }
    }
}

/// A `LET e AS name` binding.
#[derive(Debug, Clone, PartialEq)]
pub struct LetBinding {
    /// The bound expression.
    pub expr: Expr,
    /// The binding name.
    pub name: String,
}

/// Whether GROUP BY was written with PARTIAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingStrategy {
    Full,
    Partial,
}

/// A GROUP BY key.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupKey {
    /// The key expression.
    pub expr: Expr,
    /// The key alias.
    pub alias: Option<String>,
}

/// A GROUP BY clause.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBy {
    /// FULL or PARTIAL grouping.
    pub strategy: GroupingStrategy,
    /// Grouping keys.
    pub keys: Vec<GroupKey>,
    /// `GROUP AS` alias.
    pub group_as: Option<String>,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingSpec {
    Asc,
    Desc,
}

/// Placement of NULLs in a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsSpec {
    First,
    Last,
}

/// One ORDER BY entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    /// The sort key.
    pub expr: Expr,
    /// ASC or DESC when written.
    pub ordering: Option<OrderingSpec>,
    /// NULLS FIRST or NULLS LAST when written.
    pub nulls: Option<NullsSpec>,
}

/// An ORDER BY clause.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// Sort specifications in source order.
    pub sort_specs: Vec<SortSpec>,
    /// Position of the ORDER keyword.
    pub location: SourceLocation,
}

/// A SELECT or PIVOT query.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// DISTINCT or ALL when written.
    pub quantifier: Option<SetQuantifier>,
    /// The projection.
    pub project: Projection,
    /// The FROM source.
    pub from: FromSource,
    /// LET bindings.
    pub from_let: Vec<LetBinding>,
    /// WHERE condition.
    pub where_clause: Option<Expr>,
    /// GROUP BY clause.
    pub group_by: Option<GroupBy>,
    /// HAVING condition.
    pub having: Option<Expr>,
    /// ORDER BY clause.
    pub order_by: Option<OrderBy>,
    /// LIMIT expression.
    pub limit: Option<Expr>,
    /// OFFSET expression.
    pub offset: Option<Expr>,
}

impl Select {
    /// Creates a query with only a projection and a source.
    #[must_use]
    pub const fn new(project: Projection, from: FromSource) -> Self {
        Self {
            quantifier: None,
            project,
            from,
            from_let: Vec::new(),
            where_clause: None,
            group_by: None,
            having: None,
            order_by: None,
            limit: None,
            offset: None,
        }
    }
}
