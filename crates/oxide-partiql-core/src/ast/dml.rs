//! DML statement AST types.

use super::expression::Expr;
use super::query::FromSource;

/// A data-manipulation statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Dml {
    /// Operations in source order.
    pub operations: Vec<DmlOp>,
    /// Source of UPDATE, DELETE and FROM-led statements.
    pub from: Option<FromSource>,
    /// WHERE condition.
    pub where_clause: Option<Expr>,
    /// RETURNING clause.
    pub returning: Option<Returning>,
}

/// A single DML operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DmlOp {
    /// `INSERT INTO target [AS alias] values [ON CONFLICT DO ...]`
    Insert {
        target: Expr,
        alias: Option<String>,
        values: Expr,
        conflict_action: Option<ConflictAction>,
    },
    /// `INSERT INTO target VALUE value [AT index] [ON CONFLICT WHERE c DO NOTHING]`
    InsertValue {
        target: Expr,
        value: Expr,
        index: Option<Expr>,
        on_conflict: Option<OnConflict>,
    },
    /// `SET target = value`
    Set(Assignment),
    /// `REMOVE target`
    Remove(Expr),
    /// `DELETE`
    Delete,
}

/// A SET assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// The path being assigned.
    pub target: Expr,
    /// The new value.
    pub value: Expr,
}

/// The `ON CONFLICT WHERE c DO NOTHING` clause of `INSERT ... VALUE`.
#[derive(Debug, Clone, PartialEq)]
pub struct OnConflict {
    /// The conflict condition.
    pub condition: Expr,
}

/// The `ON CONFLICT DO ...` action of `INSERT INTO name expr`.
#[derive(Debug, Clone, PartialEq)]
pub enum ConflictAction {
    /// `DO NOTHING`
    DoNothing,
    /// `DO REPLACE EXCLUDED [WHERE c]`
    DoReplace(Option<Expr>),
    /// `DO UPDATE EXCLUDED [WHERE c]`
    DoUpdate(Option<Expr>),
}

/// Which rows and which version a RETURNING element reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturningMapping {
    ModifiedOld,
    ModifiedNew,
    AllOld,
    AllNew,
}

impl ReturningMapping {
    /// Returns the node tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ModifiedOld => "modified_old",
            Self::ModifiedNew => "modified_new",
            Self::AllOld => "all_old",
            Self::AllNew => "all_new",
        }
    }
}

/// The target of a RETURNING element.
#[derive(Debug, Clone, PartialEq)]
pub enum ReturningColumn {
    /// `*`
    Wildcard,
    /// A column expression.
    Expr(Expr),
}

/// One RETURNING element.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturningElem {
    /// Row and version selector.
    pub mapping: ReturningMapping,
    /// Column or wildcard.
    pub column: ReturningColumn,
}

/// A RETURNING clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Returning {
    /// Elements in source order.
    pub elems: Vec<ReturningElem>,
}
