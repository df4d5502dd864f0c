//! Abstract Syntax Tree (AST) types for PartiQL statements.

mod ddl;
mod dml;
mod expression;
mod graph;
mod query;
mod types;

pub use ddl::{
    ColumnConstraint, ColumnConstraintDef, ColumnDeclaration, DdlOp, Identifier,
    TableConstraint, TableConstraintDef, TableDefPart, TableName,
};
pub use dml::{
    Assignment, ConflictAction, Dml, DmlOp, OnConflict, Returning, ReturningColumn,
    ReturningElem, ReturningMapping,
};
pub use expression::{
    BagOpKind, BinaryOp, CaseSensitivity, CastKind, Expr, Literal, PathStep, ScopeQualifier,
    SetQuantifier, UnaryOp,
};
pub use graph::{
    EdgeDirection, EdgePattern, GraphMatch, GraphPattern, GraphSelector, LabelSpec, NodePattern,
    PatternPart, Quantifier, Restrictor,
};
pub use query::{
    FromSource, GroupBy, GroupKey, GroupingStrategy, JoinKind, LetBinding, NullsSpec,
    OrderBy, OrderingSpec, Projection, ProjectItem, Select, SortSpec,
};
pub use types::Type;

use crate::lexer::SourceLocation;

/// `EXEC name args...`
#[derive(Debug, Clone, PartialEq)]
pub struct Exec {
    /// Procedure name as written.
    pub procedure: String,
    /// Arguments.
    pub args: Vec<Expr>,
}

/// The kind of a top-level statement.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// A query: SELECT, PIVOT, bag operator or bare expression.
    Query(Expr),
    /// A data-manipulation statement.
    Dml(Box<Dml>),
    /// A data-definition statement.
    Ddl(DdlOp),
    /// A stored procedure call.
    Exec(Exec),
}

impl StatementKind {
    /// Returns a short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Query(_) => "query",
            Self::Dml(_) => "dml",
            Self::Ddl(_) => "ddl",
            Self::Exec(_) => "exec",
        }
    }
}

/// A parsed statement with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// The statement itself.
    pub kind: StatementKind,
    /// Position and length of the statement text, excluding a trailing `;`.
    pub location: SourceLocation,
}
