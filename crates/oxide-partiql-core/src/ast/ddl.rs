//! DDL statement AST types.

use super::expression::{CaseSensitivity, Expr};
use super::types::Type;

/// A DDL identifier (table, index or constraint column name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// Name as written.
    pub name: String,
    /// Case sensitivity tag.
    pub case: CaseSensitivity,
}

impl Identifier {
    /// Creates an identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, case: CaseSensitivity) -> Self {
        Self {
            name: name.into(),
            case,
        }
    }
}

/// A possibly qualified table name, e.g. `catalog."schema".tbl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName {
    /// Qualifying components, outermost first.
    pub prefix: Vec<Identifier>,
    /// The table name itself.
    pub name: Identifier,
}

/// A column constraint body.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnConstraintDef {
    NotNull,
    Null,
    Unique,
    PrimaryKey,
    Check(Expr),
}

/// `[CONSTRAINT name] body` on a column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnConstraint {
    pub name: Option<String>,
    pub def: ColumnConstraintDef,
}

/// A column declaration in CREATE TABLE.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDeclaration {
    /// Column name.
    pub name: String,
    /// Column type.
    pub ty: Type,
    /// Constraints in source order.
    pub constraints: Vec<ColumnConstraint>,
}

/// A table constraint body.
#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraintDef {
    Check(Expr),
    Unique(Vec<Identifier>),
    PrimaryKey(Vec<Identifier>),
}

/// `[CONSTRAINT name] body` at table level.
#[derive(Debug, Clone, PartialEq)]
pub struct TableConstraint {
    pub name: Option<String>,
    pub def: TableConstraintDef,
}

/// An element of a table definition.
#[derive(Debug, Clone, PartialEq)]
pub enum TableDefPart {
    Column(ColumnDeclaration),
    Constraint(TableConstraint),
}

/// A data-definition operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DdlOp {
    /// `CREATE TABLE name [(...)]`
    CreateTable {
        name: TableName,
        def: Option<Vec<TableDefPart>>,
    },
    /// `DROP TABLE name`
    DropTable { name: TableName },
    /// `CREATE INDEX ON table (key, ...)`
    CreateIndex { table: Identifier, keys: Vec<Expr> },
    /// `DROP INDEX index ON table`
    DropIndex { table: Identifier, index: Identifier },
}
