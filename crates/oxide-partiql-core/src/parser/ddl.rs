//! DDL statements: CREATE/DROP TABLE and CREATE/DROP INDEX.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    ColumnConstraint, ColumnConstraintDef, ColumnDeclaration, DdlOp, Expr, Identifier,
    TableConstraint, TableConstraintDef, TableDefPart, TableName,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses a CREATE or DROP statement.
    pub(super) fn parse_ddl(&mut self) -> Result<DdlOp, ParseError> {
        if self.eat_keyword(Keyword::Create) {
            if self.eat_keyword(Keyword::Table) {
                let name = self.parse_table_name()?;
                let def = if self.check(&TokenKind::LeftParen) {
                    Some(self.parse_table_def()?)
                } else {
                    None
                };
                return Ok(DdlOp::CreateTable { name, def });
            }
            self.expect_keyword(Keyword::Index)?;
            self.expect_keyword(Keyword::On)?;
            let table = self.parse_identifier()?;
            self.expect(&TokenKind::LeftParen)?;
            let mut keys = vec![self.parse_postfix()?];
            while self.eat(&TokenKind::Comma) {
                keys.push(self.parse_postfix()?);
            }
            self.expect(&TokenKind::RightParen)?;
            return Ok(DdlOp::CreateIndex { table, keys });
        }

        self.expect_keyword(Keyword::Drop)?;
        if self.eat_keyword(Keyword::Table) {
            let name = self.parse_table_name()?;
            return Ok(DdlOp::DropTable { name });
        }
        self.expect_keyword(Keyword::Index)?;
        let index = self.parse_identifier()?;
        self.expect_keyword(Keyword::On)?;
        let table = self.parse_identifier()?;
        Ok(DdlOp::DropIndex { table, index })
    }

    fn parse_identifier(&mut self) -> Result<Identifier, ParseError> {
        let (name, case) = self.parse_name()?;
        Ok(Identifier::new(name, case))
    }

    /// Parses `[prefix.]*name`. Qualified names are dialect-gated.
    fn parse_table_name(&mut self) -> Result<TableName, ParseError> {
        let mut parts = vec![self.parse_identifier()?];
        while self.check(&TokenKind::Dot) {
            if !self.dialect.supports_qualified_table_names() {
                return Err(self.unexpected());
            }
            self.advance();
            parts.push(self.parse_identifier()?);
        }
        let name = parts.pop().ok_or_else(|| self.unexpected())?;
        Ok(TableName {
            prefix: parts,
            name,
        })
    }

    /// Parses `( part, ... )` after CREATE TABLE name.
    fn parse_table_def(&mut self) -> Result<Vec<TableDefPart>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut parts = Vec::new();
        loop {
            parts.push(self.parse_table_def_part()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(parts)
    }

    fn parse_table_def_part(&mut self) -> Result<TableDefPart, ParseError> {
        let is_constraint = matches!(
            self.peek().as_keyword(),
            Some(Keyword::Constraint | Keyword::Check | Keyword::Unique | Keyword::Primary)
        );
        if !is_constraint {
            return Ok(TableDefPart::Column(self.parse_column_declaration()?));
        }
        if !self.dialect.supports_extended_constraints() {
            return Err(self.unexpected());
        }

        let name = self.parse_constraint_name()?;
        let def = match self.peek().as_keyword() {
            Some(Keyword::Check) => {
                self.advance();
                TableConstraintDef::Check(self.parse_check_body()?)
            }
            Some(Keyword::Unique) => {
                self.advance();
                TableConstraintDef::Unique(self.parse_column_list()?)
            }
            Some(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                TableConstraintDef::PrimaryKey(self.parse_column_list()?)
            }
            _ => return Err(ParseError::expected("CHECK, UNIQUE or PRIMARY KEY", self.peek())),
        };
        Ok(TableDefPart::Constraint(TableConstraint { name, def }))
    }

    /// Parses an optional `CONSTRAINT name`.
    fn parse_constraint_name(&mut self) -> Result<Option<String>, ParseError> {
        if self.eat_keyword(Keyword::Constraint) {
            Ok(Some(self.parse_symbol()?))
        } else {
            Ok(None)
        }
    }

    fn parse_check_body(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let condition = self.parse_expression()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(condition)
    }

    fn parse_column_list(&mut self) -> Result<Vec<Identifier>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut columns = vec![self.parse_identifier()?];
        while self.eat(&TokenKind::Comma) {
            columns.push(self.parse_identifier()?);
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(columns)
    }

    /// Parses `name type constraint...`.
    fn parse_column_declaration(&mut self) -> Result<ColumnDeclaration, ParseError> {
        let name = self.parse_symbol()?;
        let ty = self.parse_type()?;
        let mut constraints = Vec::new();
        while let Some(constraint) = self.parse_column_constraint()? {
            constraints.push(constraint);
        }
        Ok(ColumnDeclaration {
            name,
            ty,
            constraints,
        })
    }

    fn parse_column_constraint(&mut self) -> Result<Option<ColumnConstraint>, ParseError> {
        let named = self.check_keyword(Keyword::Constraint);
        let extended = matches!(
            self.peek().as_keyword(),
            Some(Keyword::Unique | Keyword::Primary | Keyword::Check)
        );
        if (named || extended) && !self.dialect.supports_extended_constraints() {
            return Err(self.unexpected());
        }

        let name = self.parse_constraint_name()?;
        let def = match self.peek().as_keyword() {
            Some(Keyword::Not) => {
                self.advance();
                self.expect_keyword(Keyword::Null)?;
                ColumnConstraintDef::NotNull
            }
            Some(Keyword::Null) => {
                self.advance();
                ColumnConstraintDef::Null
            }
            Some(Keyword::Unique) => {
                self.advance();
                ColumnConstraintDef::Unique
            }
            Some(Keyword::Primary) => {
                self.advance();
                self.expect_keyword(Keyword::Key)?;
                ColumnConstraintDef::PrimaryKey
            }
            Some(Keyword::Check) => {
                self.advance();
                ColumnConstraintDef::Check(self.parse_check_body()?)
            }
            _ if name.is_some() => {
                return Err(ParseError::expected("column constraint", self.peek()));
            }
            _ => return Ok(None),
        };
        Ok(Some(ColumnConstraint { name, def }))
    }
}
