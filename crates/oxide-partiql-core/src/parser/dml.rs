//! DML statements: INSERT, UPDATE, SET, REMOVE, DELETE and RETURNING.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    Assignment, ConflictAction, Dml, DmlOp, Expr, FromSource, OnConflict, Returning,
    ReturningColumn, ReturningElem, ReturningMapping, ScopeQualifier,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses a DML statement.
    ///
    /// Forms:
    /// - `UPDATE src op... [WHERE c]`
    /// - `FROM src [WHERE c] op...`
    /// - `DELETE FROM src [WHERE c]`
    /// - a single operation (`INSERT`, `SET`, `REMOVE`, `REPLACE`, `UPSERT`)
    ///
    /// each followed by an optional `RETURNING` clause, which must come last.
    pub(super) fn parse_dml(&mut self) -> Result<Dml, ParseError> {
        let mut dml = Dml {
            operations: Vec::new(),
            from: None,
            where_clause: None,
            returning: None,
        };

        match self.peek().as_keyword() {
            Some(Keyword::Update) => {
                self.advance();
                dml.from = Some(self.parse_dml_source()?);
                self.parse_dml_ops(&mut dml.operations)?;
                dml.where_clause = self.parse_dml_where()?;
            }
            Some(Keyword::From) => {
                self.advance();
                dml.from = Some(self.parse_dml_source()?);
                dml.where_clause = self.parse_dml_where()?;
                self.parse_dml_ops(&mut dml.operations)?;
            }
            Some(Keyword::Delete) => {
                self.advance();
                self.expect_keyword(Keyword::From)?;
                dml.from = Some(self.parse_dml_source()?);
                dml.where_clause = self.parse_dml_where()?;
                dml.operations.push(DmlOp::Delete);
            }
            _ => {
                if !self.parse_dml_command(&mut dml.operations)? {
                    return Err(self.unexpected());
                }
            }
        }

        if self.eat_keyword(Keyword::Returning) {
            dml.returning = Some(self.parse_returning()?);
        }

        Ok(dml)
    }

    fn parse_dml_where(&mut self) -> Result<Option<Expr>, ParseError> {
        if self.eat_keyword(Keyword::Where) {
            Ok(Some(self.parse_expression()?))
        } else {
            Ok(None)
        }
    }

    /// Parses the target of UPDATE, FROM and DELETE: a path with aliases.
    fn parse_dml_source(&mut self) -> Result<FromSource, ParseError> {
        let expr = self.parse_postfix()?;
        let (as_alias, at_alias, by_alias) = self.parse_source_aliases()?;
        Ok(FromSource::Scan {
            expr,
            as_alias,
            at_alias,
            by_alias,
        })
    }

    /// Parses one or more operations, keeping their textual order.
    fn parse_dml_ops(&mut self, ops: &mut Vec<DmlOp>) -> Result<(), ParseError> {
        if !self.parse_dml_command(ops)? {
            return Err(self.unexpected());
        }
        while self.parse_dml_command(ops)? {}
        Ok(())
    }

    /// Parses one operation clause. Returns false if none starts here.
    fn parse_dml_command(&mut self, ops: &mut Vec<DmlOp>) -> Result<bool, ParseError> {
        match self.peek().as_keyword() {
            Some(Keyword::Set) => {
                self.advance();
                loop {
                    let target = self.parse_postfix()?;
                    self.expect(&TokenKind::Eq)?;
                    let value = self.parse_expression()?;
                    ops.push(DmlOp::Set(Assignment { target, value }));
                    if !self.eat(&TokenKind::Comma) {
                        break;
                    }
                }
            }
            Some(Keyword::Remove) => {
                self.advance();
                ops.push(DmlOp::Remove(self.parse_postfix()?));
            }
            Some(Keyword::Insert) => {
                self.advance();
                self.expect_keyword(Keyword::Into)?;
                ops.push(self.parse_insert()?);
            }
            Some(Keyword::Replace) => {
                self.advance();
                self.expect_keyword(Keyword::Into)?;
                ops.push(self.parse_insert_shorthand(ConflictAction::DoReplace(None))?);
            }
            Some(Keyword::Upsert) => {
                self.advance();
                self.expect_keyword(Keyword::Into)?;
                ops.push(self.parse_insert_shorthand(ConflictAction::DoUpdate(None))?);
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Parses the table name of a non-legacy insert.
    fn parse_insert_target(&mut self) -> Result<Expr, ParseError> {
        let (name, case) = self.parse_name()?;
        Ok(Expr::Id {
            name,
            case,
            qualifier: ScopeQualifier::Unqualified,
        })
    }

    /// Parses what follows `INSERT INTO`.
    fn parse_insert(&mut self) -> Result<DmlOp, ParseError> {
        let target = self.parse_insert_target()?;
        let is_path = self.check(&TokenKind::Dot) || self.check(&TokenKind::LeftBracket);
        if is_path || self.check_keyword(Keyword::Value) {
            let target = self.parse_path_steps(target)?;
            self.expect_keyword(Keyword::Value)?;
            return self.parse_insert_value(target);
        }

        let alias = self.parse_insert_alias()?;
        let values = self.parse_bag_expr()?;
        let conflict_action = self.parse_conflict_action()?;
        Ok(DmlOp::Insert {
            target,
            alias,
            values,
            conflict_action,
        })
    }

    /// `REPLACE INTO` and `UPSERT INTO`.
    fn parse_insert_shorthand(&mut self, action: ConflictAction) -> Result<DmlOp, ParseError> {
        let target = self.parse_insert_target()?;
        let alias = self.parse_insert_alias()?;
        let values = self.parse_bag_expr()?;
        Ok(DmlOp::Insert {
            target,
            alias,
            values,
            conflict_action: Some(action),
        })
    }

    fn parse_insert_alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.eat_keyword(Keyword::As) {
            Ok(Some(self.parse_symbol()?))
        } else {
            Ok(None)
        }
    }

    /// Legacy `VALUE e [AT pos] [ON CONFLICT WHERE c DO NOTHING]`.
    fn parse_insert_value(&mut self, target: Expr) -> Result<DmlOp, ParseError> {
        let value = self.parse_expression()?;
        let index = if self.eat_keyword(Keyword::At) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        let on_conflict = if self.eat_on_conflict() {
            if !self.eat_keyword(Keyword::Where) {
                return Err(self.unexpected());
            }
            let condition = self.parse_expression()?;
            self.expect_keyword(Keyword::Do)?;
            self.expect_keyword(Keyword::Nothing)?;
            Some(OnConflict { condition })
        } else {
            None
        };

        Ok(DmlOp::InsertValue {
            target,
            value,
            index,
            on_conflict,
        })
    }

    fn eat_on_conflict(&mut self) -> bool {
        if self.check_keyword(Keyword::On) && self.check_nth_keyword(1, Keyword::Conflict) {
            self.advance();
            self.advance();
            true
        } else {
            false
        }
    }

    /// `ON CONFLICT DO NOTHING | DO REPLACE EXCLUDED [WHERE c] |
    /// DO UPDATE EXCLUDED [WHERE c]`
    fn parse_conflict_action(&mut self) -> Result<Option<ConflictAction>, ParseError> {
        if !self.eat_on_conflict() {
            return Ok(None);
        }
        if self.check_keyword(Keyword::Where) {
            return Err(self.unexpected());
        }
        self.expect_keyword(Keyword::Do)?;

        let token = self.advance();
        let action = match token.as_keyword() {
            Some(Keyword::Nothing) => {
                if self.check_keyword(Keyword::Where) {
                    return Err(self.unexpected());
                }
                ConflictAction::DoNothing
            }
            Some(Keyword::Replace) => {
                self.expect_keyword(Keyword::Excluded)?;
                ConflictAction::DoReplace(self.parse_dml_where()?)
            }
            Some(Keyword::Update) => {
                self.expect_keyword(Keyword::Excluded)?;
                ConflictAction::DoUpdate(self.parse_dml_where()?)
            }
            _ => return Err(ParseError::expected("NOTHING, REPLACE or UPDATE", &token)),
        };
        Ok(Some(action))
    }

    /// Parses the elements after `RETURNING`.
    fn parse_returning(&mut self) -> Result<Returning, ParseError> {
        let mut elems = Vec::new();
        loop {
            let modified = if self.eat_keyword(Keyword::Modified) {
                true
            } else if self.eat_keyword(Keyword::All) {
                false
            } else {
                return Err(ParseError::expected("MODIFIED or ALL", self.peek()));
            };
            let mapping = match (modified, self.peek().as_keyword()) {
                (true, Some(Keyword::Old)) => ReturningMapping::ModifiedOld,
                (true, Some(Keyword::New)) => ReturningMapping::ModifiedNew,
                (false, Some(Keyword::Old)) => ReturningMapping::AllOld,
                (false, Some(Keyword::New)) => ReturningMapping::AllNew,
                _ => return Err(ParseError::expected("OLD or NEW", self.peek())),
            };
            self.advance();

            let column = if self.eat(&TokenKind::Star) {
                ReturningColumn::Wildcard
            } else {
                ReturningColumn::Expr(self.parse_expression()?)
            };
            elems.push(ReturningElem { mapping, column });

            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(Returning { elems })
    }
}
