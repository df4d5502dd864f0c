//! SELECT, PIVOT, FROM sources and bag operators.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    BagOpKind, Expr, FromSource, GroupBy, GroupKey, GroupingStrategy, JoinKind, LetBinding,
    NullsSpec, OrderBy, OrderingSpec, PathStep, ProjectItem, Projection, Select, SetQuantifier,
    SortSpec,
};
use crate::config::SUBQUERY_DEPTH;
use crate::lexer::{Keyword, TokenKind};

/// `AS`, `AT` and `BY` aliases of a FROM source.
type SourceAliases = (Option<String>, Option<String>, Option<String>);

impl Parser<'_> {
    /// Parses the body of a query statement.
    pub(super) fn parse_query(&mut self) -> Result<Expr, ParseError> {
        self.parse_bag_expr()
    }

    /// Parses a full expression: SELECT queries joined by bag operators.
    pub(super) fn parse_bag_expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_bag_operand()?;

        loop {
            let outer = self.check_keyword(Keyword::Outer);
            let offset = usize::from(outer);
            let op = match self.nth(offset).as_keyword() {
                Some(Keyword::Union) => BagOpKind::Union,
                Some(Keyword::Intersect) => BagOpKind::Intersect,
                Some(Keyword::Except) => BagOpKind::Except,
                _ => break,
            };
            if outer {
                self.advance();
            }
            self.advance();

            let op = if outer { op.outer() } else { op };
            let quantifier = if self.eat_keyword(Keyword::All) {
                SetQuantifier::All
            } else {
                self.eat_keyword(Keyword::Distinct);
                SetQuantifier::Distinct
            };
            let rhs = self.parse_bag_operand()?;
            lhs = Expr::BagOp {
                op,
                quantifier,
                left: Box::new(lhs),
                right: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    fn parse_bag_operand(&mut self) -> Result<Expr, ParseError> {
        if self.check_keyword(Keyword::Select) || self.check_keyword(Keyword::Pivot) {
            let select = self.nested(SUBQUERY_DEPTH, Self::parse_select)?;
            Ok(Expr::Select(Box::new(select)))
        } else {
            self.parse_expr_bp(0)
        }
    }

    /// Parses a SELECT or PIVOT query.
    fn parse_select(&mut self) -> Result<Select, ParseError> {
        let (quantifier, project) = if self.eat_keyword(Keyword::Pivot) {
            let value = self.parse_expression()?;
            self.expect_keyword(Keyword::At)?;
            let key = self.parse_expression()?;
            (None, Projection::Pivot { value, key })
        } else {
            self.expect_keyword(Keyword::Select)?;
            let quantifier = if self.eat_keyword(Keyword::Distinct) {
                Some(SetQuantifier::Distinct)
            } else if self.eat_keyword(Keyword::All) {
                Some(SetQuantifier::All)
            } else {
                None
            };
            (quantifier, self.parse_projection()?)
        };

        self.expect_keyword(Keyword::From)?;
        let from = self.parse_from()?;

        let mut select = Select::new(project, from);
        select.quantifier = quantifier;

        if self.eat_keyword(Keyword::Let) {
            loop {
                let expr = self.parse_expression()?;
                self.expect_keyword(Keyword::As)?;
                let name = self.parse_symbol()?;
                select.from_let.push(LetBinding { expr, name });
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }

        if self.eat_keyword(Keyword::Where) {
            select.where_clause = Some(self.parse_expression()?);
        }

        if self.check_keyword(Keyword::Group) {
            select.group_by = Some(self.parse_group_by()?);
        }

        if self.eat_keyword(Keyword::Having) {
            select.having = Some(self.parse_expression()?);
        }

        if self.check_keyword(Keyword::Order) {
            select.order_by = Some(self.parse_order_by()?);
        }

        if self.eat_keyword(Keyword::Limit) {
            select.limit = Some(self.parse_expression()?);
        }

        if self.eat_keyword(Keyword::Offset) {
            select.offset = Some(self.parse_expression()?);
        }

        Ok(select)
    }

    fn parse_projection(&mut self) -> Result<Projection, ParseError> {
        if self.eat(&TokenKind::Star) {
            return Ok(Projection::Star);
        }
        if self.eat_keyword(Keyword::Value) {
            return Ok(Projection::Value(self.parse_expression()?));
        }

        let mut items = Vec::new();
        loop {
            items.push(self.parse_project_item()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(Projection::List(items))
    }

    /// Parses `e [AS] alias` or `e.*`.
    fn parse_project_item(&mut self) -> Result<ProjectItem, ParseError> {
        match self.parse_expression()? {
            Expr::Path { root, mut steps } if steps.last() == Some(&PathStep::Unpivot) => {
                steps.pop();
                let base = if steps.is_empty() {
                    *root
                } else {
                    Expr::Path { root, steps }
                };
                Ok(ProjectItem::All(base))
            }
            expr => {
                let alias = self.parse_optional_alias()?;
                Ok(ProjectItem::Expr { expr, alias })
            }
        }
    }

    /// Parses `GROUP [PARTIAL] BY key [AS a], ... [GROUP AS g]`.
    fn parse_group_by(&mut self) -> Result<GroupBy, ParseError> {
        self.expect_keyword(Keyword::Group)?;
        let strategy = if self.eat_keyword(Keyword::Partial) {
            GroupingStrategy::Partial
        } else {
            GroupingStrategy::Full
        };
        self.expect_keyword(Keyword::By)?;

        let mut keys = Vec::new();
        loop {
            let expr = self.parse_expression()?;
            let alias = if self.eat_keyword(Keyword::As) {
                Some(self.parse_symbol()?)
            } else {
                None
            };
            keys.push(GroupKey { expr, alias });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        let group_as = if self.check_keyword(Keyword::Group)
            && self.check_nth_keyword(1, Keyword::As)
        {
            self.advance();
            self.advance();
            Some(self.parse_symbol()?)
        } else {
            None
        };

        Ok(GroupBy {
            strategy,
            keys,
            group_as,
        })
    }

    fn parse_order_by(&mut self) -> Result<OrderBy, ParseError> {
        let start = self.position();
        self.expect_keyword(Keyword::Order)?;
        self.expect_keyword(Keyword::By)?;

        let mut sort_specs = Vec::new();
        loop {
            let expr = self.parse_expression()?;
            let ordering = if self.eat_keyword(Keyword::Asc) {
                Some(OrderingSpec::Asc)
            } else if self.eat_keyword(Keyword::Desc) {
                Some(OrderingSpec::Desc)
            } else {
                None
            };
            let nulls = if self.eat_keyword(Keyword::Nulls) {
                if self.eat_keyword(Keyword::First) {
                    Some(NullsSpec::First)
                } else {
                    self.expect_keyword(Keyword::Last)?;
                    Some(NullsSpec::Last)
                }
            } else {
                None
            };
            sort_specs.push(SortSpec {
                expr,
                ordering,
                nulls,
            });
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        Ok(OrderBy {
            sort_specs,
            location: self.location_from(start),
        })
    }

    // --- FROM ---

    /// Parses the FROM source list, folding joins to the left.
    fn parse_from(&mut self) -> Result<FromSource, ParseError> {
        let (mut source, is_match) = self.parse_from_item(true)?;
        if is_match {
            // An unparenthesized MATCH must be the whole source.
            if self.check(&TokenKind::Comma) || self.starts_join() {
                return Err(self.unexpected());
            }
            return Ok(source);
        }

        while let Some((kind, allows_on)) = self.parse_join_kind()? {
            let (right, _) = self.parse_from_item(false)?;
            let predicate = if allows_on && self.eat_keyword(Keyword::On) {
                Some(self.parse_expression()?)
            } else {
                None
            };
            source = FromSource::Join {
                kind,
                left: Box::new(source),
                right: Box::new(right),
                predicate,
            };
        }

        Ok(source)
    }

    /// Parses one FROM item. Returns true as the second value when the item
    /// is an unparenthesized graph match.
    fn parse_from_item(&mut self, allow_match: bool) -> Result<(FromSource, bool), ParseError> {
        if self.eat_keyword(Keyword::Unpivot) {
            let expr = self.parse_expression()?;
            let (as_alias, at_alias, by_alias) = self.parse_source_aliases()?;
            return Ok((
                FromSource::Unpivot {
                    expr,
                    as_alias,
                    at_alias,
                    by_alias,
                },
                false,
            ));
        }

        let expr = self.parse_expression()?;

        if self.check_keyword(Keyword::Match) {
            if !allow_match {
                return Err(self.unexpected());
            }
            self.advance();
            let pattern = self.parse_graph_match(false)?;
            let expr = Expr::GraphMatch {
                expr: Box::new(expr),
                pattern,
            };
            return Ok((FromSource::scan(expr), true));
        }

        let (as_alias, at_alias, by_alias) = self.parse_source_aliases()?;
        Ok((
            FromSource::Scan {
                expr,
                as_alias,
                at_alias,
                by_alias,
            },
            false,
        ))
    }

    /// Parses `[AS] x [AT y] [BY z]`.
    pub(super) fn parse_source_aliases(&mut self) -> Result<SourceAliases, ParseError> {
        let as_alias = self.parse_optional_alias()?;
        let at_alias = if self.eat_keyword(Keyword::At) {
            Some(self.parse_symbol()?)
        } else {
            None
        };
        let by_alias = if self.eat_keyword(Keyword::By) {
            Some(self.parse_symbol()?)
        } else {
            None
        };
        Ok((as_alias, at_alias, by_alias))
    }

    fn starts_join(&self) -> bool {
        match self.peek().as_keyword() {
            Some(
                Keyword::Join
                | Keyword::Cross
                | Keyword::Inner
                | Keyword::Left
                | Keyword::Right
                | Keyword::Full,
            ) => true,
            Some(Keyword::Outer) => self.check_nth_keyword(1, Keyword::Join),
            _ => false,
        }
    }

    /// Consumes a join operator. The flag tells whether an ON clause may
    /// follow.
    fn parse_join_kind(&mut self) -> Result<Option<(JoinKind, bool)>, ParseError> {
        if self.eat(&TokenKind::Comma) {
            return Ok(Some((JoinKind::Inner, false)));
        }
        if !self.starts_join() {
            return Ok(None);
        }

        let token = self.advance();
        let kind = match token.as_keyword() {
            Some(Keyword::Cross) => {
                self.expect_keyword(Keyword::Join)?;
                return Ok(Some((JoinKind::Inner, false)));
            }
            Some(Keyword::Join) => return Ok(Some((JoinKind::Inner, true))),
            Some(Keyword::Inner) => JoinKind::Inner,
            Some(Keyword::Left) => {
                if self.eat_keyword(Keyword::Cross) {
                    self.expect_keyword(Keyword::Join)?;
                    return Ok(Some((JoinKind::Left, false)));
                }
                self.eat_keyword(Keyword::Outer);
                JoinKind::Left
            }
            Some(Keyword::Right) => {
                self.eat_keyword(Keyword::Outer);
                JoinKind::Right
            }
            Some(Keyword::Full) => {
                self.eat_keyword(Keyword::Outer);
                JoinKind::Full
            }
            // OUTER JOIN
            _ => JoinKind::Full,
        };
        self.expect_keyword(Keyword::Join)?;
        Ok(Some((kind, true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::StatementKind;

    fn select(sql: &str) -> Select {
        let stmt = Parser::new(sql)
            .parse_statement()
            .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"));
        match stmt.kind {
            StatementKind::Query(Expr::Select(select)) => *select,
            other => panic!("Expected SELECT, got {other:?}"),
        }
    }

    #[test]
    fn test_select_star() {
        let s = select("SELECT * FROM t");
        assert_eq!(s.project, Projection::Star);
        assert_eq!(s.from, FromSource::scan(Expr::id("t")));
    }

    #[test]
    fn test_implicit_aliases() {
        let s = select("SELECT a x FROM t AS u AT i BY j");
        assert_eq!(
            s.project,
            Projection::List(vec![ProjectItem::Expr {
                expr: Expr::id("a"),
                alias: Some("x".to_string())
            }])
        );
        let FromSource::Scan {
            as_alias,
            at_alias,
            by_alias,
            ..
        } = s.from
        else {
            panic!("Expected scan");
        };
        assert_eq!(as_alias.as_deref(), Some("u"));
        assert_eq!(at_alias.as_deref(), Some("i"));
        assert_eq!(by_alias.as_deref(), Some("j"));
    }

    #[test]
    fn test_project_all() {
        let s = select("SELECT a.* FROM t");
        assert_eq!(
            s.project,
            Projection::List(vec![ProjectItem::All(Expr::id("a"))])
        );
    }

    #[test]
    fn test_joins_nest_left() {
        let s = select("SELECT * FROM a, b LEFT JOIN c ON true");
        let FromSource::Join { kind, left, .. } = s.from else {
            panic!("Expected join");
        };
        assert_eq!(kind, JoinKind::Left);
        assert!(matches!(
            *left,
            FromSource::Join {
                kind: JoinKind::Inner,
                predicate: None,
                ..
            }
        ));
    }

    #[test]
    fn test_order_by_location() {
        let s = select("SELECT * FROM t ORDER BY a DESC");
        let order_by = s.order_by.expect("order by");
        assert_eq!(order_by.location.line, 1);
        assert_eq!(order_by.location.column, 17);
        assert_eq!(order_by.location.length, 15);
        assert_eq!(order_by.sort_specs[0].ordering, Some(OrderingSpec::Desc));
    }

    #[test]
    fn test_from_is_required() {
        let err = Parser::new("SELECT a").parse_statement().unwrap_err();
        assert_eq!(err.token_description, "EOF");
    }

    #[test]
    fn test_outer_union() {
        let stmt = Parser::new("a OUTER UNION ALL b").parse_statement().unwrap();
        assert_eq!(
            stmt.to_string(),
            "(query (bag_op (outer_union) (all) (id a (case_insensitive) (unqualified)) (id b (case_insensitive) (unqualified))))"
        );
    }
}
