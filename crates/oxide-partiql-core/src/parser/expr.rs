//! Expressions, primaries, path steps and type names.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::error::{ErrorCode, ParseError};
use super::parser::Parser;
use super::pratt::{infix_binding_power, token_to_binary_op, NOT_BP, NOT_OPERAND_BP};
use crate::ast::{
    CaseSensitivity, CastKind, Expr, Literal, PathStep, ScopeQualifier, SetQuantifier, Type,
    UnaryOp,
};
use crate::lexer::{Keyword, TokenKind};

/// Calls that take an optional set quantifier and a single argument.
const AGGREGATES: [&str; 5] = ["count", "sum", "avg", "min", "max"];

impl Parser<'_> {
    /// Parses an expression at OR level. SELECT and bag operators are only
    /// accepted here when parenthesized.
    pub(super) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_expr_bp(0)
    }

    /// Parses a comma-separated list of expressions up to `close`, which is
    /// not consumed. The list may be empty.
    fn parse_expr_list(&mut self, close: &TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut items = Vec::new();
        if self.check(close) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_bag_expr()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(items)
    }

    /// Parses an expression with the given minimum binding power.
    ///
    /// Each call counts as one nesting level.
    pub(super) fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        self.enter(1)?;
        let result = match self.parse_prefix(min_bp) {
            Ok(lhs) => self.parse_infix(lhs, min_bp),
            Err(err) => Err(err),
        };
        self.leave(1);
        result
    }

    fn parse_prefix(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        if self.check_keyword(Keyword::Not) && min_bp <= NOT_BP {
            // Chains are counted rather than recursed into.
            let mut count = 0usize;
            while self.eat_keyword(Keyword::Not) {
                count += 1;
            }
            let mut operand = self.parse_expr_bp(NOT_OPERAND_BP)?;
            for _ in 0..count {
                operand = operand.not();
            }
            Ok(operand)
        } else if matches!(self.peek_kind(), TokenKind::Plus | TokenKind::Minus) {
            self.parse_unary()
        } else {
            self.parse_postfix()
        }
    }

    fn parse_infix(&mut self, mut lhs: Expr, min_bp: u8) -> Result<Expr, ParseError> {
        loop {
            let Some((l_bp, r_bp)) = infix_binding_power(self.peek_kind()) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }

            match self.peek().as_keyword() {
                Some(Keyword::Not) => {
                    let negatable = [Keyword::In, Keyword::Like, Keyword::Between]
                        .into_iter()
                        .any(|kw| self.check_nth_keyword(1, kw));
                    if !negatable {
                        break;
                    }
                    self.advance();
                    lhs = self.parse_predicate(lhs, r_bp)?.not();
                }
                Some(Keyword::Is | Keyword::In | Keyword::Like | Keyword::Between) => {
                    lhs = self.parse_predicate(lhs, r_bp)?;
                }
                _ => {
                    let token = self.advance();
                    let op = token_to_binary_op(&token.kind)
                        .ok_or_else(|| ParseError::unexpected(&token))?;
                    let rhs = self.parse_expr_bp(r_bp)?;
                    lhs = lhs.binary(op, rhs);
                }
            }
        }

        Ok(lhs)
    }

    /// Parses a run of prefix `+`/`-` without recursion.
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let mut ops = Vec::new();
        loop {
            match self.peek_kind() {
                TokenKind::Plus => ops.push(UnaryOp::Pos),
                TokenKind::Minus => ops.push(UnaryOp::Neg),
                _ => break,
            }
            self.advance();
        }

        let numeric = matches!(
            self.peek_kind(),
            TokenKind::Integer(_) | TokenKind::Decimal(_) | TokenKind::Float(_)
        );
        let mut operand = if numeric && ops.last() == Some(&UnaryOp::Neg) {
            ops.pop();
            let literal = self.parse_number(true)?;
            self.parse_path_steps(literal)?
        } else {
            self.parse_postfix()?
        };

        for op in ops.into_iter().rev() {
            operand = Expr::unary(op, operand);
        }
        Ok(operand)
    }

    /// Parses the right-hand side of IS, IN, LIKE or BETWEEN.
    fn parse_predicate(&mut self, value: Expr, r_bp: u8) -> Result<Expr, ParseError> {
        let value = Box::new(value);
        let token = self.advance();
        match token.as_keyword() {
            Some(Keyword::Is) => {
                let negated = self.eat_keyword(Keyword::Not);
                let ty = self.parse_type()?;
                let expr = Expr::IsType { value, ty };
                Ok(if negated { expr.not() } else { expr })
            }
            Some(Keyword::In) => Ok(Expr::InCollection {
                value,
                collection: Box::new(self.parse_expr_bp(r_bp)?),
            }),
            Some(Keyword::Like) => {
                let pattern = Box::new(self.parse_expr_bp(r_bp)?);
                let escape = if self.eat_keyword(Keyword::Escape) {
                    Some(Box::new(self.parse_expr_bp(r_bp)?))
                } else {
                    None
                };
                Ok(Expr::Like {
                    value,
                    pattern,
                    escape,
                })
            }
            Some(Keyword::Between) => {
                let low = Box::new(self.parse_expr_bp(r_bp)?);
                self.expect_keyword(Keyword::And)?;
                let high = Box::new(self.parse_expr_bp(r_bp)?);
                Ok(Expr::Between { value, low, high })
            }
            _ => Err(ParseError::unexpected(&token)),
        }
    }

    /// Parses a primary expression followed by its path steps.
    pub(super) fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let primary = self.parse_primary()?;
        self.parse_path_steps(primary)
    }

    /// Parses `.f`, `."F"`, `.*`, `[e]` and `[*]` steps following `root`.
    pub(super) fn parse_path_steps(&mut self, root: Expr) -> Result<Expr, ParseError> {
        let mut steps = Vec::new();
        loop {
            if self.eat(&TokenKind::Dot) {
                if self.eat(&TokenKind::Star) {
                    steps.push(PathStep::Unpivot);
                    continue;
                }
                if !Self::is_name(self.peek_kind()) {
                    return Err(ParseError::expected("path component", self.peek()));
                }
                let (name, case) = self.parse_name()?;
                steps.push(PathStep::Index {
                    index: Expr::string(name),
                    case,
                });
            } else if self.eat(&TokenKind::LeftBracket) {
                if self.check(&TokenKind::Star) && self.check_nth(1, &TokenKind::RightBracket) {
                    self.advance();
                    self.advance();
                    steps.push(PathStep::Wildcard);
                    continue;
                }
                let index = self.parse_bag_expr()?;
                self.expect(&TokenKind::RightBracket)?;
                steps.push(PathStep::Index {
                    index,
                    case: CaseSensitivity::CaseSensitive,
                });
            } else {
                break;
            }
        }

        if steps.is_empty() {
            Ok(root)
        } else {
            Ok(Expr::Path {
                root: Box::new(root),
                steps,
            })
        }
    }

    /// Parses a primary expression (literals, identifiers, constructors,
    /// parenthesized expressions and special forms).
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek_kind() {
            TokenKind::LeftParen => self.parse_paren(),
            TokenKind::LeftBracket | TokenKind::LeftDoubleAngle => self.parse_sequence(),
            TokenKind::LeftBrace => self.parse_struct(),
            _ => self.parse_atom(),
        }
    }

    /// Parses `[e, ...]` or `<<e, ...>>`.
    fn parse_sequence(&mut self) -> Result<Expr, ParseError> {
        let bag = self.check(&TokenKind::LeftDoubleAngle);
        self.advance();
        let close = if bag {
            TokenKind::RightDoubleAngle
        } else {
            TokenKind::RightBracket
        };
        let items = self.parse_expr_list(&close)?;
        self.expect(&close)?;
        Ok(if bag {
            Expr::Bag(items)
        } else {
            Expr::List(items)
        })
    }

    /// Parses literals, parameters, variables, calls and keyword forms.
    fn parse_atom(&mut self) -> Result<Expr, ParseError> {
        match self.peek_kind() {
            TokenKind::Integer(_) | TokenKind::Decimal(_) | TokenKind::Float(_) => {
                self.parse_number(false)
            }
            TokenKind::String(value) => {
                let expr = Expr::string(value.clone());
                self.advance();
                Ok(expr)
            }
            TokenKind::Ion(text) => {
                let expr = Expr::Lit(Literal::Ion(text.clone()));
                self.advance();
                Ok(expr)
            }
            TokenKind::Question => {
                self.advance();
                Ok(Expr::Parameter(self.next_parameter()))
            }
            TokenKind::At => {
                self.advance();
                let (name, case) = self.parse_name()?;
                Ok(Expr::Id {
                    name,
                    case,
                    qualifier: ScopeQualifier::LocalsFirst,
                })
            }
            TokenKind::QuotedIdentifier(_) => {
                let (name, case) = self.parse_name()?;
                Ok(Expr::Id {
                    name,
                    case,
                    qualifier: ScopeQualifier::Unqualified,
                })
            }
            kind if Self::is_name(kind) => {
                let token = self.advance();
                if self.check(&TokenKind::LeftParen) {
                    self.parse_call(token.text.to_lowercase())
                } else {
                    Ok(Expr::id(token.text))
                }
            }
            TokenKind::Keyword(kw) => {
                let kw = *kw;
                self.parse_keyword_primary(kw)
            }
            _ => Err(ParseError::unexpected_term(self.peek())),
        }
    }

    /// Parses primaries introduced by a reserved keyword.
    fn parse_keyword_primary(&mut self, keyword: Keyword) -> Result<Expr, ParseError> {
        let literal = match keyword {
            Keyword::Null => Some(Literal::Null),
            Keyword::Missing => Some(Literal::Missing),
            Keyword::True => Some(Literal::Boolean(true)),
            Keyword::False => Some(Literal::Boolean(false)),
            _ => None,
        };
        if let Some(literal) = literal {
            self.advance();
            return Ok(Expr::Lit(literal));
        }

        match keyword {
            Keyword::Case => self.parse_case(),
            Keyword::Cast => self.parse_cast(CastKind::Cast),
            Keyword::CanCast => self.parse_cast(CastKind::CanCast),
            Keyword::CanLosslessCast => self.parse_cast(CastKind::CanLosslessCast),
            Keyword::Nullif => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                let left = Box::new(self.parse_expression()?);
                self.expect(&TokenKind::Comma)?;
                let right = Box::new(self.parse_expression()?);
                self.expect(&TokenKind::RightParen)?;
                Ok(Expr::NullIf { left, right })
            }
            Keyword::Coalesce => {
                self.advance();
                self.expect(&TokenKind::LeftParen)?;
                if self.check(&TokenKind::RightParen) {
                    return Err(ParseError::unexpected_term(self.peek()));
                }
                let args = self.parse_expr_list(&TokenKind::RightParen)?;
                self.expect(&TokenKind::RightParen)?;
                Ok(Expr::Coalesce(args))
            }
            Keyword::Substring => self.parse_substring(),
            Keyword::Trim => self.parse_trim(),
            Keyword::Extract => self.parse_extract(),
            _ => Err(ParseError::unexpected_term(self.peek())),
        }
    }

    /// Converts the current numeric token, optionally negated.
    fn parse_number(&mut self, negative: bool) -> Result<Expr, ParseError> {
        let token = self.advance();
        let sign = if negative { "-" } else { "" };
        let literal = match &token.kind {
            TokenKind::Integer(text) => format!("{sign}{text}")
                .parse::<i64>()
                .ok()
                .map(Literal::Integer),
            TokenKind::Decimal(text) => {
                let digits = text.strip_suffix('.').unwrap_or(text);
                let zero = if digits.starts_with('.') { "0" } else { "" };
                Decimal::from_str_exact(&format!("{sign}{zero}{digits}"))
                    .ok()
                    .map(Literal::Decimal)
            }
            TokenKind::Float(text) => format!("{sign}{text}")
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Literal::Float),
            _ => return Err(ParseError::unexpected_term(&token)),
        };
        literal
            .map(Expr::Lit)
            .ok_or_else(|| ParseError::at(ErrorCode::ParseMalformedNumber, &token))
    }

    /// Parses an unsigned integer token, such as a type parameter or a
    /// quantifier bound.
    pub(super) fn parse_unsigned<T: FromStr>(&mut self) -> Result<T, ParseError> {
        let token = self.expect(&TokenKind::Integer(String::new()))?;
        token
            .text
            .parse::<T>()
            .map_err(|_| ParseError::at(ErrorCode::ParseMalformedNumber, &token))
    }

    /// Parses `name(args)`; the opening parenthesis is the current token.
    fn parse_call(&mut self, name: String) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;

        if AGGREGATES.contains(&name.as_str()) {
            if name == "count"
                && self.check(&TokenKind::Star)
                && self.check_nth(1, &TokenKind::RightParen)
            {
                self.advance();
                self.advance();
                return Ok(Expr::CallAgg {
                    quantifier: SetQuantifier::All,
                    name,
                    arg: Box::new(Expr::integer(1)),
                });
            }
            let quantifier = if self.eat_keyword(Keyword::Distinct) {
                SetQuantifier::Distinct
            } else {
                self.eat_keyword(Keyword::All);
                SetQuantifier::All
            };
            let arg = Box::new(self.parse_bag_expr()?);
            self.expect(&TokenKind::RightParen)?;
            return Ok(Expr::CallAgg {
                quantifier,
                name,
                arg,
            });
        }

        let args = self.parse_expr_list(&TokenKind::RightParen)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(match name.as_str() {
            "list" => Expr::List(args),
            "sexp" => Expr::Sexp(args),
            _ => Expr::Call { name, args },
        })
    }

    /// Parses `( e )`, `( e, ... )` and `( e MATCH pattern, ... )`.
    fn parse_paren(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let first = self.parse_bag_expr()?;
        if self.check_keyword(Keyword::Match) {
            return self.finish_graph_match(first);
        }
        if self.check(&TokenKind::Comma) {
            return self.finish_paren_list(first);
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(first)
    }

    /// Parses `MATCH pattern, ... )` after the graph expression.
    fn finish_graph_match(&mut self, graph: Expr) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Match)?;
        let pattern = self.parse_graph_match(true)?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::GraphMatch {
            expr: Box::new(graph),
            pattern,
        })
    }

    /// Parses `, e ... )` after the first element of a parenthesized list.
    fn finish_paren_list(&mut self, first: Expr) -> Result<Expr, ParseError> {
        let mut items = vec![first];
        while self.eat(&TokenKind::Comma) {
            items.push(self.parse_bag_expr()?);
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::List(items))
    }

    fn parse_struct(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftBrace)?;
        let mut fields = Vec::new();
        if !self.check(&TokenKind::RightBrace) {
            loop {
                let key = self.parse_bag_expr()?;
                self.expect(&TokenKind::Colon)?;
                let value = self.parse_bag_expr()?;
                fields.push((key, value));
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RightBrace)?;
        Ok(Expr::Struct(fields))
    }

    /// Parses searched and simple CASE.
    fn parse_case(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Case)?;
        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };

        let mut cases = Vec::new();
        while self.eat_keyword(Keyword::When) {
            let condition = self.parse_expression()?;
            self.expect_keyword(Keyword::Then)?;
            let result = self.parse_expression()?;
            cases.push((condition, result));
        }
        if cases.is_empty() {
            return Err(ParseError::expected("WHEN", self.peek()));
        }

        let default = if self.eat_keyword(Keyword::Else) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };
        self.expect_keyword(Keyword::End)?;

        Ok(match operand {
            Some(operand) => Expr::SimpleCase {
                operand,
                cases,
                default,
            },
            None => Expr::SearchedCase { cases, default },
        })
    }

    fn parse_cast(&mut self, kind: CastKind) -> Result<Expr, ParseError> {
        self.advance();
        self.expect(&TokenKind::LeftParen)?;
        let value = Box::new(self.parse_expression()?);
        self.expect_keyword(Keyword::As)?;
        let ty = self.parse_type()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Cast { kind, value, ty })
    }

    /// `SUBSTRING(s FROM a [FOR b])` or `SUBSTRING(s, a [, b])`.
    fn parse_substring(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Substring)?;
        self.expect(&TokenKind::LeftParen)?;
        let mut args = vec![self.parse_expression()?];
        if self.eat_keyword(Keyword::From) {
            args.push(self.parse_expression()?);
            if self.eat_keyword(Keyword::For) {
                args.push(self.parse_expression()?);
            }
        } else {
            self.expect(&TokenKind::Comma)?;
            args.push(self.parse_expression()?);
            if self.eat(&TokenKind::Comma) {
                args.push(self.parse_expression()?);
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Call {
            name: "substring".to_string(),
            args,
        })
    }

    /// `TRIM([LEADING|TRAILING|BOTH] [chars] FROM s)` or `TRIM(s)`.
    fn parse_trim(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Trim)?;
        self.expect(&TokenKind::LeftParen)?;

        let spec = match self.peek().as_keyword() {
            Some(kw @ (Keyword::Leading | Keyword::Trailing | Keyword::Both)) => {
                self.advance();
                Some(kw.as_str().to_lowercase())
            }
            _ => None,
        };

        let mut args = Vec::new();
        if let Some(spec) = spec {
            args.push(Expr::string(spec));
            if !self.eat_keyword(Keyword::From) {
                args.push(self.parse_expression()?);
                self.expect_keyword(Keyword::From)?;
            }
            args.push(self.parse_expression()?);
        } else {
            let first = self.parse_expression()?;
            if self.eat_keyword(Keyword::From) {
                args.push(Expr::string("both"));
                args.push(first);
                args.push(self.parse_expression()?);
            } else {
                args.push(first);
            }
        }

        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Call {
            name: "trim".to_string(),
            args,
        })
    }

    /// `EXTRACT(part FROM e)`
    fn parse_extract(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Extract)?;
        self.expect(&TokenKind::LeftParen)?;
        if !matches!(self.peek_kind(), TokenKind::Identifier(_)) {
            return Err(ParseError::expected("date part", self.peek()));
        }
        let part = self.advance().text.to_lowercase();
        self.expect_keyword(Keyword::From)?;
        let value = self.parse_expression()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Expr::Call {
            name: "extract".to_string(),
            args: vec![Expr::string(part), value],
        })
    }

    // --- Types ---

    /// Returns true if the token `n` ahead is the unquoted word `word`.
    pub(super) fn check_nth_word(&self, n: usize, word: &str) -> bool {
        matches!(&self.nth(n).kind, TokenKind::Identifier(text) if text.eq_ignore_ascii_case(word))
    }

    fn expect_word(&mut self, word: &str) -> Result<(), ParseError> {
        if self.check_nth_word(0, word) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::expected(word, self.peek()))
        }
    }

    /// Parses a type name as used by CAST, IS and column declarations.
    pub(super) fn parse_type(&mut self) -> Result<Type, ParseError> {
        let token = self.peek().clone();
        if !matches!(token.kind, TokenKind::Identifier(_) | TokenKind::Keyword(_)) {
            return Err(ParseError::expected("type", &token));
        }
        self.advance();

        let word = token.text.to_ascii_uppercase();
        let ty = match word.as_str() {
            "DOUBLE" => {
                self.expect_word("PRECISION")?;
                Type::DoublePrecision
            }
            "CHAR" | "CHARACTER" if self.check_nth_word(0, "VARYING") => {
                self.advance();
                Type::CharacterVarying(self.parse_type_param()?)
            }
            "CHAR" | "CHARACTER" => Type::Character(self.parse_type_param()?),
            "VARCHAR" => Type::CharacterVarying(self.parse_type_param()?),
            "FLOAT" => Type::Float(self.parse_type_param()?),
            "DECIMAL" | "DEC" => {
                let (precision, scale) = self.parse_precision_scale()?;
                Type::Decimal { precision, scale }
            }
            "NUMERIC" => {
                let (precision, scale) = self.parse_precision_scale()?;
                Type::Numeric { precision, scale }
            }
            "TIME" => {
                let precision = self.parse_type_param()?;
                if self.check_nth_word(0, "WITH") {
                    self.advance();
                    self.expect_word("TIME")?;
                    self.expect_word("ZONE")?;
                    Type::TimeWithTimeZone(precision)
                } else {
                    Type::Time(precision)
                }
            }
            _ => match Type::from_word(&word) {
                Some(ty) => ty,
                None if matches!(token.kind, TokenKind::Identifier(_)) => {
                    Type::Custom(token.text.to_lowercase())
                }
                None => return Err(ParseError::expected("type", &token)),
            },
        };
        Ok(ty)
    }

    /// Parses an optional `(n)` type parameter.
    fn parse_type_param(&mut self) -> Result<Option<u32>, ParseError> {
        if !self.eat(&TokenKind::LeftParen) {
            return Ok(None);
        }
        let value = self.parse_unsigned()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(Some(value))
    }

    /// Parses an optional `(p [, s])`.
    fn parse_precision_scale(&mut self) -> Result<(Option<u32>, Option<u32>), ParseError> {
        if !self.eat(&TokenKind::LeftParen) {
            return Ok((None, None));
        }
        let precision = self.parse_unsigned()?;
        let scale = if self.eat(&TokenKind::Comma) {
            Some(self.parse_unsigned()?)
        } else {
            None
        };
        self.expect(&TokenKind::RightParen)?;
        Ok((Some(precision), scale))
    }
}
