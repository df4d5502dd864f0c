//! Graph pattern matching (GPML) after `MATCH`.

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::{
    EdgeDirection, EdgePattern, Expr, GraphMatch, GraphPattern, GraphSelector, LabelSpec,
    NodePattern, PatternPart, Quantifier, Restrictor,
};
use crate::lexer::{Keyword, TokenKind};

/// Variable, label and WHERE prefilter of a node or edge filler.
type ElementSpec = (Option<String>, Option<LabelSpec>, Option<Expr>);

impl Parser<'_> {
    /// Parses `[selector] pattern [, pattern ...]`. Several patterns are
    /// only accepted when `allow_multiple` is set.
    pub(super) fn parse_graph_match(
        &mut self,
        allow_multiple: bool,
    ) -> Result<GraphMatch, ParseError> {
        let selector = self.parse_graph_selector()?;
        let mut patterns = vec![self.parse_graph_pattern()?];
        if allow_multiple {
            while self.eat(&TokenKind::Comma) {
                patterns.push(self.parse_graph_pattern()?);
            }
        }
        Ok(GraphMatch { selector, patterns })
    }

    fn parse_graph_selector(&mut self) -> Result<Option<GraphSelector>, ParseError> {
        let selector = match self.peek().as_keyword() {
            Some(Keyword::Any) => {
                self.advance();
                if self.eat_keyword(Keyword::Shortest) {
                    GraphSelector::AnyShortest
                } else if self.check(&TokenKind::Integer(String::new())) {
                    GraphSelector::AnyK(self.parse_unsigned()?)
                } else {
                    GraphSelector::Any
                }
            }
            Some(Keyword::All) if self.check_nth_keyword(1, Keyword::Shortest) => {
                self.advance();
                self.advance();
                GraphSelector::AllShortest
            }
            Some(Keyword::Shortest) if self.check_nth(1, &TokenKind::Integer(String::new())) => {
                self.advance();
                let k = self.parse_unsigned()?;
                if self.eat_keyword(Keyword::Group) {
                    GraphSelector::ShortestKGroup(k)
                } else {
                    GraphSelector::ShortestK(k)
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(selector))
    }

    /// Parses `[restrictor] [var =] part...` at the top of a MATCH.
    fn parse_graph_pattern(&mut self) -> Result<GraphPattern, ParseError> {
        let restrictor = self.parse_restrictor();
        let variable = self.parse_path_variable()?;
        let parts = self.parse_pattern_parts()?;
        Ok(GraphPattern {
            restrictor,
            variable,
            parts,
            ..GraphPattern::default()
        })
    }

    /// A restrictor keyword, unless it is used as a path variable.
    fn parse_restrictor(&mut self) -> Option<Restrictor> {
        if self.check_nth(1, &TokenKind::Eq) {
            return None;
        }
        let restrictor = match self.peek().as_keyword() {
            Some(Keyword::Trail) => Restrictor::Trail,
            Some(Keyword::Acyclic) => Restrictor::Acyclic,
            Some(Keyword::Simple) => Restrictor::Simple,
            _ => return None,
        };
        self.advance();
        Some(restrictor)
    }

    /// Parses `name =` binding a path variable.
    fn parse_path_variable(&mut self) -> Result<Option<String>, ParseError> {
        if Self::is_name(self.peek_kind()) && self.check_nth(1, &TokenKind::Eq) {
            let name = self.parse_symbol()?;
            self.advance();
            Ok(Some(name))
        } else {
            Ok(None)
        }
    }

    /// Parses one or more nodes, edges and sub-patterns.
    fn parse_pattern_parts(&mut self) -> Result<Vec<PatternPart>, ParseError> {
        let mut parts = Vec::new();
        loop {
            let part = match self.peek_kind() {
                TokenKind::LeftParen if self.paren_starts_sub_pattern() => {
                    PatternPart::Pattern(self.parse_sub_pattern()?)
                }
                TokenKind::LeftParen => PatternPart::Node(self.parse_node()?),
                TokenKind::LeftBracket => PatternPart::Pattern(self.parse_sub_pattern()?),
                TokenKind::Minus | TokenKind::Lt | TokenKind::Tilde => {
                    PatternPart::Edge(self.parse_edge()?)
                }
                _ => break,
            };
            parts.push(part);
        }
        if parts.is_empty() {
            return Err(ParseError::expected("graph pattern", self.peek()));
        }
        Ok(parts)
    }

    fn starts_pattern_part(kind: &TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::LeftParen
                | TokenKind::LeftBracket
                | TokenKind::Minus
                | TokenKind::Lt
                | TokenKind::Tilde
        )
    }

    /// Distinguishes `( pattern )` from a node `( var :label WHERE e )`.
    fn paren_starts_sub_pattern(&self) -> bool {
        let next = &self.nth(1).kind;
        if Self::starts_pattern_part(next) {
            return true;
        }
        if Self::is_name(next) && self.check_nth(2, &TokenKind::Eq) {
            return true;
        }
        let restrictor = matches!(
            next,
            TokenKind::Keyword(Keyword::Trail | Keyword::Acyclic | Keyword::Simple)
        );
        let after = &self.nth(2).kind;
        restrictor && (Self::starts_pattern_part(after) || Self::is_name(after))
    }

    /// Parses `( ... )` or `[ ... ]` with its own restrictor, variable,
    /// prefilter and quantifier.
    fn parse_sub_pattern(&mut self) -> Result<GraphPattern, ParseError> {
        self.nested(1, |p| {
            let close = if p.eat(&TokenKind::LeftParen) {
                TokenKind::RightParen
            } else {
                p.expect(&TokenKind::LeftBracket)?;
                TokenKind::RightBracket
            };
            let restrictor = p.parse_restrictor();
            let variable = p.parse_path_variable()?;
            let parts = p.parse_pattern_parts()?;
            let prefilter = if p.eat_keyword(Keyword::Where) {
                Some(p.parse_expression()?)
            } else {
                None
            };
            p.expect(&close)?;
            let quantifier = p.parse_graph_quantifier()?;
            Ok(GraphPattern {
                restrictor,
                prefilter,
                variable,
                quantifier,
                parts,
            })
        })
    }

    fn parse_node(&mut self) -> Result<NodePattern, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let (variable, label, prefilter) = self.parse_element_spec()?;
        self.expect(&TokenKind::RightParen)?;
        Ok(NodePattern {
            variable,
            label,
            prefilter,
        })
    }

    /// Parses `[var] [:label] [WHERE e]`.
    fn parse_element_spec(&mut self) -> Result<ElementSpec, ParseError> {
        let variable = if Self::is_name(self.peek_kind()) {
            Some(self.parse_symbol()?)
        } else {
            None
        };
        let label = if self.eat(&TokenKind::Colon) {
            Some(self.parse_label_spec()?)
        } else {
            None
        };
        let prefilter = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok((variable, label, prefilter))
    }

    /// Parses an edge in any of its full or abbreviated forms.
    fn parse_edge(&mut self) -> Result<EdgePattern, ParseError> {
        let mut filler = None;
        let token = self.advance();
        let direction = match token.kind {
            TokenKind::Lt if self.eat(&TokenKind::Minus) => {
                if self.check(&TokenKind::LeftBracket) {
                    filler = Some(self.parse_edge_filler()?);
                    self.expect(&TokenKind::Minus)?;
                }
                if self.eat(&TokenKind::Gt) {
                    EdgeDirection::LeftOrRight
                } else {
                    EdgeDirection::Left
                }
            }
            TokenKind::Lt if self.eat(&TokenKind::Tilde) => {
                if self.check(&TokenKind::LeftBracket) {
                    filler = Some(self.parse_edge_filler()?);
                    self.expect(&TokenKind::Tilde)?;
                }
                EdgeDirection::LeftOrUndirected
            }
            TokenKind::Lt => return Err(self.unexpected()),
            TokenKind::Tilde => {
                if self.check(&TokenKind::LeftBracket) {
                    filler = Some(self.parse_edge_filler()?);
                    self.expect(&TokenKind::Tilde)?;
                }
                if self.eat(&TokenKind::Gt) {
                    EdgeDirection::UndirectedOrRight
                } else {
                    EdgeDirection::Undirected
                }
            }
            TokenKind::Minus => {
                if self.check(&TokenKind::LeftBracket) {
                    filler = Some(self.parse_edge_filler()?);
                    self.expect(&TokenKind::Minus)?;
                }
                if self.eat(&TokenKind::Gt) {
                    EdgeDirection::Right
                } else {
                    EdgeDirection::LeftOrUndirectedOrRight
                }
            }
            _ => return Err(ParseError::unexpected(&token)),
        };

        let mut edge = EdgePattern::new(direction);
        if let Some((variable, label, prefilter)) = filler {
            edge.variable = variable;
            edge.label = label;
            edge.prefilter = prefilter;
        }
        edge.quantifier = self.parse_graph_quantifier()?;
        Ok(edge)
    }

    fn parse_edge_filler(&mut self) -> Result<ElementSpec, ParseError> {
        self.expect(&TokenKind::LeftBracket)?;
        let spec = self.parse_element_spec()?;
        self.expect(&TokenKind::RightBracket)?;
        Ok(spec)
    }

    /// Parses an optional `*`, `+`, `{m,}` or `{m,n}`.
    fn parse_graph_quantifier(&mut self) -> Result<Option<Quantifier>, ParseError> {
        if self.eat(&TokenKind::Star) {
            return Ok(Some(Quantifier::STAR));
        }
        if self.eat(&TokenKind::Plus) {
            return Ok(Some(Quantifier::PLUS));
        }
        if !self.eat(&TokenKind::LeftBrace) {
            return Ok(None);
        }
        let lower = self.parse_unsigned()?;
        self.expect(&TokenKind::Comma)?;
        let upper = if self.check(&TokenKind::RightBrace) {
            None
        } else {
            Some(self.parse_unsigned()?)
        };
        self.expect(&TokenKind::RightBrace)?;
        Ok(Some(Quantifier { lower, upper }))
    }

    // --- Label expressions: `|` < `&` < `!` < primary ---

    fn parse_label_spec(&mut self) -> Result<LabelSpec, ParseError> {
        let mut lhs = self.parse_label_conjunction()?;
        while self.eat(&TokenKind::Pipe) {
            let rhs = self.parse_label_conjunction()?;
            lhs = LabelSpec::Disjunction(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_label_conjunction(&mut self) -> Result<LabelSpec, ParseError> {
        let mut lhs = self.parse_label_negation()?;
        while self.eat(&TokenKind::Ampersand) {
            let rhs = self.parse_label_negation()?;
            lhs = LabelSpec::Conjunction(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_label_negation(&mut self) -> Result<LabelSpec, ParseError> {
        let mut count = 0usize;
        while self.eat(&TokenKind::Bang) {
            count += 1;
        }
        let mut label = self.parse_label_primary()?;
        for _ in 0..count {
            label = LabelSpec::Negation(Box::new(label));
        }
        Ok(label)
    }

    fn parse_label_primary(&mut self) -> Result<LabelSpec, ParseError> {
        if self.eat(&TokenKind::Percent) {
            return Ok(LabelSpec::Wildcard);
        }
        if self.check(&TokenKind::LeftParen) {
            return self.nested(1, |p| {
                p.advance();
                let label = p.parse_label_spec()?;
                p.expect(&TokenKind::RightParen)?;
                Ok(label)
            });
        }
        if !Self::is_name(self.peek_kind()) {
            return Err(ParseError::expected("label", self.peek()));
        }
        Ok(LabelSpec::Name(self.parse_symbol()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::StatementKind;

    fn graph_match(sql: &str) -> GraphMatch {
        let stmt = Parser::new(sql)
            .parse_statement()
            .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"));
        match stmt.kind {
            StatementKind::Query(Expr::GraphMatch { pattern, .. }) => pattern,
            other => panic!("Expected graph match, got {other:?}"),
        }
    }

    fn edge_direction(pattern: &str) -> EdgeDirection {
        let m = graph_match(&format!("(g MATCH (a){pattern}(b))"));
        match &m.patterns[0].parts[1] {
            PatternPart::Edge(edge) => edge.direction,
            other => panic!("Expected edge, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_directions() {
        assert_eq!(edge_direction("-[e]->"), EdgeDirection::Right);
        assert_eq!(edge_direction("->"), EdgeDirection::Right);
        assert_eq!(edge_direction("<-[e]-"), EdgeDirection::Left);
        assert_eq!(edge_direction("<-"), EdgeDirection::Left);
        assert_eq!(edge_direction("~[e]~"), EdgeDirection::Undirected);
        assert_eq!(edge_direction("~"), EdgeDirection::Undirected);
        assert_eq!(edge_direction("~[e]~>"), EdgeDirection::UndirectedOrRight);
        assert_eq!(edge_direction("~>"), EdgeDirection::UndirectedOrRight);
        assert_eq!(edge_direction("<~[e]~"), EdgeDirection::LeftOrUndirected);
        assert_eq!(edge_direction("<~"), EdgeDirection::LeftOrUndirected);
        assert_eq!(edge_direction("<-[e]->"), EdgeDirection::LeftOrRight);
        assert_eq!(edge_direction("<->"), EdgeDirection::LeftOrRight);
        assert_eq!(edge_direction("-[e]-"), EdgeDirection::LeftOrUndirectedOrRight);
        assert_eq!(edge_direction("-"), EdgeDirection::LeftOrUndirectedOrRight);
    }

    #[test]
    fn test_selectors() {
        assert_eq!(
            graph_match("(g MATCH ANY SHORTEST (a))").selector,
            Some(GraphSelector::AnyShortest)
        );
        assert_eq!(
            graph_match("(g MATCH ALL SHORTEST (a))").selector,
            Some(GraphSelector::AllShortest)
        );
        assert_eq!(
            graph_match("(g MATCH ANY 5 (a))").selector,
            Some(GraphSelector::AnyK(5))
        );
        assert_eq!(
            graph_match("(g MATCH SHORTEST 2 GROUP (a))").selector,
            Some(GraphSelector::ShortestKGroup(2))
        );
        assert_eq!(graph_match("(g MATCH (a))").selector, None);
    }

    #[test]
    fn test_quantifiers() {
        let m = graph_match("(g MATCH (a)-[e]->{2,5}(b)-[f]->*(c))");
        let PatternPart::Edge(e) = &m.patterns[0].parts[1] else {
            panic!("Expected edge");
        };
        assert_eq!(
            e.quantifier,
            Some(Quantifier {
                lower: 2,
                upper: Some(5)
            })
        );
        let PatternPart::Edge(f) = &m.patterns[0].parts[3] else {
            panic!("Expected edge");
        };
        assert_eq!(f.quantifier, Some(Quantifier::STAR));
    }

    #[test]
    fn test_sub_pattern() {
        let m = graph_match("(g MATCH TRAIL p = (a) [(b)-(c) WHERE b.x = 1]+)");
        let pattern = &m.patterns[0];
        assert_eq!(pattern.restrictor, Some(Restrictor::Trail));
        assert_eq!(pattern.variable.as_deref(), Some("p"));
        let PatternPart::Pattern(sub) = &pattern.parts[1] else {
            panic!("Expected sub-pattern");
        };
        assert_eq!(sub.quantifier, Some(Quantifier::PLUS));
        assert!(sub.prefilter.is_some());
        assert_eq!(sub.parts.len(), 3);
    }

    #[test]
    fn test_label_precedence() {
        let plain = graph_match("(g MATCH (x: L1|L2&L3|!L4|(L5&%)))");
        let grouped = graph_match("(g MATCH (x: ((L1 | (L2&L3)) | !L4) | (L5&%)))");
        assert_eq!(plain, grouped);
    }

    #[test]
    fn test_multiple_patterns() {
        let m = graph_match("(g MATCH (a), (b)->(c))");
        assert_eq!(m.patterns.len(), 2);
    }
}
