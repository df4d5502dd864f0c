//! Graph pattern (GPML) AST types.

use super::expression::Expr;

/// Which matching paths are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphSelector {
    /// `ANY SHORTEST`
    AnyShortest,
    /// `ALL SHORTEST`
    AllShortest,
    /// `ANY`
    Any,
    /// `ANY k`
    AnyK(u64),
    /// `SHORTEST k`
    ShortestK(u64),
    /// `SHORTEST k GROUP`
    ShortestKGroup(u64),
}

/// Path restrictor of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Restrictor {
    /// No repeated edges.
    Trail,
    /// No repeated nodes.
    Acyclic,
    /// No repeated nodes except that the first may equal the last.
    Simple,
}

impl Restrictor {
    /// Returns the node tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trail => "restrictor_trail",
            Self::Acyclic => "restrictor_acyclic",
            Self::Simple => "restrictor_simple",
        }
    }
}

/// Repetition bounds `{lower,upper}`; `upper` is `None` when unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantifier {
    pub lower: u64,
    pub upper: Option<u64>,
}

impl Quantifier {
    /// `*`
    pub const STAR: Self = Self {
        lower: 0,
        upper: None,
    };
    /// `+`
    pub const PLUS: Self = Self {
        lower: 1,
        upper: None,
    };
}

/// Direction of an edge pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDirection {
    /// `<-[ ]-`, `<-`
    Left,
    /// `~[ ]~`, `~`
    Undirected,
    /// `-[ ]->`, `->`
    Right,
    /// `<~[ ]~`, `<~`
    LeftOrUndirected,
    /// `~[ ]~>`, `~>`
    UndirectedOrRight,
    /// `<-[ ]->`, `<->`
    LeftOrRight,
    /// `-[ ]-`, `-`
    LeftOrUndirectedOrRight,
}

impl EdgeDirection {
    /// Returns the node tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "edge_left",
            Self::Undirected => "edge_undirected",
            Self::Right => "edge_right",
            Self::LeftOrUndirected => "edge_left_or_undirected",
            Self::UndirectedOrRight => "edge_undirected_or_right",
            Self::LeftOrRight => "edge_left_or_right",
            Self::LeftOrUndirectedOrRight => "edge_left_or_undirected_or_right",
        }
    }
}

/// A label expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSpec {
    /// A label name as written.
    Name(String),
    /// `%`
    Wildcard,
    /// `!l`
    Negation(Box<LabelSpec>),
    /// `l & r`
    Conjunction(Box<LabelSpec>, Box<LabelSpec>),
    /// `l | r`
    Disjunction(Box<LabelSpec>, Box<LabelSpec>),
}

/// `(var :label WHERE prefilter)`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodePattern {
    pub variable: Option<String>,
    pub label: Option<LabelSpec>,
    pub prefilter: Option<Expr>,
}

/// An edge with its direction and optional filler.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePattern {
    pub direction: EdgeDirection,
    pub quantifier: Option<Quantifier>,
    pub variable: Option<String>,
    pub label: Option<LabelSpec>,
    pub prefilter: Option<Expr>,
}

impl EdgePattern {
    /// Creates an edge with no filler and no quantifier.
    #[must_use]
    pub const fn new(direction: EdgeDirection) -> Self {
        Self {
            direction,
            quantifier: None,
            variable: None,
            label: None,
            prefilter: None,
        }
    }
}

/// An element of a path pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternPart {
    Node(NodePattern),
    Edge(EdgePattern),
    /// A parenthesized or bracketed sub-pattern.
    Pattern(GraphPattern),
}

/// A path pattern.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphPattern {
    pub restrictor: Option<Restrictor>,
    pub prefilter: Option<Expr>,
    /// Path variable (`p = ...`).
    pub variable: Option<String>,
    pub quantifier: Option<Quantifier>,
    pub parts: Vec<PatternPart>,
}

/// The right-hand side of MATCH.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphMatch {
    pub selector: Option<GraphSelector>,
    pub patterns: Vec<GraphPattern>,
}
