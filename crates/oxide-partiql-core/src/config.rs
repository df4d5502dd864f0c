//! Parser configuration.

use crate::dialect::DialectKind;

/// Default nesting limit. Inputs at this depth parse within a 2 MiB
/// thread stack in unoptimized builds.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Nesting levels taken by one SELECT or PIVOT sub-query.
pub const SUBQUERY_DEPTH: usize = 4;

/// Options for a [`crate::Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Grammar target.
    pub dialect: DialectKind,
    /// Maximum nesting of expressions, graph sub-patterns and sub-queries.
    /// Every nested expression takes one level and every sub-query takes
    /// [`SUBQUERY_DEPTH`] more.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            dialect: DialectKind::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the grammar target.
    #[must_use]
    pub const fn with_dialect(mut self, dialect: DialectKind) -> Self {
        self.dialect = dialect;
        self
    }

    /// Sets the nesting limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
