//! Grammar targets.
//!
//! Both targets share one parser and one AST. A [`Dialect`] only gates the
//! productions the legacy grammar never accepted; for every input both
//! accept, they produce identical trees.

mod extended;
mod legacy;

use core::fmt;
use core::str::FromStr;

pub use extended::ExtendedDialect;
pub use legacy::LegacyDialect;

/// Trait for grammar-target-specific behavior.
pub trait Dialect: Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns whether CREATE/DROP TABLE accept `catalog.schema.name`.
    fn supports_qualified_table_names(&self) -> bool {
        true
    }

    /// Returns whether column UNIQUE / PRIMARY KEY / CHECK, table-level
    /// constraints and `CONSTRAINT name` are accepted.
    fn supports_extended_constraints(&self) -> bool {
        true
    }
}

/// Selects a grammar target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DialectKind {
    /// The legacy-compatible grammar.
    Legacy,
    /// The extended grammar.
    #[default]
    Extended,
}

impl DialectKind {
    /// All grammar targets.
    pub const ALL: [Self; 2] = [Self::Legacy, Self::Extended];

    /// Returns the dialect implementation.
    #[must_use]
    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            Self::Legacy => &LegacyDialect,
            Self::Extended => &ExtendedDialect,
        }
    }

    /// Returns the dialect name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.dialect().name()
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a dialect name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dialect '{0}', expected 'legacy' or 'extended'")]
pub struct UnknownDialect(pub String);

impl FromStr for DialectKind {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "extended" => Ok(Self::Extended),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_kind_from_str() {
        assert_eq!("legacy".parse(), Ok(DialectKind::Legacy));
        assert_eq!("EXTENDED".parse(), Ok(DialectKind::Extended));
        assert!("sqlite".parse::<DialectKind>().is_err());
    }

    #[test]
    fn test_default_is_extended() {
        assert_eq!(DialectKind::default(), DialectKind::Extended);
        assert_eq!(DialectKind::default().to_string(), "extended");
    }
}
