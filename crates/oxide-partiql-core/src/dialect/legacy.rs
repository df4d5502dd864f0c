//! Legacy-compatible grammar target.

use super::Dialect;

/// The legacy grammar: unqualified table names and NULL / NOT NULL
/// column constraints only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LegacyDialect;

impl Dialect for LegacyDialect {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn supports_qualified_table_names(&self) -> bool {
        false
    }

    fn supports_extended_constraints(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_dialect() {
        let dialect = LegacyDialect;
        assert_eq!(dialect.name(), "legacy");
        assert!(!dialect.supports_qualified_table_names());
        assert!(!dialect.supports_extended_constraints());
    }
}
