//! Extended grammar target.

use super::Dialect;

/// The extended grammar, a superset of [`super::LegacyDialect`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtendedDialect;

impl Dialect for ExtendedDialect {
    fn name(&self) -> &'static str {
        "extended"
    }
}
