//! PartiQL Parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing.

mod ddl;
mod dml;
mod error;
mod expr;
mod graph;
mod parser;
mod pratt;
mod query;

pub use error::{ErrorCode, ParseError, Property, PropertyMap, PropertyValue};
pub use parser::Parser;
