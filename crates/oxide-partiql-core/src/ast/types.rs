//! PartiQL data type definitions.

use core::fmt;

/// A type named in CAST, IS and column declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Null,
    Missing,
    Boolean,

    // Integer types
    /// 2-byte integer.
    Smallint,
    /// `INT4`/`INTEGER4`
    Integer4,
    /// `INT8`/`INTEGER8`/`BIGINT`
    Integer8,
    /// Unbounded integer.
    Integer,

    // Approximate and exact numerics
    /// Float with optional precision.
    Float(Option<u32>),
    Real,
    DoublePrecision,
    /// Decimal with optional precision and scale.
    Decimal {
        precision: Option<u32>,
        scale: Option<u32>,
    },
    /// Numeric with optional precision and scale.
    Numeric {
        precision: Option<u32>,
        scale: Option<u32>,
    },

    // Character types
    /// `CHAR[ACTER](n)`
    Character(Option<u32>),
    /// `VARCHAR(n)` or `CHARACTER VARYING(n)`
    CharacterVarying(Option<u32>),
    String,
    Symbol,
    Blob,
    Clob,

    // Date/time types
    Date,
    /// Time with optional fractional precision.
    Time(Option<u32>),
    /// `TIME [(p)] WITH TIME ZONE`
    TimeWithTimeZone(Option<u32>),
    Timestamp,

    // Collection and container types
    Struct,
    Tuple,
    List,
    Sexp,
    Bag,
    Any,

    /// Any other type name, lowercased.
    Custom(String),
}

impl Type {
    /// Returns the node tag.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Null => "null_type",
            Self::Missing => "missing_type",
            Self::Boolean => "boolean_type",
            Self::Smallint => "smallint_type",
            Self::Integer4 => "integer4_type",
            Self::Integer8 => "integer8_type",
            Self::Integer => "integer_type",
            Self::Float(_) => "float_type",
            Self::Real => "real_type",
            Self::DoublePrecision => "double_precision_type",
            Self::Decimal { .. } => "decimal_type",
            Self::Numeric { .. } => "numeric_type",
            Self::Character(_) => "character_type",
            Self::CharacterVarying(_) => "character_varying_type",
            Self::String => "string_type",
            Self::Symbol => "symbol_type",
            Self::Blob => "blob_type",
            Self::Clob => "clob_type",
            Self::Date => "date_type",
            Self::Time(_) => "time_type",
            Self::TimeWithTimeZone(_) => "time_with_time_zone_type",
            Self::Timestamp => "timestamp_type",
            Self::Struct => "struct_type",
            Self::Tuple => "tuple_type",
            Self::List => "list_type",
            Self::Sexp => "sexp_type",
            Self::Bag => "bag_type",
            Self::Any => "any_type",
            Self::Custom(_) => "custom_type",
        }
    }

    /// Looks up a parameterless type by its leading word (case-insensitive).
    ///
    /// Types taking parameters are returned with the parameters unset;
    /// multi-word types return their first-word form.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        let ty = match word.to_ascii_uppercase().as_str() {
            "NULL" => Self::Null,
            "MISSING" => Self::Missing,
            "BOOL" | "BOOLEAN" => Self::Boolean,
            "SMALLINT" | "INT2" | "INTEGER2" => Self::Smallint,
            "INT4" | "INTEGER4" => Self::Integer4,
            "INT8" | "INTEGER8" | "BIGINT" => Self::Integer8,
            "INT" | "INTEGER" => Self::Integer,
            "FLOAT" => Self::Float(None),
            "REAL" => Self::Real,
            "DOUBLE" => Self::DoublePrecision,
            "DECIMAL" | "DEC" => Self::Decimal {
                precision: None,
                scale: None,
            },
            "NUMERIC" => Self::Numeric {
                precision: None,
                scale: None,
            },
            "CHAR" | "CHARACTER" => Self::Character(None),
            "VARCHAR" => Self::CharacterVarying(None),
            "STRING" => Self::String,
            "SYMBOL" => Self::Symbol,
            "BLOB" => Self::Blob,
            "CLOB" => Self::Clob,
            "DATE" => Self::Date,
            "TIME" => Self::Time(None),
            "TIMESTAMP" => Self::Timestamp,
            "STRUCT" => Self::Struct,
            "TUPLE" => Self::Tuple,
            "LIST" => Self::List,
            "SEXP" => Self::Sexp,
            "BAG" => Self::Bag,
            "ANY" => Self::Any,
            _ => return None,
        };
        Some(ty)
    }
}

fn fmt_params(f: &mut fmt::Formatter<'_>, name: &str, params: &[Option<u32>]) -> fmt::Result {
    f.write_str(name)?;
    let present: Vec<String> = params.iter().flatten().map(u32::to_string).collect();
    if !present.is_empty() {
        write!(f, "({})", present.join(", "))?;
    }
    Ok(())
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(p) => fmt_params(f, "FLOAT", &[*p]),
            Self::Decimal { precision, scale } => fmt_params(f, "DECIMAL", &[*precision, *scale]),
            Self::Numeric { precision, scale } => fmt_params(f, "NUMERIC", &[*precision, *scale]),
            Self::Character(n) => fmt_params(f, "CHAR", &[*n]),
            Self::CharacterVarying(n) => fmt_params(f, "VARCHAR", &[*n]),
            Self::Time(p) => fmt_params(f, "TIME", &[*p]),
            Self::TimeWithTimeZone(p) => {
                fmt_params(f, "TIME", &[*p])?;
                f.write_str(" WITH TIME ZONE")
            }
            Self::DoublePrecision => f.write_str("DOUBLE PRECISION"),
            Self::Custom(name) => f.write_str(name),
            other => {
                let tag = other.tag();
                f.write_str(&tag[..tag.len() - "_type".len()].to_ascii_uppercase())
            }
        }
    }
}
