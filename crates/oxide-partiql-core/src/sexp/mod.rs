//! S-expression textual form of the AST.
//!
//! Every AST node converts to an [`SExpr`] through [`ToSexpr`]. The
//! rendered text is deterministic and can be read back with [`parse`],
//! so fixtures can be written by hand and compared structurally:
//!
//! ```
//! use oxide_partiql_core::sexp::{self, ToSexpr};
//!
//! let stmt = oxide_partiql_core::parse("a + 1").unwrap();
//! let expected = sexp::parse(
//!     "(query (plus (id a (case_insensitive) (unqualified)) (lit 1)))",
//! )
//! .unwrap();
//! assert_eq!(stmt.to_sexpr(), expected);
//! ```

mod emit;
mod reader;

use core::fmt;

pub use reader::{ReadError, parse};

/// Compact renderings longer than this are broken over several lines by
/// [`SExpr::pretty`].
const PRETTY_WIDTH: usize = 80;

/// A node of the S-expression mini-format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SExpr {
    /// `(child ...)`
    List(Vec<SExpr>),
    /// A symbol, bare or `'quoted'`.
    Symbol(String),
    /// A `"string"`.
    String(String),
    /// A number, kept as its source text.
    Number(String),
    /// `null`
    Null,
}

impl SExpr {
    /// Creates `(tag children...)`.
    #[must_use]
    pub fn node(tag: &str, children: Vec<Self>) -> Self {
        let mut items = Vec::with_capacity(children.len() + 1);
        items.push(Self::symbol(tag));
        items.extend(children);
        Self::List(items)
    }

    /// Creates `(tag)`.
    #[must_use]
    pub fn tag(tag: &str) -> Self {
        Self::List(vec![Self::symbol(tag)])
    }

    /// Creates a symbol.
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    /// Creates a string.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Creates a number from anything displayable as one.
    #[must_use]
    pub fn number(value: impl fmt::Display) -> Self {
        Self::Number(value.to_string())
    }

    /// Returns the leading symbol of a list.
    #[must_use]
    pub fn head(&self) -> Option<&str> {
        match self {
            Self::List(items) => match items.first() {
                Some(Self::Symbol(s)) => Some(s),
                _ => None,
            },
            _ => None,
        }
    }

    /// Renders on a single line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_compact(&mut out);
        out
    }

    /// Renders over several lines, two spaces per nesting level.
    #[must_use]
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, 0);
        out
    }

    fn write_compact(&self, out: &mut String) {
        match self {
            Self::List(items) => {
                out.push('(');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    item.write_compact(out);
                }
                out.push(')');
            }
            Self::Symbol(s) => write_symbol(out, s),
            Self::String(s) => write_quoted(out, s, '"'),
            Self::Number(n) => out.push_str(n),
            Self::Null => out.push_str("null"),
        }
    }

    fn write_pretty(&self, out: &mut String, indent: usize) {
        let compact = self.render();
        let Self::List(items) = self else {
            out.push_str(&compact);
            return;
        };
        if indent + compact.len() <= PRETTY_WIDTH || items.len() < 2 {
            out.push_str(&compact);
            return;
        }
        out.push('(');
        items[0].write_compact(out);
        for item in &items[1..] {
            out.push('\n');
            out.push_str(&" ".repeat(indent + 2));
            item.write_pretty(out, indent + 2);
        }
        out.push(')');
    }
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Returns true if `s` can be written as a bare symbol.
fn is_bare_symbol(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && s != "null"
}

fn write_symbol(out: &mut String, s: &str) {
    if is_bare_symbol(s) {
        out.push_str(s);
    } else {
        write_quoted(out, s, '\'');
    }
}

fn write_quoted(out: &mut String, s: &str, quote: char) {
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

/// Conversion of AST nodes into their S-expression form.
pub trait ToSexpr {
    /// Returns the S-expression form of the node.
    fn to_sexpr(&self) -> SExpr;
}
