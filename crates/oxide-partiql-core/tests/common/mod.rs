#![allow(dead_code)]

use oxide_partiql_core::sexp::{self, ToSexpr};
use oxide_partiql_core::{DialectKind, ErrorCode, ParseError, Parser, ParserConfig, Statement};

pub const DIALECTS: [DialectKind; 2] = [DialectKind::Legacy, DialectKind::Extended];

pub fn parse_with(sql: &str, dialect: DialectKind) -> Statement {
    Parser::with_config(sql, ParserConfig::new().with_dialect(dialect))
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse ({dialect}): {sql}\nError: {e:?}"))
}

pub fn parse(sql: &str) -> Statement {
    parse_with(sql, DialectKind::Extended)
}

pub fn parse_err_with(sql: &str, dialect: DialectKind) -> ParseError {
    Parser::with_config(sql, ParserConfig::new().with_dialect(dialect))
        .parse_statement()
        .expect_err(&format!("Expected parse error ({dialect}) for: {sql}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    parse_err_with(sql, DialectKind::Extended)
}

/// Renders an unqualified, case-insensitive identifier.
pub fn id(name: &str) -> String {
    format!("(id {name} (case_insensitive) (unqualified))")
}

/// Asserts that `sql` parses to `expected` under both grammar targets.
pub fn assert_parses(sql: &str, expected: &str) {
    let expected = sexp::parse(expected)
        .unwrap_or_else(|e| panic!("Bad fixture for: {sql}\nError: {e}"));
    for dialect in DIALECTS {
        let actual = parse_with(sql, dialect).to_sexpr();
        assert_eq!(
            actual,
            expected,
            "AST mismatch ({dialect}) for: {sql}\n  Actual:   {}\n  Expected: {}",
            actual.render(),
            expected.render()
        );
    }
}

/// Asserts that `sql` is a query whose body is `expected`.
pub fn assert_query(sql: &str, expected: &str) {
    assert_parses(sql, &format!("(query {expected})"));
}

/// Asserts that `sql` and `other` produce the same AST under both targets.
pub fn assert_same_ast(sql: &str, other: &str) {
    for dialect in DIALECTS {
        assert_eq!(
            parse_with(sql, dialect).to_sexpr(),
            parse_with(other, dialect).to_sexpr(),
            "ASTs differ ({dialect}):\n  {sql}\n  {other}"
        );
    }
}

/// Asserts the code and position of the error raised by `sql` under both
/// grammar targets.
pub fn assert_error(sql: &str, code: ErrorCode, line: u32, column: u32, token_value: &str) {
    for dialect in DIALECTS {
        let err = parse_err_with(sql, dialect);
        assert_eq!(err.code, code, "code ({dialect}) for: {sql}");
        assert_eq!(
            (err.line, err.column),
            (line, column),
            "position ({dialect}) for: {sql}"
        );
        assert_eq!(err.token_value, token_value, "token ({dialect}) for: {sql}");
    }
}

/// Runs `f` on a freshly spawned thread with the default stack size.
pub fn on_default_stack<F>(f: F)
where
    F: FnOnce() + Send + 'static,
{
    std::thread::spawn(f).join().expect("test thread panicked");
}

/// Runs `f` on a thread with a large stack, for input whose AST is deep
/// enough that dropping or rendering it needs one.
pub fn with_big_stack<F>(f: F)
where
    F: FnOnce() + Send + 'static,
{
    std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(f)
        .expect("spawn test thread")
        .join()
        .expect("test thread panicked");
}
