//! Tests for path navigation steps.

mod common;
use common::*;

fn field(name: &str) -> String {
    format!("(path_expr (lit \"{name}\") (case_insensitive))")
}

fn quoted_field(name: &str) -> String {
    format!("(path_expr (lit \"{name}\") (case_sensitive))")
}

#[test]
fn dotted_steps() {
    assert_query(
        "a.b.c",
        &format!("(path {} {} {})", id("a"), field("b"), field("c")),
    );
}

#[test]
fn quoted_step_is_case_sensitive() {
    assert_query(
        "a.\"B\"",
        &format!("(path {} {})", id("a"), quoted_field("B")),
    );
}

#[test]
fn bracket_steps_are_case_sensitive() {
    assert_query(
        "a[0]['x']",
        &format!(
            "(path {} (path_expr (lit 0) (case_sensitive)) (path_expr (lit \"x\") (case_sensitive)))",
            id("a")
        ),
    );
    assert_query(
        "a[b + 1]",
        &format!(
            "(path {} (path_expr (plus {} (lit 1)) (case_sensitive)))",
            id("a"),
            id("b")
        ),
    );
}

#[test]
fn wildcard_and_unpivot_steps() {
    assert_query(
        "a[*].b",
        &format!("(path {} (path_wildcard) {})", id("a"), field("b")),
    );
    assert_query(
        "a.*.b",
        &format!("(path {} (path_unpivot) {})", id("a"), field("b")),
    );
}

#[test]
fn keyword_names_as_steps() {
    assert_query(
        "a.first.key",
        &format!("(path {} {} {})", id("a"), field("first"), field("key")),
    );
}

#[test]
fn steps_on_non_identifier_roots() {
    assert_query(
        "f(x).y",
        &format!("(path (call f {}) {})", id("x"), field("y")),
    );
    assert_query(
        "(a).b",
        &format!("(path {} {})", id("a"), field("b")),
    );
    assert_query(
        "{'a': 1}.a",
        &format!("(path (struct (expr_pair (lit \"a\") (lit 1))) {})", field("a")),
    );
    assert_query("[1, 2][0]", "(path (list (lit 1) (lit 2)) (path_expr (lit 0) (case_sensitive)))");
    assert_query(
        "@x.y",
        &format!(
            "(path (id x (case_insensitive) (locals_first)) {})",
            field("y")
        ),
    );
}

#[test]
fn parameter_as_index() {
    assert_query(
        "a[?]",
        &format!("(path {} (path_expr (parameter 1) (case_sensitive)))", id("a")),
    );
}

#[test]
fn path_after_negative_literal() {
    assert_query("-1[0]", "(path (lit -1) (path_expr (lit 0) (case_sensitive)))");
}

#[test]
fn dot_requires_a_name() {
    let err = parse_err("a.?");
    assert_eq!(err.token_value, "?");
    assert_eq!(err.column, 3);

    let err = parse_err("a.1");
    assert_eq!(err.token_value, ".1");
    assert_eq!(err.column, 2);
}
