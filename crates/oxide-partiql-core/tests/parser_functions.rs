//! Tests for function calls, CASE, CAST and the special call forms.

mod common;
use common::*;

// ============================================================================
// Calls
// ============================================================================

#[test]
fn call_names_are_lowercased() {
    assert_query(
        "UPPER(a, 'x')",
        &format!("(call upper {} (lit \"x\"))", id("a")),
    );
    assert_query("f()", "(call f)");
}

#[test]
fn count_star() {
    assert_query("COUNT(*)", "(call_agg (all) count (lit 1))");
}

#[test]
fn aggregate_quantifiers() {
    assert_query("MAX(a)", &format!("(call_agg (all) max {})", id("a")));
    assert_query(
        "min(DISTINCT a)",
        &format!("(call_agg (distinct) min {})", id("a")),
    );
}

// ============================================================================
// CASE
// ============================================================================

#[test]
fn searched_case() {
    assert_query(
        "CASE WHEN a THEN 1 WHEN b THEN 2 ELSE 3 END",
        &format!(
            "(searched_case (expr_pair_list (expr_pair {} (lit 1)) (expr_pair {} (lit 2))) (lit 3))",
            id("a"),
            id("b")
        ),
    );
}

#[test]
fn simple_case() {
    assert_query(
        "CASE a WHEN 1 THEN 'x' END",
        &format!(
            "(simple_case {} (expr_pair_list (expr_pair (lit 1) (lit \"x\"))) null)",
            id("a")
        ),
    );
}

#[test]
fn case_requires_when() {
    let err = parse_err("CASE a END");
    assert_eq!(err.token_value, "END");
}

// ============================================================================
// CAST
// ============================================================================

#[test]
fn cast_kinds() {
    assert_query("CAST(a AS INT)", &format!("(cast {} (integer_type))", id("a")));
    assert_query(
        "CAN_CAST(a AS DECIMAL(5, 2))",
        &format!("(can_cast {} (decimal_type 5 2))", id("a")),
    );
    assert_query(
        "CAN_LOSSLESS_CAST(a AS STRING)",
        &format!("(can_lossless_cast {} (string_type))", id("a")),
    );
}

#[test]
fn cast_types() {
    let cases = [
        ("VARCHAR(10)", "(character_varying_type 10)"),
        ("CHARACTER VARYING", "(character_varying_type null)"),
        ("CHAR(3)", "(character_type 3)"),
        ("DOUBLE PRECISION", "(double_precision_type)"),
        ("FLOAT(8)", "(float_type 8)"),
        ("NUMERIC(4)", "(numeric_type 4 null)"),
        ("TIME(3) WITH TIME ZONE", "(time_with_time_zone_type 3)"),
        ("TIME", "(time_type null)"),
        ("BIGINT", "(integer8_type)"),
        ("SMALLINT", "(smallint_type)"),
        ("BOOL", "(boolean_type)"),
        ("TIMESTAMP", "(timestamp_type)"),
        ("TUPLE", "(tuple_type)"),
        ("ANY", "(any_type)"),
        ("MISSING", "(missing_type)"),
        ("my_type", "(custom_type my_type)"),
    ];
    for (ty, expected) in cases {
        assert_query(
            &format!("CAST(a AS {ty})"),
            &format!("(cast {} {expected})", id("a")),
        );
    }
}

// ============================================================================
// Special forms
// ============================================================================

#[test]
fn nullif_and_coalesce() {
    assert_query(
        "NULLIF(a, b)",
        &format!("(null_if {} {})", id("a"), id("b")),
    );
    assert_query(
        "COALESCE(a, NULL, 1)",
        &format!("(coalesce {} (lit null) (lit 1))", id("a")),
    );
    let err = parse_err("COALESCE()");
    assert_eq!(err.token_value, ")");
}

#[test]
fn substring_forms() {
    let s = id("s");
    assert_query(
        "SUBSTRING(s FROM 2 FOR 3)",
        &format!("(call substring {s} (lit 2) (lit 3))"),
    );
    assert_query(
        "SUBSTRING(s FROM 2)",
        &format!("(call substring {s} (lit 2))"),
    );
    assert_query(
        "SUBSTRING(s, 2, 3)",
        &format!("(call substring {s} (lit 2) (lit 3))"),
    );
}

#[test]
fn trim_forms() {
    let s = id("s");
    assert_query("TRIM(s)", &format!("(call trim {s})"));
    assert_query(
        "TRIM(LEADING 'x' FROM s)",
        &format!("(call trim (lit \"leading\") (lit \"x\") {s})"),
    );
    assert_query(
        "TRIM(TRAILING FROM s)",
        &format!("(call trim (lit \"trailing\") {s})"),
    );
    assert_query(
        "TRIM('x' FROM s)",
        &format!("(call trim (lit \"both\") (lit \"x\") {s})"),
    );
}

#[test]
fn extract_form() {
    assert_query(
        "EXTRACT(YEAR FROM d)",
        &format!("(call extract (lit \"year\") {})", id("d")),
    );
    let err = parse_err("EXTRACT(1 FROM d)");
    assert_eq!(err.token_value, "1");
}
