//! Tests for INSERT, UPDATE, SET, REMOVE, DELETE and RETURNING.

mod common;
use common::*;

use oxide_partiql_core::ErrorCode;

fn dml(ops: &str, rest: &str) -> String {
    format!("(dml (operations (dml_op_list {ops})){rest})")
}

fn from(table: &str) -> String {
    format!(" (from (scan {} null null null))", id(table))
}

fn field(root: &str, name: &str) -> String {
    format!(
        "(path {} (path_expr (lit \"{name}\") (case_insensitive)))",
        id(root)
    )
}

fn set(target: &str, value: &str) -> String {
    format!("(set (assignment {target} {value}))")
}

/// Asserts an unexpected-token error at the last occurrence of `token`.
fn assert_rejected_at(sql: &str, token: &str) {
    let column = sql.rfind(token).expect("token in statement") + 1;
    let column = u32::try_from(column).expect("column fits");
    assert_error(sql, ErrorCode::ParseUnexpectedToken, 1, column, token);
}

// ============================================================================
// INSERT
// ============================================================================

#[test]
fn insert_bag() {
    assert_parses(
        "INSERT INTO foo << {'id': 1} >>",
        &dml(
            &format!(
                "(insert {} null (bag (struct (expr_pair (lit \"id\") (lit 1)))) null)",
                id("foo")
            ),
            "",
        ),
    );
}

#[test]
fn insert_with_alias_and_query() {
    assert_parses(
        "INSERT INTO foo AS f SELECT * FROM bar",
        &dml(
            &format!(
                "(insert {} f (select (project (project_star)) (from (scan {} null null null))) null)",
                id("foo"),
                id("bar")
            ),
            "",
        ),
    );
}

#[test]
fn insert_conflict_actions() {
    let cases = [
        ("ON CONFLICT DO NOTHING", "(do_nothing)".to_string()),
        (
            "ON CONFLICT DO REPLACE EXCLUDED",
            "(do_replace (excluded) null)".to_string(),
        ),
        (
            "ON CONFLICT DO UPDATE EXCLUDED WHERE foo.id > 2",
            format!("(do_update (excluded) (gt {} (lit 2)))", field("foo", "id")),
        ),
    ];
    for (clause, action) in cases {
        assert_parses(
            &format!("INSERT INTO foo <<1>> {clause}"),
            &dml(
                &format!("(insert {} null (bag (lit 1)) {action})", id("foo")),
                "",
            ),
        );
    }
}

#[test]
fn replace_and_upsert_shorthands() {
    assert_parses(
        "REPLACE INTO foo <<1>>",
        &dml(
            &format!("(insert {} null (bag (lit 1)) (do_replace (excluded) null))", id("foo")),
            "",
        ),
    );
    assert_parses(
        "UPSERT INTO foo AS f <<1>>",
        &dml(
            &format!("(insert {} f (bag (lit 1)) (do_update (excluded) null))", id("foo")),
            "",
        ),
    );
}

#[test]
fn insert_value_legacy_form() {
    assert_parses(
        "INSERT INTO foo VALUE 1",
        &dml(&format!("(insert_value {} (lit 1) null null)", id("foo")), ""),
    );
    assert_parses(
        "INSERT INTO foo.bar VALUE {'a': 1} AT 0 ON CONFLICT WHERE TRUE DO NOTHING",
        &dml(
            &format!(
                "(insert_value {} (struct (expr_pair (lit \"a\") (lit 1))) (lit 0) (on_conflict (lit true) (do_nothing)))",
                field("foo", "bar")
            ),
            "",
        ),
    );
}

#[test]
fn conflict_syntaxes_do_not_mix() {
    assert_rejected_at(
        "INSERT INTO foo <<{'id': 1}>> ON CONFLICT WHERE TRUE DO NOTHING",
        "WHERE",
    );
    assert_rejected_at(
        "INSERT INTO foo <<{'id': 1}>> ON CONFLICT DO NOTHING WHERE foo.id > 2",
        "WHERE",
    );
    assert_rejected_at("INSERT INTO foo VALUE 1 ON CONFLICT DO NOTHING", "DO");
}

// ============================================================================
// UPDATE / FROM / SET / REMOVE
// ============================================================================

#[test]
fn update_set_where() {
    assert_parses(
        "UPDATE t SET a = 1, b.c = 2 WHERE x",
        &dml(
            &format!(
                "{} {}",
                set(&id("a"), "(lit 1)"),
                set(&field("b", "c"), "(lit 2)")
            ),
            &format!("{} (where {})", from("t"), id("x")),
        ),
    );
}

#[test]
fn update_with_multiple_clauses() {
    assert_parses(
        "UPDATE t SET a = 1 REMOVE b SET c = 2",
        &dml(
            &format!(
                "{} (remove {}) {}",
                set(&id("a"), "(lit 1)"),
                id("b"),
                set(&id("c"), "(lit 2)")
            ),
            &from("t"),
        ),
    );
}

#[test]
fn from_where_operations_keep_textual_order() {
    assert_parses(
        "FROM x WHERE a = b SET k = 5 REMOVE y INSERT INTO c <<1>> SET z = 1",
        &dml(
            &format!(
                "{} (remove {}) (insert {} null (bag (lit 1)) null) {}",
                set(&id("k"), "(lit 5)"),
                id("y"),
                id("c"),
                set(&id("z"), "(lit 1)")
            ),
            &format!("{} (where (eq {} {}))", from("x"), id("a"), id("b")),
        ),
    );
}

#[test]
fn standalone_operations() {
    assert_parses("SET a = 1", &dml(&set(&id("a"), "(lit 1)"), ""));
    assert_parses(
        "REMOVE a.b",
        &dml(&format!("(remove {})", field("a", "b")), ""),
    );
}

#[test]
fn from_requires_an_operation() {
    let err = parse_err("FROM t WHERE a = 1");
    assert_eq!(err.token_description, "EOF");
}

// ============================================================================
// DELETE
// ============================================================================

#[test]
fn delete_from_where() {
    assert_parses(
        "DELETE FROM t AS x WHERE x.a = 1",
        &dml(
            "(delete)",
            &format!(
                " (from (scan {} x null null)) (where (eq {} (lit 1)))",
                id("t"),
                field("x", "a")
            ),
        ),
    );
}

// ============================================================================
// RETURNING
// ============================================================================

#[test]
fn returning_elements() {
    assert_parses(
        "UPDATE t SET a = 1 RETURNING MODIFIED OLD *, ALL NEW a",
        &dml(
            &set(&id("a"), "(lit 1)"),
            &format!(
                "{} (returning (returning_expr (returning_elem (modified_old) (returning_wildcard)) (returning_elem (all_new) (returning_column {}))))",
                from("t"),
                id("a")
            ),
        ),
    );
}

#[test]
fn returning_only_at_the_end() {
    assert_rejected_at(
        "UPDATE t SET a = 1 RETURNING ALL OLD * SET b = 2",
        "SET",
    );
    let err = parse_err("DELETE FROM t RETURNING ALL NEW * RETURNING ALL OLD *");
    assert_eq!(err.token_value, "RETURNING");
    assert_eq!(err.column, 35);
}

#[test]
fn returning_requires_mapping() {
    let err = parse_err("DELETE FROM t RETURNING a");
    assert_eq!(err.token_value, "a");
}
