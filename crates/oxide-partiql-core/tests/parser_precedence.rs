//! Operator precedence and associativity, checked against both grammar
//! targets.

mod common;
use common::*;

/// Binary operators with their AST tag and precedence level.
const BINARY_OPS: [(&str, &str, u8); 15] = [
    ("OR", "or", 1),
    ("AND", "and", 2),
    ("=", "eq", 3),
    ("<>", "ne", 3),
    ("!=", "ne", 3),
    ("<", "lt", 3),
    ("<=", "lte", 3),
    (">", "gt", 3),
    (">=", "gte", 3),
    ("||", "concat", 4),
    ("+", "plus", 4),
    ("-", "minus", 4),
    ("*", "times", 5),
    ("/", "divide", 5),
    ("%", "modulo", 5),
];

const BAG_OPS: [(&str, &str, &str); 7] = [
    ("UNION", "union", "distinct"),
    ("UNION ALL", "union", "all"),
    ("INTERSECT", "intersect", "distinct"),
    ("EXCEPT DISTINCT", "except", "distinct"),
    ("OUTER UNION", "outer_union", "distinct"),
    ("OUTER INTERSECT ALL", "outer_intersect", "all"),
    ("OUTER EXCEPT", "outer_except", "distinct"),
];

fn node(tag: &str, left: &str, right: &str) -> String {
    format!("({tag} {left} {right})")
}

fn bag(op: &str, quantifier: &str, left: &str, right: &str) -> String {
    format!("(bag_op ({op}) ({quantifier}) {left} {right})")
}

// ============================================================================
// Binary operator pairs
// ============================================================================

#[test]
fn binary_operator_pairs() {
    let (a, b, c) = (id("a"), id("b"), id("c"));
    for (sql1, tag1, level1) in BINARY_OPS {
        for (sql2, tag2, level2) in BINARY_OPS {
            let sql = format!("a {sql1} b {sql2} c");
            let expected = if level1 >= level2 {
                node(tag2, &node(tag1, &a, &b), &c)
            } else {
                node(tag1, &a, &node(tag2, &b, &c))
            };
            assert_query(&sql, &expected);
        }
    }
}

#[test]
fn parentheses_override_precedence() {
    assert_query(
        "(a + b) * c",
        &node("times", &node("plus", &id("a"), &id("b")), &id("c")),
    );
    assert_query(
        "a AND (b OR c)",
        &node("and", &id("a"), &node("or", &id("b"), &id("c"))),
    );
}

// ============================================================================
// Bag operators
// ============================================================================

#[test]
fn bag_operators_bind_loosest() {
    let (a, b, c) = (id("a"), id("b"), id("c"));
    for (bag_sql, bag_tag, quantifier) in BAG_OPS {
        for (sql, tag, _) in BINARY_OPS {
            assert_query(
                &format!("a {bag_sql} b {sql} c"),
                &bag(bag_tag, quantifier, &a, &node(tag, &b, &c)),
            );
            assert_query(
                &format!("a {sql} b {bag_sql} c"),
                &bag(bag_tag, quantifier, &node(tag, &a, &b), &c),
            );
        }
    }
}

#[test]
fn bag_operators_associate_left() {
    let (a, b, c) = (id("a"), id("b"), id("c"));
    for (sql1, tag1, q1) in BAG_OPS {
        for (sql2, tag2, q2) in BAG_OPS {
            assert_query(
                &format!("a {sql1} b {sql2} c"),
                &bag(tag2, q2, &bag(tag1, q1, &a, &b), &c),
            );
        }
    }
}

#[test]
fn bag_operator_between_selects() {
    let select = |table: &str| {
        format!(
            "(select (project (project_star)) (from (scan {} null null null)))",
            id(table)
        )
    };
    assert_query(
        "SELECT * FROM t UNION ALL SELECT * FROM u",
        &bag("union", "all", &select("t"), &select("u")),
    );
}

// ============================================================================
// IS / IS NOT
// ============================================================================

#[test]
fn is_type_precedence() {
    let is_null = |value: &str| format!("(is_type {value} (null_type))");
    let is_not_missing = |value: &str| format!("(not (is_type {value} (missing_type)))");

    assert_query(
        "a IS NULL AND b",
        &node("and", &is_null(&id("a")), &id("b")),
    );
    assert_query(
        "a OR b IS NOT MISSING",
        &node("or", &id("a"), &is_not_missing(&id("b"))),
    );
    assert_query(
        "a + b IS NULL",
        &is_null(&node("plus", &id("a"), &id("b"))),
    );
    assert_query(
        "a = b IS NOT MISSING",
        &is_not_missing(&node("eq", &id("a"), &id("b"))),
    );
    assert_query(
        "a IS NULL = b",
        &node("eq", &is_null(&id("a")), &id("b")),
    );
}

// ============================================================================
// LIKE / IN / BETWEEN
// ============================================================================

#[test]
fn like_precedence() {
    assert_query(
        "a LIKE b AND c",
        &node("and", &format!("(like {} {} null)", id("a"), id("b")), &id("c")),
    );
    assert_query(
        "a || b LIKE c || d ESCAPE e",
        &format!(
            "(like {} {} {})",
            node("concat", &id("a"), &id("b")),
            node("concat", &id("c"), &id("d")),
            id("e")
        ),
    );
    assert_query(
        "a NOT LIKE b",
        &format!("(not (like {} {} null))", id("a"), id("b")),
    );
}

#[test]
fn in_precedence() {
    assert_query(
        "a IN b OR c",
        &node("or", &node("in_collection", &id("a"), &id("b")), &id("c")),
    );
    assert_query(
        "a + 1 NOT IN [1, 2]",
        &format!(
            "(not (in_collection {} (list (lit 1) (lit 2))))",
            node("plus", &id("a"), "(lit 1)")
        ),
    );
}

#[test]
fn between_precedence() {
    assert_query("5 BETWEEN 1 AND 10", "(between (lit 5) (lit 1) (lit 10))");
    assert_query(
        "5 NOT BETWEEN 1 AND 10",
        "(not (between (lit 5) (lit 1) (lit 10)))",
    );
    assert_query(
        "a BETWEEN b AND c AND d",
        &node(
            "and",
            &format!("(between {} {} {})", id("a"), id("b"), id("c")),
            &id("d"),
        ),
    );
    assert_query(
        "a BETWEEN b + 1 AND c * 2",
        &format!(
            "(between {} {} {})",
            id("a"),
            node("plus", &id("b"), "(lit 1)"),
            node("times", &id("c"), "(lit 2)")
        ),
    );
}

// ============================================================================
// Prefix operators
// ============================================================================

#[test]
fn not_binds_looser_than_comparison() {
    assert_query("NOT a = b", &format!("(not {})", node("eq", &id("a"), &id("b"))));
    assert_query(
        "NOT a AND b",
        &node("and", &format!("(not {})", id("a")), &id("b")),
    );
    assert_query(
        "a AND NOT b OR c",
        &node(
            "or",
            &node("and", &id("a"), &format!("(not {})", id("b"))),
            &id("c"),
        ),
    );
    assert_query("NOT NOT a", &format!("(not (not {}))", id("a")));
}

#[test]
fn unary_minus_binds_tightest() {
    assert_query(
        "-a * b",
        &node("times", &format!("(neg {})", id("a")), &id("b")),
    );
    assert_query(
        "- a + b",
        &node("plus", &format!("(neg {})", id("a")), &id("b")),
    );
    assert_query(
        "+a.b",
        &format!(
            "(pos (path {} (path_expr (lit \"b\") (case_insensitive))))",
            id("a")
        ),
    );
}

#[test]
fn negative_literal_fold_boundary() {
    assert_query("-1", "(lit -1)");
    assert_query("-1.5", "(lit -1.5)");
    assert_query("- -1", "(neg (lit -1))");
    assert_query("+1", "(pos (lit 1))");
    assert_query("-(1)", "(neg (lit 1))");
    assert_query("-f()", "(neg (call f))");
    assert_query("-a", &format!("(neg {})", id("a")));
    assert_query("1 - 1", "(minus (lit 1) (lit 1))");
    assert_query("1 - -1", "(minus (lit 1) (lit -1))");
}
