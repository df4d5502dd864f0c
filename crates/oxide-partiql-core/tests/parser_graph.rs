//! Tests for graph MATCH expressions.

mod common;
use common::*;

use oxide_partiql_core::ErrorCode;

fn node(var: &str) -> String {
    format!("(node (variable {var}))")
}

fn gpml(selector: &str, patterns: &[&str]) -> String {
    format!("(gpml_pattern {selector} {})", patterns.join(" "))
}

fn pattern(fields: &str, parts: &[&str]) -> String {
    let sep = if fields.is_empty() { "" } else { " " };
    format!(
        "(graph_match_pattern {fields}{sep}(parts ({})))",
        parts.join(" ")
    )
}

fn graph_match(graph: &str, m: &str) -> String {
    format!("(graph_match {} {m})", id(graph))
}

// ============================================================================
// Placement and parenthesization
// ============================================================================

#[test]
fn parenthesized_match_expression() {
    assert_query(
        "(MyGraph MATCH (x))",
        &graph_match("MyGraph", &gpml("null", &[&pattern("", &[&node("x")])])),
    );
}

#[test]
fn bare_match_is_rejected_at_top_level() {
    assert_error(
        "MyGraph MATCH (x)",
        ErrorCode::ParseUnexpectedToken,
        1,
        9,
        "MATCH",
    );
    assert_error(
        "MyGraph MATCH (x) UNION SELECT * FROM tbl1",
        ErrorCode::ParseUnexpectedToken,
        1,
        9,
        "MATCH",
    );
}

#[test]
fn parenthesized_match_as_bag_operand() {
    assert_query(
        "(MyGraph MATCH (x)) UNION SELECT * FROM tbl1",
        &format!(
            "(bag_op (union) (distinct) {} (select (project (project_star)) (from (scan {} null null null))))",
            graph_match("MyGraph", &gpml("null", &[&pattern("", &[&node("x")])])),
            id("tbl1")
        ),
    );
}

#[test]
fn match_as_sole_from_source() {
    assert_query(
        "SELECT * FROM g MATCH (a)-[e:L]->(b)",
        &format!(
            "(select (project (project_star)) (from (scan {} null null null)))",
            graph_match(
                "g",
                &gpml(
                    "null",
                    &[&pattern(
                        "",
                        &[
                            &node("a"),
                            "(edge (direction (edge_right)) (variable e) (label (label_name L)))",
                            &node("b"),
                        ],
                    )],
                ),
            )
        ),
    );
}

#[test]
fn match_in_join_requires_parentheses() {
    assert!(parse("SELECT * FROM t, (g MATCH (x))").to_string().contains("(graph_match"));
    assert!(parse("SELECT * FROM (g MATCH (x)), t").to_string().contains("(join (inner)"));

    let err = parse_err("SELECT * FROM t, g MATCH (x)");
    assert_eq!(err.token_value, "MATCH");
    assert_eq!(err.column, 20);

    let err = parse_err("SELECT * FROM g MATCH (x), t");
    assert_eq!(err.token_value, ",");
    assert_eq!(err.column, 26);

    let err = parse_err("SELECT * FROM g MATCH (x) CROSS JOIN t");
    assert_eq!(err.token_value, "CROSS");
}

#[test]
fn match_with_multiple_patterns() {
    assert_query(
        "(g MATCH (a), (b))",
        &graph_match(
            "g",
            &gpml(
                "null",
                &[&pattern("", &[&node("a")]), &pattern("", &[&node("b")])],
            ),
        ),
    );
}

// ============================================================================
// Patterns
// ============================================================================

#[test]
fn node_filler() {
    assert_query(
        "(g MATCH (a:Person WHERE a.age > 21))",
        &graph_match(
            "g",
            &gpml(
                "null",
                &[&pattern(
                    "",
                    &[&format!(
                        "(node (prefilter (gt (path {} (path_expr (lit \"age\") (case_insensitive))) (lit 21))) (variable a) (label (label_name Person)))",
                        id("a")
                    )],
                )],
            ),
        ),
    );
    assert_query(
        "(g MATCH ())",
        &graph_match("g", &gpml("null", &[&pattern("", &["(node)"])])),
    );
}

#[test]
fn restrictor_and_path_variable() {
    assert_query(
        "(g MATCH TRAIL p = (a)-(b))",
        &graph_match(
            "g",
            &gpml(
                "null",
                &[&pattern(
                    "(restrictor (restrictor_trail)) (variable p)",
                    &[
                        &node("a"),
                        "(edge (direction (edge_left_or_undirected_or_right)))",
                        &node("b"),
                    ],
                )],
            ),
        ),
    );
}

#[test]
fn sub_pattern_with_prefilter_and_quantifier() {
    assert_query(
        "(g MATCH [(a)-[e]->(b) WHERE a = b]{1,3})",
        &graph_match(
            "g",
            &gpml(
                "null",
                &[&pattern(
                    "",
                    &[&format!(
                        "(pattern {})",
                        pattern(
                            &format!(
                                "(prefilter (eq {} {})) (quantifier (graph_match_quantifier 1 3))",
                                id("a"),
                                id("b")
                            ),
                            &[
                                &node("a"),
                                "(edge (direction (edge_right)) (variable e))",
                                &node("b"),
                            ],
                        )
                    )],
                )],
            ),
        ),
    );
}

#[test]
fn parenthesized_sub_pattern() {
    assert_query(
        "(g MATCH (ACYCLIC (a)~(b))+)",
        &graph_match(
            "g",
            &gpml(
                "null",
                &[&pattern(
                    "",
                    &[&format!(
                        "(pattern {})",
                        pattern(
                            "(restrictor (restrictor_acyclic)) (quantifier (graph_match_quantifier 1 null))",
                            &[&node("a"), "(edge (direction (edge_undirected)))", &node("b")],
                        )
                    )],
                )],
            ),
        ),
    );
}

#[test]
fn edge_quantifiers() {
    assert_query(
        "(g MATCH (a)->*(b)-[e]->{2,}(c))",
        &graph_match(
            "g",
            &gpml(
                "null",
                &[&pattern(
                    "",
                    &[
                        &node("a"),
                        "(edge (direction (edge_right)) (quantifier (graph_match_quantifier 0 null)))",
                        &node("b"),
                        "(edge (direction (edge_right)) (quantifier (graph_match_quantifier 2 null)) (variable e))",
                        &node("c"),
                    ],
                )],
            ),
        ),
    );
}

#[test]
fn selectors() {
    let cases = [
        ("ANY SHORTEST", "(selector_any_shortest)"),
        ("ALL SHORTEST", "(selector_all_shortest)"),
        ("ANY", "(selector_any)"),
        ("ANY 3", "(selector_any_k 3)"),
        ("SHORTEST 2", "(selector_shortest_k 2)"),
        ("SHORTEST 2 GROUP", "(selector_shortest_k_group 2)"),
    ];
    for (selector, expected) in cases {
        assert_query(
            &format!("(g MATCH {selector} (a))"),
            &graph_match("g", &gpml(expected, &[&pattern("", &[&node("a")])])),
        );
    }
}

// ============================================================================
// Label expressions
// ============================================================================

#[test]
fn label_precedence_matches_explicit_grouping() {
    assert_same_ast(
        "(g MATCH (x: L1|L2&L3|!L4|(L5&%)))",
        "(g MATCH (x: ((L1 | (L2&L3)) | !L4) | (L5&%)))",
    );
}

#[test]
fn label_expression_shape() {
    assert_query(
        "(g MATCH (x: A|B&!C))",
        &graph_match(
            "g",
            &gpml(
                "null",
                &[&pattern(
                    "",
                    &["(node (variable x) (label (label_disj (label_name A) (label_conj (label_name B) (label_negation (label_name C))))))"],
                )],
            ),
        ),
    );
}

#[test]
fn label_requires_a_name() {
    let err = parse_err("(g MATCH (x: |A))");
    assert_eq!(err.token_value, "|");
}
