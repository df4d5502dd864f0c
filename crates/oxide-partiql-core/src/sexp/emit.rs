//! `ToSexpr` implementations for the AST.
//!
//! Positional nodes render absent children as `null`; record nodes
//! (`select`, `dml`, graph pattern records) render `(field value)`
//! children and omit absent fields.

use super::{SExpr, ToSexpr};
use crate::ast::{
    ColumnConstraint, ColumnConstraintDef, ColumnDeclaration, ConflictAction, DdlOp, Dml, DmlOp,
    EdgePattern, Exec, Expr, FromSource, GraphMatch, GraphPattern, GraphSelector, GroupBy,
    GroupingStrategy, Identifier, LabelSpec, Literal, NodePattern, NullsSpec, OrderBy,
    OrderingSpec, PathStep, PatternPart, ProjectItem, Projection, Quantifier, Returning,
    ReturningColumn, Select, SortSpec, Statement, StatementKind, TableConstraint,
    TableConstraintDef, TableDefPart, TableName, Type,
};

fn boxed(expr: &Expr) -> SExpr {
    expr.to_sexpr()
}

fn opt<T: ToSexpr>(value: Option<&T>) -> SExpr {
    value.map_or(SExpr::Null, ToSexpr::to_sexpr)
}

fn opt_symbol(value: Option<&String>) -> SExpr {
    value.map_or(SExpr::Null, |s| SExpr::symbol(s.as_str()))
}

fn opt_number(value: Option<u32>) -> SExpr {
    value.map_or(SExpr::Null, SExpr::number)
}

fn all<T: ToSexpr>(values: &[T]) -> Vec<SExpr> {
    values.iter().map(ToSexpr::to_sexpr).collect()
}

/// Pushes `(field value)` when `value` is present.
fn field(fields: &mut Vec<SExpr>, name: &str, value: Option<SExpr>) {
    if let Some(value) = value {
        fields.push(SExpr::node(name, vec![value]));
    }
}

fn expr_pairs(tag: &str, pairs: &[(Expr, Expr)]) -> Vec<SExpr> {
    pairs
        .iter()
        .map(|(a, b)| SExpr::node(tag, vec![a.to_sexpr(), b.to_sexpr()]))
        .collect()
}

impl ToSexpr for Statement {
    fn to_sexpr(&self) -> SExpr {
        self.kind.to_sexpr()
    }
}

impl ToSexpr for StatementKind {
    fn to_sexpr(&self) -> SExpr {
        match self {
            Self::Query(expr) => SExpr::node("query", vec![expr.to_sexpr()]),
            Self::Dml(dml) => dml.to_sexpr(),
            Self::Ddl(op) => SExpr::node("ddl", vec![op.to_sexpr()]),
            Self::Exec(exec) => exec.to_sexpr(),
        }
    }
}

impl ToSexpr for Exec {
    fn to_sexpr(&self) -> SExpr {
        let mut children = vec![SExpr::symbol(self.procedure.as_str())];
        children.extend(all(&self.args));
        SExpr::node("exec", children)
    }
}

impl ToSexpr for Literal {
    fn to_sexpr(&self) -> SExpr {
        match self {
            Self::Null => SExpr::node("lit", vec![SExpr::Null]),
            Self::Missing => SExpr::tag("missing"),
            Self::Boolean(b) => SExpr::node("lit", vec![SExpr::symbol(b.to_string())]),
            Self::Integer(n) => SExpr::node("lit", vec![SExpr::number(n)]),
            Self::Decimal(d) => SExpr::node("lit", vec![SExpr::number(d)]),
            Self::Float(f) => SExpr::node("lit", vec![SExpr::Number(format!("{f:e}"))]),
            Self::String(s) => SExpr::node("lit", vec![SExpr::string(s.as_str())]),
            Self::Ion(text) => SExpr::node("ion_lit", vec![SExpr::string(text.as_str())]),
        }
    }
}

impl ToSexpr for PathStep {
    fn to_sexpr(&self) -> SExpr {
        match self {
            Self::Index { index, case } => {
                SExpr::node("path_expr", vec![index.to_sexpr(), SExpr::tag(case.as_str())])
            }
            Self::Wildcard => SExpr::tag("path_wildcard"),
            Self::Unpivot => SExpr::tag("path_unpivot"),
        }
    }
}

impl ToSexpr for Type {
    fn to_sexpr(&self) -> SExpr {
        let params = match self {
            Self::Float(p)
            | Self::Character(p)
            | Self::CharacterVarying(p)
            | Self::Time(p)
            | Self::TimeWithTimeZone(p) => vec![opt_number(*p)],
            Self::Decimal { precision, scale } | Self::Numeric { precision, scale } => {
                vec![opt_number(*precision), opt_number(*scale)]
            }
            Self::Custom(name) => vec![SExpr::symbol(name.as_str())],
            _ => Vec::new(),
        };
        SExpr::node(self.tag(), params)
    }
}

impl ToSexpr for Expr {
    fn to_sexpr(&self) -> SExpr {
        match self {
            Self::Lit(lit) => lit.to_sexpr(),
            Self::Id {
                name,
                case,
                qualifier,
            } => SExpr::node(
                "id",
                vec![
                    SExpr::symbol(name.as_str()),
                    SExpr::tag(case.as_str()),
                    SExpr::tag(qualifier.as_str()),
                ],
            ),
            Self::Parameter(index) => SExpr::node("parameter", vec![SExpr::number(index)]),
            Self::Unary { op, operand } => SExpr::node(op.as_str(), vec![boxed(operand)]),
            Self::Binary { op, left, right } => {
                SExpr::node(op.as_str(), vec![boxed(left), boxed(right)])
            }
            Self::Like {
                value,
                pattern,
                escape,
            } => SExpr::node(
                "like",
                vec![
                    boxed(value),
                    boxed(pattern),
                    escape.as_deref().map_or(SExpr::Null, boxed),
                ],
            ),
            Self::Between { value, low, high } => {
                SExpr::node("between", vec![boxed(value), boxed(low), boxed(high)])
            }
            Self::InCollection { value, collection } => {
                SExpr::node("in_collection", vec![boxed(value), boxed(collection)])
            }
            Self::IsType { value, ty } => SExpr::node("is_type", vec![boxed(value), ty.to_sexpr()]),
            Self::Path { root, steps } => {
                let mut children = vec![boxed(root)];
                children.extend(all(steps));
                SExpr::node("path", children)
            }
            Self::Call { name, args } => {
                let mut children = vec![SExpr::symbol(name.as_str())];
                children.extend(all(args));
                SExpr::node("call", children)
            }
            Self::CallAgg {
                quantifier,
                name,
                arg,
            } => SExpr::node(
                "call_agg",
                vec![
                    SExpr::tag(quantifier.as_str()),
                    SExpr::symbol(name.as_str()),
                    boxed(arg),
                ],
            ),
            Self::SearchedCase { cases, default } => SExpr::node(
                "searched_case",
                vec![
                    SExpr::node("expr_pair_list", expr_pairs("expr_pair", cases)),
                    default.as_deref().map_or(SExpr::Null, boxed),
                ],
            ),
            Self::SimpleCase {
                operand,
                cases,
                default,
            } => SExpr::node(
                "simple_case",
                vec![
                    boxed(operand),
                    SExpr::node("expr_pair_list", expr_pairs("expr_pair", cases)),
                    default.as_deref().map_or(SExpr::Null, boxed),
                ],
            ),
            Self::Cast { kind, value, ty } => {
                SExpr::node(kind.as_str(), vec![boxed(value), ty.to_sexpr()])
            }
            Self::NullIf { left, right } => SExpr::node("null_if", vec![boxed(left), boxed(right)]),
            Self::Coalesce(args) => SExpr::node("coalesce", all(args)),
            Self::Struct(fields) => SExpr::node("struct", expr_pairs("expr_pair", fields)),
            Self::Bag(items) => SExpr::node("bag", all(items)),
            Self::List(items) => SExpr::node("list", all(items)),
            Self::Sexp(items) => SExpr::node("sexp", all(items)),
            Self::Select(select) => select.to_sexpr(),
            Self::BagOp {
                op,
                quantifier,
                left,
                right,
            } => SExpr::node(
                "bag_op",
                vec![
                    SExpr::tag(op.as_str()),
                    SExpr::tag(quantifier.as_str()),
                    boxed(left),
                    boxed(right),
                ],
            ),
            Self::GraphMatch { expr, pattern } => {
                SExpr::node("graph_match", vec![boxed(expr), pattern.to_sexpr()])
            }
        }
    }
}

impl ToSexpr for Projection {
    fn to_sexpr(&self) -> SExpr {
        match self {
            Self::Star => SExpr::tag("project_star"),
            Self::Value(expr) => SExpr::node("project_value", vec![expr.to_sexpr()]),
            Self::List(items) => SExpr::node("project_list", all(items)),
            Self::Pivot { value, key } => {
                SExpr::node("project_pivot", vec![value.to_sexpr(), key.to_sexpr()])
            }
        }
    }
}

impl ToSexpr for ProjectItem {
    fn to_sexpr(&self) -> SExpr {
        match self {
            Self::Expr { expr, alias } => {
                SExpr::node("project_expr", vec![expr.to_sexpr(), opt_symbol(alias.as_ref())])
            }
            Self::All(expr) => SExpr::node("project_all", vec![expr.to_sexpr()]),
        }
    }
}

impl ToSexpr for FromSource {
    fn to_sexpr(&self) -> SExpr {
        match self {
            Self::Scan {
                expr,
                as_alias,
                at_alias,
                by_alias,
            }
            | Self::Unpivot {
                expr,
                as_alias,
                at_alias,
                by_alias,
            } => {
                let tag = if matches!(self, Self::Scan { .. }) {
                    "scan"
                } else {
                    "unpivot"
                };
                SExpr::node(
                    tag,
                    vec![
                        expr.to_sexpr(),
                        opt_symbol(as_alias.as_ref()),
                        opt_symbol(at_alias.as_ref()),
                        opt_symbol(by_alias.as_ref()),
                    ],
                )
            }
            Self::Join {
                kind,
                left,
                right,
                predicate,
            } => SExpr::node(
                "join",
                vec![
                    SExpr::tag(kind.as_str()),
                    left.to_sexpr(),
                    right.to_sexpr(),
                    opt(predicate.as_ref()),
                ],
            ),
        }
    }
}

impl ToSexpr for GroupBy {
    fn to_sexpr(&self) -> SExpr {
        let strategy = match self.strategy {
            GroupingStrategy::Full => "group_full",
            GroupingStrategy::Partial => "group_partial",
        };
        let keys = self
            .keys
            .iter()
            .map(|key| {
                SExpr::node(
                    "group_key",
                    vec![key.expr.to_sexpr(), opt_symbol(key.alias.as_ref())],
                )
            })
            .collect();
        SExpr::node(
            "group_by",
            vec![
                SExpr::tag(strategy),
                SExpr::node("group_key_list", keys),
                opt_symbol(self.group_as.as_ref()),
            ],
        )
    }
}

impl ToSexpr for SortSpec {
    fn to_sexpr(&self) -> SExpr {
        let ordering = self.ordering.map_or(SExpr::Null, |o| match o {
            OrderingSpec::Asc => SExpr::tag("asc"),
            OrderingSpec::Desc => SExpr::tag("desc"),
        });
        let nulls = self.nulls.map_or(SExpr::Null, |n| match n {
            NullsSpec::First => SExpr::tag("nulls_first"),
            NullsSpec::Last => SExpr::tag("nulls_last"),
        });
        SExpr::node("sort_spec", vec![self.expr.to_sexpr(), ordering, nulls])
    }
}

impl ToSexpr for OrderBy {
    fn to_sexpr(&self) -> SExpr {
        SExpr::node("order_by", all(&self.sort_specs))
    }
}

impl ToSexpr for Select {
    fn to_sexpr(&self) -> SExpr {
        let mut fields = Vec::new();
        field(
            &mut fields,
            "setq",
            self.quantifier.map(|q| SExpr::tag(q.as_str())),
        );
        field(&mut fields, "project", Some(self.project.to_sexpr()));
        field(&mut fields, "from", Some(self.from.to_sexpr()));
        if !self.from_let.is_empty() {
            let bindings = self
                .from_let
                .iter()
                .map(|b| {
                    SExpr::node(
                        "let_binding",
                        vec![b.expr.to_sexpr(), SExpr::symbol(b.name.as_str())],
                    )
                })
                .collect();
            field(&mut fields, "from_let", Some(SExpr::node("let", bindings)));
        }
        field(&mut fields, "where", self.where_clause.as_ref().map(boxed));
        field(&mut fields, "group", self.group_by.as_ref().map(ToSexpr::to_sexpr));
        field(&mut fields, "having", self.having.as_ref().map(boxed));
        field(&mut fields, "order", self.order_by.as_ref().map(ToSexpr::to_sexpr));
        field(&mut fields, "limit", self.limit.as_ref().map(boxed));
        field(&mut fields, "offset", self.offset.as_ref().map(boxed));
        SExpr::node("select", fields)
    }
}

impl ToSexpr for ConflictAction {
    fn to_sexpr(&self) -> SExpr {
        match self {
            Self::DoNothing => SExpr::tag("do_nothing"),
            Self::DoReplace(cond) => SExpr::node(
                "do_replace",
                vec![SExpr::tag("excluded"), opt(cond.as_ref())],
            ),
            Self::DoUpdate(cond) => SExpr::node(
                "do_update",
                vec![SExpr::tag("excluded"), opt(cond.as_ref())],
            ),
        }
    }
}

impl ToSexpr for DmlOp {
    fn to_sexpr(&self) -> SExpr {
        match self {
            Self::Insert {
                target,
                alias,
                values,
                conflict_action,
            } => SExpr::node(
                "insert",
                vec![
                    target.to_sexpr(),
                    opt_symbol(alias.as_ref()),
                    values.to_sexpr(),
                    opt(conflict_action.as_ref()),
                ],
            ),
            Self::InsertValue {
                target,
                value,
                index,
                on_conflict,
            } => SExpr::node(
                "insert_value",
                vec![
                    target.to_sexpr(),
                    value.to_sexpr(),
                    opt(index.as_ref()),
                    on_conflict.as_ref().map_or(SExpr::Null, |c| {
                        SExpr::node(
                            "on_conflict",
                            vec![c.condition.to_sexpr(), SExpr::tag("do_nothing")],
                        )
                    }),
                ],
            ),
            Self::Set(assignment) => SExpr::node(
                "set",
                vec![SExpr::node(
                    "assignment",
                    vec![assignment.target.to_sexpr(), assignment.value.to_sexpr()],
                )],
            ),
            Self::Remove(target) => SExpr::node("remove", vec![target.to_sexpr()]),
            Self::Delete => SExpr::tag("delete"),
        }
    }
}

impl ToSexpr for Returning {
    fn to_sexpr(&self) -> SExpr {
        let elems = self
            .elems
            .iter()
            .map(|elem| {
                let column = match &elem.column {
                    ReturningColumn::Wildcard => SExpr::tag("returning_wildcard"),
                    ReturningColumn::Expr(expr) => {
                        SExpr::node("returning_column", vec![expr.to_sexpr()])
                    }
                };
                SExpr::node(
                    "returning_elem",
                    vec![SExpr::tag(elem.mapping.as_str()), column],
                )
            })
            .collect();
        SExpr::node("returning_expr", elems)
    }
}

impl ToSexpr for Dml {
    fn to_sexpr(&self) -> SExpr {
        let mut fields = Vec::new();
        field(
            &mut fields,
            "operations",
            Some(SExpr::node("dml_op_list", all(&self.operations))),
        );
        field(&mut fields, "from", self.from.as_ref().map(ToSexpr::to_sexpr));
        field(&mut fields, "where", self.where_clause.as_ref().map(boxed));
        field(
            &mut fields,
            "returning",
            self.returning.as_ref().map(ToSexpr::to_sexpr),
        );
        SExpr::node("dml", fields)
    }
}

impl ToSexpr for Identifier {
    fn to_sexpr(&self) -> SExpr {
        SExpr::node(
            "identifier",
            vec![SExpr::symbol(self.name.as_str()), SExpr::tag(self.case.as_str())],
        )
    }
}

impl ToSexpr for TableName {
    fn to_sexpr(&self) -> SExpr {
        SExpr::node(
            "table_name",
            vec![SExpr::node("prefix", all(&self.prefix)), self.name.to_sexpr()],
        )
    }
}

impl ToSexpr for ColumnConstraint {
    fn to_sexpr(&self) -> SExpr {
        let def = match &self.def {
            ColumnConstraintDef::NotNull => SExpr::tag("column_notnull"),
            ColumnConstraintDef::Null => SExpr::tag("column_null"),
            ColumnConstraintDef::Unique => SExpr::tag("column_unique"),
            ColumnConstraintDef::PrimaryKey => SExpr::tag("column_primary_key"),
            ColumnConstraintDef::Check(expr) => SExpr::node("column_check", vec![expr.to_sexpr()]),
        };
        SExpr::node("column_constraint", vec![opt_symbol(self.name.as_ref()), def])
    }
}

impl ToSexpr for ColumnDeclaration {
    fn to_sexpr(&self) -> SExpr {
        let mut children = vec![SExpr::symbol(self.name.as_str()), self.ty.to_sexpr()];
        children.extend(all(&self.constraints));
        SExpr::node("column_declaration", children)
    }
}

impl ToSexpr for TableConstraint {
    fn to_sexpr(&self) -> SExpr {
        let def = match &self.def {
            TableConstraintDef::Check(expr) => SExpr::node("table_check", vec![expr.to_sexpr()]),
            TableConstraintDef::Unique(cols) => SExpr::node("table_unique", all(cols)),
            TableConstraintDef::PrimaryKey(cols) => SExpr::node("table_primary_key", all(cols)),
        };
        SExpr::node("table_constraint", vec![opt_symbol(self.name.as_ref()), def])
    }
}

impl ToSexpr for TableDefPart {
    fn to_sexpr(&self) -> SExpr {
        match self {
            Self::Column(column) => column.to_sexpr(),
            Self::Constraint(constraint) => constraint.to_sexpr(),
        }
    }
}

impl ToSexpr for DdlOp {
    fn to_sexpr(&self) -> SExpr {
        match self {
            Self::CreateTable { name, def } => SExpr::node(
                "create_table",
                vec![
                    name.to_sexpr(),
                    def.as_ref()
                        .map_or(SExpr::Null, |parts| SExpr::node("table_def", all(parts))),
                ],
            ),
            Self::DropTable { name } => SExpr::node("drop_table", vec![name.to_sexpr()]),
            Self::CreateIndex { table, keys } => {
                let mut children = vec![table.to_sexpr()];
                children.extend(all(keys));
                SExpr::node("create_index", children)
            }
            Self::DropIndex { table, index } => SExpr::node(
                "drop_index",
                vec![
                    SExpr::node("table", vec![table.to_sexpr()]),
                    SExpr::node("keys", vec![index.to_sexpr()]),
                ],
            ),
        }
    }
}

impl ToSexpr for Quantifier {
    fn to_sexpr(&self) -> SExpr {
        SExpr::node(
            "graph_match_quantifier",
            vec![
                SExpr::number(self.lower),
                self.upper.map_or(SExpr::Null, SExpr::number),
            ],
        )
    }
}

impl ToSexpr for LabelSpec {
    fn to_sexpr(&self) -> SExpr {
        match self {
            Self::Name(name) => SExpr::node("label_name", vec![SExpr::symbol(name.as_str())]),
            Self::Wildcard => SExpr::tag("label_wildcard"),
            Self::Negation(inner) => SExpr::node("label_negation", vec![inner.to_sexpr()]),
            Self::Conjunction(l, r) => SExpr::node("label_conj", vec![l.to_sexpr(), r.to_sexpr()]),
            Self::Disjunction(l, r) => SExpr::node("label_disj", vec![l.to_sexpr(), r.to_sexpr()]),
        }
    }
}

impl ToSexpr for NodePattern {
    fn to_sexpr(&self) -> SExpr {
        let mut fields = Vec::new();
        field(&mut fields, "prefilter", self.prefilter.as_ref().map(boxed));
        field(
            &mut fields,
            "variable",
            self.variable.as_ref().map(|v| SExpr::symbol(v.as_str())),
        );
        field(&mut fields, "label", self.label.as_ref().map(ToSexpr::to_sexpr));
        SExpr::node("node", fields)
    }
}

impl ToSexpr for EdgePattern {
    fn to_sexpr(&self) -> SExpr {
        let mut fields = Vec::new();
        field(
            &mut fields,
            "direction",
            Some(SExpr::tag(self.direction.as_str())),
        );
        field(
            &mut fields,
            "quantifier",
            self.quantifier.as_ref().map(ToSexpr::to_sexpr),
        );
        field(&mut fields, "prefilter", self.prefilter.as_ref().map(boxed));
        field(
            &mut fields,
            "variable",
            self.variable.as_ref().map(|v| SExpr::symbol(v.as_str())),
        );
        field(&mut fields, "label", self.label.as_ref().map(ToSexpr::to_sexpr));
        SExpr::node("edge", fields)
    }
}

impl ToSexpr for PatternPart {
    fn to_sexpr(&self) -> SExpr {
        match self {
            Self::Node(node) => node.to_sexpr(),
            Self::Edge(edge) => edge.to_sexpr(),
            Self::Pattern(pattern) => SExpr::node("pattern", vec![pattern.to_sexpr()]),
        }
    }
}

impl ToSexpr for GraphPattern {
    fn to_sexpr(&self) -> SExpr {
        let mut fields = Vec::new();
        field(
            &mut fields,
            "restrictor",
            self.restrictor.map(|r| SExpr::tag(r.as_str())),
        );
        field(&mut fields, "prefilter", self.prefilter.as_ref().map(boxed));
        field(
            &mut fields,
            "variable",
            self.variable.as_ref().map(|v| SExpr::symbol(v.as_str())),
        );
        field(
            &mut fields,
            "quantifier",
            self.quantifier.as_ref().map(ToSexpr::to_sexpr),
        );
        field(&mut fields, "parts", Some(SExpr::List(all(&self.parts))));
        SExpr::node("graph_match_pattern", fields)
    }
}

impl ToSexpr for GraphSelector {
    fn to_sexpr(&self) -> SExpr {
        match self {
            Self::AnyShortest => SExpr::tag("selector_any_shortest"),
            Self::AllShortest => SExpr::tag("selector_all_shortest"),
            Self::Any => SExpr::tag("selector_any"),
            Self::AnyK(k) => SExpr::node("selector_any_k", vec![SExpr::number(k)]),
            Self::ShortestK(k) => SExpr::node("selector_shortest_k", vec![SExpr::number(k)]),
            Self::ShortestKGroup(k) => {
                SExpr::node("selector_shortest_k_group", vec![SExpr::number(k)])
            }
        }
    }
}

impl ToSexpr for GraphMatch {
    fn to_sexpr(&self) -> SExpr {
        let mut children = vec![opt(self.selector.as_ref())];
        children.extend(all(&self.patterns));
        SExpr::node("gpml_pattern", children)
    }
}

impl core::fmt::Display for Statement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_sexpr().render())
    }
}
