use super::{select::parse_select, Node};

use jsonql_core::{
    stmt::{
        CmpOp, Condition, ConditionBetween, ConditionComparison, ConditionIn, ConditionLike,
        ConditionLogical, ConditionNull, ConditionSubquery, LogicalOp, Value,
    },
    Result,
};

/// Parses the `filters` member of a select: a logical node, a single
/// condition, or an array of conditions joined with `AND`.
pub(super) fn parse_filters(node: &Node<'_>) -> Result<Condition> {
    if node.json.is_array() {
        return Ok(Condition::Logical(ConditionLogical {
            op: LogicalOp::And,
            children: parse_children(node)?,
        }));
    }

    parse_condition(node)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Comparison(CmpOp),
    Logical,
    Between,
    In,
    Like,
    Null,
    Subquery,
}

pub(super) fn parse_condition(node: &Node<'_>) -> Result<Condition> {
    node.object()?;

    let (kind, negated_method) = match node.get("type").filter(|n| !n.json.is_null()) {
        Some(ty) => (parse_type(&ty, node)?, false),
        None if node.has("conditions") => (Kind::Logical, false),
        None => {
            let method = node.required("method")?;
            parse_method(&method)?
        }
    };

    if kind == Kind::Logical {
        if let Some(negate) = node.get("negate") {
            return Err(negate.error("`negate` is only supported on leaf conditions"));
        }

        let op = match node.optional_str("rel")? {
            Some(rel) => LogicalOp::parse(rel).ok_or_else(|| {
                node.get("rel")
                    .unwrap_or_else(|| node.clone())
                    .error(format!("unrecognized relation `{rel}`; expected `and` or `or`"))
            })?,
            None => LogicalOp::And,
        };

        return Ok(ConditionLogical {
            op,
            children: parse_children(&node.required("conditions")?)?,
        }
        .into());
    }

    let explicit_negate = match node.get("negate").filter(|n| !n.json.is_null()) {
        Some(negate) => negate.bool()?,
        None => false,
    };
    let negate = explicit_negate != negated_method;

    Ok(match kind {
        Kind::Comparison(op) => {
            // `is` defaults to `IS NULL` when no value is given
            let value = match (op, node.get("value")) {
                (CmpOp::Is, None) => Value::Null,
                (_, Some(value)) => value.value()?,
                (_, None) => return Err(node.missing("value")),
            };

            ConditionComparison {
                field: field(node)?,
                op,
                value,
                negate,
            }
            .into()
        }
        Kind::Between => {
            let (start, end) = match (node.get("start"), node.get("end")) {
                (Some(start), Some(end)) => (start.value()?, end.value()?),
                (Some(_), None) => return Err(node.missing("end")),
                (None, _) => {
                    let values = node.required_any(&["values", "value"])?;

                    match &values.array()?[..] {
                        [start, end] => (start.value()?, end.value()?),
                        _ => return Err(values.error("between takes exactly two values")),
                    }
                }
            };

            ConditionBetween {
                field: field(node)?,
                start,
                end,
                negate,
            }
            .into()
        }
        Kind::In => {
            let values = node.required_any(&["values", "value"])?;

            ConditionIn {
                field: field(node)?,
                values: values
                    .array()?
                    .iter()
                    .map(Node::value)
                    .collect::<Result<_>>()?,
                negate,
            }
            .into()
        }
        Kind::Like => ConditionLike {
            field: field(node)?,
            pattern: node.required("value")?.value()?,
            negate,
        }
        .into(),
        Kind::Null => ConditionNull {
            field: field(node)?,
            negate,
        }
        .into(),
        Kind::Subquery => {
            let query = node.required_any(&["select", "query"])?;

            ConditionSubquery {
                field: node.optional_str("field")?.map(str::to_string),
                select: Box::new(parse_select(&query)?),
                negate,
            }
            .into()
        }
        Kind::Logical => unreachable!(),
    })
}

fn parse_children(node: &Node<'_>) -> Result<Vec<Condition>> {
    node.array()?.iter().map(parse_condition).collect()
}

fn field(node: &Node<'_>) -> Result<String> {
    Ok(node.required("field")?.str()?.to_string())
}

/// An explicit `type`. A comparison takes its operator from `method`,
/// defaulting to `eq`.
fn parse_type(ty: &Node<'_>, node: &Node<'_>) -> Result<Kind> {
    let name = ty.str()?;

    Ok(match &name.to_ascii_lowercase()[..] {
        "comparison" => {
            let op = match node.get("method") {
                Some(method) => {
                    let name = method.str()?;
                    CmpOp::from_method(name).ok_or_else(|| {
                        method.error(format!("unrecognized comparison method `{name}`"))
                    })?
                }
                None => CmpOp::Eq,
            };
            Kind::Comparison(op)
        }
        "logical" => Kind::Logical,
        "between" => Kind::Between,
        "in" => Kind::In,
        "like" => Kind::Like,
        "null" => Kind::Null,
        "subquery" => Kind::Subquery,
        _ => return Err(ty.error(format!("unrecognized condition type `{name}`"))),
    })
}

/// Infers the condition kind from `method`. The second element is true for
/// methods that negate (`notin`, `notlike`, `notnull`, ...).
fn parse_method(method: &Node<'_>) -> Result<(Kind, bool)> {
    let name = method.str()?;
    let lower = name.to_ascii_lowercase();

    if let Some(op) = CmpOp::from_method(&lower) {
        return Ok((Kind::Comparison(op), false));
    }

    let (base, negated) = match lower.strip_prefix("not") {
        Some(rest) => (rest.trim_start_matches('_'), true),
        None => (&lower[..], false),
    };

    let kind = match base {
        "in" => Kind::In,
        "like" => Kind::Like,
        "between" => Kind::Between,
        "null" | "isnull" => Kind::Null,
        _ => return Err(method.error(format!("unrecognized method `{name}`"))),
    };

    Ok((kind, negated))
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use jsonql_core::stmt::{CmpOp, Condition, LogicalOp, Statement, Value};
    use pretty_assertions::assert_eq;

    fn filter(filters: &str) -> Condition {
        let src = format!(r#"{{"statement": "select", "entityId": "user", "filters": {filters}}}"#);
        match parse(&src).unwrap() {
            Statement::Select(select) => select.filter.unwrap(),
            stmt => panic!("expected select; got {stmt:#?}"),
        }
    }

    #[test]
    fn logical_with_inferred_leaves() {
        let Condition::Logical(logical) = filter(
            r#"{"rel": "or", "conditions": [
                {"field": "id", "method": "eq", "value": 1},
                {"field": "id", "method": "in", "values": [2, 3]},
                {"field": "name", "method": "like", "value": "to"},
                {"field": "email", "method": "notnull"},
                {"field": "age", "method": "between", "values": [18, 30], "negate": true}
            ]}"#,
        ) else {
            panic!()
        };

        assert_eq!(logical.op, LogicalOp::Or);
        assert_eq!(logical.children[0], Condition::eq("id", 1));
        assert_eq!(
            logical.children[1],
            Condition::in_list("id", vec![Value::I64(2), Value::I64(3)])
        );
        assert_eq!(logical.children[2], Condition::like("name", "to"));
        assert!(matches!(&logical.children[3], Condition::Null(c) if c.negate));
        assert!(matches!(&logical.children[4], Condition::Between(c) if c.negate));
    }

    #[test]
    fn explicit_type() {
        let condition = filter(r#"{"type": "comparison", "field": "age", "method": "ge", "value": 18}"#);
        assert_eq!(condition, Condition::comparison("age", CmpOp::Ge, 18));
    }

    #[test]
    fn is_without_value_is_null() {
        let condition = filter(r#"{"field": "email", "method": "is"}"#);
        assert_eq!(condition, Condition::comparison("email", CmpOp::Is, Value::Null));
    }

    #[test]
    fn array_of_conditions_is_and() {
        let condition = filter(r#"[{"field": "id", "method": "eq", "value": 1}]"#);
        assert_eq!(condition, Condition::and(vec![Condition::eq("id", 1)]));
    }

    #[test]
    fn unknown_type_names_path() {
        let err = parse(
            r#"{"statement": "select", "entityId": "user",
                "filters": {"rel": "and", "conditions": [
                    {"field": "id", "method": "eq", "value": 1},
                    {"type": "near", "field": "id"}
                ]}}"#,
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "parse error at $.filters.conditions[1].type: unrecognized condition type `near`"
        );
    }

    #[test]
    fn unknown_method_names_path() {
        let err = parse(
            r#"{"statement": "select", "entityId": "user",
                "filters": {"field": "id", "method": "approx", "value": 1}}"#,
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "parse error at $.filters.method: unrecognized method `approx`"
        );
    }

    #[test]
    fn subquery() {
        let condition = filter(
            r#"{"type": "subquery", "field": "id",
                "select": {"entityId": "blog", "fields": ["user_id"],
                           "filters": {"field": "title", "method": "eq", "value": "t1"}}}"#,
        );

        let Condition::Subquery(subquery) = condition else {
            panic!()
        };
        assert_eq!(subquery.field.as_deref(), Some("id"));
        assert_eq!(subquery.select.entity, "blog");
        assert_eq!(subquery.select.filter, Some(Condition::eq("title", "t1")));
    }
}
