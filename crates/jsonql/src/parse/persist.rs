use super::Node;

use jsonql_core::{
    stmt::{Assignment, FieldValue, Insert, Nested, Update},
    Result,
};

pub(super) fn parse_insert(node: &Node<'_>) -> Result<Insert> {
    Ok(Insert {
        entity: node.required("entityId")?.str()?.to_string(),
        data_id: optional_id(node)?,
        fields: parse_fields(node)?,
    })
}

pub(super) fn parse_update(node: &Node<'_>) -> Result<Update> {
    Ok(Update {
        entity: node.required("entityId")?.str()?.to_string(),
        data_id: node.required("dataId")?.id()?,
        fields: parse_fields(node)?,
    })
}

fn optional_id(node: &Node<'_>) -> Result<Option<jsonql_core::stmt::Value>> {
    match node.get("dataId").filter(|n| !n.json.is_null()) {
        Some(id) => id.id().map(Some),
        None => Ok(None),
    }
}

fn parse_fields(node: &Node<'_>) -> Result<Vec<Assignment>> {
    match node.get("fields").filter(|n| !n.json.is_null()) {
        Some(fields) => fields.array()?.iter().map(parse_assignment).collect(),
        None => Ok(vec![]),
    }
}

/// One `{"field", "value" | "values"}` entry. Exactly one of `value` and
/// `values` must be present.
fn parse_assignment(node: &Node<'_>) -> Result<Assignment> {
    let field = node.required("field")?.str()?.to_string();

    let value = match (node.get("value"), node.get("values")) {
        (Some(value), None) => FieldValue::Scalar(value.value()?),
        (None, Some(values)) => FieldValue::Nested(
            values
                .array()?
                .iter()
                .map(parse_nested)
                .collect::<Result<_>>()?,
        ),
        (Some(_), Some(_)) => {
            return Err(node.error(format!(
                "field `{field}` carries both a value and nested values"
            )))
        }
        (None, None) => {
            return Err(node.error(format!(
                "field `{field}` carries neither a value nor nested values"
            )))
        }
    };

    Ok(Assignment { field, value })
}

fn parse_nested(node: &Node<'_>) -> Result<Nested> {
    node.object()?;

    Ok(Nested {
        entity: node.optional_str("entityId")?.map(str::to_string),
        data_id: optional_id(node)?,
        fields: parse_fields(node)?,
    })
}
