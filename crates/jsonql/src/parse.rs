mod condition;
mod node;
mod persist;
mod select;

use node::Node;

use jsonql_core::{
    stmt::{Delete, Statement},
    Result,
};

/// Parses a JSON request into a [`Statement`].
///
/// The `statement` member selects the kind of request: `select`, `insert`,
/// `update` or `delete`. Errors name the JSON path of the offending node.
pub fn parse(src: &str) -> Result<Statement> {
    let json: serde_json::Value = serde_json::from_str(src)?;
    parse_value(&json)
}

/// Like [`parse`], for an already deserialized document.
pub fn parse_value(json: &serde_json::Value) -> Result<Statement> {
    let root = Node::root(json);
    let discriminator = root.required("statement")?;
    let kind = discriminator.str()?;

    match &kind.to_ascii_lowercase()[..] {
        "select" => Ok(select::parse_select(&root)?.into()),
        "insert" => Ok(persist::parse_insert(&root)?.into()),
        "update" => Ok(persist::parse_update(&root)?.into()),
        "delete" => Ok(parse_delete(&root)?.into()),
        _ => Err(discriminator.error(format!(
            "unrecognized statement `{kind}`; expected one of select, insert, update, delete"
        ))),
    }
}

fn parse_delete(root: &Node<'_>) -> Result<Delete> {
    Ok(Delete {
        entity: root.required("entityId")?.str()?.to_string(),
        id: root.required("id")?.id()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonql_core::stmt::Value;

    #[test]
    fn missing_discriminator() {
        let err = parse(r#"{"entityId": "user"}"#).unwrap_err();
        assert!(err.is_parse());
        assert_eq!(
            err.to_string(),
            "parse error at $.statement: missing required field `statement`"
        );
    }

    #[test]
    fn unrecognized_discriminator() {
        let err = parse(r#"{"statement": "merge", "entityId": "user"}"#).unwrap_err();
        assert!(err.to_string().starts_with("parse error at $.statement:"));
    }

    #[test]
    fn discriminator_ignores_case() {
        let stmt = parse(r#"{"statement": "DELETE", "entityId": "user", "id": "7"}"#).unwrap();
        assert_eq!(
            stmt,
            Statement::Delete(Delete {
                entity: "user".to_string(),
                id: Value::from("7"),
            })
        );
    }

    #[test]
    fn delete_requires_id() {
        let err = parse(r#"{"statement": "delete", "entityId": "user"}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "parse error at $.id: missing required field `id`"
        );
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(parse("{").unwrap_err().is_parse());
    }
}
