use super::{condition::parse_filters, Node};

use jsonql_core::{
    stmt::{Direction, Page, Select, Sort},
    Result,
};

pub(super) fn parse_select(node: &Node<'_>) -> Result<Select> {
    let mut select = Select::new(node.required("entityId")?.str()?);

    if let Some(fields) = node.get("fields").filter(|n| !n.json.is_null()) {
        select.fields = fields
            .array()?
            .iter()
            .map(|field| field.str().map(str::to_string))
            .collect::<Result<_>>()?;
    }

    if let Some(filters) = node.get("filters").filter(|n| !n.json.is_null()) {
        select.filter = Some(parse_filters(&filters)?);
    }

    if let Some(sort) = node.get("sort").filter(|n| !n.json.is_null()) {
        // A single sort entry may be given without the surrounding array
        let entries = if sort.json.is_object() {
            vec![sort]
        } else {
            sort.array()?
        };

        select.sort = entries
            .iter()
            .map(parse_sort)
            .collect::<Result<_>>()?;
    }

    if let Some(page) = node.get("page").filter(|n| !n.json.is_null()) {
        page.object()?;
        select.page = Page {
            size: page.get("size").map(|n| n.i64()).transpose()?,
            number: page.get("number").map(|n| n.i64()).transpose()?,
        };
    }

    Ok(select)
}

fn parse_sort(node: &Node<'_>) -> Result<Sort> {
    Ok(Sort {
        field: node.required("field")?.str()?.to_string(),
        direction: node
            .optional_str("direction")?
            .map(Direction::parse)
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use crate::parse;
    use jsonql_core::stmt::{Direction, Page, Statement};
    use pretty_assertions::assert_eq;

    fn select(src: &str) -> jsonql_core::stmt::Select {
        match parse(src).unwrap() {
            Statement::Select(select) => select,
            stmt => panic!("expected select; got {stmt:#?}"),
        }
    }

    #[test]
    fn minimal_select() {
        let select = select(r#"{"statement": "select", "entityId": "user"}"#);
        assert_eq!(select.entity, "user");
        assert!(select.fields.is_empty());
        assert!(select.filter.is_none());
        assert_eq!(select.page, Page::default());
    }

    #[test]
    fn sort_and_page() {
        let select = select(
            r#"{"statement": "select", "entityId": "user",
                "sort": [{"field": "name", "direction": "DESC"}, {"field": "id"}],
                "page": {"size": "20", "number": 3}}"#,
        );
        assert_eq!(select.sort[0].direction, Direction::Desc);
        assert_eq!(select.sort[1].direction, Direction::Asc);
        assert_eq!(select.page, Page::new(20, 3));
    }

    #[test]
    fn page_must_be_integral() {
        let err = parse(
            r#"{"statement": "select", "entityId": "user", "page": {"size": "ten"}}"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "parse error at $.page.size: expected an integer; found a string"
        );
    }
}
