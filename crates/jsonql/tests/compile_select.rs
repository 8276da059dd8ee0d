mod support;

use jsonql::{engine::Slot, parse, stmt::Value, Engine, ForeignKeyPolicy, Prepared};
use jsonql_sql::{Param, PreparedSql};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn engine() -> Engine {
    Engine::new(Arc::new(support::schema()), ForeignKeyPolicy::Reject)
}

fn prepare(src: &str) -> PreparedSql {
    let stmt = parse(src).unwrap();
    let prepared = engine().prepare(&stmt).unwrap();
    assert!(matches!(prepared, Prepared::Select { .. }));

    let sql = prepared.sql().clone();
    assert_eq!(sql.placeholder_count(), sql.params.len(), "sql={}", sql.sql);
    sql
}

fn literals(sql: &PreparedSql) -> Vec<Value> {
    sql.params
        .iter()
        .map(|param| param.as_literal().cloned().unwrap())
        .collect()
}

#[test]
fn default_projection_and_page() {
    let sql = prepare(r#"{"statement": "select", "entityId": "user"}"#);

    assert_eq!(
        sql.sql,
        r#"SELECT "users"."id" AS "id", "users"."name" AS "name", "users"."email" AS "email" FROM "users" LIMIT ? OFFSET ?"#
    );
    assert_eq!(sql.params, [Param::from(10i64), Param::from(0i64)]);
}

#[test]
fn explicit_page() {
    let sql = prepare(
        r#"{"statement": "select", "entityId": "user", "fields": ["name"], "page": {"size": 20, "number": 3}}"#,
    );

    assert!(sql.sql.ends_with("LIMIT ? OFFSET ?"));
    assert_eq!(literals(&sql), [Value::I64(20), Value::I64(40)]);
}

#[test]
fn empty_page_uses_defaults() {
    let sql = prepare(r#"{"statement": "select", "entityId": "user", "page": {}}"#);
    assert_eq!(literals(&sql), [Value::I64(10), Value::I64(0)]);
}

#[test]
fn entity_name_ignores_case() {
    let upper = prepare(r#"{"statement": "select", "entityId": "User"}"#);
    let lower = prepare(r#"{"statement": "select", "entityId": "user"}"#);
    assert_eq!(upper, lower);
}

#[test]
fn where_params_precede_limit() {
    let sql = prepare(
        r#"{"statement": "select", "entityId": "user", "fields": ["id"],
            "filters": {"rel": "and", "conditions": [
              {"field": "id", "method": "gt", "value": "3"},
              {"field": "name", "method": "in", "values": ["tom", "ann"]},
              {"field": "name", "method": "like", "value": "o"}
            ]},
            "sort": [{"field": "name", "direction": "DESC"}, {"field": "id"}]}"#,
    );

    assert_eq!(
        sql.sql,
        r#"SELECT "users"."id" AS "id" FROM "users" WHERE "users"."id" > ? AND "users"."name" IN (?, ?) AND "users"."name" LIKE ? ORDER BY "users"."name" DESC, "users"."id" ASC LIMIT ? OFFSET ?"#
    );

    // The id is coerced to the column type and the pattern is wrapped
    assert_eq!(
        literals(&sql),
        [
            Value::I64(3),
            Value::from("tom"),
            Value::from("ann"),
            Value::from("%o%"),
            Value::I64(10),
            Value::I64(0),
        ]
    );
}

#[test]
fn nested_logical_groups() {
    let sql = prepare(
        r#"{"statement": "select", "entityId": "user", "fields": ["id"],
            "filters": {"rel": "or", "conditions": [
              {"field": "name", "method": "eq", "value": "tom"},
              {"rel": "and", "conditions": [
                {"field": "id", "method": "ge", "value": 1},
                {"field": "id", "method": "le", "value": 9}
              ]}
            ]}}"#,
    );

    assert!(
        sql.sql.contains(
            r#"WHERE "users"."name" = ? OR ("users"."id" >= ? AND "users"."id" <= ?) LIMIT"#
        ),
        "sql={}",
        sql.sql
    );
}

#[test]
fn empty_in_list_is_unsatisfiable() {
    let sql = prepare(
        r#"{"statement": "select", "entityId": "user", "fields": ["id"],
            "filters": {"field": "id", "method": "in", "values": []}}"#,
    );

    assert!(!sql.sql.contains("IN ()"));
    assert!(sql.sql.contains("WHERE 1 = 0"), "sql={}", sql.sql);
    assert_eq!(sql.params.len(), 2);
}

#[test]
fn negated_empty_in_list_matches_everything() {
    let sql = prepare(
        r#"{"statement": "select", "entityId": "user", "fields": ["id"],
            "filters": {"field": "id", "method": "notin", "values": []}}"#,
    );

    assert!(sql.sql.contains("WHERE 1 = 1"), "sql={}", sql.sql);
}

#[test]
fn is_null_and_not_null() {
    let sql = prepare(
        r#"{"statement": "select", "entityId": "user", "fields": ["id"],
            "filters": {"rel": "and", "conditions": [
              {"field": "email", "method": "is", "value": null},
              {"field": "email", "method": "isnull", "negate": true}
            ]}}"#,
    );

    assert!(
        sql.sql
            .contains(r#"WHERE "users"."email" IS NULL AND "users"."email" IS NOT NULL"#),
        "sql={}",
        sql.sql
    );
    assert_eq!(sql.params.len(), 2);
}

#[test]
fn between_and_negated_comparison() {
    let sql = prepare(
        r#"{"statement": "select", "entityId": "blog", "fields": ["id"],
            "filters": [
              {"field": "views", "method": "between", "start": 10, "end": 20},
              {"field": "title", "method": "eq", "value": "draft", "negate": true}
            ]}"#,
    );

    assert!(
        sql.sql.contains(
            r#"WHERE "blogs"."views" BETWEEN ? AND ? AND NOT ("blogs"."title" = ?)"#
        ),
        "sql={}",
        sql.sql
    );
    assert_eq!(
        literals(&sql)[..3],
        [Value::I64(10), Value::I64(20), Value::from("draft")]
    );
}

#[test]
fn relationship_projection_joins_target() {
    let stmt = parse(
        r#"{"statement": "select", "entityId": "user", "fields": ["name", "blogs"]}"#,
    )
    .unwrap();
    let Prepared::Select { sql, shape, .. } = engine().prepare(&stmt).unwrap() else {
        panic!("expected a select");
    };

    assert_eq!(
        sql.sql,
        r#"SELECT "users"."name" AS "name", "blogs"."id" AS "blogs_id", "blogs"."title" AS "blogs_title", "blogs"."views" AS "blogs_views" FROM "users" LEFT JOIN "blogs" AS "blogs" ON "blogs"."user_id" = "users"."id" LIMIT ? OFFSET ?"#
    );
    assert_eq!(shape[0], Slot::Field("name".to_string()));
    assert_eq!(
        shape[2],
        Slot::Nested {
            field: "blogs".to_string(),
            key: "title".to_string()
        }
    );
}

#[test]
fn many_to_one_join_and_dotted_filter() {
    let sql = prepare(
        r#"{"statement": "select", "entityId": "blog", "fields": ["title", "author.name"],
            "filters": {"field": "author.name", "method": "eq", "value": "tom"},
            "sort": {"field": "author.name", "direction": "asc"}}"#,
    );

    // Joined once even though it is referenced three times
    assert_eq!(sql.sql.matches("LEFT JOIN").count(), 1);
    assert_eq!(
        sql.sql,
        r#"SELECT "blogs"."title" AS "title", "author"."name" AS "author_name" FROM "blogs" LEFT JOIN "users" AS "author" ON "author"."id" = "blogs"."user_id" WHERE "author"."name" = ? ORDER BY "author"."name" ASC LIMIT ? OFFSET ?"#
    );
}

#[test]
fn filter_on_reference_compares_foreign_key() {
    let sql = prepare(
        r#"{"statement": "select", "entityId": "blog", "fields": ["id"],
            "filters": {"field": "author", "method": "eq", "value": 7}}"#,
    );

    assert!(sql.sql.contains(r#"WHERE "blogs"."user_id" = ?"#), "sql={}", sql.sql);
    assert_eq!(literals(&sql)[0], Value::I64(7));
}

#[test]
fn many_to_many_joins_through_link_table() {
    let sql = prepare(r#"{"statement": "select", "entityId": "user", "fields": ["id", "groups"]}"#);

    assert!(
        sql.sql.contains(
            r#"LEFT JOIN "memberships" AS "groups_link" ON "groups_link"."user_id" = "users"."id" LEFT JOIN "groups" AS "groups" ON "groups"."id" = "groups_link"."group_id""#
        ),
        "sql={}",
        sql.sql
    );
}

#[test]
fn in_subquery() {
    let sql = prepare(
        r#"{"statement": "select", "entityId": "user", "fields": ["name"],
            "filters": {"type": "subquery", "field": "id",
              "select": {"entityId": "blog", "fields": ["author.id"],
                "filters": {"field": "views", "method": "gt", "value": 100}}}}"#,
    );

    assert_eq!(
        sql.sql,
        r#"SELECT "users"."name" AS "name" FROM "users" WHERE "users"."id" IN (SELECT "author"."id" FROM "blogs" LEFT JOIN "users" AS "author" ON "author"."id" = "blogs"."user_id" WHERE "blogs"."views" > ?) LIMIT ? OFFSET ?"#
    );
    assert_eq!(literals(&sql), [Value::I64(100), Value::I64(10), Value::I64(0)]);
}

#[test]
fn exists_subquery_selects_key() {
    let sql = prepare(
        r#"{"statement": "select", "entityId": "user", "fields": ["id"],
            "filters": {"type": "subquery", "negate": true, "select": {"entityId": "group"}}}"#,
    );

    assert!(
        sql.sql
            .contains(r#"WHERE NOT EXISTS (SELECT "groups"."id" FROM "groups")"#),
        "sql={}",
        sql.sql
    );
}

#[test]
fn in_subquery_must_select_one_column() {
    let stmt = parse(
        r#"{"statement": "select", "entityId": "user",
            "filters": {"type": "subquery", "field": "id",
              "select": {"entityId": "blog", "fields": ["id", "title"]}}}"#,
    )
    .unwrap();

    let err = engine().prepare(&stmt).unwrap_err();
    assert!(err.to_string().contains("exactly one field"));
}

#[test]
fn unknown_field() {
    let stmt = parse(r#"{"statement": "select", "entityId": "user", "fields": ["age"]}"#).unwrap();
    let err = engine().prepare(&stmt).unwrap_err();
    assert!(err.is_field_not_found());
    assert_eq!(err.to_string(), "field not found: user.age");

    let stmt = parse(
        r#"{"statement": "select", "entityId": "user", "sort": [{"field": "blogs.rating"}]}"#,
    )
    .unwrap();
    assert!(engine().prepare(&stmt).unwrap_err().is_field_not_found());
}

#[test]
fn unknown_entity() {
    let stmt = parse(r#"{"statement": "select", "entityId": "invoice"}"#).unwrap();
    let err = engine().prepare(&stmt).unwrap_err();
    assert!(err.is_entity_not_found());
}

#[test]
fn is_with_value_is_inlined() {
    let sql = prepare(
        r#"{"statement": "select", "entityId": "user", "fields": ["id"],
            "filters": {"field": "email", "method": "is", "value": "o'k?"}}"#,
    );

    assert!(
        sql.sql.contains(r#"WHERE "users"."email" IS 'o''k?' LIMIT"#),
        "sql={}",
        sql.sql
    );
    // The `?` inside the literal is not a placeholder
    assert_eq!(sql.params.len(), 2);
}
