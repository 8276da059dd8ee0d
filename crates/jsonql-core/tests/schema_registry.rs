use jsonql_core::{
    schema::{Entity, Field, JoinTable, Relation, RelationKind},
    stmt::Type,
    Schema,
};

fn user() -> Entity {
    Entity::new("User", "users")
        .primitive("id", Type::I64)
        .primitive("name", Type::String)
        .relation("blogs", Relation::one_to_many("blog"))
}

fn blog() -> Entity {
    Entity::new("blog", "blogs")
        .primitive("title", Type::String)
        .relation("user", Relation::many_to_one("user"))
}

fn schema() -> Schema {
    Schema::builder()
        .entity(user())
        .entity(blog())
        .build()
        .unwrap()
}

#[test]
fn lookup_ignores_case() {
    let schema = schema();

    let a = schema.lookup("user").unwrap();
    let b = schema.lookup("USER").unwrap();
    assert!(std::ptr::eq(a, b));
    assert_eq!(a.table, "users");
    assert!(schema.contains("Blog"));
}

#[test]
fn lookup_unknown_entity() {
    let err = schema().lookup("comment").unwrap_err();
    assert!(err.is_entity_not_found());
    assert!(err.is_schema_error());
}

#[test]
fn duplicate_names_differing_in_case() {
    let mut schema = Schema::default();
    schema.register(Entity::new("user", "users")).unwrap();

    let err = schema.register(Entity::new("USER", "people")).unwrap_err();
    assert!(err.is_duplicate_entity());
    assert_eq!(schema.entities().len(), 1);
}

#[test]
fn relation_to_unregistered_entity() {
    let err = Schema::builder().entity(user()).build().unwrap_err();
    assert!(err.is_invalid_schema());
    assert!(err.to_string().contains("unregistered entity `blog`"));
}

#[test]
fn many_to_many_requires_join_table() {
    let tag = Relation::new(RelationKind::ManyToMany, "user");

    let err = Schema::builder()
        .entity(Entity::new("user", "users"))
        .entity(Entity::new("tag", "tags").relation("users", tag))
        .build()
        .unwrap_err();
    assert!(err.is_invalid_schema());
}

#[test]
fn repeated_field_name() {
    let err = Schema::builder()
        .entity(
            Entity::new("user", "users")
                .primitive("name", Type::String)
                .primitive("NAME", Type::String),
        )
        .build()
        .unwrap_err();
    assert!(err.is_invalid_schema());
}

#[test]
fn table_name_prefix() {
    let schema = Schema::builder()
        .entity(Entity::new("user", "users"))
        .entity(Entity::new("tag", "tags").relation(
            "users",
            Relation::many_to_many(
                "user",
                JoinTable {
                    table: "user_tags".to_string(),
                    source_column: "tag_id".to_string(),
                    target_column: "user_id".to_string(),
                },
            ),
        ))
        .table_name_prefix("app_")
        .build()
        .unwrap();

    assert_eq!(schema.lookup("user").unwrap().table, "app_users");

    let tag = schema.lookup("tag").unwrap();
    let (_, relation) = tag.relations().next().unwrap();
    assert_eq!(relation.join_table.as_ref().unwrap().table, "app_user_tags");
}

#[test]
fn field_resolution() {
    let schema = Schema::builder()
        .entity(
            Entity::new("user", "users")
                .field(Field::primitive("fullName", Type::String).column("full_name")),
        )
        .build()
        .unwrap();
    let user = schema.lookup("user").unwrap();

    assert_eq!(user.resolve_field("FULLNAME").unwrap().column, "full_name");
    assert_eq!(user.field_by_column("full_name").unwrap().name, "fullName");
    assert!(user.resolve_field("nickname").unwrap_err().is_field_not_found());

    // The key is readable even though no field declares it
    assert!(user.has_column("id"));
    assert_eq!(
        user.default_projection(),
        [("id", "id"), ("fullName", "full_name")]
    );
}

#[test]
fn from_json_document() {
    let schema = Schema::from_json(
        r#"{
          "entities": [
            {"name": "user", "table": "users", "fields": [
              {"name": "id", "type": "integer"},
              {"name": "name", "type": "text", "nullable": true},
              {"name": "blogs", "relation": {"kind": "ONE_TO_MANY", "target": "blog", "foreignKey": "author_id"}}
            ]},
            {"name": "blog", "fields": [
              {"name": "title", "type": "varchar"},
              {"name": "author", "relation": {"kind": "MANY_TO_ONE", "target": "user", "foreignKey": "author_id"}}
            ]}
          ]
        }"#,
    )
    .unwrap();

    let blog = schema.lookup("blog").unwrap();
    assert_eq!(blog.table, "blog");
    assert_eq!(blog.relations.get("user"), Some(&RelationKind::ManyToOne));
    assert!(blog.has_column("author_id"));

    let name = schema.lookup("user").unwrap().resolve_field("name").unwrap();
    assert!(name.nullable);
    assert_eq!(name.ty.as_primitive(), Some(&Type::String));
}

#[test]
fn from_json_rejects_typed_relation() {
    let err = Schema::from_json(
        r#"{"entities": [{"name": "user", "fields": [
          {"name": "x", "type": "text", "relation": {"kind": "ONE_TO_MANY", "target": "user"}}
        ]}]}"#,
    )
    .unwrap_err();
    assert!(err.is_invalid_schema());
    assert!(err.to_string().contains("both a type and a relation"));
}

#[test]
fn from_json_malformed() {
    let err = Schema::from_json(r#"{"entities": [{"name": 1}]}"#).unwrap_err();
    assert!(err.is_invalid_schema());
}
