use jsonql::{
    driver::{Connection as _, Operation, Sql},
    Db,
};
use jsonql_driver_sqlite::Sqlite;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SCHEMA: &str = include_str!("../schema.json");

const TABLES: &[&str] = &[
    "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL, email TEXT)",
    "CREATE TABLE blogs (id INTEGER PRIMARY KEY, title TEXT NOT NULL, user_id INTEGER REFERENCES users(id))",
    "CREATE TABLE comments (id INTEGER PRIMARY KEY, body TEXT NOT NULL, blog_id INTEGER REFERENCES blogs(id))",
];

const REQUESTS: &[&str] = &[
    r#"{"statement": "insert", "entityId": "user",
        "fields": [
          {"field": "name", "value": "John Doe"},
          {"field": "email", "value": "john@example.com"},
          {"field": "blogs", "values": [
            {"entityId": "blog", "fields": [
              {"field": "title", "value": "Hello, world"},
              {"field": "comments", "values": [
                {"fields": [{"field": "body", "value": "First!"}]}
              ]}
            ]},
            {"entityId": "blog", "fields": [{"field": "title", "value": "Second post"}]}
          ]}
        ]}"#,
    r#"{"statement": "insert", "entityId": "blog",
        "fields": [
          {"field": "title", "value": "Guest post"},
          {"field": "author", "values": [{"fields": [{"field": "id", "value": 1}]}]}
        ]}"#,
    r#"{"statement": "select", "entityId": "Blog",
        "fields": ["id", "title", "author"],
        "filters": {"rel": "or", "conditions": [
          {"field": "title", "method": "like", "value": "post"},
          {"field": "author.name", "method": "eq", "value": "John Doe"}
        ]},
        "sort": [{"field": "id", "direction": "desc"}],
        "page": {"size": 10, "number": 1}}"#,
    r#"{"statement": "update", "entityId": "user", "dataId": "1",
        "fields": [{"field": "email", "value": "john@doe.dev"}]}"#,
    r#"{"statement": "delete", "entityId": "comment", "id": "1"}"#,
];

#[tokio::main]
async fn main() -> jsonql::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db = Db::builder()
        .schema_json(SCHEMA)?
        .build(Sqlite::in_memory())
        .await?;

    // The in-memory database lives on the pool's only connection
    {
        let mut connection = db.connection().await?;
        for table in TABLES {
            connection
                .exec(Operation::Execute(Sql::new(*table, vec![])))
                .await?;
        }
    }

    for request in REQUESTS {
        let compact = request.split_whitespace().collect::<Vec<_>>().join(" ");
        info!(request = %compact, "executing request");

        let res = db.exec_json(request).await?;
        info!(affected_rows = res.affected_rows(), "request complete");
        println!("{}", serde_json::to_string_pretty(&res)?);
    }

    Ok(())
}
