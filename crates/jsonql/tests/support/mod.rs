#![allow(dead_code)]

mod exec_log;
pub use exec_log::{ExecLog, LoggingDriver};

use jsonql::{
    driver::{Connection as _, Operation, Sql},
    Db, ForeignKeyPolicy, Schema,
};
use jsonql_driver_sqlite::Sqlite;

/// Users write blogs, blogs collect comments, a user has one profile and
/// belongs to many groups.
pub const SCHEMA: &str = r#"{
  "entities": [
    {"name": "user", "table": "users", "fields": [
      {"name": "id", "type": "integer"},
      {"name": "name", "type": "text"},
      {"name": "email", "type": "text", "nullable": true},
      {"name": "blogs", "relation": {"kind": "ONE_TO_MANY", "target": "blog", "inverse": "author"}},
      {"name": "profile", "relation": {"kind": "ONE_TO_ONE", "target": "profile", "owning": false}},
      {"name": "groups", "relation": {"kind": "MANY_TO_MANY", "target": "group",
        "joinTable": {"table": "memberships", "sourceColumn": "user_id", "targetColumn": "group_id"}}}
    ]},
    {"name": "blog", "table": "blogs", "fields": [
      {"name": "id", "type": "integer"},
      {"name": "title", "type": "text"},
      {"name": "views", "type": "integer"},
      {"name": "author", "relation": {"kind": "MANY_TO_ONE", "target": "user", "foreignKey": "user_id"}},
      {"name": "comments", "relation": {"kind": "ONE_TO_MANY", "target": "comment"}}
    ]},
    {"name": "comment", "table": "comments", "fields": [
      {"name": "id", "type": "integer"},
      {"name": "body", "type": "text"},
      {"name": "blog", "relation": {"kind": "MANY_TO_ONE", "target": "blog"}}
    ]},
    {"name": "profile", "table": "profiles", "fields": [
      {"name": "id", "type": "integer"},
      {"name": "bio", "type": "text", "nullable": true},
      {"name": "user", "relation": {"kind": "ONE_TO_ONE", "target": "user", "owning": true}}
    ]},
    {"name": "group", "table": "groups", "fields": [
      {"name": "id", "type": "integer"},
      {"name": "name", "type": "text"}
    ]},
    {"name": "tag", "table": "tags", "fields": [
      {"name": "id", "type": "integer"},
      {"name": "label", "type": "text"},
      {"name": "notes", "relation": {"kind": "ONE_TO_MANY", "target": "note"}}
    ]},
    {"name": "note", "table": "notes", "fields": [
      {"name": "id", "type": "integer"},
      {"name": "text", "type": "text"}
    ]}
  ]
}"#;

/// `tag.notes` has no foreign key column on `notes`, so it never resolves.
pub const TABLES: &[&str] = &[
    "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL, email TEXT)",
    "CREATE TABLE blogs (id INTEGER PRIMARY KEY, title TEXT NOT NULL, views INTEGER NOT NULL DEFAULT 0, user_id INTEGER)",
    "CREATE TABLE comments (id INTEGER PRIMARY KEY, body TEXT NOT NULL, blog_id INTEGER)",
    "CREATE TABLE profiles (id INTEGER PRIMARY KEY, bio TEXT, user_id INTEGER)",
    "CREATE TABLE \"groups\" (id INTEGER PRIMARY KEY, name TEXT NOT NULL)",
    "CREATE TABLE memberships (user_id INTEGER NOT NULL, group_id INTEGER NOT NULL)",
    "CREATE TABLE tags (id INTEGER PRIMARY KEY, label TEXT NOT NULL)",
    "CREATE TABLE notes (id INTEGER PRIMARY KEY, text TEXT NOT NULL)",
];

pub fn schema() -> Schema {
    Schema::from_json(SCHEMA).unwrap()
}

/// A database over a fresh in-memory SQLite store, with every driver
/// operation after table creation recorded in the returned log.
pub async fn setup() -> (Db, ExecLog) {
    setup_with(ForeignKeyPolicy::Reject).await
}

pub async fn setup_with(policy: ForeignKeyPolicy) -> (Db, ExecLog) {
    let driver = LoggingDriver::new(Box::new(Sqlite::in_memory()));
    let mut log = driver.log();

    let db = Db::builder()
        .schema(schema())
        .foreign_key_policy(policy)
        .build(driver)
        .await
        .unwrap();

    let mut connection = db.connection().await.unwrap();
    for table in TABLES {
        connection
            .exec(Operation::Execute(Sql::new(*table, vec![])))
            .await
            .unwrap();
    }
    drop(connection);

    log.clear();
    (db, log)
}

/// Runs a read-only SQL query and returns its rows.
pub async fn query(db: &Db, sql: &str) -> Vec<Vec<jsonql::stmt::Value>> {
    let mut connection = db.connection().await.unwrap();
    let res = connection
        .exec(Operation::Query(Sql::new(sql, vec![])))
        .await
        .unwrap();
    res.rows.into_values().rows
}
