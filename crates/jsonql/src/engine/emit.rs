use super::{CompiledSelect, PlannedPersist};

use jsonql_core::{
    stmt::{Delete, Statement},
    Result, Schema,
};
use jsonql_sql::{stmt as sql, PreparedSql, Serializer};

/// Serializes a planned write and, recursively, its nested statements.
pub fn emit(serializer: &Serializer, planned: &PlannedPersist) -> PreparedSql {
    let mut prepared = serializer.prepare(&planned.root);
    prepared.id = planned.id.clone();
    prepared.nested = planned
        .nested
        .iter()
        .map(|nested| emit(serializer, nested))
        .collect();
    prepared
}

pub fn emit_select(serializer: &Serializer, compiled: &CompiledSelect) -> PreparedSql {
    serializer.prepare(&sql::Statement::Select(compiled.stmt.clone()))
}

/// `DELETE FROM <table> WHERE <pk> = ?`
pub fn emit_delete(schema: &Schema, serializer: &Serializer, delete: &Delete) -> Result<PreparedSql> {
    let entity = schema.lookup(&delete.entity)?;
    let id = delete.id.clone().coerce(*entity.primary_key_ty());

    let stmt = sql::Delete::by_key(&entity.table, &entity.primary_key, id.clone());

    let mut prepared = serializer.prepare(&stmt.into());
    prepared.id = Some(id);
    Ok(prepared)
}

/// Statement kind name, for logs.
pub(crate) fn describe(stmt: &Statement) -> &'static str {
    match stmt {
        Statement::Select(_) => "select",
        Statement::Insert(_) => "insert",
        Statement::Update(_) => "update",
        Statement::Delete(_) => "delete",
    }
}
