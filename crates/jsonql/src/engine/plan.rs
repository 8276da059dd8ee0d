use crate::result::Skipped;

use jsonql_core::{
    schema::{Entity, Field, FieldTy, Relation, RelationKind, Schema},
    stmt::{self, Assignment, FieldValue, Nested, Value},
    Error, Result,
};
use jsonql_sql::stmt::{self as sql, Column, Expr, Param, Statement};
use tracing::warn;

/// What to do when the foreign key linking a nested statement to its parent
/// cannot be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ForeignKeyPolicy {
    /// Fail the whole request before any SQL runs
    #[default]
    Reject,

    /// Drop the nested branch, log it and report it in the result
    SkipAndReport,
}

/// A write statement and the statements that run after it, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPersist {
    pub root: Statement,

    /// Key of the root row, when known before it is written
    pub id: Option<Value>,

    pub nested: Vec<PlannedPersist>,
}

/// Turns insert and update requests into SQL statement trees.
///
/// Scalar fields become columns of the row being written. Relationship
/// fields either set a foreign key on that row (the row references an
/// existing one) or become nested statements that run once the row exists
/// and carry its id.
#[derive(Debug)]
pub struct Planner<'a> {
    schema: &'a Schema,
    policy: ForeignKeyPolicy,
    skipped: Vec<Skipped>,
}

/// The row a statement writes, either a new one or an existing one.
enum Row {
    Insert(sql::Insert),
    Update(sql::Update),
}

impl<'a> Planner<'a> {
    pub fn new(schema: &'a Schema, policy: ForeignKeyPolicy) -> Self {
        Self {
            schema,
            policy,
            skipped: vec![],
        }
    }

    pub fn plan_insert(&mut self, insert: &stmt::Insert) -> Result<PlannedPersist> {
        let entity = self.schema.lookup(&insert.entity)?;
        let mut row = Row::Insert(sql::Insert::new(&entity.table));

        let id = match &insert.data_id {
            Some(id) => {
                let id = id.clone().coerce(*entity.primary_key_ty());
                row.set(&entity.primary_key, id.clone());
                Some(id)
            }
            None => assigned_id(entity, &insert.fields),
        };

        self.plan_row(entity, row, id, &insert.fields, None)
    }

    pub fn plan_update(&mut self, update: &stmt::Update) -> Result<PlannedPersist> {
        let entity = self.schema.lookup(&update.entity)?;
        let id = update.data_id.clone().coerce(*entity.primary_key_ty());

        let row = Row::Update(sql::Update::by_key(
            &entity.table,
            &entity.primary_key,
            id.clone(),
        ));

        self.plan_row(entity, row, Some(id), &update.fields, None)
    }

    /// Nested branches dropped under [`ForeignKeyPolicy::SkipAndReport`].
    pub fn into_skipped(self) -> Vec<Skipped> {
        self.skipped
    }

    /// Plans one row and, depth first, everything nested under it.
    ///
    /// `id` is the row's id when it is known before the row is written.
    /// `link` is the foreign key pointing at the parent row; it is set last
    /// so it wins over any value the payload carries for the same column.
    fn plan_row(
        &mut self,
        entity: &'a Entity,
        mut row: Row,
        id: Option<Value>,
        fields: &[Assignment],
        link: Option<(&str, Param)>,
    ) -> Result<PlannedPersist> {
        let mut nested = vec![];

        for assignment in fields {
            let FieldValue::Scalar(value) = &assignment.value else {
                continue;
            };

            let Some(field) = entity.field_by_name(&assignment.field) else {
                if assignment.field.eq_ignore_ascii_case(&entity.primary_key) {
                    let value = value.clone().coerce(*entity.primary_key_ty());
                    row.set_column(entity, &entity.primary_key, value);
                    continue;
                }
                return Err(Error::field_not_found(&entity.name, &assignment.field));
            };

            match &field.ty {
                FieldTy::Primitive(ty) => {
                    row.set_column(entity, &field.column, value.clone().coerce(*ty));
                }
                FieldTy::Relation(relation) => {
                    self.plan_reference(entity, field, relation, value, &mut row)?;
                }
            }
        }

        // Children of a row whose id is only known once it is written wait
        // on the generated key
        let parent = match &id {
            Some(id) => Param::Literal(id.clone()),
            None => Param::PendingParentId,
        };

        for assignment in fields {
            let FieldValue::Nested(values) = &assignment.value else {
                continue;
            };

            let field = entity.resolve_field(&assignment.field)?;
            let Some(relation) = field.as_relation() else {
                return Err(Error::relation_not_found(&entity.name, &field.name));
            };

            match self.plan_relation(entity, field, relation, values, &parent, &mut row) {
                Ok(planned) => nested.extend(planned),
                Err(err)
                    if err.is_foreign_key_unresolved()
                        && self.policy == ForeignKeyPolicy::SkipAndReport =>
                {
                    warn!(
                        entity = %entity.name,
                        field = %field.name,
                        error = %err,
                        "skipping nested write"
                    );
                    self.skipped.push(Skipped {
                        entity: entity.name.clone(),
                        field: field.name.clone(),
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }

        if let Some((column, param)) = link {
            row.set(column, param);
        }

        Ok(PlannedPersist {
            root: row.into_statement(entity),
            id,
            nested,
        })
    }

    /// A scalar on a relationship field is the id of the referenced row.
    fn plan_reference(
        &self,
        entity: &'a Entity,
        field: &Field,
        relation: &Relation,
        value: &Value,
        row: &mut Row,
    ) -> Result<()> {
        if !relation.owns_foreign_key() {
            return Err(Error::unsupported_relationship_write(
                &entity.name,
                &field.name,
                format!(
                    "a {} relationship takes nested `values`, not a single value",
                    relation.kind
                ),
            ));
        }

        let fk = self.schema.foreign_key(entity, field)?;
        let id = value.clone().coerce(*fk.referenced.primary_key_ty());
        row.set(&fk.column, id);
        Ok(())
    }

    fn plan_relation(
        &mut self,
        entity: &'a Entity,
        field: &Field,
        relation: &Relation,
        values: &[Nested],
        parent: &Param,
        row: &mut Row,
    ) -> Result<Vec<PlannedPersist>> {
        if relation.kind == RelationKind::ManyToMany {
            return Err(Error::unsupported_relationship_write(
                &entity.name,
                &field.name,
                "many-to-many relationships are read-only",
            ));
        }

        let target = self.schema.lookup(&relation.target)?;

        for nested in values {
            self.check_target(entity, field, target, nested)?;
        }

        if relation.owns_foreign_key() {
            // The row being written references an existing row. Nothing is
            // nested; the referenced id goes into the foreign key.
            let [nested] = values else {
                return Err(Error::unsupported_relationship_write(
                    &entity.name,
                    &field.name,
                    format!(
                        "a {} relationship references exactly one row; got {}",
                        relation.kind,
                        values.len()
                    ),
                ));
            };

            let Some(id) = nested.reference_id(&target.primary_key) else {
                return Err(Error::unsupported_relationship_write(
                    &entity.name,
                    &field.name,
                    format!(
                        "{} rows are referenced by id; they are not created from a child",
                        target.name
                    ),
                ));
            };

            let fk = self.schema.foreign_key(entity, field)?;
            row.set(&fk.column, id.clone().coerce(*target.primary_key_ty()));
            return Ok(vec![]);
        }

        if relation.kind == RelationKind::OneToOne && values.len() > 1 {
            return Err(Error::unsupported_relationship_write(
                &entity.name,
                &field.name,
                format!("a one-to-one relationship takes one row; got {}", values.len()),
            ));
        }

        let fk = self.schema.foreign_key(entity, field)?.column;

        values
            .iter()
            .map(|nested| self.plan_nested(target, nested, &fk, parent.clone()))
            .collect()
    }

    /// Plans a row on the side of a relationship that stores the foreign
    /// key. A payload carrying an id updates that row, otherwise a new row
    /// is inserted.
    fn plan_nested(
        &mut self,
        target: &'a Entity,
        nested: &Nested,
        fk: &str,
        parent: Param,
    ) -> Result<PlannedPersist> {
        let existing = nested
            .data_id
            .as_ref()
            .or_else(|| nested.reference_id(&target.primary_key));

        let (row, id) = match existing {
            Some(id) => {
                let id = id.clone().coerce(*target.primary_key_ty());
                let row = Row::Update(sql::Update::by_key(
                    &target.table,
                    &target.primary_key,
                    id.clone(),
                ));
                (row, Some(id))
            }
            None => (
                Row::Insert(sql::Insert::new(&target.table)),
                assigned_id(target, &nested.fields),
            ),
        };

        self.plan_row(target, row, id, &nested.fields, Some((fk, parent)))
    }

    fn check_target(
        &self,
        entity: &Entity,
        field: &Field,
        target: &Entity,
        nested: &Nested,
    ) -> Result<()> {
        let Some(name) = &nested.entity else {
            return Ok(());
        };

        if self.schema.lookup(name)?.name != target.name {
            return Err(Error::relation_not_found(
                &entity.name,
                format!("{} -> {name}", field.name),
            ));
        }

        Ok(())
    }
}

impl Row {
    fn set(&mut self, column: &str, value: impl Into<Param>) {
        match self {
            Row::Insert(insert) => insert.push(column, value),
            Row::Update(update) => update.set(column, value),
        }
    }

    /// Sets a column from a scalar field. An update never rewrites the key
    /// it is filtered by.
    fn set_column(&mut self, entity: &Entity, column: &str, value: Value) {
        if matches!(self, Row::Update(_)) && column.eq_ignore_ascii_case(&entity.primary_key) {
            return;
        }

        self.set(column, value);
    }

    fn into_statement(self, entity: &Entity) -> Statement {
        match self {
            Row::Insert(insert) => insert.into(),
            Row::Update(mut update) => {
                // `UPDATE t SET WHERE ..` is not valid SQL. Touch the key so
                // that the statement still reports whether the row exists.
                if update.assignments.is_empty() {
                    update.assignments.push(sql::Assignment {
                        column: entity.primary_key.clone(),
                        value: Expr::Column(Column::new(&entity.primary_key)),
                    });
                }
                update.into()
            }
        }
    }
}

/// The id a payload assigns to the row's key column, if any.
fn assigned_id(entity: &Entity, fields: &[Assignment]) -> Option<Value> {
    let ty = *entity.primary_key_ty();

    fields
        .iter()
        .find(|assignment| {
            assignment.field.eq_ignore_ascii_case(&entity.primary_key)
                || entity
                    .field_by_name(&assignment.field)
                    .is_some_and(|field| {
                        field.is_primitive()
                            && field.column.eq_ignore_ascii_case(&entity.primary_key)
                    })
        })
        .and_then(Assignment::as_scalar)
        .filter(|value| !value.is_null())
        .map(|value| value.clone().coerce(ty))
}
