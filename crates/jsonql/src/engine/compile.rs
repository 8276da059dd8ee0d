use jsonql_core::{
    bail,
    schema::{Entity, Field, FieldTy, RelationKind, Schema},
    stmt::{self, CmpOp, Condition, LogicalOp, Page, Type, Value},
    Error, Result,
};
use jsonql_sql::{
    stmt::{
        BinaryOp, Column, Expr, ExprBetween, ExprExists, ExprInList, ExprInSubquery, ExprIs,
        ExprIsNull, ExprLike, Join, Limit, OrderBy, Select, SelectItem, TableRef,
    },
    Param,
};

/// A select compiled to its SQL form.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSelect {
    pub stmt: Select,

    /// Where each selected column lands in the returned record, by position
    pub shape: Vec<Slot>,

    pub page: Page,
}

/// Destination of one selected column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// A top-level key of the record
    Field(String),

    /// A key of the nested record folded under a relationship field. The
    /// column is selected as `<field>_<key>`.
    Nested { field: String, key: String },
}

/// Compiles a select request: projection (with relationship joins), `WHERE`,
/// `ORDER BY`, then `LIMIT` / `OFFSET`. Parameters are collected in that
/// order.
pub fn compile(schema: &Schema, select: &stmt::Select) -> Result<CompiledSelect> {
    let mut compiler = Compiler::new(schema, &select.entity)?;

    compiler.project(&select.fields)?;
    compiler.filter(select.filter.as_ref())?;
    compiler.order_by(&select.sort)?;
    compiler.limit(&select.page);

    Ok(CompiledSelect {
        stmt: compiler.stmt,
        shape: compiler.shape,
        page: select.page,
    })
}

struct Compiler<'a> {
    schema: &'a Schema,
    entity: &'a Entity,
    stmt: Select,
    shape: Vec<Slot>,
}

impl<'a> Compiler<'a> {
    fn new(schema: &'a Schema, entity: &str) -> Result<Self> {
        let entity = schema.lookup(entity)?;

        Ok(Self {
            schema,
            entity,
            stmt: Select::from(&entity.table),
            shape: vec![],
        })
    }

    fn base(&self, column: &str) -> Column {
        Column::qualified(&self.entity.table, column)
    }

    fn project(&mut self, fields: &[String]) -> Result<()> {
        if fields.is_empty() {
            for (name, column) in self.entity.default_projection() {
                self.select_field(self.base(column), name);
            }
            return Ok(());
        }

        for name in fields {
            if let Some((relation, column)) = name.split_once('.') {
                let (target, alias) = self.join(relation)?;
                let field = target.resolve_field(column)?;
                let column = target_column(target, field)?;
                self.select_nested(&alias, column);
                continue;
            }

            match self.entity.field_by_name(name) {
                Some(field) if field.is_relation() => {
                    let (target, alias) = self.join(&field.name)?;

                    for (_, column) in target.default_projection() {
                        self.select_nested(&alias, column);
                    }
                }
                Some(field) => {
                    self.select_field(self.base(&field.column), &field.name);
                }
                None if name.eq_ignore_ascii_case(&self.entity.primary_key) => {
                    self.select_field(self.base(&self.entity.primary_key), name);
                }
                None => return Err(Error::field_not_found(&self.entity.name, name)),
            }
        }

        Ok(())
    }

    fn select_field(&mut self, column: Column, name: &str) {
        self.stmt.columns.push(SelectItem::new(column, name));
        self.shape.push(Slot::Field(name.to_string()));
    }

    /// Selects `alias.column` as `<alias>_<column>`, to be folded into the
    /// record nested under `alias`.
    fn select_nested(&mut self, alias: &str, column: &str) {
        self.stmt.columns.push(SelectItem::new(
            Column::qualified(alias, column),
            format!("{alias}_{column}"),
        ));
        self.shape.push(Slot::Nested {
            field: alias.to_string(),
            key: column.to_string(),
        });
    }

    /// Joins the relationship `name` (once) and returns its target entity
    /// with the alias the target is joined under.
    fn join(&mut self, name: &str) -> Result<(&'a Entity, String)> {
        let entity = self.entity;
        let field = entity.resolve_field(name)?;

        let FieldTy::Relation(relation) = &field.ty else {
            return Err(Error::relation_not_found(&entity.name, &field.name));
        };

        let target = self.schema.lookup(&relation.target)?;
        let alias = field.name.clone();

        if self.stmt.is_joined(&alias) {
            return Ok((target, alias));
        }

        let base_pk = self.base(&entity.primary_key);

        if relation.kind == RelationKind::ManyToMany {
            let Some(join_table) = &relation.join_table else {
                return Err(Error::sql_build(format!(
                    "{}.{} is many-to-many but has no join table",
                    entity.name, field.name
                )));
            };

            let link = format!("{alias}_link");

            self.stmt.joins.push(Join {
                table: TableRef::aliased(&join_table.table, &link),
                on: Expr::eq(Column::qualified(&link, &join_table.source_column), base_pk),
            });
            self.stmt.joins.push(Join {
                table: TableRef::aliased(&target.table, &alias),
                on: Expr::eq(
                    Column::qualified(&alias, &target.primary_key),
                    Column::qualified(&link, &join_table.target_column),
                ),
            });

            return Ok((target, alias));
        }

        let fk = self.schema.foreign_key(entity, field)?;

        let on = if fk.on_source {
            // The key is on this table and references the target's id
            Expr::eq(
                Column::qualified(&alias, &target.primary_key),
                self.base(&fk.column),
            )
        } else {
            Expr::eq(Column::qualified(&alias, &fk.column), base_pk)
        };

        self.stmt.joins.push(Join {
            table: TableRef::aliased(&target.table, &alias),
            on,
        });

        Ok((target, alias))
    }

    /// Resolves a filter or sort field to a column, joining the relationship
    /// of a dotted name. Returns the column type when it is known.
    fn column(&mut self, name: &str) -> Result<(Column, Option<Type>)> {
        if let Some((relation, column)) = name.split_once('.') {
            let (target, alias) = self.join(relation)?;
            let field = target.resolve_field(column)?;
            let column = target_column(target, field)?;
            return Ok((Column::qualified(&alias, column), primitive_ty(field)));
        }

        match self.entity.field_by_name(name) {
            Some(field) => {
                let column = match &field.ty {
                    FieldTy::Primitive(_) => field.column.clone(),
                    // Comparing a relationship that stores its key on this
                    // table compares the key column
                    FieldTy::Relation(relation) if relation.owns_foreign_key() => {
                        self.schema.foreign_key(self.entity, field)?.column
                    }
                    FieldTy::Relation(_) => {
                        return Err(Error::field_not_found(&self.entity.name, name))
                    }
                };
                Ok((self.base(&column), primitive_ty(field)))
            }
            None if name.eq_ignore_ascii_case(&self.entity.primary_key) => Ok((
                self.base(&self.entity.primary_key),
                Some(*self.entity.primary_key_ty()),
            )),
            None => Err(Error::field_not_found(&self.entity.name, name)),
        }
    }

    fn filter(&mut self, filter: Option<&Condition>) -> Result<()> {
        self.stmt.filter = match filter {
            None => None,
            // An empty AND does not restrict the rows
            Some(Condition::Logical(logical))
                if logical.op == LogicalOp::And && logical.children.is_empty() =>
            {
                None
            }
            Some(condition) => Some(self.condition(condition)?),
        };
        Ok(())
    }

    fn condition(&mut self, condition: &Condition) -> Result<Expr> {
        Ok(match condition {
            Condition::Comparison(c) => {
                let (column, ty) = self.column(&c.field)?;
                let value = coerce(c.value.clone(), ty);

                let expr = match (c.op, value) {
                    (CmpOp::Is, Value::Null) => ExprIsNull {
                        expr: Box::new(column.into()),
                        negate: c.negate,
                    }
                    .into(),
                    (CmpOp::Is, value) => ExprIs {
                        expr: Box::new(column.into()),
                        value,
                        negate: c.negate,
                    }
                    .into(),
                    (op, value) => {
                        let expr = Expr::binary_op(column, binary_op(op), param(value));
                        if c.negate {
                            Expr::not(expr)
                        } else {
                            expr
                        }
                    }
                };
                expr
            }
            Condition::Logical(logical) => {
                let children = logical
                    .children
                    .iter()
                    .map(|child| self.condition(child))
                    .collect::<Result<Vec<_>>>()?;

                match logical.op {
                    LogicalOp::And if children.is_empty() => Expr::Bool(true),
                    LogicalOp::Or if children.is_empty() => Expr::Bool(false),
                    LogicalOp::And => Expr::and_from_vec(children),
                    LogicalOp::Or => Expr::or_from_vec(children),
                }
            }
            Condition::Between(c) => {
                let (column, ty) = self.column(&c.field)?;
                ExprBetween {
                    expr: Box::new(column.into()),
                    low: Box::new(param(coerce(c.start.clone(), ty))),
                    high: Box::new(param(coerce(c.end.clone(), ty))),
                    negate: c.negate,
                }
                .into()
            }
            Condition::In(c) => {
                let (column, ty) = self.column(&c.field)?;

                // `IN ()` is not valid SQL. No value matches an empty list.
                if c.values.is_empty() {
                    return Ok(Expr::Bool(c.negate));
                }

                ExprInList {
                    expr: Box::new(column.into()),
                    list: c
                        .values
                        .iter()
                        .map(|value| param(coerce(value.clone(), ty)))
                        .collect(),
                    negate: c.negate,
                }
                .into()
            }
            Condition::Like(c) => {
                let (column, _) = self.column(&c.field)?;
                let pattern = match &c.pattern {
                    Value::String(pattern) => format!("%{pattern}%"),
                    Value::Null => "%".to_string(),
                    other => format!("%{other}%"),
                };

                ExprLike {
                    expr: Box::new(column.into()),
                    pattern: Box::new(param(Value::String(pattern))),
                    negate: c.negate,
                }
                .into()
            }
            Condition::Null(c) => {
                let (column, _) = self.column(&c.field)?;
                ExprIsNull {
                    expr: Box::new(column.into()),
                    negate: c.negate,
                }
                .into()
            }
            Condition::Subquery(c) => {
                let query = Box::new(self.subquery(&c.select)?);

                match &c.field {
                    Some(field) => {
                        if query.columns.len() != 1 {
                            bail!(
                                "subquery compared with `{field}` must select exactly one field; selects {}",
                                query.columns.len()
                            );
                        }

                        let (column, _) = self.column(field)?;
                        ExprInSubquery {
                            expr: Box::new(column.into()),
                            query,
                            negate: c.negate,
                        }
                        .into()
                    }
                    None => ExprExists {
                        query,
                        negate: c.negate,
                    }
                    .into(),
                }
            }
        })
    }

    /// Compiles an inner select. Without fields it selects the primary key,
    /// and it is only paginated when the request asks for it.
    fn subquery(&self, select: &stmt::Select) -> Result<Select> {
        let mut inner = Compiler::new(self.schema, &select.entity)?;

        if select.fields.is_empty() {
            let pk = inner.base(&inner.entity.primary_key);
            inner.stmt.columns.push(SelectItem {
                column: pk,
                alias: None,
            });
        } else {
            inner.project(&select.fields)?;
            for item in &mut inner.stmt.columns {
                item.alias = None;
            }
        }

        inner.filter(select.filter.as_ref())?;
        inner.order_by(&select.sort)?;

        if select.page != Page::default() {
            inner.limit(&select.page);
        }

        Ok(inner.stmt)
    }

    fn order_by(&mut self, sort: &[stmt::Sort]) -> Result<()> {
        for entry in sort {
            let (column, _) = self.column(&entry.field)?;
            self.stmt.order_by.push(OrderBy {
                column,
                direction: entry.direction,
            });
        }
        Ok(())
    }

    fn limit(&mut self, page: &Page) {
        self.stmt.limit = Some(Limit {
            limit: Param::from(page.limit()),
            offset: Param::from(page.offset()),
        });
    }
}

/// Column of `field` on `target`, for dotted references.
fn target_column<'f>(target: &Entity, field: &'f Field) -> Result<&'f str> {
    match &field.ty {
        FieldTy::Primitive(_) => Ok(&field.column),
        FieldTy::Relation(_) => Err(Error::field_not_found(&target.name, &field.name)),
    }
}

fn primitive_ty(field: &Field) -> Option<Type> {
    field.ty.as_primitive().copied()
}

fn coerce(value: Value, ty: Option<Type>) -> Value {
    match ty {
        Some(ty) => value.coerce(ty),
        None => value,
    }
}

fn param(value: Value) -> Expr {
    Expr::Param(Param::Literal(value))
}

fn binary_op(op: CmpOp) -> BinaryOp {
    match op {
        CmpOp::Eq => BinaryOp::Eq,
        CmpOp::Ne => BinaryOp::Ne,
        CmpOp::Gt => BinaryOp::Gt,
        CmpOp::Ge => BinaryOp::Ge,
        CmpOp::Lt => BinaryOp::Lt,
        CmpOp::Le => BinaryOp::Le,
        // `IS` is written inline and never reaches here
        CmpOp::Is => BinaryOp::Eq,
    }
}
