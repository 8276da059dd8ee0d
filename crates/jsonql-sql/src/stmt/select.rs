use super::{Column, Direction, Expr, Param};

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// Projection. Empty selects `*`.
    pub columns: Vec<SelectItem>,
    pub from: TableRef,
    /// Joined tables, in join order. All joins are `LEFT JOIN`.
    pub joins: Vec<Join>,
    pub filter: Option<Expr>,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<Limit>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    pub column: Column,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub name: String,
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub table: TableRef,
    pub on: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub column: Column,
    pub direction: Direction,
}

/// `LIMIT ? OFFSET ?`. Both are always bound as parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Limit {
    pub limit: Param,
    pub offset: Param,
}

impl Select {
    pub fn from(table: impl Into<String>) -> Self {
        Self {
            columns: vec![],
            from: TableRef::new(table),
            joins: vec![],
            filter: None,
            order_by: vec![],
            limit: None,
        }
    }

    /// True if a table is already joined under `alias`.
    pub fn is_joined(&self, alias: &str) -> bool {
        self.joins.iter().any(|join| join.table.reference() == alias)
    }
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }

    /// The name other clauses use to refer to this table.
    pub fn reference(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl SelectItem {
    pub fn new(column: Column, alias: impl Into<String>) -> Self {
        Self {
            column,
            alias: Some(alias.into()),
        }
    }
}
