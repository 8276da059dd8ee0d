use super::{Column, Expr, Param};

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub table: String,
    pub filter: Expr,
}

impl Delete {
    pub fn by_key(table: impl Into<String>, key: &str, id: impl Into<Param>) -> Self {
        Self {
            table: table.into(),
            filter: Expr::eq(Column::new(key), Expr::Param(id.into())),
        }
    }
}
