use crate::stmt::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Result of an insert
    Inserted(Inserted),

    /// Rows returned by a query
    Values(ValueSet),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Inserted {
    pub count: u64,

    /// Key generated for the new row; `None` if nothing was inserted or the
    /// store reported no key.
    pub id: Option<Value>,
}

/// Query output: column names, then rows in the same column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn inserted(count: u64, id: Option<Value>) -> Self {
        Self {
            rows: Rows::Inserted(Inserted { count, id }),
        }
    }

    pub fn values(values: ValueSet) -> Self {
        Self {
            rows: Rows::Values(values),
        }
    }
}

impl Rows {
    pub fn is_count(&self) -> bool {
        matches!(self, Self::Count(_))
    }

    pub fn is_values(&self) -> bool {
        matches!(self, Self::Values(_))
    }

    /// Number of affected rows, for any response kind.
    pub fn affected(&self) -> u64 {
        match self {
            Rows::Count(count) => *count,
            Rows::Inserted(inserted) => inserted.count,
            Rows::Values(values) => values.rows.len() as u64,
        }
    }

    #[track_caller]
    pub fn into_inserted(self) -> Inserted {
        match self {
            Rows::Inserted(inserted) => inserted,
            Rows::Count(count) => Inserted { count, id: None },
            _ => todo!("rows={self:#?}"),
        }
    }

    #[track_caller]
    pub fn into_values(self) -> ValueSet {
        match self {
            Self::Values(values) => values,
            _ => todo!("rows={self:#?}"),
        }
    }
}
