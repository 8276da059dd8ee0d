use super::Param;

/// `INSERT INTO table (columns) VALUES (values)`. Columns and values pair
/// up by position.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,
    pub columns: Vec<String>,
    pub values: Vec<Param>,
}

impl Insert {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: vec![],
            values: vec![],
        }
    }

    /// Sets `column`. A column that is already present keeps its position
    /// and takes the new value.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<Param>) {
        let column = column.into();
        let value = value.into();

        match self.position(&column) {
            Some(i) => self.values[i] = value,
            None => {
                self.columns.push(column);
                self.values.push(value);
            }
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.eq_ignore_ascii_case(column))
    }
}
