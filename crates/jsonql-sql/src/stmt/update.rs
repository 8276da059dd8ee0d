use super::{Column, Expr, Param};

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,
    pub assignments: Vec<Assignment>,
    pub filter: Expr,
}

/// `column = value`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: String,
    pub value: Expr,
}

impl Update {
    /// An update of the row whose `key` column equals `id`. Assignments are
    /// pushed afterwards.
    pub fn by_key(table: impl Into<String>, key: &str, id: impl Into<Param>) -> Self {
        Self {
            table: table.into(),
            assignments: vec![],
            filter: Expr::eq(Column::new(key), Expr::Param(id.into())),
        }
    }

    /// Assigns `column`, replacing an earlier assignment to it.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<Param>) {
        let column = column.into();
        let value = Expr::Param(value.into());

        match self
            .assignments
            .iter_mut()
            .find(|assignment| assignment.column.eq_ignore_ascii_case(&column))
        {
            Some(assignment) => assignment.value = value,
            None => self.assignments.push(Assignment { column, value }),
        }
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.assignments
            .iter()
            .any(|assignment| assignment.column.eq_ignore_ascii_case(column))
    }
}
