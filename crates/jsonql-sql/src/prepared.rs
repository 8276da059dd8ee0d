use crate::stmt::{Param, Value};

/// What kind of statement a [`PreparedSql`] runs. Decides which driver
/// operation executes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

/// SQL text with its parameters, plus the statements that must run after it
/// (cascading writes). Parameters pair with the `?` placeholders in the text
/// by position.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSql {
    pub kind: StatementKind,
    pub sql: String,
    pub params: Vec<Param>,

    /// Key of the row the statement writes, when it is known before the
    /// statement runs (a client-supplied id, or the row being updated)
    pub id: Option<Value>,

    pub nested: Vec<PreparedSql>,
}

impl PreparedSql {
    pub fn new(kind: StatementKind, sql: String, params: Vec<Param>) -> Self {
        Self {
            kind,
            sql,
            params,
            id: None,
            nested: vec![],
        }
    }

    /// True if any parameter waits on the parent statement's generated id.
    pub fn has_pending(&self) -> bool {
        self.params.iter().any(Param::is_pending)
    }

    /// Substitutes the parent's generated id for every pending parameter.
    /// Returns `None` if a parameter is pending and `parent_id` is `None`.
    pub fn bind(&self, parent_id: Option<&Value>) -> Option<Vec<Value>> {
        self.params
            .iter()
            .map(|param| param.bind(parent_id))
            .collect()
    }

    /// Number of statements in this tree, including this one.
    pub fn len(&self) -> usize {
        1 + self.nested.iter().map(PreparedSql::len).sum::<usize>()
    }

    /// Never true; a prepared tree has at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of `?` placeholders in the SQL text, skipping quoted strings and
    /// identifiers.
    pub fn placeholder_count(&self) -> usize {
        let mut count = 0;
        let mut quote = None;

        for ch in self.sql.chars() {
            match (quote, ch) {
                (None, '\'' | '"') => quote = Some(ch),
                (Some(q), c) if c == q => quote = None,
                (None, '?') => count += 1,
                _ => {}
            }
        }

        count
    }
}
