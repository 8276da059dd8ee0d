use super::{Comma, Ident, Params, ToSql};

use crate::stmt;

impl ToSql for &stmt::Statement {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            stmt::Statement::Select(stmt) => stmt.to_sql(f),
            stmt::Statement::Insert(stmt) => stmt.to_sql(f),
            stmt::Statement::Update(stmt) => stmt.to_sql(f),
            stmt::Statement::Delete(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::Select {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        if self.columns.is_empty() {
            fmt!(f, "SELECT *");
        } else {
            fmt!(f, "SELECT " Comma(&self.columns));
        }

        let from = &self.from;
        fmt!(f, " FROM " from);

        for join in &self.joins {
            let (table, on) = (&join.table, &join.on);
            fmt!(f, " LEFT JOIN " table " ON " on);
        }

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE " filter);
        }

        if !self.order_by.is_empty() {
            fmt!(f, " ORDER BY " Comma(&self.order_by));
        }

        // Limit and offset are the last parameters of a select
        if let Some(limit) = &self.limit {
            let (count, offset) = (&limit.limit, &limit.offset);
            fmt!(f, " LIMIT " count " OFFSET " offset);
        }
    }
}

impl ToSql for &stmt::SelectItem {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let column = &self.column;
        fmt!(f, column);

        if let Some(alias) = &self.alias {
            fmt!(f, " AS " Ident(alias));
        }
    }
}

impl ToSql for &stmt::TableRef {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, Ident(&self.name));

        if let Some(alias) = &self.alias {
            fmt!(f, " AS " Ident(alias));
        }
    }
}

impl ToSql for &stmt::OrderBy {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let (column, direction) = (&self.column, &self.direction);
        fmt!(f, column " " direction);
    }
}

impl ToSql for &stmt::Direction {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self {
            stmt::Direction::Asc => fmt!(f, "ASC"),
            stmt::Direction::Desc => fmt!(f, "DESC"),
        }
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        fmt!(f, "INSERT INTO " Ident(&self.table));

        if self.columns.is_empty() {
            fmt!(f, " DEFAULT VALUES");
        } else {
            let columns = Comma(self.columns.iter().map(Ident));
            let values = Comma(&self.values);
            fmt!(f, " (" columns ") VALUES (" values ")");
        }
    }
}

impl ToSql for &stmt::Update {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let table = Ident(&self.table);
        let assignments = Comma(&self.assignments);
        let filter = &self.filter;
        fmt!(f, "UPDATE " table " SET " assignments " WHERE " filter);
    }
}

impl ToSql for &stmt::Assignment {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let value = &self.value;
        fmt!(f, Ident(&self.column) " = " value);
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        let filter = &self.filter;
        fmt!(f, "DELETE FROM " Ident(&self.table) " WHERE " filter);
    }
}
