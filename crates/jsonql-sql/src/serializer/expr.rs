use super::{value::Literal, Comma, Delimited, Ident, Params, ToSql};

use crate::stmt;

impl ToSql for &stmt::Column {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        if let Some(table) = &self.table {
            fmt!(f, Ident(table) ".");
        }
        fmt!(f, Ident(&self.name));
    }
}

impl ToSql for &stmt::Expr {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        use stmt::Expr::*;

        match self {
            And(operands) if operands.is_empty() => fmt!(f, "1 = 1"),
            And(operands) => {
                fmt!(f, Delimited(operands.iter().map(Operand), " AND "));
            }
            Between(expr) => {
                let (lhs, low, high) = (&*expr.expr, &*expr.low, &*expr.high);
                let not = not(expr.negate);
                fmt!(f, lhs not " BETWEEN " low " AND " high);
            }
            BinaryOp(expr) => {
                let (lhs, rhs) = (&*expr.lhs, &*expr.rhs);
                fmt!(f, lhs " " expr.op " " rhs);
            }
            Bool(true) => fmt!(f, "1 = 1"),
            Bool(false) => fmt!(f, "1 = 0"),
            Column(column) => column.to_sql(f),
            Exists(expr) => {
                let query = &*expr.query;
                let not = if expr.negate { "NOT " } else { "" };
                fmt!(f, not "EXISTS (" query ")");
            }
            InList(expr) => {
                let lhs = &*expr.expr;
                let list = Comma(&expr.list);
                let not = not(expr.negate);
                fmt!(f, lhs not " IN (" list ")");
            }
            InSubquery(expr) => {
                let (lhs, query) = (&*expr.expr, &*expr.query);
                let not = not(expr.negate);
                fmt!(f, lhs not " IN (" query ")");
            }
            Is(expr) => {
                let lhs = &*expr.expr;
                let value = Literal(&expr.value);
                let not = not(expr.negate);
                fmt!(f, lhs " IS" not " " value);
            }
            IsNull(expr) => {
                let lhs = &*expr.expr;
                if expr.negate {
                    fmt!(f, lhs " IS NOT NULL");
                } else {
                    fmt!(f, lhs " IS NULL");
                }
            }
            Like(expr) => {
                let (lhs, pattern) = (&*expr.expr, &*expr.pattern);
                let not = not(expr.negate);
                fmt!(f, lhs not " LIKE " pattern);
            }
            Not(expr) => {
                let expr = &**expr;
                fmt!(f, "NOT (" expr ")");
            }
            Or(operands) if operands.is_empty() => fmt!(f, "1 = 0"),
            Or(operands) => {
                fmt!(f, Delimited(operands.iter().map(Operand), " OR "));
            }
            Param(param) => param.to_sql(f),
        }
    }
}

impl ToSql for stmt::BinaryOp {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        f.dst.push_str(match self {
            stmt::BinaryOp::Eq => "=",
            stmt::BinaryOp::Ne => "<>",
            stmt::BinaryOp::Gt => ">",
            stmt::BinaryOp::Ge => ">=",
            stmt::BinaryOp::Lt => "<",
            stmt::BinaryOp::Le => "<=",
        })
    }
}

/// An operand of `AND` / `OR`. Nested boolean lists are parenthesized so the
/// written precedence matches the tree.
struct Operand<'a>(&'a stmt::Expr);

impl ToSql for Operand<'_> {
    fn to_sql<P: Params>(self, f: &mut super::Formatter<'_, P>) {
        match self.0 {
            stmt::Expr::And(operands) | stmt::Expr::Or(operands) if operands.len() > 1 => {
                let expr = self.0;
                fmt!(f, "(" expr ")");
            }
            expr => expr.to_sql(f),
        }
    }
}

fn not(negate: bool) -> &'static str {
    if negate {
        " NOT"
    } else {
        ""
    }
}
