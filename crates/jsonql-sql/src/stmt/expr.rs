use super::{Column, Param, Select, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `AND` of all operands. No operands is always true.
    And(Vec<Expr>),

    Between(ExprBetween),

    BinaryOp(ExprBinaryOp),

    /// Constant `TRUE` / `FALSE`
    Bool(bool),

    Column(Column),

    Exists(ExprExists),

    InList(ExprInList),

    InSubquery(ExprInSubquery),

    /// `expr IS <literal>`
    Is(ExprIs),

    IsNull(ExprIsNull),

    Like(ExprLike),

    Not(Box<Expr>),

    /// `OR` of all operands. No operands is always false.
    Or(Vec<Expr>),

    Param(Param),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprBinaryOp {
    pub lhs: Box<Expr>,
    pub op: BinaryOp,
    pub rhs: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprBetween {
    pub expr: Box<Expr>,
    pub low: Box<Expr>,
    pub high: Box<Expr>,
    pub negate: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprExists {
    pub query: Box<Select>,
    pub negate: bool,
}

/// `expr IN (list)`. The list is never empty; an empty list is compiled to a
/// constant before it gets here.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprInList {
    pub expr: Box<Expr>,
    pub list: Vec<Expr>,
    pub negate: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprInSubquery {
    pub expr: Box<Expr>,
    pub query: Box<Select>,
    pub negate: bool,
}

/// The value is written into the SQL text, not bound.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprIs {
    pub expr: Box<Expr>,
    pub value: Value,
    pub negate: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprIsNull {
    pub expr: Box<Expr>,
    pub negate: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprLike {
    pub expr: Box<Expr>,
    pub pattern: Box<Expr>,
    pub negate: bool,
}

impl Expr {
    pub fn binary_op(lhs: impl Into<Expr>, op: BinaryOp, rhs: impl Into<Expr>) -> Expr {
        ExprBinaryOp {
            lhs: Box::new(lhs.into()),
            op,
            rhs: Box::new(rhs.into()),
        }
        .into()
    }

    pub fn eq(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Eq, rhs)
    }

    pub fn not(expr: impl Into<Expr>) -> Expr {
        Expr::Not(Box::new(expr.into()))
    }

    /// Builds an `AND`, flattening a single operand.
    pub fn and_from_vec(mut operands: Vec<Expr>) -> Expr {
        if operands.len() == 1 {
            operands.remove(0)
        } else {
            Expr::And(operands)
        }
    }

    /// Builds an `OR`, flattening a single operand.
    pub fn or_from_vec(mut operands: Vec<Expr>) -> Expr {
        if operands.len() == 1 {
            operands.remove(0)
        } else {
            Expr::Or(operands)
        }
    }
}

impl From<Column> for Expr {
    fn from(value: Column) -> Self {
        Expr::Column(value)
    }
}

impl From<Param> for Expr {
    fn from(value: Param) -> Self {
        Expr::Param(value)
    }
}

macro_rules! impl_from_expr {
    ( $( $variant:ident => $ty:ty ),+ $(,)? ) => {
        $(
            impl From<$ty> for Expr {
                fn from(value: $ty) -> Self {
                    Expr::$variant(value)
                }
            }
        )+
    };
}

impl_from_expr! {
    Between => ExprBetween,
    BinaryOp => ExprBinaryOp,
    Exists => ExprExists,
    InList => ExprInList,
    InSubquery => ExprInSubquery,
    Is => ExprIs,
    IsNull => ExprIsNull,
    Like => ExprLike,
}
