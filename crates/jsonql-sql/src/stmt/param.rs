use super::Value;

/// A statement parameter.
///
/// Nested inserts reference the row their parent statement creates. That
/// row's id only exists once the parent has run, so the planner emits
/// `PendingParentId` and the executor binds it to the generated key.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Literal(Value),
    PendingParentId,
}

impl Param {
    pub fn is_pending(&self) -> bool {
        matches!(self, Param::PendingParentId)
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Param::Literal(value) => Some(value),
            Param::PendingParentId => None,
        }
    }

    /// The value to bind. `None` if the parameter is pending and no parent id
    /// is known.
    pub fn bind(&self, parent_id: Option<&Value>) -> Option<Value> {
        match self {
            Param::Literal(value) => Some(value.clone()),
            Param::PendingParentId => parent_id.cloned(),
        }
    }
}

impl From<Value> for Param {
    fn from(value: Value) -> Self {
        Param::Literal(value)
    }
}

macro_rules! impl_from_literal {
    ( $( $ty:ty ),+ ) => {
        $(
            impl From<$ty> for Param {
                fn from(value: $ty) -> Self {
                    Param::Literal(value.into())
                }
            }
        )+
    };
}

impl_from_literal!(bool, i32, i64, f64, String, &str);
