use super::{Formatter, ToSql};

use crate::stmt::Param;

/// Receives parameters in the order their placeholders are written.
pub trait Params {
    fn push(&mut self, param: &Param) -> Placeholder;
}

/// Position (1-based) of a parameter in the parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<Param> {
    fn push(&mut self, param: &Param) -> Placeholder {
        self.push(param.clone());
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        f.dst.push('?');
    }
}
