//! ConstRenderer (spec.md §2, §4.2): renders IDL constant values as
//! Rust expressions or initializer statement blocks.

mod expr;
mod init;

use crate::resolver::TypeResolver;
use crate::schema::Schema;

/// Renders constant expressions and initializer blocks against a
/// schema (for enum-member lookups) and a `TypeResolver` (for
/// container/type text).
pub struct ConstRenderer<'a> {
    pub(crate) schema: &'a Schema,
    pub(crate) resolver: &'a TypeResolver<'a>,
}

impl<'a> ConstRenderer<'a> {
    pub fn new(schema: &'a Schema, resolver: &'a TypeResolver<'a>) -> Self {
        Self { schema, resolver }
    }
}
