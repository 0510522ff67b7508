//! TypeResolver (spec.md §4.1): maps a Thrift type to its Rust surface
//! expression and on-wire type code, parameterized by the configured
//! container implementations.

use crate::config::Config;
use crate::error::{GenError, GenResult};
use crate::schema::ThriftType;
use crate::wire::WireType;

/// A structured surface-language type reference.
///
/// Kept as pre-rendered text rather than a richer AST: every consumer
/// of a `TypeExpression` only ever needs to splice it into a larger
/// `format!` string, so a `Display`-able wrapper is all the structure
/// this crate's rendering style needs (see `render.rs`/`emitter.rs` in
/// `plotnik-compiler`'s TypeScript emitter for the same idiom).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeExpression(pub String);

impl std::fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TypeExpression {
    pub fn new(rendered: impl Into<String>) -> Self {
        Self(rendered.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub struct TypeResolver<'a> {
    config: &'a Config,
}

impl<'a> TypeResolver<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Resolve a Thrift type to its bare Rust surface type, unwrapping
    /// typedefs to their true underlying type. The caller (StructEmitter)
    /// wraps this in `Option<...>` for optional fields; that is how Rust
    /// idiomatically "expresses nullability", matching the intent of
    /// spec.md §4.1's "boxed reference type".
    pub fn surface_type_of(&self, ty: &ThriftType) -> GenResult<TypeExpression> {
        match ty.true_type() {
            ThriftType::Bool => Ok(TypeExpression::new("bool")),
            ThriftType::Byte => Ok(TypeExpression::new("i8")),
            ThriftType::I16 => Ok(TypeExpression::new("i16")),
            ThriftType::I32 => Ok(TypeExpression::new("i32")),
            ThriftType::I64 => Ok(TypeExpression::new("i64")),
            ThriftType::Double => Ok(TypeExpression::new("f64")),
            ThriftType::String => Ok(TypeExpression::new("String")),
            ThriftType::Binary => Ok(TypeExpression::new("Vec<u8>")),
            ThriftType::Void => Err(GenError::internal(
                "void cannot be resolved as a field type",
            )),
            ThriftType::Enum(name) => Ok(TypeExpression::new(name.clone())),
            ThriftType::Struct(name) => Ok(TypeExpression::new(name.clone())),
            ThriftType::List(elem) => {
                let elem_ty = self.surface_type_of(elem)?;
                Ok(TypeExpression::new(format!(
                    "{}<{}>",
                    self.config.list_type.type_name(),
                    elem_ty.as_str()
                )))
            }
            ThriftType::Set(elem) => {
                let elem_ty = self.surface_type_of(elem)?;
                Ok(TypeExpression::new(format!(
                    "{}<{}>",
                    self.config.set_type.type_name(),
                    elem_ty.as_str()
                )))
            }
            ThriftType::Map(key, value) => {
                let key_ty = self.surface_type_of(key)?;
                let value_ty = self.surface_type_of(value)?;
                Ok(TypeExpression::new(format!(
                    "{}<{}, {}>",
                    self.config.map_type.type_name(),
                    key_ty.as_str(),
                    value_ty.as_str()
                )))
            }
            ThriftType::Typedef(..) => unreachable!("true_type() already unwrapped typedefs"),
        }
    }

    /// The concrete list container type used for allocation in initializers.
    pub fn list_of(&self, elem: &ThriftType) -> GenResult<TypeExpression> {
        let elem_ty = self.surface_type_of(elem)?;
        Ok(TypeExpression::new(format!(
            "{}<{}>",
            self.config.list_type.type_name(),
            elem_ty.as_str()
        )))
    }

    /// The concrete set container type used for allocation in initializers.
    pub fn set_of(&self, elem: &ThriftType) -> GenResult<TypeExpression> {
        let elem_ty = self.surface_type_of(elem)?;
        Ok(TypeExpression::new(format!(
            "{}<{}>",
            self.config.set_type.type_name(),
            elem_ty.as_str()
        )))
    }

    /// The concrete map container type used for allocation in initializers.
    pub fn map_of(&self, key: &ThriftType, value: &ThriftType) -> GenResult<TypeExpression> {
        let key_ty = self.surface_type_of(key)?;
        let value_ty = self.surface_type_of(value)?;
        Ok(TypeExpression::new(format!(
            "{}<{}, {}>",
            self.config.map_type.type_name(),
            key_ty.as_str(),
            value_ty.as_str()
        )))
    }

    /// The bare list container constructor name, with no generic
    /// arguments — the form a `{bare}::with_capacity(n)` call needs,
    /// relying on the enclosing `let` binding's type annotation for
    /// inference (spec.md §4.1/§4.2/§4.4 container allocation).
    pub fn list_container_name(&self) -> &str {
        self.config.list_type.type_name()
    }

    /// The bare set container constructor name; see `list_container_name`.
    pub fn set_container_name(&self) -> &str {
        self.config.set_type.type_name()
    }

    /// The bare map container constructor name; see `list_container_name`.
    pub fn map_container_name(&self) -> &str {
        self.config.map_type.type_name()
    }

    /// The on-wire type code for a Thrift type (spec.md §4.1); enums are
    /// always written/read as `i32`.
    pub fn wire_code_of(&self, ty: &ThriftType) -> GenResult<WireType> {
        match ty.true_type() {
            ThriftType::Bool => Ok(WireType::Bool),
            ThriftType::Byte => Ok(WireType::Byte),
            ThriftType::I16 => Ok(WireType::I16),
            ThriftType::I32 => Ok(WireType::I32),
            ThriftType::I64 => Ok(WireType::I64),
            ThriftType::Double => Ok(WireType::Double),
            ThriftType::String | ThriftType::Binary => Ok(WireType::String),
            ThriftType::Struct(_) => Ok(WireType::Struct),
            ThriftType::Enum(_) => Ok(WireType::I32),
            ThriftType::List(_) => Ok(WireType::List),
            ThriftType::Set(_) => Ok(WireType::Set),
            ThriftType::Map(..) => Ok(WireType::Map),
            ThriftType::Void => Err(GenError::internal(
                "void cannot be resolved as a field type",
            )),
            ThriftType::Typedef(..) => unreachable!("true_type() already unwrapped typedefs"),
        }
    }
}
