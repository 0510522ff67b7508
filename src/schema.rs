//! The input data model (spec.md §3): schema entities the generator
//! consumes but does not itself parse or validate.
//!
//! A standalone codegen *core* has no parser in this corpus, so this
//! module declares the shapes spec.md §3 describes so the crate can be
//! exercised and tested on its own; an external IDL front end is
//! expected to populate a `Schema` and hand it to the `Orchestrator`.

use std::collections::BTreeMap;

/// Where a declaration came from in the original IDL source.
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct Location {
    pub path: String,
    pub line: u32,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.path, self.line)
    }
}

/// The closed sum of Thrift types (spec.md §3).
///
/// `Typedef` carries both the alias name (for `ThriftField`'s
/// `typedefName`) and the underlying type it resolves to; following the
/// chain always terminates because the schema is assumed acyclic.
#[derive(Clone, Debug, PartialEq)]
pub enum ThriftType {
    Bool,
    Byte,
    I16,
    I32,
    I64,
    Double,
    String,
    Binary,
    Void,
    Enum(String),
    List(Box<ThriftType>),
    Set(Box<ThriftType>),
    Map(Box<ThriftType>, Box<ThriftType>),
    Struct(String),
    Typedef(String, Box<ThriftType>),
}

impl ThriftType {
    /// Transitively unwrap typedefs to the type they ultimately name.
    pub fn true_type(&self) -> &ThriftType {
        match self {
            ThriftType::Typedef(_, inner) => inner.true_type(),
            other => other,
        }
    }

    /// The typedef alias name this type was declared through, if any.
    pub fn typedef_name(&self) -> Option<&str> {
        match self {
            ThriftType::Typedef(name, _) => Some(name),
            _ => None,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self.true_type(), ThriftType::Void)
    }
}

/// A single field of a struct, union, or exception (spec.md §3).
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub id: i16,
    pub name: String,
    pub ty: ThriftType,
    pub required: bool,
    pub default: Option<ConstValue>,
}

impl Field {
    pub fn typedef_name(&self) -> Option<&str> {
        self.ty.typedef_name()
    }
}

/// A tagged constant value (spec.md §3).
#[derive(Clone, Debug, PartialEq)]
pub enum ConstValue {
    Integer(i64),
    Double(f64),
    String(String),
    Identifier(String),
    List(Vec<ConstValue>),
    Map(Vec<(ConstValue, ConstValue)>),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StructKind {
    Struct,
    Union,
    Exception,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumMember {
    pub name: String,
    pub value: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumType {
    pub name: String,
    pub namespaces: BTreeMap<String, String>,
    pub doc: Option<String>,
    pub location: Option<Location>,
    pub members: Vec<EnumMember>,
}

impl EnumType {
    pub fn package(&self) -> Option<&str> {
        self.namespaces.get("rs").map(String::as_str)
    }

    pub fn member_by_name(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn member_by_value(&self, value: i32) -> Option<&EnumMember> {
        self.members.iter().find(|m| m.value == value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StructType {
    pub name: String,
    pub namespaces: BTreeMap<String, String>,
    pub doc: Option<String>,
    pub location: Option<Location>,
    pub kind: StructKind,
    pub fields: Vec<Field>,
}

impl StructType {
    pub fn package(&self) -> Option<&str> {
        self.namespaces.get("rs").map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Constant {
    pub name: String,
    pub package: String,
    pub ty: ThriftType,
    pub value: ConstValue,
    pub location: Option<Location>,
}

/// A fully resolved schema: everything the generator walks (spec.md §6
/// "Consumed interfaces").
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schema {
    pub enums: Vec<EnumType>,
    pub structs: Vec<StructType>,
    pub exceptions: Vec<StructType>,
    pub unions: Vec<StructType>,
    pub constants: Vec<Constant>,
}

impl Schema {
    pub fn enum_by_name(&self, name: &str) -> Option<&EnumType> {
        self.enums.iter().find(|e| e.name == name)
    }
}
