//! Core code generator for the Thrifty IDL compiler: given a resolved
//! `Schema`, emits deterministic Rust source modeling its declared
//! types, a read/write `Adapter` per struct over the abstract
//! `Protocol` interface, and holders for IDL constants.
//!
//! Command-line parsing, IDL lexing/parsing, schema validation and
//! linking, on-disk file layout, and packaging are external
//! collaborators; this crate only consumes a `Schema` and drives an
//! `OutputSink`.

pub mod config;
pub mod emit;
pub mod error;
pub mod names;
pub mod orchestrator;
pub mod protocol;
pub mod render;
pub mod resolver;
pub mod schema;
pub mod sink;
pub mod unit;
pub mod wire;

pub use config::{Config, ContainerKind};
pub use error::{GenError, GenErrorKind, GenResult};
pub use orchestrator::Orchestrator;
pub use protocol::{Adapter, FieldMetadata, ListMetadata, MapMetadata, Protocol, SetMetadata};
pub use schema::{
    ConstValue, Constant, EnumMember, EnumType, Field, Location, Schema, StructKind, StructType,
    ThriftType,
};
pub use sink::{BufferSink, DirectorySink, OutputSink};
pub use unit::CompilationUnit;
pub use wire::WireType;
