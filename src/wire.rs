//! The Thrift on-wire type-code table (spec.md §2 TypeCodeTable, §4.1).
//!
//! Mirrors the teacher's `thrift::TType` (`examples/monoio-rs-monoio-thrift/src/thrift.rs`):
//! a `#[repr(u8)]` enum with a `TryFrom<u8>` fallback for decoding bytes
//! read back off a protocol, plus a symbolic-name lookup used when
//! rendering doc comments and error messages.

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::GenError;

/// One case of the on-wire type code written alongside every field.
///
/// Values match spec.md §4.1 exactly; note these are the *generator's*
/// declared table, not necessarily the canonical Apache Thrift protocol
/// byte values — this crate follows the spec's TypeCodeTable verbatim.
#[derive(Clone, Copy, Debug, Eq, PartialEq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum WireType {
    Stop = 0,
    Bool = 1,
    Double = 4,
    Byte = 3,
    I16 = 6,
    I32 = 8,
    I64 = 10,
    String = 11,
    Struct = 12,
    Map = 13,
    Set = 14,
    List = 15,
}

impl WireType {
    /// The symbolic name used in doc comments and panic messages.
    pub const fn symbolic_name(self) -> &'static str {
        match self {
            WireType::Stop => "stop",
            WireType::Bool => "bool",
            WireType::Byte => "byte",
            WireType::Double => "double",
            WireType::I16 => "i16",
            WireType::I32 => "i32",
            WireType::I64 => "i64",
            WireType::String => "string",
            WireType::Struct => "struct",
            WireType::Map => "map",
            WireType::Set => "set",
            WireType::List => "list",
        }
    }

    /// Decode a byte read off the protocol back into a `WireType`.
    pub fn from_byte(byte: u8) -> Result<WireType, GenError> {
        WireType::try_from_primitive(byte)
            .map_err(|_| GenError::internal(format!("unknown wire type code {byte}")))
    }

    pub const fn as_byte(self) -> u8 {
        self as u8
    }
}
