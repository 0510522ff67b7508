//! The `Protocol` trait referenced by *generated* code (spec.md §6), not
//! by the generator itself — the generator only emits calls against
//! this trait, it never implements the wire encoding (spec.md §1
//! non-goals).
//!
//! Shaped directly after the teacher's `TInputProtocol`/`TOutputProtocol`
//! pair (`examples/monoio-rs-monoio-thrift/src/protocol.rs`), collapsed
//! into one synchronous trait since the generator's emitted Adapters
//! are synchronous state machines over the field-framing protocol
//! (spec.md §4.4), and a blanket impl for `&mut P` exactly like the
//! teacher's `impl<T: TOutputProtocol> TOutputProtocol for &mut T`.

use crate::error::GenResult;
use crate::wire::WireType;

/// Metadata describing one struct field as it appears on the wire
/// (spec.md §6 `FieldMetadata{name, typeId, fieldId}`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldMetadata {
    pub name: Option<&'static str>,
    pub type_id: WireType,
    pub field_id: Option<i16>,
}

impl FieldMetadata {
    pub const fn new(name: Option<&'static str>, type_id: WireType, field_id: Option<i16>) -> Self {
        Self {
            name,
            type_id,
            field_id,
        }
    }

    pub const fn stop() -> Self {
        Self {
            name: None,
            type_id: WireType::Stop,
            field_id: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListMetadata {
    pub element_type: WireType,
    pub size: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SetMetadata {
    pub element_type: WireType,
    pub size: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapMetadata {
    pub key_type: WireType,
    pub value_type: WireType,
    pub size: usize,
}

/// Abstract byte-level framing interface that generated Adapters read
/// and write through (spec.md "GLOSSARY" / §6).
pub trait Protocol {
    fn write_struct_begin(&mut self, name: &str) -> GenResult<()>;
    fn write_struct_end(&mut self) -> GenResult<()>;
    fn write_field_begin(&mut self, meta: FieldMetadata) -> GenResult<()>;
    fn write_field_end(&mut self) -> GenResult<()>;
    fn write_field_stop(&mut self) -> GenResult<()>;
    fn write_list_begin(&mut self, meta: ListMetadata) -> GenResult<()>;
    fn write_list_end(&mut self) -> GenResult<()>;
    fn write_set_begin(&mut self, meta: SetMetadata) -> GenResult<()>;
    fn write_set_end(&mut self) -> GenResult<()>;
    fn write_map_begin(&mut self, meta: MapMetadata) -> GenResult<()>;
    fn write_map_end(&mut self) -> GenResult<()>;

    fn write_bool(&mut self, value: bool) -> GenResult<()>;
    fn write_byte(&mut self, value: i8) -> GenResult<()>;
    fn write_i16(&mut self, value: i16) -> GenResult<()>;
    fn write_i32(&mut self, value: i32) -> GenResult<()>;
    fn write_i64(&mut self, value: i64) -> GenResult<()>;
    fn write_double(&mut self, value: f64) -> GenResult<()>;
    fn write_string(&mut self, value: &str) -> GenResult<()>;
    fn write_binary(&mut self, value: &[u8]) -> GenResult<()>;

    fn read_struct_begin(&mut self) -> GenResult<()>;
    fn read_struct_end(&mut self) -> GenResult<()>;
    fn read_field_begin(&mut self) -> GenResult<FieldMetadata>;
    fn read_field_end(&mut self) -> GenResult<()>;
    fn read_list_begin(&mut self) -> GenResult<ListMetadata>;
    fn read_list_end(&mut self) -> GenResult<()>;
    fn read_set_begin(&mut self) -> GenResult<SetMetadata>;
    fn read_set_end(&mut self) -> GenResult<()>;
    fn read_map_begin(&mut self) -> GenResult<MapMetadata>;
    fn read_map_end(&mut self) -> GenResult<()>;

    fn read_bool(&mut self) -> GenResult<bool>;
    fn read_byte(&mut self) -> GenResult<i8>;
    fn read_i16(&mut self) -> GenResult<i16>;
    fn read_i32(&mut self) -> GenResult<i32>;
    fn read_i64(&mut self) -> GenResult<i64>;
    fn read_double(&mut self) -> GenResult<f64>;
    fn read_string(&mut self) -> GenResult<String>;
    fn read_binary(&mut self) -> GenResult<Vec<u8>>;

    /// Consume and discard one value of the given wire type, used when
    /// a known field id arrives with an unexpected type, or the field
    /// id itself is unrecognized (spec.md §4.4).
    fn skip(&mut self, type_id: WireType) -> GenResult<()>;
}

impl<P: Protocol + ?Sized> Protocol for &mut P {
    fn write_struct_begin(&mut self, name: &str) -> GenResult<()> {
        (**self).write_struct_begin(name)
    }
    fn write_struct_end(&mut self) -> GenResult<()> {
        (**self).write_struct_end()
    }
    fn write_field_begin(&mut self, meta: FieldMetadata) -> GenResult<()> {
        (**self).write_field_begin(meta)
    }
    fn write_field_end(&mut self) -> GenResult<()> {
        (**self).write_field_end()
    }
    fn write_field_stop(&mut self) -> GenResult<()> {
        (**self).write_field_stop()
    }
    fn write_list_begin(&mut self, meta: ListMetadata) -> GenResult<()> {
        (**self).write_list_begin(meta)
    }
    fn write_list_end(&mut self) -> GenResult<()> {
        (**self).write_list_end()
    }
    fn write_set_begin(&mut self, meta: SetMetadata) -> GenResult<()> {
        (**self).write_set_begin(meta)
    }
    fn write_set_end(&mut self) -> GenResult<()> {
        (**self).write_set_end()
    }
    fn write_map_begin(&mut self, meta: MapMetadata) -> GenResult<()> {
        (**self).write_map_begin(meta)
    }
    fn write_map_end(&mut self) -> GenResult<()> {
        (**self).write_map_end()
    }
    fn write_bool(&mut self, value: bool) -> GenResult<()> {
        (**self).write_bool(value)
    }
    fn write_byte(&mut self, value: i8) -> GenResult<()> {
        (**self).write_byte(value)
    }
    fn write_i16(&mut self, value: i16) -> GenResult<()> {
        (**self).write_i16(value)
    }
    fn write_i32(&mut self, value: i32) -> GenResult<()> {
        (**self).write_i32(value)
    }
    fn write_i64(&mut self, value: i64) -> GenResult<()> {
        (**self).write_i64(value)
    }
    fn write_double(&mut self, value: f64) -> GenResult<()> {
        (**self).write_double(value)
    }
    fn write_string(&mut self, value: &str) -> GenResult<()> {
        (**self).write_string(value)
    }
    fn write_binary(&mut self, value: &[u8]) -> GenResult<()> {
        (**self).write_binary(value)
    }
    fn read_struct_begin(&mut self) -> GenResult<()> {
        (**self).read_struct_begin()
    }
    fn read_struct_end(&mut self) -> GenResult<()> {
        (**self).read_struct_end()
    }
    fn read_field_begin(&mut self) -> GenResult<FieldMetadata> {
        (**self).read_field_begin()
    }
    fn read_field_end(&mut self) -> GenResult<()> {
        (**self).read_field_end()
    }
    fn read_list_begin(&mut self) -> GenResult<ListMetadata> {
        (**self).read_list_begin()
    }
    fn read_list_end(&mut self) -> GenResult<()> {
        (**self).read_list_end()
    }
    fn read_set_begin(&mut self) -> GenResult<SetMetadata> {
        (**self).read_set_begin()
    }
    fn read_set_end(&mut self) -> GenResult<()> {
        (**self).read_set_end()
    }
    fn read_map_begin(&mut self) -> GenResult<MapMetadata> {
        (**self).read_map_begin()
    }
    fn read_map_end(&mut self) -> GenResult<()> {
        (**self).read_map_end()
    }
    fn read_bool(&mut self) -> GenResult<bool> {
        (**self).read_bool()
    }
    fn read_byte(&mut self) -> GenResult<i8> {
        (**self).read_byte()
    }
    fn read_i16(&mut self) -> GenResult<i16> {
        (**self).read_i16()
    }
    fn read_i32(&mut self) -> GenResult<i32> {
        (**self).read_i32()
    }
    fn read_i64(&mut self) -> GenResult<i64> {
        (**self).read_i64()
    }
    fn read_double(&mut self) -> GenResult<f64> {
        (**self).read_double()
    }
    fn read_string(&mut self) -> GenResult<String> {
        (**self).read_string()
    }
    fn read_binary(&mut self) -> GenResult<Vec<u8>> {
        (**self).read_binary()
    }
    fn skip(&mut self, type_id: WireType) -> GenResult<()> {
        (**self).skip(type_id)
    }
}

/// The capability generated code implements: "read/write a value of
/// type `V` using builder `B`" (spec.md §6).
pub trait Adapter<V, B> {
    fn write(&self, protocol: &mut dyn Protocol, value: &V) -> GenResult<()>;
    fn read(&self, protocol: &mut dyn Protocol, builder: &mut B) -> GenResult<()>;
    fn read_new(&self, protocol: &mut dyn Protocol) -> GenResult<V>;
}
