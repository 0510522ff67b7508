//! WriterEmitter (spec.md §2, §4.3): emits the write sequence for one
//! struct field.

use crate::error::GenResult;
use crate::names::NameAllocator;
use crate::resolver::TypeResolver;
use crate::schema::{Field, ThriftType};
use crate::wire::WireType;

pub struct WriterEmitter<'a> {
    resolver: &'a TypeResolver<'a>,
}

impl<'a> WriterEmitter<'a> {
    pub fn new(resolver: &'a TypeResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Emit the full write sequence for `field`, reading it off
    /// `struct_var` and writing it through `protocol_var` (spec.md
    /// §4.3 steps 1-4).
    pub fn emit_field_write(
        &self,
        names: &mut NameAllocator,
        protocol_var: &str,
        struct_var: &str,
        field: &Field,
    ) -> GenResult<String> {
        let wire_code = self.resolver.wire_code_of(&field.ty)?;
        let accessor = format!("{struct_var}.{}", field.name);

        let body = |value_expr: &str, names: &mut NameAllocator| -> GenResult<String> {
            let mut out = format!(
                "{protocol_var}.write_field_begin(FieldMetadata::new(Some({name:?}), WireType::{code}, Some({id})))?;\n",
                name = field.name,
                code = wire_type_variant(wire_code),
                id = field.id,
            );
            out.push_str(&self.emit_value_write(names, protocol_var, &field.ty, value_expr)?);
            out.push_str(&format!("{protocol_var}.write_field_end()?;\n"));
            Ok(out)
        };

        if field.required {
            body(&accessor, names)
        } else {
            let fld_var = names.fresh("fld_var");
            let inner = body(&fld_var, names)?;
            Ok(format!(
                "if let Some({fld_var}) = {accessor_ref} {{\n{inner}}}\n",
                accessor_ref = format!("&{accessor}"),
            ))
        }
    }

    /// The trailer emitted once after every field has been written
    /// (spec.md §4.3 "After all fields").
    pub fn emit_struct_footer(protocol_var: &str) -> String {
        format!(
            "{protocol_var}.write_field_stop()?;\n{protocol_var}.write_struct_end()?;\n"
        )
    }

    fn emit_value_write(
        &self,
        names: &mut NameAllocator,
        protocol_var: &str,
        ty: &ThriftType,
        value_expr: &str,
    ) -> GenResult<String> {
        match ty.true_type() {
            ThriftType::Bool => Ok(format!("{protocol_var}.write_bool({value_expr})?;\n")),
            ThriftType::Byte => Ok(format!("{protocol_var}.write_byte({value_expr})?;\n")),
            ThriftType::I16 => Ok(format!("{protocol_var}.write_i16({value_expr})?;\n")),
            ThriftType::I32 => Ok(format!("{protocol_var}.write_i32({value_expr})?;\n")),
            ThriftType::I64 => Ok(format!("{protocol_var}.write_i64({value_expr})?;\n")),
            ThriftType::Double => Ok(format!("{protocol_var}.write_double({value_expr})?;\n")),
            ThriftType::String => {
                Ok(format!("{protocol_var}.write_string({value_expr})?;\n"))
            }
            ThriftType::Binary => {
                Ok(format!("{protocol_var}.write_binary({value_expr})?;\n"))
            }
            ThriftType::Enum(_) => Ok(format!(
                "{protocol_var}.write_i32({value_expr}.code())?;\n"
            )),
            ThriftType::Struct(name) => Ok(format!(
                "{name}::ADAPTER.write({protocol_var}, {value_expr})?;\n"
            )),
            ThriftType::List(elem) => {
                let elem_code = self.resolver.wire_code_of(elem)?;
                let item = names.fresh("item");
                let mut out = format!(
                    "{protocol_var}.write_list_begin(ListMetadata {{ element_type: WireType::{code}, size: {value_expr}.len() }})?;\n\
                     for {item} in {value_expr}.iter() {{\n",
                    code = wire_type_variant(elem_code),
                );
                out.push_str(&self.emit_value_write(names, protocol_var, elem, &item)?);
                out.push_str("}\n");
                out.push_str(&format!("{protocol_var}.write_list_end()?;\n"));
                Ok(out)
            }
            ThriftType::Set(elem) => {
                let elem_code = self.resolver.wire_code_of(elem)?;
                let item = names.fresh("item");
                let mut out = format!(
                    "{protocol_var}.write_set_begin(SetMetadata {{ element_type: WireType::{code}, size: {value_expr}.len() }})?;\n\
                     for {item} in {value_expr}.iter() {{\n",
                    code = wire_type_variant(elem_code),
                );
                out.push_str(&self.emit_value_write(names, protocol_var, elem, &item)?);
                out.push_str("}\n");
                out.push_str(&format!("{protocol_var}.write_set_end()?;\n"));
                Ok(out)
            }
            ThriftType::Map(key, val) => {
                let key_code = self.resolver.wire_code_of(key)?;
                let val_code = self.resolver.wire_code_of(val)?;
                let entry = names.fresh("entry");
                let mut out = format!(
                    "{protocol_var}.write_map_begin(MapMetadata {{ key_type: WireType::{kcode}, value_type: WireType::{vcode}, size: {value_expr}.len() }})?;\n\
                     for ({entry}_k, {entry}_v) in {value_expr}.iter() {{\n",
                    kcode = wire_type_variant(key_code),
                    vcode = wire_type_variant(val_code),
                );
                out.push_str(&self.emit_value_write(names, protocol_var, key, &format!("{entry}_k"))?);
                out.push_str(&self.emit_value_write(names, protocol_var, val, &format!("{entry}_v"))?);
                out.push_str("}\n");
                out.push_str(&format!("{protocol_var}.write_map_end()?;\n"));
                Ok(out)
            }
            ThriftType::Void => unreachable!("void is rejected by wire_code_of earlier"),
            ThriftType::Typedef(..) => unreachable!("true_type() already unwrapped typedefs"),
        }
    }
}

pub(crate) fn wire_type_variant(wt: WireType) -> &'static str {
    match wt {
        WireType::Stop => "Stop",
        WireType::Bool => "Bool",
        WireType::Byte => "Byte",
        WireType::Double => "Double",
        WireType::I16 => "I16",
        WireType::I32 => "I32",
        WireType::I64 => "I64",
        WireType::String => "String",
        WireType::Struct => "Struct",
        WireType::Map => "Map",
        WireType::Set => "Set",
        WireType::List => "List",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn field(id: i16, name: &str, ty: ThriftType, required: bool) -> Field {
        Field {
            id,
            name: name.to_string(),
            ty,
            required,
            default: None,
        }
    }

    #[test]
    fn required_scalar_field_has_no_guard() {
        let config = Config::default();
        let resolver = TypeResolver::new(&config);
        let emitter = WriterEmitter::new(&resolver);
        let mut names = NameAllocator::new();
        let f = field(1, "x", ThriftType::I32, true);
        let out = emitter
            .emit_field_write(&mut names, "o_prot", "self", &f)
            .unwrap();
        assert!(!out.contains("if let Some"));
        assert!(out.contains("WireType::I32"));
        assert!(out.contains("Some(1)"));
        assert!(out.contains("o_prot.write_i32(self.x)?;"));
    }

    #[test]
    fn optional_field_is_guarded() {
        let config = Config::default();
        let resolver = TypeResolver::new(&config);
        let emitter = WriterEmitter::new(&resolver);
        let mut names = NameAllocator::new();
        let f = field(1, "body", ThriftType::String, false);
        let out = emitter
            .emit_field_write(&mut names, "o_prot", "self", &f)
            .unwrap();
        assert!(out.contains("if let Some(fld_var) = &self.body"));
        assert!(out.contains("o_prot.write_string(fld_var)?;"));
    }

    #[test]
    fn list_field_loops_and_writes_begin_end() {
        let config = Config::default();
        let resolver = TypeResolver::new(&config);
        let emitter = WriterEmitter::new(&resolver);
        let mut names = NameAllocator::new();
        let f = field(1, "xs", ThriftType::List(Box::new(ThriftType::I32)), true);
        let out = emitter
            .emit_field_write(&mut names, "o_prot", "self", &f)
            .unwrap();
        assert!(out.contains("write_list_begin"));
        assert!(out.contains("write_list_end"));
        assert!(out.contains("write_i32"));
    }
}
