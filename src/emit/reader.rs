//! ReaderEmitter (spec.md §2, §4.4): emits the field-loop body that
//! reads a struct off the protocol into a builder.

use crate::emit::writer::wire_type_variant;
use crate::error::GenResult;
use crate::names::NameAllocator;
use crate::resolver::TypeResolver;
use crate::schema::{Field, ThriftType};

pub struct ReaderEmitter<'a> {
    resolver: &'a TypeResolver<'a>,
}

impl<'a> ReaderEmitter<'a> {
    pub fn new(resolver: &'a TypeResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Emit the full field loop: `read_struct_begin`, repeated
    /// `read_field_begin` dispatch by field id with type-code
    /// validation and skip-on-mismatch, `read_struct_end` (spec.md
    /// §4.4).
    pub fn emit_field_loop(
        &self,
        names: &mut NameAllocator,
        protocol_var: &str,
        builder_var: &str,
        fields: &[Field],
    ) -> GenResult<String> {
        let mut out = format!("{protocol_var}.read_struct_begin()?;\n");
        out.push_str("loop {\n");
        out.push_str(&format!(
            "let field_ident = {protocol_var}.read_field_begin()?;\n"
        ));
        out.push_str("if field_ident.type_id == WireType::Stop {\nbreak;\n}\n");
        out.push_str("match field_ident.field_id {\n");

        for field in fields {
            let wire_code = self.resolver.wire_code_of(&field.ty)?;
            out.push_str(&format!("Some({id}) => {{\n", id = field.id));
            out.push_str(&format!(
                "if field_ident.type_id == WireType::{code} {{\n",
                code = wire_type_variant(wire_code)
            ));
            let read_expr = self.emit_value_read(names, protocol_var, &field.ty)?;
            out.push_str(&format!("let val = {read_expr};\n"));
            out.push_str(&format!("{builder_var}.{} = Some(val);\n", field.name));
            out.push_str("} else {\n");
            out.push_str(&format!("{protocol_var}.skip(field_ident.type_id)?;\n"));
            out.push_str("}\n}\n");
        }

        out.push_str(&format!(
            "_ => {{\n{protocol_var}.skip(field_ident.type_id)?;\n}}\n"
        ));
        out.push_str("}\n"); // close match
        out.push_str(&format!("{protocol_var}.read_field_end()?;\n"));
        out.push_str("}\n"); // close loop
        out.push_str(&format!("{protocol_var}.read_struct_end()?;\n"));
        Ok(out)
    }

    /// Emit an expression (possibly a multi-statement block) that reads
    /// one value of `ty` off `protocol_var`.
    fn emit_value_read(
        &self,
        names: &mut NameAllocator,
        protocol_var: &str,
        ty: &ThriftType,
    ) -> GenResult<String> {
        match ty.true_type() {
            ThriftType::Bool => Ok(format!("{protocol_var}.read_bool()?")),
            ThriftType::Byte => Ok(format!("{protocol_var}.read_byte()?")),
            ThriftType::I16 => Ok(format!("{protocol_var}.read_i16()?")),
            ThriftType::I32 => Ok(format!("{protocol_var}.read_i32()?")),
            ThriftType::I64 => Ok(format!("{protocol_var}.read_i64()?")),
            ThriftType::Double => Ok(format!("{protocol_var}.read_double()?")),
            ThriftType::String => Ok(format!("{protocol_var}.read_string()?")),
            ThriftType::Binary => Ok(format!("{protocol_var}.read_binary()?")),
            ThriftType::Enum(name) => Ok(format!(
                "{name}::from_code({protocol_var}.read_i32()?).ok_or_else(|| GenError::schema_violation(\"unknown {name} code\"))?"
            )),
            ThriftType::Struct(name) => Ok(format!("{name}::ADAPTER.read_new({protocol_var})?")),
            ThriftType::List(elem) => {
                let var = names.fresh("list");
                let ident = names.fresh("list_ident");
                let concrete = self.resolver.list_of(elem)?;
                let bare = self.resolver.list_container_name();
                let elem_expr = self.emit_value_read(names, protocol_var, elem)?;
                Ok(format!(
                    "{{\nlet {ident} = {protocol_var}.read_list_begin()?;\n\
                     let mut {var}: {concrete} = {bare}::with_capacity({ident}.size);\n\
                     for _ in 0..{ident}.size {{\n\
                     let elem = {elem_expr};\n\
                     {var}.push(elem);\n\
                     }}\n\
                     {protocol_var}.read_list_end()?;\n\
                     {var}\n}}"
                ))
            }
            ThriftType::Set(elem) => {
                let var = names.fresh("set");
                let ident = names.fresh("set_ident");
                let concrete = self.resolver.set_of(elem)?;
                let bare = self.resolver.set_container_name();
                let elem_expr = self.emit_value_read(names, protocol_var, elem)?;
                Ok(format!(
                    "{{\nlet {ident} = {protocol_var}.read_set_begin()?;\n\
                     let mut {var}: {concrete} = {bare}::with_capacity({ident}.size);\n\
                     for _ in 0..{ident}.size {{\n\
                     let elem = {elem_expr};\n\
                     {var}.insert(elem);\n\
                     }}\n\
                     {protocol_var}.read_set_end()?;\n\
                     {var}\n}}"
                ))
            }
            ThriftType::Map(key, val) => {
                let var = names.fresh("map");
                let ident = names.fresh("map_ident");
                let concrete = self.resolver.map_of(key, val)?;
                let bare = self.resolver.map_container_name();
                let key_expr = self.emit_value_read(names, protocol_var, key)?;
                let val_expr = self.emit_value_read(names, protocol_var, val)?;
                Ok(format!(
                    "{{\nlet {ident} = {protocol_var}.read_map_begin()?;\n\
                     let mut {var}: {concrete} = {bare}::with_capacity({ident}.size);\n\
                     for _ in 0..{ident}.size {{\n\
                     let key = {key_expr};\n\
                     let value = {val_expr};\n\
                     {var}.insert(key, value);\n\
                     }}\n\
                     {protocol_var}.read_map_end()?;\n\
                     {var}\n}}"
                ))
            }
            ThriftType::Void => unreachable!("void is rejected by wire_code_of earlier"),
            ThriftType::Typedef(..) => unreachable!("true_type() already unwrapped typedefs"),
        }
    }
}
