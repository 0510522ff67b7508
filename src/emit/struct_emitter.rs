//! StructEmitter (spec.md §2, §4.5): assembles the value type, Builder,
//! and Adapter for one struct/union/exception.

use crate::emit::reader::ReaderEmitter;
use crate::emit::writer::WriterEmitter;
use crate::error::{GenError, GenResult};
use crate::names::NameAllocator;
use crate::render::ConstRenderer;
use crate::resolver::TypeResolver;
use crate::schema::{Field, Schema, StructKind, StructType, ThriftType};

pub struct StructEmitter<'a> {
    schema: &'a Schema,
    resolver: &'a TypeResolver<'a>,
    writer: WriterEmitter<'a>,
    reader: ReaderEmitter<'a>,
}

impl<'a> StructEmitter<'a> {
    pub fn new(schema: &'a Schema, resolver: &'a TypeResolver<'a>) -> Self {
        Self {
            schema,
            resolver,
            writer: WriterEmitter::new(resolver),
            reader: ReaderEmitter::new(resolver),
        }
    }

    /// A union's fields are optional by construction regardless of what
    /// the schema marked them as; everything else passes `required`
    /// through unchanged.
    fn effective_fields(&self, struct_ty: &StructType) -> Vec<Field> {
        struct_ty
            .fields
            .iter()
            .cloned()
            .map(|mut f| {
                if matches!(struct_ty.kind, StructKind::Union) {
                    f.required = false;
                }
                f
            })
            .collect()
    }

    /// Emit the value type, Builder, and Adapter for `struct_ty` as one
    /// source fragment (spec.md §4.5).
    pub fn emit(&self, struct_ty: &StructType) -> GenResult<String> {
        let fields = self.effective_fields(struct_ty);
        let mut out = String::new();
        out.push_str(&self.emit_value_type(struct_ty, &fields)?);
        out.push('\n');
        out.push_str(&self.emit_builder(struct_ty, &fields)?);
        out.push('\n');
        out.push_str(&self.emit_adapter(struct_ty, &fields)?);
        Ok(out)
    }

    fn emit_value_type(&self, struct_ty: &StructType, fields: &[Field]) -> GenResult<String> {
        let name = &struct_ty.name;
        let mut out = String::new();

        if let Some(doc) = &struct_ty.doc {
            out.push_str(&format!("/// {doc}\n"));
        }
        if let Some(loc) = &struct_ty.location {
            out.push_str(&format!("/// Source: {loc}\n"));
        }
        out.push_str("#[derive(Clone, Debug, PartialEq)]\n");
        out.push_str(&format!("pub struct {name} {{\n"));
        for f in fields {
            out.push_str(&format!(
                "    /// @ThriftField(fieldId = {id}, isRequired = {req}{typedef})\n",
                id = f.id,
                req = f.required,
                typedef = f
                    .typedef_name()
                    .map(|n| format!(", typedefName = \"{n}\""))
                    .unwrap_or_default(),
            ));
            let ty = self.resolver.surface_type_of(&f.ty)?;
            // List/set/map fields are kept private and exposed only
            // through a read-only accessor below, so a caller holding an
            // owned or `&mut` value has no way to push/insert into them.
            let is_pub = collection_view(&f.ty).is_none();
            let vis = if is_pub { "pub " } else { "" };
            if f.required {
                out.push_str(&format!("    {vis}{}: {ty},\n", f.name));
            } else {
                out.push_str(&format!("    {vis}{}: Option<{ty}>,\n", f.name));
            }
        }
        out.push_str("}\n\n");

        out.push_str(&format!("impl {name} {{\n"));
        out.push_str(&format!(
            "    pub const ADAPTER: {name}Adapter = {name}Adapter;\n\n"
        ));
        for f in fields {
            if let Some(view) = collection_view(&f.ty) {
                out.push_str(&self.emit_collection_accessor(f, &view)?);
            }
        }
        out.push_str("    /// FNV-1a-style mixing over every field, nulls contributing zero.\n");
        out.push_str("    pub fn hash_code(&self) -> i32 {\n");
        out.push_str("        let mut h: i64 = 16777619;\n");
        for f in fields {
            let component = self.emit_hash_component(f)?;
            out.push_str(&format!(
                "        h = (h ^ ({component})).wrapping_mul(0x811c9dc5);\n"
            ));
        }
        out.push_str("        h as i32\n");
        out.push_str("    }\n");
        out.push_str("}\n\n");

        out.push_str(&format!("impl std::fmt::Display for {name} {{\n"));
        out.push_str("    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {\n");
        if fields.is_empty() {
            out.push_str(&format!("        write!(f, \"{name}{{{{}}}}\")\n"));
        } else {
            out.push_str(&format!("        writeln!(f, \"{name}{{{{\")?;\n"));
            for field in fields {
                if field.required {
                    out.push_str(&format!(
                        "        writeln!(f, \"  {fname}={{:?}},\", self.{fname})?;\n",
                        fname = field.name,
                    ));
                } else {
                    out.push_str(&format!(
                        "        match &self.{fname} {{\n            Some(v) => writeln!(f, \"  {fname}={{:?}},\", v)?,\n            None => writeln!(f, \"  {fname}=null,\")?,\n        }}\n",
                        fname = field.name,
                    ));
                }
            }
            out.push_str("        write!(f, \"}}\")\n");
        }
        out.push_str("    }\n");
        out.push_str("}\n");

        if matches!(struct_ty.kind, StructKind::Exception) {
            out.push('\n');
            out.push_str(&format!("impl std::error::Error for {name} {{}}\n"));
        }

        Ok(out)
    }

    fn emit_hash_component(&self, field: &Field) -> GenResult<String> {
        let scalar = self.emit_scalar_hash(&field.ty, "v")?;
        if field.required {
            Ok(format!("{{ let v = &self.{}; {scalar} }}", field.name))
        } else {
            Ok(format!(
                "match &self.{} {{ Some(v) => {scalar}, None => 0 }}",
                field.name,
            ))
        }
    }

    fn emit_scalar_hash(&self, ty: &ThriftType, expr: &str) -> GenResult<String> {
        match ty.true_type() {
            ThriftType::Bool
            | ThriftType::Byte
            | ThriftType::I16
            | ThriftType::I32
            | ThriftType::I64 => Ok(format!("(*{expr}) as i64")),
            ThriftType::Double => Ok(format!("{expr}.to_bits() as i64")),
            ThriftType::String | ThriftType::Binary => Ok(format!(
                "{{ use std::hash::{{Hash, Hasher}}; let mut hasher = std::collections::hash_map::DefaultHasher::new(); {expr}.hash(&mut hasher); hasher.finish() as i64 }}"
            )),
            ThriftType::Enum(_) => Ok(format!("{expr}.code() as i64")),
            ThriftType::Struct(_) => Ok(format!("{expr}.hash_code() as i64")),
            ThriftType::List(elem) | ThriftType::Set(elem) => {
                let item_hash = self.emit_scalar_hash(elem, "item")?;
                Ok(format!(
                    "{{ let mut acc: i64 = 0; for item in {expr}.iter() {{ acc = (acc ^ ({item_hash})).wrapping_mul(0x811c9dc5); }} acc }}"
                ))
            }
            ThriftType::Map(key, val) => {
                let key_hash = self.emit_scalar_hash(key, "k")?;
                let val_hash = self.emit_scalar_hash(val, "v2")?;
                Ok(format!(
                    "{{ let mut acc: i64 = 0; for (k, v2) in {expr}.iter() {{ acc = (acc ^ ({key_hash})).wrapping_mul(0x811c9dc5); acc = (acc ^ ({val_hash})).wrapping_mul(0x811c9dc5); }} acc }}"
                ))
            }
            ThriftType::Void => Err(GenError::internal("void cannot be hashed")),
            ThriftType::Typedef(..) => unreachable!("true_type() already unwrapped typedefs"),
        }
    }

    /// A read-only accessor for a private list/set/map field, returning
    /// a slice for lists (spec.md §9's documented idiom) and a shared
    /// reference to the concrete container for sets/maps — neither lets
    /// a caller mutate the field without going through the Builder.
    fn emit_collection_accessor(&self, field: &Field, view: &CollectionView) -> GenResult<String> {
        let name = &field.name;
        match view {
            CollectionView::List(elem) => {
                let elem_ty = self.resolver.surface_type_of(elem)?;
                if field.required {
                    Ok(format!(
                        "    pub fn {name}(&self) -> &[{elem_ty}] {{\n        &self.{name}\n    }}\n\n"
                    ))
                } else {
                    Ok(format!(
                        "    pub fn {name}(&self) -> Option<&[{elem_ty}]> {{\n        self.{name}.as_deref()\n    }}\n\n"
                    ))
                }
            }
            CollectionView::Set(elem) => {
                let concrete = self.resolver.set_of(elem)?;
                if field.required {
                    Ok(format!(
                        "    pub fn {name}(&self) -> &{concrete} {{\n        &self.{name}\n    }}\n\n"
                    ))
                } else {
                    Ok(format!(
                        "    pub fn {name}(&self) -> Option<&{concrete}> {{\n        self.{name}.as_ref()\n    }}\n\n"
                    ))
                }
            }
            CollectionView::Map(key, val) => {
                let concrete = self.resolver.map_of(key, val)?;
                if field.required {
                    Ok(format!(
                        "    pub fn {name}(&self) -> &{concrete} {{\n        &self.{name}\n    }}\n\n"
                    ))
                } else {
                    Ok(format!(
                        "    pub fn {name}(&self) -> Option<&{concrete}> {{\n        self.{name}.as_ref()\n    }}\n\n"
                    ))
                }
            }
        }
    }

    fn emit_builder(&self, struct_ty: &StructType, fields: &[Field]) -> GenResult<String> {
        let name = &struct_ty.name;
        let builder_name = format!("{name}Builder");
        let mut out = String::new();

        out.push_str("#[derive(Clone, Debug, Default)]\n");
        out.push_str(&format!("pub struct {builder_name} {{\n"));
        for f in fields {
            let ty = self.resolver.surface_type_of(&f.ty)?;
            out.push_str(&format!("    {}: Option<{ty}>,\n", f.name));
        }
        out.push_str("}\n\n");

        out.push_str(&format!("impl {builder_name} {{\n"));
        out.push_str("    pub fn new() -> Self {\n        Self::default()\n    }\n\n");

        out.push_str(&format!("    pub fn from_value(value: &{name}) -> Self {{\n"));
        out.push_str(&format!("        {builder_name} {{\n"));
        for f in fields {
            if f.required {
                out.push_str(&format!(
                    "            {fname}: Some(value.{fname}.clone()),\n",
                    fname = f.name,
                ));
            } else {
                out.push_str(&format!(
                    "            {fname}: value.{fname}.clone(),\n",
                    fname = f.name,
                ));
            }
        }
        out.push_str("        }\n    }\n\n");

        for f in fields {
            let ty = self.resolver.surface_type_of(&f.ty)?;
            out.push_str(&format!(
                "    pub fn {fname}(mut self, value: {ty}) -> Self {{\n        self.{fname} = Some(value);\n        self\n    }}\n\n",
                fname = f.name,
            ));
        }

        out.push_str("    /// Re-applies declared default-value initializers; fields with no\n");
        out.push_str("    /// default are cleared to `None`.\n");
        out.push_str("    pub fn reset(&mut self) -> &mut Self {\n");
        let mut names = NameAllocator::new();
        for f in fields {
            names.reserve(&f.name);
        }
        let renderer = ConstRenderer::new(self.schema, self.resolver);
        for f in fields {
            match &f.default {
                None => {
                    out.push_str(&format!("        self.{} = None;\n", f.name));
                }
                Some(default) => {
                    if is_collection_type(&f.ty) {
                        let temp = names.fresh("default");
                        let stmts = renderer.render_init(&mut names, &temp, &f.ty, default)?;
                        out.push_str(&indent(&stmts, 2));
                        out.push_str(&format!("        self.{} = Some({temp});\n", f.name));
                    } else {
                        let expr = renderer.render_expr(&f.ty, default)?;
                        out.push_str(&format!("        self.{} = Some({expr});\n", f.name));
                    }
                }
            }
        }
        out.push_str("        self\n");
        out.push_str("    }\n\n");

        out.push_str(&format!("    pub fn build(self) -> GenResult<{name}> {{\n"));
        if matches!(struct_ty.kind, StructKind::Union) {
            let counts: Vec<String> = fields
                .iter()
                .map(|f| format!("self.{}.is_some() as usize", f.name))
                .collect();
            out.push_str(&format!(
                "        let set_count = {};\n",
                counts.join(" + ")
            ));
            out.push_str("        if set_count != 1 {\n");
            out.push_str("            return Err(GenError::schema_violation(format!(\"Invalid union; {} field(s) were set\", set_count)));\n");
            out.push_str("        }\n");
            out.push_str(&format!("        Ok({name} {{\n"));
            for f in fields {
                out.push_str(&format!("            {fname}: self.{fname},\n", fname = f.name));
            }
            out.push_str("        })\n");
        } else {
            for f in fields {
                if f.required {
                    out.push_str(&format!(
                        "        let {fname} = self.{fname}.ok_or_else(|| GenError::schema_violation(\"required field `{fname}` was not set\"))?;\n",
                        fname = f.name,
                    ));
                }
            }
            out.push_str(&format!("        Ok({name} {{\n"));
            for f in fields {
                if f.required {
                    out.push_str(&format!("            {fname},\n", fname = f.name));
                } else {
                    out.push_str(&format!(
                        "            {fname}: self.{fname},\n",
                        fname = f.name,
                    ));
                }
            }
            out.push_str("        })\n");
        }
        out.push_str("    }\n");
        out.push_str("}\n");

        Ok(out)
    }

    fn emit_adapter(&self, struct_ty: &StructType, fields: &[Field]) -> GenResult<String> {
        let name = &struct_ty.name;
        let builder_name = format!("{name}Builder");
        let adapter_name = format!("{name}Adapter");
        let mut out = String::new();

        out.push_str("#[derive(Clone, Copy, Debug, Default)]\n");
        out.push_str(&format!("pub struct {adapter_name};\n\n"));
        out.push_str(&format!(
            "impl Adapter<{name}, {builder_name}> for {adapter_name} {{\n"
        ));

        out.push_str(&format!(
            "    fn write(&self, protocol: &mut dyn Protocol, value: &{name}) -> GenResult<()> {{\n"
        ));
        out.push_str(&format!(
            "        protocol.write_struct_begin({name:?})?;\n"
        ));
        let mut write_names = NameAllocator::new();
        for f in fields {
            write_names.reserve(&f.name);
        }
        for f in fields {
            let frag = self
                .writer
                .emit_field_write(&mut write_names, "protocol", "value", f)?;
            out.push_str(&indent(&frag, 2));
        }
        out.push_str(&indent(&WriterEmitter::emit_struct_footer("protocol"), 2));
        out.push_str("        Ok(())\n");
        out.push_str("    }\n\n");

        out.push_str(&format!(
            "    fn read(&self, protocol: &mut dyn Protocol, builder: &mut {builder_name}) -> GenResult<()> {{\n"
        ));
        let mut read_names = NameAllocator::new();
        for f in fields {
            read_names.reserve(&f.name);
        }
        let loop_body = self
            .reader
            .emit_field_loop(&mut read_names, "protocol", "builder", fields)?;
        out.push_str(&indent(&loop_body, 2));
        out.push_str("        Ok(())\n");
        out.push_str("    }\n\n");

        out.push_str(&format!(
            "    fn read_new(&self, protocol: &mut dyn Protocol) -> GenResult<{name}> {{\n"
        ));
        out.push_str(&format!(
            "        let mut builder = {builder_name}::new();\n"
        ));
        out.push_str("        self.read(protocol, &mut builder)?;\n");
        out.push_str("        builder.build()\n");
        out.push_str("    }\n");
        out.push_str("}\n");

        Ok(out)
    }
}

/// The shape of the unmodifiable view a field's accessor should return.
enum CollectionView {
    List(ThriftType),
    Set(ThriftType),
    Map(ThriftType, ThriftType),
}

/// `Some` for list/set/map fields, which get a private field plus a
/// read-only accessor instead of a plain `pub` field (spec.md §3
/// invariant 6, §9's "no separate wrapper type needed" resolution).
/// Struct-typed fields are left as plain `pub` fields: nested mutation
/// is that struct's own concern, not this one's.
fn collection_view(ty: &ThriftType) -> Option<CollectionView> {
    match ty.true_type() {
        ThriftType::List(elem) => Some(CollectionView::List((**elem).clone())),
        ThriftType::Set(elem) => Some(CollectionView::Set((**elem).clone())),
        ThriftType::Map(key, val) => Some(CollectionView::Map((**key).clone(), (**val).clone())),
        _ => None,
    }
}

fn is_collection_type(ty: &ThriftType) -> bool {
    matches!(
        ty.true_type(),
        ThriftType::List(_) | ThriftType::Set(_) | ThriftType::Map(..) | ThriftType::Struct(_)
    )
}

fn indent(text: &str, levels: usize) -> String {
    let prefix = "    ".repeat(levels);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}\n")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::schema::ConstValue;

    fn point_schema() -> (Schema, StructType) {
        let struct_ty = StructType {
            name: "Point".into(),
            namespaces: Default::default(),
            doc: None,
            location: None,
            kind: StructKind::Struct,
            fields: vec![
                Field {
                    id: 1,
                    name: "x".into(),
                    ty: ThriftType::I32,
                    required: true,
                    default: None,
                },
                Field {
                    id: 2,
                    name: "y".into(),
                    ty: ThriftType::I32,
                    required: true,
                    default: None,
                },
            ],
        };
        (Schema::default(), struct_ty)
    }

    #[test]
    fn required_fields_are_plain_not_optional() {
        let (schema, struct_ty) = point_schema();
        let config = Config::default();
        let resolver = TypeResolver::new(&config);
        let emitter = StructEmitter::new(&schema, &resolver);
        let out = emitter.emit(&struct_ty).unwrap();
        assert!(out.contains("pub x: i32,"));
        assert!(out.contains("pub y: i32,"));
        assert!(!out.contains("pub x: Option<i32>,"));
    }

    #[test]
    fn missing_required_field_error_names_the_field() {
        let (schema, struct_ty) = point_schema();
        let config = Config::default();
        let resolver = TypeResolver::new(&config);
        let emitter = StructEmitter::new(&schema, &resolver);
        let out = emitter.emit(&struct_ty).unwrap();
        assert!(out.contains("required field `x` was not set"));
        assert!(out.contains("required field `y` was not set"));
    }

    #[test]
    fn union_build_checks_arity() {
        let schema = Schema::default();
        let struct_ty = StructType {
            name: "Either".into(),
            namespaces: Default::default(),
            doc: None,
            location: None,
            kind: StructKind::Union,
            fields: vec![
                Field {
                    id: 1,
                    name: "left".into(),
                    ty: ThriftType::I32,
                    required: false,
                    default: None,
                },
                Field {
                    id: 2,
                    name: "right".into(),
                    ty: ThriftType::String,
                    required: false,
                    default: None,
                },
            ],
        };
        let config = Config::default();
        let resolver = TypeResolver::new(&config);
        let emitter = StructEmitter::new(&schema, &resolver);
        let out = emitter.emit(&struct_ty).unwrap();
        assert!(out.contains("Invalid union; {} field(s) were set"));
        assert!(out.contains("if set_count != 1"));
        assert!(out.contains("pub left: Option<i32>,"));
    }

    #[test]
    fn exception_struct_implements_std_error() {
        let schema = Schema::default();
        let struct_ty = StructType {
            name: "Failure".into(),
            namespaces: Default::default(),
            doc: None,
            location: None,
            kind: StructKind::Exception,
            fields: vec![Field {
                id: 1,
                name: "message".into(),
                ty: ThriftType::String,
                required: true,
                default: None,
            }],
        };
        let config = Config::default();
        let resolver = TypeResolver::new(&config);
        let emitter = StructEmitter::new(&schema, &resolver);
        let out = emitter.emit(&struct_ty).unwrap();
        assert!(out.contains("impl std::error::Error for Failure {}"));
    }

    #[test]
    fn list_field_is_private_with_a_slice_accessor() {
        let schema = Schema::default();
        let struct_ty = StructType {
            name: "Bag".into(),
            namespaces: Default::default(),
            doc: None,
            location: None,
            kind: StructKind::Struct,
            fields: vec![Field {
                id: 1,
                name: "xs".into(),
                ty: ThriftType::List(Box::new(ThriftType::I32)),
                required: true,
                default: None,
            }],
        };
        let config = Config::default();
        let resolver = TypeResolver::new(&config);
        let emitter = StructEmitter::new(&schema, &resolver);
        let out = emitter.emit(&struct_ty).unwrap();

        // No plain `pub xs: Vec<i32>` field — a caller holding an owned
        // or `&mut Bag` has no way to call `.push`/`.insert` on `xs`
        // directly, only through the accessor below.
        assert!(!out.contains("pub xs: Vec<i32>,"));
        assert!(out.contains("    xs: Vec<i32>,"));
        assert!(out.contains("pub fn xs(&self) -> &[i32] {"));
        assert!(out.contains("&self.xs"));
    }

    #[test]
    fn optional_set_field_accessor_returns_option_of_reference() {
        let schema = Schema::default();
        let struct_ty = StructType {
            name: "Tags".into(),
            namespaces: Default::default(),
            doc: None,
            location: None,
            kind: StructKind::Struct,
            fields: vec![Field {
                id: 1,
                name: "labels".into(),
                ty: ThriftType::Set(Box::new(ThriftType::String)),
                required: false,
                default: None,
            }],
        };
        let config = Config::default();
        let resolver = TypeResolver::new(&config);
        let emitter = StructEmitter::new(&schema, &resolver);
        let out = emitter.emit(&struct_ty).unwrap();

        assert!(!out.contains("pub labels:"));
        assert!(out.contains(
            "pub fn labels(&self) -> Option<&std::collections::HashSet<String>> {"
        ));
        assert!(out.contains("self.labels.as_ref()"));
    }

    #[test]
    fn default_scalar_value_is_reapplied_on_reset() {
        let schema = Schema::default();
        let struct_ty = StructType {
            name: "WithDefault".into(),
            namespaces: Default::default(),
            doc: None,
            location: None,
            kind: StructKind::Struct,
            fields: vec![Field {
                id: 1,
                name: "count".into(),
                ty: ThriftType::I32,
                required: true,
                default: Some(ConstValue::Integer(7)),
            }],
        };
        let config = Config::default();
        let resolver = TypeResolver::new(&config);
        let emitter = StructEmitter::new(&schema, &resolver);
        let out = emitter.emit(&struct_ty).unwrap();
        assert!(out.contains("self.count = Some(7i32);"));
    }
}
