//! ConstantsEmitter (spec.md §2, §4.7): groups IDL constants by their
//! declared output package and emits one holder per package.

use std::collections::BTreeMap;

use crate::error::GenResult;
use crate::names::NameAllocator;
use crate::render::ConstRenderer;
use crate::resolver::TypeResolver;
use crate::schema::{Constant, Schema, ThriftType};

pub struct ConstantsEmitter<'a> {
    schema: &'a Schema,
    resolver: &'a TypeResolver<'a>,
}

/// Classifies a collection-constant's return shape: lists hand back a
/// slice, sets/maps hand back a reference to the concrete container —
/// either way a caller can read but never mutate it (spec.md §3
/// invariant 6, §9).
enum ConstShape {
    List(ThriftType),
    SetOrMap,
}

fn collection_shape(ty: &ThriftType) -> Option<ConstShape> {
    match ty.true_type() {
        ThriftType::List(elem) => Some(ConstShape::List((**elem).clone())),
        ThriftType::Set(_) | ThriftType::Map(..) => Some(ConstShape::SetOrMap),
        _ => None,
    }
}

impl<'a> ConstantsEmitter<'a> {
    pub fn new(schema: &'a Schema, resolver: &'a TypeResolver<'a>) -> Self {
        Self { schema, resolver }
    }

    /// Group every constant by its declared output package, preserving
    /// schema-declaration order within each group (spec.md §4.7 "order
    /// preserved from the schema").
    pub fn group_by_package(&self) -> Vec<(String, Vec<&'a Constant>)> {
        let mut groups: BTreeMap<&str, Vec<&Constant>> = BTreeMap::new();
        for constant in &self.schema.constants {
            groups
                .entry(constant.package.as_str())
                .or_default()
                .push(constant);
        }
        groups
            .into_iter()
            .map(|(pkg, constants)| (pkg.to_string(), constants))
            .collect()
    }

    /// Emit the holder for one package's constants (spec.md §4.7).
    /// Scalar and enum constants become associated consts; collection
    /// constants become accessor functions backed by a function-local
    /// `OnceLock`, built once on first call and handed back as a
    /// read-only view (`&'static [T]` for lists, `&'static Concrete`
    /// for sets/maps) so no caller can mutate it (spec.md §3 invariant
    /// 6, §5, §9).
    pub fn emit_group(&self, constants: &[&Constant]) -> GenResult<String> {
        let renderer = ConstRenderer::new(self.schema, self.resolver);
        let mut names = NameAllocator::new();
        let mut out = String::from("pub struct Constants;\n\n");
        out.push_str("impl Constants {\n");

        for constant in constants {
            if let Some(loc) = &constant.location {
                out.push_str(&format!("    /// Source: {loc}\n"));
            }
            if let Some(shape) = collection_shape(&constant.ty) {
                let concrete_ty = self.resolver.surface_type_of(&constant.ty)?;
                let return_ty = match &shape {
                    ConstShape::List(elem) => {
                        let elem_ty = self.resolver.surface_type_of(elem)?;
                        format!("&'static [{elem_ty}]")
                    }
                    ConstShape::SetOrMap => format!("&'static {concrete_ty}"),
                };
                let temp = names.fresh(&constant.name.to_lowercase());
                let stmts = renderer.render_init(&mut names, &temp, &constant.ty, &constant.value)?;
                let cache_name = format!("{}__CACHE", constant.name.to_uppercase());

                out.push_str(&format!(
                    "    pub fn {}() -> {return_ty} {{\n",
                    constant.name.to_lowercase()
                ));
                out.push_str(&format!(
                    "        static {cache_name}: std::sync::OnceLock<{concrete_ty}> = std::sync::OnceLock::new();\n"
                ));
                out.push_str(&format!("        {cache_name}.get_or_init(|| {{\n"));
                for line in stmts.lines() {
                    out.push_str(&format!("            {line}\n"));
                }
                out.push_str(&format!("            {temp}\n"));
                out.push_str("        })");
                match shape {
                    ConstShape::List(_) => out.push_str(".as_slice()\n"),
                    ConstShape::SetOrMap => out.push('\n'),
                }
                out.push_str("    }\n\n");
            } else {
                let ty = self.resolver.surface_type_of(&constant.ty)?;
                let expr = renderer.render_expr(&constant.ty, &constant.value)?;
                out.push_str(&format!(
                    "    pub const {}: {ty} = {expr};\n",
                    constant.name
                ));
            }
        }

        out.push_str("}\n");
        Ok(out)
    }
}
