//! Orchestrator (spec.md §2, §4.8): drives one deterministic pass over
//! a `Schema`, handing each finished `CompilationUnit` to an
//! `OutputSink`.

use crate::config::Config;
use crate::emit::{ConstantsEmitter, EnumEmitter, StructEmitter};
use crate::error::GenResult;
use crate::resolver::TypeResolver;
use crate::schema::{Schema, StructType};
use crate::sink::OutputSink;
use crate::unit::CompilationUnit;

/// Generation entry point: one `Orchestrator` per `generate` call
/// (spec.md §5 — single-threaded, synchronous, no shared state beyond
/// the sink).
pub struct Orchestrator<'a> {
    schema: &'a Schema,
    config: Config,
}

impl<'a> Orchestrator<'a> {
    pub fn new(schema: &'a Schema, config: Config) -> Self {
        Self { schema, config }
    }

    /// Walk the schema in the fixed order enums → structs → exceptions
    /// → unions → constants-by-package, emitting one unit per entity
    /// (one per package for constants) (spec.md §4.8).
    ///
    /// Service/RPC declarations are deliberately unhandled here; see
    /// the design note at the bottom of this module (spec.md §9).
    pub fn generate(&self, sink: &mut dyn OutputSink) -> GenResult<()> {
        let resolver = TypeResolver::new(&self.config);

        tracing::debug!(count = self.schema.enums.len(), "emitting enums");
        let enum_emitter = EnumEmitter::new();
        for enum_ty in &self.schema.enums {
            tracing::trace!(name = %enum_ty.name, "emitting enum");
            let package = self.package_of_enum(enum_ty)?;
            let body = enum_emitter.emit(enum_ty)?;
            let mut unit = CompilationUnit::new(package, enum_ty.name.clone(), body);
            if let Some(loc) = &enum_ty.location {
                unit = unit.with_source(loc.to_string());
            }
            sink.accept(&unit)?;
        }

        let struct_emitter = StructEmitter::new(self.schema, &resolver);
        tracing::debug!(count = self.schema.structs.len(), "emitting structs");
        for struct_ty in &self.schema.structs {
            self.emit_struct(&struct_emitter, struct_ty, sink)?;
        }

        tracing::debug!(count = self.schema.exceptions.len(), "emitting exceptions");
        for struct_ty in &self.schema.exceptions {
            self.emit_struct(&struct_emitter, struct_ty, sink)?;
        }

        tracing::debug!(count = self.schema.unions.len(), "emitting unions");
        for struct_ty in &self.schema.unions {
            self.emit_struct(&struct_emitter, struct_ty, sink)?;
        }

        tracing::debug!(count = self.schema.constants.len(), "emitting constants");
        let constants_emitter = ConstantsEmitter::new(self.schema, &resolver);
        for (package, constants) in constants_emitter.group_by_package() {
            tracing::trace!(package = %package, count = constants.len(), "emitting constants group");
            let body = constants_emitter.emit_group(&constants)?;
            let unit = CompilationUnit::new(package, "Constants", body);
            sink.accept(&unit)?;
        }

        Ok(())
    }

    fn emit_struct(
        &self,
        struct_emitter: &StructEmitter<'_>,
        struct_ty: &StructType,
        sink: &mut dyn OutputSink,
    ) -> GenResult<()> {
        tracing::trace!(name = %struct_ty.name, "emitting struct");
        let package = self.package_of_struct(struct_ty)?;
        let body = struct_emitter.emit(struct_ty)?;
        let mut unit = CompilationUnit::new(package, struct_ty.name.clone(), body);
        if let Some(loc) = &struct_ty.location {
            unit = unit.with_source(loc.to_string());
        }
        sink.accept(&unit)
    }

    fn package_of_enum(&self, enum_ty: &crate::schema::EnumType) -> GenResult<String> {
        enum_ty.package().map(str::to_string).ok_or_else(|| {
            crate::error::GenError::configuration(format!(
                "enum {} has no declared output package",
                enum_ty.name
            ))
        })
    }

    fn package_of_struct(&self, struct_ty: &StructType) -> GenResult<String> {
        struct_ty.package().map(str::to_string).ok_or_else(|| {
            crate::error::GenError::configuration(format!(
                "struct {} has no declared output package",
                struct_ty.name
            ))
        })
    }
}

// TODO: service/RPC declarations are out of scope for this pass (spec.md
// §1 non-goals); wiring a ServiceEmitter in here is the intended
// extension point once client/server stub generation is designed.

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{EnumMember, EnumType, Field, StructKind, ThriftType};
    use crate::sink::BufferSink;
    use std::collections::BTreeMap;

    fn pkg() -> BTreeMap<String, String> {
        let mut ns = BTreeMap::new();
        ns.insert("rs".to_string(), "pkg".to_string());
        ns
    }

    #[test]
    fn emits_enums_before_structs() {
        let mut schema = Schema::default();
        schema.enums.push(EnumType {
            name: "Color".into(),
            namespaces: pkg(),
            doc: None,
            location: None,
            members: vec![EnumMember {
                name: "Red".into(),
                value: 1,
            }],
        });
        schema.structs.push(StructType {
            name: "Point".into(),
            namespaces: pkg(),
            doc: None,
            location: None,
            kind: StructKind::Struct,
            fields: vec![Field {
                id: 1,
                name: "x".into(),
                ty: ThriftType::I32,
                required: true,
                default: None,
            }],
        });

        let orchestrator = Orchestrator::new(&schema, Config::new("2026-07-26"));
        let mut sink = BufferSink::new();
        orchestrator.generate(&mut sink).unwrap();

        let color_pos = sink.buffer().find("pub enum Color").unwrap();
        let point_pos = sink.buffer().find("pub struct Point").unwrap();
        assert!(color_pos < point_pos);
    }

    #[test]
    fn missing_package_is_a_configuration_error() {
        let mut schema = Schema::default();
        schema.enums.push(EnumType {
            name: "Color".into(),
            namespaces: Default::default(),
            doc: None,
            location: None,
            members: vec![],
        });
        let orchestrator = Orchestrator::new(&schema, Config::default());
        let mut sink = BufferSink::new();
        assert!(orchestrator.generate(&mut sink).is_err());
    }

    #[test]
    fn constants_are_emitted_last() {
        let mut schema = Schema::default();
        schema.structs.push(StructType {
            name: "Point".into(),
            namespaces: pkg(),
            doc: None,
            location: None,
            kind: StructKind::Struct,
            fields: vec![],
        });
        schema.constants.push(crate::schema::Constant {
            name: "MAX".into(),
            package: "pkg".into(),
            ty: ThriftType::I32,
            value: crate::schema::ConstValue::Integer(1),
            location: None,
        });
        let orchestrator = Orchestrator::new(&schema, Config::new("2026-07-26"));
        let mut sink = BufferSink::new();
        orchestrator.generate(&mut sink).unwrap();
        let struct_pos = sink.buffer().find("pub struct Point").unwrap();
        let const_pos = sink.buffer().find("pub struct Constants").unwrap();
        assert!(struct_pos < const_pos);
    }
}
