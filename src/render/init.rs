//! ConstRenderer statement mode (spec.md §4.2 `renderInit`).

use super::ConstRenderer;
use crate::error::{GenError, GenResult};
use crate::names::NameAllocator;
use crate::schema::{ConstValue, ThriftType};

fn is_collection(ty: &ThriftType) -> bool {
    matches!(
        ty.true_type(),
        ThriftType::List(_) | ThriftType::Set(_) | ThriftType::Map(..) | ThriftType::Struct(_)
    )
}

impl<'a> ConstRenderer<'a> {
    /// Render a collection constant (or a nested default needing more
    /// than one statement) as a statement block that assigns the
    /// finished container to `target_name`. Nested collection constants
    /// are rejected in this version (spec.md §4.2, §9).
    pub fn render_init(
        &self,
        names: &mut NameAllocator,
        target_name: &str,
        ty: &ThriftType,
        value: &ConstValue,
    ) -> GenResult<String> {
        match ty.true_type() {
            ThriftType::List(elem) => self.render_list_init(names, target_name, elem, value, false),
            ThriftType::Set(elem) => self.render_list_init(names, target_name, elem, value, true),
            ThriftType::Map(key, val) => self.render_map_init(names, target_name, key, val, value),
            ThriftType::Struct(name) => Err(GenError::unsupported(format!(
                "struct-typed default values are not supported (struct {name})"
            ))),
            _ => {
                // Scalars/enums still fit renderInit's contract: a single
                // `let` binding is a (trivial) statement block.
                let expr = self.render_expr(ty, value)?;
                Ok(format!("let {target_name} = {expr};\n"))
            }
        }
    }

    fn render_list_init(
        &self,
        names: &mut NameAllocator,
        target_name: &str,
        elem: &ThriftType,
        value: &ConstValue,
        is_set: bool,
    ) -> GenResult<String> {
        if is_collection(elem) {
            return Err(GenError::unsupported(
                "nested list/set/map/struct constants are not supported",
            ));
        }
        let items = match value {
            ConstValue::List(items) => items,
            other => {
                return Err(GenError::unsupported(format!(
                    "expected a list/set literal, found {other:?}"
                )))
            }
        };

        let (concrete, bare) = if is_set {
            (self.resolver.set_of(elem)?, self.resolver.set_container_name())
        } else {
            (self.resolver.list_of(elem)?, self.resolver.list_container_name())
        };
        let insert_method = if is_set { "insert" } else { "push" };
        let var = names.fresh(if is_set { "set" } else { "list" });

        let mut out = format!(
            "let mut {var}: {concrete} = {bare}::with_capacity({len});\n",
            len = items.len()
        );
        for item in items {
            let expr = self.render_expr(elem, item)?;
            out.push_str(&format!("{var}.{insert_method}({expr});\n"));
        }
        out.push_str(&format!("let {target_name} = {var};\n"));
        Ok(out)
    }

    fn render_map_init(
        &self,
        names: &mut NameAllocator,
        target_name: &str,
        key_ty: &ThriftType,
        val_ty: &ThriftType,
        value: &ConstValue,
    ) -> GenResult<String> {
        if is_collection(key_ty) || is_collection(val_ty) {
            return Err(GenError::unsupported(
                "nested list/set/map/struct constants are not supported",
            ));
        }
        let pairs = match value {
            ConstValue::Map(pairs) => pairs,
            other => {
                return Err(GenError::unsupported(format!(
                    "expected a map literal, found {other:?}"
                )))
            }
        };

        let concrete = self.resolver.map_of(key_ty, val_ty)?;
        let bare = self.resolver.map_container_name();
        let var = names.fresh("map");

        let mut out = format!(
            "let mut {var}: {concrete} = {bare}::with_capacity({len});\n",
            len = pairs.len()
        );
        for (k, v) in pairs {
            let key_expr = self.render_expr(key_ty, k)?;
            let val_expr = self.render_expr(val_ty, v)?;
            out.push_str(&format!("{var}.insert({key_expr}, {val_expr});\n"));
        }
        out.push_str(&format!("let {target_name} = {var};\n"));
        Ok(out)
    }
}
