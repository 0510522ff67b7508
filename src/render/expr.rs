//! ConstRenderer expression mode (spec.md §4.2 `renderExpr`).

use super::ConstRenderer;
use crate::error::{GenError, GenResult};
use crate::schema::{ConstValue, ThriftType};

impl<'a> ConstRenderer<'a> {
    /// Render a constant that fits in a single initializer expression:
    /// scalars, strings, booleans, and enum members.
    pub fn render_expr(&self, ty: &ThriftType, value: &ConstValue) -> GenResult<String> {
        match ty.true_type() {
            ThriftType::Bool => Ok(self.render_bool(value)?.to_string()),
            ThriftType::Byte => Ok(format!("{}i8", self.render_integer(value)?)),
            ThriftType::I16 => Ok(format!("{}i16", self.render_integer(value)?)),
            ThriftType::I32 => Ok(format!("{}i32", self.render_integer(value)?)),
            ThriftType::I64 => Ok(format!("{}i64", self.render_integer(value)?)),
            ThriftType::Double => Ok(format!("{}f64", self.render_double(value)?)),
            ThriftType::String => Ok(format!("{:?}.to_string()", self.render_string(value)?)),
            ThriftType::Binary => Err(GenError::unsupported(
                "binary literals are not supported in constant expressions",
            )),
            ThriftType::Void => Err(GenError::unsupported(
                "void literals are not supported in constant expressions",
            )),
            ThriftType::Enum(name) => self.render_enum_member(name, value),
            ThriftType::Struct(name) => Err(GenError::unsupported(format!(
                "struct-typed default values are not supported (struct {name})"
            ))),
            ThriftType::List(_) | ThriftType::Set(_) | ThriftType::Map(..) => Err(
                GenError::unsupported("collection constants require statement mode"),
            ),
            ThriftType::Typedef(..) => unreachable!("true_type() already unwrapped typedefs"),
        }
    }

    fn render_integer(&self, value: &ConstValue) -> GenResult<i64> {
        match value {
            ConstValue::Integer(n) => Ok(*n),
            other => Err(GenError::unsupported(format!(
                "expected an integer literal, found {other:?}"
            ))),
        }
    }

    fn render_double(&self, value: &ConstValue) -> GenResult<f64> {
        match value {
            ConstValue::Double(d) => Ok(*d),
            ConstValue::Integer(n) => Ok(*n as f64),
            other => Err(GenError::unsupported(format!(
                "expected a double literal, found {other:?}"
            ))),
        }
    }

    fn render_string<'v>(&self, value: &'v ConstValue) -> GenResult<&'v str> {
        match value {
            ConstValue::String(s) => Ok(s.as_str()),
            other => Err(GenError::unsupported(format!(
                "expected a string literal, found {other:?}"
            ))),
        }
    }

    /// Boolean from integer is true iff non-zero (spec.md §4.2, §9 open
    /// question — preserved deliberately, see DESIGN.md).
    fn render_bool(&self, value: &ConstValue) -> GenResult<&'static str> {
        match value {
            ConstValue::Identifier(id) if id == "true" => Ok("true"),
            ConstValue::Identifier(id) if id == "false" => Ok("false"),
            ConstValue::Integer(n) => Ok(if *n != 0 { "true" } else { "false" }),
            other => Err(GenError::unsupported(format!(
                "expected a boolean literal, found {other:?}"
            ))),
        }
    }

    /// Enum lookup by integer id takes precedence over by-name when the
    /// value is tagged as an integer (spec.md §4.2 tie-break).
    fn render_enum_member(&self, enum_name: &str, value: &ConstValue) -> GenResult<String> {
        let enum_ty = self
            .schema
            .enum_by_name(enum_name)
            .ok_or_else(|| GenError::schema_violation(format!("unknown enum {enum_name}")))?;

        let member = match value {
            ConstValue::Integer(n) => enum_ty.member_by_value(*n as i32).ok_or_else(|| {
                GenError::schema_violation(format!(
                    "enum {enum_name} has no member with value {n}"
                ))
            })?,
            ConstValue::Identifier(name) => {
                let bare = name.rsplit('.').next().unwrap_or(name);
                enum_ty.member_by_name(bare).ok_or_else(|| {
                    GenError::schema_violation(format!(
                        "enum {enum_name} has no member named {bare}"
                    ))
                })?
            }
            other => {
                return Err(GenError::unsupported(format!(
                    "expected an enum member reference, found {other:?}"
                )))
            }
        };

        Ok(format!("{}::{}", enum_name, member.name))
    }
}
