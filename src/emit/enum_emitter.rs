//! EnumEmitter (spec.md §2, §4.6): emits an enum value type with a
//! numeric `code` and a `from_code` lookup.

use crate::error::GenResult;
use crate::schema::EnumType;

pub struct EnumEmitter;

impl EnumEmitter {
    pub fn new() -> Self {
        Self
    }

    pub fn emit(&self, enum_ty: &EnumType) -> GenResult<String> {
        let name = &enum_ty.name;
        let mut out = String::new();

        if let Some(doc) = &enum_ty.doc {
            out.push_str(&format!("/// {doc}\n"));
        }
        if let Some(loc) = &enum_ty.location {
            out.push_str(&format!("/// Source: {loc}\n"));
        }
        out.push_str("#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]\n");
        out.push_str(&format!("pub enum {name} {{\n"));
        for member in &enum_ty.members {
            out.push_str(&format!(
                "    {member_name} = {value},\n",
                member_name = member.name,
                value = member.value,
            ));
        }
        out.push_str("}\n\n");

        out.push_str(&format!("impl {name} {{\n"));
        out.push_str("    pub const fn code(self) -> i32 {\n");
        out.push_str("        self as i32\n");
        out.push_str("    }\n\n");

        out.push_str("    /// Returns `None` for any code not declared on this enum,\n");
        out.push_str("    /// including out-of-range and negative codes.\n");
        out.push_str(&format!("    pub const fn from_code(code: i32) -> Option<{name}> {{\n"));
        out.push_str("        match code {\n");
        for member in &enum_ty.members {
            out.push_str(&format!(
                "            {value} => Some({name}::{member_name}),\n",
                value = member.value,
                member_name = member.name,
            ));
        }
        out.push_str("            _ => None,\n");
        out.push_str("        }\n");
        out.push_str("    }\n");
        out.push_str("}\n");

        Ok(out)
    }
}

impl Default for EnumEmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::EnumMember;

    fn color() -> EnumType {
        EnumType {
            name: "Color".into(),
            namespaces: Default::default(),
            doc: None,
            location: None,
            members: vec![
                EnumMember {
                    name: "Red".into(),
                    value: 1,
                },
                EnumMember {
                    name: "Green".into(),
                    value: 2,
                },
                EnumMember {
                    name: "Blue".into(),
                    value: 3,
                },
            ],
        }
    }

    #[test]
    fn members_carry_their_declared_discriminant() {
        let out = EnumEmitter::new().emit(&color()).unwrap();
        assert!(out.contains("Red = 1,"));
        assert!(out.contains("Green = 2,"));
        assert!(out.contains("Blue = 3,"));
    }

    #[test]
    fn from_code_matches_known_values_and_falls_through_to_none() {
        let out = EnumEmitter::new().emit(&color()).unwrap();
        assert!(out.contains("2 => Some(Color::Green),"));
        assert!(out.contains("_ => None,"));
    }
}
