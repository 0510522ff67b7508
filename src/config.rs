//! Configuration surface (spec.md §6): pluggable container implementations
//! and the output sink selector.
//!
//! Shaped after `plotnik-compiler`'s `typegen::typescript::Config`
//! (`examples/plotnik-lang-plotnik/crates/plotnik-compiler/src/typegen/typescript/config.rs`):
//! a plain struct with `pub(crate)` fields and chained `fn foo(mut self,
//! v: T) -> Self` setters.

/// A concrete container implementation the generated value types and
/// builders allocate (spec.md §4.1 `listOf`/`setOf`/`mapOf`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    Vec,
    HashSet,
    HashMap,
    /// Escape hatch for a fully-qualified custom container type.
    Custom(String),
}

impl ContainerKind {
    /// The Rust type path used when allocating the concrete container.
    pub fn type_name(&self) -> &str {
        match self {
            ContainerKind::Vec => "Vec",
            ContainerKind::HashSet => "std::collections::HashSet",
            ContainerKind::HashMap => "std::collections::HashMap",
            ContainerKind::Custom(name) => name,
        }
    }
}

/// Generation-wide configuration (spec.md §6 "Configuration surface").
#[derive(Clone, Debug)]
pub struct Config {
    pub(crate) list_type: ContainerKind,
    pub(crate) set_type: ContainerKind,
    pub(crate) map_type: ContainerKind,
    /// Date stamp captured once per invocation (spec.md §5), embedded
    /// in `@Generated`-style header comments.
    pub(crate) generated_on: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            list_type: ContainerKind::Vec,
            set_type: ContainerKind::HashSet,
            map_type: ContainerKind::HashMap,
            generated_on: String::new(),
        }
    }
}

impl Config {
    /// Create a new `Config`, stamping `generated_on` for this invocation.
    pub fn new(generated_on: impl Into<String>) -> Self {
        Self {
            generated_on: generated_on.into(),
            ..Self::default()
        }
    }

    pub fn list_type(mut self, value: ContainerKind) -> Self {
        self.list_type = value;
        self
    }

    pub fn set_type(mut self, value: ContainerKind) -> Self {
        self.set_type = value;
        self
    }

    pub fn map_type(mut self, value: ContainerKind) -> Self {
        self.map_type = value;
        self
    }

    pub fn generated_on(&self) -> &str {
        &self.generated_on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let cfg = Config::default();
        assert_eq!(cfg.list_type.type_name(), "Vec");
        assert_eq!(cfg.set_type.type_name(), "std::collections::HashSet");
        assert_eq!(cfg.map_type.type_name(), "std::collections::HashMap");
    }

    #[test]
    fn custom_container_is_used_verbatim() {
        let cfg = Config::default().list_type(ContainerKind::Custom("im::Vector".into()));
        assert_eq!(cfg.list_type.type_name(), "im::Vector");
    }
}
