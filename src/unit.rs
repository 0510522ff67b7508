//! CompilationUnit (spec.md §3): the internal representation of one
//! generated file, handed to an `OutputSink`.

/// Fixed leading comment stamped on every generated unit (spec.md §4.8).
pub const FILE_COMMENT: &str = "Automatically generated by the Thrifty compiler; do not edit!";

/// One emitted file: a package name, the rendered top-level
/// declaration(s), and the header comment lines that precede them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilationUnit {
    pub package: String,
    pub type_name: String,
    pub source: Option<String>,
    pub body: String,
}

impl CompilationUnit {
    pub fn new(package: impl Into<String>, type_name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            type_name: type_name.into(),
            source: None,
            body: body.into(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The file name this unit would be written under by a
    /// directory-backed sink (spec.md §6 `outputSink`).
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.type_name)
    }

    /// Render the full file text: header comment, optional source line,
    /// then the emitted body.
    pub fn render(&self) -> String {
        let mut out = format!("// {FILE_COMMENT}\n");
        if let Some(source) = &self.source {
            out.push_str(&format!("// Source: {source}\n"));
        }
        out.push('\n');
        out.push_str(&self.body);
        out
    }
}
