//! OutputSink (spec.md §6 `outputSink`): where the orchestrator hands
//! finished compilation units. Exclusively owned by the caller for the
//! duration of one `generate` call (spec.md §5).

use std::fs;
use std::path::PathBuf;

use crate::error::GenResult;
use crate::unit::CompilationUnit;

/// Receives one `CompilationUnit` at a time, in the fixed order the
/// Orchestrator walks the schema.
pub trait OutputSink {
    fn accept(&mut self, unit: &CompilationUnit) -> GenResult<()>;
}

/// Writes one file per compilation unit under a root directory,
/// creating per-package subdirectories on demand.
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, unit: &CompilationUnit) -> PathBuf {
        self.root.join(&unit.package).join(unit.file_name())
    }
}

impl OutputSink for DirectorySink {
    fn accept(&mut self, unit: &CompilationUnit) -> GenResult<()> {
        let path = self.path_for(unit);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, unit.render())?;
        tracing::debug!(path = %path.display(), "wrote compilation unit");
        Ok(())
    }
}

/// Appends every rendered unit into a single in-memory buffer,
/// separated by blank lines, in the order they are accepted.
#[derive(Debug, Default)]
pub struct BufferSink {
    buffer: String,
    units: Vec<CompilationUnit>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn units(&self) -> &[CompilationUnit] {
        &self.units
    }
}

impl OutputSink for BufferSink {
    fn accept(&mut self, unit: &CompilationUnit) -> GenResult<()> {
        if !self.buffer.is_empty() {
            self.buffer.push('\n');
        }
        self.buffer.push_str(&unit.render());
        self.units.push(unit.clone());
        Ok(())
    }
}
