//! Per-entity emitters (spec.md §2 §4.3-§4.7): the code that turns one
//! schema entity into Rust source text.

pub mod constants_emitter;
pub mod enum_emitter;
pub mod reader;
pub mod struct_emitter;
pub mod writer;

pub use constants_emitter::ConstantsEmitter;
pub use enum_emitter::EnumEmitter;
pub use reader::ReaderEmitter;
pub use struct_emitter::StructEmitter;
pub use writer::WriterEmitter;
