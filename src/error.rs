use std::{
    borrow::Cow,
    fmt::{self, Display, Formatter},
};

/// An error raised while generating source for one schema entity.
///
/// All errors abort the current `generate` invocation; the generator
/// recovers nothing locally (spec.md §7).
#[derive(Debug)]
pub struct GenError {
    pub kind: GenErrorKind,
    pub message: Cow<'static, str>,
}

impl GenError {
    pub fn new<S: Into<Cow<'static, str>>>(kind: GenErrorKind, message: S) -> GenError {
        GenError {
            message: message.into(),
            kind,
        }
    }

    pub fn configuration<S: Into<Cow<'static, str>>>(message: S) -> GenError {
        GenError::new(GenErrorKind::ConfigurationError, message)
    }

    pub fn schema_violation<S: Into<Cow<'static, str>>>(message: S) -> GenError {
        GenError::new(GenErrorKind::SchemaViolation, message)
    }

    pub fn unsupported<S: Into<Cow<'static, str>>>(message: S) -> GenError {
        GenError::new(GenErrorKind::UnsupportedConstruct, message)
    }

    pub fn internal<S: Into<Cow<'static, str>>>(message: S) -> GenError {
        GenError::new(GenErrorKind::InternalInvariant, message)
    }
}

impl Display for GenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}, caused by {}", self.message, self.kind)
    }
}

impl std::error::Error for GenError {}

impl From<std::io::Error> for GenError {
    fn from(value: std::io::Error) -> Self {
        GenError::new(GenErrorKind::IOFailure(value), "output sink failure")
    }
}

#[derive(Debug)]
pub enum GenErrorKind {
    /// Missing output package for an entity; null/invalid container impl.
    ConfigurationError,
    /// Reference to a missing enum; enum member lookup failure.
    SchemaViolation,
    /// Struct-typed defaults, nested collection constants, binary/void literals.
    UnsupportedConstruct,
    /// Typedef visited where it should already be unwrapped; kind/type mismatch.
    InternalInvariant,
    /// Any failure surfaced by the output sink.
    IOFailure(std::io::Error),
}

impl Display for GenErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GenErrorKind::ConfigurationError => write!(f, "ConfigurationError"),
            GenErrorKind::SchemaViolation => write!(f, "SchemaViolation"),
            GenErrorKind::UnsupportedConstruct => write!(f, "UnsupportedConstruct"),
            GenErrorKind::InternalInvariant => write!(f, "InternalInvariant"),
            GenErrorKind::IOFailure(e) => write!(f, "IOFailure: {}", e),
        }
    }
}

pub type GenResult<T> = Result<T, GenError>;
