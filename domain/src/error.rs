//! Error types for the `domain` layer.
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors are modeled as a root `Error` holding an `error_kind` tree plus the
/// optional underlying `source`. Higher layers (`web`, `sse`) translate the kind
/// into whatever their callers need, an HTTP status for example.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
}

/// Failures that originate inside this process.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    /// An event could not be encoded as JSON.
    Serialization,
    Other(String),
}

/// Failures caused by data received from elsewhere.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    /// A received event stream frame was not valid UTF-8 or JSON.
    MalformedEventStream,
    Other(String),
}

impl Error {
    pub fn internal(kind: InternalErrorKind) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(kind),
        }
    }

    pub fn external(kind: ExternalErrorKind) -> Self {
        Error {
            source: None,
            error_kind: DomainErrorKind::External(kind),
        }
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "Domain Error: {:?} ({source})", self.error_kind),
            None => write!(f, "Domain Error: {:?}", self.error_kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}
