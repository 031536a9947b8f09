//! Purpose: Single error type shared by decoding, resolution, and the CLI.
//! Exports: `Error`, `ErrorKind`, `to_exit_code`.
//! Role: Structured failure carrier; callers branch on `ErrorKind`, humans read context.
//! Invariants: Errors are returned, never logged or retried inside the library.
//! Invariants: `Clone` keeps the source so a captured upstream error can be replayed unchanged.
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::core::catalog::Endpoint;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Usage,
    EndpointNotFound,
    AmbiguousEndpoint,
    InvalidVisibility,
    Decode,
    Format,
    Upstream,
    InvalidUrl,
    Io,
}

#[derive(Clone, Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    field: Option<String>,
    matches: Vec<Endpoint>,
    source: Option<Arc<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            field: None,
            matches: Vec::new(),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Dotted payload path the error refers to, e.g. `access.token.expires`.
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Every endpoint that satisfied an ambiguous query, in catalog order.
    pub fn matches(&self) -> &[Endpoint] {
        &self.matches
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_matches(mut self, matches: Vec<Endpoint>) -> Self {
        self.matches = matches;
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {field})")?;
        }
        if !self.matches.is_empty() {
            write!(f, " (matches: {})", self.matches.len())?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Usage => 2,
        ErrorKind::EndpointNotFound => 3,
        ErrorKind::AmbiguousEndpoint => 4,
        ErrorKind::InvalidVisibility => 5,
        ErrorKind::Decode => 6,
        ErrorKind::Format => 7,
        ErrorKind::Upstream => 8,
        ErrorKind::InvalidUrl => 9,
        ErrorKind::Io => 10,
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, to_exit_code};
    use crate::core::catalog::Endpoint;
    use std::error::Error as StdError;

    #[test]
    fn exit_code_mapping_is_stable() {
        let cases = [
            (ErrorKind::Usage, 2),
            (ErrorKind::EndpointNotFound, 3),
            (ErrorKind::AmbiguousEndpoint, 4),
            (ErrorKind::InvalidVisibility, 5),
            (ErrorKind::Decode, 6),
            (ErrorKind::Format, 7),
            (ErrorKind::Upstream, 8),
            (ErrorKind::InvalidUrl, 9),
            (ErrorKind::Io, 10),
        ];

        for (kind, code) in cases {
            assert_eq!(to_exit_code(kind), code);
        }
    }

    #[test]
    fn display_includes_field_and_match_count() {
        let err = Error::new(ErrorKind::AmbiguousEndpoint)
            .with_message("discovered 2 matching endpoints")
            .with_field("access.serviceCatalog")
            .with_matches(vec![Endpoint::default(), Endpoint::default()]);
        assert_eq!(
            err.to_string(),
            "AmbiguousEndpoint: discovered 2 matching endpoints (field: access.serviceCatalog) (matches: 2)"
        );
        assert_eq!(err.match_count(), 2);
    }

    #[test]
    fn clone_keeps_source_chain() {
        let io = std::io::Error::other("connection reset");
        let err = Error::new(ErrorKind::Upstream)
            .with_message("identity request failed")
            .with_source(io);
        let copy = err.clone();
        assert_eq!(copy.kind(), ErrorKind::Upstream);
        assert_eq!(copy.message(), Some("identity request failed"));
        let source = copy.source().expect("source");
        assert_eq!(source.to_string(), "connection reset");
    }
}
