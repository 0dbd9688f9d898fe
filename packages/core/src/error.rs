//! Error types for projection.

use crate::path::FieldPath;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while projecting a record.
///
/// Failures in nested records are wrapped in [`Error::NestedProjection`], one layer
/// per record level, so the chain spells out which field led to the failure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The value handed to the projector is null or not a structured record.
    #[error("invalid input at {path}: expected a structured record, found {found}")]
    InvalidInput {
        path: FieldPath,
        found: &'static str,
    },

    /// Projecting the record held by `field` failed.
    #[error("failed to project field {field}: {source}")]
    NestedProjection {
        field: String,
        path: FieldPath,
        source: Box<Error>,
    },

    /// A record sits deeper than the projector's configured limit.
    #[error("record at {path} is nested deeper than the limit of {limit}")]
    DepthExceeded { path: FieldPath, limit: usize },

    /// A record listed a field it could not produce a value for.
    #[error("record {record} has no value for listed field {field} (at {path})")]
    MissingField {
        record: &'static str,
        field: String,
        path: FieldPath,
    },
}

impl Error {
    pub(crate) fn nested(field: &str, path: FieldPath, source: Error) -> Self {
        Error::NestedProjection {
            field: field.to_string(),
            path,
            source: Box::new(source),
        }
    }

    /// Path of the innermost failure.
    pub fn field_path(&self) -> &FieldPath {
        match self {
            Error::NestedProjection { source, .. } => source.field_path(),
            Error::InvalidInput { path, .. }
            | Error::DepthExceeded { path, .. }
            | Error::MissingField { path, .. } => path,
        }
    }

    /// The error itself followed by every wrapped cause, outermost first.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// The innermost error of the chain.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::NestedProjection { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Iterator over an error and its wrapped causes.
pub struct Chain<'a> {
    next: Option<&'a Error>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = match current {
            Error::NestedProjection { source, .. } => Some(source.as_ref()),
            _ => None,
        };
        Some(current)
    }
}
