//! Definition of termfacet's error and result.

use std::io;

use thiserror::Error;

/// The library's error enum
#[derive(Debug, Error)]
pub enum FacetError {
    /// The byte stream could not be decoded into a facet: it was truncated,
    /// declared more entries than it carries, or held an unknown tag.
    #[error("Malformed facet stream: {0}")]
    MalformedStream(String),
    /// `reduce` was called with no facets, or with facets that cannot be merged
    /// together (different comparators or key kinds).
    #[error("Invalid reduce input: {0}")]
    InvalidReduceInput(String),
    /// Reducer settings failed to parse.
    #[error("Invalid reducer settings: {0}")]
    InvalidSettings(String),
    /// The writer a facet was encoded into failed.
    #[error("An IO error occurred: '{0}'")]
    IoError(#[from] io::Error),
}

impl FacetError {
    /// Wraps an error raised while decoding a stream.
    pub(crate) fn malformed(io_error: io::Error) -> FacetError {
        FacetError::MalformedStream(io_error.to_string())
    }
}

impl From<serde_json::Error> for FacetError {
    fn from(error: serde_json::Error) -> FacetError {
        FacetError::InvalidSettings(error.to_string())
    }
}
