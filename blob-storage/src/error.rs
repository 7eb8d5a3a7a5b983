use std::error::Error as StdError;
use thiserror::Error;

pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Raised by a content generator that could not produce a payload.
#[derive(Debug, Error)]
#[error("could not generate content: {reason}")]
pub struct GenerateError {
    reason: String,
}

impl GenerateError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[derive(Debug, Error)]
pub enum BlobberError {
    #[error("generator function cannot be missing")]
    MissingGenerator,

    #[error("blob bucket cannot be missing")]
    MissingBucket,

    #[error("could not create bucket writer for {key}")]
    Writer {
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("generating random characters failed")]
    Generate(#[from] GenerateError),

    #[error("could not write to bucket object {key}")]
    Write {
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("wrote incorrect number of bytes to {key}: expected {expected}, wrote {written}")]
    ShortWrite {
        key: String,
        expected: usize,
        written: usize,
    },

    #[error("failed to close the blob bucket writer for {key}")]
    Close {
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("unexpected error during blob storage iteration")]
    List(#[source] BoxError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BucketUrlError {
    #[error("bucket identifier is empty")]
    Empty,

    #[error("unsupported bucket scheme {0:?}, expected file:// or s3://")]
    UnsupportedScheme(String),
}
