use std::error::Error as StdError;
use blob_store::error::BoxError;
use blob_store::{BlobberError, BucketUrlError};
use thiserror::Error;


#[derive(Debug, Error)]
pub enum SomebytesErr {
    #[error("could not parse arguments")]
    Args(#[from] clap::Error),

    #[error("bucket missing, set environment variable SOMEBYTES_BUCKET or pass it as the first argument")]
    BucketMissing,

    #[error("invalid bucket identifier")]
    BucketUrl(#[from] BucketUrlError),

    #[error("could not acquire AWS credentials")]
    Credentials(#[source] BoxError),

    #[error("could not open bucket {bucket}")]
    OpenBucket {
        bucket: String,
        #[source]
        source: BoxError,
    },

    #[error("could not create blobber")]
    Blobber(#[source] BlobberError),

    #[error("could not create objects")]
    Create(#[source] BlobberError),

    #[error("error during list operation")]
    List(#[source] BlobberError),

    #[error("interrupted")]
    Interrupted,
}

impl SomebytesErr {
    /// Every failing stage exits with its own status so scripts can tell them apart.
    pub fn exit_code(&self) -> u8 {
        match self {
            SomebytesErr::Args(_) => 1,
            SomebytesErr::BucketMissing | SomebytesErr::BucketUrl(_) => 2,
            SomebytesErr::Credentials(_) => 3,
            SomebytesErr::OpenBucket { .. } => 4,
            SomebytesErr::Blobber(_) => 5,
            SomebytesErr::Create(_) => 6,
            SomebytesErr::List(_) => 7,
            SomebytesErr::Interrupted => 130,
        }
    }
}

/// Renders an error followed by each of its causes, `outer: inner: root`.
pub fn error_chain(err: &dyn StdError) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}
