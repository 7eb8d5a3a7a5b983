//! Storage side of `somebytes`: the [`Blobber`] façade, the Lorem Ipsum content
//! generator and the bucket backends it can run against.

pub mod blobber;
pub mod bucket;
pub mod error;
pub mod local_store;
pub mod lorem_ipsum;
pub mod s3_store;
pub mod store;

pub use blobber::{Blobber, BlobberBuilder, Object};
pub use bucket::{BucketUrl, Buckets};
pub use error::{BlobberError, BucketUrlError, GenerateError};
pub use local_store::LocalBucket;
pub use lorem_ipsum::{Generator, LoremIpsum};
pub use s3_store::{S3Bucket, S3Options};
pub use store::{BlobBucket, BlobResult, BlobWriter, ListCursor, ListObject};
