use std::path::PathBuf;
use std::str::FromStr;
use crate::error::BucketUrlError;
use crate::local_store::LocalBucket;
use crate::s3_store::S3Bucket;
use crate::store::BlobBucket;

/// Where a bucket lives, parsed from the identifier given on the command line.
///
/// `file:///some/dir` selects a local directory, `s3://name` or a bare `name`
/// selects an S3 bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketUrl {
    Local(PathBuf),
    S3(String),
}

impl BucketUrl {
    pub fn parse(s: &str) -> Result<Self, BucketUrlError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(BucketUrlError::Empty);
        }

        if let Some(path) = s.strip_prefix("file://") {
            if path.is_empty() {
                return Err(BucketUrlError::Empty);
            }
            return Ok(BucketUrl::Local(PathBuf::from(path)));
        }

        if let Some(name) = s.strip_prefix("s3://") {
            let name = name.trim_end_matches('/');
            if name.is_empty() {
                return Err(BucketUrlError::Empty);
            }
            return Ok(BucketUrl::S3(name.to_string()));
        }

        if let Some((scheme, _)) = s.split_once("://") {
            return Err(BucketUrlError::UnsupportedScheme(scheme.to_string()));
        }

        Ok(BucketUrl::S3(s.to_string()))
    }
}

impl FromStr for BucketUrl {
    type Err = BucketUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BucketUrl::parse(s)
    }
}

#[derive(Debug, Clone)]
pub enum Buckets {
    Local(LocalBucket),
    S3(S3Bucket),
}

impl Buckets {
    /// Returns a reference to the inner value as a trait object.
    pub fn as_bucket(&self) -> &dyn BlobBucket {
        match self {
            Buckets::Local(a) => a,
            Buckets::S3(b) => b,
        }
    }
}
