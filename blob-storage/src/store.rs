use std::error::Error;
use async_trait::async_trait;


pub type BlobResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// An entry yielded while listing a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListObject {
    pub key: String,
    /// Size of the stored blob in bytes.
    pub size: i64,
}

impl ListObject {
    pub fn new(key: impl Into<String>, size: i64) -> Self {
        Self { key: key.into(), size }
    }
}

/// The narrow slice of a storage bucket the rest of the crate relies on.
///
/// Real backends carry a much larger surface; keeping this to `new_writer` and
/// `list` lets tests swap in a double without reimplementing any of it.
#[async_trait]
pub trait BlobBucket: Send + Sync {
    /// Opens a write stream for `key`. The object is only guaranteed to be stored
    /// once the returned writer has been closed successfully.
    async fn new_writer(&self, key: &str) -> BlobResult<Box<dyn BlobWriter>>;

    /// Starts a fresh listing of every object in the bucket.
    fn list(&self) -> Box<dyn ListCursor + '_>;
}

#[async_trait]
pub trait BlobWriter: Send {
    /// Writes `data` and reports how many bytes were accepted.
    async fn write(&mut self, data: &[u8]) -> BlobResult<usize>;

    async fn close(self: Box<Self>) -> BlobResult<()>;
}

/// Pull-style cursor over a bucket listing.
#[async_trait]
pub trait ListCursor: Send {
    /// Returns the next object, or `Ok(None)` once the listing is exhausted.
    async fn next(&mut self) -> BlobResult<Option<ListObject>>;
}
