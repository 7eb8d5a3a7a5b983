use std::path::{Path, PathBuf};
use async_trait::async_trait;
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use crate::store::{BlobBucket, BlobResult, BlobWriter, ListCursor, ListObject};

/// A bucket backed by a single directory on the local filesystem. Every regular
/// file directly inside the directory is an object; the file name is its key.
#[derive(Clone, Debug)]
pub struct LocalBucket {
    base_path: PathBuf,
}

impl LocalBucket {
    /// Opens `base_path` as a bucket. The directory has to exist already.
    pub async fn open(base_path: impl Into<PathBuf>) -> BlobResult<Self> {
        let base_path = base_path.into();
        let metadata = fs::metadata(&base_path).await?;
        if !metadata.is_dir() {
            return Err(format!("{} is not a directory", base_path.display()).into());
        }
        Ok(Self { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn object_path(&self, key: &str) -> BlobResult<PathBuf> {
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
            return Err(format!("invalid object key {key:?}").into());
        }
        Ok(self.base_path.join(key))
    }
}

#[async_trait]
impl BlobBucket for LocalBucket {
    async fn new_writer(&self, key: &str) -> BlobResult<Box<dyn BlobWriter>> {
        let file_path = self.object_path(key)?;
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(file_path)
            .await?;
        Ok(Box::new(LocalWriter { file }))
    }

    fn list(&self) -> Box<dyn ListCursor + '_> {
        Box::new(LocalCursor {
            base_path: &self.base_path,
            entries: None,
        })
    }
}

struct LocalWriter {
    file: File,
}

#[async_trait]
impl BlobWriter for LocalWriter {
    async fn write(&mut self, data: &[u8]) -> BlobResult<usize> {
        self.file.write_all(data).await?;
        Ok(data.len())
    }

    async fn close(mut self: Box<Self>) -> BlobResult<()> {
        self.file.flush().await?;
        self.file.sync_all().await?;
        Ok(())
    }
}

/// Reads the directory on the first pull, then hands entries out in key order.
struct LocalCursor<'a> {
    base_path: &'a Path,
    entries: Option<std::vec::IntoIter<ListObject>>,
}

#[async_trait]
impl<'a> ListCursor for LocalCursor<'a> {
    async fn next(&mut self) -> BlobResult<Option<ListObject>> {
        if self.entries.is_none() {
            self.entries = Some(read_listing(self.base_path).await?.into_iter());
        }
        Ok(self.entries.as_mut().and_then(Iterator::next))
    }
}

async fn read_listing(base_path: &Path) -> BlobResult<Vec<ListObject>> {
    let mut dir = fs::read_dir(base_path).await?;
    let mut objects = Vec::new();
    while let Some(entry) = dir.next_entry().await? {
        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }
        let Some(key) = entry.file_name().to_str().map(str::to_owned) else {
            tracing::warn!("skipping file with a non UTF-8 name: {:?}", entry.path());
            continue;
        };
        objects.push(ListObject::new(key, i64::try_from(metadata.len())?));
    }
    objects.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(objects)
}
