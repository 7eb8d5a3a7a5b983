use rand::Rng;
use crate::error::BlobberError;
use crate::lorem_ipsum::Generator;
use crate::store::BlobBucket;

/// An object found while listing, kept for display and testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub key: String,
    pub size: i64,
}

/// Key for a new object: `somebytes-<n>.txt`, with `n` a random 63-bit integer.
pub fn object_key() -> String {
    format!("somebytes-{}.txt", rand::thread_rng().gen_range(0..=i64::MAX))
}

/// Creates and lists objects in a bucket it borrows from the caller.
///
/// All storage access goes through [`BlobBucket`], so the bucket can be any
/// backend or a test double.
pub struct Blobber<'a> {
    generator: Box<dyn Generator + 'a>,
    bucket: &'a dyn BlobBucket,
}

#[derive(Default)]
pub struct BlobberBuilder<'a> {
    generator: Option<Box<dyn Generator + 'a>>,
    bucket: Option<&'a dyn BlobBucket>,
}

impl<'a> BlobberBuilder<'a> {
    pub fn generator(mut self, generator: impl Generator + 'a) -> Self {
        self.generator = Some(Box::new(generator));
        self
    }

    pub fn bucket(mut self, bucket: &'a dyn BlobBucket) -> Self {
        self.bucket = Some(bucket);
        self
    }

    /// Fails if either the generator or the bucket was never supplied.
    pub fn build(self) -> Result<Blobber<'a>, BlobberError> {
        let generator = self.generator.ok_or(BlobberError::MissingGenerator)?;
        let bucket = self.bucket.ok_or(BlobberError::MissingBucket)?;
        Ok(Blobber { generator, bucket })
    }
}

impl<'a> Blobber<'a> {
    pub fn builder() -> BlobberBuilder<'a> {
        BlobberBuilder::default()
    }

    /// Writes `count` objects with freshly generated keys and payloads, one after
    /// another. The first failing step aborts the run; objects already written
    /// stay in the bucket. A `count` of zero or less writes nothing.
    pub async fn create_objects(&self, count: i64) -> Result<(), BlobberError> {
        for _ in 0..count.max(0) {
            let key = object_key();

            let mut writer = self
                .bucket
                .new_writer(&key)
                .await
                .map_err(|source| BlobberError::Writer { key: key.clone(), source })?;

            let bytes = self.generator.generate()?;
            let expected = bytes.len();

            let written = writer
                .write(&bytes)
                .await
                .map_err(|source| BlobberError::Write { key: key.clone(), source })?;
            if written != expected {
                return Err(BlobberError::ShortWrite { key, expected, written });
            }

            writer
                .close()
                .await
                .map_err(|source| BlobberError::Close { key: key.clone(), source })?;

            tracing::debug!(key = %key, bytes = written, "created object");
        }

        Ok(())
    }

    /// Returns every object of at least `threshold` bytes, in the order the
    /// bucket lists them. A listing error discards whatever was collected.
    pub async fn list_objects(&self, threshold: i64) -> Result<Vec<Object>, BlobberError> {
        let mut objects = Vec::new();
        let mut cursor = self.bucket.list();
        while let Some(obj) = cursor.next().await.map_err(BlobberError::List)? {
            if obj.size >= threshold {
                objects.push(Object { key: obj.key, size: obj.size });
            }
        }
        Ok(objects)
    }
}
