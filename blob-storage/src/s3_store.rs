use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::Object;
use aws_sdk_s3::Client as S3Client;
use crate::store::{BlobBucket, BlobResult, BlobWriter, ListCursor, ListObject};

/// Client settings for AWS S3 or an S3-compatible server such as MinIO.
#[derive(Clone, Debug, Default)]
pub struct S3Options {
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    /// MinIO and most self-hosted servers need path-style addressing.
    pub force_path_style: bool,
}

/// Loads the shared AWS configuration from the standard environment chain.
pub async fn load_sdk_config(options: &S3Options) -> SdkConfig {
    let region_provider = RegionProviderChain::first_try(options.region.clone().map(Region::new))
        .or_default_provider()
        .or_else("us-east-1");
    aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await
}

/// Resolves credentials once up front so a missing or broken setup is reported
/// before the bucket is touched.
pub async fn resolve_credentials(sdk_config: &SdkConfig) -> BlobResult<()> {
    let provider = sdk_config
        .credentials_provider()
        .ok_or("no AWS credentials provider is configured")?;
    provider.provide_credentials().await?;
    Ok(())
}

pub fn create_s3_client(sdk_config: &SdkConfig, options: &S3Options) -> S3Client {
    let mut builder = Builder::from(sdk_config);
    if let Some(endpoint_url) = &options.endpoint_url {
        builder = builder.endpoint_url(endpoint_url);
    }
    if options.force_path_style {
        builder = builder.force_path_style(true);
    }
    S3Client::from_conf(builder.build())
}

/// A `BlobBucket` implementation over an S3 bucket.
#[derive(Clone, Debug)]
pub struct S3Bucket {
    s3_client: S3Client,
    bucket: String,
}

impl S3Bucket {
    /// Opens `bucket`, checking that it exists and is reachable with the
    /// client's credentials.
    pub async fn open(s3_client: S3Client, bucket: impl Into<String>) -> BlobResult<Self> {
        let bucket = bucket.into();
        s3_client.head_bucket().bucket(&bucket).send().await?;
        Ok(Self { s3_client, bucket })
    }

    pub fn name(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl BlobBucket for S3Bucket {
    async fn new_writer(&self, key: &str) -> BlobResult<Box<dyn BlobWriter>> {
        Ok(Box::new(S3Writer {
            s3_client: self.s3_client.clone(),
            bucket: self.bucket.clone(),
            key: key.to_string(),
            buffer: Vec::new(),
        }))
    }

    fn list(&self) -> Box<dyn ListCursor + '_> {
        Box::new(S3Cursor {
            bucket: self,
            page: Vec::new().into_iter(),
            continuation_token: None,
            exhausted: false,
        })
    }
}

/// Buffers everything written and uploads it in a single `PutObject` on close.
struct S3Writer {
    s3_client: S3Client,
    bucket: String,
    key: String,
    buffer: Vec<u8>,
}

#[async_trait]
impl BlobWriter for S3Writer {
    async fn write(&mut self, data: &[u8]) -> BlobResult<usize> {
        self.buffer.extend_from_slice(data);
        Ok(data.len())
    }

    async fn close(self: Box<Self>) -> BlobResult<()> {
        let S3Writer { s3_client, bucket, key, buffer } = *self;
        tracing::debug!("uploading {} bytes to s3://{}/{}", buffer.len(), bucket, key);
        s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type("text/plain; charset=utf-8")
            .body(ByteStream::from(buffer))
            .send()
            .await?;
        Ok(())
    }
}

/// Walks `ListObjectsV2` pages lazily, following continuation tokens.
struct S3Cursor<'a> {
    bucket: &'a S3Bucket,
    page: std::vec::IntoIter<ListObject>,
    continuation_token: Option<String>,
    exhausted: bool,
}

#[async_trait]
impl<'a> ListCursor for S3Cursor<'a> {
    async fn next(&mut self) -> BlobResult<Option<ListObject>> {
        loop {
            if let Some(obj) = self.page.next() {
                return Ok(Some(obj));
            }
            if self.exhausted {
                return Ok(None);
            }

            let output = self
                .bucket
                .s3_client
                .list_objects_v2()
                .bucket(&self.bucket.bucket)
                .set_continuation_token(self.continuation_token.take())
                .send()
                .await?;

            self.page = to_list_objects(output.contents()).into_iter();
            self.continuation_token = output.next_continuation_token().map(str::to_owned);
            self.exhausted =
                !output.is_truncated().unwrap_or(false) || self.continuation_token.is_none();
        }
    }
}

fn to_list_objects(contents: &[Object]) -> Vec<ListObject> {
    contents
        .iter()
        .filter_map(|obj| Some(ListObject::new(obj.key()?, obj.size().unwrap_or(0))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_page_conversion_keeps_order_and_defaults_size() {
        let contents = vec![
            Object::builder().key("b").size(1025).build(),
            Object::builder().size(7).build(),
            Object::builder().key("a").build(),
        ];

        assert_eq!(
            to_list_objects(&contents),
            vec![ListObject::new("b", 1025), ListObject::new("a", 0)]
        );
    }

    // Needs credentials in the environment and an existing bucket named by
    // SOMEBYTES_TEST_BUCKET (plus SOMEBYTES_ENDPOINT_URL for MinIO and friends).
    #[tokio::test]
    #[ignore]
    async fn test_write_then_list() {
        let bucket_name = std::env::var("SOMEBYTES_TEST_BUCKET").expect("SOMEBYTES_TEST_BUCKET must be set");
        let options = S3Options {
            endpoint_url: std::env::var("SOMEBYTES_ENDPOINT_URL").ok(),
            force_path_style: true,
            ..Default::default()
        };
        let sdk_config = load_sdk_config(&options).await;
        let bucket = S3Bucket::open(create_s3_client(&sdk_config, &options), bucket_name)
            .await
            .expect("failed to open bucket");

        let key = format!("test-{}.txt", Uuid::new_v4());
        let data = b"this is test data";
        let mut writer = bucket.new_writer(&key).await.unwrap();
        assert_eq!(writer.write(data).await.unwrap(), data.len());
        writer.close().await.expect("upload failed");

        let mut cursor = bucket.list();
        let mut found = None;
        while let Some(obj) = cursor.next().await.unwrap() {
            if obj.key == key {
                found = Some(obj);
            }
        }
        assert_eq!(found, Some(ListObject::new(key.clone(), data.len() as i64)));

        bucket.s3_client.delete_object().bucket(bucket.name()).key(&key).send().await.expect("deleted");
    }
}
