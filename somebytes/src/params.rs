use clap::Parser;
use blob_store::S3Options;

pub const BUCKET_ENV: &str = "SOMEBYTES_BUCKET";

#[derive(Parser, Debug)]
#[command(
    name = "somebytes",
    version,
    about = "create and query objects in a supported object/blob storage bucket",
    allow_negative_numbers = true,
    after_help = "The SOMEBYTES_BUCKET environment variable, when set, is used instead of [BUCKET]."
)]
pub struct Args {
    /// Bucket name, s3://name or file:///path/to/dir
    pub(crate) bucket: Option<String>,

    /// Create NUMBER objects (10 when given without a value, e.g. `-c` or `-c=25`)
    #[arg(short = 'c', long = "number", value_name = "NUMBER", num_args = 0..=1, require_equals = true, default_missing_value = "10")]
    pub(crate) number: Option<i64>,

    /// List objects of at least BYTES bytes (1024 when given without a value)
    #[arg(short = 'l', long = "bytes", value_name = "BYTES", num_args = 0..=1, require_equals = true, default_missing_value = "1024")]
    pub(crate) bytes: Option<i64>,

    /// Custom S3 endpoint, for MinIO and other S3-compatible servers
    #[arg(long, env = "SOMEBYTES_ENDPOINT_URL")]
    pub(crate) endpoint_url: Option<String>,

    #[arg(long, env = "SOMEBYTES_REGION")]
    pub(crate) region: Option<String>,

    /// Address buckets by path instead of virtual host
    #[arg(long, env = "SOMEBYTES_FORCE_PATH_STYLE")]
    pub(crate) force_path_style: bool,
}

impl Args {
    pub fn s3_options(&self) -> S3Options {
        S3Options {
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
            force_path_style: self.force_path_style,
        }
    }
}

/// The environment wins over the positional argument; empty values count as unset.
pub fn resolve_bucket(from_env: Option<String>, from_args: Option<String>) -> Option<String> {
    from_env
        .filter(|b| !b.is_empty())
        .or(from_args)
        .filter(|b| !b.is_empty())
}
