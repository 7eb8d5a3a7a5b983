mod errors;
mod params;

use std::process::ExitCode;
use blob_store::s3_store::{create_s3_client, load_sdk_config, resolve_credentials};
use blob_store::{Blobber, BucketUrl, Buckets, LocalBucket, LoremIpsum, S3Bucket, S3Options};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use crate::errors::{error_chain, SomebytesErr};
use crate::params::{resolve_bucket, Args, BUCKET_ENV};


/// Opens the bucket behind `url`. S3 credentials are resolved first so that a
/// missing setup is reported separately from an unreachable bucket.
async fn open_bucket(url: &BucketUrl, options: &S3Options) -> Result<Buckets, SomebytesErr> {
    match url {
        BucketUrl::Local(path) => LocalBucket::open(path.clone())
            .await
            .map(Buckets::Local)
            .map_err(|source| SomebytesErr::OpenBucket {
                bucket: path.display().to_string(),
                source,
            }),
        BucketUrl::S3(name) => {
            let sdk_config = load_sdk_config(options).await;
            resolve_credentials(&sdk_config)
                .await
                .map_err(SomebytesErr::Credentials)?;

            let s3_client = create_s3_client(&sdk_config, options);
            S3Bucket::open(s3_client, name.clone())
                .await
                .map(Buckets::S3)
                .map_err(|source| SomebytesErr::OpenBucket {
                    bucket: name.clone(),
                    source,
                })
        }
    }
}

async fn run(args: &Args, bucket: Option<String>) -> Result<(), SomebytesErr> {
    let bucket = bucket.ok_or(SomebytesErr::BucketMissing)?;
    let url = BucketUrl::parse(&bucket)?;

    let buckets = open_bucket(&url, &args.s3_options()).await?;
    tracing::info!("opened bucket {:?}", url);

    let blobber = Blobber::builder()
        .generator(LoremIpsum::new())
        .bucket(buckets.as_bucket())
        .build()
        .map_err(SomebytesErr::Blobber)?;

    if let Some(number) = args.number {
        tracing::info!(number, "creating multiple objects up to limit");
        blobber
            .create_objects(number)
            .await
            .map_err(SomebytesErr::Create)?;
    }

    if let Some(bytes) = args.bytes {
        tracing::info!(bytes, "listing objects greater than bytes threshold");
        let objects = blobber
            .list_objects(bytes)
            .await
            .map_err(SomebytesErr::List)?;

        for o in &objects {
            tracing::info!(key = %o.key, size = o.size, "object above threshold");
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(SomebytesErr::Args(e).exit_code());
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let bucket = resolve_bucket(std::env::var(BUCKET_ENV).ok(), args.bucket.clone());

    let result = tokio::select! {
        res = run(&args, bucket) => res,
        _ = tokio::signal::ctrl_c() => Err(SomebytesErr::Interrupted),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", error_chain(&err));
            ExitCode::from(err.exit_code())
        }
    }
}
