#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "lambda")]
use autocaris_sync::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use autocaris_sync::{FeedPipeline, LambdaConfig, Outcome, S3Storage, SyncEngine};

#[cfg(feature = "lambda")]
#[derive(Deserialize)]
pub struct Request {
    pub endpoint: Option<String>,
    pub s3_bucket: Option<String>,
    pub s3_key: Option<String>,
}

#[cfg(feature = "lambda")]
#[derive(Serialize)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub outcome: Outcome,
    pub body: String,
}

#[cfg(feature = "lambda")]
async fn function_handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    tracing::info!("Starting feed sync Lambda function");

    // Event overrides win over the environment for this invocation.
    if let Some(endpoint) = &event.payload.endpoint {
        std::env::set_var("FEED_ENDPOINT", endpoint);
    }
    if let Some(bucket) = &event.payload.s3_bucket {
        std::env::set_var("S3_BUCKET", bucket);
    }
    if let Some(key) = &event.payload.s3_key {
        std::env::set_var("S3_KEY", key);
    }

    let lambda_config = LambdaConfig::from_env()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    lambda_config
        .validate()
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let region = Region::new(lambda_config.s3_region.clone());
    let s3_config = aws_sdk_s3::config::Builder::from(&config)
        .region(region)
        .build();
    let s3_client = S3Client::from_conf(s3_config);

    let storage = S3Storage::new(s3_client, lambda_config.s3_bucket.clone());
    let pipeline = FeedPipeline::new(storage, lambda_config);
    let engine = SyncEngine::new(pipeline);

    // The Lambda request id doubles as the invocation id in object metadata.
    let result = engine.run(&event.context.request_id).await;

    Ok(Response {
        status_code: result.status_code,
        outcome: result.outcome,
        body: result.message,
    })
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    run(service_fn(function_handler)).await
}
