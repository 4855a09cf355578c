pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

#[cfg(feature = "lambda")]
pub use config::lambda::{LambdaConfig, S3Storage};

pub use crate::core::{engine::SyncEngine, pipeline::FeedPipeline};
pub use domain::model::{InvocationResult, Outcome};
pub use utils::error::{FeedError, Result};
