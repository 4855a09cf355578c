use clap::Parser;
use uuid::Uuid;

use autocaris_sync::utils::{logger, validation::Validate};
use autocaris_sync::{CliConfig, FeedPipeline, LocalStorage, Outcome, SyncEngine};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting autocaris-sync CLI");

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(2);
    }

    // One id per run; it travels into storage metadata.
    let invocation_id = Uuid::new_v4().to_string();

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = FeedPipeline::new(storage, config);
    let engine = SyncEngine::new(pipeline);

    let result = engine.run(&invocation_id).await;

    if result.is_success() {
        println!("✅ {}", result.message);
        return Ok(());
    }

    eprintln!("❌ {}", result.message);
    let exit_code = match result.outcome {
        Outcome::Success => 0,
        Outcome::ClientError | Outcome::TransportError => 1,
        Outcome::ValidationError => 2,
        Outcome::InternalError => 3,
    };
    std::process::exit(exit_code);
}
