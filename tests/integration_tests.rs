use anyhow::Result;
use httpmock::prelude::*;
use tempfile::TempDir;
use uuid::Uuid;

use autocaris_sync::{CliConfig, FeedPipeline, LocalStorage, Outcome, SyncEngine};

fn feed_config(endpoint: String, output_path: String) -> CliConfig {
    CliConfig {
        endpoint,
        feed_name: "dealer".to_string(),
        feed_password: "secret".to_string(),
        feed_account_id: "42".to_string(),
        output_path,
        object_key: "inzeraty/inzeraty_usti.xml".to_string(),
        timeout_secs: 5,
        min_payload_bytes: 100,
        timestamped_keys: false,
        verbose: false,
    }
}

fn sample_feed() -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<inzeraty>\n");
    for i in 1..=10 {
        xml.push_str(&format!(
            "  <inzerat><id>{}</id><znacka>Skoda</znacka><model>Octavia</model></inzerat>\n",
            i
        ));
    }
    xml.push_str("</inzeraty>\n");
    xml
}

#[tokio::test]
async fn test_end_to_end_feed_sync_stores_xml() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let feed = sample_feed();

    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/downloadcontent/cars.php")
            .header("content-type", "application/x-www-form-urlencoded")
            .header(
                "user-agent",
                concat!("autocaris-sync/", env!("CARGO_PKG_VERSION")),
            )
            .body("name=dealer&password=secret&id=42");
        then.status(200)
            .header("Content-Type", "application/xml")
            .body(&feed);
    });

    let config = feed_config(server.url("/downloadcontent/cars.php"), output_path.clone());
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = FeedPipeline::new(storage, config);
    let engine = SyncEngine::new(pipeline);

    let invocation_id = Uuid::new_v4().to_string();
    let result = engine.run(&invocation_id).await;

    api_mock.assert();
    assert_eq!(result.outcome, Outcome::Success);
    assert_eq!(result.status_code, 200);
    assert_eq!(result.bytes, Some(feed.len()));
    assert_eq!(result.key.as_deref(), Some("inzeraty/inzeraty_usti.xml"));

    let stored = std::fs::read(temp_dir.path().join("inzeraty/inzeraty_usti.xml"))?;
    assert_eq!(stored, feed.as_bytes());

    Ok(())
}

#[tokio::test]
async fn test_end_to_end_rerun_overwrites_same_object() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let feed = sample_feed();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/downloadcontent/cars.php");
        then.status(200)
            .header("Content-Type", "application/xml")
            .body(&feed);
    });

    let config = feed_config(server.url("/downloadcontent/cars.php"), output_path.clone());
    let storage = LocalStorage::new(output_path.clone());
    let engine = SyncEngine::new(FeedPipeline::new(storage, config));

    let first = engine.run(&Uuid::new_v4().to_string()).await;
    let second = engine.run(&Uuid::new_v4().to_string()).await;

    assert_eq!(api_mock.hits(), 2);
    assert_eq!(first.outcome, Outcome::Success);
    assert_eq!(second.outcome, Outcome::Success);
    assert_eq!(first.bytes, second.bytes);

    // One object on disk, content from the latest run.
    let feed_dir = temp_dir.path().join("inzeraty");
    let entries: Vec<_> = std::fs::read_dir(&feed_dir)?.collect();
    assert_eq!(entries.len(), 1);
    let stored = std::fs::read(feed_dir.join("inzeraty_usti.xml"))?;
    assert_eq!(stored, feed.as_bytes());

    Ok(())
}

#[tokio::test]
async fn test_end_to_end_timestamped_keys_use_stamped_names() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/downloadcontent/cars.php");
        then.status(200).body(sample_feed());
    });

    let mut config = feed_config(server.url("/downloadcontent/cars.php"), output_path.clone());
    config.timestamped_keys = true;

    let storage = LocalStorage::new(output_path.clone());
    let engine = SyncEngine::new(FeedPipeline::new(storage, config));

    let result = engine.run(&Uuid::new_v4().to_string()).await;

    assert_eq!(result.outcome, Outcome::Success);
    let key = result.key.unwrap();
    assert!(key.starts_with("inzeraty/inzeraty_usti_"));
    assert!(key.ends_with(".xml"));
    assert!(temp_dir.path().join(&key).exists());

    Ok(())
}

#[tokio::test]
async fn test_end_to_end_auth_rejection_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    // Endpoint answers 200 but with a stub body, the way the feed reacts to
    // bad credentials.
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/downloadcontent/cars.php");
        then.status(200).body("<chyba/>");
    });

    let config = feed_config(server.url("/downloadcontent/cars.php"), output_path.clone());
    let storage = LocalStorage::new(output_path.clone());
    let engine = SyncEngine::new(FeedPipeline::new(storage, config));

    let result = engine.run(&Uuid::new_v4().to_string()).await;

    api_mock.assert();
    assert_eq!(result.outcome, Outcome::ValidationError);
    assert_eq!(result.status_code, 400);
    assert!(!temp_dir.path().join("inzeraty").exists());

    Ok(())
}

#[tokio::test]
async fn test_end_to_end_remote_failure_propagates_status() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/downloadcontent/cars.php");
        then.status(503);
    });

    let config = feed_config(server.url("/downloadcontent/cars.php"), output_path.clone());
    let storage = LocalStorage::new(output_path.clone());
    let engine = SyncEngine::new(FeedPipeline::new(storage, config));

    let result = engine.run(&Uuid::new_v4().to_string()).await;

    api_mock.assert();
    assert_eq!(result.outcome, Outcome::ClientError);
    assert_eq!(result.status_code, 503);
    assert!(!temp_dir.path().join("inzeraty").exists());

    Ok(())
}

#[tokio::test]
async fn test_end_to_end_missing_credentials_never_hit_network() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/downloadcontent/cars.php");
        then.status(200).body(sample_feed());
    });

    let mut config = feed_config(server.url("/downloadcontent/cars.php"), output_path.clone());
    config.feed_account_id = String::new();

    let storage = LocalStorage::new(output_path.clone());
    let engine = SyncEngine::new(FeedPipeline::new(storage, config));

    let result = engine.run(&Uuid::new_v4().to_string()).await;

    assert_eq!(result.outcome, Outcome::ValidationError);
    assert_eq!(result.status_code, 400);
    api_mock.assert_hits(0);
    assert!(!temp_dir.path().join("inzeraty").exists());

    Ok(())
}
