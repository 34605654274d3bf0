/* tests/integration.rs */

#![cfg(all(feature = "json", feature = "signal"))]

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use livecfg::controller::{Live, ValidationError, ValidationPolicy};
use livecfg::format::FileType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AppConfig {
	name: String,
	server: Server,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Server {
	port: i64,
}

fn app(port: i64) -> AppConfig {
	AppConfig {
		name: "MyApp".to_string(),
		server: Server { port },
	}
}

fn port_positive(c: &AppConfig) -> Result<(), ValidationError> {
	if c.server.port > 0 {
		Ok(())
	} else {
		Err(ValidationError::new("server.port", "must be positive"))
	}
}

fn file_port(path: &Path) -> Option<i64> {
	let text = std::fs::read_to_string(path).ok()?;
	serde_json::from_str::<AppConfig>(&text)
		.ok()
		.map(|c| c.server.port)
}

async fn write_external(path: &Path, value: &AppConfig) {
	tokio::fs::write(path, serde_json::to_vec_pretty(value).unwrap())
		.await
		.unwrap();
}

/// Polls for up to 5 seconds.
async fn wait_for(mut check: impl FnMut() -> bool) -> bool {
	for _ in 0..50 {
		if check() {
			return true;
		}
		tokio::time::sleep(Duration::from_millis(100)).await;
	}
	check()
}

async fn watched(dir: &Path, policy: ValidationPolicy) -> Live<AppConfig> {
	Live::builder()
		.format(FileType::Json)
		.root_dir(dir)
		.name("config")
		.watch(true)
		.policy(policy)
		.validator(port_positive)
		.build(app(8080))
		.await
		.unwrap()
}

#[tokio::test]
async fn test_live_reload() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	let live = watched(dir.path(), ValidationPolicy::Revert).await;
	assert!(live.is_watching());

	write_external(live.path(), &app(9000)).await;

	assert!(wait_for(|| live.get().server.port == 9000).await);
	Ok(())
}

#[tokio::test]
async fn test_revert_restores_last_good_file() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	let live = watched(dir.path(), ValidationPolicy::Revert).await;

	live.modify(|c| c.server.port = 9090);
	live.save().await?;
	assert!(wait_for(|| file_port(live.path()) == Some(9090)).await);
	tokio::time::sleep(Duration::from_millis(300)).await;

	write_external(live.path(), &app(-1)).await;

	let path = live.path().to_path_buf();
	assert!(wait_for(|| file_port(&path) == Some(9090)).await);
	assert_eq!(live.get().server.port, 9090);
	Ok(())
}

#[tokio::test]
async fn test_warn_keeps_invalid_edit() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	let live = watched(dir.path(), ValidationPolicy::Warn).await;

	write_external(live.path(), &app(-1)).await;

	assert!(wait_for(|| live.get().server.port == -1).await);
	assert!(live.validate().is_err());
	assert_eq!(file_port(live.path()), Some(-1));
	Ok(())
}

/// Builds a watched controller whose validator records every port it checks.
async fn recorded(
	dir: &Path,
	grace: Duration,
) -> Result<(Live<AppConfig>, Arc<Mutex<Vec<i64>>>), Box<dyn std::error::Error>> {
	let seen = Arc::new(Mutex::new(Vec::new()));
	let record = seen.clone();

	let live = Live::builder()
		.root_dir(dir)
		.name("config")
		.watch(true)
		.revert_grace(grace)
		.validator(move |c: &AppConfig| {
			record.lock().unwrap().push(c.server.port);
			Ok(())
		})
		.validator(port_positive)
		.build(app(8080))
		.await?;
	Ok((live, seen))
}

#[tokio::test]
async fn test_revert_does_not_retrigger_itself() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	let (live, seen) = recorded(dir.path(), Duration::from_millis(100)).await?;

	write_external(live.path(), &app(-1)).await;

	let path = live.path().to_path_buf();
	assert!(wait_for(|| seen.lock().unwrap().contains(&-1)).await);
	assert!(wait_for(|| file_port(&path) == Some(8080)).await);

	// Late notifications for the revert write must not start a cycle.
	tokio::time::sleep(Duration::from_millis(1500)).await;
	let seen = seen.lock().unwrap().clone();
	assert!(!seen.contains(&8080), "revert was reloaded: {:?}", seen);
	assert_eq!(file_port(&path), Some(8080));
	assert_eq!(live.get().server.port, 8080);
	Ok(())
}

#[tokio::test]
async fn test_restart_during_revert_does_not_overlap_cycles() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	let (mut live, seen) = recorded(dir.path(), Duration::from_millis(400)).await?;

	write_external(live.path(), &app(-1)).await;
	// The revert is now waiting out its grace interval.
	assert!(wait_for(|| seen.lock().unwrap().contains(&-1)).await);

	live.stop_watching();
	live.start_watching()?;
	write_external(live.path(), &app(7000)).await;

	let path = live.path().to_path_buf();
	tokio::time::sleep(Duration::from_millis(1500)).await;
	assert_eq!(file_port(&path), Some(live.get().server.port));
	assert!(live.validate().is_ok());

	live.shutdown().await;
	Ok(())
}

#[tokio::test]
async fn test_loop_survives_malformed_edit() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	let errors = Arc::new(AtomicUsize::new(0));
	let seen = errors.clone();

	let live = Live::builder()
		.root_dir(dir.path())
		.name("config")
		.watch(true)
		.validator(port_positive)
		.on_error(move |_| {
			seen.fetch_add(1, Ordering::SeqCst);
		})
		.build(app(8080))
		.await?;

	tokio::fs::write(live.path(), b"{\"Name\": ").await?;
	assert!(wait_for(|| errors.load(Ordering::SeqCst) > 0).await);
	assert_eq!(live.get().server.port, 8080);

	write_external(live.path(), &app(7070)).await;
	assert!(wait_for(|| live.get().server.port == 7070).await);
	Ok(())
}

#[tokio::test]
async fn test_stop_watching_ignores_later_edits() -> Result<(), Box<dyn std::error::Error>> {
	let dir = tempfile::tempdir()?;
	let mut live = watched(dir.path(), ValidationPolicy::Revert).await;

	live.stop_watching();
	assert!(!live.is_watching());

	write_external(live.path(), &app(4242)).await;
	tokio::time::sleep(Duration::from_millis(500)).await;
	assert_eq!(live.get().server.port, 8080);

	live.start_watching()?;
	write_external(live.path(), &app(4343)).await;
	assert!(wait_for(|| live.get().server.port == 4343).await);

	live.shutdown().await;
	Ok(())
}

#[tokio::test]
async fn test_watch_starts_on_fresh_root() {
	let dir = tempfile::tempdir().unwrap();
	let root = dir.path().join("fresh");

	// Seeding creates the directory, so watching can start.
	let live = watched(&root, ValidationPolicy::Revert).await;
	assert!(live.is_watching());
	assert!(root.join("config.json").is_file());
}
