/* src/lib.rs */

//!
//! A typed configuration store that keeps one value in sync with one file.
//!
//! This crate integrates four components:
//!
//! - **format**: Stateless encoders for JSON, YAML and TOML.
//! - **store**: Locked, file-backed persistence with silent (unwatched) saves.
//! - **signal**: Change notification for a single file.
//! - **controller**: [`Live`](controller::Live), which owns the value, its
//!   validators, and the reload loop that reverts or warns on invalid edits.
//!
//! ## Feature Flags
//!
//! - `full` (default): Enables all features.
//! - `json`, `yaml`, `toml`: Format encoders.
//! - `signal`: Filesystem watching and live reload.
//! - `events`: Broadcasts live value replacements.
//! - `validate`: Bridges `validator::Validate` derives into validators.
//!
//! ## Basic Usage
//!
//! ```no_run
//! # #[cfg(all(feature = "json", feature = "signal"))]
//! # async fn demo() -> Result<(), livecfg::controller::LiveError> {
//! use livecfg::controller::{Live, ValidationError, ValidationPolicy};
//! use livecfg::format::FileType;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct AppConfig {
//!     port: i64,
//! }
//!
//! let live = Live::builder()
//!     .format(FileType::Json)
//!     .root_dir("/etc/myapp")
//!     .name("config")
//!     .watch(true)
//!     .policy(ValidationPolicy::Revert)
//!     .validator(|c: &AppConfig| {
//!         if c.port > 0 { Ok(()) } else { Err(ValidationError::new("port", "must be positive")) }
//!     })
//!     .build(AppConfig { port: 8080 })
//!     .await?;
//!
//! println!("port = {}", live.get().port);
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod format;
pub mod holder;
#[cfg(feature = "signal")]
pub mod signal;
pub mod store;

pub use controller::{Live, LiveError, LiveOptions, ValidationError, ValidationPolicy};
pub use format::FileType;
