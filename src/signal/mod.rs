/* src/signal/mod.rs */

//!
//! Change notification for one configuration file.
//!
//! [`Watcher`] turns OS-level notifications into a single [`EventStream`] of
//! [`Event`]s for one path. Watch-level errors are logged and never end the
//! stream; the stream ends only when the watcher is stopped or dropped.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

mod watcher;
mod worker;

pub use watcher::{EventStream, Watcher};

/// Custom error type for the signal module.
#[derive(thiserror::Error, Debug)]
pub enum SignalError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Notify error: {0}")]
	Notify(#[from] notify::Error),

	#[error("Invalid configuration: {0}")]
	Config(String),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, SignalError>;

/// Configuration for the watcher behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Specific event kinds to listen for. `None` forwards all of them.
	pub listen_events: Option<Vec<EventKind>>,
}

impl Config {
	pub(crate) fn allows(&self, kind: EventKind) -> bool {
		match &self.listen_events {
			None => true,
			Some(list) => list.contains(&kind),
		}
	}
}

/// The kind of filesystem event we care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
	/// File was created (or renamed into place).
	Create,
	/// File content was modified.
	Modify,
	/// File was removed (or renamed away).
	Remove,
}

/// A simplified, high-level filesystem event.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Event {
	/// The watched file.
	pub path: PathBuf,
	pub kind: EventKind,
}
