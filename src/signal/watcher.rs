/* src/signal/watcher.rs */

use std::path::{Path, PathBuf};

use futures_util::Stream;
use notify::{RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use super::worker::EventFilter;
use super::{Config, Event, Result, SignalError};
use crate::store::Suppression;

/// Watches a single file and feeds an [`EventStream`].
///
/// The parent directory is watched non-recursively and events are filtered
/// down to the target, so editors that save by renaming a temp file over the
/// target are still observed.
pub struct Watcher {
	inner: Option<RecommendedWatcher>,
	path: PathBuf,
}

impl Watcher {
	/// Creates a new Watcher and starts monitoring immediately.
	///
	/// While `suppression` is raised, changes are not reported.
	pub fn new(
		path: impl Into<PathBuf>,
		config: Config,
		suppression: Option<Suppression>,
	) -> Result<(Self, EventStream)> {
		let path = path.into();
		let file_name = path
			.file_name()
			.ok_or_else(|| SignalError::Config(format!("Not a file path: {:?}", path)))?
			.to_os_string();

		let parent = match path.parent() {
			Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
			_ => PathBuf::from("."),
		};

		if !parent.exists() {
			return Err(SignalError::Config(format!(
				"Path does not exist: {:?}",
				parent
			)));
		}

		let root = parent.canonicalize()?;
		let target = root.join(file_name);

		let (tx, rx) = mpsc::unbounded_channel();
		let filter = EventFilter {
			target: target.clone(),
			config,
			suppression,
		};

		let mut inner = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
			match res {
				Ok(event) => {
					if let Some(event) = filter.classify(event) {
						let _ = tx.send(event);
					}
				}
				Err(e) => tracing::warn!(error = %e, "watch error"),
			}
		})?;

		inner.watch(&root, RecursiveMode::NonRecursive)?;
		tracing::debug!(path = ?target, "watcher registered");

		Ok((
			Self {
				inner: Some(inner),
				path: target,
			},
			EventStream {
				inner: UnboundedReceiverStream::new(rx),
			},
		))
	}

	/// The canonical path being watched.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Returns true until [`stop`](Self::stop) is called.
	pub fn is_active(&self) -> bool {
		self.inner.is_some()
	}

	/// Tears down the OS watch. The paired stream ends once pending events drain.
	pub fn stop(&mut self) {
		if self.inner.take().is_some() {
			tracing::debug!(path = ?self.path, "watcher stopped");
		}
	}
}

impl std::fmt::Debug for Watcher {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Watcher")
			.field("path", &self.path)
			.field("active", &self.is_active())
			.finish()
	}
}

/// Infinite stream of change events for one file.
///
/// Ends only when the paired [`Watcher`] is stopped or dropped.
pub struct EventStream {
	inner: UnboundedReceiverStream<Event>,
}

impl Stream for EventStream {
	type Item = Event;

	fn poll_next(
		mut self: std::pin::Pin<&mut Self>,
		cx: &mut std::task::Context<'_>,
	) -> std::task::Poll<Option<Self::Item>> {
		std::pin::Pin::new(&mut self.inner).poll_next(cx)
	}
}
