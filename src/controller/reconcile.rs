/* src/controller/reconcile.rs */

//!
//! One reload → validate → policy cycle, and the loop that drives it per
//! change event.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use super::validation::Validators;
use super::{LiveError, ValidationError, ValidationPolicy};
use crate::holder::{Holder, Origin};
use crate::store::Store;

#[cfg(feature = "signal")]
use super::ErrorHook;
#[cfg(feature = "signal")]
use crate::signal::EventStream;
#[cfg(feature = "signal")]
use futures_util::StreamExt;
#[cfg(feature = "signal")]
use tokio::sync::oneshot;

/// Outcome of a single reconciliation cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled {
	/// The file was valid and is now the live value.
	Committed,
	/// The file was invalid and was rewritten with the last known-good value.
	Reverted(ValidationError),
	/// The file was invalid but its value was kept, with a warning.
	Warned(ValidationError),
}

pub(crate) struct Reconciler<T> {
	pub(crate) holder: Arc<Holder<T>>,
	pub(crate) store: Arc<Store>,
	pub(crate) validators: Arc<Validators<T>>,
	pub(crate) policy: ValidationPolicy,
	pub(crate) grace: Duration,
	/// Held for a whole cycle, so cycles from any loop or `reload` never overlap.
	pub(crate) cycle: Arc<Mutex<()>>,
}

impl<T> Reconciler<T>
where
	T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
	pub(crate) async fn reconcile(&self) -> Result<Reconciled, LiveError> {
		let _cycle = self.cycle.lock().await;
		let candidate: T = self.store.load().await?;
		self.settle(candidate).await
	}

	/// A cycle triggered by a change event. Returns `None` when the file only
	/// holds the content of our own last revert.
	#[cfg(feature = "signal")]
	async fn reconcile_external(&self) -> Result<Option<Reconciled>, LiveError> {
		let _cycle = self.cycle.lock().await;
		let Some(candidate) = self.store.load_external::<T>().await? else {
			tracing::trace!(path = ?self.store.path(), "file holds our own revert, skipping");
			return Ok(None);
		};
		self.settle(candidate).await.map(Some)
	}

	async fn settle(&self, candidate: T) -> Result<Reconciled, LiveError> {
		let rollback = self.holder.get();

		let Err(failure) = self.validators.check(&candidate) else {
			self.holder.replace(candidate, Origin::Reloaded);
			tracing::debug!(path = ?self.store.path(), "reloaded config");
			return Ok(Reconciled::Committed);
		};

		match self.policy {
			ValidationPolicy::Revert => {
				tracing::warn!(
					path = ?self.store.path(),
					field = %failure.field,
					"invalid config on disk, reverting: {}",
					failure.message
				);
				// Let a writer that is still saving finish before we contend on the file.
				tokio::time::sleep(self.grace).await;
				self.store.save_silent(&*rollback).await?;
				tracing::info!(path = ?self.store.path(), "restored last known-good config");
				Ok(Reconciled::Reverted(failure))
			}
			ValidationPolicy::Warn => {
				self.holder.replace(candidate, Origin::Reloaded);
				tracing::warn!(
					path = ?self.store.path(),
					field = %failure.field,
					"invalid config on disk, keeping it: {}",
					failure.message
				);
				Ok(Reconciled::Warned(failure))
			}
		}
	}

	/// Processes events one at a time until the stream closes or `stop` fires.
	///
	/// A failed cycle is logged and handed to `on_error`; it never ends the loop.
	#[cfg(feature = "signal")]
	pub(crate) async fn run(
		self,
		mut events: EventStream,
		mut stop: oneshot::Receiver<()>,
		on_error: Option<ErrorHook>,
	) {
		tracing::info!(path = ?self.store.path(), "started watching config");

		loop {
			let event = tokio::select! {
				biased;
				_ = &mut stop => break,
				event = events.next() => match event {
					Some(event) => event,
					None => break,
				},
			};

			tracing::debug!(path = ?event.path, kind = ?event.kind, "config change detected");

			if let Err(e) = self.reconcile_external().await {
				tracing::error!(path = ?self.store.path(), "failed to reconcile config: {}", e);
				if let Some(ref cb) = on_error {
					cb(e);
				}
			}
		}

		tracing::info!(path = ?self.store.path(), "stopped watching config");
	}
}
