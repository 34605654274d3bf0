/* src/controller/live.rs */

//!
//! Single-file configuration controller with live reloading.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::reconcile::Reconciler;
use super::validation::Validators;
use super::{
	ErrorHook, LiveBuilder, LiveError, LiveOptions, Reconciled, ValidationError, ValidationPolicy,
};
use crate::holder::{Holder, Meta, Origin};
use crate::store::Store;

#[cfg(feature = "signal")]
use super::WatchState;
#[cfg(feature = "signal")]
use crate::signal::{Config as WatcherConfig, Watcher};

/// A typed configuration value kept in sync with one file.
///
/// The file is seeded from the initial value when missing and loaded
/// otherwise. With watching on, external edits are reloaded, validated, and
/// either committed, reverted, or kept with a warning, depending on the
/// [`ValidationPolicy`].
///
/// Dropping the controller stops watching; a cycle already in progress runs
/// to completion in the background. At most one cycle runs at a time.
pub struct Live<T> {
	pub(super) holder: Arc<Holder<T>>,
	pub(super) store: Arc<Store>,
	pub(super) validators: Arc<Validators<T>>,
	pub(super) policy: ValidationPolicy,
	pub(super) revert_grace: Duration,
	pub(super) cycle: Arc<tokio::sync::Mutex<()>>,
	pub(super) on_error: Option<ErrorHook>,
	#[cfg(feature = "signal")]
	pub(super) watcher_config: WatcherConfig,
	#[cfg(feature = "signal")]
	pub(super) watch_state: Option<WatchState>,
}

impl<T> Live<T>
where
	T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
	pub fn builder() -> LiveBuilder<T> {
		LiveBuilder::new()
	}

	/// Builds a controller from options alone.
	pub async fn new(initial: T, options: LiveOptions) -> Result<Self, LiveError> {
		LiveBuilder::new().options(options).build(initial).await
	}

	/// Returns the current configuration value.
	pub fn get(&self) -> Arc<T> {
		self.holder.get()
	}

	/// Returns metadata about the current value.
	pub fn meta(&self) -> Meta {
		self.holder.meta()
	}

	/// Replaces the live value without validating it or touching the file.
	pub fn set(&self, value: T) {
		self.holder.replace(value, Origin::Set);
	}

	/// Edits a copy of the live value and installs it, unvalidated.
	///
	/// The file is not touched; call [`save`](Self::save) to persist.
	pub fn modify<F>(&self, f: F) -> Arc<T>
	where
		F: FnOnce(&mut T),
	{
		self.holder.modify(f, Origin::Set)
	}

	/// Appends a validator. Validators run in registration order.
	pub fn add_validator<F>(&self, f: F)
	where
		F: Fn(&T) -> Result<(), ValidationError> + Send + Sync + 'static,
	{
		self.validators.push(Arc::new(f));
	}

	/// Number of registered validators.
	pub fn validator_count(&self) -> usize {
		self.validators.len()
	}

	/// Runs the live value through every validator, stopping at the first failure.
	pub fn validate(&self) -> Result<(), ValidationError> {
		self.validators.check(&self.holder.get())
	}

	/// Installs `value` only if it passes every validator. The file is not touched.
	pub fn update(&self, value: T) -> Result<(), ValidationError> {
		self.validators.check(&value)?;
		self.holder.replace(value, Origin::Updated);
		Ok(())
	}

	/// Writes the live value to the file.
	pub async fn save(&self) -> Result<(), LiveError> {
		let value = self.holder.get();
		self.store.save(&*value).await?;
		Ok(())
	}

	/// Reads the file into the live value, without validation.
	pub async fn load(&self) -> Result<(), LiveError> {
		let value: T = self.store.load().await?;
		self.holder.replace(value, Origin::Loaded);
		Ok(())
	}

	/// Runs one reconciliation cycle now, as if the file had just changed.
	pub async fn reload(&self) -> Result<Reconciled, LiveError> {
		self.reconciler().reconcile().await
	}

	/// Encodes the live value in the file's format.
	pub fn to_string(&self) -> Result<String, LiveError> {
		Ok(self.store.to_string(&*self.holder.get())?)
	}

	/// Prints the encoded live value to stdout.
	pub fn print_config(&self) -> Result<(), LiveError> {
		let data = self.to_string()?;
		println!("{}", data);
		Ok(())
	}

	/// Path of the backing file.
	pub fn path(&self) -> &Path {
		self.store.path()
	}

	pub fn policy(&self) -> ValidationPolicy {
		self.policy
	}

	/// Pause before a revert rewrites the file.
	pub fn revert_grace(&self) -> Duration {
		self.revert_grace
	}

	/// Subscribes to live value replacements.
	#[cfg(feature = "events")]
	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<crate::holder::HoldEvent<T>> {
		self.holder.subscribe()
	}

	/// Starts the watcher and the background reconciliation loop.
	///
	/// Does nothing if already watching. Must be called inside a tokio runtime.
	#[cfg(feature = "signal")]
	pub fn start_watching(&mut self) -> Result<(), LiveError> {
		if self.watch_state.is_some() {
			return Ok(());
		}

		let (watcher, events) = Watcher::new(
			self.store.path(),
			self.watcher_config.clone(),
			Some(self.store.suppression()),
		)?;

		let (stop, stop_rx) = tokio::sync::oneshot::channel();
		let task = tokio::spawn(self.reconciler().run(events, stop_rx, self.on_error.clone()));

		self.watch_state = Some(WatchState {
			watcher,
			stop,
			task,
		});
		Ok(())
	}

	/// Stops the watcher. A cycle in progress finishes in the background;
	/// a loop started afterwards waits for it before running its own cycles.
	#[cfg(feature = "signal")]
	pub fn stop_watching(&mut self) {
		if let Some(state) = self.watch_state.take() {
			let WatchState {
				mut watcher, stop, ..
			} = state;
			let _ = stop.send(());
			watcher.stop();
		}
	}

	/// Returns true if the watcher is currently active.
	#[cfg(feature = "signal")]
	pub fn is_watching(&self) -> bool {
		self.watch_state.is_some()
	}

	/// Stops watching and waits for the in-flight cycle, if any, to finish.
	#[cfg(feature = "signal")]
	pub async fn shutdown(mut self) {
		if let Some(state) = self.watch_state.take() {
			let WatchState {
				mut watcher,
				stop,
				task,
			} = state;
			let _ = stop.send(());
			watcher.stop();
			if let Err(e) = task.await {
				tracing::warn!(path = ?self.store.path(), "watch task ended abnormally: {}", e);
			}
		}
	}

	fn reconciler(&self) -> Reconciler<T> {
		Reconciler {
			holder: Arc::clone(&self.holder),
			store: Arc::clone(&self.store),
			validators: Arc::clone(&self.validators),
			policy: self.policy,
			grace: self.revert_grace,
			cycle: Arc::clone(&self.cycle),
		}
	}
}

impl<T> std::fmt::Debug for Live<T>
where
	T: std::fmt::Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut s = f.debug_struct("Live");
		s.field("holder", &self.holder);
		s.field("store", &self.store);
		s.field("policy", &self.policy);
		#[cfg(feature = "signal")]
		s.field("watching", &self.watch_state.is_some());
		s.finish_non_exhaustive()
	}
}
