/* src/holder/cell.rs */

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use arc_swap::ArcSwap;

use super::{Entry, Meta, Origin};
#[cfg(feature = "events")]
use super::HoldEvent;

/// Default event channel capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 100;

/// Thread-safe cell holding the live configuration value.
///
/// Reads are wait-free snapshots; every write installs a whole new value, so a
/// reader never sees a half-applied change.
pub struct Holder<T> {
	inner: ArcSwap<Entry<T>>,
	version: AtomicU64,
	#[cfg(feature = "events")]
	events: tokio::sync::broadcast::Sender<HoldEvent<T>>,
}

impl<T> Holder<T>
where
	T: Send + Sync,
{
	/// Creates a holder with an initial value at version 1.
	pub fn new(value: T, origin: Origin) -> Self {
		Self {
			inner: ArcSwap::from_pointee(Entry {
				value: Arc::new(value),
				meta: Meta {
					origin,
					updated_at: Instant::now(),
					version: 1,
				},
			}),
			version: AtomicU64::new(1),
			#[cfg(feature = "events")]
			events: tokio::sync::broadcast::channel(DEFAULT_EVENT_CAPACITY).0,
		}
	}

	/// Gets the current value. This is a wait-free operation.
	pub fn get(&self) -> Arc<T> {
		Arc::clone(&self.inner.load().value)
	}

	/// Gets metadata for the current value.
	pub fn meta(&self) -> Meta {
		self.inner.load().meta.clone()
	}

	/// Gets the full entry (value + metadata).
	pub fn entry(&self) -> Entry<T> {
		let snapshot = self.inner.load();
		Entry {
			value: Arc::clone(&snapshot.value),
			meta: snapshot.meta.clone(),
		}
	}

	/// Replaces the value and returns the new one.
	pub fn replace(&self, value: T, origin: Origin) -> Arc<T> {
		let value = Arc::new(value);
		let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
		let meta = Meta {
			origin,
			updated_at: Instant::now(),
			version,
		};

		let old = self.inner.swap(Arc::new(Entry {
			value: Arc::clone(&value),
			meta: meta.clone(),
		}));

		#[cfg(feature = "events")]
		{
			let _ = self.events.send(HoldEvent::Updated {
				old: Arc::clone(&old.value),
				new: Arc::clone(&value),
				meta,
			});
		}

		#[cfg(not(feature = "events"))]
		{
			let _ = (old, meta);
		}

		value
	}

	/// Subscribes to replacement events.
	#[cfg(feature = "events")]
	pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<HoldEvent<T>> {
		self.events.subscribe()
	}
}

impl<T> Holder<T>
where
	T: Clone + Send + Sync,
{
	/// Applies `f` to a copy of the current value and installs the result.
	///
	/// Concurrent writers are not merged: the last one to swap wins.
	pub fn modify<F>(&self, f: F, origin: Origin) -> Arc<T>
	where
		F: FnOnce(&mut T),
	{
		let mut next = (*self.get()).clone();
		f(&mut next);
		self.replace(next, origin)
	}
}

impl<T> std::fmt::Debug for Holder<T>
where
	T: std::fmt::Debug,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let snapshot = self.inner.load();
		f.debug_struct("Holder")
			.field("value", &snapshot.value)
			.field("version", &snapshot.meta.version)
			.finish_non_exhaustive()
	}
}
