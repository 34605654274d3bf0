/* src/store/silent.rs */

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag telling a watcher to ignore the store's own writes.
///
/// Owned by one [`Store`](super::Store); the watcher only ever reads it.
#[derive(Debug, Clone, Default)]
pub struct Suppression {
	raised: Arc<AtomicBool>,
}

impl Suppression {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns true while a silent save is in progress.
	pub fn is_raised(&self) -> bool {
		self.raised.load(Ordering::SeqCst)
	}

	/// Raises the flag until the returned guard is dropped.
	pub(crate) fn raise(&self) -> SuppressGuard<'_> {
		self.raised.store(true, Ordering::SeqCst);
		SuppressGuard { flag: self }
	}
}

/// Lowers the suppression flag on drop, whatever path the save took.
#[must_use = "the flag is lowered as soon as the guard is dropped"]
pub(crate) struct SuppressGuard<'a> {
	flag: &'a Suppression,
}

impl Drop for SuppressGuard<'_> {
	fn drop(&mut self) {
		self.flag.raised.store(false, Ordering::SeqCst);
	}
}

