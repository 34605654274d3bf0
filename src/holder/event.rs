/* src/holder/event.rs */

use std::sync::Arc;

use super::Meta;

/// Events emitted by the holder on config changes.
#[derive(Debug)]
pub enum HoldEvent<T> {
	/// The live value was replaced.
	Updated {
		old: Arc<T>,
		new: Arc<T>,
		meta: Meta,
	},
}

// Clones only the `Arc`s; `T` need not be `Clone`.
impl<T> Clone for HoldEvent<T> {
	fn clone(&self) -> Self {
		match self {
			Self::Updated { old, new, meta } => Self::Updated {
				old: Arc::clone(old),
				new: Arc::clone(new),
				meta: meta.clone(),
			},
		}
	}
}
