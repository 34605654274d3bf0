/* src/controller/mod.rs */

//!
//! The [`Live`] controller: owns the live value, its validators, and the
//! reconciliation loop that keeps it in step with the file on disk.

use std::sync::Arc;

#[cfg(feature = "signal")]
use crate::signal::Watcher;
#[cfg(feature = "signal")]
use tokio::sync::oneshot;
#[cfg(feature = "signal")]
use tokio::task::JoinHandle;

#[cfg(feature = "signal")]
pub(crate) struct WatchState {
	pub watcher: Watcher,
	pub stop: oneshot::Sender<()>,
	pub task: JoinHandle<()>,
}

/// Callback receiving errors from the background reconciliation loop.
pub type ErrorHook = Arc<dyn Fn(LiveError) + Send + Sync>;

mod builder;
mod error;
mod live;
mod options;
mod reconcile;
mod validation;

pub use builder::LiveBuilder;
pub use error::LiveError;
pub use live::Live;
pub use options::{DEFAULT_REVERT_GRACE, LiveOptions, ParsePolicyError, ValidationPolicy};
pub use reconcile::Reconciled;
#[cfg(feature = "validate")]
pub use validation::derived;
pub use validation::{ValidationError, ValidatorFn};
