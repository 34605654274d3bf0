/* src/controller/builder.rs */

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::validation::{ValidatorFn, Validators};
use super::{ErrorHook, Live, LiveError, LiveOptions, ValidationError, ValidationPolicy};
use crate::format::FileType;
use crate::holder::{Holder, Origin};
#[cfg(feature = "signal")]
use crate::signal::Config as WatcherConfig;
use crate::store::{FileSource, Source, Store};

/// Builder for Live controller.
pub struct LiveBuilder<T> {
	options: LiveOptions,
	grace: Option<Duration>,
	source: Option<Arc<dyn Source>>,
	validators: Vec<ValidatorFn<T>>,
	on_error: Option<ErrorHook>,
}

impl<T> LiveBuilder<T>
where
	T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
	pub fn new() -> Self {
		Self {
			options: LiveOptions::default(),
			grace: None,
			source: None,
			validators: Vec::new(),
			on_error: None,
		}
	}

	/// Replaces all options at once, including any earlier
	/// [`revert_grace`](Self::revert_grace).
	pub fn options(mut self, options: LiveOptions) -> Self {
		self.options = options;
		self.grace = None;
		self
	}

	pub fn format(mut self, format: FileType) -> Self {
		self.options.format = format;
		self
	}

	pub fn root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
		self.options.root_dir = root_dir.into();
		self
	}

	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.options.name = name.into();
		self
	}

	pub fn watch(mut self, watch: bool) -> Self {
		self.options.watch = watch;
		self
	}

	pub fn policy(mut self, policy: ValidationPolicy) -> Self {
		self.options.policy = policy;
		self
	}

	/// Pause before rewriting a rejected file under [`ValidationPolicy::Revert`].
	///
	/// Kept at full precision, unlike [`LiveOptions::revert_grace_ms`].
	pub fn revert_grace(mut self, grace: Duration) -> Self {
		self.grace = Some(grace);
		self
	}

	#[cfg(feature = "signal")]
	pub fn watcher_config(mut self, config: WatcherConfig) -> Self {
		self.options.watcher = config;
		self
	}

	/// Reads and writes through a custom source instead of the filesystem.
	pub fn source(mut self, source: Arc<dyn Source>) -> Self {
		self.source = Some(source);
		self
	}

	/// Registers a validator before the file is watched.
	pub fn validator<F>(mut self, f: F) -> Self
	where
		F: Fn(&T) -> Result<(), ValidationError> + Send + Sync + 'static,
	{
		self.validators.push(Arc::new(f));
		self
	}

	/// Called with every error the background loop logs.
	pub fn on_error<F>(mut self, f: F) -> Self
	where
		F: Fn(LiveError) + Send + Sync + 'static,
	{
		self.on_error = Some(Arc::new(f));
		self
	}

	/// Seeds the file from `initial` if it is missing, otherwise loads it,
	/// then starts watching if requested.
	pub async fn build(self, initial: T) -> Result<Live<T>, LiveError> {
		let options = self.options;
		if options.name.is_empty() {
			return Err(LiveError::Builder("name is required".to_string()));
		}

		#[cfg(not(feature = "signal"))]
		{
			if options.watch {
				return Err(LiveError::WatchUnavailable);
			}
		}

		let source = self.source.unwrap_or_else(|| Arc::new(FileSource::new()));
		let store = Store::with_source(&options.root_dir, &options.name, options.format, source)?;

		let setup = |source| LiveError::Setup {
			path: store.path().to_path_buf(),
			source,
		};

		let (value, origin) = if store.exists().await {
			let value: T = store.load().await.map_err(setup)?;
			tracing::info!(path = ?store.path(), "loaded config");
			(value, Origin::Loaded)
		} else {
			store.save(&initial).await.map_err(setup)?;
			tracing::info!(path = ?store.path(), "seeded config file");
			(initial, Origin::Seeded)
		};

		#[allow(unused_mut)]
		let mut live = Live {
			holder: Arc::new(Holder::new(value, origin)),
			store: Arc::new(store),
			validators: Arc::new(Validators::new(self.validators)),
			policy: options.policy,
			revert_grace: self.grace.unwrap_or_else(|| options.revert_grace()),
			cycle: Arc::new(tokio::sync::Mutex::new(())),
			on_error: self.on_error,
			#[cfg(feature = "signal")]
			watcher_config: options.watcher,
			#[cfg(feature = "signal")]
			watch_state: None,
		};

		#[cfg(feature = "signal")]
		{
			if options.watch {
				live.start_watching()?;
			}
		}

		Ok(live)
	}
}

impl<T> Default for LiveBuilder<T>
where
	T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
	fn default() -> Self {
		Self::new()
	}
}
