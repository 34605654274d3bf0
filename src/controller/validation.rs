/* src/controller/validation.rs */

use std::sync::Arc;

use arc_swap::ArcSwap;

/// A failed check on one field of the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
	/// Dot path of the offending field, e.g. `server.port`.
	pub field: String,
	/// Human-readable reason.
	pub message: String,
}

impl ValidationError {
	pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			field: field.into(),
			message: message.into(),
		}
	}
}

/// Validator function type.
pub type ValidatorFn<T> = Arc<dyn Fn(&T) -> Result<(), ValidationError> + Send + Sync>;

/// Ordered validator list shared between the controller and its watch task.
pub(crate) struct Validators<T> {
	list: ArcSwap<Vec<ValidatorFn<T>>>,
}

impl<T> Validators<T> {
	pub(crate) fn new(initial: Vec<ValidatorFn<T>>) -> Self {
		Self {
			list: ArcSwap::from_pointee(initial),
		}
	}

	pub(crate) fn push(&self, validator: ValidatorFn<T>) {
		self.list.rcu(|current| {
			let mut next = Vec::clone(current);
			next.push(Arc::clone(&validator));
			next
		});
	}

	pub(crate) fn len(&self) -> usize {
		self.list.load().len()
	}

	/// Runs validators in registration order, stopping at the first failure.
	pub(crate) fn check(&self, value: &T) -> Result<(), ValidationError> {
		for validator in self.list.load().iter() {
			validator(value)?;
		}
		Ok(())
	}
}

/// Validator backed by a `#[derive(validator::Validate)]` implementation.
///
/// ```ignore
/// live.add_validator(livecfg::controller::derived::<AppConfig>);
/// ```
#[cfg(feature = "validate")]
pub fn derived<T: validator::Validate>(value: &T) -> Result<(), ValidationError> {
	value.validate().map_err(ValidationError::from)
}

#[cfg(feature = "validate")]
impl From<validator::ValidationErrors> for ValidationError {
	fn from(errors: validator::ValidationErrors) -> Self {
		first_failure(&errors, "").unwrap_or_else(|| Self::new("", errors.to_string()))
	}
}

/// Picks the first failing field, in sorted key order, as a dot path.
#[cfg(feature = "validate")]
fn first_failure(errors: &validator::ValidationErrors, prefix: &str) -> Option<ValidationError> {
	use validator::ValidationErrorsKind;

	let mut fields: Vec<_> = errors.errors().iter().collect();
	fields.sort_by(|a, b| a.0.cmp(b.0));

	for (name, kind) in fields {
		let path = if prefix.is_empty() {
			name.to_string()
		} else {
			format!("{prefix}.{name}")
		};

		let found = match kind {
			ValidationErrorsKind::Field(list) => list.first().map(|e| {
				let message = e.message.as_deref().unwrap_or(e.code.as_ref());
				ValidationError::new(path, message)
			}),
			ValidationErrorsKind::Struct(inner) => first_failure(inner, &path),
			ValidationErrorsKind::List(items) => items
				.iter()
				.find_map(|(i, inner)| first_failure(inner, &format!("{path}[{i}]"))),
		};

		if found.is_some() {
			return found;
		}
	}
	None
}
