//! Serializer-level error taxonomy

use remould_core::FieldError;
use thiserror::Error;

/// Result alias used throughout record binding.
pub type SerializerResult<T> = Result<T, SerializerError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SerializerError {
	/// A field's pipeline failed while binding a record.
	#[error("field `{name}`: {source}")]
	Field { name: String, source: FieldError },

	/// A declared field has no matching attribute on the record.
	#[error("undeclared field `{0}`")]
	UndeclaredField(String),

	/// A required field's attribute is absent or null.
	#[error("missing required field `{0}`")]
	MissingField(String),

	/// Contradictory configuration, e.g. `only` and `exclude` together.
	#[error("{0}")]
	Config(String),
}

impl SerializerError {
	pub(crate) fn field(name: impl Into<String>, source: FieldError) -> Self {
		SerializerError::Field {
			name: name.into(),
			source,
		}
	}

	/// The field-level error wrapped by this error, if any.
	pub fn field_error(&self) -> Option<&FieldError> {
		match self {
			SerializerError::Field { source, .. } => Some(source),
			_ => None,
		}
	}
}
