//! Error taxonomy for the coercion pipeline

use thiserror::Error;

/// Result alias used throughout the field pipeline.
pub type FieldResult<T> = Result<T, FieldError>;

/// Everything a field's pipeline can fail with.
///
/// Each variant corresponds to one pipeline stage: the null check, the skip
/// check, handlers, type coercion and validators all report their own kind,
/// so callers can react to the stage that rejected a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
	/// A null value reached a field that is not nullable.
	#[error("null value for a non-nullable field")]
	NullValue,

	/// The raw value matched a configured skip-list entry.
	#[error("value `{0}` is in the skip list")]
	SkipValue(String),

	/// A validator rejected the coerced value.
	#[error("{message}")]
	Validation { message: String, code: String },

	/// A regex handler found no match for its pattern.
	#[error("no match for pattern `{0}`")]
	Regex(String),

	/// The token count of a split array failed the configured size policy.
	#[error("array size ({size}) exceeded")]
	ArraySizeLimit { size: usize, actual: usize },

	/// A lower-level coercion failure, carrying the original message.
	#[error("{0}")]
	Handler(String),

	/// `value()` was read before a successful `set`.
	#[error("value was read before a successful `set`")]
	NotReady,

	/// Contradictory configuration, e.g. `method` and handlers together.
	#[error("{0}")]
	Config(String),
}

impl FieldError {
	/// A validation failure with a message and a machine-readable code.
	pub fn validation(message: impl Into<String>, code: impl Into<String>) -> Self {
		FieldError::Validation {
			message: message.into(),
			code: code.into(),
		}
	}

	/// A coercion failure wrapping the original lower-level message.
	pub fn handler(message: impl Into<String>) -> Self {
		FieldError::Handler(message.into())
	}

	/// The machine code of a validation failure, if this is one.
	pub fn validation_code(&self) -> Option<&str> {
		match self {
			FieldError::Validation { code, .. } => Some(code),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_validation_carries_message_and_code() {
		let error = FieldError::validation("value is out of range", "out_of_range");

		assert_eq!(error.to_string(), "value is out of range");
		assert_eq!(error.validation_code(), Some("out_of_range"));
	}

	#[rstest]
	fn test_array_size_message_names_the_bound() {
		let error = FieldError::ArraySizeLimit { size: 2, actual: 1 };
		assert_eq!(error.to_string(), "array size (2) exceeded");
	}

	#[rstest]
	fn test_handler_keeps_original_message() {
		let parse_error = "abc".parse::<i64>().unwrap_err();
		let error = FieldError::handler(parse_error.to_string());
		assert_eq!(error.to_string(), parse_error.to_string());
	}
}
