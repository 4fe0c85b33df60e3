//! Stateless post-coercion checks
//!
//! Validators run after type coercion, strictly in their declared order. The
//! first failing validator aborts the pipeline with its own error; failures
//! are never accumulated.

use std::sync::LazyLock;

use crate::error::{FieldError, FieldResult};
use crate::value::Value;

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
	regex::Regex::new(r"^([A-Za-z0-9]+[.-_])*[A-Za-z0-9]+@[A-Za-z0-9-]+(\.[A-Z|a-z]{2,})+")
		.expect("EMAIL_REGEX: invalid regex pattern")
});

/// An acceptance check over an already-coerced value.
pub trait Validator: Send + Sync {
	fn validate(&self, value: &Value) -> FieldResult<()>;
}

fn length_of(value: &Value) -> FieldResult<usize> {
	match value {
		Value::Str(s) => Ok(s.chars().count()),
		Value::Array(items) => Ok(items.len()),
		other => Err(FieldError::validation(
			format!("value of type {} has no length", other.type_name()),
			"type_error",
		)),
	}
}

/// Rejects strings and arrays shorter than a minimum length.
///
/// String length is a character count, not a byte count.
///
/// # Examples
///
/// ```
/// use remould_core::{MinLengthValidator, Validator, Value};
///
/// let validator = MinLengthValidator::new(3);
/// assert!(validator.validate(&Value::from("abc")).is_ok());
/// assert!(validator.validate(&Value::from("ab")).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MinLengthValidator {
	min: usize,
}

impl MinLengthValidator {
	pub fn new(min: usize) -> Self {
		Self { min }
	}
}

impl Validator for MinLengthValidator {
	fn validate(&self, value: &Value) -> FieldResult<()> {
		if length_of(value)? >= self.min {
			Ok(())
		} else {
			Err(FieldError::validation(
				format!("value is shorter than the minimum length {}", self.min),
				"min_length",
			))
		}
	}
}

/// Rejects strings and arrays longer than a maximum length.
#[derive(Debug, Clone, Copy)]
pub struct MaxLengthValidator {
	max: usize,
}

impl MaxLengthValidator {
	pub fn new(max: usize) -> Self {
		Self { max }
	}
}

impl Validator for MaxLengthValidator {
	fn validate(&self, value: &Value) -> FieldResult<()> {
		if length_of(value)? <= self.max {
			Ok(())
		} else {
			Err(FieldError::validation(
				format!("value is longer than the maximum length {}", self.max),
				"max_length",
			))
		}
	}
}

/// Rejects numeric values outside an inclusive range.
///
/// # Examples
///
/// ```
/// use remould_core::{RangeValidator, Validator, Value};
///
/// let validator = RangeValidator::new(0.0, 100.0);
/// assert!(validator.validate(&Value::Int(100)).is_ok());
/// assert!(validator.validate(&Value::Float(100.5)).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RangeValidator {
	min: f64,
	max: f64,
}

impl RangeValidator {
	pub fn new(min: f64, max: f64) -> Self {
		Self { min, max }
	}
}

impl Validator for RangeValidator {
	fn validate(&self, value: &Value) -> FieldResult<()> {
		let number = value.as_f64().ok_or_else(|| {
			FieldError::validation(
				format!("value of type {} is not numeric", value.type_name()),
				"type_error",
			)
		})?;

		if number >= self.min && number <= self.max {
			Ok(())
		} else {
			Err(FieldError::validation(
				format!("value is out of range [{}, {}]", self.min, self.max),
				"out_of_range",
			))
		}
	}
}

/// Rejects strings that do not match a pattern.
#[derive(Debug)]
pub struct RegexValidator {
	regex: regex::Regex,
	message: Option<String>,
}

impl RegexValidator {
	/// Compiles the pattern; an invalid pattern fails here, at construction.
	pub fn new(pattern: &str) -> Result<Self, regex::Error> {
		Ok(Self {
			regex: regex::Regex::new(pattern)?,
			message: None,
		})
	}

	/// Sets a custom error message returned on validation failure.
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}
}

impl Validator for RegexValidator {
	fn validate(&self, value: &Value) -> FieldResult<()> {
		let Value::Str(text) = value else {
			return Err(FieldError::validation(
				format!("value of type {} is not a string", value.type_name()),
				"type_error",
			));
		};

		if self.regex.is_match(text) {
			Ok(())
		} else {
			let message = match &self.message {
				Some(custom) => custom.clone(),
				None => format!("value does not match pattern `{}`", self.regex.as_str()),
			};
			Err(FieldError::validation(message, "invalid"))
		}
	}
}

/// Rejects strings that are not well-formed email addresses.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailValidator;

impl EmailValidator {
	pub fn new() -> Self {
		Self
	}
}

impl Validator for EmailValidator {
	fn validate(&self, value: &Value) -> FieldResult<()> {
		let Value::Str(text) = value else {
			return Err(FieldError::validation(
				format!("value of type {} is not a string", value.type_name()),
				"type_error",
			));
		};

		if EMAIL_REGEX.is_match(text) {
			Ok(())
		} else {
			Err(FieldError::validation("Enter a valid email address", "email"))
		}
	}
}
