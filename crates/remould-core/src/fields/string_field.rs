//! String field: textual rendering of any input

use crate::error::FieldResult;
use crate::field::{Coercion, Field, FieldBuilder};
use crate::handlers::Handler;
use crate::validators::Validator;
use crate::value::Value;

/// Builder for a field that coerces any input to its textual form.
///
/// # Examples
///
/// ```
/// use remould_core::{StringField, Value};
///
/// let mut field = StringField::new().build().unwrap();
/// assert_eq!(field.set(222).unwrap(), Value::from("222"));
/// ```
#[derive(Clone)]
pub struct StringField {
	base: FieldBuilder,
}

impl StringField {
	pub fn new() -> Self {
		Self {
			base: FieldBuilder::new(Coercion::String),
		}
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.base = self.base.with_name(name);
		self
	}

	pub fn with_verbose_name(mut self, verbose_name: impl Into<String>) -> Self {
		self.base = self.base.with_verbose_name(verbose_name);
		self
	}

	pub fn with_initial(mut self, initial: impl Into<Value>) -> Self {
		self.base = self.base.with_initial(initial);
		self
	}

	pub fn nullable(mut self) -> Self {
		self.base = self.base.nullable();
		self
	}

	pub fn with_skip_values<V: Into<Value>>(
		mut self,
		skip_values: impl IntoIterator<Item = V>,
	) -> Self {
		self.base = self.base.with_skip_values(skip_values);
		self
	}

	pub fn with_default(mut self, default: impl Into<Value>) -> Self {
		self.base = self.base.with_default(default);
		self
	}

	pub fn default_from_input(mut self) -> Self {
		self.base = self.base.default_from_input();
		self
	}

	pub fn with_method(
		mut self,
		method: impl Fn(Value) -> FieldResult<Value> + Send + Sync + 'static,
	) -> Self {
		self.base = self.base.with_method(method);
		self
	}

	pub fn with_handler(mut self, handler: impl Handler + 'static) -> Self {
		self.base = self.base.with_handler(handler);
		self
	}

	pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
		self.base = self.base.with_validator(validator);
		self
	}

	pub fn with_raise_on_error(mut self, raise_on_error: bool) -> Self {
		self.base = self.base.with_raise_on_error(raise_on_error);
		self
	}

	pub fn build(self) -> FieldResult<Field> {
		self.base.build()
	}
}

impl Default for StringField {
	fn default() -> Self {
		Self::new()
	}
}

/// Null passes through; everything else renders through `Display`.
pub(crate) fn coerce(value: Value) -> FieldResult<Value> {
	Ok(match value {
		Value::Null => Value::Null,
		Value::Str(s) => Value::Str(s),
		other => Value::Str(other.to_string()),
	})
}
