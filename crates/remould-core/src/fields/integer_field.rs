//! Integer field: base-10 parse of numeric strings

use crate::error::{FieldError, FieldResult};
use crate::field::{Coercion, Field, FieldBuilder};
use crate::handlers::Handler;
use crate::validators::Validator;
use crate::value::Value;

/// Builder for a field that coerces input to an integer.
///
/// # Examples
///
/// ```
/// use remould_core::{IntegerField, Value};
///
/// let mut field = IntegerField::new().build().unwrap();
/// assert_eq!(field.set("222").unwrap(), Value::Int(222));
/// ```
#[derive(Clone)]
pub struct IntegerField {
	base: FieldBuilder,
}

impl IntegerField {
	pub fn new() -> Self {
		Self {
			base: FieldBuilder::new(Coercion::Integer),
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

impl Default for IntegerField {
	fn default() -> Self {
		Self::new()
	}
}

/// Strings are trimmed and parsed base-10; floats truncate toward zero;
/// null passes through.
pub(crate) fn coerce(value: Value) -> FieldResult<Value> {
	match value {
		Value::Null => Ok(Value::Null),
		Value::Int(i) => Ok(Value::Int(i)),
		Value::Float(f) => Ok(Value::Int(f.trunc() as i64)),
		Value::Bool(b) => Ok(Value::Int(b as i64)),
		Value::Str(s) => s
			.trim()
			.parse::<i64>()
			.map(Value::Int)
			.map_err(|e| FieldError::handler(e.to_string())),
		other => Err(FieldError::handler(format!(
			"cannot coerce {} to an integer",
			other.type_name()
		))),
	}
}
