//! Float field: separator normalization and fraction sums

use crate::constants::DEFAULT_FLOAT_SEPARATORS;
use crate::error::{FieldError, FieldResult};
use crate::field::{Coercion, Field, FieldBuilder};
use crate::fields::detect_separator;
use crate::handlers::Handler;
use crate::validators::Validator;
use crate::value::Value;

/// Builder for a field that coerces input to a float.
///
/// The first configured separator present in the input (priority order,
/// `,` before `.` by default) is normalized to a decimal point, and inputs
/// containing `/` are summed as whitespace-separated fractions.
///
/// # Examples
///
/// ```
/// use remould_core::{FloatField, Value};
///
/// let mut field = FloatField::new().build().unwrap();
/// assert_eq!(field.set("222,00").unwrap(), Value::Float(222.0));
/// assert_eq!(field.set("4 3/2").unwrap(), Value::Float(5.5));
/// ```
#[derive(Clone)]
pub struct FloatField {
	base: FieldBuilder,
	separators: Vec<char>,
}

impl FloatField {
	pub fn new() -> Self {
		Self {
			base: FieldBuilder::new(Coercion::Float {
				separators: DEFAULT_FLOAT_SEPARATORS.to_vec(),
			}),
			separators: DEFAULT_FLOAT_SEPARATORS.to_vec(),
		}
	}

	/// Replaces the priority-ordered separator list.
	pub fn with_separators(mut self, separators: impl IntoIterator<Item = char>) -> Self {
		self.separators = separators.into_iter().collect();
		self
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
		let mut base = self.base;
		base.set_coercion(Coercion::Float {
			separators: self.separators,
		});
		base.build()
	}
}

impl Default for FloatField {
	fn default() -> Self {
		Self::new()
	}
}

pub(crate) fn coerce(value: Value, separators: &[char]) -> FieldResult<Value> {
	match value {
		Value::Null => Ok(Value::Null),
		Value::Float(f) => Ok(Value::Float(f)),
		Value::Int(i) => Ok(Value::Float(i as f64)),
		Value::Str(s) => parse(&s, separators).map(Value::Float),
		other => Err(FieldError::handler(format!(
			"cannot coerce {} to a float",
			other.type_name()
		))),
	}
}

fn parse(text: &str, separators: &[char]) -> FieldResult<f64> {
	let mut text = text.trim().to_string();
	if let Some(separator) = detect_separator(separators, &text) {
		text = text.replace(separator, ".");
	}

	if text.contains('/') {
		let mut total = 0.0;
		for token in text.split_whitespace() {
			total += parse_fraction(token)?;
		}
		return Ok(total);
	}

	text.parse::<f64>()
		.map_err(|e| FieldError::handler(e.to_string()))
}

fn parse_fraction(token: &str) -> FieldResult<f64> {
	match token.split_once('/') {
		Some((numerator, denominator)) => {
			let numerator: i64 = numerator
				.parse()
				.map_err(|e: std::num::ParseIntError| FieldError::handler(e.to_string()))?;
			let denominator: i64 = denominator
				.parse()
				.map_err(|e: std::num::ParseIntError| FieldError::handler(e.to_string()))?;
			if denominator == 0 {
				return Err(FieldError::handler(format!(
					"zero denominator in fraction `{token}`"
				)));
			}
			Ok(numerator as f64 / denominator as f64)
		}
		None => token
			.parse::<f64>()
			.map_err(|e| FieldError::handler(e.to_string())),
	}
}
