//! Array field: split, size-check, recurse into the child pipeline

use crate::constants::DEFAULT_ARRAY_SEPARATORS;
use crate::error::{FieldError, FieldResult};
use crate::field::{Coercion, Field, FieldBuilder};
use crate::fields::detect_separator;
use crate::handlers::Handler;
use crate::validators::Validator;
use crate::value::Value;

/// Array size policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeLimit {
	Bounded(usize),
	Unbounded,
}

/// Configuration of the array coercion.
#[derive(Debug, Clone)]
pub struct ArrayOptions {
	pub(crate) child: Box<Field>,
	pub(crate) separators: Vec<char>,
	pub(crate) size: SizeLimit,
}

/// Builder for a field whose value is a sequence: the input is split on the
/// first matching separator and every token runs through the child field's
/// pipeline.
///
/// The child is driven through its pure pipeline only, so no state leaks
/// from one token to the next.
///
/// # Examples
///
/// ```
/// use remould_core::{ArrayField, IntegerField, Value};
///
/// let child = IntegerField::new().build().unwrap();
/// let mut field = ArrayField::new(child).with_size(2).build().unwrap();
///
/// assert_eq!(
///     field.set("222,222").unwrap(),
///     Value::Array(vec![Value::Int(222), Value::Int(222)])
/// );
/// ```
#[derive(Clone)]
pub struct ArrayField {
	base: FieldBuilder,
	child: Field,
	separators: Vec<char>,
	size: SizeLimit,
}

impl ArrayField {
	pub fn new(child: Field) -> Self {
		Self {
			base: FieldBuilder::new(Coercion::None),
			child,
			separators: DEFAULT_ARRAY_SEPARATORS.to_vec(),
			size: SizeLimit::Unbounded,
		}
	}

	/// Replaces the priority-ordered separator list.
	pub fn with_separators(mut self, separators: impl IntoIterator<Item = char>) -> Self {
		self.separators = separators.into_iter().collect();
		self
	}

	/// Bounds the token count (see [`SizeLimit`]).
	pub fn with_size(mut self, size: usize) -> Self {
		self.size = SizeLimit::Bounded(size);
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
		base.set_coercion(Coercion::Array(ArrayOptions {
			child: Box::new(self.child),
			separators: self.separators,
			size: self.size,
		}));
		base.build()
	}
}

pub(crate) fn coerce(value: Value, options: &ArrayOptions) -> FieldResult<Value> {
	let tokens: Vec<Value> = match value {
		Value::Null => return Ok(Value::Null),
		Value::Str(s) => split_tokens(&s, &options.separators)
			.into_iter()
			.map(Value::Str)
			.collect(),
		Value::Array(items) => items,
		other => {
			return Err(FieldError::handler(format!(
				"cannot split {} into an array",
				other.type_name()
			)));
		}
	};

	if let SizeLimit::Bounded(size) = options.size {
		// a token count below the bound is rejected; counts at or above it pass
		if tokens.len() < size {
			return Err(FieldError::ArraySizeLimit {
				size,
				actual: tokens.len(),
			});
		}
	}

	let mut collected = Vec::with_capacity(tokens.len());
	for token in tokens {
		collected.push(options.child.evaluate(token)?);
	}
	Ok(Value::Array(collected))
}

/// Splits on the first separator from the priority list present in the text;
/// with no separator present the text splits on whitespace.
fn split_tokens(text: &str, separators: &[char]) -> Vec<String> {
	match detect_separator(separators, text) {
		Some(separator) => text.split(separator).map(str::to_string).collect(),
		None => text.split_whitespace().map(str::to_string).collect(),
	}
}
