//! Field configuration and the ordered coercion pipeline
//!
//! A [`Field`] is one configured coercion rule. Setting a value runs the
//! same ordered stages every time: null check, skip check, handlers (or the
//! custom method, never both), type coercion, validators. A field with
//! `raise_on_error` disabled never propagates a pipeline failure; it becomes
//! ready with its fallback value instead.

use std::fmt;
use std::sync::Arc;

use crate::error::{FieldError, FieldResult};
use crate::fields::{array_field, date_field, float_field, integer_field, string_field};
use crate::fields::{ArrayOptions, DateOptions};
use crate::handlers::Handler;
use crate::validators::Validator;
use crate::value::Value;

/// A custom single-argument transform, configured instead of handlers.
pub type Method = Arc<dyn Fn(Value) -> FieldResult<Value> + Send + Sync>;

/// What a non-raising field produces when its pipeline fails.
#[derive(Debug, Clone, PartialEq)]
pub enum Fallback {
	/// Produce the configured value.
	Value(Value),
	/// Produce the raw input exactly as it was passed to `set`.
	OriginalInput,
}

impl Default for Fallback {
	fn default() -> Self {
		Fallback::Value(Value::Null)
	}
}

/// The type-coercion strategy a field runs after handlers and method.
#[derive(Debug, Clone)]
pub enum Coercion {
	/// Pass the value through unchanged.
	None,
	String,
	Integer,
	Float { separators: Vec<char> },
	Date(DateOptions),
	Array(ArrayOptions),
}

impl Coercion {
	fn apply(&self, value: Value) -> FieldResult<Value> {
		match self {
			Coercion::None => Ok(value),
			Coercion::String => string_field::coerce(value),
			Coercion::Integer => integer_field::coerce(value),
			Coercion::Float { separators } => float_field::coerce(value, separators),
			Coercion::Date(options) => date_field::coerce(value, options),
			Coercion::Array(options) => array_field::coerce(value, options),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
enum FieldState {
	Unset,
	Ready(Value),
}

/// One configured, stateful coercion + validation rule for one named value.
///
/// Constructed through [`Field::builder`] or one of the typed builders
/// ([`StringField`](crate::StringField), [`IntegerField`](crate::IntegerField),
/// [`FloatField`](crate::FloatField), [`DateField`](crate::DateField),
/// [`ArrayField`](crate::ArrayField)).
///
/// # Examples
///
/// ```
/// use remould_core::{Field, Value};
///
/// let mut field = Field::builder().with_name("comment").build().unwrap();
/// field.set("hello").unwrap();
/// assert_eq!(field.value().unwrap(), &Value::from("hello"));
/// ```
#[derive(Clone)]
pub struct Field {
	name: Option<String>,
	verbose_name: Option<String>,
	initial: Option<Value>,
	nullable: bool,
	skip_values: Vec<Value>,
	fallback: Fallback,
	method: Option<Method>,
	handlers: Vec<Arc<dyn Handler>>,
	validators: Vec<Arc<dyn Validator>>,
	raise_on_error: bool,
	coercion: Coercion,
	state: FieldState,
}

impl Field {
	/// A builder for the base field (no type coercion).
	pub fn builder() -> FieldBuilder {
		FieldBuilder::new(Coercion::None)
	}

	/// The declared name, used as the key by containers and serializers.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Assigns the declared name; a serializer does this at registration
	/// when the field was built without one.
	pub fn set_name(&mut self, name: impl Into<String>) {
		self.name = Some(name.into());
	}

	/// Display-only name.
	pub fn verbose_name(&self) -> Option<&str> {
		self.verbose_name.as_deref()
	}

	pub fn nullable(&self) -> bool {
		self.nullable
	}

	pub fn raise_on_error(&self) -> bool {
		self.raise_on_error
	}

	/// The deferred construction-time value consumed by [`Field::set_initial`].
	pub fn initial(&self) -> Option<&Value> {
		self.initial.as_ref()
	}

	/// Whether a `set` call has completed since construction.
	pub fn is_ready(&self) -> bool {
		matches!(self.state, FieldState::Ready(_))
	}

	/// The coerced value stored by the last `set`.
	///
	/// Reading it before any successful `set` is a programming error and
	/// surfaces as [`FieldError::NotReady`].
	pub fn value(&self) -> FieldResult<&Value> {
		match &self.state {
			FieldState::Ready(value) => Ok(value),
			FieldState::Unset => Err(FieldError::NotReady),
		}
	}

	/// Runs the pure ordered pipeline with no failure policy and no state.
	///
	/// Stage order: null check, skip check, handlers, method, type coercion,
	/// validators. The first failing stage aborts with its own error kind.
	pub fn coerce(&self, raw: Value) -> FieldResult<Value> {
		if raw.is_null() && !self.nullable {
			return Err(FieldError::NullValue);
		}
		if self.skip_values.contains(&raw) {
			return Err(FieldError::SkipValue(raw.to_string()));
		}

		let mut value = raw;
		for handler in &self.handlers {
			value = handler.handle(value)?;
		}
		if let Some(method) = &self.method {
			value = method(value)?;
		}
		value = self.coercion.apply(value)?;
		for validator in &self.validators {
			validator.validate(&value)?;
		}
		Ok(value)
	}

	/// [`Field::coerce`] plus the failure policy, still pure.
	///
	/// With `raise_on_error` the pipeline error propagates unmodified;
	/// without it the fallback value is produced instead.
	pub fn evaluate(&self, raw: Value) -> FieldResult<Value> {
		if self.raise_on_error {
			return self.coerce(raw);
		}
		let original = raw.clone();
		match self.coerce(raw) {
			Ok(value) => Ok(value),
			Err(_) => Ok(self.fallback_value(original)),
		}
	}

	/// The value this field falls back to for the given raw input.
	pub fn fallback_value(&self, original: Value) -> Value {
		match &self.fallback {
			Fallback::OriginalInput => original,
			Fallback::Value(value) => value.clone(),
		}
	}

	/// Runs the full pipeline and stores the result.
	///
	/// Every call independently re-runs all stages and replaces the stored
	/// value. On a propagated error the stored state is left untouched.
	pub fn set(&mut self, raw: impl Into<Value>) -> FieldResult<Value> {
		let value = self.evaluate(raw.into())?;
		self.state = FieldState::Ready(value.clone());
		Ok(value)
	}

	/// [`Field::set`] with the deferred construction-time value.
	pub fn set_initial(&mut self) -> FieldResult<Value> {
		let raw = self.initial.clone().unwrap_or(Value::Null);
		self.set(raw)
	}

	/// Stores the fallback value directly, bypassing the pipeline, and marks
	/// the field ready. Used by serializers that do not raise.
	pub fn set_fallback(&mut self, original: Value) -> Value {
		let value = self.fallback_value(original);
		self.state = FieldState::Ready(value.clone());
		value
	}
}

impl fmt::Debug for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Field")
			.field("name", &self.name)
			.field("verbose_name", &self.verbose_name)
			.field("coercion", &self.coercion)
			.field("nullable", &self.nullable)
			.field("ready", &self.is_ready())
			.finish_non_exhaustive()
	}
}

/// Builder shared by every field type; typed builders delegate here.
#[derive(Clone)]
pub struct FieldBuilder {
	name: Option<String>,
	verbose_name: Option<String>,
	initial: Option<Value>,
	nullable: bool,
	skip_values: Vec<Value>,
	fallback: Fallback,
	method: Option<Method>,
	handlers: Vec<Arc<dyn Handler>>,
	validators: Vec<Arc<dyn Validator>>,
	raise_on_error: bool,
	coercion: Coercion,
}

impl FieldBuilder {
	pub(crate) fn new(coercion: Coercion) -> Self {
		Self {
			name: None,
			verbose_name: None,
			initial: None,
			nullable: false,
			skip_values: Vec::new(),
			fallback: Fallback::default(),
			method: None,
			handlers: Vec::new(),
			validators: Vec::new(),
			raise_on_error: true,
			coercion,
		}
	}

	pub(crate) fn set_coercion(&mut self, coercion: Coercion) {
		self.coercion = coercion;
	}

	/// Declared name, used as the key by containers and serializers.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Display-only name.
	pub fn with_verbose_name(mut self, verbose_name: impl Into<String>) -> Self {
		self.verbose_name = Some(verbose_name.into());
		self
	}

	/// Deferred value consumed by [`Field::set_initial`].
	pub fn with_initial(mut self, initial: impl Into<Value>) -> Self {
		self.initial = Some(initial.into());
		self
	}

	/// Lets null input pass the null check.
	pub fn nullable(mut self) -> Self {
		self.nullable = true;
		self
	}

	/// Raw values treated as "ignore"; matching input fails the skip check.
	pub fn with_skip_values<V: Into<Value>>(
		mut self,
		skip_values: impl IntoIterator<Item = V>,
	) -> Self {
		self.skip_values = skip_values.into_iter().map(Into::into).collect();
		self
	}

	/// Value produced on failure when the field does not raise.
	pub fn with_default(mut self, default: impl Into<Value>) -> Self {
		self.fallback = Fallback::Value(default.into());
		self
	}

	/// On failure, produce the raw input instead of a configured default.
	pub fn default_from_input(mut self) -> Self {
		self.fallback = Fallback::OriginalInput;
		self
	}

	/// Custom transform; mutually exclusive with handlers.
	pub fn with_method(
		mut self,
		method: impl Fn(Value) -> FieldResult<Value> + Send + Sync + 'static,
	) -> Self {
		self.method = Some(Arc::new(method));
		self
	}

	/// Appends a pre-coercion handler; handlers run in the order added.
	pub fn with_handler(mut self, handler: impl Handler + 'static) -> Self {
		self.handlers.push(Arc::new(handler));
		self
	}

	/// Appends a validator; validators run in the order added.
	pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
		self.validators.push(Arc::new(validator));
		self
	}

	/// Whether pipeline errors propagate out of `set` (the default) or are
	/// swallowed in favor of the fallback value.
	pub fn with_raise_on_error(mut self, raise_on_error: bool) -> Self {
		self.raise_on_error = raise_on_error;
		self
	}

	/// Finishes the field, rejecting contradictory configuration.
	pub fn build(self) -> FieldResult<Field> {
		if self.method.is_some() && !self.handlers.is_empty() {
			return Err(FieldError::Config(
				"using `method` and handlers together is not allowed".to_string(),
			));
		}

		Ok(Field {
			name: self.name,
			verbose_name: self.verbose_name,
			initial: self.initial,
			nullable: self.nullable,
			skip_values: self.skip_values,
			fallback: self.fallback,
			method: self.method,
			handlers: self.handlers,
			validators: self.validators,
			raise_on_error: self.raise_on_error,
			coercion: self.coercion,
			state: FieldState::Unset,
		})
	}
}
