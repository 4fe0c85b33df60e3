//! Date field: format-list parsing, timestamps and part projection

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::constants::{DEFAULT_DATE_INPUT_FORMATS, EUROPEAN_DATE_FORMAT};
use crate::error::{FieldError, FieldResult};
use crate::field::{Coercion, Field, FieldBuilder};
use crate::handlers::Handler;
use crate::validators::Validator;
use crate::value::Value;

/// Which portion of a parsed datetime the field keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
	Date,
	Time,
}

/// Configuration of the date coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct DateOptions {
	pub(crate) as_string: bool,
	pub(crate) output_format: String,
	pub(crate) part: Option<DatePart>,
	pub(crate) input_formats: Vec<String>,
}

impl Default for DateOptions {
	fn default() -> Self {
		Self {
			as_string: false,
			output_format: EUROPEAN_DATE_FORMAT.to_string(),
			part: None,
			input_formats: DEFAULT_DATE_INPUT_FORMATS
				.iter()
				.map(|f| f.to_string())
				.collect(),
		}
	}
}

/// Builder for a field that coerces input to a date/time value.
///
/// Strings are tried against an ordered format list, numbers are Unix
/// timestamps, and already-typed date/time values pass through. An optional
/// part projection keeps just the date or time portion, and string output
/// formats the result with the configured pattern (European `dd.mm.yyyy`
/// by default).
///
/// ```
/// use chrono::NaiveDate;
/// use remould_core::{DateField, Value};
///
/// let mut field = DateField::new().as_string().build().unwrap();
/// assert_eq!(field.set("2021-06-15").unwrap(), Value::from("15.06.2021"));
/// ```
#[derive(Clone)]
pub struct DateField {
	base: FieldBuilder,
	options: DateOptions,
}

impl DateField {
	pub fn new() -> Self {
		Self {
			base: FieldBuilder::new(Coercion::Date(DateOptions::default())),
			options: DateOptions::default(),
		}
	}

	/// Render the result as a formatted string instead of a typed value.
	pub fn as_string(mut self) -> Self {
		self.options.as_string = true;
		self
	}

	/// Pattern used when string output is requested.
	pub fn with_output_format(mut self, output_format: impl Into<String>) -> Self {
		self.options.output_format = output_format.into();
		self
	}

	/// Keep only the given portion of the parsed value.
	pub fn with_part(mut self, part: DatePart) -> Self {
		self.options.part = Some(part);
		self
	}

	/// Replaces the ordered input format list.
	pub fn with_input_formats<F: Into<String>>(
		mut self,
		input_formats: impl IntoIterator<Item = F>,
	) -> Self {
		self.options.input_formats = input_formats.into_iter().map(Into::into).collect();
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
		base.set_coercion(Coercion::Date(self.options));
		base.build()
	}
}

impl Default for DateField {
	fn default() -> Self {
		Self::new()
	}
}

pub(crate) fn coerce(value: Value, options: &DateOptions) -> FieldResult<Value> {
	let parsed = match value {
		Value::Null => return Ok(Value::Null),
		Value::Str(s) => Value::DateTime(parse_datetime(&s, &options.input_formats)?),
		Value::Int(secs) => Value::DateTime(from_timestamp(secs, 0)?),
		Value::Float(secs) => {
			let whole = secs.floor();
			let nanos = ((secs - whole) * 1e9).round() as u32;
			Value::DateTime(from_timestamp(whole as i64, nanos.min(999_999_999))?)
		}
		typed @ (Value::Date(_) | Value::Time(_) | Value::DateTime(_)) => typed,
		other => {
			return Err(FieldError::handler(format!(
				"cannot interpret {} as a date",
				other.type_name()
			)));
		}
	};

	let projected = project(parsed, options.part)?;

	if options.as_string {
		return format_value(&projected, &options.output_format).map(Value::Str);
	}
	Ok(projected)
}

fn parse_datetime(text: &str, formats: &[String]) -> FieldResult<NaiveDateTime> {
	let text = text.trim();
	for format in formats {
		if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
			return Ok(datetime);
		}
		if let Ok(date) = NaiveDate::parse_from_str(text, format) {
			return Ok(date.and_time(NaiveTime::MIN));
		}
	}
	Err(FieldError::handler(format!(
		"could not parse `{text}` as a date"
	)))
}

fn from_timestamp(secs: i64, nanos: u32) -> FieldResult<NaiveDateTime> {
	chrono::DateTime::from_timestamp(secs, nanos)
		.map(|dt| dt.naive_utc())
		.ok_or_else(|| FieldError::handler(format!("timestamp {secs} is out of range")))
}

fn project(value: Value, part: Option<DatePart>) -> FieldResult<Value> {
	match (part, value) {
		(None, value) => Ok(value),
		(Some(DatePart::Date), Value::DateTime(dt)) => Ok(Value::Date(dt.date())),
		(Some(DatePart::Time), Value::DateTime(dt)) => Ok(Value::Time(dt.time())),
		(Some(DatePart::Date), date @ Value::Date(_)) => Ok(date),
		(Some(DatePart::Time), time @ Value::Time(_)) => Ok(time),
		(Some(DatePart::Date), other) => Err(FieldError::handler(format!(
			"{} value has no date part",
			other.type_name()
		))),
		(Some(DatePart::Time), other) => Err(FieldError::handler(format!(
			"{} value has no time part",
			other.type_name()
		))),
	}
}

fn format_value(value: &Value, pattern: &str) -> FieldResult<String> {
	use std::fmt::Write;

	let mut out = String::new();
	let written = match value {
		Value::Date(d) => write!(out, "{}", d.format(pattern)),
		Value::Time(t) => write!(out, "{}", t.format(pattern)),
		Value::DateTime(dt) => write!(out, "{}", dt.format(pattern)),
		other => {
			return Err(FieldError::handler(format!(
				"cannot format {} as a date string",
				other.type_name()
			)));
		}
	};
	written.map_err(|_| {
		FieldError::handler(format!(
			"cannot format {} with pattern `{pattern}`",
			value.type_name()
		))
	})?;
	Ok(out)
}
