//! Dynamic value model carried through the coercion pipeline

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// A single dynamic value as it travels through a field's pipeline.
///
/// Raw input and coerced output share this representation: a raw spreadsheet
/// cell arrives as [`Value::Str`], an integer field turns it into
/// [`Value::Int`], a date field into [`Value::DateTime`], and so on.
///
/// # Examples
///
/// ```
/// use remould_core::Value;
///
/// let value = Value::from("hello");
/// assert_eq!(value.as_str(), Some("hello"));
/// assert!(!value.is_null());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	Str(String),
	Array(Vec<Value>),
	Date(NaiveDate),
	Time(NaiveTime),
	DateTime(NaiveDateTime),
}

impl Value {
	/// Returns `true` for [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	/// Borrows the inner string when this is a [`Value::Str`].
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Str(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the integer content of [`Value::Int`].
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Value::Int(i) => Some(*i),
			_ => None,
		}
	}

	/// Returns the numeric content of [`Value::Int`] or [`Value::Float`].
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Int(i) => Some(*i as f64),
			Value::Float(f) => Some(*f),
			_ => None,
		}
	}

	/// Borrows the elements of a [`Value::Array`].
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Value::Array(items) => Some(items),
			_ => None,
		}
	}

	/// A short name for the variant, used in error messages.
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "bool",
			Value::Int(_) => "int",
			Value::Float(_) => "float",
			Value::Str(_) => "string",
			Value::Array(_) => "array",
			Value::Date(_) => "date",
			Value::Time(_) => "time",
			Value::DateTime(_) => "datetime",
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => write!(f, "null"),
			Value::Bool(b) => write!(f, "{b}"),
			Value::Int(i) => write!(f, "{i}"),
			// `{:?}` keeps the decimal point on round floats (222.0, not 222)
			Value::Float(x) => write!(f, "{x:?}"),
			Value::Str(s) => write!(f, "{s}"),
			Value::Array(items) => {
				write!(f, "[")?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{item}")?;
				}
				write!(f, "]")
			}
			Value::Date(d) => write!(f, "{d}"),
			Value::Time(t) => write!(f, "{t}"),
			Value::DateTime(dt) => write!(f, "{dt}"),
		}
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Value::Null => serializer.serialize_unit(),
			Value::Bool(b) => serializer.serialize_bool(*b),
			Value::Int(i) => serializer.serialize_i64(*i),
			Value::Float(x) => serializer.serialize_f64(*x),
			Value::Str(s) => serializer.serialize_str(s),
			Value::Array(items) => {
				let mut seq = serializer.serialize_seq(Some(items.len()))?;
				for item in items {
					seq.serialize_element(item)?;
				}
				seq.end()
			}
			Value::Date(d) => serializer.collect_str(d),
			Value::Time(t) => serializer.collect_str(t),
			Value::DateTime(dt) => serializer.collect_str(dt),
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Value::Int(value.into())
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Int(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Str(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::Str(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Value::Array(value)
	}
}

impl From<NaiveDate> for Value {
	fn from(value: NaiveDate) -> Self {
		Value::Date(value)
	}
}

impl From<NaiveTime> for Value {
	fn from(value: NaiveTime) -> Self {
		Value::Time(value)
	}
}

impl From<NaiveDateTime> for Value {
	fn from(value: NaiveDateTime) -> Self {
		Value::DateTime(value)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		match value {
			Some(inner) => inner.into(),
			None => Value::Null,
		}
	}
}

impl From<serde_json::Value> for Value {
	/// Converts a JSON value. Numbers become [`Value::Int`] when they fit an
	/// `i64` and [`Value::Float`] otherwise; nested objects are kept as their
	/// raw JSON text.
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::Bool(b) => Value::Bool(b),
			serde_json::Value::Number(n) => match n.as_i64() {
				Some(i) => Value::Int(i),
				None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
			},
			serde_json::Value::String(s) => Value::Str(s),
			serde_json::Value::Array(items) => {
				Value::Array(items.into_iter().map(Value::from).collect())
			}
			object @ serde_json::Value::Object(_) => Value::Str(object.to_string()),
		}
	}
}
