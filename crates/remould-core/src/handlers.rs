//! Stateless pre-coercion transforms
//!
//! Handlers run before type coercion, strictly in their declared order, each
//! one receiving the previous handler's output.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::constants::DEFAULT_REGEX_GROUP;
use crate::error::{FieldError, FieldResult};
use crate::value::Value;

/// A raw-value transform step preceding type coercion.
pub trait Handler: Send + Sync {
	fn handle(&self, value: Value) -> FieldResult<Value>;
}

/// Key-to-value lookup table with a default for absent keys.
///
/// With [`Mapper::ignore_case`], both the incoming value and every table key
/// are lower-cased before the lookup; the folded table is built lazily, once.
///
/// # Examples
///
/// ```
/// use remould_core::{Handler, Mapper, Value};
///
/// let mapper = Mapper::new([("Yes", true), ("No", false)]).ignore_case();
/// assert_eq!(mapper.handle(Value::from("yes")).unwrap(), Value::Bool(true));
/// assert_eq!(mapper.handle(Value::from("maybe")).unwrap(), Value::Null);
/// ```
#[derive(Debug)]
pub struct Mapper {
	mapping: HashMap<String, Value>,
	default: Value,
	ignore_case: bool,
	folded: OnceLock<HashMap<String, Value>>,
}

impl Mapper {
	pub fn new<K, V>(mapping: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		Self {
			mapping: mapping
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
			default: Value::Null,
			ignore_case: false,
			folded: OnceLock::new(),
		}
	}

	/// Value returned when the key is absent from the table.
	pub fn with_default(mut self, default: impl Into<Value>) -> Self {
		self.default = default.into();
		self
	}

	/// Makes lookups case-insensitive.
	pub fn ignore_case(mut self) -> Self {
		self.ignore_case = true;
		self
	}

	fn lookup(&self, key: &str) -> Option<&Value> {
		if self.ignore_case {
			let folded = self.folded.get_or_init(|| {
				self.mapping
					.iter()
					.map(|(k, v)| (k.to_lowercase(), v.clone()))
					.collect()
			});
			folded.get(&key.to_lowercase())
		} else {
			self.mapping.get(key)
		}
	}
}

impl Handler for Mapper {
	fn handle(&self, value: Value) -> FieldResult<Value> {
		let found = match &value {
			Value::Str(key) => self.lookup(key),
			_ => None,
		};
		Ok(found.cloned().unwrap_or_else(|| self.default.clone()))
	}
}

/// Which capture groups a [`RegexHandler`] extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureIndex {
	/// One capture group, 1-based.
	Group(usize),
	/// Every capture group, in order, as an array.
	All,
}

impl Default for CaptureIndex {
	fn default() -> Self {
		CaptureIndex::Group(DEFAULT_REGEX_GROUP)
	}
}

/// Extracts capture groups from a string via a compiled pattern.
///
/// No match is a pipeline error, not an empty result.
///
/// # Examples
///
/// ```
/// use remould_core::{Handler, RegexHandler, Value};
///
/// let handler = RegexHandler::new(r"([\w+\.]+)@([\w+\.]+)").unwrap().all_groups();
/// let groups = handler.handle(Value::from("username@mail.com")).unwrap();
/// assert_eq!(
///     groups,
///     Value::Array(vec![Value::from("username"), Value::from("mail.com")])
/// );
/// ```
#[derive(Debug)]
pub struct RegexHandler {
	pattern: regex::Regex,
	index: CaptureIndex,
}

impl RegexHandler {
	pub fn new(pattern: &str) -> Result<Self, regex::Error> {
		Ok(Self {
			pattern: regex::Regex::new(pattern)?,
			index: CaptureIndex::default(),
		})
	}

	/// Extract the given 1-based capture group instead of the first one.
	pub fn with_group(mut self, group: usize) -> Self {
		self.index = CaptureIndex::Group(group);
		self
	}

	/// Extract every capture group as an array.
	pub fn all_groups(mut self) -> Self {
		self.index = CaptureIndex::All;
		self
	}
}

impl Handler for RegexHandler {
	fn handle(&self, value: Value) -> FieldResult<Value> {
		let Value::Str(text) = &value else {
			return Err(FieldError::handler(format!(
				"expected a string, got {}",
				value.type_name()
			)));
		};

		let captures = self
			.pattern
			.captures(text)
			.ok_or_else(|| FieldError::Regex(self.pattern.as_str().to_string()))?;

		match self.index {
			CaptureIndex::Group(index) => {
				let group = captures
					.get(index)
					.ok_or_else(|| FieldError::Regex(self.pattern.as_str().to_string()))?;
				Ok(Value::Str(group.as_str().to_string()))
			}
			CaptureIndex::All => {
				let groups = (1..captures.len())
					.map(|index| match captures.get(index) {
						Some(group) => Value::Str(group.as_str().to_string()),
						None => Value::Null,
					})
					.collect();
				Ok(Value::Array(groups))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("Yes", Value::Bool(true))]
	#[case("no", Value::Bool(false))]
	#[case("unrelated", Value::Null)]
	fn test_mapper_case_folded(#[case] input: &str, #[case] expected: Value) {
		// Arrange
		let mapper = Mapper::new([("Yes", true), ("No", false)]).ignore_case();

		// Act
		let result = mapper.handle(Value::from(input)).unwrap();

		// Assert
		assert_eq!(result, expected);
	}

	#[rstest]
	fn test_mapper_exact_case_by_default() {
		let mapper = Mapper::new([("Yes", true)]);

		assert_eq!(mapper.handle(Value::from("Yes")).unwrap(), Value::Bool(true));
		assert_eq!(mapper.handle(Value::from("yes")).unwrap(), Value::Null);
	}

	#[rstest]
	fn test_mapper_custom_default() {
		let mapper = Mapper::new([("a", 1)]).with_default("absent");

		assert_eq!(
			mapper.handle(Value::from("b")).unwrap(),
			Value::from("absent")
		);
	}

	#[rstest]
	fn test_mapper_non_string_input_gets_default() {
		let mapper = Mapper::new([("1", "one")]);

		assert_eq!(mapper.handle(Value::Int(1)).unwrap(), Value::Null);
	}

	#[rstest]
	fn test_regex_first_group_by_default() {
		let handler = RegexHandler::new(r"(\w+)@(\w+)").unwrap();

		let result = handler.handle(Value::from("user@host")).unwrap();
		assert_eq!(result, Value::from("user"));
	}

	#[rstest]
	fn test_regex_explicit_group() {
		let handler = RegexHandler::new(r"(\w+)@(\w+)").unwrap().with_group(2);

		let result = handler.handle(Value::from("user@host")).unwrap();
		assert_eq!(result, Value::from("host"));
	}

	#[rstest]
	fn test_regex_all_groups() {
		let handler = RegexHandler::new(r"([\w+\.]+)@([\w+\.]+)")
			.unwrap()
			.all_groups();

		let result = handler.handle(Value::from("username@mail.com")).unwrap();
		assert_eq!(
			result,
			Value::Array(vec![Value::from("username"), Value::from("mail.com")])
		);
	}

	#[rstest]
	fn test_regex_no_match_is_an_error() {
		let handler = RegexHandler::new(r"(\d+)").unwrap();

		let result = handler.handle(Value::from("letters"));
		assert!(matches!(result, Err(FieldError::Regex(_))));
	}

	#[rstest]
	fn test_regex_missing_group_is_an_error() {
		let handler = RegexHandler::new(r"(\w+)").unwrap().with_group(3);

		let result = handler.handle(Value::from("word"));
		assert!(matches!(result, Err(FieldError::Regex(_))));
	}

	#[rstest]
	fn test_regex_invalid_pattern_fails_at_construction() {
		assert!(RegexHandler::new(r"((unbalanced").is_err());
	}
}
