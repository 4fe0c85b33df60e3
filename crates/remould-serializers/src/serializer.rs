//! Field schema, record binding and aggregation

use indexmap::IndexMap;
use remould_core::{Field, FieldContainer, Value};

use crate::entity::EntitySource;
use crate::error::{SerializerError, SerializerResult};
use crate::meta::FieldMeta;

/// One bound record, aggregated as a plain ordered mapping or as a
/// field-backed container (see [`SerializerBuilder::as_container`]).
#[derive(Debug, Clone)]
pub enum Output {
	Mapping(IndexMap<String, Value>),
	Container(FieldContainer),
}

impl Output {
	/// The value rendered under a declared field name.
	pub fn get(&self, name: &str) -> Option<&Value> {
		match self {
			Output::Mapping(mapping) => mapping.get(name),
			Output::Container(container) => container.value(name),
		}
	}

	/// Flattens either representation into an ordered name-to-value mapping.
	pub fn into_mapping(self) -> IndexMap<String, Value> {
		match self {
			Output::Mapping(mapping) => mapping,
			Output::Container(container) => container.as_map(),
		}
	}
}

/// A schema of named fields bound to one or many external records.
///
/// Built once through [`Serializer::builder`] with an explicit, ordered
/// registration of `(name, field)` pairs; each `handle` call re-runs every
/// declared field's pipeline against a record's attributes.
///
/// # Examples
///
/// ```
/// use remould_serializers::Serializer;
/// use remould_core::{IntegerField, StringField, Value};
///
/// let mut serializer = Serializer::builder()
///     .field("id", IntegerField::new().build().unwrap())
///     .field("email", StringField::new().build().unwrap())
///     .build()
///     .unwrap();
///
/// let record = serde_json::json!({"id": "7", "email": "user@mail.com"});
/// let output = serializer.handle(&record).unwrap();
///
/// assert_eq!(output.get("id"), Some(&Value::Int(7)));
/// assert_eq!(serializer.is_valid(), Some(true));
/// ```
#[derive(Debug, Clone)]
pub struct Serializer {
	fields: IndexMap<String, (Field, FieldMeta)>,
	raise_on_error: bool,
	as_container: bool,
	ignore_undeclared: bool,
	is_valid: Option<bool>,
}

impl Serializer {
	pub fn builder() -> SerializerBuilder {
		SerializerBuilder::new()
	}

	/// Declared field names after projection, in registration order.
	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.fields.keys().map(String::as_str)
	}

	/// `None` before any handling, then whether the last `handle` /
	/// `handle_many` completed without a field failure.
	pub fn is_valid(&self) -> Option<bool> {
		self.is_valid
	}

	/// Binds one record: every declared field's pipeline runs against the
	/// record's attributes, and the results aggregate into an [`Output`].
	pub fn handle<S: EntitySource + ?Sized>(&mut self, record: &S) -> SerializerResult<Output> {
		match self.process_record(record) {
			Ok((output, valid)) => {
				self.is_valid = Some(valid);
				Ok(output)
			}
			Err(error) => {
				self.is_valid = Some(false);
				Err(error)
			}
		}
	}

	/// Binds a sequence of records independently, preserving input order.
	///
	/// When raising, the first failing record's error propagates and
	/// processing stops there. When not raising, a failing record's output
	/// slot is filled from each field's own fallback value so the output
	/// stays positionally aligned with the input.
	pub fn handle_many<S: EntitySource>(
		&mut self,
		records: &[S],
	) -> SerializerResult<Vec<Output>> {
		let mut outputs = Vec::with_capacity(records.len());
		let mut all_valid = true;

		for (index, record) in records.iter().enumerate() {
			tracing::debug!("serializing record {} of {}", index + 1, records.len());
			match self.process_record(record) {
				Ok((output, valid)) => {
					all_valid &= valid;
					outputs.push(output);
				}
				Err(error) => {
					self.is_valid = Some(false);
					return Err(error);
				}
			}
		}

		self.is_valid = Some(all_valid);
		Ok(outputs)
	}

	fn process_record<S: EntitySource + ?Sized>(
		&mut self,
		record: &S,
	) -> SerializerResult<(Output, bool)> {
		let attrs = record.attributes();
		match self.bind(&attrs) {
			Ok(()) => Ok((self.render(), true)),
			Err(error) if self.raise_on_error => Err(error),
			Err(error) => {
				tracing::warn!("record failed coercion, filling fallbacks: {error}");
				self.fill_fallbacks(&attrs);
				Ok((self.render(), false))
			}
		}
	}

	fn bind(&mut self, attrs: &IndexMap<String, Value>) -> SerializerResult<()> {
		let ignore_undeclared = self.ignore_undeclared;

		for (key, (field, meta)) in self.fields.iter_mut() {
			if meta.read_only {
				// read-only fields take their configured initial value, never
				// the record's
				if field.initial().is_some() {
					field
						.set_initial()
						.map_err(|error| SerializerError::field(key.clone(), error))?;
				}
				continue;
			}

			let raw = match attrs.get(key.as_str()) {
				Some(value) => value.clone(),
				None if meta.required => {
					return Err(SerializerError::MissingField(key.clone()));
				}
				None if ignore_undeclared => Value::Null,
				None => return Err(SerializerError::UndeclaredField(key.clone())),
			};
			if meta.required && raw.is_null() {
				return Err(SerializerError::MissingField(key.clone()));
			}

			field
				.set(raw)
				.map_err(|error| SerializerError::field(key.clone(), error))?;
		}
		Ok(())
	}

	fn fill_fallbacks(&mut self, attrs: &IndexMap<String, Value>) {
		for (key, (field, meta)) in self.fields.iter_mut() {
			if meta.read_only {
				continue;
			}
			let original = attrs.get(key.as_str()).cloned().unwrap_or(Value::Null);
			field.set_fallback(original);
		}
	}

	fn render(&self) -> Output {
		if self.as_container {
			let mut container = FieldContainer::new();
			for (key, (field, meta)) in &self.fields {
				if meta.write_only {
					continue;
				}
				container.insert(key.clone(), field.clone());
			}
			Output::Container(container)
		} else {
			let mut mapping = IndexMap::new();
			for (key, (field, meta)) in &self.fields {
				if meta.write_only {
					continue;
				}
				let name = field.name().unwrap_or(key).to_string();
				let value = field.value().cloned().unwrap_or(Value::Null);
				mapping.insert(name, value);
			}
			Output::Mapping(mapping)
		}
	}
}

/// Explicit, ordered registration of a serializer's fields and options.
#[derive(Clone)]
pub struct SerializerBuilder {
	fields: Vec<(String, Field, FieldMeta)>,
	only: Option<Vec<String>>,
	exclude: Option<Vec<String>>,
	raise_on_error: bool,
	as_container: bool,
	ignore_undeclared: bool,
}

impl SerializerBuilder {
	fn new() -> Self {
		Self {
			fields: Vec::new(),
			only: None,
			exclude: None,
			raise_on_error: true,
			as_container: false,
			ignore_undeclared: false,
		}
	}

	/// Registers a field under its declared name; registration order is the
	/// schema order.
	pub fn field(self, name: impl Into<String>, field: Field) -> Self {
		self.field_with(name, field, FieldMeta::default())
	}

	/// Registers a field with explicit serializer metadata.
	pub fn field_with(mut self, name: impl Into<String>, field: Field, meta: FieldMeta) -> Self {
		self.fields.push((name.into(), field, meta));
		self
	}

	/// Keeps only the named fields; mutually exclusive with `exclude`.
	pub fn only<N: Into<String>>(mut self, names: impl IntoIterator<Item = N>) -> Self {
		self.only = Some(names.into_iter().map(Into::into).collect());
		self
	}

	/// Drops the named fields; mutually exclusive with `only`.
	pub fn exclude<N: Into<String>>(mut self, names: impl IntoIterator<Item = N>) -> Self {
		self.exclude = Some(names.into_iter().map(Into::into).collect());
		self
	}

	/// Whether record errors propagate out of `handle` (the default) or only
	/// flip the `is_valid` flag while fallback values fill the output.
	pub fn with_raise_on_error(mut self, raise_on_error: bool) -> Self {
		self.raise_on_error = raise_on_error;
		self
	}

	/// Aggregate into a field-backed [`FieldContainer`] instead of a plain
	/// mapping.
	pub fn as_container(mut self) -> Self {
		self.as_container = true;
		self
	}

	/// Treat a declared field with no matching record attribute as null
	/// input instead of an `UndeclaredField` error.
	pub fn ignore_undeclared(mut self) -> Self {
		self.ignore_undeclared = true;
		self
	}

	/// Finishes the serializer: rejects contradictory projection options,
	/// applies the active projection and assigns each field's declared name
	/// from its registration name when unset.
	pub fn build(self) -> SerializerResult<Serializer> {
		if self.only.is_some() && self.exclude.is_some() {
			return Err(SerializerError::Config(
				"cannot use `only` and `exclude` together".to_string(),
			));
		}

		let mut fields = IndexMap::new();
		for (name, mut field, meta) in self.fields {
			let keep = match (&self.only, &self.exclude) {
				(Some(only), _) => only.iter().any(|n| n == &name),
				(_, Some(exclude)) => !exclude.iter().any(|n| n == &name),
				(None, None) => true,
			};
			if !keep {
				continue;
			}
			if field.name().is_none() {
				field.set_name(&name);
			}
			fields.insert(name, (field, meta));
		}

		Ok(Serializer {
			fields,
			raise_on_error: self.raise_on_error,
			as_container: self.as_container,
			ignore_undeclared: self.ignore_undeclared,
			is_valid: None,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use remould_core::{FieldError, IntegerField, StringField};
	use rstest::rstest;

	fn record(entries: &[(&str, Value)]) -> IndexMap<String, Value> {
		entries
			.iter()
			.map(|(k, v)| (k.to_string(), v.clone()))
			.collect()
	}

	#[rstest]
	fn test_only_and_exclude_conflict_at_build() {
		// Arrange
		let builder = Serializer::builder()
			.field("a", StringField::new().build().unwrap())
			.only(["a"])
			.exclude(["a"]);

		// Act
		let result = builder.build();

		// Assert
		assert!(matches!(result, Err(SerializerError::Config(_))));
	}

	#[rstest]
	fn test_only_projection_keeps_registration_order() {
		let serializer = Serializer::builder()
			.field("a", StringField::new().build().unwrap())
			.field("b", StringField::new().build().unwrap())
			.field("c", StringField::new().build().unwrap())
			.only(["c", "a"])
			.build()
			.unwrap();

		let names: Vec<&str> = serializer.field_names().collect();
		assert_eq!(names, vec!["a", "c"]);
	}

	#[rstest]
	fn test_exclude_projection() {
		let serializer = Serializer::builder()
			.field("a", StringField::new().build().unwrap())
			.field("b", StringField::new().build().unwrap())
			.exclude(["a"])
			.build()
			.unwrap();

		let names: Vec<&str> = serializer.field_names().collect();
		assert_eq!(names, vec!["b"]);
	}

	#[rstest]
	fn test_undeclared_field_is_reported() {
		let mut serializer = Serializer::builder()
			.field("missing", IntegerField::new().build().unwrap())
			.build()
			.unwrap();

		let result = serializer.handle(&record(&[("other", Value::Int(1))]));

		assert_eq!(
			result.unwrap_err(),
			SerializerError::UndeclaredField("missing".to_string())
		);
	}

	#[rstest]
	fn test_ignore_undeclared_binds_null() {
		let mut serializer = Serializer::builder()
			.field("missing", IntegerField::new().nullable().build().unwrap())
			.ignore_undeclared()
			.build()
			.unwrap();

		let output = serializer.handle(&record(&[])).unwrap();

		assert_eq!(output.get("missing"), Some(&Value::Null));
	}

	#[rstest]
	fn test_required_field_missing() {
		let mut serializer = Serializer::builder()
			.field_with(
				"email",
				StringField::new().build().unwrap(),
				FieldMeta::new().required(),
			)
			.build()
			.unwrap();

		let result = serializer.handle(&record(&[]));

		assert_eq!(
			result.unwrap_err(),
			SerializerError::MissingField("email".to_string())
		);
	}

	#[rstest]
	fn test_field_error_carries_the_declared_name() {
		let mut serializer = Serializer::builder()
			.field("age", IntegerField::new().build().unwrap())
			.build()
			.unwrap();

		let error = serializer
			.handle(&record(&[("age", Value::from("not a number"))]))
			.unwrap_err();

		assert!(matches!(
			&error,
			SerializerError::Field { name, .. } if name == "age"
		));
		assert!(matches!(error.field_error(), Some(FieldError::Handler(_))));
	}

	#[rstest]
	fn test_write_only_fields_are_bound_but_not_rendered() {
		let mut serializer = Serializer::builder()
			.field("visible", StringField::new().build().unwrap())
			.field_with(
				"secret",
				StringField::new().build().unwrap(),
				FieldMeta::new().write_only(),
			)
			.build()
			.unwrap();

		let output = serializer
			.handle(&record(&[
				("visible", Value::from("shown")),
				("secret", Value::from("hidden")),
			]))
			.unwrap();

		let mapping = output.into_mapping();
		assert!(mapping.contains_key("visible"));
		assert!(!mapping.contains_key("secret"));
	}

	#[rstest]
	fn test_read_only_fields_ignore_record_input() {
		let mut serializer = Serializer::builder()
			.field_with(
				"origin",
				StringField::new().with_initial("import").build().unwrap(),
				FieldMeta::new().read_only(),
			)
			.build()
			.unwrap();

		let output = serializer
			.handle(&record(&[("origin", Value::from("tampered"))]))
			.unwrap();

		assert_eq!(output.get("origin"), Some(&Value::from("import")));
	}
}
