//! Insertion-ordered field registry

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::field::Field;
use crate::value::Value;

/// An insertion-ordered registry of container key to [`Field`].
///
/// Keys are unique (inserting an existing key replaces the field in place)
/// and every bulk export follows insertion order. The projection produced by
/// [`FieldContainer::as_map`] is keyed by each field's *declared* name, which
/// may differ from the container key; the key is only a fallback for unnamed
/// fields.
///
/// # Examples
///
/// ```
/// use remould_core::{Field, FieldContainer, Value};
///
/// let mut email = Field::builder().with_name("email").build().unwrap();
/// email.set("user@mail.com").unwrap();
///
/// let mut container = FieldContainer::new();
/// container.insert("contact", email);
///
/// assert_eq!(container.value("contact"), Some(&Value::from("user@mail.com")));
/// assert_eq!(
///     serde_json::to_string(&container).unwrap(),
///     r#"{"email":"user@mail.com"}"#
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldContainer {
	inner: IndexMap<String, Field>,
}

impl FieldContainer {
	pub fn new() -> Self {
		Self {
			inner: IndexMap::new(),
		}
	}

	/// Inserts a field under a container key, replacing any previous field
	/// with the same key without disturbing its position.
	pub fn insert(&mut self, key: impl Into<String>, field: Field) {
		self.inner.insert(key.into(), field);
	}

	pub fn field(&self, key: &str) -> Option<&Field> {
		self.inner.get(key)
	}

	pub fn field_mut(&mut self, key: &str) -> Option<&mut Field> {
		self.inner.get_mut(key)
	}

	/// Removes a field, preserving the order of the remaining entries.
	pub fn remove(&mut self, key: &str) -> Option<Field> {
		self.inner.shift_remove(key)
	}

	/// The ready value stored under a container key; `None` when the key is
	/// absent or the field has not completed a `set`.
	pub fn value(&self, key: &str) -> Option<&Value> {
		self.inner.get(key).and_then(|field| field.value().ok())
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.inner.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.inner.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
		self.inner.iter().map(|(key, field)| (key.as_str(), field))
	}

	/// Bulk projection in insertion order, keyed by each field's declared
	/// name (container key for unnamed fields). Unready fields render null.
	pub fn as_map(&self) -> IndexMap<String, Value> {
		self.inner
			.iter()
			.map(|(key, field)| {
				let name = field.name().unwrap_or(key).to_string();
				let value = field.value().cloned().unwrap_or(Value::Null);
				(name, value)
			})
			.collect()
	}
}

impl Serialize for FieldContainer {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let map = self.as_map();
		let mut out = serializer.serialize_map(Some(map.len()))?;
		for (name, value) in &map {
			out.serialize_entry(name, value)?;
		}
		out.end()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::fields::IntegerField;
	use rstest::rstest;

	fn ready_field(name: Option<&str>, value: i64) -> Field {
		let builder = IntegerField::new();
		let builder = match name {
			Some(name) => builder.with_name(name),
			None => builder,
		};
		let mut field = builder.build().unwrap();
		field.set(value).unwrap();
		field
	}

	#[rstest]
	fn test_insertion_order_is_preserved() {
		// Arrange
		let mut container = FieldContainer::new();
		container.insert("b", ready_field(None, 2));
		container.insert("a", ready_field(None, 1));
		container.insert("c", ready_field(None, 3));

		// Act
		let keys: Vec<&str> = container.keys().collect();

		// Assert
		assert_eq!(keys, vec!["b", "a", "c"]);
	}

	#[rstest]
	fn test_replacing_a_key_keeps_its_position() {
		let mut container = FieldContainer::new();
		container.insert("a", ready_field(None, 1));
		container.insert("b", ready_field(None, 2));
		container.insert("a", ready_field(None, 10));

		let keys: Vec<&str> = container.keys().collect();
		assert_eq!(keys, vec!["a", "b"]);
		assert_eq!(container.value("a"), Some(&Value::Int(10)));
	}

	#[rstest]
	fn test_as_map_prefers_declared_names_over_keys() {
		let mut container = FieldContainer::new();
		container.insert("container_key", ready_field(Some("declared"), 5));
		container.insert("unnamed", ready_field(None, 6));

		let map = container.as_map();
		let entries: Vec<(&str, &Value)> =
			map.iter().map(|(k, v)| (k.as_str(), v)).collect();
		assert_eq!(
			entries,
			vec![
				("declared", &Value::Int(5)),
				("unnamed", &Value::Int(6)),
			]
		);
	}

	#[rstest]
	fn test_unready_field_renders_null() {
		let mut container = FieldContainer::new();
		container.insert("pending", IntegerField::new().build().unwrap());

		assert_eq!(container.value("pending"), None);
		assert_eq!(container.as_map()["pending"], Value::Null);
	}

	#[rstest]
	fn test_json_export_follows_insertion_order() {
		let mut container = FieldContainer::new();
		container.insert("second", ready_field(None, 2));
		container.insert("first", ready_field(None, 1));

		let json = serde_json::to_string(&container).unwrap();
		assert_eq!(json, r#"{"second":2,"first":1}"#);
	}

	#[rstest]
	fn test_remove_preserves_order() {
		let mut container = FieldContainer::new();
		container.insert("a", ready_field(None, 1));
		container.insert("b", ready_field(None, 2));
		container.insert("c", ready_field(None, 3));

		container.remove("b");

		let keys: Vec<&str> = container.keys().collect();
		assert_eq!(keys, vec!["a", "c"]);
	}
}
