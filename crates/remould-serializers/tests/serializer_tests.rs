//! Integration tests for record binding

use indexmap::IndexMap;
use remould_core::{
	ArrayField, DateField, EmailValidator, FieldError, FloatField, IntegerField, StringField,
	Value,
};
use remould_serializers::{EntitySource, FieldMeta, Output, Serializer, SerializerError};
use rstest::rstest;

fn user_serializer() -> Serializer {
	Serializer::builder()
		.field("id", IntegerField::new().build().unwrap())
		.field(
			"email",
			StringField::new()
				.with_validator(EmailValidator::new())
				.build()
				.unwrap(),
		)
		.field("first_name", StringField::new().build().unwrap())
		.build()
		.unwrap()
}

fn user_record(id: &str, email: &str, first_name: &str) -> IndexMap<String, Value> {
	let mut record = IndexMap::new();
	record.insert("id".to_string(), Value::from(id));
	record.insert("email".to_string(), Value::from(email));
	record.insert("first_name".to_string(), Value::from(first_name));
	record
}

#[rstest]
fn test_single_record_binding() {
	// Arrange
	let mut serializer = user_serializer();
	let record = user_record("7", "cyrill@mail.com", "Cyrill");

	// Act
	let output = serializer.handle(&record).unwrap();

	// Assert
	assert_eq!(output.get("id"), Some(&Value::Int(7)));
	assert_eq!(output.get("email"), Some(&Value::from("cyrill@mail.com")));
	assert_eq!(output.get("first_name"), Some(&Value::from("Cyrill")));
	assert_eq!(serializer.is_valid(), Some(true));
}

#[rstest]
fn test_output_follows_registration_order() {
	let mut serializer = user_serializer();

	let output = serializer
		.handle(&user_record("1", "a@b.com", "A"))
		.unwrap();

	let keys: Vec<String> = output.into_mapping().keys().cloned().collect();
	assert_eq!(keys, vec!["id", "email", "first_name"]);
}

#[rstest]
fn test_json_record_binding() {
	let mut serializer = user_serializer();
	let record = serde_json::json!({
		"id": "42",
		"email": "user@mail.com",
		"first_name": "June"
	});

	let output = serializer.handle(&record).unwrap();

	assert_eq!(output.get("id"), Some(&Value::Int(42)));
}

#[rstest]
fn test_many_mode_preserves_input_order() {
	let mut serializer = user_serializer();
	let records = vec![
		user_record("1", "one@mail.com", "One"),
		user_record("2", "two@mail.com", "Two"),
	];

	let outputs = serializer.handle_many(&records).unwrap();

	assert_eq!(outputs.len(), 2);
	assert_eq!(outputs[0].get("id"), Some(&Value::Int(1)));
	assert_eq!(outputs[1].get("id"), Some(&Value::Int(2)));
	assert_eq!(serializer.is_valid(), Some(true));
}

#[rstest]
fn test_many_mode_raises_at_the_failing_record() {
	let mut serializer = user_serializer();
	let records = vec![
		user_record("1", "one@mail.com", "One"),
		user_record("oops", "two@mail.com", "Two"),
	];

	let error = serializer.handle_many(&records).unwrap_err();

	assert!(matches!(
		&error,
		SerializerError::Field { name, .. } if name == "id"
	));
	assert_eq!(serializer.is_valid(), Some(false));
}

#[rstest]
fn test_many_mode_fallback_keeps_positional_alignment() {
	// a failing record is rendered from each field's own fallback value
	// instead of being dropped
	let mut serializer = Serializer::builder()
		.field(
			"id",
			IntegerField::new().with_default(-1).build().unwrap(),
		)
		.field(
			"email",
			StringField::new()
				.with_default("unknown@mail.com")
				.with_validator(EmailValidator::new())
				.build()
				.unwrap(),
		)
		.with_raise_on_error(false)
		.build()
		.unwrap();

	let mut bad = IndexMap::new();
	bad.insert("id".to_string(), Value::from("not-a-number"));
	bad.insert("email".to_string(), Value::from("broken#mail"));

	let records = vec![
		user_record("1", "one@mail.com", "One"),
		bad,
		user_record("3", "three@mail.com", "Three"),
	];

	let outputs = serializer.handle_many(&records).unwrap();

	assert_eq!(outputs.len(), 3);
	assert_eq!(outputs[0].get("id"), Some(&Value::Int(1)));
	assert_eq!(outputs[1].get("id"), Some(&Value::Int(-1)));
	assert_eq!(outputs[1].get("email"), Some(&Value::from("unknown@mail.com")));
	assert_eq!(outputs[2].get("id"), Some(&Value::Int(3)));
	assert_eq!(serializer.is_valid(), Some(false));
}

#[rstest]
fn test_single_mode_fallback_flips_is_valid() {
	let mut serializer = Serializer::builder()
		.field(
			"age",
			IntegerField::new().with_default(0).build().unwrap(),
		)
		.with_raise_on_error(false)
		.build()
		.unwrap();

	let mut record = IndexMap::new();
	record.insert("age".to_string(), Value::from("unknown"));

	let output = serializer.handle(&record).unwrap();

	assert_eq!(output.get("age"), Some(&Value::Int(0)));
	assert_eq!(serializer.is_valid(), Some(false));
}

#[rstest]
fn test_container_output_is_json_encodable() {
	let mut serializer = Serializer::builder()
		.field("id", IntegerField::new().build().unwrap())
		.field("score", FloatField::new().build().unwrap())
		.as_container()
		.build()
		.unwrap();

	let mut record = IndexMap::new();
	record.insert("id".to_string(), Value::from("5"));
	record.insert("score".to_string(), Value::from("7,5"));

	let output = serializer.handle(&record).unwrap();

	let Output::Container(container) = output else {
		panic!("expected container output");
	};
	assert_eq!(
		serde_json::to_string(&container).unwrap(),
		r#"{"id":5,"score":7.5}"#
	);
}

#[rstest]
fn test_is_valid_is_unset_before_handling() {
	let serializer = user_serializer();
	assert_eq!(serializer.is_valid(), None);
}

#[rstest]
fn test_field_level_raise_override_inside_serializer() {
	// the field swallows its own failure, so the serializer stays valid
	let mut serializer = Serializer::builder()
		.field(
			"id",
			IntegerField::new()
				.with_default(0)
				.with_raise_on_error(false)
				.build()
				.unwrap(),
		)
		.build()
		.unwrap();

	let mut record = IndexMap::new();
	record.insert("id".to_string(), Value::from("garbage"));

	let output = serializer.handle(&record).unwrap();

	assert_eq!(output.get("id"), Some(&Value::Int(0)));
	assert_eq!(serializer.is_valid(), Some(true));
}

#[rstest]
fn test_array_and_date_fields_through_a_serializer() {
	let mut serializer = Serializer::builder()
		.field(
			"tags",
			ArrayField::new(IntegerField::new().build().unwrap())
				.build()
				.unwrap(),
		)
		.field("joined", DateField::new().as_string().build().unwrap())
		.build()
		.unwrap();

	let record = serde_json::json!({
		"tags": "1-2-3",
		"joined": "2021-06-15"
	});

	let output = serializer.handle(&record).unwrap();

	assert_eq!(
		output.get("tags"),
		Some(&Value::Array(vec![
			Value::Int(1),
			Value::Int(2),
			Value::Int(3)
		]))
	);
	assert_eq!(output.get("joined"), Some(&Value::from("15.06.2021")));
}

#[rstest]
fn test_extra_record_attributes_are_filtered_out() {
	let mut serializer = Serializer::builder()
		.field("id", IntegerField::new().build().unwrap())
		.build()
		.unwrap();

	let record = serde_json::json!({"id": 1, "unrelated": "ignored"});

	let output = serializer.handle(&record).unwrap();
	let mapping = output.into_mapping();

	assert_eq!(mapping.len(), 1);
	assert!(!mapping.contains_key("unrelated"));
}

#[rstest]
fn test_attributes_capability_is_the_only_record_requirement() {
	// anything exposing an attribute map can be bound
	struct Row {
		id: i64,
	}

	impl EntitySource for Row {
		fn attributes(&self) -> IndexMap<String, Value> {
			let mut attrs = IndexMap::new();
			attrs.insert("id".to_string(), Value::Int(self.id));
			attrs
		}
	}

	let mut serializer = Serializer::builder()
		.field("id", IntegerField::new().build().unwrap())
		.build()
		.unwrap();

	let output = serializer.handle(&Row { id: 9 }).unwrap();

	assert_eq!(output.get("id"), Some(&Value::Int(9)));
}

#[rstest]
fn test_required_null_attribute_is_missing() {
	let mut serializer = Serializer::builder()
		.field_with(
			"email",
			StringField::new().nullable().build().unwrap(),
			FieldMeta::new().required(),
		)
		.build()
		.unwrap();

	let mut record = IndexMap::new();
	record.insert("email".to_string(), Value::Null);

	let error = serializer.handle(&record).unwrap_err();

	assert_eq!(error, SerializerError::MissingField("email".to_string()));
}

#[rstest]
fn test_field_error_kind_is_observable_through_the_serializer() {
	let mut serializer = user_serializer();
	let record = user_record("1", "broken#mail", "One");

	let error = serializer.handle(&record).unwrap_err();

	assert!(matches!(
		error.field_error(),
		Some(FieldError::Validation { .. })
	));
}
