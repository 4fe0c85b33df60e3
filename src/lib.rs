//! # remould
//!
//! A declarative value coercion and validation pipeline for loosely-typed
//! records: raw scalar input (spreadsheet cells, form values, external
//! records) is reworked into typed, validated values according to per-field
//! configuration.
//!
//! remould follows Rust's composition patterns: a field is one struct
//! composed with a tagged coercion strategy, handlers and validators plug in
//! behind traits, and serializers are built by explicit, ordered field
//! registration.
//!
//! ## Feature Flags
//!
//! - `serializers` (default) - record binding layer ([`Serializer`],
//!   [`EntitySource`])
//!
//! ## Quick start
//!
//! ```
//! use remould::{FloatField, Value};
//!
//! let mut price = FloatField::new().build().unwrap();
//! assert_eq!(price.set("222,00").unwrap(), Value::Float(222.0));
//! assert_eq!(price.set("4 3/2").unwrap(), Value::Float(5.5));
//! ```

pub mod core;
#[cfg(feature = "serializers")]
pub mod serializers;

pub use remould_core::{
	ArrayField, CaptureIndex, Coercion, DateField, DatePart, EmailValidator, Fallback, Field,
	FieldBuilder, FieldContainer, FieldError, FieldResult, FloatField, Handler, IntegerField,
	Mapper, MaxLengthValidator, MinLengthValidator, RangeValidator, RegexHandler, RegexValidator,
	SizeLimit, StringField, Validator, Value,
};

#[cfg(feature = "serializers")]
pub use remould_serializers::{
	EntitySource, FieldMeta, Output, Serializer, SerializerBuilder, SerializerError,
	SerializerResult,
};
