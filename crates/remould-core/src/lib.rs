//! Core coercion pipeline for remould
//!
//! This crate turns raw scalar input (spreadsheet cells, form values,
//! loosely-typed external records) into typed, validated values according to
//! a per-field configuration:
//!
//! - [`Value`]: the dynamic value carried through every pipeline stage
//! - [`Field`]: one configured coercion rule and its ordered pipeline
//!   (null check, skip check, handlers, method, type coercion, validators)
//! - [`handlers`]: stateless pre-coercion transforms ([`Mapper`],
//!   [`RegexHandler`])
//! - [`validators`]: stateless post-coercion checks
//! - [`FieldContainer`]: an insertion-ordered name-to-field registry with a
//!   JSON-encodable export
//!
//! Record binding lives in the `remould-serializers` crate.

pub mod constants;
pub mod container;
pub mod error;
pub mod field;
pub mod fields;
pub mod handlers;
pub mod validators;
pub mod value;

pub use container::FieldContainer;
pub use error::{FieldError, FieldResult};
pub use field::{Coercion, Fallback, Field, FieldBuilder, Method};
pub use fields::{
	ArrayField, ArrayOptions, DateField, DateOptions, DatePart, FloatField, IntegerField,
	SizeLimit, StringField,
};
pub use handlers::{CaptureIndex, Handler, Mapper, RegexHandler};
pub use validators::{
	EmailValidator, MaxLengthValidator, MinLengthValidator, RangeValidator, RegexValidator,
	Validator,
};
pub use value::Value;
