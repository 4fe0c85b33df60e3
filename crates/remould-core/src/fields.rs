// Typed field builders and their coercion strategies
pub mod array_field;
pub mod date_field;
pub mod float_field;
pub mod integer_field;
pub mod string_field;

pub use array_field::{ArrayField, ArrayOptions, SizeLimit};
pub use date_field::{DateField, DateOptions, DatePart};
pub use float_field::FloatField;
pub use integer_field::IntegerField;
pub use string_field::StringField;

/// First separator from the priority list that occurs in the text.
pub(crate) fn detect_separator(separators: &[char], text: &str) -> Option<char> {
	separators.iter().copied().find(|&sep| text.contains(sep))
}
