//! Serializer-side field metadata

/// Metadata a serializer attaches alongside a field; orthogonal to the
/// field's own coercion configuration.
///
/// - `required`: binding fails when the record attribute is absent or null
/// - `read_only`: the field is never bound from input; its configured
///   initial value is rendered instead
/// - `write_only`: the field is bound but excluded from rendered output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldMeta {
	pub required: bool,
	pub read_only: bool,
	pub write_only: bool,
}

impl FieldMeta {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn read_only(mut self) -> Self {
		self.read_only = true;
		self
	}

	pub fn write_only(mut self) -> Self {
		self.write_only = true;
		self
	}
}
