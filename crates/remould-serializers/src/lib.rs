//! Record binding for remould
//!
//! A [`Serializer`] owns an ordered schema of named fields and binds them to
//! one external record (or many), driving each field's pipeline and
//! aggregating the results into an ordered mapping or a field-backed
//! container. Records only need to satisfy the [`EntitySource`] capability:
//! an attribute-name to raw-value mapping.

pub mod entity;
pub mod error;
pub mod meta;
pub mod serializer;

pub use entity::EntitySource;
pub use error::{SerializerError, SerializerResult};
pub use meta::FieldMeta;
pub use serializer::{Output, Serializer, SerializerBuilder};
