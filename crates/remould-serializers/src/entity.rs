//! The external-record capability contract

use std::collections::HashMap;

use indexmap::IndexMap;
use remould_core::Value;

/// The one capability an external record must expose: its attribute-name to
/// raw-value mapping. The serializer never inspects concrete record shapes
/// beyond this.
pub trait EntitySource {
	fn attributes(&self) -> IndexMap<String, Value>;
}

impl EntitySource for IndexMap<String, Value> {
	fn attributes(&self) -> IndexMap<String, Value> {
		self.clone()
	}
}

impl EntitySource for HashMap<String, Value> {
	fn attributes(&self) -> IndexMap<String, Value> {
		self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
	}
}

impl EntitySource for serde_json::Map<String, serde_json::Value> {
	fn attributes(&self) -> IndexMap<String, Value> {
		self.iter()
			.map(|(k, v)| (k.clone(), Value::from(v.clone())))
			.collect()
	}
}

impl EntitySource for serde_json::Value {
	/// Non-object JSON values expose no attributes.
	fn attributes(&self) -> IndexMap<String, Value> {
		match self {
			serde_json::Value::Object(map) => map.attributes(),
			_ => IndexMap::new(),
		}
	}
}
