//! Constructed entity instances.

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

use super::descriptor::EntityDescriptor;
use super::value::FieldValue;

/// Shared handle to a constructed entity.
///
/// Aliases in a document resolve to clones of the same handle; pointer
/// equality (`Arc::ptr_eq`) is the identity test.
pub type EntityRef = Arc<EntityInstance>;

/// A domain entity constructed from a tagged mapping node.
///
/// Fields live behind a lock so that back-references can be filled in after
/// the instance has been registered under its node identity. The lock also
/// lets store-side helpers (such as the sequence generator) advance fields
/// on managed instances.
pub struct EntityInstance {
	descriptor: Arc<EntityDescriptor>,
	fields: RwLock<IndexMap<String, FieldValue>>,
}

impl EntityInstance {
	/// Creates an instance of the described type with no fields set.
	pub fn new(descriptor: Arc<EntityDescriptor>) -> Self {
		Self {
			descriptor,
			fields: RwLock::new(IndexMap::new()),
		}
	}

	/// Returns the simple name of the entity type.
	pub fn type_name(&self) -> &str {
		self.descriptor.name()
	}

	/// Returns the descriptor this instance was constructed from.
	pub fn descriptor(&self) -> &Arc<EntityDescriptor> {
		&self.descriptor
	}

	/// Sets a field, replacing any previous value.
	pub fn set(&self, name: impl Into<String>, value: FieldValue) {
		self.fields.write().insert(name.into(), value);
	}

	/// Returns a clone of a field value, if the field is set.
	pub fn get(&self, name: &str) -> Option<FieldValue> {
		self.fields.read().get(name).cloned()
	}

	/// Returns a snapshot of all fields in insertion order.
	pub fn fields(&self) -> IndexMap<String, FieldValue> {
		self.fields.read().clone()
	}

	/// Renders the instance as JSON for snapshots and diagnostics.
	///
	/// Entity-valued fields render shallowly (type name only) so cyclic
	/// graphs stay printable.
	pub fn to_json(&self) -> serde_json::Value {
		let mut object = serde_json::Map::new();
		object.insert(
			"$type".to_string(),
			serde_json::Value::String(self.type_name().to_string()),
		);
		for (key, value) in self.fields() {
			object.insert(key, value.to_json_shallow());
		}
		serde_json::Value::Object(object)
	}
}

impl fmt::Debug for EntityInstance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EntityInstance")
			.field("type", &self.type_name())
			.field("fields", &self.fields.read().len())
			.finish()
	}
}
