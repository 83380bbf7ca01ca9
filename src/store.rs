//! Entity store boundary.
//!
//! The loader only ever calls [`EntityStore::manage`], one entity at a
//! time, inside a transaction the caller already opened. [`MemoryStore`]
//! is the in-crate implementation, used by tests and by store-side helpers
//! such as the sequence generator; production deployments implement
//! [`EntityStore`] over their own persistence layer.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::error::StoreResult;
use crate::model::{EntityRef, FieldValue};

/// A persistent store that can attach one entity at a time.
pub trait EntityStore: Send + Sync {
	/// Attaches an entity to the ambient transaction for eventual commit.
	///
	/// Attaching an already-managed entity is a no-op rather than an
	/// error. The loader treats any failure here as local to the entity:
	/// it is suppressed, tallied, and never aborts the surrounding load.
	fn manage(&self, entity: &EntityRef) -> StoreResult<()>;
}

/// In-memory entity store.
///
/// Keeps managed entities in attach order, which is what tests assert
/// commit ordering against.
#[derive(Default)]
pub struct MemoryStore {
	managed: RwLock<Vec<EntityRef>>,
}

impl MemoryStore {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the managed entities in attach order.
	pub fn managed(&self) -> Vec<EntityRef> {
		self.managed.read().clone()
	}

	/// Returns the number of managed entities.
	pub fn len(&self) -> usize {
		self.managed.read().len()
	}

	/// Returns true if no entities are managed.
	pub fn is_empty(&self) -> bool {
		self.managed.read().is_empty()
	}

	/// Returns the number of managed entities of the given type.
	pub fn count_of(&self, type_name: &str) -> usize {
		self.managed
			.read()
			.iter()
			.filter(|e| e.type_name() == type_name)
			.count()
	}

	/// Returns the first managed entity of the given type whose field
	/// equals the expected value.
	pub fn find_by(&self, type_name: &str, field: &str, expected: &FieldValue) -> Option<EntityRef> {
		self.managed
			.read()
			.iter()
			.find(|e| e.type_name() == type_name && e.get(field).as_ref() == Some(expected))
			.cloned()
	}

	/// Forgets all managed entities.
	pub fn clear(&self) {
		self.managed.write().clear();
	}
}

impl EntityStore for MemoryStore {
	fn manage(&self, entity: &EntityRef) -> StoreResult<()> {
		let mut managed = self.managed.write();
		if !managed.iter().any(|e| Arc::ptr_eq(e, entity)) {
			managed.push(entity.clone());
		}
		Ok(())
	}
}

impl std::fmt::Debug for MemoryStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MemoryStore")
			.field("managed", &self.len())
			.finish()
	}
}
