//! Tag-to-type bindings.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{FixtureError, FixtureResult};
use crate::model::{EntityDescriptor, ModelSet};

/// Bindings from document tags to entity types.
///
/// Built once per load call by enumerating the host's [`ModelSet`]; each
/// type named `Name` binds to the tag `!Name:`. The registry is immutable
/// for the duration of the call and is never promoted to shared state.
#[derive(Debug, Default)]
pub struct TagRegistry {
	bindings: HashMap<String, Arc<EntityDescriptor>>,
}

impl TagRegistry {
	/// Builds the bindings for one load call.
	pub fn from_models(models: &ModelSet) -> Self {
		let mut bindings = HashMap::with_capacity(models.len());
		for descriptor in models.iter() {
			bindings.insert(descriptor.tag(), descriptor.clone());
		}
		Self { bindings }
	}

	/// Resolves a tag to its bound entity type.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::UnknownTag`] if no binding exists.
	pub fn resolve(&self, tag: &str) -> FixtureResult<Arc<EntityDescriptor>> {
		self.bindings
			.get(tag)
			.cloned()
			.ok_or_else(|| FixtureError::UnknownTag(tag.to_string()))
	}

	/// Returns true if the tag has a binding.
	pub fn contains(&self, tag: &str) -> bool {
		self.bindings.contains_key(tag)
	}

	/// Returns the number of bindings.
	pub fn len(&self) -> usize {
		self.bindings.len()
	}

	/// Returns true if no bindings exist.
	pub fn is_empty(&self) -> bool {
		self.bindings.is_empty()
	}
}
