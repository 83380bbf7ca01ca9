//! The fixture loader and the reverse-order committer.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::construct::GraphConstructor;
use super::registry::TagRegistry;
use crate::document::DocumentTree;
use crate::error::{FixtureError, FixtureResult};
use crate::model::{EntityRef, ModelSet};
use crate::store::EntityStore;

/// Outcome of one load call.
///
/// Per-entity persistence failures never fail the call; they are tallied
/// here instead so the caller can inspect what actually attached.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
	/// Number of entities constructed and offered to the store.
	pub attempted: usize,
	/// Number of entities the store accepted.
	pub persisted: usize,
	/// Suppressed per-entity failures, in commit order.
	pub failures: Vec<PersistFailure>,
}

impl LoadReport {
	fn new(attempted: usize) -> Self {
		Self {
			attempted,
			persisted: 0,
			failures: Vec::new(),
		}
	}

	/// Returns true if every constructed entity attached to the store.
	pub fn all_persisted(&self) -> bool {
		self.failures.is_empty()
	}

	/// Returns the number of entities that failed to attach.
	pub fn failed(&self) -> usize {
		self.failures.len()
	}
}

/// One suppressed persistence failure.
#[derive(Debug, Clone, Serialize)]
pub struct PersistFailure {
	/// Simple type name of the entity that failed to attach.
	pub entity_type: String,
	/// The store's failure message.
	pub message: String,
}

/// Loads YAML fixture documents into an entity store.
///
/// Documents are looked up under the fixture directory (`fixtures` by
/// default). The loader opens no transaction of its own: it assumes the
/// caller's transaction spans the whole call, and whether that transaction
/// ultimately commits is the caller's decision.
///
/// # Example
///
/// ```ignore
/// use yaml_fixtures::prelude::*;
///
/// let loader = FixtureLoader::new(models);
/// let store = MemoryStore::new();
/// let report = loader.load(&store, "demo-data.yml")?;
/// assert!(report.all_persisted());
/// ```
#[derive(Debug, Clone)]
pub struct FixtureLoader {
	models: ModelSet,
	base_dir: PathBuf,
}

impl FixtureLoader {
	/// Creates a loader over the host's entity types, reading from the
	/// default `fixtures` directory.
	pub fn new(models: ModelSet) -> Self {
		Self {
			models,
			base_dir: PathBuf::from("fixtures"),
		}
	}

	/// Sets the directory fixture names are resolved against.
	pub fn with_base_dir(mut self, base_dir: impl AsRef<Path>) -> Self {
		self.base_dir = base_dir.as_ref().to_path_buf();
		self
	}

	/// Returns the directory fixture names are resolved against.
	pub fn base_dir(&self) -> &Path {
		&self.base_dir
	}

	/// Loads the named fixture and commits the constructed entities.
	///
	/// The call moves through read, parse, construct, and commit in order.
	/// Construction caches by node identity, so aliases and cycles resolve
	/// to shared instances; commit walks the construction record in reverse
	/// and tolerates individual store failures.
	///
	/// # Errors
	///
	/// - [`FixtureError::MissingFixture`] if the named resource does not
	///   exist; nothing is parsed or persisted.
	/// - [`FixtureError::Parse`] if the document is malformed; nothing is
	///   persisted.
	/// - [`FixtureError::UnknownTag`] if a tag has no registered entity
	///   type; nothing is persisted.
	///
	/// Per-entity store failures are not errors; see [`LoadReport`].
	pub fn load(&self, store: &dyn EntityStore, name: &str) -> FixtureResult<LoadReport> {
		let path = self.base_dir.join(name);
		let text = std::fs::read_to_string(&path).map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				FixtureError::MissingFixture(name.to_string())
			} else {
				FixtureError::Io(e)
			}
		})?;

		let tree = DocumentTree::parse(&text)?;
		let registry = TagRegistry::from_models(&self.models);

		let mut constructor = GraphConstructor::new(&tree, &registry);
		for root in tree.roots().collect::<Vec<_>>() {
			constructor.construct(root)?;
		}
		let record = constructor.into_record();
		debug!(fixture = name, entities = record.len(), "fixture constructed");

		Ok(commit(store, record))
	}
}

/// Commits the construction record in exactly the reverse of
/// first-construction order.
///
/// Reversal is the contract, not a dependency ordering: each entity is
/// offered to the store once, failures are suppressed and tallied, and
/// iteration always continues to the next entity. No retries.
fn commit(store: &dyn EntityStore, record: Vec<EntityRef>) -> LoadReport {
	let mut report = LoadReport::new(record.len());
	for entity in record.into_iter().rev() {
		match store.manage(&entity) {
			Ok(()) => report.persisted += 1,
			Err(error) => {
				warn!(
					entity_type = entity.type_name(),
					error = %error,
					"entity not persisted, continuing"
				);
				report.failures.push(PersistFailure {
					entity_type: entity.type_name().to_string(),
					message: error.to_string(),
				});
			}
		}
	}
	report
}
