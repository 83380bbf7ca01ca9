//! YAML fixture loading for dynamically-described entity models.
//!
//! This crate turns tagged YAML documents into graphs of entity instances
//! and hands them to a persistent store:
//!
//! - **Tagged construction**: `!Circle:` mappings become `Circle` entities
//! - **Reference identity**: anchors and aliases resolve to shared instances,
//!   so cyclic object graphs load correctly
//! - **Temporal coercion**: date-like scalars become dates, timestamps, or
//!   UTC instants according to the declared field type
//! - **Tolerant persistence**: per-entity store failures are suppressed and
//!   tallied, never aborting the load
//!
//! # Quick Start
//!
//! Create a fixture file (`fixtures/demo-data.yml`):
//!
//! ```yaml
//! - !Circle: &family
//!   code: family
//!   name: Family
//!
//! - !Contact:
//!   firstName: John
//!   lastName: Smith
//!   dateOfBirth: 1980-06-15
//!   circles:
//!     - *family
//! ```
//!
//! Describe the entity types and load:
//!
//! ```ignore
//! use yaml_fixtures::prelude::*;
//!
//! let models = ModelSet::new()
//! 	.register(
//! 		EntityDescriptor::new("Circle")
//! 			.field("code", FieldType::Text)
//! 			.field("name", FieldType::Text),
//! 	)
//! 	.register(
//! 		EntityDescriptor::new("Contact")
//! 			.field("firstName", FieldType::Text)
//! 			.field("lastName", FieldType::Text)
//! 			.field("dateOfBirth", FieldType::Date)
//! 			.field("circles", FieldType::List),
//! 	);
//!
//! let loader = FixtureLoader::new(models);
//! let store = MemoryStore::new();
//! let report = loader.load(&store, "demo-data.yml")?;
//! assert!(report.all_persisted());
//! ```
//!
//! # Architecture
//!
//! - [`DocumentTree`](document::DocumentTree) - parsed YAML with stable node
//!   identities; aliases point at the anchored node itself
//! - [`ModelSet`](model::ModelSet) / [`EntityDescriptor`](model::EntityDescriptor) -
//!   the host-declared entity types and their field types
//! - [`TagRegistry`](fixtures::TagRegistry) - closed mapping from document
//!   tags to entity types
//! - [`GraphConstructor`](fixtures::GraphConstructor) - identity-tracked
//!   recursive construction with a first-construction-order record
//! - [`FixtureLoader`](fixtures::FixtureLoader) - read, parse, construct,
//!   then commit the record in reverse with a [`LoadReport`](fixtures::LoadReport)
//! - [`EntityStore`](store::EntityStore) - the persistence seam;
//!   [`MemoryStore`](store::MemoryStore) is the in-crate implementation

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod document;
pub mod error;
pub mod fixtures;
pub mod model;
pub mod modules;
pub mod prelude;
pub mod sequence;
pub mod store;

// Re-export commonly used types at crate root
pub use error::{FixtureError, FixtureResult, StoreError, StoreResult};
pub use fixtures::{FixtureLoader, LoadReport};
pub use model::{EntityDescriptor, EntityInstance, EntityRef, FieldType, FieldValue, ModelSet};
pub use store::{EntityStore, MemoryStore};
