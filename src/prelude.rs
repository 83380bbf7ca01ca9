//! Convenience re-exports for common usage.
//!
//! This module provides a single import for the most commonly used items
//! from the yaml-fixtures crate.
//!
//! # Example
//!
//! ```ignore
//! use yaml_fixtures::prelude::*;
//!
//! // Now you have access to:
//! // - Loader and report types
//! // - Entity model types
//! // - Store types
//! // - Error types
//! ```

// Error types
pub use crate::error::{FixtureError, FixtureResult, StoreError, StoreResult};

// Loader types
pub use crate::fixtures::{FixtureLoader, LoadReport, PersistFailure, TagRegistry};

// Entity model types
pub use crate::model::{
	EntityDescriptor, EntityInstance, EntityRef, FieldType, FieldValue, ModelSet,
};

// Store types
pub use crate::store::{EntityStore, MemoryStore};

// Module listing types
pub use crate::modules::{Module, ModuleGraph};
