//! Error types for fixture loading and persistence.
//!
//! Loading errors (`FixtureError`) are fatal and abort the whole call before
//! anything is persisted. Store errors (`StoreError`) are raised per entity
//! during the commit step and are tallied rather than propagated.

use thiserror::Error;

/// Errors that abort a fixture load.
#[derive(Debug, Error)]
pub enum FixtureError {
	/// No resource exists under the configured fixture directory.
	#[error("No such fixture found: {0}")]
	MissingFixture(String),

	/// The fixture document is not well-formed.
	#[error("Parse error: {0}")]
	Parse(String),

	/// A node carries a tag with no registered entity type.
	#[error("Unknown tag: {0}")]
	UnknownTag(String),

	/// I/O operation failed while reading the fixture.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

/// Result type alias for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;

/// Errors raised by an entity store.
#[derive(Debug, Error)]
pub enum StoreError {
	/// The store refused to attach the entity.
	#[error("Persistence failed for {entity_type}: {message}")]
	Persistence {
		/// Entity type that failed to attach.
		entity_type: String,
		/// Store-provided failure message.
		message: String,
	},

	/// No stored entity matched the lookup.
	#[error("Not found: {0}")]
	NotFound(String),

	/// A stored entity holds a field the caller cannot use.
	#[error("Invalid field {field}: {message}")]
	InvalidField {
		/// Field that was rejected.
		field: String,
		/// Why the field was rejected.
		message: String,
	},
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_missing_fixture_message() {
		let error = FixtureError::MissingFixture("demo-data.yml".to_string());
		assert_eq!(error.to_string(), "No such fixture found: demo-data.yml");
	}

	#[rstest]
	fn test_unknown_tag_message() {
		let error = FixtureError::UnknownTag("!Widget:".to_string());
		assert_eq!(error.to_string(), "Unknown tag: !Widget:");
	}

	#[rstest]
	fn test_io_error_from() {
		let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
		let fixture_error: FixtureError = io_error.into();
		assert!(matches!(fixture_error, FixtureError::Io(_)));
	}

	#[rstest]
	fn test_persistence_error_message() {
		let error = StoreError::Persistence {
			entity_type: "Contact".to_string(),
			message: "connection reset".to_string(),
		};
		assert_eq!(
			error.to_string(),
			"Persistence failed for Contact: connection reset"
		);
	}
}
