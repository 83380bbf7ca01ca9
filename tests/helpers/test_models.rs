//! Shared entity model and store doubles for integration tests.

use yaml_fixtures::prelude::*;

/// The address-book model the data files under `tests/fixtures/data` target.
pub fn address_book_models() -> ModelSet {
	ModelSet::new()
		.register(
			EntityDescriptor::new("Circle")
				.field("code", FieldType::Text)
				.field("name", FieldType::Text),
		)
		.register(
			EntityDescriptor::new("Contact")
				.field("firstName", FieldType::Text)
				.field("lastName", FieldType::Text)
				.field("email", FieldType::Text)
				.field("dateOfBirth", FieldType::Date)
				.field("partner", FieldType::Reference)
				.field("circles", FieldType::List),
		)
		.register(
			EntityDescriptor::new("Event")
				.field("title", FieldType::Text)
				.field("day", FieldType::Date)
				.field("startsAt", FieldType::DateTime)
				.field("recordedAt", FieldType::Instant),
		)
		.register(yaml_fixtures::sequence::descriptor())
}

/// A loader rooted at the checked-in test data directory.
pub fn data_loader() -> FixtureLoader {
	FixtureLoader::new(address_book_models()).with_base_dir("tests/fixtures/data")
}

/// Store that rejects every entity of one type and delegates the rest to an
/// inner [`MemoryStore`].
pub struct RejectingStore {
	inner: MemoryStore,
	rejected_type: String,
}

impl RejectingStore {
	pub fn rejecting(type_name: &str) -> Self {
		Self {
			inner: MemoryStore::new(),
			rejected_type: type_name.to_string(),
		}
	}

	pub fn inner(&self) -> &MemoryStore {
		&self.inner
	}
}

impl EntityStore for RejectingStore {
	fn manage(&self, entity: &EntityRef) -> StoreResult<()> {
		if entity.type_name() == self.rejected_type {
			return Err(StoreError::Persistence {
				entity_type: entity.type_name().to_string(),
				message: "rejected by test store".to_string(),
			});
		}
		self.inner.manage(entity)
	}
}
