//! Formatted sequence values backed by store-managed `Sequence` entities.
//!
//! A sequence is itself an entity, typically seeded from a fixture:
//!
//! ```yaml
//! - !Sequence:
//!   name: seq.emp.id
//!   prefix: EMP_
//!   suffix: _ID
//!   padding: 5
//!   increment: 1
//!   next: 1
//! ```
//!
//! Drawing from `seq.emp.id` then yields `EMP_00001_ID`, `EMP_00002_ID`,
//! and so on.

use crate::error::{StoreError, StoreResult};
use crate::model::{EntityDescriptor, EntityRef, FieldType, FieldValue};
use crate::store::MemoryStore;

/// Entity type name sequences are stored under.
pub const SEQUENCE_TYPE: &str = "Sequence";

/// Returns the descriptor for the `Sequence` entity type, for hosts that
/// want sequences loadable from fixtures.
pub fn descriptor() -> EntityDescriptor {
	EntityDescriptor::new(SEQUENCE_TYPE)
		.field("name", FieldType::Text)
		.field("prefix", FieldType::Text)
		.field("suffix", FieldType::Text)
		.field("padding", FieldType::Integer)
		.field("increment", FieldType::Integer)
		.field("next", FieldType::Integer)
}

/// Draws the next formatted value from the named sequence and advances its
/// counter by the sequence's increment.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] if no sequence with that name is
/// managed, or [`StoreError::InvalidField`] if a counter field holds a
/// non-integer value.
pub fn next_value(store: &MemoryStore, name: &str) -> StoreResult<String> {
	let sequence = find(store, name)?;

	let next = int_field(&sequence, "next", 1)?;
	let increment = int_field(&sequence, "increment", 1)?;
	let padding = int_field(&sequence, "padding", 0)?.max(0) as usize;
	let prefix = text_field(&sequence, "prefix");
	let suffix = text_field(&sequence, "suffix");

	sequence.set("next", FieldValue::Int(next + increment));
	Ok(format!("{prefix}{next:0padding$}{suffix}"))
}

/// Repositions the named sequence so the next draw uses `value`.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] if no sequence with that name is
/// managed.
pub fn restart(store: &MemoryStore, name: &str, value: i64) -> StoreResult<()> {
	let sequence = find(store, name)?;
	sequence.set("next", FieldValue::Int(value));
	Ok(())
}

fn find(store: &MemoryStore, name: &str) -> StoreResult<EntityRef> {
	store
		.find_by(SEQUENCE_TYPE, "name", &FieldValue::from(name))
		.ok_or_else(|| StoreError::NotFound(format!("sequence {name}")))
}

fn int_field(sequence: &EntityRef, field: &str, default: i64) -> StoreResult<i64> {
	match sequence.get(field) {
		None | Some(FieldValue::Null) => Ok(default),
		Some(FieldValue::Int(i)) => Ok(i),
		Some(other) => Err(StoreError::InvalidField {
			field: field.to_string(),
			message: format!("expected an integer, got {other:?}"),
		}),
	}
}

fn text_field(sequence: &EntityRef, field: &str) -> String {
	match sequence.get(field) {
		Some(FieldValue::Str(s)) => s,
		_ => String::new(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::EntityInstance;
	use crate::store::EntityStore;
	use rstest::rstest;
	use std::sync::Arc;

	fn seeded_store() -> MemoryStore {
		let store = MemoryStore::new();
		let sequence = EntityInstance::new(Arc::new(descriptor()));
		sequence.set("name", FieldValue::from("seq.emp.id"));
		sequence.set("prefix", FieldValue::from("EMP_"));
		sequence.set("suffix", FieldValue::from("_ID"));
		sequence.set("padding", FieldValue::Int(5));
		sequence.set("increment", FieldValue::Int(1));
		sequence.set("next", FieldValue::Int(1));
		store.manage(&Arc::new(sequence)).unwrap();
		store
	}

	#[rstest]
	fn test_next_value_formats_and_advances() {
		let store = seeded_store();
		assert_eq!(next_value(&store, "seq.emp.id").unwrap(), "EMP_00001_ID");
		assert_eq!(next_value(&store, "seq.emp.id").unwrap(), "EMP_00002_ID");
		assert_eq!(next_value(&store, "seq.emp.id").unwrap(), "EMP_00003_ID");
	}

	#[rstest]
	fn test_restart_repositions_counter() {
		let store = seeded_store();
		next_value(&store, "seq.emp.id").unwrap();
		restart(&store, "seq.emp.id", 100).unwrap();
		assert_eq!(next_value(&store, "seq.emp.id").unwrap(), "EMP_00100_ID");
	}

	#[rstest]
	fn test_unknown_sequence() {
		let store = MemoryStore::new();
		let result = next_value(&store, "seq.missing");
		assert!(matches!(result, Err(StoreError::NotFound(_))));
	}

	#[rstest]
	fn test_defaults_for_unset_fields() {
		let store = MemoryStore::new();
		let sequence = EntityInstance::new(Arc::new(descriptor()));
		sequence.set("name", FieldValue::from("seq.bare"));
		store.manage(&Arc::new(sequence)).unwrap();

		assert_eq!(next_value(&store, "seq.bare").unwrap(), "1");
		assert_eq!(next_value(&store, "seq.bare").unwrap(), "2");
	}

	#[rstest]
	fn test_non_integer_counter_is_rejected() {
		let store = MemoryStore::new();
		let sequence = EntityInstance::new(Arc::new(descriptor()));
		sequence.set("name", FieldValue::from("seq.bad"));
		sequence.set("next", FieldValue::from("soon"));
		store.manage(&Arc::new(sequence)).unwrap();

		let result = next_value(&store, "seq.bad");
		assert!(matches!(result, Err(StoreError::InvalidField { .. })));
	}
}
