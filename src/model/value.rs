//! Field values carried by constructed entities.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use super::instance::EntityRef;

/// A value held by an entity field or standing alone in a document.
///
/// Entity-valued fields hold a shared reference, so two fields populated
/// from aliases of the same anchor compare equal by pointer identity, never
/// as independent copies.
#[derive(Clone)]
pub enum FieldValue {
	/// Absent value.
	Null,
	/// Boolean.
	Bool(bool),
	/// Signed integer.
	Int(i64),
	/// Floating point number.
	Float(f64),
	/// Text.
	Str(String),
	/// Calendar date, UTC-based, no time-of-day.
	Date(NaiveDate),
	/// Date and wall-clock time anchored to UTC, no offset semantics.
	DateTime(NaiveDateTime),
	/// Fully zoned point in time, normalized to UTC.
	Instant(DateTime<Utc>),
	/// Ordered collection.
	List(Vec<FieldValue>),
	/// Keyed collection not tied to a managed entity.
	Map(IndexMap<String, FieldValue>),
	/// Reference to a constructed entity instance.
	Entity(EntityRef),
}

impl FieldValue {
	/// Returns the contained text, if this is a string value.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			FieldValue::Str(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the contained integer, if this is an integer value.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			FieldValue::Int(i) => Some(*i),
			_ => None,
		}
	}

	/// Returns the referenced entity, if this is an entity value.
	pub fn as_entity(&self) -> Option<&EntityRef> {
		match self {
			FieldValue::Entity(e) => Some(e),
			_ => None,
		}
	}

	/// Returns the contained list, if this is a list value.
	pub fn as_list(&self) -> Option<&[FieldValue]> {
		match self {
			FieldValue::List(items) => Some(items),
			_ => None,
		}
	}

	/// Returns true for [`FieldValue::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, FieldValue::Null)
	}

	/// Renders the value as JSON for snapshots and diagnostics.
	///
	/// Entities render as their type name plus fields; entity references
	/// nested inside those fields render shallowly (type name only) so
	/// cyclic graphs stay printable.
	pub fn to_json(&self) -> serde_json::Value {
		self.to_json_inner(true)
	}

	/// Renders like [`to_json`](Self::to_json) but never expands entity
	/// references, even at the top level.
	pub(crate) fn to_json_shallow(&self) -> serde_json::Value {
		self.to_json_inner(false)
	}

	fn to_json_inner(&self, expand_entities: bool) -> serde_json::Value {
		match self {
			FieldValue::Null => serde_json::Value::Null,
			FieldValue::Bool(b) => serde_json::Value::Bool(*b),
			FieldValue::Int(i) => serde_json::json!(i),
			FieldValue::Float(f) => serde_json::json!(f),
			FieldValue::Str(s) => serde_json::Value::String(s.clone()),
			FieldValue::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
			FieldValue::DateTime(dt) => {
				serde_json::Value::String(dt.format("%Y-%m-%dT%H:%M:%S").to_string())
			}
			FieldValue::Instant(i) => {
				serde_json::Value::String(i.to_rfc3339_opts(SecondsFormat::Secs, true))
			}
			FieldValue::List(items) => serde_json::Value::Array(
				items.iter().map(|v| v.to_json_inner(expand_entities)).collect(),
			),
			FieldValue::Map(map) => {
				let mut object = serde_json::Map::new();
				for (key, value) in map {
					object.insert(key.clone(), value.to_json_inner(expand_entities));
				}
				serde_json::Value::Object(object)
			}
			FieldValue::Entity(entity) => {
				if expand_entities {
					let mut object = serde_json::Map::new();
					object.insert(
						"$type".to_string(),
						serde_json::Value::String(entity.type_name().to_string()),
					);
					for (key, value) in entity.fields() {
						object.insert(key, value.to_json_inner(false));
					}
					serde_json::Value::Object(object)
				} else {
					serde_json::json!({ "$ref": entity.type_name() })
				}
			}
		}
	}
}

impl PartialEq for FieldValue {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(FieldValue::Null, FieldValue::Null) => true,
			(FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
			(FieldValue::Int(a), FieldValue::Int(b)) => a == b,
			(FieldValue::Float(a), FieldValue::Float(b)) => a == b,
			(FieldValue::Str(a), FieldValue::Str(b)) => a == b,
			(FieldValue::Date(a), FieldValue::Date(b)) => a == b,
			(FieldValue::DateTime(a), FieldValue::DateTime(b)) => a == b,
			(FieldValue::Instant(a), FieldValue::Instant(b)) => a == b,
			(FieldValue::List(a), FieldValue::List(b)) => a == b,
			(FieldValue::Map(a), FieldValue::Map(b)) => a == b,
			(FieldValue::Entity(a), FieldValue::Entity(b)) => Arc::ptr_eq(a, b),
			_ => false,
		}
	}
}

impl fmt::Debug for FieldValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			FieldValue::Null => write!(f, "Null"),
			FieldValue::Bool(b) => write!(f, "Bool({b})"),
			FieldValue::Int(i) => write!(f, "Int({i})"),
			FieldValue::Float(v) => write!(f, "Float({v})"),
			FieldValue::Str(s) => write!(f, "Str({s:?})"),
			FieldValue::Date(d) => write!(f, "Date({d})"),
			FieldValue::DateTime(dt) => write!(f, "DateTime({dt})"),
			FieldValue::Instant(i) => write!(f, "Instant({i})"),
			FieldValue::List(items) => f.debug_list().entries(items).finish(),
			FieldValue::Map(map) => f.debug_map().entries(map.iter()).finish(),
			// Printed shallowly: entity graphs may be cyclic.
			FieldValue::Entity(e) => write!(f, "Entity({})", e.type_name()),
		}
	}
}

impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		FieldValue::Str(value.to_string())
	}
}

impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		FieldValue::Str(value)
	}
}

impl From<i64> for FieldValue {
	fn from(value: i64) -> Self {
		FieldValue::Int(value)
	}
}

impl From<bool> for FieldValue {
	fn from(value: bool) -> Self {
		FieldValue::Bool(value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{EntityDescriptor, EntityInstance};
	use rstest::rstest;

	fn entity(name: &str) -> EntityRef {
		Arc::new(EntityInstance::new(Arc::new(EntityDescriptor::new(name))))
	}

	#[rstest]
	fn test_entity_equality_is_pointer_identity() {
		let a = entity("Circle");
		let b = entity("Circle");

		assert_eq!(FieldValue::Entity(a.clone()), FieldValue::Entity(a.clone()));
		assert_ne!(FieldValue::Entity(a), FieldValue::Entity(b));
	}

	#[rstest]
	fn test_scalar_equality() {
		assert_eq!(FieldValue::Int(1), FieldValue::Int(1));
		assert_ne!(FieldValue::Int(1), FieldValue::Str("1".to_string()));
	}

	#[rstest]
	fn test_to_json_temporal_rendering() {
		let date = FieldValue::Date(NaiveDate::from_ymd_opt(2011, 11, 11).unwrap());
		assert_eq!(date.to_json(), serde_json::json!("2011-11-11"));

		let instant = FieldValue::Instant(
			NaiveDate::from_ymd_opt(2011, 11, 11)
				.unwrap()
				.and_hms_opt(12, 30, 45)
				.unwrap()
				.and_utc(),
		);
		assert_eq!(instant.to_json(), serde_json::json!("2011-11-11T12:30:45Z"));
	}

	#[rstest]
	fn test_to_json_entity_is_cycle_safe() {
		let a = entity("Author");
		let b = entity("Author");
		a.set("pen_pal", FieldValue::Entity(b.clone()));
		b.set("pen_pal", FieldValue::Entity(a.clone()));

		let json = FieldValue::Entity(a).to_json();
		assert_eq!(json["$type"], "Author");
		assert_eq!(json["pen_pal"]["$ref"], "Author");
	}

	#[rstest]
	fn test_debug_entity_is_shallow() {
		let a = entity("Author");
		a.set("pen_pal", FieldValue::Entity(a.clone()));
		assert_eq!(format!("{:?}", FieldValue::Entity(a)), "Entity(Author)");
	}
}
