//! Entity type descriptors.

use indexmap::IndexMap;
use std::sync::Arc;

/// Declared type of an entity field.
///
/// The temporal variants drive scalar coercion: the same timestamp literal
/// yields a date, a local date-time, or a UTC instant depending on the
/// declared type of the field it is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
	/// Free-form text.
	Text,
	/// Signed integer.
	Integer,
	/// Floating point number.
	Float,
	/// Boolean flag.
	Boolean,
	/// Calendar date with no time-of-day.
	Date,
	/// Date and wall-clock time with no zone offset semantics.
	DateTime,
	/// Fully zoned point in time, normalized to UTC.
	Instant,
	/// Reference to another entity.
	Reference,
	/// Ordered collection of values or references.
	List,
}

impl FieldType {
	/// Returns true for field types that temporal scalars coerce into.
	///
	/// # Examples
	///
	/// ```
	/// use yaml_fixtures::model::FieldType;
	///
	/// assert!(FieldType::Date.is_temporal());
	/// assert!(FieldType::Instant.is_temporal());
	/// assert!(!FieldType::Text.is_temporal());
	/// ```
	pub fn is_temporal(&self) -> bool {
		matches!(self, FieldType::Date | FieldType::DateTime | FieldType::Instant)
	}
}

/// Description of one entity type: its simple name and declared fields.
///
/// # Examples
///
/// ```
/// use yaml_fixtures::model::{EntityDescriptor, FieldType};
///
/// let circle = EntityDescriptor::new("Circle")
/// 	.field("code", FieldType::Text)
/// 	.field("name", FieldType::Text);
///
/// assert_eq!(circle.name(), "Circle");
/// assert_eq!(circle.tag(), "!Circle:");
/// assert_eq!(circle.field_type("code"), Some(&FieldType::Text));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDescriptor {
	name: String,
	fields: IndexMap<String, FieldType>,
}

impl EntityDescriptor {
	/// Creates a descriptor with no declared fields.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			fields: IndexMap::new(),
		}
	}

	/// Declares a field, builder style.
	pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
		self.fields.insert(name.into(), field_type);
		self
	}

	/// Returns the simple type name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the document tag this type binds to.
	pub fn tag(&self) -> String {
		format!("!{}:", self.name)
	}

	/// Returns the declared type of a field, if declared.
	pub fn field_type(&self, name: &str) -> Option<&FieldType> {
		self.fields.get(name)
	}

	/// Returns the declared fields in declaration order.
	pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldType)> {
		self.fields.iter().map(|(name, ty)| (name.as_str(), ty))
	}
}

/// The closed enumeration of entity types known to the host system.
///
/// Tag bindings are rebuilt from this set once per load call, so the set
/// itself stays immutable while a load is in flight.
#[derive(Debug, Clone, Default)]
pub struct ModelSet {
	descriptors: Vec<Arc<EntityDescriptor>>,
}

impl ModelSet {
	/// Creates an empty model set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds an entity type, builder style.
	pub fn register(mut self, descriptor: EntityDescriptor) -> Self {
		self.descriptors.push(Arc::new(descriptor));
		self
	}

	/// Returns the descriptor with the given simple name, if registered.
	pub fn get(&self, name: &str) -> Option<&Arc<EntityDescriptor>> {
		self.descriptors.iter().find(|d| d.name() == name)
	}

	/// Iterates over all registered descriptors.
	pub fn iter(&self) -> impl Iterator<Item = &Arc<EntityDescriptor>> {
		self.descriptors.iter()
	}

	/// Returns the number of registered entity types.
	pub fn len(&self) -> usize {
		self.descriptors.len()
	}

	/// Returns true if no entity types are registered.
	pub fn is_empty(&self) -> bool {
		self.descriptors.is_empty()
	}
}
