//! Identity-tracked recursive construction.
//!
//! [`GraphConstructor`] turns document nodes into values, converting each
//! node at most once per load call. The identity map is keyed by node
//! identity, not value equality, so two aliases of one anchor resolve to
//! the identical entity instance. Entity instances are registered under
//! their node identity before their fields are populated, which is what
//! lets mutually-cyclic references terminate and fill in correctly.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use indexmap::IndexMap;

use super::coerce::{coerce_temporal, is_temporal_literal};
use super::registry::TagRegistry;
use crate::document::{DocumentNode, DocumentTree, NodeId};
use crate::error::{FixtureError, FixtureResult};
use crate::model::{EntityInstance, EntityRef, FieldType, FieldValue};

/// Call-scoped construction state for one document.
///
/// Holds the identity map and the construction record; both live for
/// exactly one load call and are never shared across calls or threads.
pub struct GraphConstructor<'a> {
	tree: &'a DocumentTree,
	registry: &'a TagRegistry,
	seen: HashMap<NodeId, FieldValue>,
	in_flight: HashSet<NodeId>,
	record: Vec<EntityRef>,
}

impl<'a> GraphConstructor<'a> {
	/// Creates a constructor over a parsed document and a tag registry.
	pub fn new(tree: &'a DocumentTree, registry: &'a TagRegistry) -> Self {
		Self {
			tree,
			registry,
			seen: HashMap::new(),
			in_flight: HashSet::new(),
			record: Vec::new(),
		}
	}

	/// Constructs the value for a node, reusing the cached value on repeat
	/// visits.
	///
	/// # Errors
	///
	/// Returns [`FixtureError::UnknownTag`] for an unregistered entity tag
	/// and [`FixtureError::Parse`] for structural problems such as
	/// non-scalar mapping keys or cycles that pass through no entity node.
	pub fn construct(&mut self, id: NodeId) -> FixtureResult<FieldValue> {
		self.construct_as(id, None)
	}

	/// Entities recorded so far, in first-construction order.
	pub fn record(&self) -> &[EntityRef] {
		&self.record
	}

	/// Consumes the constructor, returning the construction record.
	pub fn into_record(self) -> Vec<EntityRef> {
		self.record
	}

	fn construct_as(
		&mut self,
		id: NodeId,
		declared: Option<&FieldType>,
	) -> FixtureResult<FieldValue> {
		if let Some(cached) = self.seen.get(&id) {
			return Ok(cached.clone());
		}

		let tree = self.tree;
		match tree.node(id) {
			DocumentNode::Scalar { value, plain, .. } => {
				let constructed = if *plain && is_temporal_literal(value) {
					coerce_temporal(value, declared)?
				} else {
					default_scalar(value, *plain)
				};
				self.seen.insert(id, constructed.clone());
				Ok(constructed)
			}
			DocumentNode::Sequence { items, .. } => {
				self.enter(id)?;
				let mut constructed = Vec::with_capacity(items.len());
				for item in items {
					constructed.push(self.construct_as(*item, None)?);
				}
				self.leave(id);
				let value = FieldValue::List(constructed);
				self.seen.insert(id, value.clone());
				Ok(value)
			}
			DocumentNode::Mapping { tag, entries } => {
				match tag.as_deref().filter(|t| t.starts_with('!')) {
					Some(tag) => self.construct_entity(id, tag, entries),
					None => self.construct_plain_mapping(id, entries),
				}
			}
		}
	}

	/// Constructs a tagged mapping node into an entity instance.
	///
	/// The instance enters the identity map and the construction record
	/// before its fields are populated so that aliases back to this node,
	/// including cyclic ones, resolve to it immediately.
	fn construct_entity(
		&mut self,
		id: NodeId,
		tag: &str,
		entries: &[(NodeId, NodeId)],
	) -> FixtureResult<FieldValue> {
		let descriptor = self.registry.resolve(tag)?;
		let entity: EntityRef = Arc::new(EntityInstance::new(descriptor.clone()));

		self.seen.insert(id, FieldValue::Entity(entity.clone()));
		self.record.push(entity.clone());

		for (key_id, value_id) in entries {
			let key = self.scalar_key(*key_id)?;
			let declared = descriptor.field_type(&key);
			let value = self.construct_as(*value_id, declared)?;
			entity.set(key, value);
		}
		Ok(FieldValue::Entity(entity))
	}

	fn construct_plain_mapping(
		&mut self,
		id: NodeId,
		entries: &[(NodeId, NodeId)],
	) -> FixtureResult<FieldValue> {
		self.enter(id)?;
		let mut map = IndexMap::with_capacity(entries.len());
		for (key_id, value_id) in entries {
			let key = self.scalar_key(*key_id)?;
			let value = self.construct_as(*value_id, None)?;
			map.insert(key, value);
		}
		self.leave(id);
		let value = FieldValue::Map(map);
		self.seen.insert(id, value.clone());
		Ok(value)
	}

	fn scalar_key(&self, id: NodeId) -> FixtureResult<String> {
		match self.tree.node(id) {
			DocumentNode::Scalar { value, .. } => Ok(value.clone()),
			_ => Err(FixtureError::Parse(
				"mapping keys must be scalars".to_string(),
			)),
		}
	}

	/// Guards plain containers against cycles. A cycle is only expressible
	/// through an anchor, and anchors on entity nodes are resolved through
	/// the identity map instead; reaching a plain container twice on one
	/// descent means the document cycles without an entity in between.
	fn enter(&mut self, id: NodeId) -> FixtureResult<()> {
		if !self.in_flight.insert(id) {
			return Err(FixtureError::Parse(
				"cyclic reference through a non-entity node".to_string(),
			));
		}
		Ok(())
	}

	fn leave(&mut self, id: NodeId) {
		self.in_flight.remove(&id);
	}
}

/// Default scalar resolution, mirroring the YAML core schema: plain scalars
/// resolve to null, booleans, integers, floats, or (as a fallback for
/// temporal-looking literals with no declared field) UTC instants; quoted
/// scalars are always text.
fn default_scalar(raw: &str, plain: bool) -> FieldValue {
	if !plain {
		return FieldValue::Str(raw.to_string());
	}
	match raw {
		"" | "~" | "null" | "Null" | "NULL" => return FieldValue::Null,
		"true" | "True" | "TRUE" => return FieldValue::Bool(true),
		"false" | "False" | "FALSE" => return FieldValue::Bool(false),
		".inf" | "+.inf" | ".Inf" | "+.Inf" => return FieldValue::Float(f64::INFINITY),
		"-.inf" | "-.Inf" => return FieldValue::Float(f64::NEG_INFINITY),
		".nan" | ".NaN" => return FieldValue::Float(f64::NAN),
		_ => {}
	}
	if let Some(hex) = raw.strip_prefix("0x") {
		if let Ok(i) = i64::from_str_radix(hex, 16) {
			return FieldValue::Int(i);
		}
	}
	if let Some(octal) = raw.strip_prefix("0o") {
		if let Ok(i) = i64::from_str_radix(octal, 8) {
			return FieldValue::Int(i);
		}
	}
	if let Ok(i) = raw.parse::<i64>() {
		return FieldValue::Int(i);
	}
	if let Ok(f) = raw.parse::<f64>() {
		return FieldValue::Float(f);
	}
	FieldValue::Str(raw.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{EntityDescriptor, ModelSet};
	use chrono::NaiveDate;
	use rstest::rstest;

	fn models() -> ModelSet {
		ModelSet::new()
			.register(
				EntityDescriptor::new("Circle")
					.field("code", FieldType::Text)
					.field("name", FieldType::Text),
			)
			.register(
				EntityDescriptor::new("Contact")
					.field("firstName", FieldType::Text)
					.field("birthDate", FieldType::Date)
					.field("circles", FieldType::List),
			)
	}

	fn construct_all(text: &str) -> FixtureResult<Vec<EntityRef>> {
		let tree = DocumentTree::parse(text)?;
		let models = models();
		let registry = TagRegistry::from_models(&models);
		let mut constructor = GraphConstructor::new(&tree, &registry);
		for root in tree.roots().collect::<Vec<_>>() {
			constructor.construct(root)?;
		}
		Ok(constructor.into_record())
	}

	#[rstest]
	fn test_record_is_in_first_construction_order() {
		let record = construct_all(
			"- !Circle: &family\n  code: family\n- !Contact:\n  firstName: John\n  circles: [*family]\n",
		)
		.unwrap();

		assert_eq!(record.len(), 2);
		assert_eq!(record[0].type_name(), "Circle");
		assert_eq!(record[1].type_name(), "Contact");
	}

	#[rstest]
	fn test_alias_resolves_to_identical_instance() {
		let record = construct_all(
			"- !Circle: &family\n  code: family\n- !Contact:\n  firstName: John\n  circles: [*family]\n",
		)
		.unwrap();

		let circle = &record[0];
		let circles = record[1].get("circles").unwrap();
		let items = circles.as_list().unwrap();
		assert_eq!(items.len(), 1);
		assert!(Arc::ptr_eq(items[0].as_entity().unwrap(), circle));
	}

	#[rstest]
	fn test_each_node_constructs_at_most_once() {
		let record = construct_all(
			"- !Circle: &family\n  code: family\n- !Contact:\n  firstName: John\n  circles: [*family, *family]\n",
		)
		.unwrap();

		// The alias appears twice but only one Circle exists.
		assert_eq!(record.len(), 2);
		let circles = record[1].get("circles").unwrap();
		let items = circles.as_list().unwrap();
		assert!(Arc::ptr_eq(
			items[0].as_entity().unwrap(),
			items[1].as_entity().unwrap()
		));
	}

	#[rstest]
	fn test_temporal_field_coerces_against_declared_type() {
		let record =
			construct_all("- !Contact:\n  firstName: John\n  birthDate: 1980-06-15\n").unwrap();

		assert_eq!(
			record[0].get("birthDate"),
			Some(FieldValue::Date(
				NaiveDate::from_ymd_opt(1980, 6, 15).unwrap()
			))
		);
	}

	#[rstest]
	fn test_unknown_tag_fails_construction() {
		let result = construct_all("- !Widget:\n  name: gear\n");
		assert!(matches!(result, Err(FixtureError::UnknownTag(_))));
	}

	#[rstest]
	fn test_undeclared_fields_are_kept() {
		let record = construct_all("- !Circle:\n  code: family\n  color: blue\n").unwrap();
		assert_eq!(record[0].get("color"), Some(FieldValue::from("blue")));
	}

	#[rstest]
	fn test_plain_values_are_not_recorded() {
		let record = construct_all("- plain\n- [1, 2]\n- key: value\n").unwrap();
		assert!(record.is_empty());
	}

	#[rstest]
	#[case("~", FieldValue::Null)]
	#[case("true", FieldValue::Bool(true))]
	#[case("42", FieldValue::Int(42))]
	#[case("-7", FieldValue::Int(-7))]
	#[case("0x1F", FieldValue::Int(31))]
	#[case("3.5", FieldValue::Float(3.5))]
	#[case("family", FieldValue::Str("family".to_string()))]
	fn test_default_scalar_resolution(#[case] raw: &str, #[case] expected: FieldValue) {
		assert_eq!(default_scalar(raw, true), expected);
	}

	#[rstest]
	fn test_quoted_scalar_stays_text() {
		assert_eq!(default_scalar("42", false), FieldValue::Str("42".to_string()));
	}
}
