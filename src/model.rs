//! Dynamic entity model.
//!
//! Fixture documents construct into [`EntityInstance`]s described by
//! [`EntityDescriptor`]s. The host system enumerates its entity types once
//! as a [`ModelSet`]; the loader builds its tag bindings from that set on
//! every call.

mod descriptor;
mod instance;
mod value;

pub use descriptor::{EntityDescriptor, FieldType, ModelSet};
pub use instance::{EntityInstance, EntityRef};
pub use value::FieldValue;
