//! The fixture loader core.
//!
//! One [`FixtureLoader::load`] call moves through a fixed sequence of steps:
//! the named resource is read, parsed into a document tree, constructed into
//! entity instances with node-identity caching, and finally committed to the
//! store in reverse construction order with per-entity failure tolerance.
//! Any failure before the commit step aborts the call with nothing
//! persisted; failures during commit are per-entity and never fail the call.

mod coerce;
mod construct;
mod loader;
mod registry;

pub use coerce::{coerce_temporal, is_temporal_literal};
pub use construct::GraphConstructor;
pub use loader::{FixtureLoader, LoadReport, PersistFailure};
pub use registry::TagRegistry;
