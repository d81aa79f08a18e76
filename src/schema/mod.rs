//! Schema documents published by the API and their type vocabulary.

pub mod loader;
pub mod models;
pub mod types;

pub use loader::{load_schemas, HttpSchemaSource, SchemaCache, SchemaSource};
pub use models::{ApiEntry, ModelDef, Operation, Parameter, PropertyDef, RootIndex, SchemaModel};
pub use types::{Primitive, Property, TypeRef};
