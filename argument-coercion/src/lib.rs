//! Coerces the argument values of a GraphQL field.
//!
//! Coercers are attached to arguments, input fields and input object types of a [`Schema`].
//! [`coerce_field_arguments`] walks the input type tree of a field and applies every coercer it
//! meets, depth first, producing a new value tree with the same shape.

#![warn(unreachable_pub)]

pub mod arguments;
pub mod coercer;
pub mod coercion;
pub mod configuration;
pub mod context;
pub mod error;
pub mod path;
pub mod schema;

pub use arguments::ArgumentCoercion;
pub use coercer::CoerceInfo;
pub use coercer::Coercer;
pub use coercion::coerce_field_arguments;
pub use coercion::OnError;
pub use configuration::Config;
pub use context::Context;
pub use context::FieldInfo;
pub use error::ArgumentsError;
pub use error::CoercionError;
pub use error::SchemaError;
pub use path::Path;
pub use path::PathElement;
pub use schema::FieldDefinition;
pub use schema::InputObjectType;
pub use schema::InputType;
pub use schema::InputValueDefinition;
pub use schema::Schema;

/// A JSON value, as supplied for field arguments.
pub type Value = serde_json_bytes::Value;

/// A JSON object, mapping argument or input field names to values.
pub type Object = serde_json_bytes::Map<serde_json_bytes::ByteString, Value>;
