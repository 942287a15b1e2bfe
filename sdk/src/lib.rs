//! titanium-proto
//!
//! This crate is the runtime facade for working with titanium-proto
//! schemas and instances.
//!
//! - `compile` a raw JSON schema document into a validated [`Schema`]
//! - build an [`Instance`], `update` its fields, and run the binary or
//!   JSON codec
//! - query [`Layout`] for buffer-sizing metrics

pub use titanium_proto_compiler::{validate, validate_document, RawDocument, RawField, SYNTAX_TOKEN};
pub use titanium_proto_schema::{
    FieldDescriptor, Instance, Layout, ProtoError, ScalarKind, ScalarValue, Schema,
};

/// Validate a raw schema document. Alias of
/// [validate](fn.validate.html), kept as the conventional entry point.
pub fn compile(text: &str) -> Result<Schema, ProtoError> {
    validate(text)
}

/// Decode a binary-encoded instance of `schema` into its JSON mirror.
pub fn decode_to_json(schema: &Schema, buffer: &[u8]) -> Result<String, ProtoError> {
    let instance = Instance::decode(schema, buffer)?;
    instance.encode_json(usize::MAX)
}

/// Render a validated schema as pretty-printed JSON, for inspection
/// tooling.
pub fn schema_to_json(schema: &Schema) -> Result<String, ProtoError> {
    serde_json::to_string_pretty(schema).map_err(|err| ProtoError::ParseError(err.to_string()))
}

/// A buffer large enough to encode any legal instance of `schema`: the
/// static maximum payload plus one framing byte per field.
pub fn allocation_hint(schema: &Schema) -> usize {
    Layout::compute(schema).static_maximum_size() + schema.fields().len()
}

pub mod error {
    pub use titanium_proto_schema::ProtoError;
}

pub mod schema {
    pub use titanium_proto_schema::{FieldDescriptor, Instance, Layout, ScalarValue, Schema};
}
