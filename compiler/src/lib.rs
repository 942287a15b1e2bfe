//! titanium-proto-compiler
//!
//! This crate implements:
//!  1) A serde model for raw schema documents (`RawDocument`),
//!  2) A validator (`validate`) that checks syntax, package name,
//!     identifiers, supported types, and duplicate field names,
//!  3) Re-exports of the shared error type (`ProtoError`).
//!
//! Validation always produces a fresh [`Schema`]; nothing is mutated in
//! place on re-validation.

pub mod document;
pub mod validator;

pub use document::{RawDocument, RawField};
pub use validator::{validate, validate_document, SYNTAX_TOKEN};

pub use titanium_proto_schema::{ProtoError, Schema};
