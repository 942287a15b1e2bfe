use crate::document::RawDocument;
use lazy_static::lazy_static;
use regex::Regex;
use titanium_proto_schema::{FieldDescriptor, ProtoError, Schema};

/// The single recognized schema-version token.
pub const SYNTAX_TOKEN: &str = "titanium1";

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Parse and validate a raw schema document from JSON text.
///
/// Fails with `ParseError` if the text is not valid JSON, and with the
/// validation errors of [validate_document](fn.validate_document.html)
/// otherwise.
pub fn validate(text: &str) -> Result<Schema, ProtoError> {
    let document: RawDocument =
        serde_json::from_str(text).map_err(|err| ProtoError::ParseError(err.to_string()))?;
    validate_document(&document)
}

/// Validate a parsed document and build a fresh `Schema`.
///
/// Checks, in order: the syntax token, the package name (present,
/// non-empty, a legal identifier), then every field record in document
/// order. Field records become [FieldDescriptor]s, propagating
/// `UnsupportedType` and `InvalidCapacity`; duplicate names are rejected
/// when the schema is assembled.
pub fn validate_document(document: &RawDocument) -> Result<Schema, ProtoError> {
    match document.syntax.as_deref() {
        Some(SYNTAX_TOKEN) => {}
        other => {
            return Err(ProtoError::UnsupportedSyntax(
                other.unwrap_or_default().to_owned(),
            ))
        }
    }

    let package_name = match document.package.as_deref() {
        Some(name) if IDENTIFIER.is_match(name) => name.to_owned(),
        _ => return Err(ProtoError::MissingPackageName),
    };

    let mut fields = Vec::with_capacity(document.fields.len());
    for record in &document.fields {
        if !IDENTIFIER.is_match(&record.name) {
            return Err(ProtoError::InvalidFieldName(record.name.clone()));
        }
        fields.push(FieldDescriptor::new(
            &record.name,
            &record.type_token,
            record.maximum_size,
        )?);
    }

    Schema::new(package_name, fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use titanium_proto_schema::ScalarKind;

    const DEMO: &str = r#"{
        "syntax": "titanium1",
        "package": "Demo",
        "fields": [
            { "name": "id", "type": "uint32_t" },
            { "name": "label", "type": "string", "maximum_size": 16 }
        ]
    }"#;

    #[test]
    fn valid_document() {
        let schema = validate(DEMO).unwrap();
        assert_eq!(schema.package_name(), "Demo");
        assert_eq!(schema.fields().len(), 2);
        assert_eq!(schema.fields()[0].kind(), ScalarKind::U32);
        assert_eq!(schema.fields()[1].kind(), ScalarKind::Text);
        assert_eq!(schema.fields()[1].capacity(), 16);
    }

    #[test]
    fn syntax_token_is_mandatory() {
        let result = validate(r#"{"syntax": "titanium2", "package": "Demo", "fields": []}"#);
        assert!(matches!(result, Err(ProtoError::UnsupportedSyntax(found)) if found == "titanium2"));

        let result = validate(r#"{"package": "Demo", "fields": []}"#);
        assert!(matches!(result, Err(ProtoError::UnsupportedSyntax(_))));
    }

    #[test]
    fn package_name_is_mandatory() {
        for doc in [
            r#"{"syntax": "titanium1", "fields": []}"#,
            r#"{"syntax": "titanium1", "package": "", "fields": []}"#,
            r#"{"syntax": "titanium1", "package": "has space", "fields": []}"#,
        ] {
            assert!(matches!(validate(doc), Err(ProtoError::MissingPackageName)));
        }
    }

    #[test]
    fn field_errors_propagate() {
        let result = validate(
            r#"{"syntax": "titanium1", "package": "Demo",
                "fields": [{ "name": "id", "type": "uint24_t" }]}"#,
        );
        assert!(matches!(result, Err(ProtoError::UnsupportedType { .. })));

        let result = validate(
            r#"{"syntax": "titanium1", "package": "Demo",
                "fields": [{ "name": "label", "type": "string", "maximum_size": 1 }]}"#,
        );
        assert!(matches!(result, Err(ProtoError::InvalidCapacity { .. })));

        let result = validate(
            r#"{"syntax": "titanium1", "package": "Demo",
                "fields": [{ "name": "bad name", "type": "uint8_t" }]}"#,
        );
        assert!(matches!(result, Err(ProtoError::InvalidFieldName(_))));
    }

    #[test]
    fn duplicate_field_names_are_rejected() {
        let result = validate(
            r#"{"syntax": "titanium1", "package": "Demo",
                "fields": [
                    { "name": "id", "type": "uint32_t" },
                    { "name": "id", "type": "uint8_t" }
                ]}"#,
        );
        assert!(matches!(result, Err(ProtoError::DuplicateFieldName(name)) if name == "id"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            validate("{ not json"),
            Err(ProtoError::ParseError(_))
        ));
    }

    #[test]
    fn revalidation_builds_a_fresh_schema() {
        let first = validate(DEMO).unwrap();
        let second = validate(DEMO).unwrap();
        assert_eq!(first, second);
    }
}
