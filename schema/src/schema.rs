use crate::field::FieldDescriptor;
use crate::error::ProtoError;
use serde::Serialize;

/// A validated schema: a package name and an ordered field list. Insertion
/// order is wire order. A `Schema` is immutable once built; re-validating a
/// raw document always produces a fresh instance.
#[derive(Debug, PartialEq, Serialize)]
pub struct Schema {
    package_name: String,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Assemble a schema from already-constructed descriptors. Fails with
    /// `DuplicateFieldName` if a name repeats; the wire format is
    /// positional, so a silent collision would make decoded output
    /// ambiguous.
    pub fn new(package_name: String, fields: Vec<FieldDescriptor>) -> Result<Schema, ProtoError> {
        let mut seen: Vec<&str> = Vec::with_capacity(fields.len());
        for field in &fields {
            if seen.contains(&field.name()) {
                return Err(ProtoError::DuplicateFieldName(field.name().to_owned()));
            }
            seen.push(field.name());
        }
        Ok(Schema {
            package_name,
            fields,
        })
    }

    /// The package name used to namespace generated artifacts.
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// The ordered field list. Index position equals wire position.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field and its wire position by name.
    pub fn field_by_name(&self, name: &str) -> Option<(usize, &FieldDescriptor)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, field)| field.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str) -> FieldDescriptor {
        FieldDescriptor::new(name, "uint16_t", None).unwrap()
    }

    #[test]
    fn field_order_is_preserved() {
        let schema = Schema::new(
            "Demo".to_owned(),
            vec![descriptor("b"), descriptor("a"), descriptor("c")],
        )
        .unwrap();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert_eq!(schema.field_by_name("a").unwrap().0, 1);
        assert!(schema.field_by_name("missing").is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = Schema::new(
            "Demo".to_owned(),
            vec![descriptor("id"), descriptor("id")],
        );
        assert!(matches!(result, Err(ProtoError::DuplicateFieldName(name)) if name == "id"));
    }
}
