use crate::schema::Schema;
use crate::value::Instance;

/// Read-only size accounting derived from a validated schema. The three
/// schema-level metrics are computed once; `serialized_size` depends on a
/// concrete instance and is evaluated on demand.
///
/// Wire cost per field is one framing byte plus the payload, so the total
/// encoded size of any instance is bounded by `static_maximum_size` plus
/// one byte per field.
#[derive(Debug)]
pub struct Layout<'a> {
    schema: &'a Schema,
    minimum_size: usize,
    maximum_dynamic_size: usize,
    static_maximum_size: usize,
}

impl<'a> Layout<'a> {
    /// Compute the layout for `schema`. A validated schema is always
    /// well-formed for layout purposes, so this cannot fail.
    pub fn compute(schema: &'a Schema) -> Layout<'a> {
        let mut minimum_size = 0;
        let mut maximum_dynamic_size = 0;
        let mut static_maximum_size = 0;

        for field in schema.fields() {
            match field.kind().native_width() {
                Some(width) => {
                    minimum_size += 1 + width;
                    maximum_dynamic_size += width;
                    static_maximum_size += width;
                }
                None => {
                    // An empty string is the smallest structurally legal
                    // payload, even though `update` rejects empty input.
                    minimum_size += 1;
                    static_maximum_size += field.capacity() as usize;
                }
            }
        }

        Layout {
            schema,
            minimum_size,
            maximum_dynamic_size,
            static_maximum_size,
        }
    }

    /// The schema this layout was computed from.
    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// The smallest legal encoded size: framing byte plus native width for
    /// every scalar, framing byte plus an empty payload for every text
    /// field.
    pub fn minimum_size(&self) -> usize {
        self.minimum_size
    }

    /// Sum of scalar native widths only. This is the historical "maximum
    /// size" metric carried for compatibility; it counts neither framing
    /// bytes nor text capacity. Use `static_maximum_size` for buffer
    /// allocation.
    pub fn maximum_dynamic_size(&self) -> usize {
        self.maximum_dynamic_size
    }

    /// Worst-case payload total: native width per scalar plus declared
    /// capacity per text field. Any legal instance fits in a buffer of
    /// `static_maximum_size() + schema.fields().len()` bytes.
    pub fn static_maximum_size(&self) -> usize {
        self.static_maximum_size
    }

    /// The exact encoded size of `instance`: one framing byte per field
    /// plus the native width (scalars) or current string byte length
    /// (bounded text, no terminator).
    pub fn serialized_size(&self, instance: &Instance) -> usize {
        instance
            .values()
            .iter()
            .map(|value| 1 + value.payload_size())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldDescriptor;
    use crate::value::ScalarValue;

    fn demo_schema() -> Schema {
        Schema::new(
            "Demo".to_owned(),
            vec![
                FieldDescriptor::new("id", "uint32_t", None).unwrap(),
                FieldDescriptor::new("label", "string", Some(16)).unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn schema_level_metrics() {
        let schema = demo_schema();
        let layout = Layout::compute(&schema);
        // id: 1 + 4, label: 1 + 0
        assert_eq!(layout.minimum_size(), 6);
        // scalar widths only, no framing, no text capacity
        assert_eq!(layout.maximum_dynamic_size(), 4);
        // 4 + 16, no framing
        assert_eq!(layout.static_maximum_size(), 20);
    }

    #[test]
    fn serialized_size_tracks_text_length() {
        let schema = demo_schema();
        let layout = Layout::compute(&schema);
        let mut instance = Instance::new(&schema);
        // Fresh instance holds an empty string: 1 + 4 + 1 + 0.
        assert_eq!(layout.serialized_size(&instance), 6);
        instance
            .update_by_name("label", ScalarValue::Text("hi".to_owned()))
            .unwrap();
        assert_eq!(layout.serialized_size(&instance), 8);
    }

    #[test]
    fn scalar_only_schema() {
        let schema = Schema::new(
            "Pair".to_owned(),
            vec![
                FieldDescriptor::new("a", "int64_t", None).unwrap(),
                FieldDescriptor::new("b", "uint8_t", None).unwrap(),
            ],
        )
        .unwrap();
        let layout = Layout::compute(&schema);
        assert_eq!(layout.minimum_size(), 11);
        assert_eq!(layout.maximum_dynamic_size(), 9);
        assert_eq!(layout.static_maximum_size(), 9);
        let instance = Instance::new(&schema);
        assert_eq!(layout.serialized_size(&instance), 11);
    }
}
