use crate::error::ProtoError;
use serde::Serialize;

/// Type tokens accepted in a raw schema document, in the order they are
/// reported when an unsupported token is rejected.
pub const SUPPORTED_TYPES: [&str; 11] = [
    "uint8_t", "int8_t", "uint16_t", "int16_t", "uint32_t", "int32_t", "uint64_t", "int64_t",
    "float", "double", "string",
];

/// The closed set of field kinds a schema can declare. Everything except
/// `Text` is a fixed-width scalar; `Text` is a bounded, variable-length
/// UTF-8 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScalarKind {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
    Text,
}

impl ScalarKind {
    /// Resolve a raw type token to its kind. Returns `None` for tokens
    /// outside [SUPPORTED_TYPES](constant.SUPPORTED_TYPES.html).
    pub fn from_token(token: &str) -> Option<ScalarKind> {
        match token {
            "uint8_t" => Some(ScalarKind::U8),
            "int8_t" => Some(ScalarKind::I8),
            "uint16_t" => Some(ScalarKind::U16),
            "int16_t" => Some(ScalarKind::I16),
            "uint32_t" => Some(ScalarKind::U32),
            "int32_t" => Some(ScalarKind::I32),
            "uint64_t" => Some(ScalarKind::U64),
            "int64_t" => Some(ScalarKind::I64),
            "float" => Some(ScalarKind::F32),
            "double" => Some(ScalarKind::F64),
            "string" => Some(ScalarKind::Text),
            _ => None,
        }
    }

    /// The raw type token this kind was declared with.
    pub fn token(&self) -> &'static str {
        match self {
            ScalarKind::U8 => "uint8_t",
            ScalarKind::I8 => "int8_t",
            ScalarKind::U16 => "uint16_t",
            ScalarKind::I16 => "int16_t",
            ScalarKind::U32 => "uint32_t",
            ScalarKind::I32 => "int32_t",
            ScalarKind::U64 => "uint64_t",
            ScalarKind::I64 => "int64_t",
            ScalarKind::F32 => "float",
            ScalarKind::F64 => "double",
            ScalarKind::Text => "string",
        }
    }

    /// The native byte width of a scalar kind, or `None` for `Text`, whose
    /// wire length depends on the stored value.
    pub fn native_width(&self) -> Option<usize> {
        match self {
            ScalarKind::U8 | ScalarKind::I8 => Some(1),
            ScalarKind::U16 | ScalarKind::I16 => Some(2),
            ScalarKind::U32 | ScalarKind::I32 | ScalarKind::F32 => Some(4),
            ScalarKind::U64 | ScalarKind::I64 | ScalarKind::F64 => Some(8),
            ScalarKind::Text => None,
        }
    }
}

/// One schema field: a name, a kind, and (for bounded text) a declared
/// maximum payload length in bytes. Field order in the schema fixes wire
/// order and is never reordered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    name: String,
    kind: ScalarKind,
    capacity: u32,
}

/// The implicit capacity of a single scalar instance.
const SINGLE_BLOCK: u32 = 1;

impl FieldDescriptor {
    /// Build a descriptor from a raw field record. Fails with
    /// `UnsupportedType` if the type token is outside the supported set,
    /// and with `InvalidCapacity` if the field is bounded text declared
    /// with a capacity of 1 or less. A declared `maximum_size` on a scalar
    /// kind is ignored; scalars always occupy a single block.
    pub fn new(name: &str, type_token: &str, capacity: Option<u32>) -> Result<FieldDescriptor, ProtoError> {
        let kind = ScalarKind::from_token(type_token).ok_or_else(|| ProtoError::UnsupportedType {
            found: type_token.to_owned(),
            supported: SUPPORTED_TYPES.join(", "),
        })?;

        let capacity = match kind {
            ScalarKind::Text => {
                let declared = capacity.unwrap_or(SINGLE_BLOCK);
                if declared <= SINGLE_BLOCK {
                    return Err(ProtoError::InvalidCapacity {
                        name: name.to_owned(),
                        capacity: declared,
                    });
                }
                declared
            }
            _ => SINGLE_BLOCK,
        };

        Ok(FieldDescriptor {
            name: name.to_owned(),
            kind,
            capacity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Declared maximum payload length for bounded text; 1 for scalars.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// True only for bounded text in this model; numeric fields are always
    /// a single scalar instance.
    pub fn is_variable_capacity(&self) -> bool {
        self.capacity > SINGLE_BLOCK
    }

    /// The worst-case payload size of this field on the wire, not counting
    /// the framing byte: the native width for scalars, the declared
    /// capacity for bounded text.
    pub fn declared_size(&self) -> usize {
        match self.kind.native_width() {
            Some(width) => width,
            None => self.capacity as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_widths() {
        assert_eq!(ScalarKind::U8.native_width(), Some(1));
        assert_eq!(ScalarKind::I16.native_width(), Some(2));
        assert_eq!(ScalarKind::U32.native_width(), Some(4));
        assert_eq!(ScalarKind::F32.native_width(), Some(4));
        assert_eq!(ScalarKind::I64.native_width(), Some(8));
        assert_eq!(ScalarKind::F64.native_width(), Some(8));
        assert_eq!(ScalarKind::Text.native_width(), None);
    }

    #[test]
    fn token_round_trip() {
        for token in SUPPORTED_TYPES {
            let kind = ScalarKind::from_token(token).unwrap();
            assert_eq!(kind.token(), token);
        }
        assert_eq!(ScalarKind::from_token("char"), None);
        assert_eq!(ScalarKind::from_token(""), None);
    }

    #[test]
    fn scalar_descriptor() {
        let field = FieldDescriptor::new("id", "uint32_t", None).unwrap();
        assert_eq!(field.name(), "id");
        assert_eq!(field.kind(), ScalarKind::U32);
        assert_eq!(field.capacity(), 1);
        assert!(!field.is_variable_capacity());
        assert_eq!(field.declared_size(), 4);
    }

    #[test]
    fn text_descriptor() {
        let field = FieldDescriptor::new("label", "string", Some(16)).unwrap();
        assert_eq!(field.kind(), ScalarKind::Text);
        assert_eq!(field.capacity(), 16);
        assert!(field.is_variable_capacity());
        assert_eq!(field.declared_size(), 16);
    }

    #[test]
    fn unsupported_type_is_rejected() {
        assert!(matches!(
            FieldDescriptor::new("id", "uint24_t", None),
            Err(ProtoError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn text_capacity_must_exceed_one() {
        for capacity in [None, Some(0), Some(1)] {
            assert!(matches!(
                FieldDescriptor::new("label", "string", capacity),
                Err(ProtoError::InvalidCapacity { .. })
            ));
        }
        assert!(FieldDescriptor::new("label", "string", Some(2)).is_ok());
    }

    #[test]
    fn scalar_ignores_declared_capacity() {
        let field = FieldDescriptor::new("id", "uint8_t", Some(32)).unwrap();
        assert_eq!(field.capacity(), 1);
        assert!(!field.is_variable_capacity());
    }
}
