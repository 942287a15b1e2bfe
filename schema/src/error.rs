use thiserror::Error;

/// Every failure the schema pipeline can surface. Each kind is a distinct
/// variant so callers can branch on cause rather than on a boolean.
///
/// Validation failures (`UnsupportedSyntax` through `DuplicateFieldName`)
/// are fatal to that validation attempt. Codec and update failures leave
/// the instance untouched, except for `decode_json` which stops at the
/// first bad field without rolling back earlier ones.
#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported syntax {0:?}, expected \"titanium1\"")]
    UnsupportedSyntax(String),

    #[error("missing package name")]
    MissingPackageName,

    #[error("invalid field name {0:?}")]
    InvalidFieldName(String),

    #[error("unsupported field type {found:?}, supported types are: {supported}")]
    UnsupportedType { found: String, supported: String },

    #[error("invalid capacity {capacity} for string field {name:?}: must be greater than 1")]
    InvalidCapacity { name: String, capacity: u32 },

    #[error("duplicate field name {0:?}")]
    DuplicateFieldName(String),

    #[error("output buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("input truncated while reading field {0:?}")]
    TruncatedInput(String),

    #[error("malformed scalar for field {name:?}: length byte {found} does not match native width {expected}")]
    MalformedScalar {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid UTF-8 in string field {0:?}")]
    InvalidEncoding(String),

    #[error("null value for string field {0:?}")]
    NullValue(String),

    #[error("empty value for string field {0:?}")]
    Overflow(String),

    #[error("value for string field {name:?} is {length} bytes, capacity is {capacity}")]
    InvalidSize {
        name: String,
        length: usize,
        capacity: u32,
    },

    #[error("JSON parse error: {0}")]
    ParseError(String),

    #[error("missing JSON key {0:?}")]
    MissingKey(String),

    #[error("invalid JSON value for field {0:?}")]
    InvalidValue(String),
}
