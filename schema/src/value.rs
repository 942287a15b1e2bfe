use crate::{
    bb::{ByteReader, ByteWriter},
    error::ProtoError,
    field::{FieldDescriptor, ScalarKind},
    layout::Layout,
    schema::Schema,
};

/// The largest payload a single record can carry; the framing byte is one
/// unsigned byte.
pub const MAX_PAYLOAD: usize = 255;

/// A dynamically-typed field value. One variant per schema kind, so the
/// stored representation always matches the declared native width. This is
/// the tagged registry used to build defaults for every kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
    Text(String),
}

impl ScalarValue {
    /// The zero value for `kind`; text fields start out empty.
    pub fn default_for(kind: ScalarKind) -> ScalarValue {
        match kind {
            ScalarKind::U8 => ScalarValue::U8(0),
            ScalarKind::I8 => ScalarValue::I8(0),
            ScalarKind::U16 => ScalarValue::U16(0),
            ScalarKind::I16 => ScalarValue::I16(0),
            ScalarKind::U32 => ScalarValue::U32(0),
            ScalarKind::I32 => ScalarValue::I32(0),
            ScalarKind::U64 => ScalarValue::U64(0),
            ScalarKind::I64 => ScalarValue::I64(0),
            ScalarKind::F32 => ScalarValue::F32(0.0),
            ScalarKind::F64 => ScalarValue::F64(0.0),
            ScalarKind::Text => ScalarValue::Text(String::new()),
        }
    }

    /// The schema kind this value belongs to.
    pub fn kind(&self) -> ScalarKind {
        match self {
            ScalarValue::U8(_) => ScalarKind::U8,
            ScalarValue::I8(_) => ScalarKind::I8,
            ScalarValue::U16(_) => ScalarKind::U16,
            ScalarValue::I16(_) => ScalarKind::I16,
            ScalarValue::U32(_) => ScalarKind::U32,
            ScalarValue::I32(_) => ScalarKind::I32,
            ScalarValue::U64(_) => ScalarKind::U64,
            ScalarValue::I64(_) => ScalarKind::I64,
            ScalarValue::F32(_) => ScalarKind::F32,
            ScalarValue::F64(_) => ScalarKind::F64,
            ScalarValue::Text(_) => ScalarKind::Text,
        }
    }

    /// The number of payload bytes this value occupies on the wire, not
    /// counting the framing byte. For text this is the UTF-8 byte length
    /// with no terminator.
    pub fn payload_size(&self) -> usize {
        match self {
            ScalarValue::Text(text) => text.len(),
            other => other
                .kind()
                .native_width()
                .unwrap_or(0),
        }
    }

    /// Convert a parsed JSON value into the scalar `field` expects.
    ///
    /// Fails with `NullValue` for a JSON null on a text field, and with
    /// `InvalidValue` on a type mismatch or an out-of-range number.
    pub fn from_json(
        field: &FieldDescriptor,
        value: &serde_json::Value,
    ) -> Result<ScalarValue, ProtoError> {
        let invalid = || ProtoError::InvalidValue(field.name().to_owned());

        match field.kind() {
            ScalarKind::U8 => value
                .as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .map(ScalarValue::U8)
                .ok_or_else(invalid),
            ScalarKind::I8 => value
                .as_i64()
                .and_then(|n| i8::try_from(n).ok())
                .map(ScalarValue::I8)
                .ok_or_else(invalid),
            ScalarKind::U16 => value
                .as_u64()
                .and_then(|n| u16::try_from(n).ok())
                .map(ScalarValue::U16)
                .ok_or_else(invalid),
            ScalarKind::I16 => value
                .as_i64()
                .and_then(|n| i16::try_from(n).ok())
                .map(ScalarValue::I16)
                .ok_or_else(invalid),
            ScalarKind::U32 => value
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(ScalarValue::U32)
                .ok_or_else(invalid),
            ScalarKind::I32 => value
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .map(ScalarValue::I32)
                .ok_or_else(invalid),
            ScalarKind::U64 => value.as_u64().map(ScalarValue::U64).ok_or_else(invalid),
            ScalarKind::I64 => value.as_i64().map(ScalarValue::I64).ok_or_else(invalid),
            ScalarKind::F32 => value
                .as_f64()
                .map(|n| ScalarValue::F32(n as f32))
                .ok_or_else(invalid),
            ScalarKind::F64 => value.as_f64().map(ScalarValue::F64).ok_or_else(invalid),
            ScalarKind::Text => {
                if value.is_null() {
                    return Err(ProtoError::NullValue(field.name().to_owned()));
                }
                value
                    .as_str()
                    .map(|s| ScalarValue::Text(s.to_owned()))
                    .ok_or_else(invalid)
            }
        }
    }

    /// Render this value as JSON: numbers as numbers, text as a string.
    /// A non-finite float has no JSON representation and fails with
    /// `InvalidValue`.
    fn to_json(&self, field: &FieldDescriptor) -> Result<serde_json::Value, ProtoError> {
        let number = |n: f64| {
            serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .ok_or_else(|| ProtoError::InvalidValue(field.name().to_owned()))
        };

        match self {
            ScalarValue::U8(v) => Ok(serde_json::Value::from(*v)),
            ScalarValue::I8(v) => Ok(serde_json::Value::from(*v)),
            ScalarValue::U16(v) => Ok(serde_json::Value::from(*v)),
            ScalarValue::I16(v) => Ok(serde_json::Value::from(*v)),
            ScalarValue::U32(v) => Ok(serde_json::Value::from(*v)),
            ScalarValue::I32(v) => Ok(serde_json::Value::from(*v)),
            ScalarValue::U64(v) => Ok(serde_json::Value::from(*v)),
            ScalarValue::I64(v) => Ok(serde_json::Value::from(*v)),
            ScalarValue::F32(v) => number(*v as f64),
            ScalarValue::F64(v) => number(*v),
            ScalarValue::Text(v) => Ok(serde_json::Value::from(v.as_str())),
        }
    }
}

/// A concrete struct instance bound to its schema: one value per field, in
/// wire order. Encode and decode are single-shot, synchronous operations
/// over caller-owned buffers; the instance never retains a reference to a
/// buffer past the call that used it.
#[derive(Debug, PartialEq)]
pub struct Instance<'a> {
    schema: &'a Schema,
    values: Vec<ScalarValue>,
}

impl<'a> Instance<'a> {
    /// A fresh instance with every field at its default value.
    pub fn new(schema: &'a Schema) -> Instance<'a> {
        let values = schema
            .fields()
            .iter()
            .map(|field| ScalarValue::default_for(field.kind()))
            .collect();
        Instance { schema, values }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Current field values, in wire order.
    pub fn values(&self) -> &[ScalarValue] {
        &self.values
    }

    /// The current value of the named field.
    pub fn get(&self, name: &str) -> Option<&ScalarValue> {
        self.schema
            .field_by_name(name)
            .map(|(index, _)| &self.values[index])
    }

    /// Update the named field. Scalar updates succeed whenever the value
    /// kind matches the field kind. Text updates additionally enforce the
    /// field contract: an empty string fails with `Overflow`, a string
    /// longer than the declared capacity (or than a framing byte can
    /// describe) fails with `InvalidSize`. The prior value is left
    /// unchanged on failure.
    pub fn update_by_name(&mut self, name: &str, value: ScalarValue) -> Result<(), ProtoError> {
        let (index, _) = self
            .schema
            .field_by_name(name)
            .ok_or_else(|| ProtoError::InvalidFieldName(name.to_owned()))?;
        self.update_at(index, value)
    }

    fn update_at(&mut self, index: usize, value: ScalarValue) -> Result<(), ProtoError> {
        let field = &self.schema.fields()[index];
        if value.kind() != field.kind() {
            return Err(ProtoError::InvalidValue(field.name().to_owned()));
        }

        if let ScalarValue::Text(ref text) = value {
            if text.is_empty() {
                return Err(ProtoError::Overflow(field.name().to_owned()));
            }
            if text.len() > field.capacity() as usize || text.len() > MAX_PAYLOAD {
                return Err(ProtoError::InvalidSize {
                    name: field.name().to_owned(),
                    length: text.len(),
                    capacity: field.capacity(),
                });
            }
        }

        // Replacing the String drops any stale trailing bytes with it.
        self.values[index] = value;
        Ok(())
    }

    /// Encode this instance into `out` and return the number of bytes
    /// written. Each field is written as a one-byte length followed by the
    /// payload, in schema order. Fails with `BufferTooSmall` before
    /// anything is written if `out` cannot hold the whole serialization;
    /// a failed encode performs no partial write.
    pub fn encode(&self, out: &mut [u8]) -> Result<usize, ProtoError> {
        let needed = Layout::compute(self.schema).serialized_size(self);
        if out.len() < needed {
            return Err(ProtoError::BufferTooSmall {
                needed,
                available: out.len(),
            });
        }

        let mut writer = ByteWriter::new(out);
        for value in &self.values {
            match value {
                ScalarValue::U8(v) => write_scalar(&mut writer, &v.to_le_bytes())?,
                ScalarValue::I8(v) => write_scalar(&mut writer, &v.to_le_bytes())?,
                ScalarValue::U16(v) => write_scalar(&mut writer, &v.to_le_bytes())?,
                ScalarValue::I16(v) => write_scalar(&mut writer, &v.to_le_bytes())?,
                ScalarValue::U32(v) => write_scalar(&mut writer, &v.to_le_bytes())?,
                ScalarValue::I32(v) => write_scalar(&mut writer, &v.to_le_bytes())?,
                ScalarValue::U64(v) => write_scalar(&mut writer, &v.to_le_bytes())?,
                ScalarValue::I64(v) => write_scalar(&mut writer, &v.to_le_bytes())?,
                ScalarValue::F32(v) => write_scalar(&mut writer, &v.to_le_bytes())?,
                ScalarValue::F64(v) => write_scalar(&mut writer, &v.to_le_bytes())?,
                ScalarValue::Text(text) => {
                    writer.write_byte(text.len() as u8)?;
                    writer.write_bytes(text.as_bytes())?;
                }
            }
        }

        Ok(writer.len())
    }

    /// Decode a buffer into a fresh instance of `schema`.
    pub fn decode(schema: &'a Schema, data: &[u8]) -> Result<Instance<'a>, ProtoError> {
        let values = decode_values(schema, data)?;
        Ok(Instance { schema, values })
    }

    /// Decode a buffer into this instance, fully overwriting its previous
    /// state. Fields are decoded into a staging set and committed only
    /// when every field has been read, so a failure leaves the instance
    /// exactly as it was.
    pub fn decode_into(&mut self, data: &[u8]) -> Result<(), ProtoError> {
        self.values = decode_values(self.schema, data)?;
        Ok(())
    }

    /// Serialize this instance as a flat JSON object, one key per field.
    /// Fails with `BufferTooSmall` if the rendered text would exceed
    /// `max_len` bytes.
    pub fn encode_json(&self, max_len: usize) -> Result<String, ProtoError> {
        let mut object = serde_json::Map::new();
        for (field, value) in self.schema.fields().iter().zip(&self.values) {
            object.insert(field.name().to_owned(), value.to_json(field)?);
        }

        let text = serde_json::Value::Object(object).to_string();
        if text.len() > max_len {
            return Err(ProtoError::BufferTooSmall {
                needed: text.len(),
                available: max_len,
            });
        }
        Ok(text)
    }

    /// Populate this instance from a flat JSON object.
    ///
    /// Every declared field name must be present (checked for all fields
    /// before any field is updated); unknown extra keys are ignored. Each
    /// field is then updated in schema order, and the first failing update
    /// aborts with `InvalidValue` for that field. Fields updated before
    /// the failure keep their new values.
    pub fn decode_json(&mut self, text: &str) -> Result<(), ProtoError> {
        let parsed: serde_json::Value =
            serde_json::from_str(text).map_err(|err| ProtoError::ParseError(err.to_string()))?;
        let object = parsed
            .as_object()
            .ok_or_else(|| ProtoError::ParseError("expected a JSON object".to_owned()))?;

        let schema = self.schema;
        for field in schema.fields() {
            if !object.contains_key(field.name()) {
                return Err(ProtoError::MissingKey(field.name().to_owned()));
            }
        }

        for (index, field) in schema.fields().iter().enumerate() {
            ScalarValue::from_json(field, &object[field.name()])
                .and_then(|value| self.update_at(index, value))
                .map_err(|_| ProtoError::InvalidValue(field.name().to_owned()))?;
        }

        Ok(())
    }
}

fn write_scalar(writer: &mut ByteWriter, payload: &[u8]) -> Result<(), ProtoError> {
    writer.write_byte(payload.len() as u8)?;
    writer.write_bytes(payload)
}

/// Read one length-prefixed record per schema field and reinterpret each
/// payload at its field's declared kind.
fn decode_values(schema: &Schema, data: &[u8]) -> Result<Vec<ScalarValue>, ProtoError> {
    let mut reader = ByteReader::new(data);
    let mut values = Vec::with_capacity(schema.fields().len());

    for field in schema.fields() {
        let truncated = || ProtoError::TruncatedInput(field.name().to_owned());
        let len = reader.read_byte().ok_or_else(truncated)? as usize;
        let payload = reader.read_bytes(len).ok_or_else(truncated)?;

        let value = match field.kind().native_width() {
            Some(width) => {
                if len != width {
                    return Err(ProtoError::MalformedScalar {
                        name: field.name().to_owned(),
                        expected: width,
                        found: len,
                    });
                }
                reinterpret_scalar(field, payload)?
            }
            None => {
                if len > field.capacity() as usize {
                    return Err(ProtoError::InvalidSize {
                        name: field.name().to_owned(),
                        length: len,
                        capacity: field.capacity(),
                    });
                }
                let text = std::str::from_utf8(payload)
                    .map_err(|_| ProtoError::InvalidEncoding(field.name().to_owned()))?;
                ScalarValue::Text(text.to_owned())
            }
        };
        values.push(value);
    }

    Ok(values)
}

fn reinterpret_scalar(field: &FieldDescriptor, payload: &[u8]) -> Result<ScalarValue, ProtoError> {
    let malformed = || ProtoError::MalformedScalar {
        name: field.name().to_owned(),
        expected: field.kind().native_width().unwrap_or(0),
        found: payload.len(),
    };

    // The length byte has already been checked against the native width;
    // the conversions below only re-state that as a slice-to-array bound.
    Ok(match field.kind() {
        ScalarKind::U8 => ScalarValue::U8(*payload.first().ok_or_else(malformed)?),
        ScalarKind::I8 => ScalarValue::I8(*payload.first().ok_or_else(malformed)? as i8),
        ScalarKind::U16 => ScalarValue::U16(u16::from_le_bytes(
            payload.try_into().map_err(|_| malformed())?,
        )),
        ScalarKind::I16 => ScalarValue::I16(i16::from_le_bytes(
            payload.try_into().map_err(|_| malformed())?,
        )),
        ScalarKind::U32 => ScalarValue::U32(u32::from_le_bytes(
            payload.try_into().map_err(|_| malformed())?,
        )),
        ScalarKind::I32 => ScalarValue::I32(i32::from_le_bytes(
            payload.try_into().map_err(|_| malformed())?,
        )),
        ScalarKind::U64 => ScalarValue::U64(u64::from_le_bytes(
            payload.try_into().map_err(|_| malformed())?,
        )),
        ScalarKind::I64 => ScalarValue::I64(i64::from_le_bytes(
            payload.try_into().map_err(|_| malformed())?,
        )),
        ScalarKind::F32 => ScalarValue::F32(f32::from_le_bytes(
            payload.try_into().map_err(|_| malformed())?,
        )),
        ScalarKind::F64 => ScalarValue::F64(f64::from_le_bytes(
            payload.try_into().map_err(|_| malformed())?,
        )),
        ScalarKind::Text => return Err(malformed()),
    })
}
