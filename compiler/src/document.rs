use serde::Deserialize;

/// A raw schema document as it appears on disk, before validation. Absent
/// keys deserialize to `None`/empty so the validator can report them as
/// schema errors instead of parse errors.
#[derive(Debug, Deserialize)]
pub struct RawDocument {
    pub syntax: Option<String>,
    pub package: Option<String>,
    #[serde(default)]
    pub fields: Vec<RawField>,
}

/// One raw field record: `{name, type, maximum_size}`.
#[derive(Debug, Deserialize)]
pub struct RawField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_token: String,
    pub maximum_size: Option<u32>,
}
