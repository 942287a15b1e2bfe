//! Runtime support for titanium-proto schemas.
//!
//! A schema is an ordered list of typed, optionally bounded fields. This
//! crate holds the validated model ([Schema](struct.Schema.html),
//! [FieldDescriptor](struct.FieldDescriptor.html)), the derived size
//! accounting ([Layout](struct.Layout.html)), and the dynamic
//! [Instance](struct.Instance.html) value model with its length-prefixed
//! binary codec and JSON mirror codec.
//!
//! ```
//! use titanium_proto_schema::*;
//!
//! let schema = Schema::new("Demo".to_owned(), vec![
//!     FieldDescriptor::new("id", "uint32_t", None).unwrap(),
//!     FieldDescriptor::new("label", "string", Some(16)).unwrap(),
//! ]).unwrap();
//!
//! let mut instance = Instance::new(&schema);
//! instance.update_by_name("id", ScalarValue::U32(7)).unwrap();
//! instance.update_by_name("label", ScalarValue::Text("hi".to_owned())).unwrap();
//!
//! let mut buf = [0u8; 64];
//! let written = instance.encode(&mut buf).unwrap();
//! assert_eq!(written, 8);
//! assert_eq!(Instance::decode(&schema, &buf[..written]).unwrap(), instance);
//! ```

pub mod bb;
pub mod error;
pub mod field;
pub mod layout;
pub mod schema;
pub mod value;

pub use bb::*;
pub use error::*;
pub use field::*;
pub use layout::*;
pub use schema::*;
pub use value::*;
