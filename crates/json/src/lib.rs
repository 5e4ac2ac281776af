//! basekit-json - an immutable JSON value tree with total accessors
//!
//! [`JsonValue`] is a closed sum type over the six shapes a parsed document
//! can take. Parsing is the only fallible step; everything after it
//! (accessors, key and index lookups, pointer lookups) returns `None` on a
//! shape mismatch instead of failing.
//!
//! [`JsonAccess`] extends those accessors to `Option<&JsonValue>`, which is
//! what makes lookups chain through documents of unknown shape.
//!
//! # Example
//!
//! ```
//! use basekit_json::{JsonAccess, JsonValue};
//!
//! let doc = JsonValue::parse(br#"{"a":1,"b":2.5,"c":"s","d":[1,2,3],"e":{"x":1},"f":null}"#)?;
//!
//! assert_eq!(doc.get("a").as_integer(), Some(1));
//! assert_eq!(doc.get("b").as_double(), Some(2.5));
//! assert_eq!(doc.get("c").as_str(), Some("s"));
//! assert_eq!(doc.get("e").get("x").as_integer(), Some(1));
//! assert!(doc.get("f").is_null());
//! assert_eq!(doc.get("missing").get("deeper").as_integer(), None);
//! # Ok::<(), basekit_json::JsonError>(())
//! ```

mod access;
mod error;
mod parse;
mod pointer;
mod value;

pub use access::JsonAccess;
pub use error::JsonError;
pub use value::{JsonKind, JsonObject, JsonValue};
