//! [`JsonValue`]: the immutable JSON tree and its total accessors.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};

use crate::pointer;

/// Key/value mapping of a JSON object.
///
/// Iteration follows insertion (document) order; equality ignores order.
pub type JsonObject = IndexMap<String, JsonValue>;

/// A parsed JSON document.
///
/// The tree is built once, bottom-up, and never modified afterwards. All
/// accessors are total: asking for the wrong shape yields `None` rather
/// than an error, so lookups can be chained through documents of unknown
/// shape (see [`JsonAccess`](crate::JsonAccess)).
///
/// There is no boolean variant: `true` and `false` parse as `Integer(1)` and
/// `Integer(0)`, and [`as_boolean`](JsonValue::as_boolean) reads integers.
///
/// # Examples
///
/// ```
/// use basekit_json::{JsonAccess, JsonValue};
///
/// let doc = JsonValue::parse(br#"{"user": {"name": "Ada", "age": 36}}"#).unwrap();
///
/// assert_eq!(doc.get("user").get("name").as_str(), Some("Ada"));
/// assert_eq!(doc.get("user").get("age").as_integer(), Some(36));
/// assert_eq!(doc.get("user").get("email").get("domain").as_str(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum JsonValue {
    Array(Vec<JsonValue>),
    Object(JsonObject),
    /// Any number without a whole value in `i64` range.
    Number(f64),
    /// Whole number within `i64` range, kept exact. Parsing also puts
    /// literals such as `2.0` and `1e3` here.
    Integer(i64),
    #[default]
    Null,
    String(String),
}

/// Discriminator of a [`JsonValue`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Array,
    Object,
    Number,
    Integer,
    Null,
    String,
}

impl JsonKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JsonKind::Array => "array",
            JsonKind::Object => "object",
            JsonKind::Number => "number",
            JsonKind::Integer => "integer",
            JsonKind::Null => "null",
            JsonKind::String => "string",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl JsonValue {
    /// The `Null` value.
    pub const fn new() -> Self {
        JsonValue::Null
    }

    pub fn kind(&self) -> JsonKind {
        match self {
            JsonValue::Array(_) => JsonKind::Array,
            JsonValue::Object(_) => JsonKind::Object,
            JsonValue::Number(_) => JsonKind::Number,
            JsonValue::Integer(_) => JsonKind::Integer,
            JsonValue::Null => JsonKind::Null,
            JsonValue::String(_) => JsonKind::String,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Numeric value of a `Number` or an `Integer`, widened to `f64`.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => Some(*n),
            JsonValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Exact value of an `Integer`. A `Number` is never narrowed.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            JsonValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Text of a `String`, or the textual form of a number.
    ///
    /// Integers print in decimal (`1`). Numbers print in their shortest
    /// round-trip form and always keep a fractional part or an exponent
    /// (`2.3`, `1.0`, `1e300`, `1.5e-7`), so the two never collide. Exponents
    /// carry no `+` sign and no zero padding.
    pub fn as_string(&self) -> Option<Cow<'_, str>> {
        match self {
            JsonValue::String(s) => Some(Cow::Borrowed(s)),
            JsonValue::Integer(i) => Some(Cow::Owned(i.to_string())),
            JsonValue::Number(n) => Some(Cow::Owned(format!("{n:?}"))),
            _ => None,
        }
    }

    /// Borrowed text of a `String`; numbers are not converted.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// `true` for a non-zero `Integer`, `false` for zero.
    ///
    /// `Number` is not coerced, not even `0.0`.
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            JsonValue::Integer(i) => Some(*i != 0),
            _ => None,
        }
    }

    /// Value stored under `key` when `self` is an object.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Element at `index` when `self` is an array and the index is in bounds.
    pub fn at(&self, index: usize) -> Option<&JsonValue> {
        match self {
            JsonValue::Array(items) => items.get(index),
            _ => None,
        }
    }

    /// Look up a value by RFC 6901 JSON Pointer.
    ///
    /// `""` is the document itself. `~1` and `~0` in a step stand for `/` and
    /// `~`. Array steps must be canonical decimal indices (`0`, `12`, not
    /// `01` or `-`). A pointer that does not start with `/` finds nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use basekit_json::JsonValue;
    ///
    /// let doc = JsonValue::parse(br#"{"a/b": [10, {"c": true}]}"#).unwrap();
    /// assert_eq!(doc.pointer("/a~1b/1/c").and_then(JsonValue::as_boolean), Some(true));
    /// assert_eq!(doc.pointer("/a~1b/2"), None);
    /// ```
    pub fn pointer(&self, pointer: &str) -> Option<&JsonValue> {
        pointer::steps(pointer)?.try_fold(self, |current, step| match current {
            JsonValue::Object(map) => map.get(&*step),
            JsonValue::Array(items) => pointer::parse_index(&step).and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

impl fmt::Display for JsonValue {
    /// Compact JSON text. Non-finite numbers print as `null`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl Serialize for JsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            JsonValue::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            JsonValue::Number(n) => serializer.serialize_f64(*n),
            JsonValue::Integer(i) => serializer.serialize_i64(*i),
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::String(s) => serializer.serialize_str(s),
        }
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        JsonValue::Integer(value)
    }
}

impl From<i32> for JsonValue {
    fn from(value: i32) -> Self {
        JsonValue::Integer(i64::from(value))
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        JsonValue::Number(value)
    }
}

/// Booleans are stored as `Integer(1)` / `Integer(0)`.
impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Integer(i64::from(value))
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_owned())
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(value: Vec<JsonValue>) -> Self {
        JsonValue::Array(value)
    }
}

impl From<JsonObject> for JsonValue {
    fn from(value: JsonObject) -> Self {
        JsonValue::Object(value)
    }
}

impl<T: Into<JsonValue>> From<Option<T>> for JsonValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(JsonValue::Null, Into::into)
    }
}

impl FromIterator<JsonValue> for JsonValue {
    fn from_iter<I: IntoIterator<Item = JsonValue>>(iter: I) -> Self {
        JsonValue::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, JsonValue)> for JsonValue {
    fn from_iter<I: IntoIterator<Item = (K, JsonValue)>>(iter: I) -> Self {
        JsonValue::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(entries: &[(&str, JsonValue)]) -> JsonValue {
        entries.iter().map(|(k, v)| (*k, v.clone())).collect()
    }

    #[test]
    fn test_default_is_null() {
        assert_eq!(JsonValue::default(), JsonValue::Null);
        assert_eq!(JsonValue::new(), JsonValue::Null);
        assert!(JsonValue::new().is_null());
    }

    #[test]
    fn test_numeric_accessors() {
        let int = JsonValue::Integer(7);
        assert_eq!(int.as_integer(), Some(7));
        assert_eq!(int.as_double(), Some(7.0));

        let num = JsonValue::Number(2.5);
        assert_eq!(num.as_integer(), None);
        assert_eq!(num.as_double(), Some(2.5));

        assert_eq!(JsonValue::from("7").as_integer(), None);
        assert_eq!(JsonValue::Null.as_double(), None);
    }

    #[test]
    fn test_as_string_formats_numbers() {
        assert_eq!(JsonValue::Integer(1).as_string().as_deref(), Some("1"));
        assert_eq!(JsonValue::Integer(-42).as_string().as_deref(), Some("-42"));
        assert_eq!(JsonValue::Number(2.3).as_string().as_deref(), Some("2.3"));
        assert_eq!(JsonValue::Number(1.0).as_string().as_deref(), Some("1.0"));
        assert_eq!(JsonValue::Number(1e300).as_string().as_deref(), Some("1e300"));
        assert_eq!(JsonValue::Number(-2.5e300).as_string().as_deref(), Some("-2.5e300"));
        assert_eq!(JsonValue::Number(1.5e-7).as_string().as_deref(), Some("1.5e-7"));
        assert_eq!(JsonValue::from("text").as_string().as_deref(), Some("text"));
        assert_eq!(JsonValue::Null.as_string(), None);
        assert_eq!(JsonValue::Array(vec![]).as_string(), None);
    }

    #[test]
    fn test_as_str_only_reads_strings() {
        assert_eq!(JsonValue::from("x").as_str(), Some("x"));
        assert_eq!(JsonValue::Integer(1).as_str(), None);
    }

    #[test]
    fn test_boolean_coercion() {
        assert_eq!(JsonValue::Integer(0).as_boolean(), Some(false));
        assert_eq!(JsonValue::Integer(5).as_boolean(), Some(true));
        assert_eq!(JsonValue::Integer(-1).as_boolean(), Some(true));
        assert_eq!(JsonValue::Number(0.0).as_boolean(), None);
        assert_eq!(JsonValue::Number(1.0).as_boolean(), None);
        assert_eq!(JsonValue::from("true").as_boolean(), None);
        assert_eq!(JsonValue::from(true), JsonValue::Integer(1));
        assert_eq!(JsonValue::from(false), JsonValue::Integer(0));
    }

    #[test]
    fn test_container_accessors() {
        let arr: JsonValue = vec![JsonValue::Integer(1), JsonValue::Null].into();
        assert_eq!(arr.as_array().map(<[JsonValue]>::len), Some(2));
        assert_eq!(arr.as_object(), None);

        let obj = object(&[("k", JsonValue::Integer(1))]);
        assert_eq!(obj.as_object().map(JsonObject::len), Some(1));
        assert_eq!(obj.as_array(), None);
    }

    #[test]
    fn test_index_out_of_bounds_is_absent() {
        let arr: JsonValue = [1, 2, 3].into_iter().map(JsonValue::from).collect();
        assert_eq!(arr.at(0), Some(&JsonValue::Integer(1)));
        assert_eq!(arr.at(2), Some(&JsonValue::Integer(3)));
        assert_eq!(arr.at(3), None);
        assert_eq!(arr.at(usize::MAX), None);
        assert_eq!(JsonValue::Null.at(0), None);
    }

    #[test]
    fn test_get_only_on_objects() {
        let obj = object(&[("name", JsonValue::from("x"))]);
        assert_eq!(obj.get("name"), Some(&JsonValue::from("x")));
        assert_eq!(obj.get("missing"), None);
        assert_eq!(JsonValue::from("name").get("name"), None);
        assert_eq!(JsonValue::Array(vec![]).get("0"), None);
    }

    #[test]
    fn test_object_equality_ignores_order() {
        let a = object(&[("x", 1.into()), ("y", 2.into())]);
        let b = object(&[("y", 2.into()), ("x", 1.into())]);
        assert_eq!(a, b);

        let arr_a: JsonValue = vec![1.into(), 2.into()].into();
        let arr_b: JsonValue = vec![2.into(), 1.into()].into();
        assert_ne!(arr_a, arr_b);
    }

    #[test]
    fn test_integer_and_number_are_distinct() {
        assert_ne!(JsonValue::Integer(1), JsonValue::Number(1.0));
        assert_eq!(JsonValue::Integer(1).kind(), JsonKind::Integer);
        assert_eq!(JsonValue::Number(1.0).kind(), JsonKind::Number);
    }

    #[test]
    fn test_display_is_compact_json() {
        let doc = object(&[
            ("a", 1.into()),
            ("b", 2.5.into()),
            ("c", vec![JsonValue::Null, "s".into()].into()),
        ]);
        assert_eq!(doc.to_string(), r#"{"a":1,"b":2.5,"c":[null,"s"]}"#);
        assert_eq!(JsonValue::Number(f64::NAN).to_string(), "null");
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(JsonValue::from(None::<i64>), JsonValue::Null);
        assert_eq!(JsonValue::from(Some("v")), JsonValue::from("v"));
    }

    #[test]
    fn test_kind_display() {
        let names: Vec<String> = [
            JsonValue::Array(vec![]),
            JsonValue::Object(JsonObject::new()),
            JsonValue::Number(0.5),
            JsonValue::Integer(0),
            JsonValue::Null,
            JsonValue::from(""),
        ]
        .iter()
        .map(|v| v.kind().to_string())
        .collect();
        assert_eq!(
            names,
            ["array", "object", "number", "integer", "null", "string"]
        );
    }
}
