use std::borrow::Cow;

use crate::{JsonObject, JsonValue};

/// Accessors shared by a value and by an absent value.
///
/// Implemented for `&JsonValue` and `Option<&JsonValue>`. On `None` every
/// method returns `None`, so navigation chains compose through missing
/// paths without checks at each step:
///
/// ```
/// use basekit_json::{JsonAccess, JsonValue};
///
/// let doc = JsonValue::parse(br#"{"user": {"address": {"city": "Oslo"}}}"#).unwrap();
///
/// assert_eq!(doc.get("user").get("address").get("city").as_str(), Some("Oslo"));
/// assert_eq!(doc.get("missing").get("anything").get("deeper").as_integer(), None);
/// assert_eq!(doc.get("user").at(0).as_object(), None);
/// ```
pub trait JsonAccess<'a>: Sized {
    /// The value this accessor reads, if present.
    fn value(self) -> Option<&'a JsonValue>;

    fn get(self, key: &str) -> Option<&'a JsonValue> {
        self.value()?.get(key)
    }

    fn at(self, index: usize) -> Option<&'a JsonValue> {
        self.value()?.at(index)
    }

    fn as_array(self) -> Option<&'a [JsonValue]> {
        self.value()?.as_array()
    }

    fn as_object(self) -> Option<&'a JsonObject> {
        self.value()?.as_object()
    }

    fn as_double(self) -> Option<f64> {
        self.value()?.as_double()
    }

    fn as_integer(self) -> Option<i64> {
        self.value()?.as_integer()
    }

    fn as_string(self) -> Option<Cow<'a, str>> {
        self.value()?.as_string()
    }

    fn as_str(self) -> Option<&'a str> {
        self.value()?.as_str()
    }

    fn as_boolean(self) -> Option<bool> {
        self.value()?.as_boolean()
    }

    /// `true` only for a present JSON `null`; absence is not null.
    fn is_null(self) -> bool {
        self.value().is_some_and(JsonValue::is_null)
    }
}

impl<'a> JsonAccess<'a> for &'a JsonValue {
    fn value(self) -> Option<&'a JsonValue> {
        Some(self)
    }
}

impl<'a> JsonAccess<'a> for Option<&'a JsonValue> {
    fn value(self) -> Option<&'a JsonValue> {
        self
    }
}
