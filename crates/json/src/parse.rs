//! Decoding bytes into [`JsonValue`] and converting to and from `serde_json::Value`.

use std::str::FromStr;

use serde_json::{Number, Value};

use crate::{JsonError, JsonObject, JsonValue};

impl JsonValue {
    /// Parse UTF-8 JSON text (RFC 8259).
    ///
    /// Syntax checking is done by `serde_json`; the resulting tree is then
    /// classified leaves first. Either the whole document is returned or
    /// [`JsonError::Malformed`], never a partial tree.
    ///
    /// # Errors
    ///
    /// [`JsonError::Malformed`] if the bytes are not valid JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use basekit_json::{JsonError, JsonValue};
    ///
    /// let doc = JsonValue::parse(b"[1, 2.5, null]").unwrap();
    /// assert_eq!(doc.at(0).and_then(JsonValue::as_integer), Some(1));
    ///
    /// let err = JsonValue::parse(b"bad json").unwrap_err();
    /// assert!(matches!(err, JsonError::Malformed(_)));
    /// ```
    pub fn parse(bytes: impl AsRef<[u8]>) -> Result<Self, JsonError> {
        let decoded = serde_json::from_slice::<Value>(bytes.as_ref()).map_err(|err| {
            tracing::debug!(error = %err, "rejected malformed JSON payload");
            JsonError::from(err)
        })?;
        JsonValue::try_from(decoded)
    }
}

impl FromStr for JsonValue {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JsonValue::parse(s)
    }
}

impl TryFrom<Value> for JsonValue {
    type Error = JsonError;

    /// Classify a decoded tree: any number with a whole value in `i64` range
    /// (`2`, `2.0`, `1e3`) becomes `Integer`, every other number becomes
    /// `Number`, and `true`/`false` become `Integer(1)`/`Integer(0)`.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::from(b),
            Value::Number(n) => classify_number(&n)?,
            Value::String(s) => JsonValue::String(s),
            Value::Array(items) => JsonValue::Array(
                items
                    .into_iter()
                    .map(JsonValue::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => JsonValue::Object(
                map.into_iter()
                    .map(|(k, v)| Ok((k, JsonValue::try_from(v)?)))
                    .collect::<Result<JsonObject, JsonError>>()?,
            ),
        })
    }
}

/// Lower bound of the `i64` range as an exact `f64`; the upper bound is its negation (exclusive).
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;

fn classify_number(n: &Number) -> Result<JsonValue, JsonError> {
    if let Some(i) = n.as_i64() {
        return Ok(JsonValue::Integer(i));
    }
    match n.as_f64() {
        // Whole values written as `2.0` or `1e3` are integers too.
        Some(f) if f.fract() == 0.0 && (I64_MIN_F64..-I64_MIN_F64).contains(&f) => {
            Ok(JsonValue::Integer(f as i64))
        }
        Some(f) => Ok(JsonValue::Number(f)),
        None => {
            tracing::trace!(number = %n, "decoder produced a number with no f64 form");
            Err(JsonError::unclassifiable("number"))
        }
    }
}

impl From<JsonValue> for Value {
    /// Non-finite numbers have no JSON form and become `null`.
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Integer(i) => Value::from(i),
            JsonValue::Number(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}
