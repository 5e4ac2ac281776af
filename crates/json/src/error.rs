//! JSON decode error type.

use thiserror::Error;

/// Error returned when bytes cannot be turned into a [`JsonValue`](crate::JsonValue).
///
/// There is a single kind. The decoder's own diagnostic is kept as the
/// error source, but callers should not rely on its wording.
#[derive(Debug, Error)]
pub enum JsonError {
    #[error("malformed JSON")]
    Malformed(#[from] serde_json::Error),
}

impl JsonError {
    /// Numeric code platform JSON decoders report for malformed input.
    pub const MALFORMED_CODE: i32 = 3840;

    pub fn code(&self) -> i32 {
        match self {
            JsonError::Malformed(_) => Self::MALFORMED_CODE,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, JsonError::Malformed(_))
    }

    pub(crate) fn unclassifiable(what: &str) -> Self {
        JsonError::Malformed(<serde_json::Error as serde::de::Error>::custom(format!(
            "unclassifiable JSON value: {what}"
        )))
    }
}
