//! JSON Pointer (RFC 6901) step parsing used by [`JsonValue::pointer`](crate::JsonValue::pointer).

use std::borrow::Cow;

/// Split a pointer into unescaped reference tokens.
///
/// Returns `None` for a non-empty pointer without a leading `/`.
pub(crate) fn steps(pointer: &str) -> Option<impl Iterator<Item = Cow<'_, str>>> {
    let tokens = if pointer.is_empty() {
        None
    } else {
        Some(pointer.strip_prefix('/')?.split('/'))
    };
    Some(tokens.into_iter().flatten().map(unescape_component))
}

/// Unescape one reference token: `~1` becomes `/`, then `~0` becomes `~`.
pub(crate) fn unescape_component(component: &str) -> Cow<'_, str> {
    if !component.contains('~') {
        return Cow::Borrowed(component);
    }
    // Order matters: "~01" must decode to "~1", not "/".
    Cow::Owned(component.replace("~1", "/").replace("~0", "~"))
}

/// Parse an array index token. Leading zeros, signs and `-` are rejected.
pub(crate) fn parse_index(token: &str) -> Option<usize> {
    let bytes = token.as_bytes();
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    token.parse().ok()
}
