//! Identifier normalization and path-segment escaping.
//!
//! Layer identifiers are UUIDs. The service also hands them out as resource
//! references such as `layer:///apps/staging/<uuid>` or
//! `layer:///conversations/<uuid>`; both forms normalize to the bare UUID.

/// Byte offsets of the hyphens in an 8-4-4-4-12 UUID.
const HYPHENS: [usize; 4] = [8, 13, 18, 23];
const UUID_LEN: usize = 36;

/// Strip any resource-reference prefix and return the UUID, or `None` if the
/// remainder is not an 8-4-4-4-12 hexadecimal UUID (case-insensitive).
///
/// ```
/// use layer_api::id::normalize;
///
/// let id = "24f43c32-4d95-11e4-b3a2-0fd00000020d";
/// assert_eq!(normalize(id), Some(id));
/// assert_eq!(normalize(&format!("layer:///conversations/{id}")), Some(id));
/// assert_eq!(normalize("12345"), None);
/// ```
#[must_use]
pub fn normalize(value: &str) -> Option<&str> {
    if value.is_empty() {
        return None;
    }
    let tail = value.rsplit('/').next().unwrap_or(value);
    is_uuid(tail).then_some(tail)
}

/// Whether `s` has the 8-4-4-4-12 hexadecimal shape.
#[must_use]
pub fn is_uuid(s: &str) -> bool {
    s.len() == UUID_LEN
        && s.bytes().enumerate().all(|(i, b)| {
            if HYPHENS.contains(&i) {
                b == b'-'
            } else {
                b.is_ascii_hexdigit()
            }
        })
}

/// Percent-escape a value for use as a single URL path segment.
pub(crate) fn escape_segment(value: &str) -> String {
    // form-urlencoding leaves `*-._` alone and turns spaces into `+`; a
    // literal `+` is always emitted as `%2B`, so every `+` here was a space.
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
