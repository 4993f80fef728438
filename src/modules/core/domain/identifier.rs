//! Document identifier format

/// Width of a MongoDB ObjectId rendered as hex (12 bytes)
pub const OBJECT_ID_HEX_LEN: usize = 24;

/// Returns true if `id` has the store's identifier format: exactly 24 hex digits.
///
/// This only checks syntax; it never touches the store.
pub fn is_valid_object_id(id: &str) -> bool {
    id.len() == OBJECT_ID_HEX_LEN && id.bytes().all(|b| b.is_ascii_hexdigit())
}
