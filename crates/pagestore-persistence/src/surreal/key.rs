//! Record key encoding
//!
//! Identifiers such as `/about` or `data/content/about.json` are not valid
//! bare SurrealDB record keys. Letters, digits and `-` pass through; every
//! other byte becomes `_XX` with two uppercase hex digits. `_` itself is
//! always escaped, which keeps the mapping reversible.

#[cfg(test)]
use pagestore_domain::StorageError;

/// Record key for `id`
pub fn encode_key(id: &str) -> String {
    let mut key = String::with_capacity(id.len());
    for byte in id.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            key.push(byte as char);
        } else {
            key.push_str(&format!("_{byte:02X}"));
        }
    }
    key
}

/// Inverse of [`encode_key`]; reads take identifiers from the document body
#[cfg(test)]
pub(crate) fn decode_key(key: &str) -> Result<String, StorageError> {
    let bytes = key.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'_' {
            let hex = key
                .get(i + 1..i + 3)
                .ok_or_else(|| StorageError::corrupt(key, "truncated escape"))?;
            let byte = u8::from_str_radix(hex, 16)
                .map_err(|_| StorageError::corrupt(key, format!("bad escape _{hex}")))?;
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).map_err(|e| StorageError::corrupt(key, e.to_string()))
}
