use base64::{engine::general_purpose::URL_SAFE, Engine};

const ID_LEN: usize = 22;

/// Derives a resource id from its natural key.
///
/// The key is base64-encoded (url-safe alphabet, since ids end up embedded
/// in link urls) and truncated to the first 22 characters. Short keys yield
/// the whole encoding. The id is a reversible obfuscation of the key, not a
/// hash, so equal keys always derive equal ids.
pub fn derive_id(key: &str) -> String {
    let mut encoded = URL_SAFE.encode(key.as_bytes());
    encoded.truncate(ID_LEN);
    encoded
}

/// Natural key of a child resource: its name qualified by the parent id.
pub fn child_key(name: &str, parent_id: &str) -> String {
    format!("{}:{}", name, parent_id)
}
