use serde::Serialize;
use sha2::{Digest, Sha256};

/// Content-addressable cache key: the SHA-256 hex digest of the canonical
/// serialization of the full input tuple.
///
/// Canonical means: struct field order is fixed by declaration, and map
/// fields are `BTreeMap`s so keys serialize sorted. Semantically identical
/// inputs therefore always hash identically, and any byte-level difference
/// in any one field produces a different key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn for_value<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        let bytes = serde_json::to_vec(value)?;
        let digest = Sha256::digest(&bytes);
        let mut hex = String::with_capacity(digest.len() * 2);
        for byte in digest {
            hex.push_str(&format!("{byte:02x}"));
        }
        Ok(CacheKey(hex))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
