//! Pure cache key derivation.
//!
//! These are deliberately free functions: write-path code that invalidates
//! entries after a mutation derives the exact (tag, key) pair the read
//! path used, without performing the cached call.

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::{CacheError, Result};

/// Hex digest length kept in tags and keys.
const DIGEST_LEN: usize = 32;

fn digest(input: &str) -> String {
    let mut hex = format!("{:x}", Sha256::digest(input.as_bytes()));
    hex.truncate(DIGEST_LEN);
    hex
}

/// Returns the hash tag grouping every entry for `method` under
/// `namespace`.
///
/// The namespace is an explicit string chosen at decorator construction,
/// so tags stay stable across refactors.
pub fn hash_tag(namespace: &str, method: &str) -> String {
    digest(&format!("{namespace}::{method}"))
}

/// Returns the cache key for one `(method, args)` invocation.
///
/// The key embeds the hash tag as a prefix, so an entry is always
/// reachable through its tag, followed by a digest of the method name and
/// the serialized arguments.
pub fn build_key<A: Serialize>(namespace: &str, method: &str, args: &A) -> Result<String> {
    let serialized =
        serde_json::to_string(args).map_err(|e| CacheError::Serialization(e.to_string()))?;
    Ok(format!(
        "{}.{}",
        hash_tag(namespace, method),
        digest(&format!("{method}{serialized}"))
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_key_is_deterministic() {
        let a = build_key("customers", "find", &(42i64,)).unwrap();
        let b = build_key("customers", "find", &(42i64,)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_key_varies_with_args() {
        let a = build_key("customers", "find", &(42i64,)).unwrap();
        let b = build_key("customers", "find", &(43i64,)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_build_key_varies_with_arg_order_and_count() {
        let ab = build_key("customers", "search_by", &("a", "b")).unwrap();
        let ba = build_key("customers", "search_by", &("b", "a")).unwrap();
        let a = build_key("customers", "search_by", &("a",)).unwrap();
        assert_ne!(ab, ba);
        assert_ne!(ab, a);
    }

    #[test]
    fn test_build_key_varies_with_method_and_namespace() {
        let find = build_key("customers", "find", &(42i64,)).unwrap();
        let search = build_key("customers", "search", &(42i64,)).unwrap();
        let other_ns = build_key("subscriptions", "find", &(42i64,)).unwrap();
        assert_ne!(find, search);
        assert_ne!(find, other_ns);
    }

    #[test]
    fn test_key_is_prefixed_by_hash_tag() {
        let tag = hash_tag("customers", "find");
        let key = build_key("customers", "find", &(42i64,)).unwrap();
        assert!(key.starts_with(&format!("{tag}.")));
    }

    #[test]
    fn test_digest_length() {
        assert_eq!(hash_tag("customers", "find").len(), DIGEST_LEN);
    }
}
