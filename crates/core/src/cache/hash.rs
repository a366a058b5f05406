//! Cache key generation for stored responses.

use sha2::{Digest, Sha256};

/// Compute the cache key for a request.
///
/// The method is upper-cased; the URL is taken verbatim, so callers strip
/// fragments before keying.
pub fn compute_cache_key(method: &str, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(method.to_ascii_uppercase().as_bytes());
    hasher.update(b"\n");
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}
