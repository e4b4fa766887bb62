//! Content fingerprints for change detection.
//!
//! A [`Fingerprint`] is a 128-bit XXH3 digest used for cheap equality
//! comparison, not security. The build pipeline uses fingerprints in two
//! distinct roles that must never be confused:
//!
//! - the digest of a resolved output **path** names that path's cache entry
//!   file, keeping entry filenames fixed-length and filesystem-safe no
//!   matter how deep or strange the path is;
//! - the digest of the rendered **content** is the value stored inside the
//!   entry, compared on the next build to decide skip-vs-write.
//!
//! [`ContentCache`](crate::cache::ContentCache) keeps the two roles apart.

use std::fmt;

/// A 128-bit XXH3 content digest.
///
/// Two inputs with the same `Fingerprint` are assumed identical. The digest
/// is fast to compute and stable across runs and platforms, which is what
/// an on-disk cache keyed by it requires.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 16]);

impl Fingerprint {
    /// Digest a byte slice with XXH3-128.
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = xxhash_rust::xxh3::xxh3_128(data);
        Self(hash.to_le_bytes())
    }

    /// Parse the 32-character lowercase hex form produced by `Display`.
    ///
    /// Returns `None` for anything that is not exactly 16 hex-encoded bytes.
    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        let arr: [u8; 16] = bytes.try_into().ok()?;
        Some(Self(arr))
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}
