//! Content hashing
//!
//! Node trees carry a 64-bit hash of the source asset node they were built
//! from; scenes hash their static geometry so the renderer can tell whether
//! the merged acceleration structure is still valid. Both use xxh3.

use xxhash_rust::xxh3::{Xxh3, xxh3_64};

/// Hash of a source asset node name.
#[inline]
#[must_use]
pub fn hash_name(name: &str) -> u64 {
    xxh3_64(name.as_bytes())
}

/// Incremental hasher over plain scene values.
///
/// Values are fed as little-endian bytes so the result does not depend on
/// the host.
#[derive(Clone)]
pub struct ContentHasher {
    inner: Xxh3,
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentHasher {
    #[must_use]
    pub fn new() -> Self {
        Self { inner: Xxh3::new() }
    }

    pub fn write_u32(&mut self, value: u32) {
        self.inner.update(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.inner.update(&value.to_le_bytes());
    }

    pub fn write_f32s(&mut self, values: &[f32]) {
        for value in values {
            self.inner.update(&value.to_le_bytes());
        }
    }

    pub fn write_f64s(&mut self, values: &[f64]) {
        for value in values {
            self.inner.update(&value.to_le_bytes());
        }
    }

    #[must_use]
    pub fn finish(&self) -> u64 {
        self.inner.digest()
    }
}
