use xxhash_rust::xxh3::{Xxh3, xxh3_64_with_seed};

const XXH3_SEED: u64 = 0x6c65_7474_6572_6176;

/// 64-bit XXH3 of `s` with the crate's fixed seed.
///
/// Stable across runs, processes and platforms, so it is safe to derive persistent per-user
/// colors from it.
pub fn stable_hash(s: &str) -> u64 {
    xxh3_64_with_seed(s.as_bytes(), XXH3_SEED)
}

/// Streaming hasher for 128-bit fingerprints. Variable-length fields are length-prefixed so
/// adjacent fields cannot alias.
pub(crate) struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    pub(crate) fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    pub(crate) fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    pub(crate) fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    pub(crate) fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    pub(crate) fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    pub(crate) fn write_opt_str(&mut self, s: Option<&str>) {
        match s {
            Some(s) => {
                self.write_u8(1);
                self.write_str(s);
            }
            None => self.write_u8(0),
        }
    }

    pub(crate) fn finish128(self) -> u128 {
        self.inner.digest128()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/hash.rs"]
mod tests;
