use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;

use crate::foundation::error::AvatarResult;
use crate::service::avatar::Avatar;
use crate::service::fingerprint::AvatarFingerprint;

/// Cache sizing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AvatarCacheOpts {
    /// Maximum number of cached avatars. Once reached, new results are returned uncached.
    pub max_entries: usize,
}

impl Default for AvatarCacheOpts {
    fn default() -> Self {
        Self { max_entries: 4096 }
    }
}

/// Cache counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests answered from the cache.
    pub hits: u64,
    /// Requests that had to render.
    pub misses: u64,
    /// Slots currently held.
    pub entries: usize,
}

type Slot = Arc<Mutex<Option<Avatar>>>;

/// Fingerprint-keyed avatar cache.
///
/// Each fingerprint owns a slot mutex. A request holds its slot while rendering, so
/// concurrent requests for the same fingerprint wait for the first one and reuse its result,
/// while different fingerprints never contend. A failed render removes its slot, so errors
/// never count against `max_entries`.
pub(crate) struct AvatarCache {
    opts: AvatarCacheOpts,
    slots: DashMap<AvatarFingerprint, Slot>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl AvatarCache {
    pub(crate) fn new(opts: AvatarCacheOpts) -> Self {
        Self {
            opts,
            slots: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub(crate) fn get_or_try_insert_with(
        &self,
        key: AvatarFingerprint,
        compute: impl FnOnce() -> AvatarResult<Avatar>,
    ) -> AvatarResult<Avatar> {
        let existing = self.slots.get(&key).map(|slot| Arc::clone(slot.value()));
        let slot = match existing {
            Some(slot) => slot,
            None if self.slots.len() >= self.opts.max_entries => {
                tracing::debug!(max_entries = self.opts.max_entries, "avatar cache full");
                self.misses.fetch_add(1, Ordering::Relaxed);
                return compute();
            }
            None => Arc::clone(self.slots.entry(key).or_default().value()),
        };

        let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(hit) = guard.as_ref() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(hi = key.hi, lo = key.lo, "avatar cache hit");
            return Ok(hit.clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(hi = key.hi, lo = key.lo, "avatar cache miss");
        match compute() {
            Ok(avatar) => {
                *guard = Some(avatar.clone());
                Ok(avatar)
            }
            Err(e) => {
                drop(guard);
                self.release_empty_slot(&key, &slot);
                Err(e)
            }
        }
    }

    // A slot another request is still filling stays; that request releases it if it fails too.
    fn release_empty_slot(&self, key: &AvatarFingerprint, slot: &Slot) {
        self.slots.remove_if(key, |_, current| {
            Arc::ptr_eq(current, slot) && current.try_lock().is_ok_and(|g| g.is_none())
        });
    }

    pub(crate) fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.slots.len(),
        }
    }

    pub(crate) fn clear(&self) {
        self.slots.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/service/cache.rs"]
mod tests;
